//! Review sessions: one buffer, one rewriter, at most one request in flight.
//!
//! [`Session`] is the single owner of an [`EditBuffer`] and its overlay. A
//! rewrite request snapshots the selection, runs the service call and the
//! comparison on a [`RewriteWorker`] thread, and the reply is installed only
//! when the owning thread calls [`Session::poll`] or [`Session::wait`]. The
//! overlay is therefore never touched from two threads and needs no locks.
//!
//! # Example
//!
//! ```
//! use redraft::session::{FixedRewriter, Session, SessionOptions};
//!
//! let mut session = Session::new(FixedRewriter::new("The cat sits."), SessionOptions::default());
//! session.buffer_mut().set_text("The cat sat.");
//!
//! session.request_rewrite("polish", 0..0)?;
//! let spans = session.wait()?;
//! assert_eq!(spans, 1);
//!
//! session.accept_at(9)?;
//! assert_eq!(session.buffer().text(), "The cat sits.");
//! # Ok::<(), redraft::Error>(())
//! ```

mod rewrite;
mod worker;

pub use rewrite::{CommandSet, FixedRewriter, Rewriter};
pub use worker::{RewriteJob, RewriteReply, RewriteWorker};

use crate::diff::{CompareOptions, compare};
use crate::error::{Error, Result};
use crate::event::{self, LogLevel};
use crate::markup::Span;
use crate::text::EditBuffer;
use std::ops::Range;
use std::sync::Arc;

/// Default name of rewrite worker threads.
pub const DEFAULT_THREAD_NAME: &str = "redraft-rewrite";

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    /// How original and rewrite are paired for alignment.
    pub compare: CompareOptions,
    /// Background text handed to the rewriter with every request.
    pub context: String,
    /// Commands that may be requested. Empty accepts any name.
    pub commands: CommandSet,
    /// Name given to worker threads.
    pub thread_name: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            compare: CompareOptions::default(),
            context: String::new(),
            commands: CommandSet::new(),
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl SessionOptions {
    /// Set the compare options.
    #[must_use]
    pub fn with_compare(mut self, compare: CompareOptions) -> Self {
        self.compare = compare;
        self
    }

    /// Set the context text.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Restrict requests to these commands.
    #[must_use]
    pub fn with_commands(mut self, commands: CommandSet) -> Self {
        self.commands = commands;
        self
    }

    /// Set the worker thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// One interactive review of a buffer against rewrites of it.
pub struct Session {
    buffer: EditBuffer,
    rewriter: Arc<dyn Rewriter>,
    options: SessionOptions,
    pending: Option<RewriteWorker>,
    last_rewrite: Option<String>,
}

impl Session {
    /// Create a session over an empty buffer.
    pub fn new(rewriter: impl Rewriter + 'static, options: SessionOptions) -> Self {
        Self {
            buffer: EditBuffer::new(),
            rewriter: Arc::new(rewriter),
            options,
            pending: None,
            last_rewrite: None,
        }
    }

    /// Get the buffer.
    #[must_use]
    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Get mutable access to the buffer.
    pub fn buffer_mut(&mut self) -> &mut EditBuffer {
        &mut self.buffer
    }

    /// Get the session options.
    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// The text of the last installed rewrite.
    #[must_use]
    pub fn last_rewrite(&self) -> Option<&str> {
        self.last_rewrite.as_deref()
    }

    /// True while a request is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start rewriting `selection`, or the whole buffer when it is empty.
    ///
    /// A request already in flight is abandoned.
    pub fn request_rewrite(&mut self, command: &str, selection: Range<usize>) -> Result<()> {
        if !self.options.commands.accepts(command) {
            return Err(Error::UnknownCommand(command.to_string()));
        }
        self.cancel();

        let len = self.buffer.len_chars();
        let region = if selection.start >= selection.end {
            0..len
        } else {
            selection.start.min(len)..selection.end.min(len)
        };
        let job = RewriteJob {
            command: command.to_string(),
            context: self.options.context.clone(),
            input: self.buffer.slice(region.clone()),
            region: region.clone(),
            revision: self.buffer.revision(),
            options: self.options.compare.clone(),
        };

        let worker = RewriteWorker::spawn(
            Arc::clone(&self.rewriter),
            job,
            &self.options.thread_name,
        )?;
        self.pending = Some(worker);

        event::emit_event(
            event::SESSION_REQUEST,
            &format!(
                r#"{{"command":{},"start":{},"end":{}}}"#,
                event::json_string(command),
                region.start,
                region.end
            ),
        );
        Ok(())
    }

    /// Install the reply if it has arrived.
    ///
    /// Returns the number of pending spans after installing, or `None` while
    /// the request is still running or when nothing was requested.
    pub fn poll(&mut self) -> Result<Option<usize>> {
        let Some(worker) = &self.pending else {
            return Ok(None);
        };
        let Some(outcome) = worker.try_recv() else {
            return Ok(None);
        };
        self.pending = None;
        self.install(outcome).map(Some)
    }

    /// Block until the reply arrives and install it.
    pub fn wait(&mut self) -> Result<usize> {
        let worker = self.pending.take().ok_or(Error::WorkerDisconnected)?;
        self.install(worker.recv())
    }

    /// Abandon the request in flight. Returns false when none was pending.
    pub fn cancel(&mut self) -> bool {
        if self.pending.take().is_some() {
            event::emit_event(event::SESSION_CANCEL, "{}");
            true
        } else {
            false
        }
    }

    fn install(&mut self, outcome: Result<RewriteReply>) -> Result<usize> {
        let reply = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                event::emit_log(LogLevel::Warn, &format!("rewrite failed: {err}"));
                return Err(err);
            }
        };

        let current = self.buffer.revision();
        if reply.revision != current {
            event::emit_log(
                LogLevel::Warn,
                "discarding rewrite: buffer changed while it was in flight",
            );
            return Err(Error::BufferChanged {
                requested: reply.revision,
                current,
            });
        }

        self.buffer.apply_comparison(&reply.comparison, reply.region.clone());
        self.last_rewrite = Some(reply.rewritten);

        let spans = self.buffer.overlay().len();
        event::emit_event(
            event::SESSION_REPLY,
            &format!(
                r#"{{"start":{},"end":{},"spans":{}}}"#,
                reply.region.start, reply.region.end, spans
            ),
        );
        Ok(spans)
    }

    /// Accept the span at `position`.
    pub fn accept_at(&mut self, position: usize) -> Result<Option<Span>> {
        self.buffer.accept_at(position)
    }

    /// Mark where a follow-up comparison should start.
    pub fn set_begin_indicator(&mut self, position: usize) {
        self.buffer.overlay_mut().set_begin_indicator(position);
    }

    /// Re-diff from the begin indicator to the scope end against the last
    /// rewrite, starting at character `rewritten_from` of that rewrite.
    ///
    /// The rewrite suffix becomes the new last rewrite. Returns the number of
    /// pending spans, or `None` without a begin indicator, an active scope or
    /// a previous rewrite.
    pub fn realign_from(&mut self, rewritten_from: usize) -> Option<usize> {
        let overlay = self.buffer.overlay();
        let begin = overlay.begin_indicator()?;
        let scope = overlay.scope()?;
        let rewritten = self.last_rewrite.as_deref()?;

        let end = scope.end.min(self.buffer.len_chars());
        let begin = begin.min(end);
        let suffix: String = rewritten.chars().skip(rewritten_from).collect();
        let comparison = compare(
            &self.buffer.slice(begin..end),
            &suffix,
            &self.options.compare,
        );
        self.buffer.apply_comparison(&comparison, begin..end);
        self.last_rewrite = Some(suffix);

        Some(self.buffer.overlay().len())
    }
}
