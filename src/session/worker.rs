//! Background worker for rewrite requests.
//!
//! # Architecture
//!
//! ```text
//! Owning Thread                        Worker Thread
//! -------------                        -------------
//! snapshot selection
//! spawn(job)  ────────────────────────▶
//!                                        rewriter.rewrite(...)
//!                                        compare(input, output)
//! poll / wait  ◀──────────────────────   send Result<RewriteReply>
//! rebuild overlay
//! ```
//!
//! The worker never touches the buffer or its overlay. Dropping the
//! [`RewriteWorker`] abandons the request: the thread still runs the call to
//! completion but its reply goes nowhere.

use crate::diff::{CompareOptions, Comparison, compare};
use crate::error::{Error, Result};
use crate::session::rewrite::Rewriter;
use std::ops::Range;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Everything the worker needs, copied out of the buffer.
#[derive(Clone, Debug)]
pub struct RewriteJob {
    pub command: String,
    pub context: String,
    /// Text of the selection at request time.
    pub input: String,
    /// Buffer region the input was taken from.
    pub region: Range<usize>,
    /// Buffer revision at request time.
    pub revision: u64,
    pub options: CompareOptions,
}

/// A finished rewrite, ready to be installed on the owning thread.
#[derive(Clone, Debug)]
pub struct RewriteReply {
    pub region: Range<usize>,
    pub revision: u64,
    /// Full text returned by the service.
    pub rewritten: String,
    /// Comparison of the job input against `rewritten`.
    pub comparison: Comparison,
}

fn run_job(rewriter: &dyn Rewriter, job: RewriteJob) -> Result<RewriteReply> {
    let rewritten = rewriter.rewrite(&job.command, &job.context, &job.input)?;
    let comparison = compare(&job.input, &rewritten, &job.options);
    Ok(RewriteReply {
        region: job.region,
        revision: job.revision,
        rewritten,
        comparison,
    })
}

/// Handle to one in-flight rewrite request.
pub struct RewriteWorker {
    rx: Receiver<Result<RewriteReply>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RewriteWorker {
    /// Start `job` on a new named thread.
    pub fn spawn(rewriter: Arc<dyn Rewriter>, job: RewriteJob, thread_name: &str) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || {
                let outcome =
                    std::panic::catch_unwind(AssertUnwindSafe(|| run_job(rewriter.as_ref(), job)))
                        .unwrap_or_else(|_| Err(Error::Rewrite("rewriter panicked".to_string())));
                // The receiver is gone when the request was cancelled.
                let _ = tx.send(outcome);
            })?;

        Ok(Self {
            rx,
            handle: Some(handle),
        })
    }

    /// Non-blocking check for the reply.
    ///
    /// Returns `None` while the request is still running.
    pub fn try_recv(&self) -> Option<Result<RewriteReply>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::WorkerDisconnected)),
        }
    }

    /// Block until the reply arrives.
    pub fn recv(self) -> Result<RewriteReply> {
        self.rx.recv().unwrap_or(Err(Error::WorkerDisconnected))
    }

    /// True once the worker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(thread::JoinHandle::is_finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::TokenAction;
    use crate::session::rewrite::FixedRewriter;

    fn job(input: &str) -> RewriteJob {
        RewriteJob {
            command: "polish".to_string(),
            context: String::new(),
            input: input.to_string(),
            region: 0..input.chars().count(),
            revision: 7,
            options: CompareOptions::default(),
        }
    }

    #[test]
    fn test_worker_compares_off_thread() {
        let rewriter: Arc<dyn Rewriter> = Arc::new(FixedRewriter::new("The cat sits."));
        let worker = RewriteWorker::spawn(rewriter, job("The cat sat."), "redraft-test").unwrap();
        let reply = worker.recv().unwrap();

        assert_eq!(reply.revision, 7);
        assert_eq!(reply.region, 0..12);
        assert_eq!(reply.rewritten, "The cat sits.");
        assert_eq!(
            reply.comparison.actions,
            vec![TokenAction::keep(2), TokenAction::replace(1, "sits.")]
        );
    }

    #[test]
    fn test_try_recv_after_finish() {
        let rewriter: Arc<dyn Rewriter> = Arc::new(FixedRewriter::new("x"));
        let worker = RewriteWorker::spawn(rewriter, job("x"), "redraft-test").unwrap();
        while !worker.is_finished() {
            thread::yield_now();
        }
        let reply = worker.try_recv().unwrap().unwrap();
        assert!(reply.comparison.is_unchanged());
        // The only reply has been taken and the sender is gone
        assert!(matches!(worker.try_recv(), Some(Err(Error::WorkerDisconnected))));
    }

    #[test]
    fn test_worker_reports_rewrite_failure() {
        let failing = |_: &str, _: &str, _: &str| -> Result<String> {
            Err(Error::Rewrite("service unavailable".to_string()))
        };
        let worker = RewriteWorker::spawn(Arc::new(failing), job("x"), "redraft-test").unwrap();
        assert!(matches!(worker.recv(), Err(Error::Rewrite(msg)) if msg == "service unavailable"));
    }

    #[test]
    fn test_worker_survives_panicking_rewriter() {
        let panicking = |_: &str, _: &str, _: &str| -> Result<String> { panic!("boom") };
        let worker = RewriteWorker::spawn(Arc::new(panicking), job("x"), "redraft-test").unwrap();
        assert!(matches!(worker.recv(), Err(Error::Rewrite(_))));
    }
}
