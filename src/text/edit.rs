//! Editable text buffer with a live markup overlay.
//!
//! This module provides [`EditBuffer`], a rope-backed buffer that routes every
//! mutation through its [`Overlay`]: edits outside the compared region are
//! rejected, and accepted edits are reported with their length delta before
//! the rope changes.
//!
//! # Examples
//!
//! ```
//! use redraft::EditBuffer;
//! use redraft::diff::CompareOptions;
//!
//! let mut buf = EditBuffer::with_text("The cat sat.");
//! buf.compare_range("The cat sits.", 0..12, &CompareOptions::default());
//! assert_eq!(buf.overlay().len(), 1);
//!
//! // Accept the change under the cursor
//! let accepted = buf.accept_at(9).unwrap();
//! assert!(accepted.is_some());
//! assert_eq!(buf.text(), "The cat sits.");
//! assert!(buf.overlay().is_empty());
//! ```

use crate::diff::{CompareOptions, Comparison, compare};
use crate::error::{Error, Result};
use crate::event::{self, LogLevel};
use crate::markup::{Overlay, Span, SpanKind};
use crate::text::rope::RopeWrapper;
use std::ops::Range;

fn delta_of(chars: usize) -> isize {
    isize::try_from(chars).unwrap_or(isize::MAX)
}

/// Text buffer whose pending replacement spans follow every edit.
#[derive(Clone, Debug, Default)]
pub struct EditBuffer {
    rope: RopeWrapper,
    overlay: Overlay,
    modified: bool,
    revision: u64,
}

impl EditBuffer {
    /// Create a new empty edit buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an edit buffer with initial text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: RopeWrapper::from_str(text),
            ..Self::default()
        }
    }

    /// Get the full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Copy out a character range, clamped to the buffer.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> String {
        self.rope.slice(range)
    }

    /// Length in characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// True once any edit went through since the last [`set_text`](Self::set_text).
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Monotonic counter bumped by every mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The markup overlay.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Mutable access to the overlay, e.g. to set the begin indicator.
    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    /// Replace the entire text, dropping all markup.
    pub fn set_text(&mut self, text: &str) {
        self.rope.replace(text);
        self.overlay.clear();
        self.modified = false;
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn check(&self, offset: usize) -> Result<()> {
        let len = self.len_chars();
        if offset > len {
            return Err(Error::OutOfBounds { offset, len });
        }
        if !self.overlay.is_edit_allowed(offset) {
            let (start, end) = self
                .overlay
                .scope()
                .map_or((0, 0), |scope| (scope.start, scope.end));
            return Err(Error::OutsideScope { offset, start, end });
        }
        Ok(())
    }

    /// Insert text at a character offset.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.check(offset)?;
        let chars = text.chars().count();
        if chars == 0 {
            return Ok(());
        }
        self.overlay.on_edit(offset, delta_of(chars));
        self.rope.insert(offset, text);
        self.modified = true;
        self.bump_revision();
        Ok(())
    }

    /// Delete `len` characters starting at `offset`.
    ///
    /// The range is clamped to the end of the buffer.
    pub fn delete(&mut self, offset: usize, len: usize) -> Result<()> {
        self.check(offset)?;
        let end = offset.saturating_add(len).min(self.len_chars());
        let removed = end - offset;
        if removed == 0 {
            return Ok(());
        }
        self.overlay.on_edit(offset, -delta_of(removed));
        self.rope.remove(offset..end);
        self.modified = true;
        self.bump_revision();
        Ok(())
    }

    /// Replace a character range with `text`.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        self.check(range.start)?;
        self.delete(range.start, range.end.saturating_sub(range.start))?;
        self.insert(range.start, text)
    }

    /// Install the spans of a comparison computed over `region`.
    ///
    /// The comparison's token offsets must be relative to `region.start`.
    pub fn apply_comparison(&mut self, comparison: &Comparison, region: Range<usize>) {
        self.overlay.rebuild(
            &comparison.actions,
            &comparison.tokens,
            region.start,
            region.end,
        );
        if event::log_enabled() {
            event::emit_log(
                LogLevel::Debug,
                &format!(
                    "markup rebuilt over {}..{} with {} spans",
                    region.start,
                    region.end,
                    self.overlay.len()
                ),
            );
        }
        event::emit_event(
            event::OVERLAY_REBUILD,
            &format!(
                r#"{{"start":{},"end":{},"spans":{}}}"#,
                region.start,
                region.end,
                self.overlay.len()
            ),
        );
    }

    /// Compare `region` of this buffer against `rewritten` and install the
    /// resulting spans.
    pub fn compare_range(
        &mut self,
        rewritten: &str,
        region: Range<usize>,
        options: &CompareOptions,
    ) -> Comparison {
        let end = region.end.min(self.len_chars());
        let start = region.start.min(end);
        let comparison = compare(&self.slice(start..end), rewritten, options);
        self.apply_comparison(&comparison, start..end);
        comparison
    }

    /// Accept the span at `position`, writing its replacement into the buffer.
    ///
    /// Returns the accepted span, or `None` when no span contains `position`.
    pub fn accept_at(&mut self, position: usize) -> Result<Option<Span>> {
        let Some(span) = self.overlay.find(position).cloned() else {
            return Ok(None);
        };
        self.check(span.start())?;
        self.check(span.end())?;

        self.overlay.remove(&span);
        match span.kind {
            SpanKind::Replace => self.replace(span.range.clone(), &span.replacement)?,
            SpanKind::Insertion => {
                let anchor = span.end();
                let text = self.joined_insertion(anchor, span.text());
                self.insert(anchor, &text)?;
            }
        }

        event::emit_event(
            event::OVERLAY_ACCEPT,
            &format!(
                r#"{{"start":{},"end":{},"remaining":{}}}"#,
                span.start(),
                span.end(),
                self.overlay.len()
            ),
        );
        Ok(Some(span))
    }

    /// Pad an inserted word with spaces where its neighbours need them.
    fn joined_insertion(&self, anchor: usize, text: &str) -> String {
        let prev = anchor
            .checked_sub(1)
            .and_then(|idx| self.rope.char_at(idx));
        let next = self.rope.char_at(anchor);
        let lead = prev.is_some_and(|ch| !ch.is_whitespace());
        let trail = next.is_some_and(|ch| !ch.is_whitespace());

        let mut joined = String::with_capacity(text.len() + 2);
        if lead {
            joined.push(' ');
        }
        joined.push_str(text);
        if trail {
            joined.push(' ');
        }
        joined
    }
}
