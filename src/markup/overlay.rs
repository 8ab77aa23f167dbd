//! Live span overlay for one editable buffer.
//!
//! The overlay owns the pending replacement spans of the last comparison and
//! the region they were computed over. Buffer mutations are reported through
//! [`Overlay::on_edit`], which shifts spans with a linear scan.
//!
//! # Edit rule
//!
//! For an edit at `position` with signed `delta`:
//!
//! - a span starting after `position` moves as a whole;
//! - a span starting at or before `position` but ending after it grows or
//!   shrinks at its end (typing inside a pending replacement extends it);
//! - anything else stays put.
//!
//! The scope follows the same rule, except its end also moves when the edit
//! happens exactly at it, so typing at the region end keeps extending the
//! region.

use crate::diff::{Token, TokenAction};
use crate::markup::project::project;
use crate::markup::span::Span;
use std::ops::Range;

/// The character range under comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Scope {
    pub start: usize,
    pub end: usize,
}

impl Scope {
    /// Create a scope.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// True when `position` lies in `start..=end`.
    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position <= self.end
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

fn apply_delta(offset: usize, delta: isize) -> usize {
    offset.saturating_add_signed(delta)
}

/// Pending spans plus the compared region for one buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlay {
    scope: Option<Scope>,
    spans: Vec<Span>,
    begin_indicator: Option<usize>,
}

impl Overlay {
    /// Create an inactive overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all spans with the projection of a new comparison.
    ///
    /// `tokens` carry offsets relative to `region_start`. Clears the begin
    /// indicator.
    pub fn rebuild(
        &mut self,
        actions: &[TokenAction],
        tokens: &[Token],
        region_start: usize,
        region_end: usize,
    ) {
        self.spans = project(actions, tokens, region_start);
        self.scope = Some(Scope::new(region_start, region_end));
        self.begin_indicator = None;
    }

    /// Drop spans, scope and begin indicator.
    pub fn clear(&mut self) {
        self.spans.clear();
        self.scope = None;
        self.begin_indicator = None;
    }

    /// True while a comparison is installed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.scope.is_some()
    }

    /// The current scope, if any.
    #[must_use]
    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    /// Pending spans, sorted by start.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Number of pending spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// True when no span is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Find the span containing `position`.
    #[must_use]
    pub fn find(&self, position: usize) -> Option<&Span> {
        self.spans.iter().find(|span| span.contains(position))
    }

    /// Remove one span, leaving the others and the scope untouched.
    ///
    /// Returns false when the span is not pending.
    pub fn remove(&mut self, span: &Span) -> bool {
        match self.spans.iter().position(|s| s == span) {
            Some(idx) => {
                self.spans.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Reposition spans after a buffer mutation.
    ///
    /// `delta` is `+len` for an insertion at `position` and `-len` for a
    /// deletion starting at `position`.
    pub fn on_edit(&mut self, position: usize, delta: isize) {
        if delta == 0 {
            return;
        }

        for span in &mut self.spans {
            if span.range.start > position {
                span.range.start = apply_delta(span.range.start, delta);
                span.range.end = apply_delta(span.range.end, delta);
            } else if span.range.end > position {
                span.range.end = apply_delta(span.range.end, delta);
            }
            span.range.end = span.range.end.max(span.range.start);
        }

        if let Some(scope) = &mut self.scope {
            if scope.start > position {
                scope.start = apply_delta(scope.start, delta);
                scope.end = apply_delta(scope.end, delta);
            } else if scope.end >= position {
                scope.end = apply_delta(scope.end, delta);
            }
            scope.end = scope.end.max(scope.start);
        }

        if let Some(indicator) = &mut self.begin_indicator {
            if *indicator > position {
                *indicator = apply_delta(*indicator, delta);
            }
        }
    }

    /// False when a scope is active and `position` lies outside it.
    ///
    /// Both region boundaries accept edits.
    #[must_use]
    pub fn is_edit_allowed(&self, position: usize) -> bool {
        self.scope.is_none_or(|scope| scope.contains(position))
    }

    /// Mark the start of a follow-up comparison.
    pub fn set_begin_indicator(&mut self, position: usize) {
        self.begin_indicator = Some(position);
    }

    /// The marked start of a follow-up comparison.
    #[must_use]
    pub fn begin_indicator(&self) -> Option<usize> {
        self.begin_indicator
    }

    /// The two ranges outside the scope: before its start and after its end.
    ///
    /// Both are empty when no scope is active.
    #[must_use]
    pub fn outside_ranges(&self, buffer_len: usize) -> [Range<usize>; 2] {
        match self.scope {
            Some(scope) => {
                let start = scope.start.min(buffer_len);
                let end = scope.end.min(buffer_len);
                [0..start, end..buffer_len]
            }
            None => [0..0, buffer_len..buffer_len],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{CompareOptions, compare};

    fn overlay_with(spans: Vec<Span>, start: usize, end: usize) -> Overlay {
        Overlay {
            scope: Some(Scope::new(start, end)),
            spans,
            begin_indicator: None,
        }
    }

    #[test]
    fn test_shift_before_span() {
        let mut overlay = overlay_with(vec![Span::replace(5..8, "x")], 2, 12);
        overlay.on_edit(3, 4);
        assert_eq!(overlay.spans()[0].range, 9..12);
        assert_eq!(overlay.scope(), Some(Scope::new(2, 16)));
    }

    #[test]
    fn test_edit_inside_span_grows_end() {
        let mut overlay = overlay_with(vec![Span::replace(5..8, "x")], 2, 12);
        overlay.on_edit(6, 4);
        assert_eq!(overlay.spans()[0].range, 5..12);
    }

    #[test]
    fn test_edit_at_span_start_grows_end() {
        let mut overlay = overlay_with(vec![Span::replace(5..8, "x")], 2, 12);
        overlay.on_edit(5, 2);
        assert_eq!(overlay.spans()[0].range, 5..10);
    }

    #[test]
    fn test_edit_at_span_end_leaves_span() {
        let mut overlay = overlay_with(vec![Span::replace(5..8, "x")], 2, 12);
        overlay.on_edit(8, 3);
        assert_eq!(overlay.spans()[0].range, 5..8);
        assert_eq!(overlay.scope(), Some(Scope::new(2, 15)));
    }

    #[test]
    fn test_typing_at_region_end_extends_scope() {
        let mut overlay = overlay_with(Vec::new(), 2, 12);
        overlay.on_edit(12, 1);
        overlay.on_edit(13, 1);
        assert_eq!(overlay.scope(), Some(Scope::new(2, 14)));
        assert!(overlay.is_edit_allowed(14));
    }

    #[test]
    fn test_deletion_shrinks_and_saturates() {
        let mut overlay = overlay_with(
            vec![Span::replace(5..8, "x"), Span::replace(10..12, "y")],
            0,
            20,
        );
        overlay.on_edit(6, -3);
        assert_eq!(overlay.spans()[0].range, 5..5);
        assert_eq!(overlay.spans()[1].range, 7..9);
        assert_eq!(overlay.scope(), Some(Scope::new(0, 17)));

        overlay.on_edit(0, -50);
        assert_eq!(overlay.spans()[1].range, 0..0);
        assert_eq!(overlay.scope(), Some(Scope::new(0, 0)));
    }

    #[test]
    fn test_edit_after_everything_is_noop() {
        let mut overlay = overlay_with(vec![Span::replace(5..8, "x")], 2, 12);
        overlay.on_edit(40, 5);
        assert_eq!(overlay.spans()[0].range, 5..8);
        assert_eq!(overlay.scope(), Some(Scope::new(2, 12)));
    }

    #[test]
    fn test_find_and_remove() {
        let mut overlay = overlay_with(
            vec![Span::replace(0..3, "a"), Span::replace(5..8, "b")],
            0,
            10,
        );
        assert_eq!(overlay.find(6).map(|s| s.replacement.as_str()), Some("b"));
        assert!(overlay.find(4).is_none());
        assert!(overlay.find(8).is_none());
        assert!(overlay.find(usize::MAX).is_none());

        let span = overlay.find(1).cloned().unwrap();
        assert!(overlay.remove(&span));
        assert!(!overlay.remove(&span));
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.scope(), Some(Scope::new(0, 10)));
    }

    #[test]
    fn test_edit_allowed_boundaries() {
        let overlay = overlay_with(Vec::new(), 2, 12);
        assert!(!overlay.is_edit_allowed(1));
        assert!(overlay.is_edit_allowed(2));
        assert!(overlay.is_edit_allowed(12));
        assert!(!overlay.is_edit_allowed(13));
        assert!(Overlay::new().is_edit_allowed(1_000));
    }

    #[test]
    fn test_rebuild_replaces_state() {
        let mut overlay = overlay_with(vec![Span::replace(0..1, "old")], 0, 1);
        overlay.set_begin_indicator(0);

        let cmp = compare("The cat sat.", "The cat sits.", &CompareOptions::default());
        overlay.rebuild(&cmp.actions, &cmp.tokens, 4, 16);

        assert_eq!(overlay.spans(), &[Span::replace(12..16, "sits.")]);
        assert_eq!(overlay.scope(), Some(Scope::new(4, 16)));
        assert_eq!(overlay.begin_indicator(), None);
    }

    #[test]
    fn test_begin_indicator_follows_edits() {
        let mut overlay = overlay_with(Vec::new(), 0, 30);
        overlay.set_begin_indicator(10);
        overlay.on_edit(10, 5);
        assert_eq!(overlay.begin_indicator(), Some(10));
        overlay.on_edit(2, 5);
        assert_eq!(overlay.begin_indicator(), Some(15));
    }

    #[test]
    fn test_outside_ranges() {
        let overlay = overlay_with(Vec::new(), 4, 9);
        assert_eq!(overlay.outside_ranges(20), [0..4, 9..20]);
        assert_eq!(Overlay::new().outside_ranges(20), [0..0, 20..20]);
    }
}
