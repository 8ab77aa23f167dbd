//! Replacement spans in buffer coordinates.

use std::ops::Range;

/// What accepting a span does to the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Swap the covered characters for the replacement.
    Replace,
    /// Insert the replacement at the end of the span.
    ///
    /// The span itself covers at most the one character before the insertion
    /// point so it stays visible.
    Insertion,
}

/// A pending edit: a character range tagged with its replacement text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// Character range in the buffer, end exclusive.
    pub range: Range<usize>,
    /// Replacement text. Insertions are framed as `" text "`.
    pub replacement: String,
    pub kind: SpanKind,
}

impl Span {
    /// Create a replacement span.
    #[must_use]
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        debug_assert!(range.start <= range.end, "span range must be start <= end");
        Self {
            range,
            replacement: replacement.into(),
            kind: SpanKind::Replace,
        }
    }

    /// Create an insertion marker in front of `anchor`.
    ///
    /// The marker covers `anchor - 1..anchor`, or is empty when `anchor` is
    /// at `floor` (nothing before it belongs to the region).
    #[must_use]
    pub fn insertion(anchor: usize, floor: usize, text: &str) -> Self {
        let start = if anchor > floor { anchor - 1 } else { anchor };
        Self {
            range: start..anchor,
            replacement: format!(" {text} "),
            kind: SpanKind::Insertion,
        }
    }

    /// Start offset.
    #[must_use]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// End offset (exclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// True for insertion markers.
    #[must_use]
    pub fn is_insertion(&self) -> bool {
        self.kind == SpanKind::Insertion
    }

    /// Check if this span contains a position.
    ///
    /// Empty spans contain exactly their start so they can still be found.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        if self.is_empty() {
            pos == self.range.start
        } else {
            self.range.contains(&pos)
        }
    }

    /// Check if this span overlaps with another.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.range.start < other.range.end && other.range.start < self.range.end
    }

    /// Replacement text without the insertion frame.
    #[must_use]
    pub fn text(&self) -> &str {
        match self.kind {
            SpanKind::Replace => &self.replacement,
            SpanKind::Insertion => self
                .replacement
                .strip_prefix(' ')
                .and_then(|s| s.strip_suffix(' '))
                .unwrap_or(&self.replacement),
        }
    }
}
