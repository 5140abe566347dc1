//! Byte spans into the original source text.

/// A byte offset into the source text of a document.
pub type Pos = u32;

/// A half-open byte range `[start, end)` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset where the span starts.
    pub start: Pos,
    /// Byte offset where the span ends (exclusive).
    pub end: Pos,
}

impl Span {
    /// Create a new span.
    pub fn new(start: Pos, end: Pos) -> Self {
        Span { start, end }
    }

    /// Whether `pos` falls inside this span.
    pub fn contains(&self, pos: Pos) -> bool {
        pos >= self.start && pos < self.end
    }

    /// The zero-length span at this span's start position.
    ///
    /// Used as the edit range for completion candidates, so that inserting
    /// never overwrites existing text.
    pub fn collapsed_to_start(&self) -> Span {
        Span {
            start: self.start,
            end: self.start,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
