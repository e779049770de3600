//! A location in a YAML character stream.

/// A position in the scanner's input, measured in characters.
///
/// All three fields are 0-based. `index` never decreases across
/// consecutive reads of the same source; `column` resets to `0`
/// immediately after any line break is consumed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Mark {
    pub(crate) index: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Mark {
    /// Create a new marker at the given index/line/column.
    #[must_use]
    pub fn new(index: usize, line: usize, column: usize) -> Mark {
        Mark {
            index,
            line,
            column,
        }
    }

    /// Return the index (in characters) of the marker in the source.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the line of the marker in the source.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the column of the marker in the source.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}
