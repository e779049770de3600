//! Candidate-key bookkeeping for the scanner's implicit-mapping-key
//! lookahead.

use crate::mark::Mark;

/// A scalar that was parsed and may yet turn out to be a mapping key.
///
/// Upon scanning
/// ```yaml
/// a: b
/// ```
/// we don't know that `a` is a key until we've seen the following `:`.
/// The scalar token for `a` is enqueued but not released; a `SimpleKey`
/// records where it came from so that, if a `:` does follow, a `Key`
/// token can be inserted ahead of it. If something else terminates the
/// line first (another line break outside of flow context, or a second
/// simple key on the same line), the candidate is staled instead.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct SimpleKey {
    /// Whether the referenced token may still become a key.
    pub possible: bool,
    /// Whether the referenced token *must* become a key, because we are
    /// in block context at exactly the candidate's indentation column.
    /// If such a candidate is staled, that is a fatal error.
    pub required: bool,
    /// The index, among both released and not-yet-released tokens, of
    /// the token this candidate refers to.
    pub token_number: usize,
    /// Where the candidate token started.
    pub mark: Mark,
}

impl SimpleKey {
    /// A new, not-yet-possible candidate at the given mark.
    pub(crate) fn new(mark: Mark) -> SimpleKey {
        SimpleKey {
            possible: false,
            required: false,
            token_number: 0,
            mark,
        }
    }
}
