//! Scanner tuning knobs.

/// Configuration for a [`super::Scanner`].
///
/// The default matches the constant named in spec.md: a 1024-character/
/// same-line limit on simple (implicit mapping) keys. The lookahead
/// window's capacity (spec.md §4.A) is a fixed compile-time constant
/// (see [`crate::buffer::DEFAULT_CAPACITY`]), not a per-scanner knob:
/// the widest lookahead the dispatch logic ever needs is 8 characters
/// (a `\U` double-quoted escape's hex digits), so there is no runtime
/// value for this field to carry.
#[derive(Clone, Copy, Debug)]
pub struct ScannerConfig {
    /// Maximum character distance, on the same line, a simple key
    /// candidate may span before it is staled.
    pub simple_key_max_distance: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            simple_key_max_distance: 1024,
        }
    }
}
