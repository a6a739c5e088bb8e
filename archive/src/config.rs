//! Limits applied while archiving and reading untrusted input.

/// Default bound on length prefixes, chosen so encodings stay portable across 32-bit and 64-bit
/// targets.
const DEFAULT_MAX_LENGTH: usize = u32::MAX as usize;

/// Default bound on the nesting of generic reads and writes.
const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration for a [crate::Reader] or [crate::Writer].
///
/// Length prefixes are read before the value they describe, so an attacker controls how much
/// memory a decoder would try to reserve. Recursive types (for example an enum that boxes
/// itself) let an attacker control the recursion depth. Both are bounded here.
///
/// A [crate::Writer] refuses to produce what a [crate::Reader] with the same limits would reject,
/// so values that archive successfully also restore.
///
/// # Examples
///
/// ```
/// use archivist::{Config, Reader};
///
/// let config = Config::new().with_max_length(1024).with_max_depth(16);
/// let reader = Reader::new(vec![0u8; 4]).with_config(config);
/// assert_eq!(reader.config().max_length, 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// The largest length prefix accepted by [crate::Reader::read_length] and
    /// [crate::Writer::write_length].
    pub max_length: usize,

    /// The deepest nesting of [crate::Reader::read] and [crate::Writer::write] calls.
    pub max_depth: usize,
}

impl Config {
    /// Creates a configuration with the default limits.
    pub const fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the largest accepted length prefix.
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the deepest accepted nesting of generic reads.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let cfg = Config::default();
        assert_eq!(cfg, Config::new());
        assert_eq!(cfg.max_length, u32::MAX as usize);
        assert_eq!(cfg.max_depth, 512);
    }

    #[test]
    fn test_builder() {
        let cfg = Config::new().with_max_length(7).with_max_depth(3);
        assert_eq!(cfg.max_length, 7);
        assert_eq!(cfg.max_depth, 3);

        // Later calls override earlier ones
        let cfg = cfg.with_max_length(0);
        assert_eq!(cfg.max_length, 0);
        assert_eq!(cfg.max_depth, 3);
    }
}
