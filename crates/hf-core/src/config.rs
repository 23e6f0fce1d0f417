//! Limits applied while decoding the wire form.

/// Upper bounds enforced by [`PacketReader`](crate::PacketReader).
///
/// Counts and lengths are checked before anything is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireLimits {
    /// Longest string accepted, in bytes.
    pub max_string_len: usize,
    /// Largest element count accepted for any repeated group.
    pub max_collection_len: usize,
}

impl Default for WireLimits {
    fn default() -> Self {
        Self {
            max_string_len: 32767,
            max_collection_len: 65536,
        }
    }
}

impl WireLimits {
    /// Set the maximum string length (at least 1).
    pub fn with_max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len.max(1);
        self
    }

    /// Set the maximum collection length.
    pub fn with_max_collection_len(mut self, len: usize) -> Self {
        self.max_collection_len = len;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let limits = WireLimits::default();
        assert_eq!(limits.max_string_len, 32767);
        assert_eq!(limits.max_collection_len, 65536);
    }

    #[test]
    fn builder_methods() {
        let limits = WireLimits::default()
            .with_max_string_len(64)
            .with_max_collection_len(8);
        assert_eq!(limits.max_string_len, 64);
        assert_eq!(limits.max_collection_len, 8);
    }

    #[test]
    fn string_len_clamped() {
        let limits = WireLimits::default().with_max_string_len(0);
        assert_eq!(limits.max_string_len, 1);
    }
}
