//! Quadtree tuning.

use serde::{Deserialize, Serialize};

/// Subdivision limits for the quadtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuadConfig {
    /// Rectangles a leaf holds before it subdivides.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Side length at or below which a region never subdivides.
    /// Values below 1 are treated as 1 so that subdivision always terminates.
    #[serde(default = "default_min_size")]
    pub min_size: i64,
}

impl QuadConfig {
    pub const DEFAULT_CAPACITY: usize = 8;
    pub const DEFAULT_MIN_SIZE: i64 = 1;

    pub fn new(capacity: usize, min_size: i64) -> Self {
        Self { capacity, min_size }
    }

    /// Effective minimum side, never below 1.
    #[inline]
    pub(crate) fn min_side(&self) -> i64 {
        self.min_size.max(1)
    }
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            min_size: default_min_size(),
        }
    }
}

fn default_capacity() -> usize {
    QuadConfig::DEFAULT_CAPACITY
}
fn default_min_size() -> i64 {
    QuadConfig::DEFAULT_MIN_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QuadConfig::default();
        assert_eq!(config.capacity, 8);
        assert_eq!(config.min_size, 1);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: QuadConfig = toml::from_str("capacity = 3").unwrap();
        assert_eq!(config, QuadConfig::new(3, 1));
    }

    #[test]
    fn test_min_side_never_below_one() {
        assert_eq!(QuadConfig::new(8, 0).min_side(), 1);
        assert_eq!(QuadConfig::new(8, -5).min_side(), 1);
        assert_eq!(QuadConfig::new(8, 4).min_side(), 4);
    }
}
