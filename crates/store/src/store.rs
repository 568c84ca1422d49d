//! Rectangle store: the public entry point of the index.

use tracing::{debug, info, warn};

use crate::config::QuadConfig;
use crate::error::StoreError;
use crate::rectangle::{IndexedRectangle, Rectangle};
use crate::spatial::{QuadNode, Region};

/// Owns the quadtree and assigns insertion ranks.
///
/// A store is built once with [`RectangleStore::initialize`]; calling it
/// again replaces everything. If initialization fails the store is left
/// uninitialized, and queries report [`StoreError::NotInitialized`].
#[derive(Debug, Default)]
pub struct RectangleStore {
    config: QuadConfig,
    bounds: Option<Rectangle>,
    root: Option<QuadNode>,
    next_rank: u64,
}

impl RectangleStore {
    /// Create an empty store with the default tree configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with custom subdivision limits.
    pub fn with_config(config: QuadConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build the index from a bounds rectangle and rectangles in insertion order.
    ///
    /// The i-th rectangle gets rank i. Fails on the first rectangle not fully
    /// inside `bounds`, after which the store is reset to uninitialized.
    pub fn initialize<I>(&mut self, bounds: Rectangle, rectangles: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = Rectangle>,
    {
        self.clear();
        debug!(%bounds, config = ?self.config, "Initializing rectangle store");

        let mut root = QuadNode::new(Region::from_rectangle(&bounds));
        let mut next_rank = 0;

        for (index, rectangle) in rectangles.into_iter().enumerate() {
            if !bounds.contains_rectangle(&rectangle) {
                warn!(index, %rectangle, %bounds, "Rejected rectangle outside store bounds");
                return Err(StoreError::OutOfBounds {
                    index,
                    rectangle,
                    bounds,
                });
            }
            root.insert(IndexedRectangle::new(rectangle, next_rank), &self.config);
            next_rank += 1;
        }

        info!(
            rectangles = next_rank,
            nodes = root.node_count(),
            depth = root.depth(),
            "Rectangle store initialized"
        );

        self.bounds = Some(bounds);
        self.root = Some(root);
        self.next_rank = next_rank;
        Ok(())
    }

    /// Topmost rectangle covering `(x, y)`, or `None` if nothing covers it.
    pub fn find_rectangle_at(&self, x: i64, y: i64) -> Result<Option<&IndexedRectangle>, StoreError> {
        let root = self.root.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(root.query(x, y))
    }

    /// Drop the tree and return to the uninitialized state.
    pub fn clear(&mut self) {
        self.bounds = None;
        self.root = None;
        self.next_rank = 0;
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    #[inline]
    pub fn bounds(&self) -> Option<&Rectangle> {
        self.bounds.as_ref()
    }

    #[inline]
    pub fn root(&self) -> Option<&QuadNode> {
        self.root.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &QuadConfig {
        &self.config
    }

    /// Number of rectangles inserted by the last successful initialization.
    #[inline]
    pub fn len(&self) -> usize {
        usize::try_from(self.next_rank).unwrap_or(usize::MAX)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.next_rank == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn bounds() -> Rectangle {
        Rectangle::new(0, 0, 1000, 1000)
    }

    fn rank_at(store: &RectangleStore, x: i64, y: i64) -> Option<u64> {
        store
            .find_rectangle_at(x, y)
            .unwrap()
            .map(IndexedRectangle::rank)
    }

    #[test]
    fn test_uninitialized_query_fails() {
        let store = RectangleStore::new();
        assert!(matches!(
            store.find_rectangle_at(0, 0),
            Err(StoreError::NotInitialized)
        ));
        assert!(!store.is_initialized());
    }

    #[test]
    fn test_recency_wins_on_overlap() {
        let mut store = RectangleStore::new();
        let r1 = Rectangle::new(100, 100, 400, 400);
        let r2 = Rectangle::new(200, 200, 300, 300);
        store.initialize(bounds(), [r1.clone(), r2.clone()]).unwrap();

        let hit = store.find_rectangle_at(250, 250).unwrap().unwrap();
        assert_eq!(hit.rank(), 1);
        assert_eq!(hit.rectangle(), &r2);

        let hit = store.find_rectangle_at(150, 150).unwrap().unwrap();
        assert_eq!(hit.rank(), 0);
        assert_eq!(hit.rectangle(), &r1);

        assert!(store.find_rectangle_at(500, 500).unwrap().is_none());
    }

    #[test]
    fn test_ranks_follow_input_order() {
        let mut store = RectangleStore::new();
        let rectangles: Vec<_> = (0..30)
            .map(|i| Rectangle::new(i * 30, 0, i * 30 + 20, 20))
            .collect();
        store.initialize(bounds(), rectangles).unwrap();

        assert_eq!(store.len(), 30);
        for i in 0..30 {
            assert_eq!(rank_at(&store, i * 30 + 10, 10), Some(i as u64));
        }
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let mut store = RectangleStore::new();
        store
            .initialize(bounds(), [Rectangle::new(0, 0, 500, 500), Rectangle::new(250, 250, 750, 750)])
            .unwrap();

        let first = store.find_rectangle_at(300, 300).unwrap().cloned();
        for _ in 0..5 {
            assert_eq!(store.find_rectangle_at(300, 300).unwrap().cloned(), first);
        }
    }

    #[test]
    fn test_out_of_bounds_rejected_and_store_reset() {
        let mut store = RectangleStore::new();
        let result = store.initialize(
            Rectangle::new(0, 0, 100, 100),
            [Rectangle::new(10, 10, 20, 20), Rectangle::new(50, 50, 150, 150)],
        );

        match result {
            Err(StoreError::OutOfBounds { index, rectangle, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(rectangle, Rectangle::new(50, 50, 150, 150));
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
        assert!(!store.is_initialized());
        assert!(store.bounds().is_none());
        assert!(matches!(
            store.find_rectangle_at(15, 15),
            Err(StoreError::NotInitialized)
        ));
    }

    #[test]
    fn test_failed_reinitialize_discards_previous_tree() {
        let mut store = RectangleStore::new();
        store.initialize(bounds(), [Rectangle::new(0, 0, 10, 10)]).unwrap();
        assert!(store.is_initialized());

        let result = store.initialize(bounds(), [Rectangle::new(-5, 0, 10, 10)]);
        assert!(result.is_err());
        assert!(!store.is_initialized());
    }

    #[test]
    fn test_reinitialize_restarts_ranks() {
        let mut store = RectangleStore::new();
        store
            .initialize(bounds(), [Rectangle::new(0, 0, 10, 10), Rectangle::new(0, 0, 10, 10)])
            .unwrap();
        assert_eq!(rank_at(&store, 5, 5), Some(1));

        store.initialize(bounds(), [Rectangle::new(0, 0, 10, 10)]).unwrap();
        assert_eq!(rank_at(&store, 5, 5), Some(0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_batch_is_initialized() {
        let mut store = RectangleStore::new();
        store.initialize(bounds(), Vec::new()).unwrap();

        assert!(store.is_initialized());
        assert!(store.is_empty());
        assert_eq!(rank_at(&store, 1, 1), None);
    }

    #[test]
    fn test_properties_returned_with_match() {
        let mut store = RectangleStore::new();
        let button = Rectangle::new(10, 10, 50, 30).with_property("id", "ok-button");
        store.initialize(bounds(), [button]).unwrap();

        let hit = store.find_rectangle_at(20, 20).unwrap().unwrap();
        assert_eq!(hit.rectangle().properties["id"], serde_json::json!("ok-button"));
    }

    #[test]
    fn test_capacity_config_respected() {
        let mut store = RectangleStore::with_config(QuadConfig::new(2, 1));
        let rectangles = [
            Rectangle::new(10, 10, 20, 20),
            Rectangle::new(30, 30, 40, 40),
            Rectangle::new(60, 60, 70, 70),
        ];
        store.initialize(Rectangle::new(0, 0, 100, 100), rectangles).unwrap();

        let root = store.root().unwrap();
        assert!(!root.is_leaf());
        assert_eq!(root.len(), 3);
        assert_eq!(rank_at(&store, 65, 65), Some(2));
    }

    #[test]
    fn test_full_range_bounds() {
        let mut store = RectangleStore::new();
        let rectangles: Vec<_> = (0..12)
            .map(|i| Rectangle::new(i * 100, i * 100, i * 100 + 10, i * 100 + 10))
            .collect();
        store
            .initialize(Rectangle::new(i64::MIN, i64::MIN, i64::MAX, i64::MAX), rectangles)
            .unwrap();

        assert_eq!(store.len(), 12);
        assert!(!store.root().unwrap().is_leaf());
        for i in 0..12 {
            assert_eq!(rank_at(&store, i * 100 + 5, i * 100 + 5), Some(i as u64));
        }
        assert_eq!(rank_at(&store, i64::MIN, i64::MIN), None);
        assert_eq!(rank_at(&store, i64::MAX, i64::MAX), None);
    }

    #[test]
    fn test_matches_brute_force_scan() {
        let configs = [
            QuadConfig::default(),
            QuadConfig::new(0, 1),
            QuadConfig::new(2, 3),
            QuadConfig::new(4, 16),
            QuadConfig::new(1, 250),
        ];
        for (seed, config) in configs.into_iter().enumerate() {
            check_against_brute_force(seed as u64, config);
        }
    }

    fn check_against_brute_force(seed: u64, config: QuadConfig) {
        let mut rng = StdRng::seed_from_u64(0x5eed + seed);
        let rectangles: Vec<Rectangle> = (0..300)
            .map(|_| {
                let x1 = rng.random_range(0..=1000);
                let y1 = rng.random_range(0..=1000);
                let x2 = rng.random_range(x1..=1000);
                let y2 = rng.random_range(y1..=1000);
                Rectangle::new(x1, y1, x2, y2)
            })
            .collect();

        let mut store = RectangleStore::with_config(config);
        assert_eq!(store.config(), &config);
        store.initialize(bounds(), rectangles.clone()).unwrap();

        for _ in 0..2000 {
            let x = rng.random_range(-10..1010);
            let y = rng.random_range(-10..1010);
            let expected = rectangles
                .iter()
                .enumerate()
                .rev()
                .find(|(_, r)| r.left <= x && x < r.right && r.bottom <= y && y < r.top)
                .map(|(i, _)| i as u64);
            assert_eq!(rank_at(&store, x, y), expected, "point ({x}, {y}) with {config:?}");
        }
    }
}
