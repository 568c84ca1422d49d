//! Spatial indexing.
//!
//! Region quadtree that keeps each rectangle at the deepest node whose
//! quadrant fully contains it.

mod quadtree;

pub use quadtree::{QuadNode, Region};
