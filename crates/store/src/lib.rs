//! Layered point-location index.
//!
//! Rectangles are inserted once, in order, and later insertions sit on top of
//! earlier ones. A quadtree answers "which rectangle is topmost at (x, y)?".
//!
//! This crate contains:
//! - Rectangle records and their insertion-ranked wrapper
//! - The quadtree node (subdivision, placement, descent query)
//! - The store that validates bounds and assigns ranks

pub mod config;
mod error;
pub mod rectangle;
pub mod spatial;
pub mod store;

pub use config::QuadConfig;
pub use error::StoreError;
pub use rectangle::{IndexedRectangle, Properties, Rectangle};
pub use spatial::{QuadNode, Region};
pub use store::RectangleStore;
