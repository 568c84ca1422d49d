//! QuadTree for point location over layered rectangles.

use tracing::trace;

use crate::config::QuadConfig;
use crate::rectangle::{IndexedRectangle, Rectangle};

/// Extent `[x1, x2] x [y1, y2]` covered by a quad node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Region {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Region covering a bounds rectangle.
    pub fn from_rectangle(bounds: &Rectangle) -> Self {
        Self::new(bounds.left, bounds.bottom, bounds.right, bounds.top)
    }

    /// Side length along x. Unsigned so the full `i64` range fits.
    #[inline]
    pub fn width(&self) -> u64 {
        self.x1.abs_diff(self.x2)
    }

    #[inline]
    pub fn height(&self) -> u64 {
        self.y1.abs_diff(self.y2)
    }

    /// Floor of the x midpoint.
    #[inline]
    pub fn mid_x(&self) -> i64 {
        floor_mid(self.x1, self.x2)
    }

    /// Floor of the y midpoint.
    #[inline]
    pub fn mid_y(&self) -> i64 {
        floor_mid(self.y1, self.y2)
    }

    /// The four quadrants: lower-left, lower-right, upper-left, upper-right.
    ///
    /// Odd sides give the upper/right quadrant the extra unit.
    pub fn quadrants(&self) -> [Region; 4] {
        let (mx, my) = (self.mid_x(), self.mid_y());
        [
            Region::new(self.x1, self.y1, mx, my),
            Region::new(mx, self.y1, self.x2, my),
            Region::new(self.x1, my, mx, self.y2),
            Region::new(mx, my, self.x2, self.y2),
        ]
    }

    /// Index into [`Region::quadrants`] of the quadrant holding a point.
    #[inline]
    pub fn quadrant_of(&self, x: i64, y: i64) -> usize {
        2 * usize::from(self.mid_y() <= y) + usize::from(self.mid_x() <= x)
    }

    /// Check if a rectangle lies entirely within this region.
    #[inline]
    pub fn fits(&self, rectangle: &Rectangle) -> bool {
        self.x1 <= rectangle.left
            && rectangle.right <= self.x2
            && self.y1 <= rectangle.bottom
            && rectangle.top <= self.y2
    }

    #[inline]
    fn is_min_size(&self, config: &QuadConfig) -> bool {
        let min = config.min_side().unsigned_abs();
        self.width() <= min && self.height() <= min
    }
}

/// `floor((a + b) / 2)`, widened so the sum cannot overflow.
#[inline]
fn floor_mid(a: i64, b: i64) -> i64 {
    // The mean of two i64 values always fits back into i64
    (i128::from(a) + i128::from(b)).div_euclid(2) as i64
}

/// A node of the quadtree.
///
/// Rectangles that fit inside one child quadrant are pushed down; the rest
/// (straddling a midline, or larger than a quadrant) stay at this node.
#[derive(Debug, Clone)]
pub struct QuadNode {
    region: Region,
    rectangles: Vec<IndexedRectangle>,
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            rectangles: Vec::new(),
            children: None,
        }
    }

    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Child nodes in quadrant order, if subdivided.
    pub fn children(&self) -> Option<&[QuadNode; 4]> {
        self.children.as_deref()
    }

    /// Rectangles stored directly at this node.
    pub fn local(&self) -> &[IndexedRectangle] {
        &self.rectangles
    }

    /// Number of rectangles in this subtree.
    pub fn len(&self) -> usize {
        self.rectangles.len()
            + self
                .children()
                .map_or(0, |children| children.iter().map(QuadNode::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(QuadNode::node_count).sum())
    }

    /// Levels below this node; 0 for a leaf.
    pub fn depth(&self) -> usize {
        self.children().map_or(0, |children| {
            1 + children.iter().map(QuadNode::depth).max().unwrap_or(0)
        })
    }

    fn subdivide(&mut self) {
        let [a, b, c, d] = self.region.quadrants();
        self.children = Some(Box::new([
            QuadNode::new(a),
            QuadNode::new(b),
            QuadNode::new(c),
            QuadNode::new(d),
        ]));
        trace!(
            region = ?self.region,
            held = self.rectangles.len(),
            "Subdivided quad node"
        );
    }

    /// Add a rectangle to this subtree. Never fails.
    pub fn insert(&mut self, item: IndexedRectangle, config: &QuadConfig) {
        if self.is_leaf() {
            if self.rectangles.len() < config.capacity || self.region.is_min_size(config) {
                self.rectangles.push(item);
                return;
            }

            // Full leaf: split and redistribute what it held
            self.subdivide();
            let held = std::mem::take(&mut self.rectangles);
            for old in held {
                self.place(old, config);
            }
        }

        self.place(item, config);
    }

    /// Hand a rectangle to the first child that fits it, or keep it here.
    fn place(&mut self, item: IndexedRectangle, config: &QuadConfig) {
        if let Some(children) = self.children.as_deref_mut() {
            if let Some(child) = children
                .iter_mut()
                .find(|child| child.region.fits(item.rectangle()))
            {
                child.insert(item, config);
                return;
            }
        }
        self.rectangles.push(item);
    }

    /// Topmost (highest rank) rectangle containing the point, if any.
    pub fn query(&self, x: i64, y: i64) -> Option<&IndexedRectangle> {
        let local = self
            .rectangles
            .iter()
            .filter(|item| item.contains(x, y))
            .max_by_key(|item| item.rank());

        let deeper = self
            .children()
            .and_then(|children| children[self.region.quadrant_of(x, y)].query(x, y));

        local.into_iter().chain(deeper).max_by_key(|item| item.rank())
    }
}
