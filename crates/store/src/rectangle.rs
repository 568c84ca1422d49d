//! Rectangle records.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Opaque metadata carried alongside a rectangle.
pub type Properties = HashMap<String, serde_json::Value>;

/// Axis-aligned rectangle.
///
/// `left`/`right` are the min/max of x, `bottom`/`top` the min/max of y.
/// Orientation is not checked by [`Rectangle::new`]; use
/// [`Rectangle::try_new`] to reject inverted boxes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Rectangle {
    pub left: i64,
    pub bottom: i64,
    pub right: i64,
    pub top: i64,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: Properties,
}

impl Rectangle {
    pub fn new(left: i64, bottom: i64, right: i64, top: i64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
            properties: Properties::new(),
        }
    }

    /// Create a rectangle, rejecting `left > right` or `bottom > top`.
    pub fn try_new(left: i64, bottom: i64, right: i64, top: i64) -> Result<Self, StoreError> {
        let rectangle = Self::new(left, bottom, right, top);
        if left > right || bottom > top {
            return Err(StoreError::MalformedRectangle(rectangle));
        }
        Ok(rectangle)
    }

    /// Replace the property bag.
    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Set a single property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check if `other` lies entirely within this rectangle, edges included.
    #[inline]
    pub fn contains_rectangle(&self, other: &Rectangle) -> bool {
        self.left <= other.left
            && other.right <= self.right
            && self.bottom <= other.bottom
            && other.top <= self.top
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.left, self.bottom, self.right, self.top)
    }
}

/// A rectangle tagged with its insertion rank in the owning store.
///
/// Higher ranks were inserted later and win ties.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRectangle {
    rectangle: Rectangle,
    rank: u64,
}

impl IndexedRectangle {
    pub(crate) fn new(rectangle: Rectangle, rank: u64) -> Self {
        Self { rectangle, rank }
    }

    #[inline]
    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }

    #[inline]
    pub fn rank(&self) -> u64 {
        self.rank
    }

    pub fn into_rectangle(self) -> Rectangle {
        self.rectangle
    }

    /// Check if a point lies inside this rectangle.
    ///
    /// The region is half-open: the right and top edges are excluded.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let r = &self.rectangle;
        r.left <= x && x < r.right && r.bottom <= y && y < r.top
    }
}
