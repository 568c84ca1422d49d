//! Store error types.

use thiserror::Error;

use crate::rectangle::Rectangle;

/// Errors returned by the rectangle store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Rectangle #{index} {rectangle} is not within bounds {bounds}")]
    OutOfBounds {
        index: usize,
        rectangle: Rectangle,
        bounds: Rectangle,
    },

    #[error("Store not initialized")]
    NotInitialized,

    #[error("Malformed rectangle {0}: left must not exceed right, bottom must not exceed top")]
    MalformedRectangle(Rectangle),
}
