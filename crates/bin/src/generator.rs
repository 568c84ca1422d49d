//! Random rectangle generation for the demo.

use rand::Rng;
use rectstore::Rectangle;

/// Generate `count` random rectangles lying within `bounds`.
///
/// Each edge pair is drawn as `lo` uniform in the bounds span, then `hi`
/// uniform in `[lo, max]`, so boxes may be degenerate but never inverted.
pub fn random_rectangles<R: Rng>(rng: &mut R, bounds: &Rectangle, count: usize) -> Vec<Rectangle> {
    (0..count)
        .map(|_| {
            let (left, right) = random_span(rng, bounds.left, bounds.right);
            let (bottom, top) = random_span(rng, bounds.bottom, bounds.top);
            Rectangle::new(left, bottom, right, top)
        })
        .collect()
}

fn random_span<R: Rng>(rng: &mut R, min: i64, max: i64) -> (i64, i64) {
    if min >= max {
        return (min, min);
    }
    let lo = rng.random_range(min..=max);
    let hi = rng.random_range(lo..=max);
    (lo, hi)
}
