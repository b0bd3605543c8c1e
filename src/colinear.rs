use crate::*;

/// Points closer than this in _both_ axes are treated as coincident when choosing a reference
/// direction.
pub const COLINEAR_EPSILON: f64 = 1.0 / (1 << 25) as f64;

/// Test if the given points are colinear up to a given error.
///
/// A reference line is taken through the first point and the first later point that is not
/// (nearly) coincident with it. The points are colinear if every point's perpendicular distance
/// from that line is at most `error`. Slices of two or fewer points, and slices where all points
/// are coincident, are always colinear.
///
/// Runs in _O(n)_.
///
/// # Panics
/// Panics if `error` is negative.
///
/// # Example
/// ```rust
/// # use geomalgo::*;
/// let ps = [[0.0, 0.0], [1.0, 0.1], [2.0, 0.0]].map(Point2::from);
/// assert!(colinear(&ps, 0.1));
/// assert!(!colinear(&ps, 0.05));
/// ```
pub fn colinear(points: &[Point2], error: f64) -> bool {
    assert!(error >= 0.0, "colinear error must be non-negative");

    let [first, rest @ ..] = points else {
        return true;
    };
    if rest.len() < 2 {
        return true;
    }

    // a near zero difference can not be normalised
    let Some(i) = rest.iter().position(|p| {
        let d = p.sub(*first);
        d.x.abs() >= COLINEAR_EPSILON || d.y.abs() >= COLINEAR_EPSILON
    }) else {
        return true;
    };

    let Point2 { x: cosine, y: sine } = rest[i].sub(*first).unit();

    rest[i + 1..].iter().all(|p| {
        let d = p.sub(*first);
        (cosine * d.y - sine * d.x).abs() <= error
    })
}
