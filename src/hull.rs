//! Convex hulls and point spread.
use crate::*;

/// Returns if `r` does _not_ make a left turn off the segment `p -> q`.
///
/// Colinear continuations are kept (not a turn). A zero length step, or turning straight back
/// along the segment, is treated as a non-left turn so duplicates and spikes are dropped.
fn non_left_turn(p: Point2, q: Point2, r: Point2) -> bool {
    let pq = q.sub(p);
    let qr = r.sub(q);
    let c = cross(pq, qr);
    c < 0.0 || (c == 0.0 && dot(pq, qr) <= 0.0)
}

/// Compute the convex hull of points sorted by x, then y.
///
/// Uses Andrew's monotone chain. The hull is written to `out` counter-clockwise starting from
/// the first (lowest x) point, and the number of hull points is returned. Points lying on a hull
/// edge are kept. If all the points are colinear, the distinct points are returned in sorted
/// order.
///
/// # Panics
/// Panics if there are fewer than three points or `out` is shorter than `points`.
///
/// # Example
/// ```rust
/// # use geomalgo::*;
/// let ps = [[0.0, 0.0], [0.0, 1.0], [0.5, 0.5], [1.0, 0.0], [1.0, 1.0]].map(Point2::from);
/// let mut out = [Point2::default(); 5];
/// let n = convex_hull_sorted(&ps, &mut out);
/// assert_eq!(n, 4);
/// ```
pub fn convex_hull_sorted(points: &[Point2], out: &mut [Point2]) -> usize {
    let n = points.len();
    assert!(n > 2, "a convex hull requires at least 3 points");
    assert!(out.len() >= n, "hull output must hold as many points as the input");

    // Points strictly left of the chord first -> last can only be on the upper chain, the rest
    // only on the lower one. Splitting on a single predicate keeps both chains within `n` slots.
    let first = points[0];
    let chord = points[n - 1].sub(first);
    let upper = |p: &&Point2| cross(chord, p.sub(first)) > 0.0;

    let mut len = 0;

    for &r in points.iter().filter(|p| !upper(p)) {
        while len >= 2 && non_left_turn(out[len - 2], out[len - 1], r) {
            len -= 1;
        }
        out[len] = r;
        len += 1;
    }

    let lower = len;

    for &r in points.iter().rev().filter(upper) {
        while len > lower && non_left_turn(out[len - 2], out[len - 1], r) {
            len -= 1;
        }
        out[len] = r;
        len += 1;
    }

    // close back onto the first point
    while len > lower && non_left_turn(out[len - 2], out[len - 1], first) {
        len -= 1;
    }

    len
}

/// Sort `points` by x, then y, and compute their convex hull.
///
/// See [`convex_hull_sorted`].
pub fn convex_hull(points: &mut [Point2], out: &mut [Point2]) -> usize {
    quicksort_by(points, &mut (), |a, b, _| ordpt(*a, *b));
    convex_hull_sorted(points, out)
}

/// Find the two points furthest apart, returning their indices `(i, j)` with `i < j`.
///
/// Brute force, _n(n - 1) / 2_ distance comparisons. Pairs are visited by increasing `j`, then
/// increasing `i`, and the first pair found wins ties.
///
/// # Panics
/// Panics if there are fewer than two points.
pub fn furthest_points_apart(points: &[Point2]) -> (usize, usize) {
    assert!(points.len() >= 2, "need at least 2 points to find a pair");

    let mut best = (0, 1);
    let mut max = sqrmag(points[1].sub(points[0]));

    for (j, &q) in points.iter().enumerate().skip(2) {
        for (i, &p) in points[..j].iter().enumerate() {
            let d = sqrmag(p.sub(q));
            if d > max {
                max = d;
                best = (i, j);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    fn pts(ps: &[[f64; 2]]) -> Vec<Point2> {
        ps.iter().copied().map(Point2::from).collect()
    }

    fn hull(ps: &[Point2]) -> Vec<Point2> {
        let mut ps = ps.to_vec();
        let mut out = vec![Point2::default(); ps.len()];
        let n = convex_hull(&mut ps, &mut out);
        out.truncate(n);
        out
    }

    fn from_small(ps: Vec<(i8, i8)>) -> Vec<Point2> {
        ps.into_iter()
            .map(|(x, y)| Point2::new(x as f64, y as f64))
            .collect()
    }

    #[test]
    fn square_with_centre() {
        let h = hull(&pts(&[
            [0.5, 0.5],
            [1.0, 1.0],
            [0.0, 0.0],
            [1.0, 0.0],
            [0.0, 1.0],
        ]));
        assert_eq!(
            h,
            pts(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
        );
    }

    #[test]
    fn colinear_edge_points_are_kept() {
        let h = hull(&pts(&[
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [2.0, 2.0],
            [1.0, 1.0],
            [0.0, 2.0],
        ]));
        assert_eq!(
            h,
            pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]])
        );
    }

    #[test]
    fn triangle_with_lower_revisit() {
        let h = hull(&pts(&[[0.0, 0.0], [1.0, -1.0], [1.0, 1.0], [2.0, 0.0]]));
        assert_eq!(
            h,
            pts(&[[0.0, 0.0], [1.0, -1.0], [2.0, 0.0], [1.0, 1.0]])
        );
    }

    #[test]
    fn duplicates_are_dropped() {
        let h = hull(&pts(&[
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [1.0, 5.0],
            [1.0, 5.0],
        ]));
        assert_eq!(
            h,
            pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [1.0, 5.0]])
        );
    }

    #[test]
    fn all_colinear() {
        let h = hull(&pts(&[[2.0, 2.0], [0.0, 0.0], [1.0, 1.0]]));
        assert_eq!(h, pts(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]));
    }

    #[quickcheck]
    fn hull_contains_all_points(ps: Vec<(i8, i8)>) -> TestResult {
        let ps = from_small(ps);
        if ps.len() < 3 {
            return TestResult::discard();
        }

        let h = hull(&ps);
        if h.len() > ps.len() {
            return TestResult::failed();
        }
        if h.len() < 3 {
            // degenerate, everything colinear
            return TestResult::discard();
        }

        // small integers keep every cross product exact
        let inside = ps.iter().all(|&p| {
            h.iter()
                .zip(h.iter().cycle().skip(1))
                .all(|(&a, &b)| cross(b.sub(a), p.sub(a)) >= 0.0)
        });
        TestResult::from_bool(inside)
    }

    #[quickcheck]
    fn hull_is_idempotent(ps: Vec<(i8, i8)>) -> TestResult {
        let ps = from_small(ps);
        if ps.len() < 3 {
            return TestResult::discard();
        }
        let h = hull(&ps);
        if h.len() < 3 {
            return TestResult::discard();
        }

        TestResult::from_bool(hull(&h).len() == h.len())
    }

    #[test]
    fn furthest_pair() {
        let ps = pts(&[[0.0, 0.0], [1.0, 1.0], [-2.0, 0.0], [3.0, 0.0], [0.5, 0.5]]);
        assert_eq!(furthest_points_apart(&ps), (2, 3));
    }

    #[test]
    fn furthest_pair_ties_keep_first() {
        // both diagonals are equally long, (1,2) is visited before (0,3)
        let ps = pts(&[[0.0, 0.0], [2.0, 0.0], [0.0, 5.0], [2.0, 5.0]]);
        assert_eq!(furthest_points_apart(&ps), (1, 2));

        let ps = pts(&[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0], [1.0, 0.0]]);
        assert_eq!(furthest_points_apart(&ps), (0, 1));

        let same = pts(&[[1.0, 1.0]; 4]);
        assert_eq!(furthest_points_apart(&same), (0, 1));
    }

    #[quickcheck]
    fn furthest_pair_is_maximal(ps: Vec<(i8, i8)>) -> TestResult {
        let ps = from_small(ps);
        if ps.len() < 2 {
            return TestResult::discard();
        }
        let (i, j) = furthest_points_apart(&ps);
        let d = sqrmag(ps[i].sub(ps[j]));
        let max = ps
            .iter()
            .flat_map(|&a| ps.iter().map(move |&b| sqrmag(a.sub(b))))
            .fold(0.0, f64::max);
        TestResult::from_bool(i < j && d == max)
    }
}
