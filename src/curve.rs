//! Bezier curve evaluation, subdivision and flattening.
use crate::*;

/// Run de Casteljau's algorithm at `t` over the control points in `curve`, in place.
///
/// Each pass replaces every adjacent pair with its interpolation at `t`, shrinking the working
/// row by one. Once done, `curve` holds the control points of the curve's _right_ split
/// (`t..=1`) and `curve[0]` is the point on the curve at `t`.
///
/// If `left` is given, the first point of each row is captured into it, giving the control
/// points of the _left_ split (`0..=t`).
///
/// # Panics
/// Panics if `left` is shorter than `curve`.
///
/// # Example
/// ```rust
/// # use geomalgo::*;
/// let mut curve = [[0.0, 0.0], [1.0, 2.0], [2.0, 0.0]].map(Point2::from);
/// let mut left = [Point2::default(); 3];
/// de_casteljau(0.5, &mut curve, Some(&mut left[..]));
///
/// assert_eq!(left, [[0.0, 0.0], [0.5, 1.0], [1.0, 1.0]].map(Point2::from));
/// assert_eq!(curve, [[1.0, 1.0], [1.5, 1.0], [2.0, 0.0]].map(Point2::from));
/// ```
pub fn de_casteljau(t: f64, curve: &mut [Point2], mut left: Option<&mut [Point2]>) {
    let n = curve.len();
    if let Some(left) = left.as_deref() {
        assert!(left.len() >= n, "left split must hold as many points as the curve");
    }

    for q in (0..n).rev() {
        if let Some(left) = left.as_deref_mut() {
            left[n - 1 - q] = curve[0];
        }
        for p in 0..q {
            curve[p] = lerp(curve[p], curve[p + 1], t);
        }
    }
}

/// Evaluate the Bezier curve with control points `curve` at `t`.
///
/// # Panics
/// Panics if `curve` is empty.
pub fn bezier_point(curve: &[Point2], t: f64) -> Point2 {
    assert!(!curve.is_empty(), "a curve requires at least one control point");
    let mut row = curve.to_vec();
    de_casteljau(t, &mut row, None);
    row[0]
}

/// Flatten the Bezier curve with control points `control` into a polyline.
///
/// The curve is bisected until every piece's control points are [`colinear`] within `error`,
/// and the end point of each piece is appended to `out` in curve order. The polyline starts at
/// the first control point and ends at the last one; a single control point yields that point
/// twice.
///
/// `aux` is working storage for the stack of pending pieces, `n` slots per piece. Both buffers
/// are grown through `grower` when they fill up. The number of points written to `out` is
/// returned.
///
/// # Errors
/// Fails if a buffer could not be grown. The failed buffer keeps its allocation and length,
/// but the content of `out` is incomplete and must be discarded.
///
/// # Panics
/// Panics if `control` is empty, `out` is empty, `aux` is shorter than `control`, or `error`
/// is negative.
///
/// # Example
/// ```rust
/// # use geomalgo::*;
/// let control = [[0.0, 0.0], [0.5, 1.0], [1.0, 0.0]].map(Point2::from);
/// let mut out = vec![Point2::default(); 1];
/// let mut aux = vec![Point2::default(); 3];
///
/// let n = bezier_discretize(&control, 1e-3, &mut out, &mut aux, &mut ScaleGrow).unwrap();
/// assert!(n > 2);
/// assert_eq!(out[0], control[0]);
/// assert_eq!(out[n - 1], control[2]);
/// ```
pub fn bezier_discretize<G>(
    control: &[Point2],
    error: f64,
    out: &mut Vec<Point2>,
    aux: &mut Vec<Point2>,
    grower: &mut G,
) -> Result<usize, GrowError>
where
    G: Grow<Point2> + ?Sized,
{
    let n = control.len();
    assert!(n >= 1, "a curve requires at least one control point");
    assert!(!out.is_empty(), "output buffer must have room for the first point");
    assert!(aux.len() >= n, "auxiliary buffer must hold the whole curve");
    assert!(error >= 0.0, "discretization error must be non-negative");

    aux[..n].copy_from_slice(control);
    out[0] = control[0];
    let mut len = 1;

    // start of the piece on top of the stack
    let mut top = 0;
    loop {
        if colinear(&aux[top..top + n], error) {
            if len == out.len() {
                grow_buffer(grower, out, len + 1)?;
            }
            out[len] = aux[top + n - 1];
            len += 1;

            if top == 0 {
                break;
            }
            top -= n;
        } else {
            let end = top + 2 * n;
            if end > aux.len() {
                grow_buffer(grower, aux, end)?;
            }

            // the left half goes on top so it is flattened first
            let (piece, next) = aux[top..end].split_at_mut(n);
            de_casteljau(0.5, piece, Some(next));
            top += n;
        }
    }

    log::trace!("flattened {n} control points into {len} points");
    Ok(len)
}
