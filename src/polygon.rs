use crate::*;

/// A simple polygon of 3 or more points, implicitly closed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon2(Vec<Point2>);

impl Polygon2 {
    pub fn new<I, P>(points: I) -> Result<Self, &'static str>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point2>,
    {
        let points = points.into_iter().map(Into::into).collect::<Vec<_>>();
        if points.len() < 3 {
            Err("polygon requires 3 or more points to be valid")
        } else {
            Ok(Polygon2(points))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pts(&self) -> &[Point2] {
        &self.0
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point2> + '_ {
        self.0.iter().copied()
    }

    /// Signed plan area, positive when the points wind counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        polygon_signed_area(self.pts())
    }

    /// Triangulate the polygon, returning vertex index triples.
    ///
    /// Triangles wind the same way as the polygon.
    ///
    /// # Example
    /// ```rust
    /// # use geomalgo::*;
    /// let p = Polygon2::new([[0.0, 0.0], [2.0, 0.0], [1.0, 1.0], [2.0, 2.0], [0.0, 2.0]]).unwrap();
    /// let tris = p.triangulate();
    /// assert_eq!(tris.len(), 3);
    /// ```
    pub fn triangulate(&self) -> Vec<(u32, u32, u32)> {
        let mut out = vec![0; 3 * (self.len() - 2)];
        let n = polygon_triangulate(self.pts(), &mut out, &mut TriangulateScratch::default());
        out[..n]
            .chunks_exact(3)
            .map(|t| (t[0], t[1], t[2]))
            .collect()
    }
}

impl Area for Polygon2 {
    /// 2D plan area.
    ///
    /// # Example
    /// ```rust
    /// use geomalgo::*;
    /// let p = Polygon2::new([
    ///     [0.0, 0.0],
    ///     [2.0, 0.0],
    ///     [2.0, 3.0],
    ///     [0.0, 3.0]
    /// ]).unwrap();
    ///
    /// assert!((p.area() - 6.0).abs() < 1e-3);
    /// ```
    fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

/// Shoelace area of the closed polygon `points`.
///
/// Positive for counter-clockwise winding, negative for clockwise.
///
/// # Panics
/// Panics if `points` is empty.
pub fn polygon_signed_area(points: &[Point2]) -> f64 {
    // https://stackoverflow.com/questions/451426/how-do-i-calculate-the-area-of-a-2d-polygon
    assert!(!points.is_empty(), "polygon requires at least one point");
    let last = &points[points.len() - 1];
    points
        .iter()
        .zip(points.iter().skip(1))
        .chain(std::iter::once((last, &points[0])))
        .map(|(&a, &b)| cross(a, b))
        .sum::<f64>()
        * 0.5
}

/// Triangulate a _convex_ polygon as a fan about its first vertex.
///
/// Writes `3(n - 2)` indices into `out` and returns that count. Triangles wind the same way as
/// the polygon. The result is only valid if the polygon is convex.
///
/// # Panics
/// Panics if there are fewer than 3 points or `out` is too short.
pub fn polygon_triangulate_convex(polygon: &[Point2], out: &mut [u32]) -> usize {
    let n = polygon.len();
    assert!(n >= 3, "polygon requires 3 or more points to be valid");
    let len = 3 * (n - 2);
    assert!(out.len() >= len, "triangle output must hold 3(n - 2) indices");

    for (t, i) in out.chunks_exact_mut(3).zip(1..n as u32 - 1) {
        t.copy_from_slice(&[0, i, i + 1]);
    }

    len
}
