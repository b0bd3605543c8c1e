use std::cmp;

pub trait Point: Copy + Sized + IntoIterator<Item = f64> {
    /// Scale point by multiplying all dimensions by `scalar`.
    fn scale(self, scalar: f64) -> Self;

    /// Calculate the magnitude of the vector.
    fn mag(self) -> f64 {
        self.into_iter()
            .zip(self)
            .map(|(a, b)| a * b)
            .sum::<f64>()
            .sqrt()
    }

    /// Normalise the vector by the magnitude.
    ///
    /// A zero vector normalises to NaNs, callers screen for near-zero vectors first.
    fn unit(self) -> Self {
        self.scale(self.mag().recip())
    }
}

pub trait Add<Rhs = Self> {
    fn add(self, rhs: Rhs) -> Self;
    fn sub(self, rhs: Rhs) -> Self
    where
        Self: Sized + Copy,
        Rhs: Point,
    {
        self.add(rhs.scale(-1.0))
    }
}

/// 2D Point (X,Y).
///
/// Aligned to 16 bytes so a pair of coordinates fills one vector register.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[repr(C, align(16))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for [f64; 2] {
    fn from(p: Point2) -> Self {
        [p.x, p.y]
    }
}

impl IntoIterator for Point2 {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;
    fn into_iter(self) -> Self::IntoIter {
        [self.x, self.y].into_iter()
    }
}

impl Add for Point2 {
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Point for Point2 {
    fn scale(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

/// A 2x2 matrix stored as two column vectors.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mat2 {
    pub cols: [Point2; 2],
}

impl Mat2 {
    pub const IDENTITY: Self = Self {
        cols: [Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)],
    };

    pub const fn new(c0: Point2, c1: Point2) -> Self {
        Self { cols: [c0, c1] }
    }
}

pub fn dot(a: Point2, b: Point2) -> f64 {
    a.x * b.x + a.y * b.y
}

/// The scalar (z component) of the 2D cross product.
///
/// > 0 : `b` is counter-clockwise of `a`
/// = 0 : `a` and `b` are parallel
/// < 0 : `b` is clockwise of `a`
pub fn cross(a: Point2, b: Point2) -> f64 {
    a.x * b.y - b.x * a.y
}

/// Squared magnitude, avoids the square root when only comparing lengths.
pub fn sqrmag(p: Point2) -> f64 {
    dot(p, p)
}

/// Linear interpolation, `a + t * (b - a)`.
pub fn lerp(a: Point2, b: Point2, t: f64) -> Point2 {
    a.add(b.sub(a).scale(t))
}

/// Transform `v` by `m`, each output component is the dot product of `v` with a column.
pub fn transform(v: Point2, m: &Mat2) -> Point2 {
    let [c0, c1] = m.cols;
    Point2::new(dot(v, c0), dot(v, c1))
}

/// Apply an ordering to points by testing x, then y.
pub fn ordpt<P: Point>(a: P, b: P) -> cmp::Ordering {
    use cmp::Ordering::Equal;

    a.into_iter().zip(b).fold(
        Equal,
        |o, (a, b)| {
            if o == Equal {
                a.total_cmp(&b)
            } else {
                o
            }
        },
    )
}
