//! Simple polygon triangulation by monotone decomposition.
//!
//! The polygon is swept from top to bottom, classifying each vertex and inserting diagonals at
//! split and merge vertices until every piece is monotone in y. The pieces are then walked out of
//! the polygon edges and diagonals and each is triangulated with a stack sweep.
//!
//! Vertices are ordered _lexicographically_: `a` is above `b` if it has a greater y, or an equal
//! y and a smaller x. This acts as an infinitesimal rotation so horizontal edges need no special
//! cases.
use crate::*;
use std::cmp::Ordering;

/// The role of a polygon vertex in the top-down sweep.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VertexKind {
    /// Both neighbours below, convex. A new piece begins.
    Start,
    /// Both neighbours above, convex. A piece ends.
    End,
    /// Both neighbours below, reflex. The interior splits around the vertex.
    Split,
    /// Both neighbours above, reflex. Two parts of the interior join.
    Merge,
    /// The boundary passes downward through the vertex (predecessor above, successor below).
    UpChain,
    /// The boundary passes upward through the vertex (predecessor below, successor above).
    DownChain,
}

/// A chord between two polygon vertices, by index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Diagonal {
    pub a: usize,
    pub b: usize,
}

/// Working storage for [`polygon_triangulate`].
///
/// Holds the sweep queue, the active edge set, the edge helpers, the diagonal list and the
/// buffers used to walk and triangulate the monotone pieces. Reusing one scratch across calls
/// avoids reallocating them.
#[derive(Clone, Debug, Default)]
pub struct TriangulateScratch {
    queue: Vec<usize>,
    active: Vec<usize>,
    helper: Vec<usize>,
    diagonals: Vec<Diagonal>,
    seen: HashSet<(usize, usize)>,
    half_edges: Vec<(usize, usize)>,
    walked: Vec<bool>,
    piece: Vec<usize>,
    chain: Vec<(usize, bool)>,
    stack: Vec<(usize, bool)>,
}

impl TriangulateScratch {
    /// Scratch sized for polygons of up to `n` vertices.
    pub fn with_capacity(n: usize) -> Self {
        let edges = 2 * n + 2 * n.saturating_sub(3);
        Self {
            queue: Vec::with_capacity(n),
            active: Vec::with_capacity(n),
            helper: Vec::with_capacity(n),
            diagonals: Vec::with_capacity(n),
            seen: HashSet::default(),
            half_edges: Vec::with_capacity(edges),
            walked: Vec::with_capacity(edges),
            piece: Vec::with_capacity(n),
            chain: Vec::with_capacity(n),
            stack: Vec::with_capacity(n),
        }
    }
}

/// Returns if `a` comes before `b` in a top-down sweep.
fn above(a: Point2, b: Point2) -> bool {
    a.y > b.y || (a.y == b.y && a.x < b.x)
}

/// The polygon viewed counter-clockwise.
///
/// Sweep indices are _logical_: a clockwise polygon is read back to front, so the interior is
/// always to the left of edge `k -> k + 1`.
#[derive(Copy, Clone)]
struct Ring<'a> {
    pts: &'a [Point2],
    flip: bool,
}

impl<'a> Ring<'a> {
    fn new(pts: &'a [Point2]) -> Self {
        Self {
            pts,
            flip: polygon_signed_area(pts) < 0.0,
        }
    }

    fn len(&self) -> usize {
        self.pts.len()
    }

    /// Map between logical and caller indices, the mapping is its own inverse.
    fn index(&self, k: usize) -> usize {
        if self.flip {
            self.len() - 1 - k
        } else {
            k
        }
    }

    fn at(&self, k: usize) -> Point2 {
        self.pts[self.index(k)]
    }

    fn prev(&self, k: usize) -> usize {
        if k == 0 {
            self.len() - 1
        } else {
            k - 1
        }
    }

    fn next(&self, k: usize) -> usize {
        if k + 1 == self.len() {
            0
        } else {
            k + 1
        }
    }

    fn kind(&self, k: usize) -> VertexKind {
        use VertexKind::*;

        let (p, v, q) = (self.at(self.prev(k)), self.at(k), self.at(self.next(k)));
        let (pv, vq) = (v.sub(p), q.sub(v));
        let turn = cross(pv, vq);
        // a zero width spike still has its interior on the inside of the turn
        let convex = turn > 0.0 || (turn == 0.0 && dot(pv, vq) < 0.0);

        match (above(p, v), above(q, v)) {
            (false, false) if convex => Start,
            (false, false) => Split,
            (true, true) if convex => End,
            (true, true) => Merge,
            (true, false) => UpChain,
            (false, true) => DownChain,
        }
    }
}

fn sweep_order(a: &usize, b: &usize, ring: &mut Ring) -> Ordering {
    let (pa, pb) = (ring.at(*a), ring.at(*b));
    if above(pa, pb) {
        Ordering::Less
    } else if above(pb, pa) {
        Ordering::Greater
    } else {
        a.cmp(b)
    }
}

/// Classify vertex `i` of a simple polygon, taking the polygon's winding into account.
///
/// The winding is found from the signed area, so this is _O(n)_.
///
/// # Panics
/// Panics if `i` is out of bounds or the polygon has fewer than 3 points.
///
/// # Example
/// ```rust
/// # use geomalgo::*;
/// let p = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [2.0, 2.0], [0.0, 4.0]].map(Point2::from);
/// assert_eq!(classify_vertex(&p, 2), VertexKind::Start);
/// assert_eq!(classify_vertex(&p, 3), VertexKind::Merge);
/// ```
pub fn classify_vertex(polygon: &[Point2], i: usize) -> VertexKind {
    assert!(polygon.len() >= 3, "polygon requires 3 or more points to be valid");
    assert!(i < polygon.len(), "vertex index out of bounds");
    let ring = Ring::new(polygon);
    ring.kind(ring.index(i))
}

/// Sweep state for diagonal discovery. Edge `e` runs from logical vertex `e` to `e + 1`.
struct Sweep<'s, 'a> {
    ring: Ring<'a>,
    active: &'s mut Vec<usize>,
    helper: &'s mut Vec<usize>,
    diagonals: &'s mut Vec<Diagonal>,
    seen: &'s mut HashSet<(usize, usize)>,
}

impl Sweep<'_, '_> {
    fn is_merge(&self, v: usize) -> bool {
        self.ring.kind(v) == VertexKind::Merge
    }

    fn diagonal(&mut self, a: usize, b: usize) {
        let key = (a.min(b), a.max(b));
        if a == b || self.ring.next(key.0) == key.1 || self.ring.prev(key.0) == key.1 {
            return;
        }
        if self.seen.insert(key) {
            self.diagonals.push(Diagonal { a: key.0, b: key.1 });
        }
    }

    /// Start edge `v` with `v` as its helper.
    fn open(&mut self, v: usize) {
        self.active.push(v);
        self.helper[v] = v;
    }

    /// Close the edge ending at `v`.
    fn close(&mut self, v: usize) {
        let e = self.ring.prev(v);
        let h = self.helper[e];
        if self.is_merge(h) {
            self.diagonal(h, v);
        }
        if let Some(i) = self.active.iter().position(|&x| x == e) {
            self.active.swap_remove(i);
        }
    }

    /// Connect `v` to the edge directly left of it, `always` forcing the diagonal.
    fn connect_left(&mut self, v: usize, always: bool) {
        let Some(e) = self.left_edge(v) else {
            log::warn!("no edge left of vertex {}, polygon is not simple", self.ring.index(v));
            return;
        };
        let h = self.helper[e];
        if always || self.is_merge(h) {
            self.diagonal(h, v);
        }
        self.helper[e] = v;
    }

    /// The active edge with the greatest x-intercept at `v`'s height that is still left of `v`.
    fn left_edge(&self, v: usize) -> Option<usize> {
        let p = self.ring.at(v);
        let mut best: Option<(usize, f64)> = None;

        for &e in self.active.iter() {
            let (a, b) = (self.ring.at(e), self.ring.at(self.ring.next(e)));
            // only meets the sweep line at a vertex
            if a.y == b.y {
                continue;
            }
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x < p.x && best.map_or(true, |(_, bx)| x > bx) {
                best = Some((e, x));
            }
        }

        best.map(|(e, _)| e)
    }

    fn visit(&mut self, v: usize) {
        use VertexKind::*;

        match self.ring.kind(v) {
            Start => self.open(v),
            End => self.close(v),
            Split => {
                self.connect_left(v, true);
                self.open(v);
            }
            Merge => {
                self.close(v);
                self.connect_left(v, false);
            }
            UpChain => {
                self.close(v);
                self.open(v);
            }
            DownChain => self.connect_left(v, false),
        }
    }
}

/// Sweep the polygon top-down, leaving logical diagonals in `scratch.diagonals`.
fn sweep(ring: Ring, scratch: &mut TriangulateScratch) {
    let n = ring.len();
    let TriangulateScratch {
        queue,
        active,
        helper,
        diagonals,
        seen,
        ..
    } = scratch;

    queue.clear();
    queue.extend(0..n);
    active.clear();
    helper.clear();
    helper.resize(n, 0);
    diagonals.clear();
    seen.clear();

    let mut ctx = ring;
    heap_build(queue, &mut ctx, sweep_order);

    let mut sweep = Sweep {
        ring,
        active,
        helper,
        diagonals,
        seen,
    };
    while let Some(v) = heap_pop(queue, &mut ctx, sweep_order) {
        sweep.visit(v);
    }
}

/// Find the diagonals that split a simple polygon into y-monotone pieces.
///
/// Either winding is accepted. The diagonals index into `polygon` and live in `scratch` until
/// its next use.
///
/// # Panics
/// Panics if the polygon has fewer than 3 points.
pub fn monotone_diagonals<'s>(
    polygon: &[Point2],
    scratch: &'s mut TriangulateScratch,
) -> &'s [Diagonal] {
    assert!(polygon.len() >= 3, "polygon requires 3 or more points to be valid");
    let ring = Ring::new(polygon);
    sweep(ring, scratch);

    for d in scratch.diagonals.iter_mut() {
        let (a, b) = (ring.index(d.a), ring.index(d.b));
        *d = Diagonal {
            a: a.min(b),
            b: a.max(b),
        };
    }
    log::trace!("found {} monotone diagonals", scratch.diagonals.len());
    &scratch.diagonals
}

/// Triangle index writer, maps logical indices back and keeps the polygon's winding.
struct Triangles<'o, 'a> {
    ring: Ring<'a>,
    out: &'o mut [u32],
    len: usize,
}

impl Triangles<'_, '_> {
    fn push(&mut self, a: usize, b: usize, c: usize) {
        assert!(self.len + 3 <= self.out.len(), "polygon is not simple");

        let [a, b, c] = [a, b, c].map(|k| self.ring.index(k));
        let [pa, pb, pc] = [a, b, c].map(|i| self.ring.pts[i]);
        let turn = cross(pb.sub(pa), pc.sub(pa));
        let (b, c) = if (turn < 0.0 && !self.ring.flip) || (turn > 0.0 && self.ring.flip) {
            (c, b)
        } else {
            (b, c)
        };

        self.out[self.len..self.len + 3].copy_from_slice(&[a as u32, b as u32, c as u32]);
        self.len += 3;
    }
}

/// The half edge that follows `k` around the face on its left.
fn next_half_edge(ring: Ring, half_edges: &[(usize, usize)], k: usize) -> usize {
    let (a, b) = half_edges[k];
    let mut ctx = ring;
    let (Ok(r) | Err(r)) = bsearch_by(&(b, a), half_edges, &mut ctx, half_edge_order);

    // next clockwise from the reverse edge, wrapping within b's outgoing edges
    if r > 0 && half_edges[r - 1].0 == b {
        r - 1
    } else {
        half_edges.partition_point(|e| e.0 <= b) - 1
    }
}

/// Orders half edges by origin, then by counter-clockwise angle about the origin.
fn half_edge_order(a: &(usize, usize), b: &(usize, usize), ring: &mut Ring) -> Ordering {
    let angle = |&(from, to): &(usize, usize)| {
        let d = ring.at(to).sub(ring.at(from));
        d.y.atan2(d.x)
    };
    a.0.cmp(&b.0)
        .then_with(|| angle(a).total_cmp(&angle(b)))
        .then_with(|| a.1.cmp(&b.1))
}

/// Split the polygon along the diagonals and triangulate every piece, returns indices written.
fn decompose(ring: Ring, scratch: &mut TriangulateScratch, out: &mut [u32]) -> usize {
    let TriangulateScratch {
        diagonals,
        half_edges,
        walked,
        piece,
        chain,
        stack,
        ..
    } = scratch;

    half_edges.clear();
    for k in 0..ring.len() {
        half_edges.push((k, ring.next(k)));
        half_edges.push((ring.next(k), k));
    }
    for d in diagonals.iter() {
        half_edges.push((d.a, d.b));
        half_edges.push((d.b, d.a));
    }
    let mut ctx = ring;
    quicksort_by(half_edges, &mut ctx, half_edge_order);

    walked.clear();
    walked.resize(half_edges.len(), false);

    let mut tris = Triangles { ring, out, len: 0 };
    let mut pieces = 0;

    for h in 0..half_edges.len() {
        let (a, b) = half_edges[h];
        // backward polygon edges bound the outside
        if walked[h] || b == ring.prev(a) {
            continue;
        }

        piece.clear();
        let mut k = h;
        while !walked[k] {
            walked[k] = true;
            piece.push(half_edges[k].0);
            k = next_half_edge(ring, half_edges, k);
        }

        triangulate_monotone(ring, piece, chain, stack, &mut tris);
        pieces += 1;
    }

    log::trace!(
        "triangulated {} monotone pieces into {} triangles",
        pieces,
        tris.len / 3
    );
    tris.len
}

/// Triangulate a y-monotone piece given by logical indices in counter-clockwise order.
fn triangulate_monotone(
    ring: Ring,
    piece: &[usize],
    chain: &mut Vec<(usize, bool)>,
    stack: &mut Vec<(usize, bool)>,
    tris: &mut Triangles,
) {
    let m = piece.len();
    if m < 3 {
        return;
    }

    let (mut top, mut bottom) = (0, 0);
    for (i, &v) in piece.iter().enumerate() {
        if above(ring.at(v), ring.at(piece[top])) {
            top = i;
        }
        if above(ring.at(piece[bottom]), ring.at(v)) {
            bottom = i;
        }
    }

    // counter-clockwise from the top down to the bottom is the left chain
    chain.clear();
    let mut i = top;
    while i != bottom {
        chain.push((piece[i], true));
        i = (i + 1) % m;
    }
    while i != top {
        chain.push((piece[i], false));
        i = (i + 1) % m;
    }
    let mut ctx = ring;
    quicksort_by(chain, &mut ctx, |a, b, ring| sweep_order(&a.0, &b.0, ring));

    stack.clear();
    stack.extend_from_slice(&chain[..2]);

    for &(u, left) in &chain[2..m - 1] {
        let Some(&(_, top_left)) = stack.last() else {
            break;
        };

        if left != top_left {
            for w in stack.windows(2) {
                tris.push(u, w[0].0, w[1].0);
            }
            let last = stack[stack.len() - 1];
            stack.clear();
            stack.push(last);
        } else {
            let Some(mut last) = stack.pop() else {
                break;
            };
            while let Some(&t) = stack.last() {
                let turn = cross(
                    ring.at(last.0).sub(ring.at(t.0)),
                    ring.at(u).sub(ring.at(last.0)),
                );
                if (left && turn > 0.0) || (!left && turn < 0.0) {
                    tris.push(u, last.0, t.0);
                    last = t;
                    stack.pop();
                } else {
                    break;
                }
            }
            stack.push(last);
        }
        stack.push((u, left));
    }

    let (u, _) = chain[m - 1];
    for w in stack.windows(2) {
        tris.push(u, w[0].0, w[1].0);
    }
}

/// Triangulate a simple polygon.
///
/// The polygon is split into y-monotone pieces along the diagonals found by
/// [`monotone_diagonals`], and each piece is triangulated with a stack sweep. Exactly
/// `3(n - 2)` vertex indices are written to `out` and that count is returned. Either winding is
/// accepted, and every triangle winds the same way as the polygon so their signed areas sum to
/// the polygon's.
///
/// # Panics
/// Panics if there are fewer than 3 points, `out` holds fewer than `3(n - 2)` indices, or the
/// polygon is not simple enough to decompose.
///
/// # Example
/// ```rust
/// # use geomalgo::*;
/// let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].map(Point2::from);
/// let mut out = [0; 6];
/// let n = polygon_triangulate(&square, &mut out, &mut TriangulateScratch::default());
/// assert_eq!(n, 6);
/// ```
pub fn polygon_triangulate(
    polygon: &[Point2],
    out: &mut [u32],
    scratch: &mut TriangulateScratch,
) -> usize {
    let n = polygon.len();
    assert!(n >= 3, "polygon requires 3 or more points to be valid");
    assert!(n <= u32::MAX as usize, "polygon indices must fit in a u32");
    assert!(out.len() >= 3 * (n - 2), "triangle output must hold 3(n - 2) indices");

    let ring = Ring::new(polygon);
    sweep(ring, scratch);
    log::trace!("found {} monotone diagonals", scratch.diagonals.len());
    decompose(ring, scratch, out)
}
