//! Hypercube geometry.
//!
//! The tesseract (8-cell) is the 4D analogue of the cube: 16 vertices,
//! 32 edges, 24 square faces and 8 cubic cells. Only vertices and edges
//! matter for a wireframe.
//!
//! Vertex `i` takes its sign pattern from the bits of `i`:
//! bit 0 → x, bit 1 → y, bit 2 → z, bit 3 → w (set → `+s`, clear → `-s`).
//! Two vertices share an edge exactly when their indices differ in one bit.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Number of hypercube vertices
pub const VERTEX_COUNT: usize = 16;

/// Number of hypercube edges
pub const EDGE_COUNT: usize = 32;

/// Edges meeting at every vertex (one per coordinate axis)
pub const VERTEX_DEGREE: usize = 4;

/// A point in 4D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vertex4 {
    /// Create a new vertex
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The origin
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Components as `[x, y, z, w]`
    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Build from `[x, y, z, w]`
    #[inline]
    pub fn from_array(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    /// Dot product in R⁴
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared Euclidean norm
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean norm (distance from the origin)
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Euclidean distance to another vertex
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }
}

impl Add for Vertex4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Vertex4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Mul<f64> for Vertex4 {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

/// An undirected hypercube edge, stored with `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    /// Create an edge, normalising endpoint order
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }

    /// Whether the edge touches the given vertex
    pub fn contains(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }

    /// The coordinate axis this edge runs along (0 = x … 3 = w)
    pub fn axis(&self) -> u32 {
        (self.a ^ self.b).trailing_zeros()
    }
}

/// Generate the 16 vertices of a hypercube with half-edge `scale`.
///
/// A scale of zero collapses every vertex onto the origin; that is valid
/// output, just not a very interesting picture.
pub fn generate_vertices(scale: f64) -> [Vertex4; VERTEX_COUNT] {
    let sign = |i: usize, bit: usize| if i & (1 << bit) != 0 { scale } else { -scale };

    let mut vertices = [Vertex4::zero(); VERTEX_COUNT];
    for (i, v) in vertices.iter_mut().enumerate() {
        *v = Vertex4::new(sign(i, 0), sign(i, 1), sign(i, 2), sign(i, 3));
    }
    vertices
}

/// Generate the 32 edges in `(i, j)` lexicographic order, `i < j`.
pub fn generate_edges() -> Vec<Edge> {
    let mut edges = Vec::with_capacity(EDGE_COUNT);

    for i in 0..VERTEX_COUNT {
        for j in (i + 1)..VERTEX_COUNT {
            // Power of two: the indices differ in exactly one coordinate
            let xor = i ^ j;
            if xor != 0 && xor & (xor - 1) == 0 {
                edges.push(Edge::new(i, j));
            }
        }
    }

    edges
}

/// Hypercube topology with its vertices, generated once and shared read-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypercube {
    scale: f64,
    vertices: [Vertex4; VERTEX_COUNT],
    edges: Vec<Edge>,
}

impl Hypercube {
    /// Build a hypercube with the given scale
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            vertices: generate_vertices(scale),
            edges: generate_edges(),
        }
    }

    /// Vertex scale this cube was built with
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// All 16 vertices, indexed by sign pattern
    pub fn vertices(&self) -> &[Vertex4; VERTEX_COUNT] {
        &self.vertices
    }

    /// Get a vertex by index
    pub fn vertex(&self, index: usize) -> Option<&Vertex4> {
        self.vertices.get(index)
    }

    /// All 32 edges
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The four vertices sharing an edge with `index`, ascending
    pub fn neighbors(&self, index: usize) -> Option<Vec<usize>> {
        if index >= VERTEX_COUNT {
            return None;
        }
        let mut neighbors: Vec<usize> = (0..4).map(|bit| index ^ (1 << bit)).collect();
        neighbors.sort_unstable();
        Some(neighbors)
    }
}

impl Default for Hypercube {
    fn default() -> Self {
        Self::new(1.0)
    }
}
