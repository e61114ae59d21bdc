//! 4×4 rotation algebra.
//!
//! 4D space has six independent rotation planes, one per pair of axes.
//! A single-plane rotation is the identity except for a 2×2 block
//! `[[cos, -sin], [sin, cos]]` at the plane's two axes.
//!
//! 4D rotations do not commute, so the composite matrix depends on the
//! order planes are applied in. [`RotationAngles::to_matrix`] always uses
//! XY, XZ, XW, YZ, YW, ZW; the reference animation relies on that order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

use crate::geometry::Vertex4;

/// A 4×4 real matrix acting on column vectors `(x, y, z, w)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4(pub [[f64; 4]; 4]);

impl Matrix4 {
    /// The identity matrix
    pub const fn identity() -> Self {
        Matrix4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rows of the matrix
    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.0
    }

    /// Rotation by `angle` radians in a single plane
    pub fn rotation(plane: RotationPlane, angle: f64) -> Self {
        let (a, b) = plane.axes();
        let (s, c) = angle.sin_cos();

        let mut m = Self::identity();
        m.0[a][a] = c;
        m.0[a][b] = -s;
        m.0[b][a] = s;
        m.0[b][b] = c;
        m
    }

    /// Standard matrix product `self · other`
    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        let mut result = [[0.0; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..4 {
                    *cell += self.0[i][k] * other.0[k][j];
                }
            }
        }
        Matrix4(result)
    }

    /// Apply to a vertex treated as a column vector
    pub fn transform(&self, v: &Vertex4) -> Vertex4 {
        let m = &self.0;
        Vertex4::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
            m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
        )
    }

    /// Transpose (the inverse, for a rotation)
    pub fn transpose(&self) -> Matrix4 {
        let mut t = [[0.0; 4]; 4];
        for (i, row) in self.0.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                t[j][i] = value;
            }
        }
        Matrix4(t)
    }

    /// Determinant by cofactor expansion along the first row
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        let minor = |skip: usize| -> f64 {
            let cols: Vec<usize> = (0..4).filter(|&c| c != skip).collect();
            let r = |row: usize, col: usize| m[row][cols[col]];
            r(1, 0) * (r(2, 1) * r(3, 2) - r(2, 2) * r(3, 1))
                - r(1, 1) * (r(2, 0) * r(3, 2) - r(2, 2) * r(3, 0))
                + r(1, 2) * (r(2, 0) * r(3, 1) - r(2, 1) * r(3, 0))
        };

        (0..4)
            .map(|c| {
                let sign = if c % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[0][c] * minor(c)
            })
            .sum()
    }

    /// Element-wise comparison within `tolerance`
    pub fn approx_eq(&self, other: &Matrix4, tolerance: f64) -> bool {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Whether `Mᵀ·M` is the identity within `tolerance`
    pub fn is_orthogonal(&self, tolerance: f64) -> bool {
        self.transpose()
            .multiply(self)
            .approx_eq(&Matrix4::identity(), tolerance)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        self.multiply(&rhs)
    }
}

impl Mul<Vertex4> for Matrix4 {
    type Output = Vertex4;

    fn mul(self, rhs: Vertex4) -> Vertex4 {
        self.transform(&rhs)
    }
}

/// The 4×4 identity
pub fn identity_matrix() -> Matrix4 {
    Matrix4::identity()
}

/// `result[i][j] = Σ_k a[i][k] · b[k][j]`
pub fn multiply_matrices(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    a.multiply(b)
}

/// Matrix-vector product with `v` as a column vector
pub fn multiply_matrix_vector(m: &Matrix4, v: &Vertex4) -> Vertex4 {
    m.transform(v)
}

/// Rotation in the XY plane (the familiar 3D rotation about Z)
pub fn rotation_xy(angle: f64) -> Matrix4 {
    Matrix4::rotation(RotationPlane::XY, angle)
}

/// Rotation in the XZ plane
pub fn rotation_xz(angle: f64) -> Matrix4 {
    Matrix4::rotation(RotationPlane::XZ, angle)
}

/// Rotation in the XW plane, the characteristic "inside-out" tesseract turn
pub fn rotation_xw(angle: f64) -> Matrix4 {
    Matrix4::rotation(RotationPlane::XW, angle)
}

/// Rotation in the YZ plane
pub fn rotation_yz(angle: f64) -> Matrix4 {
    Matrix4::rotation(RotationPlane::YZ, angle)
}

/// Rotation in the YW plane
pub fn rotation_yw(angle: f64) -> Matrix4 {
    Matrix4::rotation(RotationPlane::YW, angle)
}

/// Rotation in the ZW plane
pub fn rotation_zw(angle: f64) -> Matrix4 {
    Matrix4::rotation(RotationPlane::ZW, angle)
}

/// One of the six coordinate planes of 4D space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationPlane {
    XY,
    XZ,
    XW,
    YZ,
    YW,
    ZW,
}

impl RotationPlane {
    /// All planes, in composition order
    pub const ALL: [RotationPlane; 6] = [
        RotationPlane::XY,
        RotationPlane::XZ,
        RotationPlane::XW,
        RotationPlane::YZ,
        RotationPlane::YW,
        RotationPlane::ZW,
    ];

    /// Axis indices spanned by the plane (0 = x … 3 = w)
    pub const fn axes(self) -> (usize, usize) {
        match self {
            RotationPlane::XY => (0, 1),
            RotationPlane::XZ => (0, 2),
            RotationPlane::XW => (0, 3),
            RotationPlane::YZ => (1, 2),
            RotationPlane::YW => (1, 3),
            RotationPlane::ZW => (2, 3),
        }
    }

    /// Two-letter plane name
    pub const fn name(self) -> &'static str {
        match self {
            RotationPlane::XY => "XY",
            RotationPlane::XZ => "XZ",
            RotationPlane::XW => "XW",
            RotationPlane::YZ => "YZ",
            RotationPlane::YW => "YW",
            RotationPlane::ZW => "ZW",
        }
    }
}

impl fmt::Display for RotationPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One angle per rotation plane, in radians. Missing planes default to 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationAngles {
    #[serde(rename = "XY", default)]
    pub xy: f64,
    #[serde(rename = "XZ", default)]
    pub xz: f64,
    #[serde(rename = "XW", default)]
    pub xw: f64,
    #[serde(rename = "YZ", default)]
    pub yz: f64,
    #[serde(rename = "YW", default)]
    pub yw: f64,
    #[serde(rename = "ZW", default)]
    pub zw: f64,
}

impl RotationAngles {
    /// All angles zero
    pub const fn zero() -> Self {
        Self {
            xy: 0.0,
            xz: 0.0,
            xw: 0.0,
            yz: 0.0,
            yw: 0.0,
            zw: 0.0,
        }
    }

    /// Builder-style setter for one plane
    pub fn with(mut self, plane: RotationPlane, angle: f64) -> Self {
        self.set(plane, angle);
        self
    }

    /// Angle for a plane
    pub fn get(&self, plane: RotationPlane) -> f64 {
        match plane {
            RotationPlane::XY => self.xy,
            RotationPlane::XZ => self.xz,
            RotationPlane::XW => self.xw,
            RotationPlane::YZ => self.yz,
            RotationPlane::YW => self.yw,
            RotationPlane::ZW => self.zw,
        }
    }

    /// Set the angle for a plane
    pub fn set(&mut self, plane: RotationPlane, angle: f64) {
        let slot = match plane {
            RotationPlane::XY => &mut self.xy,
            RotationPlane::XZ => &mut self.xz,
            RotationPlane::XW => &mut self.xw,
            RotationPlane::YZ => &mut self.yz,
            RotationPlane::YW => &mut self.yw,
            RotationPlane::ZW => &mut self.zw,
        };
        *slot = angle;
    }

    /// Every angle multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = *self;
        for plane in RotationPlane::ALL {
            out.set(plane, self.get(plane) * factor);
        }
        out
    }

    /// `(plane, angle)` pairs in composition order
    pub fn iter(&self) -> impl Iterator<Item = (RotationPlane, f64)> + '_ {
        RotationPlane::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Composite rotation: the product of the single-plane matrices in
    /// XY, XZ, XW, YZ, YW, ZW order. Planes with an angle of exactly zero
    /// are skipped, which is the same as multiplying by the identity.
    pub fn to_matrix(&self) -> Matrix4 {
        self.iter()
            .filter(|&(_, angle)| angle != 0.0)
            .fold(Matrix4::identity(), |acc, (plane, angle)| {
                acc.multiply(&Matrix4::rotation(plane, angle))
            })
    }
}

/// Apply one matrix to every vertex, producing new vertices
pub fn rotate_vertices(matrix: &Matrix4, vertices: &[Vertex4]) -> Vec<Vertex4> {
    vertices.iter().map(|v| matrix.transform(v)).collect()
}
