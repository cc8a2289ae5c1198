//! 4x4 homogeneous transform.

use std::ops::{Index, IndexMut, Mul};

use crate::vec4::Vec4;

/// Row-major 4x4 matrix acting on column vectors.
///
/// `m[row][col]`; translation lives in column 3, so `a * b` applies `b`
/// first when the product is used to transform a vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Build a matrix from its rows.
    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Pure scale with the diagonal taken from `s` (`s.w` is ignored, the
    /// homogeneous coordinate always keeps weight 1).
    pub fn scale(s: Vec4) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = s.x;
        out.m[1][1] = s.y;
        out.m[2][2] = s.z;
        out
    }

    /// Uniform scale on x and y, identity on z.
    pub fn scale_xy(factor: f32) -> Self {
        Self::scale(Vec4::new(factor, factor, 1.0, 1.0))
    }

    /// Pure translation by the x/y/z components of `t`.
    pub fn translation(t: Vec4) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][3] = t.x;
        out.m[1][3] = t.y;
        out.m[2][3] = t.z;
        out
    }

    /// Rotation about the z axis by a whole number of quarter turns
    /// (positive is counter-clockwise). Entries are exact.
    pub fn quarter_turns(turns: i32) -> Self {
        let (sin, cos) = match turns.rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
        let mut out = Self::IDENTITY;
        out.m[0][0] = cos;
        out.m[0][1] = -sin;
        out.m[1][0] = sin;
        out.m[1][1] = cos;
        out
    }

    /// Orthographic projection of the box `[-right, right] x [-top, top] x [near, far]`
    /// onto normalized device coordinates.
    pub fn ortho(right: f32, top: f32, near: f32, far: f32) -> Self {
        let depth = far - near;
        Self::from_rows([
            [1.0 / right, 0.0, 0.0, 0.0],
            [0.0, 1.0 / top, 0.0, 0.0],
            [0.0, 0.0, -2.0 / depth, -(far + near) / depth],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row][col]
    }

    /// Translation part on the x and y axes.
    pub fn translation_xy(&self) -> (f32, f32) {
        (self.m[0][3], self.m[1][3])
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::IDENTITY;
        for (row, out_row) in out.m.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = self.m[col][row];
            }
        }
        out
    }

    /// Transform a homogeneous vector.
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let row = |r: usize| Vec4::from(self.m[r]).dot(v);
        Vec4::new(row(0), row(1), row(2), row(3))
    }

    /// Inverse via Gauss-Jordan elimination with partial pivoting.
    ///
    /// Returns `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let mut a = self.m;
        let mut inv = Self::IDENTITY.m;

        for col in 0..4 {
            let pivot = (col..4).max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))?;
            let pivot_value = a[pivot][col];
            if pivot_value.abs() < f32::MIN_POSITIVE || !pivot_value.is_finite() {
                return None;
            }
            a.swap(col, pivot);
            inv.swap(col, pivot);

            let norm = 1.0 / a[col][col];
            for k in 0..4 {
                a[col][k] *= norm;
                inv[col][k] *= norm;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        Some(Self { m: inv })
    }

    /// Check whether every element is within `eps` of `other`.
    pub fn approx_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[row][col]
    }
}

impl IndexMut<(usize, usize)> for Mat4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.m[row][col]
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Mat4 { m: out }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        self.transform(rhs)
    }
}
