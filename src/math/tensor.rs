//! Dense fourth-order tensors in three dimensions

use std::ops::{Add, Mul, Sub};

use russell_tensor::{t4_ddot_t4, Mandel};
use serde::{Deserialize, Serialize};

use super::{Mat3, Mat6, Vec3};

/// Components `T_ijkl` as nested arrays
pub type Components = [[[[f64; 3]; 3]; 3]; 3];

/// Row of each Mandel component of this crate (11, 22, 33, 23, 13, 12) in the
/// `russell_tensor` basis, which orders the shears 12, 23, 13
const RUSSELL_ROW: [usize; 6] = [0, 1, 2, 4, 5, 3];

/// Side of the general Mandel matrix
const GENERAL_DIM: usize = 9;

/// A fourth-order tensor with 81 components `T_ijkl`
///
/// Stored as a general (9x9) Mandel matrix of `russell_tensor`, so no symmetry
/// is assumed. The first six basis tensors are symmetric, which makes the
/// upper-left 6x6 block the Mandel matrix of the minor-symmetric part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "Components", from = "Components")]
pub struct Tensor4 {
    inner: russell_tensor::Tensor4,
}

impl Default for Tensor4 {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Tensor4 {
    /// Tensor with all components zero
    pub fn zeros() -> Self {
        Self {
            inner: russell_tensor::Tensor4::new(Mandel::General),
        }
    }

    /// Build a tensor from its components
    pub fn from_components(components: &Components) -> Self {
        match russell_tensor::Tensor4::from_array(components, Mandel::General) {
            Ok(inner) => Self { inner },
            // only the symmetric representations reject input
            Err(_) => unreachable!(),
        }
    }

    /// Build a tensor from a function of its indices
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize, usize) -> f64,
    {
        let mut components = [[[[0.0; 3]; 3]; 3]; 3];
        for (i, plane) in components.iter_mut().enumerate() {
            for (j, block) in plane.iter_mut().enumerate() {
                for (k, row) in block.iter_mut().enumerate() {
                    for (l, value) in row.iter_mut().enumerate() {
                        *value = f(i, j, k, l);
                    }
                }
            }
        }
        Self::from_components(&components)
    }

    /// Tensor whose minor-symmetric part has the given Mandel matrix
    ///
    /// The skew basis rows and columns are left at zero, so the result is
    /// minor-symmetric.
    pub fn from_mandel(m: &Mat6) -> Self {
        let mut t = Self::zeros();
        for a in 0..6 {
            for b in 0..6 {
                t.inner.matrix_mut().set(RUSSELL_ROW[a], RUSSELL_ROW[b], m[(a, b)]);
            }
        }
        t
    }

    /// Mandel matrix of the minor-symmetric part
    pub fn to_mandel(&self) -> Mat6 {
        mandel_from_russell(&self.inner)
    }

    /// Component `T_ijkl`
    pub fn get(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        self.inner.get(i, j, k, l)
    }

    /// All 81 components
    pub fn components(&self) -> Components {
        let mut components = [[[[0.0; 3]; 3]; 3]; 3];
        for (i, plane) in components.iter_mut().enumerate() {
            for (j, block) in plane.iter_mut().enumerate() {
                for (k, row) in block.iter_mut().enumerate() {
                    for (l, value) in row.iter_mut().enumerate() {
                        *value = self.get(i, j, k, l);
                    }
                }
            }
        }
        components
    }

    /// Underlying `russell_tensor` representation
    pub fn as_russell(&self) -> &russell_tensor::Tensor4 {
        &self.inner
    }

    /// Symmetric identity `1/2 (d_ik d_jl + d_il d_jk)`
    pub fn identity_sym() -> Self {
        Self::from_fn(|i, j, k, l| 0.5 * (kronecker(i, k) * kronecker(j, l) + kronecker(i, l) * kronecker(j, k)))
    }

    /// Dyadic product `A_ij B_kl`
    pub fn dyadic(a: &Mat3, b: &Mat3) -> Self {
        Self::from_fn(|i, j, k, l| a[(i, j)] * b[(k, l)])
    }

    /// Fourfold outer product of a vector with itself
    pub fn outer4(p: &Vec3) -> Self {
        Self::from_fn(|i, j, k, l| p[i] * p[j] * p[k] * p[l])
    }

    /// Double contraction `A_ijmn B_mnkl`
    pub fn double_dot(&self, other: &Tensor4) -> Self {
        let mut out = Self::zeros();
        t4_ddot_t4(&mut out.inner, 1.0, &self.inner, &other.inner);
        out
    }

    /// `T_jikl`
    pub fn left_minor_transpose(&self) -> Self {
        Self::from_fn(|i, j, k, l| self.get(j, i, k, l))
    }

    /// `T_ijlk`
    pub fn right_minor_transpose(&self) -> Self {
        Self::from_fn(|i, j, k, l| self.get(i, j, l, k))
    }

    /// `T_klij`
    pub fn major_transpose(&self) -> Self {
        Self::from_fn(|i, j, k, l| self.get(k, l, i, j))
    }

    /// Contract the last index pair, `T_ijkk`
    pub fn trace_last_pair(&self) -> Mat3 {
        Mat3::from_fn(|i, j| (0..3).map(|k| self.get(i, j, k, k)).sum())
    }

    /// Full contraction `T_ijkl a_i b_j c_k d_l`
    pub fn contract_vectors(&self, a: &Vec3, b: &Vec3, c: &Vec3, d: &Vec3) -> f64 {
        let components = self.components();
        let mut sum = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    for l in 0..3 {
                        sum += components[i][j][k][l] * a[i] * b[j] * c[k] * d[l];
                    }
                }
            }
        }
        sum
    }

    /// Frobenius norm
    ///
    /// The Mandel basis is orthonormal, so this is the norm of the 9x9 matrix.
    pub fn norm(&self) -> f64 {
        self.mandel_entries().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Frobenius norm of `self - other`
    pub fn norm_diff(&self, other: &Tensor4) -> f64 {
        self.zip_with(other, |a, b| a - b).norm()
    }

    fn mandel_entries(&self) -> impl Iterator<Item = f64> + '_ {
        (0..GENERAL_DIM).flat_map(move |m| (0..GENERAL_DIM).map(move |n| self.inner.matrix().get(m, n)))
    }

    fn zip_with<F>(&self, other: &Tensor4, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut out = Self::zeros();
        for m in 0..GENERAL_DIM {
            for n in 0..GENERAL_DIM {
                out.inner
                    .matrix_mut()
                    .set(m, n, f(self.inner.matrix().get(m, n), other.inner.matrix().get(m, n)));
            }
        }
        out
    }
}

/// Mandel matrix in this crate's ordering from a 3D `russell_tensor` tensor
///
/// Accepts both the general and the symmetric representation; only the
/// symmetric block is read.
pub fn mandel_from_russell(t: &russell_tensor::Tensor4) -> Mat6 {
    Mat6::from_fn(|a, b| t.matrix().get(RUSSELL_ROW[a], RUSSELL_ROW[b]))
}

/// Kronecker delta
pub fn kronecker(i: usize, j: usize) -> f64 {
    if i == j {
        1.0
    } else {
        0.0
    }
}

impl PartialEq for Tensor4 {
    fn eq(&self, other: &Self) -> bool {
        self.mandel_entries().eq(other.mandel_entries())
    }
}

impl From<Components> for Tensor4 {
    fn from(components: Components) -> Self {
        Self::from_components(&components)
    }
}

impl From<Tensor4> for Components {
    fn from(t: Tensor4) -> Self {
        t.components()
    }
}

impl Add for Tensor4 {
    type Output = Tensor4;

    fn add(self, rhs: Tensor4) -> Tensor4 {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl Sub for Tensor4 {
    type Output = Tensor4;

    fn sub(self, rhs: Tensor4) -> Tensor4 {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl Mul<f64> for Tensor4 {
    type Output = Tensor4;

    fn mul(self, rhs: f64) -> Tensor4 {
        self.zip_with(&Tensor4::zeros(), |a, _| a * rhs)
    }
}

impl Mul<Tensor4> for f64 {
    type Output = Tensor4;

    fn mul(self, rhs: Tensor4) -> Tensor4 {
        rhs * self
    }
}
