use std::fmt::{self, Display};
use std::ops::*;

use crate::*;

/// `R` by `C` matrix of scalars, stored column-major.
///
/// The layout is `#[repr(C)]` over `[[T; R]; C]`, so the memory image is the
/// flat column-major buffer with entry (row, col) at index `R * col + row`.
/// Shape agreement between operands is part of the types; products and
/// transposes produce the correspondingly re-shaped type.
#[repr(C)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Matrix<T, const R: usize, const C: usize> {
  columns: [[T; R]; C],
}

pub type Mat2<T> = Matrix<T, 2, 2>;
pub type Mat3<T> = Matrix<T, 3, 3>;
pub type Mat4<T> = Matrix<T, 4, 4>;

unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable
  for Matrix<T, R, C>
{
}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
  pub fn from_columns(columns: [[T; R]; C]) -> Self {
    Self { columns }
  }

  pub fn rows(&self) -> usize {
    R
  }

  pub fn columns(&self) -> usize {
    C
  }

  pub fn shape(&self) -> (usize, usize) {
    (R, C)
  }
}

impl<T: Copy, const R: usize, const C: usize> Matrix<T, R, C> {
  /// Value at the zero-based row and column, `None` out of bounds.
  pub fn at(&self, row: usize, column: usize) -> Option<T> {
    self.columns.get(column)?.get(row).copied()
  }

  pub(crate) fn get(&self, row: usize, column: usize) -> T {
    self.columns[column][row]
  }
}

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
  pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
    Self {
      columns: std::array::from_fn(|c| std::array::from_fn(|r| f(r, c))),
    }
  }

  #[must_use]
  pub fn splat(v: T) -> Self {
    Self::from_fn(|_, _| v)
  }

  /// Build from a column-major buffer. A short buffer leaves the trailing
  /// entries zero; surplus values are ignored.
  pub fn from_column_slice(values: &[T]) -> Self {
    let mut m = Self::zero();
    for (i, v) in values.iter().take(R * C).enumerate() {
      m.columns[i / R][i % R] = *v;
    }
    m
  }

  /// Checked runtime construction. The buffer length must equal `R * C`.
  pub fn try_from_column_slice(values: &[T]) -> Result<Self, DimensionMismatch> {
    if values.len() != R * C {
      return Err(DimensionMismatch {
        expected: R * C,
        found: values.len(),
      });
    }
    Ok(Self::from_column_slice(values))
  }

  #[must_use]
  pub fn map<F>(self, f: F) -> Self
  where
    F: Fn(T) -> T,
  {
    Self::from_fn(|r, c| f(self.get(r, c)))
  }

  #[must_use]
  pub fn zip<F>(self, other: Self, f: F) -> Self
  where
    F: Fn(T, T) -> T,
  {
    Self::from_fn(|r, c| f(self.get(r, c), other.get(r, c)))
  }

  /// Reinterpret the column-major buffer under a new shape. The flat values
  /// keep their indices: a larger shape zero-fills the tail, a smaller one
  /// truncates it.
  #[must_use]
  pub fn reshape<const R2: usize, const C2: usize>(self) -> Matrix<T, R2, C2> {
    let mut m = Matrix::zero();
    let shared = (R * C).min(R2 * C2);
    for i in 0..shared {
      m.columns[i / R2][i % R2] = self.columns[i / R][i % R];
    }
    m
  }

  /// Full index permutation; rows become columns.
  #[must_use]
  pub fn transpose(self) -> Matrix<T, C, R> {
    Matrix::from_fn(|r, c| self.get(c, r))
  }
}

impl<T: Scalar, const R: usize, const C: usize> Add for Matrix<T, R, C> {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    self.zip(rhs, |a, b| a + b)
  }
}

impl<T: Scalar, const R: usize, const C: usize> Sub for Matrix<T, R, C> {
  type Output = Self;

  fn sub(self, rhs: Self) -> Self {
    self.zip(rhs, |a, b| a - b)
  }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
  type Output = Self;

  fn mul(self, s: T) -> Self {
    self.map(|v| v * s)
  }
}

impl<T: Scalar, const R: usize, const C: usize> AddAssign for Matrix<T, R, C> {
  fn add_assign(&mut self, rhs: Self) {
    *self = *self + rhs;
  }
}

impl<T: Scalar, const R: usize, const C: usize> SubAssign for Matrix<T, R, C> {
  fn sub_assign(&mut self, rhs: Self) {
    *self = *self - rhs;
  }
}

impl<T: Scalar, const R: usize, const C: usize> MulAssign<T> for Matrix<T, R, C> {
  fn mul_assign(&mut self, s: T) {
    *self = *self * s;
  }
}

impl<T: Scalar, const R: usize, const C: usize, const C2: usize> Mul<Matrix<T, C, C2>>
  for Matrix<T, R, C>
{
  type Output = Matrix<T, R, C2>;

  fn mul(self, rhs: Matrix<T, C, C2>) -> Matrix<T, R, C2> {
    Matrix::from_fn(|r, c| {
      let mut acc = T::zero();
      for k in 0..C {
        acc = acc + self.get(r, k) * rhs.get(k, c);
      }
      acc
    })
  }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<Vector<T, C>> for Matrix<T, R, C> {
  type Output = Vector<T, R>;

  fn mul(self, v: Vector<T, C>) -> Vector<T, R> {
    Vector::from_fn(|r| {
      let mut acc = T::zero();
      for k in 0..C {
        acc = acc + self.get(r, k) * v[k];
      }
      acc
    })
  }
}

impl<T: Scalar, const R: usize, const C: usize> num_traits::Zero for Matrix<T, R, C> {
  #[inline(always)]
  fn zero() -> Self {
    Self::splat(T::zero())
  }

  #[inline(always)]
  fn is_zero(&self) -> bool {
    self.eq(&Self::zero())
  }
}

impl<T: Scalar, const D: usize> num_traits::One for Matrix<T, D, D> {
  #[inline(always)]
  fn one() -> Self {
    Matrix::from_fn(|r, c| if r == c { T::one() } else { T::zero() })
  }
}

impl<T: Scalar, const R: usize, const C: usize> Default for Matrix<T, R, C> {
  fn default() -> Self {
    Self::zero()
  }
}

impl<T, const R: usize, const C: usize> AsRef<[[T; R]; C]> for Matrix<T, R, C> {
  fn as_ref(&self) -> &[[T; R]; C] {
    &self.columns
  }
}

impl<T: Display, const R: usize, const C: usize> Display for Matrix<T, R, C> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for r in 0..R {
      if r > 0 {
        writeln!(f)?;
      }
      write!(f, "[")?;
      for c in 0..C {
        if c > 0 {
          write!(f, ", ")?;
        }
        write!(f, "{}", self.columns[c][r])?;
      }
      write!(f, "]")?;
    }
    Ok(())
  }
}

#[test]
fn create_and_at() {
  let m = Matrix::<f64, 2, 3>::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  assert_eq!(m.shape(), (2, 3));
  assert_eq!(m.rows(), 2);
  assert_eq!(m.columns(), 3);
  assert_eq!(m.at(0, 0), Some(1.0));
  assert_eq!(m.at(1, 0), Some(2.0));
  assert_eq!(m.at(0, 1), Some(3.0));
  assert_eq!(m.at(1, 1), Some(4.0));
  assert_eq!(m.at(0, 2), Some(5.0));
  assert_eq!(m.at(1, 2), Some(6.0));
  assert_eq!(m.at(2, 0), None);
  assert_eq!(m.at(0, 3), None);
}

#[test]
fn short_buffer_zero_fills() {
  let m = Matrix::<f64, 2, 2>::from_column_slice(&[1.0, 2.0]);
  assert_eq!(m, Matrix::from_column_slice(&[1.0, 2.0, 0.0, 0.0]));

  let err = Matrix::<f64, 2, 2>::try_from_column_slice(&[1.0, 2.0]);
  assert_eq!(
    err,
    Err(DimensionMismatch {
      expected: 4,
      found: 2,
    })
  );
}

#[test]
fn equality_is_exact() {
  let m = Matrix::<f64, 2, 3>::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  let same = Matrix::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  let off = Matrix::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 7.0]);
  assert_eq!(m, same);
  assert_ne!(m, off);
}

#[test]
fn add_sub_scale() {
  let m1 = Mat3::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
  let m2 = Mat3::from_column_slice(&[0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]);
  assert_eq!(
    m1 + m2,
    Mat3::from_column_slice(&[1.0, 4.0, 7.0, 10.0, 13.0, 16.0, 19.0, 22.0, 25.0])
  );
  assert_eq!(
    m2 - m1,
    Mat3::from_column_slice(&[-1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
  );

  let m = Matrix::<f64, 3, 2>::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  assert_eq!(
    m * 2.0,
    Matrix::from_column_slice(&[2.0, 4.0, 6.0, 8.0, 10.0, 12.0])
  );

  let mut acc = m1;
  acc += m2;
  acc -= m1;
  acc *= 1.0;
  assert_eq!(acc, m2);
}

#[test]
fn matrix_product() {
  let m1 = Matrix::<f64, 2, 3>::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  let m2 = Matrix::<f64, 3, 2>::from_column_slice(&[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
  let m = m1 * m2;
  assert_eq!(m.shape(), (2, 2));
  assert_eq!(m, Matrix::from_column_slice(&[76.0, 100.0, 103.0, 136.0]));
}

#[test]
fn vector_product() {
  let m = Matrix::<f64, 2, 3>::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  let v = m * vec3(7.0, 8.0, 9.0);
  assert_eq!(v, vec2(76.0, 100.0));
}

#[test]
fn product_matches_cgmath() {
  let a: [f64; 16] = std::array::from_fn(|i| (i * i) as f64 - 3.0);
  let b: [f64; 16] = std::array::from_fn(|i| 16.0 - i as f64);

  let m = Mat4::from_column_slice(&a) * Mat4::from_column_slice(&b);

  let ca: cgmath::Matrix4<f64> = cgmath::Matrix4::from(bytemuck::cast::<_, [[f64; 4]; 4]>(a));
  let cb: cgmath::Matrix4<f64> = cgmath::Matrix4::from(bytemuck::cast::<_, [[f64; 4]; 4]>(b));
  let cm = ca * cb;

  for r in 0..4 {
    for c in 0..4 {
      assert!((m.get(r, c) - cm[c][r]).abs() < 1e-9);
    }
  }
}

#[test]
fn reshape_grow_and_shrink() {
  let m = Matrix::<f64, 2, 3>::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  let grown: Matrix<f64, 3, 4> = m.reshape();
  assert_eq!(grown.shape(), (3, 4));
  assert_eq!(
    grown,
    Matrix::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
  );

  let shrunk: Matrix<f64, 2, 2> = m.reshape();
  assert_eq!(shrunk, Matrix::from_column_slice(&[1.0, 2.0, 3.0, 4.0]));
}

#[test]
fn transpose() {
  let m = Matrix::<f64, 2, 3>::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  let t = m.transpose();
  assert_eq!(t.shape(), (3, 2));
  assert_eq!(
    t,
    Matrix::from_column_slice(&[1.0, 3.0, 5.0, 2.0, 4.0, 6.0])
  );
}

#[test]
fn column_major_memory_layout() {
  let m = Mat2::<f32>::from_column_slice(&[1.0, 2.0, 3.0, 4.0]);
  let raw: [f32; 4] = bytemuck::cast(m);
  assert_eq!(raw, [1.0, 2.0, 3.0, 4.0]);
  assert_eq!(m.as_ref(), &[[1.0, 2.0], [3.0, 4.0]]);
  assert_eq!(m, Matrix::from_columns([[1.0, 2.0], [3.0, 4.0]]));
}

#[test]
fn display() {
  let m = Matrix::<f64, 2, 3>::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  assert_eq!(m.to_string(), "[1, 3, 5]\n[2, 4, 6]");
}
