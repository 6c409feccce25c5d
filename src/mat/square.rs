use crate::*;

/// Operations that only exist on square matrices.
///
/// Implemented for orders 1 through 8; larger orders are outside this
/// crate's design envelope and simply have no impl.
pub trait SquareMatrix<T: Scalar>: Sized {
  #[must_use]
  fn identity() -> Self;

  #[must_use]
  fn transpose(&self) -> Self;

  /// Determinant by Laplace expansion along the first row; closed forms for
  /// orders 1 and 2.
  #[must_use]
  fn det(&self) -> T;

  /// `None` when the determinant is zero. Singularity is an ordinary
  /// outcome, not an error.
  #[must_use]
  fn inverse(&self) -> Option<Self>;

  #[must_use]
  fn inverse_or_identity(&self) -> Self {
    self.inverse().unwrap_or_else(Self::identity)
  }
}

impl<T: Scalar> SquareMatrix<T> for Matrix<T, 1, 1> {
  fn identity() -> Self {
    Self::one()
  }

  fn transpose(&self) -> Self {
    *self
  }

  fn det(&self) -> T {
    self.get(0, 0)
  }

  fn inverse(&self) -> Option<Self> {
    let det = self.det();
    if det == T::zero() {
      return None;
    }
    Some(Self::splat(T::one() / det))
  }
}

impl<T: Scalar> SquareMatrix<T> for Matrix<T, 2, 2> {
  fn identity() -> Self {
    Self::one()
  }

  fn transpose(&self) -> Self {
    Matrix::transpose(*self)
  }

  fn det(&self) -> T {
    self.get(0, 0) * self.get(1, 1) - self.get(0, 1) * self.get(1, 0)
  }

  fn inverse(&self) -> Option<Self> {
    let det = self.det();
    if det == T::zero() {
      return None;
    }
    let inv_det = T::one() / det;
    Some(Matrix::from_columns([
      [self.get(1, 1) * inv_det, -self.get(1, 0) * inv_det],
      [-self.get(0, 1) * inv_det, self.get(0, 0) * inv_det],
    ]))
  }
}

// One impl per order; each minor is one order smaller, so the method family
// bottoms out at the 1x1 matrix.
macro_rules! impl_minor {
  ($($d:tt => $m:tt),+ $(,)?) => {
    $(
      impl<T: Scalar> Matrix<T, $d, $d> {
        /// Matrix with the given row and column deleted.
        #[must_use]
        pub fn minor(&self, row: usize, column: usize) -> Matrix<T, $m, $m> {
          Matrix::from_fn(|r, c| {
            self.get(
              if r < row { r } else { r + 1 },
              if c < column { c } else { c + 1 },
            )
          })
        }
      }
    )+
  };
}

impl_minor!(2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5, 7 => 6, 8 => 7);

macro_rules! impl_square_matrix {
  ($($d:tt),+ $(,)?) => {
    $(
      impl<T: Scalar> SquareMatrix<T> for Matrix<T, $d, $d> {
        fn identity() -> Self {
          Self::one()
        }

        fn transpose(&self) -> Self {
          Matrix::transpose(*self)
        }

        fn det(&self) -> T {
          let mut det = T::zero();
          let mut sign = T::one();
          for column in 0..$d {
            det = det + sign * self.get(0, column) * self.minor(0, column).det();
            sign = -sign;
          }
          det
        }

        fn inverse(&self) -> Option<Self> {
          let det = self.det();
          if det == T::zero() {
            return None;
          }
          let inv_det = T::one() / det;
          let cofactors = Matrix::from_fn(|r, c| {
            let minor_det = self.minor(r, c).det();
            if (r + c) % 2 == 0 {
              minor_det
            } else {
              -minor_det
            }
          });
          // adjugate over determinant
          Some(cofactors.transpose() * inv_det)
        }
      }
    )+
  };
}

impl_square_matrix!(3, 4, 5, 6, 7, 8);

#[test]
fn identity_diagonal() {
  let m = Mat3::<f64>::identity();
  for r in 0..3 {
    for c in 0..3 {
      let expected = if r == c { 1.0 } else { 0.0 };
      assert_eq!(m.at(r, c), Some(expected));
    }
  }
  assert_eq!(
    m,
    Mat3::from_column_slice(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
  );
}

#[test]
fn minor() {
  let m = Mat3::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
  let minor = m.minor(1, 2);
  assert_eq!(minor.shape(), (2, 2));
  assert_eq!(minor, Mat2::from_column_slice(&[1.0, 3.0, 4.0, 6.0]));
}

#[test]
fn determinant() {
  let m1 = Mat3::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
  assert_eq!(m1.det(), 0.0);

  let m2 = Mat3::from_column_slice(&[10.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
  assert_eq!(m2.det(), -27.0);

  let m3 = Mat4::from_column_slice(&[
    1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
  ]);
  assert_eq!(m3.det(), 0.0);

  let m4 = Mat4::from_column_slice(&[
    10.0, 2.0, 3.0, 4.0, 5.0, 60.0, 7.0, 8.0, 9.0, 10.0, 110.0, 12.0, 13.0, 14.0, 15.0, 160.0,
  ]);
  assert_eq!(m4.det(), 9612432.0);

  assert_eq!(Matrix::<f64, 1, 1>::from_column_slice(&[7.0]).det(), 7.0);
  assert_eq!(
    Mat2::from_column_slice(&[1.0, 2.0, 3.0, 4.0]).det(),
    -2.0
  );
}

#[test]
fn determinant_ignores_transpose() {
  let m = Mat4::from_column_slice(&[
    10.0, 2.0, 3.0, 4.0, 5.0, 60.0, 7.0, 8.0, 9.0, 10.0, 110.0, 12.0, 13.0, 14.0, 15.0, 160.0,
  ]);
  assert_eq!(SquareMatrix::transpose(&m).det(), m.det());
}

#[test]
fn inverse() {
  let m1 = Matrix::<f64, 1, 1>::from_column_slice(&[2.0]);
  assert_eq!(
    m1.inverse(),
    Some(Matrix::from_column_slice(&[0.5]))
  );

  let m2 = Mat2::from_column_slice(&[1.0, 2.0, 3.0, 4.0]);
  assert_eq!(
    m2.inverse(),
    Some(Mat2::from_column_slice(&[-2.0, 1.0, 1.5, -0.5]))
  );

  let m3 = Mat3::from_column_slice(&[1.0, 2.0, 3.0, 2.0, 3.0, 2.0, 3.0, 2.0, 1.0]);
  assert_eq!(
    m3.inverse(),
    Some(Mat3::from_column_slice(&[
      0.125, -0.5, 0.625, -0.5, 1.0, -0.5, 0.625, -0.5, 0.125
    ]))
  );
}

#[test]
fn singular_has_no_inverse() {
  let m = Mat3::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
  assert_eq!(m.inverse(), None);
  assert_eq!(m.inverse_or_identity(), Mat3::identity());

  let z = Matrix::<f64, 1, 1>::from_column_slice(&[0.0]);
  assert_eq!(z.inverse(), None);
}

#[test]
fn inverse_times_original_is_identity() {
  let m = Mat3::from_column_slice(&[10.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
  let product = m * m.inverse().unwrap();
  let identity = Mat3::<f64>::identity();
  for r in 0..3 {
    for c in 0..3 {
      assert!((product.get(r, c) - identity.get(r, c)).abs() < 1e-12);
    }
  }
}

#[test]
fn inverse_matches_cgmath() {
  let values: [f64; 16] = [
    4.0, 0.0, 0.0, 0.0, 0.0, 2.0, 1.0, 0.0, 1.0, 0.0, 3.0, 0.0, 7.0, -2.0, 0.5, 1.0,
  ];
  let inv = Mat4::from_column_slice(&values).inverse().unwrap();

  let cm: cgmath::Matrix4<f64> = cgmath::Matrix4::from(bytemuck::cast::<_, [[f64; 4]; 4]>(values));
  let cinv = cgmath::SquareMatrix::invert(&cm).unwrap();

  for r in 0..4 {
    for c in 0..4 {
      assert!((inv.get(r, c) - cinv[c][r]).abs() < 1e-9);
    }
  }
}
