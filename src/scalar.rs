use std::fmt::Debug;

use num_traits::{Float, NumCast};
pub use num_traits::{One, Zero};

/// The scalar type the whole crate is generic over, in practice f32 or f64.
pub trait Scalar: Float + Debug + 'static {
  #[inline]
  fn two() -> Self {
    Self::one() + Self::one()
  }

  #[inline]
  fn half() -> Self {
    Self::one() / Self::two()
  }

  #[inline]
  fn pi() -> Self {
    Self::eval(std::f64::consts::PI)
  }

  #[inline]
  fn half_pi() -> Self {
    Self::eval(std::f64::consts::FRAC_PI_2)
  }

  /// Bring an f64 constant into the scalar type.
  /// `NumCast` between float types always succeeds.
  #[inline]
  fn eval(v: f64) -> Self {
    <Self as NumCast>::from(v).unwrap()
  }
}

impl<T: Float + Debug + 'static> Scalar for T {}

#[test]
fn constants() {
  assert_eq!(f64::two(), 2.0);
  assert_eq!(f64::half(), 0.5);
  assert_eq!(f64::pi(), std::f64::consts::PI);
  assert_eq!(f32::half_pi(), std::f32::consts::FRAC_PI_2);
  assert_eq!(f32::eval(1.5), 1.5f32);
}
