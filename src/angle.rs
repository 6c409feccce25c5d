use crate::Scalar;

/// Value wrapper marking the inner angle as degrees.
///
/// Everything trigonometric in this crate takes rad, so the only operations
/// here are the conversions. Keeping degree values behind a distinct type
/// avoids passing one unit where the other is expected.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Deg<T> {
  pub value: T,
}

impl<T: Scalar> Deg<T> {
  pub fn by(value: T) -> Self {
    Deg { value }
  }

  pub fn to_rad(&self) -> T {
    self.value * T::pi() / T::eval(180.)
  }

  pub fn from_rad(rad: T) -> Self {
    Self::by(rad * T::eval(180.) / T::pi())
  }
}

#[test]
fn rad_conversion() {
  let right = Deg::by(90.0f64);
  assert!((right.to_rad() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
  let back = Deg::from_rad(right.to_rad());
  assert!((back.value - 90.0).abs() < 1e-12);
}
