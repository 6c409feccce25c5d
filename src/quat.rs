use std::fmt::{self, Display};
use std::ops::Mul;

use crate::*;

/// Rotation quaternion.
///
/// Construction renormalizes to unit length, so a freshly built value always
/// satisfies x² + y² + z² + w² = 1. Multiplication does not renormalize:
/// products of unit quaternions stay unit up to floating error, and the
/// drift over long chains is accepted rather than corrected.
#[repr(C)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Quat<T> {
  pub x: T,
  pub y: T,
  pub z: T,
  pub w: T,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Quat<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Quat<T> {}

impl<T: Scalar> Quat<T> {
  /// Raw components, normalized immediately. All-zero input divides by a
  /// zero norm and yields NaN components.
  pub fn new(x: T, y: T, z: T, w: T) -> Self {
    Quat { x, y, z, w }.normalize()
  }

  /// Rotation of `angle` rad around `axis`. The axis is expected to be
  /// unit length; a zero axis degenerates to NaN, unguarded.
  pub fn from_axis_angle(axis: Vec3<T>, angle: T) -> Self {
    let half_angle = angle * T::half();
    let s = half_angle.sin();
    Self::new(
      axis.x() * s,
      axis.y() * s,
      axis.z() * s,
      half_angle.cos(),
    )
  }

  fn normalize(self) -> Self {
    let magnitude =
      (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
    Quat {
      x: self.x / magnitude,
      y: self.y / magnitude,
      z: self.z / magnitude,
      w: self.w / magnitude,
    }
  }
}

impl<T: Scalar> From<[T; 4]> for Quat<T> {
  fn from(xyzw: [T; 4]) -> Self {
    Self::new(xyzw[0], xyzw[1], xyzw[2], xyzw[3])
  }
}

impl<T: Scalar> Mul for Quat<T> {
  type Output = Self;

  /// Rotation composition. The result is left as computed, without a
  /// renormalization pass.
  fn mul(self, q: Self) -> Self {
    Quat {
      x: q.w * self.x + q.x * self.w + q.y * self.z - q.z * self.y,
      y: q.w * self.y + q.y * self.w + q.z * self.x - q.x * self.z,
      z: q.w * self.z + q.z * self.w + q.x * self.y - q.y * self.x,
      w: q.w * self.w - q.x * self.x - q.y * self.y - q.z * self.z,
    }
  }
}

impl<T: Display> Display for Quat<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "[{}, {}, {}, {}]", self.x, self.y, self.z, self.w)
  }
}

#[test]
fn construction_normalizes() {
  let q: Quat<f64> = Quat::new(1.0, 1.0, 1.0, 1.0);
  assert_eq!(q, Quat { x: 0.5, y: 0.5, z: 0.5, w: 0.5 });

  let q: Quat<f64> = Quat::new(3.0, 0.0, 0.0, 4.0);
  assert_eq!(q.x, 0.6);
  assert_eq!(q.w, 0.8);
  assert!((q.x * q.x + q.y * q.y + q.z * q.z + q.w * q.w - 1.0).abs() < 1e-12);
}

#[test]
fn from_array() {
  let q = Quat::from([0.0, 0.0, 0.0, 1.0]);
  assert_eq!(q, Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 });
}

#[test]
fn from_axis_angle() {
  let q = Quat::from_axis_angle(vec3(0.0, 0.0, 0.0), 0.0);
  assert_eq!(q, Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 });

  let q = Quat::from_axis_angle(vec3(1.0, 0.0, 0.0), std::f64::consts::FRAC_PI_2);
  let s = 0.5f64.sqrt();
  assert!((q.x - s).abs() < 1e-12);
  assert!((q.y).abs() < 1e-12);
  assert!((q.z).abs() < 1e-12);
  assert!((q.w - s).abs() < 1e-12);

  let half = 0.5f64.sqrt();
  let q = Quat::from_axis_angle(vec3(0.0, half, half), std::f64::consts::FRAC_PI_2);
  assert!((q.x).abs() < 1e-12);
  assert!((q.y - 0.5).abs() < 1e-12);
  assert!((q.z - 0.5).abs() < 1e-12);
  assert!((q.w - half).abs() < 1e-12);
}

#[test]
fn multiply() {
  let s = 0.5f64.sqrt();
  let q1 = Quat::new(s, 0.0, 0.0, s);
  let q2 = Quat::new(0.0, 0.5, 0.5, s);
  let q = q1 * q2;
  assert!((q.x - 0.5).abs() < 1e-12);
  assert!((q.y - s).abs() < 1e-12);
  assert!((q.z).abs() < 1e-12);
  assert!((q.w - 0.5).abs() < 1e-12);
}

#[test]
fn multiply_composes_like_the_formula() {
  let i = Quat::new(1.0, 0.0, 0.0, 0.0);
  let j = Quat::new(0.0, 1.0, 0.0, 0.0);
  let q = i * j;
  assert_eq!(q, Quat { x: 0.0, y: 0.0, z: -1.0, w: 0.0 });
}

#[test]
fn display() {
  let q = Quat::new(0.5, 0.5, 0.5, 0.5);
  assert_eq!(q.to_string(), "[0.5, 0.5, 0.5, 0.5]");
}
