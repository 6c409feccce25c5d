use crate::*;

impl<T: Scalar> Mat4<T> {
  /// Right-handed OpenGL-style perspective projection.
  ///
  /// `angle` is the vertical field of view in rad, `aspect` is width over
  /// height, `near` and `far` bound the visible depth range.
  pub fn perspective(angle: T, aspect: T, near: T, far: T) -> Self {
    let f = (T::half_pi() - T::half() * angle).tan();
    let range_inv = T::one() / (near - far);
    let o = T::zero();

    #[rustfmt::skip]
    let m = Self::from_columns([
      [f / aspect, o, o,                                 o],
      [o,          f, o,                                 o],
      [o,          o, (near + far) * range_inv,          -T::one()],
      [o,          o, near * far * range_inv * T::two(), o],
    ]);
    m
  }

  /// Affine translation: identity with the vector in the last column.
  pub fn translation(v: Vec3<T>) -> Self {
    let o = T::zero();
    let l = T::one();

    #[rustfmt::skip]
    let m = Self::from_columns([
      [l,     o,     o,     o],
      [o,     l,     o,     o],
      [o,     o,     l,     o],
      [v.x(), v.y(), v.z(), l],
    ]);
    m
  }
}

impl<T: Scalar> From<Quat<T>> for Mat4<T> {
  /// Homogeneous rotation matrix of a unit quaternion.
  fn from(q: Quat<T>) -> Self {
    let (xs, ys, zs) = (q.x * T::two(), q.y * T::two(), q.z * T::two());

    let (xx, xy, xz) = (q.x * xs, q.x * ys, q.x * zs);
    let (yy, yz, zz) = (q.y * ys, q.y * zs, q.z * zs);
    let (wx, wy, wz) = (q.w * xs, q.w * ys, q.w * zs);

    let o = T::zero();
    let l = T::one();

    #[rustfmt::skip]
    let m = Self::from_columns([
      [l - (yy + zz), xy + wz,       xz - wy,       o],
      [xy - wz,       l - (xx + zz), yz + wx,       o],
      [xz + wy,       yz - wx,       l - (xx + yy), o],
      [o,             o,             o,             l],
    ]);
    m
  }
}

#[cfg(test)]
fn assert_close(m: Mat4<f64>, reference: cgmath::Matrix4<f64>) {
  for r in 0..4 {
    for c in 0..4 {
      assert!(
        (m.get(r, c) - reference[c][r]).abs() < 1e-9,
        "entry ({}, {}): {} vs {}",
        r,
        c,
        m.get(r, c),
        reference[c][r]
      );
    }
  }
}

#[test]
fn perspective() {
  let m = Mat4::perspective(90.0, 0.5, 50.0, 100.0);
  let f = (std::f64::consts::FRAC_PI_2 - 45.0).tan();
  assert_eq!(
    m,
    Mat4::from_column_slice(&[
      f / 0.5,
      0.0,
      0.0,
      0.0,
      0.0,
      f,
      0.0,
      0.0,
      0.0,
      0.0,
      -3.0,
      -1.0,
      0.0,
      0.0,
      -200.0,
      0.0,
    ])
  );
}

#[test]
fn perspective_matches_cgmath() {
  let fov = Deg::by(60.0f64).to_rad();
  let m = Mat4::perspective(fov, 16.0 / 9.0, 0.1, 100.0);
  let reference = cgmath::perspective(cgmath::Rad(fov), 16.0 / 9.0, 0.1, 100.0);
  assert_close(m, reference);
}

#[test]
fn translation() {
  let m = Mat4::translation(vec3(10.0, 20.0, 30.0));
  assert_eq!(
    m,
    Mat4::from_column_slice(&[
      1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 10.0, 20.0, 30.0, 1.0,
    ])
  );
}

#[test]
fn translation_moves_points() {
  let m = Mat4::translation(vec3(10.0, 20.0, 30.0));
  let moved = m * vec4(1.0, 2.0, 3.0, 1.0);
  assert_eq!(moved, vec4(11.0, 22.0, 33.0, 1.0));
}

#[test]
fn rotation_from_quat() {
  let identity = Mat4::from(Quat::new(0.0, 0.0, 0.0, 1.0));
  assert_eq!(identity, Mat4::<f64>::identity());

  let half_turn_x = Mat4::from(Quat::new(1.0, 0.0, 0.0, 0.0));
  assert_eq!(
    half_turn_x,
    Mat4::from_column_slice(&[
      1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ])
  );

  let third_turn = Mat4::from(Quat::new(0.5, 0.5, 0.5, 0.5));
  assert_eq!(
    third_turn,
    Mat4::from_column_slice(&[
      0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ])
  );
}

#[test]
fn rotation_matches_cgmath() {
  let axis = vec3(1.0, 2.0, 3.0).normalize();
  let angle = 0.7f64;

  let m = Mat4::from(Quat::from_axis_angle(axis, angle));

  let (s, c) = ((angle / 2.0).sin(), (angle / 2.0).cos());
  let reference = cgmath::Matrix4::from(cgmath::Quaternion::new(
    c,
    axis.x() * s,
    axis.y() * s,
    axis.z() * s,
  ));
  assert_close(m, reference);
}
