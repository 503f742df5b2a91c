use super::Vec3;

/// Row-major 3x3 matrix used for globe orientation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    pub rows: [[f64; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub fn rotation_x(angle_rad: f64) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self {
            rows: [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]],
        }
    }

    pub fn rotation_y(angle_rad: f64) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self {
            rows: [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
        }
    }

    /// Intrinsic X-then-Y Euler rotation: `Rx(x) * Ry(y)`.
    pub fn euler_xy(x_rad: f64, y_rad: f64) -> Self {
        Self::rotation_x(x_rad).mul(&Self::rotation_y(y_rad))
    }

    pub fn mul(&self, other: &Mat3) -> Mat3 {
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.rows[i][k] * other.rows[k][j]).sum();
            }
        }
        Mat3 { rows }
    }

    pub fn transform(&self, v: Vec3) -> Vec3 {
        let r = &self.rows;
        Vec3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }

    /// Rotations are orthonormal, so the transpose is the inverse.
    pub fn transpose(&self) -> Mat3 {
        let r = &self.rows;
        Mat3 {
            rows: [
                [r[0][0], r[1][0], r[2][0]],
                [r[0][1], r[1][1], r[2][1]],
                [r[0][2], r[1][2], r[2][2]],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Mat3;
    use crate::math::Vec3;
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        let d = (a - b).length();
        assert!(d < 1e-9, "expected {a:?} ~= {b:?} (diff {d})");
    }

    #[test]
    fn quarter_turn_about_y_moves_x_to_minus_z() {
        let m = Mat3::rotation_y(FRAC_PI_2);
        assert_vec_close(m.transform(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 0.0, -1.0));
        assert_vec_close(m.transform(Vec3::new(-1.0, 0.0, 0.0)), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn quarter_turn_about_x_moves_z_to_minus_y() {
        let m = Mat3::rotation_x(FRAC_PI_2);
        assert_vec_close(m.transform(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn transpose_inverts_rotation() {
        let m = Mat3::euler_xy(0.4, -1.3);
        let v = Vec3::new(0.3, -2.0, 5.0);
        assert_vec_close(m.transpose().transform(m.transform(v)), v);
        assert_eq!(Mat3::IDENTITY.mul(&m), m);
    }
}
