//! Angle-axis rotation algebra.
//!
//! An angle-axis vector `p` encodes a rotation by `|p|` radians about `p / |p|`.
//! The matrix is built with the Rodrigues form `R = I + a(θ) K + b(θ) K²`, where
//! `K = [p]×`, `a = sin θ / θ` and `b = (1 - cos θ) / θ²`. The same form is
//! differentiated analytically to obtain `∂R/∂p_m`, which is what the gradient
//! transforms need.

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

/// Below this angle the Rodrigues coefficients are evaluated from their Taylor series.
const SMALL_ANGLE: f64 = 1e-2;

/// Rodrigues coefficients `a`, `b` and the scaled derivatives `a'/θ`, `b'/θ`.
struct RodriguesCoefficients {
    a: f64,
    b: f64,
    da_over_theta: f64,
    db_over_theta: f64,
}

impl RodriguesCoefficients {
    fn new(theta: f64) -> Self {
        let t2 = theta * theta;
        if theta < SMALL_ANGLE {
            let t4 = t2 * t2;
            return Self {
                a: 1.0 - t2 / 6.0 + t4 / 120.0,
                b: 0.5 - t2 / 24.0 + t4 / 720.0,
                da_over_theta: -1.0 / 3.0 + t2 / 30.0 - t4 / 840.0,
                db_over_theta: -1.0 / 12.0 + t2 / 180.0 - t4 / 6720.0,
            };
        }
        let (s, c) = theta.sin_cos();
        Self {
            a: s / theta,
            b: (1.0 - c) / t2,
            da_over_theta: (theta * c - s) / (t2 * theta),
            db_over_theta: (theta * s - 2.0 * (1.0 - c)) / (t2 * t2),
        }
    }
}

/// Rotation matrix of an angle-axis vector.
pub fn angle_axis_to_matrix(p: &Vector3<f64>) -> Matrix3<f64> {
    let coeffs = RodriguesCoefficients::new(p.norm());
    let k = p.cross_matrix();
    Matrix3::identity() + k * coeffs.a + k * k * coeffs.b
}

/// Rotation matrix of `p` together with its partial derivatives `∂R/∂p_0`, `∂R/∂p_1`
/// and `∂R/∂p_2`.
pub fn matrix_and_derivatives(p: &Vector3<f64>) -> (Matrix3<f64>, [Matrix3<f64>; 3]) {
    let coeffs = RodriguesCoefficients::new(p.norm());
    let k = p.cross_matrix();
    let k2 = k * k;
    let rmat = Matrix3::identity() + k * coeffs.a + k2 * coeffs.b;

    let derivative = |m: usize| {
        let e = Vector3::ith(m, 1.0).cross_matrix();
        // d(θ)/d(p_m) = p_m / θ, folded into the scaled coefficient derivatives.
        k * (coeffs.da_over_theta * p[m])
            + e * coeffs.a
            + k2 * (coeffs.db_over_theta * p[m])
            + (e * k + k * e) * coeffs.b
    };

    (rmat, [derivative(0), derivative(1), derivative(2)])
}

/// Angle-axis vector of a rotation matrix, with the angle in `[0, π]`.
///
/// Goes through a unit quaternion so that rotations by π keep a well defined axis.
pub fn matrix_to_angle_axis(rmat: &Matrix3<f64>) -> Vector3<f64> {
    let rotation = Rotation3::from_matrix_unchecked(*rmat);
    UnitQuaternion::from_rotation_matrix(&rotation).scaled_axis()
}

/// Composes two rotations: the result rotates by `p` first and then by `dp`, so that
/// `R(result) = R(dp) · R(p)`.
pub fn compose(p: &Vector3<f64>, dp: &Vector3<f64>) -> Vector3<f64> {
    let q1 = UnitQuaternion::from_scaled_axis(*p);
    let q2 = UnitQuaternion::from_scaled_axis(*dp);
    (q2 * q1).scaled_axis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn matrices_approx_equal(a: &Matrix3<f64>, b: &Matrix3<f64>, tol: f64) -> bool {
        (a - b).abs().max() < tol
    }

    #[test]
    fn zero_vector_gives_identity_matrix() {
        let rmat = angle_axis_to_matrix(&Vector3::zeros());
        assert!(matrices_approx_equal(&rmat, &Matrix3::identity(), TOLERANCE));
    }

    #[test]
    fn matrix_matches_nalgebra_rotation() {
        for p in [
            Vector3::new(0.3, -1.2, 0.7),
            Vector3::new(1e-4, 2e-4, -3e-4),
            Vector3::new(0.0, 0.0, PI),
            Vector3::new(4.0, 1.0, -2.0),
        ] {
            let expected = Rotation3::new(p).into_inner();
            assert!(matrices_approx_equal(
                &angle_axis_to_matrix(&p),
                &expected,
                TOLERANCE
            ));
        }
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let rmat = angle_axis_to_matrix(&Vector3::new(0.0, 0.0, PI / 2.0));
        let rotated = rmat * Vector3::x();
        assert!((rotated - Vector3::y()).norm() < TOLERANCE);
    }

    #[test]
    fn derivatives_match_central_differences() {
        let h = 1e-6;
        for p in [
            Vector3::new(0.3, -1.2, 0.7),
            Vector3::new(0.004, -0.002, 0.001),
            Vector3::new(2.5, 0.1, 1.9),
        ] {
            let (_, drm) = matrix_and_derivatives(&p);
            for m in 0..3 {
                let step = Vector3::ith(m, h);
                let numeric =
                    (angle_axis_to_matrix(&(p + step)) - angle_axis_to_matrix(&(p - step)))
                        / (2.0 * h);
                assert!(
                    matrices_approx_equal(&drm[m], &numeric, 1e-7),
                    "derivative {} mismatch at {:?}",
                    m,
                    p
                );
            }
        }
    }

    #[test]
    fn derivatives_at_zero_are_rotation_generators() {
        let (rmat, drm) = matrix_and_derivatives(&Vector3::zeros());
        assert!(matrices_approx_equal(&rmat, &Matrix3::identity(), TOLERANCE));
        for m in 0..3 {
            let generator = Vector3::ith(m, 1.0).cross_matrix();
            assert!(matrices_approx_equal(&drm[m], &generator, TOLERANCE));
        }
    }

    #[test]
    fn matrix_to_angle_axis_inverts_small_and_moderate_angles() {
        for p in [
            Vector3::new(0.3, -1.2, 0.7),
            Vector3::new(1e-5, 0.0, 2e-5),
            Vector3::zeros(),
        ] {
            let back = matrix_to_angle_axis(&angle_axis_to_matrix(&p));
            assert!((back - p).norm() < 1e-8);
        }
    }

    #[test]
    fn matrix_to_angle_axis_handles_half_turn() {
        let p = Vector3::new(PI, 0.0, 0.0);
        let back = matrix_to_angle_axis(&angle_axis_to_matrix(&p));
        assert!((back.norm() - PI).abs() < 1e-8);
        assert!(matrices_approx_equal(
            &angle_axis_to_matrix(&back),
            &angle_axis_to_matrix(&p),
            1e-8
        ));
    }

    #[test]
    fn matrix_to_angle_axis_folds_large_angles_into_principal_range() {
        let p = Vector3::new(0.0, 5.0, 0.0);
        let back = matrix_to_angle_axis(&angle_axis_to_matrix(&p));
        assert!(back.norm() <= PI + TOLERANCE);
        assert!((back - Vector3::new(0.0, 5.0 - 2.0 * PI, 0.0)).norm() < 1e-8);
    }

    #[test]
    fn compose_applies_second_rotation_after_first() {
        let p = Vector3::new(0.4, 0.1, -0.8);
        let dp = Vector3::new(-1.1, 0.6, 0.2);
        let composed = compose(&p, &dp);
        let expected = angle_axis_to_matrix(&dp) * angle_axis_to_matrix(&p);
        assert!(matrices_approx_equal(
            &angle_axis_to_matrix(&composed),
            &expected,
            1e-9
        ));
    }

    #[test]
    fn compose_is_not_commutative() {
        let p = Vector3::new(PI / 2.0, 0.0, 0.0);
        let dp = Vector3::new(0.0, PI / 2.0, 0.0);
        let forward = angle_axis_to_matrix(&compose(&p, &dp));
        let reverse = angle_axis_to_matrix(&compose(&dp, &p));
        assert!(!matrices_approx_equal(&forward, &reverse, 1e-3));
    }
}
