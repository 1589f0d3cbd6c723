//! Shared numerical primitives for complex impedance arithmetic.

use std::f64::consts::FRAC_PI_2;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for impedances and phasors.
pub type CScalar = num_complex::Complex<Scalar>;

/// Principal value of `(jω)^α` for ω > 0: magnitude `ω^α`, phase `α·π/2`.
#[must_use]
pub fn principal_power_jw(omega: Scalar, alpha: Scalar) -> CScalar {
    num_complex::Complex::from_polar(omega.powf(alpha), alpha * FRAC_PI_2)
}

/// Principal square root of `jω` for ω > 0: magnitude `√ω`, phase `π/4`.
#[must_use]
pub fn principal_sqrt_jw(omega: Scalar) -> CScalar {
    num_complex::Complex::from_polar(omega.sqrt(), FRAC_PI_2 / 2.0)
}

/// Rounds `value` to `decimals` decimal places.
#[must_use]
pub fn round_to_decimals(value: Scalar, decimals: u32) -> Scalar {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn unit_ideality_power_reduces_to_jw() {
        let omega = 2.0e3;
        let z = principal_power_jw(omega, 1.0);
        assert_relative_eq!(z.re, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(z.im, omega, max_relative = 1.0e-12);
    }

    #[test]
    fn sqrt_jw_squares_back_to_jw() {
        let omega = 314.0;
        let root = principal_sqrt_jw(omega);
        let squared = root * root;
        assert_relative_eq!(squared.re, 0.0, epsilon = 1.0e-10);
        assert_relative_eq!(squared.im, omega, max_relative = 1.0e-12);
    }

    #[test]
    fn rounding_keeps_three_decimals() {
        assert_relative_eq!(round_to_decimals(0.845_67, 3), 0.846);
        assert_relative_eq!(round_to_decimals(1.0 / 3.0, 3), 0.333);
    }
}
