//! Default simulation ranges and shared numeric helpers.
//!
//! The default ranges mirror the interactive generator this crate replaces:
//! ten spectra of one hundred points between 10 mHz and 1 MHz, with element
//! values spanning the bands typical for aqueous corrosion cells.

use std::f64::consts::PI;

/// Decimal places kept when drawing CPE ideality factors.
pub const IDEALITY_DECIMALS: u32 = 3;

/// Default number of spectra per simulated batch.
pub const DEFAULT_SPECTRUM_COUNT: usize = 10;
/// Default number of frequency points per spectrum.
pub const DEFAULT_POINT_COUNT: usize = 100;
/// Default sweep lower bound in hertz.
pub const DEFAULT_FREQUENCY_MIN_HZ: f64 = 1.0e-2;
/// Default sweep upper bound in hertz.
pub const DEFAULT_FREQUENCY_MAX_HZ: f64 = 1.0e6;
/// Default resistance bounds in ohms.
pub const DEFAULT_RESISTANCE_RANGE: (f64, f64) = (1.0e-1, 1.0e4);
/// Default CPE ideality-factor bounds (dimensionless).
pub const DEFAULT_IDEALITY_RANGE: (f64, f64) = (0.8, 1.0);
/// Default CPE coefficient bounds in S·s^α.
pub const DEFAULT_CPE_COEFFICIENT_RANGE: (f64, f64) = (1.0e-5, 1.0e-3);
/// Default Warburg coefficient bounds in Ω·s^(-1/2).
pub const DEFAULT_WARBURG_COEFFICIENT_RANGE: (f64, f64) = (1.0, 1.0e3);

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}
