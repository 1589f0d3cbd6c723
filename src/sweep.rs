//! Log-spaced frequency sweep construction.

use crate::constants::angular_frequency;
use crate::errors::EisError;
use crate::math::Scalar;

/// Generates `n` logarithmically spaced samples between `start_hz` and
/// `stop_hz`, both endpoints inclusive. Requires start > 0 and stop > 0.
#[must_use]
pub fn logspace_hz(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Vec<Scalar> {
    assert!(start_hz > 0.0 && stop_hz > 0.0);
    match n {
        0 => Vec::new(),
        1 => vec![start_hz],
        _ => {
            let log_start = start_hz.log10();
            let log_stop = stop_hz.log10();
            let step = (log_stop - log_start) / (n as Scalar - 1.0);
            (0..n)
                .map(|i| 10f64.powf(log_start + step * i as Scalar))
                .collect()
        }
    }
}

/// Immutable log-spaced sweep with parallel linear and angular frequencies.
///
/// The grid is the shared independent variable for every spectrum of a batch;
/// it is built once per simulation request and never mutated.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    hertz: Vec<Scalar>,
    omega: Vec<Scalar>,
}

impl FrequencyGrid {
    /// Builds `n_points` log₁₀-spaced frequencies covering `[f_min_hz, f_max_hz]`
    /// inclusive, with ω = 2π·f computed alongside.
    pub fn logspace(f_min_hz: Scalar, f_max_hz: Scalar, n_points: usize) -> Result<Self, EisError> {
        if !(f_min_hz > 0.0 && f_max_hz > f_min_hz) {
            return Err(EisError::InvalidRange(format!(
                "frequency bounds [{f_min_hz}, {f_max_hz}] must satisfy 0 < min < max"
            )));
        }
        if n_points < 2 {
            return Err(EisError::InvalidRange(format!(
                "a sweep needs at least 2 points, got {n_points}"
            )));
        }
        let hertz = logspace_hz(f_min_hz, f_max_hz, n_points);
        let omega = hertz.iter().copied().map(angular_frequency).collect();
        Ok(Self { hertz, omega })
    }

    /// Frequencies in hertz, strictly increasing.
    #[must_use]
    pub fn hertz(&self) -> &[Scalar] {
        &self.hertz
    }

    /// Angular frequencies ω = 2π·f in rad/s.
    #[must_use]
    pub fn omega(&self) -> &[Scalar] {
        &self.omega
    }

    /// Number of points in the sweep.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hertz.len()
    }

    /// True when the grid holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hertz.is_empty()
    }
}
