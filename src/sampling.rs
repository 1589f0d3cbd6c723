//! Randomized element-value sampling with an explicitly owned generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    DEFAULT_CPE_COEFFICIENT_RANGE, DEFAULT_IDEALITY_RANGE, DEFAULT_RESISTANCE_RANGE,
    DEFAULT_WARBURG_COEFFICIENT_RANGE, IDEALITY_DECIMALS,
};
use crate::errors::EisError;
use crate::math::{round_to_decimals, Scalar};

/// Inclusive `[min, max]` bounds for one sampled quantity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Inclusive lower bound.
    pub min: Scalar,
    /// Inclusive upper bound.
    pub max: Scalar,
}

impl ParamRange {
    /// Creates a range with inclusive bounds.
    #[must_use]
    pub const fn new(min: Scalar, max: Scalar) -> Self {
        Self { min, max }
    }

    /// Fails unless `0 < min < max`, the domain log-uniform draws require.
    pub fn ensure_log_domain(&self, name: &str) -> Result<(), EisError> {
        if self.min > 0.0 && self.max > self.min {
            Ok(())
        } else {
            Err(EisError::InvalidRange(format!(
                "{name} bounds [{}, {}] must satisfy 0 < min < max",
                self.min, self.max
            )))
        }
    }

    /// Fails unless `min < max`.
    pub fn ensure_linear_domain(&self, name: &str) -> Result<(), EisError> {
        if self.max > self.min {
            Ok(())
        } else {
            Err(EisError::InvalidRange(format!(
                "{name} bounds [{}, {}] must satisfy min < max",
                self.min, self.max
            )))
        }
    }

    /// Fails unless `0 < min < max ≤ 1`, the physical band for ideality
    /// factors.
    pub fn ensure_unit_interval(&self, name: &str) -> Result<(), EisError> {
        if self.min > 0.0 && self.max > self.min && self.max <= 1.0 {
            Ok(())
        } else {
            Err(EisError::InvalidRange(format!(
                "{name} bounds [{}, {}] must satisfy 0 < min < max <= 1",
                self.min, self.max
            )))
        }
    }
}

/// Element value ranges used when drawing a batch.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRanges {
    /// Resistance bounds in ohms, sampled log-uniform.
    pub resistance: ParamRange,
    /// CPE ideality-factor bounds, sampled linear-uniform.
    pub ideality: ParamRange,
    /// CPE coefficient bounds in S·s^α, sampled log-uniform.
    pub cpe_coefficient: ParamRange,
    /// Warburg coefficient bounds in Ω·s^(-1/2), sampled log-uniform.
    pub warburg_coefficient: ParamRange,
}

impl Default for ElementRanges {
    fn default() -> Self {
        Self {
            resistance: ParamRange::new(DEFAULT_RESISTANCE_RANGE.0, DEFAULT_RESISTANCE_RANGE.1),
            ideality: ParamRange::new(DEFAULT_IDEALITY_RANGE.0, DEFAULT_IDEALITY_RANGE.1),
            cpe_coefficient: ParamRange::new(
                DEFAULT_CPE_COEFFICIENT_RANGE.0,
                DEFAULT_CPE_COEFFICIENT_RANGE.1,
            ),
            warburg_coefficient: ParamRange::new(
                DEFAULT_WARBURG_COEFFICIENT_RANGE.0,
                DEFAULT_WARBURG_COEFFICIENT_RANGE.1,
            ),
        }
    }
}

impl ElementRanges {
    /// Validates every range, including those the requested topology never
    /// draws from, so malformed requests fail identically for all models.
    pub fn validate(&self) -> Result<(), EisError> {
        self.resistance.ensure_log_domain("resistance")?;
        self.ideality.ensure_unit_interval("ideality")?;
        self.cpe_coefficient.ensure_log_domain("cpe_coefficient")?;
        self.warburg_coefficient.ensure_log_domain("warburg_coefficient")?;
        Ok(())
    }
}

/// Draws randomized element values from user ranges.
///
/// The generator is owned rather than global so one sampler yields one
/// deterministic stream; tests inject a fixed seed through [`Self::seeded`]
/// without touching anything else.
#[derive(Debug, Clone)]
pub struct ParameterSampler {
    rng: StdRng,
}

impl ParameterSampler {
    /// Creates a sampler seeded from operating-system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a sampler with a fixed seed for reproducible batches.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws `n` values of the form `exp(U(ln min, ln max))`, uniform in log
    /// space. Used for resistances, CPE coefficients, and Warburg
    /// coefficients, which plausibly span several orders of magnitude.
    pub fn log_uniform(&mut self, range: ParamRange, n: usize) -> Result<Vec<Scalar>, EisError> {
        range.ensure_log_domain("log-uniform")?;
        let ln_min = range.min.ln();
        let ln_max = range.max.ln();
        Ok((0..n)
            .map(|_| self.rng.gen_range(ln_min..=ln_max).exp())
            .collect())
    }

    /// Draws `n` values uniform in linear space, each rounded to three
    /// decimal places. Used only for CPE ideality factors, whose narrow
    /// physical band makes log scaling pointless.
    pub fn linear_uniform(&mut self, range: ParamRange, n: usize) -> Result<Vec<Scalar>, EisError> {
        range.ensure_linear_domain("linear-uniform")?;
        Ok((0..n)
            .map(|_| round_to_decimals(self.rng.gen_range(range.min..=range.max), IDEALITY_DECIMALS))
            .collect())
    }
}

impl Default for ParameterSampler {
    fn default() -> Self {
        Self::new()
    }
}
