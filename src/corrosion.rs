//! Feature assembly for corrosion-rate regressors.
//!
//! The regressors themselves live outside the crate; this module prepares the
//! fixed-order feature rows their training pipeline consumed, so a caller can
//! hand a measured spectrum plus service conditions to whichever model it
//! loaded and band the predicted rate.

use ndarray::{Array3, Axis};

use crate::dataset::prepare_features;
use crate::errors::EisError;
use crate::math::Scalar;

/// Alloys the corrosion regressors were trained on, in one-hot order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    /// Low-alloy steel.
    AlloySteel,
    /// Carbon steel.
    CarbonSteel,
    /// Nickel-chromium superalloy.
    Inconel,
    /// 304 stainless steel.
    Ss304,
    /// 316 stainless steel.
    Ss316,
}

impl Material {
    /// Every material, in one-hot order.
    pub const ALL: [Self; 5] = [
        Self::AlloySteel,
        Self::CarbonSteel,
        Self::Inconel,
        Self::Ss304,
        Self::Ss316,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AlloySteel => "Alloy Steel",
            Self::CarbonSteel => "Carbon Steel",
            Self::Inconel => "Inconel",
            Self::Ss304 => "SS304",
            Self::Ss316 => "SS316",
        }
    }

    /// One-hot encoding in training order.
    #[must_use]
    pub fn one_hot(self) -> [Scalar; 5] {
        let mut row = [0.0; 5];
        row[self as usize] = 1.0;
        row
    }
}

/// Service conditions, in the training feature order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentalConditions {
    /// Operating temperature in degrees Celsius.
    pub temperature_c: Scalar,
    /// Line pressure in bar.
    pub pressure_bar: Scalar,
    /// Electrolyte pH.
    pub ph: Scalar,
    /// Dissolved sulfur content in parts per million.
    pub sulfur_ppm: Scalar,
    /// Flow velocity in metres per second.
    pub flow_velocity_ms: Scalar,
    /// Years in service.
    pub service_years: Scalar,
}

impl EnvironmentalConditions {
    /// Condition values in training order.
    #[must_use]
    pub const fn features(&self) -> [Scalar; 6] {
        [
            self.temperature_c,
            self.pressure_bar,
            self.ph,
            self.sulfur_ppm,
            self.flow_velocity_ms,
            self.service_years,
        ]
    }
}

/// Feature rows at the three widths historical regressors expect.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCandidates {
    /// Spectrum features followed by one-hot material and conditions.
    pub full: Vec<Scalar>,
    /// Spectrum features only.
    pub spectrum: Vec<Scalar>,
    /// One-hot material and conditions only.
    pub environment: Vec<Scalar>,
}

/// Flattens one spectrum's channel tensor into a regressor feature row.
///
/// The tensor is prepared exactly as for training (channel-last with the
/// negated copy appended), then the first spectrum is flattened point by
/// point, giving `points × 6` values.
pub fn spectrum_features(x: &Array3<Scalar>) -> Result<Vec<Scalar>, EisError> {
    let prepared = prepare_features(x)?;
    Ok(prepared.index_axis(Axis(0), 0).iter().copied().collect())
}

/// Assembles the candidate feature rows for one prediction.
#[must_use]
pub fn build_feature_vector(
    spectrum_features: &[Scalar],
    material: Material,
    conditions: &EnvironmentalConditions,
) -> FeatureCandidates {
    let mut environment = Vec::with_capacity(11);
    environment.extend_from_slice(&material.one_hot());
    environment.extend_from_slice(&conditions.features());
    let mut full = Vec::with_capacity(spectrum_features.len() + environment.len());
    full.extend_from_slice(spectrum_features);
    full.extend_from_slice(&environment);
    FeatureCandidates {
        full,
        spectrum: spectrum_features.to_vec(),
        environment,
    }
}

/// Picks the candidate row matching a model's expected input width.
///
/// Preference order is full, spectrum-only, environment-only; `None` when no
/// candidate matches.
#[must_use]
pub fn select_features(candidates: &FeatureCandidates, expected_len: usize) -> Option<&[Scalar]> {
    [
        candidates.full.as_slice(),
        candidates.spectrum.as_slice(),
        candidates.environment.as_slice(),
    ]
    .into_iter()
    .find(|candidate| candidate.len() == expected_len)
}

/// Severity bands for a predicted corrosion rate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    /// Below 0.1 mm/year.
    Low,
    /// From 0.1 up to 0.5 mm/year.
    Moderate,
    /// 0.5 mm/year and above.
    Severe,
}

impl RiskLevel {
    /// Bands a corrosion rate given in millimetres per year.
    #[must_use]
    pub fn classify(rate_mm_per_year: Scalar) -> Self {
        if rate_mm_per_year < 0.1 {
            Self::Low
        } else if rate_mm_per_year < 0.5 {
            Self::Moderate
        } else {
            Self::Severe
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}
