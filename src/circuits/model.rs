use crate::errors::EisError;
use crate::math::Scalar;
use crate::sampling::{ElementRanges, ParameterSampler};

/// The five supported equivalent-circuit topologies.
///
/// Wire ids 1 through 5 are part of the persisted-dataset contract; see
/// [`Self::from_id`] and [`Self::id`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircuitModel {
    /// `R1 + (R2 ∥ Q1)`: one polarization loop.
    SingleLoop,
    /// `R1 + (R2 ∥ Q1) + (R3 ∥ Q2)`: two polarization loops in series.
    DoubleLoop,
    /// `R1 + (Q1 ∥ (R2 + W))`: Randles cell with semi-infinite diffusion.
    Randles,
    /// `R1 + (R2 ∥ Q1) + (Q2 ∥ (R3 + W))`: double loop with a diffusion tail.
    DoubleLoopWarburg,
    /// `R1 + ((R2 + ((R3 + W) ∥ Q2)) ∥ Q1)`: nested loop around diffusion.
    NestedWarburg,
}

impl CircuitModel {
    /// All supported models in wire-id order.
    pub const ALL: [Self; 5] = [
        Self::SingleLoop,
        Self::DoubleLoop,
        Self::Randles,
        Self::DoubleLoopWarburg,
        Self::NestedWarburg,
    ];

    /// Resolves a wire id in `1..=5`.
    pub fn from_id(id: u8) -> Result<Self, EisError> {
        match id {
            1 => Ok(Self::SingleLoop),
            2 => Ok(Self::DoubleLoop),
            3 => Ok(Self::Randles),
            4 => Ok(Self::DoubleLoopWarburg),
            5 => Ok(Self::NestedWarburg),
            other => Err(EisError::UnsupportedCircuit(other)),
        }
    }

    /// Wire id used by request payloads and persisted datasets.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::SingleLoop => 1,
            Self::DoubleLoop => 2,
            Self::Randles => 3,
            Self::DoubleLoopWarburg => 4,
            Self::NestedWarburg => 5,
        }
    }

    /// Number of ground-truth parameter columns.
    #[must_use]
    pub const fn parameter_count(self) -> usize {
        match self {
            Self::SingleLoop => 4,
            Self::DoubleLoop => 7,
            Self::Randles => 5,
            Self::DoubleLoopWarburg | Self::NestedWarburg => 8,
        }
    }

    /// Ground-truth column names, in persisted order. Downstream trainers
    /// index these columns positionally.
    #[must_use]
    pub const fn parameter_names(self) -> &'static [&'static str] {
        match self {
            Self::SingleLoop => &["R1", "R2", "α₁", "Q1"],
            Self::DoubleLoop => &["R1", "R2", "R3", "α₁", "Q1", "α₂", "Q2"],
            Self::Randles => &["R1", "R2", "α₁", "Q1", "σ"],
            Self::DoubleLoopWarburg | Self::NestedWarburg => {
                &["R1", "R2", "R3", "α₁", "Q1", "α₂", "Q2", "σ"]
            }
        }
    }

    /// True when the topology includes a Warburg diffusion element.
    #[must_use]
    pub const fn uses_diffusion(self) -> bool {
        matches!(
            self,
            Self::Randles | Self::DoubleLoopWarburg | Self::NestedWarburg
        )
    }

    /// True when the topology carries a second CPE.
    #[must_use]
    pub const fn uses_second_cpe(self) -> bool {
        matches!(
            self,
            Self::DoubleLoop | Self::DoubleLoopWarburg | Self::NestedWarburg
        )
    }

    /// Human-readable series/parallel composition.
    #[must_use]
    pub const fn formula(self) -> &'static str {
        match self {
            Self::SingleLoop => "R1 + (R2 ∥ Q1)",
            Self::DoubleLoop => "R1 + (R2 ∥ Q1) + (R3 ∥ Q2)",
            Self::Randles => "R1 + (Q1 ∥ (R2 + W))",
            Self::DoubleLoopWarburg => "R1 + (R2 ∥ Q1) + (Q2 ∥ (R3 + W))",
            Self::NestedWarburg => "R1 + ((R2 + ((R3 + W) ∥ Q2)) ∥ Q1)",
        }
    }
}

/// Selects which ideality factor drives the second CPE in two-CPE topologies.
///
/// Historical batches evaluated the second CPE with α₁ while still recording
/// an independently drawn α₂ in the ground truth, so for `LegacyShared` the
/// stored α₂ column does not describe the forward model that produced the
/// spectra. The default stays `LegacyShared` to keep new batches comparable
/// with previously exported data and the models trained on it; `Independent`
/// evaluates Q2 with its own α₂ and invalidates that comparability.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdealityCoupling {
    /// Second CPE reuses α₁, matching historical exports.
    #[default]
    LegacyShared,
    /// Second CPE uses its own α₂.
    Independent,
}

/// Per-spectrum element values drawn for one simulated batch.
///
/// Each topology uses a different subset of fields; [`Self::sample`] fills
/// exactly the subset its model needs, and hand-built sets (for example from
/// stored ground truth) may populate fields directly. All populated vectors
/// must share one length, one entry per spectrum.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementParameterSet {
    /// Series (solution) resistance R1 in ohms.
    pub resistance1: Option<Vec<Scalar>>,
    /// First loop resistance R2 in ohms.
    pub resistance2: Option<Vec<Scalar>>,
    /// Second loop resistance R3 in ohms.
    pub resistance3: Option<Vec<Scalar>>,
    /// First CPE ideality factor α₁.
    pub ideality1: Option<Vec<Scalar>>,
    /// First CPE coefficient Q1 in S·s^α.
    pub cpe1: Option<Vec<Scalar>>,
    /// Second CPE ideality factor α₂.
    pub ideality2: Option<Vec<Scalar>>,
    /// Second CPE coefficient Q2 in S·s^α.
    pub cpe2: Option<Vec<Scalar>>,
    /// Warburg coefficient σ in Ω·s^(-1/2).
    pub warburg: Option<Vec<Scalar>>,
}

impl ElementParameterSet {
    /// Draws a parameter set for `model` with `spectra` values per element.
    ///
    /// Element vectors are drawn whole, one element after another, in a fixed
    /// per-model order that is not always the ground-truth column order; a
    /// seeded sampler therefore reproduces batches exactly.
    pub fn sample(
        model: CircuitModel,
        ranges: &ElementRanges,
        spectra: usize,
        sampler: &mut ParameterSampler,
    ) -> Result<Self, EisError> {
        ranges.validate()?;
        let mut set = Self::default();
        match model {
            CircuitModel::SingleLoop => {
                // Draw order: R1, R2, α₁, Q1.
                set.resistance1 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.resistance2 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.ideality1 = Some(sampler.linear_uniform(ranges.ideality, spectra)?);
                set.cpe1 = Some(sampler.log_uniform(ranges.cpe_coefficient, spectra)?);
            }
            CircuitModel::DoubleLoop => {
                // Draw order: R1, R2, α₁, Q1, R3, α₂, Q2.
                set.resistance1 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.resistance2 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.ideality1 = Some(sampler.linear_uniform(ranges.ideality, spectra)?);
                set.cpe1 = Some(sampler.log_uniform(ranges.cpe_coefficient, spectra)?);
                set.resistance3 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.ideality2 = Some(sampler.linear_uniform(ranges.ideality, spectra)?);
                set.cpe2 = Some(sampler.log_uniform(ranges.cpe_coefficient, spectra)?);
            }
            CircuitModel::Randles => {
                // Draw order: R1, α₁, Q1, R2, σ.
                set.resistance1 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.ideality1 = Some(sampler.linear_uniform(ranges.ideality, spectra)?);
                set.cpe1 = Some(sampler.log_uniform(ranges.cpe_coefficient, spectra)?);
                set.resistance2 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.warburg = Some(sampler.log_uniform(ranges.warburg_coefficient, spectra)?);
            }
            CircuitModel::DoubleLoopWarburg => {
                // Draw order: R1, R2, α₁, Q1, α₂, Q2, R3, σ.
                set.resistance1 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.resistance2 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.ideality1 = Some(sampler.linear_uniform(ranges.ideality, spectra)?);
                set.cpe1 = Some(sampler.log_uniform(ranges.cpe_coefficient, spectra)?);
                set.ideality2 = Some(sampler.linear_uniform(ranges.ideality, spectra)?);
                set.cpe2 = Some(sampler.log_uniform(ranges.cpe_coefficient, spectra)?);
                set.resistance3 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.warburg = Some(sampler.log_uniform(ranges.warburg_coefficient, spectra)?);
            }
            CircuitModel::NestedWarburg => {
                // Draw order: R1, R2, α₁, Q1, R3, α₂, Q2, σ.
                set.resistance1 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.resistance2 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.ideality1 = Some(sampler.linear_uniform(ranges.ideality, spectra)?);
                set.cpe1 = Some(sampler.log_uniform(ranges.cpe_coefficient, spectra)?);
                set.resistance3 = Some(sampler.log_uniform(ranges.resistance, spectra)?);
                set.ideality2 = Some(sampler.linear_uniform(ranges.ideality, spectra)?);
                set.cpe2 = Some(sampler.log_uniform(ranges.cpe_coefficient, spectra)?);
                set.warburg = Some(sampler.log_uniform(ranges.warburg_coefficient, spectra)?);
            }
        }
        Ok(set)
    }

    /// Checks that every field `model` needs holds one value per spectrum and
    /// returns the spectrum count.
    pub fn validate_for(&self, model: CircuitModel) -> Result<usize, EisError> {
        let mut spectra = None;
        for (values, name) in self.fields_for(model) {
            let values = values.as_deref().ok_or_else(|| {
                EisError::Shape(format!("parameter set is missing {name} values for {model:?}"))
            })?;
            match spectra {
                None => spectra = Some(values.len()),
                Some(n) if n != values.len() => {
                    return Err(EisError::Shape(format!(
                        "{name} holds {} values but the set has {n} spectra",
                        values.len()
                    )));
                }
                Some(_) => {}
            }
        }
        match spectra {
            Some(n) if n > 0 => Ok(n),
            _ => Err(EisError::Shape("parameter set holds no spectra".into())),
        }
    }

    fn fields_for(&self, model: CircuitModel) -> Vec<(&Option<Vec<Scalar>>, &'static str)> {
        let mut fields = vec![
            (&self.resistance1, "R1"),
            (&self.resistance2, "R2"),
            (&self.ideality1, "α₁"),
            (&self.cpe1, "Q1"),
        ];
        if model.uses_second_cpe() {
            fields.push((&self.resistance3, "R3"));
            fields.push((&self.ideality2, "α₂"));
            fields.push((&self.cpe2, "Q2"));
        }
        if model.uses_diffusion() {
            fields.push((&self.warburg, "σ"));
        }
        fields
    }
}
