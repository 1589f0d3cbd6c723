//! High-level orchestration for randomized batch simulation.
//!
//! Simulation is synchronous and CPU-bound with no shared state between
//! calls. The sampler is an exclusively borrowed argument, so one sampler
//! yields one deterministic draw stream; callers that fan batches out across
//! threads should give each call its own sampler.

use crate::circuits::analysis::{evaluate, parameter_matrix, ComplexSpectrum, ParameterMatrix};
use crate::circuits::model::{CircuitModel, ElementParameterSet, IdealityCoupling};
use crate::constants::{
    DEFAULT_FREQUENCY_MAX_HZ, DEFAULT_FREQUENCY_MIN_HZ, DEFAULT_POINT_COUNT,
    DEFAULT_SPECTRUM_COUNT,
};
use crate::errors::EisError;
use crate::sampling::{ElementRanges, ParamRange, ParameterSampler};
use crate::sweep::FrequencyGrid;

/// Inputs for one simulated batch.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    /// Topology to simulate.
    pub circuit: CircuitModel,
    /// Number of spectra in the batch (at least 1).
    pub spectrum_count: usize,
    /// Number of frequency points per spectrum (at least 2).
    pub point_count: usize,
    /// Sweep bounds in hertz.
    pub frequency: ParamRange,
    /// Element value bounds for the sampler.
    pub ranges: ElementRanges,
    /// Ideality handling for two-CPE topologies.
    pub ideality_coupling: IdealityCoupling,
}

impl SimulationRequest {
    /// Creates a request for `circuit` with default counts and ranges.
    #[must_use]
    pub fn for_circuit(circuit: CircuitModel) -> Self {
        Self {
            circuit,
            ..Self::default()
        }
    }

    /// Checks counts and every element range before any random draw, so
    /// malformed requests fail fast and identically for all five models.
    pub fn validate(&self) -> Result<(), EisError> {
        if self.spectrum_count < 1 {
            return Err(EisError::InvalidRange(
                "a batch needs at least 1 spectrum".into(),
            ));
        }
        if self.point_count < 2 {
            return Err(EisError::InvalidRange(format!(
                "a sweep needs at least 2 points, got {}",
                self.point_count
            )));
        }
        self.frequency.ensure_log_domain("frequency")?;
        self.ranges.validate()
    }
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            circuit: CircuitModel::SingleLoop,
            spectrum_count: DEFAULT_SPECTRUM_COUNT,
            point_count: DEFAULT_POINT_COUNT,
            frequency: ParamRange::new(DEFAULT_FREQUENCY_MIN_HZ, DEFAULT_FREQUENCY_MAX_HZ),
            ranges: ElementRanges::default(),
            ideality_coupling: IdealityCoupling::default(),
        }
    }
}

/// Results of one simulated batch.
///
/// Row i of `impedance` and row i of `parameters` describe the same
/// spectrum; the two matrices travel together and must never be reordered
/// independently.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    /// Topology the batch was generated from.
    pub circuit: CircuitModel,
    /// Frequency grid shared by every spectrum.
    pub grid: FrequencyGrid,
    /// Complex impedance batch, `(spectrum_count, point_count)`.
    pub impedance: ComplexSpectrum,
    /// Ground-truth element values, `(spectrum_count, parameter_count)`.
    pub parameters: ParameterMatrix,
}

/// Runs one randomized batch: validate, build the grid, draw element values,
/// evaluate the topology, and pair the batch with its ground truth.
pub fn simulate(
    request: &SimulationRequest,
    sampler: &mut ParameterSampler,
) -> Result<SimulationOutput, EisError> {
    request.validate()?;
    let grid = FrequencyGrid::logspace(
        request.frequency.min,
        request.frequency.max,
        request.point_count,
    )?;
    let set = ElementParameterSet::sample(
        request.circuit,
        &request.ranges,
        request.spectrum_count,
        sampler,
    )?;
    let impedance = evaluate(request.circuit, &set, &grid, request.ideality_coupling)?;
    let parameters = parameter_matrix(request.circuit, &set)?;
    Ok(SimulationOutput {
        circuit: request.circuit,
        grid,
        impedance,
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_contract_holds_for_diffusion_double_loop() {
        let request = SimulationRequest {
            spectrum_count: 10,
            point_count: 50,
            ..SimulationRequest::for_circuit(CircuitModel::DoubleLoopWarburg)
        };
        let mut sampler = ParameterSampler::seeded(11);
        let output = simulate(&request, &mut sampler).expect("valid request");
        assert_eq!(output.impedance.shape(), (10, 50));
        assert_eq!(output.parameters.shape(), (10, 8));
        assert_eq!(output.grid.len(), 50);
    }

    #[test]
    fn every_model_reports_its_column_count() {
        for model in CircuitModel::ALL {
            let request = SimulationRequest {
                spectrum_count: 3,
                point_count: 12,
                ..SimulationRequest::for_circuit(model)
            };
            let mut sampler = ParameterSampler::seeded(13);
            let output = simulate(&request, &mut sampler).expect("valid request");
            assert_eq!(output.impedance.shape(), (3, 12));
            assert_eq!(output.parameters.ncols(), model.parameter_count());
        }
    }

    #[test]
    fn drawn_values_stay_inside_requested_ranges() {
        let request = SimulationRequest {
            spectrum_count: 40,
            ..SimulationRequest::for_circuit(CircuitModel::NestedWarburg)
        };
        let mut sampler = ParameterSampler::seeded(17);
        let output = simulate(&request, &mut sampler).expect("valid request");
        let ranges = &request.ranges;
        for i in 0..output.parameters.nrows() {
            for (j, name) in request.circuit.parameter_names().iter().enumerate() {
                let value = output.parameters[(i, j)];
                let bounds = match *name {
                    "R1" | "R2" | "R3" => ranges.resistance,
                    "α₁" | "α₂" => ranges.ideality,
                    "Q1" | "Q2" => ranges.cpe_coefficient,
                    "σ" => ranges.warburg_coefficient,
                    other => panic!("unexpected column {other}"),
                };
                assert!(
                    (bounds.min..=bounds.max).contains(&value),
                    "{name} = {value} outside [{}, {}]",
                    bounds.min,
                    bounds.max
                );
            }
        }
    }

    #[test]
    fn seeded_requests_reproduce_batches() {
        let request = SimulationRequest::for_circuit(CircuitModel::Randles);
        let mut a = ParameterSampler::seeded(2024);
        let mut b = ParameterSampler::seeded(2024);
        let first = simulate(&request, &mut a).expect("valid request");
        let second = simulate(&request, &mut b).expect("valid request");
        assert_eq!(first.impedance, second.impedance);
        assert_eq!(first.parameters, second.parameters);
    }

    #[test]
    fn validation_rejects_malformed_requests() {
        let mut sampler = ParameterSampler::seeded(3);

        let request = SimulationRequest {
            spectrum_count: 0,
            ..SimulationRequest::default()
        };
        assert!(simulate(&request, &mut sampler).is_err());

        let request = SimulationRequest {
            point_count: 1,
            ..SimulationRequest::default()
        };
        assert!(simulate(&request, &mut sampler).is_err());

        let request = SimulationRequest {
            frequency: ParamRange::new(-1.0, 1.0e6),
            ..SimulationRequest::default()
        };
        assert!(simulate(&request, &mut sampler).is_err());

        let request = SimulationRequest {
            ranges: ElementRanges {
                resistance: ParamRange::new(1.0e4, 1.0e-1),
                ..ElementRanges::default()
            },
            ..SimulationRequest::default()
        };
        assert!(simulate(&request, &mut sampler).is_err());

        // A broken Warburg range fails even for models that never draw it.
        let request = SimulationRequest {
            ranges: ElementRanges {
                warburg_coefficient: ParamRange::new(0.0, 1.0e3),
                ..ElementRanges::default()
            },
            ..SimulationRequest::for_circuit(CircuitModel::SingleLoop)
        };
        assert!(simulate(&request, &mut sampler).is_err());
    }
}
