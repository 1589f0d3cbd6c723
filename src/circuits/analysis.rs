use nalgebra::DMatrix;

use crate::circuits::element::{
    impedance_matrix, parallel, ConstantPhaseElement, Resistor, Warburg,
};
use crate::circuits::model::{CircuitModel, ElementParameterSet, IdealityCoupling};
use crate::errors::EisError;
use crate::math::{CScalar, Scalar};
use crate::sweep::FrequencyGrid;

/// Complex impedance batch, one spectrum per row.
pub type ComplexSpectrum = DMatrix<CScalar>;
/// Ground-truth element values paired row-for-row with a batch.
pub type ParameterMatrix = DMatrix<Scalar>;

fn required<'a>(
    field: &'a Option<Vec<Scalar>>,
    name: &'static str,
) -> Result<&'a [Scalar], EisError> {
    field
        .as_deref()
        .ok_or_else(|| EisError::Shape(format!("parameter set is missing {name} values")))
}

fn resistors(values: &[Scalar]) -> Vec<Resistor> {
    values.iter().copied().map(Resistor::new).collect()
}

fn cpes(coefficients: &[Scalar], idealities: &[Scalar]) -> Vec<ConstantPhaseElement> {
    coefficients
        .iter()
        .zip(idealities)
        .map(|(&q, &alpha)| ConstantPhaseElement::new(q, alpha))
        .collect()
}

fn warburgs(values: &[Scalar]) -> Vec<Warburg> {
    values.iter().copied().map(Warburg::new).collect()
}

/// Ideality slice driving the second CPE under `coupling`.
fn second_ideality<'a>(
    set: &'a ElementParameterSet,
    coupling: IdealityCoupling,
) -> Result<&'a [Scalar], EisError> {
    match coupling {
        IdealityCoupling::LegacyShared => required(&set.ideality1, "α₁"),
        IdealityCoupling::Independent => required(&set.ideality2, "α₂"),
    }
}

/// Evaluates `model` for every spectrum in `set` across `grid`.
///
/// Row i of the output is spectrum i; column k is the impedance at
/// `grid.omega()[k]`. The composition is closed-form series/parallel algebra
/// applied matrix-at-a-time, so spectra and frequency points never interact.
pub fn evaluate(
    model: CircuitModel,
    set: &ElementParameterSet,
    grid: &FrequencyGrid,
    coupling: IdealityCoupling,
) -> Result<ComplexSpectrum, EisError> {
    set.validate_for(model)?;
    let zr1 = impedance_matrix(&resistors(required(&set.resistance1, "R1")?), grid)?;
    match model {
        CircuitModel::SingleLoop => {
            let zr2 = impedance_matrix(&resistors(required(&set.resistance2, "R2")?), grid)?;
            let zq1 = impedance_matrix(
                &cpes(required(&set.cpe1, "Q1")?, required(&set.ideality1, "α₁")?),
                grid,
            )?;
            Ok(zr1 + zr2.zip_map(&zq1, parallel))
        }
        CircuitModel::DoubleLoop => {
            let zr2 = impedance_matrix(&resistors(required(&set.resistance2, "R2")?), grid)?;
            let zr3 = impedance_matrix(&resistors(required(&set.resistance3, "R3")?), grid)?;
            let zq1 = impedance_matrix(
                &cpes(required(&set.cpe1, "Q1")?, required(&set.ideality1, "α₁")?),
                grid,
            )?;
            let zq2 = impedance_matrix(
                &cpes(required(&set.cpe2, "Q2")?, second_ideality(set, coupling)?),
                grid,
            )?;
            Ok(zr1 + zr2.zip_map(&zq1, parallel) + zr3.zip_map(&zq2, parallel))
        }
        CircuitModel::Randles => {
            let zq1 = impedance_matrix(
                &cpes(required(&set.cpe1, "Q1")?, required(&set.ideality1, "α₁")?),
                grid,
            )?;
            let diffusion = impedance_matrix(&resistors(required(&set.resistance2, "R2")?), grid)?
                + impedance_matrix(&warburgs(required(&set.warburg, "σ")?), grid)?;
            Ok(zr1 + zq1.zip_map(&diffusion, parallel))
        }
        CircuitModel::DoubleLoopWarburg => {
            let zr2 = impedance_matrix(&resistors(required(&set.resistance2, "R2")?), grid)?;
            let zq1 = impedance_matrix(
                &cpes(required(&set.cpe1, "Q1")?, required(&set.ideality1, "α₁")?),
                grid,
            )?;
            let zq2 = impedance_matrix(
                &cpes(required(&set.cpe2, "Q2")?, second_ideality(set, coupling)?),
                grid,
            )?;
            let diffusion = impedance_matrix(&resistors(required(&set.resistance3, "R3")?), grid)?
                + impedance_matrix(&warburgs(required(&set.warburg, "σ")?), grid)?;
            Ok(zr1 + zr2.zip_map(&zq1, parallel) + zq2.zip_map(&diffusion, parallel))
        }
        CircuitModel::NestedWarburg => {
            let zr2 = impedance_matrix(&resistors(required(&set.resistance2, "R2")?), grid)?;
            let zq1 = impedance_matrix(
                &cpes(required(&set.cpe1, "Q1")?, required(&set.ideality1, "α₁")?),
                grid,
            )?;
            let zq2 = impedance_matrix(
                &cpes(required(&set.cpe2, "Q2")?, second_ideality(set, coupling)?),
                grid,
            )?;
            let diffusion = impedance_matrix(&resistors(required(&set.resistance3, "R3")?), grid)?
                + impedance_matrix(&warburgs(required(&set.warburg, "σ")?), grid)?;
            let branch = zr2 + diffusion.zip_map(&zq2, parallel);
            Ok(zr1 + branch.zip_map(&zq1, parallel))
        }
    }
}

/// Builds the ground-truth matrix for `model` with its documented column
/// order.
pub fn parameter_matrix(
    model: CircuitModel,
    set: &ElementParameterSet,
) -> Result<ParameterMatrix, EisError> {
    let spectra = set.validate_for(model)?;
    let columns: Vec<&[Scalar]> = match model {
        CircuitModel::SingleLoop => vec![
            required(&set.resistance1, "R1")?,
            required(&set.resistance2, "R2")?,
            required(&set.ideality1, "α₁")?,
            required(&set.cpe1, "Q1")?,
        ],
        CircuitModel::DoubleLoop => vec![
            required(&set.resistance1, "R1")?,
            required(&set.resistance2, "R2")?,
            required(&set.resistance3, "R3")?,
            required(&set.ideality1, "α₁")?,
            required(&set.cpe1, "Q1")?,
            required(&set.ideality2, "α₂")?,
            required(&set.cpe2, "Q2")?,
        ],
        CircuitModel::Randles => vec![
            required(&set.resistance1, "R1")?,
            required(&set.resistance2, "R2")?,
            required(&set.ideality1, "α₁")?,
            required(&set.cpe1, "Q1")?,
            required(&set.warburg, "σ")?,
        ],
        CircuitModel::DoubleLoopWarburg | CircuitModel::NestedWarburg => vec![
            required(&set.resistance1, "R1")?,
            required(&set.resistance2, "R2")?,
            required(&set.resistance3, "R3")?,
            required(&set.ideality1, "α₁")?,
            required(&set.cpe1, "Q1")?,
            required(&set.ideality2, "α₂")?,
            required(&set.cpe2, "Q2")?,
            required(&set.warburg, "σ")?,
        ],
    };
    let mut out = ParameterMatrix::zeros(spectra, columns.len());
    for (j, column) in columns.iter().enumerate() {
        for (i, &value) in column.iter().enumerate() {
            out[(i, j)] = value;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    fn single_loop_set() -> ElementParameterSet {
        ElementParameterSet {
            resistance1: Some(vec![100.0]),
            resistance2: Some(vec![500.0]),
            ideality1: Some(vec![0.9]),
            cpe1: Some(vec![1.0e-4]),
            ..ElementParameterSet::default()
        }
    }

    fn two_cpe_set() -> ElementParameterSet {
        ElementParameterSet {
            resistance1: Some(vec![10.0]),
            resistance2: Some(vec![200.0]),
            resistance3: Some(vec![800.0]),
            ideality1: Some(vec![0.8]),
            cpe1: Some(vec![1.0e-4]),
            ideality2: Some(vec![1.0]),
            cpe2: Some(vec![5.0e-5]),
            warburg: Some(vec![60.0]),
        }
    }

    #[test]
    fn single_loop_matches_hand_combination() {
        // Z = R1 + (R2 ∥ Zq) at ω = 2π rad/s with R1=100, R2=500, α=0.9,
        // Q=1e-4, cross-checked against the closed-form CPE expression.
        let grid = FrequencyGrid::logspace(1.0, 10.0, 2).expect("valid bounds");
        let z = evaluate(
            CircuitModel::SingleLoop,
            &single_loop_set(),
            &grid,
            IdealityCoupling::default(),
        )
        .expect("complete set");

        let omega = 2.0 * PI;
        let zq = CScalar::from_polar((1.0e-4 * omega.powf(0.9)).recip(), -0.9 * FRAC_PI_2);
        let expected = 100.0 + (CScalar::new(1.0 / 500.0, 0.0) + zq.inv()).inv();
        assert_relative_eq!(z[(0, 0)].re, expected.re, max_relative = 1.0e-9);
        assert_relative_eq!(z[(0, 0)].im, expected.im, max_relative = 1.0e-9);
    }

    #[test]
    fn single_loop_approaches_r1_plus_r2_at_low_frequency() {
        // At ω → 0 the CPE blocks and the loop tends to R1 + R2.
        let grid = FrequencyGrid::logspace(1.0e-9, 1.0e-8, 2).expect("valid bounds");
        let z = evaluate(
            CircuitModel::SingleLoop,
            &single_loop_set(),
            &grid,
            IdealityCoupling::default(),
        )
        .expect("complete set");
        assert_relative_eq!(z[(0, 0)].re, 600.0, max_relative = 1.0e-2);
    }

    #[test]
    fn legacy_coupling_reuses_first_ideality() {
        let grid = FrequencyGrid::logspace(0.1, 1.0e4, 24).expect("valid bounds");
        let set = two_cpe_set();

        let legacy = evaluate(
            CircuitModel::DoubleLoopWarburg,
            &set,
            &grid,
            IdealityCoupling::LegacyShared,
        )
        .expect("complete set");
        let independent = evaluate(
            CircuitModel::DoubleLoopWarburg,
            &set,
            &grid,
            IdealityCoupling::Independent,
        )
        .expect("complete set");
        assert_ne!(legacy, independent);

        // Forcing α₂ = α₁ makes the two couplings agree.
        let mut shared = set;
        shared.ideality2 = shared.ideality1.clone();
        let forced = evaluate(
            CircuitModel::DoubleLoopWarburg,
            &shared,
            &grid,
            IdealityCoupling::Independent,
        )
        .expect("complete set");
        assert_eq!(legacy, forced);
    }

    #[test]
    fn nested_topology_differs_from_series_topology() {
        let grid = FrequencyGrid::logspace(0.1, 1.0e4, 16).expect("valid bounds");
        let set = two_cpe_set();
        let series = evaluate(
            CircuitModel::DoubleLoopWarburg,
            &set,
            &grid,
            IdealityCoupling::LegacyShared,
        )
        .expect("complete set");
        let nested = evaluate(
            CircuitModel::NestedWarburg,
            &set,
            &grid,
            IdealityCoupling::LegacyShared,
        )
        .expect("complete set");
        assert_ne!(series, nested);
    }

    #[test]
    fn parameter_matrix_orders_columns_per_model() {
        let set = two_cpe_set();
        let matrix =
            parameter_matrix(CircuitModel::NestedWarburg, &set).expect("complete set");
        assert_eq!(matrix.shape(), (1, 8));
        let expected = [10.0, 200.0, 800.0, 0.8, 1.0e-4, 1.0, 5.0e-5, 60.0];
        for (j, &value) in expected.iter().enumerate() {
            assert_relative_eq!(matrix[(0, j)], value);
        }

        let randles = ElementParameterSet {
            resistance1: Some(vec![20.0]),
            resistance2: Some(vec![250.0]),
            ideality1: Some(vec![0.9]),
            cpe1: Some(vec![1.0e-4]),
            warburg: Some(vec![40.0]),
            ..ElementParameterSet::default()
        };
        let matrix = parameter_matrix(CircuitModel::Randles, &randles).expect("complete set");
        assert_eq!(matrix.shape(), (1, 5));
        assert_relative_eq!(matrix[(0, 4)], 40.0);
    }

    #[test]
    fn evaluate_rejects_incomplete_sets() {
        let grid = FrequencyGrid::logspace(1.0, 100.0, 4).expect("valid bounds");
        let set = single_loop_set();
        let err = evaluate(
            CircuitModel::DoubleLoop,
            &set,
            &grid,
            IdealityCoupling::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EisError::Shape(_)));
    }
}
