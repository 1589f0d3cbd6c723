//! Target and feature preparation for neural-network training.
//!
//! Regression targets keep resistances, CPE coefficients, and the Warburg
//! coefficient; ideality columns are dropped because the downstream
//! regressors never learn them. CPE coefficients are rescaled so their
//! magnitude is comparable to the resistance columns.

use ndarray::{Array1, Array2, Array3, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::circuits::analysis::ParameterMatrix;
use crate::errors::EisError;
use crate::features::{augment_negated, channel_last};
use crate::math::Scalar;

/// Column index of the first ideality in a full-schema target matrix.
pub const IDEALITY1_COLUMN: usize = 3;
/// Column index of the first CPE coefficient in a full-schema target matrix.
pub const CPE1_COLUMN: usize = 4;
/// Column index of the second ideality in a full-schema target matrix.
pub const IDEALITY2_COLUMN: usize = 5;
/// Column index of the second CPE coefficient in a full-schema target matrix.
pub const CPE2_COLUMN: usize = 6;

/// Layout of a target matrix handed to [`prepare_targets`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSchema {
    /// Ground truth straight out of a two-CPE simulation, laid out as
    /// `[R1, R2, R3, α₁, Q1, α₂, Q2]` with an optional trailing `σ`.
    /// Both the 7- and 8-column widths are accepted.
    Full8Column,
    /// Targets that were already reduced and rescaled; passed through as-is.
    Reduced6Column,
}

/// Selects the CPE rescaling factor for a prepared target matrix.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingMode {
    /// Training targets, CPE coefficients scaled by `1e7`.
    Train,
    /// Held-out evaluation targets, CPE coefficients scaled by `1e6`.
    Test,
}

impl TrainingMode {
    /// Multiplier applied to the CPE coefficient columns.
    #[must_use]
    pub const fn cpe_scale(self) -> Scalar {
        match self {
            Self::Train => 1.0e7,
            Self::Test => 1.0e6,
        }
    }
}

/// Paired feature/target matrices produced by [`train_test_split`].
///
/// Row i of `x_train` and row i of `y_train` describe the same spectrum,
/// and likewise for the test pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    /// Training features.
    pub x_train: Array3<Scalar>,
    /// Held-out features.
    pub x_test: Array3<Scalar>,
    /// Training targets.
    pub y_train: Array2<Scalar>,
    /// Held-out targets.
    pub y_test: Array2<Scalar>,
}

/// Reduces a full-schema target matrix to its regression columns.
///
/// Ideality columns are removed and both CPE columns are multiplied by the
/// mode's scale factor, so an 8-column batch becomes
/// `[R1, R2, R3, Q1·s, Q2·s, σ]` and a 7-column batch loses its last column
/// accordingly. [`ParameterSchema::Reduced6Column`] input is returned
/// unchanged.
pub fn prepare_targets(
    y: &Array2<Scalar>,
    schema: ParameterSchema,
    mode: TrainingMode,
) -> Result<Array2<Scalar>, EisError> {
    match schema {
        ParameterSchema::Reduced6Column => Ok(y.clone()),
        ParameterSchema::Full8Column => {
            let ncols = y.ncols();
            if ncols != 7 && ncols != 8 {
                return Err(EisError::Shape(format!(
                    "full-schema targets need 7 or 8 columns, got {ncols}"
                )));
            }
            let mut scaled = y.clone();
            let factor = mode.cpe_scale();
            scaled.column_mut(CPE1_COLUMN).mapv_inplace(|q| q * factor);
            scaled.column_mut(CPE2_COLUMN).mapv_inplace(|q| q * factor);
            let kept: Vec<usize> = (0..ncols)
                .filter(|&column| column != IDEALITY1_COLUMN && column != IDEALITY2_COLUMN)
                .collect();
            Ok(scaled.select(Axis(1), &kept))
        }
    }
}

/// Turns a channel-first tensor into the augmented channel-last layout the
/// training pipeline consumes: `(n, channels, points)` becomes
/// `(n, points, 2 * channels)` with the negated copy appended.
pub fn prepare_features(x: &Array3<Scalar>) -> Result<Array3<Scalar>, EisError> {
    augment_negated(&channel_last(x))
}

/// Shuffles the batch and splits it into train and test halves.
///
/// The same permutation is applied to features and targets so every pair
/// stays aligned. `test_fraction` must lie strictly between 0 and 1;
/// rounding is clamped so both halves keep at least one row. A `seed` makes
/// the shuffle reproducible.
pub fn train_test_split(
    x: &Array3<Scalar>,
    y: &Array2<Scalar>,
    test_fraction: Scalar,
    seed: Option<u64>,
) -> Result<TrainTestSplit, EisError> {
    let n = x.len_of(Axis(0));
    if n != y.nrows() {
        return Err(EisError::Shape(format!(
            "feature rows ({n}) and target rows ({}) disagree",
            y.nrows()
        )));
    }
    if n < 2 {
        return Err(EisError::InvalidRange(
            "a split needs at least 2 samples".into(),
        ));
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(EisError::InvalidRange(format!(
            "test fraction must lie strictly between 0 and 1, got {test_fraction}"
        )));
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    let test_len = (n as Scalar * test_fraction).round() as usize;
    let test_len = test_len.clamp(1, n - 1);
    let (train_indices, test_indices) = indices.split_at(n - test_len);
    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), train_indices),
        x_test: x.select(Axis(0), test_indices),
        y_train: y.select(Axis(0), train_indices),
        y_test: y.select(Axis(0), test_indices),
    })
}

/// Stacks per-topology feature batches into one classification dataset.
///
/// The label of each row is the index of the batch it came from, emitted as
/// a float so the pair can be exported alongside regression data.
pub fn stacked_class_dataset(
    batches: &[Array3<Scalar>],
) -> Result<(Array3<Scalar>, Array1<Scalar>), EisError> {
    if batches.is_empty() {
        return Err(EisError::Shape("no batches to stack".into()));
    }
    let views: Vec<_> = batches.iter().map(|batch| batch.view()).collect();
    let stacked =
        ndarray::concatenate(Axis(0), &views).map_err(|err| EisError::Shape(err.to_string()))?;
    let mut labels = Vec::with_capacity(stacked.len_of(Axis(0)));
    for (class, batch) in batches.iter().enumerate() {
        labels.extend(std::iter::repeat(class as Scalar).take(batch.len_of(Axis(0))));
    }
    Ok((stacked, Array1::from_vec(labels)))
}

/// Copies a ground-truth matrix into an `ndarray` array for export.
#[must_use]
pub fn parameter_array(parameters: &ParameterMatrix) -> Array2<Scalar> {
    Array2::from_shape_fn((parameters.nrows(), parameters.ncols()), |(row, column)| {
        parameters[(row, column)]
    })
}
