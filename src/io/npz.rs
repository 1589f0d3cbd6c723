//! NPZ archive export and import for training datasets.
//!
//! One archive holds the feature tensor under `x_data` and the target matrix
//! under `y_data`, the entry names NumPy loaders on the training side expect.
//! Values are written at full precision; target scaling is a preparation
//! step, never an export step.

use std::fs::File;
use std::path::Path;

use ndarray::{Array2, Array3};
use ndarray_npy::{NpzReader, NpzWriter, ReadNpzError, WriteNpzError};
use thiserror::Error;

use crate::errors::EisError;
use crate::math::Scalar;

/// Archive entry holding the feature tensor.
pub const X_DATA: &str = "x_data";
/// Archive entry holding the target matrix.
pub const Y_DATA: &str = "y_data";

/// Errors raised while moving datasets through NPZ archives.
#[derive(Debug, Error)]
pub enum DatasetIoError {
    /// The archive could not be written.
    #[error(transparent)]
    Write(#[from] WriteNpzError),
    /// The archive could not be read back.
    #[error(transparent)]
    Read(#[from] ReadNpzError),
}

/// Writes a feature/target pair into an NPZ archive at `path`.
pub fn write_dataset<P: AsRef<Path>>(
    path: P,
    x: &Array3<Scalar>,
    y: &Array2<Scalar>,
) -> Result<(), EisError> {
    let mut npz = NpzWriter::new(File::create(path)?);
    npz.add_array(X_DATA, x).map_err(DatasetIoError::from)?;
    npz.add_array(Y_DATA, y).map_err(DatasetIoError::from)?;
    npz.finish().map_err(DatasetIoError::from)?;
    Ok(())
}

/// Reads a feature/target pair back from an NPZ archive at `path`.
pub fn read_dataset<P: AsRef<Path>>(
    path: P,
) -> Result<(Array3<Scalar>, Array2<Scalar>), EisError> {
    let mut npz = NpzReader::new(File::open(path)?).map_err(DatasetIoError::from)?;
    // Zip entries carry the `.npy` suffix the writer appends.
    let x: Array3<Scalar> = npz
        .by_name(&format!("{X_DATA}.npy"))
        .map_err(DatasetIoError::from)?;
    let y: Array2<Scalar> = npz
        .by_name(&format!("{Y_DATA}.npy"))
        .map_err(DatasetIoError::from)?;
    Ok((x, y))
}
