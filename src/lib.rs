#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and default sweep and range values.
pub mod constants;
/// Scalar aliases and principal-branch complex kernels.
pub mod math;
/// Error types shared between submodules.
pub mod errors;
/// Logarithmic frequency grids.
pub mod sweep;
/// Randomized element-value drawing.
pub mod sampling;
/// Circuit elements, topologies, and batch evaluation.
pub mod circuits;
/// Channel encoding of complex spectra.
pub mod features;
/// High-level batch simulation.
pub mod simulation;
/// Tensor and target preparation for trainers.
pub mod dataset;
/// Persistence for simulated datasets.
pub mod io;
/// Feature assembly for corrosion-rate regressors.
pub mod corrosion;

/// Common exports for downstream crates.
pub mod prelude;
