//! Persistence for simulated datasets.

pub mod csv;
pub mod npz;

pub use csv::*;
pub use npz::*;
