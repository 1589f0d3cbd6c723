//! Equivalent-circuit elements, topologies, and batch evaluation.

/// Batch evaluation of topologies over a frequency grid.
pub mod analysis;
/// Closed-form impedance elements and their combination rules.
pub mod element;
/// The five supported topologies and their sampled parameter sets.
pub mod model;

pub use analysis::{evaluate, parameter_matrix, ComplexSpectrum, ParameterMatrix};
pub use element::{impedance_matrix, parallel, ConstantPhaseElement, Element, Resistor, Warburg};
pub use model::{CircuitModel, ElementParameterSet, IdealityCoupling};
