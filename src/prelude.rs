//! Convenience re-exports for building impedance datasets.

pub use crate::circuits::{
    analysis::{evaluate, parameter_matrix, ComplexSpectrum, ParameterMatrix},
    element::{impedance_matrix, parallel, ConstantPhaseElement, Element, Resistor, Warburg},
    model::{CircuitModel, ElementParameterSet, IdealityCoupling},
};
pub use crate::constants::*;
pub use crate::corrosion::{
    build_feature_vector, select_features, spectrum_features, EnvironmentalConditions,
    FeatureCandidates, Material, RiskLevel,
};
pub use crate::dataset::{
    parameter_array, prepare_features, prepare_targets, stacked_class_dataset, train_test_split,
    ParameterSchema, TrainTestSplit, TrainingMode,
};
pub use crate::errors::EisError;
pub use crate::features::{
    augment_negated, channel_last, channel_tensor, PhaseConvention, CHANNEL_IMAGINARY,
    CHANNEL_MAGNITUDE, CHANNEL_PHASE,
};
pub use crate::io::{read_dataset, write_dataset, write_parameter_csv, DatasetIoError};
pub use crate::math::{CScalar, Scalar};
pub use crate::sampling::{ElementRanges, ParamRange, ParameterSampler};
pub use crate::simulation::{simulate, SimulationOutput, SimulationRequest};
pub use crate::sweep::{logspace_hz, FrequencyGrid};
