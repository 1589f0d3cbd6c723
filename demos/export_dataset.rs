use eis_sim::prelude::*;

fn main() -> Result<(), EisError> {
    // 32 randomized double-loop-with-diffusion spectra on the default sweep.
    let request = SimulationRequest {
        spectrum_count: 32,
        ..SimulationRequest::for_circuit(CircuitModel::DoubleLoopWarburg)
    };
    let mut sampler = ParameterSampler::seeded(2024);
    let output = simulate(&request, &mut sampler)?;

    // Channel-major tensor plus ground truth, exported the way trainers load them.
    let x = channel_tensor(&output.impedance, PhaseConvention::QuadrantCorrect)?;
    let y = parameter_array(&output.parameters);
    write_dataset("eis_dataset.npz", &x, &y)?;

    let mut csv = Vec::new();
    write_parameter_csv(&mut csv, output.circuit, &output.parameters)?;
    std::fs::write("eis_parameters.csv", csv)?;

    // Round-trip the archive and prepare the pair the way the training side does.
    let (x, y) = read_dataset("eis_dataset.npz")?;
    let targets = prepare_targets(&y, ParameterSchema::Full8Column, TrainingMode::Train)?;
    let features = prepare_features(&x)?;
    let split = train_test_split(&features, &targets, 0.25, Some(7))?;

    println!("x_train: {:?}", split.x_train.shape());
    println!("x_test:  {:?}", split.x_test.shape());
    println!("y_train: {:?}", split.y_train.shape());
    println!("y_test:  {:?}", split.y_test.shape());
    Ok(())
}
