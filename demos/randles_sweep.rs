use eis_sim::circuits::analysis::evaluate;
use eis_sim::circuits::model::{CircuitModel, ElementParameterSet, IdealityCoupling};
use eis_sim::errors::EisError;
use eis_sim::sweep::FrequencyGrid;

fn main() -> Result<(), EisError> {
    // One Randles cell with fixed element values.
    let set = ElementParameterSet {
        resistance1: Some(vec![20.0]),  // 20 Ω solution resistance
        resistance2: Some(vec![250.0]), // 250 Ω charge transfer
        ideality1: Some(vec![0.9]),
        cpe1: Some(vec![1.0e-4]), // S·s^α
        warburg: Some(vec![40.0]), // Ω·s^(-1/2)
        ..ElementParameterSet::default()
    };

    // Sweep 10 mHz .. 100 kHz, 40 points per decade-ish.
    let grid = FrequencyGrid::logspace(1.0e-2, 1.0e5, 40)?;
    let model = CircuitModel::Randles;
    let spectra = evaluate(model, &set, &grid, IdealityCoupling::default())?;

    println!("{}", model.formula());
    println!("f(Hz), Z_real(ohm), -Z_imag(ohm), |Z|(ohm), phase(deg)");
    for (point, hz) in grid.hertz().iter().enumerate() {
        let z = spectra[(0, point)];
        println!(
            "{:.6e}, {:.6e}, {:.6e}, {:.6e}, {:.3}",
            hz,
            z.re,
            -z.im,
            z.norm(),
            z.arg().to_degrees()
        );
    }
    Ok(())
}
