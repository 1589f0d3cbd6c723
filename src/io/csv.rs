//! CSV export for ground-truth element values.

use std::io::Write;

use crate::circuits::analysis::ParameterMatrix;
use crate::circuits::model::CircuitModel;
use crate::errors::EisError;

/// Writes one header row of element names and one row of values per spectrum.
///
/// Columns follow [`CircuitModel::parameter_names`], so the file lines up
/// with the ground-truth matrix produced by the same simulation.
pub fn write_parameter_csv<W: Write>(
    mut w: W,
    model: CircuitModel,
    parameters: &ParameterMatrix,
) -> Result<(), EisError> {
    let names = model.parameter_names();
    if parameters.ncols() != names.len() {
        return Err(EisError::Shape(format!(
            "parameter matrix has {} columns, {:?} needs {}",
            parameters.ncols(),
            model,
            names.len()
        )));
    }
    writeln!(w, "{}", names.join(","))?;
    for i in 0..parameters.nrows() {
        for j in 0..names.len() {
            if j > 0 {
                write!(w, ",")?;
            }
            write!(w, "{:.16e}", parameters[(i, j)])?;
        }
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_rows_follow_the_model_layout() {
        let parameters = ParameterMatrix::from_row_slice(1, 4, &[100.0, 500.0, 0.9, 1.0e-4]);
        let mut buffer = Vec::new();
        write_parameter_csv(&mut buffer, CircuitModel::SingleLoop, &parameters)
            .expect("write table");
        let text = String::from_utf8(buffer).expect("utf8 output");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("R1,R2,α₁,Q1"));
        let row = lines.next().expect("one data row");
        assert!(row.starts_with("1.0000000000000000e2,5.0000000000000000e2,"));
        assert!(row.ends_with("1.0000000000000000e-4"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn one_row_per_spectrum() {
        let parameters = ParameterMatrix::from_row_slice(
            3,
            5,
            &[
                20.0, 250.0, 0.9, 1.0e-4, 40.0, //
                30.0, 300.0, 0.85, 2.0e-4, 50.0, //
                40.0, 350.0, 0.8, 3.0e-4, 60.0,
            ],
        );
        let mut buffer = Vec::new();
        write_parameter_csv(&mut buffer, CircuitModel::Randles, &parameters).expect("write table");
        let text = String::from_utf8(buffer).expect("utf8 output");
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().next(), Some("R1,R2,α₁,Q1,σ"));
    }

    #[test]
    fn column_mismatch_is_rejected() {
        let parameters = ParameterMatrix::from_row_slice(1, 3, &[1.0, 2.0, 3.0]);
        let err = write_parameter_csv(Vec::new(), CircuitModel::SingleLoop, &parameters)
            .expect_err("three columns cannot fill four names");
        assert!(matches!(err, EisError::Shape(_)));
    }
}
