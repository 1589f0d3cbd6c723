use nalgebra::DMatrix;

use crate::errors::EisError;
use crate::math::{principal_power_jw, principal_sqrt_jw, CScalar, Scalar};
use crate::sweep::FrequencyGrid;

/// Trait implemented by all equivalent-circuit elements that can provide a
/// frequency-domain impedance.
pub trait Element {
    /// Returns the element's impedance for an angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> Result<CScalar, EisError>;
}

/// Ideal resistor, `Z = R`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    /// Resistance in ohms.
    pub resistance: Scalar,
}

impl Resistor {
    /// Creates a resistor with `resistance` in ohms.
    #[must_use]
    pub const fn new(resistance: Scalar) -> Self {
        Self { resistance }
    }
}

impl Element for Resistor {
    fn impedance(&self, _omega: Scalar) -> Result<CScalar, EisError> {
        Ok(CScalar::new(self.resistance, 0.0))
    }
}

/// Constant-phase element, `Z = 1 / (Q·(jω)^α)` with the principal power.
///
/// `ideality` is expected in (0, 1], α = 1 recovering an ideal capacitor.
/// The element does not clamp α; range enforcement is the sampling
/// boundary's job, and evaluation only rejects values outside the analytic
/// domain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantPhaseElement {
    /// CPE coefficient Q in S·s^α.
    pub coefficient: Scalar,
    /// Ideality factor α (dimensionless).
    pub ideality: Scalar,
}

impl ConstantPhaseElement {
    /// Creates a CPE with coefficient `coefficient` and ideality factor
    /// `ideality`.
    #[must_use]
    pub const fn new(coefficient: Scalar, ideality: Scalar) -> Self {
        Self {
            coefficient,
            ideality,
        }
    }
}

impl Element for ConstantPhaseElement {
    fn impedance(&self, omega: Scalar) -> Result<CScalar, EisError> {
        if self.coefficient <= 0.0 {
            return Err(EisError::Domain(format!(
                "constant-phase element needs Q > 0, got {}",
                self.coefficient
            )));
        }
        if omega <= 0.0 {
            return Err(EisError::Domain(format!(
                "constant-phase element needs omega > 0, got {omega}"
            )));
        }
        Ok((self.coefficient * principal_power_jw(omega, self.ideality)).inv())
    }
}

/// Semi-infinite Warburg diffusion element, `Z = σ·√2 / √(jω)`.
///
/// Equivalent to `σ/√ω · (1 − j)`: equal real and imaginary magnitudes with
/// a constant −45° phase at every frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Warburg {
    /// Warburg coefficient σ in Ω·s^(-1/2).
    pub coefficient: Scalar,
}

impl Warburg {
    /// Creates a Warburg element with coefficient `coefficient`.
    #[must_use]
    pub const fn new(coefficient: Scalar) -> Self {
        Self { coefficient }
    }
}

impl Element for Warburg {
    fn impedance(&self, omega: Scalar) -> Result<CScalar, EisError> {
        if omega <= 0.0 {
            return Err(EisError::Domain(format!(
                "warburg element needs omega > 0, got {omega}"
            )));
        }
        Ok(self.coefficient * Scalar::sqrt(2.0) / principal_sqrt_jw(omega))
    }
}

/// Parallel combination `1 / (1/a + 1/b)`. Both inputs must be nonzero.
#[must_use]
pub fn parallel(a: CScalar, b: CScalar) -> CScalar {
    (a.inv() + b.inv()).inv()
}

/// Evaluates one element per spectrum across the grid into a
/// `(spectra × points)` complex matrix.
pub fn impedance_matrix<E: Element>(
    elements: &[E],
    grid: &FrequencyGrid,
) -> Result<DMatrix<CScalar>, EisError> {
    let mut out = DMatrix::zeros(elements.len(), grid.len());
    for (i, element) in elements.iter().enumerate() {
        for (k, &omega) in grid.omega().iter().enumerate() {
            out[(i, k)] = element.impedance(omega)?;
        }
    }
    Ok(out)
}
