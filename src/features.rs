//! Channel-tensor encodings of complex impedance batches.
//!
//! Trained predictors consume impedance as stacked real channels rather than
//! complex numbers. The raw layout is channel-major `(spectra, 3, points)`;
//! the canonical trainer layout is channel-last with negated-channel
//! augmentation, produced by [`channel_last`] and [`augment_negated`].

use ndarray::{concatenate, Array3, Axis};

use crate::circuits::analysis::ComplexSpectrum;
use crate::errors::EisError;
use crate::math::{CScalar, Scalar};

/// Channel index of the imaginary part in the 3-channel tensor.
pub const CHANNEL_IMAGINARY: usize = 0;
/// Channel index of the phase in degrees.
pub const CHANNEL_PHASE: usize = 1;
/// Channel index of the magnitude.
pub const CHANNEL_MAGNITUDE: usize = 2;

/// Phase formula applied by the channel encoder.
///
/// Persisted training data has historically come through two paths: a live
/// encoder computing phase with `atan2`, and an export path using the
/// quadrant-blind `atan(Im/Re)`, which wraps incorrectly whenever `Re < 0`.
/// `QuadrantCorrect` is the physically correct choice and the default;
/// `HalfPlane` exists only to stay comparable with archives written by the
/// old export path.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhaseConvention {
    /// Phase = `atan2(Im, Re)`, correct in all quadrants.
    #[default]
    QuadrantCorrect,
    /// Phase = `atan(Im / Re)`, wrapping for `Re < 0`.
    HalfPlane,
}

fn phase_degrees(z: CScalar, convention: PhaseConvention) -> Scalar {
    match convention {
        PhaseConvention::QuadrantCorrect => z.arg().to_degrees(),
        PhaseConvention::HalfPlane => (z.im / z.re).atan().to_degrees(),
    }
}

/// Encodes a batch into the channel-major `(spectra, 3, points)` tensor with
/// channels imaginary part, phase in degrees, and magnitude.
///
/// A matrix batch cannot be ragged by construction, so only emptiness is
/// rejected.
pub fn channel_tensor(
    spectra: &ComplexSpectrum,
    convention: PhaseConvention,
) -> Result<Array3<Scalar>, EisError> {
    if spectra.is_empty() {
        return Err(EisError::Shape("cannot encode an empty batch".into()));
    }
    let (n, points) = spectra.shape();
    let mut out = Array3::zeros((n, 3, points));
    for i in 0..n {
        for k in 0..points {
            let z = spectra[(i, k)];
            out[[i, CHANNEL_IMAGINARY, k]] = z.im;
            out[[i, CHANNEL_PHASE, k]] = phase_degrees(z, convention);
            out[[i, CHANNEL_MAGNITUDE, k]] = z.norm();
        }
    }
    Ok(out)
}

/// Transposes a channel-major tensor into the `(spectra, points, channels)`
/// layout trainers consume.
#[must_use]
pub fn channel_last(x: &Array3<Scalar>) -> Array3<Scalar> {
    x.view().permuted_axes([0, 2, 1]).to_owned()
}

/// Appends the elementwise negation of every channel of a channel-last
/// tensor, doubling the channel count.
///
/// Trained regressors have a fixed input width that assumes this
/// augmentation; it is not optional for any consumer of persisted batches.
pub fn augment_negated(x: &Array3<Scalar>) -> Result<Array3<Scalar>, EisError> {
    if x.is_empty() {
        return Err(EisError::Shape("cannot augment an empty tensor".into()));
    }
    let negated = x.mapv(|v| -v);
    concatenate(Axis(2), &[x.view(), negated.view()])
        .map_err(|e| EisError::Shape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn sample_batch() -> ComplexSpectrum {
        // Second spectrum starts in the left half-plane to pin down quadrant
        // handling.
        ComplexSpectrum::from_row_slice(
            2,
            2,
            &[
                CScalar::new(3.0, -4.0),
                CScalar::new(1.0, 0.0),
                CScalar::new(-3.0, 4.0),
                CScalar::new(0.0, -2.0),
            ],
        )
    }

    #[test]
    fn channels_match_rederived_magnitude_and_phase() {
        let batch = sample_batch();
        let x = channel_tensor(&batch, PhaseConvention::QuadrantCorrect).expect("non-empty");
        assert_eq!(x.shape(), &[2, 3, 2]);
        for i in 0..2 {
            for k in 0..2 {
                let z = batch[(i, k)];
                assert_relative_eq!(x[[i, CHANNEL_IMAGINARY, k]], z.im);
                assert_relative_eq!(
                    x[[i, CHANNEL_PHASE, k]],
                    z.im.atan2(z.re).to_degrees(),
                    max_relative = 1.0e-12
                );
                assert_relative_eq!(
                    x[[i, CHANNEL_MAGNITUDE, k]],
                    (z.re * z.re + z.im * z.im).sqrt(),
                    max_relative = 1.0e-12
                );
            }
        }
    }

    #[test]
    fn half_plane_convention_wraps_left_half_plane() {
        let batch = sample_batch();
        let quadrant = channel_tensor(&batch, PhaseConvention::QuadrantCorrect).expect("non-empty");
        let half = channel_tensor(&batch, PhaseConvention::HalfPlane).expect("non-empty");

        // -3 + 4j: atan2 gives 126.87°, the quadrant-blind form gives -53.13°.
        assert_relative_eq!(
            quadrant[[1, CHANNEL_PHASE, 0]],
            4.0f64.atan2(-3.0).to_degrees(),
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            half[[1, CHANNEL_PHASE, 0]],
            (4.0f64 / -3.0).atan().to_degrees(),
            max_relative = 1.0e-12
        );
        // Right half-plane values agree between the two conventions.
        assert_relative_eq!(
            quadrant[[0, CHANNEL_PHASE, 0]],
            half[[0, CHANNEL_PHASE, 0]],
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn empty_batches_are_rejected() {
        let empty = ComplexSpectrum::zeros(0, 0);
        assert!(channel_tensor(&empty, PhaseConvention::QuadrantCorrect).is_err());
    }

    #[test]
    fn channel_last_swaps_trailing_axes() {
        let batch = sample_batch();
        let x = channel_tensor(&batch, PhaseConvention::QuadrantCorrect).expect("non-empty");
        let transposed = channel_last(&x);
        assert_eq!(transposed.shape(), &[2, 2, 3]);
        for i in 0..2 {
            for k in 0..2 {
                for c in 0..3 {
                    assert_relative_eq!(transposed[[i, k, c]], x[[i, c, k]]);
                }
            }
        }
    }

    #[test]
    fn augmentation_appends_negated_channels() {
        let batch = sample_batch();
        let x = channel_last(&channel_tensor(&batch, PhaseConvention::QuadrantCorrect)
            .expect("non-empty"));
        let augmented = augment_negated(&x).expect("non-empty");
        assert_eq!(augmented.shape(), &[2, 2, 6]);
        for i in 0..2 {
            for k in 0..2 {
                for c in 0..3 {
                    assert_relative_eq!(augmented[[i, k, c]], x[[i, k, c]]);
                    assert_relative_eq!(augmented[[i, k, c + 3]], -x[[i, k, c]]);
                }
            }
        }
    }
}
