//! Signal transforms
//!
//! This module provides the per-signal transforms used ahead of windowing:
//! - Resampling to a new sample rate (FFT method)
//! - Amplitude scaling
//! - Complex-to-real reduction
//! - Discrete Fourier transform
//!
//! All operations work along the last axis of an `ndarray` array; leading axes are
//! treated as independent batch lanes. Inputs are borrowed and results are freshly
//! allocated.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use sigprep::signal::{amplify, complex_to_real, fft, resample_sig};
//!
//! let signal = array![1.0, 2.0, 3.0, 4.0];
//!
//! // 4 samples at 4 Hz -> 1 second -> 8 samples at 8 Hz
//! let upsampled = resample_sig(&signal, 4, 8).unwrap();
//! assert_eq!(upsampled.len(), 8);
//!
//! let louder = amplify(&signal, 2.0);
//! let spectrum = fft(&louder).unwrap();
//! let real = complex_to_real(&spectrum);
//! assert_eq!(real[0], 20.0);
//! ```

mod elementwise;
mod fft;
mod resample;

pub use elementwise::{amplify, complex_to_real, RealPart};
pub use fft::fft;
pub use resample::{resample_sig, resample_to_len, ResampleElement};

use crate::error::{SignalError, SignalResult};
use ndarray::{ArrayBase, Axis, Dimension, RawData};

/// Time axis of `signal`, which must have at least one axis.
pub(crate) fn last_axis<S, D>(signal: &ArrayBase<S, D>, op: &str) -> SignalResult<Axis>
where
    S: RawData,
    D: Dimension,
{
    match signal.ndim() {
        0 => Err(SignalError::InsufficientData {
            required: 1,
            actual: 0,
            context: format!("{op} (number of axes)"),
        }),
        ndim => Ok(Axis(ndim - 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, Array3};

    #[test]
    fn test_last_axis() {
        let cube = Array3::<f64>::zeros((2, 3, 4));
        assert_eq!(last_axis(&cube, "test").unwrap(), Axis(2));
        assert!(last_axis(&arr0(0.0), "test").is_err());
    }
}
