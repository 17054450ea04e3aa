//! Signal resampling using the FFT (band-limited) method.
//!
//! # Algorithm
//!
//! ```text
//! resample(x[N], num):
//!
//! 1. X = fft(x)
//! 2. Keep the lowest M = min(N, num) frequencies:
//!    real x:    Y[0 .. M/2 + 1] = X[0 .. M/2 + 1]       (one-sided spectrum)
//!    complex x: also Y[num - (M - M/2 - 1) ..] = X[N - (M - M/2 - 1) ..]
//! 3. If M is even, the bin at M/2 is shared between +/- Nyquist:
//!    - downsampling (num < N): real: Y[M/2] *= 2, complex: Y[M/2] += X[N - M/2]
//!    - upsampling   (num > N): Y[M/2] *= 0.5, complex also sets Y[num - M/2] = Y[M/2]
//! 4. y = ifft(Y) * (num / N)     (Hermitian-completed for real x)
//! ```
//!
//! Frequency content below the lower of the two Nyquist limits is preserved exactly;
//! content above it is discarded. The signal is treated as periodic.

use crate::error::{SignalError, SignalResult};
use crate::signal::last_axis;
use ndarray::{Array, ArrayBase, Data, Dimension, Zip};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

/// Sample types accepted by the resampler.
///
/// Real samples are resampled through a Hermitian spectrum and come back real; complex
/// samples keep their negative frequencies.
pub trait ResampleElement: Copy {
    /// True when the signal spectrum is Hermitian.
    const IS_REAL: bool;

    fn to_complex(self) -> Complex<f64>;

    fn from_complex(value: Complex<f64>) -> Self;
}

impl ResampleElement for f64 {
    const IS_REAL: bool = true;

    fn to_complex(self) -> Complex<f64> {
        Complex::new(self, 0.0)
    }

    fn from_complex(value: Complex<f64>) -> Self {
        value.re
    }
}

impl ResampleElement for f32 {
    const IS_REAL: bool = true;

    fn to_complex(self) -> Complex<f64> {
        Complex::new(f64::from(self), 0.0)
    }

    fn from_complex(value: Complex<f64>) -> Self {
        value.re as f32
    }
}

impl ResampleElement for Complex<f64> {
    const IS_REAL: bool = false;

    fn to_complex(self) -> Complex<f64> {
        self
    }

    fn from_complex(value: Complex<f64>) -> Self {
        value
    }
}

impl ResampleElement for Complex<f32> {
    const IS_REAL: bool = false;

    fn to_complex(self) -> Complex<f64> {
        Complex::new(f64::from(self.re), f64::from(self.im))
    }

    fn from_complex(value: Complex<f64>) -> Self {
        Complex::new(value.re as f32, value.im as f32)
    }
}

/// Resample a signal from `original_sr` to `target_sr` along the last axis.
///
/// The output holds `ceil(N / original_sr) * target_sr` samples, i.e. the signal
/// duration is rounded up to whole seconds before converting.
///
/// # Errors
///
/// Returns an error if either sample rate is zero, the output length overflows
/// `usize`, the signal has no axes, or the last axis is empty.
pub fn resample_sig<A, S, D>(
    signal: &ArrayBase<S, D>,
    original_sr: usize,
    target_sr: usize,
) -> SignalResult<Array<A, D>>
where
    A: ResampleElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    if original_sr == 0 {
        return Err(SignalError::InvalidParameter {
            parameter: "original_sr".to_string(),
            message: "sample rate must be positive".to_string(),
        });
    }
    if target_sr == 0 {
        return Err(SignalError::InvalidParameter {
            parameter: "target_sr".to_string(),
            message: "sample rate must be positive".to_string(),
        });
    }

    let axis = last_axis(signal, "resample")?;
    let n = signal.len_of(axis);
    let secs = n.div_ceil(original_sr);
    let num = secs
        .checked_mul(target_sr)
        .ok_or_else(|| SignalError::InvalidParameter {
            parameter: "target_sr".to_string(),
            message: format!("output length {secs} * {target_sr} overflows usize"),
        })?;

    debug!(n, num, original_sr, target_sr, "resampling signal");
    resample_to_len(signal, num)
}

/// Resample every lane along the last axis to exactly `num` samples.
///
/// # Errors
///
/// Returns an error if `num` is zero, the signal has no axes, or the last axis is empty.
pub fn resample_to_len<A, S, D>(signal: &ArrayBase<S, D>, num: usize) -> SignalResult<Array<A, D>>
where
    A: ResampleElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    let axis = last_axis(signal, "resample")?;
    let n = signal.len_of(axis);

    if n == 0 {
        return Err(SignalError::InsufficientData {
            required: 1,
            actual: 0,
            context: "resample".to_string(),
        });
    }
    if num == 0 {
        return Err(SignalError::InvalidParameter {
            parameter: "num".to_string(),
            message: "output length must be positive".to_string(),
        });
    }

    let zero = Complex::new(0.0, 0.0);
    let mut out_dim = signal.raw_dim();
    out_dim[axis.index()] = num;
    let mut output = Array::from_elem(out_dim, A::from_complex(zero));

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(n);
    let inverse = planner.plan_fft_inverse(num);

    let mut spectrum = vec![zero; n];
    let mut rebuilt = vec![zero; num];

    // ifft divides by num, the amplitude correction multiplies by num / n.
    let scale = 1.0 / n as f64;

    Zip::from(output.lanes_mut(axis))
        .and(signal.lanes(axis))
        .for_each(|mut out, x| {
            for (dst, &v) in spectrum.iter_mut().zip(x.iter()) {
                *dst = v.to_complex();
            }
            forward.process(&mut spectrum);

            rebuilt.fill(zero);
            if A::IS_REAL {
                fill_hermitian(&spectrum, &mut rebuilt);
            } else {
                fill_two_sided(&spectrum, &mut rebuilt);
            }

            inverse.process(&mut rebuilt);

            for (dst, &src) in out.iter_mut().zip(&rebuilt) {
                *dst = A::from_complex(src * scale);
            }
        });

    Ok(output)
}

/// Output spectrum for a real signal: one-sided copy plus Hermitian completion.
fn fill_hermitian(spectrum: &[Complex<f64>], rebuilt: &mut [Complex<f64>]) {
    let (n, num) = (spectrum.len(), rebuilt.len());
    let kept = n.min(num);
    let nyq = kept / 2 + 1;

    rebuilt[..nyq].copy_from_slice(&spectrum[..nyq]);

    if kept % 2 == 0 {
        if num < n {
            rebuilt[kept / 2] *= 2.0;
        } else if n < num {
            rebuilt[kept / 2] *= 0.5;
        }
    }

    // A real inverse ignores the imaginary part of the DC and Nyquist bins.
    rebuilt[0].im = 0.0;
    if num % 2 == 0 {
        rebuilt[num / 2].im = 0.0;
    }
    for k in 1..num.div_ceil(2) {
        rebuilt[num - k] = rebuilt[k].conj();
    }
}

/// Output spectrum for a complex signal: positive and negative bins copied separately.
fn fill_two_sided(spectrum: &[Complex<f64>], rebuilt: &mut [Complex<f64>]) {
    let (n, num) = (spectrum.len(), rebuilt.len());
    let kept = n.min(num);
    let nyq = kept / 2 + 1;

    rebuilt[..nyq].copy_from_slice(&spectrum[..nyq]);
    if kept > 2 {
        let negative = kept - nyq;
        rebuilt[num - negative..].copy_from_slice(&spectrum[n - negative..]);
    }

    if kept % 2 == 0 {
        let half = kept / 2;
        if num < n {
            // Fold -Nyquist onto +Nyquist
            rebuilt[half] += spectrum[n - half];
        } else if n < num {
            rebuilt[half] *= 0.5;
            rebuilt[num - half] = rebuilt[half];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};
    use std::f64::consts::PI;

    fn phasor(len: usize, cycles: f64) -> Array1<Complex<f64>> {
        Array1::from_iter(
            (0..len).map(|t| Complex::from_polar(1.0, 2.0 * PI * cycles * t as f64 / len as f64)),
        )
    }

    fn assert_complex_close(actual: &Array1<Complex<f64>>, expected: &Array1<Complex<f64>>) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(a.re, e.re, epsilon = 1e-9);
            assert_abs_diff_eq!(a.im, e.im, epsilon = 1e-9);
        }
    }

    fn tone(len: usize, cycles: f64) -> Array1<f64> {
        Array1::from_iter((0..len).map(|t| (2.0 * PI * cycles * t as f64 / len as f64).cos()))
    }

    #[test]
    fn test_resample_same_length_is_identity() {
        let signal = array![0.5, -1.0, 2.0, 3.5, 0.0, 1.25, -0.75];
        let result = resample_to_len(&signal, signal.len()).unwrap();

        assert_abs_diff_eq!(result, signal, epsilon = 1e-12);
    }

    #[test]
    fn test_resample_downsample_even() {
        // scipy.signal.resample([1, 2, 3, 4], 2) == [1.5, 3.5]
        let signal = array![1.0, 2.0, 3.0, 4.0];
        let result = resample_to_len(&signal, 2).unwrap();

        assert_abs_diff_eq!(result, array![1.5, 3.5], epsilon = 1e-12);
    }

    #[test]
    fn test_resample_upsample_keeps_samples() {
        let signal = array![1.0, 2.0, 3.0, 4.0];
        let result = resample_to_len(&signal, 8).unwrap();

        assert_eq!(result.len(), 8);
        for (t, &value) in signal.iter().enumerate() {
            assert_abs_diff_eq!(result[2 * t], value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_resample_preserves_tone() {
        let up = resample_to_len(&tone(32, 3.0), 64).unwrap();
        assert_abs_diff_eq!(up, tone(64, 3.0), epsilon = 1e-9);

        let down = resample_to_len(&tone(64, 3.0), 32).unwrap();
        assert_abs_diff_eq!(down, tone(32, 3.0), epsilon = 1e-9);
    }

    #[test]
    fn test_resample_single_sample() {
        let signal = array![2.5];
        let result = resample_to_len(&signal, 4).unwrap();

        assert_abs_diff_eq!(result, Array1::from_elem(4, 2.5), epsilon = 1e-12);
    }

    #[test]
    fn test_resample_sig_output_length() {
        // 10 samples at 4 Hz -> 3 whole seconds -> 9 samples at 3 Hz
        let signal = Array1::from_iter((0..10).map(|t| t as f64));
        let result = resample_sig(&signal, 4, 3).unwrap();
        assert_eq!(result.len(), 9);

        // Exactly one second
        let signal = tone(16, 2.0);
        let result = resample_sig(&signal, 16, 8).unwrap();
        assert_eq!(result.len(), 8);
        assert_abs_diff_eq!(result, tone(8, 2.0), epsilon = 1e-9);
    }

    #[test]
    fn test_resample_batched() {
        let signal = Array2::from_shape_fn((2, 12), |(b, t)| ((b + 1) as f64 * t as f64 * 0.4).sin());
        let result = resample_to_len(&signal, 18).unwrap();
        assert_eq!(result.shape(), &[2, 18]);

        for b in 0..2 {
            let lane = resample_to_len(&signal.row(b), 18).unwrap();
            assert_abs_diff_eq!(result.row(b), lane.view(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_resample_errors() {
        let signal = array![1.0, 2.0];
        assert!(matches!(
            resample_sig(&signal, 0, 8),
            Err(SignalError::InvalidParameter { .. })
        ));
        assert!(matches!(
            resample_sig(&signal, 8, 0),
            Err(SignalError::InvalidParameter { .. })
        ));
        assert!(resample_to_len(&signal, 0).is_err());

        let empty = Array1::<f64>::zeros(0);
        assert!(matches!(
            resample_to_len(&empty, 4),
            Err(SignalError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_resample_f32_signal() {
        let signal = array![1.0f32, 2.0, 3.0, 4.0];
        let down = resample_to_len(&signal, 2).unwrap();
        assert_abs_diff_eq!(down, array![1.5f32, 3.5], epsilon = 1e-5);

        let up = resample_sig(&signal, 4, 8).unwrap();
        assert_eq!(up.len(), 8);
        assert_abs_diff_eq!(up[4], 3.0f32, epsilon = 1e-5);
    }

    #[test]
    fn test_resample_complex_keeps_negative_frequencies() {
        // A phasor spinning backwards has all its energy in a negative bin
        let up = resample_to_len(&phasor(32, -5.0), 64).unwrap();
        assert_complex_close(&up, &phasor(64, -5.0));

        let down = resample_to_len(&phasor(64, 3.0), 32).unwrap();
        assert_complex_close(&down, &phasor(32, 3.0));

        let same = resample_to_len(&phasor(12, -2.0), 12).unwrap();
        assert_complex_close(&same, &phasor(12, -2.0));
    }

    #[test]
    fn test_resample_complex_matches_real_for_real_values() {
        let real = array![1.0, 2.0, 3.0, 4.0];
        let complex = real.mapv(|v| Complex::new(v, 0.0));

        for num in [2, 3, 8] {
            let expected = resample_to_len(&real, num).unwrap();
            let result = resample_to_len(&complex, num).unwrap();
            for (c, &r) in result.iter().zip(&expected) {
                assert_abs_diff_eq!(c.re, r, epsilon = 1e-12);
                assert_abs_diff_eq!(c.im, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_resample_complex_f32_signal() {
        let signal = array![Complex::new(1.0f32, -1.0), Complex::new(2.0, 0.5)];
        let result = resample_to_len(&signal, 2).unwrap();

        for (r, s) in result.iter().zip(&signal) {
            assert_abs_diff_eq!(r.re, s.re, epsilon = 1e-6);
            assert_abs_diff_eq!(r.im, s.im, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_resample_sig_length_overflow() {
        let signal = array![1.0, 2.0];
        assert!(matches!(
            resample_sig(&signal, 1, usize::MAX),
            Err(SignalError::InvalidParameter { parameter, .. }) if parameter == "target_sr"
        ));
    }
}
