//! Discrete Fourier transform along the last axis.
//!
//! Uses rustfft's planner, so any length is supported (mixed radix, Bluestein for
//! large primes). The transform is unnormalized:
//!
//! ```text
//! X[k] = sum_{n=0}^{N-1} x[n] * exp(-2*pi*i*k*n / N)
//! ```

use crate::error::{SignalError, SignalResult};
use crate::signal::last_axis;
use ndarray::{Array, ArrayBase, Data, Dimension};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Compute the one-dimensional DFT of every lane along the last axis.
///
/// # Arguments
///
/// * `signal` - Real or complex signal of shape [..., N]
///
/// # Returns
///
/// Complex spectrum of shape [..., N].
///
/// # Errors
///
/// Returns an error if `signal` has no axes or its last axis is empty.
pub fn fft<A, S, D>(signal: &ArrayBase<S, D>) -> SignalResult<Array<Complex<f64>, D>>
where
    A: Copy + Into<Complex<f64>>,
    S: Data<Elem = A>,
    D: Dimension,
{
    let axis = last_axis(signal, "fft")?;
    let n = signal.len_of(axis);
    if n == 0 {
        return Err(SignalError::InsufficientData {
            required: 1,
            actual: 0,
            context: "fft".to_string(),
        });
    }

    let mut planner = FftPlanner::<f64>::new();
    let plan = planner.plan_fft_forward(n);

    let mut spectrum: Array<Complex<f64>, D> = signal.mapv(Into::into);
    let mut buffer = vec![Complex::new(0.0, 0.0); n];

    for mut lane in spectrum.lanes_mut(axis) {
        for (dst, src) in buffer.iter_mut().zip(lane.iter()) {
            *dst = *src;
        }
        plan.process(&mut buffer);
        for (dst, src) in lane.iter_mut().zip(&buffer) {
            *dst = *src;
        }
    }

    Ok(spectrum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr0, array, Array1, Array2};
    use std::f64::consts::PI;

    fn naive_dft(x: &[Complex<f64>]) -> Vec<Complex<f64>> {
        let n = x.len();
        (0..n)
            .map(|k| {
                x.iter()
                    .enumerate()
                    .map(|(t, &v)| {
                        let angle = -2.0 * PI * (k * t) as f64 / n as f64;
                        v * Complex::new(angle.cos(), angle.sin())
                    })
                    .sum()
            })
            .collect()
    }

    fn assert_spectra_close(got: &[Complex<f64>], expected: &[Complex<f64>]) {
        assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(expected) {
            assert_abs_diff_eq!(g.re, e.re, epsilon = 1e-9);
            assert_abs_diff_eq!(g.im, e.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fft_impulse() {
        let signal = array![1.0, 0.0, 0.0, 0.0];
        let spectrum = fft(&signal).unwrap();

        for value in spectrum.iter() {
            assert_abs_diff_eq!(value.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(value.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fft_constant() {
        let signal = Array1::from_elem(5, 1.0);
        let spectrum = fft(&signal).unwrap();

        assert_abs_diff_eq!(spectrum[0].re, 5.0, epsilon = 1e-12);
        for value in spectrum.iter().skip(1) {
            assert_abs_diff_eq!(value.norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fft_matches_direct_dft() {
        // Non power-of-two lengths
        for n in [6usize, 7, 12] {
            let signal: Array1<Complex<f64>> = (0..n)
                .map(|t| Complex::new((t as f64 * 0.7).sin(), (t as f64 * 0.3).cos()))
                .collect();
            let spectrum = fft(&signal).unwrap();
            let expected = naive_dft(signal.as_slice().unwrap());

            assert_spectra_close(spectrum.as_slice().unwrap(), &expected);
        }
    }

    #[test]
    fn test_fft_batched_lanes() {
        let signal = Array2::from_shape_fn((3, 8), |(b, t)| ((b + 1) * t) as f64);
        let spectrum = fft(&signal).unwrap();
        assert_eq!(spectrum.shape(), &[3, 8]);

        for b in 0..3 {
            let lane: Vec<Complex<f64>> = signal.row(b).iter().map(|&v| v.into()).collect();
            let expected = naive_dft(&lane);
            let got: Vec<Complex<f64>> = spectrum.row(b).to_vec();
            assert_spectra_close(&got, &expected);
        }
    }

    #[test]
    fn test_fft_rejects_empty() {
        let signal = Array1::<f64>::zeros(0);
        assert!(matches!(
            fft(&signal),
            Err(SignalError::InsufficientData { .. })
        ));
        assert!(fft(&arr0(1.0)).is_err());
    }
}
