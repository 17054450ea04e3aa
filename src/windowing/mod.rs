//! Fixed-stride windowing over the last axis of a signal
//!
//! This module lays consecutive fixed-length windows over a signal without copying
//! it. The result is a [`SlidingWindows`] view that borrows the signal and translates
//! window indices into signal indices on access.
//!
//! # Algorithm
//!
//! ```text
//! sliding_window(signal[..., L], window_size, stride):
//!
//! 1. Validate:
//!    - signal has at least one axis
//!    - window_size >= 1, stride >= 1
//!    - window_size <= L, stride <= window_size
//!
//! 2. num_windows = (L - window_size + 1) / stride   (floor division)
//!
//! 3. View shape: [..., num_windows, window_size]
//!    view[..., i, j] = signal[..., i * stride + j]
//! ```
//!
//! Trailing samples that do not fill a whole window are dropped. Building the view is
//! O(1) in time and memory regardless of `L`.
//!
//! # Failure Policy
//!
//! [`sliding_window_cpu`] never panics and never returns an error: invalid parameters
//! yield `None`, so batch callers can check and skip. With `verbose` set, the cause is
//! reported as a `tracing` warning first. Use [`try_sliding_window`] to get the cause
//! as a [`SignalError`] instead.
//!
//! # Example
//!
//! ```
//! use ndarray::Array1;
//! use sigprep::windowing::sliding_window_cpu;
//!
//! let signal = Array1::from_iter((0..10).map(|x| x as f64));
//! let windows = sliding_window_cpu(&signal, 4, 2, true).unwrap();
//!
//! assert_eq!(windows.shape(), vec![3, 4]);
//! assert_eq!(windows.window(&[], 2).unwrap().to_vec(), vec![4.0, 5.0, 6.0, 7.0]);
//!
//! // Window larger than the signal: no result, no panic.
//! assert!(sliding_window_cpu(&signal, 20, 1, false).is_none());
//! ```

mod view;

pub use view::{SlidingWindows, Windows};

use crate::error::{SignalError, SignalResult};
use ndarray::{ArrayBase, Axis, Data, Dimension};
use tracing::warn;

fn invalid(window_size: usize, stride: usize, signal_len: usize, reason: &str) -> SignalError {
    SignalError::InvalidWindowParameters {
        window_size,
        stride,
        signal_len,
        reason: reason.to_string(),
    }
}

/// Number of whole windows of `window_size` samples, `stride` apart, in a signal of
/// `signal_len` samples.
///
/// # Errors
///
/// Returns [`SignalError::InvalidWindowParameters`] if either length is zero, the window
/// is longer than the signal, or the stride is longer than the window.
pub fn num_windows(signal_len: usize, window_size: usize, stride: usize) -> SignalResult<usize> {
    if window_size == 0 {
        return Err(invalid(
            window_size,
            stride,
            signal_len,
            "window size must be positive",
        ));
    }
    if stride == 0 {
        return Err(invalid(
            window_size,
            stride,
            signal_len,
            "stride must be positive",
        ));
    }
    if window_size > signal_len {
        return Err(invalid(
            window_size,
            stride,
            signal_len,
            "window size is bigger than the data",
        ));
    }
    if stride > window_size {
        return Err(invalid(
            window_size,
            stride,
            signal_len,
            "stride is bigger than the window size",
        ));
    }

    Ok((signal_len - window_size + 1) / stride)
}

/// Build a sliding-window view over the last axis of `signal`.
///
/// Same validation as [`sliding_window_cpu`], but the failure is returned as an error.
///
/// # Errors
///
/// Returns [`SignalError::InvalidWindowParameters`] if the signal has no axes or the
/// window parameters do not fit it (see [`num_windows`]).
pub fn try_sliding_window<'a, A, S, D>(
    signal: &'a ArrayBase<S, D>,
    window_size: usize,
    stride: usize,
) -> SignalResult<SlidingWindows<'a, A>>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    let ndim = signal.ndim();
    if ndim == 0 {
        return Err(invalid(
            window_size,
            stride,
            0,
            "signal has no time axis",
        ));
    }

    let signal_len = signal.len_of(Axis(ndim - 1));
    let count = num_windows(signal_len, window_size, stride)?;

    Ok(SlidingWindows::new(
        signal.view().into_dyn(),
        window_size,
        stride,
        count,
    ))
}

/// Build a sliding-window view over the last axis of `signal`.
///
/// # Arguments
///
/// * `signal` - Signal of shape `[..., L]`; leading axes are batch axes
/// * `window_size` - Samples per window
/// * `stride` - Samples between the starts of consecutive windows
/// * `verbose` - Emit a warning describing the cause when no view can be built
///
/// # Returns
///
/// A view of shape `[..., (L - window_size + 1) / stride, window_size]` sharing the
/// signal's storage, or `None` if the parameters are invalid.
pub fn sliding_window_cpu<'a, A, S, D>(
    signal: &'a ArrayBase<S, D>,
    window_size: usize,
    stride: usize,
    verbose: bool,
) -> Option<SlidingWindows<'a, A>>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    match try_sliding_window(signal, window_size, stride) {
        Ok(windows) => Some(windows),
        Err(err) => {
            if verbose {
                warn!(
                    window_size,
                    stride,
                    error = %err,
                    "error in sliding window instance, returning None"
                );
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, s, Array1, Array2};
    use rustfft::num_complex::Complex;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn ramp(len: usize) -> Array1<f64> {
        Array1::from_iter((0..len).map(|x| x as f64))
    }

    #[test]
    fn test_num_windows() {
        assert_eq!(num_windows(10, 4, 2).unwrap(), 3);
        assert_eq!(num_windows(10, 4, 4).unwrap(), 1);
        assert_eq!(num_windows(10, 10, 1).unwrap(), 1);
        assert_eq!(num_windows(10, 1, 1).unwrap(), 10);

        // Stride longer than the leftover span: valid, but no whole window
        assert_eq!(num_windows(10, 8, 4).unwrap(), 0);
    }

    #[test]
    fn test_overlapping_windows() {
        let signal = ramp(10);
        let windows = sliding_window_cpu(&signal, 4, 2, false).unwrap();

        assert_eq!(windows.shape(), vec![3, 4]);
        assert_eq!(windows.num_windows(), 3);
        assert_eq!(windows.window(&[], 0).unwrap().to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(windows.window(&[], 1).unwrap().to_vec(), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(windows.window(&[], 2).unwrap().to_vec(), vec![4.0, 5.0, 6.0, 7.0]);
        assert!(windows.window(&[], 3).is_none());
    }

    #[test]
    fn test_disjoint_windows() {
        let signal = ramp(10);
        let windows = sliding_window_cpu(&signal, 4, 4, false).unwrap();

        assert_eq!(windows.shape(), vec![1, 4]);
        assert_eq!(windows.window(&[], 0).unwrap().to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_window_contents_match_signal() {
        for len in 1..=12 {
            let signal = ramp(len);
            for window_size in 1..=len {
                for stride in 1..=window_size {
                    let windows = sliding_window_cpu(&signal, window_size, stride, false).unwrap();
                    let expected = (len - window_size + 1) / stride;
                    assert_eq!(windows.num_windows(), expected);

                    for i in 0..expected {
                        let window = windows.window(&[], i).unwrap();
                        assert_eq!(window.len(), window_size);
                        for j in 0..window_size {
                            assert_eq!(window[j], signal[i * stride + j]);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_window_larger_than_signal() {
        let signal = ramp(10);
        assert!(sliding_window_cpu(&signal, 20, 1, false).is_none());
        assert!(sliding_window_cpu(&signal, 11, 1, false).is_none());
    }

    #[test]
    fn test_zero_stride() {
        let signal = ramp(10);
        assert!(sliding_window_cpu(&signal, 4, 0, false).is_none());
    }

    #[test]
    fn test_zero_window() {
        let signal = ramp(10);
        assert!(sliding_window_cpu(&signal, 0, 1, false).is_none());
    }

    #[test]
    fn test_stride_larger_than_window() {
        let signal = ramp(10);
        assert!(sliding_window_cpu(&signal, 2, 3, false).is_none());
    }

    #[test]
    fn test_scalar_signal() {
        let signal = arr0(1.0);
        assert!(sliding_window_cpu(&signal, 1, 1, false).is_none());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` under a subscriber that records formatted events.
    fn capture_log(f: impl FnOnce()) -> String {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = log.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_quiet_failure_logs_nothing() {
        let signal = ramp(10);
        let output = capture_log(|| {
            assert!(sliding_window_cpu(&signal, 20, 1, false).is_none());
            assert!(sliding_window_cpu(&signal, 4, 5, false).is_none());
        });

        assert!(output.is_empty(), "unexpected output: {output}");
    }

    #[test]
    fn test_verbose_failure_logs_cause() {
        let signal = ramp(10);

        let output = capture_log(|| {
            assert!(sliding_window_cpu(&signal, 20, 1, true).is_none());
        });
        assert!(output.contains("WARN"), "missing level: {output}");
        assert!(output.contains("window size is bigger than the data"), "{output}");
        assert!(output.contains("window_size=20"), "{output}");

        let output = capture_log(|| {
            assert!(sliding_window_cpu(&signal, 4, 5, true).is_none());
        });
        assert!(output.contains("stride is bigger than the window size"), "{output}");
    }

    #[test]
    fn test_verbose_success_logs_nothing() {
        let signal = ramp(10);
        let output = capture_log(|| {
            assert!(sliding_window_cpu(&signal, 4, 2, true).is_some());
        });

        assert!(output.is_empty(), "unexpected output: {output}");
    }

    #[test]
    fn test_try_sliding_window_reports_cause() {
        let signal = ramp(10);

        match try_sliding_window(&signal, 20, 1) {
            Err(SignalError::InvalidWindowParameters {
                window_size,
                stride,
                signal_len,
                reason,
            }) => {
                assert_eq!((window_size, stride, signal_len), (20, 1, 10));
                assert!(reason.contains("bigger than the data"));
            }
            other => panic!("expected InvalidWindowParameters, got {:?}", other),
        }

        match try_sliding_window(&signal, 4, 0) {
            Err(SignalError::InvalidWindowParameters { reason, .. }) => {
                assert!(reason.contains("stride"));
            }
            other => panic!("expected InvalidWindowParameters, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_calls_agree() {
        let signal = ramp(16);
        let first = sliding_window_cpu(&signal, 5, 3, false).unwrap();
        let second = sliding_window_cpu(&signal, 5, 3, false).unwrap();

        assert_eq!(first.to_array(), second.to_array());
    }

    #[test]
    fn test_batched_signal() {
        let signal = Array2::from_shape_fn((2, 10), |(b, t)| (b * 100 + t) as f64);
        let windows = sliding_window_cpu(&signal, 4, 2, false).unwrap();

        assert_eq!(windows.shape(), vec![2, 3, 4]);
        assert_eq!(windows.batch_shape(), &[2]);
        assert_eq!(
            windows.window(&[1], 1).unwrap().to_vec(),
            vec![102.0, 103.0, 104.0, 105.0]
        );
        assert!(windows.window(&[2], 0).is_none());
        assert!(windows.window(&[], 0).is_none());
    }

    #[test]
    fn test_strided_signal() {
        let base = ramp(20);
        let every_other = base.slice(s![..;2]);
        let windows = sliding_window_cpu(&every_other, 3, 2, false).unwrap();

        assert_eq!(windows.num_windows(), 4);
        assert_eq!(windows.window(&[], 1).unwrap().to_vec(), vec![4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_complex_signal() {
        let signal = Array1::from_iter((0..6).map(|x| Complex::new(x as f64, -(x as f64))));
        let windows = sliding_window_cpu(&signal, 2, 2, false).unwrap();

        assert_eq!(windows.num_windows(), 2);
        assert_eq!(windows.window(&[], 1).unwrap()[0], Complex::new(2.0, -2.0));
    }
}
