//! sigprep - Signal Preparation for Time-Series and Audio ML Pipelines
//!
//! sigprep provides small, stateless transforms that get one-dimensional signals ready
//! for machine-learning models: fixed-stride windowing, resampling, amplitude scaling,
//! complex-to-real reduction, the discrete Fourier transform, and spectrogram-to-image
//! conversion. Every function is an independent transform over an in-memory `ndarray`
//! array; there is no global state.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        sigprep                           │
//! │   windowing (zero-copy views)   signal   image           │
//! └──────────────┬───────────────────────┬───────────────────┘
//!                │ uses                  │ uses
//! ┌──────────────▼──────────┐  ┌─────────▼────────────────────┐
//! │        ndarray          │  │          rustfft             │
//! │ (arrays, views, lanes)  │  │  (mixed-radix FFT planner)   │
//! └─────────────────────────┘  └──────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`windowing`] - Sliding windows over the last axis, as a view that borrows the signal
//! - [`signal`] - Resampling, amplification, complex-to-real, FFT
//! - [`image`] - Spectrogram normalization, bicubic resize, colormaps, RGB conversion
//! - [`error`] - Error and result types
//!
//! # Logging
//!
//! Diagnostics are emitted through `tracing`; install a subscriber in the application
//! to see them. The windowing diagnostic is a WARN event, transform sizes are DEBUG.
//!
//! # Example
//!
//! ```
//! use ndarray::Array1;
//! use sigprep::{amplify, resample_sig, sliding_window_cpu};
//!
//! // One second of a 100 Hz signal, resampled to 64 Hz
//! let signal = Array1::from_iter((0..100).map(|t| (t as f64 * 0.1).sin()));
//! let resampled = resample_sig(&signal, 100, 64).unwrap();
//! let scaled = amplify(&resampled, 0.5);
//!
//! // 16-sample windows, 8 samples apart
//! let windows = sliding_window_cpu(&scaled, 16, 8, true).unwrap();
//! assert_eq!(windows.shape(), vec![(64 - 16 + 1) / 8, 16]);
//!
//! for window in windows.iter() {
//!     assert_eq!(window.len(), 16);
//! }
//! ```

pub mod error;
pub mod image;
pub mod signal;
pub mod windowing;

// Re-export main types for convenience
pub use error::{SignalError, SignalResult};
pub use image::{
    min_max_normalize, resize_bicubic, spec_to_rgb, spec_to_rgb_with, Colormap, ColormapKind,
    SpectrogramImageOptions,
};
pub use signal::{
    amplify, complex_to_real, fft, resample_sig, resample_to_len, RealPart, ResampleElement,
};
pub use windowing::{num_windows, sliding_window_cpu, try_sliding_window, SlidingWindows};

// Re-export the array and complex types used throughout the API
pub use ndarray;
pub use rustfft::num_complex::{Complex, Complex32, Complex64};
