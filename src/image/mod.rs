//! Spectrogram to RGB image conversion
//!
//! Turns a real-valued spectrogram into a three-channel image that image models can
//! consume directly.
//!
//! # Algorithm
//!
//! ```text
//! spec_to_rgb(spec[H, W], (width, height), cmap):
//!
//! 1. norm = (spec - min(spec)) / (max(spec) - min(spec))      values in [0, 1]
//! 2. img  = resize_bicubic(norm, width, height)               [height, width]
//! 3. rgba = cmap(img)                                         [height, width, 4]
//! 4. rgb  = rgba[..., 0..3]                                   [height, width, 3]
//! ```
//!
//! Bicubic interpolation can overshoot `[0, 1]` slightly near sharp edges; the
//! colormap lookup clamps those values to its first and last entries.
//!
//! # Example
//!
//! ```
//! use ndarray::Array2;
//! use sigprep::image::spec_to_rgb;
//!
//! let spec = Array2::from_shape_fn((64, 40), |(f, t)| (f * t) as f64);
//! let rgb = spec_to_rgb(&spec, (128, 96), "viridis").unwrap();
//! assert_eq!(rgb.shape(), &[96, 128, 3]);
//! ```

mod colormap;
mod resize;

pub use colormap::{Colormap, ColormapKind, LUT_SIZE};
pub use resize::resize_bicubic;

use crate::error::{SignalError, SignalResult};
use ndarray::{Array, Array3, ArrayBase, Data, Dimension, Ix2};
use tracing::debug;

/// Output settings for [`spec_to_rgb_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrogramImageOptions {
    /// Output columns.
    pub width: usize,
    /// Output rows.
    pub height: usize,
    /// Colormap applied to the normalized spectrogram.
    pub colormap: Colormap,
}

impl Default for SpectrogramImageOptions {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            colormap: Colormap::default(),
        }
    }
}

impl SpectrogramImageOptions {
    /// Set the output size as `(width, height)`.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_colormap(mut self, colormap: impl Into<Colormap>) -> Self {
        self.colormap = colormap.into();
        self
    }
}

/// Min-max normalize to `[0, 1]`.
///
/// # Errors
///
/// Returns an error if the input is empty, holds non-finite values, or is constant
/// (the value range is zero).
pub fn min_max_normalize<S, D>(values: &ArrayBase<S, D>) -> SignalResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if values.is_empty() {
        return Err(SignalError::InsufficientData {
            required: 1,
            actual: 0,
            context: "min_max_normalize".to_string(),
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(SignalError::NumericalError {
            message: "cannot normalize non-finite values".to_string(),
        });
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if range == 0.0 {
        return Err(SignalError::NumericalError {
            message: format!("cannot normalize constant values (all {min})"),
        });
    }

    Ok(values.mapv(|v| (v - min) / range))
}

/// Convert a spectrogram to a three-channel RGB image.
///
/// # Arguments
///
/// * `spectrogram` - Real-valued 2-D spectrogram
/// * `dsize` - Output size as `(width, height)`
/// * `cmap` - Colormap name, see [`Colormap`]
///
/// # Returns
///
/// Image of shape `[height, width, 3]` with channels in `[0, 1]`.
///
/// # Errors
///
/// Returns an error for an unknown colormap name, a zero output size, or a spectrogram
/// that cannot be normalized (see [`min_max_normalize`]).
pub fn spec_to_rgb<S>(
    spectrogram: &ArrayBase<S, Ix2>,
    dsize: (usize, usize),
    cmap: &str,
) -> SignalResult<Array3<f64>>
where
    S: Data<Elem = f64>,
{
    let options = SpectrogramImageOptions::default()
        .with_size(dsize.0, dsize.1)
        .with_colormap(cmap.parse::<Colormap>()?);
    spec_to_rgb_with(spectrogram, &options)
}

/// [`spec_to_rgb`] with typed options.
pub fn spec_to_rgb_with<S>(
    spectrogram: &ArrayBase<S, Ix2>,
    options: &SpectrogramImageOptions,
) -> SignalResult<Array3<f64>>
where
    S: Data<Elem = f64>,
{
    let normalized = min_max_normalize(spectrogram)?;
    let resized = resize_bicubic(&normalized, options.width, options.height)?;

    debug!(
        from = ?spectrogram.dim(),
        width = options.width,
        height = options.height,
        colormap = %options.colormap,
        "rendering spectrogram"
    );

    let mut rgb = Array3::<f64>::zeros((options.height, options.width, 3));
    for ((row, col), &value) in resized.indexed_iter() {
        let color = options.colormap.rgb(value);
        for (channel, &c) in color.iter().enumerate() {
            rgb[[row, col, channel]] = c;
        }
    }

    Ok(rgb)
}
