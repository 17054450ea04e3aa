//! Bicubic image resizing.
//!
//! Separable cubic convolution with the Keys kernel (`a = -0.75`) and pixel-center
//! alignment, so that pixel `d` of the output samples source coordinate
//!
//! ```text
//! s = (d + 0.5) * (src_len / dst_len) - 0.5
//! ```
//!
//! The four taps around `s` are clamped to the image (replicated border). Resizing to
//! the source size is the identity.

use crate::error::{SignalError, SignalResult};
use ndarray::{Array2, ArrayBase, Data, Ix2};

const CUBIC_A: f64 = -0.75;

/// Cubic convolution weights for fractional offset `t` in `[0, 1)`.
///
/// Weight `k` applies to the tap at `floor(s) + k - 1`.
fn cubic_weights(t: f64) -> [f64; 4] {
    let a = CUBIC_A;
    let w0 = ((a * (t + 1.0) - 5.0 * a) * (t + 1.0) + 8.0 * a) * (t + 1.0) - 4.0 * a;
    let w1 = ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0;
    let w2 = ((a + 2.0) * (1.0 - t) - (a + 3.0)) * (1.0 - t) * (1.0 - t) + 1.0;
    let w3 = 1.0 - w0 - w1 - w2;
    [w0, w1, w2, w3]
}

/// Source taps and weights for every output position along one axis.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<([usize; 4], [f64; 4])> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len as isize - 1;

    (0..dst_len)
        .map(|d| {
            let s = (d as f64 + 0.5) * scale - 0.5;
            let base = s.floor();
            let weights = cubic_weights(s - base);

            let base = base as isize;
            let mut taps = [0usize; 4];
            for (k, tap) in taps.iter_mut().enumerate() {
                *tap = (base + k as isize - 1).clamp(0, last) as usize;
            }
            (taps, weights)
        })
        .collect()
}

/// Resize a 2-D image to `width` columns by `height` rows.
///
/// # Errors
///
/// Returns an error if the target size is zero or the image is empty.
pub fn resize_bicubic<S>(
    image: &ArrayBase<S, Ix2>,
    width: usize,
    height: usize,
) -> SignalResult<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    if width == 0 || height == 0 {
        return Err(SignalError::InvalidParameter {
            parameter: "dsize".to_string(),
            message: format!("output size must be positive, got {width}x{height}"),
        });
    }

    let (src_h, src_w) = image.dim();
    if src_h == 0 || src_w == 0 {
        return Err(SignalError::InsufficientData {
            required: 1,
            actual: 0,
            context: "resize_bicubic".to_string(),
        });
    }

    let col_taps = axis_taps(src_w, width);
    let row_taps = axis_taps(src_h, height);

    // Horizontal pass: [src_h, width]
    let mut horizontal = Array2::<f64>::zeros((src_h, width));
    for (mut out_row, src_row) in horizontal.rows_mut().into_iter().zip(image.rows()) {
        for (out, (taps, weights)) in out_row.iter_mut().zip(&col_taps) {
            *out = taps
                .iter()
                .zip(weights)
                .map(|(&tap, &w)| w * src_row[tap])
                .sum();
        }
    }

    // Vertical pass: [height, width]
    let mut output = Array2::<f64>::zeros((height, width));
    for (mut out_row, (taps, weights)) in output.rows_mut().into_iter().zip(&row_taps) {
        for (c, out) in out_row.iter_mut().enumerate() {
            *out = taps
                .iter()
                .zip(weights)
                .map(|(&tap, &w)| w * horizontal[[tap, c]])
                .sum();
        }
    }

    Ok(output)
}
