//! Error types for signal preparation operations.

use std::fmt;

/// Result type for signal preparation operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors that can occur while preparing a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalError {
    /// Window length and stride cannot be laid over the signal.
    InvalidWindowParameters {
        window_size: usize,
        stride: usize,
        signal_len: usize,
        reason: String,
    },

    /// Input array is too small for the requested operation.
    InsufficientData {
        required: usize,
        actual: usize,
        context: String,
    },

    /// Numerical computation cannot produce a finite result.
    NumericalError { message: String },

    /// Invalid parameter value.
    InvalidParameter {
        parameter: String,
        message: String,
    },

    /// Colormap name is not known.
    UnknownColormap { name: String },
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWindowParameters {
                window_size,
                stride,
                signal_len,
                reason,
            } => {
                write!(
                    f,
                    "Invalid sliding window (window_size={}, stride={}, signal_len={}): {}",
                    window_size, stride, signal_len, reason
                )
            }
            Self::InsufficientData {
                required,
                actual,
                context,
            } => {
                write!(
                    f,
                    "Insufficient data for {}: need at least {}, got {}",
                    context, required, actual
                )
            }
            Self::NumericalError { message } => {
                write!(f, "Numerical error: {}", message)
            }
            Self::InvalidParameter { parameter, message } => {
                write!(f, "Invalid parameter '{}': {}", parameter, message)
            }
            Self::UnknownColormap { name } => {
                write!(f, "Unknown colormap '{}'", name)
            }
        }
    }
}

impl std::error::Error for SignalError {}
