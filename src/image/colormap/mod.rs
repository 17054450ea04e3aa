//! Perceptual colormaps for spectrogram rendering.
//!
//! Each map is a 256-entry lookup table. A value `x` in `[0, 1]` selects entry
//! `floor(x * 256)`, clamped to `[0, 255]`; NaN selects the transparent "bad" color.
//! The four perceptual maps use the published 256-color tables; `gray` ramps linearly
//! from black to white.
//!
//! | Name      | Description                          |
//! |-----------|--------------------------------------|
//! | `viridis` | Blue-green-yellow, default           |
//! | `plasma`  | Blue-magenta-yellow                  |
//! | `inferno` | Black-red-yellow                     |
//! | `magma`   | Black-purple-cream                   |
//! | `gray`    | Black-white (`grey` also accepted)   |
//!
//! Appending `_r` to any name reverses the map.

mod tables;

use crate::error::SignalError;
use std::fmt;
use std::str::FromStr;

/// Number of entries in every colormap lookup table.
pub const LUT_SIZE: usize = 256;

/// Base color scheme of a [`Colormap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColormapKind {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Gray,
}

impl ColormapKind {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Gray => "gray",
        }
    }

    /// Lookup table, or `None` for the computed gray ramp.
    fn table(&self) -> Option<&'static [[f64; 3]; LUT_SIZE]> {
        match self {
            Self::Viridis => Some(&tables::VIRIDIS),
            Self::Plasma => Some(&tables::PLASMA),
            Self::Inferno => Some(&tables::INFERNO),
            Self::Magma => Some(&tables::MAGMA),
            Self::Gray => None,
        }
    }
}

/// A named colormap, optionally reversed.
///
/// Parse one from its name with [`str::parse`]:
///
/// ```
/// use sigprep::image::{Colormap, ColormapKind};
///
/// let cmap: Colormap = "magma_r".parse().unwrap();
/// assert_eq!(cmap.kind(), ColormapKind::Magma);
/// assert!(cmap.is_reversed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colormap {
    kind: ColormapKind,
    reversed: bool,
}

impl Colormap {
    pub fn new(kind: ColormapKind) -> Self {
        Self {
            kind,
            reversed: false,
        }
    }

    /// The same scheme, running in the opposite direction.
    pub fn reversed(self) -> Self {
        Self {
            reversed: !self.reversed,
            ..self
        }
    }

    pub fn kind(&self) -> ColormapKind {
        self.kind
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Lookup-table index selected by `x`. NaN has no entry.
    pub fn index(&self, x: f64) -> Option<usize> {
        if x.is_nan() {
            return None;
        }
        let scaled = (x * LUT_SIZE as f64).floor();
        let index = if scaled <= 0.0 {
            0
        } else if scaled >= (LUT_SIZE - 1) as f64 {
            LUT_SIZE - 1
        } else {
            scaled as usize
        };
        Some(index)
    }

    /// Color of lookup-table entry `index` as RGB in `[0, 1]`.
    pub fn entry(&self, index: usize) -> [f64; 3] {
        let index = index.min(LUT_SIZE - 1);
        let index = if self.reversed {
            LUT_SIZE - 1 - index
        } else {
            index
        };

        match self.kind.table() {
            Some(table) => table[index],
            None => [index as f64 / (LUT_SIZE - 1) as f64; 3],
        }
    }

    /// Map `x` to RGBA in `[0, 1]`. NaN maps to transparent black.
    pub fn rgba(&self, x: f64) -> [f64; 4] {
        match self.index(x) {
            Some(index) => {
                let [r, g, b] = self.entry(index);
                [r, g, b, 1.0]
            }
            None => [0.0; 4],
        }
    }

    /// Map `x` to RGB in `[0, 1]`, dropping alpha.
    pub fn rgb(&self, x: f64) -> [f64; 3] {
        let [r, g, b, _] = self.rgba(x);
        [r, g, b]
    }
}

impl From<ColormapKind> for Colormap {
    fn from(kind: ColormapKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reversed {
            write!(f, "{}_r", self.kind.name())
        } else {
            write!(f, "{}", self.kind.name())
        }
    }
}

impl FromStr for Colormap {
    type Err = SignalError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };

        let kind = match base {
            "viridis" => ColormapKind::Viridis,
            "plasma" => ColormapKind::Plasma,
            "inferno" => ColormapKind::Inferno,
            "magma" => ColormapKind::Magma,
            "gray" | "grey" => ColormapKind::Gray,
            _ => {
                return Err(SignalError::UnknownColormap {
                    name: name.to_string(),
                })
            }
        };

        Ok(Self { kind, reversed })
    }
}
