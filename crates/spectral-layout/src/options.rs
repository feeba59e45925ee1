use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const LAYOUT_NAME: &str = "Spectral Spatialisation (Signed Graph Laplacian)";

pub const DEFAULT_WEIGHT_ATTRIBUTE: &str = "weight";
pub const DEFAULT_SIGN_ATTRIBUTE: &str = "sign";
pub const DEFAULT_SCALE: f64 = 1.0;
/// Relative magnitude below which an eigenvalue counts as the trivial zero eigenvalue.
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-9;

/// Run parameters of a spectral layout.
///
/// Deserialises from camelCase JSON (`weightAttributeName`, `thirdComponent`, ...); every key is
/// optional. Values coming from JSON or the setters are normalised the same way: a non-positive
/// `scale` falls back to `1.0`, and an invalid `zeroTolerance` to [`DEFAULT_ZERO_TOLERANCE`].
/// The layout entry points apply the same normalisation to fields assigned directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpectralOptions {
    pub weight_attribute_name: String,
    pub weight_ignore: bool,
    pub sign_attribute_name: String,
    pub sign_ignore: bool,
    pub scale: f64,
    /// Blend coefficient of the third eigenvector into `x`.
    pub third_component: f64,
    /// Blend coefficient of the fourth eigenvector into `y`.
    pub fourth_component: f64,
    /// Eigenvalues with `|v| <= zero_tolerance * max(1, largest weighted degree)` count as zero.
    /// `0.0` skips only eigenvalues that are exactly zero.
    pub zero_tolerance: f64,
    /// Iteration cap for the eigensolver; `0` means unbounded.
    pub max_iterations: usize,
}

impl Default for SpectralOptions {
    fn default() -> Self {
        Self {
            weight_attribute_name: DEFAULT_WEIGHT_ATTRIBUTE.to_string(),
            weight_ignore: false,
            sign_attribute_name: DEFAULT_SIGN_ATTRIBUTE.to_string(),
            sign_ignore: false,
            scale: DEFAULT_SCALE,
            third_component: 0.0,
            fourth_component: 0.0,
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            max_iterations: 0,
        }
    }
}

impl SpectralOptions {
    pub fn from_value(value: Value) -> Result<Self> {
        let opts: Self = serde_json::from_value(value).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })?;
        Ok(opts.normalized())
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(text).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })?;
        Ok(opts.normalized())
    }

    pub fn normalized(mut self) -> Self {
        let scale = self.scale;
        self.set_scale(scale);
        let tol = self.zero_tolerance;
        self.set_zero_tolerance(tol);
        self
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            DEFAULT_SCALE
        };
    }

    pub fn set_zero_tolerance(&mut self, tolerance: f64) {
        self.zero_tolerance = if tolerance.is_finite() && tolerance >= 0.0 {
            tolerance
        } else {
            DEFAULT_ZERO_TOLERANCE
        };
    }

    /// Restores the numeric parameters; attribute names and ignore flags are kept.
    pub fn reset(&mut self) {
        self.scale = DEFAULT_SCALE;
        self.third_component = 0.0;
        self.fourth_component = 0.0;
    }
}
