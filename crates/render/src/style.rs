//! Visual style for rendered frames.
//!
//! A [`RenderStyle`] bundles the background and stroke colors with the
//! connection threshold and line alpha scaling. Named presets cover the
//! common looks; everything serializes as JSON with colors as hex strings.

use drift_core::{DriftError, Srgb};
use serde::{Deserialize, Serialize};

/// All available style preset names.
const STYLE_NAMES: &[&str] = &["indigo", "ember", "mono"];

/// Default connection distance threshold in surface units.
const DEFAULT_CONNECTION_THRESHOLD: f64 = 100.0;
/// Default alpha of a zero-length connection line.
const DEFAULT_MAX_LINE_ALPHA: f64 = 0.2;

/// Colors and line tuning for one frame of the ambient background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Opaque background the surface is cleared to.
    pub background: Srgb,
    /// Stroke color shared by all connection lines.
    pub stroke: Srgb,
    /// Connections at or beyond this distance are not drawn at all.
    pub connection_threshold: f64,
    /// Alpha of a hypothetical zero-length line; longer lines scale down
    /// linearly to zero at the threshold.
    pub max_line_alpha: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::indigo()
    }
}

impl RenderStyle {
    /// Deep navy background with indigo lines — the canonical look.
    pub fn indigo() -> Self {
        Self {
            background: Srgb::from_hex("#0f172a").expect("indigo background hex is valid"),
            stroke: Srgb::from_hex("#6366f1").expect("indigo stroke hex is valid"),
            connection_threshold: DEFAULT_CONNECTION_THRESHOLD,
            max_line_alpha: DEFAULT_MAX_LINE_ALPHA,
        }
    }

    /// Near-black background with warm amber lines.
    pub fn ember() -> Self {
        Self {
            background: Srgb::from_hex("#1c1410").expect("ember background hex is valid"),
            stroke: Srgb::from_hex("#f59e0b").expect("ember stroke hex is valid"),
            connection_threshold: DEFAULT_CONNECTION_THRESHOLD,
            max_line_alpha: DEFAULT_MAX_LINE_ALPHA,
        }
    }

    /// Charcoal background with gray lines.
    pub fn mono() -> Self {
        Self {
            background: Srgb::from_hex("#111111").expect("mono background hex is valid"),
            stroke: Srgb::from_hex("#9ca3af").expect("mono stroke hex is valid"),
            connection_threshold: DEFAULT_CONNECTION_THRESHOLD,
            max_line_alpha: DEFAULT_MAX_LINE_ALPHA,
        }
    }

    /// Constructs a style preset by name.
    ///
    /// Returns `DriftError::UnknownStyle` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, DriftError> {
        match name {
            "indigo" => Ok(Self::indigo()),
            "ember" => Ok(Self::ember()),
            "mono" => Ok(Self::mono()),
            _ => Err(DriftError::UnknownStyle(name.to_string())),
        }
    }

    /// Returns a slice of all recognized preset names.
    pub fn list_names() -> &'static [&'static str] {
        STYLE_NAMES
    }

    /// The alpha a connection line of the given length is drawn with:
    /// `(threshold − distance) / threshold · max_line_alpha`.
    ///
    /// Returns `None` at or beyond the threshold — such pairs cost no draw
    /// call at all rather than fading to an invisible line.
    pub fn line_alpha(&self, distance: f64) -> Option<f64> {
        if distance >= self.connection_threshold {
            return None;
        }
        let falloff = (self.connection_threshold - distance) / self.connection_threshold;
        Some(falloff * self.max_line_alpha)
    }
}
