use std::path::PathBuf;

use thiserror::Error;

use crate::animation::{ScrollClock, DEFAULT_INTERVAL_MS, DEFAULT_STEP};
use crate::border::Border;
use crate::color::{palette, parse_color};
use crate::sizing::{Theme, VariantSet};
use crate::tiling::TilingPolicy;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`MarqueeConfig`].
    #[cfg(feature = "toml")]
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Marquee settings, typically from a `pipe_strip.toml` file.
///
/// All fields are optional; accessors supply the defaults.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarqueeConfig {
    /// Wrap/repeat level, 0-3.
    pub cyclic: Option<u8>,
    pub theme: Option<Theme>,
    /// Directory holding the `.ans` artwork.
    pub asset_dir: Option<PathBuf>,
    pub tick_ms: Option<u32>,
    pub tick_step: Option<f64>,
    pub border_ink: Option<String>,
    pub border_paper: Option<String>,
}

impl MarqueeConfig {
    /// Parse a TOML string into `MarqueeConfig`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML config file.
    #[cfg(feature = "toml")]
    pub fn from_toml_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
        Self::from_toml_str(&text)
    }

    /// Tiling policy; levels above 3 clamp to 3.
    pub fn tiling_policy(&self) -> TilingPolicy {
        TilingPolicy::from_level(self.cyclic.unwrap_or(0))
    }

    pub fn theme(&self) -> Theme {
        self.theme.unwrap_or_default()
    }

    /// Artwork paths for the configured theme. Defaults to `resources/`.
    pub fn variant_paths(&self) -> VariantSet {
        let dir = self
            .asset_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("resources"));
        VariantSet::for_theme(self.theme(), dir)
    }

    /// Scroll clock with the configured step and period.
    pub fn scroll_clock(&self) -> ScrollClock {
        ScrollClock::new(self.tick_step.unwrap_or(DEFAULT_STEP))
            .with_interval_ms(self.tick_ms.unwrap_or(DEFAULT_INTERVAL_MS))
    }

    /// Seam colors. Missing or invalid values fall back to pen on paper.
    pub fn border(&self) -> Border {
        let ink = self
            .border_ink
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(palette::PEN);
        let paper = self
            .border_paper
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(palette::PAPER);
        Border::new(ink, paper)
    }
}
