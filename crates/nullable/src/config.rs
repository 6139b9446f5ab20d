use crate::{error::NullError, layout, layout::TimeLayout, scan::ScanValue, types::Float64};
use serde::Deserialize;
use thiserror::Error as ThisError;

const DEFAULT_FLOAT_PRECISION: u32 = 2;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid time layout: {0}")]
    Layout(#[from] NullError),
}

///
/// NullConfig
///
/// Deployment settings for the nullable types, read from TOML.
/// Missing keys fall back to the canonical layout and two fraction digits.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NullConfig {
    pub time_layout: String,
    pub float_precision: u32,
}

impl NullConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;

        // surface a bad layout at load time, not on first use
        config.layout()?;
        tracing::debug!(
            time_layout = %config.time_layout,
            float_precision = config.float_precision,
            "loaded nullable config"
        );

        Ok(config)
    }

    pub fn layout(&self) -> Result<TimeLayout, ConfigError> {
        Ok(TimeLayout::parse(&self.time_layout)?)
    }

    /// Coerce `src` into a `Float64` at the configured precision.
    pub fn float<'a>(&self, src: impl Into<ScanValue<'a>>) -> Result<Float64, NullError> {
        Float64::new(src, self.float_precision)
    }

    #[must_use]
    pub const fn null_float(&self) -> Float64 {
        Float64::null(self.float_precision)
    }
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            time_layout: layout::RFC3339.to_string(),
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }
}

///
/// TESTS
///
