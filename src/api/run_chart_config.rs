use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Legend overlay settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Adds `dlt`, `max` and `min` rows below the current value.
    #[serde(default)]
    pub details: bool,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            details: false,
        }
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so host applications can keep panel setup in their own
/// config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunChartConfig {
    pub title: String,
    /// Fraction digits used for every rendered value.
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Expected interval between samples; fixes the time per grid division.
    pub refresh_rate_ms: u64,
    #[serde(default)]
    pub legend: LegendConfig,
    /// Lookback kept beyond the visible window before points are evicted.
    #[serde(default = "default_retention_reserve_minutes")]
    pub retention_reserve_minutes: u32,
}

impl RunChartConfig {
    #[must_use]
    pub fn new(title: impl Into<String>, precision: usize, refresh_rate_ms: u64) -> Self {
        Self {
            title: title.into(),
            precision,
            refresh_rate_ms,
            legend: LegendConfig::default(),
            retention_reserve_minutes: default_retention_reserve_minutes(),
        }
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_retention_reserve_minutes(mut self, minutes: u32) -> Self {
        self.retention_reserve_minutes = minutes;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.refresh_rate_ms == 0 || self.refresh_rate_ms > MAX_REFRESH_RATE_MS {
            return Err(ChartError::InvalidConfig(format!(
                "refresh rate must be in 1..={MAX_REFRESH_RATE_MS} ms, got {}",
                self.refresh_rate_ms
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(ChartError::InvalidConfig(format!(
                "precision must be <= {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

const MAX_REFRESH_RATE_MS: u64 = 24 * 60 * 60 * 1_000;
const MAX_PRECISION: usize = 16;

fn default_true() -> bool {
    true
}

fn default_precision() -> usize {
    1
}

fn default_retention_reserve_minutes() -> u32 {
    20
}
