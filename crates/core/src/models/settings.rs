use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::dca::Frequency;

/// Dashboard configuration, loadable from a JSON file.
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path or URL of the market data document.
    pub market_data_location: String,

    /// Path or URL of the report document.
    pub report_location: String,

    /// Pre-filled DCA contribution per period.
    pub default_amount: f64,

    /// Pre-filled DCA frequency.
    pub default_frequency: Frequency,

    /// How far back the chart's default zoom reaches.
    pub chart_lookback_years: u32,

    /// Request timeout for HTTP sources. `None` leaves requests unbounded.
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            market_data_location: "data/market_data.json".to_string(),
            report_location: "data/ai_report.json".to_string(),
            default_amount: 100.0,
            default_frequency: Frequency::Monthly,
            chart_lookback_years: 1,
            fetch_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidSettings(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.default_amount.is_finite() || self.default_amount < 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "default_amount must be a non-negative number, got {}",
                self.default_amount
            )));
        }
        if self.chart_lookback_years == 0 {
            return Err(CoreError::InvalidSettings(
                "chart_lookback_years must be at least 1".into(),
            ));
        }
        if self.market_data_location.trim().is_empty() {
            return Err(CoreError::InvalidSettings(
                "market_data_location must not be empty".into(),
            ));
        }
        if self.fetch_timeout_secs == Some(0) {
            return Err(CoreError::InvalidSettings(
                "fetch_timeout_secs must be positive when set".into(),
            ));
        }
        Ok(())
    }
}
