use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Shown in place of the report when the document is missing.
pub const REPORT_PLACEHOLDER: &str = "Waiting for the next scheduled update...";

/// Prose market commentary published next to the market data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiReport {
    /// Markdown body
    pub content: String,

    /// Who or what wrote it (a model name, or a rule-based generator)
    pub source: String,

    /// Publication date as written by the publisher
    pub date: String,
}

impl AiReport {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let report: AiReport = serde_json::from_str(json)?;
        Ok(report)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::InvalidDocument(format!("Failed to serialize report: {e}")))
    }
}

/// Whether a report is available for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ReportState {
    Available(AiReport),
    /// Not loaded yet, or the fetch failed. Not an error for the page.
    #[default]
    Unavailable,
}

impl ReportState {
    pub fn report(&self) -> Option<&AiReport> {
        match self {
            ReportState::Available(r) => Some(r),
            ReportState::Unavailable => None,
        }
    }

    /// Markdown to show: the report body, or the placeholder.
    pub fn display_text(&self) -> &str {
        match self {
            ReportState::Available(r) => &r.content,
            ReportState::Unavailable => REPORT_PLACEHOLDER,
        }
    }
}
