use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Quote currency.
///
/// The snapshot documents carry ISO codes as plain strings. Unknown codes are
/// kept verbatim in `Other` so a new market never fails the whole load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    #[default]
    Usd,
    Cny,
    Hkd,
    Other(String),
}

impl Currency {
    /// ISO code, uppercased (e.g. "USD").
    pub fn code(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Cny => "CNY",
            Currency::Hkd => "HKD",
            Currency::Other(code) => code,
        }
    }

    /// Prefix used when displaying prices.
    pub fn symbol(&self) -> String {
        match self {
            Currency::Usd => "$".to_string(),
            Currency::Cny => "¥".to_string(),
            Currency::Hkd => "HK$".to_string(),
            Currency::Other(code) => format!("{code} "),
        }
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        let upper = code.trim().to_uppercase();
        match upper.as_str() {
            "USD" => Currency::Usd,
            "CNY" | "RMB" => Currency::Cny,
            "HKD" => Currency::Hkd,
            _ => Currency::Other(upper),
        }
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Currency::from(code.to_string())
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One (date, closing price) observation. One point per trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl HistoryPoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Snapshot of a single ticker as published in the market data document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Display name (e.g. "S&P 500 (SPX)")
    pub name: String,

    #[serde(default)]
    pub currency: Currency,

    pub current_price: f64,

    /// Change against the previous close, in percent
    pub change_percent: f64,

    /// Timestamp string as written by the publisher; displayed verbatim
    #[serde(default)]
    pub last_updated: String,

    /// Upstream data vendor, when the publisher records one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Daily closes, ascending by date
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

impl Quote {
    /// Dates of the history, in order. Used as the chart's x axis.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.history.iter().map(|p| p.date).collect()
    }

    /// Closing prices of the history, in order.
    pub fn closes(&self) -> Vec<f64> {
        self.history.iter().map(|p| p.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.history.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.history.last().map(|p| p.date)
    }
}
