use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// How often a DCA contribution is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every trading day in range
    Daily,
    /// First trading day of each ISO week
    Weekly,
    /// First trading day of each calendar month
    Monthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(CoreError::ValidationError(format!(
                "Unknown DCA frequency '{other}': expected daily, weekly or monthly"
            ))),
        }
    }
}

/// A validated DCA backtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcaConfig {
    /// Contribution per period
    pub amount: f64,
    pub frequency: Frequency,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DcaConfig {
    pub fn new(amount: f64, frequency: Frequency, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            amount,
            frequency,
            start,
            end,
        }
    }

    /// `true` when the range is not inverted and the amount is usable.
    pub fn is_valid(&self) -> bool {
        self.start <= self.end && self.amount.is_finite() && self.amount >= 0.0
    }
}

/// Raw form inputs for a DCA backtest, exactly as the user typed them.
///
/// Converted into a [`DcaConfig`] by `DcaService::parse_inputs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcaInputs {
    pub amount: String,
    pub frequency: Frequency,
    pub start: String,
    pub end: String,
}

impl DcaInputs {
    pub fn new(
        amount: impl Into<String>,
        frequency: Frequency,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            frequency,
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Why no result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Dates were unparseable or inverted, or the amount was negative.
    /// Nothing is computed for any ticker.
    InvalidRange,
    /// The ticker has no history points inside the requested range.
    EmptyPeriod,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::InvalidRange => write!(f, "invalid date range"),
            SkipReason::EmptyPeriod => write!(f, "no data in range"),
        }
    }
}

/// Outcome of a backtest for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcaResult {
    pub total_invested: f64,
    pub total_shares: f64,
    /// `total_shares` valued at the last in-range close
    pub final_value: f64,
    /// `final_value - total_invested`
    pub profit: f64,
    /// `profit / total_invested * 100`, or 0 when nothing was invested
    pub return_rate_pct: f64,
    /// Number of contributions made
    pub investments: usize,
    /// Close of the last in-range point, used for valuation
    pub last_close: f64,
}

/// Per-ticker simulator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DcaOutcome {
    Computed(DcaResult),
    Skipped(SkipReason),
}

impl DcaOutcome {
    pub fn result(&self) -> Option<&DcaResult> {
        match self {
            DcaOutcome::Computed(r) => Some(r),
            DcaOutcome::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, DcaOutcome::Skipped(_))
    }
}

/// A computed result tagged with its ticker and display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerDcaResult {
    pub ticker: String,
    pub name: String,
    pub result: DcaResult,
}

/// Backtest over every ticker in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DcaRun {
    /// Inputs were rejected; no ticker was computed.
    Skipped(SkipReason),
    /// Results in store order. Tickers with no data in range are absent.
    Computed(Vec<TickerDcaResult>),
}

impl DcaRun {
    pub fn results(&self) -> &[TickerDcaResult] {
        match self {
            DcaRun::Computed(results) => results,
            DcaRun::Skipped(_) => &[],
        }
    }

    pub fn get(&self, ticker: &str) -> Option<&DcaResult> {
        self.results()
            .iter()
            .find(|r| r.ticker == ticker)
            .map(|r| &r.result)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, DcaRun::Skipped(_))
    }
}
