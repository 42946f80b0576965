use chrono::NaiveDate;

use crate::models::chart::{ChartSeries, ChartWindow};
use crate::models::quote::Quote;
use crate::services::calendar::{parse_iso_date, years_before};

/// Builds chart-ready series and their default zoom window.
///
/// The core computes all the numbers; the front end only renders.
pub struct ChartService {
    lookback_years: u32,
}

impl ChartService {
    /// Default view covers the last 12 months.
    pub fn new() -> Self {
        Self::with_lookback(1)
    }

    /// Default view covers the last `years` years. Zero is treated as one.
    pub fn with_lookback(years: u32) -> Self {
        Self {
            lookback_years: years.max(1),
        }
    }

    pub fn lookback_years(&self) -> u32 {
        self.lookback_years
    }

    /// Start of the default zoom window, as a percentage (0–100).
    ///
    /// `dates` must be ascending. The window opens at the first date on or
    /// after `reference_date` minus the lookback. An empty list, or one whose
    /// newest date is already older than the cutoff, shows the full series.
    pub fn default_zoom_start(&self, dates: &[NaiveDate], reference_date: NaiveDate) -> f64 {
        if dates.is_empty() {
            return 0.0;
        }
        let cutoff = years_before(reference_date, self.lookback_years);
        let idx = dates.partition_point(|d| *d < cutoff);
        if idx >= dates.len() {
            return 0.0;
        }
        idx as f64 / dates.len() as f64 * 100.0
    }

    /// [`default_zoom_start`](Self::default_zoom_start) over ISO date strings.
    ///
    /// A list with any unparseable entry falls back to the full view.
    pub fn default_zoom_start_str<S: AsRef<str>>(&self, dates: &[S], reference_date: NaiveDate) -> f64 {
        let parsed: Result<Vec<NaiveDate>, _> =
            dates.iter().map(|s| parse_iso_date(s.as_ref())).collect();
        match parsed {
            Ok(parsed) => self.default_zoom_start(&parsed, reference_date),
            Err(e) => {
                tracing::warn!("Chart dates not parseable, showing full series: {e}");
                0.0
            }
        }
    }

    pub fn default_window(&self, dates: &[NaiveDate], reference_date: NaiveDate) -> ChartWindow {
        ChartWindow::from_start(self.default_zoom_start(dates, reference_date))
    }

    /// Full price series for one ticker with its default zoom window.
    pub fn chart_series(&self, ticker: &str, quote: &Quote, reference_date: NaiveDate) -> ChartSeries {
        let dates = quote.dates();
        let window = self.default_window(&dates, reference_date);
        ChartSeries {
            ticker: ticker.to_string(),
            name: quote.name.clone(),
            currency: quote.currency.clone(),
            closes: quote.closes(),
            dates,
            window,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
