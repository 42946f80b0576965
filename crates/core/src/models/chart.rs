use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::quote::Currency;

/// Initially visible x-axis range of a price chart, as percentages of the
/// series length. A hint for the renderer; no data is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartWindow {
    /// 0.0 shows the series from its first point
    pub start_pct: f64,
    /// Always 100.0
    pub end_pct: f64,
}

impl ChartWindow {
    pub fn from_start(start_pct: f64) -> Self {
        Self {
            start_pct,
            end_pct: 100.0,
        }
    }

    /// Whole series visible.
    pub fn full() -> Self {
        Self::from_start(0.0)
    }
}

impl Default for ChartWindow {
    fn default() -> Self {
        Self::full()
    }
}

/// Chart-ready price series for one ticker.
///
/// The core computes everything; the front end only draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub ticker: String,
    pub name: String,
    pub currency: Currency,

    /// x axis
    pub dates: Vec<NaiveDate>,

    /// y axis, same length as `dates`
    pub closes: Vec<f64>,

    /// Default zoom
    pub window: ChartWindow,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Index of the first point inside the default window.
    pub fn window_start_index(&self) -> usize {
        ((self.window.start_pct / 100.0) * self.dates.len() as f64).round() as usize
    }
}
