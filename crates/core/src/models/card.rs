use serde::{Deserialize, Serialize};

use super::quote::Currency;

/// Price move since the previous close. Flat counts as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
        }
    }
}

/// Summary card for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteCard {
    pub ticker: String,
    pub name: String,
    pub currency: Currency,

    /// Display prefix for prices (e.g. "$", "HK$")
    pub currency_symbol: String,

    pub current_price: f64,
    pub change_percent: f64,
    pub direction: Direction,
    pub last_updated: String,
}

impl QuoteCard {
    /// Price with currency prefix and two decimals, e.g. "HK$17650.20".
    pub fn price_label(&self) -> String {
        format!("{}{:.2}", self.currency_symbol, self.current_price)
    }

    /// Signed change with arrow, e.g. "▲ +1.25%".
    pub fn change_label(&self) -> String {
        format!("{} {:+.2}%", self.direction.arrow(), self.change_percent)
    }
}
