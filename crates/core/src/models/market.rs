use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::errors::CoreError;

use super::quote::Quote;

/// In-memory store of every quote in a market data snapshot.
///
/// Populated once from the fetched document and read-only afterwards. A
/// reload builds a fresh store that replaces the old one wholesale; there is
/// no merge or diffing. Tickers keep the order in which the document lists
/// them, which is also the order cards are shown in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketStore {
    order: Vec<String>,
    quotes: HashMap<String, Quote>,
}

impl MarketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a market data document: a JSON object mapping ticker → quote.
    ///
    /// Histories are stable-sorted by date so the ascending-date invariant
    /// holds even if the publisher wrote them out of order. Negative or
    /// non-finite closes reject the whole document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let root: Value = serde_json::from_str(json)?;
        let object: Map<String, Value> = match root {
            Value::Object(map) => map,
            other => {
                return Err(CoreError::InvalidDocument(format!(
                    "market data must be a JSON object keyed by ticker, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut store = Self::new();
        for (ticker, value) in object {
            let quote: Quote = serde_json::from_value(value).map_err(|e| {
                CoreError::InvalidDocument(format!("quote for {ticker} is malformed: {e}"))
            })?;
            store.insert(ticker, quote)?;
        }
        Ok(store)
    }

    /// Add a quote. Replaces an existing entry for the same ticker in place.
    pub fn insert(&mut self, ticker: impl Into<String>, mut quote: Quote) -> Result<(), CoreError> {
        let ticker = ticker.into();
        if let Some(bad) = quote
            .history
            .iter()
            .find(|p| !p.close.is_finite() || p.close < 0.0)
        {
            return Err(CoreError::InvalidDocument(format!(
                "{ticker} has an invalid close {} on {}",
                bad.close, bad.date
            )));
        }
        quote.history.sort_by_key(|p| p.date);

        if !self.quotes.contains_key(&ticker) {
            self.order.push(ticker.clone());
        }
        self.quotes.insert(ticker, quote);
        Ok(())
    }

    pub fn get(&self, ticker: &str) -> Option<&Quote> {
        self.quotes.get(ticker)
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.quotes.contains_key(ticker)
    }

    /// Tickers in document order.
    pub fn tickers(&self) -> &[String] {
        &self.order
    }

    pub fn first_ticker(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    /// (ticker, quote) pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Quote)> {
        self.order
            .iter()
            .filter_map(|t| self.quotes.get(t).map(|q| (t.as_str(), q)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Newest history date across all tickers.
    pub fn latest_date(&self) -> Option<chrono::NaiveDate> {
        self.quotes.values().filter_map(|q| q.last_date()).max()
    }

    /// Total number of history points across all tickers.
    pub fn total_points(&self) -> usize {
        self.quotes.values().map(|q| q.history.len()).sum()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Outcome of the most recent market data load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No load attempted yet.
    #[default]
    NotLoaded,
    Loaded { tickers: usize },
    /// Fetch or parse failed; the store is empty.
    Failed(String),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded { .. })
    }

    /// Short badge text for the status indicator.
    pub fn label(&self) -> String {
        match self {
            LoadState::NotLoaded => "Loading".to_string(),
            LoadState::Loaded { tickers } => format!("Data updated ({tickers} assets)"),
            LoadState::Failed(_) => "Load error".to_string(),
        }
    }
}
