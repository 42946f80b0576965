use crate::models::card::{Direction, QuoteCard};
use crate::models::market::MarketStore;
use crate::models::quote::Quote;

/// Turns stored quotes into summary cards, one per ticker.
pub struct CardService;

impl CardService {
    pub fn new() -> Self {
        Self
    }

    pub fn card(&self, ticker: &str, quote: &Quote) -> QuoteCard {
        QuoteCard {
            ticker: ticker.to_string(),
            name: quote.name.clone(),
            currency: quote.currency.clone(),
            currency_symbol: quote.currency.symbol(),
            current_price: quote.current_price,
            change_percent: quote.change_percent,
            direction: Direction::from_change(quote.change_percent),
            last_updated: quote.last_updated.clone(),
        }
    }

    /// Cards in store (document) order.
    pub fn cards(&self, store: &MarketStore) -> Vec<QuoteCard> {
        store
            .iter()
            .map(|(ticker, quote)| self.card(ticker, quote))
            .collect()
    }

    /// Best and worst movers by `change_percent`. `None` for an empty store.
    /// Ties keep the ticker that comes first in the document.
    pub fn extremes<'a>(&self, store: &'a MarketStore) -> Option<((&'a str, &'a Quote), (&'a str, &'a Quote))> {
        let mut iter = store.iter();
        let first = iter.next()?;
        let (mut best, mut worst) = (first, first);
        for entry in iter {
            if entry.1.change_percent > best.1.change_percent {
                best = entry;
            }
            if entry.1.change_percent < worst.1.change_percent {
                worst = entry;
            }
        }
        Some((best, worst))
    }
}

impl Default for CardService {
    fn default() -> Self {
        Self::new()
    }
}
