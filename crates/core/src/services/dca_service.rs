use chrono::NaiveDate;

use crate::models::dca::{
    DcaConfig, DcaInputs, DcaOutcome, DcaResult, DcaRun, Frequency, SkipReason, TickerDcaResult,
};
use crate::models::market::MarketStore;
use crate::models::quote::HistoryPoint;
use crate::services::calendar::{iso_week_number, month_number, parse_iso_date};

/// Dollar-cost-averaging backtests over stored price histories.
///
/// Pure business logic: no I/O, no shared state. Calling it twice with the
/// same inputs gives the same answer.
pub struct DcaService;

impl DcaService {
    pub fn new() -> Self {
        Self
    }

    /// Backtest investing `amount` per period over `[start, end]` (inclusive).
    ///
    /// `history` must be sorted ascending by date, as the market store
    /// guarantees. Returns `Skipped(InvalidRange)` for an inverted range or an
    /// unusable amount, and `Skipped(EmptyPeriod)` when no point falls inside
    /// the range. A range with points but no qualifying contribution still
    /// yields a zero `Computed` result.
    pub fn simulate(
        &self,
        history: &[HistoryPoint],
        amount: f64,
        frequency: Frequency,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DcaOutcome {
        if start > end || !amount.is_finite() || amount < 0.0 {
            return DcaOutcome::Skipped(SkipReason::InvalidRange);
        }

        let in_range = Self::slice_range(history, start, end);
        let Some(last_point) = in_range.last() else {
            return DcaOutcome::Skipped(SkipReason::EmptyPeriod);
        };

        let mut total_invested = 0.0;
        let mut total_shares = 0.0;
        let mut investments = 0;
        let mut last_invest_date: Option<NaiveDate> = None;

        for point in in_range {
            if !Self::is_due(frequency, point.date, last_invest_date) {
                continue;
            }
            // A zero close cannot be bought at; the period stays open.
            if point.close <= 0.0 {
                continue;
            }
            total_invested += amount;
            total_shares += amount / point.close;
            investments += 1;
            last_invest_date = Some(point.date);
        }

        let final_value = total_shares * last_point.close;
        let profit = final_value - total_invested;
        let return_rate_pct = if total_invested > 0.0 {
            (profit / total_invested) * 100.0
        } else {
            0.0
        };

        DcaOutcome::Computed(DcaResult {
            total_invested,
            total_shares,
            final_value,
            profit,
            return_rate_pct,
            investments,
            last_close: last_point.close,
        })
    }

    /// Same as [`simulate`](Self::simulate), taking a validated config.
    pub fn simulate_config(&self, history: &[HistoryPoint], config: &DcaConfig) -> DcaOutcome {
        self.simulate(
            history,
            config.amount,
            config.frequency,
            config.start,
            config.end,
        )
    }

    /// Turn raw form inputs into a config.
    ///
    /// An empty or non-numeric amount counts as 0. Unparseable dates, an
    /// inverted range or a negative amount give `InvalidRange`.
    pub fn parse_inputs(&self, inputs: &DcaInputs) -> Result<DcaConfig, SkipReason> {
        let amount = inputs.amount.trim().parse::<f64>().unwrap_or(0.0);
        let start = parse_iso_date(&inputs.start).map_err(|_| SkipReason::InvalidRange)?;
        let end = parse_iso_date(&inputs.end).map_err(|_| SkipReason::InvalidRange)?;

        let config = DcaConfig::new(amount, inputs.frequency, start, end);
        if !config.is_valid() {
            return Err(SkipReason::InvalidRange);
        }
        Ok(config)
    }

    /// Backtest every ticker in the store, in store order.
    ///
    /// Tickers without data in range are left out; they do not affect the others.
    pub fn run(&self, store: &MarketStore, config: &DcaConfig) -> DcaRun {
        if !config.is_valid() {
            tracing::debug!(
                start = %config.start,
                end = %config.end,
                amount = config.amount,
                "DCA config rejected"
            );
            return DcaRun::Skipped(SkipReason::InvalidRange);
        }

        let mut results = Vec::with_capacity(store.len());
        for (ticker, quote) in store.iter() {
            match self.simulate_config(&quote.history, config) {
                DcaOutcome::Computed(result) => results.push(TickerDcaResult {
                    ticker: ticker.to_string(),
                    name: quote.name.clone(),
                    result,
                }),
                DcaOutcome::Skipped(reason) => {
                    tracing::debug!(ticker, %reason, "DCA skipped ticker");
                }
            }
        }

        DcaRun::Computed(results)
    }

    /// Parse form inputs and run the backtest over the whole store.
    pub fn run_inputs(&self, store: &MarketStore, inputs: &DcaInputs) -> DcaRun {
        match self.parse_inputs(inputs) {
            Ok(config) => self.run(store, &config),
            Err(reason) => {
                tracing::debug!(start = %inputs.start, end = %inputs.end, "DCA inputs rejected");
                DcaRun::Skipped(reason)
            }
        }
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Points with `start <= date <= end`. Binary search on the sorted history.
    fn slice_range(history: &[HistoryPoint], start: NaiveDate, end: NaiveDate) -> &[HistoryPoint] {
        let lo = history.partition_point(|p| p.date < start);
        let hi = history.partition_point(|p| p.date <= end);
        if lo >= hi {
            return &[];
        }
        &history[lo..hi]
    }

    /// Week and month comparisons ignore the year, so two dates exactly a
    /// year apart with no point in between share a period.
    fn is_due(frequency: Frequency, date: NaiveDate, last: Option<NaiveDate>) -> bool {
        let Some(last) = last else {
            return true;
        };
        match frequency {
            Frequency::Daily => true,
            Frequency::Weekly => iso_week_number(date) != iso_week_number(last),
            Frequency::Monthly => month_number(date) != month_number(last),
        }
    }
}

impl Default for DcaService {
    fn default() -> Self {
        Self::new()
    }
}
