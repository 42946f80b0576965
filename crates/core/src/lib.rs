pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    card::QuoteCard,
    chart::ChartSeries,
    dca::{DcaConfig, DcaInputs, DcaOutcome, DcaRun, Frequency},
    market::{LoadState, MarketStore},
    quote::HistoryPoint,
    report::{AiReport, ReportState},
    settings::Settings,
};
use providers::traits::DocumentSource;
use services::{
    calendar::one_year_before, card_service::CardService, chart_service::ChartService,
    dca_service::DcaService, report_service::ReportService,
};

use errors::CoreError;

/// Backtest one price history. See [`DcaService::simulate`].
pub fn simulate_dca(
    history: &[HistoryPoint],
    amount: f64,
    frequency: Frequency,
    start: NaiveDate,
    end: NaiveDate,
) -> DcaOutcome {
    DcaService::new().simulate(history, amount, frequency, start, end)
}

/// Default "last 12 months" zoom start in percent. See
/// [`ChartService::default_zoom_start`].
pub fn default_zoom_start(dates: &[NaiveDate], reference_date: NaiveDate) -> f64 {
    ChartService::new().default_zoom_start(dates, reference_date)
}

/// Main entry point for the dashboard core.
///
/// Holds the explicit application state (loaded quotes, selected ticker,
/// DCA inputs and results, report) that a front end renders from. The pure
/// computations in `services` never see this struct.
#[must_use]
pub struct MarketDashboard {
    settings: Settings,
    store: MarketStore,
    load_state: LoadState,
    report: ReportState,
    selected_ticker: Option<String>,
    /// `None` until the user edits the form; defaults derive from the data.
    dca_inputs: Option<DcaInputs>,
    dca_run: Option<DcaRun>,
    dca_service: DcaService,
    chart_service: ChartService,
    card_service: CardService,
    report_service: ReportService,
}

impl std::fmt::Debug for MarketDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDashboard")
            .field("load_state", &self.load_state)
            .field("tickers", &self.store.len())
            .field("selected_ticker", &self.selected_ticker)
            .field("report_available", &self.report.report().is_some())
            .finish()
    }
}

impl MarketDashboard {
    /// Create an empty dashboard. Settings are validated first.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    /// Create an empty dashboard with default settings.
    pub fn with_defaults() -> Self {
        Self::build(Settings::default())
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Fetch and load the market data document named in the settings.
    pub async fn load_market_data(
        &mut self,
        source: &dyn DocumentSource,
    ) -> Result<usize, CoreError> {
        let location = self.settings.market_data_location.clone();
        self.load_market_data_from(source, &location).await
    }

    /// Fetch and load a market data document from an explicit location.
    ///
    /// On failure the store is emptied, the load state becomes `Failed`, and
    /// the error is returned. There is no retry.
    pub async fn load_market_data_from(
        &mut self,
        source: &dyn DocumentSource,
        location: &str,
    ) -> Result<usize, CoreError> {
        match source.fetch(location).await {
            Ok(json) => self.load_market_data_from_str(&json),
            Err(e) => {
                tracing::warn!(source = source.name(), location, "Market data fetch failed: {e}");
                let err = CoreError::DataUnavailable(e.to_string());
                self.mark_failed(&err);
                Err(err)
            }
        }
    }

    /// Load a market data document already in memory. Replaces any previous
    /// data and recomputes the DCA backtest. Returns the ticker count.
    pub fn load_market_data_from_str(&mut self, json: &str) -> Result<usize, CoreError> {
        let store = match MarketStore::from_json(json) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Market data rejected: {e}");
                self.mark_failed(&e);
                return Err(e);
            }
        };

        let tickers = store.len();
        tracing::info!(
            tickers,
            points = store.total_points(),
            "Market data loaded"
        );
        self.store = store;
        self.load_state = LoadState::Loaded { tickers };

        let still_present = self
            .selected_ticker
            .as_deref()
            .is_some_and(|t| self.store.contains(t));
        if !still_present {
            self.selected_ticker = self.store.first_ticker().map(str::to_string);
        }

        self.recalculate_dca();
        Ok(tickers)
    }

    /// Fetch the report document named in the settings.
    ///
    /// Never fails: a missing or malformed report leaves the state
    /// `Unavailable` and the front end shows the placeholder.
    pub async fn load_report(&mut self, source: &dyn DocumentSource) -> &ReportState {
        let location = self.settings.report_location.clone();
        self.load_report_from(source, &location).await
    }

    pub async fn load_report_from(
        &mut self,
        source: &dyn DocumentSource,
        location: &str,
    ) -> &ReportState {
        match source.fetch(location).await {
            Ok(json) => self.load_report_from_str(&json),
            Err(e) => {
                tracing::warn!(source = source.name(), location, "Report missing: {e}");
                self.report = ReportState::Unavailable;
                &self.report
            }
        }
    }

    pub fn load_report_from_str(&mut self, json: &str) -> &ReportState {
        self.report = match AiReport::from_json(json) {
            Ok(report) => ReportState::Available(report),
            Err(e) => {
                tracing::warn!("Report document malformed: {e}");
                ReportState::Unavailable
            }
        };
        &self.report
    }

    /// Replace the report with a rule-based one built from the loaded data,
    /// including the current DCA results when they were computed.
    pub fn use_generated_report(&mut self, date: NaiveDate) -> Result<&ReportState, CoreError> {
        let report = match (self.current_dca_config(), &self.dca_run) {
            (Some(config), Some(run @ DcaRun::Computed(_))) => self
                .report_service
                .summary_report_with_dca(&self.store, &config, run, date)?,
            _ => self.report_service.summary_report(&self.store, date)?,
        };
        self.report = ReportState::Available(report);
        Ok(&self.report)
    }

    // ── Cards & Chart ───────────────────────────────────────────────

    /// Summary cards in document order.
    #[must_use]
    pub fn cards(&self) -> Vec<QuoteCard> {
        self.card_service.cards(&self.store)
    }

    /// Switch the chart to another ticker.
    pub fn select_ticker(&mut self, ticker: &str) -> Result<(), CoreError> {
        if !self.store.contains(ticker) {
            return Err(CoreError::UnknownTicker(ticker.to_string()));
        }
        self.selected_ticker = Some(ticker.to_string());
        Ok(())
    }

    /// Ticker shown in the chart. Defaults to the first in the document.
    #[must_use]
    pub fn selected_ticker(&self) -> Option<&str> {
        self.selected_ticker.as_deref()
    }

    /// Chart series for the selected ticker, zoomed relative to `reference_date`.
    #[must_use]
    pub fn chart_series(&self, reference_date: NaiveDate) -> Option<ChartSeries> {
        let ticker = self.selected_ticker.as_deref()?;
        self.chart_series_for(ticker, reference_date).ok()
    }

    pub fn chart_series_for(
        &self,
        ticker: &str,
        reference_date: NaiveDate,
    ) -> Result<ChartSeries, CoreError> {
        let quote = self
            .store
            .get(ticker)
            .ok_or_else(|| CoreError::UnknownTicker(ticker.to_string()))?;
        Ok(self.chart_service.chart_series(ticker, quote, reference_date))
    }

    // ── DCA ─────────────────────────────────────────────────────────

    /// Form values: the user's, or defaults covering the last year of data.
    #[must_use]
    pub fn dca_inputs(&self) -> DcaInputs {
        self.dca_inputs
            .clone()
            .unwrap_or_else(|| self.default_dca_inputs())
    }

    /// Store new form values and recompute.
    pub fn set_dca_inputs(&mut self, inputs: DcaInputs) -> &DcaRun {
        self.dca_inputs = Some(inputs);
        self.recalculate_dca()
    }

    /// Recompute the backtest for every ticker from the current inputs.
    ///
    /// Invalid inputs clear previous results: the run becomes
    /// `Skipped(InvalidRange)` rather than keeping stale numbers.
    pub fn recalculate_dca(&mut self) -> &DcaRun {
        let inputs = self.dca_inputs();
        let run = self.dca_service.run_inputs(&self.store, &inputs);
        self.dca_run.insert(run)
    }

    /// Last computed run, if any data has been loaded.
    #[must_use]
    pub fn dca_run(&self) -> Option<&DcaRun> {
        self.dca_run.as_ref()
    }

    /// The current run as a markdown table.
    #[must_use]
    pub fn dca_table_markdown(&self) -> Option<String> {
        self.dca_run
            .as_ref()
            .map(|run| self.report_service.dca_markdown_table(run))
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    #[must_use]
    pub fn report(&self) -> &ReportState {
        &self.report
    }

    #[must_use]
    pub fn store(&self) -> &MarketStore {
        &self.store
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: Settings) -> Self {
        let chart_service = ChartService::with_lookback(settings.chart_lookback_years);
        Self {
            settings,
            store: MarketStore::new(),
            load_state: LoadState::NotLoaded,
            report: ReportState::Unavailable,
            selected_ticker: None,
            dca_inputs: None,
            dca_run: None,
            dca_service: DcaService::new(),
            chart_service,
            card_service: CardService::new(),
            report_service: ReportService::new(),
        }
    }

    fn mark_failed(&mut self, err: &CoreError) {
        self.store = MarketStore::new();
        self.load_state = LoadState::Failed(err.to_string());
        self.selected_ticker = None;
        self.dca_run = None;
    }

    fn default_dca_inputs(&self) -> DcaInputs {
        let (start, end) = match self.store.latest_date() {
            Some(end) => (one_year_before(end).to_string(), end.to_string()),
            None => (String::new(), String::new()),
        };
        DcaInputs::new(
            self.settings.default_amount.to_string(),
            self.settings.default_frequency,
            start,
            end,
        )
    }

    fn current_dca_config(&self) -> Option<DcaConfig> {
        self.dca_service.parse_inputs(&self.dca_inputs()).ok()
    }
}
