//! Market dashboard in the terminal.
//!
//! Loads the market data and report documents (local paths or URLs), then
//! prints the summary cards, the selected chart's default window, the DCA
//! backtest table and the report.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::PathBuf;

use market_dashboard_core::models::chart::ChartSeries;
use market_dashboard_core::models::dca::{DcaInputs, DcaRun, Frequency};
use market_dashboard_core::models::market::LoadState;
use market_dashboard_core::models::settings::Settings;
use market_dashboard_core::providers::source_for;
use market_dashboard_core::services::calendar::parse_iso_date;
use market_dashboard_core::MarketDashboard;

#[derive(Parser)]
#[command(
    name = "market-dashboard",
    about = "Market snapshot dashboard with DCA backtests"
)]
struct Cli {
    /// Settings file (JSON). Missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Market data document: a path or an http(s) URL.
    #[arg(long)]
    data: Option<String>,

    /// Report document: a path or an http(s) URL.
    #[arg(long)]
    report: Option<String>,

    /// Ticker to chart. Defaults to the first in the document.
    #[arg(long)]
    ticker: Option<String>,

    /// DCA contribution per period.
    #[arg(long)]
    amount: Option<String>,

    /// DCA frequency: daily, weekly or monthly.
    #[arg(long)]
    frequency: Option<Frequency>,

    /// DCA start date (YYYY-MM-DD). Defaults to a year before the newest data.
    #[arg(long)]
    start: Option<String>,

    /// DCA end date (YYYY-MM-DD). Defaults to the newest data.
    #[arg(long)]
    end: Option<String>,

    /// Date the chart window is measured from. Defaults to today (UTC).
    #[arg(long)]
    today: Option<String>,

    /// Build a rule-based report from the data instead of loading one.
    #[arg(long, default_value_t = false)]
    generate_report: bool,

    /// Log at debug level.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("reading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(data) = &cli.data {
        settings.market_data_location = data.clone();
    }
    if let Some(report) = &cli.report {
        settings.report_location = report.clone();
    }

    let today = match &cli.today {
        Some(s) => parse_iso_date(s).context("--today")?,
        None => Utc::now().date_naive(),
    };

    let mut dashboard = MarketDashboard::new(settings)?;
    let timeout = dashboard.settings().fetch_timeout_secs;

    let data_location = dashboard.settings().market_data_location.clone();
    let data_source = source_for(&data_location, timeout);
    tracing::debug!(source = data_source.name(), location = %data_location, "Loading market data");
    let load_result = dashboard
        .load_market_data_from(data_source.as_ref(), &data_location)
        .await;

    print_status(dashboard.load_state());
    if let Err(e) = load_result {
        println!("\nMarket data unavailable.");
        return Err(anyhow::Error::new(e).context(format!("loading {data_location}")));
    }

    if let Some(ticker) = &cli.ticker {
        dashboard.select_ticker(ticker)?;
    }

    if cli.amount.is_some() || cli.frequency.is_some() || cli.start.is_some() || cli.end.is_some() {
        let defaults = dashboard.dca_inputs();
        dashboard.set_dca_inputs(DcaInputs::new(
            cli.amount.clone().unwrap_or(defaults.amount),
            cli.frequency.unwrap_or(defaults.frequency),
            cli.start.clone().unwrap_or(defaults.start),
            cli.end.clone().unwrap_or(defaults.end),
        ));
    }

    if cli.generate_report {
        dashboard.use_generated_report(today)?;
    } else {
        let report_location = dashboard.settings().report_location.clone();
        let report_source = source_for(&report_location, timeout);
        dashboard
            .load_report_from(report_source.as_ref(), &report_location)
            .await;
    }

    print_cards(&dashboard);
    if let Some(series) = dashboard.chart_series(today) {
        print_chart(&series);
    }
    print_dca(&dashboard);
    print_report(&dashboard);

    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_status(state: &LoadState) {
    match state {
        LoadState::Failed(reason) => println!("[{}] {reason}", state.label()),
        _ => println!("[{}]", state.label()),
    }
}

fn print_cards(dashboard: &MarketDashboard) {
    println!("\n== Markets ==");
    for card in dashboard.cards() {
        println!(
            "{:<28} {:>16}  {:<10}  updated {}",
            card.name,
            card.price_label(),
            card.change_label(),
            card.last_updated,
        );
    }
}

fn print_chart(series: &ChartSeries) {
    println!("\n== Chart: {} ({}) ==", series.name, series.ticker);
    if series.is_empty() {
        println!("No history.");
        return;
    }

    let from = series.window_start_index().min(series.len() - 1);
    let visible = &series.closes[from..];
    let low = visible.iter().copied().fold(f64::INFINITY, f64::min);
    let high = visible.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let first_date: NaiveDate = series.dates[from];
    let last_date: NaiveDate = series.dates[series.len() - 1];

    println!(
        "{} points, default view {:.1}%–{:.0}% ({} to {})",
        series.len(),
        series.window.start_pct,
        series.window.end_pct,
        first_date,
        last_date,
    );
    println!(
        "range in view: {:.2} – {:.2} {}",
        low, high, series.currency
    );
}

fn print_dca(dashboard: &MarketDashboard) {
    let inputs = dashboard.dca_inputs();
    println!(
        "\n== DCA: {} per {} from {} to {} ==",
        inputs.amount, inputs.frequency, inputs.start, inputs.end
    );
    match dashboard.dca_run() {
        Some(DcaRun::Skipped(reason)) => println!("Not computed: {reason}."),
        Some(run @ DcaRun::Computed(_)) => {
            for entry in run.results() {
                let r = &entry.result;
                println!(
                    "{:<28} invested {:>12.2}  shares {:>12.4}  value {:>12.2}  profit {:>+12.2}  {:>+8.2}%",
                    entry.name, r.total_invested, r.total_shares, r.final_value, r.profit, r.return_rate_pct,
                );
            }
        }
        None => println!("No data."),
    }
}

fn print_report(dashboard: &MarketDashboard) {
    println!("\n== Report ==");
    let state = dashboard.report();
    println!("{}", state.display_text());
    if let Some(report) = state.report() {
        println!("\nsource: {}    date: {}", report.source, report.date);
    }
}
