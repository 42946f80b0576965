use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::dca::{DcaConfig, DcaRun};
use crate::models::market::MarketStore;
use crate::models::report::AiReport;
use crate::services::card_service::CardService;

/// Source label on reports built by [`ReportService`].
pub const RULE_REPORT_SOURCE: &str = "Local Rule-Based Summary";

/// Builds a plain rule-based report when no published report is available.
///
/// Names the best and worst movers and can append a DCA results table.
pub struct ReportService {
    card_service: CardService,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            card_service: CardService::new(),
        }
    }

    /// Short market summary for `date`. Fails on an empty store.
    pub fn summary_report(&self, store: &MarketStore, date: NaiveDate) -> Result<AiReport, CoreError> {
        let content = self.summary_markdown(store)?;
        Ok(AiReport {
            content,
            source: RULE_REPORT_SOURCE.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
        })
    }

    /// Summary followed by a DCA backtest section.
    pub fn summary_report_with_dca(
        &self,
        store: &MarketStore,
        config: &DcaConfig,
        run: &DcaRun,
        date: NaiveDate,
    ) -> Result<AiReport, CoreError> {
        let mut content = self.summary_markdown(store)?;
        content.push_str(&format!(
            "\n\n#### DCA Backtest ({}, {:.2} per period, {} to {})\n\n",
            config.frequency, config.amount, config.start, config.end
        ));
        content.push_str(&self.dca_markdown_table(run));
        content.push_str("\n*(Assumes a fixed contribution per period, no fees.)*");

        Ok(AiReport {
            content,
            source: RULE_REPORT_SOURCE.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
        })
    }

    /// Markdown table of a DCA run: asset, invested, value, return.
    pub fn dca_markdown_table(&self, run: &DcaRun) -> String {
        let results = match run {
            DcaRun::Skipped(reason) => return format!("_DCA backtest skipped: {reason}._\n"),
            DcaRun::Computed(results) => results,
        };
        if results.is_empty() {
            return "_No asset has data in the selected range._\n".to_string();
        }

        let mut table = String::from("| Asset | Invested | Value | Return |\n|---|---|---|---|\n");
        for entry in results {
            let r = &entry.result;
            table.push_str(&format!(
                "| {} | {:.2} | {:.0} | **{:.2}%** |\n",
                escape_cell(&entry.name),
                r.total_invested,
                r.final_value,
                r.return_rate_pct,
            ));
        }
        table
    }

    fn summary_markdown(&self, store: &MarketStore) -> Result<String, CoreError> {
        let ((_, best), (_, worst)) = self
            .card_service
            .extremes(store)
            .ok_or_else(|| CoreError::DataUnavailable("no quotes to summarise".into()))?;

        Ok(format!(
            "**Market Summary**\n\n\
             Across {} tracked assets, the top performer is **{}** at {:+.2}%. \
             The weakest is **{}** at {:+.2}%.\n\n\
             Monitor volatility in the coming sessions.",
            store.len(),
            best.name,
            best.change_percent,
            worst.name,
            worst.change_percent,
        ))
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipes would split the markdown cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
