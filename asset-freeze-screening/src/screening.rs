//! End-to-end screening run: registry + portfolio + threshold -> report

use crate::config::{validate_threshold, Config};
use crate::error::{Error, Result};
use crate::index::CandidateIndex;
use crate::matcher::{MatchSelector, ProgressFn};
use crate::portfolio::validate_entry;
use crate::report::{classify, RejectedEntry, ScreeningOutcome, ScreeningReport, DEFAULT_THRESHOLD};
use crate::types::{PortfolioEntry, RegistryRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Everything a screening run depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRequest {
    /// Registry snapshot to derive candidates from
    pub registry: Vec<RegistryRecord>,
    /// Entries to screen
    pub portfolio: Vec<PortfolioEntry>,
    /// Concern threshold, 0-100
    pub threshold: f64,
}

impl ScreeningRequest {
    /// Request with the default threshold
    pub fn new(registry: Vec<RegistryRecord>, portfolio: Vec<PortfolioEntry>) -> Self {
        Self {
            registry,
            portfolio,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Override the concern threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Screens portfolios against the asset-freeze registry
#[derive(Debug, Clone)]
pub struct Screener {
    parallel: bool,
    strict_portfolio: bool,
}

impl Screener {
    /// Screener following `config`'s execution and validation settings
    pub fn new(config: &Config) -> Self {
        Self {
            parallel: config.parallel,
            strict_portfolio: config.strict_portfolio,
        }
    }

    /// Run a screening without progress reporting
    pub fn screen(&self, request: &ScreeningRequest) -> Result<ScreeningReport> {
        self.run(request, None)
    }

    /// Run a screening, calling `progress` once per scored entry
    pub fn screen_with_progress(
        &self,
        request: &ScreeningRequest,
        progress: ProgressFn<'_>,
    ) -> Result<ScreeningReport> {
        self.run(request, Some(progress))
    }

    fn run(&self, request: &ScreeningRequest, progress: Option<ProgressFn<'_>>) -> Result<ScreeningReport> {
        validate_threshold(request.threshold)?;

        // Portfolio defects surface before any scoring
        let (entries, rejected) = self.validate_portfolio(&request.portfolio)?;

        let index = CandidateIndex::build(&request.registry);
        if index.is_empty() {
            return Err(Error::NoCandidatesAvailable);
        }

        info!(
            "Screening {} portfolio entries against {} candidate names",
            entries.len(),
            index.len()
        );

        let results = MatchSelector::new(&index)
            .parallel(self.parallel)
            .select(&entries, progress)?;

        let report = classify(results, request.threshold).with_rejected(rejected);

        match report.outcome() {
            ScreeningOutcome::Clean => info!("{}", report.outcome()),
            ScreeningOutcome::ConcernsFound(_) => {
                warn!("{}", report.outcome());
                for concern in report.concern() {
                    warn!(
                        "Contract {} ({}) matches registry entry {} \"{}\" with score {:.2}",
                        concern.portfolio_entry.contract_id,
                        concern.portfolio_entry.display_name(),
                        concern.best_candidate.registry_id,
                        concern.best_candidate.name,
                        concern.score
                    );
                }
            }
        }

        Ok(report)
    }

    fn validate_portfolio(
        &self,
        portfolio: &[PortfolioEntry],
    ) -> Result<(Vec<PortfolioEntry>, Vec<RejectedEntry>)> {
        let mut entries = Vec::with_capacity(portfolio.len());
        let mut rejected = Vec::new();

        for (row, entry) in portfolio.iter().enumerate() {
            match validate_entry(row, entry) {
                Ok(()) => entries.push(entry.clone()),
                Err(e) if self.strict_portfolio => return Err(e),
                Err(Error::InvalidPortfolioEntry { row, field }) => {
                    warn!("Skipping portfolio row {}: missing field `{}`", row, field);
                    rejected.push(RejectedEntry {
                        row,
                        contract_id: entry.contract_id.clone(),
                        missing_field: field.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if entries.is_empty() && !rejected.is_empty() {
            return Err(Error::InvalidPortfolio(format!(
                "all {} entries are missing required fields",
                rejected.len()
            )));
        }

        Ok((entries, rejected))
    }
}

impl Default for Screener {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Screen with default settings
pub fn screen(request: &ScreeningRequest) -> Result<ScreeningReport> {
    Screener::default().screen(request)
}
