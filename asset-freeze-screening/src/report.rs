//! Threshold classification and the screening report

use crate::types::MatchResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score above which a match needs analyst review
pub const DEFAULT_THRESHOLD: f64 = 91.0;

/// A portfolio entry excluded from scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEntry {
    /// 0-based position in the submitted portfolio
    pub row: usize,
    /// Contract identifier as submitted, possibly empty
    pub contract_id: String,
    /// First required column found empty
    pub missing_field: String,
}

/// Terminal state of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningOutcome {
    /// Every entry was checked and none exceeds the threshold
    Clean,
    /// Number of entries above the threshold
    ConcernsFound(usize),
}

impl fmt::Display for ScreeningOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreeningOutcome::Clean => {
                write!(f, "No portfolio entry appears on the asset-freeze registry")
            }
            ScreeningOutcome::ConcernsFound(1) => {
                write!(f, "1 portfolio entry has a potential registry match")
            }
            ScreeningOutcome::ConcernsFound(n) => {
                write!(f, "{} portfolio entries have a potential registry match", n)
            }
        }
    }
}

/// Match results ordered by descending score, with the concern prefix.
///
/// Results are only reachable through accessors so the ordering and the
/// concern prefix always agree with `concern_threshold`. A deserialized
/// report is re-classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ReportData")]
pub struct ScreeningReport {
    results: Vec<MatchResult>,
    concern_threshold: f64,
    /// Portfolio entries excluded from scoring
    pub rejected: Vec<RejectedEntry>,
}

#[derive(Deserialize)]
struct ReportData {
    results: Vec<MatchResult>,
    concern_threshold: f64,
    #[serde(default)]
    rejected: Vec<RejectedEntry>,
}

impl From<ReportData> for ScreeningReport {
    fn from(data: ReportData) -> Self {
        classify(data.results, data.concern_threshold).with_rejected(data.rejected)
    }
}

impl ScreeningReport {
    /// Every match result, highest score first
    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    /// Scores strictly above this value are concerns
    pub fn concern_threshold(&self) -> f64 {
        self.concern_threshold
    }

    fn concern_count(&self) -> usize {
        self.results.partition_point(|r| r.score > self.concern_threshold)
    }

    /// Results strictly above the threshold. Since results are sorted by
    /// descending score this is always a prefix.
    pub fn concern(&self) -> &[MatchResult] {
        &self.results[..self.concern_count()]
    }

    /// Results at or below the threshold
    pub fn no_concern(&self) -> &[MatchResult] {
        &self.results[self.concern_count()..]
    }

    /// `Clean` when no result is a concern
    pub fn outcome(&self) -> ScreeningOutcome {
        match self.concern_count() {
            0 => ScreeningOutcome::Clean,
            n => ScreeningOutcome::ConcernsFound(n),
        }
    }

    /// Attach the entries excluded from scoring
    pub fn with_rejected(mut self, rejected: Vec<RejectedEntry>) -> Self {
        self.rejected = rejected;
        self
    }
}

/// Sort results by descending score (stable, so equal scores keep input
/// order) and flag those strictly above `threshold`.
pub fn classify(mut results: Vec<MatchResult>, threshold: f64) -> ScreeningReport {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    ScreeningReport {
        results,
        concern_threshold: threshold,
        rejected: Vec::new(),
    }
}
