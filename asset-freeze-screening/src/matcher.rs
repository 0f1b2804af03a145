//! Best-match selection of portfolio entries against the candidate index

use crate::error::{Error, Result};
use crate::index::CandidateIndex;
use crate::normalize::compose_name;
use crate::similarity::score;
use crate::types::{Candidate, MatchResult, PortfolioEntry};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scoring progress, reported once per screened entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Entries scored so far
    pub completed: usize,
    /// Entries in the run
    pub total: usize,
}

impl Progress {
    /// Completed share in [0, 1], 1 for an empty run
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Progress callback, may be invoked from several worker threads
pub type ProgressFn<'a> = &'a (dyn Fn(Progress) + Sync);

/// Highest-scoring candidate for a normalized query.
///
/// Ties keep the earliest candidate in index order. `None` only when the
/// index is empty.
pub fn best_match<'a>(query: &str, candidates: &'a [Candidate]) -> Option<(&'a Candidate, f64)> {
    let mut best: Option<(&Candidate, f64)> = None;

    for candidate in candidates {
        let s = score(query, &candidate.name);
        match best {
            Some((_, best_score)) if s <= best_score => {}
            _ => best = Some((candidate, s)),
        }
    }

    best
}

/// Scores every portfolio entry against a shared, read-only index
pub struct MatchSelector<'a> {
    index: &'a CandidateIndex,
    parallel: bool,
}

impl<'a> MatchSelector<'a> {
    /// Selector over `index`, parallel by default
    pub fn new(index: &'a CandidateIndex) -> Self {
        Self {
            index,
            parallel: true,
        }
    }

    /// Run entries on rayon's pool (default) or sequentially
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// One result per entry, in portfolio order
    pub fn select(
        &self,
        portfolio: &[PortfolioEntry],
        progress: Option<ProgressFn<'_>>,
    ) -> Result<Vec<MatchResult>> {
        if self.index.is_empty() {
            return Err(Error::NoCandidatesAvailable);
        }

        let total = portfolio.len();
        let completed = AtomicUsize::new(0);
        let candidates = self.index.candidates();

        let screen_one = |entry: &PortfolioEntry| -> Option<MatchResult> {
            let query = compose_name(&entry.first_name, &entry.last_name);
            let (candidate, s) = best_match(&query, candidates)?;

            if let Some(report) = progress {
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                report(Progress { completed: done, total });
            }

            Some(MatchResult {
                portfolio_entry: entry.clone(),
                best_candidate: candidate.clone(),
                score: s,
            })
        };

        let results: Option<Vec<MatchResult>> = if self.parallel {
            portfolio.par_iter().map(screen_one).collect()
        } else {
            portfolio.iter().map(screen_one).collect()
        };

        results.ok_or(Error::NoCandidatesAvailable)
    }
}

/// Best candidate for each entry, same order as `portfolio`
pub fn select_best_matches(
    portfolio: &[PortfolioEntry],
    index: &CandidateIndex,
) -> Result<Vec<MatchResult>> {
    MatchSelector::new(index).select(portfolio, None)
}
