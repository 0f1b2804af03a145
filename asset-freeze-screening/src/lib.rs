//! Asset-freeze screening
//!
//! Screens a portfolio of named individuals against the published
//! asset-freeze (sanctions) registry for AML/CFT compliance.
//!
//! # Pipeline
//!
//! 1. **Decode**: registry JSON into typed [`RegistryRecord`]s, portfolio CSV
//!    into [`PortfolioEntry`]s
//! 2. **Index**: one candidate name per natural person ("given surname") and
//!    per multi-word alias
//! 3. **Match**: every entry against every candidate, keeping the best one
//! 4. **Classify**: sort by score and flag matches above the threshold
//!
//! A run is a pure function of registry, portfolio and threshold. The
//! candidate index is built once and shared read-only by the scoring workers.
//!
//! # Example
//!
//! ```no_run
//! use asset_freeze_screening::{
//!     load_portfolio_path, Config, RegistrySnapshot, Screener, ScreeningRequest,
//! };
//!
//! fn main() -> asset_freeze_screening::Result<()> {
//!     let config = Config::default();
//!     let registry = RegistrySnapshot::from_path("registry.json")?;
//!     let portfolio = load_portfolio_path("portfolio.csv", config.delimiter_byte())?;
//!
//!     let request = ScreeningRequest::new(registry.records, portfolio)
//!         .with_threshold(config.threshold);
//!     let report = Screener::new(&config).screen(&request)?;
//!     println!("{}", report.outcome());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod matcher;
pub mod normalize;
pub mod portfolio;
pub mod registry;
pub mod report;
pub mod screening;
pub mod similarity;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use export::{concern_links, registry_detail_url, report_rows, write_report_csv, ReportRow};
pub use index::{build_index, CandidateIndex};
pub use matcher::{best_match, select_best_matches, MatchSelector, Progress};
pub use normalize::{compose_name, normalize};
pub use portfolio::{load_portfolio, load_portfolio_path};
pub use registry::RegistrySnapshot;
pub use report::{classify, RejectedEntry, ScreeningOutcome, ScreeningReport, DEFAULT_THRESHOLD};
pub use screening::{screen, Screener, ScreeningRequest};
pub use similarity::{score, ScoreBreakdown};
pub use types::{
    Candidate, FieldValue, MatchResult, Nature, PortfolioEntry, RegistryField, RegistryId,
    RegistryRecord,
};
