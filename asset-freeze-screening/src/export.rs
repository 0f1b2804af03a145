//! Tabular export of a screening report and registry detail links

use crate::error::Result;
use crate::report::ScreeningReport;
use crate::types::RegistryId;
use serde::{Serialize, Serializer};
use std::io::Write;
use std::path::Path;

/// Public detail page of a registry entry, the ID is appended verbatim
pub const DEFAULT_REGISTRY_DETAIL_URL: &str =
    "https://gels-avoirs.dgtresor.gouv.fr/Gels/RegistreDetail?idRegistre=";

/// Default report file name
pub const DEFAULT_REPORT_FILE: &str = "concordanceScore.csv";

/// One line of the exported report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Insured person's display name
    pub assure: String,
    /// Contract identifier
    #[serde(rename = "contractId")]
    pub contract_id: String,
    /// Best candidate name, normalized
    #[serde(rename = "bestMatch")]
    pub best_match: String,
    /// Registry entry of the best candidate
    #[serde(rename = "idRegistre")]
    pub registry_id: String,
    /// Similarity, written with a decimal comma
    #[serde(serialize_with = "decimal_comma")]
    pub score: f64,
}

const REPORT_HEADER: [&str; 5] = ["assure", "contractId", "bestMatch", "idRegistre", "score"];

/// Link from a concern to its registry page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcernLink {
    /// "Name - Contract ID"
    pub label: String,
    /// Registry detail page of the matched entry
    pub url: String,
}

/// Materialize the report as rows, in report order
pub fn report_rows(report: &ScreeningReport) -> Vec<ReportRow> {
    report
        .results()
        .iter()
        .map(|r| ReportRow {
            assure: r.portfolio_entry.display_name(),
            contract_id: r.portfolio_entry.contract_id.clone(),
            best_match: r.best_candidate.name.clone(),
            registry_id: r.best_candidate.registry_id.to_string(),
            score: r.score,
        })
        .collect()
}

// Decimal comma, as the exported sheets expect
fn decimal_comma<S: Serializer>(score: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&score.to_string().replace('.', ","))
}

/// Write the report with `;` separators and decimal commas
pub fn write_report_csv<W: Write>(writer: W, report: &ScreeningReport) -> Result<()> {
    // Header written by hand so an empty report still carries it
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(REPORT_HEADER)?;
    for row in report_rows(report) {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the report to a file, replacing it if present
pub fn write_report_path(path: impl AsRef<Path>, report: &ScreeningReport) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_report_csv(file, report)
}

/// Registry detail page of `id` under `base_url`
pub fn registry_detail_url(base_url: &str, id: &RegistryId) -> String {
    format!("{}{}", base_url, id)
}

/// One link per concern, in report order
pub fn concern_links(report: &ScreeningReport, base_url: &str) -> Vec<ConcernLink> {
    report
        .concern()
        .iter()
        .map(|r| ConcernLink {
            label: format!(
                "{} - Contract {}",
                r.portfolio_entry.display_name(),
                r.portfolio_entry.contract_id
            ),
            url: registry_detail_url(base_url, &r.best_candidate.registry_id),
        })
        .collect()
}
