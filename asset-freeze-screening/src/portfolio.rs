//! Loading of the portfolio to screen (delimited text)

use crate::error::{Error, Result};
use crate::types::PortfolioEntry;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Default portfolio column delimiter
pub const DEFAULT_DELIMITER: u8 = b';';

/// Contract identifier column
pub const CONTRACT_ID_COLUMN: &str = "contractId";
/// Family name column
pub const LAST_NAME_COLUMN: &str = "nom";
/// Given name column
pub const FIRST_NAME_COLUMN: &str = "prenom";

const REQUIRED_COLUMNS: [&str; 3] = [CONTRACT_ID_COLUMN, LAST_NAME_COLUMN, FIRST_NAME_COLUMN];

#[derive(Deserialize)]
struct PortfolioRow {
    #[serde(rename = "contractId")]
    contract_id: Option<String>,
    nom: Option<String>,
    prenom: Option<String>,
}

/// Parse a portfolio with a header line.
///
/// Extra columns are ignored. Empty or absent trailing cells load as empty
/// strings and are left to entry validation.
pub fn load_portfolio<R: Read>(reader: R, delimiter: u8) -> Result<Vec<PortfolioEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn(column.to_string()));
        }
    }

    let mut entries = Vec::new();
    for row in csv_reader.deserialize::<PortfolioRow>() {
        let row = row?;
        entries.push(PortfolioEntry {
            contract_id: row.contract_id.unwrap_or_default(),
            first_name: row.prenom.unwrap_or_default(),
            last_name: row.nom.unwrap_or_default(),
        });
    }

    info!("Loaded portfolio with {} entries", entries.len());
    Ok(entries)
}

/// Read a portfolio file
pub fn load_portfolio_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Vec<PortfolioEntry>> {
    let file = std::fs::File::open(path)?;
    load_portfolio(file, delimiter)
}

/// Check that an entry carries every required field
pub fn validate_entry(row: usize, entry: &PortfolioEntry) -> Result<()> {
    let checks = [
        (CONTRACT_ID_COLUMN, &entry.contract_id),
        (LAST_NAME_COLUMN, &entry.last_name),
        (FIRST_NAME_COLUMN, &entry.first_name),
    ];

    match checks.iter().find(|(_, value)| value.trim().is_empty()) {
        Some(&(field, _)) => Err(Error::InvalidPortfolioEntry { row, field }),
        None => Ok(()),
    }
}
