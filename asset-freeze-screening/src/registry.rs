//! Decoding of the published asset-freeze registry (JSON)
//!
//! The feed is loosely typed: every detail field carries a `TypeChamp` tag and
//! a `Valeur` array whose object shape depends on the tag. Decoding happens
//! once, up front, into [`RegistryRecord`]s; the rest of the crate never
//! looks at raw JSON.

use crate::error::{Error, Result};
use crate::types::{
    FieldValue, Nature, RegistryField, RegistryId, RegistryRecord, ALIAS_FIELD, GIVEN_NAME_FIELD,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// `Nature` marker of natural persons
pub const NATURAL_PERSON: &str = "Personne physique";

/// `Nature` marker of legal entities
pub const LEGAL_ENTITY: &str = "Personne morale";

#[derive(Deserialize)]
struct RawDocument {
    #[serde(rename = "Publications")]
    publications: RawPublications,
}

#[derive(Deserialize)]
struct RawPublications {
    #[serde(rename = "DatePublication", default)]
    date: Option<String>,
    #[serde(rename = "PublicationDetail")]
    details: Vec<Value>,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "IdRegistre")]
    id: RawId,
    #[serde(rename = "Nature")]
    nature: String,
    #[serde(rename = "Nom")]
    name: String,
    #[serde(rename = "RegistreDetail", default)]
    detail: Option<Vec<RawDetail>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
struct RawDetail {
    #[serde(rename = "TypeChamp")]
    field_type: String,
    #[serde(rename = "Valeur", default)]
    values: Option<Vec<Value>>,
}

/// A decoded registry publication
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrySnapshot {
    /// Day of `DatePublication`, when present and parsable
    pub publication_date: Option<NaiveDate>,
    /// Entries in publication order
    pub records: Vec<RegistryRecord>,
}

impl RegistrySnapshot {
    /// Decode a registry JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: RawDocument = serde_json::from_str(json)
            .map_err(|e| Error::RegistryDecode(format!("invalid publication document: {}", e)))?;

        let publication_date = document
            .publications
            .date
            .as_deref()
            .and_then(parse_publication_date);

        let records = document
            .publications
            .details
            .into_iter()
            .enumerate()
            .map(|(position, value)| decode_record(position, value))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Decoded {} registry entries (published {})",
            records.len(),
            publication_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );

        Ok(Self {
            publication_date,
            records,
        })
    }

    /// Read and decode a registry JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("Unparsable registry publication date {:?}: {}", raw, e);
            None
        }
    }
}

fn decode_nature(raw: &str) -> Nature {
    match raw.trim() {
        NATURAL_PERSON => Nature::NaturalPerson,
        LEGAL_ENTITY => Nature::LegalEntity,
        _ => Nature::Other,
    }
}

fn decode_record(position: usize, value: Value) -> Result<RegistryRecord> {
    let raw: RawRecord = serde_json::from_value(value)
        .map_err(|e| Error::RegistryDecode(format!("entry {}: {}", position, e)))?;

    let id = match raw.id {
        RawId::Number(n) => RegistryId::new(n.to_string()),
        RawId::Text(s) => RegistryId::new(s),
    };

    let fields = raw
        .detail
        .unwrap_or_default()
        .into_iter()
        .map(|detail| decode_field(&id, detail))
        .collect();

    Ok(RegistryRecord {
        id,
        nature: decode_nature(&raw.nature),
        primary_name: raw.name,
        fields,
    })
}

fn decode_field(id: &RegistryId, detail: RawDetail) -> RegistryField {
    let values = detail.values.unwrap_or_default();
    let key = match detail.field_type.as_str() {
        GIVEN_NAME_FIELD => Some("Prenom"),
        ALIAS_FIELD => Some("Alias"),
        _ => None,
    };

    let values = match key {
        Some(key) => values
            .iter()
            .filter_map(|v| {
                let text = v.get(key).and_then(Value::as_str);
                if text.is_none() {
                    debug!("Registry entry {}: {} value without `{}`, dropped", id, detail.field_type, key);
                }
                text
            })
            .map(|text| {
                if detail.field_type == GIVEN_NAME_FIELD {
                    FieldValue::GivenName {
                        first_name: text.to_string(),
                    }
                } else {
                    FieldValue::Alias {
                        alias: text.to_string(),
                    }
                }
            })
            .collect(),
        None => values.iter().map(|_| FieldValue::Other).collect(),
    };

    RegistryField {
        field_type: detail.field_type,
        values,
    }
}
