//! Core data model: registry records, candidates, portfolio entries and matches

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type carrying a person's given name
pub const GIVEN_NAME_FIELD: &str = "PRENOM";

/// Field type carrying the aliases of a listed person or entity
pub const ALIAS_FIELD: &str = "ALIAS";

/// Identifier of a registry entry (`IdRegistre`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryId(String);

impl RegistryId {
    /// Create a registry ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// String form, as used in registry detail links
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Legal nature of a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nature {
    /// `Personne physique`, the only nature that yields candidates
    NaturalPerson,
    /// `Personne morale`
    LegalEntity,
    /// Vessels and any other marker
    Other,
}

/// One value of a registry detail field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Value of a `PRENOM` field
    GivenName {
        /// Given name as published
        first_name: String,
    },
    /// Value of an `ALIAS` field
    Alias {
        /// Alternate name as published
        alias: String,
    },
    /// Value of a field the screening does not read
    Other,
}

/// A typed registry detail field (`TypeChamp` + its `Valeur` list)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryField {
    /// `TypeChamp`, e.g. `PRENOM` or `ALIAS`
    pub field_type: String,
    /// Values in publication order
    pub values: Vec<FieldValue>,
}

impl RegistryField {
    /// Field of `field_type` holding `values`
    pub fn new(field_type: impl Into<String>, values: Vec<FieldValue>) -> Self {
        Self {
            field_type: field_type.into(),
            values,
        }
    }
}

/// A published registry entry, immutable for the duration of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryRecord {
    /// `IdRegistre`
    pub id: RegistryId,
    /// Natural person, legal entity or other
    pub nature: Nature,
    /// Surname for natural persons, company name otherwise
    pub primary_name: String,
    /// Detail fields in publication order
    pub fields: Vec<RegistryField>,
}

impl RegistryRecord {
    /// First field of the given type, if any
    pub fn field(&self, field_type: &str) -> Option<&RegistryField> {
        self.fields.iter().find(|f| f.field_type == field_type)
    }

    /// First given name of the first `PRENOM` field
    pub fn given_name(&self) -> Option<&str> {
        self.field(GIVEN_NAME_FIELD)?
            .values
            .iter()
            .find_map(|v| match v {
                FieldValue::GivenName { first_name } => Some(first_name.as_str()),
                _ => None,
            })
    }

    /// Aliases listed in the first `ALIAS` field
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.field(ALIAS_FIELD)
            .into_iter()
            .flat_map(|f| f.values.iter())
            .filter_map(|v| match v {
                FieldValue::Alias { alias } => Some(alias.as_str()),
                _ => None,
            })
    }
}

/// A normalized name derived from a registry record, the unit of comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Registry entry the name was derived from
    pub registry_id: RegistryId,
    /// Normalized name
    pub name: String,
}

/// A portfolio line to screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Contract the insured person belongs to
    pub contract_id: String,
    /// Given name (`prenom`)
    pub first_name: String,
    /// Family name (`nom`)
    pub last_name: String,
}

impl PortfolioEntry {
    /// Entry from contract ID, given name and family name
    pub fn new(
        contract_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            contract_id: contract_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Name as shown to analysts: trimmed given name then family name
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Best registry candidate for one portfolio entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Screened entry
    pub portfolio_entry: PortfolioEntry,
    /// Highest-scoring candidate, earliest in index order on ties
    pub best_candidate: Candidate,
    /// Similarity in [0, 100]
    pub score: f64,
}
