//! Candidate index: flat list of normalized names derived from the registry

use crate::normalize::{compose_name, normalize};
use crate::types::{Candidate, Nature, RegistryRecord};
use tracing::{debug, info};

/// Read-only, insertion-ordered list of candidate names.
///
/// Built once per run; scoring workers share it by reference.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    candidates: Vec<Candidate>,
}

impl CandidateIndex {
    /// Walk registry records in order and emit, for each natural person, the
    /// "given surname" composite followed by every multi-word alias.
    pub fn build(records: &[RegistryRecord]) -> Self {
        let mut candidates = Vec::new();
        let mut persons = 0usize;

        for record in records {
            if record.nature != Nature::NaturalPerson {
                continue;
            }
            persons += 1;

            if let Some(given) = record.given_name() {
                let name = compose_name(given, &record.primary_name);
                if name.is_empty() {
                    debug!("Registry entry {} has a blank given name and surname", record.id);
                } else {
                    candidates.push(Candidate {
                        registry_id: record.id.clone(),
                        name,
                    });
                }
            }

            for alias in record.aliases() {
                // Single-word aliases are not indexed
                if alias.split_whitespace().count() > 1 {
                    candidates.push(Candidate {
                        registry_id: record.id.clone(),
                        name: normalize(alias),
                    });
                }
            }
        }

        info!(
            "Built candidate index with {} names from {} natural persons ({} registry entries)",
            candidates.len(),
            persons,
            records.len()
        );

        Self { candidates }
    }

    /// Candidates in index order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of candidate names
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True when the registry yielded no candidate
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterate candidates in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }
}

impl From<Vec<Candidate>> for CandidateIndex {
    fn from(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

/// Convenience wrapper returning the candidates as a plain vector
pub fn build_index(records: &[RegistryRecord]) -> Vec<Candidate> {
    CandidateIndex::build(records).candidates
}
