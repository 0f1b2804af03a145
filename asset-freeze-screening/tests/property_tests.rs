//! Property-based tests for normalization and scoring
//!
//! - Normalization is idempotent
//! - Scores stay on the 0-100 scale
//! - A non-empty name always matches itself at 100
//! - Classification keeps results sorted and the concern set a prefix

use asset_freeze_screening::{
    classify, normalize, score, Candidate, MatchResult, PortfolioEntry, RegistryId,
    ScoreBreakdown,
};
use proptest::prelude::*;

/// Names with mixed case, accents, and irregular spacing
fn raw_name_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,2}[A-Za-zÀ-ÿ'-]{0,10}([ \t]{1,3}[A-Za-zÀ-ÿ'-]{1,10}){0,3}[ \t]{0,2}"
}

fn normalized_name_strategy() -> impl Strategy<Value = String> {
    raw_name_strategy().prop_map(|s| normalize(&s))
}

fn match_result(contract: String, score: f64) -> MatchResult {
    MatchResult {
        portfolio_entry: PortfolioEntry::new(contract, "Jean", "Dupont"),
        best_candidate: Candidate {
            registry_id: RegistryId::new("1"),
            name: "jean dupont".to_string(),
        },
        score,
    }
}

proptest! {
    #[test]
    fn prop_normalize_idempotent(name in raw_name_strategy()) {
        let once = normalize(&name);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_normalized_has_no_stray_whitespace(name in raw_name_strategy()) {
        let normalized = normalize(&name);
        prop_assert_eq!(normalized.trim(), normalized.as_str());
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.contains('\t'));
    }

    #[test]
    fn prop_score_bounded(a in normalized_name_strategy(), b in normalized_name_strategy()) {
        let s = score(&a, &b);
        prop_assert!((0.0..=100.0).contains(&s), "score {} out of range", s);

        let breakdown = ScoreBreakdown::compute(&a, &b);
        prop_assert!((0.0..=100.0).contains(&breakdown.full));
        prop_assert!((0.0..=100.0).contains(&breakdown.extremes));
        prop_assert_eq!(breakdown.score(), breakdown.full.max(breakdown.extremes));
    }

    #[test]
    fn prop_self_match_is_100(name in raw_name_strategy()) {
        let normalized = normalize(&name);
        prop_assume!(!normalized.is_empty());
        prop_assert!((score(&normalized, &normalized) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn prop_classification_sorted_with_concern_prefix(
        scores in prop::collection::vec(0.0f64..=100.0, 0..40),
        threshold in 0.0f64..=100.0,
    ) {
        let results: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| match_result(format!("C{i}"), *s))
            .collect();
        let report = classify(results, threshold);

        prop_assert_eq!(report.results().len(), scores.len());
        prop_assert!(report.results().windows(2).all(|w| w[0].score >= w[1].score));
        prop_assert!(report.concern().iter().all(|r| r.score > threshold));
        prop_assert!(report.no_concern().iter().all(|r| r.score <= threshold));
        prop_assert_eq!(
            report.concern().len(),
            scores.iter().filter(|s| **s > threshold).count()
        );
    }
}
