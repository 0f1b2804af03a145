//! Name similarity scoring
//!
//! Scores are on a 0-100 scale. The composite score of a query against a
//! candidate averages a character-level ratio and a token-level ratio, and
//! takes the better of two variants:
//!
//! - **full**: query against the whole candidate name
//! - **extremes**: query against the candidate's first and last token only,
//!   so middle names and particles in the registry do not drag a match down
//!
//! Both inputs are expected to be normalized already. The score is not
//! symmetric; production always passes the portfolio query first.

use std::collections::BTreeSet;

/// Indel distance (insertions and deletions only) between two char slices,
/// i.e. `len(a) + len(b) - 2 * lcs(a, b)`.
fn indel_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return a.len() + b.len();
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let lcs = prev[b.len()];
    a.len() + b.len() - 2 * lcs
}

// Similarity for a distance over a combined length; nothing to compare is 0
fn normalized_similarity(distance: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        return 0.0;
    }
    (100.0 * (1.0 - distance as f64 / lensum as f64)).clamp(0.0, 100.0)
}

/// Character-level similarity scaled by the combined length of both strings.
///
/// 100 for identical non-empty strings; two empty strings score 0.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    normalized_similarity(indel_distance(&a, &b), a.len() + b.len())
}

/// [`ratio`] of both strings after sorting their tokens
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Compares the de-duplicated token sets: shared tokens count as a common
/// prefix, the leftovers of each side are compared against each other.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // One side's tokens are a subset of the other's
    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab: Vec<char> = diff_ab.join(" ").chars().collect();
    let diff_ba: Vec<char> = diff_ba.join(" ").chars().collect();
    let sect_len = intersection.join(" ").chars().count();
    let sep = usize::from(sect_len != 0);

    // Lengths of "<sect> <diff_ab>" and "<sect> <diff_ba>"
    let sect_ab_len = sect_len + sep + diff_ab.len();
    let sect_ba_len = sect_len + sep + diff_ba.len();

    let diff_ratio = normalized_similarity(
        indel_distance(&diff_ab, &diff_ba),
        sect_ab_len + sect_ba_len,
    );

    if sect_len == 0 {
        return diff_ratio;
    }

    let sect_ab_ratio = normalized_similarity(sep + diff_ab.len(), sect_len + sect_ab_len);
    let sect_ba_ratio = normalized_similarity(sep + diff_ba.len(), sect_len + sect_ba_len);

    diff_ratio.max(sect_ab_ratio).max(sect_ba_ratio)
}

/// Best of [`token_sort_ratio`] and [`token_set_ratio`]
pub fn token_ratio(a: &str, b: &str) -> f64 {
    token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

/// Mean of the character-level and token-level ratios
pub fn composite_ratio(query: &str, candidate: &str) -> f64 {
    (ratio(query, candidate) + token_ratio(query, candidate)) / 2.0
}

/// First and last token joined by a space.
///
/// A single-token name yields that token twice (`"smith"` -> `"smith smith"`);
/// a name without tokens is returned unchanged.
pub fn extremes(candidate: &str) -> String {
    let mut tokens = candidate.split_whitespace();
    match (tokens.next(), tokens.last()) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (Some(only), None) => format!("{} {}", only, only),
        _ => candidate.to_string(),
    }
}

/// Both variants of the composite score for one query/candidate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Query against the whole candidate name
    pub full: f64,
    /// Query against the candidate's first and last token
    pub extremes: f64,
}

impl ScoreBreakdown {
    /// Score `query` against both variants of `candidate`
    pub fn compute(query: &str, candidate: &str) -> Self {
        Self {
            full: composite_ratio(query, candidate),
            extremes: composite_ratio(query, &extremes(candidate)),
        }
    }

    /// Better of the two variants
    pub fn score(&self) -> f64 {
        self.full.max(self.extremes)
    }
}

/// Composite similarity of `query` against `candidate`, in [0, 100]
pub fn score(query: &str, candidate: &str) -> f64 {
    ScoreBreakdown::compute(query, candidate).score()
}
