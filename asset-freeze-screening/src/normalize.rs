//! Name canonicalization

/// Canonical comparable form of a name: lower-cased, trimmed, inner
/// whitespace runs collapsed to a single space.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized "given family" composite. An empty part never leaves a stray
/// separator behind.
pub fn compose_name(given: &str, family: &str) -> String {
    let composite = format!("{} {}", normalize(given), normalize(family));
    composite.trim().to_string()
}
