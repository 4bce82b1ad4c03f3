//! Decides whether an interaction falls inside a feature's declared routes.

use shared::protocol::{InteractionEnvelope, RoutePattern};

/// Exact match, or prefix match when the glob ends with `*`. Wildcards
/// anywhere else are literal characters.
pub fn glob_matches(glob: &str, candidate: &str) -> bool {
    match glob.strip_suffix('*') {
        Some(prefix) => candidate.starts_with(prefix),
        None => glob == candidate,
    }
}

/// True when any pattern declared for the envelope's interaction type
/// matches its candidate string.
pub fn matches(envelope: &InteractionEnvelope, patterns: &[RoutePattern]) -> bool {
    let interaction_type = envelope.interaction_type();
    let candidate = envelope.candidate();
    patterns
        .iter()
        .filter(|pattern| pattern.interaction_type == interaction_type)
        .flat_map(|pattern| pattern.globs())
        .any(|glob| glob_matches(glob, candidate))
}

#[cfg(test)]
#[path = "tests/routing_tests.rs"]
mod tests;
