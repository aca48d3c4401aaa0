// src/domain/status.rs

pub const APPROVED: &str = "Approved";
pub const NOT_APPROVED: &str = "Not Approved";
pub const NO_MATCH: &str = "No Match";
pub const DEREGISTERED: &str = "Deregistered";
pub const UNKNOWN: &str = "Unknown";
pub const ERROR: &str = "Error";

/// Maps the registry's free-text status onto the canonical vocabulary.
///
/// Matching is case-insensitive on the trimmed text. Text with no rule
/// is passed through trimmed, not remapped.
///
/// "not applicable" maps to `Approved`. Downstream consumers rely on this
/// so it must stay as it is.
pub fn normalise_status(raw: &str) -> String {
    let trimmed = raw.trim();

    let canonical = match trimmed.to_lowercase().as_str() {
        "" => UNKNOWN,
        "approved" | "not applicable" => APPROVED,
        "not approved" | "no longer approved" | "no-longer approved" => NOT_APPROVED,
        "no match" | "no results found" => NO_MATCH,
        "deregistered" | "removed" | "revoked" | "application withdrawn" => DEREGISTERED,
        _ => return trimmed.to_string(),
    };

    canonical.to_string()
}
