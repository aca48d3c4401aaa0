// src/domain/awrs.rs

/// Canonical shape of an AWRS URN: four letters then eleven digits,
/// printed as `XXXX dddd dddd ddd`.
const URN_LEN: usize = 15;
const PREFIX_LEN: usize = 4;

/// Best-effort reformatting of a free-form URN.
///
/// Anything that doesn't reduce to the canonical shape comes back
/// trimmed and uppercased, never as an error.
pub fn format_awrs(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if is_canonical(&compact) {
        return format!(
            "{} {} {} {}",
            &compact[..4],
            &compact[4..8],
            &compact[8..12],
            &compact[12..]
        );
    }

    raw.trim().to_uppercase()
}

fn is_canonical(compact: &str) -> bool {
    compact.len() == URN_LEN
        && compact[..PREFIX_LEN].chars().all(|c| c.is_ascii_alphabetic())
        && compact[PREFIX_LEN..].chars().all(|c| c.is_ascii_digit())
}
