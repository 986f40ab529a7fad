//! Brazilian phone number masks and e-mail shape checks.

use super::fiscal::sanitize;

/// Format a stored phone number: 11 digits as `(XX) XXXXX-XXXX` (mobile),
/// 10 digits as `(XX) XXXX-XXXX` (landline). Anything else is returned
/// unchanged.
pub fn format_phone(input: &str) -> String {
    let d = sanitize(input);
    match d.len() {
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => input.to_string(),
    }
}

/// Progressive phone mask for live typing, truncated to 11 digits.
pub fn mask_phone(input: &str) -> String {
    let d: String = sanitize(input).chars().take(11).collect();
    match d.len() {
        0..=2 => d,
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

/// A phone number is accepted with 10 (landline) or 11 (mobile) digits.
pub fn is_valid_phone(input: &str) -> bool {
    matches!(sanitize(input).len(), 10 | 11)
}

/// Shape check for `local@domain.tld`.
///
/// No whitespace, exactly one `@`, and a domain with a `.` that has text
/// on both sides of it.
pub fn is_valid_email(input: &str) -> bool {
    if input.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
