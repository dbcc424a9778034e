//! Input normalisation helpers shared by the domain models

/// Maximum length of a URL name
pub const MAX_NAME_LENGTH: usize = 250;

/// Turn a free-form title into a URL name: lowercase ASCII alphanumerics
/// separated by single dashes. Non-ASCII characters are dropped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || matches!(ch, '-' | '_' | '.' | '/' | '+' | '&' | ',') {
            pending_dash = true;
        }
    }

    slug.truncate(MAX_NAME_LENGTH);
    slug.trim_end_matches('-').to_string()
}

/// A valid name is non-empty, lowercase ASCII alphanumerics and inner dashes.
pub fn is_valid_slug(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LENGTH
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// ISO 4217 style code: exactly three ASCII letters, returned upper-cased.
pub fn normalize_currency(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}
