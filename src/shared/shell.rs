//! POSIX shell quoting and slug helpers.
//!
//! Every variable part of a remote command (controller names, model
//! names, machine ids, acting users) goes through [`quote`] before it is
//! embedded in a command string.

/// Quotes a string so a POSIX shell treats it as a single literal word.
///
/// Strings made only of safe characters are returned unchanged. Everything
/// else is wrapped in single quotes, with embedded single quotes spliced in
/// as `'"'"'`.
pub fn quote(value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }

    if value.chars().all(is_safe_char) {
        return value.to_string();
    }

    format!("'{}'", value.replace('\'', "'\"'\"'"))
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-' | '_')
}

/// Turns an arbitrary identifier into a filesystem/URL-safe slug.
///
/// Lowercases ASCII letters, collapses every run of other characters into a
/// single `-`, and trims leading/trailing separators.
///
/// Non-ASCII letters are not transliterated; they count as separators, so
/// `café` becomes `caf`. Juju restricts controller and model names to ASCII,
/// so machine slugs never lose letters this way.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
