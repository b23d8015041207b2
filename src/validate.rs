//! Input validation helpers for URLs, titles and uploads

pub const MEGABYTE: u64 = 1024 * 1024;

/// Check for a standard web URL: `http://` or `https://` with a non-empty
/// remainder
pub fn is_valid_web_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));

    matches!(rest, Some(rest) if !rest.is_empty())
}

/// Check for a protocol URL (app links like `discord://`): a scheme of the
/// form `[a-zA-Z][a-zA-Z0-9+.-]*` followed by `://`
pub fn is_valid_protocol_url(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        }
        _ => false,
    }
}

/// Check a title is non-empty after trimming
pub fn is_valid_title(title: &str) -> bool {
    !title.trim().is_empty()
}

/// Format a byte count for display: B, KB or MB
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < MEGABYTE {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / MEGABYTE as f64)
    }
}
