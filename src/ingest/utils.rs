/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Canonical form of a column header: trimmed and lower-cased.
pub fn header_key(raw: &str) -> String {
    clean_str(raw).to_lowercase()
}

/// Lower-case file extension, if any.
pub fn extension_of(path: &std::path::Path) -> Option<String> {
    path.extension()
        .and_then(|os| os.to_str())
        .map(|s| s.to_ascii_lowercase())
}
