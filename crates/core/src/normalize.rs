#![forbid(unsafe_code)]

use crate::model::NormalizedName;

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".svg", ".webp"];

/// Splits pasted bulk text into trimmed, non-empty lines. Handles both `\n`
/// and `\r\n` newlines.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Removes exact duplicate lines (case-sensitive), keeping the first
/// occurrence in input order. This is input-level dedup; the store applies
/// its own name-based dedup on top.
pub fn dedup_lines(lines: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

/// Reduces one line to its canonical `(name, clean_name)` pair: strip a
/// trailing image extension to get the name, then replace hyphens and
/// underscores with spaces to get the clean form.
///
/// Idempotent: re-normalizing a clean name is a no-op.
pub fn normalize_line(line: &str) -> NormalizedName {
    let name = strip_image_extension(line.trim());
    let clean_name = name.replace(['-', '_'], " ").trim().to_string();
    NormalizedName {
        name: name.to_string(),
        clean_name,
    }
}

fn strip_image_extension(line: &str) -> &str {
    if let Some(dot) = line.rfind('.') {
        let ext = &line[dot..];
        if IMAGE_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        {
            return &line[..dot];
        }
    }
    line
}
