//! Verse extraction from raw poem content.
//!
//! Raw content stores a poem as hemistichs separated by `*`. A verse is two
//! consecutive hemistichs joined with a space. An unpaired trailing hemistich
//! is dropped.

/// Separator between hemistichs in raw poem content.
pub const HEMISTICH_SEPARATOR: char = '*';

/// Split raw content into trimmed, non-empty hemistichs.
pub fn hemistichs(content: &str) -> Vec<&str> {
    content
        .split(HEMISTICH_SEPARATOR)
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .collect()
}

/// Map raw poem content to its verses, in order of appearance.
///
/// ```
/// use qafiyah_publisher::dataset::extract_verses;
///
/// assert_eq!(extract_verses("a*b*c*d"), vec!["a b", "c d"]);
/// assert_eq!(extract_verses("a * b * c"), vec!["a b"]);
/// assert!(extract_verses("***").is_empty());
/// ```
pub fn extract_verses(content: &str) -> Vec<String> {
    hemistichs(content)
        .chunks_exact(2)
        .map(|pair| pair.join(" "))
        .collect()
}
