/// Separator the year meta uses between reissue and original release years.
const YEAR_SEPARATOR: &str = " • ";

/// ASCII-fold by dropping non-ASCII characters, then lower-case.
/// No transliteration and no trimming: `"Björk"` becomes `"bjrk"`.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Raw year meta with the bullet separator removed. Not parsed as a number.
pub fn clean_year(raw: &str) -> String {
    raw.replace(YEAR_SEPARATOR, "")
}

/// Suffix after the last `-` of a container id (`"review-22703"` -> `"22703"`).
pub fn id_suffix(id: &str) -> &str {
    id.rsplit('-').next().unwrap_or(id)
}
