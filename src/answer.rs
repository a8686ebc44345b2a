/// Accepted spellings, already normalized, mapped to a weekday index (0 = Sunday).
pub const SYNONYMS: &[(&str, usize)] = &[
    ("sun", 0),
    ("sunday", 0),
    ("su", 0),
    ("mon", 1),
    ("monday", 1),
    ("m", 1),
    ("tue", 2),
    ("tues", 2),
    ("tuesday", 2),
    ("wed", 3),
    ("weds", 3),
    ("wednesday", 3),
    ("w", 3),
    ("thu", 4),
    ("thur", 4),
    ("thurs", 4),
    ("thursday", 4),
    ("fri", 5),
    ("friday", 5),
    ("f", 5),
    ("sat", 6),
    ("saturday", 6),
    ("sa", 6),
];

/// Strips surrounding whitespace and periods, then lower-cases.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_lowercase()
}

/// Returns `None` when the text names no weekday.
pub fn answer_to_index(raw: &str) -> Option<usize> {
    let key = normalize_answer(raw);
    SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|&(_, index)| index)
}
