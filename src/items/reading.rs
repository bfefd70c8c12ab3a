/// Normalize a reading for comparison and display.
/// Drops `(`/`)` okurigana markers and full-width spaces, then trims,
/// so `まよ(う)` becomes `まよう`.
pub fn normalize_reading(reading: &str) -> String {
    reading
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '\u{3000}'))
        .collect::<String>()
        .trim()
        .to_string()
}
