// Literal replacements, applied in order.
// Bare angle brackets go before the "&gt;"/"&lt;" entities are decoded, so encoded brackets
// survive into the output while leftover tag fragments don't.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    (">", " "),
    ("<", " "),
    ("&nbsp;", " "),
    ("&gt;", ">"),
    ("&lt;", "<"),
    ("&amp;", " "),
    ("|", " "),
    ("/", " "),
    ("}}", " "),
    ("{{", " "),
    // Headers
    ("===", ""),
    ("==", ""),
    ("=", ""),
    // Bold and italics
    ("'''", ""),
    ("''", ""),
    // Lists
    ("*", ""),
    ("#", ""),
];

pub fn normalize_entities(text: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(text.to_string(), |text, &(from, to)| text.replace(from, to))
}
