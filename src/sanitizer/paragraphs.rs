// One paragraph per line, trimmed, with runs of whitespace collapsed. Empty lines are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}
