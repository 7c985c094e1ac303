use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

pub const TEMPLATE: (&str, &str) = ("{{", "}}");
pub const TABLE: (&str, &str) = ("{|", "|}");
pub const COMMENT: (&str, &str) = ("<!--", "-->");

lazy_static! {
    static ref COMMENT_REGEX: Regex = delimited_regex(COMMENT.0, COMMENT.1);
}

// Remove blocks by pairing the first end marker with the closest start marker before it.
// Nested blocks go from the inside out. This is not a real parser: with irregular nesting
// the wrong markers can get paired, which we accept.
pub fn remove_blocks(text: &str, start: &str, end: &str) -> String {
    substitute_blocks(text, start, end, |_| " ")
}

// Same pairing as remove_blocks, but the block is replaced by whatever `replace` makes of its
// contents. A closer without an opener before it ends the scan.
pub(crate) fn substitute_blocks<F>(text: &str, start: &str, end: &str, replace: F) -> String
where
    F: Fn(&str) -> &str,
{
    let mut text = text.to_string();

    loop {
        let end_pos = match text.find(end) {
            Some(x) => x,
            None => break,
        };

        // The start marker must be fully before the end marker
        let start_pos = match text[..end_pos].rfind(start) {
            Some(x) => x,
            None => break,
        };

        let substitute = replace(&text[start_pos + start.len()..end_pos]).to_string();
        text.replace_range(start_pos..end_pos + end.len(), &substitute);
    }

    text
}

// Comments don't nest, so every "<!-- ... -->" span is removed left to right, shortest first.
// An unterminated comment is left alone.
pub fn remove_comments(text: &str) -> String {
    COMMENT_REGEX.replace_all(text, NoExpand(" ")).into_owned()
}

// The body has to hold at least one character
fn delimited_regex(start: &str, end: &str) -> Regex {
    let pattern = format!(r"(?s){}.+?{}", regex::escape(start), regex::escape(end));
    // Both markers are escaped, so this always compiles
    Regex::new(&pattern).unwrap()
}
