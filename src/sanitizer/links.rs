use super::blocks::substitute_blocks;

// Resolve wiki links to the text a reader would see.
// Double bracket links are handled first so their brackets aren't mistaken for external links.
pub fn substitute_links(text: &str) -> String {
    let text = substitute_blocks(text, "[[", "]]", replace_internal_link);
    substitute_blocks(&text, "[", "]", replace_external_link)
}

// [[Target]], [[Target|label]], [[File:x.png|thumb|caption]]
fn replace_internal_link(block: &str) -> &str {
    match block.split_once('|') {
        // Links into other namespaces (files, categories, ...) have no readable text
        Some((target, _)) if target.contains(':') => " ",
        // Use the label, not the article name
        Some((_, label)) => label,
        None => block,
    }
}

// [http://example.com Example] or a bare [http://example.com]
fn replace_external_link(block: &str) -> &str {
    match block.split_once(' ') {
        Some((_, label)) => label,
        None => " ",
    }
}
