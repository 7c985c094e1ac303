use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::multispace0;
use nom::combinator::recognize;
use nom::sequence::{preceded, tuple};
use nom::IResult;

pub fn remove_html_tags(text: &str) -> String {
    let text = remove_self_closing_tags(text);
    remove_paired_tags(&text)
}

// Remove "<... />" spans, starting from the last '<' seen before the "/>".
// We operate on u8 instead of chars: every byte we look for is ASCII, and UTF8 guarantees that
// multibyte sequences never contain ASCII bytes, so every cut lands on a char boundary.
fn remove_self_closing_tags(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut new_string = String::with_capacity(text.len());
    let mut last_block_end = 0;
    let mut start_pos = None;

    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'<' {
            start_pos = Some(pos);
        } else if bytes[pos..].starts_with(b"/>") {
            // A "/>" without an opening '<' stays in the text
            if let Some(start) = start_pos.take() {
                new_string += &text[last_block_end..start];
                new_string.push(' ');
                last_block_end = pos + 2;
            }
            pos += 2;
            continue;
        }
        pos += 1;
    }
    new_string += &text[last_block_end..];

    new_string
}

// Remove "<name ...>...</name>" spans, shortest first, left to right
fn remove_paired_tags(text: &str) -> String {
    let mut new_string = String::with_capacity(text.len());
    let mut last_end = 0;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('<') {
        let start = pos + offset;
        match paired_tag_len(&text[start..]) {
            Some(len) => {
                new_string += &text[last_end..start];
                new_string.push(' ');
                last_end = start + len;
                pos = last_end;
            }
            None => pos = start + 1,
        }
    }
    new_string += &text[last_end..];

    new_string
}

// Length of the paired tag at the start of `input`, if there is one.
// If the whole tag name has no closing tag, shorter prefixes of it are tried, longest first.
fn paired_tag_len(input: &str) -> Option<usize> {
    let (rest, name) = opening_tag_name(input).ok()?;
    let name_start = input.len() - rest.len() - name.len();

    let prefix_ends = name
        .char_indices()
        .map(|(i, _)| i)
        .filter(|&i| i > 0)
        .chain(std::iter::once(name.len()))
        .rev();

    for prefix_end in prefix_ends {
        let name = &name[..prefix_end];
        let body_start = name_start + prefix_end;

        // The tag needs at least one character between its name and the closing tag
        let first_char = match input[body_start..].chars().next() {
            Some(c) => c,
            None => return None,
        };
        let search_start = body_start + first_char.len_utf8();

        for (slash, _) in input[search_start..].match_indices('/') {
            let closing_start = search_start + slash;
            if let Ok((_, closing)) = closing_tag(&input[closing_start..], name) {
                return Some(closing_start + closing.len());
            }
        }
    }

    None
}

// "<ref", "< span"
fn opening_tag_name(input: &str) -> IResult<&str, &str> {
    preceded(tuple((tag("<"), multispace0)), take_while1(is_word_char))(input)
}

// "/ref>", "/ref >"
fn closing_tag<'a>(input: &'a str, name: &str) -> IResult<&'a str, &'a str> {
    recognize(tuple((tag("/"), tag(name), multispace0, tag(">"))))(input)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
