//! Wikitext to plain paragraphs.
//! See [Sanitizer](self::Sanitizer)

pub mod blocks;
pub mod entities;
pub mod links;
pub mod paragraphs;
pub mod tags;
pub mod tail;

use lazy_static::lazy_static;

use blocks::{remove_blocks, remove_comments, TABLE, TEMPLATE};
use entities::normalize_entities;
use links::substitute_links;
use paragraphs::split_paragraphs;
use tags::remove_html_tags;
use tail::TailTruncator;


lazy_static! {
    static ref DEFAULT_SANITIZER: Sanitizer = Sanitizer::default();
}

/// Strips wiki formatting from an article and splits what is left into paragraphs.
///
/// Every pass is a plain text rewrite, there is no parse tree. Markup that can't be matched
/// (an unclosed template, a stray `]]`) is left where it is instead of failing the article.
/// The only configuration is the list of trailing sections to cut, so one instance can be
/// shared between threads.
#[derive(Clone, Debug, Default)]
pub struct Sanitizer {
    tail: TailTruncator,
}

impl Sanitizer {
    /// A sanitizer that cuts the article at any of `tail_sections`.
    pub fn new<S: AsRef<str>>(tail_sections: &[S]) -> Self {
        Self {
            tail: TailTruncator::new(tail_sections),
        }
    }

    /// The default trailing sections plus `extra_sections`.
    pub fn with_extra_sections<S: AsRef<str>>(extra_sections: &[S]) -> Self {
        let sections: Vec<&str> = tail::TAIL_SECTIONS
            .iter()
            .copied()
            .chain(extra_sections.iter().map(|section| section.as_ref()))
            .collect();
        Self::new(&sections)
    }

    pub fn clean(&self, text: &str) -> Vec<String> {
        let text = self.tail.truncate(text);

        let text = remove_blocks(text, TEMPLATE.0, TEMPLATE.1);
        let text = remove_blocks(&text, TABLE.0, TABLE.1);
        let text = substitute_links(&text);

        let text = remove_comments(&text);
        let text = remove_html_tags(&text);

        let text = normalize_entities(&text);

        split_paragraphs(&text)
    }
}

// Clean an article with the default trailing sections
pub fn clean(text: &str) -> Vec<String> {
    DEFAULT_SANITIZER.clean(text)
}
