use thiserror::Error;
use tracing::debug;


// The translation service refuses longer requests
pub const MAX_TRANSLATE_CHARS: usize = 5000;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Text longer than {max} characters - {len}")]
    TooLong { len: usize, max: usize },
    #[error("Bad result {0}")]
    BadStatus(u16),
    #[error("Translation service error: {0}")]
    Service(String),
}

/// A remote translation service. One call translates one paragraph.
///
/// Implementations report a non-success response with [TranslateError::BadStatus]. Callers
/// should go through [translate_checked] so oversized paragraphs never reach the service.
pub trait Translator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError>;
}

// Reject text the service would refuse, instead of cutting it and losing meaning
pub fn translate_checked<T: Translator + ?Sized>(
    translator: &T,
    text: &str,
    source: &str,
    target: &str,
) -> Result<String, TranslateError> {
    let len = text.chars().count();
    if len > MAX_TRANSLATE_CHARS {
        return Err(TranslateError::TooLong {
            len,
            max: MAX_TRANSLATE_CHARS,
        });
    }

    translator.translate(text, source, target)
}

pub fn translate_paragraphs<T: Translator + ?Sized>(
    translator: &T,
    paragraphs: &[String],
    source: &str,
    target: &str,
) -> Result<Vec<String>, TranslateError> {
    paragraphs
        .iter()
        .map(|paragraph| {
            debug!("Translating paragraph from {} to {}", source, target);
            translate_checked(translator, paragraph, source, target)
        })
        .collect()
}

// Translate every paragraph to `via` and back again
pub fn round_trip_paragraphs<T: Translator + ?Sized>(
    translator: &T,
    paragraphs: &[String],
    source: &str,
    via: &str,
) -> Result<Vec<String>, TranslateError> {
    paragraphs
        .iter()
        .map(|paragraph| {
            debug!("Round trip of paragraph through {}", via);
            let translated = translate_checked(translator, paragraph, source, via)?;
            translate_checked(translator, &translated, via, source)
        })
        .collect()
}
