//! fetch -> sanitize -> translate
//!
//! Every stage finishes before the next one starts, so cleaning never waits on the network and
//! can be run and tested without a fetcher or a translator.

use std::collections::BTreeMap;
use std::io::Write;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::fetch::{ArticleRef, FetchError, Fetcher};
use crate::sanitizer::Sanitizer;
use crate::translate::{round_trip_paragraphs, translate_paragraphs, TranslateError, Translator};


#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Fetch Error: {0}")]
    FetchError(#[from] FetchError),
    #[error("Translate Error: {0}")]
    TranslateError(#[from] TranslateError),
    #[error("Serialization Error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Raw wikitext of one article
#[derive(Clone, Debug)]
pub struct Document {
    pub lang: String,
    pub title: String,
    pub text: String,
    // Title of the article this one was reached from
    pub en_title: String,
}

/// What gets written out for every article
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub lang: String,
    pub title: String,
    pub text: Vec<String>,
    pub en_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en_translation: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roundtrip_translations: Option<BTreeMap<String, Vec<String>>>,
}

impl ArticleRecord {
    pub fn new(document: Document, text: Vec<String>) -> Self {
        Self {
            lang: document.lang,
            title: document.title,
            text,
            en_title: document.en_title,
            en_translation: None,
            roundtrip_translations: None,
        }
    }
}

// Fetch an article and its versions in `languages`, source article first
pub fn fetch_articles<F: Fetcher + ?Sized>(
    fetcher: &F,
    source_lang: &str,
    title: &str,
    languages: &[String],
) -> Result<Vec<Document>, FetchError> {
    let mut articles = vec![ArticleRef::new(source_lang, title)];

    let links = fetcher.language_links(source_lang, title)?;
    for lang in languages.iter().filter(|lang| lang.as_str() != source_lang) {
        match links.iter().find(|link| &link.lang == lang) {
            Some(link) => articles.push(link.clone()),
            None => warn!("No {} version of {}", lang, title),
        }
    }

    articles
        .into_iter()
        .map(|article| {
            info!("Fetching {}:{}", article.lang, article.title);
            let text = fetcher.fetch(&article.lang, &article.title)?;
            Ok(Document {
                lang: article.lang,
                title: article.title,
                text,
                en_title: title.to_string(),
            })
        })
        .collect()
}

// Clean all documents in parallel, keeping their order
pub fn clean_documents(sanitizer: &Sanitizer, documents: Vec<Document>) -> Vec<ArticleRecord> {
    documents
        .into_par_iter()
        .map(|document| {
            info!("Cleaning article for language {}", document.lang);
            let text = sanitizer.clean(&document.text);
            ArticleRecord::new(document, text)
        })
        .collect()
}

// The source article gets a round trip through every other language, the others get translated
// into the source language
pub fn translate_records<T: Translator + ?Sized>(
    translator: &T,
    records: &mut [ArticleRecord],
    source_lang: &str,
    languages: &[String],
) -> Result<(), TranslateError> {
    for record in records.iter_mut() {
        if record.lang != source_lang {
            info!("Translating from {} to {}", record.lang, source_lang);
            let translation =
                translate_paragraphs(translator, &record.text, &record.lang, source_lang)?;
            record.en_translation = Some(translation);
        } else {
            let mut round_trips = BTreeMap::new();
            for lang in languages.iter().filter(|lang| lang.as_str() != source_lang) {
                info!("Roundtrip to {}", lang);
                let translation = round_trip_paragraphs(translator, &record.text, source_lang, lang)?;
                round_trips.insert(lang.clone(), translation);
            }
            record.roundtrip_translations = Some(round_trips);
        }
    }

    Ok(())
}

// Fetch and clean, without translating
pub fn clean_article<F: Fetcher + ?Sized>(
    fetcher: &F,
    sanitizer: &Sanitizer,
    source_lang: &str,
    title: &str,
    languages: &[String],
) -> Result<Vec<ArticleRecord>, PipelineError> {
    info!("Fetching articles");
    let documents = fetch_articles(fetcher, source_lang, title, languages)?;

    info!("Cleaning articles");
    Ok(clean_documents(sanitizer, documents))
}

pub fn run<F: Fetcher + ?Sized, T: Translator + ?Sized>(
    fetcher: &F,
    sanitizer: &Sanitizer,
    translator: &T,
    source_lang: &str,
    title: &str,
    languages: &[String],
) -> Result<Vec<ArticleRecord>, PipelineError> {
    let mut records = clean_article(fetcher, sanitizer, source_lang, title, languages)?;
    translate_records(translator, &mut records, source_lang, languages)?;

    Ok(records)
}

pub fn write_records<W: Write>(mut writer: W, records: &[ArticleRecord]) -> Result<(), PipelineError> {
    info!("Writing out results");
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
