use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::reader::Reader;
use thiserror::Error;
use tracing::debug;

use crate::pipeline::Document;

#[cfg(test)]
mod tests;

const READ_BUFFER_SIZE: usize = 4 * 1024 * 1024;

// Technical pages about Wikipedia itself, not articles
const SKIPPED_NAMESPACES: &[&str] = &[
    "Wikipedia",
    "Portal",
    "File",
    "Template",
    "Category",
    "Draft",
    "Module",
    "MediaWiki",
    "Help",
];

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Error at position {position}: {source}")]
    XmlError {
        position: usize,
        source: quick_xml::Error,
    },
    #[error("Expected a <mediawiki> root element")]
    MissingRoot,
    #[error("Unexpected end of file inside <{0}>")]
    UnexpectedEof(String),
}

/// Streams the article pages out of a MediaWiki XML export
pub struct XMLParser<R: BufRead> {
    reader: Reader<R>,
    lang: String,
}

impl XMLParser<BufReader<File>> {
    pub fn from_file(filename: &str, lang: &str) -> Result<Self, DumpError> {
        let file = File::open(filename)?;
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        Ok(Self::new(reader, lang))
    }
}

impl<R: BufRead> XMLParser<R> {
    pub fn new(reader: R, lang: &str) -> Self {
        Self {
            reader: Reader::from_reader(reader),
            lang: lang.to_string(),
        }
    }

    // Main XML parsing function.
    // Every article is passed to `on_page`, which can stop the parsing by returning Break.
    // Returns the number of articles passed on.
    pub fn parse_xml<F>(&mut self, mut on_page: F) -> Result<usize, DumpError>
    where
        F: FnMut(Document) -> ControlFlow<()>,
    {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            match self.read_event(&mut buffer)? {
                Event::Start(e) => {
                    if e.name().into_inner() == b"mediawiki" {
                        return self.parse_mediawiki(&mut on_page);
                    } else {
                        return Err(DumpError::MissingRoot);
                    }
                }
                Event::Empty(_) | Event::End(_) | Event::Eof => return Err(DumpError::MissingRoot),
                // XML declaration, comments, whitespace
                _ => (),
            }
        }
    }

    // Parse the body of the XML file
    fn parse_mediawiki<F>(&mut self, on_page: &mut F) -> Result<usize, DumpError>
    where
        F: FnMut(Document) -> ControlFlow<()>,
    {
        let mut buffer = Vec::new();
        let mut count = 0;

        loop {
            buffer.clear();
            match self.read_event(&mut buffer)? {
                Event::Start(e) => {
                    let tag = e.name().into_inner();
                    match tag {
                        b"page" => {
                            if let Some(document) = self.parse_page()? {
                                count += 1;
                                if on_page(document).is_break() {
                                    break;
                                }
                            }
                        }
                        b"siteinfo" => self.skip(tag)?,
                        _ => {
                            debug!("Unknown tag: {}", String::from_utf8_lossy(tag));
                            self.skip(tag)?;
                        }
                    }
                }
                Event::End(e) if e.name().into_inner() == b"mediawiki" => break,
                Event::Eof => break,
                _ => (),
            }
        }

        Ok(count)
    }

    // Returns None for pages that aren't articles
    fn parse_page(&mut self) -> Result<Option<Document>, DumpError> {
        let mut buffer = Vec::new();
        let mut title = String::new();
        let mut text = String::new();

        loop {
            buffer.clear();
            match self.read_event(&mut buffer)? {
                Event::Empty(e) => {
                    if e.name().into_inner() == b"redirect" {
                        // We don't care about redirect pages
                        self.skip(b"page")?;
                        return Ok(None);
                    }
                }
                Event::Start(e) => {
                    let tag = e.name().into_inner();
                    match tag {
                        b"title" => title = self.read_text(tag)?,
                        b"revision" => text = self.parse_revision()?,
                        b"ns" | b"id" => self.skip(tag)?,
                        _ => {
                            debug!("Unknown tag: {}", String::from_utf8_lossy(tag));
                            self.skip(tag)?;
                        }
                    }
                }
                Event::End(e) if e.name().into_inner() == b"page" => break,
                Event::Eof => return Err(DumpError::UnexpectedEof("page".to_string())),
                _ => (),
            }
        }

        if is_skipped_title(&title) {
            debug!("Skipping page: {}", title);
            return Ok(None);
        }

        Ok(Some(Document {
            lang: self.lang.clone(),
            title: title.clone(),
            text,
            en_title: title,
        }))
    }

    fn parse_revision(&mut self) -> Result<String, DumpError> {
        let mut buffer = Vec::new();
        let mut text = String::new();

        loop {
            buffer.clear();
            match self.read_event(&mut buffer)? {
                Event::Start(e) => {
                    let tag = e.name().into_inner();
                    match tag {
                        b"text" => text = self.read_text(tag)?,
                        // id, timestamp, contributor, comment, model, format, sha1, ...
                        _ => self.skip(tag)?,
                    }
                }
                Event::End(e) if e.name().into_inner() == b"revision" => break,
                Event::Eof => return Err(DumpError::UnexpectedEof("revision".to_string())),
                _ => (),
            }
        }

        Ok(text)
    }

    // Unescaped text up to the closing tag
    fn read_text(&mut self, tag: &[u8]) -> Result<String, DumpError> {
        let mut buffer = Vec::new();
        let mut text = String::new();

        loop {
            buffer.clear();
            match self.read_event(&mut buffer)? {
                Event::Text(e) => {
                    let unescaped = e.unescape().map_err(|e| self.xml_error(e))?;
                    text.push_str(&unescaped);
                }
                Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
                Event::End(e) if e.name().into_inner() == tag => break,
                Event::Eof => {
                    let tag = String::from_utf8_lossy(tag).into_owned();
                    return Err(DumpError::UnexpectedEof(tag));
                }
                _ => (),
            }
        }

        Ok(text)
    }

    fn skip(&mut self, tag: &[u8]) -> Result<(), DumpError> {
        let mut garbage = Vec::new();
        self.reader
            .read_to_end_into(QName(tag), &mut garbage)
            .map_err(|e| self.xml_error(e))?;
        Ok(())
    }

    fn read_event<'b>(&mut self, buffer: &'b mut Vec<u8>) -> Result<Event<'b>, DumpError> {
        self.reader
            .read_event_into(buffer)
            .map_err(|e| self.xml_error(e))
    }

    fn xml_error(&self, source: quick_xml::Error) -> DumpError {
        DumpError::XmlError {
            position: self.reader.buffer_position(),
            source,
        }
    }
}

fn is_skipped_title(title: &str) -> bool {
    let in_skipped_namespace = title
        .split_once(':')
        .map_or(false, |(namespace, _)| SKIPPED_NAMESPACES.contains(&namespace));

    in_skipped_namespace || title.to_lowercase().ends_with("(disambiguation)")
}
