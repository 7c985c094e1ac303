use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;


// Extension of an article's wikitext
const ARTICLE_EXTENSION: &str = "wiki";
// Extension of the file listing an article's other language versions
const LINKS_EXTENSION: &str = "links";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("IO Error: {0}")]
    IoError(#[from] io::Error),
    #[error("Article not found: {lang}:{title}")]
    NotFound { lang: String, title: String },
    #[error("Malformed language link on line {line}: {text}")]
    MalformedLink { line: usize, text: String },
}

/// An article in a given language edition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleRef {
    pub lang: String,
    pub title: String,
}

impl ArticleRef {
    pub fn new(lang: &str, title: &str) -> Self {
        Self {
            lang: lang.to_string(),
            title: title.to_string(),
        }
    }
}

/// Supplies raw wikitext, and tells which other languages have a version of an article.
pub trait Fetcher {
    fn fetch(&self, lang: &str, title: &str) -> Result<String, FetchError>;
    fn language_links(&self, lang: &str, title: &str) -> Result<Vec<ArticleRef>, FetchError>;
}

/// Articles stored on disk as `<root>/<lang>/<title>.wiki`.
///
/// The other language versions of an article are listed next to it in `<title>.links`, one
/// `lang<TAB>title` pair per line. Blank lines and lines starting with `#` are ignored, and a
/// missing `.links` file means the article has no other versions.
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn article_path(&self, lang: &str, title: &str, extension: &str) -> PathBuf {
        // Titles like "AC/DC" can't be used as file names as is
        let file_name = format!("{}.{}", title.replace('/', "_"), extension);
        self.root.join(lang).join(file_name)
    }
}

impl Fetcher for DirectoryFetcher {
    fn fetch(&self, lang: &str, title: &str) -> Result<String, FetchError> {
        let path = self.article_path(lang, title, ARTICLE_EXTENSION);
        debug!("Reading article from {}", path.display());

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound {
                lang: lang.to_string(),
                title: title.to_string(),
            },
            _ => FetchError::IoError(e),
        })
    }

    fn language_links(&self, lang: &str, title: &str) -> Result<Vec<ArticleRef>, FetchError> {
        let path = self.article_path(lang, title, LINKS_EXTENSION);
        let contents = match fs::read_to_string(&path) {
            Ok(x) => x,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        parse_language_links(&contents)
    }
}

// "de\tParis" per line
fn parse_language_links(contents: &str) -> Result<Vec<ArticleRef>, FetchError> {
    contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_number, line)| match line.split_once('\t') {
            Some((lang, title)) if !lang.trim().is_empty() && !title.trim().is_empty() => {
                Ok(ArticleRef::new(lang.trim(), title.trim()))
            }
            _ => Err(FetchError::MalformedLink {
                line: line_number,
                text: line.to_string(),
            }),
        })
        .collect()
}
