use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::ops::ControlFlow;
use std::path::Path;

use wikipedia_cleaner::fetch::DirectoryFetcher;
use wikipedia_cleaner::pipeline::{self, ArticleRecord, Document};
use wikipedia_cleaner::sanitizer::Sanitizer;
use wikipedia_cleaner::work_queue::WorkQueue;
use wikipedia_cleaner::xml_parser::XMLParser;

#[derive(Parser, Debug)]
struct Args {
    /// Input to read: a wikitext file, a MediaWiki XML dump, or an article directory
    #[arg(short, long)]
    input_file: String,
    /// Path to the JSON file to write to
    #[arg(short, long)]
    output_file: String,
    /// What the input is
    #[arg(short, long, default_value = "wikitext")]
    mode: Mode,
    /// Language of the input. In directory mode, the language of the source article
    #[arg(short, long, default_value = "en")]
    lang: String,
    /// Article title. In wikitext mode this defaults to the input file name
    #[arg(short, long)]
    title: Option<String>,
    /// Other language versions to clean in directory mode
    #[arg(long, num_args = 1..)]
    languages: Vec<String>,
    /// More trailing sections to cut, on top of See Also, References, External Links and
    /// Further Reading
    #[arg(long)]
    tail_section: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    // A single article's wikitext
    Wikitext,
    // A MediaWiki XML export, every article gets cleaned
    Dump,
    // <root>/<lang>/<title>.wiki files, one article across languages
    Directory,
}

const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    let sanitizer = Sanitizer::with_extra_sections(&args.tail_section);

    ensure_parent_folder_exists(&args.output_file)?;

    match args.mode {
        Mode::Wikitext => clean_wikitext(&args, &sanitizer),
        Mode::Dump => clean_dump(&args, sanitizer),
        Mode::Directory => clean_directory(&args, &sanitizer),
    }
}

fn clean_wikitext(args: &Args, sanitizer: &Sanitizer) -> Result<(), Box<dyn Error>> {
    let text = std::fs::read_to_string(&args.input_file)?;
    let title = match &args.title {
        Some(x) => x.clone(),
        None => Path::new(&args.input_file)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let document = Document {
        lang: args.lang.clone(),
        title: title.clone(),
        text,
        en_title: title,
    };
    let records = pipeline::clean_documents(sanitizer, vec![document]);

    write_output(&args.output_file, &records)
}

fn clean_dump(args: &Args, sanitizer: Sanitizer) -> Result<(), Box<dyn Error>> {
    let mut work_queue = WorkQueue::new(args.output_file.clone(), move |document| {
        let text = sanitizer.clean(&document.text);
        ArticleRecord::new(document, text)
    });

    let mut xml_parser = XMLParser::from_file(&args.input_file, &args.lang)?;
    let pages = xml_parser.parse_xml(|document| match work_queue.queue(document) {
        Ok(()) => ControlFlow::Continue(()),
        Err(_) => ControlFlow::Break(()),
    })?;

    let written = work_queue.wait_for_completion()?;
    info!("Read {} articles, wrote {}", pages, written);

    Ok(())
}

fn clean_directory(args: &Args, sanitizer: &Sanitizer) -> Result<(), Box<dyn Error>> {
    let title = args
        .title
        .as_deref()
        .ok_or("--title is required in directory mode")?;

    let fetcher = DirectoryFetcher::new(&args.input_file);
    let records = pipeline::clean_article(&fetcher, sanitizer, &args.lang, title, &args.languages)?;

    write_output(&args.output_file, &records)
}

fn write_output(filename: &str, records: &[ArticleRecord]) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename)?;
    pipeline::write_records(BufWriter::new(file), records)?;
    Ok(())
}

fn ensure_parent_folder_exists(filename: &str) -> std::io::Result<()> {
    match Path::new(filename).parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_file_flag() {
        let args = Args::try_parse_from([
            "cleaner",
            "--input-file",
            "in.wiki",
            "--output-file",
            "out.json",
        ])
        .unwrap();
        assert_eq!(args.input_file, "in.wiki");
        assert!(matches!(args.mode, Mode::Wikitext));

        let args = Args::try_parse_from(["cleaner", "-i", "dump.xml", "-o", "out.json", "-m", "dump"])
            .unwrap();
        assert_eq!(args.input_file, "dump.xml");
        assert!(matches!(args.mode, Mode::Dump));
    }
}
