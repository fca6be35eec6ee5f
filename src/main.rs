//! txtpub - plain text to EPUB converter

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use txtpub::{
    ConvertOptions, IdentifierMode, build_package, outline, read_text_file, title_from_path, write_epub,
};

#[derive(Parser)]
#[command(name = "txtpub")]
#[command(version, about = "Convert plain text into an EPUB", long_about = None)]
#[command(after_help = "EXAMPLES:
    txtpub novel.txt                     Write novel.epub
    txtpub novel.txt -m 200              Ignore chapter headings in the first 200 words
    txtpub notes.txt -d '* * *'          Split on a custom separator line
    txtpub novel.txt --list --json       Print the detected chapters as JSON")]
struct Cli {
    /// Input text file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output EPUB file (defaults to INPUT with an .epub extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Minimum words a chapter must contain before a heading may end it
    #[arg(short, long, default_value_t = 0)]
    min_words: usize,

    /// Exact line (case-insensitive) that separates chapters
    #[arg(short, long, value_name = "TEXT")]
    delimiter: Option<String>,

    /// Book title (defaults to the input file name without .txt)
    #[arg(short, long)]
    title: Option<String>,

    /// Language tag for the package metadata
    #[arg(short, long, default_value = "en")]
    language: String,

    /// Text encoding to try when the input is not valid UTF-8
    #[arg(long, value_name = "LABEL")]
    encoding: Option<String>,

    /// Derive the identifier from the content for reproducible output
    #[arg(long)]
    content_id: bool,

    /// Print the detected chapters instead of writing an EPUB
    #[arg(long)]
    list: bool,

    /// Print the chapter list as JSON (with --list)
    #[arg(long, requires = "list")]
    json: bool,

    /// Suppress output messages
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log each detected chapter and archive member
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct OutlineEntry<'a> {
    index: usize,
    title: &'a str,
    words: usize,
    lines: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), txtpub::Error> {
    let text = read_text_file(&cli.input, cli.encoding.as_deref())?;
    debug!(path = %cli.input.display(), chars = text.len(), "read source text");

    let mut options = ConvertOptions::new(
        cli.title
            .clone()
            .unwrap_or_else(|| title_from_path(&cli.input)),
    )
    .with_min_word_count(cli.min_words)
    .with_language(cli.language.clone());
    if let Some(ref delimiter) = cli.delimiter {
        options = options.with_delimiter(delimiter.clone());
    }
    if cli.content_id {
        options = options.with_identifier(IdentifierMode::ContentHash);
    }

    if cli.list {
        return print_outline(&text, &options, cli.json);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));
    let package = build_package(&text, &options)?;
    write_epub(&package, &output)?;

    info!(
        output = %output.display(),
        chapters = package.chapters.len(),
        "wrote EPUB"
    );
    Ok(())
}

fn print_outline(text: &str, options: &ConvertOptions, json: bool) -> Result<(), txtpub::Error> {
    let chapters = outline(text, options)?;
    let entries: Vec<_> = chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| OutlineEntry {
            index: i + 1,
            title: &chapter.title,
            words: chapter.word_count(),
            lines: chapter.lines().count(),
        })
        .collect();

    if json {
        let rendered = serde_json::to_string_pretty(&entries).map_err(std::io::Error::other)?;
        println!("{rendered}");
    } else {
        for entry in &entries {
            println!("{:>4}  {:<40}  {:>7} words", entry.index, entry.title, entry.words);
        }
    }
    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("epub")
}
