//! Caller-facing conversion from plain text to an EPUB archive.
//!
//! ```
//! use txtpub::{ConvertOptions, convert};
//!
//! let text = "Preface words here.\nChapter 1\nIt begins.\nChapter 2\nIt ends.";
//! let options = ConvertOptions::new("My Novel").with_min_word_count(2);
//! let epub: Vec<u8> = convert(text, &options)?;
//! assert!(epub.starts_with(b"PK"));
//! # Ok::<(), txtpub::Error>(())
//! ```

use tracing::info;

use crate::epub::Package;
use crate::error::Result;
use crate::id::IdentifierMode;
use crate::segment::{BoundaryPattern, Chapter, segment};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration for a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Words a chapter must accumulate before a boundary line may close it.
    /// Zero means every boundary line splits.
    pub min_word_count: usize,
    /// Exact boundary line (case-insensitive). `None` or empty selects the
    /// built-in `Chapter|Episode|Part <number>` pattern.
    pub custom_delimiter: Option<String>,
    /// Book title; `None` renders as [`DEFAULT_TITLE`].
    pub title: Option<String>,
    pub language: String,
    pub identifier: IdentifierMode,
    /// Deflate level for compressed members (default 6).
    pub compression_level: Option<i64>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            min_word_count: 0,
            custom_delimiter: None,
            title: None,
            language: DEFAULT_LANGUAGE.to_string(),
            identifier: IdentifierMode::default(),
            compression_level: None,
        }
    }
}

impl ConvertOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn with_min_word_count(mut self, min_word_count: usize) -> Self {
        self.min_word_count = min_word_count;
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        self.custom_delimiter = (!delimiter.is_empty()).then_some(delimiter);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_identifier(mut self, identifier: IdentifierMode) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = Some(level);
        self
    }

    pub fn boundary_pattern(&self) -> Result<BoundaryPattern> {
        BoundaryPattern::from_delimiter(self.custom_delimiter.as_deref())
    }
}

/// Segment `text` into chapters without emitting anything.
pub fn outline(text: &str, options: &ConvertOptions) -> Result<Vec<Chapter>> {
    let pattern = options.boundary_pattern()?;
    segment(text, options.min_word_count, &pattern)
}

/// Segment `text` and render every artifact, stopping short of zipping.
pub fn build_package(text: &str, options: &ConvertOptions) -> Result<Package> {
    let chapters = outline(text, options)?;
    let identifier = options.identifier.resolve(options.title(), &chapters);
    Ok(
        Package::build(options.title(), &options.language, identifier, &chapters)
            .with_compression_level(options.compression_level),
    )
}

/// Convert `text` into a complete EPUB archive.
///
/// # Errors
///
/// [`Error::NoChapters`](crate::Error::NoChapters) when the text has no
/// non-whitespace content, [`Error::InvalidDelimiter`](crate::Error::InvalidDelimiter)
/// for a delimiter that cannot be compiled, and I/O or ZIP errors from
/// packaging.
pub fn convert(text: &str, options: &ConvertOptions) -> Result<Vec<u8>> {
    let package = build_package(text, options)?;
    let bytes = package.to_bytes()?;
    info!(
        title = options.title(),
        chapters = package.chapters.len(),
        bytes = bytes.len(),
        "converted text to EPUB"
    );
    Ok(bytes)
}
