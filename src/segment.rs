//! Chapter segmentation for plain-text documents.
//!
//! A document is split line by line. A line whose trimmed form matches the
//! [`BoundaryPattern`] starts a new chapter, provided the chapter being built
//! has already accumulated at least `min_word_count` words. Boundary lines
//! become chapter titles and never appear in chapter content.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::{Error, Result};

/// Title given to the leading segment, before any boundary line.
pub const DEFAULT_CHAPTER_TITLE: &str = "Introduction";

/// Section keywords followed by an Arabic or Roman number, then anything.
static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^(Chapter|Episode|Part)\s+([0-9]+|[IVXLC]+)(.*)$")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// A logical chapter of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Either [`DEFAULT_CHAPTER_TITLE`] or the trimmed boundary line.
    pub title: String,
    /// Original lines of the chapter, each followed by `\n`.
    pub content: String,
}

impl Chapter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Content lines in order, without their terminators.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.content.lines()
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.content)
    }
}

/// Rule used to recognize a line that starts a new chapter.
#[derive(Debug, Clone)]
pub struct BoundaryPattern {
    regex: Regex,
}

impl BoundaryPattern {
    /// The built-in pattern: `Chapter`, `Episode` or `Part`, then a number.
    pub fn keyword() -> Self {
        Self {
            regex: KEYWORD_RE.clone(),
        }
    }

    /// A pattern matching exactly `delimiter` as a whole line, ignoring case.
    pub fn literal(delimiter: &str) -> Result<Self> {
        let pattern = format!("^{}$", regex::escape(delimiter));
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidDelimiter {
                delimiter: delimiter.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { regex })
    }

    /// Literal pattern for a non-empty delimiter, keyword pattern otherwise.
    pub fn from_delimiter(delimiter: Option<&str>) -> Result<Self> {
        match delimiter {
            Some(d) if !d.is_empty() => Self::literal(d),
            _ => Ok(Self::keyword()),
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for BoundaryPattern {
    fn default() -> Self {
        Self::keyword()
    }
}

/// Split `text` into chapters.
///
/// The threshold is checked against the words accumulated since the last
/// split, so two short chapters merge once the counter is below
/// `min_word_count`, and a boundary below the threshold is kept as an
/// ordinary content line.
///
/// Every closed chapter is kept, even when its content is blank; only the
/// trailing chapter is dropped when it has no non-whitespace content.
///
/// # Errors
///
/// Returns [`Error::NoChapters`] when nothing survives segmentation.
pub fn segment(text: &str, min_word_count: usize, pattern: &BoundaryPattern) -> Result<Vec<Chapter>> {
    let mut chapters = Vec::new();
    let mut current = Chapter::new(DEFAULT_CHAPTER_TITLE);
    let mut word_count = 0;

    for line in split_lines(text) {
        let trimmed = line.trim();
        if pattern.is_match(trimmed) && word_count >= min_word_count {
            debug!(title = trimmed, words = word_count, "chapter boundary");
            let closed = std::mem::replace(&mut current, Chapter::new(trimmed));
            chapters.push(closed);
            word_count = 0;
        } else {
            current.content.push_str(line);
            current.content.push('\n');
            word_count += count_words(line);
        }
    }

    if !current.content.trim().is_empty() {
        chapters.push(current);
    }

    if chapters.is_empty() {
        return Err(Error::NoChapters);
    }
    Ok(chapters)
}

/// Count whitespace-delimited words.
pub fn count_words(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Split on `\r\n`, `\n` or a lone `\r`.
///
/// Unlike [`str::lines`], a trailing terminator yields a final empty line,
/// and empty input yields one empty line.
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: Some(text) }
}

/// Iterator returned by [`split_lines`].
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match rest.find(['\r', '\n']) {
            Some(pos) => {
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = Some(&rest[pos + skip..]);
                Some(&rest[..pos])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}
