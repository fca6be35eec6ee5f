//! # txtpub
//!
//! Turn an unstructured plain-text document into a valid EPUB 2 package.
//!
//! ## Pipeline
//!
//! 1. [`segment`] splits the text into [`Chapter`]s at lines matching a
//!    [`BoundaryPattern`], honoring a minimum word count per chapter.
//! 2. [`IdentifierMode`] picks the package identifier.
//! 3. The emitters in [`epub`] render `content.opf`, `toc.ncx`, one XHTML
//!    document per chapter and a shared stylesheet.
//! 4. [`Package`] zips everything, `mimetype` first and uncompressed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use txtpub::{ConvertOptions, convert_file};
//!
//! let options = ConvertOptions::default().with_min_word_count(100);
//! let epub = convert_file("novel.txt", &options)?;
//! std::fs::write("novel.epub", epub)?;
//! # Ok::<(), txtpub::Error>(())
//! ```
//!
//! Custom delimiters match a whole line, ignoring case:
//!
//! ```
//! use txtpub::{ConvertOptions, outline};
//!
//! let options = ConvertOptions::new("Scenes").with_delimiter("* * *");
//! let chapters = outline("Opening.\n* * *\nSecond scene.", &options)?;
//! assert_eq!(chapters.len(), 2);
//! assert_eq!(chapters[1].title, "* * *");
//! # Ok::<(), txtpub::Error>(())
//! ```

pub mod convert;
pub mod epub;
pub mod error;
pub mod id;
pub mod segment;
pub mod source;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use convert::{ConvertOptions, build_package, convert, outline};
pub use epub::{Package, write_epub, write_epub_to_writer};
pub use error::{Error, Result};
pub use id::{IdentifierMode, content_id, generate_id};
pub use segment::{BoundaryPattern, Chapter, DEFAULT_CHAPTER_TITLE, count_words, segment};
pub use source::{convert_file, read_text_file, title_from_path};
