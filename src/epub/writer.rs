use std::io::{Cursor, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::Result;
use crate::segment::Chapter;

use super::emit::{CONTAINER_XML, STYLESHEET, chapter_xhtml, package_opf, toc_ncx};
use super::{CONTENT_DIR, MIMETYPE, NCX_HREF, OPF_HREF, STYLESHEET_HREF, chapter_href};

const DEFAULT_COMPRESSION_LEVEL: i64 = 6;

/// Every emitted artifact of one conversion, ready to be zipped.
///
/// Artifacts are rendered once in [`Package::build`] and never modified
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Bare identifier, embedded as `urn:uuid:<identifier>`.
    pub identifier: String,
    pub opf: String,
    pub ncx: String,
    /// Chapter documents in reading order; index `i` is `chapter{i+1}.xhtml`.
    pub chapters: Vec<String>,
    compression_level: Option<i64>,
}

impl Package {
    /// Render all artifacts for `chapters`.
    pub fn build(title: &str, language: &str, identifier: impl Into<String>, chapters: &[Chapter]) -> Self {
        let identifier = identifier.into();
        Self {
            opf: package_opf(title, language, &identifier, chapters),
            ncx: toc_ncx(title, &identifier, chapters),
            chapters: chapters.iter().map(|c| chapter_xhtml(c, language)).collect(),
            identifier,
            compression_level: None,
        }
    }

    /// Deflate level (1-9) for compressed members; defaults to 6.
    pub fn with_compression_level(mut self, level: Option<i64>) -> Self {
        self.compression_level = level;
        self
    }

    /// Archive members after `mimetype`, in write order.
    pub fn members(&self) -> Vec<(String, &[u8])> {
        let mut members = Vec::with_capacity(self.chapters.len() + 4);
        members.push(("META-INF/container.xml".to_string(), CONTAINER_XML.as_bytes()));
        members.push((format!("{CONTENT_DIR}/{OPF_HREF}"), self.opf.as_bytes()));
        members.push((format!("{CONTENT_DIR}/{NCX_HREF}"), self.ncx.as_bytes()));
        for (index, document) in self.chapters.iter().enumerate() {
            members.push((
                format!("{CONTENT_DIR}/{}", chapter_href(index)),
                document.as_bytes(),
            ));
        }
        members.push((format!("{CONTENT_DIR}/{STYLESHEET_HREF}"), STYLESHEET.as_bytes()));
        members
    }

    /// Zip the package into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        write_epub_to_writer(self, &mut cursor)?;
        Ok(cursor.into_inner())
    }
}

/// Write a [`Package`] to an EPUB file on disk.
///
/// The archive is assembled in memory first, so a failure never leaves a
/// truncated file behind.
pub fn write_epub<P: AsRef<Path>>(package: &Package, path: P) -> Result<()> {
    let bytes = package.to_bytes()?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Write a [`Package`] to any [`Write`] + [`Seek`] destination.
pub fn write_epub_to_writer<W: Write + Seek>(package: &Package, writer: W) -> Result<()> {
    let mut zip = ZipWriter::new(writer);

    // Fixed timestamps keep archives reproducible for a fixed identifier
    let base = SimpleFileOptions::default().last_modified_time(DateTime::default());
    let stored = base.compression_method(CompressionMethod::Stored);
    let deflated = base
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(
            package.compression_level.unwrap_or(DEFAULT_COMPRESSION_LEVEL),
        ));

    // mimetype must be first and uncompressed
    zip.start_file("mimetype", stored)?;
    zip.write_all(MIMETYPE.as_bytes())?;

    for (path, data) in package.members() {
        debug!(path = %path, bytes = data.len(), "writing archive member");
        zip.start_file(path, deflated)?;
        zip.write_all(data)?;
    }

    zip.finish()?;
    Ok(())
}
