//! EPUB 2 generation: artifact emitters and the zip packager.

mod emit;
mod writer;

pub use emit::{CONTAINER_XML, STYLESHEET, chapter_xhtml, package_opf, toc_ncx};
pub use writer::{Package, write_epub, write_epub_to_writer};

/// Content of the `mimetype` marker entry.
pub const MIMETYPE: &str = "application/epub+zip";

/// Directory holding the package manifest and all content documents.
pub const CONTENT_DIR: &str = "OEBPS";

pub const NCX_HREF: &str = "toc.ncx";
pub const OPF_HREF: &str = "content.opf";
pub const STYLESHEET_HREF: &str = "styles.css";

/// Manifest id of the chapter at zero-based `index` (`chapter1`, `chapter2`, ...).
pub fn chapter_id(index: usize) -> String {
    format!("chapter{}", index + 1)
}

/// File name of the chapter at zero-based `index`, relative to [`CONTENT_DIR`].
pub fn chapter_href(index: usize) -> String {
    format!("chapter{}.xhtml", index + 1)
}
