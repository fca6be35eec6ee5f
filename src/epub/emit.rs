//! XML and CSS artifacts of an EPUB 2 package.
//!
//! Every function here is pure: the same chapters, title and identifier
//! always produce the same bytes. User-supplied strings are escaped before
//! they reach markup.

use crate::segment::Chapter;
use crate::util::escape_xml;

use super::{NCX_HREF, STYLESHEET_HREF, chapter_href, chapter_id};

/// Container.xml template.
pub const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Shared stylesheet linked from every chapter document.
pub const STYLESHEET: &str =
    "body { font-family: serif; margin: 1em; } p { margin: 1em 0; } h1 { text-align: center; }\n";

/// Generate content.opf: metadata, manifest and spine.
pub fn package_opf(title: &str, language: &str, identifier: &str, chapters: &[Chapter]) -> String {
    let mut opf = String::new();

    opf.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
"#,
    );
    opf.push_str(&format!("    <dc:title>{}</dc:title>\n", escape_xml(title)));
    opf.push_str(&format!(
        "    <dc:language>{}</dc:language>\n",
        escape_xml(language)
    ));
    opf.push_str(&format!(
        "    <dc:identifier id=\"BookId\">urn:uuid:{}</dc:identifier>\n",
        escape_xml(identifier)
    ));
    opf.push_str("  </metadata>\n");

    opf.push_str("  <manifest>\n");
    opf.push_str(&format!(
        "    <item id=\"ncx\" href=\"{NCX_HREF}\" media-type=\"application/x-dtbncx+xml\"/>\n"
    ));
    opf.push_str(&format!(
        "    <item id=\"css\" href=\"{STYLESHEET_HREF}\" media-type=\"text/css\"/>\n"
    ));
    for index in 0..chapters.len() {
        opf.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>\n",
            chapter_id(index),
            chapter_href(index)
        ));
    }
    opf.push_str("  </manifest>\n");

    opf.push_str("  <spine toc=\"ncx\">\n");
    for index in 0..chapters.len() {
        opf.push_str(&format!("    <itemref idref=\"{}\"/>\n", chapter_id(index)));
    }
    opf.push_str("  </spine>\n</package>\n");
    opf
}

/// Generate toc.ncx with one flat navPoint per chapter.
pub fn toc_ncx(title: &str, identifier: &str, chapters: &[Chapter]) -> String {
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="urn:uuid:"#,
    );
    ncx.push_str(&escape_xml(identifier));
    ncx.push_str(
        r#""/>
    <meta name="dtb:depth" content="1"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>"#,
    );
    ncx.push_str(&escape_xml(title));
    ncx.push_str(
        r#"</text>
  </docTitle>
  <navMap>
"#,
    );

    for (index, chapter) in chapters.iter().enumerate() {
        let play_order = index + 1;
        ncx.push_str(&format!(
            "    <navPoint id=\"navPoint-{play_order}\" playOrder=\"{play_order}\">\n"
        ));
        ncx.push_str(&format!(
            "      <navLabel><text>{}</text></navLabel>\n",
            escape_xml(&chapter.title)
        ));
        ncx.push_str(&format!(
            "      <content src=\"{}\"/>\n",
            chapter_href(index)
        ));
        ncx.push_str("    </navPoint>\n");
    }

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

/// Generate one chapter document: the title as a heading, then one
/// paragraph per content line. Blank lines become empty paragraphs.
pub fn chapter_xhtml(chapter: &Chapter, language: &str) -> String {
    let title = escape_xml(&chapter.title);
    let language = escape_xml(language);
    let mut html = String::with_capacity(chapter.content.len() * 2 + 256);

    html.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html xmlns=\"http://www.w3.org/1999/xhtml\" xml:lang=\"{language}\" lang=\"{language}\">\n"
    ));
    html.push_str(&format!(
        "<head><title>{title}</title><link rel=\"stylesheet\" type=\"text/css\" href=\"{STYLESHEET_HREF}\"/></head>\n"
    ));
    html.push_str(&format!("<body>\n<h1>{title}</h1>\n"));
    for line in chapter.lines() {
        html.push_str("<p>");
        html.push_str(&escape_xml(line));
        html.push_str("</p>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}
