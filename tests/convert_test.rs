//! End-to-end conversion tests.
//!
//! Archives are read back with `zip::ZipArchive` and the XML artifacts are
//! parsed with quick-xml to check structure rather than exact formatting.

use std::io::{Cursor, Read};

use proptest::prelude::*;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::{CompressionMethod, ZipArchive};

use txtpub::{ConvertOptions, Error, IdentifierMode, build_package, convert};

const REFERENCE_TEXT: &str =
    "Hello world.\nChapter 1\nThis is chapter one with enough words to pass threshold.\nChapter 2\nShort.";

fn open(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
    ZipArchive::new(Cursor::new(bytes)).expect("Failed to open archive")
}

fn read_member(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing member {name}"))
        .read_to_string(&mut content)
        .unwrap();
    content
}

fn member_names(archive: &mut ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Collect `attr` of every element named `element`, in document order.
fn attribute_values(xml: &str, element: &[u8], attr: &[u8]) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == element => {
                for a in e.attributes() {
                    let a = a.expect("Malformed attribute");
                    if a.key.as_ref() == attr {
                        values.push(String::from_utf8(a.value.to_vec()).unwrap());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("XML error at {}: {e}", reader.buffer_position()),
        }
    }
    values
}

/// Parse the whole document, failing on any well-formedness error.
fn assert_well_formed(xml: &str) {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0i32;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("XML error at {}: {e}\n{xml}", reader.buffer_position()),
        }
    }
    assert_eq!(depth, 0, "unbalanced elements in\n{xml}");
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Archive layout
// ============================================================================

#[test]
fn test_reference_document_layout() {
    let options = ConvertOptions::new("Reference").with_min_word_count(2);
    let mut archive = open(convert(REFERENCE_TEXT, &options).unwrap());

    assert_eq!(
        member_names(&mut archive),
        vec![
            "mimetype",
            "META-INF/container.xml",
            "OEBPS/content.opf",
            "OEBPS/toc.ncx",
            "OEBPS/chapter1.xhtml",
            "OEBPS/chapter2.xhtml",
            "OEBPS/chapter3.xhtml",
            "OEBPS/styles.css",
        ]
    );

    assert_eq!(read_member(&mut archive, "mimetype"), "application/epub+zip");
    assert_eq!(
        archive.by_name("mimetype").unwrap().compression(),
        CompressionMethod::Stored
    );

    let container = read_member(&mut archive, "META-INF/container.xml");
    assert!(container.contains(r#"full-path="OEBPS/content.opf""#));

    let opf = read_member(&mut archive, "OEBPS/content.opf");
    let items = attribute_values(&opf, b"item", b"id");
    assert_eq!(items, vec!["ncx", "css", "chapter1", "chapter2", "chapter3"]);
    assert_eq!(
        attribute_values(&opf, b"itemref", b"idref"),
        vec!["chapter1", "chapter2", "chapter3"]
    );

    let ncx = read_member(&mut archive, "OEBPS/toc.ncx");
    assert!(ncx.contains("<text>Introduction</text>"));
    assert!(ncx.contains("<text>Chapter 1</text>"));
    assert!(ncx.contains("<text>Chapter 2</text>"));

    let chapter1 = read_member(&mut archive, "OEBPS/chapter1.xhtml");
    assert!(chapter1.contains("<h1>Introduction</h1>"));
    assert!(chapter1.contains("<p>Hello world.</p>"));
    assert_eq!(chapter1.matches("<p>").count(), 1);
}

#[test]
fn test_reference_document_merges_at_higher_threshold() {
    let options = ConvertOptions::new("Reference").with_min_word_count(5);
    let package = build_package(REFERENCE_TEXT, &options).unwrap();
    assert_eq!(package.chapters.len(), 2);
    assert!(package.chapters[0].contains("<p>Chapter 1</p>"));
    assert!(package.chapters[1].contains("<h1>Chapter 2</h1>"));
}

#[test]
fn test_all_artifacts_well_formed() {
    let options = ConvertOptions::new("A & B <C>").with_min_word_count(2);
    let mut archive = open(convert(REFERENCE_TEXT, &options).unwrap());
    for name in member_names(&mut archive) {
        if name.ends_with(".xml") || name.ends_with(".opf") || name.ends_with(".ncx") || name.ends_with(".xhtml") {
            assert_well_formed(&read_member(&mut archive, &name));
        }
    }
}

#[test]
fn test_control_characters_stay_well_formed() {
    let text = "Page one.\n\u{000C}\nPage two.\u{0000}\nChapter 1\u{0007}\nBell.";
    let options = ConvertOptions::new("Form\u{000C}feed");
    let mut archive = open(convert(text, &options).unwrap());
    for name in member_names(&mut archive) {
        if name == "mimetype" || name.ends_with(".css") {
            continue;
        }
        let xml = read_member(&mut archive, &name);
        assert_well_formed(&xml);
        assert!(
            !xml.chars().any(|c| matches!(c, '\u{0}' | '\u{7}' | '\u{C}')),
            "{name} carries a control character"
        );
    }

    let chapter1 = read_member(&mut archive, "OEBPS/chapter1.xhtml");
    assert!(chapter1.contains("<p>Page two.</p>"));
}

// ============================================================================
// Ordering and identifiers
// ============================================================================

#[test]
fn test_spine_nav_and_files_agree() {
    let text = (1..=12)
        .map(|i| format!("Chapter {i}\nBody of chapter {i}."))
        .collect::<Vec<_>>()
        .join("\n");
    let options = ConvertOptions::new("Twelve").with_min_word_count(1);
    let mut archive = open(convert(&text, &options).unwrap());

    let opf = read_member(&mut archive, "OEBPS/content.opf");
    let ncx = read_member(&mut archive, "OEBPS/toc.ncx");

    let ids = attribute_values(&opf, b"item", b"id");
    let hrefs = attribute_values(&opf, b"item", b"href");
    let spine = attribute_values(&opf, b"itemref", b"idref");
    let play_orders = attribute_values(&ncx, b"navPoint", b"playOrder");
    let nav_srcs = attribute_values(&ncx, b"content", b"src");

    // "Chapter 1" precedes any words, so it stays in the introduction
    let chapter_count = spine.len();
    assert_eq!(chapter_count, 12);
    assert_eq!(play_orders.len(), chapter_count);
    assert_eq!(nav_srcs.len(), chapter_count);

    for n in 1..=chapter_count {
        let id = format!("chapter{n}");
        let href = format!("chapter{n}.xhtml");
        assert_eq!(spine[n - 1], id);
        assert_eq!(play_orders[n - 1], n.to_string());
        assert_eq!(nav_srcs[n - 1], href);

        let pos = ids.iter().position(|i| *i == id).unwrap();
        assert_eq!(hrefs[pos], href);
        assert!(member_names(&mut archive).contains(&format!("OEBPS/{href}")));
    }
}

#[test]
fn test_identifier_consistent_within_archive() {
    let package = build_package(REFERENCE_TEXT, &ConvertOptions::default()).unwrap();
    let urn = format!("urn:uuid:{}", package.identifier);
    assert!(package.opf.contains(&format!(">{urn}</dc:identifier>")));
    assert!(package.ncx.contains(&format!("content=\"{urn}\"")));
    assert_eq!(package.identifier.len(), 36);
}

#[test]
fn test_deterministic_modulo_identifier() {
    let options = ConvertOptions::new("Same").with_min_word_count(2);
    let a = build_package(REFERENCE_TEXT, &options).unwrap();
    let b = build_package(REFERENCE_TEXT, &options).unwrap();

    assert_ne!(a.identifier, b.identifier);
    assert_eq!(a.chapters, b.chapters);
    assert_eq!(
        a.opf.replace(&a.identifier, "ID"),
        b.opf.replace(&b.identifier, "ID")
    );
    assert_eq!(
        a.ncx.replace(&a.identifier, "ID"),
        b.ncx.replace(&b.identifier, "ID")
    );
}

#[test]
fn test_content_hash_archives_identical() {
    let options = ConvertOptions::new("Same")
        .with_min_word_count(2)
        .with_identifier(IdentifierMode::ContentHash);
    assert_eq!(
        convert(REFERENCE_TEXT, &options).unwrap(),
        convert(REFERENCE_TEXT, &options).unwrap()
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_whitespace_input_fails() {
    for text in ["", " ", "\n\n\n", "\t \r\n \r\n"] {
        let result = convert(text, &ConvertOptions::default());
        assert!(matches!(result, Err(Error::NoChapters)), "input {text:?}");
    }
}

#[test]
fn test_no_chapters_message() {
    let err = convert("   ", &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "no chapters detected");
}

// ============================================================================
// Custom delimiters
// ============================================================================

#[test]
fn test_custom_delimiter_replaces_keywords() {
    let text = "Prologue\n=== BREAK ===\nChapter 1 is just text here\n=== break ===\nEnd";
    let options = ConvertOptions::new("Custom").with_delimiter("=== BREAK ===");
    let package = build_package(text, &options).unwrap();
    assert_eq!(package.chapters.len(), 3);
    assert!(package.chapters[1].contains("<p>Chapter 1 is just text here</p>"));
    assert!(package.chapters[2].contains("<h1>=== break ===</h1>"));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_user_text_is_always_escaped(
        title in "[a-z&<>\"' ]{1,12}",
        heading in "[a-z&<>\"' ]{0,12}",
        body in prop::collection::vec("[a-z&<>\"' ]{1,16}", 1..6),
    ) {
        prop_assume!(body.iter().any(|line| !line.trim().is_empty()));
        let heading = format!("Chapter 1{heading}");
        let text = format!("lead\n{heading}\n{}", body.join("\n"));
        let options = ConvertOptions::new(title.clone());
        let package = build_package(&text, &options).unwrap();

        assert_well_formed(&package.opf);
        assert_well_formed(&package.ncx);
        for chapter in &package.chapters {
            assert_well_formed(chapter);
        }

        let heading = heading.trim();
        let expected_text = format!("<text>{}</text>", escape(heading));
        prop_assert!(package.ncx.contains(&expected_text));
        let expected_title = format!("<dc:title>{}</dc:title>", escape(&title));
        prop_assert!(package.opf.contains(&expected_title));
        let last = package.chapters.last().unwrap();
        for line in &body {
            let expected_para = format!("<p>{}</p>", escape(line));
            prop_assert!(last.contains(&expected_para));
        }
    }

    #[test]
    fn prop_plain_text_is_one_chapter(
        lines in prop::collection::vec("[a-z]{1,10}( [a-z]{1,10}){0,5}", 1..30),
    ) {
        let text = lines.join("\n");
        let package = build_package(&text, &ConvertOptions::default()).unwrap();
        prop_assert_eq!(package.chapters.len(), 1);
        prop_assert_eq!(package.chapters[0].matches("<p>").count(), lines.len());
    }
}
