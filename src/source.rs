//! Loading source documents from disk.

use std::path::Path;

use crate::convert::{ConvertOptions, DEFAULT_TITLE, convert};
use crate::error::Result;
use crate::util::decode_text;

/// Read a text file, decoding UTF-8 (with or without BOM) and falling back
/// to `hint_encoding`, then Windows-1252, for anything else.
pub fn read_text_file<P: AsRef<Path>>(path: P, hint_encoding: Option<&str>) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(&bytes, hint_encoding).into_owned())
}

/// Book title for a source file: its name with a trailing `.txt` removed.
///
/// The match is case-insensitive; any other extension stays in the title.
pub fn title_from_path<P: AsRef<Path>>(path: P) -> String {
    let name = match path.as_ref().file_name() {
        Some(name) => name.to_string_lossy(),
        None => return DEFAULT_TITLE.to_string(),
    };

    let title = match name.len().checked_sub(4) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".txt") => {
            &name[..cut]
        }
        _ => &name[..],
    };

    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Read `input` and convert it. The title is taken from the file name
/// unless `options` already carries one.
pub fn convert_file<P: AsRef<Path>>(input: P, options: &ConvertOptions) -> Result<Vec<u8>> {
    let input = input.as_ref();
    let text = read_text_file(input, None)?;
    if options.title.is_none() {
        let options = ConvertOptions {
            title: Some(title_from_path(input)),
            ..options.clone()
        };
        convert(&text, &options)
    } else {
        convert(&text, options)
    }
}
