//! WASM bindings for browser-based text-to-EPUB conversion.
//!
//! This module exposes the converter to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::convert::{ConvertOptions, convert};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert plain text to EPUB.
///
/// An empty `custom_delimiter` selects the built-in chapter keywords.
/// Returns the EPUB bytes, or the error message as a JS string.
#[wasm_bindgen]
pub fn txt_to_epub(
    text: &str,
    title: &str,
    min_word_count: u32,
    custom_delimiter: &str,
) -> Result<Vec<u8>, JsValue> {
    let options = ConvertOptions::new(title)
        .with_min_word_count(min_word_count as usize)
        .with_delimiter(custom_delimiter);

    convert(text, &options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Number of chapters `text` would be split into.
#[wasm_bindgen]
pub fn count_chapters(text: &str, min_word_count: u32, custom_delimiter: &str) -> Result<u32, JsValue> {
    let options = ConvertOptions::default()
        .with_min_word_count(min_word_count as usize)
        .with_delimiter(custom_delimiter);

    crate::convert::outline(text, &options)
        .map(|chapters| chapters.len() as u32)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
