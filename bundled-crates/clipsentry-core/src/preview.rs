//! Bounded preview decoding for clipboard contents.
//!
//! All decoders produce printable strings capped at a hard character limit.
//! They operate on raw bytes already read from the clipboard; no decoder
//! touches the lock itself.

use std::fmt::Write;

/// Hard cap on preview length, in characters
pub const MAX_PREVIEW_CHARS: usize = 32 * 1024;

/// Maximum number of entries rendered for a file drop list
pub const MAX_FILE_ENTRIES: usize = 100;

/// Placeholder returned for bitmap family formats
pub const BITMAP_PLACEHOLDER: &str = "[Bitmap data present - preview not supported]";

/// Caps applied while rendering previews
#[derive(Debug, Clone, Copy)]
pub struct PreviewLimits {
    /// Maximum preview length in characters
    pub max_chars: usize,

    /// Maximum file entries rendered for drop lists
    pub max_files: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            max_chars: MAX_PREVIEW_CHARS,
            max_files: MAX_FILE_ENTRIES,
        }
    }
}

/// Decode ANSI text bytes (CF_TEXT / CF_OEMTEXT) into a capped string.
///
/// Data is NUL-terminated on the clipboard; anything past the first NUL is
/// discarded. Non-UTF-8 bytes are replaced rather than rejected, since a
/// preview is diagnostic output, not a faithful transcode.
pub fn decode_ansi_text(data: &[u8], limits: PreviewLimits) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    truncate_chars(String::from_utf8_lossy(&data[..end]).into_owned(), limits.max_chars)
}

/// Decode UTF-16LE text bytes (CF_UNICODETEXT) into a capped string
pub fn decode_wide_text(data: &[u8], limits: PreviewLimits) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .collect();
    truncate_chars(String::from_utf16_lossy(&units), limits.max_chars)
}

/// Extract a markup preview from "HTML Format" bytes.
///
/// The clipboard HTML format prefixes the document with a metadata header;
/// the preview starts at the first `<html` tag (either case) and falls back
/// to the raw start when no tag is found. Decoded as UTF-8.
pub fn extract_markup(data: &[u8], limits: PreviewLimits) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let body = &data[..end];
    let start = find_subslice(body, b"<html")
        .or_else(|| find_subslice(body, b"<HTML"))
        .unwrap_or(0);
    truncate_chars(String::from_utf8_lossy(&body[start..]).into_owned(), limits.max_chars)
}

/// Render a file drop list as a numbered listing with a leading count.
///
/// The leading count is always the full number of paths; at most
/// `limits.max_files` entries are rendered below it.
pub fn render_file_list(paths: &[String], limits: PreviewLimits) -> String {
    let mut out = String::new();
    writeln!(out, "Files in clipboard: {}", paths.len()).ok();
    for (index, path) in paths.iter().take(limits.max_files).enumerate() {
        writeln!(out, "{:2}: {}", index + 1, path).ok();
    }
    out
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((boundary, _)) = text.char_indices().nth(max_chars) {
        text.truncate(boundary);
    }
    text
}
