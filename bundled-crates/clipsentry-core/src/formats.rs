//! Clipboard format identification and classification.
//!
//! This module maps Windows clipboard format ids to human-readable names
//! and classifies them into the format kinds the preview decoder
//! understands. Standard ids (1-17) resolve from a static table; everything
//! else falls back to the OS registry of custom format names, then to a
//! synthesized "Unknown Format (N)" string.

// =============================================================================
// Standard Windows Clipboard Format IDs
// =============================================================================

/// Standard Windows clipboard format: ANSI text (Windows codepage)
pub const CF_TEXT: u32 = 1;

/// Standard Windows clipboard format: Bitmap handle
pub const CF_BITMAP: u32 = 2;

/// Standard Windows clipboard format: Metafile picture
pub const CF_METAFILEPICT: u32 = 3;

/// Standard Windows clipboard format: Symbolic link (SYLK)
pub const CF_SYLK: u32 = 4;

/// Standard Windows clipboard format: Data interchange format
pub const CF_DIF: u32 = 5;

/// Standard Windows clipboard format: TIFF image
pub const CF_TIFF: u32 = 6;

/// Standard Windows clipboard format: OEM text (DOS codepage)
pub const CF_OEMTEXT: u32 = 7;

/// Standard Windows clipboard format: Device-independent bitmap
pub const CF_DIB: u32 = 8;

/// Standard Windows clipboard format: Color palette
pub const CF_PALETTE: u32 = 9;

/// Standard Windows clipboard format: Pen computing data
pub const CF_PENDATA: u32 = 10;

/// Standard Windows clipboard format: RIFF audio
pub const CF_RIFF: u32 = 11;

/// Standard Windows clipboard format: Wave audio
pub const CF_WAVE: u32 = 12;

/// Standard Windows clipboard format: Unicode text (UTF-16LE)
pub const CF_UNICODETEXT: u32 = 13;

/// Standard Windows clipboard format: Enhanced metafile
pub const CF_ENHMETAFILE: u32 = 14;

/// Standard Windows clipboard format: File drop list
pub const CF_HDROP: u32 = 15;

/// Standard Windows clipboard format: Locale identifier
pub const CF_LOCALE: u32 = 16;

/// Standard Windows clipboard format: DIB V5 (alpha channel, color space)
pub const CF_DIBV5: u32 = 17;

/// Registered name of the HTML clipboard format.
///
/// HTML is a dynamically-registered format: its numeric id varies between
/// sessions, so it is identified by this name rather than a fixed id.
pub const HTML_FORMAT_NAME: &str = "HTML Format";

/// Resolve a standard format id (1-17) to its well-known name
pub fn standard_format_name(id: u32) -> Option<&'static str> {
    match id {
        CF_TEXT => Some("CF_TEXT"),
        CF_BITMAP => Some("CF_BITMAP"),
        CF_METAFILEPICT => Some("CF_METAFILEPICT"),
        CF_SYLK => Some("CF_SYLK"),
        CF_DIF => Some("CF_DIF"),
        CF_TIFF => Some("CF_TIFF"),
        CF_OEMTEXT => Some("CF_OEMTEXT"),
        CF_DIB => Some("CF_DIB"),
        CF_PALETTE => Some("CF_PALETTE"),
        CF_PENDATA => Some("CF_PENDATA"),
        CF_RIFF => Some("CF_RIFF"),
        CF_WAVE => Some("CF_WAVE"),
        CF_UNICODETEXT => Some("CF_UNICODETEXT"),
        CF_ENHMETAFILE => Some("CF_ENHMETAFILE"),
        CF_HDROP => Some("CF_HDROP"),
        CF_LOCALE => Some("CF_LOCALE"),
        CF_DIBV5 => Some("CF_DIBV5"),
        _ => None,
    }
}

/// Build the display string for a format id.
///
/// Resolution order: static table of standard ids, then the registered
/// name supplied by the caller (queried from the OS registry of custom
/// format names), then the "Unknown Format (N)" fallback.
pub fn display_name(id: u32, registered_name: Option<&str>) -> String {
    if let Some(name) = standard_format_name(id) {
        return format!("{name} ({id})");
    }
    match registered_name {
        Some(name) => format!("{name} ({id})"),
        None => format!("Unknown Format ({id})"),
    }
}

// =============================================================================
// Format Descriptor
// =============================================================================

/// A clipboard format as observed during enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormatDescriptor {
    /// Windows clipboard format id
    pub id: u32,

    /// Resolved display name, e.g. "CF_UNICODETEXT (13)"
    pub display_name: String,
}

impl FormatDescriptor {
    /// Create a descriptor, resolving the display name from the id and an
    /// optional registered name
    pub fn new(id: u32, registered_name: Option<&str>) -> Self {
        Self {
            id,
            display_name: display_name(id, registered_name),
        }
    }
}

// =============================================================================
// Format Kind Classification
// =============================================================================

/// The decode family a clipboard format belongs to.
///
/// Each kind owns its preview decode routine; adding a kind does not touch
/// the branches of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// ANSI / OEM text
    Text,
    /// UTF-16LE text
    WideText,
    /// Bitmap image family (no pixel decoding in previews)
    Bitmap,
    /// File drop list
    FileDrop,
    /// Registered rich-text markup ("HTML Format")
    Markup,
    /// Anything else - previewed as a named placeholder
    Other,
}

/// Classify a format id (plus its registered name, when one exists) into a
/// [`FormatKind`].
///
/// Markup is matched by registered name, not id: HTML is a dynamically
/// registered format whose numeric id is not stable.
pub fn classify_format(id: u32, registered_name: Option<&str>) -> FormatKind {
    match id {
        CF_TEXT | CF_OEMTEXT => FormatKind::Text,
        CF_UNICODETEXT => FormatKind::WideText,
        CF_BITMAP | CF_DIB | CF_DIBV5 => FormatKind::Bitmap,
        CF_HDROP => FormatKind::FileDrop,
        _ if registered_name == Some(HTML_FORMAT_NAME) => FormatKind::Markup,
        _ => FormatKind::Other,
    }
}

/// Parse a user-supplied format argument: a numeric id or a standard
/// format name (case-insensitive, with or without the `CF_` prefix).
pub fn parse_format_arg(arg: &str) -> Option<u32> {
    if let Ok(id) = arg.parse::<u32>() {
        return Some(id);
    }
    let upper = arg.to_uppercase();
    let canonical = if upper.starts_with("CF_") {
        upper
    } else {
        format!("CF_{upper}")
    };
    (1..=17).find(|&id| standard_format_name(id) == Some(canonical.as_str()))
}
