//! # clipsentry
//!
//! Clipboard diagnostic tool for Windows.
//!
//! The clipboard is a single OS-global resource gated by a non-blocking
//! lock; one misbehaving process that opens it and never closes it stalls
//! copy/paste for the whole machine. clipsentry inspects that resource and
//! offers remediation:
//!
//! - report whether the clipboard is locked and which process owns it
//! - enumerate the data formats currently present
//! - preview format contents (text, file lists, markup)
//! - clear the clipboard, probe lock liveness, terminate the owner
//!
//! # Architecture
//!
//! ```text
//! clipsentry (CLI)
//!   ├─> config     (TOML + CLI overrides)
//!   ├─> report     (snapshot rendering)
//!   ├─> platform   (Win32 ClipboardSystem backend)
//!   └─> clipsentry-core
//!         ├─> ClipboardInspector (acquire -> act -> release transactions)
//!         ├─> formats  (id naming + kind classification)
//!         └─> preview  (bounded decoders)
//! ```
//!
//! All inspection logic lives in [`clipsentry_core`]; this crate supplies
//! the OS backend and the presentation layer around it.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Tool configuration
pub mod config;

/// OS clipboard backend selection
pub mod platform;

/// Snapshot rendering for terminal output
pub mod report;

/// Diagnostics and user-facing error formatting
pub mod utils;
