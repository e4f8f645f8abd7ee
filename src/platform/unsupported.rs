//! Stub backend for non-Windows hosts.
//!
//! Construction always fails, so no method below is ever reached at
//! runtime; the impl exists to keep the CLI compiling on every platform.

use anyhow::bail;
use clipsentry_core::system::OwnerHandle;
use clipsentry_core::{ClipboardError, ClipboardResult, ClipboardSystem};

/// Placeholder backend for platforms without a supported clipboard
#[derive(Debug)]
pub struct NativeClipboard;

impl NativeClipboard {
    /// Always fails: clipboard inspection targets the Windows clipboard
    pub fn new() -> anyhow::Result<Self> {
        bail!("clipboard inspection is only supported on Windows")
    }
}

impl ClipboardSystem for NativeClipboard {
    fn try_acquire(&self) -> ClipboardResult<()> {
        Err(ClipboardError::Backend("unsupported platform".to_string()))
    }

    fn release(&self) {}

    fn owner(&self) -> Option<OwnerHandle> {
        None
    }

    fn formats(&self) -> Vec<u32> {
        Vec::new()
    }

    fn format_name(&self, _id: u32) -> Option<String> {
        None
    }

    fn is_format_present(&self, _id: u32) -> bool {
        false
    }

    fn read(&self, _id: u32) -> Option<Vec<u8>> {
        None
    }

    fn read_file_list(&self, _id: u32) -> Option<Vec<String>> {
        None
    }

    fn empty(&self) -> ClipboardResult<()> {
        Err(ClipboardError::Backend("unsupported platform".to_string()))
    }

    fn write_wide_text(&self, _text: &str) -> ClipboardResult<()> {
        Err(ClipboardError::Backend("unsupported platform".to_string()))
    }

    fn executable_name(&self, _pid: u32) -> ClipboardResult<String> {
        Err(ClipboardError::Backend("unsupported platform".to_string()))
    }

    fn terminate_process(&self, _pid: u32, _exit_code: u32) -> ClipboardResult<()> {
        Err(ClipboardError::Backend("unsupported platform".to_string()))
    }
}
