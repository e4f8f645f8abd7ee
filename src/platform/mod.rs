//! Platform clipboard backend selection.
//!
//! The inspection core is platform-agnostic; this module supplies the one
//! concrete [`clipsentry_core::ClipboardSystem`] implementation the binary
//! runs against. On Windows that is the Win32 clipboard; elsewhere backend
//! construction fails with a clear message so the CLI still builds and
//! reports sensibly on non-Windows hosts.

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::NativeClipboard;

#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
pub use unsupported::NativeClipboard;

/// Open the native clipboard backend for this platform
pub fn native() -> anyhow::Result<NativeClipboard> {
    NativeClipboard::new()
}
