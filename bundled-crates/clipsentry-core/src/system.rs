//! ClipboardSystem trait - abstract OS clipboard capability surface.
//!
//! This trait defines the primitives the inspector needs from the operating
//! system: the non-blocking lock, format enumeration, raw data access, the
//! owner query, and process inspection/termination. The `clipsentry` binary
//! implements it over the Win32 clipboard; tests implement it with an
//! instrumented in-memory fake.

use crate::ClipboardResult;

/// Identity of the window/process currently registered as clipboard owner.
///
/// The owner is whoever last supplied clipboard data; it is distinct from
/// the lock holder, and the query is independent of lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerHandle {
    /// Process id of the owning window's process
    pub pid: u32,

    /// Title of the owning window, when it has one
    pub window_title: Option<String>,
}

/// Abstract interface over the OS clipboard and process-management
/// capabilities.
///
/// The clipboard is a single global resource shared by every process on the
/// machine; any other process may mutate it between two calls. Methods that
/// read or write contents (`formats`, `is_format_present`, `read`,
/// `read_file_list`, `empty`, `write_wide_text`) must only be called while
/// this process holds the lock - see [`LockGuard`].
pub trait ClipboardSystem {
    /// Attempt to acquire the clipboard lock without blocking.
    ///
    /// Returns `ResourceBusy` when another process holds
    /// the lock. The underlying primitive is instantaneous pass/fail, not a
    /// queued wait.
    fn try_acquire(&self) -> ClipboardResult<()>;

    /// Release the clipboard lock held by this process.
    ///
    /// Must be a no-op when this process does not hold the lock: the
    /// force-unlock path calls it unconditionally to close a handle a prior
    /// call may have left open.
    fn release(&self);

    /// Query the current clipboard owner, independent of lock state
    fn owner(&self) -> Option<OwnerHandle>;

    /// Enumerate all formats currently present, in OS enumeration order.
    /// Requires the lock.
    fn formats(&self) -> Vec<u32>;

    /// Look up the registered name of a custom format id
    fn format_name(&self, id: u32) -> Option<String>;

    /// Whether the given format is currently present. Requires the lock.
    fn is_format_present(&self, id: u32) -> bool;

    /// Read the raw bytes for a format. Requires the lock. Returns `None`
    /// when the format is no longer present.
    fn read(&self, id: u32) -> Option<Vec<u8>>;

    /// Read the file paths behind a drop-list format. Requires the lock.
    fn read_file_list(&self, id: u32) -> Option<Vec<String>>;

    /// Empty the clipboard contents. Requires the lock.
    fn empty(&self) -> ClipboardResult<()>;

    /// Write a string as wide-character text. Requires the lock; makes the
    /// calling process the new clipboard owner.
    fn write_wide_text(&self, text: &str) -> ClipboardResult<()>;

    /// Resolve a process id to its executable name.
    ///
    /// Fails with `AccessDenied` when the process cannot
    /// be opened, or `ProcessInfoUnavailable` when it
    /// exited between lookup and query.
    fn executable_name(&self, pid: u32) -> ClipboardResult<String>;

    /// Forcibly terminate a process with the given exit code.
    ///
    /// Fails with `AccessDenied` when the process cannot
    /// be opened with terminate privilege.
    fn terminate_process(&self, pid: u32, exit_code: u32) -> ClipboardResult<()>;
}

/// RAII guard pairing one successful lock acquisition with exactly one
/// release.
///
/// Leaving the clipboard locked is the very failure mode this tool exists
/// to diagnose, so every operation scopes its access through this guard:
/// the release runs on success, early error returns, and unwind alike.
#[derive(Debug)]
pub struct LockGuard<'a, S: ClipboardSystem + ?Sized> {
    system: &'a S,
}

impl<'a, S: ClipboardSystem + ?Sized> LockGuard<'a, S> {
    /// Acquire the lock, or fail fast with `ResourceBusy`
    pub fn acquire(system: &'a S) -> ClipboardResult<Self> {
        system.try_acquire()?;
        Ok(Self { system })
    }
}

impl<S: ClipboardSystem + ?Sized> Drop for LockGuard<'_, S> {
    fn drop(&mut self) {
        self.system.release();
    }
}
