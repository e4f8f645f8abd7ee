//! ClipboardInspector - stateless clipboard inspection and remediation.
//!
//! Every operation is a self-contained acquire -> act -> release transaction
//! against the global clipboard. Nothing is cached between calls: the
//! clipboard can be mutated by any other process at any time, so each
//! operation re-validates what it needs instead of trusting prior state.

use tracing::{debug, info, warn};

use crate::formats::{self, FormatDescriptor, FormatKind};
use crate::preview::{self, PreviewLimits};
use crate::system::{ClipboardSystem, LockGuard};
use crate::{ClipboardError, ClipboardResult};

/// Exit code handed to a forcibly terminated clipboard owner
pub const TERMINATED_EXIT_CODE: u32 = 1;

/// A process observed through the clipboard owner query
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcessDescriptor {
    /// Process id
    pub pid: u32,

    /// Executable name; absent when the process denied inspection or
    /// exited before the query completed
    pub executable: Option<String>,

    /// Title of the process's clipboard-owning window, when it has one
    pub window_title: Option<String>,
}

/// One-shot view of the clipboard state.
///
/// Internally consistent only at the instant of capture; the clipboard may
/// change under any other process immediately afterwards, so a snapshot
/// must never be cached beyond its immediate render.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClipboardSnapshot {
    /// Whether the lock was held by another process at capture time
    pub is_locked: bool,

    /// The lock owner, resolved only when the clipboard was locked
    pub owner: Option<ProcessDescriptor>,

    /// Formats present at capture time, in OS enumeration order
    pub formats: Vec<FormatDescriptor>,
}

/// Stateless clipboard inspector over a [`ClipboardSystem`] backend.
///
/// Holds no clipboard state of its own - only the backend handle and the
/// preview caps. All methods take `&self`.
#[derive(Debug)]
pub struct ClipboardInspector<S: ClipboardSystem> {
    system: S,
    limits: PreviewLimits,
}

impl<S: ClipboardSystem> ClipboardInspector<S> {
    /// Create an inspector with default preview limits
    pub fn new(system: S) -> Self {
        Self::with_limits(system, PreviewLimits::default())
    }

    /// Create an inspector with explicit preview limits
    pub fn with_limits(system: S, limits: PreviewLimits) -> Self {
        Self { system, limits }
    }

    /// Capture a fresh snapshot of the clipboard state.
    ///
    /// A failed non-blocking acquisition means the clipboard is locked; the
    /// owner is then resolved through the independent owner query, with the
    /// executable name left absent on privilege failure or a lost race.
    /// A successful acquisition enumerates the present formats and resolves
    /// their display names before releasing.
    pub fn status(&self) -> ClipboardSnapshot {
        match LockGuard::acquire(&self.system) {
            Err(_) => {
                debug!("clipboard lock unavailable, resolving owner");
                ClipboardSnapshot {
                    is_locked: true,
                    owner: self.owner_info(),
                    formats: Vec::new(),
                }
            }
            Ok(_guard) => {
                let formats = self
                    .system
                    .formats()
                    .into_iter()
                    .map(|id| self.describe_format(id))
                    .collect();
                ClipboardSnapshot {
                    is_locked: false,
                    owner: None,
                    formats,
                }
            }
        }
    }

    /// Resolve the current clipboard owner into a [`ProcessDescriptor`].
    ///
    /// The executable-name query may fail on privilege or because the
    /// process already exited; both leave the field absent rather than
    /// failing the lookup.
    pub fn owner_info(&self) -> Option<ProcessDescriptor> {
        let handle = self.system.owner()?;
        let executable = match self.system.executable_name(handle.pid) {
            Ok(name) => Some(name),
            Err(err) => {
                debug!(pid = handle.pid, %err, "owner executable unresolved");
                None
            }
        };
        Some(ProcessDescriptor {
            pid: handle.pid,
            executable,
            window_title: handle.window_title,
        })
    }

    /// Describe an arbitrary process by id
    pub fn process_info(&self, pid: u32) -> ProcessDescriptor {
        let executable = match self.system.executable_name(pid) {
            Ok(name) => Some(name),
            Err(err) => {
                debug!(pid, %err, "executable unresolved");
                None
            }
        };
        ProcessDescriptor {
            pid,
            executable,
            window_title: None,
        }
    }

    /// Force-release any lock left open by this process, then probe
    /// liveness by re-acquiring and releasing.
    ///
    /// This cannot free a lock genuinely held by another process - it only
    /// self-heals a handle this tool's own prior calls left open. The
    /// return value answers "is the clipboard currently acquirable".
    pub fn attempt_unlock(&self) -> bool {
        self.system.release();
        match LockGuard::acquire(&self.system) {
            Ok(_guard) => true,
            Err(_) => {
                debug!("clipboard still unacquirable after forced release");
                false
            }
        }
    }

    /// Terminate the process that owns the clipboard.
    ///
    /// Destructive and irreversible; callers must confirm with the user
    /// first. Returns the terminated pid, `NoOwner` when nothing owns the
    /// clipboard, or `AccessDenied` when the process cannot be opened with
    /// terminate privilege.
    pub fn terminate_owner(&self) -> ClipboardResult<u32> {
        let owner = self.system.owner().ok_or(ClipboardError::NoOwner)?;
        self.system.terminate_process(owner.pid, TERMINATED_EXIT_CODE)?;
        info!(pid = owner.pid, "terminated clipboard owner");
        Ok(owner.pid)
    }

    /// Empty the clipboard, best effort.
    ///
    /// A busy clipboard is a transient, non-error condition here: the
    /// operation silently does nothing rather than failing.
    pub fn clear(&self) {
        let Ok(_guard) = LockGuard::acquire(&self.system) else {
            debug!("clipboard busy, clear skipped");
            return;
        };
        if let Err(err) = self.system.empty() {
            warn!(%err, "failed to empty clipboard");
        }
    }

    /// Decode a bounded preview of the given format's contents.
    ///
    /// Fails with `ResourceBusy` when the lock cannot be acquired and
    /// `FormatAbsent` when the format is no longer present - presence is
    /// re-validated here rather than trusted from any earlier snapshot.
    pub fn preview(&self, format_id: u32) -> ClipboardResult<String> {
        let _guard = LockGuard::acquire(&self.system)?;
        if !self.system.is_format_present(format_id) {
            return Err(ClipboardError::FormatAbsent(format_id));
        }
        let registered = self.system.format_name(format_id);
        match formats::classify_format(format_id, registered.as_deref()) {
            FormatKind::Text => {
                let data = self.read_data(format_id)?;
                Ok(preview::decode_ansi_text(&data, self.limits))
            }
            FormatKind::WideText => {
                let data = self.read_data(format_id)?;
                Ok(preview::decode_wide_text(&data, self.limits))
            }
            FormatKind::Bitmap => Ok(preview::BITMAP_PLACEHOLDER.to_string()),
            FormatKind::FileDrop => {
                let files = self
                    .system
                    .read_file_list(format_id)
                    .ok_or(ClipboardError::FormatAbsent(format_id))?;
                Ok(preview::render_file_list(&files, self.limits))
            }
            FormatKind::Markup => {
                let data = self.read_data(format_id)?;
                Ok(preview::extract_markup(&data, self.limits))
            }
            FormatKind::Other => Ok(format!(
                "[Data present in {}]",
                formats::display_name(format_id, registered.as_deref())
            )),
        }
    }

    /// Write the decimal representation of a pid to the clipboard as
    /// wide-character text.
    ///
    /// The one write operation in the inspector: it empties existing
    /// contents and makes this process the new clipboard owner, which
    /// changes what [`Self::status`] subsequently reports.
    pub fn copy_pid(&self, pid: u32) -> ClipboardResult<()> {
        let _guard = LockGuard::acquire(&self.system)?;
        self.system.empty()?;
        self.system.write_wide_text(&pid.to_string())
    }

    fn describe_format(&self, id: u32) -> FormatDescriptor {
        if formats::standard_format_name(id).is_some() {
            FormatDescriptor::new(id, None)
        } else {
            let registered = self.system.format_name(id);
            FormatDescriptor::new(id, registered.as_deref())
        }
    }

    fn read_data(&self, id: u32) -> ClipboardResult<Vec<u8>> {
        self.system.read(id).ok_or(ClipboardError::FormatAbsent(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{CF_BITMAP, CF_HDROP, CF_LOCALE, CF_TEXT, CF_UNICODETEXT};
    use crate::system::OwnerHandle;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    enum Entry {
        Bytes(Vec<u8>),
        Files(Vec<String>),
    }

    #[derive(Debug, Clone)]
    enum ProcessEntry {
        Named(String),
        Denied,
        Exited,
        Protected,
    }

    #[derive(Debug, Default)]
    struct State {
        held_by_us: bool,
        held_elsewhere: bool,
        acquires: usize,
        releases: usize,
        contents: Vec<(u32, Entry)>,
        registered: HashMap<u32, String>,
        owner: Option<OwnerHandle>,
        processes: HashMap<u32, ProcessEntry>,
        terminated: Vec<(u32, u32)>,
    }

    /// Instrumented fake clipboard that counts acquisitions and effective
    /// releases so tests can assert they stay balanced after every call.
    #[derive(Debug, Default)]
    struct FakeClipboard {
        state: RefCell<State>,
    }

    impl FakeClipboard {
        fn new() -> Self {
            Self::default()
        }

        fn locked_elsewhere(owner: Option<OwnerHandle>) -> Self {
            let fake = Self::new();
            {
                let mut state = fake.state.borrow_mut();
                state.held_elsewhere = true;
                state.owner = owner;
            }
            fake
        }

        fn with_bytes(self, id: u32, data: &[u8]) -> Self {
            self.state.borrow_mut().contents.push((id, Entry::Bytes(data.to_vec())));
            self
        }

        fn with_files(self, id: u32, paths: &[&str]) -> Self {
            let files = paths.iter().map(|p| p.to_string()).collect();
            self.state.borrow_mut().contents.push((id, Entry::Files(files)));
            self
        }

        fn with_registered_name(self, id: u32, name: &str) -> Self {
            self.state.borrow_mut().registered.insert(id, name.to_string());
            self
        }

        fn with_process(self, pid: u32, entry: ProcessEntry) -> Self {
            self.state.borrow_mut().processes.insert(pid, entry);
            self
        }

        fn with_owner(self, pid: u32, title: Option<&str>) -> Self {
            self.state.borrow_mut().owner = Some(OwnerHandle {
                pid,
                window_title: title.map(str::to_string),
            });
            self
        }

        fn leak_our_lock(&self) {
            self.state.borrow_mut().held_by_us = true;
        }

        fn assert_balanced(&self) {
            let state = self.state.borrow();
            assert!(!state.held_by_us, "lock left held after operation");
            assert_eq!(
                state.acquires, state.releases,
                "unbalanced acquire/release: {} acquires, {} releases",
                state.acquires, state.releases
            );
        }

        fn terminated(&self) -> Vec<(u32, u32)> {
            self.state.borrow().terminated.clone()
        }

        fn content_ids(&self) -> Vec<u32> {
            self.state.borrow().contents.iter().map(|(id, _)| *id).collect()
        }
    }

    impl ClipboardSystem for FakeClipboard {
        fn try_acquire(&self) -> ClipboardResult<()> {
            let mut state = self.state.borrow_mut();
            if state.held_elsewhere || state.held_by_us {
                return Err(ClipboardError::ResourceBusy);
            }
            state.held_by_us = true;
            state.acquires += 1;
            Ok(())
        }

        fn release(&self) {
            let mut state = self.state.borrow_mut();
            if state.held_by_us {
                state.held_by_us = false;
                state.releases += 1;
            }
        }

        fn owner(&self) -> Option<OwnerHandle> {
            self.state.borrow().owner.clone()
        }

        fn formats(&self) -> Vec<u32> {
            let state = self.state.borrow();
            assert!(state.held_by_us, "formats() without holding the lock");
            state.contents.iter().map(|(id, _)| *id).collect()
        }

        fn format_name(&self, id: u32) -> Option<String> {
            self.state.borrow().registered.get(&id).cloned()
        }

        fn is_format_present(&self, id: u32) -> bool {
            let state = self.state.borrow();
            assert!(state.held_by_us, "is_format_present() without holding the lock");
            state.contents.iter().any(|(fid, _)| *fid == id)
        }

        fn read(&self, id: u32) -> Option<Vec<u8>> {
            let state = self.state.borrow();
            assert!(state.held_by_us, "read() without holding the lock");
            state.contents.iter().find_map(|(fid, entry)| match entry {
                Entry::Bytes(data) if *fid == id => Some(data.clone()),
                _ => None,
            })
        }

        fn read_file_list(&self, id: u32) -> Option<Vec<String>> {
            let state = self.state.borrow();
            assert!(state.held_by_us, "read_file_list() without holding the lock");
            state.contents.iter().find_map(|(fid, entry)| match entry {
                Entry::Files(files) if *fid == id => Some(files.clone()),
                _ => None,
            })
        }

        fn empty(&self) -> ClipboardResult<()> {
            let mut state = self.state.borrow_mut();
            assert!(state.held_by_us, "empty() without holding the lock");
            state.contents.clear();
            state.owner = None;
            Ok(())
        }

        fn write_wide_text(&self, text: &str) -> ClipboardResult<()> {
            let mut state = self.state.borrow_mut();
            assert!(state.held_by_us, "write_wide_text() without holding the lock");
            let mut data: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
            data.extend_from_slice(&[0, 0]);
            state.contents.push((CF_UNICODETEXT, Entry::Bytes(data)));
            Ok(())
        }

        fn executable_name(&self, pid: u32) -> ClipboardResult<String> {
            match self.state.borrow().processes.get(&pid) {
                Some(ProcessEntry::Named(name)) => Ok(name.clone()),
                Some(ProcessEntry::Exited) => Err(ClipboardError::ProcessInfoUnavailable),
                _ => Err(ClipboardError::AccessDenied),
            }
        }

        fn terminate_process(&self, pid: u32, exit_code: u32) -> ClipboardResult<()> {
            let mut state = self.state.borrow_mut();
            if matches!(state.processes.get(&pid), Some(ProcessEntry::Protected)) {
                return Err(ClipboardError::AccessDenied);
            }
            state.terminated.push((pid, exit_code));
            Ok(())
        }
    }

    #[test]
    fn status_reports_formats_in_enumeration_order() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::new()
                .with_bytes(CF_UNICODETEXT, b"")
                .with_bytes(CF_TEXT, b"")
                .with_bytes(49407, b"")
                .with_registered_name(49407, "HTML Format")
                .with_bytes(777, b""),
        );

        let snapshot = inspector.status();
        assert!(!snapshot.is_locked);
        assert!(snapshot.owner.is_none());
        let names: Vec<&str> = snapshot.formats.iter().map(|f| f.display_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "CF_UNICODETEXT (13)",
                "CF_TEXT (1)",
                "HTML Format (49407)",
                "Unknown Format (777)"
            ]
        );
        inspector.system.assert_balanced();
    }

    #[test]
    fn status_when_locked_resolves_owner() {
        let fake = FakeClipboard::locked_elsewhere(Some(OwnerHandle {
            pid: 4321,
            window_title: Some("Notepad".to_string()),
        }))
        .with_process(4321, ProcessEntry::Named("notepad.exe".to_string()));
        let inspector = ClipboardInspector::new(fake);

        let snapshot = inspector.status();
        assert!(snapshot.is_locked);
        assert!(snapshot.formats.is_empty());
        let owner = snapshot.owner.expect("owner should resolve");
        assert_eq!(owner.pid, 4321);
        assert_eq!(owner.executable.as_deref(), Some("notepad.exe"));
        assert_eq!(owner.window_title.as_deref(), Some("Notepad"));
        inspector.system.assert_balanced();
    }

    #[test]
    fn status_owner_name_absent_on_access_denied() {
        let fake = FakeClipboard::locked_elsewhere(Some(OwnerHandle {
            pid: 99,
            window_title: None,
        }))
        .with_process(99, ProcessEntry::Denied);
        let inspector = ClipboardInspector::new(fake);

        let owner = inspector.status().owner.expect("owner should resolve");
        assert_eq!(owner.pid, 99);
        assert!(owner.executable.is_none());
    }

    #[test]
    fn status_owner_name_absent_when_process_exited() {
        let fake = FakeClipboard::locked_elsewhere(Some(OwnerHandle {
            pid: 7,
            window_title: None,
        }))
        .with_process(7, ProcessEntry::Exited);
        let inspector = ClipboardInspector::new(fake);

        let owner = inspector.status().owner.expect("owner should resolve");
        assert!(owner.executable.is_none());
    }

    #[test]
    fn preview_absent_format_leaves_clipboard_untouched() {
        let fake = FakeClipboard::new().with_bytes(CF_TEXT, b"hello\0");
        let inspector = ClipboardInspector::new(fake);

        let before = inspector.system.content_ids();
        assert_eq!(
            inspector.preview(CF_UNICODETEXT),
            Err(ClipboardError::FormatAbsent(CF_UNICODETEXT))
        );
        assert_eq!(inspector.system.content_ids(), before);
        inspector.system.assert_balanced();
    }

    #[test]
    fn preview_busy_clipboard_reports_resource_busy() {
        let inspector = ClipboardInspector::new(FakeClipboard::locked_elsewhere(None));
        assert_eq!(inspector.preview(CF_TEXT), Err(ClipboardError::ResourceBusy));
        inspector.system.assert_balanced();
    }

    #[test]
    fn preview_text_formats() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::new().with_bytes(CF_TEXT, b"ansi text\0junk"),
        );
        assert_eq!(inspector.preview(CF_TEXT).unwrap(), "ansi text");
        inspector.system.assert_balanced();
    }

    #[test]
    fn preview_bitmap_is_placeholder() {
        let inspector =
            ClipboardInspector::new(FakeClipboard::new().with_bytes(CF_BITMAP, &[0xde, 0xad]));
        assert_eq!(
            inspector.preview(CF_BITMAP).unwrap(),
            "[Bitmap data present - preview not supported]"
        );
    }

    #[test]
    fn preview_markup_extracts_from_tag() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::new()
                .with_bytes(50010, b"Version:0.9\r\nStartHTML:42\r\n<html>x</html>")
                .with_registered_name(50010, "HTML Format"),
        );
        assert_eq!(inspector.preview(50010).unwrap(), "<html>x</html>");
    }

    #[test]
    fn preview_other_format_names_the_format() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::new()
                .with_bytes(49200, &[1, 2, 3])
                .with_registered_name(49200, "Rich Text Format"),
        );
        assert_eq!(
            inspector.preview(49200).unwrap(),
            "[Data present in Rich Text Format (49200)]"
        );
        let inspector = ClipboardInspector::new(FakeClipboard::new().with_bytes(CF_LOCALE, &[0, 0]));
        assert_eq!(
            inspector.preview(CF_LOCALE).unwrap(),
            "[Data present in CF_LOCALE (16)]"
        );
    }

    #[test]
    fn preview_file_drop_renders_capped_numbered_list() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::new().with_files(CF_HDROP, &["C:\\one.txt", "C:\\two.txt", "C:\\three.txt"]),
        );
        let listing = inspector.preview(CF_HDROP).unwrap();
        assert_eq!(
            listing,
            "Files in clipboard: 3\n 1: C:\\one.txt\n 2: C:\\two.txt\n 3: C:\\three.txt\n"
        );
        inspector.system.assert_balanced();
    }

    #[test]
    fn clear_then_status_yields_unlocked_and_empty() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::new()
                .with_bytes(CF_TEXT, b"x\0")
                .with_owner(11, None),
        );

        inspector.clear();
        let snapshot = inspector.status();
        assert!(!snapshot.is_locked);
        assert!(snapshot.formats.is_empty());
        inspector.system.assert_balanced();
    }

    #[test]
    fn clear_on_busy_clipboard_is_silent_noop() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::locked_elsewhere(None).with_bytes(CF_TEXT, b"kept\0"),
        );
        inspector.clear();
        assert_eq!(inspector.system.content_ids(), [CF_TEXT]);
        inspector.system.assert_balanced();
    }

    #[test]
    fn copy_pid_then_preview_returns_decimal_string() {
        let inspector = ClipboardInspector::new(FakeClipboard::new().with_bytes(CF_TEXT, b"old\0"));

        inspector.copy_pid(48_213).unwrap();
        assert_eq!(inspector.preview(CF_UNICODETEXT).unwrap(), "48213");
        inspector.system.assert_balanced();
    }

    #[test]
    fn copy_pid_on_busy_clipboard_fails() {
        let inspector = ClipboardInspector::new(FakeClipboard::locked_elsewhere(None));
        assert_eq!(inspector.copy_pid(1), Err(ClipboardError::ResourceBusy));
        inspector.system.assert_balanced();
    }

    #[test]
    fn terminate_owner_without_owner_is_no_owner_and_no_action() {
        let inspector = ClipboardInspector::new(FakeClipboard::new());
        assert_eq!(inspector.terminate_owner(), Err(ClipboardError::NoOwner));
        assert!(inspector.system.terminated().is_empty());
    }

    #[test]
    fn terminate_owner_uses_fixed_exit_code() {
        let inspector = ClipboardInspector::new(FakeClipboard::new().with_owner(555, None));
        assert_eq!(inspector.terminate_owner(), Ok(555));
        assert_eq!(inspector.system.terminated(), [(555, TERMINATED_EXIT_CODE)]);
    }

    #[test]
    fn terminate_owner_protected_process_is_access_denied() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::new()
                .with_owner(4, None)
                .with_process(4, ProcessEntry::Protected),
        );
        assert_eq!(inspector.terminate_owner(), Err(ClipboardError::AccessDenied));
        assert!(inspector.system.terminated().is_empty());
    }

    #[test]
    fn attempt_unlock_heals_a_lock_we_left_open() {
        let inspector = ClipboardInspector::new(FakeClipboard::new());
        inspector.system.leak_our_lock();

        assert!(inspector.attempt_unlock());
        assert!(!inspector.system.state.borrow().held_by_us);
    }

    #[test]
    fn attempt_unlock_cannot_free_a_foreign_lock() {
        let inspector = ClipboardInspector::new(FakeClipboard::locked_elsewhere(None));
        assert!(!inspector.attempt_unlock());
        inspector.system.assert_balanced();
    }

    #[test]
    fn every_operation_balances_acquire_and_release() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::new()
                .with_bytes(CF_TEXT, b"t\0")
                .with_files(CF_HDROP, &["C:\\f"]),
        );

        inspector.status();
        let _ = inspector.preview(CF_TEXT);
        let _ = inspector.preview(CF_HDROP);
        let _ = inspector.preview(9999);
        inspector.clear();
        let _ = inspector.copy_pid(12);
        assert!(inspector.attempt_unlock());
        inspector.system.assert_balanced();
    }

    #[test]
    fn process_info_resolves_name_when_permitted() {
        let inspector = ClipboardInspector::new(
            FakeClipboard::new().with_process(30, ProcessEntry::Named("explorer.exe".to_string())),
        );
        let info = inspector.process_info(30);
        assert_eq!(info.executable.as_deref(), Some("explorer.exe"));
        let info = inspector.process_info(31);
        assert!(info.executable.is_none());
    }
}
