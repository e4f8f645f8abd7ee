//! Win32 clipboard backend.
//!
//! Thin unsafe shims over the Win32 clipboard and process APIs. Every call
//! here is a single OS primitive; failures are mapped to the core error
//! taxonomy at the call site and nothing is retried.

use std::ptr;

use clipsentry_core::formats::CF_UNICODETEXT;
use clipsentry_core::system::OwnerHandle;
use clipsentry_core::{ClipboardError, ClipboardResult, ClipboardSystem};

use winapi::shared::minwindef::{DWORD, FALSE, HGLOBAL, MAX_PATH};
use winapi::um::handleapi::CloseHandle;
use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
use winapi::um::psapi::GetModuleBaseNameW;
use winapi::um::shellapi::{DragQueryFileW, HDROP};
use winapi::um::winbase::{GlobalAlloc, GlobalFree, GlobalLock, GlobalSize, GlobalUnlock, GMEM_MOVEABLE};
use winapi::um::winnt::{PROCESS_QUERY_INFORMATION, PROCESS_TERMINATE, PROCESS_VM_READ};
use winapi::um::winuser::{
    CloseClipboard, EmptyClipboard, EnumClipboardFormats, GetClipboardData,
    GetClipboardFormatNameW, GetClipboardOwner, GetWindowTextW, GetWindowThreadProcessId,
    IsClipboardFormatAvailable, OpenClipboard, SetClipboardData,
};

const WINDOW_TITLE_BUFFER: usize = 256;
const FORMAT_NAME_BUFFER: usize = 256;

/// Win32 clipboard backend.
///
/// Stateless: the clipboard lock is a process-global OS resource, not a
/// field of this struct.
#[derive(Debug)]
pub struct NativeClipboard;

impl NativeClipboard {
    /// Open the Win32 clipboard backend
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self)
    }
}

impl ClipboardSystem for NativeClipboard {
    fn try_acquire(&self) -> ClipboardResult<()> {
        // Null hwnd: the clipboard is opened on behalf of the current task.
        if unsafe { OpenClipboard(ptr::null_mut()) } != 0 {
            Ok(())
        } else {
            Err(ClipboardError::ResourceBusy)
        }
    }

    fn release(&self) {
        // Fails harmlessly when this process holds no clipboard handle.
        unsafe { CloseClipboard() };
    }

    fn owner(&self) -> Option<OwnerHandle> {
        let hwnd = unsafe { GetClipboardOwner() };
        if hwnd.is_null() {
            return None;
        }
        let mut pid: DWORD = 0;
        unsafe { GetWindowThreadProcessId(hwnd, &mut pid) };
        if pid == 0 {
            return None;
        }
        let mut title = [0u16; WINDOW_TITLE_BUFFER];
        let len = unsafe { GetWindowTextW(hwnd, title.as_mut_ptr(), title.len() as i32) };
        let window_title = (len > 0).then(|| String::from_utf16_lossy(&title[..len as usize]));
        Some(OwnerHandle { pid, window_title })
    }

    fn formats(&self) -> Vec<u32> {
        let mut formats = Vec::new();
        let mut format = 0u32;
        loop {
            format = unsafe { EnumClipboardFormats(format) };
            if format == 0 {
                break;
            }
            formats.push(format);
        }
        formats
    }

    fn format_name(&self, id: u32) -> Option<String> {
        let mut name = [0u16; FORMAT_NAME_BUFFER];
        let len = unsafe { GetClipboardFormatNameW(id, name.as_mut_ptr(), name.len() as i32) };
        (len > 0).then(|| String::from_utf16_lossy(&name[..len as usize]))
    }

    fn is_format_present(&self, id: u32) -> bool {
        unsafe { IsClipboardFormatAvailable(id) != 0 }
    }

    fn read(&self, id: u32) -> Option<Vec<u8>> {
        unsafe {
            let handle = GetClipboardData(id);
            if handle.is_null() {
                return None;
            }
            let mem = handle as HGLOBAL;
            let data = GlobalLock(mem);
            if data.is_null() {
                return None;
            }
            let size = GlobalSize(mem);
            let bytes = std::slice::from_raw_parts(data as *const u8, size).to_vec();
            GlobalUnlock(mem);
            Some(bytes)
        }
    }

    fn read_file_list(&self, id: u32) -> Option<Vec<String>> {
        unsafe {
            let handle = GetClipboardData(id);
            if handle.is_null() {
                return None;
            }
            let drop = handle as HDROP;
            let count = DragQueryFileW(drop, u32::MAX, ptr::null_mut(), 0);
            let mut files = Vec::with_capacity(count as usize);
            for index in 0..count {
                let mut path = [0u16; MAX_PATH];
                let len = DragQueryFileW(drop, index, path.as_mut_ptr(), path.len() as u32);
                if len > 0 {
                    files.push(String::from_utf16_lossy(&path[..len as usize]));
                }
            }
            Some(files)
        }
    }

    fn empty(&self) -> ClipboardResult<()> {
        if unsafe { EmptyClipboard() } != 0 {
            Ok(())
        } else {
            Err(ClipboardError::Backend("EmptyClipboard failed".to_string()))
        }
    }

    fn write_wide_text(&self, text: &str) -> ClipboardResult<()> {
        let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        let byte_len = wide.len() * std::mem::size_of::<u16>();
        unsafe {
            let mem = GlobalAlloc(GMEM_MOVEABLE, byte_len);
            if mem.is_null() {
                return Err(ClipboardError::Backend("GlobalAlloc failed".to_string()));
            }
            let data = GlobalLock(mem);
            if data.is_null() {
                GlobalFree(mem);
                return Err(ClipboardError::Backend("GlobalLock failed".to_string()));
            }
            ptr::copy_nonoverlapping(wide.as_ptr() as *const u8, data as *mut u8, byte_len);
            GlobalUnlock(mem);
            // On success the clipboard owns the allocation.
            if SetClipboardData(CF_UNICODETEXT, mem as _).is_null() {
                GlobalFree(mem);
                return Err(ClipboardError::Backend("SetClipboardData failed".to_string()));
            }
        }
        Ok(())
    }

    fn executable_name(&self, pid: u32) -> ClipboardResult<String> {
        unsafe {
            let process = OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, FALSE, pid);
            if process.is_null() {
                return Err(ClipboardError::AccessDenied);
            }
            let mut name = [0u16; MAX_PATH];
            let len = GetModuleBaseNameW(process, ptr::null_mut(), name.as_mut_ptr(), name.len() as DWORD);
            CloseHandle(process);
            if len == 0 {
                return Err(ClipboardError::ProcessInfoUnavailable);
            }
            Ok(String::from_utf16_lossy(&name[..len as usize]))
        }
    }

    fn terminate_process(&self, pid: u32, exit_code: u32) -> ClipboardResult<()> {
        unsafe {
            let process = OpenProcess(PROCESS_TERMINATE, FALSE, pid);
            if process.is_null() {
                return Err(ClipboardError::AccessDenied);
            }
            let ok = TerminateProcess(process, exit_code) != 0;
            CloseHandle(process);
            if ok {
                Ok(())
            } else {
                Err(ClipboardError::Backend("TerminateProcess failed".to_string()))
            }
        }
    }
}
