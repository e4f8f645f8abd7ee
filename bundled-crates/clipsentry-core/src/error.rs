//! Error types for clipboard inspection operations.

use thiserror::Error;

/// Result type for clipboard inspection operations
pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

/// Errors that can occur while inspecting or remediating the clipboard.
///
/// Every OS-level failure is converted into one of these variants at the
/// point where it occurs; nothing panics and nothing is fatal to the
/// process. None of these conditions are retried internally - "busy" and
/// "denied" are reported once and left to the caller to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The clipboard lock could not be acquired right now.
    ///
    /// Always transient: another process holds the lock at this instant.
    #[error("clipboard is busy (locked by another process)")]
    ResourceBusy,

    /// No process is currently registered as the clipboard owner
    #[error("no process currently owns the clipboard")]
    NoOwner,

    /// Insufficient privilege to inspect or terminate a process
    #[error("access denied")]
    AccessDenied,

    /// The requested format is not present on the clipboard
    #[error("format {0} is not present on the clipboard")]
    FormatAbsent(u32),

    /// Process exited or became inaccessible between owner lookup and
    /// info query. A benign race; status checks absorb it into an absent
    /// field rather than surfacing it.
    #[error("process information unavailable")]
    ProcessInfoUnavailable,

    /// Residual backend failure (allocation, write, termination request)
    #[error("backend error: {0}")]
    Backend(String),
}

impl ClipboardError {
    /// Returns true if the condition is transient and worth a manual retry
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ResourceBusy | Self::ProcessInfoUnavailable)
    }

    /// Returns true if this error indicates missing privilege
    pub fn is_privilege_error(&self) -> bool {
        matches!(self, Self::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ClipboardError::ResourceBusy.to_string(),
            "clipboard is busy (locked by another process)"
        );
        assert_eq!(
            ClipboardError::FormatAbsent(13).to_string(),
            "format 13 is not present on the clipboard"
        );
    }

    #[test]
    fn test_is_transient() {
        assert!(ClipboardError::ResourceBusy.is_transient());
        assert!(ClipboardError::ProcessInfoUnavailable.is_transient());
        assert!(!ClipboardError::AccessDenied.is_transient());
        assert!(!ClipboardError::NoOwner.is_transient());
    }

    #[test]
    fn test_is_privilege_error() {
        assert!(ClipboardError::AccessDenied.is_privilege_error());
        assert!(!ClipboardError::ResourceBusy.is_privilege_error());
    }
}
