//! System Diagnostics
//!
//! Host information for debugging reports: clipboard contention issues are
//! frequently version-specific, so every verbose run records where it ran.

use sysinfo::System;
use tracing::debug;

/// Host information for diagnostics
#[derive(Debug, Clone)]
pub struct SystemInfo {
    /// Operating system name (e.g. "Windows")
    pub os_name: String,

    /// Operating system version string
    pub os_version: String,

    /// Kernel version string
    pub kernel_version: String,

    /// System hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Gather host information
    pub fn gather() -> Self {
        Self {
            os_name: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    /// Log host information
    pub fn log(&self) {
        debug!("=== Host Information ===");
        debug!("  OS: {} {}", self.os_name, self.os_version);
        debug!("  Kernel: {}", self.kernel_version);
        debug!("  Hostname: {}", self.hostname);
    }
}

/// Log startup diagnostics at debug level
pub fn log_startup_diagnostics() {
    SystemInfo::gather().log();
}
