//! Utility Functions and Diagnostics
//!
//! System diagnostics and user-friendly error formatting:
//!
//! 1. **Diagnostics** - host information logged at startup for bug reports
//! 2. **Error Formatting** - human-readable failure output with
//!    troubleshooting hints for the common clipboard contention cases

pub mod diagnostics;
pub mod errors;

pub use diagnostics::{log_startup_diagnostics, SystemInfo};
pub use errors::format_user_error;
