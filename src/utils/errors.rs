//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for common failure scenarios.

use std::fmt::Write;

/// Format error for user consumption
///
/// Takes a technical error and produces a readable message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    writeln!(&mut output).ok();
    writeln!(&mut output, "ERROR: {}", error).ok();
    writeln!(&mut output).ok();

    let error_msg = error.to_string();

    if error_msg.contains("busy") || error_msg.contains("locked") {
        writeln!(&mut output, "The clipboard is held open by another process.").ok();
        writeln!(&mut output, "Troubleshooting:").ok();
        writeln!(&mut output, "  - Run `clipsentry status` to identify the owning process").ok();
        writeln!(&mut output, "  - Run `clipsentry unlock` to probe whether the lock clears").ok();
        writeln!(&mut output, "  - Retry in a moment; most holders release within milliseconds").ok();
    } else if error_msg.contains("denied") {
        writeln!(&mut output, "The owning process could not be opened.").ok();
        writeln!(&mut output, "Troubleshooting:").ok();
        writeln!(&mut output, "  - Re-run from an elevated (administrator) prompt").ok();
        writeln!(&mut output, "  - Protected system processes cannot be terminated").ok();
    } else if error_msg.contains("config") {
        writeln!(&mut output, "The configuration file could not be used.").ok();
        writeln!(&mut output, "Troubleshooting:").ok();
        writeln!(&mut output, "  - Check TOML syntax and section names").ok();
        writeln!(&mut output, "  - Delete the file to fall back to built-in defaults").ok();
    } else if error_msg.contains("only supported on Windows") {
        writeln!(&mut output, "This tool inspects the Windows clipboard lock;").ok();
        writeln!(&mut output, "there is no equivalent resource to probe on this platform.").ok();
    }

    writeln!(&mut output).ok();
    writeln!(&mut output, "Technical details:").ok();
    writeln!(&mut output, "{:#}", error).ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "Run with -v (or -vv) for detailed logs.").ok();

    output
}
