//! Terminal rendering of clipboard snapshots.
//!
//! Snapshots are rendered immediately after capture and discarded; the
//! clipboard can change under any other process at any moment, so a
//! rendered report is stamped with its capture time.

use std::fmt::Write;

use chrono::{DateTime, Local};
use clipsentry_core::{ClipboardSnapshot, ProcessDescriptor};

/// Render a status report for one snapshot captured at `at`
pub fn render_status(snapshot: &ClipboardSnapshot, at: DateTime<Local>) -> String {
    let mut out = String::new();
    writeln!(out, "Clipboard Status Check - {}", at.format("%Y-%m-%d %H:%M:%S")).ok();
    writeln!(out, "----------------------------------------").ok();

    if snapshot.is_locked {
        writeln!(out, "Clipboard is locked!").ok();
        if let Some(owner) = &snapshot.owner {
            writeln!(out, "{}", render_owner_line(owner)).ok();
            if let Some(title) = &owner.window_title {
                writeln!(out, "Window title: {}", title).ok();
            }
        }
    } else {
        writeln!(out, "Clipboard is available").ok();
        writeln!(out).ok();
        writeln!(out, "Available formats:").ok();
        for format in &snapshot.formats {
            writeln!(out, "  - {}", format.display_name).ok();
        }
        if snapshot.formats.is_empty() {
            writeln!(out, "  (none)").ok();
        }
    }

    out
}

/// One-line description of a process resolved from the owner query
pub fn render_owner_line(owner: &ProcessDescriptor) -> String {
    match &owner.executable {
        Some(name) => format!("Process: {} (PID: {})", name, owner.pid),
        None => format!("Process ID: {} (name unavailable)", owner.pid),
    }
}
