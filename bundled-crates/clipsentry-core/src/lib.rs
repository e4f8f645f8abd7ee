//! # clipsentry-core
//!
//! Platform-agnostic clipboard inspection for Rust.
//!
//! This crate provides the introspection and remediation logic behind the
//! `clipsentry` diagnostic tool, decoupled from any concrete OS backend:
//!
//! - **[`ClipboardSystem`] trait** - abstract OS clipboard capability surface
//! - **[`ClipboardInspector`]** - snapshot, unlock, clear, preview, terminate
//! - **[`formats`]** - format id naming and kind classification
//! - **[`preview`]** - bounded preview decoders per format kind
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use clipsentry_core::ClipboardInspector;
//!
//! let inspector = ClipboardInspector::new(backend);
//! let snapshot = inspector.status();
//! if snapshot.is_locked {
//!     println!("locked by {:?}", snapshot.owner);
//! }
//! ```
//!
//! ## Resource model
//!
//! The clipboard is one global, lockable resource shared by every process
//! on the machine. Each inspector operation is a self-contained
//! acquire -> act -> release transaction; a successful acquisition is paired
//! with exactly one release on every exit path via [`system::LockGuard`].
//! Snapshots are consistent only at the instant of capture and must never
//! be cached.
//!
//! ## Feature Flags
//!
//! - `serde` - derive `Serialize` on snapshot types for machine output

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

mod error;
mod inspector;

pub mod formats;
pub mod preview;
pub mod system;

pub use error::{ClipboardError, ClipboardResult};
pub use formats::{FormatDescriptor, FormatKind};
pub use inspector::{
    ClipboardInspector, ClipboardSnapshot, ProcessDescriptor, TERMINATED_EXIT_CODE,
};
pub use preview::PreviewLimits;
pub use system::{ClipboardSystem, LockGuard, OwnerHandle};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::formats::{classify_format, display_name, parse_format_arg};
    pub use crate::{
        ClipboardError, ClipboardInspector, ClipboardResult, ClipboardSnapshot, ClipboardSystem,
    };
}
