//! Persisted state for the omikuji chat plugin.
//!
//! Defines the [`Document`] written to disk, the per-user records inside
//! it, and the [`DocumentStore`] that serializes every load and save of
//! that document.

/// The persisted document and its per-user records.
pub mod document;
/// Error types for persistence.
pub mod error;
/// File-backed store guarding the document.
pub mod store;

/// Re-export document types.
pub use document::{CheckInRecord, Document, FortuneRecord};
/// Re-export error types.
pub use error::{StoreError, StoreResult};
/// Re-export store types.
pub use store::{DocumentStore, LoadOutcome, StoreGuard};
