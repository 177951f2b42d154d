//! # Payboard Store
//!
//! The local record set and the query engine that projects it into the
//! dashboard view.
//!
//! ## Overview
//!
//! Records fetched by the poller and records created by the submission
//! client both land here through a single merge operation. The store keeps
//! them newest first and unique by id. The view layer takes a snapshot and
//! runs it through [`evaluate`] with the user's [`FilterCriteria`].
//!
//! ## Key Types
//!
//! - [`RecordStore`] - The trait for merge, snapshot and change notification
//! - [`MemoryStore`] - Process-lifetime in-memory implementation
//! - [`StoreState`] / [`StoreAction`] - The state value and its mutations
//! - [`MergeResult`] - Result of merging a record
//! - [`FilterCriteria`] - Per-field predicates for the view
//!
//! ## Usage
//!
//! ```rust
//! use payboard_store::{evaluate, FilterCriteria, MemoryStore, RecordStore};
//!
//! let store = MemoryStore::new();
//! // store.merge(record)?;
//! let view = evaluate(&store.snapshot().unwrap(), &FilterCriteria::new());
//! assert!(view.is_empty());
//! ```
//!
//! ## Design Notes
//!
//! - **First writer wins**: merging an id that is already present returns
//!   `AlreadyExists` and leaves the stored record untouched
//! - **Commutative**: the final set does not depend on which writer merged
//!   first, only the order of distinct ids does
//! - **Bounded view**: [`evaluate`] returns at most [`VIEW_LIMIT`] records

pub mod error;
pub mod memory;
pub mod query;
pub mod state;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use query::{evaluate, evaluate_with_limit, FilterCriteria, VIEW_LIMIT};
pub use state::{MergeResult, StoreAction, StoreState};
pub use traits::{MergeSummary, RecordStore, RecordStoreExt};
