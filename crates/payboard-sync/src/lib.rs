//! # Payboard Sync
//!
//! Traffic between the dashboard and the payment service.
//!
//! ## Overview
//!
//! Two flows move records into the local store:
//!
//! - **Submission** ([`SubmissionClient`]): stamps a draft with a fresh
//!   identifier and sends it until the server acknowledges it, resending on
//!   503 and regenerating the identifier on 409.
//! - **Polling** ([`SyncPoller`]): fetches the payment endpoint on a fixed
//!   period and merges whatever comes back.
//!
//! Both merge through the store's idempotent merge, so a record that
//! arrives through both paths is stored once.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use payboard_core::IdentifierGenerator;
//! use payboard_store::MemoryStore;
//! use payboard_sync::{HttpTransport, SubmissionClient, SyncConfig, SyncPoller};
//!
//! async fn example() {
//!     let store = Arc::new(MemoryStore::new());
//!     let transport = Arc::new(HttpTransport::new(
//!         "http://localhost:8080/api/payments",
//!         "http://localhost:8080/api/users",
//!     ));
//!
//!     let poller = SyncPoller::new(store.clone(), transport.clone(), SyncConfig::default());
//!     let handle = poller.spawn();
//!
//!     let client = SubmissionClient::new(store, transport, IdentifierGenerator::system());
//!     // client.submit(&draft).await?;
//!
//!     handle.stop().await;
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod messages;
pub mod poller;
pub mod submit;
pub mod transport;

pub use config::{SyncConfig, ATTEMPT_WARN_EVERY, DEFAULT_POLL_INTERVAL};
pub use error::{Result, SyncError, CONNECTIVITY_MESSAGE};
pub use http::HttpTransport;
pub use messages::{status, CreateOutcome, DataEnvelope, OneOrMany};
pub use poller::{PollerHandle, SyncPoller, TickReport};
pub use submit::{SubmissionClient, SubmitReport};
pub use transport::{memory::MemoryTransport, Transport};
