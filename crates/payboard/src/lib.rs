//! # Payboard
//!
//! Client core for a payment dashboard: a live, filterable view over the
//! payments held by a remote service, plus submission of new ones.
//!
//! ## Overview
//!
//! - **Records**: immutable payments identified by a 16-digit id
//! - **Store**: local, append-only record set; newest first, first writer wins
//! - **Polling**: periodic fetch from the service, merged into the store
//! - **Submission**: create requests retried on 503, re-identified on 409
//! - **View**: AND-combined field filters, capped at 25 records
//!
//! ## Usage
//!
//! ```rust,no_run
//! use payboard::{Dashboard, DashboardConfig, FilterCriteria};
//! use payboard::core::{Amount, Currency, PaymentDraft};
//!
//! async fn example() -> payboard::Result<()> {
//!     let mut dashboard = Dashboard::connect(DashboardConfig::from_env()?);
//!     dashboard.load_users().await?;
//!     dashboard.start_polling()?;
//!
//!     let draft = PaymentDraft::empty()
//!         .sender(dashboard.find_user(1))
//!         .receiver(dashboard.find_user(2))
//!         .amount(Amount::from_minor(1_000))
//!         .currency(Currency::USD);
//!     dashboard.create_payment(&draft).await?;
//!
//!     let view = dashboard.view(&FilterCriteria::new().currency(Currency::USD))?;
//!     println!("{} payments", view.len());
//!
//!     dashboard.stop_polling().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `payboard::core` - Records, identifiers, validation
//! - `payboard::store` - Record store and query engine
//! - `payboard::sync` - Transports, submission and polling

pub mod config;
pub mod dashboard;
pub mod error;

// Re-export component crates
pub use payboard_core as core;
pub use payboard_store as store;
pub use payboard_sync as sync;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};

// Re-export commonly used types
pub use payboard_core::{Amount, Currency, PaymentDraft, PaymentId, PaymentRecord, User};
pub use payboard_store::{FilterCriteria, MemoryStore, VIEW_LIMIT};
pub use payboard_sync::{HttpTransport, MemoryTransport, SyncConfig, Transport};
