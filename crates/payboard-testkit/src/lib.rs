//! # Payboard Testkit
//!
//! Testing utilities for Payboard.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a store, a fake payment service and a stepping clock
//!   wired together, plus sample users, drafts and records
//! - **Generators**: Proptest strategies for records and filter criteria
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use payboard_testkit::generators::{criteria, records};
//!
//! proptest! {
//!     #[test]
//!     fn view_is_capped(records in records(60), criteria in criteria()) {
//!         // merge, evaluate, check
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use payboard_testkit::fixtures::{sample_draft, TestFixture};
//!
//! # async fn example() {
//! let fixture = TestFixture::new();
//! let record = fixture.submission_client().submit(&sample_draft()).await.unwrap();
//! # }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    make_record, numbered_records, sample_draft, sample_users, SteppingClock, TestFixture,
};
pub use generators::{record_from_params, RecordParams};
