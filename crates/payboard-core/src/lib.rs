//! # Payboard Core
//!
//! Pure primitives for Payboard: payment records, drafts, identifiers and
//! validation.
//!
//! This crate contains no I/O, no storage, no networking.
//!
//! ## Key Types
//!
//! - [`PaymentRecord`] - A stamped payment as exchanged with the server
//! - [`PaymentDraft`] - A payment as entered by the user, before stamping
//! - [`PaymentId`] - Record identifier
//! - [`Amount`] - Decimal amount with two fractional digits
//! - [`IdentifierGenerator`] - Time-seeded `(id, timestamp)` source
//!
//! ## Identifiers
//!
//! Identifiers are drawn from a PRNG seeded by the current Unix second. See
//! the [`ident`] module for the collision behaviour this implies.

pub mod error;
pub mod ident;
pub mod record;
pub mod types;
pub mod validation;

pub use error::{CoreError, DraftIssue, ValidationError};
pub use ident::{
    format_timestamp, identifier_for_seed, Clock, FixedClock, IdentifierGenerator, SystemClock,
};
pub use record::{PaymentDraft, PaymentRecord};
pub use types::{Amount, Currency, PaymentId, User};
pub use validation::{draft_issues, validate_draft, validate_record};
