//! Hielitos Core - Shared types library.
//!
//! This crate provides common types used across all Hielitos components:
//! - `admin` - Ledger service, document store and HTTP API
//! - `cli` - Command-line tools for migrations, seeding and summaries
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money and statuses
//! - [`numeric`] - Parse-with-default helpers applied at every ingestion boundary
//! - [`timestamp`] - Fixed-width timestamp serialization for stored documents

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod numeric;
pub mod timestamp;
pub mod types;

pub use numeric::{DEFAULT_UNITS_PER_BATCH, NumericError};
pub use types::*;
