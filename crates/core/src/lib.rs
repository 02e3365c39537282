//! Little Wonders Core - Shared types library.
//!
//! This crate provides common types used across all Little Wonders components:
//! - `api` - Public booking and digital album order API
//! - `cli` - Command-line tools for migrations and studio operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and the closed
//!   session/package/status enumerations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
