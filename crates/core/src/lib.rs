//! Market Core - Shared types library.
//!
//! This crate provides common types used across all market client components:
//! - `client` - The SDK itself (session, cart, catalog)
//! - `cli` - Command-line tool for poking at a marketplace backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, quantities, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
