//! Dresser Core - Shared types library.
//!
//! This crate provides common types used across all Dresser components:
//! - `web` - Public-facing wardrobe site
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, plus the
//!   garment vocabulary (categories, garment types, occasions)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
