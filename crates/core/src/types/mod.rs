//! Core types for Dresser.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod garment;
pub mod id;

pub use email::{Email, EmailError};
pub use garment::{Category, GarmentType, Occasion, UnknownVariant};
pub use id::*;
