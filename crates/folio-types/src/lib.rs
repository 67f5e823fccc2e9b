//! Foundation types for FOLIO_OS.
//!
//! This crate contains the platform-agnostic types shared by all FOLIO_OS
//! crates: geometry, input events, content keys, configuration, and the
//! error type.

pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod input;
