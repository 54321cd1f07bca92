//! Core types shared across the HBNB storage crates
//!
//! This crate provides the leaf types used by the error, logging and
//! configuration layers:
//!
//! - **Schema constants**: canonical structured-logging field keys and event names
//! - **Sensitive data**: `Sensitive<T>` marker for automatic credential redaction

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
