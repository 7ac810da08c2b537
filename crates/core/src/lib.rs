//! Domain model for the material inventory service.
//!
//! Holds the `Material` record, its request payloads, and the pure
//! validation rules. Nothing in this crate touches the filesystem or HTTP.

pub mod error;
pub mod material;
pub mod types;
pub mod validation;
