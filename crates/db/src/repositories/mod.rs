//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&JsonStore` as the first argument.

pub mod material_repo;

pub use material_repo::{MaterialRepo, RepoError};
