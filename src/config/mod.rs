//! Configuration module for gifsheet
//!
//! Provides types, discovery and loading for `gifsheet.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
