//! Configuration module for the spritegrid CLI
//!
//! Provides types and parsing for `spritegrid.toml`. The codec itself never
//! reads configuration; pixel size and padding reach it as plain arguments.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
