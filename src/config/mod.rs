//! Configuration management for lectern.
//!
//! Application settings live in a TOML file in the user's config directory;
//! see [`file::LecternConfig`] for the schema and defaults.

pub mod file;

pub use file::{config_path, LecternConfig, ServerConfig, StorageConfig};
