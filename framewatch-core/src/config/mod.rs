//! Configuration management for framewatch
//!
//! TOML file with `[logging]` and `[sampler]` sections. Every field has a
//! default, so a missing file or a partial file is valid.

mod defaults;
mod loader;
mod schema;

pub use defaults::DEFAULT_CONFIG_TOML;
pub use loader::ConfigLoader;
pub use schema::*;
