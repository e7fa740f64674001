// config module — TOML config discovery and schema

pub mod loader;
pub mod types;
