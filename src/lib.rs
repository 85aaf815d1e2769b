// Clippy allows for reasonable defaults
#![allow(clippy::new_without_default)] // Default not always appropriate for stateful types
#![allow(clippy::unnecessary_map_or)] // map_or can be clearer than alternatives

// Module declarations
pub mod agents;
pub mod commands;
pub mod config;
pub mod context;
pub mod file_storage;
pub mod llm;
pub mod models;
pub mod parsers;
pub mod scoring;
pub mod shutdown;
pub mod templates;

// Server module (HTTP API)
pub mod server;

// Re-export models for use in commands
pub use models::*;
