// Command handlers invoked through the HTTP command proxy

pub mod config;
pub mod conversation;
pub mod coverage;
pub mod projects;
pub mod types;

pub use config::*;
pub use conversation::*;
pub use coverage::*;
pub use projects::*;
pub use types::*;
