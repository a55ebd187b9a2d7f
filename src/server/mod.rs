//! Server module for wabridge
//!
//! - `config`: configuration structures
//! - `loader`: configuration loading from files and environment
//! - `init`: relay construction, HTTP server and run loop

pub mod config;
mod init;
mod loader;

pub use init::{open_store, run};
pub use loader::load_config;
