//! Configuration management for the terminal client.
//!
//! Values come from built-in defaults, the TOML config file, then command
//! line arguments and environment variables, in that order of precedence.

mod config;

pub use config::*;
