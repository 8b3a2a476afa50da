//! Application layer driving the terminal client.
//!
//! This module handles command-line parsing, logging setup, the interactive
//! UI loop and the line-oriented headless mode.

pub mod cli;
pub mod headless;
pub mod logging;
pub mod ui;
