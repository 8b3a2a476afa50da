//! Core domain logic for the terminal client.
//!
//! This module holds the conversation state and the send cycle, independent of
//! how the transcript is drawn.

pub mod models;
pub mod services;
