//! # Media Shop Quote
//!
//! Library half of the `mediashop-quote` binary: configuration, command
//! handlers, and the error payload. `main.rs` only parses arguments and
//! prints.

pub mod commands;
pub mod config;
pub mod error;
