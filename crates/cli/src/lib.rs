//! `camlog` command-line front end.
//!
//! Exposes argument parsing, configuration, error handling and the command
//! implementations so tests and the binary entrypoint share them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
