//! Project-level driver for namespace package discovery and wheel building.
//!
//! Reads `wheelwright.toml`, runs discovery and classification through
//! [`wheelwright_packager`], and writes platform-tagged wheels. The
//! `wheelwright` binary is a thin wrapper over [`commands::run`].
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`commands`] - Subcommand implementations
//! - [`config`] - `wheelwright.toml` loading and validation
//! - [`setup`] - Discovery, classification, and build orchestration

pub mod cli;
pub mod commands;
pub mod config;
pub mod setup;

pub use config::{ConfigError, SetupConfig};
pub use setup::{SetupError, SetupPlan};
