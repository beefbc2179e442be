//! Namespace package discovery and binary distribution packaging.
//!
//! This crate finds every Python package under a root namespace in a source
//! tree, classifies the result as a platform-specific binary distribution
//! that is never zip-safe, and writes it out as a platform-tagged wheel. It is
//! used by the `wheelwright` CLI and can be consumed programmatically.
//!
//! # Modules
//!
//! - [`discovery`] - Namespace package discovery and filtered package search
//! - [`distribution`] - Binary distribution classification
//! - [`error`] - Validation and discovery error types
//! - [`package_files`] - Collection of the files inside discovered packages
//! - [`package_name`] - Semantic wrapper for dotted package names
//! - [`package_set`] - Ordered, duplicate-free package collections
//! - [`pattern`] - Include and exclude glob patterns over package names
//! - [`wheel`] - Wheel naming, tagging, and archive creation

pub mod discovery;
pub mod distribution;
pub mod error;
pub mod package_files;
pub mod package_name;
pub mod package_set;
pub mod pattern;
pub mod wheel;
