//! Platform-tagged wheel construction.
//!
//! # Sub-modules
//!
//! - [`naming`] - Wheel filename policy (`WheelName`, `Version`).
//! - [`packaging`] - Archive creation and `.dist-info` generation.
//! - [`packaging_error`] - Error types for packaging operations.
//! - [`record`] - The `RECORD` digest listing.
//! - [`tag`] - Wheel compatibility tags (`WheelTag`, `TagComponent`).
//! - [`target`] - Target triple validation (`TargetTriple`).

pub mod naming;
pub mod packaging;
pub mod packaging_error;
pub mod record;
pub mod tag;
pub mod target;
