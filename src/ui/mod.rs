//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! All user-facing output goes through this module so quiet mode and the
//! stdout/stderr split are handled in one place.

pub mod output;
