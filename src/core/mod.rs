//! core
//!
//! Core domain types and graph algorithms for Syllabus.
//!
//! # Modules
//!
//! - [`types`] - Strong types: LessonId, Ordinal
//! - [`registry`] - Section registry keyed by id and ordinal
//! - [`edges`] - Dependency edges with declaration provenance
//! - [`graph`] - Dependency graph representation and queries
//! - [`cycle`] - Cycle detection
//! - [`sequence`] - Teaching order computation
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - All traversal is deterministic (ordinal order)

pub mod config;
pub mod cycle;
pub mod edges;
pub mod graph;
pub mod registry;
pub mod sequence;
pub mod types;
