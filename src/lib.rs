//! Syllabus - A consistency checker for curriculum dependency matrices
//!
//! A curriculum is a set of numbered sections. Each section declares the
//! sections it depends on and the sections it enables. Syllabus builds the
//! dependency graph from that matrix and verifies that the declarations
//! agree with each other, that the graph has no cycles, and that the
//! declared numbering is a legal teaching order.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to checks)
//! - [`matrix`] - Matrix loading from TOML, JSON, and Markdown tables
//! - [`core`] - Domain types, the dependency graph, cycles, and sequencing
//! - [`check`] - Consistency rules and the report they produce
//! - [`logging`] - Diagnostic logging setup
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. Every edge references two registered sections
//! 2. Ids and ordinals are unique within a graph
//! 3. A computed teaching order respects every edge
//! 4. Checking never mutates the graph, so repeated runs agree

pub mod check;
pub mod cli;
pub mod core;
pub mod logging;
pub mod matrix;
pub mod ui;
