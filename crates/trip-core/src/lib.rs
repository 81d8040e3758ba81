//! Core types for the trip analyzer.
//!
//! Holds the record parser, the ranked result models, the error type, CLI
//! settings and the plain-text formatting helpers shared by the data layer
//! and the binary.

pub mod error;
pub mod formatting;
pub mod models;
pub mod parser;
pub mod settings;
