//! Common types and utilities for the hoist compiler.
//!
//! This crate provides foundational types used across all hoist crates:
//! - Compiler limits and thresholds
//! - File-name classification (TypeScript sources, declaration files)
//! - Line/character positions for diagnostics and metadata errors

// Centralized limits and thresholds
pub mod limits;

// File-name classification
pub mod file_kind;
pub use file_kind::{is_declaration_file_name, is_ts_file_name};

// Position types for line/column source locations
pub mod position;
pub use position::{LineAndCharacter, LineMap};
