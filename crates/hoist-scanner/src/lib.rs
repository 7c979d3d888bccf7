//! TypeScript scanner/tokenizer for the hoist compiler.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `char_codes` - Character classification utilities

pub mod char_codes;
mod scanner_impl;
mod syntax_kind;

pub use scanner_impl::{ScannerSnapshot, ScannerState, TokenFlags};
pub use syntax_kind::{SyntaxKind, text_to_keyword, token_is_identifier_or_keyword};
