//! Static metadata for hoist.
//!
//! This crate turns a parsed module into the JSON-serializable metadata that
//! downstream tools read instead of the syntax tree:
//! - `schema` - the metadata value model and its wire format
//! - `symbols` - per-module name resolution (builtins, imports, locals)
//! - `evaluator` - folds expressions into metadata values
//! - `collector` - walks top-level declarations and validates the result
//! - `cache` - per-module memoization and transformer composition

pub mod cache;
pub mod collector;
pub mod error;
pub mod evaluator;
pub mod schema;
pub mod symbols;
mod validate;

pub use cache::{
    CollectMetadata, MetadataCache, MetadataSubstitution, MetadataTransformer, SubstitutionChain,
};
pub use collector::{CollectorOptions, MetadataCollector};
pub use error::MetadataError;
pub use schema::{
    METADATA_VERSION, MetadataSymbolic, MetadataValue, ModuleMetadata, is_lowered_symbol,
    lowered_symbol,
};
