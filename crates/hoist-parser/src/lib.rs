//! Parser and syntax tree for the hoist compiler.
//!
//! - `parser` - data-oriented `NodeArena`, typed node data, node access, and
//!   the recursive-descent `ParserState`
//! - `syntax` - node factory and child visiting used by source rewrites
//! - `SourceFile` - a parsed module with its arena and root

pub mod parser;
pub mod syntax;

mod source_file;
pub use source_file::SourceFile;

pub use parser::{
    NodeArena, NodeIndex, NodeList, ParseDiagnostic, ParserState, modifier_flags, node_flags,
    syntax_kind_ext,
};
