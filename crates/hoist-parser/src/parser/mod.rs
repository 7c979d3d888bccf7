//! Arena AST and recursive-descent parser.

mod base;
mod flags;
pub mod node;
pub mod node_access;
mod node_arena;
mod state;
mod state_expressions;
mod state_statements;
mod state_statements_class_members;
mod state_types;

pub use base::{NodeIndex, NodeList, UNSET_POS};
pub use flags::{modifier_flags, node_flags, syntax_kind_ext};
pub use node::*;
pub use node_access::{NodeAccess, modifier_to_flag};
pub use state::{ParseDiagnostic, ParserState};
