//! Printer for hoist syntax trees.
//!
//! Renders a parsed or rewritten `SourceFile` back to TypeScript text. There
//! is no downleveling and no type erasure: what the tree holds is what gets
//! printed, so rewrites can be checked by reading the output.

pub mod emitter;
mod source_writer;

pub use emitter::Printer;
pub use source_writer::SourceWriter;
