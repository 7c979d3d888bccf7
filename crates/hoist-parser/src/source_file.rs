//! A parsed module.

use crate::parser::{NodeArena, NodeIndex, ParseDiagnostic, ParserState, modifier_flags};
use hoist_common::{LineAndCharacter, LineMap, is_declaration_file_name};

/// A module's text, syntax tree and parse diagnostics.
///
/// Rewrites append nodes to `arena` and install a new `root`; nodes reachable
/// from the old root stay valid.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub is_declaration_file: bool,
    pub diagnostics: Vec<ParseDiagnostic>,
    line_map: LineMap,
}

impl SourceFile {
    pub fn parse(file_name: impl Into<String>, text: impl Into<String>) -> SourceFile {
        let file_name = file_name.into();
        let text = text.into();
        let mut parser = ParserState::new(file_name.clone(), text.clone());
        let root = parser.parse_source_file();
        let (arena, diagnostics) = parser.into_parts();
        let line_map = LineMap::build(&text);
        SourceFile {
            is_declaration_file: is_declaration_file_name(&file_name),
            file_name,
            text,
            arena,
            root,
            diagnostics,
            line_map,
        }
    }

    /// Top-level statements of the current root.
    pub fn statements(&self) -> &[NodeIndex] {
        self.arena
            .get(self.root)
            .and_then(|node| self.arena.get_source_file(node))
            .map(|data| data.statements.nodes.as_slice())
            .unwrap_or_default()
    }

    /// True when the module has any import or export.
    pub fn is_external_module(&self) -> bool {
        use crate::parser::syntax_kind_ext::{
            EXPORT_ASSIGNMENT, EXPORT_DECLARATION, IMPORT_DECLARATION,
        };
        self.statements().iter().any(|&statement| {
            matches!(
                self.arena.kind_of(statement),
                Some(IMPORT_DECLARATION | EXPORT_DECLARATION | EXPORT_ASSIGNMENT)
            ) || self.arena.has_modifier(statement, modifier_flags::EXPORT)
        })
    }

    /// Zero-based line and character of a source offset.
    pub fn line_and_character_of(&self, offset: u32) -> LineAndCharacter {
        self.line_map.line_and_character_of(&self.text, offset)
    }

    /// Source text covered by `node`; empty for synthesized nodes.
    pub fn node_text(&self, node: NodeIndex) -> &str {
        self.arena
            .get(node)
            .and_then(|header| self.text.get(header.pos as usize..header.end as usize))
            .unwrap_or("")
    }
}
