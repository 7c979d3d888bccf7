//! Node factory.
//!
//! Builders for synthesized nodes. Created nodes carry `UNSET_POS` for both
//! ends of their range, the `SYNTHESIZED` flag, and no parent.

use crate::parser::node::*;
use crate::parser::{NodeArena, NodeIndex, NodeList, UNSET_POS, node_flags, syntax_kind_ext};
use hoist_scanner::SyntaxKind;

fn create(arena: &mut NodeArena, kind: u16, flags: u16, data: NodeData) -> NodeIndex {
    arena.create_node(
        kind,
        flags | node_flags::SYNTHESIZED,
        UNSET_POS,
        UNSET_POS,
        data,
    )
}

pub fn create_identifier(arena: &mut NodeArena, text: &str) -> NodeIndex {
    create(
        arena,
        SyntaxKind::Identifier as u16,
        node_flags::NONE,
        NodeData::Identifier(IdentifierData {
            escaped_text: text.to_string(),
        }),
    )
}

/// Keyword or punctuation token, e.g. an `export` modifier.
pub fn create_token(arena: &mut NodeArena, kind: SyntaxKind) -> NodeIndex {
    create(arena, kind as u16, node_flags::NONE, NodeData::Token)
}

pub fn create_string_literal(arena: &mut NodeArena, text: &str) -> NodeIndex {
    create(
        arena,
        SyntaxKind::StringLiteral as u16,
        node_flags::NONE,
        NodeData::Literal(LiteralData {
            text: text.to_string(),
        }),
    )
}

pub fn create_variable_declaration(
    arena: &mut NodeArena,
    name: NodeIndex,
    initializer: NodeIndex,
) -> NodeIndex {
    create(
        arena,
        syntax_kind_ext::VARIABLE_DECLARATION,
        node_flags::NONE,
        NodeData::VariableDeclaration(VariableDeclarationData {
            name,
            exclamation_token: false,
            type_annotation: NodeIndex::NONE,
            initializer,
        }),
    )
}

/// `flags` selects the keyword: `node_flags::CONST`, `node_flags::LET`, or
/// `NONE` for `var`.
pub fn create_variable_declaration_list(
    arena: &mut NodeArena,
    declarations: Vec<NodeIndex>,
    flags: u16,
) -> NodeIndex {
    create(
        arena,
        syntax_kind_ext::VARIABLE_DECLARATION_LIST,
        flags & node_flags::BLOCK_SCOPED,
        NodeData::VariableDeclarationList(VariableDeclarationListData {
            declarations: NodeList::from_vec(declarations),
        }),
    )
}

pub fn create_variable_statement(
    arena: &mut NodeArena,
    modifiers: Option<NodeList>,
    declaration_list: NodeIndex,
) -> NodeIndex {
    create(
        arena,
        syntax_kind_ext::VARIABLE_STATEMENT,
        node_flags::NONE,
        NodeData::Variable(VariableData {
            modifiers,
            declaration_list,
        }),
    )
}

/// `property_name as name`, or just `name`.
pub fn create_export_specifier(
    arena: &mut NodeArena,
    property_name: Option<&str>,
    name: &str,
) -> NodeIndex {
    let property_name = match property_name {
        Some(text) => create_identifier(arena, text),
        None => NodeIndex::NONE,
    };
    let name = create_identifier(arena, name);
    create(
        arena,
        syntax_kind_ext::EXPORT_SPECIFIER,
        node_flags::NONE,
        NodeData::Specifier(SpecifierData {
            is_type_only: false,
            property_name,
            name,
        }),
    )
}

pub fn create_named_exports(arena: &mut NodeArena, elements: Vec<NodeIndex>) -> NodeIndex {
    create(
        arena,
        syntax_kind_ext::NAMED_EXPORTS,
        node_flags::NONE,
        NodeData::NamedImports(NamedImportsData {
            elements: NodeList::from_vec(elements),
        }),
    )
}

/// `export { ... }` with an optional `from` clause.
pub fn create_export_declaration(
    arena: &mut NodeArena,
    export_clause: NodeIndex,
    module_specifier: NodeIndex,
) -> NodeIndex {
    create(
        arena,
        syntax_kind_ext::EXPORT_DECLARATION,
        node_flags::NONE,
        NodeData::ExportDecl(ExportDeclData {
            modifiers: None,
            is_type_only: false,
            export_clause,
            module_specifier,
        }),
    )
}

/// Replace the statement list of a source file node. The new root keeps
/// the original range and links back to it.
pub fn update_source_file(
    arena: &mut NodeArena,
    source_file: NodeIndex,
    statements: Vec<NodeIndex>,
) -> NodeIndex {
    super::visitor::update_node(
        arena,
        source_file,
        NodeData::SourceFile(SourceFileData {
            statements: NodeList::from_vec(statements),
        }),
    )
}
