//! Printer - renders an arena syntax tree as TypeScript source.
//!
//! The printer is split across files by concern, each adding an
//! `impl Printer` block:
//! - `helpers`: output and list helpers
//! - `literals`: identifiers and literal text
//! - `expressions`: operators, calls, member access, object/array literals
//! - `functions`: functions, arrows, parameters and class members
//! - `declarations`: classes, interfaces, enums, type aliases, variables
//! - `statements`: blocks and control flow
//! - `module_emission`: imports and exports
//! - `types`: type annotations
//!
//! Layout is fixed: one statement per line, four-space indentation, single
//! quoted strings, and object/array literals kept on one line.

mod declarations;
mod expressions;
mod functions;
mod helpers;
mod literals;
mod module_emission;
mod statements;
mod types;

use crate::source_writer::SourceWriter;
use hoist_common::limits::MAX_EMIT_RECURSION_DEPTH;
use hoist_parser::SourceFile;
use hoist_parser::parser::node::Node;
use hoist_parser::parser::{NodeArena, NodeIndex, syntax_kind_ext};
use hoist_scanner::SyntaxKind;
use tracing::{debug, warn};

/// Source text of an operator or keyword token kind.
pub(crate) fn get_operator_text(kind: u16) -> &'static str {
    SyntaxKind::from_u16(kind)
        .and_then(SyntaxKind::text)
        .unwrap_or("")
}

pub struct Printer<'a> {
    pub(super) arena: &'a NodeArena,
    pub(super) writer: SourceWriter,
    emit_depth: u32,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Printer {
            arena,
            writer: SourceWriter::new(),
            emit_depth: 0,
        }
    }

    /// Print the current root of `source_file`.
    pub fn print_source_file(source_file: &SourceFile) -> String {
        debug!(file = %source_file.file_name, "printing source file");
        let mut printer = Printer::new(&source_file.arena);
        printer.emit(source_file.root);
        printer.finish()
    }

    /// Print a single node, without a trailing newline.
    pub fn print_node(arena: &'a NodeArena, node: NodeIndex) -> String {
        let mut printer = Printer::new(arena);
        printer.emit(node);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.writer.into_output()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Emit any node. Absent nodes emit nothing.
    pub fn emit(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        if self.emit_depth >= MAX_EMIT_RECURSION_DEPTH {
            warn!(kind = node.kind, "printer recursion limit reached");
            return;
        }
        self.emit_depth += 1;
        self.emit_node(node);
        self.emit_depth -= 1;
    }

    fn emit_node(&mut self, node: &Node) {
        use syntax_kind_ext as k;
        match node.kind {
            k::SOURCE_FILE => self.emit_source_file(node),

            // Names
            k::QUALIFIED_NAME => self.emit_qualified_name(node),
            k::COMPUTED_PROPERTY_NAME => self.emit_computed_property_name(node),
            k::DECORATOR => self.emit_decorator(node),

            // Signature elements and members
            k::TYPE_PARAMETER => self.emit_type_parameter(node),
            k::PARAMETER => self.emit_parameter(node),
            k::PROPERTY_SIGNATURE | k::METHOD_SIGNATURE => self.emit_signature(node),
            k::PROPERTY_DECLARATION => self.emit_property_declaration(node),
            k::METHOD_DECLARATION => self.emit_method_declaration(node),
            k::CONSTRUCTOR => self.emit_constructor(node),
            k::GET_ACCESSOR | k::SET_ACCESSOR => self.emit_accessor(node),

            // Types
            k::TYPE_REFERENCE => self.emit_type_reference(node),
            k::FUNCTION_TYPE => self.emit_function_type(node),
            k::TYPE_LITERAL => self.emit_type_literal(node),
            k::ARRAY_TYPE => self.emit_array_type(node),
            k::UNION_TYPE => self.emit_composite_type(node, " | "),
            k::INTERSECTION_TYPE => self.emit_composite_type(node, " & "),
            k::PARENTHESIZED_TYPE => self.emit_parenthesized_type(node),
            k::LITERAL_TYPE => self.emit_literal_type(node),

            // Binding patterns
            k::OBJECT_BINDING_PATTERN => self.emit_binding_pattern(node, "{ ", " }"),
            k::ARRAY_BINDING_PATTERN => self.emit_binding_pattern(node, "[", "]"),
            k::BINDING_ELEMENT => self.emit_binding_element(node),

            // Expressions
            k::ARRAY_LITERAL_EXPRESSION => self.emit_array_literal(node),
            k::OBJECT_LITERAL_EXPRESSION => self.emit_object_literal(node),
            k::PROPERTY_ACCESS_EXPRESSION => self.emit_property_access(node),
            k::ELEMENT_ACCESS_EXPRESSION => self.emit_element_access(node),
            k::CALL_EXPRESSION => self.emit_call_expression(node),
            k::NEW_EXPRESSION => self.emit_new_expression(node),
            k::PARENTHESIZED_EXPRESSION => self.emit_parenthesized_expression(node),
            k::FUNCTION_EXPRESSION => self.emit_function(node),
            k::ARROW_FUNCTION => self.emit_arrow_function(node),
            k::PREFIX_UNARY_EXPRESSION => self.emit_prefix_unary(node),
            k::POSTFIX_UNARY_EXPRESSION => self.emit_postfix_unary(node),
            k::NON_NULL_EXPRESSION => self.emit_non_null_expression(node),
            k::BINARY_EXPRESSION => self.emit_binary_expression(node),
            k::CONDITIONAL_EXPRESSION => self.emit_conditional_expression(node),
            k::SPREAD_ELEMENT | k::SPREAD_ASSIGNMENT => self.emit_spread(node),
            k::CLASS_EXPRESSION => self.emit_class(node),
            k::AS_EXPRESSION => self.emit_as_expression(node),
            k::EXPRESSION_WITH_TYPE_ARGUMENTS => self.emit_expression_with_type_arguments(node),
            k::PROPERTY_ASSIGNMENT => self.emit_property_assignment(node),
            k::SHORTHAND_PROPERTY_ASSIGNMENT => self.emit_shorthand_property(node),

            // Statements
            k::BLOCK => self.emit_block(node),
            k::EMPTY_STATEMENT => self.write(";"),
            k::VARIABLE_STATEMENT => self.emit_variable_statement(node),
            k::VARIABLE_DECLARATION_LIST => self.emit_variable_declaration_list(node),
            k::VARIABLE_DECLARATION => self.emit_variable_declaration(node),
            k::EXPRESSION_STATEMENT => self.emit_expression_statement(node),
            k::IF_STATEMENT => self.emit_if_statement(node),
            k::RETURN_STATEMENT => self.emit_return_like(node, "return"),
            k::THROW_STATEMENT => self.emit_return_like(node, "throw"),

            // Declarations
            k::FUNCTION_DECLARATION => self.emit_function(node),
            k::CLASS_DECLARATION => self.emit_class(node),
            k::INTERFACE_DECLARATION => self.emit_interface_declaration(node),
            k::TYPE_ALIAS_DECLARATION => self.emit_type_alias_declaration(node),
            k::ENUM_DECLARATION => self.emit_enum_declaration(node),
            k::ENUM_MEMBER => self.emit_enum_member(node),
            k::HERITAGE_CLAUSE => self.emit_heritage_clause(node),

            // Modules
            k::IMPORT_DECLARATION => self.emit_import_declaration(node),
            k::IMPORT_CLAUSE => self.emit_import_clause(node),
            k::NAMESPACE_IMPORT => self.emit_namespace_import(node),
            k::NAMED_IMPORTS | k::NAMED_EXPORTS => self.emit_named_bindings(node),
            k::IMPORT_SPECIFIER | k::EXPORT_SPECIFIER => self.emit_specifier(node),
            k::EXPORT_DECLARATION => self.emit_export_declaration(node),
            k::EXPORT_ASSIGNMENT => self.emit_export_assignment(node),

            kind => self.emit_token_kind(node, kind),
        }
    }

    /// Tokens: identifiers, literals, and keyword or punctuation nodes.
    fn emit_token_kind(&mut self, node: &Node, kind: u16) {
        match SyntaxKind::from_u16(kind) {
            Some(SyntaxKind::Identifier) => self.emit_identifier(node),
            Some(SyntaxKind::StringLiteral) => self.emit_string_literal(node),
            Some(SyntaxKind::NumericLiteral) => self.emit_numeric_literal(node),
            Some(SyntaxKind::NoSubstitutionTemplateLiteral) => self.emit_template_literal(node),
            Some(token) => match token.text() {
                Some(text) => self.write(text),
                None => warn!(kind, "token kind has no text"),
            },
            None => warn!(kind, "unknown node kind"),
        }
    }

    fn emit_source_file(&mut self, node: &Node) {
        let Some(source) = self.arena.get_source_file(node) else {
            return;
        };
        for &statement in &source.statements.nodes {
            self.emit(statement);
            self.write_line();
        }
    }
}
