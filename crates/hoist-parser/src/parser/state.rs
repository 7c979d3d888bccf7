//! Parser state - token handling, diagnostics and speculative lookahead.

use super::base::{NodeIndex, NodeList};
use super::flags::syntax_kind_ext;
use super::node::*;
use hoist_common::limits::MAX_PARSER_RECURSION_DEPTH;
use hoist_scanner::{ScannerState, SyntaxKind, TokenFlags};

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub message: String,
    pub start: u32,
    pub length: u32,
}

/// Recursive-descent parser for the supported TypeScript subset.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub arena: NodeArena,
    pub(crate) diagnostics: Vec<ParseDiagnostic>,
    pub(crate) file_name: String,
    /// End of the last consumed token; used as the end of finished nodes.
    pub(crate) last_token_end: u32,
    pub(crate) recursion_depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let estimated_nodes = source_text.len() / 6;
        let mut parser = ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::with_capacity(estimated_nodes),
            diagnostics: Vec::new(),
            file_name,
            last_token_end: 0,
            recursion_depth: 0,
        };
        parser.scanner.scan();
        parser
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    /// Consume the parser, returning the arena and diagnostics.
    pub fn into_parts(self) -> (NodeArena, Vec<ParseDiagnostic>) {
        (self.arena, self.diagnostics)
    }

    /// Parse the whole file and return the `SourceFile` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
                // No progress; drop the offending token.
                self.parse_error_at_current_token(&format!(
                    "Unexpected token '{}'.",
                    self.scanner.get_token_text()
                ));
                self.next_token();
            }
        }
        let end = self.scanner.get_text().len() as u32;
        let root = self.arena.add_node(
            syntax_kind_ext::SOURCE_FILE,
            0,
            end,
            NodeData::SourceFile(SourceFileData {
                statements: NodeList::from_vec(statements),
            }),
        );
        tracing::trace!(
            file = %self.file_name,
            nodes = self.arena.len(),
            diagnostics = self.diagnostics.len(),
            "parsed source file"
        );
        root
    }

    // =========================================================================
    // Token Access
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.get_token()
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    #[inline]
    pub(crate) fn token_value(&self) -> String {
        self.scanner.get_token_value().to_string()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.last_token_end = self.scanner.get_token_end();
        self.scanner.scan()
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Consume the token if it matches.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume the token or report that it was expected.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = kind.text().unwrap_or("token");
        self.parse_error_at_current_token(&format!("'{text}' expected."));
        false
    }

    /// Identifiers and contextual keywords.
    pub(crate) fn is_identifier(&self) -> bool {
        let token = self.token();
        token == SyntaxKind::Identifier || token.is_contextual_keyword()
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Consume a statement terminator, honoring automatic semicolon insertion.
    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.parse_expected(SyntaxKind::SemicolonToken);
        }
    }

    // =========================================================================
    // Lookahead
    // =========================================================================

    /// Run `f` speculatively and rewind the scanner, diagnostics and arena.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ParserState) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let last_token_end = self.last_token_end;
        let diagnostics = self.diagnostics.len();
        let nodes = self.arena.len();
        let data = self.arena.data.len();
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.last_token_end = last_token_end;
        self.diagnostics.truncate(diagnostics);
        self.arena.truncate(nodes, data);
        result
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_token(&mut self) -> SyntaxKind {
        self.look_ahead(|p| p.next_token())
    }

    /// True when the next token is on the same line and satisfies `pred`.
    pub(crate) fn next_token_on_same_line_is(
        &mut self,
        pred: impl FnOnce(&ParserState) -> bool,
    ) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && pred(p)
        })
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str) {
        // One diagnostic per position keeps cascades quiet.
        if self
            .diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        self.diagnostics.push(ParseDiagnostic {
            message: message.to_string(),
            start,
            length,
        });
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message);
    }

    pub(crate) fn check_literal_flags(&mut self) {
        let flags = self.scanner.get_token_flags();
        if flags & TokenFlags::UNTERMINATED != 0 {
            let message = match self.token() {
                SyntaxKind::StringLiteral => "Unterminated string literal.",
                SyntaxKind::NoSubstitutionTemplateLiteral => "Unterminated template literal.",
                _ => "Invalid character.",
            };
            self.parse_error_at_current_token(message);
        }
        if flags & TokenFlags::TEMPLATE_SUBSTITUTIONS != 0 {
            self.parse_error_at_current_token("Template literal substitutions are not supported.");
        }
    }

    // =========================================================================
    // Recursion Guard
    // =========================================================================

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            self.parse_error_at_current_token("Maximum nesting depth exceeded.");
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Shared Node Builders
    // =========================================================================

    /// Parse an identifier; contextual keywords are accepted.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_identifier() {
            return self.parse_identifier_name();
        }
        self.parse_error_at_current_token("Identifier expected.");
        self.create_missing_identifier()
    }

    /// Parse an identifier name; any keyword is accepted.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if self.token() == SyntaxKind::Identifier || self.token().is_keyword() {
            let pos = self.token_pos();
            let end = self.token_end();
            let text = self.token_value();
            self.next_token();
            return self.arena.add_identifier(pos, end, &text);
        }
        self.parse_error_at_current_token("Identifier expected.");
        self.create_missing_identifier()
    }

    pub(crate) fn create_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_identifier(pos, pos, "")
    }

    /// String or numeric literal at the current token.
    pub(crate) fn parse_literal_node(&mut self) -> NodeIndex {
        self.check_literal_flags();
        let kind = self.token() as u16;
        let pos = self.token_pos();
        let end = self.token_end();
        let text = self.token_value();
        self.next_token();
        self.arena.add_literal(kind, pos, end, &text)
    }

    /// Consume the current token as a token node.
    pub(crate) fn parse_token_node(&mut self) -> NodeIndex {
        let kind = self.token() as u16;
        let pos = self.token_pos();
        let end = self.token_end();
        self.next_token();
        self.arena.add_token(kind, pos, end)
    }

    /// Property name: identifier, keyword, string, number or `[computed]`.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal_node(),
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression = self.parse_assignment_expression();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.arena.add_node(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    pos,
                    self.last_token_end,
                    NodeData::ComputedProperty(ComputedPropertyData { expression }),
                )
            }
            _ => self.parse_identifier_name(),
        }
    }

    pub(crate) fn is_property_name_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::Identifier
                | SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::OpenBracketToken
        ) || self.token().is_keyword()
    }

    /// Parse a comma-separated list between `open` and `close`.
    pub(crate) fn parse_delimited_list(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
        mut parse_element: impl FnMut(&mut ParserState) -> NodeIndex,
    ) -> NodeList {
        let mut nodes = Vec::new();
        self.parse_expected(open);
        while !self.is_token(close) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            let element = parse_element(self);
            if element.is_some() {
                nodes.push(element);
            }
            if self.parse_optional(SyntaxKind::CommaToken) {
                continue;
            }
            if !self.is_token(close) {
                self.parse_expected(SyntaxKind::CommaToken);
                if self.token_pos() == start {
                    break;
                }
            }
        }
        self.parse_expected(close);
        NodeList::from_vec(nodes)
    }
}
