//! Parser state - statement and declaration parsing methods

use super::base::{NodeIndex, NodeList};
use super::flags::{node_flags, syntax_kind_ext};
use super::node::*;
use super::state::ParserState;
use hoist_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Statements
    // =========================================================================

    /// Parse a statement. Returns `NONE` for statements that were skipped
    /// after a diagnostic.
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            self.skip_statement();
            return NodeIndex::NONE;
        }
        let result = self.parse_statement_worker();
        self.exit_recursion();
        result
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::AtToken => {
                let decorators = self.parse_decorators();
                self.parse_declaration_with_modifiers(pos, decorators)
            }
            SyntaxKind::ExportKeyword => self.parse_export_statement(),
            SyntaxKind::ImportKeyword => {
                let next = self.peek_token();
                if matches!(next, SyntaxKind::OpenParenToken | SyntaxKind::DotToken) {
                    self.parse_expression_statement()
                } else {
                    self.parse_import_declaration(pos, None)
                }
            }
            SyntaxKind::ConstKeyword => {
                if self.peek_token() == SyntaxKind::EnumKeyword {
                    self.parse_declaration_with_modifiers(pos, Vec::new())
                } else {
                    self.parse_variable_statement(pos, None)
                }
            }
            SyntaxKind::VarKeyword => self.parse_variable_statement(pos, None),
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.parse_variable_statement(pos, None)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, None),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, None),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, None),
            SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword
                if self.next_token_on_same_line_is(ParserState::is_identifier) =>
            {
                self.parse_declaration_with_modifiers(pos, Vec::new())
            }
            SyntaxKind::AsyncKeyword
                if self.next_token_on_same_line_is(|p| p.is_token(SyntaxKind::FunctionKeyword)) =>
            {
                self.parse_declaration_with_modifiers(pos, Vec::new())
            }
            SyntaxKind::AbstractKeyword | SyntaxKind::DeclareKeyword
                if self.next_token_on_same_line_is(ParserState::is_declaration_start) =>
            {
                self.parse_declaration_with_modifiers(pos, Vec::new())
            }
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.arena
                    .add_node(syntax_kind_ext::EMPTY_STATEMENT, pos, self.last_token_end, NodeData::Token)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ReturnKeyword | SyntaxKind::ThrowKeyword => self.parse_return_or_throw(),
            SyntaxKind::ForKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::DebuggerKeyword
            | SyntaxKind::WithKeyword => {
                self.parse_error_at_current_token("Unsupported statement.");
                self.skip_statement();
                NodeIndex::NONE
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || matches!(
                    p.token(),
                    SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
                )
        })
    }

    pub(crate) fn is_declaration_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::ClassKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::ExportKeyword
        )
    }

    /// Skip tokens up to the end of the current (unsupported) statement.
    pub(crate) fn skip_statement(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    return;
                }
                SyntaxKind::CloseBraceToken if depth == 0 => return,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    depth -= 1;
                    if depth == 0 {
                        self.next_token();
                        if !matches!(
                            self.token(),
                            SyntaxKind::ElseKeyword
                                | SyntaxKind::CatchKeyword
                                | SyntaxKind::FinallyKeyword
                                | SyntaxKind::WhileKeyword
                        ) {
                            return;
                        }
                        continue;
                    }
                }
                SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.next_token();
        }
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == start {
                self.parse_error_at_current_token("Statement expected.");
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_node(
            syntax_kind_ext::BLOCK,
            pos,
            self.last_token_end,
            NodeData::Block(BlockData {
                statements: NodeList::from_vec(statements),
            }),
        )
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.arena.add_node(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            pos,
            self.last_token_end,
            NodeData::ExprStatement(ExprStatementData { expression }),
        )
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::IfKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_node(
            syntax_kind_ext::IF_STATEMENT,
            pos,
            self.last_token_end,
            NodeData::IfStatement(IfStatementData {
                expression,
                then_statement,
                else_statement,
            }),
        )
    }

    fn parse_return_or_throw(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let kind = if self.is_token(SyntaxKind::ReturnKeyword) {
            syntax_kind_ext::RETURN_STATEMENT
        } else {
            syntax_kind_ext::THROW_STATEMENT
        };
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.arena.add_node(
            kind,
            pos,
            self.last_token_end,
            NodeData::Return(ReturnData { expression }),
        )
    }

    // =========================================================================
    // Parse Methods - Modifiers and Decorators
    // =========================================================================

    pub(crate) fn parse_decorators(&mut self) -> Vec<NodeIndex> {
        let mut decorators = Vec::new();
        while self.is_token(SyntaxKind::AtToken) {
            let pos = self.token_pos();
            self.next_token();
            let expression = self.parse_left_hand_side_expression();
            decorators.push(self.arena.add_node(
                syntax_kind_ext::DECORATOR,
                pos,
                self.last_token_end,
                NodeData::Decorator(DecoratorData { expression }),
            ));
        }
        decorators
    }

    fn is_statement_modifier(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ExportKeyword
            | SyntaxKind::DefaultKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::AbstractKeyword => {
                self.next_token_on_same_line_is(ParserState::is_declaration_start)
            }
            SyntaxKind::AsyncKeyword => {
                self.next_token_on_same_line_is(|p| p.is_token(SyntaxKind::FunctionKeyword))
            }
            SyntaxKind::ConstKeyword => self.peek_token() == SyntaxKind::EnumKeyword,
            _ => false,
        }
    }

    /// Parse modifier keywords and the declaration they apply to.
    pub(crate) fn parse_declaration_with_modifiers(
        &mut self,
        pos: u32,
        mut modifiers: Vec<NodeIndex>,
    ) -> NodeIndex {
        while self.is_statement_modifier() {
            modifiers.push(self.parse_token_node());
        }
        let modifiers = if modifiers.is_empty() {
            None
        } else {
            Some(NodeList::from_vec(modifiers))
        };
        match self.token() {
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, modifiers),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, modifiers),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, modifiers)
            }
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(pos, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, modifiers),
            _ => {
                self.parse_error_at_current_token("Declaration expected.");
                self.skip_statement();
                NodeIndex::NONE
            }
        }
    }

    // =========================================================================
    // Parse Methods - Variables
    // =========================================================================

    pub(crate) fn parse_variable_statement(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        let declaration_list = self.parse_variable_declaration_list();
        self.parse_semicolon();
        self.arena.add_node(
            syntax_kind_ext::VARIABLE_STATEMENT,
            pos,
            self.last_token_end,
            NodeData::Variable(VariableData {
                modifiers,
                declaration_list,
            }),
        )
    }

    fn parse_variable_declaration_list(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::ConstKeyword => node_flags::CONST,
            SyntaxKind::LetKeyword => node_flags::LET,
            _ => node_flags::NONE,
        };
        self.next_token();
        let mut declarations = vec![self.parse_variable_declaration()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            declarations.push(self.parse_variable_declaration());
        }
        self.arena.add_node_with_flags(
            syntax_kind_ext::VARIABLE_DECLARATION_LIST,
            flags,
            pos,
            self.last_token_end,
            NodeData::VariableDeclarationList(VariableDeclarationListData {
                declarations: NodeList::from_vec(declarations),
            }),
        )
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = self.parse_binding_name();
        let exclamation_token = !self.has_preceding_line_break()
            && self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.arena.add_node(
            syntax_kind_ext::VARIABLE_DECLARATION,
            pos,
            self.last_token_end,
            NodeData::VariableDeclaration(VariableDeclarationData {
                name,
                exclamation_token,
                type_annotation,
                initializer,
            }),
        )
    }

    pub(crate) fn parse_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        }
    }

    /// Identifier or destructuring pattern.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_binding_pattern(
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                syntax_kind_ext::OBJECT_BINDING_PATTERN,
            ),
            SyntaxKind::OpenBracketToken => self.parse_binding_pattern(
                SyntaxKind::OpenBracketToken,
                SyntaxKind::CloseBracketToken,
                syntax_kind_ext::ARRAY_BINDING_PATTERN,
            ),
            _ => self.parse_identifier(),
        }
    }

    fn parse_binding_pattern(&mut self, open: SyntaxKind, close: SyntaxKind, kind: u16) -> NodeIndex {
        let pos = self.token_pos();
        let is_object = kind == syntax_kind_ext::OBJECT_BINDING_PATTERN;
        let elements = self.parse_delimited_list(open, close, |p| p.parse_binding_element(is_object));
        self.arena.add_node(
            kind,
            pos,
            self.last_token_end,
            NodeData::BindingPattern(BindingPatternData { elements }),
        )
    }

    fn parse_binding_element(&mut self, is_object: bool) -> NodeIndex {
        let pos = self.token_pos();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let mut property_name = NodeIndex::NONE;
        let name = if is_object && !dot_dot_dot_token {
            let first = self.parse_property_name();
            if self.parse_optional(SyntaxKind::ColonToken) {
                property_name = first;
                self.parse_binding_name()
            } else {
                first
            }
        } else {
            self.parse_binding_name()
        };
        let initializer = self.parse_initializer();
        self.arena.add_node(
            syntax_kind_ext::BINDING_ELEMENT,
            pos,
            self.last_token_end,
            NodeData::BindingElement(BindingElementData {
                dot_dot_dot_token,
                property_name,
                name,
                initializer,
            }),
        )
    }

    // =========================================================================
    // Parse Methods - Functions
    // =========================================================================

    pub(crate) fn parse_function_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let type_annotation = self.parse_type_annotation();
        let body = self.parse_function_body_or_semicolon();
        self.arena.add_node(
            syntax_kind_ext::FUNCTION_DECLARATION,
            pos,
            self.last_token_end,
            NodeData::Function(FunctionData {
                modifiers,
                asterisk_token,
                name,
                type_parameters,
                parameters,
                type_annotation,
                body,
            }),
        )
    }

    /// Block body, or `NONE` for overload signatures and ambient declarations.
    pub(crate) fn parse_function_body_or_semicolon(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        }
    }

    pub(crate) fn parse_parameters(&mut self) -> NodeList {
        self.parse_delimited_list(
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            ParserState::parse_parameter,
        )
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut modifiers = self.parse_decorators();
        while self.is_parameter_modifier() {
            modifiers.push(self.parse_token_node());
        }
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = if self.is_token(SyntaxKind::ThisKeyword) {
            self.parse_identifier_name()
        } else {
            self.parse_binding_name()
        };
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.arena.add_node(
            syntax_kind_ext::PARAMETER,
            pos,
            self.last_token_end,
            NodeData::Parameter(ParameterData {
                modifiers: if modifiers.is_empty() {
                    None
                } else {
                    Some(NodeList::from_vec(modifiers))
                },
                dot_dot_dot_token,
                name,
                question_token,
                type_annotation,
                initializer,
            }),
        )
    }

    fn is_parameter_modifier(&mut self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::OverrideKeyword
        ) && self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || matches!(
                    p.token(),
                    SyntaxKind::OpenBraceToken
                        | SyntaxKind::OpenBracketToken
                        | SyntaxKind::DotDotDotToken
                )
                || p.token().is_keyword()
        })
    }

    // =========================================================================
    // Parse Methods - Classes, Interfaces, Type Aliases, Enums
    // =========================================================================

    pub(crate) fn parse_class_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_class_like(pos, modifiers, syntax_kind_ext::CLASS_DECLARATION)
    }

    pub(crate) fn parse_class_like(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
        kind: u16,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() && !self.is_token(SyntaxKind::ImplementsKeyword) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_class_members();
        self.arena.add_node(
            kind,
            pos,
            self.last_token_end,
            NodeData::Class(ClassData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            }),
        )
    }

    fn parse_heritage_clauses(&mut self) -> Option<NodeList> {
        let mut clauses = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ) {
            let pos = self.token_pos();
            let token = self.token() as u16;
            self.next_token();
            let mut types = vec![self.parse_expression_with_type_arguments()];
            while self.parse_optional(SyntaxKind::CommaToken) {
                types.push(self.parse_expression_with_type_arguments());
            }
            clauses.push(self.arena.add_node(
                syntax_kind_ext::HERITAGE_CLAUSE,
                pos,
                self.last_token_end,
                NodeData::Heritage(HeritageData {
                    token,
                    types: NodeList::from_vec(types),
                }),
            ));
        }
        if clauses.is_empty() {
            None
        } else {
            Some(NodeList::from_vec(clauses))
        }
    }

    fn parse_expression_with_type_arguments(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = self.parse_entity_name_expression();
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            Some(self.parse_type_arguments())
        } else {
            None
        };
        self.arena.add_node(
            syntax_kind_ext::EXPRESSION_WITH_TYPE_ARGUMENTS,
            pos,
            self.last_token_end,
            NodeData::ExprWithTypeArgs(ExprWithTypeArgsData {
                expression,
                type_arguments,
            }),
        )
    }

    /// `a.b.c` as property access expressions.
    fn parse_entity_name_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut expression = self.parse_identifier();
        while self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            expression = self.arena.add_node(
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                pos,
                self.last_token_end,
                NodeData::AccessExpr(AccessExprData {
                    expression,
                    question_dot_token: false,
                    name_or_argument: name,
                }),
            );
        }
        expression
    }

    fn parse_interface_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_type_members();
        self.arena.add_node(
            syntax_kind_ext::INTERFACE_DECLARATION,
            pos,
            self.last_token_end,
            NodeData::Interface(InterfaceData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            }),
        )
    }

    fn parse_type_alias_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_semicolon();
        self.arena.add_node(
            syntax_kind_ext::TYPE_ALIAS_DECLARATION,
            pos,
            self.last_token_end,
            NodeData::TypeAlias(TypeAliasData {
                modifiers,
                name,
                type_parameters,
                type_node,
            }),
        )
    }

    pub(crate) fn parse_enum_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        let members = self.parse_delimited_list(
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            |p| {
                let member_pos = p.token_pos();
                let member_name = p.parse_property_name();
                let initializer = p.parse_initializer();
                p.arena.add_node(
                    syntax_kind_ext::ENUM_MEMBER,
                    member_pos,
                    p.last_token_end,
                    NodeData::EnumMember(EnumMemberData {
                        name: member_name,
                        initializer,
                    }),
                )
            },
        );
        self.arena.add_node(
            syntax_kind_ext::ENUM_DECLARATION,
            pos,
            self.last_token_end,
            NodeData::Enum(EnumData {
                modifiers,
                name,
                members,
            }),
        )
    }

    // =========================================================================
    // Parse Methods - Imports and Exports
    // =========================================================================

    fn parse_import_declaration(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.parse_expected(SyntaxKind::ImportKeyword);
        let mut import_clause = NodeIndex::NONE;
        if !self.is_token(SyntaxKind::StringLiteral) {
            import_clause = self.parse_import_clause();
            self.parse_expected(SyntaxKind::FromKeyword);
        }
        let module_specifier = self.parse_module_specifier();
        self.parse_semicolon();
        self.arena.add_node(
            syntax_kind_ext::IMPORT_DECLARATION,
            pos,
            self.last_token_end,
            NodeData::ImportDecl(ImportDeclData {
                modifiers,
                import_clause,
                module_specifier,
            }),
        )
    }

    fn parse_module_specifier(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_literal_node()
        } else {
            self.parse_error_at_current_token("String literal expected.");
            NodeIndex::NONE
        }
    }

    fn parse_import_clause(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::OpenBraceToken)
                    || p.is_token(SyntaxKind::AsteriskToken)
                    || (p.is_identifier() && !p.is_token(SyntaxKind::FromKeyword))
            });
        if is_type_only {
            self.next_token();
        }
        let mut name = NodeIndex::NONE;
        if self.is_identifier() {
            name = self.parse_identifier();
            if !self.parse_optional(SyntaxKind::CommaToken) {
                return self.finish_import_clause(pos, is_type_only, name, NodeIndex::NONE);
            }
        }
        let named_bindings = match self.token() {
            SyntaxKind::AsteriskToken => {
                let namespace_pos = self.token_pos();
                self.next_token();
                self.parse_expected(SyntaxKind::AsKeyword);
                let namespace_name = self.parse_identifier();
                self.arena.add_node(
                    syntax_kind_ext::NAMESPACE_IMPORT,
                    namespace_pos,
                    self.last_token_end,
                    NodeData::NamespaceImport(NamespaceImportData {
                        name: namespace_name,
                    }),
                )
            }
            _ => self.parse_named_imports_or_exports(syntax_kind_ext::NAMED_IMPORTS),
        };
        self.finish_import_clause(pos, is_type_only, name, named_bindings)
    }

    fn finish_import_clause(
        &mut self,
        pos: u32,
        is_type_only: bool,
        name: NodeIndex,
        named_bindings: NodeIndex,
    ) -> NodeIndex {
        self.arena.add_node(
            syntax_kind_ext::IMPORT_CLAUSE,
            pos,
            self.last_token_end,
            NodeData::ImportClause(ImportClauseData {
                is_type_only,
                name,
                named_bindings,
            }),
        )
    }

    fn parse_named_imports_or_exports(&mut self, kind: u16) -> NodeIndex {
        let pos = self.token_pos();
        let specifier_kind = if kind == syntax_kind_ext::NAMED_IMPORTS {
            syntax_kind_ext::IMPORT_SPECIFIER
        } else {
            syntax_kind_ext::EXPORT_SPECIFIER
        };
        let elements = self.parse_delimited_list(
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            |p| p.parse_specifier(specifier_kind),
        );
        self.arena.add_node(
            kind,
            pos,
            self.last_token_end,
            NodeData::NamedImports(NamedImportsData { elements }),
        )
    }

    fn parse_specifier(&mut self, kind: u16) -> NodeIndex {
        let pos = self.token_pos();
        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_identifier() || p.token().is_keyword()
            })
            && !self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::AsKeyword)
            });
        if is_type_only {
            self.next_token();
        }
        let first = self.parse_identifier_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
            (first, self.parse_identifier_name())
        } else {
            (NodeIndex::NONE, first)
        };
        self.arena.add_node(
            kind,
            pos,
            self.last_token_end,
            NodeData::Specifier(SpecifierData {
                is_type_only,
                property_name,
                name,
            }),
        )
    }

    fn parse_export_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let next = self.peek_token();
        match next {
            SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken => {
                self.parse_export_declaration(pos)
            }
            SyntaxKind::TypeKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.next_token();
                    p.is_token(SyntaxKind::OpenBraceToken)
                }) =>
            {
                self.parse_export_declaration(pos)
            }
            SyntaxKind::EqualsToken => self.parse_export_assignment(pos, true),
            SyntaxKind::DefaultKeyword => {
                let declaration_follows = self.look_ahead(|p| {
                    p.next_token();
                    p.next_token();
                    matches!(
                        p.token(),
                        SyntaxKind::ClassKeyword
                            | SyntaxKind::FunctionKeyword
                            | SyntaxKind::InterfaceKeyword
                            | SyntaxKind::AbstractKeyword
                    ) || (p.is_token(SyntaxKind::AsyncKeyword)
                        && p.next_token_on_same_line_is(|q| {
                            q.is_token(SyntaxKind::FunctionKeyword)
                        }))
                });
                if declaration_follows {
                    self.parse_declaration_with_modifiers(pos, Vec::new())
                } else {
                    self.parse_export_assignment(pos, false)
                }
            }
            _ => self.parse_declaration_with_modifiers(pos, Vec::new()),
        }
    }

    fn parse_export_assignment(&mut self, pos: u32, is_export_equals: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::ExportKeyword);
        if is_export_equals {
            self.parse_expected(SyntaxKind::EqualsToken);
        } else {
            self.parse_expected(SyntaxKind::DefaultKeyword);
        }
        let expression = self.parse_assignment_expression();
        self.parse_semicolon();
        self.arena.add_node(
            syntax_kind_ext::EXPORT_ASSIGNMENT,
            pos,
            self.last_token_end,
            NodeData::ExportAssignment(ExportAssignmentData {
                modifiers: None,
                is_export_equals,
                expression,
            }),
        )
    }

    fn parse_export_declaration(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::ExportKeyword);
        let is_type_only = self.parse_optional(SyntaxKind::TypeKeyword);
        let mut export_clause = NodeIndex::NONE;
        let mut module_specifier = NodeIndex::NONE;
        if self.parse_optional(SyntaxKind::AsteriskToken) {
            if self.is_token(SyntaxKind::AsKeyword) {
                self.parse_error_at_current_token("Namespace re-exports are not supported.");
                self.next_token();
                self.parse_identifier_name();
            }
            self.parse_expected(SyntaxKind::FromKeyword);
            module_specifier = self.parse_module_specifier();
        } else {
            export_clause = self.parse_named_imports_or_exports(syntax_kind_ext::NAMED_EXPORTS);
            if self.is_token(SyntaxKind::FromKeyword) && !self.has_preceding_line_break() {
                self.next_token();
                module_specifier = self.parse_module_specifier();
            }
        }
        self.parse_semicolon();
        self.arena.add_node(
            syntax_kind_ext::EXPORT_DECLARATION,
            pos,
            self.last_token_end,
            NodeData::ExportDecl(ExportDeclData {
                modifiers: None,
                is_type_only,
                export_clause,
                module_specifier,
            }),
        )
    }
}
