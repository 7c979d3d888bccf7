//! Parser state - expression parsing methods

use super::base::{NodeIndex, NodeList};
use super::flags::{node_flags, syntax_kind_ext};
use super::node::*;
use super::state::ParserState;
use hoist_scanner::SyntaxKind;

/// Binary operator precedence; 0 means "not a binary operator".
fn binary_operator_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::QuestionQuestionToken => 4,
        SyntaxKind::BarBarToken => 5,
        SyntaxKind::AmpersandAmpersandToken => 6,
        SyntaxKind::BarToken => 7,
        SyntaxKind::CaretToken => 8,
        SyntaxKind::AmpersandToken => 9,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 10,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword
        | SyntaxKind::AsKeyword => 11,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 12,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 13,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 14,
        SyntaxKind::AsteriskAsteriskToken => 15,
        _ => 0,
    }
}

fn is_assignment_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::EqualsToken
            | SyntaxKind::PlusEqualsToken
            | SyntaxKind::MinusEqualsToken
            | SyntaxKind::AsteriskEqualsToken
            | SyntaxKind::SlashEqualsToken
    )
}

impl ParserState {
    // =========================================================================
    // Parse Methods - Expressions
    // =========================================================================

    /// Expression including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut left = self.parse_assignment_expression();
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            left = self.make_binary(pos, left, SyntaxKind::CommaToken, right);
        }
        left
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }
        let result = self.parse_assignment_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeIndex {
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }
        let pos = self.token_pos();
        let expression = self.parse_binary_expression(0);
        if is_assignment_operator(self.token()) {
            let operator = self.token();
            self.next_token();
            let right = self.parse_assignment_expression();
            return self.make_binary(pos, expression, operator, right);
        }
        self.parse_conditional_rest(pos, expression)
    }

    fn parse_conditional_rest(&mut self, pos: u32, condition: NodeIndex) -> NodeIndex {
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.parse_assignment_expression();
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();
        self.arena.add_node(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            pos,
            self.last_token_end,
            NodeData::ConditionalExpr(ConditionalExprData {
                condition,
                when_true,
                when_false,
            }),
        )
    }

    fn make_binary(
        &mut self,
        pos: u32,
        left: NodeIndex,
        operator: SyntaxKind,
        right: NodeIndex,
    ) -> NodeIndex {
        self.arena.add_node(
            syntax_kind_ext::BINARY_EXPRESSION,
            pos,
            self.last_token_end,
            NodeData::BinaryExpr(BinaryExprData {
                left,
                operator_token: operator as u16,
                right,
            }),
        )
    }

    /// Precedence climbing over binary operators.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let pos = self.token_pos();
        let mut left = self.parse_unary_expression();
        loop {
            if self.is_token(SyntaxKind::GreaterThanToken) {
                self.scanner.re_scan_greater_token();
            }
            let operator = self.token();
            let precedence = binary_operator_precedence(operator);
            if precedence == 0 || precedence <= min_precedence {
                // `**` is right associative.
                if !(operator == SyntaxKind::AsteriskAsteriskToken && precedence == min_precedence)
                {
                    break;
                }
            }
            if operator == SyntaxKind::AsKeyword {
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let type_node = if self.is_token(SyntaxKind::ConstKeyword) {
                    self.parse_token_node()
                } else {
                    self.parse_type()
                };
                left = self.arena.add_node(
                    syntax_kind_ext::AS_EXPRESSION,
                    pos,
                    self.last_token_end,
                    NodeData::AsExpression(AsExpressionData {
                        expression: left,
                        type_node,
                    }),
                );
                continue;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence);
            left = self.make_binary(pos, left, operator, right);
        }
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                let operator = self.token() as u16;
                self.next_token();
                let operand = self.parse_unary_expression();
                self.arena.add_node(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    pos,
                    self.last_token_end,
                    NodeData::UnaryExpr(UnaryExprData { operator, operand }),
                )
            }
            SyntaxKind::AwaitKeyword
                if self.next_token_on_same_line_is(ParserState::is_start_of_expression) =>
            {
                let operator = self.token() as u16;
                self.next_token();
                let operand = self.parse_unary_expression();
                self.arena.add_node(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    pos,
                    self.last_token_end,
                    NodeData::UnaryExpr(UnaryExprData { operator, operand }),
                )
            }
            SyntaxKind::LessThanToken => {
                self.parse_error_at_current_token(
                    "Angle-bracket type assertions are not supported; use 'as'.",
                );
                self.parse_type_arguments();
                self.parse_unary_expression()
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let operand = self.parse_left_hand_side_expression();
        if matches!(
            self.token(),
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
        ) && !self.has_preceding_line_break()
        {
            let operator = self.token() as u16;
            self.next_token();
            return self.arena.add_node(
                syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                pos,
                self.last_token_end,
                NodeData::UnaryExpr(UnaryExprData { operator, operand }),
            );
        }
        operand
    }

    pub(crate) fn is_start_of_expression(&self) -> bool {
        !matches!(
            self.token(),
            SyntaxKind::EndOfFileToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CommaToken
                | SyntaxKind::ColonToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::EqualsGreaterThanToken
                | SyntaxKind::QuestionToken
                | SyntaxKind::DotToken
        )
    }

    // =========================================================================
    // Parse Methods - Left-hand-side and member expressions
    // =========================================================================

    /// Member, call and `new` expressions.
    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else if self.is_token(SyntaxKind::ImportKeyword) || self.is_token(SyntaxKind::SuperKeyword)
        {
            self.parse_token_node()
        } else {
            self.parse_primary_expression()
        };
        self.parse_call_and_member_rest(pos, expression, true)
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword);
        if self.is_token(SyntaxKind::DotToken) {
            self.parse_error_at_current_token("'new.target' is not supported.");
            self.next_token();
            return self.parse_identifier_name();
        }
        let callee_pos = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let expression = self.parse_call_and_member_rest(callee_pos, callee, false);
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            self.try_parse_type_arguments_in_expression()
        } else {
            None
        };
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list())
        } else {
            None
        };
        self.arena.add_node(
            syntax_kind_ext::NEW_EXPRESSION,
            pos,
            self.last_token_end,
            NodeData::CallExpr(CallExprData {
                expression,
                type_arguments,
                arguments,
            }),
        )
    }

    /// Property/element access, non-null assertions and (when `allow_calls`)
    /// call suffixes.
    fn parse_call_and_member_rest(
        &mut self,
        pos: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_identifier_name();
                    expression = self.make_access(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        pos,
                        expression,
                        false,
                        name,
                    );
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.next_token();
                    match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_argument_list();
                            expression = self.make_call(pos, expression, None, arguments);
                            self.mark_optional_chain(expression);
                        }
                        SyntaxKind::OpenBracketToken => {
                            self.next_token();
                            let argument = self.parse_expression();
                            self.parse_expected(SyntaxKind::CloseBracketToken);
                            expression = self.make_access(
                                syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                                pos,
                                expression,
                                true,
                                argument,
                            );
                        }
                        _ => {
                            let name = self.parse_identifier_name();
                            expression = self.make_access(
                                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                                pos,
                                expression,
                                true,
                                name,
                            );
                        }
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument = self.parse_expression();
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    expression = self.make_access(
                        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                        pos,
                        expression,
                        false,
                        argument,
                    );
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    expression = self.arena.add_node(
                        syntax_kind_ext::NON_NULL_EXPRESSION,
                        pos,
                        self.last_token_end,
                        NodeData::UnaryExpr(UnaryExprData {
                            operator: SyntaxKind::ExclamationToken as u16,
                            operand: expression,
                        }),
                    );
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_argument_list();
                    expression = self.make_call(pos, expression, None, arguments);
                }
                SyntaxKind::LessThanToken if allow_calls => {
                    let Some(type_arguments) = self.try_parse_type_arguments_in_expression()
                    else {
                        break;
                    };
                    if !self.is_token(SyntaxKind::OpenParenToken) {
                        self.parse_expected(SyntaxKind::OpenParenToken);
                        break;
                    }
                    let arguments = self.parse_argument_list();
                    expression = self.make_call(pos, expression, Some(type_arguments), arguments);
                }
                SyntaxKind::NoSubstitutionTemplateLiteral => {
                    self.parse_error_at_current_token("Tagged templates are not supported.");
                    self.next_token();
                }
                _ => break,
            }
        }
        expression
    }

    fn make_access(
        &mut self,
        kind: u16,
        pos: u32,
        expression: NodeIndex,
        question_dot_token: bool,
        name_or_argument: NodeIndex,
    ) -> NodeIndex {
        let node = self.arena.add_node(
            kind,
            pos,
            self.last_token_end,
            NodeData::AccessExpr(AccessExprData {
                expression,
                question_dot_token,
                name_or_argument,
            }),
        );
        if question_dot_token {
            self.mark_optional_chain(node);
        }
        node
    }

    fn make_call(
        &mut self,
        pos: u32,
        expression: NodeIndex,
        type_arguments: Option<NodeList>,
        arguments: NodeList,
    ) -> NodeIndex {
        self.arena.add_node(
            syntax_kind_ext::CALL_EXPRESSION,
            pos,
            self.last_token_end,
            NodeData::CallExpr(CallExprData {
                expression,
                type_arguments,
                arguments: Some(arguments),
            }),
        )
    }

    fn mark_optional_chain(&mut self, node: NodeIndex) {
        if let Some(header) = self.arena.get_mut(node) {
            header.flags |= node_flags::OPTIONAL_CHAIN;
        }
    }

    /// `<T>` followed by `(`; anything else means the `<` was a comparison.
    fn try_parse_type_arguments_in_expression(&mut self) -> Option<NodeList> {
        let ok = self.look_ahead(|p| {
            let diagnostics = p.diagnostics.len();
            p.parse_type_arguments();
            p.diagnostics.len() == diagnostics && p.is_token(SyntaxKind::OpenParenToken)
        });
        if ok {
            Some(self.parse_type_arguments())
        } else {
            None
        }
    }

    fn parse_argument_list(&mut self) -> NodeList {
        self.parse_delimited_list(
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            ParserState::parse_argument_or_array_element,
        )
    }

    fn parse_argument_or_array_element(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let pos = self.token_pos();
            self.next_token();
            let expression = self.parse_assignment_expression();
            return self.arena.add_node(
                syntax_kind_ext::SPREAD_ELEMENT,
                pos,
                self.last_token_end,
                NodeData::Spread(SpreadData { expression }),
            );
        }
        self.parse_assignment_expression()
    }

    // =========================================================================
    // Parse Methods - Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::ThisKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::SuperKeyword => self.parse_token_node(),
            SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => self.parse_literal_node(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_expression();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_node(
                    syntax_kind_ext::PARENTHESIZED_EXPRESSION,
                    pos,
                    self.last_token_end,
                    NodeData::Parenthesized(ParenthesizedData { expression }),
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(pos, None),
            SyntaxKind::AsyncKeyword
                if self.next_token_on_same_line_is(|p| p.is_token(SyntaxKind::FunctionKeyword)) =>
            {
                let modifier = self.parse_token_node();
                self.parse_function_expression(pos, Some(NodeList::from_vec(vec![modifier])))
            }
            SyntaxKind::ClassKeyword => {
                self.parse_class_like(pos, None, syntax_kind_ext::CLASS_EXPRESSION)
            }
            SyntaxKind::AtToken => {
                let decorators = self.parse_decorators();
                if self.is_token(SyntaxKind::ClassKeyword) {
                    self.parse_class_like(
                        pos,
                        Some(NodeList::from_vec(decorators)),
                        syntax_kind_ext::CLASS_EXPRESSION,
                    )
                } else {
                    self.parse_error_at_current_token("'class' expected.");
                    self.create_missing_identifier()
                }
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.parse_error_at_current_token("Regular expression literals are not supported.");
                self.next_token();
                self.create_missing_identifier()
            }
            _ if self.is_identifier() => self.parse_identifier(),
            _ => {
                self.parse_error_at_current_token("Expression expected.");
                self.create_missing_identifier()
            }
        }
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let elements = self.parse_delimited_list(
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            |p| {
                if p.is_token(SyntaxKind::CommaToken) {
                    p.parse_error_at_current_token("Array holes are not supported.");
                    return NodeIndex::NONE;
                }
                p.parse_argument_or_array_element()
            },
        );
        self.arena.add_node(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            pos,
            self.last_token_end,
            NodeData::LiteralExpr(LiteralExprData { elements }),
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let elements = self.parse_delimited_list(
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            ParserState::parse_object_literal_element,
        );
        self.arena.add_node(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            pos,
            self.last_token_end,
            NodeData::LiteralExpr(LiteralExprData { elements }),
        )
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression();
            return self.arena.add_node(
                syntax_kind_ext::SPREAD_ASSIGNMENT,
                pos,
                self.last_token_end,
                NodeData::Spread(SpreadData { expression }),
            );
        }

        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.next_token_on_same_line_is(ParserState::is_property_name_start)
        {
            let kind = if self.is_token(SyntaxKind::GetKeyword) {
                syntax_kind_ext::GET_ACCESSOR
            } else {
                syntax_kind_ext::SET_ACCESSOR
            };
            self.next_token();
            let name = self.parse_property_name();
            let parameters = self.parse_parameters();
            let type_annotation = self.parse_type_annotation();
            let body = self.parse_block();
            return self.arena.add_node(
                kind,
                pos,
                self.last_token_end,
                NodeData::Accessor(AccessorData {
                    modifiers: None,
                    name,
                    parameters,
                    type_annotation,
                    body,
                }),
            );
        }

        let mut modifiers = Vec::new();
        if self.is_token(SyntaxKind::AsyncKeyword)
            && self.next_token_on_same_line_is(|p| {
                p.is_property_name_start() || p.is_token(SyntaxKind::AsteriskToken)
            })
        {
            modifiers.push(self.parse_token_node());
        }
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name_is_identifier = self.is_identifier();
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if asterisk_token
            || !modifiers.is_empty()
            || matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let type_annotation = self.parse_type_annotation();
            let body = self.parse_block();
            return self.arena.add_node(
                syntax_kind_ext::METHOD_DECLARATION,
                pos,
                self.last_token_end,
                NodeData::MethodDecl(MethodDeclData {
                    modifiers: if modifiers.is_empty() {
                        None
                    } else {
                        Some(NodeList::from_vec(modifiers))
                    },
                    asterisk_token,
                    name,
                    question_token,
                    type_parameters,
                    parameters,
                    type_annotation,
                    body,
                }),
            );
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression();
            return self.arena.add_node(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                pos,
                self.last_token_end,
                NodeData::PropertyAssignment(PropertyAssignmentData { name, initializer }),
            );
        }

        if !name_is_identifier {
            self.parse_expected(SyntaxKind::ColonToken);
        } else if self.is_token(SyntaxKind::EqualsToken) {
            self.parse_error_at_current_token("Shorthand property initializers are not supported.");
            self.next_token();
            self.parse_assignment_expression();
        }
        self.arena.add_node(
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
            pos,
            self.last_token_end,
            NodeData::ShorthandProperty(ShorthandPropertyData { name }),
        )
    }

    fn parse_function_expression(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
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
        let body = self.parse_block();
        self.arena.add_node(
            syntax_kind_ext::FUNCTION_EXPRESSION,
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

    // =========================================================================
    // Parse Methods - Arrow functions
    // =========================================================================

    fn try_parse_arrow_function(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let mut modifiers = None;
        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && self.next_token_on_same_line_is(|p| {
                p.is_identifier()
                    || p.is_token(SyntaxKind::OpenParenToken)
                    || p.is_token(SyntaxKind::LessThanToken)
            })
            && self.look_ahead(|p| {
                p.next_token();
                p.is_simple_arrow_start() || p.is_parenthesized_arrow_start()
            });
        if is_async {
            let modifier = self.parse_token_node();
            modifiers = Some(NodeList::from_vec(vec![modifier]));
        }

        if self.is_simple_arrow_start() {
            let parameter_pos = self.token_pos();
            let name = self.parse_identifier();
            let parameter = self.arena.add_node(
                syntax_kind_ext::PARAMETER,
                parameter_pos,
                self.last_token_end,
                NodeData::Parameter(ParameterData {
                    modifiers: None,
                    dot_dot_dot_token: false,
                    name,
                    question_token: false,
                    type_annotation: NodeIndex::NONE,
                    initializer: NodeIndex::NONE,
                }),
            );
            return Some(self.parse_arrow_rest(
                pos,
                modifiers,
                None,
                NodeList::from_vec(vec![parameter]),
                NodeIndex::NONE,
            ));
        }

        if self.is_parenthesized_arrow_start() {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let type_annotation = self.parse_type_annotation();
            return Some(self.parse_arrow_rest(
                pos,
                modifiers,
                type_parameters,
                parameters,
                type_annotation,
            ));
        }

        None
    }

    /// `x =>`
    fn is_simple_arrow_start(&mut self) -> bool {
        self.is_identifier()
            && self.next_token_on_same_line_is(|p| p.is_token(SyntaxKind::EqualsGreaterThanToken))
    }

    /// `(params): T =>` or `<T>(params) =>`, checked by a speculative parse.
    fn is_parenthesized_arrow_start(&mut self) -> bool {
        if !matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            return false;
        }
        self.look_ahead(|p| {
            let diagnostics = p.diagnostics.len();
            p.parse_type_parameters();
            p.parse_parameters();
            if p.diagnostics.len() != diagnostics {
                return false;
            }
            p.parse_type_annotation();
            p.diagnostics.len() == diagnostics
                && p.is_token(SyntaxKind::EqualsGreaterThanToken)
                && !p.has_preceding_line_break()
        })
    }

    fn parse_arrow_rest(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        type_annotation: NodeIndex,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_assignment_expression()
        };
        self.arena.add_node(
            syntax_kind_ext::ARROW_FUNCTION,
            pos,
            self.last_token_end,
            NodeData::Function(FunctionData {
                modifiers,
                asterisk_token: false,
                name: NodeIndex::NONE,
                type_parameters,
                parameters,
                type_annotation,
                body,
            }),
        )
    }
}
