//! Parser state - type annotation parsing methods

use super::base::{NodeIndex, NodeList};
use super::flags::syntax_kind_ext;
use super::node::*;
use super::state::ParserState;
use hoist_scanner::SyntaxKind;

impl ParserState {
    /// `: Type`, or `NONE` when there is no annotation.
    pub(crate) fn parse_type_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        }
    }

    /// `<T extends U = V, ...>` if present.
    pub(crate) fn parse_type_parameters(&mut self) -> Option<NodeList> {
        if !self.is_token(SyntaxKind::LessThanToken) {
            return None;
        }
        Some(self.parse_delimited_list(
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
            |p| {
                let pos = p.token_pos();
                let name = p.parse_identifier();
                let constraint = if p.parse_optional(SyntaxKind::ExtendsKeyword) {
                    p.parse_type()
                } else {
                    NodeIndex::NONE
                };
                let default = if p.parse_optional(SyntaxKind::EqualsToken) {
                    p.parse_type()
                } else {
                    NodeIndex::NONE
                };
                p.arena.add_node(
                    syntax_kind_ext::TYPE_PARAMETER,
                    pos,
                    p.last_token_end,
                    NodeData::TypeParameter(TypeParameterData {
                        name,
                        constraint,
                        default,
                    }),
                )
            },
        ))
    }

    pub(crate) fn parse_type_arguments(&mut self) -> NodeList {
        self.parse_delimited_list(
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
            ParserState::parse_type,
        )
    }

    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = if self.is_start_of_function_type() {
            self.parse_function_type()
        } else {
            self.parse_union_or_intersection(SyntaxKind::BarToken)
        };
        self.exit_recursion();
        result
    }

    fn is_start_of_function_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::OpenParenToken => self.look_ahead(|p| {
                p.next_token();
                match p.token() {
                    SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken => true,
                    SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken => true,
                    _ if p.is_identifier() || p.is_token(SyntaxKind::ThisKeyword) => {
                        p.next_token();
                        matches!(
                            p.token(),
                            SyntaxKind::ColonToken
                                | SyntaxKind::CommaToken
                                | SyntaxKind::QuestionToken
                                | SyntaxKind::EqualsToken
                        ) || (p.is_token(SyntaxKind::CloseParenToken) && {
                            p.next_token();
                            p.is_token(SyntaxKind::EqualsGreaterThanToken)
                        })
                    }
                    _ => false,
                }
            }),
            _ => false,
        }
    }

    /// `(a: T) => R`, `<T>(a: T) => R` and `new (...) => R`.
    fn parse_function_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_optional(SyntaxKind::NewKeyword);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let type_annotation = self.parse_type();
        self.arena.add_node(
            syntax_kind_ext::FUNCTION_TYPE,
            pos,
            self.last_token_end,
            NodeData::FunctionType(FunctionTypeData {
                type_parameters,
                parameters,
                type_annotation,
            }),
        )
    }

    /// Unions bind looser than intersections.
    fn parse_union_or_intersection(&mut self, operator: SyntaxKind) -> NodeIndex {
        let pos = self.token_pos();
        let has_leading_operator = self.parse_optional(operator);
        let mut types = vec![self.parse_union_or_intersection_operand(operator)];
        while self.parse_optional(operator) {
            types.push(self.parse_union_or_intersection_operand(operator));
        }
        if types.len() == 1 && !has_leading_operator {
            return types[0];
        }
        let kind = if operator == SyntaxKind::BarToken {
            syntax_kind_ext::UNION_TYPE
        } else {
            syntax_kind_ext::INTERSECTION_TYPE
        };
        self.arena.add_node(
            kind,
            pos,
            self.last_token_end,
            NodeData::CompositeType(CompositeTypeData {
                types: NodeList::from_vec(types),
            }),
        )
    }

    fn parse_union_or_intersection_operand(&mut self, operator: SyntaxKind) -> NodeIndex {
        if operator == SyntaxKind::BarToken {
            self.parse_union_or_intersection(SyntaxKind::AmpersandToken)
        } else {
            self.parse_postfix_type()
        }
    }

    /// `T[]`, `T[][]`
    fn parse_postfix_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut type_node = self.parse_primary_type();
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token();
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                self.parse_error_at_current_token("Indexed access types are not supported.");
                self.parse_type();
            }
            self.parse_expected(SyntaxKind::CloseBracketToken);
            type_node = self.arena.add_node(
                syntax_kind_ext::ARRAY_TYPE,
                pos,
                self.last_token_end,
                NodeData::ArrayType(ArrayTypeData {
                    element_type: type_node,
                }),
            );
        }
        type_node
    }

    fn parse_primary_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
                if !self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(SyntaxKind::DotToken)
                }) =>
            {
                self.parse_token_node()
            }
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => {
                let literal = self.parse_literal_node();
                self.arena.add_node(
                    syntax_kind_ext::LITERAL_TYPE,
                    pos,
                    self.last_token_end,
                    NodeData::LiteralType(LiteralTypeData { literal }),
                )
            }
            SyntaxKind::OpenBraceToken => {
                let members = self.parse_type_members();
                self.arena.add_node(
                    syntax_kind_ext::TYPE_LITERAL,
                    pos,
                    self.last_token_end,
                    NodeData::TypeLiteral(TypeLiteralData { members }),
                )
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_node(
                    syntax_kind_ext::PARENTHESIZED_TYPE,
                    pos,
                    self.last_token_end,
                    NodeData::WrappedType(WrappedTypeData { type_node }),
                )
            }
            SyntaxKind::ReadonlyKeyword
                if self.next_token_on_same_line_is(|p| !p.is_token(SyntaxKind::DotToken)) =>
            {
                // `readonly T[]` carries no information the collector uses.
                self.next_token();
                self.parse_postfix_type()
            }
            SyntaxKind::OpenBracketToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::KeyOfKeyword
            | SyntaxKind::UniqueKeyword
            | SyntaxKind::InferKeyword => {
                self.parse_error_at_current_token("Type form not supported.");
                self.skip_type_tokens();
                NodeIndex::NONE
            }
            _ if self.is_identifier() || self.token().is_keyword() => self.parse_type_reference(),
            _ => {
                self.parse_error_at_current_token("Type expected.");
                NodeIndex::NONE
            }
        }
    }

    /// Skip a type this parser does not model: balanced brackets plus the
    /// tokens glued to them.
    fn skip_type_tokens(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::LessThanToken => depth += 1,
                SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::GreaterThanToken => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::BarToken
                | SyntaxKind::AmpersandToken
                    if depth == 0 =>
                {
                    return;
                }
                _ => {}
            }
            self.next_token();
        }
    }

    fn parse_type_reference(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut type_name = self.parse_identifier_name();
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_name();
            type_name = self.arena.add_node(
                syntax_kind_ext::QUALIFIED_NAME,
                pos,
                self.last_token_end,
                NodeData::QualifiedName(QualifiedNameData {
                    left: type_name,
                    right,
                }),
            );
        }
        let type_arguments =
            if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
                Some(self.parse_type_arguments())
            } else {
                None
            };
        self.arena.add_node(
            syntax_kind_ext::TYPE_REFERENCE,
            pos,
            self.last_token_end,
            NodeData::TypeRef(TypeRefData {
                type_name,
                type_arguments,
            }),
        )
    }

    /// `{ a: T; b?(x: U): V }` members of interfaces and type literals.
    pub(crate) fn parse_type_members(&mut self) -> NodeList {
        let mut members = Vec::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let member = self.parse_type_member();
            if member.is_some() {
                members.push(member);
            }
            if !self.parse_optional(SyntaxKind::SemicolonToken) {
                self.parse_optional(SyntaxKind::CommaToken);
            }
            if self.token_pos() == start {
                self.parse_error_at_current_token("Property or signature expected.");
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        NodeList::from_vec(members)
    }

    fn parse_type_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::NewKeyword
        ) && !self.look_ahead(|p| {
            p.next_token();
            p.is_token(SyntaxKind::QuestionToken) || p.is_token(SyntaxKind::ColonToken)
        }) || self.is_index_signature()
        {
            self.parse_error_at_current_token("Call and index signatures are not supported.");
            self.skip_statement();
            return NodeIndex::NONE;
        }

        let mut modifiers = Vec::new();
        if self.is_token(SyntaxKind::ReadonlyKeyword)
            && self.next_token_on_same_line_is(ParserState::is_property_name_start)
        {
            modifiers.push(self.parse_token_node());
        }
        let modifiers = if modifiers.is_empty() {
            None
        } else {
            Some(NodeList::from_vec(modifiers))
        };

        if !self.is_property_name_start() {
            return NodeIndex::NONE;
        }
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let type_annotation = self.parse_type_annotation();
            return self.arena.add_node(
                syntax_kind_ext::METHOD_SIGNATURE,
                pos,
                self.last_token_end,
                NodeData::Signature(SignatureData {
                    modifiers,
                    name,
                    question_token,
                    type_parameters,
                    parameters: Some(parameters),
                    type_annotation,
                }),
            );
        }
        let type_annotation = self.parse_type_annotation();
        self.arena.add_node(
            syntax_kind_ext::PROPERTY_SIGNATURE,
            pos,
            self.last_token_end,
            NodeData::Signature(SignatureData {
                modifiers,
                name,
                question_token,
                type_parameters: None,
                parameters: None,
                type_annotation,
            }),
        )
    }
}
