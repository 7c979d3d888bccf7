//! Parser state - class member parsing methods

use super::base::{NodeIndex, NodeList};
use super::flags::syntax_kind_ext;
use super::node::*;
use super::state::ParserState;
use hoist_scanner::SyntaxKind;

impl ParserState {
    /// Parse `{ members }` of a class declaration or class expression.
    pub(crate) fn parse_class_members(&mut self) -> NodeList {
        let mut members = Vec::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == start {
                self.parse_error_at_current_token("Declaration or statement expected.");
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        NodeList::from_vec(members)
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return NodeIndex::NONE;
        }
        let pos = self.token_pos();
        let mut modifiers = self.parse_decorators();
        while self.is_class_member_modifier() {
            modifiers.push(self.parse_token_node());
        }
        let modifiers = if modifiers.is_empty() {
            None
        } else {
            Some(NodeList::from_vec(modifiers))
        };

        if self.is_token(SyntaxKind::ConstructorKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::OpenParenToken)
            })
        {
            return self.parse_constructor(pos, modifiers);
        }

        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.next_token_on_same_line_is(ParserState::is_property_name_start)
        {
            return self.parse_accessor(pos, modifiers);
        }

        if self.is_index_signature() {
            self.parse_error_at_current_token("Index signatures are not supported.");
            self.skip_statement();
            return NodeIndex::NONE;
        }

        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        if !self.is_property_name_start() {
            self.parse_error_at_current_token("Property or signature expected.");
            return NodeIndex::NONE;
        }
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if asterisk_token
            || matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let type_annotation = self.parse_type_annotation();
            let body = self.parse_function_body_or_semicolon();
            return self.arena.add_node(
                syntax_kind_ext::METHOD_DECLARATION,
                pos,
                self.last_token_end,
                NodeData::MethodDecl(MethodDeclData {
                    modifiers,
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

        let exclamation_token = !question_token && self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.parse_semicolon();
        self.arena.add_node(
            syntax_kind_ext::PROPERTY_DECLARATION,
            pos,
            self.last_token_end,
            NodeData::PropertyDecl(PropertyDeclData {
                modifiers,
                name,
                question_token,
                exclamation_token,
                type_annotation,
                initializer,
            }),
        )
    }

    /// A modifier keyword is only a modifier when a member name follows it
    /// on the same line; `static: number` declares a property named `static`.
    fn is_class_member_modifier(&mut self) -> bool {
        if !matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::OverrideKeyword
        ) {
            return false;
        }
        self.next_token_on_same_line_is(|p| {
            p.is_property_name_start() || p.is_token(SyntaxKind::AsteriskToken)
        })
    }

    /// `[key: string]: T`
    pub(crate) fn is_index_signature(&mut self) -> bool {
        self.is_token(SyntaxKind::OpenBracketToken)
            && self.look_ahead(|p| {
                p.next_token();
                if !p.is_identifier() {
                    return false;
                }
                p.next_token();
                p.is_token(SyntaxKind::ColonToken)
            })
    }

    fn parse_constructor(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.parse_expected(SyntaxKind::ConstructorKeyword);
        let parameters = self.parse_parameters();
        let body = self.parse_function_body_or_semicolon();
        self.arena.add_node(
            syntax_kind_ext::CONSTRUCTOR,
            pos,
            self.last_token_end,
            NodeData::Constructor(ConstructorData {
                modifiers,
                parameters,
                body,
            }),
        )
    }

    fn parse_accessor(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        let kind = if self.is_token(SyntaxKind::GetKeyword) {
            syntax_kind_ext::GET_ACCESSOR
        } else {
            syntax_kind_ext::SET_ACCESSOR
        };
        self.next_token();
        let name = self.parse_property_name();
        let parameters = self.parse_parameters();
        let type_annotation = self.parse_type_annotation();
        let body = self.parse_function_body_or_semicolon();
        self.arena.add_node(
            kind,
            pos,
            self.last_token_end,
            NodeData::Accessor(AccessorData {
                modifiers,
                name,
                parameters,
                type_annotation,
                body,
            }),
        )
    }
}
