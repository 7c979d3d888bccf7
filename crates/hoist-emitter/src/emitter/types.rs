use super::Printer;
use hoist_parser::parser::node::Node;
use hoist_parser::parser::syntax_kind_ext;

impl<'a> Printer<'a> {
    // =========================================================================
    // Type nodes
    // =========================================================================

    pub(super) fn emit_type_reference(&mut self, node: &Node) {
        let Some(type_ref) = self.arena.get_type_ref(node) else {
            return;
        };
        self.emit(type_ref.type_name);
        self.emit_type_list(type_ref.type_arguments.as_ref());
    }

    pub(super) fn emit_function_type(&mut self, node: &Node) {
        let Some(func) = self.arena.get_function_type(node) else {
            return;
        };
        self.emit_type_list(func.type_parameters.as_ref());
        self.write("(");
        self.emit_comma_list(&func.parameters.nodes);
        self.write(") => ");
        self.emit(func.type_annotation);
    }

    pub(super) fn emit_type_literal(&mut self, node: &Node) {
        let Some(literal) = self.arena.get_type_literal(node) else {
            return;
        };
        if literal.members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        self.emit_separated(&literal.members.nodes, "; ");
        self.write(" }");
    }

    pub(super) fn emit_array_type(&mut self, node: &Node) {
        let Some(array) = self.arena.get_array_type(node) else {
            return;
        };
        let needs_parens = self.arena.kind_of(array.element_type).is_some_and(|kind| {
            matches!(
                kind,
                syntax_kind_ext::UNION_TYPE
                    | syntax_kind_ext::INTERSECTION_TYPE
                    | syntax_kind_ext::FUNCTION_TYPE
            )
        });
        if needs_parens {
            self.write("(");
        }
        self.emit(array.element_type);
        if needs_parens {
            self.write(")");
        }
        self.write("[]");
    }

    /// Union and intersection types.
    pub(super) fn emit_composite_type(&mut self, node: &Node, separator: &str) {
        if let Some(composite) = self.arena.get_composite_type(node) {
            self.emit_separated(&composite.types.nodes, separator);
        }
    }

    pub(super) fn emit_parenthesized_type(&mut self, node: &Node) {
        let Some(wrapped) = self.arena.get_wrapped_type(node) else {
            return;
        };
        self.write("(");
        self.emit(wrapped.type_node);
        self.write(")");
    }

    pub(super) fn emit_literal_type(&mut self, node: &Node) {
        if let Some(literal) = self.arena.get_literal_type(node) {
            self.emit(literal.literal);
        }
    }

    /// Property and method signatures, without the trailing separator.
    pub(super) fn emit_signature(&mut self, node: &Node) {
        let Some(signature) = self.arena.get_signature(node) else {
            return;
        };
        self.emit_modifiers(signature.modifiers.as_ref(), false);
        self.emit(signature.name);
        if signature.question_token {
            self.write("?");
        }
        match &signature.parameters {
            Some(parameters) => self.emit_signature_tail(
                signature.type_parameters.as_ref(),
                parameters,
                signature.type_annotation,
            ),
            None => self.emit_type_annotation(signature.type_annotation),
        }
    }
}
