use super::{Printer, get_operator_text};
use hoist_parser::parser::node::Node;
use hoist_parser::parser::{node_flags, syntax_kind_ext};
use hoist_scanner::SyntaxKind;

impl<'a> Printer<'a> {
    // =========================================================================
    // Names
    // =========================================================================

    pub(super) fn emit_qualified_name(&mut self, node: &Node) {
        let Some(name) = self.arena.get_qualified_name(node) else {
            return;
        };
        self.emit(name.left);
        self.write(".");
        self.emit(name.right);
    }

    pub(super) fn emit_computed_property_name(&mut self, node: &Node) {
        let Some(computed) = self.arena.get_computed_property(node) else {
            return;
        };
        self.write("[");
        self.emit(computed.expression);
        self.write("]");
    }

    pub(super) fn emit_decorator(&mut self, node: &Node) {
        let Some(decorator) = self.arena.get_decorator(node) else {
            return;
        };
        self.write("@");
        self.emit(decorator.expression);
    }

    // =========================================================================
    // Operators
    // =========================================================================

    pub(super) fn emit_binary_expression(&mut self, node: &Node) {
        let Some(binary) = self.arena.get_binary_expr(node) else {
            return;
        };
        self.emit(binary.left);
        if binary.operator_token == SyntaxKind::CommaToken as u16 {
            self.write(", ");
        } else {
            self.write_space();
            self.write(get_operator_text(binary.operator_token));
            self.write_space();
        }
        self.emit(binary.right);
    }

    pub(super) fn emit_prefix_unary(&mut self, node: &Node) {
        let Some(unary) = self.arena.get_unary_expr(node) else {
            return;
        };
        let operator = get_operator_text(unary.operator);
        self.write(operator);
        if SyntaxKind::from_u16(unary.operator).is_some_and(SyntaxKind::is_keyword)
            || self.prefix_operand_needs_space(operator, unary.operand)
        {
            self.write_space();
        }
        self.emit(unary.operand);
    }

    /// `- -x` and `+ +x` must not collapse into `--x` / `++x`.
    fn prefix_operand_needs_space(&self, operator: &str, operand: hoist_parser::NodeIndex) -> bool {
        let Some(operand_node) = self.arena.get(operand) else {
            return false;
        };
        if operand_node.kind != syntax_kind_ext::PREFIX_UNARY_EXPRESSION {
            return false;
        }
        self.arena
            .get_unary_expr(operand_node)
            .is_some_and(|inner| {
                let inner_text = get_operator_text(inner.operator);
                matches!(
                    (operator, inner_text),
                    ("+", "+" | "++") | ("-", "-" | "--")
                )
            })
    }

    pub(super) fn emit_postfix_unary(&mut self, node: &Node) {
        let Some(unary) = self.arena.get_unary_expr(node) else {
            return;
        };
        self.emit(unary.operand);
        self.write(get_operator_text(unary.operator));
    }

    pub(super) fn emit_non_null_expression(&mut self, node: &Node) {
        let Some(unary) = self.arena.get_unary_expr(node) else {
            return;
        };
        self.emit(unary.operand);
        self.write("!");
    }

    pub(super) fn emit_conditional_expression(&mut self, node: &Node) {
        let Some(conditional) = self.arena.get_conditional_expr(node) else {
            return;
        };
        self.emit(conditional.condition);
        self.write(" ? ");
        self.emit(conditional.when_true);
        self.write(" : ");
        self.emit(conditional.when_false);
    }

    pub(super) fn emit_parenthesized_expression(&mut self, node: &Node) {
        let Some(paren) = self.arena.get_parenthesized(node) else {
            return;
        };
        self.write("(");
        self.emit(paren.expression);
        self.write(")");
    }

    pub(super) fn emit_as_expression(&mut self, node: &Node) {
        let Some(as_expr) = self.arena.get_as_expression(node) else {
            return;
        };
        self.emit(as_expr.expression);
        self.write(" as ");
        self.emit(as_expr.type_node);
    }

    pub(super) fn emit_spread(&mut self, node: &Node) {
        let Some(spread) = self.arena.get_spread(node) else {
            return;
        };
        self.write("...");
        self.emit(spread.expression);
    }

    // =========================================================================
    // Calls and member access
    // =========================================================================

    pub(super) fn emit_call_expression(&mut self, node: &Node) {
        let Some(call) = self.arena.get_call_expr(node) else {
            return;
        };
        self.emit(call.expression);
        if node.flags & node_flags::OPTIONAL_CHAIN != 0 {
            self.write("?.");
        }
        self.emit_type_list(call.type_arguments.as_ref());
        self.write("(");
        if let Some(arguments) = &call.arguments {
            self.emit_comma_list(&arguments.nodes);
        }
        self.write(")");
    }

    pub(super) fn emit_new_expression(&mut self, node: &Node) {
        let Some(call) = self.arena.get_call_expr(node) else {
            return;
        };
        self.write("new ");
        self.emit(call.expression);
        self.emit_type_list(call.type_arguments.as_ref());
        if let Some(arguments) = &call.arguments {
            self.write("(");
            self.emit_comma_list(&arguments.nodes);
            self.write(")");
        }
    }

    pub(super) fn emit_property_access(&mut self, node: &Node) {
        let Some(access) = self.arena.get_access_expr(node) else {
            return;
        };
        self.emit(access.expression);
        self.write(if access.question_dot_token { "?." } else { "." });
        self.emit(access.name_or_argument);
    }

    pub(super) fn emit_element_access(&mut self, node: &Node) {
        let Some(access) = self.arena.get_access_expr(node) else {
            return;
        };
        self.emit(access.expression);
        if access.question_dot_token {
            self.write("?.");
        }
        self.write("[");
        self.emit(access.name_or_argument);
        self.write("]");
    }

    pub(super) fn emit_expression_with_type_arguments(&mut self, node: &Node) {
        let Some(expr) = self.arena.get_expr_with_type_args(node) else {
            return;
        };
        self.emit(expr.expression);
        self.emit_type_list(expr.type_arguments.as_ref());
    }

    // =========================================================================
    // Object and array literals
    // =========================================================================

    pub(super) fn emit_array_literal(&mut self, node: &Node) {
        let Some(literal) = self.arena.get_literal_expr(node) else {
            return;
        };
        self.write("[");
        self.emit_comma_list(&literal.elements.nodes);
        self.write("]");
    }

    pub(super) fn emit_object_literal(&mut self, node: &Node) {
        let Some(literal) = self.arena.get_literal_expr(node) else {
            return;
        };
        if literal.elements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        self.emit_comma_list(&literal.elements.nodes);
        self.write(" }");
    }

    pub(super) fn emit_property_assignment(&mut self, node: &Node) {
        let Some(assignment) = self.arena.get_property_assignment(node) else {
            return;
        };
        self.emit(assignment.name);
        self.write(": ");
        self.emit(assignment.initializer);
    }

    pub(super) fn emit_shorthand_property(&mut self, node: &Node) {
        if let Some(shorthand) = self.arena.get_shorthand_property(node) {
            self.emit(shorthand.name);
        }
    }
}
