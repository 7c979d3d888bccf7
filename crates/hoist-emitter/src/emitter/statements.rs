use super::Printer;
use hoist_parser::parser::node::Node;
use hoist_parser::parser::syntax_kind_ext;

impl<'a> Printer<'a> {
    // =========================================================================
    // Statements
    // =========================================================================

    pub(super) fn emit_block(&mut self, node: &Node) {
        let Some(block) = self.arena.get_block(node) else {
            return;
        };
        if block.statements.is_empty() {
            self.write("{ }");
            return;
        }
        self.write("{");
        self.write_line();
        self.emit_indented_lines(&block.statements.nodes);
        self.write("}");
    }

    pub(super) fn emit_expression_statement(&mut self, node: &Node) {
        let Some(stmt) = self.arena.get_expression_statement(node) else {
            return;
        };
        self.emit(stmt.expression);
        self.write(";");
    }

    pub(super) fn emit_if_statement(&mut self, node: &Node) {
        let Some(if_stmt) = self.arena.get_if_statement(node) else {
            return;
        };
        self.write("if (");
        self.emit(if_stmt.expression);
        self.write(") ");
        self.emit(if_stmt.then_statement);
        if if_stmt.else_statement.is_some() {
            if self.arena.is_kind(if_stmt.then_statement, syntax_kind_ext::BLOCK) {
                self.write(" ");
            } else {
                self.write_line();
            }
            self.write("else ");
            self.emit(if_stmt.else_statement);
        }
    }

    /// `return` and `throw`.
    pub(super) fn emit_return_like(&mut self, node: &Node, keyword: &str) {
        let Some(stmt) = self.arena.get_return_statement(node) else {
            return;
        };
        self.write(keyword);
        if stmt.expression.is_some() {
            self.write_space();
            self.emit(stmt.expression);
        }
        self.write(";");
    }
}
