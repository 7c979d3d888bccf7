use super::Printer;
use hoist_parser::parser::{NodeIndex, NodeList, syntax_kind_ext};

impl<'a> Printer<'a> {
    // =========================================================================
    // Output Helpers (delegate to SourceWriter)
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(super) fn write_space(&mut self) {
        self.writer.write_space();
    }

    /// Write a newline unless the writer is already at the start of a line.
    pub(super) fn write_line(&mut self) {
        if !self.writer.is_at_line_start() {
            self.writer.write_line();
        }
    }

    pub(super) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(super) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    // =========================================================================
    // List Helpers
    // =========================================================================

    /// Emit nodes separated by `separator`.
    pub(super) fn emit_separated(&mut self, nodes: &[NodeIndex], separator: &str) {
        for (i, &node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            self.emit(node);
        }
    }

    pub(super) fn emit_comma_list(&mut self, nodes: &[NodeIndex]) {
        self.emit_separated(nodes, ", ");
    }

    /// `<A, B>` when the list is present.
    pub(super) fn emit_type_list(&mut self, nodes: Option<&NodeList>) {
        if let Some(nodes) = nodes {
            self.write("<");
            self.emit_comma_list(&nodes.nodes);
            self.write(">");
        }
    }

    /// Emit `nodes` one per line inside the current braces.
    pub(super) fn emit_indented_lines(&mut self, nodes: &[NodeIndex]) {
        self.increase_indent();
        for &node in nodes {
            self.emit(node);
            self.write_line();
        }
        self.decrease_indent();
    }

    /// `: T` when a type annotation is present.
    pub(super) fn emit_type_annotation(&mut self, type_node: NodeIndex) {
        if type_node.is_some() {
            self.write(": ");
            self.emit(type_node);
        }
    }

    /// ` = expr` when an initializer is present.
    pub(super) fn emit_initializer(&mut self, initializer: NodeIndex) {
        if initializer.is_some() {
            self.write(" = ");
            self.emit(initializer);
        }
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    /// Emit decorators and modifier keywords in source order.
    ///
    /// With `decorators_on_own_line`, each decorator is followed by a newline
    /// (classes); otherwise decorators are written inline (members, parameters).
    pub(super) fn emit_modifiers(&mut self, modifiers: Option<&NodeList>, decorators_on_own_line: bool) {
        let Some(modifiers) = modifiers else {
            return;
        };
        for &modifier in &modifiers.nodes {
            self.emit(modifier);
            if decorators_on_own_line && self.arena.is_kind(modifier, syntax_kind_ext::DECORATOR) {
                self.write_line();
            } else {
                self.write_space();
            }
        }
    }
}
