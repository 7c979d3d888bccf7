use super::{Printer, get_operator_text};
use hoist_parser::parser::node::Node;
use hoist_parser::parser::{NodeList, node_flags, syntax_kind_ext};

impl<'a> Printer<'a> {
    // =========================================================================
    // Classes
    // =========================================================================

    /// Class declarations and class expressions.
    pub(super) fn emit_class(&mut self, node: &Node) {
        let Some(class) = self.arena.get_class(node) else {
            return;
        };
        let is_declaration = node.kind == syntax_kind_ext::CLASS_DECLARATION;
        self.emit_modifiers(class.modifiers.as_ref(), is_declaration);
        self.write("class");
        if class.name.is_some() {
            self.write_space();
            self.emit(class.name);
        }
        self.emit_type_list(class.type_parameters.as_ref());
        self.emit_heritage_clauses(class.heritage_clauses.as_ref());
        self.write(" {");
        self.write_line();
        self.emit_indented_lines(&class.members.nodes);
        self.write("}");
    }

    fn emit_heritage_clauses(&mut self, clauses: Option<&NodeList>) {
        let Some(clauses) = clauses else {
            return;
        };
        for &clause in &clauses.nodes {
            self.write_space();
            self.emit(clause);
        }
    }

    pub(super) fn emit_heritage_clause(&mut self, node: &Node) {
        let Some(heritage) = self.arena.get_heritage_clause(node) else {
            return;
        };
        self.write(get_operator_text(heritage.token));
        self.write_space();
        self.emit_comma_list(&heritage.types.nodes);
    }

    // =========================================================================
    // Interfaces, type aliases and enums
    // =========================================================================

    pub(super) fn emit_interface_declaration(&mut self, node: &Node) {
        let Some(interface) = self.arena.get_interface(node) else {
            return;
        };
        self.emit_modifiers(interface.modifiers.as_ref(), false);
        self.write("interface ");
        self.emit(interface.name);
        self.emit_type_list(interface.type_parameters.as_ref());
        self.emit_heritage_clauses(interface.heritage_clauses.as_ref());
        self.write(" {");
        self.write_line();
        self.increase_indent();
        for &member in &interface.members.nodes {
            self.emit(member);
            self.write(";");
            self.write_line();
        }
        self.decrease_indent();
        self.write("}");
    }

    pub(super) fn emit_type_alias_declaration(&mut self, node: &Node) {
        let Some(alias) = self.arena.get_type_alias(node) else {
            return;
        };
        self.emit_modifiers(alias.modifiers.as_ref(), false);
        self.write("type ");
        self.emit(alias.name);
        self.emit_type_list(alias.type_parameters.as_ref());
        self.write(" = ");
        self.emit(alias.type_node);
        self.write(";");
    }

    pub(super) fn emit_enum_declaration(&mut self, node: &Node) {
        let Some(enum_decl) = self.arena.get_enum(node) else {
            return;
        };
        self.emit_modifiers(enum_decl.modifiers.as_ref(), false);
        self.write("enum ");
        self.emit(enum_decl.name);
        self.write(" {");
        self.write_line();
        self.increase_indent();
        let count = enum_decl.members.len();
        for (i, &member) in enum_decl.members.nodes.iter().enumerate() {
            self.emit(member);
            if i + 1 < count {
                self.write(",");
            }
            self.write_line();
        }
        self.decrease_indent();
        self.write("}");
    }

    pub(super) fn emit_enum_member(&mut self, node: &Node) {
        let Some(member) = self.arena.get_enum_member(node) else {
            return;
        };
        self.emit(member.name);
        self.emit_initializer(member.initializer);
    }

    // =========================================================================
    // Variables
    // =========================================================================

    pub(super) fn emit_variable_statement(&mut self, node: &Node) {
        let Some(var_stmt) = self.arena.get_variable(node) else {
            return;
        };
        self.emit_modifiers(var_stmt.modifiers.as_ref(), false);
        self.emit(var_stmt.declaration_list);
        self.write(";");
    }

    pub(super) fn emit_variable_declaration_list(&mut self, node: &Node) {
        let Some(list) = self.arena.get_variable_declaration_list(node) else {
            return;
        };
        let keyword = if node.flags & node_flags::CONST != 0 {
            "const "
        } else if node.flags & node_flags::LET != 0 {
            "let "
        } else {
            "var "
        };
        self.write(keyword);
        self.emit_comma_list(&list.declarations.nodes);
    }

    pub(super) fn emit_variable_declaration(&mut self, node: &Node) {
        let Some(decl) = self.arena.get_variable_declaration(node) else {
            return;
        };
        self.emit(decl.name);
        if decl.exclamation_token {
            self.write("!");
        }
        self.emit_type_annotation(decl.type_annotation);
        self.emit_initializer(decl.initializer);
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    pub(super) fn emit_binding_pattern(&mut self, node: &Node, open: &str, close: &str) {
        let Some(pattern) = self.arena.get_binding_pattern(node) else {
            return;
        };
        if pattern.elements.is_empty() {
            self.write(open.trim_end());
            self.write(close.trim_start());
            return;
        }
        self.write(open);
        self.emit_comma_list(&pattern.elements.nodes);
        self.write(close);
    }

    pub(super) fn emit_binding_element(&mut self, node: &Node) {
        let Some(element) = self.arena.get_binding_element(node) else {
            return;
        };
        if element.dot_dot_dot_token {
            self.write("...");
        }
        if element.property_name.is_some() {
            self.emit(element.property_name);
            self.write(": ");
        }
        self.emit(element.name);
        self.emit_initializer(element.initializer);
    }
}
