use super::Printer;
use hoist_parser::parser::node::Node;

impl<'a> Printer<'a> {
    // =========================================================================
    // Imports
    // =========================================================================

    pub(super) fn emit_import_declaration(&mut self, node: &Node) {
        let Some(import) = self.arena.get_import_decl(node) else {
            return;
        };
        self.emit_modifiers(import.modifiers.as_ref(), false);
        self.write("import ");
        if import.import_clause.is_some() {
            self.emit(import.import_clause);
            self.write(" from ");
        }
        self.emit(import.module_specifier);
        self.write(";");
    }

    pub(super) fn emit_import_clause(&mut self, node: &Node) {
        let Some(clause) = self.arena.get_import_clause(node) else {
            return;
        };
        if clause.is_type_only {
            self.write("type ");
        }
        self.emit(clause.name);
        if clause.name.is_some() && clause.named_bindings.is_some() {
            self.write(", ");
        }
        self.emit(clause.named_bindings);
    }

    pub(super) fn emit_namespace_import(&mut self, node: &Node) {
        let Some(namespace) = self.arena.get_namespace_import(node) else {
            return;
        };
        self.write("* as ");
        self.emit(namespace.name);
    }

    /// `{ a, b as c }` for both named imports and named exports.
    pub(super) fn emit_named_bindings(&mut self, node: &Node) {
        let Some(named) = self.arena.get_named_imports(node) else {
            return;
        };
        if named.elements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        self.emit_comma_list(&named.elements.nodes);
        self.write(" }");
    }

    pub(super) fn emit_specifier(&mut self, node: &Node) {
        let Some(specifier) = self.arena.get_specifier(node) else {
            return;
        };
        if specifier.is_type_only {
            self.write("type ");
        }
        if specifier.property_name.is_some() {
            self.emit(specifier.property_name);
            self.write(" as ");
        }
        self.emit(specifier.name);
    }

    // =========================================================================
    // Exports
    // =========================================================================

    pub(super) fn emit_export_declaration(&mut self, node: &Node) {
        let Some(export) = self.arena.get_export_decl(node) else {
            return;
        };
        self.emit_modifiers(export.modifiers.as_ref(), false);
        self.write("export ");
        if export.is_type_only {
            self.write("type ");
        }
        if export.export_clause.is_some() {
            self.emit(export.export_clause);
        } else {
            self.write("*");
        }
        if export.module_specifier.is_some() {
            self.write(" from ");
            self.emit(export.module_specifier);
        }
        self.write(";");
    }

    pub(super) fn emit_export_assignment(&mut self, node: &Node) {
        let Some(assignment) = self.arena.get_export_assignment(node) else {
            return;
        };
        self.emit_modifiers(assignment.modifiers.as_ref(), false);
        self.write(if assignment.is_export_equals {
            "export = "
        } else {
            "export default "
        });
        self.emit(assignment.expression);
        self.write(";");
    }
}
