use super::Printer;
use hoist_parser::parser::node::Node;
use hoist_parser::parser::{NodeIndex, NodeList, syntax_kind_ext};

impl<'a> Printer<'a> {
    // =========================================================================
    // Functions
    // =========================================================================

    /// Function declarations and function expressions.
    pub(super) fn emit_function(&mut self, node: &Node) {
        let Some(func) = self.arena.get_function(node) else {
            return;
        };
        self.emit_modifiers(func.modifiers.as_ref(), false);
        self.write("function");
        if func.asterisk_token {
            self.write("*");
        }
        if func.name.is_some() {
            self.write_space();
            self.emit(func.name);
        }
        self.emit_signature_tail(func.type_parameters.as_ref(), &func.parameters, func.type_annotation);
        self.emit_function_body(func.body);
    }

    pub(super) fn emit_arrow_function(&mut self, node: &Node) {
        let Some(func) = self.arena.get_function(node) else {
            return;
        };
        self.emit_modifiers(func.modifiers.as_ref(), false);
        self.emit_signature_tail(func.type_parameters.as_ref(), &func.parameters, func.type_annotation);
        self.write(" => ");
        self.emit(func.body);
    }

    /// `<T>(params): R` shared by every function-like node.
    pub(super) fn emit_signature_tail(
        &mut self,
        type_parameters: Option<&NodeList>,
        parameters: &NodeList,
        type_annotation: NodeIndex,
    ) {
        self.emit_type_list(type_parameters);
        self.write("(");
        self.emit_comma_list(&parameters.nodes);
        self.write(")");
        self.emit_type_annotation(type_annotation);
    }

    /// A block body, or `;` for overloads and ambient declarations.
    fn emit_function_body(&mut self, body: NodeIndex) {
        if body.is_some() {
            self.write_space();
            self.emit(body);
        } else {
            self.write(";");
        }
    }

    pub(super) fn emit_parameter(&mut self, node: &Node) {
        let Some(param) = self.arena.get_parameter(node) else {
            return;
        };
        self.emit_modifiers(param.modifiers.as_ref(), false);
        if param.dot_dot_dot_token {
            self.write("...");
        }
        self.emit(param.name);
        if param.question_token {
            self.write("?");
        }
        self.emit_type_annotation(param.type_annotation);
        self.emit_initializer(param.initializer);
    }

    pub(super) fn emit_type_parameter(&mut self, node: &Node) {
        let Some(param) = self.arena.get_type_parameter(node) else {
            return;
        };
        self.emit(param.name);
        if param.constraint.is_some() {
            self.write(" extends ");
            self.emit(param.constraint);
        }
        self.emit_initializer(param.default);
    }

    // =========================================================================
    // Class members
    // =========================================================================

    pub(super) fn emit_property_declaration(&mut self, node: &Node) {
        let Some(prop) = self.arena.get_property_decl(node) else {
            return;
        };
        self.emit_modifiers(prop.modifiers.as_ref(), false);
        self.emit(prop.name);
        if prop.question_token {
            self.write("?");
        }
        if prop.exclamation_token {
            self.write("!");
        }
        self.emit_type_annotation(prop.type_annotation);
        self.emit_initializer(prop.initializer);
        self.write(";");
    }

    pub(super) fn emit_method_declaration(&mut self, node: &Node) {
        let Some(method) = self.arena.get_method_decl(node) else {
            return;
        };
        self.emit_modifiers(method.modifiers.as_ref(), false);
        if method.asterisk_token {
            self.write("*");
        }
        self.emit(method.name);
        if method.question_token {
            self.write("?");
        }
        self.emit_signature_tail(
            method.type_parameters.as_ref(),
            &method.parameters,
            method.type_annotation,
        );
        self.emit_function_body(method.body);
    }

    pub(super) fn emit_constructor(&mut self, node: &Node) {
        let Some(ctor) = self.arena.get_constructor(node) else {
            return;
        };
        self.emit_modifiers(ctor.modifiers.as_ref(), false);
        self.write("constructor(");
        self.emit_comma_list(&ctor.parameters.nodes);
        self.write(")");
        self.emit_function_body(ctor.body);
    }

    pub(super) fn emit_accessor(&mut self, node: &Node) {
        let Some(accessor) = self.arena.get_accessor(node) else {
            return;
        };
        self.emit_modifiers(accessor.modifiers.as_ref(), false);
        self.write(if node.kind == syntax_kind_ext::GET_ACCESSOR { "get " } else { "set " });
        self.emit(accessor.name);
        self.emit_signature_tail(None, &accessor.parameters, accessor.type_annotation);
        self.emit_function_body(accessor.body);
    }
}
