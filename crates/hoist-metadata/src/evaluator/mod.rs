//! Expression evaluation.
//!
//! `Evaluator` folds an expression (or type) node into a [`MetadataValue`].
//! Constant expressions fold to primitives; everything else becomes a
//! symbolic record, or an error record when the form cannot be represented.
//!
//! Every value produced for a node is passed through the module's
//! substitution before it is returned. When the substitution replaces a value
//! with a global reference, the original value is remembered as an export
//! under the new name so the collector can add it to the module metadata.

mod folding;

use crate::cache::MetadataSubstitution;
use crate::collector::CollectorOptions;
use crate::schema::{
    BinaryExpression, CallExpression, ClassMetadata, ErrorValue, IfExpression, IndexExpression,
    MetadataMap, MetadataSymbolic, MetadataValue, PrefixExpression, ReferenceExpression,
    SelectExpression, SpreadExpression,
};
use crate::symbols::Symbols;
use hoist_common::limits::MAX_EVALUATION_DEPTH;
use hoist_parser::parser::NodeData;
use hoist_parser::{NodeArena, NodeIndex, SourceFile, syntax_kind_ext};
use hoist_scanner::SyntaxKind;
use indexmap::IndexMap;
use tracing::warn;

use folding::to_js_string;

pub struct Evaluator<'a, 's> {
    source_file: &'a SourceFile,
    arena: &'a NodeArena,
    options: &'a CollectorOptions,
    pub(crate) symbols: Symbols<'a>,
    substitution: Option<&'s mut dyn MetadataSubstitution>,
    recorded_exports: Vec<(String, MetadataValue)>,
    depth: u32,
}

impl<'a, 's> Evaluator<'a, 's> {
    pub fn new(
        source_file: &'a SourceFile,
        options: &'a CollectorOptions,
        substitution: Option<&'s mut dyn MetadataSubstitution>,
    ) -> Evaluator<'a, 's> {
        Evaluator {
            source_file,
            arena: &source_file.arena,
            options,
            symbols: Symbols::new(source_file),
            substitution,
            recorded_exports: Vec::new(),
            depth: 0,
        }
    }

    /// Values replaced by the substitution since the last call, keyed by the
    /// name of the reference that replaced them, in recording order.
    pub fn take_recorded_exports(&mut self) -> Vec<(String, MetadataValue)> {
        std::mem::take(&mut self.recorded_exports)
    }

    /// An error record positioned at `node`.
    pub fn error_value(
        &self,
        message: &str,
        node: NodeIndex,
        context: &[(&str, &str)],
    ) -> MetadataValue {
        let mut error = ErrorValue {
            message: message.to_string(),
            ..ErrorValue::default()
        };
        if let Some(start) = self.node_start(node) {
            let position = self.source_file.line_and_character_of(start);
            error.line = Some(position.line);
            error.character = Some(position.character);
        }
        if !context.is_empty() {
            error.context = Some(
                context
                    .iter()
                    .map(|&(key, value)| (key.to_string(), value.to_string()))
                    .collect::<IndexMap<_, _>>(),
            );
        }
        MetadataValue::error(error)
    }

    fn node_start(&self, node: NodeIndex) -> Option<u32> {
        if self.arena.has_unset_pos(node) {
            return None;
        }
        self.arena.get(node).map(|header| header.pos)
    }

    /// Run `value` through the substitution and record an export when it was
    /// replaced by a global reference.
    pub(crate) fn record_entry(&mut self, value: MetadataValue, node: NodeIndex) -> MetadataValue {
        let value = match self.substitution.as_deref_mut() {
            Some(substitution) => {
                let substituted = substitution.substitute(value.clone(), node);
                if substituted != value {
                    if let Some(name) = substituted
                        .as_reference()
                        .filter(|reference| reference.is_global())
                        .and_then(|reference| reference.name.clone())
                    {
                        self.recorded_exports.push((name, value));
                    }
                }
                substituted
            }
            None => value,
        };
        self.with_source_position(value, node)
    }

    /// Like [`Evaluator::record_entry`] for values produced by the collector
    /// itself; replaced values are not recorded as exports.
    pub(crate) fn record_collected(&mut self, value: MetadataValue, node: NodeIndex) -> MetadataValue {
        let value = match self.substitution.as_deref_mut() {
            Some(substitution) => substitution.substitute(value, node),
            None => value,
        };
        self.with_source_position(value, node)
    }

    /// Imported symbol references carry the position they were referenced at.
    fn with_source_position(&self, mut value: MetadataValue, node: NodeIndex) -> MetadataValue {
        let Some(MetadataSymbolic::Reference(reference)) = value.as_symbolic_mut() else {
            return value;
        };
        if reference.line.is_some()
            || !(reference.is_imported_symbol() || reference.is_import_default())
        {
            return value;
        }
        if let Some(start) = self.node_start(node) {
            let position = self.source_file.line_and_character_of(start);
            reference.line = Some(position.line);
            reference.character = Some(position.character);
        }
        value
    }

    fn resolve_name(&mut self, name: &str, prefer_reference: bool, node: NodeIndex) -> MetadataValue {
        match self.symbols.resolve(name, prefer_reference) {
            // Unknown names are global references; consumers check them.
            None => self.record_entry(MetadataValue::global_reference(name), node),
            Some(value) if !value.is_primitive() => self.record_entry(value, node),
            Some(value) => value,
        }
    }

    /// Text of a property or member name, or an error record.
    pub fn name_of(&mut self, node: NodeIndex) -> Result<String, MetadataValue> {
        if let Some(text) = self.arena.get_identifier_text(node) {
            return Ok(text.to_string());
        }
        if node.is_none() {
            return Err(self.error_value("Name expected", node, &[("received", "<missing>")]));
        }
        match self.evaluate_node(node) {
            MetadataValue::String(text) => Ok(text),
            error if error.is_error() => Err(error),
            _ => {
                let received = self.source_file.node_text(node);
                let received = if received.is_empty() { "<missing>" } else { received };
                Err(self.error_value("Name expected", node, &[("received", received)]))
            }
        }
    }

    pub fn evaluate_node(&mut self, node: NodeIndex) -> MetadataValue {
        self.evaluate_node_with(node, false)
    }

    /// Evaluate `node`. With `prefer_reference`, names of exported locals
    /// resolve to references instead of their folded values.
    pub fn evaluate_node_with(&mut self, node: NodeIndex, prefer_reference: bool) -> MetadataValue {
        if self.depth >= MAX_EVALUATION_DEPTH {
            warn!(file = %self.source_file.file_name, "metadata evaluation depth limit reached");
            return self.error_value("Expression is too deeply nested", node, &[]);
        }
        self.depth += 1;
        let value = self.evaluate_inner(node, prefer_reference);
        self.depth -= 1;
        value
    }

    fn evaluate_inner(&mut self, node: NodeIndex, prefer_reference: bool) -> MetadataValue {
        let Some(kind) = self.arena.kind_of(node) else {
            return self.unsupported(node);
        };
        if kind < SyntaxKind::FIRST_NODE {
            return self.evaluate_token(node, kind, prefer_reference);
        }
        let arena = self.arena;
        let Some(data) = arena.node_data(node) else {
            return self.unsupported(node);
        };

        match (kind, data) {
            (syntax_kind_ext::OBJECT_LITERAL_EXPRESSION, NodeData::LiteralExpr(literal)) => {
                self.evaluate_object_literal(node, &literal.elements.nodes)
            }
            (syntax_kind_ext::ARRAY_LITERAL_EXPRESSION, NodeData::LiteralExpr(literal)) => {
                self.evaluate_array_literal(node, &literal.elements.nodes)
            }
            (
                syntax_kind_ext::SPREAD_ELEMENT | syntax_kind_ext::SPREAD_ASSIGNMENT,
                NodeData::Spread(spread),
            ) => {
                let expression = self.evaluate_node(spread.expression);
                let value =
                    MetadataValue::symbolic(MetadataSymbolic::Spread(SpreadExpression { expression }));
                self.record_entry(value, node)
            }
            (syntax_kind_ext::CALL_EXPRESSION, NodeData::CallExpr(call)) => {
                let arguments = call.arguments.as_ref().map_or(&[][..], |list| &list.nodes[..]);
                self.evaluate_call(node, call.expression, arguments)
            }
            (syntax_kind_ext::NEW_EXPRESSION, NodeData::CallExpr(call)) => {
                let arguments: Vec<MetadataValue> = call
                    .arguments
                    .iter()
                    .flat_map(|list| list.iter())
                    .map(|argument| self.evaluate_node(argument))
                    .collect();
                let expression = self.evaluate_node(call.expression);
                if expression.is_error() {
                    return self.record_entry(expression, node);
                }
                let value = MetadataValue::symbolic(MetadataSymbolic::New(CallExpression {
                    expression,
                    arguments: (!arguments.is_empty()).then_some(arguments),
                }));
                self.record_entry(value, node)
            }
            (syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION, NodeData::AccessExpr(access)) => {
                self.evaluate_property_access(node, access.expression, access.name_or_argument)
            }
            (syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION, NodeData::AccessExpr(access)) => {
                self.evaluate_element_access(node, access.expression, access.name_or_argument)
            }
            (syntax_kind_ext::TYPE_REFERENCE, NodeData::TypeRef(type_ref)) => {
                let arguments = type_ref.type_arguments.as_ref().map(|list| list.nodes.clone());
                self.evaluate_type_reference(node, type_ref.type_name, arguments.as_deref())
            }
            (syntax_kind_ext::UNION_TYPE, NodeData::CompositeType(union)) => {
                self.evaluate_union_type(node, &union.types.nodes)
            }
            (syntax_kind_ext::ARRAY_TYPE, NodeData::ArrayType(array)) => {
                let element = self.evaluate_node(array.element_type);
                let value = MetadataValue::symbolic(MetadataSymbolic::Reference(ReferenceExpression {
                    name: Some("Array".to_string()),
                    arguments: Some(vec![element]),
                    ..ReferenceExpression::default()
                }));
                self.record_entry(value, node)
            }
            (syntax_kind_ext::PARENTHESIZED_EXPRESSION, NodeData::Parenthesized(inner)) => {
                self.evaluate_node_with(inner.expression, prefer_reference)
            }
            (syntax_kind_ext::AS_EXPRESSION, NodeData::AsExpression(inner)) => {
                self.evaluate_node(inner.expression)
            }
            (syntax_kind_ext::NON_NULL_EXPRESSION, NodeData::UnaryExpr(inner)) => {
                self.evaluate_node(inner.operand)
            }
            (syntax_kind_ext::PREFIX_UNARY_EXPRESSION, NodeData::UnaryExpr(prefix)) => {
                self.evaluate_prefix(node, prefix.operator, prefix.operand)
            }
            (syntax_kind_ext::BINARY_EXPRESSION, NodeData::BinaryExpr(binary)) => {
                self.evaluate_binary(node, binary.left, binary.operator_token, binary.right)
            }
            (syntax_kind_ext::CONDITIONAL_EXPRESSION, NodeData::ConditionalExpr(conditional)) => {
                let condition = self.evaluate_node(conditional.condition);
                let then_expression = self.evaluate_node(conditional.when_true);
                let else_expression = self.evaluate_node(conditional.when_false);
                if condition.is_primitive() {
                    return if condition.is_truthy() {
                        then_expression
                    } else {
                        else_expression
                    };
                }
                let value = MetadataValue::symbolic(MetadataSymbolic::If(IfExpression {
                    condition,
                    then_expression,
                    else_expression,
                }));
                self.record_entry(value, node)
            }
            (syntax_kind_ext::FUNCTION_EXPRESSION | syntax_kind_ext::ARROW_FUNCTION, _) => {
                let error = self.error_value("Lambda not supported", node, &[]);
                self.record_entry(error, node)
            }
            (syntax_kind_ext::CLASS_EXPRESSION, _) => {
                MetadataValue::symbolic(MetadataSymbolic::Class(ClassMetadata::default()))
            }
            _ => self.unsupported(node),
        }
    }

    fn unsupported(&mut self, node: NodeIndex) -> MetadataValue {
        let error = self.error_value("Expression form not supported", node, &[]);
        self.record_entry(error, node)
    }

    fn evaluate_token(&mut self, node: NodeIndex, kind: u16, prefer_reference: bool) -> MetadataValue {
        let arena = self.arena;
        match SyntaxKind::from_u16(kind) {
            Some(SyntaxKind::Identifier) => match arena.get_identifier_text(node) {
                Some(name) => self.resolve_name(name, prefer_reference, node),
                None => self.unsupported(node),
            },
            Some(SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral) => {
                MetadataValue::String(arena.get_literal_text(node).unwrap_or_default().to_string())
            }
            Some(SyntaxKind::NumericLiteral) => MetadataValue::Number(
                arena
                    .get_literal_text(node)
                    .and_then(|text| text.parse::<f64>().ok())
                    .unwrap_or(f64::NAN),
            ),
            Some(SyntaxKind::NullKeyword) => MetadataValue::Null,
            Some(SyntaxKind::TrueKeyword) => MetadataValue::Bool(true),
            Some(SyntaxKind::FalseKeyword) => MetadataValue::Bool(false),
            Some(
                keyword @ (SyntaxKind::AnyKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::BooleanKeyword),
            ) => {
                let name = keyword.text().unwrap_or("any");
                self.record_entry(MetadataValue::global_reference(name), node)
            }
            _ => self.unsupported(node),
        }
    }

    fn evaluate_object_literal(&mut self, node: NodeIndex, elements: &[NodeIndex]) -> MetadataValue {
        let arena = self.arena;
        let mut object = MetadataMap::new();
        let mut quoted = Vec::new();
        for &element in elements {
            let (name_node, initializer) = match arena.node_data(element) {
                Some(NodeData::PropertyAssignment(property)) => (property.name, property.initializer),
                Some(NodeData::ShorthandProperty(property)) => (property.name, NodeIndex::NONE),
                _ => continue,
            };
            if arena.is_kind(name_node, SyntaxKind::StringLiteral as u16) {
                if let Some(text) = arena.get_literal_text(name_node) {
                    quoted.push(MetadataValue::String(text.to_string()));
                }
            }
            let name = match self.name_of(name_node) {
                Ok(name) => name,
                Err(error) => return error,
            };
            let value = if initializer.is_some() {
                self.evaluate_node_with(initializer, true)
            } else {
                self.resolve_name(&name, true, name_node)
            };
            if value.is_error() {
                return value;
            }
            let value = if initializer.is_some() {
                self.record_entry(value, initializer)
            } else {
                value
            };
            object.insert(name, value);
        }
        if self.options.quoted_names && !quoted.is_empty() {
            object.insert("$quoted$".to_string(), MetadataValue::Array(quoted));
        }
        self.record_entry(MetadataValue::Object(object), node)
    }

    fn evaluate_array_literal(&mut self, node: NodeIndex, elements: &[NodeIndex]) -> MetadataValue {
        let mut array = Vec::with_capacity(elements.len());
        for &element in elements {
            let value = self.evaluate_node_with(element, true);
            if value.is_error() {
                return value;
            }
            if let Some(MetadataSymbolic::Spread(spread)) = value.as_symbolic() {
                if let MetadataValue::Array(items) = &spread.expression {
                    array.extend(items.iter().cloned());
                    continue;
                }
            }
            array.push(value);
        }
        self.record_entry(MetadataValue::Array(array), node)
    }

    fn is_call_of(&self, callee: NodeIndex, name: &str) -> bool {
        self.arena.get_identifier_text(callee) == Some(name)
    }

    /// `x.concat(...)`: the array expression, if `callee` has that shape.
    fn method_call_target(&self, callee: NodeIndex, method: &str) -> Option<NodeIndex> {
        let header = self.arena.get(callee)?;
        if header.kind != syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION {
            return None;
        }
        let access = self.arena.get_access_expr(header)?;
        (self.arena.get_identifier_text(access.name_or_argument) == Some(method))
            .then_some(access.expression)
    }

    fn evaluate_call(
        &mut self,
        node: NodeIndex,
        callee: NodeIndex,
        arguments: &[NodeIndex],
    ) -> MetadataValue {
        let arena = self.arena;
        if self.is_call_of(callee, "forwardRef") && arguments.len() == 1 {
            if let Some(NodeData::Function(arrow)) = arena
                .is_kind(arguments[0], syntax_kind_ext::ARROW_FUNCTION)
                .then(|| arena.node_data(arguments[0]))
                .flatten()
            {
                let value = self.evaluate_node(arrow.body);
                return self.record_entry(value, node);
            }
        }

        let values: Vec<MetadataValue> = arguments
            .iter()
            .map(|&argument| self.evaluate_node(argument))
            .collect();

        if arguments.len() == 1 {
            if let Some(target) = self.method_call_target(callee, "concat") {
                if self.is_foldable(node) {
                    let array = self.evaluate_node(target);
                    if let MetadataValue::Array(mut items) = array {
                        match values.into_iter().next() {
                            Some(MetadataValue::Array(more)) => items.extend(more),
                            Some(value) => items.push(value),
                            None => {}
                        }
                        return MetadataValue::Array(items);
                    }
                    return array;
                }
            }
        }

        // CONST_EXPR folds even when its argument does not.
        if self.is_call_of(callee, "CONST_EXPR") && arguments.len() == 1 {
            let value = values.into_iter().next().unwrap_or(MetadataValue::Null);
            return self.record_entry(value, node);
        }

        let expression = self.evaluate_node(callee);
        if expression.is_error() {
            return self.record_entry(expression, node);
        }
        let value = MetadataValue::symbolic(MetadataSymbolic::Call(CallExpression {
            expression,
            arguments: (!values.is_empty()).then_some(values),
        }));
        self.record_entry(value, node)
    }

    fn evaluate_property_access(
        &mut self,
        node: NodeIndex,
        object: NodeIndex,
        name: NodeIndex,
    ) -> MetadataValue {
        let expression = self.evaluate_node_with(object, true);
        if expression.is_error() {
            return self.record_entry(expression, node);
        }
        let member = match self.name_of(name) {
            Ok(member) => member,
            Err(error) => return self.record_entry(error, node),
        };
        if self.is_foldable(object) {
            if let Some(value) = fold_member(&expression, &MetadataValue::String(member.clone())) {
                return value;
            }
        }
        if let Some(reference) = expression.as_reference().filter(|reference| reference.is_module()) {
            let value = MetadataValue::symbolic(MetadataSymbolic::Reference(ReferenceExpression {
                module: reference.module.clone(),
                name: Some(member),
                ..ReferenceExpression::default()
            }));
            return self.record_entry(value, node);
        }
        let value = MetadataValue::symbolic(MetadataSymbolic::Select(SelectExpression {
            expression,
            member,
        }));
        self.record_entry(value, node)
    }

    fn evaluate_element_access(
        &mut self,
        node: NodeIndex,
        object: NodeIndex,
        argument: NodeIndex,
    ) -> MetadataValue {
        let expression = self.evaluate_node_with(object, true);
        if expression.is_error() {
            return self.record_entry(expression, node);
        }
        if argument.is_none() {
            return self.unsupported(node);
        }
        let index = self.evaluate_node_with(argument, true);
        if self.is_foldable(object) && self.is_foldable(argument) {
            if let Some(value) = fold_member(&expression, &index) {
                return value;
            }
        }
        let value = MetadataValue::symbolic(MetadataSymbolic::Index(IndexExpression {
            expression,
            index,
        }));
        self.record_entry(value, node)
    }

    fn evaluate_type_reference(
        &mut self,
        node: NodeIndex,
        type_name: NodeIndex,
        type_arguments: Option<&[NodeIndex]>,
    ) -> MetadataValue {
        let mut reference = self.type_name_reference(type_name);
        if reference.is_error() {
            return self.record_entry(reference, node);
        }
        if let Some(arguments) = type_arguments.filter(|arguments| !arguments.is_empty()) {
            if !reference.is_module_reference() {
                let values: Vec<MetadataValue> = arguments
                    .iter()
                    .map(|&argument| self.evaluate_node(argument))
                    .collect();
                if let Some(MetadataSymbolic::Reference(target)) = reference.as_symbolic_mut() {
                    target.arguments = Some(values);
                }
            }
        }
        self.record_entry(reference, node)
    }

    fn type_name_reference(&mut self, type_name: NodeIndex) -> MetadataValue {
        let arena = self.arena;
        if let Some(name) = arena.get_identifier_text(type_name) {
            return match self.symbols.resolve(name, false) {
                Some(value) if value.is_error() || value.is_reference() => {
                    self.record_entry(value, type_name)
                }
                _ => {
                    let error =
                        self.error_value("Could not resolve type", type_name, &[("typeName", name)]);
                    self.record_entry(error, type_name)
                }
            };
        }
        let Some(NodeData::QualifiedName(qualified)) = arena.node_data(type_name) else {
            return self.unsupported(type_name);
        };
        let left = if arena.is_kind(qualified.left, syntax_kind_ext::QUALIFIED_NAME) {
            self.type_name_reference(qualified.left)
        } else {
            self.evaluate_node(qualified.left)
        };
        let member = arena
            .get_identifier_text(qualified.right)
            .unwrap_or_default()
            .to_string();
        if let Some(reference) = left.as_reference().filter(|reference| reference.is_module()) {
            let value = MetadataValue::symbolic(MetadataSymbolic::Reference(ReferenceExpression {
                module: reference.module.clone(),
                name: Some(member),
                ..ReferenceExpression::default()
            }));
            return self.record_entry(value, type_name);
        }
        MetadataValue::symbolic(MetadataSymbolic::Select(SelectExpression {
            expression: left,
            member,
        }))
    }

    fn evaluate_union_type(&mut self, node: NodeIndex, types: &[NodeIndex]) -> MetadataValue {
        let arena = self.arena;
        let is_nullish = |member: NodeIndex| {
            arena.is_kind(member, SyntaxKind::UndefinedKeyword as u16)
                || arena.is_kind(member, SyntaxKind::NullKeyword as u16)
                || arena
                    .get(member)
                    .and_then(|header| arena.get_literal_type(header))
                    .is_some_and(|literal| {
                        arena.is_kind(literal.literal, SyntaxKind::NullKeyword as u16)
                    })
        };

        // The remaining members must all reference the same symbol; members
        // with type arguments are considered different.
        let mut candidate: Option<MetadataValue> = None;
        for &member in types.iter().filter(|&&member| !is_nullish(member)) {
            let value = self.evaluate_node(member);
            let Some(reference) = value.as_reference() else {
                return value;
            };
            match candidate.as_ref().and_then(MetadataValue::as_reference) {
                Some(current) => {
                    if reference.name == current.name
                        && reference.module == current.module
                        && reference.arguments.is_none()
                    {
                        candidate = Some(value);
                    }
                }
                None => candidate = Some(value),
            }
        }
        match candidate {
            Some(candidate) => candidate,
            None => self.unsupported(node),
        }
    }

    fn evaluate_prefix(&mut self, node: NodeIndex, operator: u16, operand: NodeIndex) -> MetadataValue {
        let operand = self.evaluate_node(operand);
        let Some(operator) = SyntaxKind::from_u16(operator) else {
            return self.unsupported(node);
        };
        if operand.is_primitive() {
            if let Some(value) = folding::fold_prefix(operator, &operand) {
                return value;
            }
        }
        let operator = match operator {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken => operator.text().unwrap_or_default(),
            _ => return self.unsupported(node),
        };
        let value = MetadataValue::symbolic(MetadataSymbolic::Pre(PrefixExpression {
            operator: operator.to_string(),
            operand,
        }));
        self.record_entry(value, node)
    }

    fn evaluate_binary(
        &mut self,
        node: NodeIndex,
        left: NodeIndex,
        operator: u16,
        right: NodeIndex,
    ) -> MetadataValue {
        let left = self.evaluate_node(left);
        let right = self.evaluate_node(right);
        let Some(operator) = SyntaxKind::from_u16(operator) else {
            return self.unsupported(node);
        };
        if left.is_primitive() && right.is_primitive() {
            if let Some(value) = folding::fold_binary(operator, &left, &right) {
                return value;
            }
        }
        let value = MetadataValue::symbolic(MetadataSymbolic::Binop(BinaryExpression {
            operator: operator.text().unwrap_or_default().to_string(),
            left,
            right,
        }));
        self.record_entry(value, node)
    }

    /// True when `node` folds to a constant without consulting anything but
    /// literals and primitive locals.
    pub fn is_foldable(&mut self, node: NodeIndex) -> bool {
        let arena = self.arena;
        let Some(kind) = arena.kind_of(node) else {
            return false;
        };
        if kind < SyntaxKind::FIRST_NODE {
            return match SyntaxKind::from_u16(kind) {
                Some(
                    SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::NoSubstitutionTemplateLiteral
                    | SyntaxKind::NullKeyword
                    | SyntaxKind::TrueKeyword
                    | SyntaxKind::FalseKeyword,
                ) => true,
                Some(SyntaxKind::Identifier) => arena.get_identifier_text(node).is_some_and(|name| {
                    self.symbols
                        .resolve(name, false)
                        .is_some_and(|value| value.is_primitive())
                }),
                _ => false,
            };
        }
        let Some(data) = arena.node_data(node) else {
            return false;
        };
        match (kind, data) {
            (syntax_kind_ext::OBJECT_LITERAL_EXPRESSION, NodeData::LiteralExpr(literal)) => {
                literal.elements.iter().all(|element| match arena.node_data(element) {
                    Some(NodeData::PropertyAssignment(property)) => {
                        self.is_foldable(property.initializer)
                    }
                    _ => false,
                })
            }
            (syntax_kind_ext::ARRAY_LITERAL_EXPRESSION, NodeData::LiteralExpr(literal)) => {
                literal.elements.iter().all(|element| self.is_foldable(element))
            }
            (syntax_kind_ext::CALL_EXPRESSION, NodeData::CallExpr(call)) => {
                let arguments = call.arguments.as_ref().map_or(&[][..], |list| &list.nodes[..]);
                if arguments.len() != 1 {
                    return false;
                }
                if let Some(target) = self.method_call_target(call.expression, "concat") {
                    if self.is_foldable(target) && self.is_foldable(arguments[0]) {
                        // Probing must not feed the substitution.
                        let substitution = self.substitution.take();
                        let value = self.evaluate_node(target);
                        self.substitution = substitution;
                        return matches!(value, MetadataValue::Array(_));
                    }
                }
                self.is_call_of(call.expression, "CONST_EXPR") && self.is_foldable(arguments[0])
            }
            (syntax_kind_ext::PARENTHESIZED_EXPRESSION, NodeData::Parenthesized(inner)) => {
                self.is_foldable(inner.expression)
            }
            (syntax_kind_ext::BINARY_EXPRESSION, NodeData::BinaryExpr(binary)) => {
                matches!(
                    SyntaxKind::from_u16(binary.operator_token),
                    Some(
                        SyntaxKind::PlusToken
                            | SyntaxKind::MinusToken
                            | SyntaxKind::AsteriskToken
                            | SyntaxKind::SlashToken
                            | SyntaxKind::PercentToken
                            | SyntaxKind::AmpersandAmpersandToken
                            | SyntaxKind::BarBarToken
                    )
                ) && self.is_foldable(binary.left)
                    && self.is_foldable(binary.right)
            }
            (syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION, NodeData::AccessExpr(access)) => {
                self.is_foldable(access.expression)
            }
            (syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION, NodeData::AccessExpr(access)) => {
                self.is_foldable(access.expression) && self.is_foldable(access.name_or_argument)
            }
            _ => false,
        }
    }
}

/// `object[member]` over folded values, when it is defined.
fn fold_member(object: &MetadataValue, member: &MetadataValue) -> Option<MetadataValue> {
    match (object, member) {
        (MetadataValue::Object(map), _) => map.get(&to_js_string(member)).cloned(),
        (MetadataValue::Array(items), MetadataValue::String(name)) if name == "length" => {
            Some(MetadataValue::Number(items.len() as f64))
        }
        (MetadataValue::Array(items), MetadataValue::Number(index)) => array_index(*index)
            .and_then(|index| items.get(index))
            .cloned(),
        (MetadataValue::String(text), MetadataValue::String(name)) if name == "length" => {
            Some(MetadataValue::Number(text.encode_utf16().count() as f64))
        }
        (MetadataValue::String(text), MetadataValue::Number(index)) => array_index(*index)
            .and_then(|index| text.chars().nth(index))
            .map(|ch| MetadataValue::String(ch.to_string())),
        _ => None,
    }
}

fn array_index(index: f64) -> Option<usize> {
    (index >= 0.0 && index.fract() == 0.0).then_some(index as usize)
}
