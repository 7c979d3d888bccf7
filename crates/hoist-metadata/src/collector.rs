//! Module metadata collection.
//!
//! The collector walks a module's top-level statements and records metadata
//! for what the module exports: classes (decorators, constructor parameter
//! types, member decorators and statics), interfaces and type aliases, simple
//! functions, enums, variables and re-exports.

use crate::cache::{CollectMetadata, MetadataSubstitution};
use crate::error::MetadataError;
use crate::evaluator::Evaluator;
use crate::schema::{
    BinaryExpression, ClassMetadata, ExportedSymbol, FunctionMetadata, METADATA_VERSION,
    MemberMetadata, MetadataMap, MetadataSymbolic, MetadataValue, MethodMetadata,
    ModuleExportMetadata, ModuleMetadata, PropertyMetadata, SelectExpression,
};
use crate::validate::validate_metadata;
use hoist_parser::parser::{ClassData, NodeData};
use hoist_parser::{
    NodeArena, NodeIndex, NodeList, SourceFile, modifier_flags, syntax_kind_ext,
};
use hoist_scanner::SyntaxKind;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct CollectorOptions {
    /// Version written into module metadata; defaults to
    /// [`METADATA_VERSION`].
    pub version: Option<u32>,
    /// Record string-literal property names of object literals under
    /// `$quoted$`.
    pub quoted_names: bool,
}

/// Collects [`ModuleMetadata`] from parsed modules.
#[derive(Clone, Debug, Default)]
pub struct MetadataCollector {
    options: CollectorOptions,
}

impl MetadataCollector {
    pub fn new(options: CollectorOptions) -> MetadataCollector {
        MetadataCollector { options }
    }

    /// Collect metadata for `source_file`, passing every produced value
    /// through `substitution`. Returns `None` when the module exports
    /// nothing. With `strict`, error records reachable from exported classes
    /// fail the collection.
    pub fn get_metadata(
        &self,
        source_file: &SourceFile,
        strict: bool,
        substitution: Option<&mut dyn MetadataSubstitution>,
    ) -> Result<Option<ModuleMetadata>, MetadataError> {
        let mut collection = Collection::new(source_file, &self.options, substitution);
        collection.predeclare();
        for &statement in source_file.statements() {
            collection.collect_statement(statement);
        }
        collection.finish(strict)
    }
}

impl CollectMetadata for MetadataCollector {
    fn get_metadata(
        &self,
        source_file: &SourceFile,
        strict: bool,
        substitution: Option<&mut dyn MetadataSubstitution>,
    ) -> Result<Option<ModuleMetadata>, MetadataError> {
        MetadataCollector::get_metadata(self, source_file, strict, substitution)
    }
}

/// Static members the runtime never reads.
fn should_ignore_static_member(name: &str) -> bool {
    name.starts_with("ngAcceptInputType_") || name.starts_with("ngTemplateGuard_")
}

struct Collection<'a, 's> {
    source_file: &'a SourceFile,
    arena: &'a NodeArena,
    options: &'a CollectorOptions,
    evaluator: Evaluator<'a, 's>,
    /// Local name to exported name, from `export { a as b }`.
    export_map: FxHashMap<String, String>,
    metadata: Option<MetadataMap>,
    /// Node each metadata entry was produced from.
    entry_nodes: FxHashMap<String, NodeIndex>,
    exports: Option<Vec<ModuleExportMetadata>>,
}

impl<'a, 's> Collection<'a, 's> {
    fn new(
        source_file: &'a SourceFile,
        options: &'a CollectorOptions,
        substitution: Option<&'s mut dyn MetadataSubstitution>,
    ) -> Collection<'a, 's> {
        let mut collection = Collection {
            source_file,
            arena: &source_file.arena,
            options,
            evaluator: Evaluator::new(source_file, options, substitution),
            export_map: FxHashMap::default(),
            metadata: None,
            entry_nodes: FxHashMap::default(),
            exports: None,
        };
        collection.collect_export_map();
        collection
    }

    fn collect_export_map(&mut self) {
        let arena = self.arena;
        for &statement in self.source_file.statements() {
            let Some(export) = arena.get(statement).and_then(|node| arena.get_export_decl(node)) else {
                continue;
            };
            if export.module_specifier.is_some() {
                continue;
            }
            for (local, exported) in self.named_export_pairs(export.export_clause) {
                self.export_map.insert(local.to_string(), exported.to_string());
            }
        }
    }

    /// `(local, exported)` name pairs of a named export clause.
    fn named_export_pairs(&self, export_clause: NodeIndex) -> Vec<(&'a str, &'a str)> {
        let arena = self.arena;
        let Some(named) = arena
            .get(export_clause)
            .filter(|node| node.kind == syntax_kind_ext::NAMED_EXPORTS)
            .and_then(|node| arena.get_named_imports(node))
        else {
            return Vec::new();
        };
        named
            .elements
            .iter()
            .filter_map(|element| {
                let specifier = arena.get(element).and_then(|node| arena.get_specifier(node))?;
                let exported = arena.get_identifier_text(specifier.name)?;
                let local = arena
                    .get_identifier_text(specifier.property_name)
                    .unwrap_or(exported);
                Some((local, exported))
            })
            .collect()
    }

    fn is_export(&self, node: NodeIndex) -> bool {
        self.source_file.is_declaration_file
            || self.arena.get_combined_modifier_flags(node) & modifier_flags::EXPORT != 0
    }

    fn is_exported(&self, node: NodeIndex, name: &str) -> bool {
        self.is_export(node) || self.export_map.contains_key(name)
    }

    fn exported_name(&self, name: &str) -> String {
        self.export_map
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    fn metadata_mut(&mut self) -> &mut MetadataMap {
        self.metadata.get_or_insert_with(MetadataMap::new)
    }

    /// Move values the substitution replaced into the module metadata.
    fn drain_recorded_exports(&mut self) {
        let recorded = self.evaluator.take_recorded_exports();
        if recorded.is_empty() {
            return;
        }
        let metadata = self.metadata_mut();
        for (name, value) in recorded {
            metadata.insert(name, value);
        }
    }

    fn insert(&mut self, name: String, value: MetadataValue, node: NodeIndex) {
        self.drain_recorded_exports();
        self.entry_nodes.insert(name.clone(), node);
        self.metadata_mut().insert(name, value);
    }

    /// Define classes, interfaces and non-exported functions before any
    /// initializer can reference them.
    fn predeclare(&mut self) {
        let arena = self.arena;
        for &statement in self.source_file.statements() {
            let Some(node) = arena.get(statement) else {
                continue;
            };
            match node.kind {
                syntax_kind_ext::CLASS_DECLARATION => {
                    let Some(name) = arena
                        .get_class(node)
                        .and_then(|class| arena.get_identifier_text(class.name))
                    else {
                        continue;
                    };
                    let value = if self.is_exported(statement, name) {
                        MetadataValue::global_reference(self.exported_name(name))
                    } else {
                        self.evaluator.error_value(
                            "Reference to non-exported class",
                            statement,
                            &[("className", name)],
                        )
                    };
                    self.evaluator.symbols.define(name, value);
                }
                syntax_kind_ext::INTERFACE_DECLARATION => {
                    if let Some(name) = arena
                        .get_interface(node)
                        .and_then(|interface| arena.get_identifier_text(interface.name))
                    {
                        // Interfaces only exist at compile time.
                        self.evaluator
                            .symbols
                            .define(name, MetadataValue::global_reference("any"));
                    }
                }
                syntax_kind_ext::FUNCTION_DECLARATION => {
                    let Some(function) = arena.get_function(node) else {
                        continue;
                    };
                    let Some(name) = arena.get_identifier_text(function.name) else {
                        continue;
                    };
                    if !self.is_exported(statement, name) {
                        let error = self.evaluator.error_value(
                            "Reference to a non-exported function",
                            function.name,
                            &[("name", name)],
                        );
                        self.evaluator.symbols.define(name, error);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_statement(&mut self, statement: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(statement) else {
            return;
        };
        match arena.node_data(statement) {
            Some(NodeData::ExportDecl(export)) => {
                if export.module_specifier.is_none() {
                    self.collect_local_exports(export.export_clause);
                } else if let Some(from) = arena.get_literal_text(export.module_specifier) {
                    self.collect_reexport(from, export.export_clause);
                }
            }
            Some(NodeData::Class(class)) if node.kind == syntax_kind_ext::CLASS_DECLARATION => {
                let Some(name) = arena.get_identifier_text(class.name) else {
                    return;
                };
                if self.is_exported(statement, name) {
                    let value = self.class_metadata_of(statement, class);
                    self.insert(self.exported_name(name), value, statement);
                }
            }
            Some(NodeData::TypeAlias(alias)) => {
                self.collect_interface(statement, alias.name);
            }
            Some(NodeData::Interface(interface)) => {
                self.collect_interface(statement, interface.name);
            }
            Some(NodeData::Function(function))
                if node.kind == syntax_kind_ext::FUNCTION_DECLARATION =>
            {
                let Some(name) = arena.get_identifier_text(function.name) else {
                    return;
                };
                if !self.is_exported(statement, name) {
                    return;
                }
                let value = match self.maybe_get_simple_function(
                    function.name,
                    &function.parameters,
                    function.body,
                ) {
                    Some((_, function)) => self.evaluator.record_collected(
                        MetadataValue::symbolic(MetadataSymbolic::Function(function)),
                        statement,
                    ),
                    None => MetadataValue::symbolic(MetadataSymbolic::Function(
                        FunctionMetadata::default(),
                    )),
                };
                self.insert(self.exported_name(name), value, statement);
            }
            Some(NodeData::Enum(enumeration)) => {
                if let Some(name) = arena.get_identifier_text(enumeration.name) {
                    if self.is_exported(statement, name) {
                        self.collect_enum(statement, name, &enumeration.members);
                    }
                }
            }
            Some(NodeData::Variable(variable)) => {
                let Some(list) = arena
                    .get(variable.declaration_list)
                    .and_then(|node| arena.get_variable_declaration_list(node))
                else {
                    return;
                };
                for declaration in list.declarations.iter() {
                    self.collect_variable(statement, declaration);
                }
            }
            _ => {}
        }
    }

    /// `export { a as b };` exports a reference to anything not already
    /// recorded under the exported name.
    fn collect_local_exports(&mut self, export_clause: NodeIndex) {
        let arena = self.arena;
        let Some(named) = arena
            .get(export_clause)
            .filter(|node| node.kind == syntax_kind_ext::NAMED_EXPORTS)
            .and_then(|node| arena.get_named_imports(node))
        else {
            return;
        };
        for element in named.elements.iter() {
            let Some(specifier) = arena.get(element).and_then(|node| arena.get_specifier(node))
            else {
                continue;
            };
            let Some(exported) = arena.get_identifier_text(specifier.name) else {
                continue;
            };
            if self
                .metadata
                .as_ref()
                .is_some_and(|metadata| metadata.contains_key(exported))
            {
                continue;
            }
            let local = if specifier.property_name.is_some() {
                specifier.property_name
            } else {
                specifier.name
            };
            let value = self.evaluator.evaluate_node(local);
            let value = self.evaluator.record_collected(value, local);
            self.insert(exported.to_string(), value, local);
        }
    }

    fn collect_reexport(&mut self, from: &str, export_clause: NodeIndex) {
        let mut module_export = ModuleExportMetadata {
            from: from.to_string(),
            export: None,
        };
        if self.arena.is_kind(export_clause, syntax_kind_ext::NAMED_EXPORTS) {
            let arena = self.arena;
            let symbols = arena
                .get(export_clause)
                .and_then(|node| arena.get_named_imports(node))
                .map(|named| {
                    named
                        .elements
                        .iter()
                        .filter_map(|element| {
                            let specifier =
                                arena.get(element).and_then(|node| arena.get_specifier(node))?;
                            let name = arena.get_identifier_text(specifier.name)?.to_string();
                            Some(match arena.get_identifier_text(specifier.property_name) {
                                Some(property) => ExportedSymbol::Alias {
                                    name: property.to_string(),
                                    as_name: name,
                                },
                                None => ExportedSymbol::Name(name),
                            })
                        })
                        .collect()
                });
            module_export.export = symbols;
        }
        self.exports.get_or_insert_with(Vec::new).push(module_export);
    }

    fn collect_interface(&mut self, statement: NodeIndex, name: NodeIndex) {
        let Some(name) = self.arena.get_identifier_text(name) else {
            return;
        };
        if self.is_exported(statement, name) {
            let value = MetadataValue::symbolic(MetadataSymbolic::Interface);
            self.insert(self.exported_name(name), value, statement);
        }
    }

    fn collect_enum(&mut self, statement: NodeIndex, name: &str, members: &NodeList) {
        let arena = self.arena;
        let enum_name = self.exported_name(name);
        let mut values = MetadataMap::new();
        let mut next_default = MetadataValue::Number(0.0);
        for member in members.iter() {
            let Some(data) = arena.get(member).and_then(|node| arena.get_enum_member(node)) else {
                continue;
            };
            let value = if data.initializer.is_some() {
                self.evaluator.evaluate_node(data.initializer)
            } else {
                next_default.clone()
            };
            let member_name = arena.get_identifier_text(data.name);
            if let Some(member_name) = member_name {
                values.insert(member_name.to_string(), value.clone());
            }
            next_default = match (&value, member_name) {
                (MetadataValue::Number(number), _) => MetadataValue::Number(number + 1.0),
                (_, Some(member_name)) => {
                    let reference = self
                        .evaluator
                        .record_collected(MetadataValue::global_reference(&enum_name), statement);
                    MetadataValue::symbolic(MetadataSymbolic::Binop(BinaryExpression {
                        operator: "+".to_string(),
                        left: MetadataValue::symbolic(MetadataSymbolic::Select(SelectExpression {
                            expression: reference,
                            member: member_name.to_string(),
                        })),
                        right: MetadataValue::Number(1.0),
                    }))
                }
                (_, None) => {
                    let error =
                        self.evaluator
                            .error_value("Unsupported enum member name", data.name, &[]);
                    self.evaluator.record_collected(error, statement)
                }
            };
        }
        if !values.is_empty() {
            let value = self
                .evaluator
                .record_collected(MetadataValue::Object(values), statement);
            self.insert(enum_name, value, statement);
        }
    }

    fn collect_variable(&mut self, statement: NodeIndex, declaration: NodeIndex) {
        let arena = self.arena;
        let Some(data) = arena
            .get(declaration)
            .and_then(|node| arena.get_variable_declaration(node))
        else {
            return;
        };
        let Some(name) = arena.get_identifier_text(data.name) else {
            self.report_destructuring(statement, data.name);
            return;
        };

        let value = if data.initializer.is_some() {
            self.evaluator.evaluate_node(data.initializer)
        } else {
            let error = self
                .evaluator
                .error_value("Variable not initialized", data.name, &[]);
            self.evaluator.record_collected(error, data.name)
        };

        let exported = self.is_export(statement)
            || self.is_export(declaration)
            || self.export_map.contains_key(name);
        if exported {
            let entry = self.evaluator.record_collected(value.clone(), statement);
            self.insert(self.exported_name(name), entry, statement);
        }

        match value {
            MetadataValue::String(_) | MetadataValue::Number(_) | MetadataValue::Bool(_) => {
                self.evaluator.symbols.define(name, value);
                if exported {
                    self.evaluator
                        .symbols
                        .define_reference(name, MetadataValue::global_reference(name));
                }
            }
            _ if exported => {}
            value if !matches!(value, MetadataValue::Null) && !value.is_error() => {
                let local = self.evaluator.record_collected(value, statement);
                self.evaluator.symbols.define(name, local);
            }
            _ => {
                let error = self.evaluator.error_value(
                    "Reference to a local symbol",
                    data.name,
                    &[("name", name)],
                );
                let local = self.evaluator.record_collected(error, statement);
                self.evaluator.symbols.define(name, local);
            }
        }
    }

    /// Destructuring declarations are not supported; every bound name
    /// resolves to an error.
    fn report_destructuring(&mut self, statement: NodeIndex, name: NodeIndex) {
        let arena = self.arena;
        if let Some(text) = arena.get_identifier_text(name) {
            let error = self
                .evaluator
                .error_value("Destructuring not supported", name, &[]);
            self.evaluator.symbols.define(text, error.clone());
            if self.is_export(statement) {
                self.insert(text.to_string(), error, statement);
            }
            return;
        }
        match arena.node_data(name) {
            Some(NodeData::BindingElement(element)) => {
                self.report_destructuring(statement, element.name);
            }
            Some(NodeData::BindingPattern(pattern)) => {
                for element in pattern.elements.iter() {
                    self.report_destructuring(statement, element);
                }
            }
            _ => {}
        }
    }

    fn decorators(&mut self, node: NodeIndex) -> Option<Vec<MetadataValue>> {
        let arena = self.arena;
        let decorators = arena.decorators_of(node);
        if decorators.is_empty() {
            return None;
        }
        Some(
            decorators
                .into_iter()
                .map(|decorator| {
                    let expression = arena
                        .get(decorator)
                        .and_then(|node| arena.get_decorator(node))
                        .map_or(NodeIndex::NONE, |data| data.expression);
                    self.evaluator.evaluate_node(expression)
                })
                .collect(),
        )
    }

    /// A reference, a select, or an error for anything else.
    fn reference_from(&mut self, node: NodeIndex) -> MetadataValue {
        let value = self.evaluator.evaluate_node(node);
        match value.as_symbolic() {
            Some(
                MetadataSymbolic::Error(_)
                | MetadataSymbolic::Reference(_)
                | MetadataSymbolic::Select(_),
            ) => value,
            _ => self
                .evaluator
                .error_value("Symbol reference expected", node, &[]),
        }
    }

    fn names_of(&self, parameters: &NodeList) -> Vec<String> {
        fn add_names(arena: &NodeArena, name: NodeIndex, names: &mut Vec<String>) {
            if let Some(text) = arena.get_identifier_text(name) {
                names.push(text.to_string());
                return;
            }
            match arena.node_data(name) {
                Some(NodeData::BindingPattern(pattern)) => {
                    for element in pattern.elements.iter() {
                        add_names(arena, element, names);
                    }
                }
                Some(NodeData::BindingElement(element)) => add_names(arena, element.name, names),
                _ => {}
            }
        }

        let arena = self.arena;
        let mut names = Vec::new();
        for parameter in parameters.iter() {
            if let Some(data) = arena.get(parameter).and_then(|node| arena.get_parameter(node)) {
                add_names(arena, data.name, &mut names);
            }
        }
        names
    }

    /// A function or method whose body is a single `return <expression>;`.
    fn maybe_get_simple_function(
        &mut self,
        name: NodeIndex,
        parameters: &NodeList,
        body: NodeIndex,
    ) -> Option<(String, FunctionMetadata)> {
        let arena = self.arena;
        let name = arena.get_identifier_text(name)?;
        let block = arena.get(body).and_then(|node| arena.get_block(node))?;
        let [statement] = block.statements.nodes.as_slice() else {
            return None;
        };
        if !arena.is_kind(*statement, syntax_kind_ext::RETURN_STATEMENT) {
            return None;
        }
        let expression = arena
            .get(*statement)
            .and_then(|node| arena.get_return_statement(node))?
            .expression;
        if expression.is_none() {
            return None;
        }

        let mut function = FunctionMetadata {
            parameters: Some(self.names_of(parameters)),
            value: Some(self.evaluator.evaluate_node(expression)),
            defaults: None,
        };
        let initializers: Vec<NodeIndex> = parameters
            .iter()
            .map(|parameter| {
                arena
                    .get(parameter)
                    .and_then(|node| arena.get_parameter(node))
                    .map_or(NodeIndex::NONE, |data| data.initializer)
            })
            .collect();
        if initializers.iter().any(|initializer| initializer.is_some()) {
            function.defaults = Some(
                initializers
                    .into_iter()
                    .map(|initializer| {
                        if initializer.is_some() {
                            self.evaluator.evaluate_node(initializer)
                        } else {
                            MetadataValue::Null
                        }
                    })
                    .collect(),
            );
        }
        Some((name.to_string(), function))
    }

    fn class_metadata_of(&mut self, class_node: NodeIndex, class: &ClassData) -> MetadataValue {
        let arena = self.arena;
        let mut result = ClassMetadata::default();

        for clause in class.heritage_clauses.iter().flat_map(|clauses| clauses.iter()) {
            let Some(heritage) = arena.get(clause).and_then(|node| arena.get_heritage_clause(node))
            else {
                continue;
            };
            if heritage.token != SyntaxKind::ExtendsKeyword as u16 {
                continue;
            }
            for base in heritage.types.iter() {
                let expression = arena
                    .get(base)
                    .and_then(|node| arena.get_expr_with_type_args(node))
                    .map_or(base, |data| data.expression);
                result.extends = Some(self.reference_from(expression));
            }
        }

        if let Some(type_parameters) = class.type_parameters.as_ref().filter(|list| !list.is_empty()) {
            result.arity = Some(type_parameters.len());
        }

        result.decorators = self.decorators(class_node);

        let mut members: IndexMap<String, Vec<MemberMetadata>> = IndexMap::new();
        let mut statics = MetadataMap::new();

        for member in class.members.iter() {
            let Some(kind) = arena.kind_of(member) else {
                continue;
            };
            match kind {
                syntax_kind_ext::CONSTRUCTOR | syntax_kind_ext::METHOD_DECLARATION => {
                    let is_constructor = kind == syntax_kind_ext::CONSTRUCTOR;
                    let (name_node, parameters, body) = match arena.node_data(member) {
                        Some(NodeData::Constructor(data)) => {
                            (NodeIndex::NONE, &data.parameters, data.body)
                        }
                        Some(NodeData::MethodDecl(data)) => (data.name, &data.parameters, data.body),
                        _ => continue,
                    };
                    if arena.has_modifier(member, modifier_flags::STATIC) {
                        if let Some((name, function)) =
                            self.maybe_get_simple_function(name_node, parameters, body)
                        {
                            statics.insert(
                                name,
                                MetadataValue::symbolic(MetadataSymbolic::Function(function)),
                            );
                        }
                        continue;
                    }

                    let mut method = MethodMetadata {
                        decorators: self.decorators(member),
                        ..MethodMetadata::default()
                    };
                    let mut parameter_decorators = Vec::with_capacity(parameters.len());
                    let mut parameter_types = Vec::new();
                    for parameter in parameters.iter() {
                        let decorators = self.decorators(parameter);
                        parameter_decorators.push(decorators);
                        if is_constructor {
                            let type_annotation = arena
                                .get(parameter)
                                .and_then(|node| arena.get_parameter(node))
                                .map_or(NodeIndex::NONE, |data| data.type_annotation);
                            parameter_types.push(if type_annotation.is_some() {
                                self.reference_from(type_annotation)
                            } else {
                                MetadataValue::Null
                            });
                        }
                    }
                    if parameter_decorators.iter().any(Option::is_some) {
                        method.parameter_decorators = Some(parameter_decorators);
                    }
                    if !parameter_types.is_empty() {
                        method.parameters = Some(parameter_types);
                    }

                    let (name, metadata) = if is_constructor {
                        ("__ctor__".to_string(), MemberMetadata::Constructor(method))
                    } else {
                        match self.evaluator.name_of(name_node) {
                            Ok(name) => (name, MemberMetadata::Method(method)),
                            Err(_) => continue,
                        }
                    };
                    members.entry(name).or_default().push(metadata);
                }
                syntax_kind_ext::PROPERTY_DECLARATION
                | syntax_kind_ext::GET_ACCESSOR
                | syntax_kind_ext::SET_ACCESSOR => {
                    let (name_node, initializer) = match arena.node_data(member) {
                        Some(NodeData::PropertyDecl(data)) => (data.name, data.initializer),
                        Some(NodeData::Accessor(data)) => (data.name, NodeIndex::NONE),
                        _ => continue,
                    };
                    if arena.has_modifier(member, modifier_flags::STATIC) {
                        if let Ok(name) = self.evaluator.name_of(name_node) {
                            if !should_ignore_static_member(&name) {
                                let value = if initializer.is_some() {
                                    self.evaluator.evaluate_node(initializer)
                                } else {
                                    self.evaluator
                                        .error_value("Variable not initialized", name_node, &[])
                                };
                                statics.insert(name, value);
                            }
                        }
                    }
                    if let Some(decorators) = self.decorators(member) {
                        if let Ok(name) = self.evaluator.name_of(name_node) {
                            members
                                .entry(name)
                                .or_default()
                                .push(MemberMetadata::Property(PropertyMetadata {
                                    decorators: Some(decorators),
                                }));
                        }
                    }
                }
                _ => {}
            }
        }

        if !members.is_empty() {
            result.members = Some(members);
        }
        if !statics.is_empty() {
            result.statics = Some(statics);
        }
        let value = MetadataValue::symbolic(MetadataSymbolic::Class(result));
        self.evaluator.record_collected(value, class_node)
    }

    fn finish(mut self, strict: bool) -> Result<Option<ModuleMetadata>, MetadataError> {
        self.drain_recorded_exports();
        if self.metadata.is_none() && self.exports.is_none() {
            debug!(file = %self.source_file.file_name, "module has no metadata");
            return Ok(None);
        }
        let metadata = match self.metadata {
            Some(metadata) => {
                if strict {
                    validate_metadata(self.source_file, &metadata, &self.entry_nodes)?;
                }
                metadata
            }
            None => MetadataMap::new(),
        };
        debug!(
            file = %self.source_file.file_name,
            entries = metadata.len(),
            "collected metadata"
        );
        Ok(Some(ModuleMetadata {
            version: self.options.version.unwrap_or(METADATA_VERSION),
            metadata,
            import_as: None,
            exports: self.exports,
        }))
    }
}
