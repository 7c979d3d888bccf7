//! Applying lowering requests to a module's syntax tree.
//!
//! Each requested expression is moved into a `const ɵn` binding placed right
//! before the top-level statement that contained it, and the expression is
//! replaced by a reference to that binding. A trailing `export { ... }`
//! exports every new name. When the whole initializer of a variable was
//! requested, the variable itself is exported under the lowered name instead.
//! That variable already holds the value, so no `const` follows the
//! statement and the export clause aliases it as `x as ɵn`.
//!
//! Requests whose name the module already exports are skipped, so running the
//! rewrite again on its own output changes nothing.

use crate::export_table::build_export_table;
use crate::lower_metadata::{RequestLocationMap, RequestsMap};
use crate::program::ModuleProvider;
use hoist_common::limits::MAX_AST_DEPTH;
use hoist_metadata::{MetadataError, is_lowered_symbol};
use hoist_parser::parser::UNSET_POS;
use hoist_parser::syntax::factory;
use hoist_parser::syntax::visitor::{NodeVisitor, visit_each_child};
use hoist_parser::{NodeArena, NodeIndex, SourceFile, node_flags, syntax_kind_ext};
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationOrder {
    BeforeStatement,
    AfterStatement,
}

/// A binding to place next to the statement that referenced it.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub name: String,
    /// The lowered expression, or for `AfterStatement` an identifier naming
    /// the variable that already holds it.
    pub node: NodeIndex,
    pub order: DeclarationOrder,
}

/// Nested lexical scopes are never entered.
fn is_lexical_scope(kind: u16) -> bool {
    matches!(
        kind,
        syntax_kind_ext::ARROW_FUNCTION
            | syntax_kind_ext::FUNCTION_EXPRESSION
            | syntax_kind_ext::FUNCTION_DECLARATION
            | syntax_kind_ext::CLASS_EXPRESSION
            | syntax_kind_ext::CLASS_DECLARATION
            | syntax_kind_ext::FUNCTION_TYPE
            | syntax_kind_ext::TYPE_LITERAL
            | syntax_kind_ext::ARRAY_TYPE
    )
}

struct RequestVisitor<'a> {
    arena: &'a mut NodeArena,
    requests: &'a RequestLocationMap,
    /// Lowered names the module already exports.
    lowered: &'a FxHashSet<String>,
    min: u32,
    max: u32,
    declarations: Vec<Declaration>,
    depth: u32,
}

impl RequestVisitor<'_> {
    /// Only ranges around a requested location are walked. Synthesized nodes
    /// without a range are always walked.
    fn should_visit(&self, pos: u32, end: u32) -> bool {
        (pos <= self.max && end >= self.min) || pos == UNSET_POS
    }

    /// Name of the variable whose whole initializer is `original`.
    fn initialized_variable(&self, original: NodeIndex) -> Option<String> {
        let parent = self.arena.parent_of(original);
        let declaration = self
            .arena
            .get(parent)
            .filter(|header| header.kind == syntax_kind_ext::VARIABLE_DECLARATION)
            .and_then(|header| self.arena.get_variable_declaration(header))?;
        self.arena
            .get_identifier_text(declaration.name)
            .map(str::to_string)
    }
}

impl NodeVisitor for RequestVisitor<'_> {
    fn arena(&mut self) -> &mut NodeArena {
        &mut *self.arena
    }

    fn visit_node(&mut self, node: NodeIndex) -> NodeIndex {
        let original = self.arena.get_original_node(node);
        let Some(&header) = self.arena.get(original) else {
            return node;
        };

        if let Some(request) = self
            .requests
            .get(&header.pos)
            .filter(|request| request.kind == header.kind && request.end == header.end)
        {
            if self.lowered.contains(&request.name) {
                return node;
            }
            let name = request.name.clone();
            if let Some(variable) = self.initialized_variable(original) {
                debug!(name = %name, variable = %variable, "exporting initialized variable");
                let reference = factory::create_identifier(self.arena, &variable);
                self.declarations.push(Declaration {
                    name,
                    node: reference,
                    order: DeclarationOrder::AfterStatement,
                });
                return node;
            }
            debug!(name = %name, pos = header.pos, "hoisting expression");
            let reference = factory::create_identifier(self.arena, &name);
            self.declarations.push(Declaration {
                name,
                node,
                order: DeclarationOrder::BeforeStatement,
            });
            return reference;
        }

        if !self.should_visit(header.pos, header.end) || is_lexical_scope(header.kind) {
            return node;
        }
        if self.depth >= MAX_AST_DEPTH {
            warn!(pos = header.pos, "lowering depth limit reached");
            return node;
        }
        self.depth += 1;
        let result = visit_each_child(self, node);
        self.depth -= 1;
        result
    }
}

fn create_const_statement(arena: &mut NodeArena, declarations: &[&Declaration]) -> NodeIndex {
    let bindings = declarations
        .iter()
        .map(|declaration| {
            let name = factory::create_identifier(arena, &declaration.name);
            factory::create_variable_declaration(arena, name, declaration.node)
        })
        .collect();
    let list = factory::create_variable_declaration_list(arena, bindings, node_flags::CONST);
    factory::create_variable_statement(arena, None, list)
}

/// Rewrite `source_file` in place. Returns whether anything was lowered.
pub fn lower_expressions(source_file: &mut SourceFile, requests: &RequestLocationMap) -> bool {
    let (Some(&min), Some(&max)) = (requests.keys().min(), requests.keys().max()) else {
        return false;
    };
    let lowered: FxHashSet<String> = build_export_table(source_file)
        .into_iter()
        .filter(|name| is_lowered_symbol(name))
        .collect();
    let root = source_file.root;
    let statements = source_file.statements().to_vec();
    let arena = &mut source_file.arena;

    let mut rewritten = Vec::with_capacity(statements.len());
    for statement in statements {
        let original = arena.get_original_node(statement);
        let Some(&header) = arena.get(original) else {
            rewritten.push((statement, Vec::new()));
            continue;
        };
        let mut visitor = RequestVisitor {
            arena: &mut *arena,
            requests,
            lowered: &lowered,
            min,
            max,
            declarations: Vec::new(),
            depth: 0,
        };
        let result = if visitor.should_visit(header.pos, header.end) {
            visit_each_child(&mut visitor, statement)
        } else {
            statement
        };
        let declarations = visitor.declarations;
        rewritten.push((result, declarations));
    }

    if rewritten.iter().all(|(_, declarations)| declarations.is_empty()) {
        return false;
    }

    let mut new_statements = Vec::with_capacity(rewritten.len() + 1);
    let mut specifiers = Vec::new();
    for (statement, declarations) in &rewritten {
        let before: Vec<&Declaration> = declarations
            .iter()
            .filter(|declaration| declaration.order == DeclarationOrder::BeforeStatement)
            .collect();
        if !before.is_empty() {
            new_statements.push(create_const_statement(arena, &before));
        }
        new_statements.push(*statement);

        for declaration in declarations {
            let specifier = match declaration.order {
                DeclarationOrder::BeforeStatement => {
                    factory::create_export_specifier(arena, None, &declaration.name)
                }
                DeclarationOrder::AfterStatement => {
                    let variable = arena
                        .get_identifier_text(declaration.node)
                        .map(str::to_string);
                    factory::create_export_specifier(arena, variable.as_deref(), &declaration.name)
                }
            };
            specifiers.push(specifier);
        }
    }
    let clause = factory::create_named_exports(arena, specifiers);
    new_statements.push(factory::create_export_declaration(
        arena,
        clause,
        NodeIndex::NONE,
    ));

    let new_root = factory::update_source_file(arena, root, new_statements);
    if !arena.is_synthesized(root)
        && let Some(node) = arena.get_mut(new_root)
    {
        node.flags &= !node_flags::SYNTHESIZED;
    }
    source_file.root = new_root;
    true
}

/// Lowers the expressions recorded for each module while it is emitted.
///
/// Requests are always looked up with the module as originally parsed, so
/// a file that was already rewritten by another pass still finds them.
pub struct ExpressionLoweringTransform<'a, R: ?Sized, P: ?Sized> {
    requests_map: &'a R,
    modules: &'a P,
}

impl<'a, R, P> ExpressionLoweringTransform<'a, R, P>
where
    R: RequestsMap + ?Sized,
    P: ModuleProvider + ?Sized,
{
    pub fn new(requests_map: &'a R, modules: &'a P) -> Self {
        ExpressionLoweringTransform {
            requests_map,
            modules,
        }
    }

    /// Rewrite `source_file`; returns whether it changed.
    pub fn transform(&self, source_file: &mut SourceFile) -> Result<bool, MetadataError> {
        let Some(original) = self.modules.get_source_file(&source_file.file_name) else {
            return Ok(false);
        };
        let requests = self.requests_map.get_requests(original)?;
        if requests.is_empty() {
            return Ok(false);
        }
        debug!(
            file = %source_file.file_name,
            requests = requests.len(),
            "lowering expressions"
        );
        Ok(lower_expressions(source_file, &requests))
    }
}
