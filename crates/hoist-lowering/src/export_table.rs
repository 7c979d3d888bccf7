//! Names a module exports from its own top-level declarations.

use hoist_parser::parser::NodeData;
use hoist_parser::{NodeArena, NodeIndex, SourceFile, modifier_flags, syntax_kind_ext};
use rustc_hash::FxHashSet;

/// Collect the names exported by top-level classes, functions, interfaces,
/// exported variables and `export { ... }` clauses without a module
/// specifier. Re-exports from other modules are not local and are skipped.
pub fn build_export_table(source_file: &SourceFile) -> FxHashSet<String> {
    let arena = &source_file.arena;
    let mut exported = FxHashSet::default();
    for &statement in source_file.statements() {
        match arena.node_data(statement) {
            Some(NodeData::Class(class)) => add_if_exported(arena, statement, class.name, &mut exported),
            Some(NodeData::Function(function)) => {
                add_if_exported(arena, statement, function.name, &mut exported);
            }
            Some(NodeData::Interface(interface)) => {
                add_if_exported(arena, statement, interface.name, &mut exported);
            }
            Some(NodeData::Variable(variable)) => {
                let Some(list) = arena
                    .get(variable.declaration_list)
                    .and_then(|node| arena.get_variable_declaration_list(node))
                else {
                    continue;
                };
                for declaration in list.declarations.iter() {
                    let Some(data) = arena
                        .get(declaration)
                        .and_then(|node| arena.get_variable_declaration(node))
                    else {
                        continue;
                    };
                    add_if_exported(arena, declaration, data.name, &mut exported);
                }
            }
            Some(NodeData::ExportDecl(export)) if export.module_specifier.is_none() => {
                let Some(named) = arena
                    .get(export.export_clause)
                    .filter(|node| node.kind == syntax_kind_ext::NAMED_EXPORTS)
                    .and_then(|node| arena.get_named_imports(node))
                else {
                    continue;
                };
                for element in named.elements.iter() {
                    if let Some(name) = arena
                        .get(element)
                        .and_then(|node| arena.get_specifier(node))
                        .and_then(|specifier| arena.get_identifier_text(specifier.name))
                    {
                        exported.insert(name.to_string());
                    }
                }
            }
            _ => {}
        }
    }
    exported
}

/// Add `name` when it is a plain identifier and `declaration` is exported.
fn add_if_exported(
    arena: &NodeArena,
    declaration: NodeIndex,
    name: NodeIndex,
    exported: &mut FxHashSet<String>,
) {
    if arena.get_combined_modifier_flags(declaration) & modifier_flags::EXPORT == 0 {
        return;
    }
    if let Some(text) = arena.get_identifier_text(name) {
        exported.insert(text.to_string());
    }
}
