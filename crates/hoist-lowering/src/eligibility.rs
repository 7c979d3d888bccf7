//! Structural eligibility for lowering.

use hoist_parser::{NodeArena, NodeIndex, modifier_flags, syntax_kind_ext};

/// True when an expression at `node` may be moved out of its position.
///
/// The nearest deciding ancestor wins: module scope and decorators allow
/// lowering, declarations (classes, interfaces, enums, functions) never do,
/// and a variable declaration allows it when it is exported or initialized
/// with an object literal, array literal or call.
pub fn is_eligible_for_lowering(arena: &NodeArena, node: NodeIndex) -> bool {
    let mut current = node;
    while let Some(kind) = arena.kind_of(current) {
        match kind {
            syntax_kind_ext::SOURCE_FILE | syntax_kind_ext::DECORATOR => return true,
            syntax_kind_ext::CLASS_DECLARATION
            | syntax_kind_ext::INTERFACE_DECLARATION
            | syntax_kind_ext::ENUM_DECLARATION
            | syntax_kind_ext::FUNCTION_DECLARATION => return false,
            syntax_kind_ext::VARIABLE_DECLARATION => {
                let exported =
                    arena.get_combined_modifier_flags(current) & modifier_flags::EXPORT != 0;
                // Configuration tokens such as ROUTES nest lambdas inside these
                // shapes even when the variable is only referenced.
                let initializer = arena
                    .get(current)
                    .and_then(|header| arena.get_variable_declaration(header))
                    .map_or(NodeIndex::NONE, |declaration| declaration.initializer);
                let nests_values = matches!(
                    arena.kind_of(initializer),
                    Some(
                        syntax_kind_ext::OBJECT_LITERAL_EXPRESSION
                            | syntax_kind_ext::ARRAY_LITERAL_EXPRESSION
                            | syntax_kind_ext::CALL_EXPRESSION
                    )
                );
                return exported || nests_values;
            }
            _ => current = arena.parent_of(current),
        }
    }
    true
}
