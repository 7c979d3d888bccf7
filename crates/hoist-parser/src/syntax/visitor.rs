//! Copy-on-write tree visiting.
//!
//! Rewrites never mutate parsed nodes. A visitor returns either the node it
//! was given or a replacement; when any child of a node is replaced, the node
//! itself is re-created with the new children and linked back to the node it
//! came from through `original`.

use crate::parser::node::NodeData;
use crate::parser::{NodeArena, NodeIndex, node_flags};

/// A rewrite over one arena.
pub trait NodeVisitor {
    fn arena(&mut self) -> &mut NodeArena;

    /// Visit `node` and return it or its replacement.
    fn visit_node(&mut self, node: NodeIndex) -> NodeIndex;
}

/// Visit every child of `node` in source order. Returns `node` unchanged when
/// no child was replaced.
pub fn visit_each_child<V: NodeVisitor + ?Sized>(visitor: &mut V, node: NodeIndex) -> NodeIndex {
    let Some(data) = visitor.arena().node_data(node).cloned() else {
        return node;
    };
    let mut changed = false;
    let updated = data.map_children(&mut |child| {
        let visited = visitor.visit_node(child);
        if visited != child {
            changed = true;
        }
        visited
    });
    if !changed {
        return node;
    }
    update_node(visitor.arena(), node, updated)
}

/// Create a copy of `original` with new data. The copy keeps the original's
/// kind, range and parent, and is marked synthesized.
pub fn update_node(arena: &mut NodeArena, original: NodeIndex, data: NodeData) -> NodeIndex {
    let Some(&header) = arena.get(original) else {
        return original;
    };
    let node = arena.create_node(
        header.kind,
        header.flags | node_flags::SYNTHESIZED,
        header.pos,
        header.end,
        data,
    );
    arena.set_original(node, original);
    let parent = arena.parent_of(original);
    arena.set_parent_of(node, parent);
    node
}
