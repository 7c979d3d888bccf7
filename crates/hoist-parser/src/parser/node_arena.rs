//! NodeArena creation methods.
//!
//! The parser builds bottom-up: children exist before their parent, and
//! `add_node` points every child at the new parent. Factory code uses
//! `create_node`, which leaves the children's parent pointers alone so that
//! original parents stay observable after a rewrite.

use super::base::NodeIndex;
use super::node::*;

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        NodeArena {
            nodes: Vec::with_capacity(safe_capacity),
            extended_info: Vec::with_capacity(safe_capacity),
            data: Vec::with_capacity(safe_capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node allocated at or after `len`. Used to discard nodes
    /// built during a failed speculative parse.
    pub(crate) fn truncate(&mut self, len: usize, data_len: usize) {
        self.nodes.truncate(len);
        self.extended_info.truncate(len);
        self.data.truncate(data_len);
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(info) = self.get_extended_mut(child) {
            info.parent = parent;
        }
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    fn push_node(&mut self, kind: u16, flags: u16, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        let data_index = self.data.len() as u32;
        self.data.push(data);
        let index = self.nodes.len() as u32;
        let mut node = Node::new(kind, pos, end, data_index);
        node.flags = flags;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    /// Add a parsed node and adopt its children.
    pub fn add_node(&mut self, kind: u16, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        self.add_node_with_flags(kind, 0, pos, end, data)
    }

    pub fn add_node_with_flags(
        &mut self,
        kind: u16,
        flags: u16,
        pos: u32,
        end: u32,
        data: NodeData,
    ) -> NodeIndex {
        let mut children = Vec::new();
        data.for_each_child(&mut |child| children.push(child));
        let parent = self.push_node(kind, flags, pos, end, data);
        for child in children {
            self.set_parent(child, parent);
        }
        parent
    }

    /// Add a token or keyword node (`this`, `null`, `export`, ...).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(kind, 0, pos, end, NodeData::Token)
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, text: &str) -> NodeIndex {
        self.push_node(
            hoist_scanner::SyntaxKind::Identifier as u16,
            0,
            pos,
            end,
            NodeData::Identifier(IdentifierData {
                escaped_text: text.to_string(),
            }),
        )
    }

    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, text: &str) -> NodeIndex {
        self.push_node(
            kind,
            0,
            pos,
            end,
            NodeData::Literal(LiteralData {
                text: text.to_string(),
            }),
        )
    }

    /// Add a node without adopting its children.
    pub fn create_node(
        &mut self,
        kind: u16,
        flags: u16,
        pos: u32,
        end: u32,
        data: NodeData,
    ) -> NodeIndex {
        self.push_node(kind, flags, pos, end, data)
    }

    /// Record that `node` was produced from `original`.
    pub fn set_original(&mut self, node: NodeIndex, original: NodeIndex) {
        if let Some(info) = self.get_extended_mut(node) {
            info.original = original;
        }
    }

    pub fn set_parent_of(&mut self, node: NodeIndex, parent: NodeIndex) {
        self.set_parent(node, parent);
    }
}
