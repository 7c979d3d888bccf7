//! NodeArena access methods and the NodeAccess trait.
//!
//! Query helpers shared by the metadata collector, the lowering passes and the
//! printer: parent/original links, identifier text, and modifier flags.

use super::base::{NodeIndex, NodeList, UNSET_POS};
use super::flags::{modifier_flags, node_flags, syntax_kind_ext};
use super::node::*;
use hoist_scanner::SyntaxKind;

impl NodeArena {
    /// Get a node header by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended_mut(&mut self, index: NodeIndex) -> Option<&mut ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get_mut(index.0 as usize)
        }
    }

    /// Get the typed payload of a node.
    #[inline]
    pub fn node_data(&self, index: NodeIndex) -> Option<&NodeData> {
        let node = self.get(index)?;
        self.data.get(node.data_index as usize)
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|node| node.kind)
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: u16) -> bool {
        self.kind_of(index) == Some(kind)
    }

    /// Parent pointer set by the parser. `NONE` for roots and for nodes
    /// created by the factory.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// Follow `original` links back to the node the parser produced.
    pub fn get_original_node(&self, index: NodeIndex) -> NodeIndex {
        let mut current = index;
        while let Some(info) = self.get_extended(current) {
            if info.original.is_none() {
                break;
            }
            current = info.original;
        }
        current
    }

    /// True for nodes created by the factory or updated by a rewrite.
    pub fn is_synthesized(&self, index: NodeIndex) -> bool {
        self.get(index)
            .is_some_and(|node| node.flags & node_flags::SYNTHESIZED != 0)
    }

    /// True for nodes with no source range.
    pub fn has_unset_pos(&self, index: NodeIndex) -> bool {
        self.get(index).is_some_and(|node| node.pos == UNSET_POS)
    }

    /// Identifier text, if `index` is an identifier.
    pub fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node)
            .map(|data| data.escaped_text.as_str())
    }

    /// Literal text, if `index` is a string, numeric or template literal.
    pub fn get_literal_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_literal(node).map(|data| data.text.as_str())
    }

    /// Text of a property or declaration name: identifiers and literals.
    pub fn get_name_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_identifier_text(index)
            .or_else(|| self.get_literal_text(index))
    }

    /// Declared name of a declaration node, if it has a plain identifier name.
    pub fn get_declaration_name(&self, index: NodeIndex) -> NodeIndex {
        let Some(data) = self.node_data(index) else {
            return NodeIndex::NONE;
        };
        match data {
            NodeData::Function(d) => d.name,
            NodeData::Class(d) => d.name,
            NodeData::Interface(d) => d.name,
            NodeData::TypeAlias(d) => d.name,
            NodeData::Enum(d) => d.name,
            NodeData::VariableDeclaration(d) => d.name,
            NodeData::PropertyDecl(d) => d.name,
            NodeData::MethodDecl(d) => d.name,
            NodeData::Accessor(d) => d.name,
            NodeData::Parameter(d) => d.name,
            _ => NodeIndex::NONE,
        }
    }

    /// Modifier list (decorators and keywords) of a declaration.
    pub fn modifiers_of(&self, index: NodeIndex) -> Option<&NodeList> {
        match self.node_data(index)? {
            NodeData::Parameter(d) => d.modifiers.as_ref(),
            NodeData::Signature(d) => d.modifiers.as_ref(),
            NodeData::PropertyDecl(d) => d.modifiers.as_ref(),
            NodeData::MethodDecl(d) => d.modifiers.as_ref(),
            NodeData::Constructor(d) => d.modifiers.as_ref(),
            NodeData::Accessor(d) => d.modifiers.as_ref(),
            NodeData::Function(d) => d.modifiers.as_ref(),
            NodeData::Class(d) => d.modifiers.as_ref(),
            NodeData::Interface(d) => d.modifiers.as_ref(),
            NodeData::TypeAlias(d) => d.modifiers.as_ref(),
            NodeData::Enum(d) => d.modifiers.as_ref(),
            NodeData::Variable(d) => d.modifiers.as_ref(),
            NodeData::ImportDecl(d) => d.modifiers.as_ref(),
            NodeData::ExportDecl(d) => d.modifiers.as_ref(),
            NodeData::ExportAssignment(d) => d.modifiers.as_ref(),
            _ => None,
        }
    }

    /// Decorator nodes of a declaration, in source order.
    pub fn decorators_of(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.modifiers_of(index)
            .map(|modifiers| {
                modifiers
                    .iter()
                    .filter(|&m| self.is_kind(m, syntax_kind_ext::DECORATOR))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Modifier flags from an explicit modifier list.
    pub fn get_modifier_flags(&self, modifiers: Option<&NodeList>) -> u32 {
        let Some(modifiers) = modifiers else {
            return modifier_flags::NONE;
        };
        modifiers.iter().fold(modifier_flags::NONE, |flags, modifier| {
            flags | self.kind_of(modifier).map_or(0, modifier_to_flag)
        })
    }

    /// Modifier flags of a single node (no parent contribution).
    pub fn get_effective_modifier_flags(&self, index: NodeIndex) -> u32 {
        self.get_modifier_flags(self.modifiers_of(index))
    }

    /// Modifier flags of a node combined with its enclosing declaration list
    /// and variable statement. Binding elements take the flags of their
    /// declaration.
    pub fn get_combined_modifier_flags(&self, index: NodeIndex) -> u32 {
        let mut node = index;
        while self.is_kind(node, syntax_kind_ext::BINDING_ELEMENT)
            || self.is_kind(node, syntax_kind_ext::OBJECT_BINDING_PATTERN)
            || self.is_kind(node, syntax_kind_ext::ARRAY_BINDING_PATTERN)
        {
            node = self.parent_of(node);
        }
        let mut flags = self.get_effective_modifier_flags(node);
        if self.is_kind(node, syntax_kind_ext::VARIABLE_DECLARATION) {
            node = self.parent_of(node);
        }
        if self.is_kind(node, syntax_kind_ext::VARIABLE_DECLARATION_LIST) {
            flags |= self.get_effective_modifier_flags(node);
            node = self.parent_of(node);
        }
        if self.is_kind(node, syntax_kind_ext::VARIABLE_STATEMENT) {
            flags |= self.get_effective_modifier_flags(node);
        }
        flags
    }

    pub fn has_modifier(&self, index: NodeIndex, flag: u32) -> bool {
        self.get_effective_modifier_flags(index) & flag != 0
    }
}

/// Map a modifier node kind to its flag bit.
pub fn modifier_to_flag(kind: u16) -> u32 {
    if kind == syntax_kind_ext::DECORATOR {
        return modifier_flags::DECORATOR;
    }
    match SyntaxKind::from_u16(kind) {
        Some(SyntaxKind::ExportKeyword) => modifier_flags::EXPORT,
        Some(SyntaxKind::DeclareKeyword) => modifier_flags::AMBIENT,
        Some(SyntaxKind::DefaultKeyword) => modifier_flags::DEFAULT,
        Some(SyntaxKind::ConstKeyword) => modifier_flags::CONST,
        Some(SyntaxKind::PublicKeyword) => modifier_flags::PUBLIC,
        Some(SyntaxKind::PrivateKeyword) => modifier_flags::PRIVATE,
        Some(SyntaxKind::ProtectedKeyword) => modifier_flags::PROTECTED,
        Some(SyntaxKind::StaticKeyword) => modifier_flags::STATIC,
        Some(SyntaxKind::ReadonlyKeyword) => modifier_flags::READONLY,
        Some(SyntaxKind::AbstractKeyword) => modifier_flags::ABSTRACT,
        Some(SyntaxKind::AsyncKeyword) => modifier_flags::ASYNC,
        Some(SyntaxKind::OverrideKeyword) => modifier_flags::OVERRIDE,
        _ => modifier_flags::NONE,
    }
}

/// Read-only tree access used by traversals.
pub trait NodeAccess {
    /// Get the syntax kind of a node
    fn kind(&self, index: NodeIndex) -> Option<u16>;

    /// Get the source position range
    fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)>;

    /// Check if a node exists
    fn exists(&self, index: NodeIndex) -> bool {
        !index.is_none() && self.kind(index).is_some()
    }

    /// Get children of a node in source order
    fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex>;
}

impl NodeAccess for NodeArena {
    fn kind(&self, index: NodeIndex) -> Option<u16> {
        self.kind_of(index)
    }

    fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)> {
        self.get(index).map(|node| (node.pos, node.end))
    }

    fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = Vec::new();
        if let Some(data) = self.node_data(index) {
            data.for_each_child(&mut |child| children.push(child));
        }
        children
    }
}
