//! Tests for the node factory and copy-on-write visiting.

use hoist_parser::parser::UNSET_POS;
use hoist_parser::syntax::factory;
use hoist_parser::syntax::visitor::{NodeVisitor, visit_each_child};
use hoist_parser::{NodeArena, NodeIndex, SourceFile, node_flags, syntax_kind_ext};
use hoist_scanner::SyntaxKind;

/// Replaces every identifier named `from` with a fresh identifier `to`.
struct Rename<'a> {
    arena: &'a mut NodeArena,
    from: &'static str,
    to: &'static str,
}

impl NodeVisitor for Rename<'_> {
    fn arena(&mut self) -> &mut NodeArena {
        self.arena
    }

    fn visit_node(&mut self, node: NodeIndex) -> NodeIndex {
        if self.arena.get_identifier_text(node) == Some(self.from) {
            return factory::create_identifier(self.arena, self.to);
        }
        visit_each_child(self, node)
    }
}

#[test]
fn factory_nodes_are_synthesized_without_range() {
    let mut arena = NodeArena::new();
    let name = factory::create_identifier(&mut arena, "ɵ0");
    let node = arena.get(name).unwrap();
    assert_eq!(node.pos, UNSET_POS);
    assert_eq!(node.end, UNSET_POS);
    assert_ne!(node.flags & node_flags::SYNTHESIZED, 0);
    assert!(arena.has_unset_pos(name));
    assert_eq!(arena.get_identifier_text(name), Some("ɵ0"));
}

#[test]
fn factory_variable_statement_keeps_const_flag() {
    let mut arena = NodeArena::new();
    let name = factory::create_identifier(&mut arena, "ɵ0");
    let value = factory::create_identifier(&mut arena, "x");
    let declaration = factory::create_variable_declaration(&mut arena, name, value);
    let list = factory::create_variable_declaration_list(
        &mut arena,
        vec![declaration],
        node_flags::CONST,
    );
    let statement = factory::create_variable_statement(&mut arena, None, list);

    assert_eq!(arena.kind_of(statement), Some(syntax_kind_ext::VARIABLE_STATEMENT));
    let list_node = arena.get(list).unwrap();
    assert_eq!(list_node.flags & node_flags::BLOCK_SCOPED, node_flags::CONST);
    // Factory nodes do not adopt their children.
    assert!(arena.parent_of(declaration).is_none());
}

#[test]
fn factory_export_specifier_with_alias() {
    let mut arena = NodeArena::new();
    let specifier = factory::create_export_specifier(&mut arena, Some("x"), "ɵ1");
    let data = arena.get_specifier(arena.get(specifier).unwrap()).unwrap();
    assert_eq!(arena.get_identifier_text(data.property_name), Some("x"));
    assert_eq!(arena.get_identifier_text(data.name), Some("ɵ1"));

    let plain = factory::create_export_specifier(&mut arena, None, "ɵ2");
    let data = arena.get_specifier(arena.get(plain).unwrap()).unwrap();
    assert!(data.property_name.is_none());

    let exports = factory::create_named_exports(&mut arena, vec![specifier, plain]);
    let declaration = factory::create_export_declaration(&mut arena, exports, NodeIndex::NONE);
    assert_eq!(arena.kind_of(declaration), Some(syntax_kind_ext::EXPORT_DECLARATION));

    let token = factory::create_token(&mut arena, SyntaxKind::ExportKeyword);
    assert_eq!(arena.kind_of(token), Some(SyntaxKind::ExportKeyword as u16));
}

#[test]
fn visit_each_child_rewrites_copy_on_write() {
    let mut source = SourceFile::parse("test.ts", "const y = [a, b];\nconst z = 1;");
    let original_root = source.root;
    let first = source.statements()[0];
    let second = source.statements()[1];

    let new_root = {
        let mut rename = Rename {
            arena: &mut source.arena,
            from: "a",
            to: "c",
        };
        visit_each_child(&mut rename, original_root)
    };

    assert_ne!(new_root, original_root);
    assert_eq!(source.arena.get_original_node(new_root), original_root);
    source.root = new_root;

    let statements = source.statements().to_vec();
    assert_ne!(statements[0], first, "the rewritten statement is a new node");
    assert_eq!(statements[1], second, "untouched statements are shared");
    assert_eq!(source.arena.get_original_node(statements[0]), first);
    assert!(source.arena.is_synthesized(statements[0]));

    // The updated statement keeps its source range and parent.
    let old = *source.arena.get(first).unwrap();
    let new = *source.arena.get(statements[0]).unwrap();
    assert_eq!((old.pos, old.end), (new.pos, new.end));
    assert_eq!(source.arena.parent_of(statements[0]), original_root);
}

#[test]
fn visit_each_child_without_changes_returns_same_node() {
    let mut source = SourceFile::parse("test.ts", "const y = [a, b];");
    let root = source.root;
    let len = source.arena.len();
    let mut rename = Rename {
        arena: &mut source.arena,
        from: "missing",
        to: "c",
    };
    assert_eq!(visit_each_child(&mut rename, root), root);
    assert_eq!(source.arena.len(), len);
}

#[test]
fn update_source_file_links_to_original() {
    let mut source = SourceFile::parse("test.ts", "const a = 1;");
    let root = source.root;
    let extra = factory::create_identifier(&mut source.arena, "unused");
    let statement = factory::create_variable_statement(&mut source.arena, None, extra);
    let mut statements = source.statements().to_vec();
    statements.push(statement);

    let updated = factory::update_source_file(&mut source.arena, root, statements);
    assert_eq!(source.arena.get_original_node(updated), root);
    assert_eq!(
        source.arena.kind_of(updated),
        Some(syntax_kind_ext::SOURCE_FILE)
    );
    source.root = updated;
    assert_eq!(source.statements().len(), 2);
}
