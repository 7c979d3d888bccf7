//! Tests for statement, expression and type parsing.

use hoist_parser::parser::node::NodeData;
use hoist_parser::{NodeIndex, SourceFile, modifier_flags, node_flags, syntax_kind_ext};
use hoist_scanner::SyntaxKind;

fn parse(text: &str) -> SourceFile {
    SourceFile::parse("test.ts", text)
}

fn kind(source: &SourceFile, node: NodeIndex) -> u16 {
    source.arena.kind_of(node).unwrap()
}

/// The single declaration of a variable statement.
fn only_declaration(source: &SourceFile, statement: NodeIndex) -> NodeIndex {
    let arena = &source.arena;
    let variable = arena.get_variable(arena.get(statement).unwrap()).unwrap();
    let list = arena
        .get_variable_declaration_list(arena.get(variable.declaration_list).unwrap())
        .unwrap();
    assert_eq!(list.declarations.len(), 1);
    list.declarations.nodes[0]
}

fn initializer_of(source: &SourceFile, statement: NodeIndex) -> NodeIndex {
    let declaration = only_declaration(source, statement);
    let arena = &source.arena;
    arena
        .get_variable_declaration(arena.get(declaration).unwrap())
        .unwrap()
        .initializer
}

#[test]
fn parse_routes_with_lazy_import() {
    let source = parse(
        "export const routes = [{path: 'a', loadChildren: () => import('./m').then(m => m.M)}];",
    );
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    assert_eq!(source.statements().len(), 1);

    let statement = source.statements()[0];
    assert_eq!(kind(&source, statement), syntax_kind_ext::VARIABLE_STATEMENT);
    assert!(source.arena.has_modifier(statement, modifier_flags::EXPORT));

    let arena = &source.arena;
    let variable = arena.get_variable(arena.get(statement).unwrap()).unwrap();
    let list_node = arena.get(variable.declaration_list).unwrap();
    assert_eq!(list_node.flags & node_flags::CONST, node_flags::CONST);

    let array = initializer_of(&source, statement);
    assert_eq!(kind(&source, array), syntax_kind_ext::ARRAY_LITERAL_EXPRESSION);
    let elements = &arena.get_literal_expr(arena.get(array).unwrap()).unwrap().elements;
    let object = elements.nodes[0];
    assert_eq!(kind(&source, object), syntax_kind_ext::OBJECT_LITERAL_EXPRESSION);

    let properties = &arena.get_literal_expr(arena.get(object).unwrap()).unwrap().elements;
    assert_eq!(properties.len(), 2);
    let load_children = arena
        .get_property_assignment(arena.get(properties.nodes[1]).unwrap())
        .unwrap();
    assert_eq!(arena.get_identifier_text(load_children.name), Some("loadChildren"));
    assert_eq!(kind(&source, load_children.initializer), syntax_kind_ext::ARROW_FUNCTION);

    let arrow = arena.get_function(arena.get(load_children.initializer).unwrap()).unwrap();
    assert!(arrow.parameters.is_empty());
    assert_eq!(kind(&source, arrow.body), syntax_kind_ext::CALL_EXPRESSION);
}

#[test]
fn parse_nodes_record_source_ranges() {
    let text = "const a = {x: 1};";
    let source = parse(text);
    let object = initializer_of(&source, source.statements()[0]);
    assert_eq!(source.node_text(object), "{x: 1}");
    assert_eq!(source.node_text(source.statements()[0]), text);
}

#[test]
fn parse_parent_links_reach_the_statement() {
    let source = parse("let a = [1, 2];");
    let statement = source.statements()[0];
    let declaration = only_declaration(&source, statement);
    let array = initializer_of(&source, statement);
    let arena = &source.arena;
    assert_eq!(arena.parent_of(array), declaration);
    let list = arena.parent_of(declaration);
    assert_eq!(kind(&source, list), syntax_kind_ext::VARIABLE_DECLARATION_LIST);
    assert_eq!(arena.parent_of(list), statement);
    assert_eq!(arena.parent_of(statement), source.root);
}

#[test]
fn parse_decorated_class_members() {
    let source = parse(
        "@Component({selector: 'app', providers: [{provide: A, useValue: {}}]})
export class AppComponent extends Base<T> implements OnInit {
  static ngAcceptInputType_x: boolean;
  @Input() name: string;
  constructor(@Inject(TOKEN) private readonly svc: Service) {}
  get value(): number { return 1; }
  method(a: number): void {}
}",
    );
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let class_node = source.statements()[0];
    let arena = &source.arena;
    assert_eq!(kind(&source, class_node), syntax_kind_ext::CLASS_DECLARATION);
    assert!(arena.has_modifier(class_node, modifier_flags::EXPORT));
    assert_eq!(arena.decorators_of(class_node).len(), 1);

    let class = arena.get_class(arena.get(class_node).unwrap()).unwrap();
    assert_eq!(arena.get_identifier_text(class.name), Some("AppComponent"));
    assert_eq!(class.heritage_clauses.as_ref().map(|c| c.len()), Some(2));

    let member_kinds: Vec<u16> = class.members.iter().map(|m| kind(&source, m)).collect();
    assert_eq!(
        member_kinds,
        vec![
            syntax_kind_ext::PROPERTY_DECLARATION,
            syntax_kind_ext::PROPERTY_DECLARATION,
            syntax_kind_ext::CONSTRUCTOR,
            syntax_kind_ext::GET_ACCESSOR,
            syntax_kind_ext::METHOD_DECLARATION,
        ]
    );
    assert!(arena.has_modifier(class.members.nodes[0], modifier_flags::STATIC));
    assert_eq!(arena.decorators_of(class.members.nodes[1]).len(), 1);

    let constructor = arena
        .get_constructor(arena.get(class.members.nodes[2]).unwrap())
        .unwrap();
    let parameter = constructor.parameters.nodes[0];
    assert_eq!(arena.decorators_of(parameter).len(), 1);
    let flags = arena.get_effective_modifier_flags(parameter);
    assert_ne!(flags & modifier_flags::PRIVATE, 0);
    assert_ne!(flags & modifier_flags::READONLY, 0);
}

#[test]
fn parse_modifier_keyword_as_member_name() {
    let source = parse("class A { static: number; readonly = 1; }");
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let arena = &source.arena;
    let class = arena
        .get_class(arena.get(source.statements()[0]).unwrap())
        .unwrap();
    assert_eq!(class.members.len(), 2);
    for member in class.members.iter() {
        assert_eq!(arena.get_effective_modifier_flags(member), modifier_flags::NONE);
    }
    assert_eq!(arena.get_identifier_text(arena.get_declaration_name(class.members.nodes[0])), Some("static"));
}

#[test]
fn parse_import_forms() {
    let source = parse(
        "import {A, B as C} from './a';
import * as ns from 'ns';
import D, {E} from 'd';
import './side-effect';",
    );
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    assert_eq!(source.statements().len(), 4);
    let arena = &source.arena;

    let first = arena
        .get_import_decl(arena.get(source.statements()[0]).unwrap())
        .unwrap();
    assert_eq!(arena.get_literal_text(first.module_specifier), Some("./a"));
    let clause = arena.get_import_clause(arena.get(first.import_clause).unwrap()).unwrap();
    assert!(clause.name.is_none());
    let named = arena.get_named_imports(arena.get(clause.named_bindings).unwrap()).unwrap();
    let renamed = arena.get_specifier(arena.get(named.elements.nodes[1]).unwrap()).unwrap();
    assert_eq!(arena.get_identifier_text(renamed.property_name), Some("B"));
    assert_eq!(arena.get_identifier_text(renamed.name), Some("C"));

    let second = arena
        .get_import_decl(arena.get(source.statements()[1]).unwrap())
        .unwrap();
    let clause = arena.get_import_clause(arena.get(second.import_clause).unwrap()).unwrap();
    assert_eq!(kind(&source, clause.named_bindings), syntax_kind_ext::NAMESPACE_IMPORT);

    let third = arena
        .get_import_decl(arena.get(source.statements()[2]).unwrap())
        .unwrap();
    let clause = arena.get_import_clause(arena.get(third.import_clause).unwrap()).unwrap();
    assert_eq!(arena.get_identifier_text(clause.name), Some("D"));
    assert_eq!(kind(&source, clause.named_bindings), syntax_kind_ext::NAMED_IMPORTS);

    let fourth = arena
        .get_import_decl(arena.get(source.statements()[3]).unwrap())
        .unwrap();
    assert!(fourth.import_clause.is_none());
    assert!(source.is_external_module());
}

#[test]
fn parse_export_forms() {
    let source = parse(
        "export {a as b};
export * from './x';
export {c} from './y';
export default 1;
export function f() { return 1; }",
    );
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let kinds: Vec<u16> = source.statements().iter().map(|&s| kind(&source, s)).collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::EXPORT_DECLARATION,
            syntax_kind_ext::EXPORT_DECLARATION,
            syntax_kind_ext::EXPORT_DECLARATION,
            syntax_kind_ext::EXPORT_ASSIGNMENT,
            syntax_kind_ext::FUNCTION_DECLARATION,
        ]
    );
    let arena = &source.arena;
    let star = arena
        .get_export_decl(arena.get(source.statements()[1]).unwrap())
        .unwrap();
    assert!(star.export_clause.is_none());
    assert_eq!(arena.get_literal_text(star.module_specifier), Some("./x"));

    let local = arena
        .get_export_decl(arena.get(source.statements()[0]).unwrap())
        .unwrap();
    assert!(local.module_specifier.is_none());
}

#[test]
fn parse_binary_precedence() {
    let source = parse("const x = 1 + 2 * 3;");
    let arena = &source.arena;
    let sum = initializer_of(&source, source.statements()[0]);
    let binary = arena.get_binary_expr(arena.get(sum).unwrap()).unwrap();
    assert_eq!(binary.operator_token, SyntaxKind::PlusToken as u16);
    let product = arena.get_binary_expr(arena.get(binary.right).unwrap()).unwrap();
    assert_eq!(product.operator_token, SyntaxKind::AsteriskToken as u16);
}

#[test]
fn parse_shift_operators_after_rescan() {
    let source = parse("const y = a >> 2 >= b;");
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let arena = &source.arena;
    let comparison = initializer_of(&source, source.statements()[0]);
    let binary = arena.get_binary_expr(arena.get(comparison).unwrap()).unwrap();
    assert_eq!(binary.operator_token, SyntaxKind::GreaterThanEqualsToken as u16);
    let shift = arena.get_binary_expr(arena.get(binary.left).unwrap()).unwrap();
    assert_eq!(shift.operator_token, SyntaxKind::GreaterThanGreaterThanToken as u16);
}

#[test]
fn parse_parenthesized_expression_is_not_an_arrow() {
    let source = parse("const f = (a: number, b = 2) => a + b;\nconst g = (1 + 2);\nconst h = c ? (d) : e;");
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let statements = source.statements();
    assert_eq!(
        kind(&source, initializer_of(&source, statements[0])),
        syntax_kind_ext::ARROW_FUNCTION
    );
    assert_eq!(
        kind(&source, initializer_of(&source, statements[1])),
        syntax_kind_ext::PARENTHESIZED_EXPRESSION
    );
    assert_eq!(
        kind(&source, initializer_of(&source, statements[2])),
        syntax_kind_ext::CONDITIONAL_EXPRESSION
    );
}

#[test]
fn parse_generic_call_and_new() {
    let source = parse("const a = make<Foo>(1);\nconst b = new Map<string, number>();\nconst c = x < y;");
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let statements = source.statements();
    let arena = &source.arena;
    let call = initializer_of(&source, statements[0]);
    assert_eq!(kind(&source, call), syntax_kind_ext::CALL_EXPRESSION);
    let data = arena.get_call_expr(arena.get(call).unwrap()).unwrap();
    assert_eq!(data.type_arguments.as_ref().map(|t| t.len()), Some(1));

    let new = initializer_of(&source, statements[1]);
    assert_eq!(kind(&source, new), syntax_kind_ext::NEW_EXPRESSION);

    let comparison = initializer_of(&source, statements[2]);
    assert_eq!(kind(&source, comparison), syntax_kind_ext::BINARY_EXPRESSION);
}

#[test]
fn parse_enum_interface_and_type_alias() {
    let source = parse(
        "export enum E { A, B = 5, C }
export interface I { a: string; m(x: number): void }
export type T = A | B[] | {x: number};",
    );
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let arena = &source.arena;
    let statements = source.statements();
    let enum_data = arena.get_enum(arena.get(statements[0]).unwrap()).unwrap();
    assert_eq!(enum_data.members.len(), 3);

    let interface = arena.get_interface(arena.get(statements[1]).unwrap()).unwrap();
    let member_kinds: Vec<u16> = interface.members.iter().map(|m| kind(&source, m)).collect();
    assert_eq!(
        member_kinds,
        vec![syntax_kind_ext::PROPERTY_SIGNATURE, syntax_kind_ext::METHOD_SIGNATURE]
    );

    let alias = arena.get_type_alias(arena.get(statements[2]).unwrap()).unwrap();
    assert_eq!(kind(&source, alias.type_node), syntax_kind_ext::UNION_TYPE);
    let union = arena.get_composite_type(arena.get(alias.type_node).unwrap()).unwrap();
    let kinds: Vec<u16> = union.types.iter().map(|t| kind(&source, t)).collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::TYPE_REFERENCE,
            syntax_kind_ext::ARRAY_TYPE,
            syntax_kind_ext::TYPE_LITERAL,
        ]
    );
}

#[test]
fn parse_destructuring_declaration() {
    let source = parse("export const {a, b: c} = obj;");
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let declaration = only_declaration(&source, source.statements()[0]);
    let arena = &source.arena;
    let name = arena
        .get_variable_declaration(arena.get(declaration).unwrap())
        .unwrap()
        .name;
    assert_eq!(kind(&source, name), syntax_kind_ext::OBJECT_BINDING_PATTERN);
    let pattern = arena.get_binding_pattern(arena.get(name).unwrap()).unwrap();
    assert_eq!(pattern.elements.len(), 2);
    let renamed = arena
        .get_binding_element(arena.get(pattern.elements.nodes[1]).unwrap())
        .unwrap();
    assert_eq!(arena.get_identifier_text(renamed.property_name), Some("b"));
    assert_eq!(arena.get_identifier_text(renamed.name), Some("c"));
    assert_ne!(
        arena.get_combined_modifier_flags(pattern.elements.nodes[0]) & modifier_flags::EXPORT,
        0
    );
}

#[test]
fn parse_object_literal_element_forms() {
    let source = parse("const o = {a, ...b, 'c': 1, [d]: 2, m() { return 3; }, get g() { return 4; }};");
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let arena = &source.arena;
    let object = initializer_of(&source, source.statements()[0]);
    let elements = &arena.get_literal_expr(arena.get(object).unwrap()).unwrap().elements;
    let kinds: Vec<u16> = elements.iter().map(|e| kind(&source, e)).collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
            syntax_kind_ext::SPREAD_ASSIGNMENT,
            syntax_kind_ext::PROPERTY_ASSIGNMENT,
            syntax_kind_ext::PROPERTY_ASSIGNMENT,
            syntax_kind_ext::METHOD_DECLARATION,
            syntax_kind_ext::GET_ACCESSOR,
        ]
    );
    let computed = arena
        .get_property_assignment(arena.get(elements.nodes[3]).unwrap())
        .unwrap();
    assert_eq!(kind(&source, computed.name), syntax_kind_ext::COMPUTED_PROPERTY_NAME);
}

#[test]
fn parse_unsupported_statement_recovers() {
    let source = parse("for (;;) { x(); }\nconst ok = 1;");
    assert_eq!(source.diagnostics.len(), 1);
    assert_eq!(source.diagnostics[0].message, "Unsupported statement.");
    assert_eq!(source.statements().len(), 1);
    assert_eq!(
        kind(&source, source.statements()[0]),
        syntax_kind_ext::VARIABLE_STATEMENT
    );
}

#[test]
fn parse_template_substitution_reports_diagnostic() {
    let source = parse("const t = `a${b}c`;\nconst ok = 1;");
    assert!(
        source
            .diagnostics
            .iter()
            .any(|d| d.message.contains("substitutions"))
    );
    assert_eq!(source.statements().len(), 2);
}

#[test]
fn parse_malformed_input_makes_progress() {
    let source = parse("const = ;\n)))\nexport class {");
    assert!(!source.diagnostics.is_empty());
    let root = source.arena.get(source.root).unwrap();
    assert_eq!(root.kind, syntax_kind_ext::SOURCE_FILE);
}

#[test]
fn parse_declaration_file_flag() {
    let source = SourceFile::parse("lib.d.ts", "export declare const x: number;");
    assert!(source.is_declaration_file);
    assert!(source.diagnostics.is_empty(), "{:?}", source.diagnostics);
    let statement = source.statements()[0];
    let flags = source.arena.get_effective_modifier_flags(statement);
    assert_ne!(flags & modifier_flags::AMBIENT, 0);
    assert_ne!(flags & modifier_flags::EXPORT, 0);
}

#[test]
fn parse_optional_chain_sets_flag() {
    let source = parse("const v = a?.b;");
    let access = initializer_of(&source, source.statements()[0]);
    let node = source.arena.get(access).unwrap();
    assert_eq!(node.kind, syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION);
    assert_ne!(node.flags & node_flags::OPTIONAL_CHAIN, 0);
    assert!(matches!(
        source.arena.node_data(access),
        Some(NodeData::AccessExpr(data)) if data.question_dot_token
    ));
}
