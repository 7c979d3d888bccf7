//! Expression evaluation tests.

use hoist_metadata::evaluator::Evaluator;
use hoist_metadata::schema::MetadataSymbolic;
use hoist_metadata::{CollectorOptions, MetadataValue, is_lowered_symbol};
use hoist_parser::{NodeIndex, SourceFile};

fn parse(text: &str) -> SourceFile {
    let source = SourceFile::parse("test.ts", text);
    assert!(
        source.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        source.diagnostics
    );
    source
}

/// Initializer of the first declaration in the last statement.
fn last_initializer(source: &SourceFile) -> NodeIndex {
    let arena = &source.arena;
    let statement = *source.statements().last().expect("statement");
    let variable = arena
        .get(statement)
        .and_then(|node| arena.get_variable(node))
        .expect("variable statement");
    let list = arena
        .get(variable.declaration_list)
        .and_then(|node| arena.get_variable_declaration_list(node))
        .expect("declaration list");
    let declaration = list.declarations.iter().next().expect("declaration");
    arena
        .get(declaration)
        .and_then(|node| arena.get_variable_declaration(node))
        .expect("declaration")
        .initializer
}

fn evaluate_with(text: &str, options: &CollectorOptions) -> MetadataValue {
    let source = parse(text);
    let initializer = last_initializer(&source);
    let mut evaluator = Evaluator::new(&source, options, None);
    evaluator.evaluate_node(initializer)
}

fn evaluate(text: &str) -> MetadataValue {
    evaluate_with(text, &CollectorOptions::default())
}

fn number(value: f64) -> MetadataValue {
    MetadataValue::Number(value)
}

fn string(value: &str) -> MetadataValue {
    MetadataValue::String(value.to_string())
}

#[test]
fn folds_constant_expressions() {
    assert_eq!(evaluate("const x = 1 + 2 * 3;"), number(7.0));
    assert_eq!(evaluate("const x = 'a' + 'b';"), string("ab"));
    assert_eq!(evaluate("const x = !true;"), MetadataValue::Bool(false));
    assert_eq!(evaluate("const x = -(4);"), number(-4.0));
    assert_eq!(evaluate("const x = true ? 'yes' : 'no';"), string("yes"));
    assert_eq!(evaluate("const x = 'abc'.length;"), number(3.0));
    assert_eq!(evaluate("const x = [10, 20][1];"), number(20.0));
}

#[test]
fn folds_array_spread_and_concat() {
    assert_eq!(
        evaluate("const x = [1, ...[2, 3]];"),
        MetadataValue::Array(vec![number(1.0), number(2.0), number(3.0)])
    );
    assert_eq!(
        evaluate("const x = [1].concat([2, 3]);"),
        MetadataValue::Array(vec![number(1.0), number(2.0), number(3.0)])
    );
}

#[test]
fn references_imported_and_global_symbols() {
    let value = evaluate("import * as core from '@angular/core';\nconst x = core.Injectable;");
    let reference = value.as_reference().expect("reference");
    assert_eq!(reference.module.as_deref(), Some("@angular/core"));
    assert_eq!(reference.name.as_deref(), Some("Injectable"));

    assert_eq!(evaluate("const x = Unknown;"), MetadataValue::global_reference("Unknown"));
}

#[test]
fn records_calls_and_constructions_symbolically() {
    let value = evaluate("const x = factory(1, 'a');");
    let Some(MetadataSymbolic::Call(call)) = value.as_symbolic() else {
        panic!("expected call, got {value:?}");
    };
    assert_eq!(call.expression, MetadataValue::global_reference("factory"));
    assert_eq!(call.arguments, Some(vec![number(1.0), string("a")]));

    let value = evaluate("const x = new Thing();");
    let Some(MetadataSymbolic::New(construction)) = value.as_symbolic() else {
        panic!("expected new, got {value:?}");
    };
    assert!(construction.arguments.is_none());

    let value = evaluate("const x = a.b;");
    let Some(MetadataSymbolic::Select(select)) = value.as_symbolic() else {
        panic!("expected select, got {value:?}");
    };
    assert_eq!(select.member, "b");
}

#[test]
fn forward_ref_unwraps_its_lambda() {
    assert_eq!(
        evaluate("const x = forwardRef(() => Target);"),
        MetadataValue::global_reference("Target")
    );
}

#[test]
fn lambdas_are_errors() {
    let value = evaluate("const x = () => 1;");
    let error = value.as_error().expect("error");
    assert_eq!(error.message, "Lambda not supported");
    assert_eq!(error.line, Some(0));
    assert_eq!(error.character, Some(10));
}

#[test]
fn quoted_names_are_recorded_when_requested() {
    let options = CollectorOptions {
        quoted_names: true,
        ..CollectorOptions::default()
    };
    let MetadataValue::Object(object) = evaluate_with("const x = { 'a-b': 1, c: 2 };", &options) else {
        panic!("expected object");
    };
    assert_eq!(object["a-b"], number(1.0));
    assert_eq!(object["$quoted$"], MetadataValue::Array(vec![string("a-b")]));

    let MetadataValue::Object(object) = evaluate("const x = { 'a-b': 1 };") else {
        panic!("expected object");
    };
    assert!(!object.contains_key("$quoted$"));
}

#[test]
fn substitution_replacements_are_recorded_as_exports() {
    let source = parse("const x = { useFactory: () => 1 };");
    let initializer = last_initializer(&source);
    let options = CollectorOptions::default();
    let mut next = 0;
    let mut substitution = |value: MetadataValue, _node: NodeIndex| {
        if value.is_error() {
            let name = format!("ɵ{next}");
            next += 1;
            MetadataValue::global_reference(name)
        } else {
            value
        }
    };
    let mut evaluator = Evaluator::new(&source, &options, Some(&mut substitution));

    let MetadataValue::Object(object) = evaluator.evaluate_node(initializer) else {
        panic!("expected object");
    };
    let reference = object["useFactory"].as_reference().expect("reference");
    let name = reference.name.clone().expect("name");
    assert!(is_lowered_symbol(&name));

    let recorded = evaluator.take_recorded_exports();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, name);
    assert_eq!(
        recorded[0].1.as_error().map(|error| error.message.as_str()),
        Some("Lambda not supported")
    );
    assert!(evaluator.take_recorded_exports().is_empty());
}
