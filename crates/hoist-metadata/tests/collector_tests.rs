//! Module metadata collection tests.

use hoist_metadata::schema::{ExportedSymbol, MemberMetadata, MetadataSymbolic};
use hoist_metadata::{
    CollectorOptions, MetadataCollector, MetadataError, MetadataValue, ModuleMetadata,
};
use hoist_parser::SourceFile;

fn collect_with(text: &str, strict: bool) -> Result<Option<ModuleMetadata>, MetadataError> {
    let source = SourceFile::parse("test.ts", text);
    assert!(
        source.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        source.diagnostics
    );
    MetadataCollector::new(CollectorOptions::default()).get_metadata(&source, strict, None)
}

fn collect(text: &str) -> ModuleMetadata {
    collect_with(text, false)
        .expect("collection succeeds")
        .expect("module has metadata")
}

fn number(value: f64) -> MetadataValue {
    MetadataValue::Number(value)
}

#[test]
fn module_without_exports_has_no_metadata() {
    let result = collect_with("const a = 1;\nfunction f() { return a; }\n", false)
        .expect("collection succeeds");
    assert!(result.is_none());
}

#[test]
fn decorated_class_records_decorators_and_constructor_types() {
    let module = collect(
        "import { Injectable } from '@angular/core';\n\
         import { Service } from './service';\n\
         @Injectable()\n\
         export class Foo {\n\
         \x20   constructor(private service: Service, name: string, untyped) { }\n\
         }\n",
    );
    assert_eq!(module.version, 4);
    let class = module.metadata["Foo"].as_class().expect("class metadata");

    let decorators = class.decorators.as_ref().expect("decorators");
    assert_eq!(decorators.len(), 1);
    let Some(MetadataSymbolic::Call(call)) = decorators[0].as_symbolic() else {
        panic!("expected call, got {:?}", decorators[0]);
    };
    let callee = call.expression.as_reference().expect("reference");
    assert_eq!(callee.module.as_deref(), Some("@angular/core"));
    assert_eq!(callee.name.as_deref(), Some("Injectable"));
    assert!(call.arguments.is_none());

    let members = class.members.as_ref().expect("members");
    let [MemberMetadata::Constructor(constructor)] = members["__ctor__"].as_slice() else {
        panic!("expected one constructor");
    };
    let parameters = constructor.parameters.as_ref().expect("parameter types");
    assert_eq!(parameters.len(), 3);
    let service = parameters[0].as_reference().expect("service reference");
    assert_eq!(service.module.as_deref(), Some("./service"));
    assert_eq!(service.name.as_deref(), Some("Service"));
    assert_eq!(parameters[1], MetadataValue::global_reference("string"));
    assert_eq!(parameters[2], MetadataValue::Null);
    assert!(constructor.parameter_decorators.is_none());
}

#[test]
fn class_heritage_arity_members_and_statics() {
    let module = collect(
        "import { Base, Input } from './base';\n\
         export class Widget<T> extends Base {\n\
         \x20   @Input() label: string;\n\
         \x20   static count = 3;\n\
         \x20   static ngAcceptInputType_label: any;\n\
         \x20   static create(value) { return value; }\n\
         \x20   render() { }\n\
         }\n",
    );
    let class = module.metadata["Widget"].as_class().expect("class metadata");
    assert_eq!(class.arity, Some(1));
    let base = class.extends.as_ref().and_then(MetadataValue::as_reference);
    assert_eq!(base.and_then(|base| base.name.as_deref()), Some("Base"));

    let members = class.members.as_ref().expect("members");
    assert!(matches!(members["label"].as_slice(), [MemberMetadata::Property(_)]));
    assert!(matches!(members["render"].as_slice(), [MemberMetadata::Method(_)]));

    let statics = class.statics.as_ref().expect("statics");
    assert_eq!(statics["count"], number(3.0));
    assert!(!statics.contains_key("ngAcceptInputType_label"));
    let Some(MetadataSymbolic::Function(create)) = statics["create"].as_symbolic() else {
        panic!("expected function, got {:?}", statics["create"]);
    };
    assert_eq!(create.parameters.as_deref(), Some(&["value".to_string()][..]));
    assert_eq!(create.value, Some(MetadataValue::global_reference("value")));
}

#[test]
fn enum_members_continue_numbering() {
    let module = collect("export enum Color { Red, Green = 5, Blue }\n");
    let MetadataValue::Object(members) = &module.metadata["Color"] else {
        panic!("expected object, got {:?}", module.metadata["Color"]);
    };
    assert_eq!(members["Red"], number(0.0));
    assert_eq!(members["Green"], number(5.0));
    assert_eq!(members["Blue"], number(6.0));
}

#[test]
fn variables_fold_through_locals() {
    let module = collect(
        "const base = 40;\n\
         export const answer = base + 2;\n\
         export const config = { value: base, name: 'x' + base };\n",
    );
    assert_eq!(module.metadata["answer"], number(42.0));
    let MetadataValue::Object(config) = &module.metadata["config"] else {
        panic!("expected object");
    };
    assert_eq!(config["value"], number(40.0));
    assert_eq!(config["name"], MetadataValue::String("x40".to_string()));
    assert!(!module.metadata.contains_key("base"));
}

#[test]
fn uninitialized_locals_become_reference_errors() {
    let module = collect("let pending;\nexport const alias = pending;\n");
    let error = module.metadata["alias"].as_error().expect("error value");
    assert_eq!(error.message, "Reference to a local symbol");
    assert_eq!(error.context_value("name"), Some("pending"));
}

#[test]
fn simple_functions_record_parameters_and_defaults() {
    let module = collect("export function make(a, b = 2) { return { a: a, b: b }; }\n");
    let Some(MetadataSymbolic::Function(function)) = module.metadata["make"].as_symbolic() else {
        panic!("expected function");
    };
    assert_eq!(
        function.parameters,
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(function.defaults, Some(vec![MetadataValue::Null, number(2.0)]));
}

#[test]
fn exported_names_follow_local_export_clauses() {
    let module = collect(
        "class Impl { }\n\
         interface Shape { }\n\
         export { Impl as Public, Shape };\n",
    );
    assert!(module.metadata["Public"].as_class().is_some());
    assert_eq!(
        module.metadata["Shape"],
        MetadataValue::symbolic(MetadataSymbolic::Interface)
    );
    assert!(!module.metadata.contains_key("Impl"));
}

#[test]
fn reexports_are_summarized() {
    let module = collect("export { A, B as C } from './other';\nexport * from './all';\n");
    assert!(module.metadata.is_empty());
    let exports = module.exports.expect("exports");
    assert_eq!(exports.len(), 2);
    assert_eq!(exports[0].from, "./other");
    assert_eq!(
        exports[0].export,
        Some(vec![
            ExportedSymbol::Name("A".to_string()),
            ExportedSymbol::Alias {
                name: "B".to_string(),
                as_name: "C".to_string(),
            },
        ])
    );
    assert_eq!(exports[1].from, "./all");
    assert!(exports[1].export.is_none());
}

#[test]
fn strict_collection_reports_errors_reachable_from_classes() {
    let error = collect_with(
        "import { Component } from '@angular/core';\n\
         let template;\n\
         @Component({ template: template })\n\
         export class Broken { }\n",
        true,
    )
    .expect_err("strict collection fails");
    let MetadataError::InvalidMetadata {
        symbol, message, ..
    } = &error
    else {
        panic!("unexpected error {error:?}");
    };
    assert_eq!(symbol, "Broken");
    assert!(
        message.contains("Error encountered in metadata generated for exported symbol 'Broken'"),
        "{message}"
    );
    assert!(
        message.contains("Reference to a local (non-exported) symbol 'template'"),
        "{message}"
    );
}

#[test]
fn dynamic_comment_suppresses_strict_errors() {
    let module = collect_with(
        "import { Component } from '@angular/core';\n\
         let template;\n\
         /** @dynamic */\n\
         @Component({ template: template })\n\
         export class Tolerated { }\n",
        true,
    )
    .expect("collection succeeds")
    .expect("metadata");
    assert!(module.metadata["Tolerated"].as_class().is_some());
}

#[test]
fn collected_module_serializes_as_module_record() {
    let module = collect("export const flag = true;\n");
    let json = serde_json::to_string(&module).expect("serializes");
    assert_eq!(
        json,
        r#"{"__symbolic":"module","version":4,"metadata":{"flag":true}}"#
    );
}
