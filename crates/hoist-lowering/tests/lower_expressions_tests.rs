//! End-to-end lowering: collect metadata, rewrite the module, print it.

use hoist_emitter::Printer;
use hoist_lowering::{
    ExpressionLoweringTransform, LOWERABLE_FIELD_NAMES, LowerMetadataTransform, LoweringRequest,
    Program, RequestLocationMap, lower_expressions,
};
use hoist_metadata::{CollectorOptions, MetadataCache, MetadataCollector, MetadataTransformer};
use hoist_parser::{SourceFile, syntax_kind_ext};
use std::rc::Rc;

/// Lower `text` as module `file_name`; returns whether it changed and the
/// printed result.
fn lower(file_name: &str, text: &str) -> (bool, String) {
    let mut program = Program::new();
    program.add_source(file_name, text);
    let transform = Rc::new(LowerMetadataTransform::new(LOWERABLE_FIELD_NAMES.iter().copied()));
    let _cache = MetadataCache::new(
        Box::new(MetadataCollector::new(CollectorOptions::default())),
        false,
        vec![Rc::clone(&transform) as Rc<dyn MetadataTransformer>],
    );

    let lowering = ExpressionLoweringTransform::new(transform.as_ref(), &program);
    let mut source_file = program
        .get_source_file(file_name)
        .expect("module was added")
        .clone();
    let changed = lowering.transform(&mut source_file).expect("lowering succeeds");
    (changed, Printer::print_source_file(&source_file))
}

#[test]
fn hoists_route_lambdas() {
    let (changed, output) = lower(
        "routes.ts",
        "import { Routes } from '@angular/router';\n\
         export const routes: Routes = [{ path: 'lazy', loadChildren: () => import('./lazy') }];\n",
    );
    assert!(changed);
    assert_eq!(
        output,
        "import { Routes } from '@angular/router';\n\
         const ɵ0 = () => import('./lazy');\n\
         export const routes: Routes = [{ path: 'lazy', loadChildren: ɵ0 }];\n\
         export { ɵ0 };\n"
    );
}

#[test]
fn groups_declarations_per_statement() {
    let (changed, output) = lower(
        "routes.ts",
        "export const first = [{ path: 'a', loadChildren: () => import('./a') }, { path: 'b', loadChildren: () => import('./b') }];\n\
         export const count = 2;\n\
         export const second = [{ path: 'c', loadChildren: () => import('./c') }];\n",
    );
    assert!(changed);
    assert_eq!(
        output,
        "const ɵ0 = () => import('./a'), ɵ1 = () => import('./b');\n\
         export const first = [{ path: 'a', loadChildren: ɵ0 }, { path: 'b', loadChildren: ɵ1 }];\n\
         export const count = 2;\n\
         const ɵ2 = () => import('./c');\n\
         export const second = [{ path: 'c', loadChildren: ɵ2 }];\n\
         export { ɵ0, ɵ1, ɵ2 };\n"
    );
}

#[test]
fn whole_initializers_export_the_variable() {
    let (changed, output) = lower("factory.ts", "export const factory = () => 1;\n");
    assert!(changed);
    assert_eq!(
        output,
        "export const factory = () => 1;\n\
         export { factory as ɵ0 };\n"
    );
}

#[test]
fn hoists_references_to_local_factories() {
    let (changed, output) = lower(
        "providers.ts",
        "const factory = () => 1;\n\
         export const PROVIDERS = [{ provide: 'a', useFactory: factory }];\n",
    );
    assert!(changed);
    assert_eq!(
        output,
        "const factory = () => 1;\n\
         const ɵ0 = factory;\n\
         export const PROVIDERS = [{ provide: 'a', useFactory: ɵ0 }];\n\
         export { ɵ0 };\n"
    );
}

#[test]
fn lowering_an_already_lowered_module_is_a_no_op() {
    let text = "export const routes = [{ path: 'a', loadChildren: () => import('./a') }];\n\
                export const factory = () => 1;\n";
    let mut program = Program::new();
    program.add_source("twice.ts", text);
    let transform = Rc::new(LowerMetadataTransform::new(LOWERABLE_FIELD_NAMES.iter().copied()));
    let _cache = MetadataCache::new(
        Box::new(MetadataCollector::new(CollectorOptions::default())),
        false,
        vec![Rc::clone(&transform) as Rc<dyn MetadataTransformer>],
    );
    let lowering = ExpressionLoweringTransform::new(transform.as_ref(), &program);
    let mut source_file = program
        .get_source_file("twice.ts")
        .expect("module was added")
        .clone();

    assert!(lowering.transform(&mut source_file).expect("first pass"));
    let once = Printer::print_source_file(&source_file);
    assert_eq!(
        once,
        "const ɵ0 = () => import('./a');\n\
         export const routes = [{ path: 'a', loadChildren: ɵ0 }];\n\
         export const factory = () => 1;\n\
         export { ɵ0, factory as ɵ1 };\n"
    );

    let root = source_file.root;
    assert!(!lowering.transform(&mut source_file).expect("second pass"));
    assert_eq!(source_file.root, root);
    assert_eq!(Printer::print_source_file(&source_file), once);
}

#[test]
fn hoists_out_of_decorators() {
    let (changed, output) = lower(
        "app.module.ts",
        "import { NgModule } from '@angular/core';\n\
         @NgModule({ providers: [{ provide: 'token', useFactory: () => 1 }] })\n\
         export class AppModule {\n\
         }\n",
    );
    assert!(changed);
    let hoisted = output.find("const ɵ0 = () => 1;").expect("hoisted binding");
    let decorator = output.find("@NgModule").expect("decorator is kept");
    assert!(hoisted < decorator);
    assert!(output.contains("useFactory: ɵ0"));
    assert!(output.ends_with("export { ɵ0 };\n"));
}

#[test]
fn modules_without_requests_are_unchanged() {
    let text = "export function make() {\n\
                \x20   return { useValue: () => 1 };\n\
                }\n\
                export const limit = 10;\n";
    let (changed, output) = lower("plain.ts", text);
    assert!(!changed);
    assert_eq!(output, Printer::print_source_file(&SourceFile::parse("plain.ts", text)));
}

#[test]
fn unknown_modules_are_left_alone() {
    let program = Program::new();
    let transform = LowerMetadataTransform::new(LOWERABLE_FIELD_NAMES.iter().copied());
    let lowering = ExpressionLoweringTransform::new(&transform, &program);
    let mut source_file = SourceFile::parse("other.ts", "export const f = () => 1;\n");
    let root = source_file.root;
    assert!(!lowering.transform(&mut source_file).expect("nothing to do"));
    assert_eq!(source_file.root, root);
}

#[test]
fn applies_explicit_requests() {
    let text = "foo({ value: bar(1) });\n";
    let mut source_file = SourceFile::parse("script.ts", text);
    let start = text.find("bar").expect("call") as u32;
    let call = (0..source_file.arena.len() as u32)
        .map(hoist_parser::NodeIndex)
        .find(|&node| {
            source_file.arena.get(node).is_some_and(|header| {
                header.kind == syntax_kind_ext::CALL_EXPRESSION
                    && source_file.text[header.pos as usize..header.end as usize].trim() == "bar(1)"
            })
        })
        .expect("inner call");
    let header = *source_file.arena.get(call).expect("header");
    assert!(header.pos <= start);

    let mut requests = RequestLocationMap::new();
    requests.insert(
        header.pos,
        LoweringRequest {
            kind: header.kind,
            location: header.pos,
            end: header.end,
            name: "ɵ7".to_string(),
        },
    );
    assert!(lower_expressions(&mut source_file, &requests));
    assert_eq!(
        Printer::print_source_file(&source_file),
        "const ɵ7 = bar(1);\n\
         foo({ value: ɵ7 });\n\
         export { ɵ7 };\n"
    );
    assert!(!source_file.arena.is_synthesized(source_file.root));
}
