//! Lowering decision tests: which expressions get requests, and how the
//! requests relate to the collected metadata.

use hoist_lowering::{
    LOWERABLE_FIELD_NAMES, LowerMetadataTransform, LoweringRequest, RequestsMap,
    lowerable_field_names,
};
use hoist_metadata::{
    CollectorOptions, MetadataCache, MetadataCollector, MetadataError, MetadataTransformer,
    MetadataValue,
};
use hoist_parser::{SourceFile, syntax_kind_ext};
use std::rc::Rc;

fn lowering_cache(
    transform: &Rc<LowerMetadataTransform>,
) -> Rc<MetadataCache> {
    MetadataCache::new(
        Box::new(MetadataCollector::new(CollectorOptions::default())),
        false,
        vec![Rc::clone(transform) as Rc<dyn MetadataTransformer>],
    )
}

fn default_transform() -> Rc<LowerMetadataTransform> {
    Rc::new(LowerMetadataTransform::new(LOWERABLE_FIELD_NAMES.iter().copied()))
}

/// Requests of `text` as `(name, requested source text)` in recording order.
fn requests_of(text: &str) -> Vec<(String, String)> {
    let transform = default_transform();
    let _cache = lowering_cache(&transform);
    let source = SourceFile::parse("module.ts", text);
    let requests = transform.get_requests(&source).expect("requests");
    requests
        .values()
        .map(|request| (request.name.clone(), requested_text(&source, request)))
        .collect()
}

fn requested_text(source: &SourceFile, request: &LoweringRequest) -> String {
    source.text[request.location as usize..request.end as usize]
        .trim()
        .to_string()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|&(name, text)| (name.to_string(), text.to_string()))
        .collect()
}

#[test]
fn lowers_lazy_route_lambdas() {
    let transform = default_transform();
    let cache = lowering_cache(&transform);
    let source = SourceFile::parse(
        "routes.ts",
        "import { Routes } from '@angular/router';\n\
         export const routes: Routes = [{ path: 'lazy', loadChildren: () => import('./lazy') }];\n",
    );

    let metadata = cache.get_metadata(&source).expect("metadata").expect("some");
    let requests = transform.get_requests(&source).expect("requests");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.name, "ɵ0");
    assert_eq!(request.kind, syntax_kind_ext::ARROW_FUNCTION);
    assert_eq!(requested_text(&source, request), "() => import('./lazy')");

    // The lowered name is exported ahead of the entry that refers to it.
    let names: Vec<&str> = metadata.metadata.keys().map(String::as_str).collect();
    assert_eq!(names, ["ɵ0", "routes"]);
    let MetadataValue::Array(routes) = &metadata.metadata["routes"] else {
        panic!("routes should be an array");
    };
    let MetadataValue::Object(route) = &routes[0] else {
        panic!("route should be an object");
    };
    assert_eq!(route["path"], MetadataValue::String("lazy".to_string()));
    assert_eq!(route["loadChildren"], MetadataValue::global_reference("ɵ0"));
}

#[test]
fn names_are_unique_in_document_order() {
    assert_eq!(
        requests_of(
            "export const routes = [\n\
             \x20   { path: 'a', loadChildren: () => import('./a') },\n\
             \x20   { path: 'b', loadChildren: () => import('./b') },\n\
             ];\n"
        ),
        pairs(&[("ɵ0", "() => import('./a')"), ("ɵ1", "() => import('./b')")])
    );
}

#[test]
fn lowers_decorator_arguments() {
    assert_eq!(
        requests_of(
            "import { NgModule } from '@angular/core';\n\
             @NgModule({ providers: [{ provide: 'token', useFactory: () => 1 }] })\n\
             export class AppModule { }\n"
        ),
        pairs(&[("ɵ0", "() => 1")])
    );
}

#[test]
fn lowered_values_do_not_overlap() {
    // `data` inside the lowered `useValue` is not requested on its own.
    assert_eq!(
        requests_of(
            "export const PROVIDERS = [{ provide: 'token', useValue: { data: { a: 1 } } }];\n"
        ),
        pairs(&[("ɵ0", "{ data: { a: 1 } }")])
    );
}

#[test]
fn exported_symbols_are_referenced_directly() {
    assert_eq!(
        requests_of(
            "export const value = { a: 1 };\n\
             export class Config { }\n\
             const local = { b: 2 };\n\
             export const PROVIDERS = [\n\
             \x20   { provide: 'a', useValue: value },\n\
             \x20   { provide: 'b', useValue: Config.value },\n\
             \x20   { provide: 'c', useValue: local },\n\
             ];\n"
        ),
        pairs(&[("ɵ0", "local")])
    );
}

#[test]
fn local_lambdas_are_lowered_by_reference() {
    let transform = default_transform();
    let cache = lowering_cache(&transform);
    let source = SourceFile::parse(
        "providers.ts",
        "const factory = () => 1;\n\
         export const PROVIDERS = [{ provide: 'a', useFactory: factory }];\n",
    );

    let metadata = cache.get_metadata(&source).expect("metadata").expect("some");
    let requests = transform.get_requests(&source).expect("requests");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].kind, hoist_scanner::SyntaxKind::Identifier as u16);
    assert_eq!(requested_text(&source, &requests[0]), "factory");

    let names: Vec<&str> = metadata.metadata.keys().map(String::as_str).collect();
    assert_eq!(names, ["ɵ0", "PROVIDERS"]);
    let MetadataValue::Array(providers) = &metadata.metadata["PROVIDERS"] else {
        panic!("PROVIDERS should be an array");
    };
    let MetadataValue::Object(provider) = &providers[0] else {
        panic!("provider should be an object");
    };
    assert_eq!(provider["useFactory"], MetadataValue::global_reference("ɵ0"));
}

#[test]
fn uninitialized_locals_are_lowered_by_reference() {
    assert_eq!(
        requests_of(
            "let value;\n\
             export const PROVIDERS = [{ provide: 'a', useValue: value }];\n"
        ),
        pairs(&[("ɵ0", "value")])
    );
}

#[test]
fn primitive_values_are_kept_inline() {
    assert!(requests_of("export const PROVIDERS = [{ provide: 'a', useValue: 'x', id: 3 }];\n").is_empty());
}

#[test]
fn declarations_bound_lowering() {
    assert!(
        requests_of(
            "export function make() { return { useValue: () => 1 }; }\n\
             const f = () => 2;\n\
             export const x = 1;\n"
        )
        .is_empty()
    );
}

#[test]
fn ivy_field_names_are_configurable() {
    let text = "export const MODULE = { providers: [{ provide: 'a', useClass: Service }] };\n\
                class Service { }\n";

    assert!(requests_of(text).is_empty());

    let transform = Rc::new(LowerMetadataTransform::new(lowerable_field_names(true)));
    let _cache = lowering_cache(&transform);
    let source = SourceFile::parse("module.ts", text);
    let requests = transform.get_requests(&source).expect("requests");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].kind, syntax_kind_ext::ARRAY_LITERAL_EXPRESSION);
}

#[test]
fn requests_are_collected_on_demand() {
    let transform = default_transform();
    let cache = lowering_cache(&transform);
    let source = SourceFile::parse("lazy.ts", "export const f = () => 1;\n");
    assert!(!cache.is_cached("lazy.ts"));

    let requests = transform.get_requests(&source).expect("requests");
    assert_eq!(requests.len(), 1);
    assert!(cache.is_cached("lazy.ts"));

    // A second lookup reuses the recorded table.
    assert_eq!(transform.get_requests(&source).expect("requests"), requests);
}

#[test]
fn declaration_files_have_no_requests() {
    let transform = default_transform();
    let _cache = lowering_cache(&transform);
    let source = SourceFile::parse("types.d.ts", "export declare const f: () => number;\n");
    assert!(transform.get_requests(&source).expect("requests").is_empty());
}

#[test]
fn released_cache_is_reported() {
    let transform = default_transform();
    drop(lowering_cache(&transform));
    let source = SourceFile::parse("late.ts", "export const f = () => 1;\n");

    let error = transform.get_requests(&source).expect_err("cache is gone");
    assert!(matches!(error, MetadataError::CacheReleased { .. }));
    assert_eq!(error.file_name(), "late.ts");
}
