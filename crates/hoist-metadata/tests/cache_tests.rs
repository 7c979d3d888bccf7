//! Metadata cache and transformer composition tests.

use hoist_metadata::{
    CollectMetadata, CollectorOptions, MetadataCache, MetadataCollector, MetadataError,
    MetadataSubstitution, MetadataTransformer, MetadataValue, ModuleMetadata,
};
use hoist_parser::{NodeIndex, SourceFile};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct CountingCollector {
    inner: MetadataCollector,
    calls: Rc<Cell<usize>>,
}

impl CollectMetadata for CountingCollector {
    fn get_metadata(
        &self,
        source_file: &SourceFile,
        strict: bool,
        substitution: Option<&mut dyn MetadataSubstitution>,
    ) -> Result<Option<ModuleMetadata>, MetadataError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.get_metadata(source_file, strict, substitution)
    }
}

/// Applies `f` to numbers and counts how often it was started.
struct NumberTransformer {
    f: fn(f64) -> f64,
    starts: Rc<Cell<usize>>,
    cache: RefCell<Weak<MetadataCache>>,
}

impl NumberTransformer {
    fn new(f: fn(f64) -> f64) -> Rc<NumberTransformer> {
        Rc::new(NumberTransformer {
            f,
            starts: Rc::new(Cell::new(0)),
            cache: RefCell::new(Weak::new()),
        })
    }
}

impl MetadataTransformer for NumberTransformer {
    fn connect(&self, cache: Weak<MetadataCache>) {
        *self.cache.borrow_mut() = cache;
    }

    fn start<'a>(
        &'a self,
        _source_file: &'a SourceFile,
    ) -> Option<Box<dyn MetadataSubstitution + 'a>> {
        self.starts.set(self.starts.get() + 1);
        let f = self.f;
        Some(Box::new(move |value: MetadataValue, _node: NodeIndex| match value {
            MetadataValue::Number(number) => MetadataValue::Number(f(number)),
            other => other,
        }))
    }
}

fn cache_with(
    strict: bool,
    transformers: Vec<Rc<dyn MetadataTransformer>>,
) -> (Rc<MetadataCache>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let collector = CountingCollector {
        inner: MetadataCollector::new(CollectorOptions::default()),
        calls: Rc::clone(&calls),
    };
    (MetadataCache::new(Box::new(collector), strict, transformers), calls)
}

#[test]
fn collects_each_module_once() {
    let (cache, calls) = cache_with(false, Vec::new());
    let source = SourceFile::parse("a.ts", "export const a = 1;\n");

    let first = cache.get_metadata(&source).expect("metadata").expect("some");
    let second = cache.get_metadata(&source).expect("metadata").expect("some");
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 1);
    assert!(cache.is_cached("a.ts"));
}

#[test]
fn modules_without_metadata_are_cached_too() {
    let (cache, calls) = cache_with(false, Vec::new());
    let source = SourceFile::parse("b.ts", "import { x } from './x';\n");

    assert!(cache.get_metadata(&source).expect("metadata").is_none());
    assert!(cache.get_metadata(&source).expect("metadata").is_none());
    assert_eq!(calls.get(), 1);
}

#[test]
fn substitutions_apply_in_registration_order() {
    let add_one = NumberTransformer::new(|n| n + 1.0);
    let times_ten = NumberTransformer::new(|n| n * 10.0);
    let transformers: Vec<Rc<dyn MetadataTransformer>> =
        vec![add_one.clone() as Rc<dyn MetadataTransformer>, times_ten.clone()];
    let (cache, _) = cache_with(false, transformers);
    let source = SourceFile::parse("c.ts", "export const value = 1;\n");

    let metadata = cache.get_metadata(&source).expect("metadata").expect("some");
    assert_eq!(metadata.metadata["value"], MetadataValue::Number(20.0));
    assert_eq!(add_one.starts.get(), 1);
    assert_eq!(times_ten.starts.get(), 1);
}

#[test]
fn transformers_are_connected_to_the_cache() {
    let transformer = NumberTransformer::new(|n| n);
    let (cache, _) = cache_with(false, vec![transformer.clone() as Rc<dyn MetadataTransformer>]);
    let connected = transformer.cache.borrow().upgrade().expect("cache is alive");
    assert!(Rc::ptr_eq(&connected, &cache));
    drop(connected);
    drop(cache);
    assert!(transformer.cache.borrow().upgrade().is_none());
}

#[test]
fn declaration_files_and_scripts_are_not_transformed() {
    let transformer = NumberTransformer::new(|n| n + 1.0);
    let (cache, _) = cache_with(false, vec![transformer.clone() as Rc<dyn MetadataTransformer>]);

    let declarations = SourceFile::parse("types.d.ts", "export declare const limit: number;\n");
    cache.get_metadata(&declarations).expect("metadata");
    let script = SourceFile::parse("script.ts", "const local = 1;\n");
    cache.get_metadata(&script).expect("metadata");
    assert_eq!(transformer.starts.get(), 0);

    let module = SourceFile::parse("module.ts", "export const limit = 1;\n");
    let metadata = cache.get_metadata(&module).expect("metadata").expect("some");
    assert_eq!(transformer.starts.get(), 1);
    assert_eq!(metadata.metadata["limit"], MetadataValue::Number(2.0));
}

#[test]
fn strict_mode_applies_to_typescript_sources_only() {
    let text = "import { Component } from '@angular/core';\n\
                let template;\n\
                @Component({ template: template })\n\
                export class Broken { }\n";

    let (cache, _) = cache_with(true, Vec::new());
    let error = cache
        .get_metadata(&SourceFile::parse("broken.ts", text))
        .expect_err("strict collection fails");
    assert_eq!(error.file_name(), "broken.ts");
    assert!(!cache.is_cached("broken.ts"));

    let metadata = cache
        .get_metadata(&SourceFile::parse("broken.js", text))
        .expect("scripts are not validated");
    assert!(metadata.is_some());
}
