//! Static field annotation from partial modules.

use hoist_lowering::{
    LOWERABLE_FIELD_NAMES, LowerMetadataTransform, PartialModule, PartialModuleMetadataTransformer,
};
use hoist_metadata::schema::MetadataMap;
use hoist_metadata::{
    CollectorOptions, MetadataCache, MetadataCollector, MetadataTransformer, MetadataValue,
    ModuleMetadata,
};
use hoist_parser::SourceFile;
use std::rc::Rc;

const PARTIAL_MODULES: &str = r#"[
    {
        "fileName": "app.ts",
        "statements": [
            { "kind": "class", "name": "AppComponent", "fields": [
                { "name": "ɵfac", "modifiers": ["static"] },
                { "name": "ɵcmp", "modifiers": ["static", "final"] },
                { "name": "title", "modifiers": [] }
            ] },
            { "kind": "class", "name": "Plain", "fields": [
                { "name": "local", "modifiers": ["private"] }
            ] },
            { "kind": "declareVar", "name": "unused" }
        ]
    }
]"#;

fn collect(
    transformers: Vec<Rc<dyn MetadataTransformer>>,
    file_name: &str,
    text: &str,
) -> Rc<ModuleMetadata> {
    let cache = MetadataCache::new(
        Box::new(MetadataCollector::new(CollectorOptions::default())),
        false,
        transformers,
    );
    cache
        .get_metadata(&SourceFile::parse(file_name, text))
        .expect("metadata")
        .expect("module has exports")
}

fn annotator() -> Rc<dyn MetadataTransformer> {
    let modules = PartialModule::from_json(PARTIAL_MODULES).expect("partial modules");
    Rc::new(PartialModuleMetadataTransformer::new(modules))
}

const APP: &str = "import { Component } from '@angular/core';\n\
                   @Component({ selector: 'app-root' })\n\
                   export class AppComponent {\n\
                   \x20   static version = 1;\n\
                   \x20   title = 'app';\n\
                   }\n\
                   export class Plain { }\n";

#[test]
fn declares_static_fields_of_compiled_classes() {
    let metadata = collect(vec![annotator()], "app.ts", APP);

    let app = metadata.metadata["AppComponent"].as_class().expect("class metadata");
    let statics = app.statics.as_ref().expect("statics");
    let names: Vec<&str> = statics.keys().map(String::as_str).collect();
    assert_eq!(names, ["version", "ɵfac", "ɵcmp"]);
    assert_eq!(statics["version"], MetadataValue::Number(1.0));
    assert_eq!(statics["ɵfac"], MetadataValue::Object(MetadataMap::new()));
    assert!(app.decorators.is_some());

    let plain = metadata.metadata["Plain"].as_class().expect("class metadata");
    assert!(plain.statics.is_none());
}

#[test]
fn other_modules_are_not_annotated() {
    let metadata = collect(vec![annotator()], "other.ts", APP);
    let app = metadata.metadata["AppComponent"].as_class().expect("class metadata");
    let statics = app.statics.as_ref().expect("statics");
    assert_eq!(statics.len(), 1);
}

#[test]
fn composes_with_lowering() {
    let lowering = Rc::new(LowerMetadataTransform::new(LOWERABLE_FIELD_NAMES.iter().copied()));
    let text = "import { Component } from '@angular/core';\n\
                @Component({ selector: 'app-root', providers: [{ provide: 'a', useFactory: () => 1 }] })\n\
                export class AppComponent { }\n";
    let metadata = collect(
        vec![lowering as Rc<dyn MetadataTransformer>, annotator()],
        "app.ts",
        text,
    );

    assert!(metadata.metadata.contains_key("ɵ0"));
    let app = metadata.metadata["AppComponent"].as_class().expect("class metadata");
    let statics = app.statics.as_ref().expect("statics");
    assert!(statics.contains_key("ɵfac"));
    assert!(statics.contains_key("ɵcmp"));
}
