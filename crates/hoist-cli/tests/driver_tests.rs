//! Driver tests over real files in a temporary directory.

use hoist_cli::args::CliArgs;
use hoist_cli::driver::compile;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const ROUTES: &str = "export const routes = [{ path: 'lazy', loadChildren: () => import('./lazy') }];\n";

fn write(dir: &Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).expect("write fixture");
}

#[test]
fn prints_lowered_modules() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "routes.ts", ROUTES);
    write(dir.path(), "plain.ts", "export const limit = 1;\n");

    let args = CliArgs {
        files: vec!["routes.ts".into(), "plain.ts".into()],
        ..CliArgs::default()
    };
    let result = compile(&args, dir.path()).expect("compile");
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.modules.len(), 2);

    let routes = &result.modules[0];
    assert!(routes.changed);
    assert!(routes.output_path.is_none());
    assert_eq!(
        routes.text,
        "const ɵ0 = () => import('./lazy');\n\
         export const routes = [{ path: 'lazy', loadChildren: ɵ0 }];\n\
         export { ɵ0 };\n"
    );
    assert!(!result.modules[1].changed);
}

#[test]
fn writes_modules_and_metadata_from_a_project() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir(dir.path().join("src")).expect("src dir");
    write(&dir.path().join("src"), "routes.ts", ROUTES);
    write(
        dir.path(),
        "hoist.json",
        r#"{ "files": ["src/routes.ts"], "outDir": "dist", "emitMetadata": "true" }"#,
    );

    let args = CliArgs {
        project: Some("hoist.json".into()),
        ..CliArgs::default()
    };
    let result = compile(&args, dir.path()).expect("compile");

    let output = dir.path().join("dist").join("routes.ts");
    assert_eq!(result.modules[0].output_path.as_deref(), Some(output.as_path()));
    let written = std::fs::read_to_string(&output).expect("lowered module");
    assert!(written.ends_with("export { ɵ0 };\n"));

    let metadata_path = dir.path().join("dist").join("routes.metadata.json");
    assert_eq!(result.metadata_files, [metadata_path.clone()]);
    let metadata: Value =
        serde_json::from_str(&std::fs::read_to_string(&metadata_path).expect("metadata file"))
            .expect("metadata json");
    assert_eq!(metadata["__symbolic"], "module");
    assert_eq!(
        metadata["metadata"]["routes"][0]["loadChildren"],
        serde_json::json!({ "__symbolic": "reference", "name": "ɵ0" })
    );
}

#[test]
fn same_named_modules_get_separate_outputs() {
    let dir = TempDir::new().expect("temp dir");
    for package in ["a", "b"] {
        std::fs::create_dir_all(dir.path().join(package)).expect("package dir");
    }
    write(&dir.path().join("a"), "index.ts", ROUTES);
    write(&dir.path().join("b"), "index.ts", "export const limit = 1;\n");

    let args = CliArgs {
        files: vec!["a/index.ts".into(), "b/index.ts".into()],
        out_dir: Some("dist".into()),
        metadata: true,
        ..CliArgs::default()
    };
    let result = compile(&args, dir.path()).expect("compile");

    let dist = dir.path().join("dist");
    let first = std::fs::read_to_string(dist.join("a").join("index.ts")).expect("first output");
    let second = std::fs::read_to_string(dist.join("b").join("index.ts")).expect("second output");
    assert!(first.ends_with("export { ɵ0 };\n"));
    assert_eq!(second, "export const limit = 1;\n");
    assert_eq!(
        result.metadata_files,
        [
            dist.join("a").join("index.metadata.json"),
            dist.join("b").join("index.metadata.json"),
        ]
    );
}

#[test]
fn lowers_only_configured_fields() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "providers.ts",
        "export const PROVIDERS = [{ provide: 'a', useValue: { x: 1 }, data: { y: 2 } }];\n",
    );

    let args = CliArgs {
        files: vec!["providers.ts".into()],
        lower_field: vec!["data".to_string()],
        ..CliArgs::default()
    };
    let result = compile(&args, dir.path()).expect("compile");
    assert_eq!(
        result.modules[0].text,
        "const ɵ0 = { y: 2 };\n\
         export const PROVIDERS = [{ provide: 'a', useValue: { x: 1 }, data: ɵ0 }];\n\
         export { ɵ0 };\n"
    );
}

#[test]
fn annotates_partial_module_statics() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "app.ts", "export class App { }\n");
    let file_name = dir.path().join("app.ts").display().to_string();
    let partial = serde_json::json!([{
        "fileName": file_name,
        "statements": [
            { "kind": "class", "name": "App", "fields": [{ "name": "ɵfac", "modifiers": ["static"] }] }
        ]
    }]);
    write(dir.path(), "partial.json", &partial.to_string());

    let args = CliArgs {
        files: vec!["app.ts".into()],
        partial_modules: Some("partial.json".into()),
        metadata: true,
        ..CliArgs::default()
    };
    let result = compile(&args, dir.path()).expect("compile");
    let metadata: Value = serde_json::from_str(
        &std::fs::read_to_string(&result.metadata_files[0]).expect("metadata file"),
    )
    .expect("metadata json");
    assert_eq!(
        metadata["metadata"]["App"]["statics"],
        serde_json::json!({ "ɵfac": {} })
    );
}

#[test]
fn strict_metadata_errors_fail_the_build() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "broken.ts",
        "import { Component } from '@angular/core';\n\
         let template;\n\
         @Component({ template: template })\n\
         export class Broken { }\n",
    );

    let args = CliArgs {
        files: vec!["broken.ts".into()],
        strict_metadata_emit: true,
        ..CliArgs::default()
    };
    let error = compile(&args, dir.path()).expect_err("strict metadata errors");
    assert!(format!("{error:#}").contains("failed to collect metadata"));
}

#[test]
fn reports_missing_inputs() {
    let dir = TempDir::new().expect("temp dir");
    let error = compile(&CliArgs::default(), dir.path()).expect_err("no files");
    assert!(error.to_string().contains("no input files"));

    let args = CliArgs {
        files: vec!["missing.ts".into()],
        ..CliArgs::default()
    };
    let error = compile(&args, dir.path()).expect_err("missing file");
    assert!(error.to_string().contains("failed to read"));
}
