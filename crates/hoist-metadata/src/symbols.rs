//! Per-module name resolution.
//!
//! Names resolve, in order of preference, to references the collector
//! defined for exported values, to locals and imports, and finally to the
//! builtin globals. Imports are read lazily on the first lookup.

use crate::schema::{MetadataValue, MetadataSymbolic, ReferenceExpression};
use hoist_parser::SourceFile;
use hoist_parser::syntax_kind_ext;
use rustc_hash::FxHashMap;

/// Globals that resolve to a plain reference by name.
const BUILTINS: &[&str] = &[
    "Object",
    "Function",
    "String",
    "Number",
    "Array",
    "Boolean",
    "Map",
    "NaN",
    "Infinity",
    "Math",
    "Date",
    "RegExp",
    "Error",
    "EvalError",
    "RangeError",
    "ReferenceError",
    "SyntaxError",
    "TypeError",
    "URIError",
    "JSON",
    "ArrayBuffer",
    "DataView",
    "Int8Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "Uint16Array",
    "Int16Array",
    "Int32Array",
    "Uint32Array",
    "Float32Array",
    "Float64Array",
];

pub struct Symbols<'a> {
    source_file: &'a SourceFile,
    symbols: Option<FxHashMap<String, MetadataValue>>,
    references: FxHashMap<String, MetadataValue>,
}

impl<'a> Symbols<'a> {
    pub fn new(source_file: &'a SourceFile) -> Symbols<'a> {
        Symbols {
            source_file,
            symbols: None,
            references: FxHashMap::default(),
        }
    }

    /// Resolve `name`. With `prefer_reference`, a reference recorded by
    /// [`Symbols::define_reference`] wins over the local value.
    pub fn resolve(&mut self, name: &str, prefer_reference: bool) -> Option<MetadataValue> {
        if prefer_reference {
            if let Some(reference) = self.references.get(name) {
                return Some(reference.clone());
            }
        }
        self.symbols().get(name).cloned()
    }

    pub fn has(&mut self, name: &str) -> bool {
        self.symbols().contains_key(name)
    }

    pub fn define(&mut self, name: &str, value: MetadataValue) {
        self.symbols().insert(name.to_string(), value);
    }

    pub fn define_reference(&mut self, name: &str, value: MetadataValue) {
        self.references.insert(name.to_string(), value);
    }

    fn symbols(&mut self) -> &mut FxHashMap<String, MetadataValue> {
        let source_file = self.source_file;
        self.symbols.get_or_insert_with(|| build_symbol_table(source_file))
    }
}

fn build_symbol_table(source_file: &SourceFile) -> FxHashMap<String, MetadataValue> {
    let mut symbols = FxHashMap::default();
    for &builtin in BUILTINS {
        symbols.insert(builtin.to_string(), MetadataValue::global_reference(builtin));
    }
    populate_imports(source_file, &mut symbols);
    symbols
}

fn module_reference(module: &str, name: Option<&str>, default: bool) -> MetadataValue {
    MetadataValue::symbolic(MetadataSymbolic::Reference(ReferenceExpression {
        module: Some(module.to_string()),
        name: name.map(str::to_string),
        default,
        ..ReferenceExpression::default()
    }))
}

fn populate_imports(source_file: &SourceFile, symbols: &mut FxHashMap<String, MetadataValue>) {
    let arena = &source_file.arena;
    for &statement in source_file.statements() {
        if !arena.is_kind(statement, syntax_kind_ext::IMPORT_DECLARATION) {
            continue;
        }
        let Some(import) = arena.get(statement).and_then(|node| arena.get_import_decl(node)) else {
            continue;
        };
        // Only string module specifiers name a module.
        let Some(from) = arena.get_literal_text(import.module_specifier) else {
            continue;
        };
        let Some(clause) = arena
            .get(import.import_clause)
            .and_then(|node| arena.get_import_clause(node))
        else {
            // `import 'module';`
            continue;
        };

        if let Some(default_name) = arena.get_identifier_text(clause.name) {
            symbols.insert(default_name.to_string(), module_reference(from, None, true));
        }

        let Some(bindings) = arena.get(clause.named_bindings) else {
            continue;
        };
        match bindings.kind {
            syntax_kind_ext::NAMESPACE_IMPORT => {
                if let Some(name) = arena
                    .get_namespace_import(bindings)
                    .and_then(|data| arena.get_identifier_text(data.name))
                {
                    symbols.insert(name.to_string(), module_reference(from, None, false));
                }
            }
            syntax_kind_ext::NAMED_IMPORTS => {
                let Some(named) = arena.get_named_imports(bindings) else {
                    continue;
                };
                for element in named.elements.iter() {
                    let Some(specifier) =
                        arena.get(element).and_then(|node| arena.get_specifier(node))
                    else {
                        continue;
                    };
                    let Some(local) = arena.get_identifier_text(specifier.name) else {
                        continue;
                    };
                    let imported = arena
                        .get_identifier_text(specifier.property_name)
                        .unwrap_or(local);
                    symbols.insert(local.to_string(), module_reference(from, Some(imported), false));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_of(value: Option<MetadataValue>) -> ReferenceExpression {
        value
            .and_then(|value| value.as_reference().cloned())
            .expect("reference")
    }

    #[test]
    fn resolves_builtins_and_imports() {
        let source = SourceFile::parse(
            "test.ts",
            "import Default, {Injectable, Input as In} from '@angular/core';\n\
             import * as common from '@angular/common';\n",
        );
        let mut symbols = Symbols::new(&source);

        let array = reference_of(symbols.resolve("Array", false));
        assert_eq!(array.name.as_deref(), Some("Array"));
        assert!(array.is_global());

        let injectable = reference_of(symbols.resolve("Injectable", false));
        assert_eq!(injectable.module.as_deref(), Some("@angular/core"));
        assert_eq!(injectable.name.as_deref(), Some("Injectable"));

        let renamed = reference_of(symbols.resolve("In", false));
        assert_eq!(renamed.name.as_deref(), Some("Input"));

        let default = reference_of(symbols.resolve("Default", false));
        assert!(default.is_import_default());

        let namespace = reference_of(symbols.resolve("common", false));
        assert!(namespace.is_module());

        assert!(symbols.resolve("missing", false).is_none());
    }

    #[test]
    fn preferred_references_shadow_locals() {
        let source = SourceFile::parse("test.ts", "export const a = 1;");
        let mut symbols = Symbols::new(&source);
        symbols.define("a", MetadataValue::Number(1.0));
        symbols.define_reference("a", MetadataValue::global_reference("a"));

        assert_eq!(symbols.resolve("a", false), Some(MetadataValue::Number(1.0)));
        assert!(symbols.resolve("a", true).is_some_and(|value| value.is_global_reference()));
        assert!(symbols.has("a"));
    }
}
