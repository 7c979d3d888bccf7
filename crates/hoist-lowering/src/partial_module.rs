//! Static field annotation from partially compiled modules.
//!
//! A partial module is the statement list a previous compilation produced for
//! a source file. Static fields it adds to a class (for example a generated
//! factory) are declared in the class metadata so consumers expect them.

use hoist_metadata::schema::MetadataMap;
use hoist_metadata::{MetadataSubstitution, MetadataTransformer, MetadataValue};
use hoist_parser::parser::NodeData;
use hoist_parser::{NodeIndex, SourceFile, syntax_kind_ext};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::{debug, trace};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialModule {
    pub file_name: String,
    #[serde(default)]
    pub statements: Vec<PartialStatement>,
}

impl PartialModule {
    /// Parse a JSON array of partial modules.
    pub fn from_json(text: &str) -> Result<Vec<PartialModule>, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PartialStatement {
    Class(ClassStatement),
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ClassStatement {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<ClassField>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ClassField {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<StatementModifier>,
}

impl ClassField {
    fn static_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|_| self.modifiers.contains(&StatementModifier::Static))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementModifier {
    Final,
    Private,
    Exported,
    Static,
}

pub struct PartialModuleMetadataTransformer {
    modules: FxHashMap<String, PartialModule>,
}

impl PartialModuleMetadataTransformer {
    pub fn new(modules: Vec<PartialModule>) -> PartialModuleMetadataTransformer {
        PartialModuleMetadataTransformer {
            modules: modules
                .into_iter()
                .map(|module| (module.file_name.clone(), module))
                .collect(),
        }
    }
}

impl MetadataTransformer for PartialModuleMetadataTransformer {
    fn start<'a>(&'a self, source_file: &'a SourceFile) -> Option<Box<dyn MetadataSubstitution + 'a>> {
        let module = self.modules.get(&source_file.file_name)?;
        let statics: FxHashMap<&'a str, Vec<&'a str>> = module
            .statements
            .iter()
            .filter_map(|statement| match statement {
                PartialStatement::Class(class) => Some(class),
                PartialStatement::Other => None,
            })
            .map(|class| {
                let fields: Vec<&'a str> =
                    class.fields.iter().filter_map(ClassField::static_name).collect();
                (class.name.as_str(), fields)
            })
            .filter(|(_, fields)| !fields.is_empty())
            .collect();
        if statics.is_empty() {
            trace!(file = %source_file.file_name, "no static fields to annotate");
            return None;
        }

        let arena = &source_file.arena;
        Some(Box::new(move |mut value: MetadataValue, node: NodeIndex| {
            if !arena.is_kind(node, syntax_kind_ext::CLASS_DECLARATION) {
                return value;
            }
            let Some(NodeData::Class(declaration)) = arena.node_data(node) else {
                return value;
            };
            let Some(fields) = arena
                .get_identifier_text(declaration.name)
                .and_then(|name| statics.get(name))
            else {
                return value;
            };
            if let Some(class) = value.as_class_mut() {
                let entries = class.statics.get_or_insert_with(MetadataMap::new);
                for &field in fields {
                    debug!(field = %field, "declaring static field");
                    entries.insert(field.to_string(), MetadataValue::Object(MetadataMap::new()));
                }
            }
            value
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_modules() {
        let modules = PartialModule::from_json(
            r#"[{
                "fileName": "app.ts",
                "statements": [
                    { "kind": "class", "name": "App", "fields": [
                        { "name": "ɵfac", "modifiers": ["static"] },
                        { "name": "local", "modifiers": ["private"] }
                    ] },
                    { "kind": "expression" }
                ]
            }]"#,
        )
        .expect("valid partial modules");
        assert_eq!(modules.len(), 1);
        let PartialStatement::Class(class) = &modules[0].statements[0] else {
            panic!("expected a class statement");
        };
        let statics: Vec<&str> = class.fields.iter().filter_map(ClassField::static_name).collect();
        assert_eq!(statics, ["ɵfac"]);
        assert_eq!(modules[0].statements[1], PartialStatement::Other);
    }
}
