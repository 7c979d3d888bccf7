//! Metadata value model.
//!
//! Metadata is plain JSON: primitives, arrays and objects, plus symbolic
//! records discriminated by a `__symbolic` field. Symbolic records are a
//! tagged enum here so consumers match on them instead of probing shapes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Version written into every module record.
pub const METADATA_VERSION: u32 = 4;

const LOWERED_SYMBOL_PREFIX: char = 'ɵ';

/// Name of the `index`-th binding hoisted out of a module's metadata.
pub fn lowered_symbol(index: usize) -> String {
    format!("{LOWERED_SYMBOL_PREFIX}{index}")
}

/// True for names produced by [`lowered_symbol`].
pub fn is_lowered_symbol(name: &str) -> bool {
    name.strip_prefix(LOWERED_SYMBOL_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn is_false(value: &bool) -> bool {
    !*value
}

// =============================================================================
// Values
// =============================================================================

pub type MetadataMap = IndexMap<String, MetadataValue>;

/// Any value that can appear in metadata.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<MetadataValue>),
    Symbolic(Box<MetadataSymbolic>),
    Object(MetadataMap),
}

impl Serialize for MetadataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetadataValue::Null => serializer.serialize_unit(),
            MetadataValue::Bool(value) => serializer.serialize_bool(*value),
            MetadataValue::Number(value) => match as_safe_integer(*value) {
                Some(int) => serializer.serialize_i64(int),
                None => serializer.serialize_f64(*value),
            },
            MetadataValue::String(value) => serializer.serialize_str(value),
            MetadataValue::Array(items) => items.serialize(serializer),
            MetadataValue::Symbolic(symbolic) => symbolic.serialize(serializer),
            MetadataValue::Object(map) => map.serialize(serializer),
        }
    }
}

/// Integral numbers within the exactly representable range print without a
/// fraction, like JSON.stringify does.
fn as_safe_integer(value: f64) -> Option<i64> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    (value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER).then_some(value as i64)
}

/// Render a number the way JavaScript's `String(n)` does for common values.
pub(crate) fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    match as_safe_integer(value) {
        Some(int) => int.to_string(),
        None => value.to_string(),
    }
}

impl MetadataValue {
    pub fn symbolic(symbolic: MetadataSymbolic) -> MetadataValue {
        MetadataValue::Symbolic(Box::new(symbolic))
    }

    /// `{__symbolic: 'reference', name}` with no module.
    pub fn global_reference(name: impl Into<String>) -> MetadataValue {
        MetadataValue::symbolic(MetadataSymbolic::Reference(ReferenceExpression {
            name: Some(name.into()),
            ..ReferenceExpression::default()
        }))
    }

    pub fn error(error: ErrorValue) -> MetadataValue {
        MetadataValue::symbolic(MetadataSymbolic::Error(error))
    }

    /// Null, booleans, numbers and strings.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            MetadataValue::Null
                | MetadataValue::Bool(_)
                | MetadataValue::Number(_)
                | MetadataValue::String(_)
        )
    }

    pub fn as_symbolic(&self) -> Option<&MetadataSymbolic> {
        match self {
            MetadataValue::Symbolic(symbolic) => Some(symbolic),
            _ => None,
        }
    }

    pub fn as_symbolic_mut(&mut self) -> Option<&mut MetadataSymbolic> {
        match self {
            MetadataValue::Symbolic(symbolic) => Some(symbolic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceExpression> {
        match self.as_symbolic()? {
            MetadataSymbolic::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self.as_symbolic()? {
            MetadataSymbolic::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassMetadata> {
        match self.as_symbolic()? {
            MetadataSymbolic::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassMetadata> {
        match self.as_symbolic_mut()? {
            MetadataSymbolic::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.as_error().is_some()
    }

    pub fn is_reference(&self) -> bool {
        self.as_reference().is_some()
    }

    pub fn is_global_reference(&self) -> bool {
        self.as_reference().is_some_and(ReferenceExpression::is_global)
    }

    pub fn is_module_reference(&self) -> bool {
        self.as_reference().is_some_and(ReferenceExpression::is_module)
    }

    /// JavaScript truthiness of a primitive; non-primitives are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            MetadataValue::Null => false,
            MetadataValue::Bool(value) => *value,
            MetadataValue::Number(value) => *value != 0.0 && !value.is_nan(),
            MetadataValue::String(value) => !value.is_empty(),
            _ => true,
        }
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Number(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

// =============================================================================
// Symbolic records
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__symbolic", rename_all = "lowercase")]
pub enum MetadataSymbolic {
    Reference(ReferenceExpression),
    Call(CallExpression),
    New(CallExpression),
    Select(SelectExpression),
    Index(IndexExpression),
    Binop(BinaryExpression),
    Pre(PrefixExpression),
    If(IfExpression),
    Spread(SpreadExpression),
    Error(ErrorValue),
    Class(ClassMetadata),
    Interface,
    Function(FunctionMetadata),
}

/// A reference to a global, an imported symbol, a module, or a default
/// import.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<MetadataValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<u32>,
}

impl ReferenceExpression {
    /// A named symbol resolved in the global scope.
    pub fn is_global(&self) -> bool {
        self.name.is_some() && self.module.is_none()
    }

    /// A whole module (`import * as ns`).
    pub fn is_module(&self) -> bool {
        self.module.is_some() && self.name.is_none() && !self.default
    }

    /// A named symbol imported from a module.
    pub fn is_imported_symbol(&self) -> bool {
        self.module.is_some() && self.name.is_some()
    }

    pub fn is_import_default(&self) -> bool {
        self.module.is_some() && self.default
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub expression: MetadataValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<MetadataValue>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectExpression {
    pub expression: MetadataValue,
    pub member: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexExpression {
    pub expression: MetadataValue,
    pub index: MetadataValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub operator: String,
    pub left: MetadataValue,
    pub right: MetadataValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrefixExpression {
    pub operator: String,
    pub operand: MetadataValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfExpression {
    pub condition: MetadataValue,
    pub then_expression: MetadataValue,
    pub else_expression: MetadataValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpreadExpression {
    pub expression: MetadataValue,
}

/// An error recorded in place of a value that could not be represented.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorValue {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<IndexMap<String, String>>,
}

impl ErrorValue {
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.as_ref()?.get(key).map(String::as_str)
    }
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<MetadataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arity: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<MetadataValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<IndexMap<String, Vec<MemberMetadata>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statics: Option<MetadataMap>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__symbolic", rename_all = "lowercase")]
pub enum MemberMetadata {
    Constructor(MethodMetadata),
    Method(MethodMetadata),
    Property(PropertyMetadata),
}

impl MemberMetadata {
    pub fn decorators(&self) -> Option<&[MetadataValue]> {
        match self {
            MemberMetadata::Constructor(method) | MemberMetadata::Method(method) => {
                method.decorators.as_deref()
            }
            MemberMetadata::Property(property) => property.decorators.as_deref(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<MetadataValue>>,
    /// One entry per parameter; `None` for undecorated parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_decorators: Option<Vec<Option<Vec<MetadataValue>>>>,
    /// Constructor parameter types; `Null` where a parameter is untyped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<MetadataValue>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorators: Option<Vec<MetadataValue>>,
}

/// A function whose body is a single `return`, or an opaque exported
/// function when every field is absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<MetadataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Vec<MetadataValue>>,
}

// =============================================================================
// Modules
// =============================================================================

/// `export ... from 'module'` summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleExportMetadata {
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Vec<ExportedSymbol>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportedSymbol {
    Name(String),
    Alias {
        name: String,
        #[serde(rename = "as")]
        as_name: String,
    },
}

/// Metadata of one module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__symbolic", rename = "module", rename_all = "camelCase")]
pub struct ModuleMetadata {
    pub version: u32,
    pub metadata: MetadataMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_as: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<ModuleExportMetadata>>,
}
