//! Strict validation of collected metadata.
//!
//! Exported classes must not reach an error record through their decorators,
//! constructor parameters, member decorators or statics. A statement whose
//! leading comments contain `@dynamic` is exempt.

use crate::error::MetadataError;
use crate::schema::{
    ClassMetadata, ErrorValue, FunctionMetadata, MemberMetadata, MetadataMap, MetadataSymbolic,
    MetadataValue, is_lowered_symbol,
};
use hoist_parser::{NodeIndex, SourceFile};
use rustc_hash::{FxHashMap, FxHashSet};

/// Names that are always in scope for metadata expressions.
const LOCALS: &[&str] = &["Array", "Object", "Set", "Map", "string", "number", "any"];

pub(crate) fn validate_metadata(
    source_file: &SourceFile,
    metadata: &MetadataMap,
    entry_nodes: &FxHashMap<String, NodeIndex>,
) -> Result<(), MetadataError> {
    let mut validator = Validator {
        source_file,
        metadata,
        locals: LOCALS.iter().map(|name| (*name).to_string()).collect(),
        visited: FxHashSet::default(),
    };
    for (name, entry) in metadata {
        let Some(class) = entry.as_class() else {
            continue;
        };
        let node = entry_nodes.get(name).copied().unwrap_or(NodeIndex::NONE);
        if is_dynamic(source_file, node) {
            continue;
        }
        validator.visited.clear();
        if let Err(message) = validator.validate_class(class) {
            let message = match node_position(source_file, node) {
                Some((line, character)) => format!(
                    "{}:{}:{}: Error encountered in metadata generated for exported symbol '{}': \n {}",
                    source_file.file_name, line, character, name, message
                ),
                None => format!(
                    "Error encountered in metadata generated for exported symbol {name}: \n {message}"
                ),
            };
            return Err(MetadataError::InvalidMetadata {
                file_name: source_file.file_name.clone(),
                symbol: name.clone(),
                message,
            });
        }
    }
    Ok(())
}

/// One-based line and column of `node`.
fn node_position(source_file: &SourceFile, node: NodeIndex) -> Option<(usize, usize)> {
    let arena = &source_file.arena;
    if node.is_none() || arena.has_unset_pos(node) {
        return None;
    }
    let header = arena.get(node)?;
    let position = source_file.line_and_character_of(header.pos);
    Some((position.line as usize + 1, position.character as usize + 1))
}

/// True when the comments before the top-level statement `node` contain
/// `@dynamic`.
fn is_dynamic(source_file: &SourceFile, node: NodeIndex) -> bool {
    let statements = source_file.statements();
    let Some(index) = statements.iter().position(|&statement| statement == node) else {
        return false;
    };
    let arena = &source_file.arena;
    let start = match index {
        0 => 0,
        _ => arena.get(statements[index - 1]).map_or(0, |header| header.end),
    };
    let Some(end) = arena.get(node).map(|header| header.pos) else {
        return false;
    };
    source_file
        .text
        .get(start as usize..end as usize)
        .is_some_and(|leading| leading.contains("@dynamic"))
}

fn expanded_message(error: &ErrorValue) -> String {
    match error.message.as_str() {
        "Reference to non-exported class" => {
            if let Some(class_name) = error.context_value("className") {
                return format!(
                    "Reference to a non-exported class {class_name}. Consider exporting the class"
                );
            }
        }
        "Variable not initialized" => {
            return "Only initialized variables and constants can be referenced because the value \
                    of this variable is needed by the template compiler"
                .to_string();
        }
        "Destructuring not supported" => {
            return "Referencing an exported destructured variable or constant is not supported by \
                    the template compiler. Consider simplifying this to avoid destructuring"
                .to_string();
        }
        "Could not resolve type" => {
            if let Some(type_name) = error.context_value("typeName") {
                return format!("Could not resolve type {type_name}");
            }
        }
        "Function call not supported" => {
            let prefix = match error.context_value("name") {
                Some(name) => format!("Calling function '{name}', f"),
                None => "F".to_string(),
            };
            return prefix
                + "unction calls are not supported. Consider replacing the function or lambda \
                   with a reference to an exported function";
        }
        "Reference to a local symbol" => {
            if let Some(name) = error.context_value("name") {
                return format!(
                    "Reference to a local (non-exported) symbol '{name}'. Consider exporting the symbol"
                );
            }
        }
        _ => {}
    }
    error.message.clone()
}

struct Validator<'v> {
    source_file: &'v SourceFile,
    metadata: &'v MetadataMap,
    locals: FxHashSet<String>,
    /// Module entries already validated through a reference.
    visited: FxHashSet<String>,
}

impl Validator<'_> {
    fn report(&self, error: &ErrorValue) -> String {
        let mut position = String::new();
        if let Some(line) = error.line {
            position.push_str(&format!(":{}", line + 1));
            if let Some(character) = error.character {
                position.push_str(&format!(":{}", character + 1));
            }
        }
        let json = serde_json::to_string(&MetadataValue::error(error.clone()))
            .unwrap_or_else(|_| error.message.clone());
        format!(
            "{}{}: Metadata collected contains an error that will be reported at runtime: {}.\n  {}",
            self.source_file.file_name,
            position,
            expanded_message(error),
            json
        )
    }

    fn validate_all(&mut self, values: &[MetadataValue]) -> Result<(), String> {
        values.iter().try_for_each(|value| self.validate_expression(value))
    }

    fn validate_expression(&mut self, value: &MetadataValue) -> Result<(), String> {
        match value {
            MetadataValue::Array(items) => self.validate_all(items),
            MetadataValue::Object(members) => members
                .values()
                .try_for_each(|member| self.validate_expression(member)),
            MetadataValue::Symbolic(symbolic) => self.validate_symbolic(symbolic),
            _ => Ok(()),
        }
    }

    fn validate_symbolic(&mut self, symbolic: &MetadataSymbolic) -> Result<(), String> {
        match symbolic {
            MetadataSymbolic::Error(error) => Err(self.report(error)),
            MetadataSymbolic::Reference(reference) => {
                if !reference.is_global() {
                    return Ok(());
                }
                let Some(name) = reference.name.as_deref() else {
                    return Ok(());
                };
                // Lowered expressions are emitted as code, not read from metadata.
                if self.locals.contains(name) || is_lowered_symbol(name) {
                    return Ok(());
                }
                if !self.visited.insert(name.to_string()) {
                    return Ok(());
                }
                match self.metadata.get(name) {
                    Some(target) => self.validate_expression(target),
                    None => Ok(()),
                }
            }
            MetadataSymbolic::Function(function) => self.validate_function(function),
            MetadataSymbolic::Binop(binary) => {
                self.validate_expression(&binary.left)?;
                self.validate_expression(&binary.right)
            }
            MetadataSymbolic::Call(call) | MetadataSymbolic::New(call) => {
                self.validate_expression(&call.expression)?;
                match &call.arguments {
                    Some(arguments) => self.validate_all(arguments),
                    None => Ok(()),
                }
            }
            MetadataSymbolic::Index(index) => {
                self.validate_expression(&index.expression)?;
                self.validate_expression(&index.index)
            }
            MetadataSymbolic::Pre(prefix) => self.validate_expression(&prefix.operand),
            MetadataSymbolic::Select(select) => self.validate_expression(&select.expression),
            MetadataSymbolic::Spread(spread) => self.validate_expression(&spread.expression),
            MetadataSymbolic::If(conditional) => {
                self.validate_expression(&conditional.condition)?;
                self.validate_expression(&conditional.then_expression)?;
                self.validate_expression(&conditional.else_expression)
            }
            MetadataSymbolic::Class(_) | MetadataSymbolic::Interface => Ok(()),
        }
    }

    fn validate_function(&mut self, function: &FunctionMetadata) -> Result<(), String> {
        let Some(value) = &function.value else {
            return Ok(());
        };
        let saved = self.locals.clone();
        if let Some(parameters) = &function.parameters {
            self.locals.extend(parameters.iter().cloned());
        }
        let result = self.validate_expression(value);
        self.locals = saved;
        result
    }

    fn validate_decorators(&mut self, decorators: Option<&[MetadataValue]>) -> Result<(), String> {
        match decorators {
            Some(decorators) => self.validate_all(decorators),
            None => Ok(()),
        }
    }

    fn validate_member(
        &mut self,
        member: &MemberMetadata,
        class_has_decorators: bool,
    ) -> Result<(), String> {
        self.validate_decorators(member.decorators())?;
        let method = match member {
            MemberMetadata::Constructor(method) | MemberMetadata::Method(method) => method,
            MemberMetadata::Property(_) => return Ok(()),
        };
        if let Some(parameter_decorators) = &method.parameter_decorators {
            for decorators in parameter_decorators.iter().flatten() {
                self.validate_all(decorators)?;
            }
        }
        // Constructor parameter types only matter for injectable classes.
        if class_has_decorators && matches!(member, MemberMetadata::Constructor(_)) {
            if let Some(parameters) = &method.parameters {
                self.validate_all(parameters)?;
            }
        }
        Ok(())
    }

    fn validate_class(&mut self, class: &ClassMetadata) -> Result<(), String> {
        self.validate_decorators(class.decorators.as_deref())?;
        let has_decorators = class
            .decorators
            .as_ref()
            .is_some_and(|decorators| !decorators.is_empty());
        if let Some(members) = &class.members {
            for member in members.values().flatten() {
                self.validate_member(member, has_decorators)?;
            }
        }
        if let Some(statics) = &class.statics {
            for value in statics.values() {
                match value.as_symbolic() {
                    Some(MetadataSymbolic::Function(function)) => self.validate_function(function)?,
                    _ => self.validate_expression(value)?,
                }
            }
        }
        Ok(())
    }
}
