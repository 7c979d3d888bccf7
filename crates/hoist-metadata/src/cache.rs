//! Per-module metadata cache and transformer composition.
//!
//! Transformers are started once per module, in registration order. Each may
//! contribute a substitution; the substitutions are applied as one chain while
//! the collector walks the module, so a value produced for a node flows
//! through every transformer before it is stored.

use crate::error::MetadataError;
use crate::schema::{MetadataValue, ModuleMetadata};
use hoist_common::is_ts_file_name;
use hoist_parser::{NodeIndex, SourceFile};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Rewrites a metadata value produced for `node`.
pub trait MetadataSubstitution {
    fn substitute(&mut self, value: MetadataValue, node: NodeIndex) -> MetadataValue;
}

impl<F> MetadataSubstitution for F
where
    F: FnMut(MetadataValue, NodeIndex) -> MetadataValue,
{
    fn substitute(&mut self, value: MetadataValue, node: NodeIndex) -> MetadataValue {
        self(value, node)
    }
}

/// Substitutions applied in order; each sees the previous one's output for
/// the same node.
#[derive(Default)]
pub struct SubstitutionChain<'a> {
    substitutions: Vec<Box<dyn MetadataSubstitution + 'a>>,
}

impl<'a> SubstitutionChain<'a> {
    pub fn new() -> SubstitutionChain<'a> {
        SubstitutionChain {
            substitutions: Vec::new(),
        }
    }

    pub fn push(&mut self, substitution: Box<dyn MetadataSubstitution + 'a>) {
        self.substitutions.push(substitution);
    }

    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}

impl MetadataSubstitution for SubstitutionChain<'_> {
    fn substitute(&mut self, value: MetadataValue, node: NodeIndex) -> MetadataValue {
        self.substitutions
            .iter_mut()
            .fold(value, |value, substitution| substitution.substitute(value, node))
    }
}

/// A participant in metadata collection.
pub trait MetadataTransformer {
    /// Called once when the transformer is registered with a cache. The cache
    /// may be used later to force collection of a module.
    fn connect(&self, _cache: Weak<MetadataCache>) {}

    /// Prepare for collecting `source_file`. Returns the substitution to apply
    /// while collecting it, if any.
    fn start<'a>(&'a self, source_file: &'a SourceFile)
    -> Option<Box<dyn MetadataSubstitution + 'a>>;
}

/// The collector behind a [`MetadataCache`].
pub trait CollectMetadata {
    fn get_metadata(
        &self,
        source_file: &SourceFile,
        strict: bool,
        substitution: Option<&mut dyn MetadataSubstitution>,
    ) -> Result<Option<ModuleMetadata>, MetadataError>;
}

/// Memoized metadata per file name.
///
/// A module without metadata (declaration files, scripts, modules with no
/// exports) is cached as `None` as well.
pub struct MetadataCache {
    collector: Box<dyn CollectMetadata>,
    strict: bool,
    transformers: Vec<Rc<dyn MetadataTransformer>>,
    metadata: RefCell<FxHashMap<String, Option<Rc<ModuleMetadata>>>>,
}

impl MetadataCache {
    pub fn new(
        collector: Box<dyn CollectMetadata>,
        strict: bool,
        transformers: Vec<Rc<dyn MetadataTransformer>>,
    ) -> Rc<MetadataCache> {
        let cache = Rc::new(MetadataCache {
            collector,
            strict,
            transformers,
            metadata: RefCell::new(FxHashMap::default()),
        });
        for transformer in &cache.transformers {
            transformer.connect(Rc::downgrade(&cache));
        }
        cache
    }

    pub fn is_cached(&self, file_name: &str) -> bool {
        self.metadata.borrow().contains_key(file_name)
    }

    pub fn get_metadata(
        &self,
        source_file: &SourceFile,
    ) -> Result<Option<Rc<ModuleMetadata>>, MetadataError> {
        if let Some(cached) = self.metadata.borrow().get(&source_file.file_name) {
            trace!(file = %source_file.file_name, "metadata cache hit");
            return Ok(cached.clone());
        }
        debug!(file = %source_file.file_name, "collecting metadata");

        let mut chain = SubstitutionChain::new();
        // Only modules that are not declaration files are transformed.
        if !source_file.is_declaration_file && source_file.is_external_module() {
            for transformer in &self.transformers {
                if let Some(substitution) = transformer.start(source_file) {
                    chain.push(substitution);
                }
            }
        }
        trace!(
            file = %source_file.file_name,
            substitutions = chain.len(),
            "transformers started"
        );

        let strict = self.strict && is_ts_file_name(&source_file.file_name);
        let substitution: Option<&mut dyn MetadataSubstitution> = if chain.is_empty() {
            None
        } else {
            Some(&mut chain)
        };
        let result = self
            .collector
            .get_metadata(source_file, strict, substitution)?
            .map(Rc::new);

        self.metadata
            .borrow_mut()
            .insert(source_file.file_name.clone(), result.clone());
        Ok(result)
    }
}
