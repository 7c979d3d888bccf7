//! Deciding which metadata expressions are lowered.
//!
//! `LowerMetadataTransform` is a [`MetadataTransformer`]. While the collector
//! walks a module, its substitution replaces every lowerable value with a
//! reference to a fresh `ɵn` name and records a [`LoweringRequest`] at the
//! node's position. The rewriter later applies the recorded requests to the
//! module's syntax tree.

use crate::eligibility::is_eligible_for_lowering;
use crate::export_table::build_export_table;
use hoist_metadata::{
    MetadataCache, MetadataError, MetadataSubstitution, MetadataTransformer, MetadataValue,
    is_lowered_symbol, lowered_symbol,
};
use hoist_parser::{NodeArena, NodeIndex, SourceFile, syntax_kind_ext};
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Object literal fields whose values are lowered.
pub const LOWERABLE_FIELD_NAMES: &[&str] = &["useValue", "useFactory", "data", "id", "loadChildren"];

/// Additional fields lowered when compiling for Ivy.
pub const R3_LOWERABLE_FIELD_NAMES: &[&str] = &["providers", "imports", "exports"];

pub fn lowerable_field_names(enable_ivy: bool) -> FxHashSet<String> {
    let mut names: FxHashSet<String> = LOWERABLE_FIELD_NAMES.iter().map(|name| name.to_string()).collect();
    if enable_ivy {
        names.extend(R3_LOWERABLE_FIELD_NAMES.iter().map(|name| name.to_string()));
    }
    names
}

/// A node range to be replaced by a reference to `name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoweringRequest {
    pub kind: u16,
    pub location: u32,
    pub end: u32,
    pub name: String,
}

/// Requests of one module keyed by start position, in recording order.
pub type RequestLocationMap = IndexMap<u32, LoweringRequest>;

pub trait RequestsMap {
    /// Lowering requests for `source_file`; empty when nothing is lowered.
    fn get_requests(&self, source_file: &SourceFile) -> Result<RequestLocationMap, MetadataError>;
}

pub struct LowerMetadataTransform {
    lowerable_field_names: FxHashSet<String>,
    requests: RefCell<FxHashMap<String, Rc<RefCell<RequestLocationMap>>>>,
    cache: RefCell<Weak<MetadataCache>>,
}

impl LowerMetadataTransform {
    pub fn new<I, S>(lowerable_field_names: I) -> LowerMetadataTransform
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LowerMetadataTransform {
            lowerable_field_names: lowerable_field_names.into_iter().map(Into::into).collect(),
            requests: RefCell::new(FxHashMap::default()),
            cache: RefCell::new(Weak::new()),
        }
    }
}

impl RequestsMap for LowerMetadataTransform {
    fn get_requests(&self, source_file: &SourceFile) -> Result<RequestLocationMap, MetadataError> {
        let recorded = self.requests.borrow().get(&source_file.file_name).cloned();
        let requests = match recorded {
            Some(requests) => requests,
            None => {
                // Collecting the module's metadata starts this transformer,
                // which records the requests.
                let cache = self.cache.borrow().upgrade().ok_or_else(|| {
                    MetadataError::CacheReleased {
                        file_name: source_file.file_name.clone(),
                    }
                })?;
                cache.get_metadata(source_file)?;
                let recorded = self.requests.borrow().get(&source_file.file_name).cloned();
                match recorded {
                    Some(requests) => requests,
                    // Declaration files and scripts are never transformed.
                    None => return Ok(RequestLocationMap::new()),
                }
            }
        };
        let requests = requests.borrow().clone();
        Ok(requests)
    }
}

impl MetadataTransformer for LowerMetadataTransform {
    fn connect(&self, cache: Weak<MetadataCache>) {
        *self.cache.borrow_mut() = cache;
    }

    fn start<'a>(&'a self, source_file: &'a SourceFile) -> Option<Box<dyn MetadataSubstitution + 'a>> {
        let requests = Rc::new(RefCell::new(RequestLocationMap::new()));
        self.requests
            .borrow_mut()
            .insert(source_file.file_name.clone(), Rc::clone(&requests));
        trace!(file = %source_file.file_name, "lowering transformer started");
        Some(Box::new(LoweringSubstitution {
            source_file,
            arena: &source_file.arena,
            lowerable_field_names: &self.lowerable_field_names,
            requests,
            next_id: 0,
            export_table: OnceCell::new(),
            should_lower: FxHashMap::default(),
            lowerable_parent: FxHashMap::default(),
        }))
    }
}

/// Per-module decision state; lives for one collection of the module.
struct LoweringSubstitution<'a> {
    source_file: &'a SourceFile,
    arena: &'a NodeArena,
    lowerable_field_names: &'a FxHashSet<String>,
    requests: Rc<RefCell<RequestLocationMap>>,
    next_id: usize,
    export_table: OnceCell<FxHashSet<String>>,
    should_lower: FxHashMap<NodeIndex, bool>,
    /// Whether some ancestor of a node is lowered itself.
    lowerable_parent: FxHashMap<NodeIndex, bool>,
}

impl LoweringSubstitution<'_> {
    fn replace_node(&mut self, node: NodeIndex) -> MetadataValue {
        let name = lowered_symbol(self.next_id);
        self.next_id += 1;
        if let Some(header) = self.arena.get(node) {
            debug!(
                file = %self.source_file.file_name,
                name = %name,
                pos = header.pos,
                end = header.end,
                "lowering expression"
            );
            self.requests.borrow_mut().insert(
                header.pos,
                LoweringRequest {
                    kind: header.kind,
                    location: header.pos,
                    end: header.end,
                    name: name.clone(),
                },
            );
        }
        MetadataValue::global_reference(name)
    }

    fn is_exported_symbol(&self, node: NodeIndex) -> bool {
        let Some(name) = self.arena.get_identifier_text(node) else {
            return false;
        };
        self.export_table
            .get_or_init(|| build_export_table(self.source_file))
            .contains(name)
    }

    fn is_exported_property_access(&self, node: NodeIndex) -> bool {
        self.arena
            .get(node)
            .filter(|header| header.kind == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION)
            .and_then(|header| self.arena.get_access_expr(header))
            .is_some_and(|access| self.is_exported_symbol(access.expression))
    }

    /// `node` is the value of `name: node` in an object literal, with `name`
    /// one of the lowerable field names.
    fn is_lowerable_field_value(&self, node: NodeIndex) -> bool {
        let arena = self.arena;
        let property = arena.parent_of(node);
        let Some(assignment) = arena
            .get(property)
            .filter(|header| header.kind == syntax_kind_ext::PROPERTY_ASSIGNMENT)
            .and_then(|header| arena.get_property_assignment(header))
        else {
            return false;
        };
        if assignment.initializer != node
            || !arena.is_kind(arena.parent_of(property), syntax_kind_ext::OBJECT_LITERAL_EXPRESSION)
        {
            return false;
        }
        arena
            .get_identifier_text(assignment.name)
            .is_some_and(|name| self.lowerable_field_names.contains(name))
    }

    fn should_be_lowered(&mut self, node: NodeIndex) -> bool {
        if let Some(&known) = self.should_lower.get(&node) {
            return known;
        }
        let lowered = match self.arena.kind_of(node) {
            None => false,
            Some(syntax_kind_ext::ARROW_FUNCTION | syntax_kind_ext::FUNCTION_EXPRESSION)
                if is_eligible_for_lowering(self.arena, node) =>
            {
                true
            }
            Some(_) => {
                self.is_lowerable_field_value(node)
                    && is_eligible_for_lowering(self.arena, node)
                    && !self.is_exported_symbol(node)
                    && !self.is_exported_property_access(node)
            }
        };
        self.should_lower.insert(node, lowered);
        lowered
    }

    fn has_lowerable_parent(&mut self, node: NodeIndex) -> bool {
        // Walk up to the first node with a known answer, then fill the
        // memo table back down.
        let mut chain: SmallVec<[NodeIndex; 16]> = SmallVec::new();
        let mut current = node;
        let mut lowerable = false;
        while current.is_some() {
            if let Some(&known) = self.lowerable_parent.get(&current) {
                lowerable = known;
                break;
            }
            chain.push(current);
            current = self.arena.parent_of(current);
        }
        for &link in chain.iter().rev() {
            let parent = self.arena.parent_of(link);
            lowerable = lowerable || self.should_be_lowered(parent);
            self.lowerable_parent.insert(link, lowerable);
        }
        lowerable
    }

    fn is_lowerable(&mut self, node: NodeIndex) -> bool {
        self.should_be_lowered(node) && !self.has_lowerable_parent(node)
    }
}

/// A reference produced by an earlier lowering.
fn is_rewritten(value: &MetadataValue) -> bool {
    value
        .as_reference()
        .filter(|reference| reference.is_global())
        .and_then(|reference| reference.name.as_deref())
        .is_some_and(is_lowered_symbol)
}

impl MetadataSubstitution for LoweringSubstitution<'_> {
    fn substitute(&mut self, value: MetadataValue, node: NodeIndex) -> MetadataValue {
        if !value.is_primitive() && !is_rewritten(&value) && self.is_lowerable(node) {
            return self.replace_node(node);
        }
        value
    }
}
