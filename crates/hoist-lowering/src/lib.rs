//! Lowering of non-serializable metadata expressions.
//!
//! Metadata consumers only see the serialized metadata of a module, so lambdas
//! and the values of a few well-known configuration fields cannot be read
//! from it. Lowering moves such expressions into exported top-level bindings
//! and leaves a reference to the binding in the metadata.
//!
//! - `eligibility` - structural positions expressions may be lowered from
//! - `export_table` - names a module already exports locally
//! - `lower_metadata` - the decision engine, run as a metadata transformer,
//!   recording lowering requests per module
//! - `lower_expressions` - the source rewrite that applies recorded requests
//! - `partial_module` - static field annotation from partially compiled modules
//! - `program` - parsed modules keyed by file name

pub mod eligibility;
pub mod export_table;
pub mod lower_expressions;
pub mod lower_metadata;
pub mod partial_module;
pub mod program;

pub use eligibility::is_eligible_for_lowering;
pub use export_table::build_export_table;
pub use lower_expressions::{ExpressionLoweringTransform, lower_expressions};
pub use lower_metadata::{
    LOWERABLE_FIELD_NAMES, LowerMetadataTransform, LoweringRequest, R3_LOWERABLE_FIELD_NAMES,
    RequestLocationMap, RequestsMap, lowerable_field_names,
};
pub use partial_module::{PartialModule, PartialModuleMetadataTransformer};
pub use program::{ModuleProvider, Program};
