//! Syntax utilities shared by source rewrites.
//!
//! - `factory` - builders for synthesized nodes
//! - `visitor` - child visiting with copy-on-write node updates

pub mod factory;
pub mod visitor;
