//! Centralized limits and thresholds for the hoist compiler.
//!
//! Recursion limits live here so the parser, evaluator and rewriter agree on
//! how deep they may go before bailing out.

// =============================================================================
// Recursion Depth Limits (Parser / Evaluator / Emitter)
// =============================================================================

/// Maximum nesting depth accepted by the recursive-descent parser.
///
/// Deeper input is reported as a diagnostic and the remaining tokens of the
/// statement are skipped.
///
/// ```typescript
/// const x = [[[[[[[[[[ /* ... 1000 levels ... */ ]]]]]]]]]];
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 1_000;

/// Maximum depth for metadata expression evaluation.
///
/// Local constants are inlined on reference, so a chain of locals referring
/// to each other is bounded by this depth as well.
pub const MAX_EVALUATION_DEPTH: u32 = 500;

/// Maximum recursion depth for the printer.
pub const MAX_EMIT_RECURSION_DEPTH: u32 = 1_000;

/// Maximum depth for AST rewrites.
///
/// The lowering rewriter never descends into nested lexical scopes, so
/// hitting this limit means a pathological expression nest at module level.
pub const MAX_AST_DEPTH: u32 = 500;
