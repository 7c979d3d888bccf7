//! Node kinds above the token range, node flags, and modifier flags.

/// Node kinds for non-token syntax. Token kinds come from
/// [`hoist_scanner::SyntaxKind`] and are compared as `SyntaxKind::X as u16`.
pub mod syntax_kind_ext {
    pub const SOURCE_FILE: u16 = 300;
    // Names
    pub const QUALIFIED_NAME: u16 = 301;
    pub const COMPUTED_PROPERTY_NAME: u16 = 302;
    // Signature elements
    pub const TYPE_PARAMETER: u16 = 303;
    pub const PARAMETER: u16 = 304;
    pub const DECORATOR: u16 = 305;
    // Type members
    pub const PROPERTY_SIGNATURE: u16 = 306;
    pub const PROPERTY_DECLARATION: u16 = 307;
    pub const METHOD_SIGNATURE: u16 = 308;
    pub const METHOD_DECLARATION: u16 = 309;
    pub const CONSTRUCTOR: u16 = 310;
    pub const GET_ACCESSOR: u16 = 311;
    pub const SET_ACCESSOR: u16 = 312;
    // Types
    pub const TYPE_REFERENCE: u16 = 320;
    pub const FUNCTION_TYPE: u16 = 321;
    pub const TYPE_LITERAL: u16 = 322;
    pub const ARRAY_TYPE: u16 = 323;
    pub const UNION_TYPE: u16 = 324;
    pub const INTERSECTION_TYPE: u16 = 325;
    pub const PARENTHESIZED_TYPE: u16 = 326;
    pub const LITERAL_TYPE: u16 = 327;
    // Binding patterns
    pub const OBJECT_BINDING_PATTERN: u16 = 330;
    pub const ARRAY_BINDING_PATTERN: u16 = 331;
    pub const BINDING_ELEMENT: u16 = 332;
    // Expressions
    pub const ARRAY_LITERAL_EXPRESSION: u16 = 340;
    pub const OBJECT_LITERAL_EXPRESSION: u16 = 341;
    pub const PROPERTY_ACCESS_EXPRESSION: u16 = 342;
    pub const ELEMENT_ACCESS_EXPRESSION: u16 = 343;
    pub const CALL_EXPRESSION: u16 = 344;
    pub const NEW_EXPRESSION: u16 = 345;
    pub const PARENTHESIZED_EXPRESSION: u16 = 346;
    pub const FUNCTION_EXPRESSION: u16 = 347;
    pub const ARROW_FUNCTION: u16 = 348;
    pub const PREFIX_UNARY_EXPRESSION: u16 = 349;
    pub const BINARY_EXPRESSION: u16 = 350;
    pub const CONDITIONAL_EXPRESSION: u16 = 351;
    pub const SPREAD_ELEMENT: u16 = 352;
    pub const CLASS_EXPRESSION: u16 = 353;
    pub const AS_EXPRESSION: u16 = 354;
    pub const EXPRESSION_WITH_TYPE_ARGUMENTS: u16 = 355;
    pub const POSTFIX_UNARY_EXPRESSION: u16 = 356;
    pub const NON_NULL_EXPRESSION: u16 = 357;
    // Statements
    pub const BLOCK: u16 = 360;
    pub const EMPTY_STATEMENT: u16 = 361;
    pub const VARIABLE_STATEMENT: u16 = 362;
    pub const EXPRESSION_STATEMENT: u16 = 363;
    pub const IF_STATEMENT: u16 = 364;
    pub const RETURN_STATEMENT: u16 = 365;
    pub const THROW_STATEMENT: u16 = 366;
    pub const VARIABLE_DECLARATION: u16 = 367;
    pub const VARIABLE_DECLARATION_LIST: u16 = 368;
    // Declarations
    pub const FUNCTION_DECLARATION: u16 = 370;
    pub const CLASS_DECLARATION: u16 = 371;
    pub const INTERFACE_DECLARATION: u16 = 372;
    pub const TYPE_ALIAS_DECLARATION: u16 = 373;
    pub const ENUM_DECLARATION: u16 = 374;
    pub const IMPORT_DECLARATION: u16 = 375;
    pub const IMPORT_CLAUSE: u16 = 376;
    pub const NAMESPACE_IMPORT: u16 = 377;
    pub const NAMED_IMPORTS: u16 = 378;
    pub const IMPORT_SPECIFIER: u16 = 379;
    pub const EXPORT_ASSIGNMENT: u16 = 380;
    pub const EXPORT_DECLARATION: u16 = 381;
    pub const NAMED_EXPORTS: u16 = 382;
    pub const EXPORT_SPECIFIER: u16 = 383;
    pub const HERITAGE_CLAUSE: u16 = 384;
    // Object literal members
    pub const PROPERTY_ASSIGNMENT: u16 = 390;
    pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = 391;
    pub const SPREAD_ASSIGNMENT: u16 = 392;
    // Enum members
    pub const ENUM_MEMBER: u16 = 393;
}

/// Flags stored on `Node::flags`.
pub mod node_flags {
    pub const NONE: u16 = 0;
    pub const LET: u16 = 1 << 0;
    pub const CONST: u16 = 1 << 1;
    pub const BLOCK_SCOPED: u16 = LET | CONST;
    /// Created by the node factory rather than the parser.
    pub const SYNTHESIZED: u16 = 1 << 4;
    /// An optional chain link (`a?.b`, `a?.()`).
    pub const OPTIONAL_CHAIN: u16 = 1 << 5;
    pub const THIS_NODE_HAS_ERROR: u16 = 1 << 6;
}

/// Modifier bits computed from a node's modifier list.
pub mod modifier_flags {
    pub const NONE: u32 = 0;
    pub const EXPORT: u32 = 1 << 0;
    pub const AMBIENT: u32 = 1 << 1;
    pub const PUBLIC: u32 = 1 << 2;
    pub const PRIVATE: u32 = 1 << 3;
    pub const PROTECTED: u32 = 1 << 4;
    pub const STATIC: u32 = 1 << 5;
    pub const READONLY: u32 = 1 << 6;
    pub const ABSTRACT: u32 = 1 << 7;
    pub const ASYNC: u32 = 1 << 8;
    pub const DEFAULT: u32 = 1 << 9;
    pub const CONST: u32 = 1 << 11;
    pub const DECORATOR: u32 = 1 << 12;
    pub const OVERRIDE: u32 = 1 << 13;
}
