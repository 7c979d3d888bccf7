//! Arena node layout and typed node data.
//!
//! Every node is a small `Node` header (kind, flags, range, data index) plus
//! one `NodeData` entry in the data pool. Child links inside the data are
//! `NodeIndex` handles, never references, so trees can be rewritten by
//! appending new nodes without invalidating old ones.

use super::base::{NodeIndex, NodeList};

/// Node header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: u16,
    pub flags: u16,
    /// Start of the node's first token (trivia excluded).
    pub pos: u32,
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn is_kind(&self, kind: u16) -> bool {
        self.kind == kind
    }
}

/// Per-node links that do not belong in the hot header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
    /// The node this one was produced from by a rewrite, if any.
    pub original: NodeIndex,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
            original: NodeIndex::NONE,
        }
    }
}

// =============================================================================
// Names and literals
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// String, numeric and template literal text (cooked).
#[derive(Clone, Debug, PartialEq)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedNameData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComputedPropertyData {
    pub expression: NodeIndex,
}

// =============================================================================
// Signature elements and members
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParameterData {
    pub name: NodeIndex,
    pub constraint: NodeIndex,
    pub default: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParameterData {
    /// Decorators and modifier keywords, in source order.
    pub modifiers: Option<NodeList>,
    pub dot_dot_dot_token: bool,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecoratorData {
    pub expression: NodeIndex,
}

/// Property and method signatures in interfaces and type literals.
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_parameters: Option<NodeList>,
    /// `None` for property signatures.
    pub parameters: Option<NodeList>,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDeclData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub question_token: bool,
    pub exclamation_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Class methods and object literal methods.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDeclData {
    pub modifiers: Option<NodeList>,
    pub asterisk_token: bool,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstructorData {
    pub modifiers: Option<NodeList>,
    pub parameters: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccessorData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionTypeData {
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeLiteralData {
    pub members: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayTypeData {
    pub element_type: NodeIndex,
}

/// Union and intersection types.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

/// Parenthesized types.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedTypeData {
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LiteralTypeData {
    pub literal: NodeIndex,
}

// =============================================================================
// Binding patterns
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BindingElementData {
    pub dot_dot_dot_token: bool,
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

// =============================================================================
// Expressions
// =============================================================================

/// Array and object literal expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

/// Property access and element access expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub question_dot_token: bool,
    pub name_or_argument: NodeIndex,
}

/// Call and new expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
    /// `None` for `new X` without an argument list.
    pub arguments: Option<NodeList>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

/// Function declarations, function expressions and arrow functions.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionData {
    pub modifiers: Option<NodeList>,
    pub asterisk_token: bool,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    /// A block, or an expression for concise arrow bodies.
    pub body: NodeIndex,
}

/// Prefix, postfix and non-null expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Spread elements and spread assignments.
#[derive(Clone, Debug, PartialEq)]
pub struct SpreadData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AsExpressionData {
    pub expression: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprWithTypeArgsData {
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
}

// =============================================================================
// Statements and declarations
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableData {
    pub modifiers: Option<NodeList>,
    pub declaration_list: NodeIndex,
}

/// `var`/`let`/`const` is carried in the list node's flags.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclarationListData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub exclamation_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// Return and throw statements.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

/// Class declarations and class expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassData {
    /// Decorators and modifier keywords, in source order.
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub heritage_clauses: Option<NodeList>,
    pub members: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeritageData {
    /// `ExtendsKeyword` or `ImplementsKeyword`.
    pub token: u16,
    pub types: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub heritage_clauses: Option<NodeList>,
    pub members: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeAliasData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub members: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumMemberData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportDeclData {
    pub modifiers: Option<NodeList>,
    pub import_clause: NodeIndex,
    pub module_specifier: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportClauseData {
    pub is_type_only: bool,
    pub name: NodeIndex,
    pub named_bindings: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamespaceImportData {
    pub name: NodeIndex,
}

/// Named imports and named exports.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedImportsData {
    pub elements: NodeList,
}

/// Import and export specifiers (`propertyName as name`).
#[derive(Clone, Debug, PartialEq)]
pub struct SpecifierData {
    pub is_type_only: bool,
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportDeclData {
    pub modifiers: Option<NodeList>,
    pub is_type_only: bool,
    /// `NONE` for `export * from '...'`.
    pub export_clause: NodeIndex,
    pub module_specifier: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportAssignmentData {
    pub modifiers: Option<NodeList>,
    pub is_export_equals: bool,
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceFileData {
    pub statements: NodeList,
}

// =============================================================================
// Data pool
// =============================================================================

/// Typed payload of a node. Tokens and keyword nodes carry `Token`.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeData {
    Token,
    Identifier(IdentifierData),
    Literal(LiteralData),
    QualifiedName(QualifiedNameData),
    ComputedProperty(ComputedPropertyData),
    TypeParameter(TypeParameterData),
    Parameter(ParameterData),
    Decorator(DecoratorData),
    Signature(SignatureData),
    PropertyDecl(PropertyDeclData),
    MethodDecl(MethodDeclData),
    Constructor(ConstructorData),
    Accessor(AccessorData),
    TypeRef(TypeRefData),
    FunctionType(FunctionTypeData),
    TypeLiteral(TypeLiteralData),
    ArrayType(ArrayTypeData),
    CompositeType(CompositeTypeData),
    WrappedType(WrappedTypeData),
    LiteralType(LiteralTypeData),
    BindingPattern(BindingPatternData),
    BindingElement(BindingElementData),
    LiteralExpr(LiteralExprData),
    AccessExpr(AccessExprData),
    CallExpr(CallExprData),
    Parenthesized(ParenthesizedData),
    Function(FunctionData),
    UnaryExpr(UnaryExprData),
    BinaryExpr(BinaryExprData),
    ConditionalExpr(ConditionalExprData),
    Spread(SpreadData),
    AsExpression(AsExpressionData),
    ExprWithTypeArgs(ExprWithTypeArgsData),
    PropertyAssignment(PropertyAssignmentData),
    ShorthandProperty(ShorthandPropertyData),
    Block(BlockData),
    Variable(VariableData),
    VariableDeclarationList(VariableDeclarationListData),
    VariableDeclaration(VariableDeclarationData),
    ExprStatement(ExprStatementData),
    IfStatement(IfStatementData),
    Return(ReturnData),
    Class(ClassData),
    Heritage(HeritageData),
    Interface(InterfaceData),
    TypeAlias(TypeAliasData),
    Enum(EnumData),
    EnumMember(EnumMemberData),
    ImportDecl(ImportDeclData),
    ImportClause(ImportClauseData),
    NamespaceImport(NamespaceImportData),
    NamedImports(NamedImportsData),
    Specifier(SpecifierData),
    ExportDecl(ExportDeclData),
    ExportAssignment(ExportAssignmentData),
    SourceFile(SourceFileData),
}

type ChildFn<'f> = dyn FnMut(NodeIndex) -> NodeIndex + 'f;

#[inline]
fn one(f: &mut ChildFn<'_>, node: NodeIndex) -> NodeIndex {
    if node.is_none() { node } else { f(node) }
}

fn list(f: &mut ChildFn<'_>, nodes: &NodeList) -> NodeList {
    NodeList::from_vec(nodes.nodes.iter().map(|&node| one(f, node)).collect())
}

fn opt_list(f: &mut ChildFn<'_>, nodes: &Option<NodeList>) -> Option<NodeList> {
    nodes.as_ref().map(|nodes| list(f, nodes))
}

impl NodeData {
    /// Rebuild this payload with every child mapped through `f`, visiting
    /// children in source order. Absent children are not passed to `f`.
    pub fn map_children(&self, f: &mut ChildFn<'_>) -> NodeData {
        match self {
            NodeData::Token => NodeData::Token,
            NodeData::Identifier(d) => NodeData::Identifier(d.clone()),
            NodeData::Literal(d) => NodeData::Literal(d.clone()),
            NodeData::QualifiedName(d) => NodeData::QualifiedName(QualifiedNameData {
                left: one(f, d.left),
                right: one(f, d.right),
            }),
            NodeData::ComputedProperty(d) => NodeData::ComputedProperty(ComputedPropertyData {
                expression: one(f, d.expression),
            }),
            NodeData::TypeParameter(d) => NodeData::TypeParameter(TypeParameterData {
                name: one(f, d.name),
                constraint: one(f, d.constraint),
                default: one(f, d.default),
            }),
            NodeData::Parameter(d) => NodeData::Parameter(ParameterData {
                modifiers: opt_list(f, &d.modifiers),
                dot_dot_dot_token: d.dot_dot_dot_token,
                name: one(f, d.name),
                question_token: d.question_token,
                type_annotation: one(f, d.type_annotation),
                initializer: one(f, d.initializer),
            }),
            NodeData::Decorator(d) => NodeData::Decorator(DecoratorData {
                expression: one(f, d.expression),
            }),
            NodeData::Signature(d) => NodeData::Signature(SignatureData {
                modifiers: opt_list(f, &d.modifiers),
                name: one(f, d.name),
                question_token: d.question_token,
                type_parameters: opt_list(f, &d.type_parameters),
                parameters: opt_list(f, &d.parameters),
                type_annotation: one(f, d.type_annotation),
            }),
            NodeData::PropertyDecl(d) => NodeData::PropertyDecl(PropertyDeclData {
                modifiers: opt_list(f, &d.modifiers),
                name: one(f, d.name),
                question_token: d.question_token,
                exclamation_token: d.exclamation_token,
                type_annotation: one(f, d.type_annotation),
                initializer: one(f, d.initializer),
            }),
            NodeData::MethodDecl(d) => NodeData::MethodDecl(MethodDeclData {
                modifiers: opt_list(f, &d.modifiers),
                asterisk_token: d.asterisk_token,
                name: one(f, d.name),
                question_token: d.question_token,
                type_parameters: opt_list(f, &d.type_parameters),
                parameters: list(f, &d.parameters),
                type_annotation: one(f, d.type_annotation),
                body: one(f, d.body),
            }),
            NodeData::Constructor(d) => NodeData::Constructor(ConstructorData {
                modifiers: opt_list(f, &d.modifiers),
                parameters: list(f, &d.parameters),
                body: one(f, d.body),
            }),
            NodeData::Accessor(d) => NodeData::Accessor(AccessorData {
                modifiers: opt_list(f, &d.modifiers),
                name: one(f, d.name),
                parameters: list(f, &d.parameters),
                type_annotation: one(f, d.type_annotation),
                body: one(f, d.body),
            }),
            NodeData::TypeRef(d) => NodeData::TypeRef(TypeRefData {
                type_name: one(f, d.type_name),
                type_arguments: opt_list(f, &d.type_arguments),
            }),
            NodeData::FunctionType(d) => NodeData::FunctionType(FunctionTypeData {
                type_parameters: opt_list(f, &d.type_parameters),
                parameters: list(f, &d.parameters),
                type_annotation: one(f, d.type_annotation),
            }),
            NodeData::TypeLiteral(d) => NodeData::TypeLiteral(TypeLiteralData {
                members: list(f, &d.members),
            }),
            NodeData::ArrayType(d) => NodeData::ArrayType(ArrayTypeData {
                element_type: one(f, d.element_type),
            }),
            NodeData::CompositeType(d) => NodeData::CompositeType(CompositeTypeData {
                types: list(f, &d.types),
            }),
            NodeData::WrappedType(d) => NodeData::WrappedType(WrappedTypeData {
                type_node: one(f, d.type_node),
            }),
            NodeData::LiteralType(d) => NodeData::LiteralType(LiteralTypeData {
                literal: one(f, d.literal),
            }),
            NodeData::BindingPattern(d) => NodeData::BindingPattern(BindingPatternData {
                elements: list(f, &d.elements),
            }),
            NodeData::BindingElement(d) => NodeData::BindingElement(BindingElementData {
                dot_dot_dot_token: d.dot_dot_dot_token,
                property_name: one(f, d.property_name),
                name: one(f, d.name),
                initializer: one(f, d.initializer),
            }),
            NodeData::LiteralExpr(d) => NodeData::LiteralExpr(LiteralExprData {
                elements: list(f, &d.elements),
            }),
            NodeData::AccessExpr(d) => NodeData::AccessExpr(AccessExprData {
                expression: one(f, d.expression),
                question_dot_token: d.question_dot_token,
                name_or_argument: one(f, d.name_or_argument),
            }),
            NodeData::CallExpr(d) => NodeData::CallExpr(CallExprData {
                expression: one(f, d.expression),
                type_arguments: opt_list(f, &d.type_arguments),
                arguments: opt_list(f, &d.arguments),
            }),
            NodeData::Parenthesized(d) => NodeData::Parenthesized(ParenthesizedData {
                expression: one(f, d.expression),
            }),
            NodeData::Function(d) => NodeData::Function(FunctionData {
                modifiers: opt_list(f, &d.modifiers),
                asterisk_token: d.asterisk_token,
                name: one(f, d.name),
                type_parameters: opt_list(f, &d.type_parameters),
                parameters: list(f, &d.parameters),
                type_annotation: one(f, d.type_annotation),
                body: one(f, d.body),
            }),
            NodeData::UnaryExpr(d) => NodeData::UnaryExpr(UnaryExprData {
                operator: d.operator,
                operand: one(f, d.operand),
            }),
            NodeData::BinaryExpr(d) => NodeData::BinaryExpr(BinaryExprData {
                left: one(f, d.left),
                operator_token: d.operator_token,
                right: one(f, d.right),
            }),
            NodeData::ConditionalExpr(d) => NodeData::ConditionalExpr(ConditionalExprData {
                condition: one(f, d.condition),
                when_true: one(f, d.when_true),
                when_false: one(f, d.when_false),
            }),
            NodeData::Spread(d) => NodeData::Spread(SpreadData {
                expression: one(f, d.expression),
            }),
            NodeData::AsExpression(d) => NodeData::AsExpression(AsExpressionData {
                expression: one(f, d.expression),
                type_node: one(f, d.type_node),
            }),
            NodeData::ExprWithTypeArgs(d) => NodeData::ExprWithTypeArgs(ExprWithTypeArgsData {
                expression: one(f, d.expression),
                type_arguments: opt_list(f, &d.type_arguments),
            }),
            NodeData::PropertyAssignment(d) => {
                NodeData::PropertyAssignment(PropertyAssignmentData {
                    name: one(f, d.name),
                    initializer: one(f, d.initializer),
                })
            }
            NodeData::ShorthandProperty(d) => NodeData::ShorthandProperty(ShorthandPropertyData {
                name: one(f, d.name),
            }),
            NodeData::Block(d) => NodeData::Block(BlockData {
                statements: list(f, &d.statements),
            }),
            NodeData::Variable(d) => NodeData::Variable(VariableData {
                modifiers: opt_list(f, &d.modifiers),
                declaration_list: one(f, d.declaration_list),
            }),
            NodeData::VariableDeclarationList(d) => {
                NodeData::VariableDeclarationList(VariableDeclarationListData {
                    declarations: list(f, &d.declarations),
                })
            }
            NodeData::VariableDeclaration(d) => {
                NodeData::VariableDeclaration(VariableDeclarationData {
                    name: one(f, d.name),
                    exclamation_token: d.exclamation_token,
                    type_annotation: one(f, d.type_annotation),
                    initializer: one(f, d.initializer),
                })
            }
            NodeData::ExprStatement(d) => NodeData::ExprStatement(ExprStatementData {
                expression: one(f, d.expression),
            }),
            NodeData::IfStatement(d) => NodeData::IfStatement(IfStatementData {
                expression: one(f, d.expression),
                then_statement: one(f, d.then_statement),
                else_statement: one(f, d.else_statement),
            }),
            NodeData::Return(d) => NodeData::Return(ReturnData {
                expression: one(f, d.expression),
            }),
            NodeData::Class(d) => NodeData::Class(ClassData {
                modifiers: opt_list(f, &d.modifiers),
                name: one(f, d.name),
                type_parameters: opt_list(f, &d.type_parameters),
                heritage_clauses: opt_list(f, &d.heritage_clauses),
                members: list(f, &d.members),
            }),
            NodeData::Heritage(d) => NodeData::Heritage(HeritageData {
                token: d.token,
                types: list(f, &d.types),
            }),
            NodeData::Interface(d) => NodeData::Interface(InterfaceData {
                modifiers: opt_list(f, &d.modifiers),
                name: one(f, d.name),
                type_parameters: opt_list(f, &d.type_parameters),
                heritage_clauses: opt_list(f, &d.heritage_clauses),
                members: list(f, &d.members),
            }),
            NodeData::TypeAlias(d) => NodeData::TypeAlias(TypeAliasData {
                modifiers: opt_list(f, &d.modifiers),
                name: one(f, d.name),
                type_parameters: opt_list(f, &d.type_parameters),
                type_node: one(f, d.type_node),
            }),
            NodeData::Enum(d) => NodeData::Enum(EnumData {
                modifiers: opt_list(f, &d.modifiers),
                name: one(f, d.name),
                members: list(f, &d.members),
            }),
            NodeData::EnumMember(d) => NodeData::EnumMember(EnumMemberData {
                name: one(f, d.name),
                initializer: one(f, d.initializer),
            }),
            NodeData::ImportDecl(d) => NodeData::ImportDecl(ImportDeclData {
                modifiers: opt_list(f, &d.modifiers),
                import_clause: one(f, d.import_clause),
                module_specifier: one(f, d.module_specifier),
            }),
            NodeData::ImportClause(d) => NodeData::ImportClause(ImportClauseData {
                is_type_only: d.is_type_only,
                name: one(f, d.name),
                named_bindings: one(f, d.named_bindings),
            }),
            NodeData::NamespaceImport(d) => NodeData::NamespaceImport(NamespaceImportData {
                name: one(f, d.name),
            }),
            NodeData::NamedImports(d) => NodeData::NamedImports(NamedImportsData {
                elements: list(f, &d.elements),
            }),
            NodeData::Specifier(d) => NodeData::Specifier(SpecifierData {
                is_type_only: d.is_type_only,
                property_name: one(f, d.property_name),
                name: one(f, d.name),
            }),
            NodeData::ExportDecl(d) => NodeData::ExportDecl(ExportDeclData {
                modifiers: opt_list(f, &d.modifiers),
                is_type_only: d.is_type_only,
                export_clause: one(f, d.export_clause),
                module_specifier: one(f, d.module_specifier),
            }),
            NodeData::ExportAssignment(d) => NodeData::ExportAssignment(ExportAssignmentData {
                modifiers: opt_list(f, &d.modifiers),
                is_export_equals: d.is_export_equals,
                expression: one(f, d.expression),
            }),
            NodeData::SourceFile(d) => NodeData::SourceFile(SourceFileData {
                statements: list(f, &d.statements),
            }),
        }
    }

    /// Call `f` for every present child, in source order.
    pub fn for_each_child(&self, f: &mut dyn FnMut(NodeIndex)) {
        let _ = self.map_children(&mut |child| {
            f(child);
            child
        });
    }
}

/// Data-oriented syntax tree storage.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,
    pub data: Vec<NodeData>,
}

macro_rules! typed_getters {
    ($($(#[$doc:meta])* $getter:ident => $variant:ident($data:ty);)*) => {
        impl NodeArena {
            $(
                $(#[$doc])*
                #[inline]
                pub fn $getter(&self, node: &Node) -> Option<&$data> {
                    match self.data.get(node.data_index as usize)? {
                        NodeData::$variant(data) => Some(data),
                        _ => None,
                    }
                }
            )*
        }
    };
}

typed_getters! {
    get_identifier => Identifier(IdentifierData);
    /// String, numeric and template literals.
    get_literal => Literal(LiteralData);
    get_qualified_name => QualifiedName(QualifiedNameData);
    get_computed_property => ComputedProperty(ComputedPropertyData);
    get_type_parameter => TypeParameter(TypeParameterData);
    get_parameter => Parameter(ParameterData);
    get_decorator => Decorator(DecoratorData);
    get_signature => Signature(SignatureData);
    get_property_decl => PropertyDecl(PropertyDeclData);
    get_method_decl => MethodDecl(MethodDeclData);
    get_constructor => Constructor(ConstructorData);
    get_accessor => Accessor(AccessorData);
    get_type_ref => TypeRef(TypeRefData);
    get_function_type => FunctionType(FunctionTypeData);
    get_type_literal => TypeLiteral(TypeLiteralData);
    get_array_type => ArrayType(ArrayTypeData);
    get_composite_type => CompositeType(CompositeTypeData);
    get_wrapped_type => WrappedType(WrappedTypeData);
    get_literal_type => LiteralType(LiteralTypeData);
    get_binding_pattern => BindingPattern(BindingPatternData);
    get_binding_element => BindingElement(BindingElementData);
    /// Array and object literal expressions.
    get_literal_expr => LiteralExpr(LiteralExprData);
    /// Property and element access expressions.
    get_access_expr => AccessExpr(AccessExprData);
    /// Call and new expressions.
    get_call_expr => CallExpr(CallExprData);
    get_parenthesized => Parenthesized(ParenthesizedData);
    /// Function declarations, function expressions and arrow functions.
    get_function => Function(FunctionData);
    get_unary_expr => UnaryExpr(UnaryExprData);
    get_binary_expr => BinaryExpr(BinaryExprData);
    get_conditional_expr => ConditionalExpr(ConditionalExprData);
    get_spread => Spread(SpreadData);
    get_as_expression => AsExpression(AsExpressionData);
    get_expr_with_type_args => ExprWithTypeArgs(ExprWithTypeArgsData);
    get_property_assignment => PropertyAssignment(PropertyAssignmentData);
    get_shorthand_property => ShorthandProperty(ShorthandPropertyData);
    get_block => Block(BlockData);
    /// Variable statements.
    get_variable => Variable(VariableData);
    get_variable_declaration_list => VariableDeclarationList(VariableDeclarationListData);
    get_variable_declaration => VariableDeclaration(VariableDeclarationData);
    get_expression_statement => ExprStatement(ExprStatementData);
    get_if_statement => IfStatement(IfStatementData);
    /// Return and throw statements.
    get_return_statement => Return(ReturnData);
    /// Class declarations and class expressions.
    get_class => Class(ClassData);
    get_heritage_clause => Heritage(HeritageData);
    get_interface => Interface(InterfaceData);
    get_type_alias => TypeAlias(TypeAliasData);
    get_enum => Enum(EnumData);
    get_enum_member => EnumMember(EnumMemberData);
    get_import_decl => ImportDecl(ImportDeclData);
    get_import_clause => ImportClause(ImportClauseData);
    get_namespace_import => NamespaceImport(NamespaceImportData);
    /// Named imports and named exports.
    get_named_imports => NamedImports(NamedImportsData);
    /// Import and export specifiers.
    get_specifier => Specifier(SpecifierData);
    get_export_decl => ExportDecl(ExportDeclData);
    get_export_assignment => ExportAssignment(ExportAssignmentData);
    get_source_file => SourceFile(SourceFileData);
}
