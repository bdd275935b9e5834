//! AST node definitions.
//!
//! Nodes are arena-allocated and immutable once built; transforms produce
//! new nodes rather than mutating input nodes. Only the syntax the
//! reflection pass reads or synthesizes is modeled.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use tsreflect_core::intern::InternedString;
use tsreflect_core::text::TextSpan;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The kind of this node.
    pub kind: SyntaxKind,
    /// Source position span.
    pub span: TextSpan,
    /// Node flags.
    pub flags: NodeFlags,
    /// Modifier flags (for declarations).
    pub modifier_flags: ModifierFlags,
    /// Unique node ID (assigned during binding).
    pub id: NodeId,
    /// Associated symbol (set during binding).
    pub symbol: Option<SymbolId>,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: TextSpan::from_bounds(start, end),
            flags: NodeFlags::NONE,
            modifier_flags: ModifierFlags::NONE,
            id: NodeId::INVALID,
            symbol: None,
        }
    }

    /// Node data for a synthesized node with no source position.
    pub fn synthesized(kind: SyntaxKind) -> Self {
        Self {
            kind,
            span: TextSpan::empty(0),
            flags: NodeFlags::SYNTHESIZED,
            modifier_flags: ModifierFlags::NONE,
            id: NodeId::INVALID,
            symbol: None,
        }
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub file_name: String,
    pub text: String,
    /// Whether this file is a declaration file (.d.ts).
    pub is_declaration_file: bool,
}

// ============================================================================
// Identifier and property names
// ============================================================================

#[derive(Debug, Clone)]
pub struct Identifier {
    pub data: NodeData,
    /// The interned text of this identifier.
    pub text: InternedString,
    /// The actual text of this identifier as a plain string.
    pub text_name: String,
    /// The lexical scope this identifier resolves in. Set on identifiers
    /// minted by the transformer so they bind like hand-written references.
    pub scope: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct StringLiteralNode {
    pub data: NodeData,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct NumericLiteralNode {
    pub data: NodeData,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// A declaration name: identifier, literal, or computed.
#[derive(Debug, Clone)]
pub enum PropertyName<'a> {
    Identifier(Identifier),
    StringLiteral(StringLiteralNode),
    NumericLiteral(NumericLiteralNode),
    Computed(ComputedPropertyName<'a>),
}

impl PropertyName<'_> {
    pub fn data(&self) -> &NodeData {
        match self {
            PropertyName::Identifier(n) => &n.data,
            PropertyName::StringLiteral(n) => &n.data,
            PropertyName::NumericLiteral(n) => &n.data,
            PropertyName::Computed(n) => &n.data,
        }
    }
}

/// A binding name: a simple identifier or a destructuring pattern.
/// Pattern contents are not modeled; the pass only needs to tell the
/// two apart.
#[derive(Debug, Clone)]
pub enum BindingName {
    Identifier(Identifier),
    ObjectPattern(NodeData),
    ArrayPattern(NodeData),
}

impl BindingName {
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            BindingName::Identifier(ident) => Some(ident),
            _ => None,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub enum Expression<'a> {
    Identifier(Identifier),
    StringLiteral(StringLiteralNode),
    NumericLiteral(NumericLiteralNode),
    BooleanLiteral(BooleanLiteralNode),
    NullLiteral(NodeData),
    ArrayLiteral(ArrayLiteralExpression<'a>),
    ObjectLiteral(ObjectLiteralExpression<'a>),
    PropertyAccess(PropertyAccessExpression<'a>),
    Call(CallExpression<'a>),
    Arrow(ArrowFunction<'a>),
    Binary(BinaryExpression<'a>),
    Spread(SpreadElement<'a>),
}

impl Expression<'_> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::StringLiteral(n) => &n.data,
            Expression::NumericLiteral(n) => &n.data,
            Expression::BooleanLiteral(n) => &n.data,
            Expression::NullLiteral(data) => data,
            Expression::ArrayLiteral(n) => &n.data,
            Expression::ObjectLiteral(n) => &n.data,
            Expression::PropertyAccess(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::Arrow(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Spread(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BooleanLiteralNode {
    pub data: NodeData,
    pub value: bool,
}

#[derive(Debug, Clone)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectLiteralElement<'a>>,
}

#[derive(Debug, Clone)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(PropertyAssignment<'a>),
    SpreadAssignment(SpreadAssignment<'a>),
}

#[derive(Debug, Clone)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct SpreadAssignment<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub name: Identifier,
}

#[derive(Debug, Clone)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

/// An arrow function with an expression body. Block bodies are not
/// modeled; the synthesizer only emits expression-bodied arrows.
#[derive(Debug, Clone)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub body: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    /// Operator token kind (only `BarBarToken` is synthesized).
    pub operator: SyntaxKind,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone)]
pub struct Decorator<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub decorators: NodeList<'a, Decorator<'a>>,
    pub name: BindingName,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct PropertyDeclarationNode<'a> {
    pub data: NodeData,
    pub decorators: NodeList<'a, Decorator<'a>>,
    pub name: PropertyName<'a>,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct ConstructorDeclaration<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
}

#[derive(Debug, Clone)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub decorators: NodeList<'a, Decorator<'a>>,
    pub name: PropertyName<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
}

#[derive(Debug, Clone)]
pub enum ClassElement<'a> {
    PropertyDeclaration(PropertyDeclarationNode<'a>),
    Constructor(ConstructorDeclaration<'a>),
    MethodDeclaration(MethodDeclaration<'a>),
}

#[derive(Debug, Clone)]
pub struct ExpressionWithTypeArguments<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct HeritageClause<'a> {
    pub data: NodeData,
    /// ExtendsKeyword or ImplementsKeyword.
    pub token: SyntaxKind,
    pub types: NodeList<'a, ExpressionWithTypeArguments<'a>>,
}

#[derive(Debug, Clone)]
pub struct ClassDeclaration<'a> {
    pub data: NodeData,
    pub decorators: NodeList<'a, Decorator<'a>>,
    pub name: Option<Identifier>,
    pub heritage_clauses: NodeList<'a, HeritageClause<'a>>,
    pub members: NodeList<'a, ClassElement<'a>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct FunctionDeclarationNode<'a> {
    pub data: NodeData,
    pub name: Option<Identifier>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct ModuleBlock<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct ModuleDeclarationNode<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub body: Option<&'a ModuleBlock<'a>>,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub enum Statement<'a> {
    ClassDeclaration(ClassDeclaration<'a>),
    FunctionDeclaration(FunctionDeclarationNode<'a>),
    ModuleDeclaration(ModuleDeclarationNode<'a>),
    Block(Block<'a>),
    ExpressionStatement(ExpressionStatement<'a>),
}
