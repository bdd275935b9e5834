//! Syntax kinds for AST nodes and tokens.

/// The kind of a syntax node or token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Tokens
    BarBarToken,
    ExtendsKeyword,
    ImplementsKeyword,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,

    // Names
    Identifier,
    ComputedPropertyName,

    // Expressions
    StringLiteral,
    NumericLiteral,
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    CallExpression,
    ArrowFunction,
    BinaryExpression,
    SpreadElement,
    ExpressionWithTypeArguments,

    // Object literal elements
    PropertyAssignment,
    SpreadAssignment,

    // Declarations and members
    Parameter,
    Decorator,
    PropertyDeclaration,
    MethodDeclaration,
    Constructor,
    ObjectBindingPattern,
    ArrayBindingPattern,

    // Statements
    Block,
    ExpressionStatement,
    FunctionDeclaration,
    ClassDeclaration,
    ModuleDeclaration,
    ModuleBlock,
    HeritageClause,

    SourceFile,
}
