//! Synthetic AST node construction.
//!
//! The factory builds the nodes the transformer appends to declarations:
//! decorators, descriptor object literals, metadata calls, thunks. Tests
//! use the same factory to assemble input ASTs without a parser.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::types::{NodeFlags, NodeId};
use bumpalo::Bump;
use tsreflect_core::intern::StringInterner;

pub struct NodeFactory<'a> {
    arena: &'a Bump,
    interner: StringInterner,
}

impl<'a> NodeFactory<'a> {
    pub fn new(arena: &'a Bump, interner: StringInterner) -> Self {
        Self { arena, interner }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    // ========================================================================
    // Allocation helpers
    // ========================================================================

    /// Allocate a single node in the arena.
    pub fn alloc<T>(&self, node: T) -> &'a T {
        self.arena.alloc(node)
    }

    /// Allocate a node list in the arena.
    pub fn list<T: Clone>(&self, nodes: &[T]) -> &'a [T] {
        self.arena.alloc_slice_clone(nodes)
    }

    // ========================================================================
    // Names
    // ========================================================================

    /// A synthesized identifier.
    pub fn identifier(&self, text: &str) -> Identifier {
        Identifier {
            data: NodeData::synthesized(SyntaxKind::Identifier),
            text: self.interner.intern(text),
            text_name: text.to_string(),
            scope: None,
        }
    }

    /// A minted identifier reference, attached to a lexical scope so it
    /// resolves exactly as a hand-written reference would at that point.
    /// The synthesized flag is cleared: downstream emit must treat the
    /// reference as a live binding, not transformer output.
    pub fn identifier_reference(&self, text: &str, scope: Option<NodeId>) -> Identifier {
        let mut ident = self.identifier(text);
        ident.data.flags &= !NodeFlags::SYNTHESIZED;
        ident.scope = scope;
        ident
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn string_literal(&self, value: &str) -> Expression<'a> {
        Expression::StringLiteral(StringLiteralNode {
            data: NodeData::synthesized(SyntaxKind::StringLiteral),
            value: value.to_string(),
        })
    }

    pub fn numeric_literal(&self, value: f64) -> Expression<'a> {
        Expression::NumericLiteral(NumericLiteralNode {
            data: NodeData::synthesized(SyntaxKind::NumericLiteral),
            value,
        })
    }

    pub fn boolean_literal(&self, value: bool) -> Expression<'a> {
        let kind = if value {
            SyntaxKind::TrueKeyword
        } else {
            SyntaxKind::FalseKeyword
        };
        Expression::BooleanLiteral(BooleanLiteralNode {
            data: NodeData::synthesized(kind),
            value,
        })
    }

    pub fn identifier_expression(&self, ident: Identifier) -> Expression<'a> {
        Expression::Identifier(ident)
    }

    pub fn array_literal(&self, elements: &[Expression<'a>]) -> Expression<'a> {
        Expression::ArrayLiteral(ArrayLiteralExpression {
            data: NodeData::synthesized(SyntaxKind::ArrayLiteralExpression),
            elements: self.list(elements),
        })
    }

    pub fn object_literal(&self, properties: &[ObjectLiteralElement<'a>]) -> Expression<'a> {
        Expression::ObjectLiteral(ObjectLiteralExpression {
            data: NodeData::synthesized(SyntaxKind::ObjectLiteralExpression),
            properties: self.list(properties),
        })
    }

    pub fn property_assignment(
        &self,
        name: PropertyName<'a>,
        initializer: Expression<'a>,
    ) -> ObjectLiteralElement<'a> {
        ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
            data: NodeData::synthesized(SyntaxKind::PropertyAssignment),
            name,
            initializer: self.alloc(initializer),
        })
    }

    pub fn spread_assignment(&self, expression: Expression<'a>) -> ObjectLiteralElement<'a> {
        ObjectLiteralElement::SpreadAssignment(SpreadAssignment {
            data: NodeData::synthesized(SyntaxKind::SpreadAssignment),
            expression: self.alloc(expression),
        })
    }

    pub fn spread_element(&self, expression: Expression<'a>) -> Expression<'a> {
        Expression::Spread(SpreadElement {
            data: NodeData::synthesized(SyntaxKind::SpreadElement),
            expression: self.alloc(expression),
        })
    }

    pub fn property_access(&self, expression: Expression<'a>, name: &str) -> Expression<'a> {
        Expression::PropertyAccess(PropertyAccessExpression {
            data: NodeData::synthesized(SyntaxKind::PropertyAccessExpression),
            expression: self.alloc(expression),
            name: self.identifier(name),
        })
    }

    pub fn call(&self, expression: Expression<'a>, arguments: &[Expression<'a>]) -> Expression<'a> {
        Expression::Call(CallExpression {
            data: NodeData::synthesized(SyntaxKind::CallExpression),
            expression: self.alloc(expression),
            arguments: self.list(arguments),
        })
    }

    /// An expression-bodied arrow function.
    pub fn arrow(
        &self,
        parameters: &[ParameterDeclaration<'a>],
        body: Expression<'a>,
    ) -> Expression<'a> {
        Expression::Arrow(ArrowFunction {
            data: NodeData::synthesized(SyntaxKind::ArrowFunction),
            parameters: self.list(parameters),
            body: self.alloc(body),
        })
    }

    /// A zero-argument arrow wrapping an expression: the deferred thunk
    /// form used for property initializers.
    pub fn thunk(&self, body: &'a Expression<'a>) -> Expression<'a> {
        Expression::Arrow(ArrowFunction {
            data: NodeData::synthesized(SyntaxKind::ArrowFunction),
            parameters: &[],
            body,
        })
    }

    pub fn logical_or(&self, left: Expression<'a>, right: Expression<'a>) -> Expression<'a> {
        Expression::Binary(BinaryExpression {
            data: NodeData::synthesized(SyntaxKind::BinaryExpression),
            left: self.alloc(left),
            operator: SyntaxKind::BarBarToken,
            right: self.alloc(right),
        })
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn decorator(&self, expression: Expression<'a>) -> Decorator<'a> {
        Decorator {
            data: NodeData::synthesized(SyntaxKind::Decorator),
            expression: self.alloc(expression),
        }
    }

    /// A plain synthesized parameter with no modifiers or initializer.
    pub fn parameter(&self, name: &str) -> ParameterDeclaration<'a> {
        ParameterDeclaration {
            data: NodeData::synthesized(SyntaxKind::Parameter),
            decorators: &[],
            name: BindingName::Identifier(self.identifier(name)),
            initializer: None,
        }
    }
}
