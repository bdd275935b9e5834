//! Shared fixture for integration tests: builds bound ASTs and the
//! checker graph a host compiler would hand the pass.
#![allow(dead_code)]

use bumpalo::Bump;
use indexmap::IndexMap;
use tsreflect_ast::factory::NodeFactory;
use tsreflect_ast::node::*;
use tsreflect_ast::syntax_kind::SyntaxKind;
use tsreflect_ast::types::{ModifierFlags, NodeId, ObjectFlags, SymbolFlags, TypeFlags, TypeId};
use tsreflect_checker::{Checker, TypeKind};
use tsreflect_core::intern::StringInterner;
use tsreflect_registry::REFLECTIVE_MARKER_KEY;

pub struct Fixture<'a> {
    pub factory: NodeFactory<'a>,
    pub checker: Checker,
    next_node: u32,
    marker_type: Option<TypeId>,
}

impl<'a> Fixture<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            factory: NodeFactory::new(arena, StringInterner::new()),
            checker: Checker::new(),
            next_node: 1,
            marker_type: None,
        }
    }

    pub fn node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    /// The anonymous object type carrying the reflective marker member.
    pub fn marker_type(&mut self) -> TypeId {
        if let Some(ty) = self.marker_type {
            return ty;
        }
        let mut members = IndexMap::new();
        members.insert(
            REFLECTIVE_MARKER_KEY.to_string(),
            self.checker.type_table.boolean_type,
        );
        let ty = self
            .checker
            .type_table
            .add_object_type(ObjectFlags::ANONYMOUS, members);
        self.marker_type = Some(ty);
        ty
    }

    /// A decorator whose expression type exposes the reflective marker.
    pub fn reflective_decorator(&mut self) -> Decorator<'a> {
        let ty = self.marker_type();
        self.decorator_of_type("Reflective", ty)
    }

    /// A decorator identifier bound to an arbitrary expression type.
    pub fn decorator_of_type(&mut self, name: &str, ty: TypeId) -> Decorator<'a> {
        let mut ident = self.factory.identifier(name);
        ident.data.id = self.node_id();
        self.checker.register_node_type(ident.data.id, ty);
        self.factory
            .decorator(self.factory.identifier_expression(ident))
    }

    /// Declare a class symbol backed by a runtime value, plus its type.
    pub fn class_type(&mut self, name: &str, declaration: NodeId) -> TypeId {
        let symbol =
            self.checker
                .symbol_table
                .add_value_symbol(name, SymbolFlags::CLASS, declaration);
        self.checker.type_table.add_type_with_symbol(
            TypeFlags::OBJECT,
            TypeKind::ObjectType {
                object_flags: ObjectFlags::CLASS,
                members: IndexMap::new(),
            },
            symbol,
        )
    }

    /// Declare an interface type with no runtime value behind it.
    pub fn interface_type(&mut self, name: &str) -> TypeId {
        let symbol = self.checker.symbol_table.add_symbol(name, SymbolFlags::INTERFACE);
        self.checker.type_table.add_type_with_symbol(
            TypeFlags::OBJECT,
            TypeKind::ObjectType {
                object_flags: ObjectFlags::INTERFACE,
                members: IndexMap::new(),
            },
            symbol,
        )
    }

    pub fn property(
        &mut self,
        name: &str,
        ty: TypeId,
        initializer: Option<Expression<'a>>,
    ) -> ClassElement<'a> {
        let mut data = NodeData::synthesized(SyntaxKind::PropertyDeclaration);
        data.id = self.node_id();
        self.checker.register_node_type(data.id, ty);
        ClassElement::PropertyDeclaration(PropertyDeclarationNode {
            data,
            decorators: &[],
            name: PropertyName::Identifier(self.factory.identifier(name)),
            initializer: initializer.map(|expression| &*self.factory.alloc(expression)),
        })
    }

    pub fn computed_property(&mut self, key: Expression<'a>, ty: TypeId) -> ClassElement<'a> {
        let mut data = NodeData::synthesized(SyntaxKind::PropertyDeclaration);
        data.id = self.node_id();
        self.checker.register_node_type(data.id, ty);
        ClassElement::PropertyDeclaration(PropertyDeclarationNode {
            data,
            decorators: &[],
            name: PropertyName::Computed(ComputedPropertyName {
                data: NodeData::synthesized(SyntaxKind::ComputedPropertyName),
                expression: self.factory.alloc(key),
            }),
            initializer: None,
        })
    }

    /// A constructor parameter that also declares a property.
    pub fn shorthand_param(&mut self, name: &str, ty: TypeId) -> ParameterDeclaration<'a> {
        let mut data = NodeData::synthesized(SyntaxKind::Parameter);
        data.id = self.node_id();
        data.modifier_flags = ModifierFlags::PRIVATE;
        self.checker.register_node_type(data.id, ty);
        ParameterDeclaration {
            data,
            decorators: &[],
            name: BindingName::Identifier(self.factory.identifier(name)),
            initializer: None,
        }
    }

    pub fn plain_param(&mut self, name: &str) -> ParameterDeclaration<'a> {
        self.factory.parameter(name)
    }

    pub fn constructor(&mut self, parameters: &[ParameterDeclaration<'a>]) -> ClassElement<'a> {
        ClassElement::Constructor(ConstructorDeclaration {
            data: NodeData::synthesized(SyntaxKind::Constructor),
            parameters: self.factory.list(parameters),
        })
    }

    /// A class declaration with a registered class type. Returns the
    /// declaration and its type id for wiring bases and references.
    pub fn class(
        &mut self,
        name: &str,
        decorators: &[Decorator<'a>],
        members: &[ClassElement<'a>],
    ) -> (ClassDeclaration<'a>, TypeId) {
        let mut data = NodeData::synthesized(SyntaxKind::ClassDeclaration);
        data.id = self.node_id();
        let ty = self.class_type(name, data.id);
        self.checker.register_node_type(data.id, ty);
        let declaration = ClassDeclaration {
            data,
            decorators: self.factory.list(decorators),
            name: Some(self.factory.identifier(name)),
            heritage_clauses: &[],
            members: self.factory.list(members),
        };
        (declaration, ty)
    }

    pub fn extend(&mut self, sub: TypeId, base: TypeId) {
        self.checker.set_base_types(sub, vec![base]);
    }

    pub fn source_file(&mut self, statements: &[Statement<'a>]) -> &'a SourceFile<'a> {
        self.file("widgets.ts", statements, false)
    }

    pub fn declaration_file(&mut self, statements: &[Statement<'a>]) -> &'a SourceFile<'a> {
        self.file("widgets.d.ts", statements, true)
    }

    fn file(
        &mut self,
        name: &str,
        statements: &[Statement<'a>],
        is_declaration_file: bool,
    ) -> &'a SourceFile<'a> {
        let mut data = NodeData::synthesized(SyntaxKind::SourceFile);
        data.id = self.node_id();
        self.factory.alloc(SourceFile {
            data,
            statements: self.factory.list(statements),
            file_name: name.to_string(),
            text: String::new(),
            is_declaration_file,
        })
    }
}

/// The first class declaration of a file.
pub fn first_class<'s, 'a>(source_file: &'s SourceFile<'a>) -> &'s ClassDeclaration<'a> {
    class_at(source_file, 0)
}

pub fn class_at<'s, 'a>(source_file: &'s SourceFile<'a>, index: usize) -> &'s ClassDeclaration<'a> {
    match &source_file.statements[index] {
        Statement::ClassDeclaration(class) => class,
        other => panic!("expected class declaration, got {other:?}"),
    }
}

/// The descriptor object literal inside a `Reflect.metadata` decorator.
pub fn metadata_literal<'s, 'a>(decorator: &'s Decorator<'a>) -> &'s ObjectLiteralExpression<'a> {
    let Expression::Call(call) = decorator.expression else {
        panic!("expected Reflect.metadata call, got {:?}", decorator.expression);
    };
    let Expression::ObjectLiteral(literal) = &call.arguments[1] else {
        panic!("expected descriptor literal, got {:?}", call.arguments[1]);
    };
    literal
}

/// A named field of a descriptor literal.
pub fn literal_field<'s, 'a>(
    literal: &'s ObjectLiteralExpression<'a>,
    name: &str,
) -> Option<&'s Expression<'a>> {
    literal.properties.iter().find_map(|element| match element {
        ObjectLiteralElement::PropertyAssignment(assignment) => match &assignment.name {
            PropertyName::Identifier(ident) if ident.text_name == name => {
                Some(assignment.initializer)
            }
            _ => None,
        },
        ObjectLiteralElement::SpreadAssignment(_) => None,
    })
}

pub fn kind_tag(literal: &ObjectLiteralExpression<'_>) -> f64 {
    let Some(Expression::NumericLiteral(tag)) = literal_field(literal, "kind") else {
        panic!("descriptor literal without a kind tag");
    };
    tag.value
}

/// The `props` key list of a class descriptor literal, as strings.
pub fn props_of(literal: &ObjectLiteralExpression<'_>) -> Vec<String> {
    let Some(Expression::ArrayLiteral(array)) = literal_field(literal, "props") else {
        panic!("class descriptor without props");
    };
    array
        .elements
        .iter()
        .map(|element| match element {
            Expression::StringLiteral(literal) => literal.value.clone(),
            Expression::NumericLiteral(literal) => literal.value.to_string(),
            other => panic!("unexpected props entry {other:?}"),
        })
        .collect()
}
