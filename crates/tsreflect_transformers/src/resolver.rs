//! Recursive type resolution.
//!
//! Maps checker types onto the closed descriptor model. Dispatch runs on
//! `TypeFlags` in a fixed order, object types sub-dispatch on
//! `ObjectFlags`, and any shape outside the model degrades to `Unknown`
//! with a warning diagnostic rather than failing the pass.

use crate::context::PassContext;
use tracing::trace;
use tsreflect_ast::factory::NodeFactory;
use tsreflect_ast::node::{Identifier, NodeData};
use tsreflect_ast::types::{ObjectFlags, TypeFlags, TypeId};
use tsreflect_checker::{Checker, TypeKind, TypeSyntax};
use tsreflect_descriptors::{normalize_union, DescriptorKind, PropertyKey, TypeDescriptor};

pub struct TypeResolver<'a, 'c> {
    checker: &'c Checker,
    factory: &'c NodeFactory<'a>,
}

impl<'a, 'c> TypeResolver<'a, 'c> {
    pub fn new(checker: &'c Checker, factory: &'c NodeFactory<'a>) -> Self {
        Self { checker, factory }
    }

    /// Resolve a type into a descriptor. The anchor node supplies the
    /// diagnostic position and the scope identifiers bind in.
    pub fn resolve_type(
        &self,
        ty: TypeId,
        anchor: &NodeData,
        ctx: &mut PassContext<'_>,
    ) -> TypeDescriptor<'a> {
        let t = self.checker.type_table.get(ty);
        trace!(type_id = ty.0, flags = ?t.flags, "resolving type");

        let kind = if t.flags.contains(TypeFlags::ANY) {
            DescriptorKind::Any
        } else if t.flags.contains(TypeFlags::STRING_LITERAL) {
            match &t.kind {
                TypeKind::StringLiteral { value } => DescriptorKind::StringLiteral {
                    value: value.clone(),
                },
                _ => return self.unknown(ty, anchor, ctx),
            }
        } else if t.flags.contains(TypeFlags::NUMBER_LITERAL) {
            match &t.kind {
                TypeKind::NumberLiteral { value } => {
                    DescriptorKind::NumberLiteral { value: *value }
                }
                _ => return self.unknown(ty, anchor, ctx),
            }
        } else if t.flags.contains(TypeFlags::STRING) {
            DescriptorKind::String
        } else if t.flags.contains(TypeFlags::NUMBER) {
            DescriptorKind::Number
        } else if t.flags.contains(TypeFlags::BOOLEAN) {
            DescriptorKind::Boolean
        } else if t.flags.contains(TypeFlags::BOOLEAN_LITERAL) {
            match &t.kind {
                TypeKind::BooleanLiteral { value: true } => DescriptorKind::TrueLiteral,
                TypeKind::BooleanLiteral { value: false } => DescriptorKind::FalseLiteral,
                _ => return self.unknown(ty, anchor, ctx),
            }
        } else if t.flags.contains(TypeFlags::ES_SYMBOL) {
            DescriptorKind::ESSymbol
        } else if t.flags.contains(TypeFlags::VOID) {
            DescriptorKind::Void
        } else if t.flags.contains(TypeFlags::UNDEFINED) {
            DescriptorKind::Undefined
        } else if t.flags.contains(TypeFlags::NULL) {
            DescriptorKind::Null
        } else if t.flags.contains(TypeFlags::NEVER) {
            DescriptorKind::Never
        } else if t.flags.contains(TypeFlags::OBJECT) {
            return self.resolve_object(ty, anchor, ctx);
        } else if t.flags.contains(TypeFlags::UNION) {
            return self.resolve_union(ty, anchor, ctx);
        } else {
            return self.unknown(ty, anchor, ctx);
        };

        TypeDescriptor::new(kind)
    }

    /// Resolve the decorated class itself. `props` is the pre-computed
    /// ordered key list; the first declared base becomes `extends`.
    pub fn resolve_class(
        &self,
        ty: TypeId,
        name: &str,
        props: Vec<PropertyKey>,
        anchor: &NodeData,
        ctx: &mut PassContext<'_>,
    ) -> TypeDescriptor<'a> {
        let extends = self
            .checker
            .base_types(ty)
            .first()
            .map(|base| Box::new(self.resolve_type(*base, anchor, ctx)));
        TypeDescriptor::new(DescriptorKind::Class {
            name: name.to_string(),
            props,
            extends,
        })
    }

    fn resolve_object(
        &self,
        ty: TypeId,
        anchor: &NodeData,
        ctx: &mut PassContext<'_>,
    ) -> TypeDescriptor<'a> {
        let t = self.checker.type_table.get(ty);
        match &t.kind {
            TypeKind::Reference {
                target,
                type_arguments,
            } => self.resolve_reference(*target, type_arguments, anchor, ctx),
            TypeKind::ObjectType { object_flags, .. } => {
                if object_flags.intersects(ObjectFlags::CLASS_OR_INTERFACE) {
                    self.resolve_named_object(ty, vec![], anchor, ctx)
                } else if object_flags.contains(ObjectFlags::ANONYMOUS) {
                    // Structural members are dropped; an anonymous object
                    // reflects as a reference to the ambient Object value.
                    let type_ref = self.mint_identifier("Object", ctx);
                    TypeDescriptor::new(DescriptorKind::Reference {
                        type_ref,
                        arguments: vec![],
                    })
                } else {
                    self.unknown(ty, anchor, ctx)
                }
            }
            _ => self.unknown(ty, anchor, ctx),
        }
    }

    fn resolve_reference(
        &self,
        target: TypeId,
        type_arguments: &[TypeId],
        anchor: &NodeData,
        ctx: &mut PassContext<'_>,
    ) -> TypeDescriptor<'a> {
        let arguments: Vec<_> = type_arguments
            .iter()
            .map(|argument| self.resolve_type(*argument, anchor, ctx))
            .collect();

        if let TypeKind::ObjectType { object_flags, .. } = &self.checker.type_table.get(target).kind
        {
            if object_flags.contains(ObjectFlags::TUPLE) {
                return TypeDescriptor::new(DescriptorKind::Tuple {
                    element_types: arguments,
                });
            }
        }

        self.resolve_named_object(target, arguments, anchor, ctx)
    }

    /// A named object type resolves to `Reference` when its symbol is
    /// backed by a runtime value and to `Interface` when it is purely a
    /// compile-time shape.
    fn resolve_named_object(
        &self,
        ty: TypeId,
        arguments: Vec<TypeDescriptor<'a>>,
        anchor: &NodeData,
        ctx: &mut PassContext<'_>,
    ) -> TypeDescriptor<'a> {
        let Some(symbol) = self.checker.symbol_of_type(ty) else {
            return self.unknown(ty, anchor, ctx);
        };
        let resolved = self.checker.aliased_symbol(symbol);
        if self.checker.symbol(resolved).value_declaration.is_none() {
            return TypeDescriptor::new(DescriptorKind::Interface {
                name: self.checker.symbol(resolved).name.clone(),
                arguments,
            });
        }
        let type_ref = self.bind_identifier(ty, anchor, ctx);
        TypeDescriptor::new(DescriptorKind::Reference {
            type_ref,
            arguments,
        })
    }

    /// Bind the identifier a value-backed type is written as at the
    /// anchor. Records the resolved symbol in the referenced set and
    /// mints a scope-attached identifier so downstream emit treats it as
    /// a live binding.
    pub fn bind_identifier(
        &self,
        ty: TypeId,
        anchor: &NodeData,
        ctx: &mut PassContext<'_>,
    ) -> &'a Identifier {
        let text = match self.checker.type_to_syntax(ty, anchor.id) {
            TypeSyntax::TypeReference { leading_identifier } => leading_identifier,
            TypeSyntax::Other => match self.checker.symbol_of_type(ty) {
                Some(symbol) => self.checker.symbol(symbol).name.clone(),
                None => "Object".to_string(),
            },
        };
        if let Some(symbol) = self.checker.symbol_of_type(ty) {
            ctx.add_referenced(self.checker.aliased_symbol(symbol));
        }
        self.mint_identifier(&text, ctx)
    }

    /// Bind an identifier for a base type, but only when the base has a
    /// concrete runtime value to register subclasses against.
    pub fn bind_value_identifier(
        &self,
        ty: TypeId,
        anchor: &NodeData,
        ctx: &mut PassContext<'_>,
    ) -> Option<&'a Identifier> {
        let symbol = self.checker.symbol_of_type(ty)?;
        let resolved = self.checker.aliased_symbol(symbol);
        self.checker.symbol(resolved).value_declaration?;
        Some(self.bind_identifier(ty, anchor, ctx))
    }

    fn mint_identifier(&self, text: &str, ctx: &PassContext<'_>) -> &'a Identifier {
        self.factory
            .alloc(self.factory.identifier_reference(text, ctx.current_scope))
    }

    fn resolve_union(
        &self,
        ty: TypeId,
        anchor: &NodeData,
        ctx: &mut PassContext<'_>,
    ) -> TypeDescriptor<'a> {
        let TypeKind::Union { types } = &self.checker.type_table.get(ty).kind else {
            return self.unknown(ty, anchor, ctx);
        };
        let members: Vec<_> = types
            .iter()
            .map(|member| self.resolve_type(*member, anchor, ctx))
            .collect();
        TypeDescriptor::new(DescriptorKind::Union {
            types: normalize_union(members),
        })
    }

    fn unknown(
        &self,
        ty: TypeId,
        anchor: &NodeData,
        ctx: &mut PassContext<'_>,
    ) -> TypeDescriptor<'a> {
        ctx.warn(
            anchor.span,
            format!("unknown type: {}", self.checker.type_to_string(ty)),
        );
        TypeDescriptor::new(DescriptorKind::Unknown)
    }
}
