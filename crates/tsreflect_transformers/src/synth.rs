//! Attachment synthesis.
//!
//! Lowers resolved descriptors and registration events into decorator
//! expression trees. Synthesized decorators are appended after any
//! hand-written ones, never in place of them.

use tsreflect_ast::factory::NodeFactory;
use tsreflect_ast::node::{
    Decorator, Expression, Identifier, ObjectLiteralElement, PropertyName,
};
use tsreflect_descriptors::{DescriptorKind, PropertyKey, TypeDescriptor};
use tsreflect_registry::{
    SHORTHAND_PROPERTIES_METADATA_KEY, SUBCLASS_METADATA_KEY, TYPE_METADATA_KEY,
};

pub struct AttachmentSynthesizer<'a, 'f> {
    factory: &'f NodeFactory<'a>,
}

impl<'a, 'f> AttachmentSynthesizer<'a, 'f> {
    pub fn new(factory: &'f NodeFactory<'a>) -> Self {
        Self { factory }
    }

    /// `@Reflect.metadata("tsreflect:type", <descriptor literal>)`
    pub fn type_metadata_decorator(&self, descriptor: &TypeDescriptor<'a>) -> Decorator<'a> {
        let f = self.factory;
        f.decorator(f.call(
            self.reflect("metadata"),
            &[
                f.string_literal(TYPE_METADATA_KEY),
                self.descriptor_literal(descriptor),
            ],
        ))
    }

    /// `@((target) => Reflect.defineMetadata(KEY,
    ///     [...(Reflect.getOwnMetadata(KEY, Parent) || []), target], Parent))`
    ///
    /// One read-modify-write against the direct parent only; ancestors
    /// never see the registration.
    pub fn subclass_registration_decorator(&self, parent: &'a Identifier) -> Decorator<'a> {
        let f = self.factory;
        let existing = f.logical_or(
            f.call(
                self.reflect("getOwnMetadata"),
                &[
                    f.string_literal(SUBCLASS_METADATA_KEY),
                    f.identifier_expression(parent.clone()),
                ],
            ),
            f.array_literal(&[]),
        );
        let list = f.array_literal(&[
            f.spread_element(existing),
            f.identifier_expression(f.identifier("target")),
        ]);
        let body = f.call(
            self.reflect("defineMetadata"),
            &[
                f.string_literal(SUBCLASS_METADATA_KEY),
                list,
                f.identifier_expression(parent.clone()),
            ],
        );
        f.decorator(f.arrow(&[f.parameter("target")], body))
    }

    /// `@((target) => Reflect.defineMetadata(KEY,
    ///     {...(Reflect.getOwnMetadata(KEY, target) || {}), name: <literal>},
    ///     target))`
    ///
    /// The aggregate is keyed by the class alone and merged only with a
    /// map already defined on exactly that class.
    pub fn shorthand_property_decorator(
        &self,
        name: &PropertyKey,
        descriptor: &TypeDescriptor<'a>,
    ) -> Decorator<'a> {
        let f = self.factory;
        let existing = f.logical_or(
            f.call(
                self.reflect("getOwnMetadata"),
                &[
                    f.string_literal(SHORTHAND_PROPERTIES_METADATA_KEY),
                    f.identifier_expression(f.identifier("target")),
                ],
            ),
            f.object_literal(&[]),
        );
        let aggregate = f.object_literal(&[
            f.spread_assignment(existing),
            f.property_assignment(self.property_name(name), self.descriptor_literal(descriptor)),
        ]);
        let body = f.call(
            self.reflect("defineMetadata"),
            &[
                f.string_literal(SHORTHAND_PROPERTIES_METADATA_KEY),
                aggregate,
                f.identifier_expression(f.identifier("target")),
            ],
        );
        f.decorator(f.arrow(&[f.parameter("target")], body))
    }

    /// Lower a descriptor to its object-literal encoding. The `kind`
    /// tag comes first; kind-specific fields follow; a carried
    /// initializer becomes a zero-argument arrow thunk.
    pub fn descriptor_literal(&self, descriptor: &TypeDescriptor<'a>) -> Expression<'a> {
        let f = self.factory;
        let mut properties = vec![self.assign(
            "kind",
            f.numeric_literal(descriptor.kind.tag() as f64),
        )];

        match &descriptor.kind {
            DescriptorKind::Any
            | DescriptorKind::String
            | DescriptorKind::Number
            | DescriptorKind::Boolean
            | DescriptorKind::TrueLiteral
            | DescriptorKind::FalseLiteral
            | DescriptorKind::ESSymbol
            | DescriptorKind::Void
            | DescriptorKind::Undefined
            | DescriptorKind::Null
            | DescriptorKind::Never
            | DescriptorKind::Object
            | DescriptorKind::Unknown => {}
            DescriptorKind::StringLiteral { value } => {
                properties.push(self.assign("value", f.string_literal(value)));
            }
            DescriptorKind::NumberLiteral { value } => {
                properties.push(self.assign("value", f.numeric_literal(*value)));
            }
            DescriptorKind::Tuple { element_types } => {
                properties.push(self.assign("elementTypes", self.literal_list(element_types)));
            }
            DescriptorKind::Union { types } => {
                properties.push(self.assign("types", self.literal_list(types)));
            }
            DescriptorKind::Reference { type_ref, arguments } => {
                properties.push(self.assign("type", Expression::Identifier((*type_ref).clone())));
                properties.push(self.assign("arguments", self.literal_list(arguments)));
            }
            DescriptorKind::Interface { name, arguments } => {
                properties.push(self.assign("name", f.string_literal(name)));
                properties.push(self.assign("arguments", self.literal_list(arguments)));
            }
            DescriptorKind::Class {
                name,
                props,
                extends,
            } => {
                properties.push(self.assign("name", f.string_literal(name)));
                let keys: Vec<_> = props.iter().map(|key| self.key_literal(key)).collect();
                properties.push(self.assign("props", f.array_literal(&keys)));
                if let Some(base) = extends {
                    properties.push(self.assign("extends", self.descriptor_literal(base)));
                }
            }
        }

        if let Some(initializer) = descriptor.initializer {
            properties.push(self.assign("initializer", f.thunk(initializer)));
        }

        f.object_literal(&properties)
    }

    fn literal_list(&self, descriptors: &[TypeDescriptor<'a>]) -> Expression<'a> {
        let elements: Vec<_> = descriptors
            .iter()
            .map(|descriptor| self.descriptor_literal(descriptor))
            .collect();
        self.factory.array_literal(&elements)
    }

    fn key_literal(&self, key: &PropertyKey) -> Expression<'a> {
        match key {
            PropertyKey::String(name) => self.factory.string_literal(name),
            PropertyKey::Number(value) => self.factory.numeric_literal(*value),
        }
    }

    fn property_name(&self, key: &PropertyKey) -> PropertyName<'a> {
        match key {
            PropertyKey::String(name) => PropertyName::Identifier(self.factory.identifier(name)),
            PropertyKey::Number(value) => {
                let Expression::NumericLiteral(node) = self.factory.numeric_literal(*value) else {
                    unreachable!("factory numeric literal");
                };
                PropertyName::NumericLiteral(node)
            }
        }
    }

    fn assign(&self, name: &str, value: Expression<'a>) -> ObjectLiteralElement<'a> {
        self.factory
            .property_assignment(PropertyName::Identifier(self.factory.identifier(name)), value)
    }

    fn reflect(&self, method: &str) -> Expression<'a> {
        let f = self.factory;
        f.property_access(f.identifier_expression(f.identifier("Reflect")), method)
    }
}
