//! The reflection pass orchestrator.
//!
//! Walks statements looking for class declarations, decides eligibility
//! from the marker property on existing decorator types, and rebuilds
//! eligible classes with synthesized metadata attachments. Everything
//! else is cloned through unchanged.

use crate::context::PassContext;
use crate::resolver::TypeResolver;
use crate::synth::AttachmentSynthesizer;
use crate::{TransformError, TransformOutput, Transformer};
use tracing::debug;
use tsreflect_ast::factory::NodeFactory;
use tsreflect_ast::node::*;
use tsreflect_ast::types::{ModifierFlags, TypeId};
use tsreflect_checker::{Checker, TypeKind};
use tsreflect_descriptors::PropertyKey;
use tsreflect_registry::REFLECTIVE_MARKER_KEY;

pub struct ReflectTransformer<'a, 'c> {
    checker: &'c Checker,
    factory: &'c NodeFactory<'a>,
}

impl<'a, 'c> ReflectTransformer<'a, 'c> {
    pub fn new(checker: &'c Checker, factory: &'c NodeFactory<'a>) -> Self {
        Self { checker, factory }
    }

    fn visit_statements(
        &self,
        statements: &'a [Statement<'a>],
        ctx: &mut PassContext<'_>,
    ) -> Result<&'a [Statement<'a>], TransformError> {
        let mut out = Vec::with_capacity(statements.len());
        for statement in statements {
            out.push(self.visit_statement(statement, ctx)?);
        }
        Ok(self.factory.list(&out))
    }

    fn visit_statement(
        &self,
        statement: &'a Statement<'a>,
        ctx: &mut PassContext<'_>,
    ) -> Result<Statement<'a>, TransformError> {
        match statement {
            Statement::ClassDeclaration(class) => {
                Ok(Statement::ClassDeclaration(self.visit_class(class, ctx)?))
            }
            Statement::ModuleDeclaration(module) => {
                let body = match module.body {
                    Some(body) => {
                        let previous = ctx.current_scope;
                        ctx.current_scope = body.data.id.is_valid().then_some(body.data.id);
                        let statements = self.visit_statements(body.statements, ctx);
                        ctx.current_scope = previous;
                        Some(&*self.factory.alloc(ModuleBlock {
                            data: body.data.clone(),
                            statements: statements?,
                        }))
                    }
                    None => None,
                };
                Ok(Statement::ModuleDeclaration(ModuleDeclarationNode {
                    data: module.data.clone(),
                    name: module.name.clone(),
                    body,
                }))
            }
            Statement::FunctionDeclaration(function) => {
                let body = match function.body {
                    Some(body) => Some(&*self.factory.alloc(self.visit_block(body, ctx)?)),
                    None => None,
                };
                Ok(Statement::FunctionDeclaration(FunctionDeclarationNode {
                    data: function.data.clone(),
                    name: function.name.clone(),
                    parameters: function.parameters,
                    body,
                }))
            }
            Statement::Block(block) => Ok(Statement::Block(self.visit_block(block, ctx)?)),
            Statement::ExpressionStatement(statement) => {
                Ok(Statement::ExpressionStatement(statement.clone()))
            }
        }
    }

    fn visit_block(
        &self,
        block: &'a Block<'a>,
        ctx: &mut PassContext<'_>,
    ) -> Result<Block<'a>, TransformError> {
        let previous = ctx.current_scope;
        ctx.current_scope = block.data.id.is_valid().then_some(block.data.id);
        let statements = self.visit_statements(block.statements, ctx);
        ctx.current_scope = previous;
        Ok(Block {
            data: block.data.clone(),
            statements: statements?,
        })
    }

    fn visit_class(
        &self,
        class: &'a ClassDeclaration<'a>,
        ctx: &mut PassContext<'_>,
    ) -> Result<ClassDeclaration<'a>, TransformError> {
        if !self.is_reflective(class) {
            return Ok(class.clone());
        }

        let name = class.name.as_ref().ok_or(TransformError::UnnamedClass)?;
        let Some(class_type) = self.checker.type_at_location(class.data.id) else {
            ctx.warn(class.data.span, format!("no type for class {}", name.text_name));
            return Ok(class.clone());
        };
        debug!(class = %name.text_name, "reflecting class");

        let resolver = TypeResolver::new(self.checker, self.factory);
        let synth = AttachmentSynthesizer::new(self.factory);

        let keys = self.class_property_keys(class, ctx)?;
        let mut members = Vec::with_capacity(class.members.len());
        for member in class.members {
            members.push(self.visit_member(member, &resolver, &synth, ctx)?);
        }

        let class_descriptor =
            resolver.resolve_class(class_type, &name.text_name, keys, &class.data, ctx);
        let mut decorators = class.decorators.to_vec();
        decorators.push(synth.type_metadata_decorator(&class_descriptor));
        for &base in self.checker.base_types(class_type) {
            if let Some(parent) = resolver.bind_value_identifier(base, &class.data, ctx) {
                decorators.push(synth.subclass_registration_decorator(parent));
            }
        }

        Ok(ClassDeclaration {
            data: class.data.clone(),
            decorators: self.factory.list(&decorators),
            name: class.name.clone(),
            heritage_clauses: class.heritage_clauses,
            members: self.factory.list(&members),
        })
    }

    fn visit_member(
        &self,
        member: &'a ClassElement<'a>,
        resolver: &TypeResolver<'a, '_>,
        synth: &AttachmentSynthesizer<'a, '_>,
        ctx: &mut PassContext<'_>,
    ) -> Result<ClassElement<'a>, TransformError> {
        match member {
            ClassElement::PropertyDeclaration(property) => {
                let Some(ty) = self.checker.type_at_location(property.data.id) else {
                    ctx.warn(property.data.span, "no type for property");
                    return Ok(member.clone());
                };
                let descriptor = resolver
                    .resolve_type(ty, &property.data, ctx)
                    .with_initializer(property.initializer);
                let mut decorators = property.decorators.to_vec();
                decorators.push(synth.type_metadata_decorator(&descriptor));
                Ok(ClassElement::PropertyDeclaration(PropertyDeclarationNode {
                    data: property.data.clone(),
                    decorators: self.factory.list(&decorators),
                    name: property.name.clone(),
                    initializer: property.initializer,
                }))
            }
            ClassElement::Constructor(ctor) => {
                let mut parameters = Vec::with_capacity(ctor.parameters.len());
                for parameter in ctor.parameters {
                    parameters.push(self.visit_parameter(parameter, resolver, synth, ctx)?);
                }
                Ok(ClassElement::Constructor(ConstructorDeclaration {
                    data: ctor.data.clone(),
                    parameters: self.factory.list(&parameters),
                }))
            }
            ClassElement::MethodDeclaration(_) => Ok(member.clone()),
        }
    }

    fn visit_parameter(
        &self,
        parameter: &'a ParameterDeclaration<'a>,
        resolver: &TypeResolver<'a, '_>,
        synth: &AttachmentSynthesizer<'a, '_>,
        ctx: &mut PassContext<'_>,
    ) -> Result<ParameterDeclaration<'a>, TransformError> {
        let Some(name) = shorthand_property_name(parameter) else {
            return Ok(parameter.clone());
        };
        let Some(ty) = self.checker.type_at_location(parameter.data.id) else {
            ctx.warn(parameter.data.span, "no type for constructor parameter");
            return Ok(parameter.clone());
        };
        let descriptor = resolver
            .resolve_type(ty, &parameter.data, ctx)
            .with_initializer(parameter.initializer);
        let key = PropertyKey::String(name.text_name.clone());
        let mut decorators = parameter.decorators.to_vec();
        decorators.push(synth.shorthand_property_decorator(&key, &descriptor));
        Ok(ParameterDeclaration {
            data: parameter.data.clone(),
            decorators: self.factory.list(&decorators),
            name: parameter.name.clone(),
            initializer: parameter.initializer,
        })
    }

    /// Ordered property keys for the class descriptor: declared fields
    /// in source order, then shorthand constructor parameters in
    /// parameter order. Inherited members are not included.
    fn class_property_keys(
        &self,
        class: &ClassDeclaration<'a>,
        ctx: &PassContext<'_>,
    ) -> Result<Vec<PropertyKey>, TransformError> {
        let mut keys = Vec::new();
        for member in class.members {
            if let ClassElement::PropertyDeclaration(property) = member {
                keys.push(property_key(&property.name, ctx)?);
            }
        }
        for member in class.members {
            if let ClassElement::Constructor(ctor) = member {
                for parameter in ctor.parameters {
                    if let Some(name) = shorthand_property_name(parameter) {
                        keys.push(PropertyKey::String(name.text_name.clone()));
                    }
                }
            }
        }
        Ok(keys)
    }

    /// A class is eligible iff some decorator on it has a type exposing
    /// the reflective marker property. Union- and intersection-typed
    /// decorators count when any member exposes it; the marker is
    /// typically minted as `T & { __is_reflective_decorator }`.
    fn is_reflective(&self, class: &ClassDeclaration<'a>) -> bool {
        class.decorators.iter().any(|decorator| {
            self.checker
                .type_at_location(decorator.expression.data().id)
                .is_some_and(|ty| self.type_has_marker(ty))
        })
    }

    fn type_has_marker(&self, ty: TypeId) -> bool {
        match &self.checker.type_table.get(ty).kind {
            TypeKind::Union { types } | TypeKind::Intersection { types } => {
                types.iter().any(|member| self.type_has_marker(*member))
            }
            _ => self.checker.has_property(ty, REFLECTIVE_MARKER_KEY),
        }
    }
}

impl<'a, 'c> Transformer<'a> for ReflectTransformer<'a, 'c> {
    fn transform(
        &self,
        source_file: &'a SourceFile<'a>,
    ) -> Result<TransformOutput<'a>, TransformError> {
        let mut ctx = PassContext::new(source_file);
        let statements = if source_file.is_declaration_file {
            source_file.statements
        } else {
            self.visit_statements(source_file.statements, &mut ctx)?
        };
        Ok(TransformOutput {
            source_file: SourceFile {
                data: source_file.data.clone(),
                statements,
                file_name: source_file.file_name.clone(),
                text: source_file.text.clone(),
                is_declaration_file: source_file.is_declaration_file,
            },
            referenced: ctx.referenced,
            diagnostics: ctx.diagnostics,
        })
    }
}

/// The identifier of a constructor parameter that also declares a
/// property: it must carry an accessibility or readonly modifier and be
/// named by a simple identifier.
fn shorthand_property_name<'p>(parameter: &'p ParameterDeclaration<'_>) -> Option<&'p Identifier> {
    if !parameter
        .data
        .modifier_flags
        .intersects(ModifierFlags::PARAMETER_PROPERTY)
    {
        return None;
    }
    parameter.name.as_identifier()
}

fn property_key(
    name: &PropertyName<'_>,
    ctx: &PassContext<'_>,
) -> Result<PropertyKey, TransformError> {
    match name {
        PropertyName::Identifier(ident) => Ok(PropertyKey::String(ident.text_name.clone())),
        PropertyName::StringLiteral(literal) => Ok(PropertyKey::String(literal.value.clone())),
        PropertyName::NumericLiteral(literal) => Ok(PropertyKey::Number(literal.value)),
        PropertyName::Computed(computed) => {
            let location = ctx.location_of(computed.data.span);
            Err(TransformError::ComputedPropertyKey {
                file: ctx.file_name.to_string(),
                line: location.line,
                character: location.character,
            })
        }
    }
}
