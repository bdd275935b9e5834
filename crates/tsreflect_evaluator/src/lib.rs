//! tsreflect_evaluator: declaration-evaluation semantics for attachments.
//!
//! Evaluates the expression trees the synthesizer attaches to
//! declarations, the way a JS engine would when the transformed unit
//! loads: classes evaluate in document order, each yielding a fresh
//! identity-bearing constructor value, then their decorators apply in
//! order and write through the metadata store. Arrow functions become
//! deferred function values; their bodies run per invocation, never at
//! attachment time.

use indexmap::IndexMap;
use thiserror::Error;
use tsreflect_ast::node::*;
use tsreflect_registry::{
    number_key_text, ClassHandle, Environment, FunctionValue, MetadataStore, Value,
};

/// A runtime evaluation failure. These indicate malformed attachment
/// expressions or an incomplete environment, not recoverable type shapes.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("identifier `{0}` is not bound in the evaluation environment")]
    UnboundIdentifier(String),
    #[error("value is not callable")]
    NotCallable,
    #[error("unsupported expression in attachment position")]
    UnsupportedExpression,
    #[error("unsupported Reflect method `{0}`")]
    UnsupportedReflectMethod(String),
    #[error("Reflect.metadata is only valid as a decorator expression")]
    MetadataOutsideDecorator,
    #[error("metadata target is not a class value")]
    BadMetadataTarget,
    #[error("computed property names cannot be evaluated as metadata keys")]
    ComputedPropertyName,
    #[error("spread of a non-array value")]
    BadArraySpread,
    #[error("metadata key is not a string")]
    BadMetadataKey,
}

/// Evaluates transformed source files against an environment and a
/// metadata store.
pub struct Evaluator<'a> {
    pub env: Environment<'a>,
}

impl<'a> Evaluator<'a> {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    pub fn with_env(env: Environment<'a>) -> Self {
        Self { env }
    }

    /// Evaluate every class declaration in the file, in document order.
    /// Function bodies do not run at load time.
    pub fn evaluate_source_file(
        &mut self,
        source_file: &SourceFile<'a>,
        store: &mut MetadataStore<'a>,
    ) -> Result<(), EvalError> {
        self.evaluate_statements(source_file.statements, store)
    }

    fn evaluate_statements(
        &mut self,
        statements: &[Statement<'a>],
        store: &mut MetadataStore<'a>,
    ) -> Result<(), EvalError> {
        for statement in statements {
            match statement {
                Statement::ClassDeclaration(class) => {
                    self.evaluate_class(class, store)?;
                }
                Statement::ModuleDeclaration(module) => {
                    if let Some(body) = module.body {
                        self.evaluate_statements(body.statements, store)?;
                    }
                }
                Statement::Block(block) => {
                    self.evaluate_statements(block.statements, store)?;
                }
                Statement::ExpressionStatement(stmt) => {
                    let env = self.env.clone();
                    self.evaluate(stmt.expression, &env, store)?;
                }
                Statement::FunctionDeclaration(_) => {}
            }
        }
        Ok(())
    }

    /// Evaluate one class declaration: bind the constructor value, then
    /// apply member decorators followed by class decorators.
    pub fn evaluate_class(
        &mut self,
        class: &ClassDeclaration<'a>,
        store: &mut MetadataStore<'a>,
    ) -> Result<ClassHandle, EvalError> {
        let name = class
            .name
            .as_ref()
            .map(|n| n.text_name.as_str())
            .unwrap_or("default");
        let handle = ClassHandle::new(name);
        self.env.define(name, Value::Class(handle.clone()));

        for member in class.members {
            match member {
                ClassElement::PropertyDeclaration(property) => {
                    let key = property_name_text(&property.name)?;
                    for decorator in property.decorators {
                        self.apply_decorator(decorator, &handle, Some(&key), store)?;
                    }
                }
                ClassElement::Constructor(ctor) => {
                    for parameter in ctor.parameters {
                        for decorator in parameter.decorators {
                            self.apply_decorator(decorator, &handle, None, store)?;
                        }
                    }
                }
                ClassElement::MethodDeclaration(method) => {
                    let key = property_name_text(&method.name)?;
                    for decorator in method.decorators {
                        self.apply_decorator(decorator, &handle, Some(&key), store)?;
                    }
                }
            }
        }

        for decorator in class.decorators {
            self.apply_decorator(decorator, &handle, None, store)?;
        }

        Ok(handle)
    }

    fn apply_decorator(
        &mut self,
        decorator: &Decorator<'a>,
        target: &ClassHandle,
        property: Option<&str>,
        store: &mut MetadataStore<'a>,
    ) -> Result<(), EvalError> {
        let env = self.env.clone();
        match decorator.expression {
            // Reflect.metadata(key, value) produces a decorator that
            // writes against whatever it is attached to.
            Expression::Call(call) if reflect_method(call) == Some("metadata") => {
                let [key, value] = call.arguments else {
                    return Err(EvalError::BadMetadataKey);
                };
                let key = self
                    .evaluate(key, &env, store)?
                    .as_str()
                    .map(str::to_string)
                    .ok_or(EvalError::BadMetadataKey)?;
                let value = self.evaluate(value, &env, store)?;
                store.define_metadata(&key, value, target, property);
                Ok(())
            }
            Expression::Arrow(_) => {
                let function = self.evaluate(decorator.expression, &env, store)?;
                let Value::Function(function) = function else {
                    return Err(EvalError::NotCallable);
                };
                self.call_function(&function, &[Value::Class(target.clone())], store)?;
                Ok(())
            }
            // Any other decorator (e.g. the marker) evaluates for its
            // side effects only; a no-op tag has none.
            other => {
                self.evaluate(other, &env, store)?;
                Ok(())
            }
        }
    }

    /// Invoke a function value with the given arguments.
    pub fn call_function(
        &self,
        function: &FunctionValue<'a>,
        arguments: &[Value<'a>],
        store: &mut MetadataStore<'a>,
    ) -> Result<Value<'a>, EvalError> {
        let env = function.env.extend();
        for (index, parameter) in function.parameters.iter().enumerate() {
            let value = arguments.get(index).cloned().unwrap_or(Value::Undefined);
            env.define(parameter, value);
        }
        self.evaluate(function.body, &env, store)
    }

    /// Invoke a zero-argument function value (an initializer thunk).
    pub fn invoke_thunk(
        &self,
        thunk: &FunctionValue<'a>,
        store: &mut MetadataStore<'a>,
    ) -> Result<Value<'a>, EvalError> {
        self.call_function(thunk, &[], store)
    }

    /// Evaluate an expression to a value.
    pub fn evaluate(
        &self,
        expression: &'a Expression<'a>,
        env: &Environment<'a>,
        store: &mut MetadataStore<'a>,
    ) -> Result<Value<'a>, EvalError> {
        match expression {
            Expression::Identifier(ident) => env
                .lookup(&ident.text_name)
                .ok_or_else(|| EvalError::UnboundIdentifier(ident.text_name.clone())),
            Expression::StringLiteral(lit) => Ok(Value::String(lit.value.clone())),
            Expression::NumericLiteral(lit) => Ok(Value::Number(lit.value)),
            Expression::BooleanLiteral(lit) => Ok(Value::Bool(lit.value)),
            Expression::NullLiteral(_) => Ok(Value::Null),
            Expression::ArrayLiteral(array) => {
                let mut elements = Vec::with_capacity(array.elements.len());
                for element in array.elements {
                    match element {
                        Expression::Spread(spread) => {
                            let spread = self.evaluate(spread.expression, env, store)?;
                            match spread {
                                Value::Array(values) => elements.extend(values),
                                _ => return Err(EvalError::BadArraySpread),
                            }
                        }
                        other => elements.push(self.evaluate(other, env, store)?),
                    }
                }
                Ok(Value::Array(elements))
            }
            Expression::ObjectLiteral(object) => {
                let mut properties = IndexMap::new();
                for element in object.properties {
                    match element {
                        ObjectLiteralElement::PropertyAssignment(assignment) => {
                            let key = property_name_text(&assignment.name)?;
                            let value = self.evaluate(assignment.initializer, env, store)?;
                            properties.insert(key, value);
                        }
                        ObjectLiteralElement::SpreadAssignment(spread) => {
                            match self.evaluate(spread.expression, env, store)? {
                                Value::Object(spread) => properties.extend(spread),
                                // Spreading undefined/null yields nothing.
                                Value::Undefined | Value::Null => {}
                                _ => return Err(EvalError::UnsupportedExpression),
                            }
                        }
                    }
                }
                Ok(Value::Object(properties))
            }
            Expression::PropertyAccess(access) => {
                let object = self.evaluate(access.expression, env, store)?;
                Ok(object
                    .as_object()
                    .and_then(|properties| properties.get(&access.name.text_name))
                    .cloned()
                    .unwrap_or(Value::Undefined))
            }
            Expression::Call(call) => self.evaluate_call(call, env, store),
            Expression::Arrow(arrow) => Ok(Value::Function(FunctionValue {
                parameters: arrow
                    .parameters
                    .iter()
                    .map(|p| {
                        p.name
                            .as_identifier()
                            .map(|ident| ident.text_name.clone())
                            .ok_or(EvalError::UnsupportedExpression)
                    })
                    .collect::<Result<_, _>>()?,
                body: arrow.body,
                env: env.clone(),
            })),
            Expression::Binary(binary) => {
                if binary.operator != tsreflect_ast::syntax_kind::SyntaxKind::BarBarToken {
                    return Err(EvalError::UnsupportedExpression);
                }
                let left = self.evaluate(binary.left, env, store)?;
                if left.is_truthy() {
                    Ok(left)
                } else {
                    self.evaluate(binary.right, env, store)
                }
            }
            Expression::Spread(_) => Err(EvalError::UnsupportedExpression),
        }
    }

    fn evaluate_call(
        &self,
        call: &CallExpression<'a>,
        env: &Environment<'a>,
        store: &mut MetadataStore<'a>,
    ) -> Result<Value<'a>, EvalError> {
        if let Some(method) = reflect_method(call) {
            return self.evaluate_reflect_call(method, call.arguments, env, store);
        }

        let callee = self.evaluate(call.expression, env, store)?;
        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in call.arguments {
            arguments.push(self.evaluate(argument, env, store)?);
        }
        match callee {
            Value::Function(function) => self.call_function(&function, &arguments, store),
            Value::Native(native) => Ok(native.call(&arguments)),
            _ => Err(EvalError::NotCallable),
        }
    }

    fn evaluate_reflect_call(
        &self,
        method: &str,
        arguments: &'a [Expression<'a>],
        env: &Environment<'a>,
        store: &mut MetadataStore<'a>,
    ) -> Result<Value<'a>, EvalError> {
        match method {
            "defineMetadata" => {
                let [key, value, rest @ ..] = arguments else {
                    return Err(EvalError::BadMetadataKey);
                };
                let key = self
                    .evaluate(key, env, store)?
                    .as_str()
                    .map(str::to_string)
                    .ok_or(EvalError::BadMetadataKey)?;
                let value = self.evaluate(value, env, store)?;
                let (target, property) = self.metadata_target(rest, env, store)?;
                store.define_metadata(&key, value, &target, property.as_deref());
                Ok(Value::Undefined)
            }
            "getOwnMetadata" => {
                let [key, rest @ ..] = arguments else {
                    return Err(EvalError::BadMetadataKey);
                };
                let key = self
                    .evaluate(key, env, store)?
                    .as_str()
                    .map(str::to_string)
                    .ok_or(EvalError::BadMetadataKey)?;
                let (target, property) = self.metadata_target(rest, env, store)?;
                Ok(store
                    .get_own_metadata(&key, &target, property.as_deref())
                    .cloned()
                    .unwrap_or(Value::Undefined))
            }
            "metadata" => Err(EvalError::MetadataOutsideDecorator),
            other => Err(EvalError::UnsupportedReflectMethod(other.to_string())),
        }
    }

    fn metadata_target(
        &self,
        arguments: &'a [Expression<'a>],
        env: &Environment<'a>,
        store: &mut MetadataStore<'a>,
    ) -> Result<(ClassHandle, Option<String>), EvalError> {
        let [target, rest @ ..] = arguments else {
            return Err(EvalError::BadMetadataTarget);
        };
        let target = self
            .evaluate(target, env, store)?
            .as_class()
            .cloned()
            .ok_or(EvalError::BadMetadataTarget)?;
        let property = match rest {
            [] => None,
            [property, ..] => match self.evaluate(property, env, store)? {
                Value::String(name) => Some(name),
                Value::Number(value) => Some(number_key_text(value)),
                _ => return Err(EvalError::BadMetadataKey),
            },
        };
        Ok((target, property))
    }
}

impl Default for Evaluator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// If the call's callee is `Reflect.<method>`, the method name.
fn reflect_method<'a>(call: &'a CallExpression<'a>) -> Option<&'a str> {
    let Expression::PropertyAccess(access) = call.expression else {
        return None;
    };
    let Expression::Identifier(object) = access.expression else {
        return None;
    };
    (object.text_name == "Reflect").then_some(access.name.text_name.as_str())
}

/// The evaluated string form of a declaration name.
fn property_name_text(name: &PropertyName<'_>) -> Result<String, EvalError> {
    match name {
        PropertyName::Identifier(ident) => Ok(ident.text_name.clone()),
        PropertyName::StringLiteral(lit) => Ok(lit.value.clone()),
        PropertyName::NumericLiteral(lit) => Ok(number_key_text(lit.value)),
        PropertyName::Computed(_) => Err(EvalError::ComputedPropertyName),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use std::cell::Cell;
    use std::rc::Rc;
    use tsreflect_ast::factory::NodeFactory;
    use tsreflect_core::intern::StringInterner;
    use tsreflect_registry::NativeFunction;

    fn factory(arena: &Bump) -> NodeFactory<'_> {
        NodeFactory::new(arena, StringInterner::new())
    }

    #[test]
    fn logical_or_short_circuits() {
        let arena = Bump::new();
        let f = factory(&arena);
        let mut store = MetadataStore::new();
        let evaluator = Evaluator::new();
        let env = Environment::new();

        let calls = Rc::new(Cell::new(0));
        let calls_seen = calls.clone();
        env.define(
            "probe",
            Value::Native(NativeFunction::new(move |_| {
                calls_seen.set(calls_seen.get() + 1);
                Value::Number(9.0)
            })),
        );

        let left_truthy = f.alloc(f.logical_or(
            f.numeric_literal(1.0),
            f.call(f.identifier_expression(f.identifier("probe")), &[]),
        ));
        let value = evaluator.evaluate(left_truthy, &env, &mut store).unwrap();
        assert_eq!(value.as_number(), Some(1.0));
        assert_eq!(calls.get(), 0);

        let left_falsy = f.alloc(f.logical_or(
            f.boolean_literal(false),
            f.call(f.identifier_expression(f.identifier("probe")), &[]),
        ));
        let value = evaluator.evaluate(left_falsy, &env, &mut store).unwrap();
        assert_eq!(value.as_number(), Some(9.0));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn spread_merges_objects_and_arrays() {
        let arena = Bump::new();
        let f = factory(&arena);
        let mut store = MetadataStore::new();
        let evaluator = Evaluator::new();
        let env = Environment::new();

        let mut base = IndexMap::new();
        base.insert("a".to_string(), Value::Number(1.0));
        base.insert("b".to_string(), Value::Number(2.0));
        env.define("base", Value::Object(base));
        env.define("list", Value::Array(vec![Value::Number(1.0)]));

        let object = f.alloc(f.object_literal(&[
            f.spread_assignment(f.identifier_expression(f.identifier("base"))),
            f.property_assignment(
                PropertyName::Identifier(f.identifier("b")),
                f.numeric_literal(5.0),
            ),
        ]));
        let value = evaluator.evaluate(object, &env, &mut store).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get("a").and_then(Value::as_number), Some(1.0));
        assert_eq!(object.get("b").and_then(Value::as_number), Some(5.0));

        let array = f.alloc(f.array_literal(&[
            f.spread_element(f.identifier_expression(f.identifier("list"))),
            f.numeric_literal(2.0),
        ]));
        let value = evaluator.evaluate(array, &env, &mut store).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn thunk_body_runs_per_invocation_not_at_creation() {
        let arena = Bump::new();
        let f = factory(&arena);
        let mut store = MetadataStore::new();
        let evaluator = Evaluator::new();
        let env = Environment::new();

        let calls = Rc::new(Cell::new(0));
        let calls_seen = calls.clone();
        env.define(
            "sideEffect",
            Value::Native(NativeFunction::new(move |_| {
                calls_seen.set(calls_seen.get() + 1);
                Value::Number(7.0)
            })),
        );

        let body = f.alloc(f.call(f.identifier_expression(f.identifier("sideEffect")), &[]));
        let thunk = f.alloc(f.thunk(body));
        let value = evaluator.evaluate(thunk, &env, &mut store).unwrap();
        assert_eq!(calls.get(), 0, "creating the thunk must not run the body");

        let function = value.as_function().unwrap();
        let result = evaluator.invoke_thunk(function, &mut store).unwrap();
        assert_eq!(result.as_number(), Some(7.0));
        assert_eq!(calls.get(), 1);
        evaluator.invoke_thunk(function, &mut store).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn reflect_define_and_get_own_metadata() {
        let arena = Bump::new();
        let f = factory(&arena);
        let mut store = MetadataStore::new();
        let evaluator = Evaluator::new();
        let env = Environment::new();
        let class = ClassHandle::new("Widget");
        env.define("Widget", Value::Class(class.clone()));

        let reflect = |name: &str| f.property_access(f.identifier_expression(f.identifier("Reflect")), name);
        let define = f.alloc(f.call(
            reflect("defineMetadata"),
            &[
                f.string_literal("k"),
                f.numeric_literal(4.0),
                f.identifier_expression(f.identifier("Widget")),
            ],
        ));
        evaluator.evaluate(define, &env, &mut store).unwrap();

        let read = f.alloc(f.call(
            reflect("getOwnMetadata"),
            &[
                f.string_literal("k"),
                f.identifier_expression(f.identifier("Widget")),
            ],
        ));
        let value = evaluator.evaluate(read, &env, &mut store).unwrap();
        assert_eq!(value.as_number(), Some(4.0));

        let missing = f.alloc(f.call(
            reflect("getOwnMetadata"),
            &[
                f.string_literal("absent"),
                f.identifier_expression(f.identifier("Widget")),
            ],
        ));
        let value = evaluator.evaluate(missing, &env, &mut store).unwrap();
        assert!(matches!(value, Value::Undefined));
    }

    #[test]
    fn unbound_identifier_is_an_error() {
        let arena = Bump::new();
        let f = factory(&arena);
        let mut store = MetadataStore::new();
        let evaluator = Evaluator::new();
        let env = Environment::new();
        let expr = f.alloc(f.identifier_expression(f.identifier("nowhere")));
        assert!(matches!(
            evaluator.evaluate(expr, &env, &mut store),
            Err(EvalError::UnboundIdentifier(_))
        ));
    }
}
