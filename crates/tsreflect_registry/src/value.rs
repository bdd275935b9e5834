//! Runtime value model.
//!
//! The values metadata attachments produce when a declaration evaluates.
//! Class values carry allocation identity: two handles are equal iff they
//! denote the same constructor, never merely the same name.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tsreflect_ast::node::Expression;

/// A runtime value.
#[derive(Clone)]
pub enum Value<'a> {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value<'a>>),
    /// An object literal value; property order is insertion order.
    Object(IndexMap<String, Value<'a>>),
    /// A class constructor value.
    Class(ClassHandle),
    /// A function value: a deferred body plus its captured environment.
    /// A zero-parameter function is a thunk.
    Function(FunctionValue<'a>),
    /// A host-provided function, used by tests to observe side effects.
    Native(NativeFunction<'a>),
}

impl<'a> Value<'a> {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value<'a>>> {
        match self {
            Value::Object(properties) => Some(properties),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassHandle> {
        match self {
            Value::Class(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue<'a>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// JS-style truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(elements) => f.debug_list().entries(elements).finish(),
            Value::Object(properties) => f.debug_map().entries(properties.iter()).finish(),
            Value::Class(handle) => write!(f, "class {}", handle.name()),
            Value::Function(func) => write!(f, "fn({})", func.parameters.join(", ")),
            Value::Native(_) => write!(f, "native fn"),
        }
    }
}

struct ClassObject {
    name: String,
}

/// An identity-bearing handle to a class constructor value.
#[derive(Clone)]
pub struct ClassHandle(Rc<ClassObject>);

impl ClassHandle {
    pub fn new(name: &str) -> Self {
        Self(Rc::new(ClassObject {
            name: name.to_string(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The identity key used by the metadata store.
    pub fn key(&self) -> TargetKey {
        TargetKey(Rc::as_ptr(&self.0) as usize)
    }
}

impl PartialEq for ClassHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClassHandle {}

impl fmt::Debug for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassHandle({})", self.name())
    }
}

/// Identity of a metadata target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetKey(usize);

/// A function value: parameters, body expression, captured environment.
#[derive(Clone)]
pub struct FunctionValue<'a> {
    pub parameters: Vec<String>,
    pub body: &'a Expression<'a>,
    pub env: Environment<'a>,
}

/// A host-provided native function.
#[derive(Clone)]
pub struct NativeFunction<'a>(pub Rc<dyn Fn(&[Value<'a>]) -> Value<'a> + 'a>);

impl<'a> NativeFunction<'a> {
    pub fn new(f: impl Fn(&[Value<'a>]) -> Value<'a> + 'a) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, args: &[Value<'a>]) -> Value<'a> {
        (self.0)(args)
    }
}

/// A flat binding environment. Clones share bindings; `extend` snapshots
/// them so parameter bindings stay local to one invocation.
#[derive(Clone, Default)]
pub struct Environment<'a> {
    bindings: Rc<RefCell<FxHashMap<String, Value<'a>>>>,
}

impl<'a> Environment<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&self, name: &str, value: Value<'a>) {
        self.bindings.borrow_mut().insert(name.to_string(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<Value<'a>> {
        self.bindings.borrow().get(name).cloned()
    }

    /// A child environment seeded with a snapshot of the current bindings.
    pub fn extend(&self) -> Environment<'a> {
        Environment {
            bindings: Rc::new(RefCell::new(self.bindings.borrow().clone())),
        }
    }
}

impl fmt::Debug for Environment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment({} bindings)", self.bindings.borrow().len())
    }
}
