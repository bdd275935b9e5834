//! tsreflect_descriptors: the closed type-descriptor model.
//!
//! A `TypeDescriptor` is the serialized shape of a compile-time type,
//! built by the resolver and lowered to a literal by the synthesizer.
//! The kind set is closed: every consumer matches exhaustively, so
//! adding a kind is a compile-time obligation everywhere at once.

pub mod normalize;

pub use normalize::normalize_union;

use tsreflect_ast::node::{Expression, Identifier};

/// A class property key: a simple identifier/string name or a numeric name.
/// Computed keys cannot be represented and are rejected upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    String(String),
    Number(f64),
}

/// A resolved type descriptor.
///
/// `initializer` is present only when the originating property carried a
/// default expression; the synthesizer lowers it to a deferred thunk.
#[derive(Debug, Clone)]
pub struct TypeDescriptor<'a> {
    pub kind: DescriptorKind<'a>,
    pub initializer: Option<&'a Expression<'a>>,
}

impl<'a> TypeDescriptor<'a> {
    pub fn new(kind: DescriptorKind<'a>) -> Self {
        Self {
            kind,
            initializer: None,
        }
    }

    pub fn with_initializer(mut self, initializer: Option<&'a Expression<'a>>) -> Self {
        self.initializer = initializer;
        self
    }
}

/// The closed set of descriptor kinds, one per node.
#[derive(Debug, Clone)]
pub enum DescriptorKind<'a> {
    Any,
    String,
    Number,
    Boolean,
    StringLiteral {
        value: String,
    },
    NumberLiteral {
        value: f64,
    },
    FalseLiteral,
    TrueLiteral,
    ESSymbol,
    Void,
    Undefined,
    Null,
    Never,
    Object,
    Tuple {
        element_types: Vec<TypeDescriptor<'a>>,
    },
    Union {
        types: Vec<TypeDescriptor<'a>>,
    },
    /// A type backed by a concrete runtime value. The identifier is bound
    /// by the resolver so it evaluates to that value, identity-equal to
    /// the class constructor it denotes.
    Reference {
        type_ref: &'a Identifier,
        arguments: Vec<TypeDescriptor<'a>>,
    },
    /// A named type with no reachable runtime value.
    Interface {
        name: String,
        arguments: Vec<TypeDescriptor<'a>>,
    },
    Class {
        name: String,
        props: Vec<PropertyKey>,
        extends: Option<Box<TypeDescriptor<'a>>>,
    },
    Unknown,
}

impl DescriptorKind<'_> {
    /// The numeric wire tag. `EnumLiteral` (9) is reserved in the tag
    /// space but never produced.
    pub fn tag(&self) -> u32 {
        match self {
            DescriptorKind::Any => 1,
            DescriptorKind::String => 2,
            DescriptorKind::Number => 3,
            DescriptorKind::Boolean => 4,
            DescriptorKind::StringLiteral { .. } => 5,
            DescriptorKind::NumberLiteral { .. } => 6,
            DescriptorKind::FalseLiteral => 7,
            DescriptorKind::TrueLiteral => 8,
            DescriptorKind::ESSymbol => 10,
            DescriptorKind::Void => 11,
            DescriptorKind::Undefined => 12,
            DescriptorKind::Null => 13,
            DescriptorKind::Never => 14,
            DescriptorKind::Object => 15,
            DescriptorKind::Tuple { .. } => 16,
            DescriptorKind::Union { .. } => 17,
            DescriptorKind::Reference { .. } => 18,
            DescriptorKind::Interface { .. } => 19,
            DescriptorKind::Class { .. } => 20,
            DescriptorKind::Unknown => 999,
        }
    }

    /// The tag name, used for trailing comments in emitted literals.
    pub fn tag_name(&self) -> &'static str {
        match self {
            DescriptorKind::Any => "Any",
            DescriptorKind::String => "String",
            DescriptorKind::Number => "Number",
            DescriptorKind::Boolean => "Boolean",
            DescriptorKind::StringLiteral { .. } => "StringLiteral",
            DescriptorKind::NumberLiteral { .. } => "NumberLiteral",
            DescriptorKind::FalseLiteral => "FalseLiteral",
            DescriptorKind::TrueLiteral => "TrueLiteral",
            DescriptorKind::ESSymbol => "ESSymbol",
            DescriptorKind::Void => "Void",
            DescriptorKind::Undefined => "Undefined",
            DescriptorKind::Null => "Null",
            DescriptorKind::Never => "Never",
            DescriptorKind::Object => "Object",
            DescriptorKind::Tuple { .. } => "Tuple",
            DescriptorKind::Union { .. } => "Union",
            DescriptorKind::Reference { .. } => "Reference",
            DescriptorKind::Interface { .. } => "Interface",
            DescriptorKind::Class { .. } => "Class",
            DescriptorKind::Unknown => "Unknown",
        }
    }

    /// Whether this kind belongs to the boolean family the union
    /// normalizer may collapse.
    pub fn is_boolean_family(&self) -> bool {
        matches!(
            self,
            DescriptorKind::Boolean | DescriptorKind::TrueLiteral | DescriptorKind::FalseLiteral
        )
    }
}
