//! Type and symbol representation.
//!
//! Types are stored in a `TypeTable` (type arena) and referenced by
//! `TypeId`. This avoids lifetime issues with recursive type structures.

use indexmap::IndexMap;
use tsreflect_ast::types::{NodeId, ObjectFlags, SymbolFlags, SymbolId, TypeFlags, TypeId};

/// A type in the host type system.
#[derive(Debug, Clone)]
pub struct Type {
    /// Unique identifier.
    pub id: TypeId,
    /// Type flags describing what kind of type this is.
    pub flags: TypeFlags,
    /// The symbol associated with this type (if any).
    pub symbol: Option<SymbolId>,
    /// The specific kind of type.
    pub kind: TypeKind,
}

/// The specific data for each type kind.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Intrinsic types: any, unknown, string, number, boolean, symbol,
    /// void, undefined, null, never.
    Intrinsic { name: &'static str },
    /// String literal type.
    StringLiteral { value: String },
    /// Number literal type.
    NumberLiteral { value: f64 },
    /// Boolean literal type (true/false).
    BooleanLiteral { value: bool },
    /// Object type (class, interface, anonymous object, tuple target).
    ObjectType {
        object_flags: ObjectFlags,
        members: IndexMap<String, TypeId>,
    },
    /// A generic instantiation of a target type.
    Reference {
        target: TypeId,
        type_arguments: Vec<TypeId>,
    },
    /// Union type (A | B | C).
    Union { types: Vec<TypeId> },
    /// Intersection type (A & B & C).
    Intersection { types: Vec<TypeId> },
}

/// The type table stores all types and provides access by TypeId.
#[derive(Debug)]
pub struct TypeTable {
    types: Vec<Type>,
    // Well-known types
    pub any_type: TypeId,
    pub unknown_type: TypeId,
    pub string_type: TypeId,
    pub number_type: TypeId,
    pub boolean_type: TypeId,
    pub symbol_type: TypeId,
    pub void_type: TypeId,
    pub undefined_type: TypeId,
    pub null_type: TypeId,
    pub never_type: TypeId,
    pub true_type: TypeId,
    pub false_type: TypeId,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self {
            types: Vec::with_capacity(64),
            any_type: TypeId(0),
            unknown_type: TypeId(1),
            string_type: TypeId(2),
            number_type: TypeId(3),
            boolean_type: TypeId(4),
            symbol_type: TypeId(5),
            void_type: TypeId(6),
            undefined_type: TypeId(7),
            null_type: TypeId(8),
            never_type: TypeId(9),
            true_type: TypeId(10),
            false_type: TypeId(11),
        };

        table.create_intrinsic(TypeFlags::ANY, "any");
        table.create_intrinsic(TypeFlags::UNKNOWN, "unknown");
        table.create_intrinsic(TypeFlags::STRING, "string");
        table.create_intrinsic(TypeFlags::NUMBER, "number");
        table.create_intrinsic(TypeFlags::BOOLEAN, "boolean");
        table.create_intrinsic(TypeFlags::ES_SYMBOL, "symbol");
        table.create_intrinsic(TypeFlags::VOID, "void");
        table.create_intrinsic(TypeFlags::UNDEFINED, "undefined");
        table.create_intrinsic(TypeFlags::NULL, "null");
        table.create_intrinsic(TypeFlags::NEVER, "never");
        table.add_type(TypeFlags::BOOLEAN_LITERAL, TypeKind::BooleanLiteral { value: true });
        table.add_type(TypeFlags::BOOLEAN_LITERAL, TypeKind::BooleanLiteral { value: false });

        table
    }

    fn create_intrinsic(&mut self, flags: TypeFlags, name: &'static str) -> TypeId {
        self.add_type(flags, TypeKind::Intrinsic { name })
    }

    /// Add a new type to the table and return its ID.
    pub fn add_type(&mut self, flags: TypeFlags, kind: TypeKind) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(Type {
            id,
            flags,
            symbol: None,
            kind,
        });
        id
    }

    /// Add a type owned by a symbol.
    pub fn add_type_with_symbol(&mut self, flags: TypeFlags, kind: TypeKind, symbol: SymbolId) -> TypeId {
        let id = self.add_type(flags, kind);
        self.types[id.index()].symbol = Some(symbol);
        id
    }

    /// Create a string literal type.
    pub fn add_string_literal(&mut self, value: &str) -> TypeId {
        self.add_type(
            TypeFlags::STRING_LITERAL,
            TypeKind::StringLiteral {
                value: value.to_string(),
            },
        )
    }

    /// Create a number literal type.
    pub fn add_number_literal(&mut self, value: f64) -> TypeId {
        self.add_type(TypeFlags::NUMBER_LITERAL, TypeKind::NumberLiteral { value })
    }

    /// Create a union type over the given members.
    pub fn add_union(&mut self, types: Vec<TypeId>) -> TypeId {
        self.add_type(TypeFlags::UNION, TypeKind::Union { types })
    }

    /// Create an object type.
    pub fn add_object_type(
        &mut self,
        object_flags: ObjectFlags,
        members: IndexMap<String, TypeId>,
    ) -> TypeId {
        self.add_type(
            TypeFlags::OBJECT,
            TypeKind::ObjectType {
                object_flags,
                members,
            },
        )
    }

    /// Create a generic instantiation of `target`.
    pub fn add_reference(&mut self, target: TypeId, type_arguments: Vec<TypeId>) -> TypeId {
        self.add_type(
            TypeFlags::OBJECT,
            TypeKind::Reference {
                target,
                type_arguments,
            },
        )
    }

    /// Create a tuple type: a reference whose target carries the tuple flag.
    pub fn add_tuple(&mut self, element_types: Vec<TypeId>) -> TypeId {
        let target = self.add_object_type(ObjectFlags::TUPLE | ObjectFlags::REFERENCE, IndexMap::new());
        self.add_reference(target, element_types)
    }

    /// Get a type by its ID.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    /// Get a mutable reference to a type by its ID.
    pub fn get_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.types[id.index()]
    }

    /// Get the total number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A symbol produced by the host binder.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Unique identifier.
    pub id: SymbolId,
    /// The declared name.
    pub name: String,
    /// Symbol flags.
    pub flags: SymbolFlags,
    /// The declaration that provides this symbol's runtime value, if any.
    /// Absent for ambient/structural types with no runtime backing.
    pub value_declaration: Option<NodeId>,
    /// For alias symbols (imports/re-exports), the symbol being aliased.
    pub alias_target: Option<SymbolId>,
}

/// The symbol table stores all symbols and provides access by SymbolId.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol with no value declaration.
    pub fn add_symbol(&mut self, name: &str, flags: SymbolFlags) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name: name.to_string(),
            flags,
            value_declaration: None,
            alias_target: None,
        });
        id
    }

    /// Add a symbol backed by a runtime value declaration.
    pub fn add_value_symbol(&mut self, name: &str, flags: SymbolFlags, declaration: NodeId) -> SymbolId {
        let id = self.add_symbol(name, flags);
        self.symbols[id.index()].value_declaration = Some(declaration);
        id
    }

    /// Add an alias symbol (an import binding) for `target`.
    pub fn add_alias(&mut self, name: &str, target: SymbolId, declaration: NodeId) -> SymbolId {
        let id = self.add_value_symbol(name, SymbolFlags::ALIAS, declaration);
        self.symbols[id.index()].alias_target = Some(target);
        id
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
