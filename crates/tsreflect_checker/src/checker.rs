//! The read-only checker facade.
//!
//! Wraps the type and symbol tables behind the query surface the
//! reflection pass is allowed to use. Registration methods are the
//! host side of the boundary: the driver (or a test) records what the
//! real checker would already know.

use crate::types::{Symbol, SymbolTable, Type, TypeKind, TypeTable};
use rustc_hash::FxHashMap;
use tsreflect_ast::types::{NodeId, SymbolFlags, SymbolId, TypeId};

/// The syntax form a type would take if written at a given position.
/// Only the shape matters to the resolver: a type reference exposes its
/// leading identifier text; everything else falls back to symbol names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSyntax {
    TypeReference { leading_identifier: String },
    Other,
}

/// The checker facade: read-only over the whole run.
#[derive(Debug)]
pub struct Checker {
    pub type_table: TypeTable,
    pub symbol_table: SymbolTable,
    /// Resolved type per declaration node.
    node_types: FxHashMap<NodeId, TypeId>,
    /// Declared base types per class/interface type.
    base_types: FxHashMap<TypeId, Vec<TypeId>>,
}

impl Checker {
    pub fn new() -> Self {
        Self {
            type_table: TypeTable::new(),
            symbol_table: SymbolTable::new(),
            node_types: FxHashMap::default(),
            base_types: FxHashMap::default(),
        }
    }

    // ========================================================================
    // Host-side registration
    // ========================================================================

    /// Record the resolved type of a declaration node.
    pub fn register_node_type(&mut self, node: NodeId, ty: TypeId) {
        self.node_types.insert(node, ty);
    }

    /// Record the declared base types of a class/interface type.
    pub fn set_base_types(&mut self, ty: TypeId, bases: Vec<TypeId>) {
        self.base_types.insert(ty, bases);
    }

    // ========================================================================
    // Query surface
    // ========================================================================

    /// The type of a declaration, by node id.
    pub fn type_at_location(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    /// The declared base types of a type. Empty for non-class types.
    pub fn base_types(&self, ty: TypeId) -> &[TypeId] {
        self.base_types.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The symbol a type originates from, if any.
    pub fn symbol_of_type(&self, ty: TypeId) -> Option<SymbolId> {
        self.type_table.get(ty).symbol
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        self.symbol_table.get(id)
    }

    /// Follow alias symbols (imports/re-exports) to the symbol they alias.
    pub fn aliased_symbol(&self, id: SymbolId) -> SymbolId {
        let mut current = id;
        while self.symbol_table.get(current).flags.contains(SymbolFlags::ALIAS) {
            match self.symbol_table.get(current).alias_target {
                Some(target) if target != current => current = target,
                _ => break,
            }
        }
        current
    }

    /// How this type would be written at the anchor's position.
    pub fn type_to_syntax(&self, ty: TypeId, _anchor: NodeId) -> TypeSyntax {
        let t = self.type_table.get(ty);
        match &t.kind {
            TypeKind::ObjectType { .. } | TypeKind::Reference { .. } => match t.symbol {
                Some(symbol) => TypeSyntax::TypeReference {
                    leading_identifier: self.symbol_table.get(symbol).name.clone(),
                },
                None => TypeSyntax::Other,
            },
            _ => TypeSyntax::Other,
        }
    }

    /// Whether a type declares a property with the given name.
    /// References delegate to their target.
    pub fn has_property(&self, ty: TypeId, name: &str) -> bool {
        match &self.type_table.get(ty).kind {
            TypeKind::ObjectType { members, .. } => members.contains_key(name),
            TypeKind::Reference { target, .. } => self.has_property(*target, name),
            _ => false,
        }
    }

    /// A printable form of the type, for diagnostics.
    pub fn type_to_string(&self, ty: TypeId) -> String {
        let t: &Type = self.type_table.get(ty);
        match &t.kind {
            TypeKind::Intrinsic { name } => (*name).to_string(),
            TypeKind::StringLiteral { value } => format!("\"{value}\""),
            TypeKind::NumberLiteral { value } => format_number(*value),
            TypeKind::BooleanLiteral { value } => value.to_string(),
            TypeKind::ObjectType { .. } => match t.symbol {
                Some(symbol) => self.symbol_table.get(symbol).name.clone(),
                None => "{...}".to_string(),
            },
            TypeKind::Reference { target, type_arguments } => {
                let base = self.type_to_string(*target);
                if type_arguments.is_empty() {
                    base
                } else {
                    let args: Vec<_> = type_arguments.iter().map(|a| self.type_to_string(*a)).collect();
                    format!("{base}<{}>", args.join(", "))
                }
            }
            TypeKind::Union { types } => {
                let members: Vec<_> = types.iter().map(|m| self.type_to_string(*m)).collect();
                members.join(" | ")
            }
            TypeKind::Intersection { types } => {
                let members: Vec<_> = types.iter().map(|m| self.type_to_string(*m)).collect();
                members.join(" & ")
            }
        }
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
