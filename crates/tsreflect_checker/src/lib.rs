//! tsreflect_checker: the host type-checker boundary.
//!
//! The reflection pass never checks types itself; it queries a late-stage
//! compilation API for "type of this declaration", "base types of this
//! type", "symbol of this type", and "syntax form this type would take".
//! This crate models that boundary: an id-indexed type table, a symbol
//! table, and the read-only `Checker` facade over both. Type graphs can
//! be built directly against the tables, so the resolver is testable
//! without a live compilation session.

pub mod checker;
pub mod types;

pub use checker::{Checker, TypeSyntax};
pub use types::{Symbol, SymbolTable, Type, TypeKind, TypeTable};
