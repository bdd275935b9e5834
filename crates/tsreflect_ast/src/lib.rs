//! tsreflect_ast: AST node definitions for the reflection transformer.
//!
//! Models the slice of a late-stage compilation AST the transformer
//! consumes (class declarations, members, decorators) and the expression
//! vocabulary it synthesizes (object/array literals, calls, arrows).
//! Nodes reference child nodes via arena-allocated references.

pub mod factory;
pub mod node;
pub mod syntax_kind;
pub mod types;
