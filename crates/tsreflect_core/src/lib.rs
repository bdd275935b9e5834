//! tsreflect_core: shared primitives for the reflection transformer.
//!
//! Text spans and line mapping for source location tracking, plus the
//! string interner used for identifier text.

pub mod intern;
pub mod text;
