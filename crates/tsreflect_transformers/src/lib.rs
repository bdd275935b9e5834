//! tsreflect_transformers: the reflection pass.
//!
//! The pass walks a bound source file looking for classes tagged with a
//! reflective decorator, resolves their compile-time types into
//! descriptors through the checker facade, and appends synthesized
//! metadata decorators to the class and its members. Classes without the
//! tag pass through untouched.
//!
//! The pass never mutates input nodes. Transformed declarations are
//! rebuilt through the node factory into the same arena, and all mutable
//! pass state lives in an explicit [`PassContext`] threaded through the
//! calls.

pub mod context;
pub mod orchestrator;
pub mod resolver;
pub mod retention;
pub mod synth;

pub use context::PassContext;
pub use orchestrator::ReflectTransformer;
pub use resolver::TypeResolver;
pub use retention::ImportRetention;
pub use synth::AttachmentSynthesizer;

use rustc_hash::FxHashSet;
use thiserror::Error;
use tsreflect_ast::node::SourceFile;
use tsreflect_ast::types::SymbolId;
use tsreflect_diagnostics::DiagnosticCollection;

/// A hard transform failure. Hard failures abort the current unit's
/// pass; shapes the resolver merely cannot classify degrade to `Unknown`
/// descriptors plus a warning diagnostic instead.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("computed property names cannot be reflected: {file} {line}:{character}")]
    ComputedPropertyKey {
        file: String,
        line: u32,
        character: u32,
    },
    #[error("cannot reflect an unnamed class declaration")]
    UnnamedClass,
}

/// The result of transforming one source file.
#[derive(Debug)]
pub struct TransformOutput<'a> {
    /// The rebuilt source file.
    pub source_file: SourceFile<'a>,
    /// Symbols whose identifiers the pass minted references to. Feed
    /// this into an [`ImportRetention`] combinator so the host does not
    /// elide the imports behind them.
    pub referenced: FxHashSet<SymbolId>,
    /// Warnings accumulated while resolving types.
    pub diagnostics: DiagnosticCollection,
}

/// A source-file transform.
pub trait Transformer<'a> {
    fn transform(&self, source_file: &'a SourceFile<'a>)
        -> Result<TransformOutput<'a>, TransformError>;
}
