//! Per-unit pass state.
//!
//! One `PassContext` is created per source file and threaded through the
//! orchestrator and resolver as an explicit argument. It carries the
//! referenced-symbol set, the current lexical scope for identifier
//! minting, and the diagnostics sink.

use rustc_hash::FxHashSet;
use tsreflect_ast::node::SourceFile;
use tsreflect_ast::types::{NodeId, SymbolId};
use tsreflect_core::text::{LineAndCharacter, LineMap, TextSpan};
use tsreflect_diagnostics::{Diagnostic, DiagnosticCollection};

pub struct PassContext<'s> {
    pub file_name: &'s str,
    source_text: &'s str,
    line_map: LineMap,
    /// Symbols the pass minted identifier references to.
    pub referenced: FxHashSet<SymbolId>,
    /// The lexical scope minted identifiers should resolve in.
    pub current_scope: Option<NodeId>,
    pub diagnostics: DiagnosticCollection,
}

impl<'s> PassContext<'s> {
    pub fn new(source_file: &'s SourceFile<'s>) -> Self {
        Self {
            file_name: &source_file.file_name,
            source_text: &source_file.text,
            line_map: LineMap::new(&source_file.text),
            referenced: FxHashSet::default(),
            current_scope: source_file.data.id.is_valid().then_some(source_file.data.id),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    pub fn add_referenced(&mut self, symbol: SymbolId) {
        self.referenced.insert(symbol);
    }

    /// The zero-based line/character of a span start.
    pub fn location_of(&self, span: TextSpan) -> LineAndCharacter {
        self.line_map.line_and_character_of_pos(span.start)
    }

    /// The source text under a span, clamped to the file. Synthesized
    /// spans are empty and yield an empty snippet.
    pub fn snippet(&self, span: TextSpan) -> &'s str {
        let start = (span.start as usize).min(self.source_text.len());
        let end = (span.end() as usize).min(self.source_text.len());
        &self.source_text[start..end]
    }

    /// Record a warning diagnostic at a source span. Warnings never stop
    /// the pass.
    pub fn warn(&mut self, span: TextSpan, message: impl Into<String>) {
        let diagnostic = Diagnostic::warning(
            self.file_name,
            span,
            self.location_of(span),
            self.snippet(span),
            message,
        );
        self.diagnostics.add(diagnostic);
    }
}
