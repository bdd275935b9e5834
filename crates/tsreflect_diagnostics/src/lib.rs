//! tsreflect_diagnostics: diagnostic messages and reporting infrastructure.
//!
//! The transformer never fails the build for a type shape it cannot
//! classify; it records a warning diagnostic carrying the source file,
//! zero-based line/character, and the offending source text, then keeps
//! going. This crate holds those realized diagnostics.

use tsreflect_core::text::{LineAndCharacter, TextSpan};
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A realized diagnostic with location information and message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred.
    pub file: String,
    /// The source text span where this diagnostic occurred.
    pub span: TextSpan,
    /// Zero-based line/character of the span start.
    pub location: LineAndCharacter,
    /// The offending source text.
    pub snippet: String,
    /// The message text.
    pub message_text: String,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a warning diagnostic at a source location.
    pub fn warning(
        file: impl Into<String>,
        span: TextSpan,
        location: LineAndCharacter,
        snippet: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            span,
            location,
            snippet: snippet.into(),
            message_text: message.into(),
            category: DiagnosticCategory::Warning,
        }
    }

    /// Whether this is a warning diagnostic.
    pub fn is_warning(&self) -> bool {
        self.category == DiagnosticCategory::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tsreflect: {}: {} {}:{}: {}",
            self.message_text, self.file, self.location.line, self.location.character, self.snippet
        )
    }
}

/// An ordered collection of diagnostics accumulated during a pass.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to the collection.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// All diagnostics in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Print every diagnostic to stderr.
    pub fn print(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{diagnostic}");
        }
    }
}
