//! Import retention.
//!
//! The pass mints identifier references to symbols that otherwise only
//! appear in type positions, so the host's reachability analysis alone
//! would elide the imports behind them. Retention is computed after the
//! pass: the combinator unions the host's own answer with the pass's
//! referenced set. It composes with the host decision rather than
//! replacing it, and installing the same set twice changes nothing.

use rustc_hash::FxHashSet;
use tsreflect_ast::types::SymbolId;

#[derive(Debug, Clone, Default)]
pub struct ImportRetention {
    referenced: FxHashSet<SymbolId>,
}

impl ImportRetention {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_referenced(referenced: FxHashSet<SymbolId>) -> Self {
        Self { referenced }
    }

    /// Fold another unit's referenced set in. Idempotent.
    pub fn merge(&mut self, referenced: &FxHashSet<SymbolId>) {
        self.referenced.extend(referenced.iter().copied());
    }

    pub fn is_referenced(&self, symbol: SymbolId) -> bool {
        self.referenced.contains(&symbol)
    }

    /// Whether an import symbol must be kept: the host's own decision,
    /// widened by the pass's referenced set. Never narrows.
    pub fn should_retain(&self, symbol: SymbolId, host_decision: bool) -> bool {
        host_decision || self.is_referenced(symbol)
    }
}
