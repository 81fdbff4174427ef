//! The symbol graph transformer contract.
//!
//! Implementors rewrite a graph's symbol table; the relationship pruning
//! that keeps the graph consistent afterwards is provided once, here.

use symgraph_core::{SymbolGraph, SymbolMap};
use tracing::debug;

/// Counts describing what a transform changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformSummary {
    pub symbols_before: usize,
    pub symbols_after: usize,
    pub relationships_before: usize,
    pub relationships_pruned: usize,
}

/// A utility that transforms a symbol graph.
pub trait SymbolGraphTransformer {
    /// Transform the given symbols.
    ///
    /// May rewrite, drop, or add entries. To transform a whole graph, use
    /// [`SymbolGraphTransformer::transform`].
    fn transform_symbols(&self, symbols: SymbolMap) -> SymbolMap;

    /// Transform a graph's symbols and keep only the relationships whose
    /// source and target both still exist.
    ///
    /// Relationships that reference a removed symbol are dropped silently;
    /// the ones kept stay in their original order.
    fn transform(&self, symbol_graph: SymbolGraph) -> SymbolGraph {
        self.transform_with_summary(symbol_graph).0
    }

    /// Same as [`SymbolGraphTransformer::transform`], also reporting how
    /// many symbols and relationships were removed.
    fn transform_with_summary(
        &self,
        mut symbol_graph: SymbolGraph,
    ) -> (SymbolGraph, TransformSummary) {
        let symbols_before = symbol_graph.symbols.len();
        let relationships_before = symbol_graph.relationships.len();

        symbol_graph.symbols = self.transform_symbols(std::mem::take(&mut symbol_graph.symbols));

        // The map's key set is the surviving-identifier set.
        let symbols = &symbol_graph.symbols;
        symbol_graph
            .relationships
            .retain(|r| symbols.contains_key(&r.source) && symbols.contains_key(&r.target));

        let summary = TransformSummary {
            symbols_before,
            symbols_after: symbol_graph.symbols.len(),
            relationships_before,
            relationships_pruned: relationships_before - symbol_graph.relationships.len(),
        };
        debug!(
            module = %symbol_graph.module.name,
            symbols_before = summary.symbols_before,
            symbols_after = summary.symbols_after,
            relationships_pruned = summary.relationships_pruned,
            "Transformed symbol graph"
        );

        (symbol_graph, summary)
    }
}

/// Any symbol-rewriting closure is a transformer.
impl<F> SymbolGraphTransformer for F
where
    F: Fn(SymbolMap) -> SymbolMap,
{
    fn transform_symbols(&self, symbols: SymbolMap) -> SymbolMap {
        self(symbols)
    }
}

/// Keeps every symbol unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl SymbolGraphTransformer for Identity {
    fn transform_symbols(&self, symbols: SymbolMap) -> SymbolMap {
        symbols
    }
}
