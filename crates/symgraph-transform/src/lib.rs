//! symgraph-transform: Symbol rewriting for symbol graphs.
//!
//! A [`SymbolGraphTransformer`] rewrites a graph's symbol table; its
//! provided `transform` method then drops every relationship whose source
//! or target no longer exists, so the result never has dangling edges.
//! Built-in filters cover access level, kind, and identifier selection, and
//! a [`TransformerChain`] composes them (optionally from configuration).

pub mod chain;
pub mod filters;
pub mod transformer;

pub use chain::TransformerChain;
pub use filters::{AccessLevelFilter, IdentifierFilter, KindFilter};
pub use transformer::{Identity, SymbolGraphTransformer, TransformSummary};
