//! symgraph-core: Shared types, configuration, and error handling for symgraph.
//!
//! This crate provides the foundational types used by the symbol graph
//! transformers:
//! - The symbol graph document (metadata, module, symbols, relationships)
//! - Symbol and relationship records with pass-through of unknown fields
//! - Transform configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::TransformConfig;
pub use error::SymgraphError;
pub use types::{AccessLevel, Relationship, RelationshipKind, Symbol, SymbolGraph, SymbolMap};
