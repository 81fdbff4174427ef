//! Built-in symbol filters.

use std::collections::HashSet;

use symgraph_core::{AccessLevel, Symbol, SymbolMap};
use tracing::warn;

use crate::transformer::SymbolGraphTransformer;

/// Keeps symbols at least as visible as a minimum access level.
///
/// Symbols with an access level outside the known ordering are kept.
#[derive(Debug, Clone)]
pub struct AccessLevelFilter {
    minimum: AccessLevel,
}

impl AccessLevelFilter {
    pub fn new(minimum: AccessLevel) -> Self {
        Self { minimum }
    }

    fn keeps(&self, symbol: &Symbol) -> bool {
        let Some(minimum) = self.minimum.rank() else {
            return true;
        };
        match symbol.access_level.rank() {
            Some(rank) => rank >= minimum,
            None => {
                warn!(
                    symbol = symbol.precise_identifier(),
                    access_level = %symbol.access_level,
                    "Unknown access level, keeping symbol"
                );
                true
            }
        }
    }
}

impl SymbolGraphTransformer for AccessLevelFilter {
    fn transform_symbols(&self, symbols: SymbolMap) -> SymbolMap {
        symbols.into_iter().filter(|(_, s)| self.keeps(s)).collect()
    }
}

/// Drops symbols whose kind identifier is excluded.
#[derive(Debug, Clone, Default)]
pub struct KindFilter {
    excluded: HashSet<String>,
}

impl KindFilter {
    pub fn excluding<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: kinds.into_iter().map(Into::into).collect(),
        }
    }
}

impl SymbolGraphTransformer for KindFilter {
    fn transform_symbols(&self, symbols: SymbolMap) -> SymbolMap {
        symbols
            .into_iter()
            .filter(|(_, s)| !self.excluded.contains(&s.kind.identifier))
            .collect()
    }
}

/// Filters symbols by precise identifier: an optional allow-list and a set
/// of excluded prefixes. Exclusion wins over the allow-list.
#[derive(Debug, Clone, Default)]
pub struct IdentifierFilter {
    include: Option<HashSet<String>>,
    excluded_prefixes: Vec<String>,
}

impl IdentifierFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only these identifiers.
    pub fn including<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Drop identifiers starting with `prefix`.
    pub fn excluding_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.excluded_prefixes.push(prefix.into());
        self
    }

    fn keeps(&self, id: &str) -> bool {
        if self.excluded_prefixes.iter().any(|p| id.starts_with(p.as_str())) {
            return false;
        }
        self.include.as_ref().map_or(true, |include| include.contains(id))
    }
}

impl SymbolGraphTransformer for IdentifierFilter {
    fn transform_symbols(&self, symbols: SymbolMap) -> SymbolMap {
        symbols.into_iter().filter(|(id, _)| self.keeps(id)).collect()
    }
}
