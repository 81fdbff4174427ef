//! Composition of transformers, and building one from configuration.

use symgraph_core::error::Result;
use symgraph_core::{SymbolMap, TransformConfig};
use tracing::debug;

use crate::filters::{AccessLevelFilter, IdentifierFilter, KindFilter};
use crate::transformer::SymbolGraphTransformer;

/// Applies several transformers' symbol rewrites in order.
///
/// Relationship pruning runs once, after the last step, through the
/// chain's own [`SymbolGraphTransformer::transform`].
#[derive(Default)]
pub struct TransformerChain {
    steps: Vec<Box<dyn SymbolGraphTransformer + Send + Sync>>,
}

impl TransformerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn then<T>(mut self, step: T) -> Self
    where
        T: SymbolGraphTransformer + Send + Sync + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Build the filters a [`TransformConfig`] describes.
    ///
    /// Identifier filtering runs first, then kinds, then access level.
    /// Settings left empty add no step.
    pub fn from_config(config: &TransformConfig) -> Result<Self> {
        let mut chain = Self::new();

        if config.include_identifiers.is_some() || !config.exclude_identifier_prefixes.is_empty() {
            let mut filter = IdentifierFilter::new();
            if let Some(ids) = &config.include_identifiers {
                filter = filter.including(ids.iter().cloned());
            }
            for prefix in &config.exclude_identifier_prefixes {
                filter = filter.excluding_prefix(prefix.as_str());
            }
            chain = chain.then(filter);
        }

        if !config.exclude_kinds.is_empty() {
            chain = chain.then(KindFilter::excluding(config.exclude_kinds.iter().cloned()));
        }

        if let Some(level) = config.minimum_access_level()? {
            chain = chain.then(AccessLevelFilter::new(level));
        }

        debug!(steps = chain.len(), "Built transformer chain from configuration");
        Ok(chain)
    }
}

impl SymbolGraphTransformer for TransformerChain {
    fn transform_symbols(&self, symbols: SymbolMap) -> SymbolMap {
        self.steps
            .iter()
            .fold(symbols, |symbols, step| step.transform_symbols(symbols))
    }
}

impl std::fmt::Debug for TransformerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerChain")
            .field("steps", &self.steps.len())
            .finish()
    }
}
