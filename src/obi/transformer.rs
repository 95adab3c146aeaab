// SPDX-License-Identifier: MIT

//! Strategy selection and the document-to-graph facade

use serde_json::Value;
use std::sync::Arc;

use super::document::{DocumentShape, ObiDocument};
use super::strategy::{
    consume, GraphicalStrategy, RootDialogStrategy, SequentialStrategy, Strategy,
};
use super::types::GraphNode;
use crate::error::GraphConsistencyError;

/// Decides whether a registry entry handles a document shape
pub type ShapePredicate = fn(&DocumentShape) -> bool;

/// Ordered `(predicate, strategy)` table with a fallback strategy
///
/// The first entry whose predicate accepts the shape wins; when none does,
/// the fallback is used.
#[derive(Clone)]
pub struct StrategyRegistry {
    entries: Vec<(ShapePredicate, Arc<dyn Strategy>)>,
    fallback: Arc<dyn Strategy>,
}

impl StrategyRegistry {
    /// Empty table that always answers with `fallback`
    pub fn new(fallback: Arc<dyn Strategy>) -> Self {
        Self {
            entries: Vec::new(),
            fallback,
        }
    }

    pub fn register(&mut self, predicate: ShapePredicate, strategy: Arc<dyn Strategy>) {
        self.entries.push((predicate, strategy));
    }

    pub fn select(&self, shape: &DocumentShape) -> &dyn Strategy {
        self.entries
            .iter()
            .find(|(predicate, _)| predicate(shape))
            .map(|(_, strategy)| strategy.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Recognizer only
fn recognizer_only(shape: &DocumentShape) -> bool {
    shape.flag() == "100"
}

/// Recognizer and rules, with or without steps
fn recognizer_with_rules(shape: &DocumentShape) -> bool {
    matches!(shape.flag().as_str(), "110" | "111")
}

impl Default for StrategyRegistry {
    /// The standard dispatch table: `100` graphical, `110`/`111` root
    /// dialog, anything else sequential
    fn default() -> Self {
        let mut registry = Self::new(Arc::new(SequentialStrategy::new()));
        registry.register(recognizer_only, Arc::new(GraphicalStrategy::new()));
        registry.register(recognizer_with_rules, Arc::new(RootDialogStrategy::new()));
        registry
    }
}

/// Converts OBI documents into renderable graphs
///
/// Stateless apart from its registry; share one instance freely across
/// threads.
#[derive(Clone, Default)]
pub struct Transformer {
    registry: StrategyRegistry,
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: StrategyRegistry) -> Self {
        Self { registry }
    }

    /// Pick the strategy for `input`; `None` for a missing or null document
    pub fn choose_strategy(&self, input: Option<&Value>) -> Option<&dyn Strategy> {
        let raw = input.filter(|v| !v.is_null())?;
        let shape = ObiDocument::new(raw).shape();
        let strategy = self.registry.select(&shape);
        log::debug!(
            "Document shape {} -> {} strategy (middlewares: {:?})",
            shape.flag(),
            strategy.kind(),
            middleware_names(strategy)
        );
        Some(strategy)
    }

    /// Transform `input` into graph nodes; empty for a missing or null document
    pub fn to_graph_schema(
        &self,
        input: Option<&Value>,
    ) -> Result<Vec<GraphNode>, GraphConsistencyError> {
        let (Some(raw), Some(strategy)) = (input, self.choose_strategy(input)) else {
            return Ok(Vec::new());
        };

        let graph = consume(&ObiDocument::new(raw), strategy)?;
        log::debug!("Built {} graph with {} nodes", strategy.kind(), graph.len());
        Ok(graph)
    }
}

fn middleware_names(strategy: &dyn Strategy) -> Vec<&str> {
    strategy.middlewares().iter().map(|m| m.name()).collect()
}
