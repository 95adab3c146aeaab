// SPDX-License-Identifier: MIT

//! OBI dialog document to graph transformation
//!
//! A dialog document is inspected for its shape, handed to the matching
//! [`strategy::Strategy`], and turned into a flat list of [`GraphNode`]s
//! for the visual editor to render.

pub mod document;
pub mod loader;
pub mod merge;
pub mod middleware;
pub mod normalizer;
pub mod strategy;
pub mod transformer;
pub mod types;

pub use document::{DocumentShape, ObiDocument};
pub use loader::{DialogEntry, DialogLoader};
pub use merge::merge;
pub use normalizer::normalize_step;
pub use strategy::{consume, Strategy, StrategyKind};
pub use transformer::{StrategyRegistry, Transformer};
pub use types::{Edge, GraphNode, IndexedNode, NodeCollection, NodeType};
