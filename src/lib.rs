// SPDX-License-Identifier: MIT

//! Dialog graph transformation for the visual bot editor
//!
//! Converts OBI dialog documents (recognizer, rules/triggers and
//! steps/actions) into flat lists of graph nodes with adjacency lists.

pub mod config;
pub mod error;
pub mod obi;
pub mod server;

pub use error::{GraphConsistencyError, ObiError};
pub use obi::{GraphNode, Transformer};
