//! Game-agnostic block engine.
//!
//! - [`world`]: the sparse block grid, positions, facings and shapes.
//! - [`state`]: packing a block's variable state into one integer.
//! - [`causal`] and [`rules`]: neighbor-driven updates as an explicit event DAG.

pub mod causal;
pub mod rules;
pub mod state;
pub mod world;
