// src/graph/mod.rs

//! Owner-scoped dependency graph logic.
//!
//! - [`cycle`] decides whether a graph is acyclic (the gatekeeper every
//!   accepted mutation and every layout pass runs behind).
//! - [`layout`] assigns deterministic layers to an acyclic graph for
//!   visualization.
//! - [`cache`] is the client-side mirror of one owner's graph, kept
//!   consistent incrementally instead of refetching after every edit.

pub mod cache;
pub mod cycle;
pub mod layout;

pub use cache::GraphCache;
pub use cycle::{UnknownSuccessor, has_cycle};
pub use layout::{root_ids, task_levels};
