//! Error types for the scene graph.

use crate::scene::NodeId;
use thiserror::Error;

/// Errors raised by structural scene-graph operations.
///
/// These are programmer errors (a stale handle, a violated tree invariant);
/// the failed operation leaves the graph unchanged. They are never retried
/// or silently recovered.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The handle does not refer to a live node in this graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// `remove_child` was called with a node that is not a child of the
    /// given parent.
    #[error("node {child} is not a child of node {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Attaching the child would make a node its own ancestor.
    #[error("attaching node {child} under node {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

/// Result type alias using the scene graph's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
