// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree usage errors.
//!
//! Every variant is a broken caller contract rather than a runtime fault, so
//! none of them is worth retrying. Hitting a missing texture or finding no
//! pointer target is normal control flow and never surfaces here.

use thiserror::Error;

use crate::node::NodeId;

/// Errors returned by structural scene operations.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The node to attach already has a parent.
    #[error("{child:?} already has parent {parent:?}")]
    AlreadyParented {
        /// The node that was being attached.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },

    /// The node to remove is not a direct child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The node that was being removed.
        child: NodeId,
        /// The parent it was removed from.
        parent: NodeId,
    },

    /// The node to detach is a root.
    #[error("{0:?} has no parent")]
    NoParent(NodeId),

    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The node that was being attached.
        child: NodeId,
        /// The requested parent, which is `child` or one of its descendants.
        parent: NodeId,
    },
}

/// Result type for structural scene operations.
pub type TreeResult<T> = Result<T, TreeError>;
