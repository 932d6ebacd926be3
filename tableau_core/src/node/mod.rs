// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene tree data model.
//!
//! A *node* is an element of a retained 2-D scene. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale
//!   when the node is destroyed, so use-after-free shows up as a panic at
//!   the API instead of silently touching a recycled slot.
//! - Topology: parent, first-child, and sibling links forming an ordered
//!   tree. Insertion order is paint order.
//! - **Local properties** set by the caller: a [`Transform2d`]
//!   (position, scale, rotation, tint), a relative depth, visibility, and an
//!   optional label.
//! - A **kind** ([`NodeKind`]): a container, a [`Sprite`], or a
//!   [`PressableSprite`] that can receive pointer events.
//! - **Cached properties** refreshed by [`draw`](Scene::draw): the world
//!   transform (ancestor transforms composed down the chain) and the
//!   absolute depth (relative depths summed down the chain).
//!
//! Nodes are stored in struct-of-arrays layout in a [`Scene`].
//!
//! # Dirty tracking
//!
//! Every setter that changes a local transform field, the relative depth,
//! visibility or the parent link flags the node dirty. Nothing else happens
//! until a draw pass reaches the node: it then recomputes the node's cache
//! and flags only its direct children, which in turn cascade when the pass
//! reaches them. The draw pass is therefore both the query and the refresh.
//!
//! [`Transform2d`]: crate::transform::Transform2d

mod desc;
mod draw;
mod hit;
mod id;
mod kind;
mod store;
mod traverse;

pub use desc::{NodeDesc, SpriteDesc};
pub use id::{INVALID, NodeId, TextureId};
pub use kind::{
    ButtonSlots, DropHandler, NodeKind, PointerHandler, PointerHandlers, PressableSprite, Sprite,
};
pub use store::Scene;
pub use traverse::Children;
