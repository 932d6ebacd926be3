// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode 2-D scene graph for sprites.
//!
//! `tableau_core` keeps a tree of transformable nodes, composes their local
//! transforms into world space, derives paint order from hierarchical
//! relative depths, and maps pointer positions back through the tree to
//! find the sprite that should react. It is `no_std` compatible (with
//! `alloc`) and stores nodes in struct-of-arrays layout behind generational
//! handles.
//!
//! # Architecture
//!
//! The host drives two entry points, once per frame and once per input
//! event:
//!
//! ```text
//!   setters (position, depth, visibility, add_child, ...)
//!       │  flag nodes dirty
//!       ▼
//!   Scene::draw() ──► lazy refresh ──► DrawCommand ──► DrawSink
//!                         (one level per visited node)
//!
//!   PointerEvent ──► PointerContainer::dispatch()
//!                         │
//!                         ▼
//!                    candidates_under() ──► bubble_target() ──► callback
//! ```
//!
//! **[`node`]**: The [`Scene`](node::Scene) arena: topology, local
//! properties, per-kind payloads, draw traversal and hit-testing.
//!
//! **[`transform`]**: [`Transform2d`](transform::Transform2d), the
//! decomposed position / scale / rotation / tint transform, with
//! composition, interpolation and point mapping.
//!
//! **[`color`]**: [`Tint`](color::Tint), an 8-bit RGBA multiplier.
//!
//! **[`draw`]**: The [`DrawSink`](draw::DrawSink) and
//! [`TextureSource`](draw::TextureSource) seams to the renderer.
//!
//! **[`pointer`]**: Pointer events and the
//! [`PointerContainer`](pointer::PointerContainer) that dispatches them.
//!
//! **[`error`]**: [`TreeError`](error::TreeError) for misuse of the tree
//! structure.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! draw and dispatch instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-node
//!   recompute events.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod color;
pub mod draw;
pub mod error;
pub mod node;
pub mod pointer;
pub mod trace;
pub mod transform;
