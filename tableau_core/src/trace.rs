// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for draw passes and pointer dispatch.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! scene calls while drawing and dispatching pointer events. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`NodeRecomputedEvent`] and the
//!   corresponding `TraceSink` method, emitted once per recomputed node.

use kurbo::Point;

use crate::draw::DrawStats;
use crate::node::NodeId;
use crate::pointer::PointerEventKind;
#[cfg(feature = "trace-rich")]
use crate::transform::Transform2d;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a draw pass starts.
#[derive(Clone, Copy, Debug)]
pub struct DrawBeginEvent {
    /// Monotonic draw pass counter of the scene.
    pub pass: u64,
    /// Node the pass starts from.
    pub root: NodeId,
}

/// Emitted when a draw pass finishes.
#[derive(Clone, Copy, Debug)]
pub struct DrawEndEvent {
    /// Draw pass counter.
    pub pass: u64,
    /// Node the pass started from.
    pub root: NodeId,
    /// What the pass did.
    pub stats: DrawStats,
}

/// Emitted when a draw pass refreshes a node's cached world state.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct NodeRecomputedEvent {
    /// Draw pass counter.
    pub pass: u64,
    /// The refreshed node.
    pub node: NodeId,
    /// Its new world transform.
    pub world: Transform2d,
    /// Its new absolute depth.
    pub absolute_depth: f64,
}

/// Emitted once per pointer event handed to a pointer container.
#[derive(Clone, Copy, Debug)]
pub struct PointerDispatchEvent {
    /// What kind of pointer event arrived.
    pub kind: PointerEventKind,
    /// Where it happened, in root space.
    pub position: Point,
    /// The node the event resolved to, if any.
    pub target: Option<NodeId>,
    /// Whether a bound callback ran.
    pub handled: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from draw passes and pointer dispatch.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called before the first node of a draw pass is visited.
    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        _ = e;
    }

    /// Called after the last node of a draw pass is visited.
    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        _ = e;
    }

    /// Called after a pointer event has been resolved and dispatched.
    fn on_pointer_dispatch(&mut self, e: &PointerDispatchEvent) {
        _ = e;
    }

    /// Called for every node recomputed by a draw pass (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_node_recomputed(&mut self, e: &NodeRecomputedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`DrawBeginEvent`].
    #[inline]
    pub fn draw_begin(&mut self, e: &DrawBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_draw_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DrawEndEvent`].
    #[inline]
    pub fn draw_end(&mut self, e: &DrawEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_draw_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PointerDispatchEvent`].
    #[inline]
    pub fn pointer_dispatch(&mut self, e: &PointerDispatchEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pointer_dispatch(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NodeRecomputedEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn node_recomputed(&mut self, e: &NodeRecomputedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_node_recomputed(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
