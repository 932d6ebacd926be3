// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timestamped in-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it sees,
//! stamped with the time elapsed since the recorder was created. Node
//! handles cannot be rebuilt from raw bytes outside the scene, so events
//! are kept typed rather than encoded.

use std::time::{Duration, Instant};

use tableau_core::trace::{
    DrawBeginEvent, DrawEndEvent, NodeRecomputedEvent, PointerDispatchEvent, TraceSink,
};

/// A recorded event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`DrawBeginEvent`].
    DrawBegin(DrawBeginEvent),
    /// A [`DrawEndEvent`].
    DrawEnd(DrawEndEvent),
    /// A [`PointerDispatchEvent`].
    PointerDispatch(PointerDispatchEvent),
    /// A [`NodeRecomputedEvent`].
    NodeRecomputed(NodeRecomputedEvent),
}

/// A [`RecordedEvent`] with the time it was received.
#[derive(Clone, Copy, Debug)]
pub struct Record {
    /// Time since the recorder was created.
    pub elapsed: Duration,
    /// The event.
    pub event: RecordedEvent,
}

/// A [`TraceSink`] that keeps events in memory.
#[derive(Debug)]
pub struct RecorderSink {
    start: Instant,
    records: Vec<Record>,
}

impl Default for RecorderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderSink {
    /// Creates an empty recorder whose clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            records: Vec::new(),
        }
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Drops every recorded event. The clock keeps running.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn push(&mut self, event: RecordedEvent) {
        self.records.push(Record {
            elapsed: self.start.elapsed(),
            event,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        self.push(RecordedEvent::DrawBegin(*e));
    }

    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        self.push(RecordedEvent::DrawEnd(*e));
    }

    fn on_pointer_dispatch(&mut self, e: &PointerDispatchEvent) {
        self.push(RecordedEvent::PointerDispatch(*e));
    }

    fn on_node_recomputed(&mut self, e: &NodeRecomputedEvent) {
        self.push(RecordedEvent::NodeRecomputed(*e));
    }
}
