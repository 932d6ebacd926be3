// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use tableau_core::trace::{
    DrawBeginEvent, DrawEndEvent, NodeRecomputedEvent, PointerDispatchEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        let _ = writeln!(self.writer, "[draw:begin] pass={} root={:?}", e.pass, e.root);
    }

    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        let s = e.stats;
        let _ = writeln!(
            self.writer,
            "[draw:end] pass={} visited={} recomputed={} emitted={} hidden={}",
            e.pass, s.visited, s.recomputed, s.emitted, s.skipped_hidden,
        );
    }

    fn on_pointer_dispatch(&mut self, e: &PointerDispatchEvent) {
        let target = match e.target {
            Some(id) => format!("{id:?}"),
            None => "none".into(),
        };
        let handled = if e.handled { "handled" } else { "ignored" };
        let _ = writeln!(
            self.writer,
            "[pointer] {:?} at ({:.1}, {:.1}) target={target} {handled}",
            e.kind, e.position.x, e.position.y,
        );
    }

    fn on_node_recomputed(&mut self, e: &NodeRecomputedEvent) {
        let _ = writeln!(
            self.writer,
            "[recompute] pass={} node={:?} pos=({:.1}, {:.1}) rot={:.3} depth={}",
            e.pass, e.node, e.world.position.x, e.world.position.y, e.world.rotation,
            e.absolute_depth,
        );
    }
}
