// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads records from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//! Draw passes become duration slices; pointer dispatches and node
//! recomputes become instant events.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};
use std::time::Duration;

use serde_json::{Value, json};

use crate::recorder::{Record, RecordedEvent};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(records: &[Record], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for record in records {
        let ts = micros(record.elapsed);
        match record.event {
            RecordedEvent::DrawBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Draw",
                    "cat": "Draw",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass": e.pass,
                        "root": format!("{:?}", e.root),
                    }
                }));
            }
            RecordedEvent::DrawEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Draw",
                    "cat": "Draw",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass": e.pass,
                        "visited": e.stats.visited,
                        "recomputed": e.stats.recomputed,
                        "emitted": e.stats.emitted,
                        "skipped_hidden": e.stats.skipped_hidden,
                    }
                }));
            }
            RecordedEvent::PointerDispatch(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.kind),
                    "cat": "Pointer",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "x": e.position.x,
                        "y": e.position.y,
                        "target": e.target.map(|id| format!("{id:?}")),
                        "handled": e.handled,
                    }
                }));
            }
            RecordedEvent::NodeRecomputed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "NodeRecomputed",
                    "cat": "Rich",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "pass": e.pass,
                        "node": format!("{:?}", e.node),
                        "x": e.world.position.x,
                        "y": e.world.position.y,
                        "rotation": e.world.rotation,
                        "depth": e.absolute_depth,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn micros(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use tableau_core::draw::DrawCommand;
    use tableau_core::node::{NodeDesc, Scene, SpriteDesc, TextureId};
    use tableau_core::pointer::{
        PointerButton, PointerContainer, PointerEvent, PointerEventKind,
    };
    use tableau_core::trace::Tracer;

    #[test]
    fn export_produces_valid_json() {
        let mut scene = Scene::new();
        let mut pointer = PointerContainer::new(&mut scene, NodeDesc::default());
        let _sprite = scene.spawn_pressable(
            SpriteDesc::new(TextureId(0))
                .with_parent(pointer.root())
                .with_size(kurbo::Size::new(10.0, 10.0)),
        );
        let textures = |_: TextureId| Some(kurbo::Size::new(10.0, 10.0));

        let mut rec = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            let mut out = Vec::<DrawCommand>::new();
            scene.draw_traced(pointer.root(), &textures, &mut out, &mut tracer);
            pointer.dispatch_traced(
                &mut scene,
                &PointerEvent::new(
                    PointerEventKind::Click(PointerButton::Left),
                    kurbo::Point::ORIGIN,
                ),
                &mut tracer,
            );
        }

        let mut out = Vec::new();
        export(rec.records(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        // Begin, two recomputes, end, click.
        assert_eq!(parsed.len(), 5);

        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "Draw");
        assert_eq!(parsed[1]["name"], "NodeRecomputed");
        assert_eq!(parsed[3]["ph"], "E");
        assert_eq!(parsed[3]["args"]["emitted"], 1);

        assert_eq!(parsed[4]["ph"], "i");
        assert_eq!(parsed[4]["name"], "Click(Left)");
        assert_eq!(parsed[4]["args"]["handled"], false);
        assert!(parsed[4]["args"]["target"].is_string());
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
