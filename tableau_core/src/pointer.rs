// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events and their dispatch to pressable sprites.
//!
//! The host translates device input into [`PointerEvent`]s in the
//! coordinate space of the scene's root and hands them to a
//! [`PointerContainer`]. The container resolves a target under the pointer
//! (see [`Scene::resolve_target`]) and invokes the matching callback slot
//! on it. Unbound slots are skipped silently.
//!
//! Dispatch is synchronous. Target resolution finishes before any callback
//! runs, and callbacks do not receive the scene, so they cannot reshape the
//! tree mid-dispatch. Callbacks that need to mutate the scene should record
//! what to do and let the host apply it afterwards.

use alloc::vec::Vec;

use kurbo::Point;

use crate::node::{NodeDesc, NodeId, Scene};
use crate::trace::{PointerDispatchEvent, Tracer};

/// A pointer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button.
    Left,
    /// Middle button or wheel press.
    Middle,
    /// Secondary button.
    Right,
}

/// What happened to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// The pointer moved.
    Move,
    /// A button went down.
    Down(PointerButton),
    /// A button went up.
    Up(PointerButton),
    /// A button was clicked.
    Click(PointerButton),
    /// A drag began.
    DragStart,
    /// A drag ended (the release point is the drop location).
    DragEnd,
}

impl PointerEventKind {
    /// Returns the button involved, for button events.
    #[must_use]
    pub const fn button(self) -> Option<PointerButton> {
        match self {
            Self::Down(b) | Self::Up(b) | Self::Click(b) => Some(b),
            Self::Move | Self::DragStart | Self::DragEnd => None,
        }
    }
}

/// A discrete pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Where it happened, in the space of the scene's root.
    pub position: Point,
}

impl PointerEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// The root of a pointer-sensitive subtree and its drag state.
///
/// Only nodes inside the subtree are hit-tested, and bubbling never leaves
/// it. At most one drag is tracked at a time.
#[derive(Clone, Debug)]
pub struct PointerContainer {
    root: NodeId,
    drag_subject: Option<NodeId>,
}

impl PointerContainer {
    /// Creates a container node in `scene` and wraps it.
    ///
    /// # Panics
    ///
    /// Panics if `desc.parent` is a stale handle.
    pub fn new(scene: &mut Scene, desc: NodeDesc) -> Self {
        Self::from_node(scene.spawn_container(desc))
    }

    /// Uses an existing node as the pointer root.
    #[must_use]
    pub const fn from_node(root: NodeId) -> Self {
        Self {
            root,
            drag_subject: None,
        }
    }

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node a drag started on, while the drag lasts.
    #[must_use]
    pub const fn drag_subject(&self) -> Option<NodeId> {
        self.drag_subject
    }

    /// Collects every visible sprite under `point`, in paint order.
    #[must_use]
    pub fn find_candidates_under(&self, scene: &Scene, point: Point) -> Vec<NodeId> {
        scene.candidates_under(self.root, point)
    }

    /// Resolves the node that would receive an event at `point`.
    #[must_use]
    pub fn resolve_target(&self, scene: &Scene, point: Point) -> Option<NodeId> {
        scene.resolve_target(self.root, point)
    }

    /// Delivers one event and returns the node it resolved to.
    ///
    /// - Move, button and click events invoke the target's matching slot.
    /// - A drag start invokes the target's drag-start slot; if one is bound
    ///   the target becomes the drag subject.
    /// - A drag end invokes the drag subject's drop slot with the target
    ///   under the release point, then clears the drag subject whether or
    ///   not anything ran.
    ///
    /// # Panics
    ///
    /// Panics if the root handle is stale.
    pub fn dispatch(&mut self, scene: &mut Scene, event: &PointerEvent) -> Option<NodeId> {
        self.dispatch_traced(scene, event, &mut Tracer::none())
    }

    /// Like [`dispatch`](Self::dispatch), but reports the outcome to
    /// `tracer`.
    ///
    /// # Panics
    ///
    /// Panics if the root handle is stale.
    pub fn dispatch_traced(
        &mut self,
        scene: &mut Scene,
        event: &PointerEvent,
        tracer: &mut Tracer<'_>,
    ) -> Option<NodeId> {
        let target = self.resolve_target(scene, event.position);
        let handled = match event.kind {
            PointerEventKind::DragEnd => self.finish_drag(scene, event, target),
            PointerEventKind::DragStart => {
                let started = target.is_some_and(|t| invoke(scene, t, event));
                if started {
                    self.drag_subject = target;
                }
                started
            }
            _ => target.is_some_and(|t| invoke(scene, t, event)),
        };
        tracer.pointer_dispatch(&PointerDispatchEvent {
            kind: event.kind,
            position: event.position,
            target,
            handled,
        });
        target
    }

    fn finish_drag(
        &mut self,
        scene: &mut Scene,
        event: &PointerEvent,
        target: Option<NodeId>,
    ) -> bool {
        let Some(subject) = self.drag_subject.take() else {
            return false;
        };
        if !scene.is_alive(subject) {
            return false;
        }
        let Some(on_drop) = scene
            .pressable_mut(subject)
            .and_then(|p| p.handlers.drag_end.as_mut())
        else {
            return false;
        };
        on_drop(event, target);
        true
    }
}

/// Invokes `node`'s slot for a non-drop event. Returns whether one was bound.
fn invoke(scene: &mut Scene, node: NodeId, event: &PointerEvent) -> bool {
    let Some(pressable) = scene.pressable_mut(node) else {
        return false;
    };
    let handlers = &mut pressable.handlers;
    let slot = match event.kind {
        PointerEventKind::Move => handlers.hover.as_mut(),
        PointerEventKind::Down(b) => handlers.press.slot_mut(b).as_mut(),
        PointerEventKind::Up(b) => handlers.release.slot_mut(b).as_mut(),
        PointerEventKind::Click(b) => handlers.click.slot_mut(b).as_mut(),
        PointerEventKind::DragStart => handlers.drag_start.as_mut(),
        PointerEventKind::DragEnd => None,
    };
    match slot {
        Some(f) => {
            f(event);
            true
        }
        None => false,
    }
}
