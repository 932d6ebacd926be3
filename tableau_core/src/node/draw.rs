// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw traversal with lazy world-state refresh.
//!
//! There is no separate update pass. A draw pass walks the tree depth-first
//! and, for every visible node it reaches:
//!
//! 1. If the node is dirty, recomputes its world transform as
//!    `parent_world ∘ local` and its absolute depth as
//!    `parent_depth + relative_depth`, flags its direct children dirty, and
//!    clears its own flag. Deeper descendants cascade one level at a time
//!    as the walk reaches them.
//! 2. Runs the kind-specific draw hook. Containers emit nothing, sprites
//!    emit one [`DrawCommand`].
//! 3. Recurses into the children in insertion order.
//!
//! Invisible nodes end the descent: neither they nor their subtree are
//! refreshed or drawn. Their dirty flags survive until they are shown again.
//!
//! The refresh reads the parent's cache, which this same walk has just
//! brought up to date. A pass that starts below a root trusts the cache of
//! the starting node's parent, so passes normally start at a root.

use kurbo::{Point, Rect, Vec2};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use super::id::{INVALID, NodeId};
use super::kind::Sprite;
use super::store::Scene;
use crate::draw::{DrawCommand, DrawSink, DrawStats, Flip, TextureSource};
use crate::trace::{DrawBeginEvent, DrawEndEvent, Tracer};
use crate::transform::Transform2d;

struct DrawPass<'a, 'b> {
    textures: &'a dyn TextureSource,
    sink: &'a mut dyn DrawSink,
    tracer: &'a mut Tracer<'b>,
    stats: DrawStats,
    #[cfg_attr(
        not(feature = "trace-rich"),
        expect(dead_code, reason = "only reported by rich tracing")
    )]
    pass: u64,
}

impl Scene {
    /// Draws the subtree rooted at `root`, refreshing stale world state on
    /// the way.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn draw(
        &mut self,
        root: NodeId,
        textures: &dyn TextureSource,
        sink: &mut dyn DrawSink,
    ) -> DrawStats {
        self.draw_traced(root, textures, sink, &mut Tracer::none())
    }

    /// Like [`draw`](Self::draw), but reports the pass to `tracer`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn draw_traced(
        &mut self,
        root: NodeId,
        textures: &dyn TextureSource,
        sink: &mut dyn DrawSink,
        tracer: &mut Tracer<'_>,
    ) -> DrawStats {
        self.validate(root);
        self.draw_pass += 1;
        let pass = self.draw_pass;
        tracer.draw_begin(&DrawBeginEvent { pass, root });

        let mut ctx = DrawPass {
            textures,
            sink,
            tracer,
            stats: DrawStats::default(),
            pass,
        };
        self.draw_node(root.idx, &mut ctx);

        let stats = ctx.stats;
        ctx.tracer.draw_end(&DrawEndEvent { pass, root, stats });
        stats
    }

    /// Returns how many draw passes this scene has run.
    #[must_use]
    pub fn draw_pass_count(&self) -> u64 {
        self.draw_pass
    }

    fn draw_node(&mut self, idx: u32, ctx: &mut DrawPass<'_, '_>) {
        let i = idx as usize;
        if !self.visible[i] {
            ctx.stats.skipped_hidden += 1;
            return;
        }
        ctx.stats.visited += 1;

        if self.dirty[i] {
            self.refresh(idx);
            ctx.stats.recomputed += 1;
            #[cfg(feature = "trace-rich")]
            ctx.tracer
                .node_recomputed(&crate::trace::NodeRecomputedEvent {
                    pass: ctx.pass,
                    node: self.handle(idx),
                    world: self.world[i],
                    absolute_depth: self.absolute_depth[i],
                });
        }

        let world = self.world[i];
        let depth = self.depth_mode.key(self.absolute_depth[i]);
        if let Some(sprite) = self.kind[i].sprite_mut()
            && let Some(command) = sprite.draw_command(&world, depth, ctx.textures)
        {
            ctx.sink.draw(&command);
            ctx.stats.emitted += 1;
        }

        let mut child = self.first_child[i];
        while child != INVALID {
            let next = self.next_sibling[child as usize];
            self.draw_node(child, ctx);
            child = next;
        }
    }

    /// Recomputes one node's cached world state from its parent's cache and
    /// pushes the dirty flag down one level.
    fn refresh(&mut self, idx: u32) {
        let i = idx as usize;
        let p = self.parent[i];
        if p == INVALID {
            self.world[i] = self.local[i];
            self.absolute_depth[i] = self.relative_depth[i];
        } else {
            let p = p as usize;
            self.world[i] = Transform2d::compose(&self.world[p], &self.local[i]);
            self.absolute_depth[i] = self.absolute_depth[p] + self.relative_depth[i];
        }

        let mut child = self.first_child[i];
        while child != INVALID {
            self.dirty[child as usize] = true;
            child = self.next_sibling[child as usize];
        }
        self.dirty[i] = false;
    }
}

impl Sprite {
    /// Returns the atlas frame, filling in the whole texture on first use.
    ///
    /// Returns `None` while the sprite has no texture, or when the frame is
    /// unset and `textures` does not know the texture's size.
    pub fn resolve_source_rect(&mut self, textures: &dyn TextureSource) -> Option<Rect> {
        if let Some(rect) = self.source_rect {
            return Some(rect);
        }
        let size = textures.texture_size(self.texture?)?;
        let rect = Rect::from_origin_size(Point::ORIGIN, size);
        self.source_rect = Some(rect);
        Some(rect)
    }

    /// Builds the draw command for this sprite placed at `world`.
    ///
    /// - The origin is the frame size scaled by the pivot.
    /// - Each non-zero axis of the size stretches the world scale by
    ///   `size / natural texture size`. A zero axis leaves it alone.
    /// - A sized sprite whose texture size is unknown draws nothing.
    /// - Mirroring moves from the scale's sign into [`Flip`]; the emitted
    ///   scale is its magnitude.
    /// - With [`flip_affects_rotation`](Self::flip_affects_rotation), the
    ///   rotation's direction vector is reflected across each flipped axis.
    pub fn draw_command(
        &mut self,
        world: &Transform2d,
        depth: f64,
        textures: &dyn TextureSource,
    ) -> Option<DrawCommand> {
        let texture = self.texture?;
        let source = self.resolve_source_rect(textures)?;
        let frame = source.size();

        let origin = Vec2::new(frame.width * self.pivot.x, frame.height * self.pivot.y);

        let mut scale = world.scale;
        if self.size.width != 0.0 || self.size.height != 0.0 {
            let natural = textures.texture_size(texture)?;
            if self.size.width != 0.0 && natural.width != 0.0 {
                scale.x *= self.size.width / natural.width;
            }
            if self.size.height != 0.0 && natural.height != 0.0 {
                scale.y *= self.size.height / natural.height;
            }
        }

        let flip = Flip::from_scale(scale);
        let mut rotation = world.rotation;
        if self.flip_affects_rotation && flip.any() {
            let mut dir = Vec2::from_angle(rotation);
            if flip.horizontal {
                dir.x = -dir.x;
            }
            if flip.vertical {
                dir.y = -dir.y;
            }
            rotation = dir.atan2();
        }

        Some(DrawCommand {
            texture,
            source,
            position: world.position,
            rotation,
            origin,
            scale: Vec2::new(scale.x.abs(), scale.y.abs()),
            tint: world.tint,
            flip,
            depth,
        })
    }
}
