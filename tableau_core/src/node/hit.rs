// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit-testing and target resolution.
//!
//! Hit-testing never reads the draw caches. Transforms are composed from the
//! local values while descending, so a query made between a mutation and
//! the next draw pass already sees the new layout.
//!
//! Resolution walks the candidates front to back (reverse paint order) and
//! accepts the first one that yields a target:
//!
//! - An active pressable sprite is its own target. An inactive one yields
//!   nothing and the next candidate is tried.
//! - Any other sprite bubbles to its nearest pressable ancestor, which is
//!   the target only if it is active and has
//!   [`bubble_to_children`](super::PressableSprite::bubble_to_children) set.
//!   The walk does not continue past that ancestor.

use alloc::vec::Vec;

use kurbo::{Point, Size};

use super::id::{INVALID, NodeId};
use super::kind::{NodeKind, Sprite};
use super::store::Scene;
use crate::transform::Transform2d;

impl Sprite {
    /// Returns the pointer-sensitive size: the output size, with each zero
    /// axis taken from the atlas frame.
    ///
    /// An axis left at natural size before a draw pass has resolved the
    /// frame (or whose frame is empty) leaves the sprite with no hit area.
    #[must_use]
    pub fn hit_size(&self) -> Option<Size> {
        let frame = self.source_rect.map_or(Size::ZERO, |rect| rect.size());
        Some(self.output_size(frame)).filter(|size| size.width > 0.0 && size.height > 0.0)
    }

    /// Tests a point given in the sprite's local space, where the pivot sits
    /// at the origin.
    #[must_use]
    pub fn contains_local(&self, point: Point) -> bool {
        let Some(size) = self.hit_size() else {
            return false;
        };
        let x = point.x + size.width * self.pivot.x;
        let y = point.y + size.height * self.pivot.y;
        (0.0..=size.width).contains(&x) && (0.0..=size.height).contains(&y)
    }
}

impl Scene {
    /// Tests whether the world-space `point` falls inside a sprite.
    ///
    /// Containers never contain anything. Visibility is not considered.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn hit_test(&self, id: NodeId, point: Point) -> bool {
        let (world, _) = self.compute_world(id);
        self.contains_world(id.idx, &world, point)
    }

    /// Collects every visible sprite under `point` in the subtree rooted at
    /// `root`, in paint order.
    ///
    /// An invisible node hides its whole subtree.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn candidates_under(&self, root: NodeId, point: Point) -> Vec<NodeId> {
        self.validate(root);
        let mut out = Vec::new();
        let parent = self.parent[root.idx as usize];
        let parent_world = if parent == INVALID {
            Transform2d::IDENTITY
        } else {
            self.compute_world_at(parent).0
        };
        self.collect_candidates(root.idx, &parent_world, point, &mut out);
        out
    }

    /// Resolves a hit `candidate` to the node that should receive the
    /// event, without walking past `root`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    #[must_use]
    pub fn bubble_target(&self, root: NodeId, candidate: NodeId) -> Option<NodeId> {
        self.validate(root);
        self.validate(candidate);
        let mut idx = candidate.idx;
        let mut bubbling = false;
        loop {
            if let NodeKind::Pressable(pressable) = &self.kind[idx as usize] {
                let accepts = pressable.active && (!bubbling || pressable.bubble_to_children);
                return accepts.then(|| self.handle(idx));
            }
            if idx == root.idx {
                return None;
            }
            idx = self.parent[idx as usize];
            if idx == INVALID {
                return None;
            }
            bubbling = true;
        }
    }

    /// Finds the node that should receive a pointer event at `point`,
    /// searching the subtree rooted at `root` front to back.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn resolve_target(&self, root: NodeId, point: Point) -> Option<NodeId> {
        self.candidates_under(root, point)
            .into_iter()
            .rev()
            .find_map(|candidate| self.bubble_target(root, candidate))
    }

    fn collect_candidates(
        &self,
        idx: u32,
        parent_world: &Transform2d,
        point: Point,
        out: &mut Vec<NodeId>,
    ) {
        let i = idx as usize;
        if !self.visible[i] {
            return;
        }
        let world = Transform2d::compose(parent_world, &self.local[i]);
        if self.contains_world(idx, &world, point) {
            out.push(self.handle(idx));
        }
        let mut child = self.first_child[i];
        while child != INVALID {
            self.collect_candidates(child, &world, point, out);
            child = self.next_sibling[child as usize];
        }
    }

    fn contains_world(&self, idx: u32, world: &Transform2d, point: Point) -> bool {
        let Some(sprite) = self.kind[idx as usize].sprite() else {
            return false;
        };
        world
            .inverse_transform_point(point)
            .is_some_and(|local| sprite.contains_local(local))
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use kurbo::{Rect, Vec2};

    use super::*;
    use crate::node::{NodeDesc, SpriteDesc, TextureId};

    fn square(size: f64) -> SpriteDesc {
        SpriteDesc::new(TextureId(0)).with_size(Size::new(size, size))
    }

    fn set_flags(scene: &mut Scene, id: NodeId, active: bool, bubble: bool) {
        let p = scene.pressable_mut(id).unwrap();
        p.active = active;
        p.bubble_to_children = bubble;
    }

    #[test]
    fn centered_square_containment() {
        let sprite = Sprite {
            size: Size::new(100.0, 100.0),
            ..Sprite::default()
        };
        assert!(sprite.contains_local(Point::new(0.0, 0.0)));
        assert!(sprite.contains_local(Point::new(50.0, -50.0)));
        assert!(!sprite.contains_local(Point::new(60.0, 0.0)));
        assert!(!sprite.contains_local(Point::new(0.0, -50.5)));
    }

    #[test]
    fn world_hit_test_on_origin_sprite() {
        let mut scene = Scene::new();
        let id = scene.spawn_sprite(square(100.0));
        assert!(scene.hit_test(id, Point::new(0.0, 0.0)));
        assert!(!scene.hit_test(id, Point::new(60.0, 0.0)));
    }

    #[test]
    fn hit_size_falls_back_to_frame() {
        let mut sprite = Sprite::new(Some(TextureId(0)));
        assert_eq!(sprite.hit_size(), None);
        sprite.source_rect = Some(Rect::new(10.0, 10.0, 30.0, 20.0));
        assert_eq!(sprite.hit_size(), Some(Size::new(20.0, 10.0)));
        sprite.size = Size::new(5.0, 5.0);
        assert_eq!(sprite.hit_size(), Some(Size::new(5.0, 5.0)));
    }

    #[test]
    fn zero_size_axis_hits_frame_extent() {
        let mut sprite = Sprite::new(Some(TextureId(0)));
        sprite.size = Size::new(0.0, 40.0);
        assert_eq!(sprite.hit_size(), None);
        sprite.source_rect = Some(Rect::new(0.0, 0.0, 30.0, 20.0));
        assert_eq!(sprite.hit_size(), Some(Size::new(30.0, 40.0)));
        assert!(sprite.contains_local(Point::new(10.0, 15.0)));
        assert!(!sprite.contains_local(Point::new(16.0, 0.0)));
    }

    #[test]
    fn containers_are_never_hit() {
        let mut scene = Scene::new();
        let id = scene.spawn_container(NodeDesc::default());
        assert!(!scene.hit_test(id, Point::ORIGIN));
    }

    #[test]
    fn hit_test_maps_through_ancestors() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(
            NodeDesc::default()
                .with_position(Point::new(200.0, 100.0))
                .with_rotation(FRAC_PI_2)
                .with_scale(Vec2::new(2.0, 2.0)),
        );
        // Local (10, 0) lands at root + rotate90(20, 0) = (200, 120).
        let id = scene.spawn_sprite(
            square(10.0)
                .with_parent(root)
                .with_position(Point::new(10.0, 0.0)),
        );
        assert!(scene.hit_test(id, Point::new(200.0, 120.0)));
        // The scaled square spans 20 world units.
        assert!(scene.hit_test(id, Point::new(209.0, 129.0)));
        assert!(!scene.hit_test(id, Point::new(212.0, 120.0)));
    }

    #[test]
    fn hit_test_sees_changes_before_draw() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(NodeDesc::default());
        let id = scene.spawn_sprite(square(10.0).with_parent(root));
        scene.set_position(root, Point::new(500.0, 0.0));
        assert!(scene.hit_test(id, Point::new(500.0, 0.0)));
        assert_eq!(
            scene.candidates_under(root, Point::new(500.0, 0.0)),
            [id]
        );
    }

    #[test]
    fn zero_scale_never_hits() {
        let mut scene = Scene::new();
        let id = scene.spawn_sprite(square(10.0).with_scale(Vec2::new(0.0, 1.0)));
        assert!(!scene.hit_test(id, Point::ORIGIN));
    }

    #[test]
    fn candidates_in_paint_order() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(NodeDesc::default());
        let back = scene.spawn_sprite(square(100.0).with_parent(root));
        let inner = scene.spawn_pressable(square(20.0).with_parent(back));
        let front = scene.spawn_pressable(square(50.0).with_parent(root));
        let _miss = scene.spawn_sprite(
            square(10.0)
                .with_parent(root)
                .with_position(Point::new(300.0, 0.0)),
        );

        assert_eq!(
            scene.candidates_under(root, Point::ORIGIN),
            [back, inner, front]
        );
    }

    #[test]
    fn invisible_subtree_is_not_a_candidate() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(NodeDesc::default());
        let hidden = scene.spawn_container(NodeDesc::default().with_parent(root).with_visible(false));
        let _under_hidden = scene.spawn_pressable(square(10.0).with_parent(hidden));
        let shown = scene.spawn_pressable(square(10.0).with_parent(root));

        assert_eq!(scene.candidates_under(root, Point::ORIGIN), [shown]);
        scene.set_visible(root, false);
        assert!(scene.candidates_under(root, Point::ORIGIN).is_empty());
    }

    #[test]
    fn topmost_sibling_wins() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(NodeDesc::default());
        let _below = scene.spawn_pressable(square(50.0).with_parent(root));
        let above = scene.spawn_pressable(square(50.0).with_parent(root));
        assert_eq!(scene.resolve_target(root, Point::ORIGIN), Some(above));
    }

    #[test]
    fn inactive_candidate_falls_through_to_next() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(NodeDesc::default());
        let below = scene.spawn_pressable(square(50.0).with_parent(root));
        let above = scene.spawn_pressable(square(50.0).with_parent(root));
        set_flags(&mut scene, above, false, false);
        assert_eq!(scene.resolve_target(root, Point::ORIGIN), Some(below));

        set_flags(&mut scene, below, false, false);
        assert_eq!(scene.resolve_target(root, Point::ORIGIN), None);
    }

    #[test]
    fn plain_sprite_bubbles_to_eligible_ancestor() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(NodeDesc::default());
        let button = scene.spawn_pressable(square(10.0).with_parent(root));
        let wrapper = scene.spawn_container(NodeDesc::default().with_parent(button));
        let icon = scene.spawn_sprite(
            square(10.0)
                .with_parent(wrapper)
                .with_position(Point::new(100.0, 0.0)),
        );
        let point = Point::new(100.0, 0.0);

        // Not bubble-eligible: the icon resolves to nothing.
        assert_eq!(scene.bubble_target(root, icon), None);
        assert_eq!(scene.resolve_target(root, point), None);

        set_flags(&mut scene, button, true, true);
        assert_eq!(scene.bubble_target(root, icon), Some(button));
        assert_eq!(scene.resolve_target(root, point), Some(button));

        // Inactive ancestors never accept.
        set_flags(&mut scene, button, false, true);
        assert_eq!(scene.resolve_target(root, point), None);
    }

    #[test]
    fn bubbling_stops_at_nearest_pressable() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(NodeDesc::default());
        let outer = scene.spawn_pressable(square(1.0).with_parent(root));
        let inner = scene.spawn_pressable(square(1.0).with_parent(outer));
        let icon = scene.spawn_sprite(square(1.0).with_parent(inner));
        set_flags(&mut scene, outer, true, true);
        set_flags(&mut scene, inner, true, false);
        assert_eq!(scene.bubble_target(root, icon), None);
    }

    #[test]
    fn bubbling_stops_at_root() {
        let mut scene = Scene::new();
        let outside = scene.spawn_pressable(square(10.0));
        set_flags(&mut scene, outside, true, true);
        let root = scene.spawn_container(NodeDesc::default().with_parent(outside));
        let icon = scene.spawn_sprite(square(10.0).with_parent(root));

        assert_eq!(scene.bubble_target(root, icon), None);
        assert_eq!(scene.bubble_target(outside, icon), Some(outside));
    }

    #[test]
    fn direct_hit_ignores_own_bubble_flag() {
        // Parent 200x200 at the origin accepts bubbling; child 50x50 at
        // (20, 20) does not.
        let mut scene = Scene::new();
        let root = scene.spawn_container(NodeDesc::default());
        let parent = scene.spawn_pressable(square(200.0).with_parent(root));
        set_flags(&mut scene, parent, true, true);
        let child = scene.spawn_pressable(
            square(50.0)
                .with_parent(parent)
                .with_position(Point::new(20.0, 20.0)),
        );
        let point = Point::new(20.0, 20.0);

        assert_eq!(scene.candidates_under(root, point), [parent, child]);
        assert_eq!(scene.resolve_target(root, point), Some(child));

        // Disabling the child does not bubble from it, but the parent is
        // itself under the point and takes the event directly.
        set_flags(&mut scene, child, false, false);
        assert_eq!(scene.bubble_target(root, child), None);
        assert_eq!(scene.resolve_target(root, point), Some(parent));

        // Outside the parent nothing resolves.
        assert_eq!(scene.resolve_target(root, Point::new(150.0, 0.0)), None);
    }
}
