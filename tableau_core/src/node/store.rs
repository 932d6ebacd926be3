// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Vec2};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use super::desc::{NodeDesc, SpriteDesc};
use super::id::{INVALID, NodeId};
use super::kind::{NodeKind, PressableSprite, Sprite};
use super::traverse::Children;
use crate::color::Tint;
use crate::draw::DepthMode;
use crate::error::{TreeError, TreeResult};
use crate::transform::Transform2d;

/// Struct-of-arrays storage for every node of a scene.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// Parents own their children through the sibling links; the `parent`
/// array is a plain back-reference used for composition and bubbling.
#[derive(Debug)]
pub struct Scene {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) local: Vec<Transform2d>,
    pub(crate) relative_depth: Vec<f64>,
    pub(crate) visible: Vec<bool>,
    pub(crate) label: Vec<Option<String>>,
    pub(crate) kind: Vec<NodeKind>,

    // -- Cached properties (written by draw) --
    pub(crate) world: Vec<Transform2d>,
    pub(crate) absolute_depth: Vec<f64>,
    pub(crate) dirty: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) live: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Drawing --
    pub(crate) depth_mode: DepthMode,
    pub(crate) draw_pass: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            local: Vec::new(),
            relative_depth: Vec::new(),
            visible: Vec::new(),
            label: Vec::new(),
            kind: Vec::new(),
            world: Vec::new(),
            absolute_depth: Vec::new(),
            dirty: Vec::new(),
            generation: Vec::new(),
            live: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            depth_mode: DepthMode::Absolute,
            draw_pass: 0,
        }
    }

    /// Creates an empty scene that emits depth keys in the given mode.
    #[must_use]
    pub fn with_depth_mode(depth_mode: DepthMode) -> Self {
        Self {
            depth_mode,
            ..Self::new()
        }
    }

    /// Returns how depth keys are emitted to draw sinks.
    #[must_use]
    pub fn depth_mode(&self) -> DepthMode {
        self.depth_mode
    }

    /// Changes how depth keys are emitted to draw sinks.
    pub fn set_depth_mode(&mut self, depth_mode: DepthMode) {
        self.depth_mode = depth_mode;
    }

    // -- Allocation API --

    /// Creates a container node.
    ///
    /// # Panics
    ///
    /// Panics if `desc.parent` is a stale handle.
    pub fn spawn_container(&mut self, desc: NodeDesc) -> NodeId {
        self.spawn(desc, NodeKind::Container)
    }

    /// Creates a sprite node.
    ///
    /// # Panics
    ///
    /// Panics if `desc.node.parent` is a stale handle.
    pub fn spawn_sprite(&mut self, desc: SpriteDesc) -> NodeId {
        self.spawn(desc.node, NodeKind::Sprite(desc.sprite))
    }

    /// Creates an active, non-bubbling pressable sprite node.
    ///
    /// # Panics
    ///
    /// Panics if `desc.node.parent` is a stale handle.
    pub fn spawn_pressable(&mut self, desc: SpriteDesc) -> NodeId {
        self.spawn(
            desc.node,
            NodeKind::Pressable(PressableSprite::new(desc.sprite)),
        )
    }

    /// Creates a node of any kind and, if `desc.parent` is set, appends it
    /// to that parent's children.
    ///
    /// The node starts dirty, so its world transform is computed by the
    /// first draw pass that reaches it.
    ///
    /// # Panics
    ///
    /// Panics if `desc.parent` is a stale handle.
    pub fn spawn(&mut self, desc: NodeDesc, kind: NodeKind) -> NodeId {
        if let Some(parent) = desc.parent {
            self.validate(parent);
        }
        let NodeDesc {
            transform,
            relative_depth,
            visible,
            label,
            parent,
        } = desc;

        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.local[i] = transform;
            self.relative_depth[i] = relative_depth;
            self.visible[i] = visible;
            self.label[i] = label;
            self.kind[i] = kind;
            self.world[i] = transform;
            self.absolute_depth[i] = relative_depth;
            self.dirty[i] = true;
            self.live[i] = true;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.local.push(transform);
            self.relative_depth.push(relative_depth);
            self.visible.push(visible);
            self.label.push(label);
            self.kind.push(kind);
            self.world.push(transform);
            self.absolute_depth.push(relative_depth);
            self.dirty.push(true);
            self.generation.push(0);
            self.live.push(true);
            idx
        };

        if let Some(parent) = parent {
            self.link_last(parent.idx, idx);
        }

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a node and its entire subtree, detaching it from its parent
    /// first. Handles to any destroyed node become stale.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy(&mut self, id: NodeId) {
        self.validate(id);
        if self.parent[id.idx as usize] != INVALID {
            self.unlink_from_parent(id.idx);
        }
        self.free_subtree(id.idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx < self.len
            && self.live[id.idx as usize]
            && self.generation[id.idx as usize] == id.generation
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns whether the scene has no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -- Topology API --

    /// Appends `child` as the last child of `parent` and marks it dirty.
    ///
    /// # Errors
    ///
    /// - [`TreeError::AlreadyParented`] if `child` already has a parent.
    /// - [`TreeError::WouldCycle`] if `child` is `parent` or one of its
    ///   ancestors.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.validate(parent);
        self.validate(child);
        if let Some(current) = self.parent(child) {
            return Err(TreeError::AlreadyParented {
                child,
                parent: current,
            });
        }
        if self.is_ancestor_or_self(child.idx, parent.idx) {
            return Err(TreeError::WouldCycle { child, parent });
        }
        self.link_last(parent.idx, child.idx);
        Ok(())
    }

    /// Removes `child` from `parent`'s children, clearing its parent link
    /// and marking it dirty. The child stays alive as a new root.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotAChild`] if `child`'s parent is not `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.validate(parent);
        self.validate(child);
        if self.parent[child.idx as usize] != parent.idx {
            return Err(TreeError::NotAChild { child, parent });
        }
        self.unlink_from_parent(child.idx);
        self.dirty[child.idx as usize] = true;
        Ok(())
    }

    /// Removes `child` from whatever parent it has.
    ///
    /// # Errors
    ///
    /// [`TreeError::NoParent`] if `child` is a root.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn detach_from_parent(&mut self, child: NodeId) -> TreeResult<()> {
        let parent = self.parent(child).ok_or(TreeError::NoParent(child))?;
        self.remove_child(parent, child)
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of a node, in paint
    /// order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the `index`-th child of a node.
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).nth(index)
    }

    /// Returns the number of direct children of a node.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Returns every live node without a parent, in slot order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        (0..self.len)
            .filter(|&idx| self.live[idx as usize] && self.parent[idx as usize] == INVALID)
            .map(|idx| self.handle(idx))
            .collect()
    }

    /// Finds the first node labelled `label` in a depth-first walk of the
    /// subtree rooted at `root` (including `root`).
    #[must_use]
    pub fn find_by_label(&self, root: NodeId, label: &str) -> Option<NodeId> {
        self.validate(root);
        self.find_label_from(root.idx, label)
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the local transform of a node.
    #[must_use]
    pub fn local_transform(&self, id: NodeId) -> Transform2d {
        self.validate(id);
        self.local[id.idx as usize]
    }

    /// Returns the local position of a node.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Point {
        self.local_transform(id).position
    }

    /// Returns the local per-axis scale of a node.
    #[must_use]
    pub fn scale(&self, id: NodeId) -> Vec2 {
        self.local_transform(id).scale
    }

    /// Returns the X component of the local scale.
    #[must_use]
    pub fn scale_scalar(&self, id: NodeId) -> f64 {
        self.local_transform(id).scale.x
    }

    /// Returns the local rotation of a node in radians.
    #[must_use]
    pub fn rotation(&self, id: NodeId) -> f64 {
        self.local_transform(id).rotation
    }

    /// Returns the local tint of a node.
    #[must_use]
    pub fn tint(&self, id: NodeId) -> Tint {
        self.local_transform(id).tint
    }

    /// Returns the depth of a node relative to its parent.
    #[must_use]
    pub fn relative_depth(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.relative_depth[id.idx as usize]
    }

    /// Returns whether the node itself is visible. An invisible ancestor
    /// hides it regardless.
    #[must_use]
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.validate(id);
        self.visible[id.idx as usize]
    }

    /// Returns whether the X axis is mirrored.
    #[must_use]
    pub fn is_flipped_x(&self, id: NodeId) -> bool {
        self.scale(id).x < 0.0
    }

    /// Returns whether the Y axis is mirrored.
    #[must_use]
    pub fn is_flipped_y(&self, id: NodeId) -> bool {
        self.scale(id).y < 0.0
    }

    /// Returns the label of a node.
    #[must_use]
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.validate(id);
        self.label[id.idx as usize].as_deref()
    }

    /// Returns the kind payload of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.validate(id);
        &self.kind[id.idx as usize]
    }

    /// Returns the sprite payload of a sprite or pressable node.
    #[must_use]
    pub fn sprite(&self, id: NodeId) -> Option<&Sprite> {
        self.kind(id).sprite()
    }

    /// Mutable variant of [`sprite`](Self::sprite).
    #[must_use]
    pub fn sprite_mut(&mut self, id: NodeId) -> Option<&mut Sprite> {
        self.validate(id);
        self.kind[id.idx as usize].sprite_mut()
    }

    /// Returns the pressable payload of a pressable node.
    #[must_use]
    pub fn pressable(&self, id: NodeId) -> Option<&PressableSprite> {
        self.kind(id).pressable()
    }

    /// Mutable variant of [`pressable`](Self::pressable).
    #[must_use]
    pub fn pressable_mut(&mut self, id: NodeId) -> Option<&mut PressableSprite> {
        self.validate(id);
        self.kind[id.idx as usize].pressable_mut()
    }

    /// Returns the cached world transform of a node.
    ///
    /// Only valid once a draw pass has reached the node since its last
    /// change; see [`is_dirty`](Self::is_dirty).
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Transform2d {
        self.validate(id);
        self.world[id.idx as usize]
    }

    /// Returns the cached absolute depth of a node.
    ///
    /// Same validity rules as [`world_transform`](Self::world_transform).
    #[must_use]
    pub fn absolute_depth(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.absolute_depth[id.idx as usize]
    }

    /// Returns whether the node's cached world state awaits recomputation.
    ///
    /// A clean flag only speaks for the node itself: descendants of a
    /// recently changed ancestor are flagged lazily as the draw pass reaches
    /// their parents.
    #[must_use]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.validate(id);
        self.dirty[id.idx as usize]
    }

    /// Computes a node's world transform and absolute depth from the local
    /// values along its ancestor chain, ignoring the caches.
    #[must_use]
    pub fn compute_world(&self, id: NodeId) -> (Transform2d, f64) {
        self.validate(id);
        self.compute_world_at(id.idx)
    }

    // -- Mutation API (auto-marks dirty) --

    /// Replaces the local transform of a node.
    pub fn set_local_transform(&mut self, id: NodeId, transform: Transform2d) {
        self.validate(id);
        self.local[id.idx as usize] = transform;
        self.dirty[id.idx as usize] = true;
    }

    /// Sets the local position of a node.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        self.update_local(id, |t| t.position = position);
    }

    /// Sets the local per-axis scale of a node.
    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) {
        self.update_local(id, |t| t.scale = scale);
    }

    /// Sets both scale axes to `scale`.
    pub fn set_scale_scalar(&mut self, id: NodeId, scale: f64) {
        self.set_scale(id, Vec2::new(scale, scale));
    }

    /// Sets the local rotation of a node in radians.
    pub fn set_rotation(&mut self, id: NodeId, rotation: f64) {
        self.update_local(id, |t| t.rotation = rotation);
    }

    /// Sets the local tint of a node.
    pub fn set_tint(&mut self, id: NodeId, tint: Tint) {
        self.update_local(id, |t| t.tint = tint);
    }

    /// Mirrors (or un-mirrors) the X axis, keeping the scale's magnitude.
    pub fn set_flip_x(&mut self, id: NodeId, flipped: bool) {
        self.update_local(id, |t| t.scale.x = signed_magnitude(t.scale.x, flipped));
    }

    /// Mirrors (or un-mirrors) the Y axis, keeping the scale's magnitude.
    pub fn set_flip_y(&mut self, id: NodeId, flipped: bool) {
        self.update_local(id, |t| t.scale.y = signed_magnitude(t.scale.y, flipped));
    }

    /// Sets the depth of a node relative to its parent.
    pub fn set_relative_depth(&mut self, id: NodeId, depth: f64) {
        self.validate(id);
        self.relative_depth[id.idx as usize] = depth;
        self.dirty[id.idx as usize] = true;
    }

    /// Shows or hides a node together with its subtree.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.validate(id);
        self.visible[id.idx as usize] = visible;
        self.dirty[id.idx as usize] = true;
    }

    /// Sets or clears the label of a node.
    pub fn set_label(&mut self, id: NodeId, label: Option<String>) {
        self.validate(id);
        self.label[id.idx as usize] = label;
    }

    /// Copies a node into a new, unattached root.
    ///
    /// Local transform, depth, visibility, label and kind payload are
    /// copied; textures are shared by handle. Pressable sprites keep their
    /// flags but start with no callbacks bound. With `include_children`, the
    /// whole subtree is copied in the same child order.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clone_node(&mut self, id: NodeId, include_children: bool) -> NodeId {
        self.validate(id);
        self.clone_subtree(id.idx, None, include_children)
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            self.is_alive(id),
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn update_local(&mut self, id: NodeId, f: impl FnOnce(&mut Transform2d)) {
        self.validate(id);
        f(&mut self.local[id.idx as usize]);
        self.dirty[id.idx as usize] = true;
    }

    /// Appends `child` to `parent`'s sibling list and marks it dirty.
    fn link_last(&mut self, parent: u32, child: u32) {
        let (p, c) = (parent as usize, child as usize);
        self.parent[c] = parent;
        self.prev_sibling[c] = INVALID;
        self.next_sibling[c] = INVALID;

        if self.first_child[p] == INVALID {
            self.first_child[p] = child;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = child;
            self.prev_sibling[c] = last;
        }
        self.dirty[c] = true;
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let i = idx as usize;
        let p = self.parent[i];
        let prev = self.prev_sibling[i];
        let next = self.next_sibling[i];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[i] = INVALID;
        self.prev_sibling[i] = INVALID;
        self.next_sibling[i] = INVALID;
    }

    /// Returns whether `ancestor` is `idx` or lies on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: u32, mut idx: u32) -> bool {
        while idx != INVALID {
            if idx == ancestor {
                return true;
            }
            idx = self.parent[idx as usize];
        }
        false
    }

    fn free_subtree(&mut self, idx: u32) {
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let next = self.next_sibling[child as usize];
            self.free_subtree(child);
            child = next;
        }
        let i = idx as usize;
        self.parent[i] = INVALID;
        self.first_child[i] = INVALID;
        self.next_sibling[i] = INVALID;
        self.prev_sibling[i] = INVALID;
        self.label[i] = None;
        self.kind[i] = NodeKind::Container;
        self.live[i] = false;
        // Bump generation so old handles immediately fail validation.
        self.generation[i] += 1;
        self.free_list.push(idx);
    }

    fn clone_subtree(&mut self, idx: u32, parent: Option<NodeId>, include_children: bool) -> NodeId {
        let i = idx as usize;
        let desc = NodeDesc {
            transform: self.local[i],
            relative_depth: self.relative_depth[i],
            visible: self.visible[i],
            label: self.label[i].clone(),
            parent,
        };
        let kind = self.kind[i].duplicate();
        let copy = self.spawn(desc, kind);
        if include_children {
            let mut child = self.first_child[i];
            while child != INVALID {
                self.clone_subtree(child, Some(copy), true);
                child = self.next_sibling[child as usize];
            }
        }
        copy
    }

    fn find_label_from(&self, idx: u32, label: &str) -> Option<NodeId> {
        if self.label[idx as usize].as_deref() == Some(label) {
            return Some(self.handle(idx));
        }
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            if let Some(found) = self.find_label_from(child, label) {
                return Some(found);
            }
            child = self.next_sibling[child as usize];
        }
        None
    }

    pub(crate) fn compute_world_at(&self, idx: u32) -> (Transform2d, f64) {
        let i = idx as usize;
        let p = self.parent[i];
        if p == INVALID {
            (self.local[i], self.relative_depth[i])
        } else {
            let (parent_world, parent_depth) = self.compute_world_at(p);
            (
                Transform2d::compose(&parent_world, &self.local[i]),
                parent_depth + self.relative_depth[i],
            )
        }
    }
}

fn signed_magnitude(value: f64, negative: bool) -> f64 {
    if negative { -value.abs() } else { value.abs() }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn container(scene: &mut Scene) -> NodeId {
        scene.spawn_container(NodeDesc::default())
    }

    #[test]
    fn spawn_and_destroy() {
        let mut scene = Scene::new();
        let id = container(&mut scene);
        assert!(scene.is_alive(id));
        assert_eq!(scene.len(), 1);
        scene.destroy(id);
        assert!(!scene.is_alive(id));
        assert!(scene.is_empty());
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut scene = Scene::new();
        let id1 = container(&mut scene);
        scene.destroy(id1);
        let id2 = container(&mut scene);
        // id2 reuses the same slot but has a different generation.
        assert!(!scene.is_alive(id1));
        assert!(scene.is_alive(id2));
        assert_eq!(id1.index(), id2.index());
        assert_ne!(id1.generation(), id2.generation());
    }

    #[test]
    fn add_child_and_query() {
        let mut scene = Scene::new();
        let parent = container(&mut scene);
        let child1 = container(&mut scene);
        let child2 = container(&mut scene);

        scene.add_child(parent, child1).unwrap();
        scene.add_child(parent, child2).unwrap();

        assert_eq!(scene.parent(child1), Some(parent));
        assert_eq!(scene.parent(child2), Some(parent));

        let kids: Vec<_> = scene.children(parent).collect();
        assert_eq!(kids, vec![child1, child2]);
        assert_eq!(scene.child(parent, 1), Some(child2));
        assert_eq!(scene.child(parent, 2), None);
        assert_eq!(scene.child_count(parent), 2);
    }

    #[test]
    fn spawn_with_parent_appends() {
        let mut scene = Scene::new();
        let parent = container(&mut scene);
        let a = scene.spawn_container(NodeDesc::default().with_parent(parent));
        let b = scene.spawn_sprite(SpriteDesc::default().with_parent(parent));
        assert_eq!(scene.children(parent).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(scene.parent(b), Some(parent));
    }

    #[test]
    fn add_child_rejects_parented_node() {
        let mut scene = Scene::new();
        let p1 = container(&mut scene);
        let p2 = container(&mut scene);
        let child = container(&mut scene);
        scene.add_child(p1, child).unwrap();

        assert_eq!(
            scene.add_child(p2, child),
            Err(TreeError::AlreadyParented { child, parent: p1 })
        );
        // Nothing moved.
        assert_eq!(scene.parent(child), Some(p1));
        assert_eq!(scene.child_count(p2), 0);
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let mid = scene.spawn_container(NodeDesc::default().with_parent(root));
        let leaf = scene.spawn_container(NodeDesc::default().with_parent(mid));

        assert_eq!(
            scene.add_child(leaf, root),
            Err(TreeError::WouldCycle {
                child: root,
                parent: leaf
            })
        );
        assert_eq!(
            scene.add_child(root, root),
            Err(TreeError::WouldCycle {
                child: root,
                parent: root
            })
        );
    }

    #[test]
    fn remove_child_clears_parent() {
        let mut scene = Scene::new();
        let parent = container(&mut scene);
        let child = container(&mut scene);

        scene.add_child(parent, child).unwrap();
        scene.remove_child(parent, child).unwrap();
        assert_eq!(scene.parent(child), None);
        assert!(scene.children(parent).next().is_none());
        assert!(scene.is_alive(child), "removal does not free the node");
    }

    #[test]
    fn remove_child_rejects_non_child() {
        let mut scene = Scene::new();
        let parent = container(&mut scene);
        let other = container(&mut scene);
        let child = container(&mut scene);
        scene.add_child(other, child).unwrap();

        assert_eq!(
            scene.remove_child(parent, child),
            Err(TreeError::NotAChild { child, parent })
        );
        assert_eq!(scene.parent(child), Some(other));
    }

    #[test]
    fn remove_middle_child_keeps_order() {
        let mut scene = Scene::new();
        let parent = container(&mut scene);
        let a = scene.spawn_container(NodeDesc::default().with_parent(parent));
        let b = scene.spawn_container(NodeDesc::default().with_parent(parent));
        let c = scene.spawn_container(NodeDesc::default().with_parent(parent));

        scene.remove_child(parent, b).unwrap();
        assert_eq!(scene.children(parent).collect::<Vec<_>>(), vec![a, c]);
        scene.add_child(parent, b).unwrap();
        assert_eq!(scene.children(parent).collect::<Vec<_>>(), vec![a, c, b]);
    }

    #[test]
    fn detach_from_parent_works_and_fails_on_root() {
        let mut scene = Scene::new();
        let parent = container(&mut scene);
        let child = scene.spawn_container(NodeDesc::default().with_parent(parent));

        scene.detach_from_parent(child).unwrap();
        assert_eq!(scene.parent(child), None);
        assert_eq!(
            scene.detach_from_parent(child),
            Err(TreeError::NoParent(child))
        );
    }

    #[test]
    fn roots_returns_parentless_nodes() {
        let mut scene = Scene::new();
        let a = container(&mut scene);
        let b = container(&mut scene);
        let c = scene.spawn_container(NodeDesc::default().with_parent(a));

        let roots = scene.roots();
        assert!(roots.contains(&a));
        assert!(roots.contains(&b));
        assert!(!roots.contains(&c));
    }

    #[test]
    fn destroy_frees_subtree_and_detaches() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let mid = scene.spawn_container(NodeDesc::default().with_parent(root));
        let leaf = scene.spawn_container(NodeDesc::default().with_parent(mid));
        let sibling = scene.spawn_container(NodeDesc::default().with_parent(root));

        scene.destroy(mid);
        assert!(!scene.is_alive(mid));
        assert!(!scene.is_alive(leaf));
        assert_eq!(scene.children(root).collect::<Vec<_>>(), vec![sibling]);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_world_transform() {
        let mut scene = Scene::new();
        let id = container(&mut scene);
        scene.destroy(id);
        let _ = scene.world_transform(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_set_position() {
        let mut scene = Scene::new();
        let id = container(&mut scene);
        scene.destroy(id);
        scene.set_position(id, Point::new(1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_add_child() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let id = container(&mut scene);
        scene.destroy(id);
        let _ = scene.add_child(root, id);
    }

    #[test]
    fn setters_mark_dirty() {
        let mut scene = Scene::new();
        let id = container(&mut scene);
        scene.dirty[id.idx as usize] = false;

        scene.set_position(id, Point::new(3.0, 4.0));
        assert!(scene.is_dirty(id));
        assert_eq!(scene.position(id), Point::new(3.0, 4.0));

        scene.dirty[id.idx as usize] = false;
        scene.set_relative_depth(id, 2.0);
        assert!(scene.is_dirty(id));

        scene.dirty[id.idx as usize] = false;
        scene.set_visible(id, false);
        assert!(scene.is_dirty(id));
        assert!(!scene.is_visible(id));
    }

    #[test]
    fn attach_and_detach_mark_child_dirty() {
        let mut scene = Scene::new();
        let parent = container(&mut scene);
        let child = container(&mut scene);

        scene.dirty[child.idx as usize] = false;
        scene.add_child(parent, child).unwrap();
        assert!(scene.is_dirty(child));

        scene.dirty[child.idx as usize] = false;
        scene.remove_child(parent, child).unwrap();
        assert!(scene.is_dirty(child));
    }

    #[test]
    fn scalar_scale_sets_both_axes() {
        let mut scene = Scene::new();
        let id = container(&mut scene);
        scene.set_scale_scalar(id, 3.0);
        assert_eq!(scene.scale(id), Vec2::new(3.0, 3.0));
        assert_eq!(scene.scale_scalar(id), 3.0);
    }

    #[test]
    fn flips_keep_magnitude() {
        let mut scene = Scene::new();
        let id = container(&mut scene);
        scene.set_scale(id, Vec2::new(2.0, 0.5));

        scene.set_flip_x(id, true);
        assert_eq!(scene.scale(id), Vec2::new(-2.0, 0.5));
        assert!(scene.is_flipped_x(id));
        scene.set_flip_x(id, true);
        assert_eq!(scene.scale(id), Vec2::new(-2.0, 0.5));

        scene.set_flip_y(id, true);
        scene.set_flip_x(id, false);
        assert_eq!(scene.scale(id), Vec2::new(2.0, -0.5));
        assert!(scene.is_flipped_y(id));
    }

    #[test]
    fn labels_and_lookup() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(NodeDesc::default().with_label("root"));
        let a = scene.spawn_container(NodeDesc::default().with_parent(root));
        let b = scene.spawn_container(NodeDesc::default().with_parent(a).with_label("hand"));
        let _c = scene.spawn_container(NodeDesc::default().with_parent(root).with_label("hand"));

        assert_eq!(scene.label(root), Some("root"));
        assert_eq!(scene.label(a), None);
        // Depth-first: the nested one comes first.
        assert_eq!(scene.find_by_label(root, "hand"), Some(b));
        assert_eq!(scene.find_by_label(root, "foot"), None);

        scene.set_label(a, Some(String::from("arm")));
        assert_eq!(scene.find_by_label(root, "arm"), Some(a));
    }

    #[test]
    fn clone_without_children() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let sprite = scene.spawn_sprite(
            SpriteDesc::default()
                .with_parent(root)
                .with_position(Point::new(5.0, 6.0))
                .with_relative_depth(2.0)
                .with_label("hero"),
        );
        let _child = scene.spawn_container(NodeDesc::default().with_parent(sprite));

        let copy = scene.clone_node(sprite, false);
        assert_ne!(copy, sprite);
        assert_eq!(scene.parent(copy), None);
        assert_eq!(scene.position(copy), Point::new(5.0, 6.0));
        assert_eq!(scene.relative_depth(copy), 2.0);
        assert_eq!(scene.label(copy), Some("hero"));
        assert_eq!(scene.sprite(copy), scene.sprite(sprite));
        assert_eq!(scene.child_count(copy), 0);
        assert!(scene.is_dirty(copy));
    }

    #[test]
    fn clone_with_children_copies_structure() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let a = scene.spawn_container(NodeDesc::default().with_parent(root).with_label("a"));
        let _b = scene.spawn_container(NodeDesc::default().with_parent(root).with_label("b"));
        let _a1 = scene.spawn_container(NodeDesc::default().with_parent(a).with_label("a1"));

        let copy = scene.clone_node(root, true);
        let kids: Vec<_> = scene.children(copy).collect();
        assert_eq!(kids.len(), 2);
        assert_eq!(scene.label(kids[0]), Some("a"));
        assert_eq!(scene.label(kids[1]), Some("b"));
        assert_ne!(kids[0], a);
        let grandkid = scene.child(kids[0], 0).unwrap();
        assert_eq!(scene.label(grandkid), Some("a1"));
        assert_eq!(scene.parent(grandkid), Some(kids[0]));
        assert_eq!(scene.len(), 8);
    }

    #[test]
    fn clone_of_pressable_drops_callbacks() {
        use crate::pointer::PointerButton;

        let mut scene = Scene::new();
        let id = scene.spawn_pressable(SpriteDesc::default());
        {
            let p = scene.pressable_mut(id).unwrap();
            p.bubble_to_children = true;
            p.active = false;
            p.on_click(PointerButton::Left, |_| {});
        }
        let copy = scene.clone_node(id, false);
        let p = scene.pressable(copy).unwrap();
        assert!(p.bubble_to_children);
        assert!(!p.active);
        assert!(!p.handlers.click.is_bound(PointerButton::Left));
    }

    #[test]
    fn compute_world_accumulates_chain() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(
            NodeDesc::default()
                .with_position(Point::new(10.0, 0.0))
                .with_relative_depth(1.0),
        );
        let child = scene.spawn_container(
            NodeDesc::default()
                .with_parent(root)
                .with_position(Point::new(0.0, 5.0))
                .with_relative_depth(2.5),
        );
        let (world, depth) = scene.compute_world(child);
        assert_eq!(world.position, Point::new(10.0, 5.0));
        assert_eq!(depth, 3.5);
    }
}
