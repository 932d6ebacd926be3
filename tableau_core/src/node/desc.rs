// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constructor descriptors with documented defaults.

use alloc::string::String;

use kurbo::{Point, Rect, Size, Vec2};

use super::id::{NodeId, TextureId};
use super::kind::Sprite;
use crate::color::Tint;
use crate::transform::Transform2d;

/// Initial state of a node.
///
/// Defaults: position `(0, 0)`, scale `(1, 1)`, no rotation, opaque white
/// tint, relative depth `0`, visible, no label, no parent.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDesc {
    /// Local transform.
    pub transform: Transform2d,
    /// Depth relative to the parent's absolute depth.
    pub relative_depth: f64,
    /// Whether the node (and its subtree) is drawn and hit-tested.
    pub visible: bool,
    /// Optional string identifier.
    pub label: Option<String>,
    /// Parent to attach to on creation.
    pub parent: Option<NodeId>,
}

impl Default for NodeDesc {
    fn default() -> Self {
        Self {
            transform: Transform2d::IDENTITY,
            relative_depth: 0.0,
            visible: true,
            label: None,
            parent: None,
        }
    }
}

impl NodeDesc {
    /// Sets the local position.
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.transform.position = position;
        self
    }

    /// Sets the local per-axis scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Sets the local rotation in radians.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Sets the local tint.
    #[must_use]
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.transform.tint = tint;
        self
    }

    /// Sets the relative depth.
    #[must_use]
    pub fn with_relative_depth(mut self, depth: f64) -> Self {
        self.relative_depth = depth;
        self
    }

    /// Sets initial visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attaches the node to `parent` on creation.
    #[must_use]
    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Initial state of a sprite or pressable sprite.
///
/// Adds to [`NodeDesc`]'s defaults: no texture, whole-texture frame, pivot
/// `(0.5, 0.5)`, natural size, flips leave rotation alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteDesc {
    /// Node-level state.
    pub node: NodeDesc,
    /// Sprite payload.
    pub sprite: Sprite,
}

impl SpriteDesc {
    /// Creates a descriptor for a sprite drawing `texture`.
    #[must_use]
    pub fn new(texture: TextureId) -> Self {
        Self {
            node: NodeDesc::default(),
            sprite: Sprite::new(Some(texture)),
        }
    }

    /// Sets the texture.
    #[must_use]
    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.sprite.texture = texture;
        self
    }

    /// Sets the atlas frame in texture pixels.
    #[must_use]
    pub fn with_source_rect(mut self, rect: Rect) -> Self {
        self.sprite.source_rect = Some(rect);
        self
    }

    /// Sets the pivot as a fraction of the sprite's size.
    #[must_use]
    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.sprite.pivot = pivot;
        self
    }

    /// Sets the output size in pixels.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.sprite.size = size;
        self
    }

    /// Mirrors the emitted rotation when the sprite is flipped.
    #[must_use]
    pub fn with_flip_affects_rotation(mut self, enabled: bool) -> Self {
        self.sprite.flip_affects_rotation = enabled;
        self
    }

    /// Sets the local position.
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.node = self.node.with_position(position);
        self
    }

    /// Sets the local per-axis scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.node = self.node.with_scale(scale);
        self
    }

    /// Sets the local rotation in radians.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.node = self.node.with_rotation(rotation);
        self
    }

    /// Sets the local tint.
    #[must_use]
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.node = self.node.with_tint(tint);
        self
    }

    /// Sets the relative depth.
    #[must_use]
    pub fn with_relative_depth(mut self, depth: f64) -> Self {
        self.node = self.node.with_relative_depth(depth);
        self
    }

    /// Sets initial visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.node = self.node.with_visible(visible);
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.node = self.node.with_label(label);
        self
    }

    /// Attaches the sprite to `parent` on creation.
    #[must_use]
    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.node = self.node.with_parent(parent);
        self
    }
}
