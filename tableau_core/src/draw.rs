// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing contract for rendering integrations.
//!
//! Tableau never rasterizes anything. A draw pass walks the scene and hands
//! one [`DrawCommand`] per visible, textured sprite to a [`DrawSink`]. The
//! host owns the rest:
//!
//! - **Textures**: loading, decoding and uploading. The scene refers to
//!   textures by [`TextureId`] and asks a [`TextureSource`] for a texture's
//!   natural pixel size when it needs one. A source that does not know the
//!   texture yet makes the sprite draw nothing, which covers streamed
//!   assets.
//! - **Ordering**: commands arrive in paint order (depth-first, children in
//!   insertion order). Each carries a depth key; whether the backend sorts
//!   on it, feeds it to a depth buffer, or ignores it is its choice.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(scene: &mut Scene, root: NodeId, pointer: &mut PointerContainer) {
//!     // Deliver queued input between frames.
//!     for event in input.drain() {
//!         pointer.dispatch(scene, &event);
//!     }
//!
//!     // Animate: plain setters, which only flag the touched nodes.
//!     scene.set_rotation(arm, scene.rotation(arm) + 0.1);
//!
//!     // Draw: refreshes stale caches and emits commands in one walk.
//!     let mut batch = Vec::new();
//!     scene.draw(root, &textures, &mut batch);
//!     renderer.submit(&batch);
//! }
//! ```

use kurbo::{Point, Rect, Size, Vec2};

use crate::color::Tint;
use crate::node::TextureId;

/// Receives the draw commands produced by a draw pass.
pub trait DrawSink {
    /// Accepts one sprite draw, in paint order.
    fn draw(&mut self, command: &DrawCommand);
}

impl DrawSink for alloc::vec::Vec<DrawCommand> {
    fn draw(&mut self, command: &DrawCommand) {
        self.push(*command);
    }
}

/// Reports natural texture sizes.
pub trait TextureSource {
    /// Returns the size in pixels of `texture`, or `None` if it is not
    /// available (yet).
    fn texture_size(&self, texture: TextureId) -> Option<Size>;
}

impl<F> TextureSource for F
where
    F: Fn(TextureId) -> Option<Size>,
{
    fn texture_size(&self, texture: TextureId) -> Option<Size> {
        self(texture)
    }
}

/// A single textured quad, fully resolved to world space.
///
/// The fields mirror a classic sprite batch call: the `source` frame is
/// anchored at `origin` (frame pixels), scaled by `scale`, rotated by
/// `rotation` and placed at `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    /// Texture to sample.
    pub texture: TextureId,
    /// Frame within the texture, in texture pixels.
    pub source: Rect,
    /// World position of the anchor.
    pub position: Point,
    /// World rotation in radians.
    pub rotation: f64,
    /// Anchor within the frame, in frame pixels.
    pub origin: Vec2,
    /// Non-negative scale from frame pixels to world units.
    pub scale: Vec2,
    /// Color to modulate the texture by.
    pub tint: Tint,
    /// Axis mirroring, carried separately from the scale magnitude.
    pub flip: Flip,
    /// Paint-order key, see [`DepthMode`].
    pub depth: f64,
}

/// Axis mirroring flags of a [`DrawCommand`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flip {
    /// Mirror along the X axis.
    pub horizontal: bool,
    /// Mirror along the Y axis.
    pub vertical: bool,
}

impl Flip {
    /// Derives flip flags from the sign of a scale.
    #[must_use]
    pub fn from_scale(scale: Vec2) -> Self {
        Self {
            horizontal: scale.x < 0.0,
            vertical: scale.y < 0.0,
        }
    }

    /// Returns whether either axis is mirrored.
    #[must_use]
    pub const fn any(self) -> bool {
        self.horizontal || self.vertical
    }
}

/// How absolute depths are turned into the depth keys of draw commands.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DepthMode {
    /// Emit the absolute depth unchanged.
    #[default]
    Absolute,
    /// Emit `depth / range` clamped to `[0, 1]`, for backends that need a
    /// bounded key. Negative depths clamp to `0`.
    Normalized {
        /// The absolute depth that maps to `1`.
        range: f64,
    },
}

impl DepthMode {
    /// Maps an absolute depth to a depth key.
    #[must_use]
    pub fn key(self, depth: f64) -> f64 {
        match self {
            Self::Absolute => depth,
            Self::Normalized { range } if range > 0.0 => (depth / range).clamp(0.0, 1.0),
            Self::Normalized { .. } => 0.0,
        }
    }
}

/// Counters gathered during one draw pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Visible nodes reached by the traversal.
    pub visited: u32,
    /// Nodes whose world transform and depth were recomputed.
    pub recomputed: u32,
    /// Draw commands handed to the sink.
    pub emitted: u32,
    /// Invisible nodes whose subtree was skipped.
    pub skipped_hidden: u32,
}
