// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decomposed 2-D sprite transform.
//!
//! [`Transform2d`] keeps position, scale, rotation and tint as separate
//! fields rather than a matrix. Composition follows the sprite model: a
//! child's local position is rotated by the parent's rotation (mirrored when
//! the parent is flipped horizontally), scaled by the parent's scale, then
//! offset by the parent's position. Rotations add and scales multiply
//! component-wise.
//!
//! For uniform, positive scale this is exactly matrix composition. Two
//! cases diverge from it:
//!
//! - With non-uniform scale and rotation on the same chain the decomposed
//!   form cannot represent shear, and the child keeps its own axes instead
//!   of inheriting the parent's skew.
//! - A parent with negative `scale.x` applies its rotation negated to child
//!   positions but still adds it unchanged to the child's rotation. Any
//!   chain with an X-flipped parent and a rotated descendant is therefore
//!   not associative, even for uniform scale.

use core::f64::consts::{PI, TAU};

use kurbo::{Affine, Point, Vec2};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::color::Tint;

/// Position, scale, rotation and tint of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2d {
    /// Offset in the parent's space.
    pub position: Point,
    /// Per-axis scale. A negative component mirrors that axis.
    pub scale: Vec2,
    /// Rotation in radians.
    pub rotation: f64,
    /// Tint color, multiplied down the tree.
    pub tint: Tint,
}

impl Transform2d {
    /// The identity transform: origin, unit scale, no rotation, white tint.
    pub const IDENTITY: Self = Self {
        position: Point::ORIGIN,
        scale: Vec2::new(1.0, 1.0),
        rotation: 0.0,
        tint: Tint::WHITE,
    };

    /// Creates a pure translation.
    #[inline]
    #[must_use]
    pub const fn from_position(position: Point) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Returns a copy with the given position.
    #[inline]
    #[must_use]
    pub const fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Returns a copy with the given scale.
    #[inline]
    #[must_use]
    pub const fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Returns a copy with the given rotation in radians.
    #[inline]
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns a copy with the given tint.
    #[inline]
    #[must_use]
    pub const fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    /// Composes `parent` with a child's `local` transform, producing the
    /// child's transform in the parent's parent space.
    #[must_use]
    pub fn compose(parent: &Self, local: &Self) -> Self {
        Self {
            position: parent.transform_point(local.position),
            scale: Vec2::new(
                parent.scale.x * local.scale.x,
                parent.scale.y * local.scale.y,
            ),
            rotation: parent.rotation + local.rotation,
            tint: parent.tint.multiply(local.tint),
        }
    }

    /// Linearly interpolates position, scale and rotation from `from` to `to`.
    ///
    /// Rotation travels along the shorter arc: the angular difference is
    /// wrapped into `(-π, π]` before interpolating. Tint is not interpolated;
    /// the result keeps `from.tint`.
    #[must_use]
    pub fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        let delta = wrap_angle(to.rotation - from.rotation);
        Self {
            position: from.position.lerp(to.position, t),
            scale: from.scale.lerp(to.scale, t),
            rotation: from.rotation + delta * t,
            tint: from.tint,
        }
    }

    /// Maps a point from this transform's local space into the space one
    /// level up.
    #[must_use]
    pub fn transform_point(&self, point: Point) -> Point {
        let rotated = rotate(point.to_vec2(), self.effective_rotation());
        let scaled = Vec2::new(rotated.x * self.scale.x, rotated.y * self.scale.y);
        self.position + scaled
    }

    /// Maps a point from the space one level up back into local space.
    ///
    /// This undoes [`transform_point`](Self::transform_point) step by step:
    /// translation, then scale, then rotation. Returns `None` if either scale
    /// component is zero, since the mapping then has no inverse.
    #[must_use]
    pub fn inverse_transform_point(&self, point: Point) -> Option<Point> {
        if self.scale.x == 0.0 || self.scale.y == 0.0 {
            return None;
        }
        let offset = point - self.position;
        let unscaled = Vec2::new(offset.x / self.scale.x, offset.y / self.scale.y);
        Some(rotate(unscaled, -self.effective_rotation()).to_point())
    }

    /// Returns the matrix equivalent of [`transform_point`](Self::transform_point).
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::rotate(self.effective_rotation())
    }

    /// Returns whether every numeric field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.scale.is_finite() && self.rotation.is_finite()
    }

    /// Rotation used to map child positions. Flipping the X axis mirrors the
    /// direction of rotation so mirrored parents carry their children
    /// consistently.
    fn effective_rotation(&self) -> f64 {
        self.rotation * sign(self.scale.x)
    }
}

impl Default for Transform2d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Rotates `v` counter-clockwise (in a y-up frame) by `radians`.
fn rotate(v: Vec2, radians: f64) -> Vec2 {
    if radians == 0.0 {
        return v;
    }
    let dir = Vec2::from_angle(radians);
    Vec2::new(v.x * dir.x - v.y * dir.y, v.x * dir.y + v.y * dir.x)
}

/// Sign of `v`, with zero mapping to zero.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Wraps an angle into `(-π, π]`.
pub(crate) fn wrap_angle(radians: f64) -> f64 {
    let wrapped = radians - TAU * ((radians + PI) / TAU).floor();
    // `wrapped` is in [-π, π); fold the lower bound onto π.
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
