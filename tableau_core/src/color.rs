// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 8-bit RGBA tint colors.

/// A tint color with 8-bit channels.
///
/// Channels are stored as `0..=255` but treated as normalized `[0, 1]`
/// values when tints are combined, so opaque white is the multiplicative
/// identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tint {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Tint {
    /// Opaque white; leaves anything it is multiplied with unchanged.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Creates a tint from four channels.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque tint.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Returns the channels normalized to `[0, 1]`.
    #[must_use]
    pub fn to_unit(self) -> [f64; 4] {
        [
            unit(self.r),
            unit(self.g),
            unit(self.b),
            unit(self.a),
        ]
    }

    /// Creates a tint from normalized channels, clamping each to `[0, 1]`.
    #[must_use]
    pub fn from_unit(channels: [f64; 4]) -> Self {
        Self::rgba(
            denormalize(channels[0]),
            denormalize(channels[1]),
            denormalize(channels[2]),
            denormalize(channels[3]),
        )
    }

    /// Multiplies two tints channel by channel in normalized space.
    #[must_use]
    pub fn multiply(self, other: Self) -> Self {
        let a = self.to_unit();
        let b = other.to_unit();
        Self::from_unit([a[0] * b[0], a[1] * b[1], a[2] * b[2], a[3] * b[3]])
    }
}

impl Default for Tint {
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

impl core::ops::Mul for Tint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

fn unit(channel: u8) -> f64 {
    f64::from(channel) / 255.0
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to 0..=255 before the cast"
)]
fn denormalize(value: f64) -> u8 {
    let scaled = (value.clamp(0.0, 1.0) * 255.0) + 0.5;
    scaled as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_is_identity() {
        let c = Tint::rgba(12, 200, 77, 128);
        assert_eq!(Tint::WHITE * c, c);
        assert_eq!(c * Tint::WHITE, c);
    }

    #[test]
    fn black_absorbs_color() {
        let c = Tint::rgb(90, 180, 255);
        assert_eq!(c * Tint::BLACK, Tint::rgb(0, 0, 0));
    }

    #[test]
    fn half_alpha_halves() {
        let half = Tint::rgba(255, 255, 255, 128);
        let out = Tint::rgba(255, 255, 255, 200) * half;
        // 200/255 * 128/255 * 255 = 100.39
        assert_eq!(out.a, 100);
    }

    #[test]
    fn from_unit_clamps() {
        let t = Tint::from_unit([-1.0, 2.0, 0.5, 1.0]);
        assert_eq!(t, Tint::rgba(0, 255, 128, 255));
    }

    #[test]
    fn default_is_white() {
        assert_eq!(Tint::default(), Tint::WHITE);
    }
}
