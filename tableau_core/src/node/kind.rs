// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind node payloads.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Rect, Size, Vec2};

use super::id::{NodeId, TextureId};
use crate::pointer::{PointerButton, PointerEvent};

/// Callback invoked with the pointer event that triggered it.
pub type PointerHandler = Box<dyn FnMut(&PointerEvent)>;

/// Callback invoked when a drag ends, with the node under the release point
/// (if any resolved).
pub type DropHandler = Box<dyn FnMut(&PointerEvent, Option<NodeId>)>;

/// What a node carries besides its transform.
///
/// Every behavior that differs per kind (drawing, hit-testing, pointer
/// targeting) matches on this enum.
pub enum NodeKind {
    /// Groups and transforms children; draws nothing.
    Container,
    /// A textured quad.
    Sprite(Sprite),
    /// A sprite that can be the target of pointer events.
    Pressable(PressableSprite),
}

impl NodeKind {
    /// Returns the sprite payload of sprite and pressable nodes.
    #[must_use]
    pub fn sprite(&self) -> Option<&Sprite> {
        match self {
            Self::Container => None,
            Self::Sprite(sprite) => Some(sprite),
            Self::Pressable(pressable) => Some(&pressable.sprite),
        }
    }

    /// Mutable variant of [`sprite`](Self::sprite).
    #[must_use]
    pub fn sprite_mut(&mut self) -> Option<&mut Sprite> {
        match self {
            Self::Container => None,
            Self::Sprite(sprite) => Some(sprite),
            Self::Pressable(pressable) => Some(&mut pressable.sprite),
        }
    }

    /// Returns the pressable payload, if this is a pressable node.
    #[must_use]
    pub fn pressable(&self) -> Option<&PressableSprite> {
        match self {
            Self::Pressable(pressable) => Some(pressable),
            _ => None,
        }
    }

    /// Mutable variant of [`pressable`](Self::pressable).
    #[must_use]
    pub fn pressable_mut(&mut self) -> Option<&mut PressableSprite> {
        match self {
            Self::Pressable(pressable) => Some(pressable),
            _ => None,
        }
    }

    /// Copies the payload. Pointer callbacks are not carried over.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        match self {
            Self::Container => Self::Container,
            Self::Sprite(sprite) => Self::Sprite(sprite.clone()),
            Self::Pressable(pressable) => Self::Pressable(PressableSprite {
                sprite: pressable.sprite.clone(),
                active: pressable.active,
                bubble_to_children: pressable.bubble_to_children,
                handlers: PointerHandlers::default(),
            }),
        }
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.write_str("Container"),
            Self::Sprite(sprite) => f.debug_tuple("Sprite").field(sprite).finish(),
            Self::Pressable(pressable) => f.debug_tuple("Pressable").field(pressable).finish(),
        }
    }
}

/// Drawable payload of a sprite.
///
/// Changing these fields never affects world transforms, so they are plain
/// public fields rather than dirty-tracked setters.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Texture to draw. `None` draws nothing.
    pub texture: Option<TextureId>,
    /// Atlas frame in texture pixels. `None` means the whole texture and is
    /// replaced by the full bounds on the first draw that finds the texture.
    pub source_rect: Option<Rect>,
    /// Anchor point as a fraction of the sprite's size; the rotation and
    /// scale center.
    pub pivot: Vec2,
    /// Output size in pixels. A zero axis keeps the natural size on that
    /// axis.
    pub size: Size,
    /// Mirror the emitted rotation when the sprite is flipped, so a flipped
    /// sprite reads as rotated rather than rotated and mirrored.
    pub flip_affects_rotation: bool,
}

impl Sprite {
    /// The default anchor: the center of the sprite.
    pub const CENTER: Vec2 = Vec2::new(0.5, 0.5);

    /// Creates a centered sprite of natural size.
    #[must_use]
    pub fn new(texture: Option<TextureId>) -> Self {
        Self {
            texture,
            source_rect: None,
            pivot: Self::CENTER,
            size: Size::ZERO,
            flip_affects_rotation: false,
        }
    }

    /// Returns the output size, taking each zero axis from `natural`.
    #[must_use]
    pub fn output_size(&self, natural: Size) -> Size {
        Size::new(
            if self.size.width != 0.0 { self.size.width } else { natural.width },
            if self.size.height != 0.0 { self.size.height } else { natural.height },
        )
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new(None)
    }
}

/// A sprite that can be targeted by pointer events.
pub struct PressableSprite {
    /// The drawable part.
    pub sprite: Sprite,
    /// Inactive sprites are never a pointer target, directly or by bubbling.
    pub active: bool,
    /// Whether hits on descendants may bubble up to this sprite.
    ///
    /// This only governs being reached as an ancestor. A direct hit on an
    /// active sprite is accepted regardless.
    pub bubble_to_children: bool,
    /// Bound pointer callbacks.
    pub handlers: PointerHandlers,
}

impl PressableSprite {
    /// Wraps a sprite as an active, non-bubbling pointer target.
    #[must_use]
    pub fn new(sprite: Sprite) -> Self {
        Self {
            sprite,
            active: true,
            bubble_to_children: false,
            handlers: PointerHandlers::default(),
        }
    }

    /// Binds the hover callback.
    pub fn on_hover(&mut self, f: impl FnMut(&PointerEvent) + 'static) {
        self.handlers.hover = Some(Box::new(f));
    }

    /// Binds the click callback for `button`.
    pub fn on_click(&mut self, button: PointerButton, f: impl FnMut(&PointerEvent) + 'static) {
        *self.handlers.click.slot_mut(button) = Some(Box::new(f));
    }

    /// Binds the press callback for `button`.
    pub fn on_press(&mut self, button: PointerButton, f: impl FnMut(&PointerEvent) + 'static) {
        *self.handlers.press.slot_mut(button) = Some(Box::new(f));
    }

    /// Binds the release callback for `button`.
    pub fn on_release(&mut self, button: PointerButton, f: impl FnMut(&PointerEvent) + 'static) {
        *self.handlers.release.slot_mut(button) = Some(Box::new(f));
    }

    /// Binds the drag-start callback.
    pub fn on_drag_start(&mut self, f: impl FnMut(&PointerEvent) + 'static) {
        self.handlers.drag_start = Some(Box::new(f));
    }

    /// Binds the drag-end callback.
    pub fn on_drag_end(&mut self, f: impl FnMut(&PointerEvent, Option<NodeId>) + 'static) {
        self.handlers.drag_end = Some(Box::new(f));
    }
}

impl fmt::Debug for PressableSprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressableSprite")
            .field("sprite", &self.sprite)
            .field("active", &self.active)
            .field("bubble_to_children", &self.bubble_to_children)
            .field("handlers", &self.handlers)
            .finish()
    }
}

/// Optional pointer callback slots. Unbound slots are silently skipped.
#[derive(Default)]
pub struct PointerHandlers {
    /// Pointer moved over the sprite.
    pub hover: Option<PointerHandler>,
    /// Button clicked on the sprite.
    pub click: ButtonSlots,
    /// Button pressed on the sprite.
    pub press: ButtonSlots,
    /// Button released on the sprite.
    pub release: ButtonSlots,
    /// A drag began on the sprite.
    pub drag_start: Option<PointerHandler>,
    /// A drag that began on the sprite ended.
    pub drag_end: Option<DropHandler>,
}

impl fmt::Debug for PointerHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerHandlers")
            .field("hover", &self.hover.is_some())
            .field("click", &self.click)
            .field("press", &self.press)
            .field("release", &self.release)
            .field("drag_start", &self.drag_start.is_some())
            .field("drag_end", &self.drag_end.is_some())
            .finish()
    }
}

/// One callback slot per pointer button.
#[derive(Default)]
pub struct ButtonSlots {
    /// Primary button.
    pub left: Option<PointerHandler>,
    /// Middle button.
    pub middle: Option<PointerHandler>,
    /// Secondary button.
    pub right: Option<PointerHandler>,
}

impl ButtonSlots {
    /// Returns the slot for `button`.
    #[must_use]
    pub fn slot_mut(&mut self, button: PointerButton) -> &mut Option<PointerHandler> {
        match button {
            PointerButton::Left => &mut self.left,
            PointerButton::Middle => &mut self.middle,
            PointerButton::Right => &mut self.right,
        }
    }

    /// Returns whether a callback is bound for `button`.
    #[must_use]
    pub fn is_bound(&self, button: PointerButton) -> bool {
        match button {
            PointerButton::Left => self.left.is_some(),
            PointerButton::Middle => self.middle.is_some(),
            PointerButton::Right => self.right.is_some(),
        }
    }
}

impl fmt::Debug for ButtonSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonSlots")
            .field("left", &self.left.is_some())
            .field("middle", &self.middle.is_some())
            .field("right", &self.right.is_some())
            .finish()
    }
}
