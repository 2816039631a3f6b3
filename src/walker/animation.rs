//! Distance-paced animation and sprite cell selection.

use glam::DVec2;
use serde::Serialize;

use crate::constants::{FACINGS_PER_CHARACTER, Z_ORDER_BASE};
use crate::numeric::{floor_to_i32, wrap_steps};
use crate::render::{Placement, RenderRequest};
use crate::vector_math::heading_degrees;

use super::{SpriteMeta, Walker};

/// Compass bucket of a walker's heading, in sprite sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Facing {
    /// Heading in `[135, 225)` degrees.
    Left = 0,
    /// Heading in `[45, 135)` degrees; screen y grows downward.
    Down = 1,
    /// Heading in `[315, 360)` or `[0, 45)` degrees.
    Right = 2,
    /// Heading in `[225, 315)` degrees.
    Up = 3,
}

impl Facing {
    /// Buckets the heading of `velocity`.
    ///
    /// # Examples
    /// ```
    /// use ceviwalk::walker::animation::Facing;
    /// use glam::DVec2;
    /// assert_eq!(Facing::from_velocity(DVec2::new(0.0, 1.0)), Facing::Down);
    /// assert_eq!(Facing::from_velocity(DVec2::ZERO), Facing::Right);
    /// ```
    #[must_use]
    pub fn from_velocity(velocity: DVec2) -> Self {
        let heading = heading_degrees(velocity);
        if (45.0..135.0).contains(&heading) {
            Self::Down
        } else if (135.0..225.0).contains(&heading) {
            Self::Left
        } else if (225.0..315.0).contains(&heading) {
            Self::Up
        } else {
            Self::Right
        }
    }

    /// Row offset within a character's row group.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// Identity of one sprite sheet cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpriteCell {
    /// `char_id * 4 + facing`.
    pub row: u32,
    /// Animation frame.
    pub column: u32,
}

impl SpriteCell {
    /// Index into a texture atlas that stores each row group as a vertical
    /// strip, `groups` strips wide.
    ///
    /// # Examples
    /// ```
    /// use ceviwalk::walker::animation::SpriteCell;
    /// let cell = SpriteCell { row: 5, column: 2 };
    /// assert_eq!(cell.atlas_index(12), 29);
    /// ```
    #[must_use]
    pub fn atlas_index(self, groups: u32) -> usize {
        let index = u64::from(self.column) * u64::from(groups) + u64::from(self.row);
        usize::try_from(index).unwrap_or(usize::MAX)
    }
}

/// Accumulates travelled distance into animation frames and remembers the
/// last cell handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct AnimationPacer {
    moved: f64,
    frame: u32,
    shown: Option<SpriteCell>,
}

impl AnimationPacer {
    /// Current animation column.
    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// Distance carried toward the next advance.
    #[must_use]
    pub const fn moved(&self) -> f64 {
        self.moved
    }

    /// Adds `distance` and advances by every whole `frame_speed` covered,
    /// in a single step.
    pub fn advance(&mut self, distance: f64, sprite: &SpriteMeta) {
        self.moved += distance;
        if self.moved >= sprite.frame_speed() {
            let steps = (self.moved / sprite.frame_speed()).floor();
            let advance = wrap_steps(steps, sprite.frame_count());
            self.frame = (self.frame + advance) % sprite.frame_count();
            self.moved -= steps * sprite.frame_speed();
        }
    }

    /// Advances one frame regardless of distance.
    pub fn step(&mut self, sprite: &SpriteMeta) {
        self.frame = (self.frame + 1) % sprite.frame_count();
    }

    /// Returns the cell for `facing`, or `None` if it matches the cell last
    /// returned.
    pub fn select(&mut self, facing: Facing, sprite: &SpriteMeta) -> Option<SpriteCell> {
        let cell = SpriteCell {
            row: sprite.char_id() * FACINGS_PER_CHARACTER + facing.index(),
            column: self.frame,
        };
        if self.shown == Some(cell) {
            return None;
        }
        self.shown = Some(cell);
        Some(cell)
    }
}

impl Walker {
    /// Current facing derived from the velocity.
    #[must_use]
    pub fn facing(&self) -> Facing {
        Facing::from_velocity(self.velocity)
    }

    /// Builds this tick's render request, memoizing the sprite cell.
    pub(super) fn render_request(&mut self) -> RenderRequest {
        let facing = self.facing();
        let cell = self.pacer.select(facing, &self.sprite);
        let y = floor_to_i32(self.position.y);
        RenderRequest {
            placement: Placement {
                x: floor_to_i32(self.position.x),
                y,
                z_order: Z_ORDER_BASE.saturating_add(y),
            },
            cell,
        }
    }
}
