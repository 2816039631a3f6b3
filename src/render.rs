//! Render requests and the collaborator that consumes them.
//!
//! The core never draws. Each tick it hands every walker's destination and,
//! when it changed, its sprite cell to a [`Renderer`].

use glam::{DVec2, DVec3};
use log::trace;
use serde::Serialize;

use crate::constants::Z_ORDER_BASE;
use crate::walker::animation::SpriteCell;
use crate::walker::kinematics::Viewport;
use crate::walker::WalkerId;

/// Integer screen placement of a walker's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Floored horizontal position in pixels.
    pub x: i32,
    /// Floored vertical position in pixels, growing downward.
    pub y: i32,
    /// Painter's-order key; larger values draw on top.
    pub z_order: i32,
}

impl Placement {
    /// Converts to a centre-origin, y-up world translation for a sprite of
    /// `cell` size, the convention Bevy's 2D camera uses.
    ///
    /// The depth is the z-order scaled down so every walker stays within the
    /// default 2D camera's clip range.
    ///
    /// # Examples
    /// ```
    /// use ceviwalk::render::Placement;
    /// use ceviwalk::walker::kinematics::Viewport;
    /// use glam::DVec2;
    /// let placement = Placement { x: 0, y: 0, z_order: 10_000 };
    /// let world = placement.to_world(Viewport::new(100.0, 100.0), DVec2::splat(10.0));
    /// assert!((world.x + 45.0).abs() < 1e-9);
    /// assert!((world.y - 45.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn to_world(self, viewport: Viewport, cell: DVec2) -> DVec3 {
        let centre = DVec2::new(f64::from(self.x), f64::from(self.y)) + cell * 0.5;
        DVec3::new(
            centre.x - viewport.width * 0.5,
            viewport.height * 0.5 - centre.y,
            f64::from(self.z_order) / f64::from(Z_ORDER_BASE),
        )
    }
}

/// Everything a renderer needs for one walker on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    /// Where to draw.
    pub placement: Placement,
    /// New sprite cell, or `None` when the cell shown last tick still
    /// applies.
    pub cell: Option<SpriteCell>,
}

/// Consumer of per-tick render requests.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer {
    /// Receives the request produced for `walker` this tick.
    fn present(&mut self, walker: WalkerId, request: &RenderRequest);
}

impl Renderer for Vec<(WalkerId, RenderRequest)> {
    fn present(&mut self, walker: WalkerId, request: &RenderRequest) {
        self.push((walker, *request));
    }
}

/// Renderer that traces each request to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn present(&mut self, walker: WalkerId, request: &RenderRequest) {
        let placement = request.placement;
        match request.cell {
            Some(cell) => trace!(
                "walker {walker} at ({}, {}) z {} cell {}:{}",
                placement.x,
                placement.y,
                placement.z_order,
                cell.row,
                cell.column
            ),
            None => trace!(
                "walker {walker} at ({}, {}) z {}",
                placement.x,
                placement.y,
                placement.z_order
            ),
        }
    }
}
