//! Bouncing box physics
//!
//! Each box moves by its velocity once per frame and reflects elastically
//! off the playfield edges: a coordinate past an edge is clamped onto it and
//! that axis's velocity changes sign.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use rand::{Rng, RngCore};

use crate::config::SpeedRange;
use crate::frame::HalfCanvas;

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Two-component real-valued vector (position or velocity)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A filled square that bounces around the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct BouncingBox {
    size: u16,
    bounds: Bounds,
    color: Rgb565,
    position: Vec2,
    velocity: Vec2,
}

impl BouncingBox {
    /// Create a box at the center of the playfield with a given velocity
    ///
    /// `size` must fit inside `bounds` on both axes.
    pub fn new(bounds: Bounds, size: u16, color: Rgb565, velocity: Vec2) -> Self {
        debug_assert!(size > 0 && size <= bounds.width && size <= bounds.height);
        Self {
            size,
            bounds,
            color,
            position: Vec2::new(bounds.width as f32 / 2.0, bounds.height as f32 / 2.0),
            velocity,
        }
    }

    /// Create a centered box with a random non-zero velocity
    pub fn random<R: RngCore + ?Sized>(
        bounds: Bounds,
        size: u16,
        color: Rgb565,
        speed: SpeedRange,
        rng: &mut R,
    ) -> Self {
        let velocity = Vec2::new(random_speed(rng, speed), random_speed(rng, speed));
        Self::new(bounds, size, color, velocity)
    }

    /// Move the box to an explicit position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Largest x the box's left edge may reach
    pub fn max_x(&self) -> f32 {
        (self.bounds.width - self.size) as f32
    }

    /// Largest y the box's top edge may reach
    pub fn max_y(&self) -> f32 {
        (self.bounds.height - self.size) as f32
    }

    /// Advance one frame, reflecting off the edges
    pub fn update_pos(&mut self) {
        let max_x = self.max_x();
        let max_y = self.max_y();
        reflect(&mut self.position.x, &mut self.velocity.x, max_x);
        reflect(&mut self.position.y, &mut self.velocity.y, max_y);
    }

    /// Paint the box into the half being drawn
    ///
    /// The position is truncated to whole pixels and shifted up by the
    /// canvas's row offset; the part outside the half is clipped.
    pub fn draw(&self, canvas: &mut HalfCanvas<'_>) {
        let top_left = Point::new(
            self.position.x as i32,
            self.position.y as i32 - canvas.row_offset(),
        );
        let area = Rectangle::new(top_left, Size::new_equal(self.size as u32));
        // Infallible
        let _ = canvas.fill_solid(&area, self.color);
    }
}

fn reflect(position: &mut f32, velocity: &mut f32, max: f32) {
    *position += *velocity;
    if *position < 0.0 {
        *position = 0.0;
        *velocity = -*velocity;
    } else if *position > max {
        *position = max;
        *velocity = -*velocity;
    }
}

fn random_speed<R: RngCore + ?Sized>(rng: &mut R, speed: SpeedRange) -> f32 {
    let magnitude = rng.gen_range(speed.min..=speed.max);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}
