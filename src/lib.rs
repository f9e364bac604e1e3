//! UFO Siege - simulation core for a fixed-camera arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic per-tick simulation (actors, formations, projectiles, rounds)
//! - `assets`: Two-phase sprite sheet initialization
//! - `render`: Draw-quad handoff to an external renderer
//! - `settings`: Data-driven tunables

pub mod assets;
pub mod render;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, PendingTextures, SheetId, SpriteSheet, TextureHandle, Textures};
pub use settings::{Settings, SettingsError};

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Aliens per formation row
    pub const FORMATION_SIZE: usize = 10;
    /// Number of formation rows on screen
    pub const FORMATION_COUNT: usize = 4;
    /// Bullets in the projectile pool
    pub const WHEEL_CAPACITY: usize = 5;
    /// Color variants on the alien sheet (one per row)
    pub const ALIEN_COLORS: usize = 9;

    /// Default playfield dimensions
    pub const SCREEN_WIDTH: i32 = 1600;
    pub const SCREEN_HEIGHT: i32 = 900;

    /// Side inset of the first alien in a row
    pub const GUTTER_SIZE: i32 = 210;
    /// Spacing between aliens and between rows
    pub const GAP_SIZE: i32 = 20;
    /// Aliens whose bottom edge reaches this line hit the base (25 tile rows of 32px)
    pub const BASE_LINE: i32 = 25 * 32;

    /// Ticks between shots
    pub const BULLET_COOLDOWN: u32 = 40;
    pub const BULLET_SPEED: i32 = 15;
    pub const PLAYER_SPEED: i32 = 5;
    /// Player rests this far above the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: i32 = 10;

    pub const STARTING_LIVES: u32 = 3;
    pub const MAX_ROUNDS: u32 = 3;

    /// Background scroll in pixels per tick, and the increase per round
    pub const SCROLL_SPEED: i32 = 3;
    pub const SCROLL_SPEED_STEP: i32 = 2;
}

/// Horizontal facing, usable directly as a speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Left,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}

/// Axis-aligned rectangle in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a top-left position and a size
    #[inline]
    pub fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Pack as `[x, y, w, h]` for GPU-style buffers
    #[inline]
    pub fn to_array(self) -> [i32; 4] {
        [self.x, self.y, self.w, self.h]
    }
}
