//! Actors: positioned, animated sprites
//!
//! Every on-screen thing shares one [`Actor`] record; what differs between the
//! player, aliens, bullets and effects lives in [`ActorKind`]. Movement and
//! animation are free functions over the shared fields.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::animation::Animator;
use crate::assets::SpriteSheet;
use crate::consts::ALIEN_COLORS;
use crate::{Direction, Rect};

/// Alien paint job, one per row of the alien sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlienColor {
    Blue,
    Brown,
    Gray,
    Green,
    Orange,
    Pink,
    Purple,
    Red,
    Yellow,
}

impl AlienColor {
    pub const ALL: [AlienColor; ALIEN_COLORS] = [
        AlienColor::Blue,
        AlienColor::Brown,
        AlienColor::Gray,
        AlienColor::Green,
        AlienColor::Orange,
        AlienColor::Pink,
        AlienColor::Purple,
        AlienColor::Red,
        AlienColor::Yellow,
    ];

    /// Row on the alien sheet
    #[inline]
    pub fn row(self) -> u32 {
        self as u32
    }

    /// Uniform pick over all colors
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..ALIEN_COLORS)]
    }
}

/// What an actor is, carrying only the data that variant needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Alien { color: AlienColor },
    Bullet,
    /// One-shot visual such as an explosion
    Effect,
}

/// A sprite with position, motion and animation
#[derive(Debug, Clone)]
pub struct Actor {
    pub kind: ActorKind,
    /// Top-left corner in screen pixels
    pub pos: IVec2,
    /// Pixels per tick
    pub speed: i32,
    pub direction: Direction,
    /// Pooled actors (bullets, effects) are switched off rather than dropped
    pub active: bool,
    /// Aliens stay destroyed until the next round reset
    pub destroyed: bool,
    pub anim: Animator,
    sheet: SpriteSheet,
}

impl Actor {
    /// Build an actor cut from `sheet`. Size is one frame of the sheet.
    pub fn new(sheet: &SpriteSheet, kind: ActorKind) -> Self {
        Self {
            kind,
            pos: IVec2::ZERO,
            speed: 1,
            direction: Direction::Right,
            active: true,
            destroyed: false,
            anim: Animator::new(sheet.frames, sheet.frame_delay),
            sheet: *sheet,
        }
    }

    /// The player ship, parked at the bottom center of the screen
    pub fn player(sheet: &SpriteSheet, speed: i32, screen: IVec2) -> Self {
        let mut actor = Self::new(sheet, ActorKind::Player);
        actor.speed = speed;
        actor.pos = player_home(actor.size(), screen);
        actor
    }

    /// An alien with a random color, frame delay and starting frame
    pub fn alien(sheet: &SpriteSheet, speed: i32, rng: &mut impl Rng) -> Self {
        let color = AlienColor::random(rng);
        let mut actor = Self::new(sheet, ActorKind::Alien { color });
        actor.speed = speed;
        actor.anim = Animator::new(sheet.frames, rng.random_range(30..80));
        actor.anim.set_frame(rng.random_range(0..sheet.frames));
        actor
    }

    /// A parked, inactive bullet
    pub fn bullet(sheet: &SpriteSheet, speed: i32) -> Self {
        let mut actor = Self::new(sheet, ActorKind::Bullet);
        actor.speed = speed;
        actor.active = false;
        actor.pos = IVec2::new(-100, -100);
        actor
    }

    /// An inactive one-shot effect
    pub fn effect(sheet: &SpriteSheet) -> Self {
        let mut actor = Self::new(sheet, ActorKind::Effect);
        actor.active = false;
        actor
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        self.sheet.frame_size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.sheet.frame_size().x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.sheet.frame_size().y
    }

    #[inline]
    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    /// Whether the actor takes part in movement, drawing and collisions
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active && !self.destroyed
    }

    /// Bounding box, also the destination rectangle when drawn
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }

    /// Current frame on the sheet
    pub fn source_rect(&self) -> Rect {
        let row = match self.kind {
            ActorKind::Alien { color } => color.row(),
            _ => 0,
        };
        self.sheet.source_rect(self.anim.frame_index(), row)
    }
}

/// Resting position of a ship of `size` on a screen of `screen`
pub fn player_home(size: IVec2, screen: IVec2) -> IVec2 {
    IVec2::new(
        (screen.x - size.x) / 2,
        screen.y - size.y - crate::consts::PLAYER_BOTTOM_MARGIN,
    )
}

/// Move horizontally by `speed * direction`, clamped to the screen.
/// Returns false when the actor ended on (or was pushed back to) an edge.
pub fn step(actor: &mut Actor, screen_width: i32) -> bool {
    actor.pos.x += actor.speed * actor.direction.sign();
    let max_x = screen_width - actor.width();
    if actor.pos.x <= 0 {
        actor.pos.x = 0;
        return false;
    }
    if actor.pos.x >= max_x {
        actor.pos.x = max_x;
        return false;
    }
    true
}

/// Drop the actor by `amount` pixels
#[inline]
pub fn move_down(actor: &mut Actor, amount: i32) {
    actor.pos.y += amount;
}

/// Advance the animation strip; true when it wrapped
#[inline]
pub fn animate(actor: &mut Actor) -> bool {
    actor.anim.advance()
}
