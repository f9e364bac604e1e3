//! One-shot visual effects and the scrolling backdrop
//!
//! Neither affects gameplay; both only feed the render handoff.

use glam::IVec2;

use super::actor::{self, Actor};
use crate::Rect;
use crate::assets::SpriteSheet;

/// A single reusable explosion. Retriggering restarts it at the new spot.
#[derive(Debug, Clone)]
pub struct Explosion {
    actor: Actor,
}

impl Explosion {
    pub fn new(sheet: &SpriteSheet) -> Self {
        Self {
            actor: Actor::effect(sheet),
        }
    }

    /// Restart the animation at `at` (top-left of the thing that blew up)
    pub fn trigger(&mut self, at: IVec2) {
        self.actor.anim.reset();
        self.actor.pos = at;
        self.actor.active = true;
    }

    /// Play one tick; switches itself off after the last frame
    pub fn update(&mut self) {
        if self.actor.active && actor::animate(&mut self.actor) {
            self.actor.active = false;
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.actor.is_active()
    }

    #[inline]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Vertically wrapping backdrop, stretched over the whole screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    sheet: SpriteSheet,
    y_offset: i32,
    scroll_speed: i32,
    screen: IVec2,
}

impl Background {
    pub fn new(sheet: &SpriteSheet, scroll_speed: i32, screen: IVec2) -> Self {
        Self {
            sheet: *sheet,
            y_offset: 0,
            scroll_speed,
            screen,
        }
    }

    #[inline]
    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    #[inline]
    pub fn y_offset(&self) -> i32 {
        self.y_offset
    }

    #[inline]
    pub fn scroll_speed(&self) -> i32 {
        self.scroll_speed
    }

    pub fn scroll(&mut self) {
        self.y_offset += self.scroll_speed;
        if self.y_offset >= self.screen.y {
            self.y_offset = 0;
        }
    }

    pub fn speed_up(&mut self, amount: i32) {
        self.scroll_speed += amount;
    }

    /// The two stacked copies that tile the screen at the current offset
    pub fn tiles(&self) -> [Rect; 2] {
        [
            Rect::new(0, self.y_offset, self.screen.x, self.screen.y),
            Rect::new(0, self.y_offset - self.screen.y, self.screen.x, self.screen.y),
        ]
    }
}
