//! Alien formations
//!
//! A formation is one row of ten aliens marching sideways together. When any
//! live member bumps a screen edge the whole row reverses and drops one slot.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{self, Actor, AlienColor, ActorKind};
use super::collision::check_collision;
use crate::Direction;
use crate::assets::SpriteSheet;
use crate::consts::FORMATION_SIZE;
use crate::settings::Settings;

/// Vertical slot of a formation, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
}

impl Rank {
    pub const ALL: [Rank; 4] = [Rank::First, Rank::Second, Rank::Third, Rank::Fourth];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Even ranks start moving right, odd ranks left
    pub fn initial_direction(self) -> Direction {
        if self.index() % 2 == 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// Geometry shared by every formation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormationLayout {
    pub gutter: i32,
    pub gap: i32,
    /// Bottom edge at which an alien has reached the player's base
    pub base_line: i32,
    pub screen_width: i32,
}

impl FormationLayout {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            gutter: settings.gutter,
            gap: settings.gap,
            base_line: settings.base_line,
            screen_width: settings.screen_width,
        }
    }
}

/// One row of aliens
#[derive(Debug, Clone)]
pub struct Formation {
    members: [Actor; FORMATION_SIZE],
    rank: Rank,
    direction: Direction,
    empty: bool,
    layout: FormationLayout,
}

impl Formation {
    /// Spawn a full row at its starting position
    pub fn new(
        rank: Rank,
        sheet: &SpriteSheet,
        speed: i32,
        layout: FormationLayout,
        rng: &mut impl Rng,
    ) -> Self {
        let members = std::array::from_fn(|_| Actor::alien(sheet, speed, rng));
        let mut formation = Self {
            members,
            rank,
            direction: rank.initial_direction(),
            empty: false,
            layout,
        };
        formation.reset_location();
        formation
    }

    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    #[inline]
    pub fn members(&self) -> &[Actor; FORMATION_SIZE] {
        &self.members
    }

    /// Live members with their slot index, in slot order
    pub fn active_members(&self) -> impl Iterator<Item = (usize, &Actor)> {
        self.members.iter().enumerate().filter(|(_, a)| a.is_active())
    }

    /// Width and height of one member
    #[inline]
    pub fn member_size(&self) -> IVec2 {
        self.members[0].size()
    }

    /// Distance the row drops on each reversal
    #[inline]
    pub fn descent_step(&self) -> i32 {
        self.member_size().y + self.layout.gap
    }

    /// Destroy the member in `index`. Returns false if it was already gone.
    /// The `empty` flag is left alone until [`Self::recompute_empty`].
    pub fn mark_destroyed(&mut self, index: usize) -> bool {
        match self.members.get_mut(index) {
            Some(member) if !member.destroyed => {
                member.destroyed = true;
                true
            }
            _ => false,
        }
    }

    /// Rescan every member and refresh the `empty` flag
    pub fn recompute_empty(&mut self) -> bool {
        self.empty = self.members.iter().all(|m| !m.is_active());
        self.empty
    }

    /// Lay the row out from the left gutter and restore its starting direction
    pub fn reset_location(&mut self) {
        let size = self.member_size();
        let gap = self.layout.gap;
        let y = self.rank.index() as i32 * (size.y + gap) + gap;
        let mut x = self.layout.gutter;
        for member in &mut self.members {
            member.pos = IVec2::new(x, y);
            x += size.x + gap;
        }
        self.direction = self.rank.initial_direction();
    }

    /// Drop every member, live or not, by one slot
    pub fn move_down(&mut self) {
        let step = self.descent_step();
        for member in &mut self.members {
            actor::move_down(member, step);
        }
    }

    /// March one tick. Returns the number of reversals that happened.
    ///
    /// The reversal takes effect immediately: members later in slot order
    /// already move in the new direction during the same tick.
    pub fn update(&mut self) -> u32 {
        let mut reversals = 0;
        for i in 0..FORMATION_SIZE {
            if !self.members[i].is_active() {
                continue;
            }
            let member = &mut self.members[i];
            member.direction = self.direction;
            actor::animate(member);
            if !actor::step(member, self.layout.screen_width) {
                self.direction = self.direction.flipped();
                self.move_down();
                reversals += 1;
            }
        }
        reversals
    }

    /// Repopulate the row for a new round with fresh speed, colors and frames
    pub fn reset_round(&mut self, round: u32, base_speed: i32, rng: &mut impl Rng) {
        self.empty = false;
        self.reset_location();
        let speed = round_speed(round, base_speed, rng);
        for member in &mut self.members {
            member.speed = speed;
            member.destroyed = false;
            member.kind = ActorKind::Alien {
                color: AlienColor::random(rng),
            };
            let frames = member.anim.max_frames();
            member.anim.set_frame(rng.random_range(0..frames));
        }
        log::debug!(
            "Formation {:?} reset for round {} at speed {}",
            self.rank,
            round,
            speed
        );
    }

    /// True when a live member touches the player or has reached the base.
    /// Stops at the first such member.
    pub fn check_collisions(&self, player: &Actor) -> bool {
        if self.empty {
            return false;
        }
        self.active_members().any(|(_, alien)| {
            check_collision(alien, player) || alien.bounds().bottom() >= self.layout.base_line
        })
    }
}

/// Row speed for a round: `base * round` plus up to `round - 1` extra pixels
pub fn round_speed(round: u32, base_speed: i32, rng: &mut impl Rng) -> i32 {
    let round = round.max(1) as i32;
    base_speed * round + rng.random_range(0..round)
}
