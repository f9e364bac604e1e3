//! Pooled player projectiles
//!
//! Five bullets are built once and recycled forever. Firing hands out slots
//! round-robin; a slot still in flight is simply taken over.

use glam::IVec2;

use super::actor::Actor;
use super::collision::check_collision;
use super::effects::Explosion;
use super::formation::Formation;
use crate::assets::SpriteSheet;
use crate::consts::WHEEL_CAPACITY;

/// Round-robin bullet pool with a shared fire cooldown
#[derive(Debug, Clone)]
pub struct ProjectileWheel {
    slots: [Actor; WHEEL_CAPACITY],
    next_slot: usize,
    cooldown_timer: u32,
    cooldown_threshold: u32,
}

impl ProjectileWheel {
    /// The timer starts full so the first shot is never held back
    pub fn new(sheet: &SpriteSheet, speed: i32, cooldown_threshold: u32) -> Self {
        Self {
            slots: std::array::from_fn(|_| Actor::bullet(sheet, speed)),
            next_slot: 0,
            cooldown_timer: cooldown_threshold,
            cooldown_threshold,
        }
    }

    #[inline]
    pub fn slots(&self) -> &[Actor; WHEEL_CAPACITY] {
        &self.slots
    }

    #[inline]
    pub fn next_slot(&self) -> usize {
        self.next_slot
    }

    #[inline]
    pub fn cooldown_timer(&self) -> u32 {
        self.cooldown_timer
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.cooldown_timer >= self.cooldown_threshold
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.is_active()).count()
    }

    /// Launch a bullet centered above `shooter`. Returns false during cooldown.
    pub fn fire(&mut self, shooter: &Actor) -> bool {
        if !self.ready() {
            return false;
        }
        let bullet = &mut self.slots[self.next_slot];
        bullet.pos = IVec2::new(
            shooter.pos.x + (shooter.width() - bullet.width()) / 2,
            shooter.pos.y - bullet.height(),
        );
        bullet.active = true;
        self.next_slot = (self.next_slot + 1) % WHEEL_CAPACITY;
        self.cooldown_timer = 0;
        true
    }

    /// Fly every live bullet upward and run the cooldown clock
    pub fn update(&mut self) {
        for bullet in self.slots.iter_mut().filter(|b| b.active) {
            bullet.pos.y -= bullet.speed;
            if bullet.bounds().bottom() <= 0 {
                bullet.active = false;
            }
        }
        self.cooldown_timer = self.cooldown_timer.saturating_add(1);
    }

    /// Resolve at most one bullet-vs-alien hit against `formation`.
    ///
    /// Bullets are scanned in slot order and, for each, members in slot order.
    /// On the first overlap the alien is destroyed, the explosion fires at it,
    /// the bullet is spent, the row's empty flag is refreshed and the score
    /// goes up by one.
    pub fn check_collisions(
        &mut self,
        formation: &mut Formation,
        explosion: &mut Explosion,
        score: &mut u64,
    ) -> bool {
        if formation.is_empty() {
            return false;
        }
        let hit = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, bullet)| bullet.active)
            .find_map(|(slot, bullet)| {
                formation
                    .active_members()
                    .find(|(_, alien)| check_collision(bullet, alien))
                    .map(|(index, alien)| (slot, index, alien.pos))
            });

        let Some((slot, index, at)) = hit else {
            return false;
        };
        formation.mark_destroyed(index);
        explosion.trigger(at);
        self.slots[slot].active = false;
        formation.recompute_empty();
        *score += 1;
        log::debug!(
            "Bullet {} destroyed alien {} in {:?} (score {})",
            slot,
            index,
            formation.rank(),
            score
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{HeadlessProvider, PendingTextures, SheetId, Textures};
    use crate::settings::Settings;
    use crate::sim::formation::{FormationLayout, Rank};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn textures() -> Textures {
        PendingTextures::new("#000000")
            .unwrap()
            .initialize(&mut HeadlessProvider::default())
            .unwrap()
    }

    fn player(tex: &Textures) -> Actor {
        Actor::player(tex.sheet(SheetId::Player), 5, IVec2::new(1600, 900))
    }

    fn formation(tex: &Textures) -> Formation {
        let mut rng = Pcg32::seed_from_u64(11);
        Formation::new(
            Rank::First,
            tex.sheet(SheetId::Alien),
            1,
            FormationLayout::from_settings(&Settings::default()),
            &mut rng,
        )
    }

    #[test]
    fn test_fire_spawns_centered_above_shooter() {
        let tex = textures();
        let mut wheel = ProjectileWheel::new(tex.sheet(SheetId::Bullet), 15, 40);
        let ship = player(&tex);
        assert!(wheel.fire(&ship));
        let bullet = &wheel.slots()[0];
        assert!(bullet.active);
        assert_eq!(bullet.pos.x, ship.pos.x + (64 - 8) / 2);
        assert_eq!(bullet.pos.y, ship.pos.y - 24);
        assert_eq!(wheel.next_slot(), 1);
        assert_eq!(wheel.cooldown_timer(), 0);
    }

    #[test]
    fn test_second_shot_inside_cooldown_is_ignored() {
        let tex = textures();
        let mut wheel = ProjectileWheel::new(tex.sheet(SheetId::Bullet), 15, 40);
        let ship = player(&tex);
        assert!(wheel.fire(&ship));
        for _ in 0..10 {
            wheel.update();
        }
        assert!(!wheel.fire(&ship));
        assert_eq!(wheel.active_count(), 1);
        assert_eq!(wheel.next_slot(), 1);
    }

    #[test]
    fn test_fire_again_after_cooldown() {
        let tex = textures();
        let mut wheel = ProjectileWheel::new(tex.sheet(SheetId::Bullet), 1, 40);
        let ship = player(&tex);
        assert!(wheel.fire(&ship));
        for _ in 0..39 {
            wheel.update();
        }
        assert!(!wheel.fire(&ship));
        wheel.update();
        assert!(wheel.fire(&ship));
        assert_eq!(wheel.active_count(), 2);
    }

    #[test]
    fn test_cursor_wraps_and_reuses_live_slots() {
        let tex = textures();
        let mut wheel = ProjectileWheel::new(tex.sheet(SheetId::Bullet), 1, 0);
        let ship = player(&tex);
        for _ in 0..7 {
            assert!(wheel.fire(&ship));
            assert!(wheel.active_count() <= WHEEL_CAPACITY);
        }
        assert_eq!(wheel.next_slot(), 2);
        assert_eq!(wheel.active_count(), 5);
    }

    #[test]
    fn test_bullets_expire_above_screen() {
        let tex = textures();
        let mut wheel = ProjectileWheel::new(tex.sheet(SheetId::Bullet), 15, 40);
        let mut ship = player(&tex);
        ship.pos.y = 100;
        wheel.fire(&ship);
        // Spawned at y = 76; bottom edge 100 clears the top after 7 ticks
        for _ in 0..6 {
            wheel.update();
            assert_eq!(wheel.active_count(), 1);
        }
        wheel.update();
        assert_eq!(wheel.active_count(), 0);
    }

    #[test]
    fn test_hit_destroys_exactly_one_alien() {
        let tex = textures();
        let mut wheel = ProjectileWheel::new(tex.sheet(SheetId::Bullet), 15, 40);
        let mut row = formation(&tex);
        let mut boom = Explosion::new(tex.sheet(SheetId::Explosion));
        let mut score = 0;
        for i in [0, 1, 2] {
            row.mark_destroyed(i);
        }
        row.recompute_empty();

        // Park the shooter so the bullet lands inside alien 5
        let target = row.members()[5].pos;
        let mut ship = player(&tex);
        ship.pos = IVec2::new(target.x + 20 - 32, target.y + 30);
        assert!(wheel.fire(&ship));

        assert!(wheel.check_collisions(&mut row, &mut boom, &mut score));
        assert_eq!(score, 1);
        assert!(row.members()[5].destroyed);
        assert_eq!(row.active_members().count(), 6);
        assert!(!row.is_empty());
        assert_eq!(wheel.active_count(), 0);
        assert!(boom.is_active());
        assert_eq!(boom.actor().pos, target);

        // Nothing left in flight, nothing more to resolve
        assert!(!wheel.check_collisions(&mut row, &mut boom, &mut score));
        assert_eq!(score, 1);
    }

    #[test]
    fn test_only_first_hit_resolves_per_call() {
        let tex = textures();
        let mut wheel = ProjectileWheel::new(tex.sheet(SheetId::Bullet), 15, 0);
        let mut row = formation(&tex);
        let mut boom = Explosion::new(tex.sheet(SheetId::Explosion));
        let mut score = 0;

        for target in [2, 7] {
            let pos = row.members()[target].pos;
            let mut ship = player(&tex);
            ship.pos = IVec2::new(pos.x + 20 - 32, pos.y + 30);
            assert!(wheel.fire(&ship));
        }

        assert!(wheel.check_collisions(&mut row, &mut boom, &mut score));
        assert_eq!(score, 1);
        assert!(row.members()[2].destroyed);
        assert!(!row.members()[7].destroyed);
        assert_eq!(wheel.active_count(), 1);

        assert!(wheel.check_collisions(&mut row, &mut boom, &mut score));
        assert_eq!(score, 2);
        assert!(row.members()[7].destroyed);
    }

    #[test]
    fn test_clearing_the_row_sets_empty() {
        let tex = textures();
        let mut wheel = ProjectileWheel::new(tex.sheet(SheetId::Bullet), 15, 0);
        let mut row = formation(&tex);
        let mut boom = Explosion::new(tex.sheet(SheetId::Explosion));
        let mut score = 0;
        for i in 0..9 {
            row.mark_destroyed(i);
        }
        row.recompute_empty();
        let pos = row.members()[9].pos;
        let mut ship = player(&tex);
        ship.pos = IVec2::new(pos.x + 20 - 32, pos.y + 30);
        wheel.fire(&ship);

        assert!(wheel.check_collisions(&mut row, &mut boom, &mut score));
        assert!(row.is_empty());

        // Empty rows are skipped outright
        ship.pos = IVec2::new(pos.x, pos.y + 30);
        wheel.fire(&ship);
        assert!(!wheel.check_collisions(&mut row, &mut boom, &mut score));
        assert_eq!(wheel.active_count(), 1);
    }
}
