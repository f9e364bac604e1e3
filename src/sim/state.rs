//! Session state and round bookkeeping
//!
//! One `GameState` owns everything a running session touches: the player,
//! the four formations, the bullet pool, effects, and the seeded RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, player_home};
use super::effects::{Background, Explosion};
use super::formation::{Formation, FormationLayout, Rank};
use super::projectile::ProjectileWheel;
use crate::assets::{SheetId, Textures};
use crate::consts::FORMATION_COUNT;
use crate::settings::Settings;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Round announcement, waiting for start
    RoundBanner { round: u32 },
    /// Aliens marching, bullets flying
    Active,
    /// Every round cleared
    Win,
    /// Out of lives
    Lose,
}

impl GamePhase {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Win | GamePhase::Lose)
    }
}

/// Read-only view for HUD and window-title display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub lives: u32,
    pub current_round: u32,
    pub win: bool,
    pub lose: bool,
}

impl Snapshot {
    pub fn title(&self) -> String {
        format!(
            "Player Score: {}    |    Lives Remaining: {}",
            self.score, self.lives
        )
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// 1-based round number
    pub current_round: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Actor,
    /// Top to bottom, indexed by rank
    pub formations: [Formation; FORMATION_COUNT],
    pub wheel: ProjectileWheel,
    pub explosion: Explosion,
    pub background: Background,
    /// Fire key state last tick, for start-press edge detection
    pub(crate) fire_held: bool,
    pub(crate) quit_requested: bool,
}

impl GameState {
    /// Build a fresh session sitting at the menu
    pub fn new(textures: &Textures, settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let layout = FormationLayout::from_settings(&settings);
        let alien_sheet = textures.sheet(SheetId::Alien);
        let formations = Rank::ALL.map(|rank| {
            Formation::new(
                rank,
                alien_sheet,
                settings.alien_base_speed,
                layout,
                &mut rng,
            )
        });

        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            score: 0,
            lives: settings.starting_lives,
            current_round: 1,
            time_ticks: 0,
            player: Actor::player(
                textures.sheet(SheetId::Player),
                settings.player_speed,
                settings.screen(),
            ),
            formations,
            wheel: ProjectileWheel::new(
                textures.sheet(SheetId::Bullet),
                settings.bullet_speed,
                settings.bullet_cooldown,
            ),
            explosion: Explosion::new(textures.sheet(SheetId::Explosion)),
            background: Background::new(
                textures.sheet(SheetId::Background),
                settings.scroll_speed,
                settings.screen(),
            ),
            fire_held: false,
            quit_requested: false,
            settings,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            lives: self.lives,
            current_round: self.current_round,
            win: self.phase == GamePhase::Win,
            lose: self.phase == GamePhase::Lose,
        }
    }

    /// True once the session reached Win/Lose or the player quit
    pub fn is_finished(&self) -> bool {
        self.quit_requested || self.phase.is_terminal()
    }

    pub fn all_formations_empty(&self) -> bool {
        self.formations.iter().all(Formation::is_empty)
    }

    /// Put the ship back at the bottom center
    pub fn reset_player_position(&mut self) {
        self.player.pos = player_home(self.player.size(), self.settings.screen());
    }

    /// Re-lay every formation after a life is lost. Destroyed aliens stay destroyed.
    pub fn reset_formation_layouts(&mut self) {
        for formation in &mut self.formations {
            formation.reset_location();
        }
    }

    /// Enter the banner for the next round with a repopulated, faster field
    pub(crate) fn advance_round(&mut self) {
        self.current_round += 1;
        self.background.speed_up(self.settings.scroll_speed_step);
        for formation in &mut self.formations {
            formation.reset_round(
                self.current_round,
                self.settings.alien_base_speed,
                &mut self.rng,
            );
        }
        self.reset_player_position();
        self.phase = GamePhase::RoundBanner {
            round: self.current_round,
        };
        log::info!("Round {} ready", self.current_round);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{HeadlessProvider, PendingTextures};

    fn textures() -> Textures {
        PendingTextures::new("#000000")
            .unwrap()
            .initialize(&mut HeadlessProvider::default())
            .unwrap()
    }

    #[test]
    fn test_new_session() {
        let state = GameState::new(&textures(), Settings::default(), 1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.lives, 3);
        assert_eq!(state.current_round, 1);
        assert_eq!(state.score, 0);
        assert!(!state.all_formations_empty());
        for (i, formation) in state.formations.iter().enumerate() {
            assert_eq!(formation.rank().index(), i);
        }
        assert_eq!(state.wheel.active_count(), 0);
        assert!(!state.is_finished());
    }

    #[test]
    fn test_same_seed_same_field() {
        let tex = textures();
        let a = GameState::new(&tex, Settings::default(), 42);
        let b = GameState::new(&tex, Settings::default(), 42);
        for (fa, fb) in a.formations.iter().zip(&b.formations) {
            for (ma, mb) in fa.members().iter().zip(fb.members()) {
                assert_eq!(ma.kind, mb.kind);
                assert_eq!(ma.anim, mb.anim);
            }
        }
    }

    #[test]
    fn test_advance_round() {
        let mut state = GameState::new(&textures(), Settings::default(), 3);
        let scroll = state.background.scroll_speed();
        state.player.pos.x = 0;
        state.advance_round();
        assert_eq!(state.current_round, 2);
        assert_eq!(state.phase, GamePhase::RoundBanner { round: 2 });
        assert_eq!(state.background.scroll_speed(), scroll + 2);
        assert_eq!(state.player.pos.x, (1600 - 64) / 2);
        assert!(state.formations.iter().all(|f| !f.is_empty()));
    }

    #[test]
    fn test_snapshot_title() {
        let mut state = GameState::new(&textures(), Settings::default(), 3);
        state.score = 12;
        state.lives = 2;
        let snap = state.snapshot();
        assert_eq!(snap.title(), "Player Score: 12    |    Lives Remaining: 2");
        assert!(!snap.win && !snap.lose);
    }
}
