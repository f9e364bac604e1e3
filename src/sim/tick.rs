//! Fixed-step simulation tick
//!
//! One call advances the whole session by one frame. Order within a tick:
//! input, player movement, animation, formations, bullets, collisions, then
//! round and life transitions.

use super::actor::{self, Actor};
use super::state::{GamePhase, GameState};
use crate::Direction;

/// Key states sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Fire during play; a fresh press also acts as "start" on menus
    pub fire: bool,
    pub quit: bool,
}

/// Whether the caller should keep ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Advance the session by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) -> Flow {
    if input.quit {
        if !state.quit_requested {
            log::info!("Quit requested at tick {}", state.time_ticks);
        }
        state.quit_requested = true;
        return Flow::Exit;
    }
    if state.is_finished() {
        return Flow::Exit;
    }

    let start_pressed = input.fire && !state.fire_held;
    state.fire_held = input.fire;
    state.time_ticks += 1;

    // The ship can roam before the round starts too
    let screen_width = state.settings.screen_width;
    move_player(&mut state.player, input, screen_width);
    actor::animate(&mut state.player);
    state.background.scroll();

    match state.phase {
        GamePhase::Menu => {
            if start_pressed {
                state.reset_player_position();
                state.phase = GamePhase::RoundBanner {
                    round: state.current_round,
                };
                log::info!("Game started");
            }
        }
        GamePhase::RoundBanner { round } => {
            if start_pressed {
                state.reset_player_position();
                state.phase = GamePhase::Active;
                log::info!("Round {} started", round);
            }
        }
        GamePhase::Active => play(state, input.fire),
        GamePhase::Win | GamePhase::Lose => {}
    }

    if state.is_finished() {
        Flow::Exit
    } else {
        Flow::Continue
    }
}

fn move_player(player: &mut Actor, input: &TickInput, screen_width: i32) {
    if input.left {
        player.direction = Direction::Left;
        actor::step(player, screen_width);
    }
    if input.right {
        player.direction = Direction::Right;
        actor::step(player, screen_width);
    }
}

/// One tick of live play
fn play(state: &mut GameState, fire: bool) {
    if fire {
        state.wheel.fire(&state.player);
    }

    for formation in &mut state.formations {
        formation.update();
    }
    state.wheel.update();
    state.explosion.update();

    // Bottom row first, it is the likeliest to be hit
    for formation in state.formations.iter_mut().rev() {
        state
            .wheel
            .check_collisions(formation, &mut state.explosion, &mut state.score);
    }

    let player_hit = state
        .formations
        .iter()
        .rev()
        .any(|formation| formation.check_collisions(&state.player));
    if player_hit {
        state.lives = state.lives.saturating_sub(1);
        state.explosion.trigger(state.player.pos);
        state.reset_formation_layouts();
        log::debug!("Player hit, {} lives left", state.lives);
    }

    if state.lives == 0 {
        state.phase = GamePhase::Lose;
        log::info!("Player loses with score {}", state.score);
        return;
    }

    if state.all_formations_empty() {
        if state.current_round >= state.settings.max_rounds {
            state.phase = GamePhase::Win;
            log::info!("Player wins with score {}", state.score);
        } else {
            state.advance_round();
        }
    }
}
