//! UFO Siege headless entry point
//!
//! Loads settings, initializes sprite sheets, then lets a simple autopilot
//! play one session at the fixed tick rate and prints how it ended. Window,
//! input and drawing integration live outside this crate.

use std::process::ExitCode;

use ufo_siege::{
    PendingTextures, Settings,
    assets::{AssetError, HeadlessProvider},
    render,
    sim::{Flow, GamePhase, GameState, TickInput, tick},
};

/// Hard stop for a session, five minutes at 60 ticks per second
const MAX_TICKS: u64 = 60 * 60 * 5;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("UFO Siege (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(std::path::PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(clock_seed);

    let mut state = match init(settings, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    let mut quads = Vec::new();
    while state.time_ticks < MAX_TICKS {
        let input = autopilot(&state);
        if tick(&mut state, &input) == Flow::Exit {
            break;
        }
        quads.clear();
        render::draw_frame(&state, &mut quads);
        if state.time_ticks % 600 == 0 {
            log::debug!(
                "tick {}: {} quads, {}",
                state.time_ticks,
                quads.len(),
                state.snapshot().title()
            );
        }
    }

    let snapshot = state.snapshot();
    println!("{}", snapshot.title());
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize snapshot: {}", e),
    }
    ExitCode::SUCCESS
}

fn init(settings: Settings, seed: u64) -> Result<GameState, AssetError> {
    let textures =
        PendingTextures::new(&settings.transparent_key)?.initialize(&mut HeadlessProvider::default())?;
    Ok(GameState::new(&textures, settings, seed))
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Chase the lowest live alien and shoot when lined up under it
fn autopilot(state: &GameState) -> TickInput {
    if state.phase != GamePhase::Active {
        // Tap fire on alternate ticks so menus see a fresh press
        return TickInput {
            fire: state.time_ticks % 2 == 0,
            ..Default::default()
        };
    }

    let center = state.player.pos.x + state.player.width() / 2;
    let target = state
        .formations
        .iter()
        .rev()
        .find(|f| !f.is_empty())
        .and_then(|f| {
            f.active_members()
                .map(|(_, alien)| alien.pos.x + alien.width() / 2)
                .min_by_key(|x| (x - center).abs())
        });

    let Some(target) = target else {
        return TickInput::default();
    };
    let offset = target - center;
    let slack = state.player.speed;
    TickInput {
        left: offset < -slack,
        right: offset > slack,
        fire: offset.abs() <= state.player.width() / 2,
        quit: false,
    }
}
