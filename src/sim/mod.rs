//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (formations top to bottom, members by slot)
//! - No rendering or platform dependencies

pub mod actor;
pub mod animation;
pub mod collision;
pub mod effects;
pub mod formation;
pub mod projectile;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorKind, AlienColor};
pub use animation::Animator;
pub use collision::{check_collision, rects_overlap};
pub use effects::{Background, Explosion};
pub use formation::{Formation, FormationLayout, Rank, round_speed};
pub use projectile::ProjectileWheel;
pub use state::{GamePhase, GameState, Snapshot};
pub use tick::{Flow, TickInput, tick};
