//! Render handoff
//!
//! The core never touches a graphics API. Each frame it walks the session and
//! emits one textured quad per visible sprite: which sheet, which cell of it,
//! and where on screen. Draw order is back to front.

use bytemuck::{Pod, Zeroable};

use crate::Rect;
use crate::assets::{SpriteSheet, TextureHandle};
use crate::sim::{Actor, GamePhase, GameState};

/// One sprite blit, laid out for direct upload into an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawQuad {
    pub texture: u32,
    /// Source cell on the sheet, `[x, y, w, h]`
    pub src: [i32; 4],
    /// Destination on screen, `[x, y, w, h]`
    pub dst: [i32; 4],
}

impl DrawQuad {
    pub fn new(texture: TextureHandle, src: Rect, dst: Rect) -> Self {
        Self {
            texture: texture.0,
            src: src.to_array(),
            dst: dst.to_array(),
        }
    }
}

/// Anything that can blit a rectangle of a loaded texture
pub trait Renderer {
    fn draw(&mut self, texture: TextureHandle, src: Rect, dst: Rect);
}

impl Renderer for Vec<DrawQuad> {
    fn draw(&mut self, texture: TextureHandle, src: Rect, dst: Rect) {
        self.push(DrawQuad::new(texture, src, dst));
    }
}

/// Emit every visible sprite of `state` into `renderer`
pub fn draw_frame(state: &GameState, renderer: &mut impl Renderer) {
    let background = &state.background;
    let full = full_sheet(background.sheet());
    for tile in background.tiles() {
        renderer.draw(background.sheet().handle, full, tile);
    }

    draw_actor(&state.player, renderer);

    if state.phase == GamePhase::Active {
        for formation in &state.formations {
            for (_, alien) in formation.active_members() {
                draw_actor(alien, renderer);
            }
        }
        for bullet in state.wheel.slots() {
            if bullet.is_active() {
                draw_actor(bullet, renderer);
            }
        }
        if state.explosion.is_active() {
            draw_actor(state.explosion.actor(), renderer);
        }
    }
}

/// Collect the frame as a flat quad list
pub fn collect_quads(state: &GameState) -> Vec<DrawQuad> {
    let mut quads = Vec::with_capacity(64);
    draw_frame(state, &mut quads);
    quads
}

/// Raw bytes of a quad list for GPU upload
#[inline]
pub fn quad_bytes(quads: &[DrawQuad]) -> &[u8] {
    bytemuck::cast_slice(quads)
}

fn draw_actor(actor: &Actor, renderer: &mut impl Renderer) {
    renderer.draw(actor.sheet().handle, actor.source_rect(), actor.bounds());
}

fn full_sheet(sheet: &SpriteSheet) -> Rect {
    let size = sheet.frame_size();
    Rect::new(0, 0, size.x * sheet.frames as i32, size.y * sheet.rows as i32)
}
