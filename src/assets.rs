//! Sprite sheet registry with two-phase initialization
//!
//! Actors are built from a [`SpriteSheet`], and sheets only exist inside an
//! initialized [`Textures`]. A [`PendingTextures`] must be exchanged through
//! [`PendingTextures::initialize`] first, so building an actor before its
//! texture is loaded cannot be expressed.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rect;

/// Startup failures. None of these can happen once a session is running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("failed to load sprite sheet {sheet:?} from '{path}': {reason}")]
    Load {
        sheet: SheetId,
        path: &'static str,
        reason: String,
    },
    #[error("sprite sheet {sheet:?} is {width}x{height}, too small for a {frames}x{rows} grid")]
    BadDimensions {
        sheet: SheetId,
        width: i32,
        height: i32,
        frames: u32,
        rows: u32,
    },
    #[error("invalid transparency color '{0}', expected #RRGGBB")]
    BadColor(String),
}

/// Every sheet the simulation draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetId {
    Alien,
    Bullet,
    Player,
    Explosion,
    Background,
}

impl SheetId {
    pub const ALL: [SheetId; 5] = [
        SheetId::Alien,
        SheetId::Bullet,
        SheetId::Player,
        SheetId::Explosion,
        SheetId::Background,
    ];

    /// Asset path handed to the provider
    pub fn path(self) -> &'static str {
        match self {
            SheetId::Alien => "graphics/ufos.bmp",
            SheetId::Bullet => "graphics/bullet.bmp",
            SheetId::Player => "graphics/sprite.bmp",
            SheetId::Explosion => "graphics/explosion.bmp",
            SheetId::Background => "graphics/bg.bmp",
        }
    }

    /// Grid layout of the sheet: (frames across, variant rows down, frame delay)
    pub fn layout(self) -> (u32, u32, u32) {
        match self {
            // Alien frame delay is randomized per alien at spawn
            SheetId::Alien => (2, crate::consts::ALIEN_COLORS as u32, 0),
            SheetId::Bullet => (1, 1, 0),
            SheetId::Player => (16, 1, 2),
            SheetId::Explosion => (8, 1, 1),
            SheetId::Background => (1, 1, 0),
        }
    }
}

/// Opaque handle owned by the external renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Color keyed out as transparent when the sheet is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, AssetError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let bad = || AssetError::BadColor(hex.to_string());
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

/// What a provider returns for one loaded sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedTexture {
    pub handle: TextureHandle,
    pub width: i32,
    pub height: i32,
}

/// External collaborator that turns a sheet id into a drawable texture
pub trait TextureProvider {
    fn load(&mut self, sheet: SheetId, transparent: Rgb) -> Result<LoadedTexture, AssetError>;
}

/// A loaded sheet plus the grid geometry actors are cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub id: SheetId,
    pub handle: TextureHandle,
    pub frames: u32,
    pub rows: u32,
    pub frame_delay: u32,
    frame_size: IVec2,
}

impl SpriteSheet {
    fn from_loaded(id: SheetId, loaded: LoadedTexture) -> Result<Self, AssetError> {
        let (frames, rows, frame_delay) = id.layout();
        let width = loaded.width / frames as i32;
        let height = loaded.height / rows as i32;
        if width <= 0 || height <= 0 {
            return Err(AssetError::BadDimensions {
                sheet: id,
                width: loaded.width,
                height: loaded.height,
                frames,
                rows,
            });
        }
        Ok(Self {
            id,
            handle: loaded.handle,
            frames,
            rows,
            frame_delay,
            frame_size: IVec2::new(width, height),
        })
    }

    /// Size of a single frame
    #[inline]
    pub fn frame_size(&self) -> IVec2 {
        self.frame_size
    }

    /// Source rectangle of a frame on a variant row
    pub fn source_rect(&self, frame: u32, row: u32) -> Rect {
        Rect::new(
            frame as i32 * self.frame_size.x,
            row as i32 * self.frame_size.y,
            self.frame_size.x,
            self.frame_size.y,
        )
    }
}

/// Sheets that have not been loaded yet
#[derive(Debug, Clone)]
pub struct PendingTextures {
    transparent: Rgb,
}

impl PendingTextures {
    pub fn new(transparent_hex: &str) -> Result<Self, AssetError> {
        Ok(Self {
            transparent: Rgb::from_hex(transparent_hex)?,
        })
    }

    /// Load every sheet. Any failure aborts startup.
    pub fn initialize(self, provider: &mut impl TextureProvider) -> Result<Textures, AssetError> {
        let mut load = |id: SheetId| -> Result<SpriteSheet, AssetError> {
            let loaded = provider.load(id, self.transparent)?;
            let sheet = SpriteSheet::from_loaded(id, loaded)?;
            log::debug!(
                "Loaded {:?} sheet ({}x{} per frame)",
                id,
                sheet.frame_size.x,
                sheet.frame_size.y
            );
            Ok(sheet)
        };

        let textures = Textures {
            alien: load(SheetId::Alien)?,
            bullet: load(SheetId::Bullet)?,
            player: load(SheetId::Player)?,
            explosion: load(SheetId::Explosion)?,
            background: load(SheetId::Background)?,
        };
        log::info!("Sprite sheets initialized");
        Ok(textures)
    }
}

/// Initialized sheets, the only source of [`SpriteSheet`] values
#[derive(Debug, Clone)]
pub struct Textures {
    alien: SpriteSheet,
    bullet: SpriteSheet,
    player: SpriteSheet,
    explosion: SpriteSheet,
    background: SpriteSheet,
}

impl Textures {
    pub fn sheet(&self, id: SheetId) -> &SpriteSheet {
        match id {
            SheetId::Alien => &self.alien,
            SheetId::Bullet => &self.bullet,
            SheetId::Player => &self.player,
            SheetId::Explosion => &self.explosion,
            SheetId::Background => &self.background,
        }
    }
}

/// Provider with fixed sheet dimensions, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct HeadlessProvider {
    /// Sheet that reports a load failure, if any
    pub fail_on: Option<SheetId>,
}

impl HeadlessProvider {
    /// Full sheet size in pixels
    pub fn dimensions(sheet: SheetId) -> (i32, i32) {
        match sheet {
            // 40x40 aliens, two frames, nine colors
            SheetId::Alien => (80, 360),
            SheetId::Bullet => (8, 24),
            // 64x64 ship, sixteen frames
            SheetId::Player => (1024, 64),
            SheetId::Explosion => (512, 64),
            SheetId::Background => (1600, 900),
        }
    }
}

impl TextureProvider for HeadlessProvider {
    fn load(&mut self, sheet: SheetId, _transparent: Rgb) -> Result<LoadedTexture, AssetError> {
        if self.fail_on == Some(sheet) {
            return Err(AssetError::Load {
                sheet,
                path: sheet.path(),
                reason: "headless provider configured to fail".to_string(),
            });
        }
        let (width, height) = Self::dimensions(sheet);
        let handle = SheetId::ALL
            .iter()
            .position(|s| *s == sheet)
            .unwrap_or_default() as u32;
        Ok(LoadedTexture {
            handle: TextureHandle(handle),
            width,
            height,
        })
    }
}
