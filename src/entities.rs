/// Shared entity vocabulary: weapon kinds, game modes, match outcomes and the
/// static platform geometry every moving entity collides against.

use glam::Vec2;

use crate::constants::PLATFORM_HEIGHT;

/// Player 1 is always present; player 2 only in multiplayer.
pub type PlayerId = u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponKind {
    Sword,
    Gun,
    Grenade,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Sword, WeaponKind::Gun, WeaponKind::Grenade];

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Sword => "Sword",
            WeaponKind::Gun => "Gun",
            WeaponKind::Grenade => "Grenade",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    SinglePlayer,
    Multiplayer,
    GameOver,
}

impl GameMode {
    /// True for the two modes in which the simulation advances.
    pub fn is_playing(&self) -> bool {
        matches!(self, GameMode::SinglePlayer | GameMode::Multiplayer)
    }
}

/// How a finished match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Multiplayer: the sole survivor.
    Winner(PlayerId),
    /// Multiplayer: both players died in the same frame.
    Draw,
    /// Single player: the player ran out of health.
    Defeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// −1.0 for left, 1.0 for right.
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

// ── Platforms ─────────────────────────────────────────────────────────────────

/// A static, axis-aligned slab.  `pos` is the slab centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub pos: Vec2,
    pub width: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        debug_assert!(width > 0.0);
        Platform {
            pos: Vec2::new(x, y),
            width,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Y of the walkable surface.
    pub fn top(&self) -> f32 {
        self.pos.y + PLATFORM_HEIGHT / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y - PLATFORM_HEIGHT / 2.0
    }

    /// True when a body of half-width `half` centred on `x` overlaps the
    /// platform horizontally.
    pub fn overlaps_x(&self, x: f32, half: f32) -> bool {
        x + half > self.left() && x - half < self.right()
    }

    /// True when `foot` lies inside the platform's vertical band.
    pub fn holds_foot(&self, foot: f32) -> bool {
        foot <= self.top() && foot >= self.bottom()
    }
}

/// Lands a falling square body of half-size `half` on any platform whose top
/// band contains its feet.  Platforms are checked in order against the
/// pre-landing state, so with overlapping slabs the last match wins.  Only
/// downward motion is caught; there is no ceiling or side collision.
/// Returns whether the body is supported.
pub fn land_on_platforms(pos: &mut Vec2, vel: &mut Vec2, half: f32, platforms: &[Platform]) -> bool {
    let falling = vel.y < 0.0;
    let foot = pos.y - half;
    let mut grounded = false;
    for platform in platforms {
        if falling && platform.overlaps_x(pos.x, half) && platform.holds_foot(foot) {
            pos.y = platform.top() + half;
            vel.y = 0.0;
            grounded = true;
        }
    }
    grounded
}
