/// Simulation tuning.  Every value is a compile-time constant; nothing here
/// is read from the environment.

// ── Timing ────────────────────────────────────────────────────────────────────

/// Fixed simulation step (seconds per tick).
pub const FRAME_DT: f32 = 1.0 / 60.0;

// ── Arena ─────────────────────────────────────────────────────────────────────

pub const ARENA_WIDTH: f32 = 1000.0;
pub const ARENA_HEIGHT: f32 = 600.0;
pub const PLATFORM_HEIGHT: f32 = 10.0;
/// Width of the ledges above the ground.
pub const LEDGE_WIDTH: f32 = 200.0;

// ── Movement ──────────────────────────────────────────────────────────────────

/// Downward velocity added per tick (not scaled by dt).
pub const GRAVITY: f32 = 2.5;
pub const JUMP_FORCE: f32 = 300.0;
pub const PLAYER_SPEED: f32 = 20.0;
pub const PLAYER_SIZE: f32 = 30.0;

// ── Players & weapons ─────────────────────────────────────────────────────────

pub const MAX_HEALTH: u32 = 100;
/// Seconds a held weapon lasts, and seconds a pickup stays on the ground.
pub const WEAPON_LIFETIME: f32 = 30.0;
/// Minimum seconds between two gun shots from the same player.
pub const SHOT_DELAY: f32 = 0.2;
/// Degrees added to the swing angle per tick.
pub const SWING_STEP: f32 = 30.0;
pub const SWING_LIMIT: f32 = 90.0;
/// Swing hits only register beyond this angle.
pub const SWING_HIT_ANGLE: f32 = 45.0;
pub const SWORD_DAMAGE: u32 = 5;
pub const BULLET_DAMAGE: u32 = 5;

// ── Pickups ───────────────────────────────────────────────────────────────────

pub const MAX_PICKUPS: usize = 3;
pub const WEAPON_SPAWN_INTERVAL: f32 = 5.0;
/// Per-frame chance of attempting a pickup spawn.
pub const WEAPON_SPAWN_CHANCE: f64 = 0.01;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BULLET_SPEED: f32 = 120.0;
pub const BULLET_LIFETIME: f32 = 2.0;
pub const BULLET_RADIUS: f32 = 5.0;
pub const GRENADE_SPEED: f32 = 40.0;
pub const GRENADE_LIFT: f32 = 15.0;
pub const GRENADE_FUSE: f32 = 2.0;
pub const GRENADE_RADIUS: f32 = 8.0;
pub const GRENADE_BOUNCE: f32 = 0.6;
pub const GRENADE_FRICTION: f32 = 0.8;
pub const BLAST_RADIUS: f32 = 300.0;
pub const BLAST_DAMAGE: f32 = 25.0;
pub const EXPLOSION_START_RADIUS: f32 = 5.0;
/// Radius growth in world units per second.
pub const EXPLOSION_GROWTH: f32 = 40.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SPAWN_INTERVAL: f32 = 3.0;
pub const ENEMY_SPEED: f32 = 10.0;
pub const ENEMY_SIZE: f32 = 25.0;
pub const ENEMY_DAMAGE: u32 = 5;
pub const ENEMY_ATTACK_COOLDOWN: f32 = 1.0;
pub const ENEMY_JUMP_CHANCE: f64 = 0.02;
pub const ENEMY_JUMP_RANGE: f32 = 200.0;
/// Enemies stay this far inside the top and bottom arena edges.
pub const ENEMY_Y_MARGIN: f32 = 50.0;

// ── Scoring (single player only) ──────────────────────────────────────────────

pub const SCORE_MELEE_OR_SHOT: u32 = 5;
pub const SCORE_GRENADE_KILL: u32 = 10;
pub const SCORE_PLAYER_KILL: u32 = 10;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Exponential follow rate for the camera target.
pub const CAMERA_FOLLOW: f32 = 2.0;
