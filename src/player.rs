/// Player avatar: health, held weapon, sword swing and platform-aware
/// vertical motion.

use glam::Vec2;

use crate::constants::{
    GRAVITY, JUMP_FORCE, MAX_HEALTH, PLAYER_SIZE, PLAYER_SPEED, SHOT_DELAY, SWING_HIT_ANGLE,
    SWING_LIMIT, SWING_STEP, WEAPON_LIFETIME,
};
use crate::entities::{land_on_platforms, Facing, Platform, PlayerId, WeaponKind};
use crate::projectiles::{Bullet, Grenade};

/// A retracting swing within this many degrees of rest ends.
const SWING_REST: f32 = 5.0;
/// Hit flash decays at this rate per second.
const HIT_FLASH_DECAY: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Swing {
    Idle,
    Swinging { angle: f32, extending: bool },
}

impl Swing {
    fn advance(self) -> Swing {
        match self {
            Swing::Idle => Swing::Idle,
            Swing::Swinging { angle, extending } => {
                let step = if extending { SWING_STEP } else { -SWING_STEP };
                let angle = (angle + step).clamp(-SWING_LIMIT, SWING_LIMIT);
                if extending && angle.abs() >= SWING_LIMIT {
                    Swing::Swinging { angle, extending: false }
                } else if !extending && angle.abs() < SWING_REST {
                    Swing::Idle
                } else {
                    Swing::Swinging { angle, extending }
                }
            }
        }
    }
}

/// What a primary action put into the world.
#[derive(Clone, Debug)]
pub enum Launched {
    Bullet(Bullet),
    Grenade(Grenade),
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    /// Cosmetic depth.
    pub z: f32,
    pub vel: Vec2,
    pub health: u32,
    pub weapon: Option<WeaponKind>,
    /// Seconds the current weapon has been held.
    pub weapon_time: f32,
    pub facing: Facing,
    pub swing: Swing,
    pub on_ground: bool,
    /// 1.0 right after a hit, fading to 0.0.
    pub hit_effect: f32,
    /// Simulation time of the last gun shot.
    pub last_shot: Option<f32>,
}

impl Player {
    pub fn new(id: PlayerId, x: f32, y: f32) -> Self {
        Player {
            id,
            pos: Vec2::new(x, y),
            z: 0.0,
            vel: Vec2::ZERO,
            health: MAX_HEALTH,
            weapon: None,
            weapon_time: 0.0,
            facing: Facing::Right,
            swing: Swing::Idle,
            on_ground: false,
            hit_effect: 0.0,
            last_shot: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Advance one tick: gravity, integration, landing, hit flash, swing and
    /// weapon expiry.
    pub fn update(&mut self, dt: f32, platforms: &[Platform]) {
        self.vel.y -= GRAVITY;
        self.pos += self.vel * dt;

        if self.hit_effect > 0.0 {
            self.hit_effect = (self.hit_effect - dt * HIT_FLASH_DECAY).max(0.0);
        }

        self.on_ground = land_on_platforms(&mut self.pos, &mut self.vel, PLAYER_SIZE / 2.0, platforms);

        self.swing = self.swing.advance();

        if self.weapon.is_some() {
            self.weapon_time += dt;
            if self.weapon_time > WEAPON_LIFETIME {
                self.drop_weapon();
                self.swing = Swing::Idle;
            }
        }
    }

    pub fn jump(&mut self) {
        if self.on_ground {
            self.vel.y = JUMP_FORCE;
            self.on_ground = false;
        }
    }

    /// Returns true when this hit brought health to zero.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.hit_effect = 1.0;
        self.health == 0
    }

    // ── Movement input ────────────────────────────────────────────────────────

    pub fn move_toward(&mut self, facing: Facing) {
        self.vel.x = facing.sign() * PLAYER_SPEED;
        self.facing = facing;
    }

    /// Stops horizontal motion if still moving toward `released`.
    pub fn release(&mut self, released: Facing) {
        if self.vel.x * released.sign() > 0.0 {
            self.vel.x = 0.0;
        }
    }

    // ── Weapons ───────────────────────────────────────────────────────────────

    pub fn grant_weapon(&mut self, kind: WeaponKind) {
        self.weapon = Some(kind);
        self.weapon_time = 0.0;
    }

    pub fn drop_weapon(&mut self) {
        self.weapon = None;
        self.weapon_time = 0.0;
    }

    /// Whole seconds left on the held weapon.
    pub fn weapon_seconds_left(&self) -> Option<u32> {
        self.weapon
            .map(|_| (WEAPON_LIFETIME - self.weapon_time.trunc()).max(0.0) as u32)
    }

    pub fn is_swinging(&self) -> bool {
        matches!(self.swing, Swing::Swinging { .. })
    }

    pub fn swing_angle(&self) -> f32 {
        match self.swing {
            Swing::Idle => 0.0,
            Swing::Swinging { angle, .. } => angle,
        }
    }

    /// The sword only connects in the outer part of its arc.
    pub fn in_swing_window(&self) -> bool {
        self.swing_angle().abs() > SWING_HIT_ANGLE
    }

    /// Where projectiles leave the player.
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.facing.sign() * PLAYER_SIZE / 2.0, self.pos.y)
    }

    /// Trigger the held weapon at simulation time `now`.  A sword starts a
    /// swing, a gun fires if its cooldown has passed and a grenade is thrown
    /// and consumed.
    pub fn primary_action(&mut self, now: f32) -> Option<Launched> {
        match self.weapon? {
            WeaponKind::Sword => {
                if !self.is_swinging() {
                    self.swing = Swing::Swinging {
                        angle: 0.0,
                        extending: true,
                    };
                }
                None
            }
            WeaponKind::Gun => {
                let ready = self.last_shot.map_or(true, |t| now - t > SHOT_DELAY);
                if !ready {
                    return None;
                }
                self.last_shot = Some(now);
                Some(Launched::Bullet(Bullet::new(self.muzzle(), self.facing, self.id)))
            }
            WeaponKind::Grenade => {
                self.drop_weapon();
                Some(Launched::Grenade(Grenade::new(self.muzzle(), self.facing, self.id)))
            }
        }
    }
}
