/// Short-lived world objects: weapon pickups, bullets, grenades and the
/// explosions grenades leave behind.  Each owns its own lifetime rule; the
/// `Game` decides when to remove them.

use glam::Vec2;
use rand::Rng;

use crate::constants::{
    ARENA_WIDTH, BLAST_DAMAGE, BLAST_RADIUS, BULLET_LIFETIME, BULLET_SPEED, EXPLOSION_GROWTH,
    EXPLOSION_START_RADIUS, GRAVITY, GRENADE_BOUNCE, GRENADE_FRICTION, GRENADE_FUSE,
    GRENADE_LIFT, GRENADE_RADIUS, GRENADE_SPEED, WEAPON_LIFETIME,
};
use crate::entities::{Facing, Platform, PlayerId, WeaponKind};

fn inside_arena(x: f32) -> bool {
    -ARENA_WIDTH / 2.0 < x && x < ARENA_WIDTH / 2.0
}

// ── Weapon pickups ────────────────────────────────────────────────────────────

const PULSE_RATE: f32 = 2.0;
const PULSE_PEAK: f32 = 0.2;
const PICKUP_SPIN: f32 = 45.0;

#[derive(Clone, Debug)]
pub struct WeaponPickup {
    pub pos: Vec2,
    pub z: f32,
    pub kind: WeaponKind,
    /// Simulation time the pickup appeared.
    pub spawn_time: f32,
    pub pulse: f32,
    pub growing: bool,
    pub rotation: f32,
}

impl WeaponPickup {
    pub fn new(pos: Vec2, kind: WeaponKind, spawn_time: f32) -> Self {
        WeaponPickup {
            pos,
            z: 0.0,
            kind,
            spawn_time,
            pulse: 0.0,
            growing: true,
            rotation: 0.0,
        }
    }

    /// A pickup of random kind with a small random depth offset.
    pub fn random(pos: Vec2, spawn_time: f32, rng: &mut impl Rng) -> Self {
        let kind = WeaponKind::ALL[rng.gen_range(0..WeaponKind::ALL.len())];
        WeaponPickup {
            z: rng.gen_range(-5.0..5.0),
            ..WeaponPickup::new(pos, kind, spawn_time)
        }
    }

    pub fn is_active(&self, now: f32) -> bool {
        now - self.spawn_time < WEAPON_LIFETIME
    }

    /// Cosmetic pulse and spin; no gameplay effect.
    pub fn update(&mut self, dt: f32) {
        if self.growing {
            self.pulse += dt * PULSE_RATE;
            if self.pulse >= PULSE_PEAK {
                self.growing = false;
            }
        } else {
            self.pulse -= dt * PULSE_RATE;
            if self.pulse <= 0.0 {
                self.growing = true;
            }
        }
        self.rotation = (self.rotation + dt * PICKUP_SPIN) % 360.0;
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub pos: Vec2,
    /// Horizontal only.
    pub vx: f32,
    pub owner: PlayerId,
    /// Seconds left before the bullet fizzles.
    pub lifetime: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, facing: Facing, owner: PlayerId) -> Self {
        Bullet {
            pos,
            vx: facing.sign() * BULLET_SPEED,
            owner,
            lifetime: BULLET_LIFETIME,
        }
    }

    /// Moves the bullet and reports whether it is still live.
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos.x += self.vx * dt;
        self.lifetime -= dt;
        self.lifetime > 0.0 && inside_arena(self.pos.x)
    }
}

// ── Grenades ──────────────────────────────────────────────────────────────────

/// Result of one grenade tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrenadeTick {
    Flying,
    /// The fuse ran out this tick.  Reported exactly once.
    Detonate,
    /// Already exploded, or left the arena without exploding.
    Gone,
}

#[derive(Clone, Debug)]
pub struct Grenade {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: PlayerId,
    /// Seconds left on the fuse.
    pub timer: f32,
    pub exploded: bool,
    pub rotation: f32,
}

impl Grenade {
    pub fn new(pos: Vec2, facing: Facing, owner: PlayerId) -> Self {
        Grenade {
            pos,
            vel: Vec2::new(facing.sign() * GRENADE_SPEED, GRENADE_LIFT),
            owner,
            timer: GRENADE_FUSE,
            exploded: false,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, platforms: &[Platform]) -> GrenadeTick {
        if self.exploded {
            return GrenadeTick::Gone;
        }

        self.timer -= dt;
        self.rotation = (self.rotation + dt * 360.0) % 360.0;

        if self.timer <= 0.0 {
            self.exploded = true;
            return GrenadeTick::Detonate;
        }

        self.vel.y -= GRAVITY * 2.0;
        self.pos += self.vel * dt;

        for platform in platforms {
            let inside = self.pos.x > platform.left() && self.pos.x < platform.right();
            if inside && platform.holds_foot(self.pos.y - GRENADE_RADIUS) && self.vel.y < 0.0 {
                self.pos.y = platform.top() + GRENADE_RADIUS;
                self.bounce();
            }
        }

        if inside_arena(self.pos.x) {
            GrenadeTick::Flying
        } else {
            GrenadeTick::Gone
        }
    }

    /// Reflect and damp after hitting a surface.
    pub fn bounce(&mut self) {
        self.vel.y *= -GRENADE_BOUNCE;
        self.vel.x *= GRENADE_FRICTION;
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

/// Damage dealt by a blast to something `distance` away from its centre.
/// Falls off linearly and is floored; zero at or beyond the blast radius.
pub fn blast_damage(distance: f32) -> u32 {
    if distance >= BLAST_RADIUS {
        return 0;
    }
    (BLAST_DAMAGE * (1.0 - distance / BLAST_RADIUS)).floor() as u32
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub active: bool,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Explosion {
            pos,
            radius: EXPLOSION_START_RADIUS,
            max_radius: BLAST_RADIUS,
            active: true,
        }
    }

    /// Grows the blast; returns false once it is fully expanded.
    pub fn update(&mut self, dt: f32) -> bool {
        self.radius = (self.radius + EXPLOSION_GROWTH * dt).min(self.max_radius);
        if self.radius >= self.max_radius {
            self.active = false;
        }
        self.active
    }

    /// 1.0 when fresh, approaching 0.0 as the blast reaches full size.
    pub fn intensity(&self) -> f32 {
        1.0 - self.radius / self.max_radius
    }
}
