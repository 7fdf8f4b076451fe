/// Single-player bots.  They steer straight at their target with a little
/// random wobble and bite on contact.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, ENEMY_ATTACK_COOLDOWN, ENEMY_DAMAGE, ENEMY_JUMP_CHANCE,
    ENEMY_JUMP_RANGE, ENEMY_SIZE, ENEMY_SPEED, ENEMY_Y_MARGIN, GRAVITY, JUMP_FORCE, PLAYER_SIZE,
};
use crate::entities::{land_on_platforms, Platform};
use crate::player::Player;

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    /// Cosmetic depth.
    pub z: f32,
    pub vel: Vec2,
    pub size: f32,
    /// Seconds until the next contact hit is allowed.
    pub attack_cooldown: f32,
    pub on_ground: bool,
    pub wing_phase: f32,
    pub body_angle: f32,
    pub eye_offset: f32,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Enemy {
            pos,
            z: 0.0,
            vel: Vec2::ZERO,
            size: ENEMY_SIZE,
            attack_cooldown: 0.0,
            on_ground: false,
            wing_phase: 0.0,
            body_angle: 0.0,
            eye_offset: 0.0,
        }
    }

    /// A fresh enemy with randomised heading and animation phases.
    pub fn spawn(pos: Vec2, rng: &mut impl Rng) -> Self {
        let heading = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
        Enemy {
            z: rng.gen_range(-20.0..20.0),
            vel: Vec2::new(heading * ENEMY_SPEED, 0.0),
            wing_phase: rng.gen_range(0.0..TAU),
            eye_offset: rng.gen_range(0.0..TAU),
            ..Enemy::new(pos)
        }
    }

    /// Chase `target` for one tick.  Returns true when the enemy landed a
    /// contact hit this tick.
    pub fn update(
        &mut self,
        dt: f32,
        platforms: &[Platform],
        target: &mut Player,
        rng: &mut impl Rng,
    ) -> bool {
        let offset = target.pos - self.pos;
        let distance = offset.length();
        let heading = offset.normalize_or_zero();

        let jitter = 0.8 + 0.4 * rng.gen::<f32>();
        self.vel.x = heading.x * ENEMY_SPEED * jitter;
        self.vel.y = heading.y * ENEMY_SPEED * 0.5 - GRAVITY * 0.5;

        if distance < ENEMY_JUMP_RANGE && self.on_ground && rng.gen_bool(ENEMY_JUMP_CHANCE) {
            self.vel.y = JUMP_FORCE * 0.7;
            self.on_ground = false;
        }

        self.pos += self.vel * dt;
        self.body_angle = (self.body_angle + dt * 30.0) % 360.0;

        self.pos.x = self.pos.x.clamp(-ARENA_WIDTH / 2.0, ARENA_WIDTH / 2.0);
        self.pos.y = self.pos.y.clamp(
            -ARENA_HEIGHT / 2.0 + ENEMY_Y_MARGIN,
            ARENA_HEIGHT / 2.0 - ENEMY_Y_MARGIN,
        );

        self.on_ground = land_on_platforms(&mut self.pos, &mut self.vel, self.size / 2.0, platforms);

        self.wing_phase = (self.wing_phase + dt * 10.0) % TAU;
        self.eye_offset = (self.eye_offset + dt * 2.0) % TAU;

        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        if distance < self.size + PLAYER_SIZE && self.attack_cooldown <= 0.0 {
            target.take_damage(ENEMY_DAMAGE);
            self.attack_cooldown = ENEMY_ATTACK_COOLDOWN;
            return true;
        }
        false
    }
}
