/// The match orchestrator.
///
/// `Game` owns every entity collection and is the only thing that inserts
/// into or removes from them.  The driver calls `update` once per frame and
/// hands a shared reference to the renderer afterwards.  All randomness comes
/// from the owned `StdRng`, so a seeded game replays identically.

use glam::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arena::{self, Arena};
use crate::constants::{
    BLAST_RADIUS, BULLET_DAMAGE, BULLET_RADIUS, CAMERA_FOLLOW, ENEMY_SPAWN_INTERVAL, MAX_PICKUPS,
    PLAYER_SIZE, SCORE_GRENADE_KILL, SCORE_MELEE_OR_SHOT, SCORE_PLAYER_KILL, SWORD_DAMAGE,
    WEAPON_SPAWN_CHANCE, WEAPON_SPAWN_INTERVAL,
};
use crate::enemy::Enemy;
use crate::entities::{Facing, GameMode, Outcome, PlayerId};
use crate::player::{Launched, Player};
use crate::projectiles::{blast_damage, Bullet, Explosion, Grenade, GrenadeTick, WeaponPickup};

/// Sword reach between player centres.
const SWORD_REACH: f32 = PLAYER_SIZE * 1.5;

/// Drops every element whose flag in `removed` is set.  `removed` must be
/// index-aligned with `items`.
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}

/// Points and kills earned during one collision pass.
#[derive(Default)]
struct Tally {
    score: u32,
    enemies: u32,
}

pub struct Game {
    pub mode: GameMode,
    pub arena: Arena,
    players: Vec<Player>,
    enemies: Vec<Enemy>,
    pickups: Vec<WeaponPickup>,
    bullets: Vec<Bullet>,
    grenades: Vec<Grenade>,
    explosions: Vec<Explosion>,
    /// Single-player score.
    pub score: u32,
    pub enemies_defeated: u32,
    /// Seconds of simulation since the match started.
    pub game_time: f32,
    pub last_weapon_spawn: Option<f32>,
    pub last_enemy_spawn: Option<f32>,
    /// Smoothed follow target for the renderer.
    pub camera: Vec2,
    /// Set when the match ends.
    pub outcome: Option<Outcome>,
    rng: StdRng,
}

impl Game {
    pub fn new() -> Self {
        Game::with_rng(StdRng::from_entropy())
    }

    /// A game whose random choices replay identically for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Game::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut game = Game {
            mode: GameMode::Menu,
            arena: Arena::standard(),
            players: Vec::new(),
            enemies: Vec::new(),
            pickups: Vec::new(),
            bullets: Vec::new(),
            grenades: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            enemies_defeated: 0,
            game_time: 0.0,
            last_weapon_spawn: None,
            last_enemy_spawn: None,
            camera: Vec2::ZERO,
            outcome: None,
            rng,
        };
        game.setup_arena();
        game
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    fn setup_arena(&mut self) {
        self.arena = Arena::standard();
        self.enemies.clear();
        self.pickups.clear();
        self.bullets.clear();
        self.grenades.clear();
        self.explosions.clear();

        let spawn = arena::player_spawn(1);
        self.players = vec![Player::new(1, spawn.x, spawn.y)];
        if self.mode == GameMode::Multiplayer {
            let spawn = arena::player_spawn(2);
            self.players.push(Player::new(2, spawn.x, spawn.y));
        }
    }

    /// Clears the match and rebuilds the arena for the current mode.
    pub fn reset(&mut self) {
        self.score = 0;
        self.enemies_defeated = 0;
        self.game_time = 0.0;
        self.last_weapon_spawn = None;
        self.last_enemy_spawn = None;
        self.camera = Vec2::ZERO;
        self.outcome = None;
        self.setup_arena();
        debug!("arena reset for {:?}", self.mode);
    }

    /// Enters `mode` with a fresh arena.
    pub fn start(&mut self, mode: GameMode) {
        info!("entering {:?}", mode);
        self.mode = mode;
        self.reset();
    }

    pub fn back_to_menu(&mut self) {
        self.start(GameMode::Menu);
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(
            "game over: {:?} after {:.1}s, score {}",
            outcome, self.game_time, self.score
        );
        self.mode = GameMode::GameOver;
        self.outcome = Some(outcome);
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players can be adjusted in place but never added or removed.
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn pickups(&self) -> &[WeaponPickup] {
        &self.pickups
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn grenades(&self) -> &[Grenade] {
        &self.grenades
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Player 1 takes input in either playing mode; player 2 only in
    /// multiplayer.
    fn controllable(&mut self, id: PlayerId) -> Option<&mut Player> {
        let allowed = match self.mode {
            GameMode::SinglePlayer => id == 1,
            GameMode::Multiplayer => true,
            GameMode::Menu | GameMode::GameOver => false,
        };
        if allowed {
            self.player_mut(id)
        } else {
            None
        }
    }

    // ── Player actions ────────────────────────────────────────────────────────

    pub fn steer(&mut self, id: PlayerId, facing: Facing) {
        if let Some(player) = self.controllable(id) {
            player.move_toward(facing);
        }
    }

    pub fn release(&mut self, id: PlayerId, facing: Facing) {
        if let Some(player) = self.controllable(id) {
            player.release(facing);
        }
    }

    pub fn jump(&mut self, id: PlayerId) {
        if let Some(player) = self.controllable(id) {
            player.jump();
        }
    }

    /// Uses the held weapon of player `id`.
    pub fn attack(&mut self, id: PlayerId) {
        let now = self.game_time;
        let launched = match self.controllable(id) {
            Some(player) => player.primary_action(now),
            None => return,
        };
        match launched {
            Some(Launched::Bullet(bullet)) => self.bullets.push(bullet),
            Some(Launched::Grenade(grenade)) => {
                debug!("player {} threw a grenade", id);
                self.grenades.push(grenade);
            }
            None => {}
        }
    }

    // ── Placement ─────────────────────────────────────────────────────────────

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn add_pickup(&mut self, pickup: WeaponPickup) {
        self.pickups.push(pickup);
    }

    pub fn add_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    pub fn add_grenade(&mut self, grenade: Grenade) {
        self.grenades.push(grenade);
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// Advance the match by `dt` seconds.  Does nothing outside the playing
    /// modes.
    pub fn update(&mut self, dt: f32) {
        if !self.mode.is_playing() {
            return;
        }

        self.game_time += dt;

        for player in &mut self.players {
            player.update(dt, &self.arena.platforms);
        }

        if self.mode == GameMode::SinglePlayer {
            self.spawn_enemy();
            if let Some(target) = self.players.first_mut() {
                for enemy in &mut self.enemies {
                    enemy.update(dt, &self.arena.platforms, target, &mut self.rng);
                }
            }
        }

        if self.rng.gen_bool(WEAPON_SPAWN_CHANCE) {
            self.spawn_weapon();
        }

        self.check_collisions(dt);
        self.evaluate_outcome();
        self.follow_camera(dt);
    }

    /// Adds an enemy just outside a random arena edge once the spawn interval
    /// has elapsed.  Single player only.
    pub fn spawn_enemy(&mut self) {
        if self.mode != GameMode::SinglePlayer {
            return;
        }
        let due = self
            .last_enemy_spawn
            .map_or(true, |t| self.game_time - t > ENEMY_SPAWN_INTERVAL);
        if !due {
            return;
        }
        let pos = arena::random_edge_spawn(&mut self.rng);
        self.enemies.push(Enemy::spawn(pos, &mut self.rng));
        self.last_enemy_spawn = Some(self.game_time);
        debug!("enemy spawned at ({:.0}, {:.0})", pos.x, pos.y);
    }

    /// Places a random weapon pickup unless one appeared recently or the
    /// arena already holds the maximum.  Returns whether one was placed.
    pub fn spawn_weapon(&mut self) -> bool {
        let due = self
            .last_weapon_spawn
            .map_or(true, |t| self.game_time - t > WEAPON_SPAWN_INTERVAL);
        if !due || self.pickups.len() >= MAX_PICKUPS {
            return false;
        }
        let pos = arena::random_pickup_spot(&mut self.rng);
        let pickup = WeaponPickup::random(pos, self.game_time, &mut self.rng);
        debug!("{} pickup at ({:.0}, {:.0})", pickup.kind.name(), pos.x, pos.y);
        self.pickups.push(pickup);
        self.last_weapon_spawn = Some(self.game_time);
        true
    }

    // ── Collision & damage ────────────────────────────────────────────────────

    /// Advances pickups and projectiles, then resolves every pairwise hit.
    /// Removals are flagged during the pass and compacted afterwards.
    pub fn check_collisions(&mut self, dt: f32) {
        let solo = self.mode == GameMode::SinglePlayer;
        let mut tally = Tally::default();
        let mut killed = vec![false; self.enemies.len()];

        self.collect_pickups(dt);
        self.resolve_swords(solo, &mut killed, &mut tally);
        self.resolve_bullets(dt, solo, &mut killed, &mut tally);
        self.resolve_grenades(dt, solo, &mut killed, &mut tally);
        self.explosions.retain_mut(|explosion| explosion.update(dt));

        compact(&mut self.enemies, &killed);
        self.score += tally.score;
        self.enemies_defeated += tally.enemies;
    }

    fn collect_pickups(&mut self, dt: f32) {
        let now = self.game_time;
        let players = &mut self.players;
        self.pickups.retain_mut(|pickup| {
            pickup.update(dt);
            if !pickup.is_active(now) {
                return false;
            }
            let claimant = players
                .iter_mut()
                .find(|p| p.weapon.is_none() && p.pos.distance(pickup.pos) < PLAYER_SIZE);
            match claimant {
                Some(player) => {
                    debug!("player {} picked up {}", player.id, pickup.kind.name());
                    player.grant_weapon(pickup.kind);
                    false
                }
                None => true,
            }
        });
    }

    fn resolve_swords(&mut self, solo: bool, killed: &mut [bool], tally: &mut Tally) {
        for attacker in 0..self.players.len() {
            let (pos, striking) = {
                let p = &self.players[attacker];
                (p.pos, p.is_swinging() && p.in_swing_window())
            };
            if !striking {
                continue;
            }

            for victim in 0..self.players.len() {
                if victim == attacker {
                    continue;
                }
                let other = &mut self.players[victim];
                if pos.distance(other.pos) < SWORD_REACH && other.take_damage(SWORD_DAMAGE) && solo {
                    tally.score += SCORE_PLAYER_KILL;
                }
            }

            for (index, enemy) in self.enemies.iter().enumerate() {
                if killed[index] {
                    continue;
                }
                if pos.distance(enemy.pos) < SWORD_REACH + enemy.size / 2.0 {
                    killed[index] = true;
                    tally.score += SCORE_MELEE_OR_SHOT;
                    tally.enemies += 1;
                    debug!("player {} cut down an enemy", self.players[attacker].id);
                }
            }
        }
    }

    fn resolve_bullets(&mut self, dt: f32, solo: bool, killed: &mut [bool], tally: &mut Tally) {
        let mut spent = vec![false; self.bullets.len()];

        for (index, bullet) in self.bullets.iter_mut().enumerate() {
            if !bullet.update(dt) {
                spent[index] = true;
                continue;
            }

            let victim = self
                .players
                .iter_mut()
                .find(|p| p.id != bullet.owner && p.pos.distance(bullet.pos) < PLAYER_SIZE);
            if let Some(victim) = victim {
                if victim.take_damage(BULLET_DAMAGE) && solo {
                    tally.score += SCORE_PLAYER_KILL;
                }
                spent[index] = true;
                continue;
            }

            if !solo {
                continue;
            }
            let target = self.enemies.iter().enumerate().position(|(k, e)| {
                !killed[k] && bullet.pos.distance(e.pos) < e.size / 2.0 + BULLET_RADIUS
            });
            if let Some(k) = target {
                killed[k] = true;
                tally.score += SCORE_MELEE_OR_SHOT;
                tally.enemies += 1;
                spent[index] = true;
            }
        }

        compact(&mut self.bullets, &spent);
    }

    fn resolve_grenades(&mut self, dt: f32, solo: bool, killed: &mut [bool], tally: &mut Tally) {
        let platforms = &self.arena.platforms;
        let mut detonations = Vec::new();
        self.grenades.retain_mut(|grenade| match grenade.update(dt, platforms) {
            GrenadeTick::Flying => true,
            GrenadeTick::Detonate => {
                detonations.push((grenade.pos, grenade.owner));
                false
            }
            GrenadeTick::Gone => false,
        });

        for (center, owner) in detonations {
            debug!("grenade from player {} detonated at ({:.0}, {:.0})", owner, center.x, center.y);
            self.explosions.push(Explosion::new(center));

            // Damage is dealt once, at the moment of detonation.
            for player in self.players.iter_mut().filter(|p| p.id != owner) {
                let distance = center.distance(player.pos);
                if distance < BLAST_RADIUS && player.take_damage(blast_damage(distance)) && solo {
                    tally.score += SCORE_PLAYER_KILL;
                }
            }

            if !solo {
                continue;
            }
            for (index, enemy) in self.enemies.iter().enumerate() {
                if !killed[index] && center.distance(enemy.pos) < BLAST_RADIUS {
                    killed[index] = true;
                    tally.score += SCORE_GRENADE_KILL;
                    tally.enemies += 1;
                }
            }
        }
    }

    // ── End of frame ──────────────────────────────────────────────────────────

    fn evaluate_outcome(&mut self) {
        match self.mode {
            GameMode::Multiplayer => {
                let alive: Vec<PlayerId> = self
                    .players
                    .iter()
                    .filter(|p| p.is_alive())
                    .map(|p| p.id)
                    .collect();
                if alive.len() < 2 {
                    let outcome = match alive.as_slice() {
                        [winner] => Outcome::Winner(*winner),
                        _ => Outcome::Draw,
                    };
                    self.finish(outcome);
                }
            }
            GameMode::SinglePlayer => {
                if self.players.first().map_or(false, |p| !p.is_alive()) {
                    self.finish(Outcome::Defeated);
                }
            }
            GameMode::Menu | GameMode::GameOver => {}
        }
    }

    fn follow_camera(&mut self, dt: f32) {
        if self.players.is_empty() {
            return;
        }
        let sum: Vec2 = self.players.iter().map(|p| p.pos).sum();
        let average = sum / self.players.len() as f32;
        self.camera += (average - self.camera) * dt * CAMERA_FOLLOW;
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
