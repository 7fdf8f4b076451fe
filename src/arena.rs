/// Static level description: the platform layout, where players start, and
/// where enemies and pickups may appear.

use glam::Vec2;
use rand::Rng;

use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH, LEDGE_WIDTH};
use crate::entities::{Platform, PlayerId};

/// Ledge centres above the ground slab.
const LEDGES: [(f32, f32); 7] = [
    (-300.0, -100.0),
    (300.0, -100.0),
    (-400.0, 50.0),
    (400.0, 50.0),
    (0.0, 200.0),
    (-200.0, 200.0),
    (200.0, 200.0),
];

/// How far outside the arena enemies appear.
const EDGE_OFFSET: f32 = 50.0;
/// Keeps random positions clear of the arena border.
const INSET_X: f32 = 50.0;
const INSET_Y: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

#[derive(Clone, Debug)]
pub struct Arena {
    pub platforms: Vec<Platform>,
}

impl Arena {
    /// The single brawl stage: a wide ground slab and seven ledges.
    pub fn standard() -> Self {
        let mut platforms = vec![Platform::new(0.0, ground_y(), ARENA_WIDTH * 1.5)];
        platforms.extend(LEDGES.iter().map(|&(x, y)| Platform::new(x, y, LEDGE_WIDTH)));
        Arena { platforms }
    }

    pub fn ground(&self) -> Option<&Platform> {
        self.platforms.first()
    }
}

fn ground_y() -> f32 {
    -ARENA_HEIGHT / 2.0 + 50.0
}

/// Starting position for player 1 (left) or player 2 (right).
pub fn player_spawn(id: PlayerId) -> Vec2 {
    let x = if id == 1 { -200.0 } else { 200.0 };
    Vec2::new(x, -ARENA_HEIGHT / 2.0 + 100.0)
}

fn random_inner_x(rng: &mut impl Rng) -> f32 {
    rng.gen_range(-ARENA_WIDTH / 2.0 + INSET_X..ARENA_WIDTH / 2.0 - INSET_X)
}

fn random_inner_y(rng: &mut impl Rng) -> f32 {
    rng.gen_range(-ARENA_HEIGHT / 2.0 + INSET_Y..ARENA_HEIGHT / 2.0 - INSET_Y)
}

/// A point just outside `edge`, randomised along it.
pub fn edge_spawn(edge: Edge, rng: &mut impl Rng) -> Vec2 {
    match edge {
        Edge::Left => Vec2::new(-ARENA_WIDTH / 2.0 - EDGE_OFFSET, random_inner_y(rng)),
        Edge::Right => Vec2::new(ARENA_WIDTH / 2.0 + EDGE_OFFSET, random_inner_y(rng)),
        Edge::Top => Vec2::new(random_inner_x(rng), ARENA_HEIGHT / 2.0 + EDGE_OFFSET),
        Edge::Bottom => Vec2::new(random_inner_x(rng), -ARENA_HEIGHT / 2.0 - EDGE_OFFSET),
    }
}

/// Enemy spawn point on a random edge.
pub fn random_edge_spawn(rng: &mut impl Rng) -> Vec2 {
    let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
    edge_spawn(edge, rng)
}

/// Pickup spawn point anywhere inside the arena's inset.
pub fn random_pickup_spot(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(random_inner_x(rng), random_inner_y(rng))
}
