pub mod arena;
pub mod constants;
pub mod display;
pub mod enemy;
pub mod entities;
pub mod game;
pub mod input;
pub mod logging;
pub mod player;
pub mod projectiles;
