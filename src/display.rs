/// Rendering layer.  All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game.  No game logic is performed; this module only translates state
/// into terminal commands.  World coordinates are projected onto terminal
/// cells through a `Viewport` centred on the game camera.

use std::f32::consts::TAU;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::enemy::Enemy;
use crate::entities::{GameMode, Outcome, Platform, WeaponKind};
use crate::game::Game;
use crate::player::Player;
use crate::projectiles::{Bullet, Explosion, Grenade, WeaponPickup};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLATFORM: Color = Color::Green;
const C_PLAYER_ONE: Color = Color::Red;
const C_PLAYER_TWO: Color = Color::Blue;
const C_HIT_FLASH: Color = Color::White;
const C_ENEMY: Color = Color::Yellow;
const C_ENEMY_EYE: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_GRENADE: Color = Color::Red;
const C_SPARK: Color = Color::DarkYellow;
const C_SWORD: Color = Color::Grey;
const C_GUN: Color = Color::DarkGrey;
const C_HUD: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;

/// World extent visible on screen, slightly wider than the arena.
const VIEW_WIDTH: f32 = ARENA_WIDTH * 1.2;
const VIEW_HEIGHT: f32 = ARENA_HEIGHT * 1.2;
/// Points sampled around an explosion ring.
const RING_SAMPLES: usize = 32;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world positions onto the playfield rows between the HUD (row 0)
/// and the controls hint (last row).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub center: Vec2,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, center: Vec2) -> Self {
        Viewport { cols, rows, center }
    }

    /// World distance covered by one terminal column.
    pub fn units_per_col(&self) -> f32 {
        VIEW_WIDTH / self.cols.max(1) as f32
    }

    pub fn units_per_row(&self) -> f32 {
        VIEW_HEIGHT / self.rows.saturating_sub(2).max(1) as f32
    }

    /// Terminal cell for a world position, or `None` when off screen.
    pub fn cell(&self, pos: Vec2) -> Option<(u16, u16)> {
        let col = (pos.x - self.center.x) / self.units_per_col() + self.cols as f32 / 2.0;
        let row = self.rows as f32 / 2.0 - (pos.y - self.center.y) / self.units_per_row();
        let (col, row) = (col.floor(), row.floor());
        let bottom = self.rows.saturating_sub(1) as f32;
        if col < 0.0 || col >= self.cols as f32 || row < 1.0 || row >= bottom {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    pos: Vec2,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(pos) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Entity sprites ────────────────────────────────────────────────────────────

/// Something that can draw itself relative to its own position.
pub trait Draw {
    fn draw<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()>;
}

impl Draw for Platform {
    fn draw<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        let step = view.units_per_col();
        let mut x = self.left();
        while x <= self.right() {
            put(out, view, Vec2::new(x, self.top()), "═", C_PLATFORM)?;
            x += step;
        }
        Ok(())
    }
}

fn sword_glyph(player: &Player) -> &'static str {
    let raised = player.in_swing_window();
    match (raised, player.facing.sign() > 0.0) {
        (false, _) => "─",
        (true, true) => "/",
        (true, false) => "\\",
    }
}

impl Draw for Player {
    fn draw<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        let body = if self.hit_effect > 0.0 {
            C_HIT_FLASH
        } else if self.id == 1 {
            C_PLAYER_ONE
        } else {
            C_PLAYER_TWO
        };
        put(out, view, self.pos, "█", body)?;
        put(out, view, self.pos + Vec2::new(0.0, view.units_per_row()), "●", body)?;

        let hand = Vec2::new(self.pos.x + self.facing.sign() * view.units_per_col(), self.pos.y);
        match self.weapon {
            Some(WeaponKind::Sword) => put(out, view, hand, sword_glyph(self), C_SWORD)?,
            Some(WeaponKind::Gun) => {
                let glyph = if self.facing.sign() > 0.0 { "╾" } else { "╼" };
                put(out, view, hand, glyph, C_GUN)?
            }
            Some(WeaponKind::Grenade) => put(out, view, hand, "•", C_GRENADE)?,
            None => {}
        }
        Ok(())
    }
}

/// Wings flap on `wing_phase`, the eye blinks on `eye_offset` and the rotor
/// on top turns with `body_angle`.
impl Draw for Enemy {
    fn draw<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        const ROTOR: [&str; 4] = ["|", "/", "─", "\\"];
        let row = view.units_per_row();

        let wings = if self.wing_phase.sin() >= 0.0 { "W" } else { "V" };
        put(out, view, self.pos, wings, C_ENEMY)?;

        let eye = if self.eye_offset.sin() >= 0.0 { "°" } else { "·" };
        put(out, view, self.pos + Vec2::new(0.0, row), eye, C_ENEMY_EYE)?;

        let rotor = ROTOR[(self.body_angle / 90.0) as usize % ROTOR.len()];
        put(out, view, self.pos + Vec2::new(0.0, 2.0 * row), rotor, C_ENEMY)
    }
}

impl Draw for WeaponPickup {
    fn draw<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        let (glyph, color) = match self.kind {
            WeaponKind::Sword => ("†", Color::Yellow),
            WeaponKind::Gun => ("¬", Color::Grey),
            WeaponKind::Grenade => ("●", Color::Red),
        };
        let color = if self.growing { color } else { Color::White };
        put(out, view, self.pos, glyph, color)
    }
}

impl Draw for Bullet {
    fn draw<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        put(out, view, self.pos, "-", C_BULLET)
    }
}

impl Draw for Grenade {
    fn draw<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        const SPIN: [&str; 4] = ["|", "/", "─", "\\"];
        let frame = (self.rotation / 90.0) as usize % SPIN.len();
        put(out, view, self.pos, SPIN[frame], C_GRENADE)?;
        // Fuse sparks in the last half second.
        if self.timer < 0.5 {
            put(out, view, self.pos + Vec2::new(0.0, view.units_per_row()), "*", C_SPARK)?;
        }
        Ok(())
    }
}

impl Draw for Explosion {
    fn draw<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        let color = match self.intensity() {
            i if i > 0.6 => Color::Yellow,
            i if i > 0.3 => Color::DarkYellow,
            _ => Color::DarkRed,
        };
        put(out, view, self.pos, "✸", color)?;
        for i in 0..RING_SAMPLES {
            let angle = i as f32 / RING_SAMPLES as f32 * TAU;
            let edge = self.pos + Vec2::new(angle.cos(), angle.sin()) * self.radius;
            put(out, view, edge, "*", color)?;
        }
        Ok(())
    }
}

// ── HUD text ──────────────────────────────────────────────────────────────────

/// "Weapon: Gun (27s)" or "Weapon: None".
pub fn weapon_label(player: &Player) -> String {
    match (player.weapon, player.weapon_seconds_left()) {
        (Some(kind), Some(left)) => format!("Weapon: {} ({}s)", kind.name(), left),
        _ => "Weapon: None".to_string(),
    }
}

pub fn health_label(player: &Player) -> String {
    format!("Health: {}%", player.health)
}

/// Headline for the game-over screen.
pub fn outcome_label(game: &Game) -> String {
    match game.outcome {
        Some(Outcome::Winner(id)) => format!("Player {} Wins!", id),
        Some(Outcome::Draw) => "Draw! Both players died!".to_string(),
        Some(Outcome::Defeated) | None => format!("Score: {}", game.score),
    }
}

fn controls_hint(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Multiplayer => {
            "P1: A D W SPACE | P2: ← → ↑ ↓ | R: Restart | ESC: Menu"
        }
        _ => "A D: Move | W: Jump | SPACE/Click: Attack | R: Restart | ESC: Menu",
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for a terminal of `cols` × `rows` cells.
pub fn render<W: Write>(out: &mut W, game: &Game, cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match game.mode {
        GameMode::Menu => draw_menu(out, cols, rows)?,
        GameMode::GameOver => draw_game_over(out, game, cols, rows)?,
        GameMode::SinglePlayer | GameMode::Multiplayer => {
            let view = Viewport::new(cols, rows, game.camera);
            draw_world(out, game, &view)?;
            draw_hud(out, game, cols, rows)?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_world<W: Write>(out: &mut W, game: &Game, view: &Viewport) -> std::io::Result<()> {
    for platform in &game.arena.platforms {
        platform.draw(out, view)?;
    }
    for pickup in game.pickups() {
        pickup.draw(out, view)?;
    }
    for bullet in game.bullets() {
        bullet.draw(out, view)?;
    }
    for grenade in game.grenades() {
        grenade.draw(out, view)?;
    }
    for explosion in game.explosions() {
        explosion.draw(out, view)?;
    }
    for enemy in game.enemies() {
        enemy.draw(out, view)?;
    }
    for player in game.players() {
        player.draw(out, view)?;
    }
    Ok(())
}

fn print_at<W: Write>(out: &mut W, col: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    cols: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    print_at(out, col, row, text, color)
}

// ── HUD (row 0) and hint (last row) ───────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &Game, cols: u16, rows: u16) -> std::io::Result<()> {
    if let Some(p1) = game.player(1).filter(|p| p.is_alive()) {
        let mut left = format!("{}  {}", weapon_label(p1), health_label(p1));
        if game.mode == GameMode::SinglePlayer {
            left = format!("Score: {}  {}", game.score, left);
        }
        print_at(out, 1, 0, &left, C_PLAYER_ONE)?;
    }

    let time = format!("Time: {}s", game.game_time as u32);
    print_centered(out, cols, 0, &time, C_HUD)?;

    if let Some(p2) = game.player(2).filter(|p| p.is_alive()) {
        let right = format!("{}  {}", weapon_label(p2), health_label(p2));
        let col = cols.saturating_sub(right.chars().count() as u16 + 1);
        print_at(out, col, 0, &right, C_PLAYER_TWO)?;
    }

    print_at(out, 1, rows.saturating_sub(1), controls_hint(game.mode), C_HINT)?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let cy = rows / 2;
    print_centered(out, cols, cy.saturating_sub(6), "B0T BRAWL", C_TITLE)?;
    print_centered(out, cols, cy.saturating_sub(3), "1. Single Player Mode", C_HUD)?;
    print_centered(out, cols, cy.saturating_sub(2), "2. Multiplayer Mode  ", C_HUD)?;
    print_centered(out, cols, cy.saturating_sub(1), "ESC - Quit Game      ", C_HUD)?;

    let blurb = [
        "Collect weapons (sword, gun, grenade) to fight enemies",
        "Survive as long as possible in single player mode",
        "Defeat your opponent in multiplayer mode",
    ];
    for (i, line) in blurb.iter().enumerate() {
        print_centered(out, cols, cy + 2 + i as u16, line, C_HINT)?;
    }
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, game: &Game, cols: u16, rows: u16) -> std::io::Result<()> {
    let headline_color = match game.outcome {
        Some(Outcome::Winner(1)) => C_PLAYER_ONE,
        Some(Outcome::Winner(_)) => C_PLAYER_TWO,
        _ => C_HUD,
    };

    let mut lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║     GAME  OVER     ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (outcome_label(game), headline_color),
        (
            format!("Time survived: {} seconds", game.game_time as u32),
            C_HUD,
        ),
    ];
    if game.outcome == Some(Outcome::Defeated) {
        lines.push((format!("Enemies defeated: {}", game.enemies_defeated), C_HUD));
    }
    lines.push(("Press R to return to menu".to_string(), C_HINT));
    lines.push(("Press ESC to quit".to_string(), C_HINT));

    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        print_centered(out, cols, start_row + i as u16, text, *color)?;
    }
    Ok(())
}
