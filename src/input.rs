/// Discrete input commands and the key bindings that produce them.
///
/// The terminal driver owns the raw event stream.  It turns one-shot key
/// presses into `Command`s with `press_command` and synthesises `Move` /
/// `Release` every frame from the keys it considers held.

use crossterm::event::KeyCode;

use crate::entities::{Facing, GameMode, PlayerId};
use crate::game::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    StartSingle,
    StartMulti,
    Move(PlayerId, Facing),
    Release(PlayerId, Facing),
    Jump(PlayerId),
    Attack(PlayerId),
    /// `R`: restart the match, or leave the game-over screen.
    Restart,
    /// `Esc`: back to the menu, or quit from the menu / game-over screen.
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Keys that drive one player.
pub struct Bindings {
    pub player: PlayerId,
    pub left: &'static [KeyCode],
    pub right: &'static [KeyCode],
    pub jump: &'static [KeyCode],
    pub attack: &'static [KeyCode],
}

pub const PLAYER_ONE: Bindings = Bindings {
    player: 1,
    left: &[KeyCode::Char('a'), KeyCode::Char('A')],
    right: &[KeyCode::Char('d'), KeyCode::Char('D')],
    jump: &[KeyCode::Char('w'), KeyCode::Char('W')],
    attack: &[KeyCode::Char(' ')],
};

pub const PLAYER_TWO: Bindings = Bindings {
    player: 2,
    left: &[KeyCode::Left],
    right: &[KeyCode::Right],
    jump: &[KeyCode::Up],
    attack: &[KeyCode::Down],
};

pub const ALL_BINDINGS: [&Bindings; 2] = [&PLAYER_ONE, &PLAYER_TWO];

/// The one-shot command a key press triggers, if any.  Movement keys are
/// excluded: they are handled as held state by the driver.
pub fn press_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('1') => return Some(Command::StartSingle),
        KeyCode::Char('2') => return Some(Command::StartMulti),
        KeyCode::Char('r') | KeyCode::Char('R') => return Some(Command::Restart),
        KeyCode::Esc => return Some(Command::Back),
        _ => {}
    }
    ALL_BINDINGS.iter().find_map(|b| {
        if b.jump.contains(&code) {
            Some(Command::Jump(b.player))
        } else if b.attack.contains(&code) {
            Some(Command::Attack(b.player))
        } else {
            None
        }
    })
}

/// Commands that bring a player's horizontal motion in line with which of
/// its direction keys are held.  Left wins when both are held.
pub fn steering_commands(player: PlayerId, left: bool, right: bool) -> Vec<Command> {
    if left {
        vec![Command::Move(player, Facing::Left)]
    } else if right {
        vec![Command::Move(player, Facing::Right)]
    } else {
        vec![
            Command::Release(player, Facing::Left),
            Command::Release(player, Facing::Right),
        ]
    }
}

impl Game {
    /// Apply one input command.  Commands that make no sense in the current
    /// mode are ignored.
    pub fn handle(&mut self, command: Command) -> Flow {
        match self.mode {
            GameMode::Menu => match command {
                Command::StartSingle => self.start(GameMode::SinglePlayer),
                Command::StartMulti => self.start(GameMode::Multiplayer),
                Command::Back => return Flow::Quit,
                _ => {}
            },
            GameMode::SinglePlayer | GameMode::Multiplayer => match command {
                Command::Move(id, facing) => self.steer(id, facing),
                Command::Release(id, facing) => self.release(id, facing),
                Command::Jump(id) => self.jump(id),
                Command::Attack(id) => self.attack(id),
                Command::Restart => self.reset(),
                Command::Back => self.back_to_menu(),
                Command::StartSingle | Command::StartMulti => {}
            },
            GameMode::GameOver => match command {
                Command::Restart => self.back_to_menu(),
                Command::Back => return Flow::Quit,
                _ => {}
            },
        }
        Flow::Continue
    }
}
