use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;
use thiserror::Error;

use bot_brawl::constants::FRAME_DT;
use bot_brawl::display;
use bot_brawl::game::Game;
use bot_brawl::input::{self, Command, Flow, ALL_BINDINGS};
use bot_brawl::logging;

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger already initialised: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The screen belongs to the game, so log records go to a file.  Only a
/// second logger registration is an error; an unwritable log file is not.
fn init_logging() -> Result<(), AppError> {
    let (sink, path) = logging::open_log_sink(&logging::log_candidates());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(sink))
        .try_init()?;
    if let Some(path) = path {
        info!("logging to {}", path.display());
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// One-shot actions (jump, attack, mode changes) fire on key press.
/// Horizontal movement is derived every frame from a `key_frame` map that
/// records the frame of the last press/repeat for every key, so both players
/// can hold keys at the same time.  On keyboard-enhancement terminals keys
/// are dropped on release; elsewhere they expire after `HOLD_WINDOW` frames
/// of silence.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<(), AppError> {
    let mut game = Game::new();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let command = match event {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                            return Ok(());
                        }
                        key_frame.insert(code, frame);
                        input::press_command(code)
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                        None
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                        None
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    ..
                }) => Some(Command::Attack(1)),
                _ => None,
            };
            if let Some(command) = command {
                if game.handle(command) == Flow::Quit {
                    return Ok(());
                }
            }
        }

        // ── Apply held movement keys every frame ──────────────────────────────
        if game.mode.is_playing() {
            for bindings in ALL_BINDINGS {
                let left = any_held(&key_frame, bindings.left, frame);
                let right = any_held(&key_frame, bindings.right, frame);
                for command in input::steering_commands(bindings.player, left, right) {
                    game.handle(command);
                }
            }
        }

        game.update(FRAME_DT);

        let (cols, rows) = terminal::size()?;
        display::render(out, &game, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    init_logging()?;
    info!("bot brawl starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("bot brawl exiting");
    result
}
