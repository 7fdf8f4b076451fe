/// Where the log goes.  The terminal belongs to the game, so records are
/// written to a side file, and a missing or read-only home directory must
/// never keep the game from starting.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

const LOG_FILE: &str = ".bot_brawl.log";

/// Candidate log files in order of preference: `$HOME`, then the working
/// directory.
pub fn log_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(LOG_FILE));
    }
    paths.push(PathBuf::from(".").join(LOG_FILE));
    paths
}

/// Opens the first candidate that can be created.  Falls back to a sink that
/// discards everything; the returned path is `None` in that case.
pub fn open_log_sink(candidates: &[PathBuf]) -> (Box<dyn Write + Send>, Option<PathBuf>) {
    for path in candidates {
        if let Ok(file) = File::create(path) {
            return (Box::new(file), Some(path.clone()));
        }
    }
    (Box::new(io::sink()), None)
}
