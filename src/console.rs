//! Terminal input and output for interactive play.
//!
//! The [`Console`] trait is the seam between the interactive strategy and
//! the real terminal. [`StdConsole`] prefers `rustyline` when a terminal is
//! attached and falls back to a plain stdin reader otherwise; tests drive
//! the trait with scripted implementations instead.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

/// Outcome of reading a line of player input.
#[derive(Debug)]
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

/// Line-oriented terminal port used by the interactive strategy.
pub trait Console {
    /// Print one line of output to the player.
    fn say(&mut self, line: &str);

    /// Block until the player supplies a line or closes the stream.
    ///
    /// # Errors
    /// Propagates I/O failures from the underlying reader.
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent>;
}

type LineEditor = rustyline::Editor<(), DefaultHistory>;

/// Console backed by the real terminal.
pub struct StdConsole {
    backend: Backend,
}

enum Backend {
    Rustyline {
        editor: LineEditor,
        history_path: Option<PathBuf>,
    },
    Plain {
        buffer: String,
    },
}

impl Backend {
    fn plain() -> Backend {
        Backend::Plain { buffer: String::new() }
    }
}

impl StdConsole {
    pub fn new() -> StdConsole {
        let backend = if io::stdin().is_terminal() {
            match rustyline_backend() {
                Ok(backend) => {
                    info!("using rustyline-backed input");
                    backend
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::plain()
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::plain()
        };
        StdConsole { backend }
    }
}

impl Default for StdConsole {
    fn default() -> StdConsole {
        StdConsole::new()
    }
}

impl Console for StdConsole {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match &mut self.backend {
            Backend::Rustyline { editor, history_path } => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(err) = editor.add_history_entry(line.as_str()) {
                            warn!("failed to append to history: {err}");
                        }
                        if let Some(path) = history_path.as_ref() {
                            if let Err(err) = editor.save_history(path) {
                                warn!("failed to persist history to {}: {err}", path.display());
                            }
                        }
                    }
                    Ok(InputEvent::Line(line))
                },
                Err(err) => convert_readline_error(err),
            },
            Backend::Plain { buffer } => {
                print!("{prompt}");
                io::stdout().flush()?;

                buffer.clear();
                let bytes = io::stdin().read_line(buffer)?;
                if bytes == 0 {
                    return Ok(InputEvent::Eof);
                }
                if buffer.ends_with('\n') {
                    buffer.pop();
                    if buffer.ends_with('\r') {
                        buffer.pop();
                    }
                }
                Ok(InputEvent::Line(buffer.clone()))
            },
        }
    }
}

fn rustyline_backend() -> io::Result<Backend> {
    let mut editor = LineEditor::new().map_err(map_io_err)?;
    let history_path = history_file_path();

    if let Some(path) = history_path.as_ref() {
        if let Some(dir) = path.parent() {
            if let Err(err) = fs::create_dir_all(dir) {
                warn!("failed to create history directory {}: {err}", dir.display());
            }
        }

        if let Err(err) = editor.load_history(path) {
            match err {
                ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                    info!("no prior history found at {}, starting fresh", path.display());
                },
                other => {
                    warn!("failed to load history from {}: {other}", path.display());
                },
            }
        }
    }

    Ok(Backend::Rustyline { editor, history_path })
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base))
}

fn build_history_path(base: &Path) -> PathBuf {
    let mut path = base.to_path_buf();
    path.push("traipse");
    path.push("history.txt");
    path
}
