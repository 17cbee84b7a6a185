//! The terminal capability layer: raw-mode console I/O
use crate::command::Command;
use crossterm::event::{poll, read, KeyEvent};
use ratatui::{layout::Position, DefaultTerminal};
use std::io::{self, ErrorKind, Write};
use std::time::Duration;
use thiserror::Error;

/// What the game loop needs from a terminal
pub(crate) trait Console {
    /// Return whether a key press is waiting to be read, without blocking
    fn key_available(&mut self) -> Result<bool, TerminalError>;

    /// Return the next key press, blocking until there is one.  `None` is
    /// returned for keys that don't correspond to any command.
    fn read_key(&mut self) -> Result<Option<Command>, TerminalError>;

    /// Move the cursor to the top-left corner and write `text` from there
    fn draw(&mut self, text: &str) -> Result<(), TerminalError>;

    /// Discard all key presses that have been buffered so far
    fn discard_input(&mut self) -> Result<(), TerminalError> {
        while self.key_available()? {
            let _ = self.read_key()?;
        }
        Ok(())
    }
}

/// A [`Console`] on top of the terminal set up by [`ratatui::init()`]
#[derive(Debug)]
pub(crate) struct Screen {
    terminal: DefaultTerminal,
    /// A key press seen by `key_available()` but not yet read
    pending: Option<KeyEvent>,
}

impl Screen {
    pub(crate) fn new(mut terminal: DefaultTerminal) -> Result<Screen, TerminalError> {
        terminal.hide_cursor().map_err(TerminalError::setup)?;
        terminal.clear().map_err(TerminalError::setup)?;
        Ok(Screen {
            terminal,
            pending: None,
        })
    }
}

impl Console for Screen {
    fn key_available(&mut self) -> Result<bool, TerminalError> {
        while self.pending.is_none() && poll(Duration::ZERO).map_err(TerminalError::input)? {
            self.pending = read().map_err(TerminalError::input)?.as_key_press_event();
        }
        Ok(self.pending.is_some())
    }

    fn read_key(&mut self) -> Result<Option<Command>, TerminalError> {
        let ev = match self.pending.take() {
            Some(ev) => ev,
            None => loop {
                if let Some(ev) = read().map_err(TerminalError::input)?.as_key_press_event() {
                    break ev;
                }
            },
        };
        Ok(Command::from_key_event(ev))
    }

    fn draw(&mut self, text: &str) -> Result<(), TerminalError> {
        self.terminal
            .set_cursor_position(Position::ORIGIN)
            .map_err(TerminalError::output)?;
        let backend = self.terminal.backend_mut();
        backend
            .write_all(text.as_bytes())
            .map_err(TerminalError::output)?;
        backend.flush().map_err(TerminalError::output)
    }
}

#[derive(Debug, Error)]
#[error("Terminal I/O failed")]
pub(crate) struct TerminalError(#[source] TerminalErrorSource);

impl TerminalError {
    fn setup(e: io::Error) -> Self {
        TerminalError(TerminalErrorSource::Setup(e))
    }

    fn input(e: io::Error) -> Self {
        TerminalError(TerminalErrorSource::Input(e))
    }

    fn output(e: io::Error) -> Self {
        TerminalError(TerminalErrorSource::Output(e))
    }

    /// True if the error is due to the output having been closed from the
    /// other end
    pub(crate) fn is_broken_pipe(&self) -> bool {
        matches!(self.0, TerminalErrorSource::Output(ref e) if e.kind() == ErrorKind::BrokenPipe)
    }
}

#[derive(Debug, Error)]
enum TerminalErrorSource {
    #[error("failed to prepare the terminal")]
    Setup(#[source] io::Error),
    #[error("failed to read input event")]
    Input(#[source] io::Error),
    #[error("failed to draw to the terminal")]
    Output(#[source] io::Error),
}
