//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use phonegate_app::{App, AppEvent, Driver, KeyInput};
use phonegate_core::{BlockStore, Environment, StoreError};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::ui;

/// How long to wait for input before handing control back to the runtime.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The block store could not be opened.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal in raw mode on the alternate screen. The terminal is
/// restored on drop, including on early error returns.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    /// Initial size, delivered as the first event.
    pending_resize: Option<(u16, u16)>,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, pending_resize: crossterm::terminal::size().ok() })
    }

    /// Convert a crossterm key press to an `AppEvent`.
    fn convert_key(key: KeyEvent) -> Option<AppEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(AppEvent::Interrupt);
        }

        let input = match key.code {
            KeyCode::Char(c) => KeyInput::Char(c),
            KeyCode::Enter => KeyInput::Enter,
            KeyCode::Backspace => KeyInput::Backspace,
            KeyCode::Tab => KeyInput::Tab,
            KeyCode::Esc => KeyInput::Esc,
            KeyCode::Up => KeyInput::Up,
            KeyCode::Down => KeyInput::Down,
            _ => return None,
        };
        Some(AppEvent::Key(input))
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        if let Some((cols, rows)) = self.pending_resize.take() {
            return Ok(Some(AppEvent::Resize(cols, rows)));
        }

        tokio::select! {
            biased;

            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => Ok(Some(AppEvent::Resize(cols, rows))),
                    Some(Ok(_)) => Ok(None),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    // Input closed; nothing more can arrive.
                    None => Ok(Some(AppEvent::Interrupt)),
                }
            }

            () = tokio::time::sleep(POLL_TIMEOUT) => Ok(None),
        }
    }

    fn render<S, E>(&mut self, app: &App<S, E>) -> Result<(), Self::Error>
    where
        S: BlockStore,
        E: Environment,
    {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn stop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Option<AppEvent> {
        TerminalDriver::convert_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn ctrl_c_interrupts() {
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(AppEvent::Interrupt));
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::CONTROL), None);
    }

    #[test]
    fn plain_keys_map_to_input() {
        assert_eq!(
            press(KeyCode::Char('7'), KeyModifiers::NONE),
            Some(AppEvent::Key(KeyInput::Char('7')))
        );
        assert_eq!(
            press(KeyCode::Char('C'), KeyModifiers::SHIFT),
            Some(AppEvent::Key(KeyInput::Char('C')))
        );
        assert_eq!(press(KeyCode::Tab, KeyModifiers::NONE), Some(AppEvent::Key(KeyInput::Tab)));
        assert_eq!(press(KeyCode::F(1), KeyModifiers::NONE), None);
    }
}
