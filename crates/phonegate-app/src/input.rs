//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples the flow from terminal libraries (crossterm, termion, etc.)
/// enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character (digits edit the focused input, `r` resends).
    Char(char),
    /// Enter/Return key (continue, pick country).
    Enter,
    /// Backspace key (delete last digit).
    Backspace,
    /// Tab key (open country picker).
    Tab,
    /// Escape key (close picker, go back, quit).
    Esc,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
}
