//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod code;
mod phone;
mod picker;
mod status;

use phonegate_app::{App, Notice, Screen};
use phonegate_core::{BlockStore, Environment};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders},
};

/// Sign-in card width, borders included.
const CARD_WIDTH: u16 = 52;
/// Sign-in card height, borders included.
const CARD_HEIGHT: u16 = 16;

const ACCENT: Color = Color::Blue;
const MUTED: Color = Color::DarkGray;

/// Render the entire UI.
pub fn render<S, E>(frame: &mut Frame, app: &App<S, E>)
where
    S: BlockStore,
    E: Environment,
{
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(CARD_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return;
    };

    let card = centered(*main_area, CARD_WIDTH, CARD_HEIGHT);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::styled(" мах ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
        .title_alignment(Alignment::Center);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    match app.screen() {
        Screen::Phone(form) => {
            phone::render(frame, app, form, inner);
            if let Some(cursor) = form.picker {
                picker::render(frame, cursor, card);
            }
        },
        Screen::Code(form) => code::render(frame, app, form, inner),
    }

    status::render(frame, app, *status_area);
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Notice line, red for errors. Empty when there is nothing to show.
fn notice_line(notice: Option<&Notice>) -> Line<'static> {
    notice.map_or_else(Line::default, |notice| {
        Line::styled(notice.text().to_owned(), Style::default().fg(Color::Red))
    })
}
