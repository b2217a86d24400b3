//! Status bar
//!
//! Key hints for the current screen.

use phonegate_app::{App, Screen};
use phonegate_core::{BlockStore, Environment};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render<S, E>(frame: &mut Frame, app: &App<S, E>, area: Rect)
where
    S: BlockStore,
    E: Environment,
{
    let paragraph = Paragraph::new(hints(app.screen()))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn hints(screen: &Screen) -> &'static str {
    match screen {
        Screen::Phone(form) if form.picker.is_some() => {
            " ↑/↓ выбор | Enter подтвердить | Esc закрыть"
        },
        Screen::Phone(_) => " 0-9 номер | Tab страна | Enter продолжить | Esc выход",
        Screen::Code(_) => " 0-9 код | r отправить снова | Esc назад | Ctrl-C выход",
    }
}
