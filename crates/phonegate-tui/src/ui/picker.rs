//! Country picker overlay

use phonegate_core::COUNTRIES;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use super::ACCENT;

/// Render the picker over `area` with row `cursor` highlighted.
pub fn render(frame: &mut Frame, cursor: usize, area: Rect) {
    let items: Vec<ListItem> = COUNTRIES
        .iter()
        .map(|c| ListItem::new(Line::from(format!("{} {}  {}", c.flag, c.name, c.prefix))))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(" Выберите страну "),
        )
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");

    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use phonegate_app::{App, AppEvent, FlowConfig, KeyInput};
    use phonegate_core::{LockoutTracker, MemoryStore};

    use super::super::test_support::{contains, render_to_text};
    use crate::SystemEnv;

    #[test]
    fn picker_lists_countries_and_marks_cursor() {
        let mut app =
            App::new(LockoutTracker::new(MemoryStore::new(), SystemEnv::new()), FlowConfig::default());
        app.handle(AppEvent::Key(KeyInput::Tab));
        app.handle(AppEvent::Key(KeyInput::Down));

        let rows = render_to_text(&app, 80, 24);

        assert!(contains(&rows, "Выберите страну"));
        assert!(contains(&rows, "Грузия  +995"));
        let marked = rows.iter().find(|row| row.contains('›')).unwrap();
        assert!(marked.contains("Беларусь"));
    }
}
