//! Code screen
//!
//! Six code cells, the notice line and the resend countdown.

use phonegate_app::{App, CODE_LENGTH, CodeForm};
use phonegate_core::{BlockStore, Environment};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{ACCENT, MUTED, notice_line};

/// Render the code screen into the card's inner area.
pub fn render<S, E>(frame: &mut Frame, app: &App<S, E>, form: &CodeForm, area: Rect)
where
    S: BlockStore,
    E: Environment,
{
    let [heading, cells, notice, resend] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let heading_text = vec![
        Line::styled("Введите код", Style::default().add_modifier(Modifier::BOLD)),
        Line::styled("Мы отправили его на номер", Style::default().fg(MUTED)),
        Line::styled(form.phone.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ];
    frame.render_widget(Paragraph::new(heading_text).alignment(Alignment::Center), heading);

    let cell_color = if app.notice().is_some() { Color::Red } else { ACCENT };
    frame.render_widget(
        Paragraph::new(code_cells(&form.code, cell_color)).alignment(Alignment::Center),
        cells,
    );

    let status = if app.is_loading() {
        Line::styled("Загрузка...", Style::default().fg(MUTED))
    } else {
        notice_line(app.notice())
    };
    frame.render_widget(
        Paragraph::new(status).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        notice,
    );

    let lockout = app.notice().is_some_and(|n| n.is_lockout());
    if !lockout {
        frame.render_widget(
            Paragraph::new(resend_text(form.resend_in)).alignment(Alignment::Center),
            resend,
        );
    }
}

/// One cell per code digit, `_` for digits not yet typed.
fn code_cells(code: &str, color: Color) -> Line<'static> {
    let mut spans = Vec::with_capacity(CODE_LENGTH * 2);
    let mut typed = code.chars();
    for i in 0..CODE_LENGTH {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let span = match typed.next() {
            Some(digit) => Span::styled(
                format!("[{digit}]"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("[_]", Style::default().fg(MUTED)),
        };
        spans.push(span);
    }
    Line::from(spans)
}

fn resend_text(resend_in: u32) -> Vec<Line<'static>> {
    let action = if resend_in > 0 {
        Line::styled(
            format!("Отправить повторно через {resend_in} сек"),
            Style::default().fg(MUTED),
        )
    } else {
        Line::styled("Отправить снова (r)", Style::default().fg(ACCENT))
    };
    vec![Line::styled("Код не пришёл?", Style::default().fg(MUTED)), action]
}
