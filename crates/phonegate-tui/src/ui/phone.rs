//! Phone screen
//!
//! Country selector, phone input and the continue button.

use phonegate_app::{App, PhoneForm};
use phonegate_core::{BlockStore, Environment};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{ACCENT, MUTED, notice_line};

const PLACEHOLDER: &str = "123 456 78 90";

/// Render the phone screen into the card's inner area.
pub fn render<S, E>(frame: &mut Frame, app: &App<S, E>, form: &PhoneForm, area: Rect)
where
    S: BlockStore,
    E: Environment,
{
    let [heading, input, hint, notice, button, legal] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let heading_text = vec![
        Line::styled("С каким номером", bold),
        Line::styled("телефона хотите войти?", bold),
        Line::styled("На него придёт СМС с кодом", Style::default().fg(MUTED)),
    ];
    frame.render_widget(Paragraph::new(heading_text).alignment(Alignment::Center), heading);

    frame.render_widget(input_field(form, app.notice().is_some()), input);

    frame.render_widget(
        Paragraph::new("Номер из России или страны из списка. Tab: выбрать страну")
            .style(Style::default().fg(MUTED))
            .wrap(Wrap { trim: true }),
        hint,
    );

    frame.render_widget(
        Paragraph::new(notice_line(app.notice())).wrap(Wrap { trim: true }),
        notice,
    );

    frame.render_widget(continue_button(app), button);

    frame.render_widget(
        Paragraph::new(
            "Нажимая «Продолжить», вы соглашаетесь с политикой конфиденциальности \
             и пользовательским соглашением",
        )
        .style(Style::default().fg(MUTED))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
        legal,
    );
}

/// Bordered input: flag, prefix, then the grouped digits or a placeholder.
fn input_field(form: &PhoneForm, locked: bool) -> Paragraph<'static> {
    let country = form.country();
    let digits = if form.digits.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(MUTED))
    } else {
        Span::raw(form.formatted())
    };

    let border = if locked { Color::Red } else { ACCENT };
    Paragraph::new(Line::from(vec![
        Span::raw(format!("{} {} ▾  ", country.flag, country.prefix)),
        digits,
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)))
}

fn continue_button<S, E>(app: &App<S, E>) -> Paragraph<'static>
where
    S: BlockStore,
    E: Environment,
{
    let (label, style) = if app.is_loading() {
        ("Загрузка...", Style::default().fg(MUTED))
    } else if app.can_continue() {
        ("Продолжить", Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD))
    } else {
        ("Продолжить", Style::default().fg(MUTED))
    };

    Paragraph::new(Line::styled(format!("  {label}  "), style)).alignment(Alignment::Center)
}
