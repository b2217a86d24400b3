//! Application state machine.
//!
//! This module defines the [`App`] state machine, which drives the two-screen
//! sign-in flow completely decoupled from terminal I/O and timers.
//!
//! It consumes [`crate::AppEvent`] inputs and produces [`crate::AppAction`]
//! instructions for the runtime to execute. The only side effects it performs
//! directly are lockout tracker calls, which are synchronous.
//!
//! # Gating
//!
//! Every simulated request is gated twice: once before the delay starts and
//! once after it resolves, before its effect is committed. A block imposed
//! while the request was in flight is therefore still honoured.

use std::time::Duration;

use phonegate_core::{BlockStatus, BlockStore, COUNTRIES, Environment, LockoutTracker};

use crate::{
    AppAction, AppEvent, CODE_LENGTH, CodeForm, FlowConfig, KeyInput, Notice, PHONE_DIGITS,
    PendingRequest, PhoneForm, Screen,
};

/// Application state machine.
///
/// Owns the lockout tracker; everything else is plain view state.
#[derive(Debug, Clone)]
pub struct App<S, E> {
    /// Lockout tracker over the persisted record.
    tracker: LockoutTracker<S, E>,
    /// Timing and throttling.
    config: FlowConfig,
    /// Current screen.
    screen: Screen,
    /// Inline message. `None` if nothing to show.
    notice: Option<Notice>,
    /// A simulated request is in flight.
    loading: bool,
    /// Code resends performed this session.
    resends: u32,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl<S, E> App<S, E>
where
    S: BlockStore,
    E: Environment,
{
    /// Create a new App on the phone screen.
    pub fn new(tracker: LockoutTracker<S, E>, config: FlowConfig) -> Self {
        Self {
            tracker,
            config,
            screen: Screen::Phone(PhoneForm::default()),
            notice: None,
            loading: false,
            resends: 0,
            terminal_size: (80, 24),
        }
    }

    /// Initial gate check, so a blocked user sees the countdown immediately.
    pub fn start(&mut self) -> Vec<AppAction> {
        self.refresh_lockout();
        vec![AppAction::Render]
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => self.tick(),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::DelayElapsed(PendingRequest::Phone { number }) => {
                self.complete_phone(number)
            },
            AppEvent::DelayElapsed(PendingRequest::Code { .. }) => self.complete_code(),
            AppEvent::Interrupt => self.quit(),
        }
    }

    /// Submit the entered phone number.
    ///
    /// Ignored unless the number is complete, nothing is loading and no notice
    /// is showing.
    pub fn submit_phone(&mut self) -> Vec<AppAction> {
        let Screen::Phone(form) = &self.screen else {
            return vec![];
        };
        if !form.is_complete() || self.loading || self.notice.is_some() {
            return vec![];
        }
        let number = form.full_number();

        if let Some(remaining) = self.gate_before() {
            self.set_notice(Notice::lockout(remaining));
            return vec![AppAction::Render];
        }

        self.notice = None;
        self.loading = true;
        tracing::debug!(%number, "requesting code");
        vec![AppAction::Render, AppAction::Simulate {
            request: PendingRequest::Phone { number },
            delay: self.config.phone_delay,
        }]
    }

    /// Submit the entered code. Called automatically on the last digit.
    pub fn submit_code(&mut self) -> Vec<AppAction> {
        let Screen::Code(form) = &self.screen else {
            return vec![];
        };
        if form.code.len() != CODE_LENGTH || self.loading {
            return vec![];
        }
        let code = form.code.clone();

        if let Some(remaining) = self.gate_before() {
            self.set_notice(Notice::lockout(remaining));
            return vec![AppAction::Render];
        }

        self.notice = None;
        self.loading = true;
        vec![AppAction::Render, AppAction::Simulate {
            request: PendingRequest::Code { code },
            delay: self.config.code_delay,
        }]
    }

    /// Resend the code once the countdown has run out.
    ///
    /// With a resend limit configured, every resend past the limit imposes an
    /// escalating phone-request block instead.
    pub fn resend_code(&mut self) -> Vec<AppAction> {
        if self.is_locked_out() {
            return vec![];
        }
        let Screen::Code(form) = &mut self.screen else {
            return vec![];
        };
        if form.resend_in > 0 {
            return vec![];
        }

        if self.config.resend_limit.is_some_and(|limit| self.resends >= limit) {
            match self.tracker.impose_phone_block() {
                Ok(state) => {
                    let remaining = state.remaining_at(self.tracker.env().now_millis());
                    self.set_notice(Notice::lockout(remaining));
                },
                Err(e) => {
                    tracing::warn!(error = %e, "failed to record phone block");
                    self.set_notice(Notice::Failed);
                },
            }
            return vec![AppAction::Render];
        }

        form.resend_in = self.config.resend_countdown;
        self.resends += 1;
        tracing::debug!(resends = self.resends, "code resent");
        vec![AppAction::Render]
    }

    /// Return from the code screen to a fresh phone screen.
    pub fn back(&mut self) -> Vec<AppAction> {
        if !matches!(self.screen, Screen::Code(_)) {
            return vec![];
        }
        self.notice = None;
        self.screen = Screen::Phone(PhoneForm::default());
        vec![AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match self.screen {
            Screen::Phone(PhoneForm { picker: Some(_), .. }) => self.handle_picker_key(key),
            Screen::Phone(_) => self.handle_phone_key(key),
            Screen::Code(_) => self.handle_code_key(key),
        }
    }

    fn handle_phone_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let input_locked = self.notice.is_some();
        let Screen::Phone(form) = &mut self.screen else {
            return vec![];
        };

        match key {
            KeyInput::Char(c) if c.is_ascii_digit() => {
                if input_locked || form.digits.len() >= PHONE_DIGITS {
                    return vec![];
                }
                form.digits.push(c);
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if input_locked || form.digits.pop().is_none() {
                    return vec![];
                }
                vec![AppAction::Render]
            },
            KeyInput::Tab => {
                form.picker = Some(form.country);
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.submit_phone(),
            KeyInput::Esc => self.quit(),
            KeyInput::Char(_) | KeyInput::Up | KeyInput::Down => vec![],
        }
    }

    fn handle_picker_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let Screen::Phone(form) = &mut self.screen else {
            return vec![];
        };
        let Some(cursor) = form.picker else {
            return vec![];
        };
        let last = COUNTRIES.len() - 1;

        match key {
            KeyInput::Up => form.picker = Some(cursor.saturating_sub(1)),
            KeyInput::Down => form.picker = Some((cursor + 1).min(last)),
            KeyInput::Enter => {
                form.country = cursor;
                form.picker = None;
            },
            KeyInput::Esc => form.picker = None,
            KeyInput::Char(_) | KeyInput::Backspace | KeyInput::Tab => return vec![],
        }
        vec![AppAction::Render]
    }

    fn handle_code_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let input_locked = self.loading || self.is_locked_out();
        let Screen::Code(form) = &mut self.screen else {
            return vec![];
        };

        match key {
            KeyInput::Char(c) if c.is_ascii_digit() => {
                if input_locked || form.code.len() >= CODE_LENGTH {
                    return vec![];
                }
                form.code.push(c);
                if form.code.len() == CODE_LENGTH {
                    let mut actions = vec![AppAction::Render];
                    actions.extend(self.submit_code());
                    return actions;
                }
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if input_locked || form.code.pop().is_none() {
                    return vec![];
                }
                vec![AppAction::Render]
            },
            KeyInput::Char('r') => self.resend_code(),
            KeyInput::Esc => self.back(),
            KeyInput::Char(_) | KeyInput::Enter | KeyInput::Tab | KeyInput::Up | KeyInput::Down => {
                vec![]
            },
        }
    }

    /// Second gate for the phone request, then move to the code screen.
    fn complete_phone(&mut self, number: String) -> Vec<AppAction> {
        self.loading = false;

        if let Some(notice) = self.gate_after(Notice::AccessRestricted) {
            self.set_notice(notice);
            return vec![AppAction::Render];
        }

        tracing::debug!(%number, "code sent");
        self.screen = Screen::Code(CodeForm::new(number, self.config.resend_countdown));
        vec![AppAction::Render]
    }

    /// Second gate for the code request, then reject the code.
    ///
    /// There is no verifier: every code that reaches this point is wrong.
    fn complete_code(&mut self) -> Vec<AppAction> {
        self.loading = false;

        if let Some(notice) = self.gate_after(Notice::Failed) {
            self.set_notice(notice);
            return vec![AppAction::Render];
        }

        let notice = match self.tracker.register_code_failure() {
            Ok(state) if state.is_blocked => {
                Notice::lockout(state.remaining_at(self.tracker.env().now_millis()))
            },
            Ok(_) => Notice::WrongCode,
            Err(e) => {
                tracing::warn!(error = %e, "failed to record wrong code");
                Notice::Failed
            },
        };
        self.set_notice(notice);
        vec![AppAction::Render]
    }

    /// Refresh countdowns.
    fn tick(&mut self) -> Vec<AppAction> {
        self.refresh_lockout();

        let locked_out = self.is_locked_out();
        if let Screen::Code(form) = &mut self.screen
            && !locked_out
        {
            form.resend_in = form.resend_in.saturating_sub(1);
        }
        vec![AppAction::Render]
    }

    /// Show the current block, or clear a lockout notice that has lifted.
    ///
    /// A readable open record also clears "access restricted", which only
    /// ever reflects a failed store read. Other notices are left alone.
    fn refresh_lockout(&mut self) {
        match self.tracker.status() {
            Ok(BlockStatus::Blocked { remaining }) => self.set_notice(Notice::lockout(remaining)),
            Ok(BlockStatus::Open) => {
                if matches!(self.notice, Some(Notice::Lockout(_) | Notice::AccessRestricted)) {
                    self.notice = None;
                }
            },
            Err(e) => tracing::warn!(error = %e, "failed to read block state"),
        }
    }

    /// Gate before starting a request. Returns the remaining block time if
    /// blocked. Fails open when storage cannot be read.
    fn gate_before(&self) -> Option<Duration> {
        match self.tracker.status() {
            Ok(BlockStatus::Blocked { remaining }) => Some(remaining),
            Ok(BlockStatus::Open) => None,
            Err(e) => {
                tracing::warn!(error = %e, "block check failed, continuing");
                None
            },
        }
    }

    /// Gate after a request resolved. Returns the notice to show instead of
    /// committing, or `None` to proceed. Fails closed with `fallback`.
    fn gate_after(&self, fallback: Notice) -> Option<Notice> {
        match self.tracker.status() {
            Ok(BlockStatus::Blocked { remaining }) => Some(Notice::lockout(remaining)),
            Ok(BlockStatus::Open) => None,
            Err(e) => {
                tracing::warn!(error = %e, "block check failed after request");
                Some(fallback)
            },
        }
    }

    /// Set the notice. A non-lockout notice on the code screen also clears the
    /// entered code so the user can retype it; a lockout keeps it visible.
    fn set_notice(&mut self, notice: Notice) {
        if !notice.is_lockout()
            && let Screen::Code(form) = &mut self.screen
        {
            form.code.clear();
        }
        self.notice = Some(notice);
    }

    fn is_locked_out(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_lockout)
    }

    /// Current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Inline message. `None` if nothing to show.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// A simulated request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The continue button is enabled.
    pub fn can_continue(&self) -> bool {
        matches!(&self.screen, Screen::Phone(form) if form.is_complete())
            && !self.loading
            && self.notice.is_none()
    }

    /// Flow configuration.
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Lockout tracker.
    pub fn tracker(&self) -> &LockoutTracker<S, E> {
        &self.tracker
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}

#[cfg(test)]
mod tests {
    use phonegate_core::MemoryStore;
    use phonegate_harness::SimEnv;

    use super::*;

    fn app() -> App<MemoryStore, SimEnv> {
        App::new(LockoutTracker::new(MemoryStore::new(), SimEnv::new()), FlowConfig::default())
    }

    fn type_keys(app: &mut App<MemoryStore, SimEnv>, keys: &str) -> Vec<AppAction> {
        let mut actions = Vec::new();
        for c in keys.chars() {
            actions = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
        actions
    }

    fn phone_form(app: &App<MemoryStore, SimEnv>) -> &PhoneForm {
        let Screen::Phone(form) = app.screen() else {
            unreachable!("expected phone screen");
        };
        form
    }

    #[test]
    fn phone_input_caps_at_ten_digits() {
        let mut app = app();
        type_keys(&mut app, "12345678901");

        assert_eq!(phone_form(&app).digits, "1234567890");
        assert!(app.can_continue());
    }

    #[test]
    fn non_digits_are_ignored() {
        let mut app = app();
        let actions = type_keys(&mut app, "x");

        assert!(actions.is_empty());
        assert!(phone_form(&app).digits.is_empty());
    }

    #[test]
    fn incomplete_phone_cannot_submit() {
        let mut app = app();
        type_keys(&mut app, "123");

        assert!(app.handle(AppEvent::Key(KeyInput::Enter)).is_empty());
        assert!(!app.is_loading());
    }

    #[test]
    fn complete_phone_starts_simulated_request() {
        let mut app = app();
        type_keys(&mut app, "9991234567");

        let actions = app.handle(AppEvent::Key(KeyInput::Enter));

        assert!(matches!(actions.as_slice(), [
            AppAction::Render,
            AppAction::Simulate { request: PendingRequest::Phone { number }, .. }
        ] if number == "+7 999 123 45 67"));
        assert!(app.is_loading());
        assert!(!app.can_continue());
    }

    #[test]
    fn picker_selects_country() {
        let mut app = app();

        app.handle(AppEvent::Key(KeyInput::Tab));
        assert_eq!(phone_form(&app).picker, Some(0));

        app.handle(AppEvent::Key(KeyInput::Down));
        app.handle(AppEvent::Key(KeyInput::Down));
        app.handle(AppEvent::Key(KeyInput::Up));
        app.handle(AppEvent::Key(KeyInput::Enter));

        let form = phone_form(&app);
        assert_eq!(form.picker, None);
        assert_eq!(form.country().code, "BY");
    }

    #[test]
    fn picker_swallows_digits() {
        let mut app = app();
        app.handle(AppEvent::Key(KeyInput::Tab));

        type_keys(&mut app, "12");
        app.handle(AppEvent::Key(KeyInput::Esc));

        assert!(phone_form(&app).digits.is_empty());
        assert_eq!(phone_form(&app).picker, None);
    }

    #[test]
    fn esc_on_phone_screen_quits() {
        let mut app = app();
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), vec![AppAction::Quit]);
        assert_eq!(app.handle(AppEvent::Interrupt), vec![AppAction::Quit]);
    }

    #[test]
    fn resize_is_recorded() {
        let mut app = app();
        app.handle(AppEvent::Resize(120, 40));
        assert_eq!(app.terminal_size(), (120, 40));
    }
}
