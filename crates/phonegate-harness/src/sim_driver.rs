//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` replays a script of input events against a [`SimEnv`] clock.
//! It implements [`Driver`] so the same [`phonegate_app::Runtime`]
//! orchestration code runs in both production and simulation.
//!
//! Idle polls advance the virtual clock by [`POLL_INTERVAL`], the same timeout
//! the terminal driver waits for input. Once the script is exhausted the
//! driver delivers a single [`AppEvent::Interrupt`] so runs always terminate.

use std::{collections::VecDeque, time::Duration};

use phonegate_app::{App, AppEvent, Driver, KeyInput, Notice, Screen};
use phonegate_core::{BlockStore, Environment};

use crate::SimEnv;

/// Virtual time that passes on every poll without input.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The runtime kept polling after the final interrupt was delivered.
    Stalled,
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stalled => write!(f, "runtime did not quit after interrupt"),
        }
    }
}

impl std::error::Error for SimError {}

/// What the App looked like when it was rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    /// Environment time of the render.
    pub at_ms: u64,
    /// Screen shown.
    pub screen: Screen,
    /// Notice shown, if any.
    pub notice: Option<Notice>,
    /// A simulated request was in flight.
    pub loading: bool,
}

#[derive(Debug, Clone)]
enum Step {
    Event(AppEvent),
    Wait(Duration),
}

/// Scripted driver for deterministic runtime tests.
#[derive(Debug)]
pub struct SimDriver {
    env: SimEnv,
    script: VecDeque<Step>,
    renders: Vec<RenderSnapshot>,
    interrupted: bool,
    stopped: bool,
}

impl SimDriver {
    /// Create a driver with an empty script on `env`'s clock.
    pub fn new(env: SimEnv) -> Self {
        Self {
            env,
            script: VecDeque::new(),
            renders: Vec::new(),
            interrupted: false,
            stopped: false,
        }
    }

    /// Queue an event.
    #[must_use]
    pub fn event(mut self, event: AppEvent) -> Self {
        self.script.push_back(Step::Event(event));
        self
    }

    /// Queue a key press.
    #[must_use]
    pub fn key(self, key: KeyInput) -> Self {
        self.event(AppEvent::Key(key))
    }

    /// Queue one key press per character.
    #[must_use]
    pub fn type_text(self, text: &str) -> Self {
        text.chars().fold(self, |driver, c| driver.key(KeyInput::Char(c)))
    }

    /// Queue idle time. Rounded up to whole polls.
    #[must_use]
    pub fn wait(mut self, duration: Duration) -> Self {
        self.script.push_back(Step::Wait(duration));
        self
    }

    /// Every render so far, oldest first.
    pub fn renders(&self) -> &[RenderSnapshot] {
        &self.renders
    }

    /// Most recent render.
    pub fn last_render(&self) -> Option<&RenderSnapshot> {
        self.renders.last()
    }

    /// Whether the runtime released the driver.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn next_event(&mut self) -> Result<Option<AppEvent>, SimError> {
        match self.script.pop_front() {
            Some(Step::Event(event)) => Ok(Some(event)),
            Some(Step::Wait(remaining)) => {
                self.env.advance(POLL_INTERVAL);
                if remaining > POLL_INTERVAL {
                    self.script.push_front(Step::Wait(remaining - POLL_INTERVAL));
                }
                Ok(None)
            },
            None if self.interrupted => Err(SimError::Stalled),
            None => {
                tracing::trace!("script exhausted, interrupting");
                self.interrupted = true;
                Ok(Some(AppEvent::Interrupt))
            },
        }
    }
}

impl Driver for SimDriver {
    type Error = SimError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        self.next_event()
    }

    fn render<S, E>(&mut self, app: &App<S, E>) -> Result<(), Self::Error>
    where
        S: BlockStore,
        E: Environment,
    {
        self.renders.push(RenderSnapshot {
            at_ms: self.env.now_millis(),
            screen: app.screen().clone(),
            notice: app.notice().cloned(),
            loading: app.is_loading(),
        });
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_advances_clock_per_poll() {
        let env = SimEnv::at(0);
        let mut driver = SimDriver::new(env.clone()).wait(Duration::from_millis(250));

        for _ in 0..3 {
            assert_eq!(driver.poll_event().await.unwrap(), None);
        }

        assert_eq!(env.now_millis(), 300);
        assert_eq!(driver.poll_event().await.unwrap(), Some(AppEvent::Interrupt));
    }

    #[tokio::test]
    async fn events_arrive_without_advancing_time() {
        let env = SimEnv::at(0);
        let mut driver = SimDriver::new(env.clone()).type_text("12");

        assert_eq!(driver.poll_event().await.unwrap(), Some(AppEvent::Key(KeyInput::Char('1'))));
        assert_eq!(driver.poll_event().await.unwrap(), Some(AppEvent::Key(KeyInput::Char('2'))));
        assert_eq!(env.now_millis(), 0);
    }

    #[tokio::test]
    async fn polling_after_interrupt_is_an_error() {
        let mut driver = SimDriver::new(SimEnv::new());

        assert_eq!(driver.poll_event().await.unwrap(), Some(AppEvent::Interrupt));
        assert_eq!(driver.poll_event().await, Err(SimError::Stalled));
    }
}
