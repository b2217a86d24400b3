//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: flow state machine
//! - [`Driver`]: platform-specific I/O
//! - [`Environment`]: clock used for display ticks and simulated delays

use phonegate_core::{BlockStore, Environment};

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Block record store
/// - `E`: Environment (clock and sleep)
pub struct Runtime<D, S, E>
where
    D: Driver,
    S: BlockStore,
    E: Environment,
{
    driver: D,
    app: App<S, E>,
    env: E,
    /// Environment time of the last display tick.
    last_tick_ms: u64,
}

impl<D, S, E> Runtime<D, S, E>
where
    D: Driver,
    S: BlockStore,
    E: Environment,
{
    /// Create a new runtime. Time is taken from the app's tracker.
    pub fn new(driver: D, app: App<S, E>) -> Self {
        let env = app.tracker().env().clone();
        let last_tick_ms = env.now_millis();
        Self { driver, app, env, last_tick_ms }
    }

    /// Run the main event loop until the app asks to quit.
    ///
    /// Each cycle:
    /// 1. Polls for an input event from the driver
    /// 2. Feeds it to the App and executes the resulting actions
    /// 3. Emits a display tick once per `tick_interval` of environment time
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        let actions = self.app.start();
        if !self.process_actions(actions).await? {
            loop {
                if self.process_cycle().await? {
                    break;
                }
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        let tick_ms =
            u64::try_from(self.app.config().tick_interval.as_millis()).unwrap_or(u64::MAX);
        let now = self.env.now_millis();
        if now.saturating_sub(self.last_tick_ms) >= tick_ms {
            self.last_tick_ms = now;
            let actions = self.app.handle(AppEvent::Tick);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// A simulated request is one await between two gate evaluations: the App
    /// gated before emitting it, and gates again on `DelayElapsed`. The delay
    /// always runs to completion.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Simulate { request, delay } => {
                        tracing::debug!(?request, ?delay, "simulating network round trip");
                        self.env.sleep(delay).await;
                        pending_actions.extend(self.app.handle(AppEvent::DelayElapsed(request)));
                    },
                }
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App<S, E> {
        &self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
