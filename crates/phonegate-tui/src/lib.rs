//! Terminal UI for phonegate
//!
//! A thin shell over [`phonegate_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`phonegate_app::Runtime`]
//!
//! This crate only handles terminal input, rendering and wall-clock time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod system_env;
pub mod terminal;
pub mod ui;

pub use phonegate_app::{App, AppEvent, Driver, FlowConfig, KeyInput, Runtime};
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
