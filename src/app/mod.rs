//! TUI application module
//!
//! Contains the wizard state machine, its screens, the analysis timer and
//! the terminal wrapper.

pub mod app;
pub mod controller;
pub mod screens;
pub mod state;
pub mod timer;
pub mod tui;

pub use app::App;
pub use controller::WizardController;
pub use screens::ActiveScreen;
pub use state::{ForwardPayload, NavigationAction, ScreenEvent, Transition, WizardState};
pub use tui::Tui;
