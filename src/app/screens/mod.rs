//! TUI screen components
//!
//! One screen per wizard state. A screen is built when its state is
//! entered and dropped when the state is left, so its local UI state
//! never outlives the visit.

pub mod home;
pub mod loading;
pub mod map;
pub mod options;
pub mod payment;
pub mod results;
pub mod widgets;

pub use home::{HomeFocus, HomeScreen};
pub use loading::LoadingScreen;
pub use options::{OptionsSection, OptionsScreen, RangePicker};
pub use payment::{PaymentField, PaymentPhase, PaymentScreen, PROCESSING_DELAY};
pub use results::ResultsScreen;

use crate::app::state::{ScreenEvent, WizardState};
use crate::config::PlannerConfig;
use crate::models::TripSelection;
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::Frame;

/// The screen mounted for the current wizard state
#[derive(Debug)]
pub enum ActiveScreen {
    Home(HomeScreen),
    Options(OptionsScreen),
    Loading(LoadingScreen),
    Results(ResultsScreen),
    Payment(PaymentScreen),
}

impl ActiveScreen {
    /// Mount the screen for `state`, handing it only the fields it reads
    pub fn build(
        state: WizardState,
        selection: &TripSelection,
        config: &PlannerConfig,
        today: NaiveDate,
    ) -> Self {
        match state {
            WizardState::Home => Self::Home(HomeScreen::new(config.dark_mode, config.preferred_mood)),
            WizardState::Options => Self::Options(OptionsScreen::new(&selection.destination, today)),
            WizardState::Loading => Self::Loading(LoadingScreen::new(
                &selection.destination,
                config.analysis_delay,
            )),
            WizardState::Results => Self::Results(ResultsScreen::new(selection)),
            WizardState::Payment => Self::Payment(PaymentScreen::new(selection)),
        }
    }

    pub fn state(&self) -> WizardState {
        match self {
            Self::Home(_) => WizardState::Home,
            Self::Options(_) => WizardState::Options,
            Self::Loading(_) => WizardState::Loading,
            Self::Results(_) => WizardState::Results,
            Self::Payment(_) => WizardState::Payment,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenEvent> {
        match self {
            Self::Home(screen) => screen.handle_key(key),
            Self::Options(screen) => screen.handle_key(key),
            Self::Loading(screen) => screen.handle_key(key),
            Self::Results(screen) => screen.handle_key(key),
            Self::Payment(screen) => screen.handle_key(key),
        }
    }

    /// Advance time-driven local state of the mounted screen
    pub fn tick(&mut self) {
        if let Self::Payment(screen) = self {
            screen.tick();
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        match self {
            Self::Home(screen) => screen.render(f),
            Self::Options(screen) => screen.render(f),
            Self::Loading(screen) => screen.render(f),
            Self::Results(screen) => screen.render(f),
            Self::Payment(screen) => screen.render(f),
        }
    }
}
