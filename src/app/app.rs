//! Main application controller
//!
//! Owns the wizard controller and the mounted screen, and runs the
//! draw / input / timer loop.

use crate::{
    app::{
        controller::WizardController,
        screens::ActiveScreen,
        state::{is_quit_key, ScreenEvent, WizardState},
        tui::Tui,
    },
    config::PlannerConfig,
    Result,
};
use chrono::{Local, NaiveDate};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use tracing::info;

/// TUI application controller
#[derive(Debug)]
pub struct App {
    controller: WizardController,
    screen: ActiveScreen,
    config: PlannerConfig,
    should_quit: bool,
}

impl App {
    /// Create a new application at the Home screen
    pub fn new(config: PlannerConfig) -> Self {
        let controller = WizardController::new(config.analysis_delay);
        let screen = ActiveScreen::build(
            controller.state(),
            controller.selection(),
            &config,
            Self::today(),
        );
        Self {
            controller,
            screen,
            config,
            should_quit: false,
        }
    }

    pub fn state(&self) -> WizardState {
        self.controller.state()
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn screen(&self) -> &ActiveScreen {
        &self.screen
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.remember_home_preferences();
        self.should_quit = true;
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Route a key press through the mounted screen into the controller
    pub fn handle_key(&mut self, key: KeyEvent) {
        if is_quit_key(&key) {
            self.quit();
            return;
        }

        let Some(event) = self.screen.handle_key(key) else {
            return;
        };

        if event == ScreenEvent::NavigateBack && self.controller.state() == WizardState::Home {
            info!("quit requested from home");
            self.quit();
            return;
        }

        if self.controller.dispatch(event).is_moved() {
            self.remount();
        }
    }

    /// Apply any elapsed analysis timer and advance the mounted screen
    pub fn tick(&mut self) {
        if self.controller.poll_timer().is_moved() {
            self.remount();
        }
        self.screen.tick();
    }

    /// Wait until the pending analysis completes
    pub async fn wait_for_analysis(&mut self) {
        if self.controller.wait_for_analysis().await.is_moved() {
            self.remount();
        }
    }

    // home display preferences outlive the home screen itself
    fn remember_home_preferences(&mut self) {
        if let ActiveScreen::Home(home) = &self.screen {
            self.config.dark_mode = home.is_dark_mode();
            self.config.preferred_mood = home.preferred_mood();
        }
    }

    fn remount(&mut self) {
        self.remember_home_preferences();
        self.screen = ActiveScreen::build(
            self.controller.state(),
            self.controller.selection(),
            &self.config,
            Self::today(),
        );
    }

    pub fn render(&mut self, f: &mut Frame) {
        self.screen.render(f);
    }

    /// Run the main application loop
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        info!(tick_rate = ?tui.tick_rate(), "event loop started");
        while !self.should_quit {
            self.tick();
            tui.draw(|f| self.render(f))?;
            if let Some(key) = tui.next_key()? {
                self.handle_key(key);
            }
            // let the analysis timer task make progress
            tokio::task::yield_now().await;
        }
        info!(
            sessions = self.controller.completed_sessions(),
            "application exiting"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::{PaymentPhase, PROCESSING_DELAY};
    use crate::models::TravelMood;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> App {
        App::new(PlannerConfig::default().with_analysis_delay(Duration::from_millis(500)))
    }

    fn fill_options(app: &mut App) {
        // dates: open calendar, pick today and three days later
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Right));
        }
        app.handle_key(key(KeyCode::Enter));
        // budget: standard
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        // styles: mountain
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char(' ')));
        // skip prompt, press next
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = app();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_escape_on_home_quits() {
        let mut app = app();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
        assert_eq!(app.state(), WizardState::Home);
    }

    #[test]
    fn test_destination_then_back_remounts_home() {
        let mut app = app();
        for c in "일본".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state(), WizardState::Options);
        assert_eq!(app.controller().selection().destination, "일본");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state(), WizardState::Home);
        // the search text did not survive the round trip
        let ActiveScreen::Home(home) = app.screen() else {
            panic!("home screen expected");
        };
        assert_eq!(home.search_text(), "");
        // the destination stays until overwritten
        assert_eq!(app.controller().selection().destination, "일본");
    }

    #[test]
    fn test_home_preferences_survive_remount() {
        let mut app = app();
        app.handle_key(ctrl('t'));
        app.handle_key(ctrl('y'));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state(), WizardState::Options);
        assert!(app.config().dark_mode);
        assert_eq!(app.config().preferred_mood, TravelMood::City);
    }

    #[test]
    fn test_quit_from_home_keeps_preferences() {
        let mut app = app();
        app.handle_key(ctrl('t'));
        app.handle_key(ctrl('c'));
        assert!(app.should_quit());
        assert!(app.config().dark_mode);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_flow_through_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state(), WizardState::Options);

        fill_options(&mut app);
        assert_eq!(app.state(), WizardState::Loading);

        // input is ignored while loading
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state(), WizardState::Loading);

        app.wait_for_analysis().await;
        assert_eq!(app.state(), WizardState::Results);

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state(), WizardState::Payment);
        assert_eq!(app.controller().selection().chosen_route_key, "budget");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state(), WizardState::Payment);
        // confirm is locked while the payment is processing
        app.handle_key(key(KeyCode::Enter));
        app.tick();
        assert_eq!(app.state(), WizardState::Payment);

        tokio::time::advance(PROCESSING_DELAY).await;
        app.tick();
        let ActiveScreen::Payment(payment) = app.screen() else {
            panic!("payment screen expected");
        };
        assert_eq!(payment.phase(), PaymentPhase::Complete);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state(), WizardState::Home);
        assert!(app.controller().selection().is_empty());
        assert_eq!(app.controller().completed_sessions(), 1);
        assert!(!app.should_quit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_each_state() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut app = app();
        terminal.draw(|f| app.render(f)).unwrap();

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        terminal.draw(|f| app.render(f)).unwrap();

        fill_options(&mut app);
        terminal.draw(|f| app.render(f)).unwrap();

        app.wait_for_analysis().await;
        terminal.draw(|f| app.render(f)).unwrap();

        app.handle_key(key(KeyCode::Enter));
        terminal.draw(|f| app.render(f)).unwrap();
        assert_eq!(app.state(), WizardState::Payment);

        app.handle_key(key(KeyCode::Enter));
        terminal.draw(|f| app.render(f)).unwrap();
        tokio::time::advance(PROCESSING_DELAY).await;
        app.tick();
        terminal.draw(|f| app.render(f)).unwrap();
        assert_eq!(app.state(), WizardState::Payment);
    }
}
