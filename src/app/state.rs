//! Wizard states and navigation events
//!
//! Defines the screens of the wizard, the tagged events screens emit, and
//! the keyboard mapping shared by the list-style screens.

use crate::models::{OptionsSubmission, RouteKey};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// Wizard screens. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardState {
    /// Destination pick
    #[default]
    Home,
    /// Dates, budget, travel styles and freeform request
    Options,
    /// Simulated analysis; leaves on its own after a fixed delay
    Loading,
    /// Route comparison
    Results,
    /// Mock payment
    Payment,
}

impl WizardState {
    /// Position in the linear flow, starting at 1
    pub fn step(&self) -> usize {
        match self {
            Self::Home => 1,
            Self::Options => 2,
            Self::Loading => 3,
            Self::Results => 4,
            Self::Payment => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "여행지 선택",
            Self::Options => "여행 옵션",
            Self::Loading => "AI 분석",
            Self::Results => "경로 비교",
            Self::Payment => "결제",
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "home",
            Self::Options => "options",
            Self::Loading => "loading",
            Self::Results => "results",
            Self::Payment => "payment",
        };
        f.write_str(name)
    }
}

/// Data a screen collected when the user moves forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardPayload {
    /// Home: chosen destination
    Destination(String),
    /// Options: styles, budget, dates and freeform request
    Options(OptionsSubmission),
    /// Results: route preset to book
    Route(RouteKey),
    /// Payment: booking acknowledged, start over
    PaymentConfirmed,
}

/// Event emitted by a screen and consumed by the controller's dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    NavigateForward(ForwardPayload),
    NavigateBack,
}

/// Outcome of a dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The edge was taken
    Moved { from: WizardState, to: WizardState },
    /// Wrong state or unmet guard; nothing changed
    Rejected,
}

impl Transition {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Quit application (Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Convert keyboard event to navigation action.
///
/// Only `Ctrl+C` quits: several screens take free text, so plain letters
/// cannot be reserved globally.
pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            NavigationAction::Quit
        }

        KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
        KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
        KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
        KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

        KeyCode::Enter => NavigationAction::Select,

        KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

        KeyCode::BackTab => NavigationAction::Previous,
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                NavigationAction::Previous
            } else {
                NavigationAction::Next
            }
        }

        _ => NavigationAction::None,
    }
}

/// Whether the key is the global quit chord
pub fn is_quit_key(key: &KeyEvent) -> bool {
    key_to_navigation(*key) == NavigationAction::Quit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_home() {
        assert_eq!(WizardState::default(), WizardState::Home);
        assert_eq!(WizardState::Payment.step(), 5);
        assert_eq!(WizardState::Loading.to_string(), "loading");
    }

    #[test]
    fn test_key_to_navigation() {
        assert_eq!(
            key_to_navigation(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            NavigationAction::Quit
        );
        // plain letters never quit
        assert_eq!(
            key_to_navigation(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            NavigationAction::None
        );

        assert_eq!(
            key_to_navigation(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
            NavigationAction::Up
        );
        assert_eq!(
            key_to_navigation(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE)),
            NavigationAction::Right
        );
        assert_eq!(
            key_to_navigation(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            NavigationAction::Select
        );
        assert_eq!(
            key_to_navigation(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            NavigationAction::Back
        );
        assert_eq!(
            key_to_navigation(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            NavigationAction::Next
        );
        assert_eq!(
            key_to_navigation(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            NavigationAction::Previous
        );
        assert_eq!(
            key_to_navigation(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            NavigationAction::Previous
        );
    }

    #[test]
    fn test_transition_is_moved() {
        assert!(Transition::Moved {
            from: WizardState::Home,
            to: WizardState::Options
        }
        .is_moved());
        assert!(!Transition::Rejected.is_moved());
    }
}
