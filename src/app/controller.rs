//! Wizard controller
//!
//! Owns the active [`WizardState`] and the accumulated [`TripSelection`].
//! Every edge of the flow has its own entry point which checks the
//! current state and the edge's guard before touching anything; a failed
//! check is a silent no-op reported as [`Transition::Rejected`].
//!
//! ```text
//! Home --destination--> Options --submit--> Loading --(delay)--> Results --route--> Payment
//!   ^                   |  ^                                      |  ^                |  |
//!   +------ back -------+  +------------------ back --------------+  +----- back -----+  |
//!   +------------------------------ payment confirmed (fresh session) -------------------+
//! ```

use crate::app::state::{ForwardPayload, ScreenEvent, Transition, WizardState};
use crate::app::timer::{AnalysisElapsed, AnalysisTimer};
use crate::models::{OptionsSubmission, RouteKey, TripSelection};
use crate::DEFAULT_ANALYSIS_DELAY_MS;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Navigation state machine for one user flow
#[derive(Debug)]
pub struct WizardController {
    state: WizardState,
    selection: TripSelection,
    analysis_delay: Duration,
    /// Present exactly while the wizard is in Loading
    timer: Option<AnalysisTimer>,
    timer_tx: mpsc::UnboundedSender<AnalysisElapsed>,
    timer_rx: mpsc::UnboundedReceiver<AnalysisElapsed>,
    next_ticket: u64,
    completed_sessions: u64,
}

impl WizardController {
    /// Create a controller at Home with an empty selection
    pub fn new(analysis_delay: Duration) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            state: WizardState::Home,
            selection: TripSelection::new(),
            analysis_delay,
            timer: None,
            timer_tx,
            timer_rx,
            next_ticket: 0,
            completed_sessions: 0,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn selection(&self) -> &TripSelection {
        &self.selection
    }

    pub fn analysis_delay(&self) -> Duration {
        self.analysis_delay
    }

    /// Whether a Loading -> Results transition is scheduled
    pub fn is_analysis_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Number of sessions finished through payment confirmation
    pub fn completed_sessions(&self) -> u64 {
        self.completed_sessions
    }

    /// Route a screen event to the edge it stands for in the current state
    pub fn dispatch(&mut self, event: ScreenEvent) -> Transition {
        match (self.state, event) {
            (WizardState::Home, ScreenEvent::NavigateForward(ForwardPayload::Destination(d))) => {
                self.choose_destination(&d)
            }
            (WizardState::Options, ScreenEvent::NavigateBack) => self.back_to_home(),
            (WizardState::Options, ScreenEvent::NavigateForward(ForwardPayload::Options(s))) => {
                self.submit_options(s)
            }
            (WizardState::Results, ScreenEvent::NavigateBack) => self.back_to_options(),
            (WizardState::Results, ScreenEvent::NavigateForward(ForwardPayload::Route(key))) => {
                self.select_route(key)
            }
            (WizardState::Payment, ScreenEvent::NavigateBack) => self.back_to_results(),
            (WizardState::Payment, ScreenEvent::NavigateForward(ForwardPayload::PaymentConfirmed)) => {
                self.confirm_payment()
            }
            (state, event) => {
                debug!(%state, ?event, "event not accepted in current state");
                Transition::Rejected
            }
        }
    }

    /// Home -> Options, storing the destination as given
    pub fn choose_destination(&mut self, destination: &str) -> Transition {
        if self.state != WizardState::Home || destination.is_empty() {
            return self.reject("choose_destination");
        }
        self.selection.destination = destination.to_string();
        self.move_to(WizardState::Options)
    }

    /// Options -> Home
    pub fn back_to_home(&mut self) -> Transition {
        if self.state != WizardState::Options {
            return self.reject("back_to_home");
        }
        self.move_to(WizardState::Home)
    }

    /// Options -> Loading, storing option ids, prompt and dates, and
    /// scheduling the automatic move to Results.
    ///
    /// The timer is a spawned task, so without a current tokio runtime the
    /// submission is rejected and nothing changes.
    pub fn submit_options(&mut self, submission: OptionsSubmission) -> Transition {
        if self.state != WizardState::Options || !submission.is_complete() {
            return self.reject("submit_options");
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!("no tokio runtime to schedule the analysis timer on");
            return self.reject("submit_options");
        };
        self.selection.selected_option_ids = submission.option_ids();
        self.selection.travel_dates = submission.date_range();
        self.selection.freeform_prompt = submission.prompt;

        let transition = self.move_to(WizardState::Loading);

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.timer = Some(AnalysisTimer::start(
            &runtime,
            ticket,
            self.analysis_delay,
            self.timer_tx.clone(),
        ));
        debug!(ticket, delay_ms = self.analysis_delay.as_millis() as u64, "analysis scheduled");
        transition
    }

    /// Results -> Options
    pub fn back_to_options(&mut self) -> Transition {
        if self.state != WizardState::Results {
            return self.reject("back_to_options");
        }
        self.move_to(WizardState::Options)
    }

    /// Results -> Payment, storing the route key
    pub fn select_route(&mut self, route: RouteKey) -> Transition {
        if self.state != WizardState::Results {
            return self.reject("select_route");
        }
        self.selection.chosen_route_key = route.as_str().to_string();
        self.move_to(WizardState::Payment)
    }

    /// Payment -> Results
    pub fn back_to_results(&mut self) -> Transition {
        if self.state != WizardState::Payment {
            return self.reject("back_to_results");
        }
        self.move_to(WizardState::Results)
    }

    /// Payment -> Home with a fresh selection
    pub fn confirm_payment(&mut self) -> Transition {
        if self.state != WizardState::Payment {
            return self.reject("confirm_payment");
        }
        match serde_json::to_string(&self.selection) {
            Ok(summary) => info!(booking = %summary, "booking confirmed"),
            Err(e) => warn!(error = %e, "booking confirmed, summary unavailable"),
        }
        self.selection = TripSelection::new();
        self.completed_sessions += 1;
        self.move_to(WizardState::Home)
    }

    /// Apply every timer notification that arrived since the last call.
    ///
    /// Returns the Loading -> Results transition if one was taken.
    pub fn poll_timer(&mut self) -> Transition {
        let mut outcome = Transition::Rejected;
        while let Ok(elapsed) = self.timer_rx.try_recv() {
            if let moved @ Transition::Moved { .. } = self.complete_analysis(elapsed) {
                outcome = moved;
            }
        }
        outcome
    }

    /// Wait for the pending analysis to finish and apply it.
    ///
    /// Returns `Rejected` immediately when nothing is scheduled.
    pub async fn wait_for_analysis(&mut self) -> Transition {
        while self.timer.is_some() {
            let Some(elapsed) = self.timer_rx.recv().await else {
                break;
            };
            if let moved @ Transition::Moved { .. } = self.complete_analysis(elapsed) {
                return moved;
            }
        }
        Transition::Rejected
    }

    /// Loading -> Results, accepted only for the timer currently held
    fn complete_analysis(&mut self, elapsed: AnalysisElapsed) -> Transition {
        let current = self.timer.as_ref().map(AnalysisTimer::ticket);
        if self.state != WizardState::Loading || current != Some(elapsed.ticket) {
            debug!(ticket = elapsed.ticket, ?current, "stale analysis notification ignored");
            return Transition::Rejected;
        }
        self.move_to(WizardState::Results)
    }

    fn move_to(&mut self, to: WizardState) -> Transition {
        let from = self.state;
        if from == WizardState::Loading && to != WizardState::Loading {
            // releasing the handle cancels a timer that has not fired yet
            self.timer = None;
        }
        self.state = to;
        info!(%from, %to, "wizard transition");
        Transition::Moved { from, to }
    }

    fn reject(&self, edge: &'static str) -> Transition {
        debug!(state = %self.state, edge, "transition rejected");
        Transition::Rejected
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_ANALYSIS_DELAY_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, TravelStyle};
    use chrono::NaiveDate;

    fn complete_submission() -> OptionsSubmission {
        OptionsSubmission {
            styles: [TravelStyle::Mountain, TravelStyle::Food].into_iter().collect(),
            budget: Some(BudgetTier::Standard),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 4),
            prompt: String::new(),
        }
    }

    #[test]
    fn test_controller_creation() {
        let controller = WizardController::default();
        assert_eq!(controller.state(), WizardState::Home);
        assert!(controller.selection().is_empty());
        assert!(!controller.is_analysis_pending());
        assert_eq!(controller.analysis_delay(), Duration::from_millis(3000));
    }

    #[test]
    fn test_empty_destination_is_rejected() {
        let mut controller = WizardController::default();
        assert_eq!(controller.choose_destination(""), Transition::Rejected);
        assert_eq!(controller.state(), WizardState::Home);
        assert!(controller.selection().is_empty());
    }

    #[test]
    fn test_destination_stored_verbatim() {
        let mut controller = WizardController::default();
        let t = controller.choose_destination("  교토 ");
        assert_eq!(
            t,
            Transition::Moved {
                from: WizardState::Home,
                to: WizardState::Options
            }
        );
        assert_eq!(controller.selection().destination, "  교토 ");
    }

    #[test]
    fn test_incomplete_options_rejected() {
        let mut controller = WizardController::default();
        controller.choose_destination("일본");
        let before = controller.selection().clone();

        let mut missing_budget = complete_submission();
        missing_budget.budget = None;
        assert_eq!(controller.submit_options(missing_budget), Transition::Rejected);

        let mut missing_end = complete_submission();
        missing_end.end_date = None;
        assert_eq!(controller.submit_options(missing_end), Transition::Rejected);

        let mut no_styles = complete_submission();
        no_styles.styles.clear();
        assert_eq!(controller.submit_options(no_styles), Transition::Rejected);

        assert_eq!(controller.state(), WizardState::Options);
        assert_eq!(controller.selection(), &before);
        assert!(!controller.is_analysis_pending());
    }

    #[test]
    fn test_submission_without_runtime_is_rejected() {
        let mut controller = WizardController::default();
        controller.choose_destination("일본");
        let before = controller.selection().clone();

        assert_eq!(
            controller.submit_options(complete_submission()),
            Transition::Rejected
        );
        assert_eq!(controller.state(), WizardState::Options);
        assert_eq!(controller.selection(), &before);
        assert!(!controller.is_analysis_pending());
    }

    #[test]
    fn test_edges_rejected_from_wrong_state() {
        let mut controller = WizardController::default();
        assert_eq!(controller.back_to_home(), Transition::Rejected);
        assert_eq!(controller.back_to_options(), Transition::Rejected);
        assert_eq!(controller.back_to_results(), Transition::Rejected);
        assert_eq!(controller.select_route(RouteKey::Budget), Transition::Rejected);
        assert_eq!(controller.confirm_payment(), Transition::Rejected);
        assert_eq!(controller.submit_options(complete_submission()), Transition::Rejected);
        assert_eq!(controller.state(), WizardState::Home);
        assert!(controller.selection().is_empty());
        assert_eq!(controller.completed_sessions(), 0);
    }

    #[test]
    fn test_dispatch_rejects_mismatched_payload() {
        let mut controller = WizardController::default();
        let t = controller.dispatch(ScreenEvent::NavigateForward(ForwardPayload::Route(
            RouteKey::Budget,
        )));
        assert_eq!(t, Transition::Rejected);
        assert_eq!(controller.dispatch(ScreenEvent::NavigateBack), Transition::Rejected);
        assert_eq!(controller.state(), WizardState::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_ignores_user_events() {
        let mut controller = WizardController::new(Duration::from_millis(3000));
        controller.choose_destination("일본");
        controller.submit_options(complete_submission());
        assert_eq!(controller.state(), WizardState::Loading);
        assert!(controller.is_analysis_pending());

        assert_eq!(controller.dispatch(ScreenEvent::NavigateBack), Transition::Rejected);
        assert_eq!(
            controller.dispatch(ScreenEvent::NavigateForward(ForwardPayload::Route(
                RouteKey::Optimal
            ))),
            Transition::Rejected
        );
        assert_eq!(controller.back_to_home(), Transition::Rejected);
        assert_eq!(controller.state(), WizardState::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_completes_once_after_delay() {
        let delay = Duration::from_millis(3000);
        let mut controller = WizardController::new(delay);
        controller.choose_destination("일본");
        controller.submit_options(complete_submission());
        tokio::task::yield_now().await;

        tokio::time::advance(delay - Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.poll_timer(), Transition::Rejected);
        assert_eq!(controller.state(), WizardState::Loading);

        tokio::time::advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(
            controller.poll_timer(),
            Transition::Moved {
                from: WizardState::Loading,
                to: WizardState::Results
            }
        );
        assert!(!controller.is_analysis_pending());

        // nothing left to fire
        tokio::time::advance(delay * 2).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.poll_timer(), Transition::Rejected);
        assert_eq!(controller.state(), WizardState::Results);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_ticket_is_ignored() {
        let mut controller = WizardController::new(Duration::from_millis(100));
        controller.choose_destination("일본");
        controller.submit_options(complete_submission());

        let stale = AnalysisElapsed { ticket: 99 };
        assert_eq!(controller.complete_analysis(stale), Transition::Rejected);
        assert_eq!(controller.state(), WizardState::Loading);

        assert!(controller.wait_for_analysis().await.is_moved());
        assert_eq!(controller.state(), WizardState::Results);
    }

    #[tokio::test]
    async fn test_wait_without_pending_timer_returns() {
        let mut controller = WizardController::default();
        assert_eq!(controller.wait_for_analysis().await, Transition::Rejected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_edges_do_not_mutate_selection() {
        let mut controller = WizardController::new(Duration::from_millis(10));
        controller.choose_destination("일본");
        controller.submit_options(complete_submission());
        controller.wait_for_analysis().await;
        controller.select_route(RouteKey::Oceanview);
        let snapshot = controller.selection().clone();

        assert!(controller.back_to_results().is_moved());
        assert_eq!(controller.selection(), &snapshot);
        assert!(controller.back_to_options().is_moved());
        assert_eq!(controller.selection(), &snapshot);
        assert!(controller.back_to_home().is_moved());
        assert_eq!(controller.selection(), &snapshot);
        assert_eq!(controller.state(), WizardState::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_payment_resets_session() {
        let mut controller = WizardController::new(Duration::from_millis(10));
        controller.choose_destination("태국");
        controller.submit_options(complete_submission());
        controller.wait_for_analysis().await;
        controller.select_route(RouteKey::Budget);
        assert_eq!(controller.selection().chosen_route_key, "budget");

        assert!(controller.confirm_payment().is_moved());
        assert_eq!(controller.state(), WizardState::Home);
        assert!(controller.selection().is_empty());
        assert_eq!(controller.completed_sessions(), 1);
    }
}
