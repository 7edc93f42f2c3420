//! Scoped analysis timer
//!
//! Acquired when the wizard enters Loading and released on any exit.
//! Dropping the handle aborts the sleeping task, so a timer that belonged
//! to an earlier Loading visit can never post into a later state.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Notification posted once the analysis delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisElapsed {
    pub ticket: u64,
}

/// Handle to a pending Loading -> Results transition
#[derive(Debug)]
pub struct AnalysisTimer {
    ticket: u64,
    handle: JoinHandle<()>,
}

impl AnalysisTimer {
    /// Spawn the timer task on `runtime`
    pub fn start(
        runtime: &Handle,
        ticket: u64,
        delay: Duration,
        tx: mpsc::UnboundedSender<AnalysisElapsed>,
    ) -> Self {
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the controller was dropped
            let _ = tx.send(AnalysisElapsed { ticket });
        });
        Self { ticket, handle }
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

impl Drop for AnalysisTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
