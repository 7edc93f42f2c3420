//! Terminal management system
//!
//! Handles crossterm backend initialization, screen management,
//! and keyboard event processing for the TUI application.

use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// Terminal wrapper that manages crossterm backend and screen state
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    last_tick: Instant,
    tick_rate: Duration,
    active: bool,
}

impl Tui {
    /// Create a new TUI instance with crossterm backend
    pub fn new(tick_rate: Duration) -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            last_tick: Instant::now(),
            tick_rate,
            active: false,
        })
    }

    /// Initialize terminal with proper setup
    pub fn init(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.active = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Check if terminal meets minimum size requirements (80x24)
    pub fn is_size_adequate(&self) -> io::Result<bool> {
        let size = self.terminal.size()?;
        Ok(size.width >= 80 && size.height >= 24)
    }

    /// Draw the UI using the provided render function
    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Wait up to one tick for a key press
    pub fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let timeout = poll_timeout(self.tick_rate, self.last_tick.elapsed());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }

        if self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = Instant::now();
        }

        Ok(None)
    }
}

/// Time left in the current tick, zero once it has run over
fn poll_timeout(tick_rate: Duration, elapsed: Duration) -> Duration {
    tick_rate.checked_sub(elapsed).unwrap_or(Duration::ZERO)
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Ensure terminal is restored even if restore() wasn't called
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_creation() {
        // CI runners may have no terminal attached to stdout
        let rate = Duration::from_millis(100);
        if let Ok(mut tui) = Tui::new(rate) {
            assert_eq!(tui.tick_rate(), rate);
            assert!(!tui.active);
            // restoring a terminal that was never initialized is a no-op
            assert!(tui.restore().is_ok());
        }
    }

    #[test]
    fn test_poll_timeout() {
        let rate = Duration::from_millis(250);
        assert_eq!(poll_timeout(rate, Duration::ZERO), rate);
        assert_eq!(
            poll_timeout(rate, Duration::from_millis(100)),
            Duration::from_millis(150)
        );
        assert_eq!(poll_timeout(rate, rate), Duration::ZERO);
        assert_eq!(poll_timeout(rate, Duration::from_secs(1)), Duration::ZERO);
    }
}
