//! Loading screen implementation
//!
//! Shows simulated analysis progress. The controller leaves this state on
//! its own once the analysis timer fires; the screen takes no input.

use crate::app::screens::widgets::render_step_header;
use crate::app::state::{ScreenEvent, WizardState};
use crate::util::units::{format_duration, progress_ratio};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const ANALYSIS_STEPS: [&str; 4] = [
    "여행지 정보 수집 중",
    "항공권 가격 비교 중",
    "숙소 및 일정 최적화 중",
    "맞춤 경로 생성 중",
];

/// Loading screen component
#[derive(Debug)]
pub struct LoadingScreen {
    destination: String,
    started: Instant,
    delay: Duration,
}

impl LoadingScreen {
    pub fn new(destination: &str, delay: Duration) -> Self {
        Self {
            destination: destination.to_string(),
            started: Instant::now(),
            delay,
        }
    }

    /// Fraction of the analysis delay that has passed
    pub fn progress(&self) -> f64 {
        progress_ratio(self.started.elapsed(), self.delay)
    }

    /// Index of the analysis step to highlight for `progress`
    pub fn step_index(progress: f64) -> usize {
        let idx = (progress * ANALYSIS_STEPS.len() as f64) as usize;
        idx.min(ANALYSIS_STEPS.len() - 1)
    }

    /// Input is ignored while analysis runs
    pub fn handle_key(&mut self, _key: KeyEvent) -> Option<ScreenEvent> {
        None
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title
                Constraint::Length(3), // Gauge
                Constraint::Min(6),    // Steps
            ])
            .split(f.size());

        render_step_header(
            f,
            chunks[0],
            WizardState::Loading.step(),
            "AI가 최적의 여행 경로를 분석하고 있습니다",
            &format!("{} 여행을 위한 맞춤 일정을 준비 중입니다", self.destination),
        );

        let progress = self.progress();
        let remaining = self.delay.saturating_sub(self.started.elapsed());
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" 분석 진행률 "))
            .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
            .ratio(progress)
            .label(format!(
                "{:.0}% (남은 시간 {})",
                progress * 100.0,
                format_duration(remaining)
            ));
        f.render_widget(gauge, chunks[1]);

        let current = Self::step_index(progress);
        let lines: Vec<Line> = ANALYSIS_STEPS
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let (marker, style) = if i < current {
                    ("✓", Style::default().fg(Color::Green))
                } else if i == current {
                    (
                        "●",
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("○", Style::default().fg(Color::DarkGray))
                };
                Line::from(Span::styled(format!("{} {}", marker, step), style))
            })
            .collect();

        let steps = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(steps, chunks[2]);
    }
}
