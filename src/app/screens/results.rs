//! Results screen implementation
//!
//! Compares the three route presets: map, price analysis, day plans and
//! recommended spots, alongside what the user asked for.

use crate::app::screens::map::render_route_map;
use crate::app::screens::widgets::{render_help, render_step_header};
use crate::app::state::{key_to_navigation, ForwardPayload, NavigationAction, ScreenEvent, WizardState};
use crate::models::catalog::{option_label, RECOMMENDED_SPOTS};
use crate::models::route::{PriceAnalysis, ROUTE_PRESETS};
use crate::models::{DateRange, RouteKey, TripSelection};
use crate::util::units::{format_korean_date, format_manwon};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

/// Results screen component
#[derive(Debug)]
pub struct ResultsScreen {
    destination: String,
    option_labels: Vec<&'static str>,
    prompt: String,
    dates: Option<DateRange>,
    active: RouteKey,
    analysis: Option<PriceAnalysis>,
}

impl ResultsScreen {
    /// Build from the accumulated selection; a previously chosen route is
    /// shown first
    pub fn new(selection: &TripSelection) -> Self {
        Self {
            destination: selection.destination.clone(),
            option_labels: selection
                .selected_option_ids
                .iter()
                .filter_map(|id| option_label(id))
                .collect(),
            prompt: selection.freeform_prompt.clone(),
            dates: selection.travel_dates,
            active: selection.chosen_route_key.parse().unwrap_or_default(),
            analysis: PriceAnalysis::from_presets(&ROUTE_PRESETS),
        }
    }

    pub fn active_route(&self) -> RouteKey {
        self.active
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenEvent> {
        if let KeyCode::Char(c @ '1'..='3') = key.code {
            let idx = c as usize - '1' as usize;
            self.active = RouteKey::ALL[idx];
            return None;
        }

        match key_to_navigation(key) {
            NavigationAction::Left | NavigationAction::Previous => {
                self.active = self.active.previous();
                None
            }
            NavigationAction::Right | NavigationAction::Next => {
                self.active = self.active.next();
                None
            }
            NavigationAction::Select => Some(ScreenEvent::NavigateForward(ForwardPayload::Route(
                self.active,
            ))),
            NavigationAction::Back => Some(ScreenEvent::NavigateBack),
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title
                Constraint::Length(3), // Tabs
                Constraint::Min(12),   // Map + details
                Constraint::Length(7), // Day plans + spots
                Constraint::Length(3), // Help
            ])
            .split(f.size());

        let subtitle = match self.dates {
            Some(range) => format!(
                "{} 여행 · {} ~ {} ({})",
                self.destination,
                format_korean_date(range.start()),
                format_korean_date(range.end()),
                range.length_label()
            ),
            None => format!("{} 여행", self.destination),
        };
        render_step_header(
            f,
            chunks[0],
            WizardState::Results.step(),
            "AI가 추천하는 최적의 경로",
            &subtitle,
        );

        self.render_tabs(f, chunks[1]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);
        render_route_map(f, middle[0], self.active.preset());
        self.render_details(f, middle[1]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[3]);
        self.render_days(f, bottom[0]);
        self.render_spots(f, bottom[1]);

        render_help(
            f,
            chunks[4],
            &[
                ("←→/1-3", "경로 전환"),
                ("Enter", "이 경로로 예약하기"),
                ("Esc", "옵션 수정"),
                ("Ctrl+C", "종료"),
            ],
        );
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = RouteKey::ALL
            .iter()
            .map(|key| {
                let preset = key.preset();
                Line::from(format!("{} {}", preset.name, format_manwon(preset.total_cost)))
            })
            .collect();
        let selected = RouteKey::ALL
            .iter()
            .position(|k| *k == self.active)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title(" 추천 경로 "))
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::from(self.active.preset().color))
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );
        f.render_widget(tabs, area);
    }

    fn render_details(&self, f: &mut Frame, area: Rect) {
        let preset = self.active.preset();
        let mut lines = vec![
            Line::from(Span::styled(
                preset.description,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} · 만족도 {}점 · {}",
                preset.duration,
                preset.score,
                format_manwon(preset.total_cost)
            )),
            Line::from(""),
        ];
        lines.extend(
            preset
                .highlights
                .iter()
                .map(|h| Line::from(format!("  ✓ {}", h))),
        );

        if let Some(analysis) = self.analysis {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "💰 가격 분석",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "  최저 {} · 평균 {} · 최고 {}",
                format_manwon(analysis.lowest),
                format_manwon(analysis.average),
                format_manwon(analysis.highest)
            )));
            lines.push(Line::from(format!(
                "  이 경로: {}",
                analysis.verdict(preset.total_cost)
            )));
        }

        if !self.option_labels.is_empty() || !self.prompt.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "🎯 반영된 요청",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            if !self.option_labels.is_empty() {
                lines.push(Line::from(format!("  {}", self.option_labels.join(", "))));
            }
            if !self.prompt.is_empty() {
                lines.push(Line::from(format!("  \"{}\"", self.prompt)));
            }
        }

        let details = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" 경로 상세 "));
        f.render_widget(details, area);
    }

    fn render_days(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .active
            .preset()
            .days
            .iter()
            .map(|day| {
                Line::from(vec![
                    Span::styled(
                        format!("Day {} ", day.day),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(day.activities.join(" → ")),
                ])
            })
            .collect();
        let days = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" 일정 "));
        f.render_widget(days, area);
    }

    fn render_spots(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = RECOMMENDED_SPOTS
            .iter()
            .map(|spot| {
                Line::from(vec![
                    Span::styled(spot.name, Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {} · {}", spot.kind, spot.time),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            })
            .collect();
        let spots = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" 📍 추천 장소 "));
        f.render_widget(spots, area);
    }
}
