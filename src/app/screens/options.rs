//! Options screen implementation
//!
//! Collects the travel period (calendar popover in range mode), a budget
//! tier, travel styles and a freeform request. All of it is local to the
//! screen until the user submits.

use crate::app::screens::widgets::{button, centered_rect, render_help, render_step_header, TextInput};
use crate::app::state::{ForwardPayload, ScreenEvent, WizardState};
use crate::models::catalog::{BudgetTier, TravelStyle, EXAMPLE_PROMPTS};
use crate::models::{DateRange, OptionsSubmission};
use crate::util::units::{format_korean_date, format_long_date};
use chrono::{Datelike, Duration as ChronoDuration, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::collections::BTreeSet;

const STYLE_COLUMNS: usize = 6;

/// Focusable sections, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsSection {
    Dates,
    Budget,
    Styles,
    Prompt,
    Actions,
}

impl OptionsSection {
    const ORDER: [OptionsSection; 5] = [
        Self::Dates,
        Self::Budget,
        Self::Styles,
        Self::Prompt,
        Self::Actions,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|s| *s == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let idx = Self::ORDER.iter().position(|s| *s == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Action buttons at the bottom of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsAction {
    Back,
    Next,
}

/// Start/end picking in range mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangePicker {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl RangePicker {
    /// First pick sets the start; a later (or same) pick sets the end;
    /// an earlier pick, or any pick after completion, starts over.
    pub fn pick(&mut self, date: NaiveDate) {
        match (self.start, self.end) {
            (Some(start), None) if date >= start => self.end = Some(date),
            _ => {
                self.start = Some(date);
                self.end = None;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start?, self.end?)
    }

    fn contains(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => date >= start && date <= end,
            (Some(start), None) => date == start,
            _ => false,
        }
    }
}

/// Calendar popover; exists only while open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CalendarPopover {
    cursor: NaiveDate,
}

/// Options screen component
#[derive(Debug)]
pub struct OptionsScreen {
    destination: String,
    today: NaiveDate,
    focus: OptionsSection,
    range: RangePicker,
    calendar: Option<CalendarPopover>,
    budget: Option<BudgetTier>,
    budget_cursor: usize,
    styles: BTreeSet<TravelStyle>,
    style_cursor: usize,
    prompt: TextInput,
    example_index: Option<usize>,
    action: OptionsAction,
}

impl OptionsScreen {
    /// Create a new options screen; dates before `today` cannot be picked
    pub fn new(destination: &str, today: NaiveDate) -> Self {
        Self {
            destination: destination.to_string(),
            today,
            focus: OptionsSection::Dates,
            range: RangePicker::default(),
            calendar: None,
            budget: None,
            budget_cursor: 0,
            styles: BTreeSet::new(),
            style_cursor: 0,
            prompt: TextInput::with_limit(300),
            example_index: None,
            action: OptionsAction::Next,
        }
    }

    pub fn focus(&self) -> OptionsSection {
        self.focus
    }

    pub fn is_calendar_open(&self) -> bool {
        self.calendar.is_some()
    }

    pub fn range(&self) -> &RangePicker {
        &self.range
    }

    pub fn prompt(&self) -> &str {
        self.prompt.value()
    }

    /// Current choices as a submission payload
    pub fn submission(&self) -> OptionsSubmission {
        OptionsSubmission {
            styles: self.styles.clone(),
            budget: self.budget,
            start_date: self.range.start(),
            end_date: self.range.end(),
            prompt: self.prompt.value().to_string(),
        }
    }

    /// Whether the "next" button is enabled
    pub fn can_submit(&self) -> bool {
        self.submission().is_complete()
    }

    pub fn toggle_style(&mut self, style: TravelStyle) {
        if !self.styles.remove(&style) {
            self.styles.insert(style);
        }
    }

    pub fn select_budget(&mut self, budget: BudgetTier) {
        self.budget = Some(budget);
        self.budget_cursor = BudgetTier::ALL.iter().position(|b| *b == budget).unwrap_or(0);
    }

    /// Pick a calendar date; past dates are ignored
    pub fn pick_date(&mut self, date: NaiveDate) {
        if date < self.today {
            return;
        }
        self.range.pick(date);
        if self.range.range().is_some() {
            self.calendar = None;
        }
    }

    pub fn open_calendar(&mut self) {
        let cursor = self.range.start().unwrap_or(self.today).max(self.today);
        self.calendar = Some(CalendarPopover { cursor });
    }

    /// Fill the request field with the next example prompt
    pub fn cycle_example_prompt(&mut self) {
        let next = self.example_index.map_or(0, |i| (i + 1) % EXAMPLE_PROMPTS.len());
        self.example_index = Some(next);
        self.prompt.set(EXAMPLE_PROMPTS[next]);
    }

    /// Handle a key press; returns the event to hand to the controller
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenEvent> {
        if self.calendar.is_some() {
            self.handle_calendar_key(key);
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('e') {
                self.focus = OptionsSection::Prompt;
                self.cycle_example_prompt();
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(ScreenEvent::NavigateBack),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return None;
            }
            _ => {}
        }

        match self.focus {
            OptionsSection::Dates => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.open_calendar(),
                KeyCode::Delete | KeyCode::Backspace => self.range.reset(),
                KeyCode::Down => self.focus = OptionsSection::Budget,
                _ => {}
            },
            OptionsSection::Budget => match key.code {
                KeyCode::Left => {
                    self.budget_cursor =
                        (self.budget_cursor + BudgetTier::ALL.len() - 1) % BudgetTier::ALL.len();
                }
                KeyCode::Right => {
                    self.budget_cursor = (self.budget_cursor + 1) % BudgetTier::ALL.len();
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.select_budget(BudgetTier::ALL[self.budget_cursor]);
                }
                KeyCode::Up => self.focus = OptionsSection::Dates,
                KeyCode::Down => self.focus = OptionsSection::Styles,
                _ => {}
            },
            OptionsSection::Styles => {
                let count = TravelStyle::ALL.len();
                match key.code {
                    KeyCode::Left => self.style_cursor = (self.style_cursor + count - 1) % count,
                    KeyCode::Right => self.style_cursor = (self.style_cursor + 1) % count,
                    KeyCode::Up => {
                        if self.style_cursor < STYLE_COLUMNS {
                            self.focus = OptionsSection::Budget;
                        } else {
                            self.style_cursor -= STYLE_COLUMNS;
                        }
                    }
                    KeyCode::Down => {
                        if self.style_cursor + STYLE_COLUMNS < count {
                            self.style_cursor += STYLE_COLUMNS;
                        } else {
                            self.focus = OptionsSection::Prompt;
                        }
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        self.toggle_style(TravelStyle::ALL[self.style_cursor]);
                    }
                    _ => {}
                }
            }
            OptionsSection::Prompt => match key.code {
                KeyCode::Enter => self.focus = OptionsSection::Actions,
                _ => {
                    self.prompt.handle_key(key);
                }
            },
            OptionsSection::Actions => match key.code {
                KeyCode::Left => self.action = OptionsAction::Back,
                KeyCode::Right => self.action = OptionsAction::Next,
                KeyCode::Up => self.focus = OptionsSection::Prompt,
                KeyCode::Enter => {
                    return match self.action {
                        OptionsAction::Back => Some(ScreenEvent::NavigateBack),
                        // disabled until the submit guard holds
                        OptionsAction::Next if self.can_submit() => Some(
                            ScreenEvent::NavigateForward(ForwardPayload::Options(self.submission())),
                        ),
                        OptionsAction::Next => None,
                    };
                }
                _ => {}
            },
        }
        None
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        let Some(CalendarPopover { cursor }) = self.calendar else {
            return;
        };
        let moved = match key.code {
            KeyCode::Left => cursor.checked_sub_signed(ChronoDuration::days(1)),
            KeyCode::Right => cursor.checked_add_signed(ChronoDuration::days(1)),
            KeyCode::Up => cursor.checked_sub_signed(ChronoDuration::days(7)),
            KeyCode::Down => cursor.checked_add_signed(ChronoDuration::days(7)),
            KeyCode::PageUp => cursor.checked_sub_months(Months::new(1)),
            KeyCode::PageDown => cursor.checked_add_months(Months::new(1)),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.pick_date(cursor);
                return;
            }
            KeyCode::Char('r') | KeyCode::Delete | KeyCode::Backspace => {
                self.range.reset();
                return;
            }
            KeyCode::Esc => {
                self.calendar = None;
                return;
            }
            _ => None,
        };
        if let (Some(date), Some(popover)) = (moved, self.calendar.as_mut()) {
            popover.cursor = date;
        }
    }

    /// Render the options screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title
                Constraint::Length(3), // Dates
                Constraint::Length(3), // Budget
                Constraint::Length(4), // Styles
                Constraint::Min(4),    // Prompt
                Constraint::Length(1), // Actions
                Constraint::Length(3), // Help
            ])
            .split(size);

        render_step_header(
            f,
            chunks[0],
            WizardState::Options.step(),
            &format!("{} 여행 - 어떤 여행을 원하시나요?", self.destination),
            "여행 기간, 예산, 스타일을 선택해주세요 (스타일은 복수선택 가능)",
        );
        self.render_dates(f, chunks[1]);
        self.render_budget(f, chunks[2]);
        self.render_styles(f, chunks[3]);
        self.render_prompt(f, chunks[4]);
        self.render_actions(f, chunks[5]);

        if self.calendar.is_some() {
            render_help(
                f,
                chunks[6],
                &[
                    ("←→↑↓", "날짜 이동"),
                    ("PgUp/PgDn", "월 이동"),
                    ("Enter", "선택"),
                    ("r", "초기화"),
                    ("Esc", "닫기"),
                ],
            );
            self.render_calendar(f, size);
        } else {
            render_help(
                f,
                chunks[6],
                &[
                    ("Tab", "다음 항목"),
                    ("←→↑↓", "이동"),
                    ("Enter/Space", "선택"),
                    ("Ctrl+E", "예시 요청"),
                    ("Esc", "이전"),
                ],
            );
        }
    }

    fn section_block(&self, section: OptionsSection, title: &str) -> Block<'static> {
        let border = if self.focus == section {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(Style::default().fg(border))
    }

    fn render_dates(&self, f: &mut Frame, area: Rect) {
        let line = match (self.range.start(), self.range.end()) {
            (Some(start), Some(end)) => {
                let range = self.range.range();
                Line::from(vec![
                    Span::styled(
                        format!("📅 {} - {}", format_long_date(start), format_long_date(end)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        range.map(|r| format!("  ({})", r.length_label())).unwrap_or_default(),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            }
            (Some(start), None) => Line::from(Span::styled(
                format!("📅 {} - 종료일 선택", format_long_date(start)),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            _ => Line::from(Span::styled("📅 날짜 선택", Style::default().fg(Color::Gray))),
        };
        let dates = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(self.section_block(OptionsSection::Dates, "여행 기간"));
        f.render_widget(dates, area);
    }

    fn render_budget(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == OptionsSection::Budget;
        let mut spans = Vec::new();
        for (i, tier) in BudgetTier::ALL.iter().enumerate() {
            let chosen = self.budget == Some(*tier);
            let mut style = if chosen {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            if focused && i == self.budget_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(
                format!(" {} {} ({}) ", if chosen { "◉" } else { "○" }, tier.label(), tier.range()),
                style,
            ));
            spans.push(Span::raw("  "));
        }
        let budget = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(self.section_block(OptionsSection::Budget, "예산"));
        f.render_widget(budget, area);
    }

    fn render_styles(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == OptionsSection::Styles;
        let lines: Vec<Line> = TravelStyle::ALL
            .chunks(STYLE_COLUMNS)
            .enumerate()
            .map(|(row, styles)| {
                let spans: Vec<Span> = styles
                    .iter()
                    .enumerate()
                    .map(|(col, style)| {
                        let idx = row * STYLE_COLUMNS + col;
                        let selected = self.styles.contains(style);
                        let mut s = if selected {
                            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                        } else {
                            Style::default()
                        };
                        if focused && idx == self.style_cursor {
                            s = s.add_modifier(Modifier::REVERSED);
                        }
                        Span::styled(
                            format!(" [{}] {} ", if selected { "x" } else { " " }, style.label()),
                            s,
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        let styles = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(self.section_block(OptionsSection::Styles, "여행 스타일"));
        f.render_widget(styles, area);
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == OptionsSection::Prompt;
        let body = if self.prompt.is_empty() {
            vec![
                Line::from(Span::styled(
                    "예시: 일출 명소와 현지 맛집 위주로 일정을 짜주세요.",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    "💡 선호하는 관광지 유형, 식당 분위기, 이동 수단 등을 자유롭게 작성하세요",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        } else {
            vec![Line::from(format!(
                "{}{}",
                self.prompt.value(),
                if focused { "▏" } else { "" }
            ))]
        };
        let prompt = Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(self.section_block(OptionsSection::Prompt, "✨ AI에게 원하는 여행을 말해주세요"));
        f.render_widget(prompt, area);
    }

    fn render_actions(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == OptionsSection::Actions;
        let line = Line::from(vec![
            button("이전", focused && self.action == OptionsAction::Back, true),
            Span::raw("    "),
            button(
                "다음",
                focused && self.action == OptionsAction::Next,
                self.can_submit(),
            ),
        ]);
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn render_calendar(&self, f: &mut Frame, area: Rect) {
        let Some(popover) = self.calendar else {
            return;
        };
        let cursor = popover.cursor;
        let mut lines = vec![
            Line::from(Span::styled(
                cursor.format("%Y년 %-m월").to_string(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " 일  월  화  수  목  금  토",
                Style::default().fg(Color::Gray),
            )),
        ];

        let first = NaiveDate::from_ymd_opt(cursor.year(), cursor.month(), 1).unwrap_or(cursor);
        let offset = first.weekday().num_days_from_sunday() as usize;
        let mut week: Vec<Span> = (0..offset).map(|_| Span::raw("    ")).collect();
        let mut day = first;
        while day.month() == cursor.month() {
            let mut style = Style::default();
            if day < self.today {
                style = style.fg(Color::DarkGray);
            } else if self.range.contains(day) {
                style = style.bg(Color::Blue).fg(Color::White);
            }
            if day == cursor {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            week.push(Span::styled(format!(" {:>2} ", day.day()), style));
            if week.len() == 7 {
                lines.push(Line::from(std::mem::take(&mut week)));
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        if !week.is_empty() {
            lines.push(Line::from(week));
        }

        lines.push(Line::from(""));
        let summary = match self.range.range() {
            Some(range) => format!(
                "선택된 기간: {} ~ {}",
                format_korean_date(range.start()),
                format_korean_date(range.end())
            ),
            None => "시작일과 종료일을 선택해주세요".to_string(),
        };
        lines.push(Line::from(Span::styled(summary, Style::default().fg(Color::Blue))));

        let height = (lines.len() + 2) as u16;
        let popup = centered_rect(40, height, area);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" 여행 기간 선택 ")
                    .border_style(Style::default().fg(Color::Blue)),
            ),
            popup,
        );
    }
}
