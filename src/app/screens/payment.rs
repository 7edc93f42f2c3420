//! Payment screen implementation
//!
//! Booking summary plus a mock payment form. Nothing is charged. Enter on
//! the form starts a short processing phase that locks the screen, after
//! which a receipt with a reservation number is shown; Enter on the
//! receipt confirms.

use crate::app::screens::widgets::{button, render_help, render_step_header, TextInput};
use crate::app::state::{ForwardPayload, ScreenEvent, WizardState};
use crate::models::{DateRange, RouteKey, RoutePreset, TripSelection};
use crate::util::units::{format_korean_date, format_manwon, mask_card_number};
use chrono::{Local, NaiveDateTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

/// How long the mock payment stays in the processing phase
pub const PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Mock form fields, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    CardNumber,
    Expiry,
    Cvc,
    CardHolder,
    TravelerName,
    BirthDate,
    Phone,
    Email,
}

impl PaymentField {
    pub const ALL: [PaymentField; 8] = [
        Self::CardNumber,
        Self::Expiry,
        Self::Cvc,
        Self::CardHolder,
        Self::TravelerName,
        Self::BirthDate,
        Self::Phone,
        Self::Email,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CardNumber => "카드 번호",
            Self::Expiry => "유효기간",
            Self::Cvc => "CVC",
            Self::CardHolder => "카드 소유자명",
            Self::TravelerName => "이름 (여권상 영문)",
            Self::BirthDate => "생년월일",
            Self::Phone => "연락처",
            Self::Email => "이메일",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::CardNumber => "1234 5678 9012 3456",
            Self::Expiry => "MM/YY",
            Self::Cvc => "123",
            Self::CardHolder => "홍길동",
            Self::TravelerName => "HONG GILDONG",
            Self::BirthDate => "1990-01-01",
            Self::Phone => "010-1234-5678",
            Self::Email => "example@email.com",
        }
    }

    fn limit(&self) -> usize {
        match self {
            Self::CardNumber => 19,
            Self::Expiry => 5,
            Self::Cvc => 4,
            Self::BirthDate => 10,
            Self::Phone => 13,
            _ => 40,
        }
    }
}

/// Local phase of the payment screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPhase {
    Form,
    /// Payment submitted; every key is ignored until the delay has passed
    Processing { started: Instant },
    Complete,
}

/// Reservation number shown on the receipt, `TR-YYYY-MM-NNN`
pub fn reservation_number(at: NaiveDateTime) -> String {
    let serial = (at.nanosecond() / 1_000_000) % 1000;
    format!("TR-{}-{:03}", at.format("%Y-%m"), serial)
}

/// Payment screen component
#[derive(Debug)]
pub struct PaymentScreen {
    destination: String,
    route: RouteKey,
    dates: Option<DateRange>,
    inputs: Vec<TextInput>,
    focus: usize,
    phase: PaymentPhase,
    reservation: Option<String>,
}

impl PaymentScreen {
    pub fn new(selection: &TripSelection) -> Self {
        Self {
            destination: selection.destination.clone(),
            route: selection.chosen_route_key.parse().unwrap_or_default(),
            dates: selection.travel_dates,
            inputs: PaymentField::ALL
                .iter()
                .map(|f| TextInput::with_limit(f.limit()))
                .collect(),
            focus: 0,
            phase: PaymentPhase::Form,
            reservation: None,
        }
    }

    pub fn phase(&self) -> PaymentPhase {
        self.phase
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, PaymentPhase::Processing { .. })
    }

    /// Set once the processing phase has finished
    pub fn reservation_number(&self) -> Option<&str> {
        self.reservation.as_deref()
    }

    pub fn focused_field(&self) -> PaymentField {
        PaymentField::ALL[self.focus]
    }

    pub fn value(&self, field: PaymentField) -> &str {
        let idx = PaymentField::ALL.iter().position(|f| *f == field).unwrap_or(0);
        self.inputs[idx].value()
    }

    fn preset(&self) -> &'static RoutePreset {
        self.route.preset()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenEvent> {
        match self.phase {
            PaymentPhase::Processing { .. } => return None,
            // back is disabled on the receipt
            PaymentPhase::Complete => {
                return match key.code {
                    KeyCode::Enter => Some(ScreenEvent::NavigateForward(
                        ForwardPayload::PaymentConfirmed,
                    )),
                    _ => None,
                };
            }
            PaymentPhase::Form => {}
        }

        let count = PaymentField::ALL.len();
        match key.code {
            KeyCode::Esc => return Some(ScreenEvent::NavigateBack),
            KeyCode::Enter => {
                self.phase = PaymentPhase::Processing {
                    started: Instant::now(),
                };
            }
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % count,
            KeyCode::BackTab | KeyCode::Up => self.focus = (self.focus + count - 1) % count,
            _ => {
                self.inputs[self.focus].handle_key(key);
            }
        }
        None
    }

    /// Finish processing once its delay has elapsed
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        let PaymentPhase::Processing { started } = self.phase else {
            return;
        };
        if now.saturating_duration_since(started) < PROCESSING_DELAY {
            return;
        }
        let number = reservation_number(Local::now().naive_local());
        info!(reservation = %number, route = %self.route, "mock payment completed");
        self.reservation = Some(number);
        self.phase = PaymentPhase::Complete;
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title
                Constraint::Min(12),   // Body
                Constraint::Length(3), // Help
            ])
            .split(f.size());

        render_step_header(
            f,
            chunks[0],
            WizardState::Payment.step(),
            "예약 및 결제",
            &format!("{} · {}", self.destination, self.preset().name),
        );

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);
        self.render_summary(f, body[0]);

        match self.phase {
            PaymentPhase::Form => {
                self.render_form(f, body[1]);
                render_help(
                    f,
                    chunks[2],
                    &[
                        ("Tab/↑↓", "입력 항목 이동"),
                        ("Enter", "결제하기"),
                        ("Esc", "경로 다시 선택"),
                    ],
                );
            }
            PaymentPhase::Processing { .. } => {
                self.render_form(f, body[1]);
                render_help(f, chunks[2], &[("Ctrl+C", "종료")]);
            }
            PaymentPhase::Complete => {
                self.render_receipt(f, body[1]);
                render_help(
                    f,
                    chunks[2],
                    &[("Enter", "새 여행 계획하기"), ("Ctrl+C", "종료")],
                );
            }
        }
    }

    fn render_summary(&self, f: &mut Frame, area: Rect) {
        let preset = self.preset();
        let breakdown = preset.breakdown;

        let block = Block::default().borders(Borders::ALL).title(" 예약 요약 ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut header = vec![
            Line::from(Span::styled(
                format!("{} {}", self.destination, preset.name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(preset.duration),
        ];
        if let Some(range) = self.dates {
            header.push(Line::from(format!(
                "{} ~ {} ({})",
                format_korean_date(range.start()),
                format_korean_date(range.end()),
                range.length_label()
            )));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header.len() as u16 + 1),
                Constraint::Min(0),
            ])
            .split(inner);
        f.render_widget(Paragraph::new(header), chunks[0]);

        // the table measures labels by display width; amounts all end in
        // the same two-cell suffix so char padding keeps them flush right
        let amount = |value: u32| Cell::from(format!("{:>8}", format_manwon(value)));
        let mut rows: Vec<Row> = [
            ("항공권 (왕복)".to_string(), breakdown.flights),
            (format!("숙소 ({}박)", preset.nights), breakdown.lodging),
            ("투어 & 액티비티".to_string(), breakdown.tours),
            ("예상 식비".to_string(), breakdown.meals),
        ]
        .into_iter()
        .map(|(label, value)| Row::new(vec![Cell::from(label), amount(value)]))
        .collect();
        rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));
        rows.push(
            Row::new(vec![Cell::from("총 금액"), amount(breakdown.total())]).style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        );

        let table = Table::new(rows, [Constraint::Min(16), Constraint::Length(10)]);
        f.render_widget(table, chunks[1]);
    }

    fn display_value(&self, idx: usize) -> String {
        let field = PaymentField::ALL[idx];
        let value = self.inputs[idx].value();
        match field {
            PaymentField::CardNumber if idx != self.focus => mask_card_number(value),
            PaymentField::Cvc => "*".repeat(value.chars().count()),
            _ => value.to_string(),
        }
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" 결제 정보 ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(PaymentField::ALL.len() as u16),
                Constraint::Min(0),
            ])
            .split(inner);

        let rows: Vec<Row> = PaymentField::ALL
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let focused = idx == self.focus;
                let label_style = if focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let value = if self.inputs[idx].is_empty() {
                    Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
                } else {
                    Span::raw(self.display_value(idx))
                };
                Row::new(vec![
                    Cell::from(if focused { "▶" } else { " " }).style(label_style),
                    Cell::from(field.label()).style(label_style),
                    Cell::from(value),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(1),
                Constraint::Length(18),
                Constraint::Min(10),
            ],
        );
        f.render_widget(table, chunks[0]);

        let processing = self.is_processing();
        let pay_label = if processing {
            "처리 중...".to_string()
        } else {
            format!("{} 결제하기", format_manwon(self.preset().total_cost))
        };
        let footer = vec![
            Line::from(""),
            Line::from(Span::styled(
                "🔒 데모 화면입니다. 실제 결제는 진행되지 않습니다.",
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from(vec![
                button("이전", false, !processing),
                Span::raw("  "),
                button(&pay_label, true, !processing),
            ]),
        ];
        f.render_widget(Paragraph::new(footer), chunks[1]);
    }

    fn render_receipt(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "✅ 예약 완료!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} 여행 일정이 성공적으로 예약되었습니다.",
                self.destination
            )),
            Line::from(""),
            Line::from(format!(
                "예약 번호  {}",
                self.reservation.as_deref().unwrap_or("-")
            )),
            Line::from(format!("{} · {}", self.destination, self.preset().name)),
            Line::from(format!(
                "결제 금액  {}",
                format_manwon(self.preset().total_cost)
            )),
            Line::from(""),
            Line::from(button("새 여행 계획하기", true, true)),
        ];
        let receipt = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" 예약 완료 "));
        f.render_widget(receipt, area);
    }
}
