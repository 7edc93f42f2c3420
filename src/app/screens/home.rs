//! Home screen implementation
//!
//! Destination search plus a list of popular destinations ordered by the
//! preferred travel mood, with a light/dark theme toggle.

use crate::app::screens::widgets::{render_help, TextInput, Theme};
use crate::app::state::{ForwardPayload, ScreenEvent};
use crate::models::catalog::{sorted_by_mood, Destination, TravelMood};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Which part of the home screen receives typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Search,
    List,
}

/// Home screen component
#[derive(Debug)]
pub struct HomeScreen {
    search: TextInput,
    destinations: Vec<Destination>,
    selected_index: usize,
    list_state: ListState,
    focus: HomeFocus,
    dark_mode: bool,
    preferred_mood: TravelMood,
}

impl HomeScreen {
    /// Create a new home screen
    pub fn new(dark_mode: bool, preferred_mood: TravelMood) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            search: TextInput::with_limit(40),
            destinations: sorted_by_mood(preferred_mood),
            selected_index: 0,
            list_state,
            focus: HomeFocus::Search,
            dark_mode,
            preferred_mood,
        }
    }

    pub fn focus(&self) -> HomeFocus {
        self.focus
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn preferred_mood(&self) -> TravelMood {
        self.preferred_mood
    }

    pub fn search_text(&self) -> &str {
        self.search.value()
    }

    /// Destinations in display order
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn selected_destination(&self) -> Option<&Destination> {
        self.destinations.get(self.selected_index)
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Re-order the list for `mood` and move the highlight to the top
    pub fn set_preferred_mood(&mut self, mood: TravelMood) {
        self.preferred_mood = mood;
        self.destinations = sorted_by_mood(mood);
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = self.destinations.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected_index < self.destinations.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Handle a key press; returns the event to hand to the controller
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('t') => self.toggle_dark_mode(),
                KeyCode::Char('b') => self.set_preferred_mood(TravelMood::Beach),
                KeyCode::Char('y') => self.set_preferred_mood(TravelMood::City),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(ScreenEvent::NavigateBack),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    HomeFocus::Search => HomeFocus::List,
                    HomeFocus::List => HomeFocus::Search,
                };
                return None;
            }
            _ => {}
        }

        match self.focus {
            HomeFocus::Search => match key.code {
                KeyCode::Enter => {
                    let query = self.search.value().trim();
                    if !query.is_empty() {
                        return Some(ScreenEvent::NavigateForward(ForwardPayload::Destination(
                            query.to_string(),
                        )));
                    }
                }
                KeyCode::Down => self.focus = HomeFocus::List,
                _ => {
                    self.search.handle_key(key);
                }
            },
            HomeFocus::List => match key.code {
                KeyCode::Up => self.select_previous(),
                KeyCode::Down => self.select_next(),
                KeyCode::Enter => {
                    if let Some(destination) = self.selected_destination() {
                        return Some(ScreenEvent::NavigateForward(ForwardPayload::Destination(
                            destination.name.to_string(),
                        )));
                    }
                }
                KeyCode::Char(_) | KeyCode::Backspace => {
                    self.focus = HomeFocus::Search;
                    self.search.handle_key(key);
                }
                _ => {}
            },
        }
        None
    }

    /// Render the home screen
    pub fn render(&mut self, f: &mut Frame) {
        let theme = Theme::for_mode(self.dark_mode);
        let size = f.size();
        f.render_widget(Block::default().style(theme.base()), size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Brand and theme toggle
                Constraint::Length(5), // Hero text and mood
                Constraint::Length(3), // Search
                Constraint::Min(6),    // Destinations
                Constraint::Length(3), // Help
            ])
            .split(size);

        self.render_brand(f, chunks[0], &theme);
        self.render_hero(f, chunks[1], &theme);
        self.render_search(f, chunks[2], &theme);
        self.render_destinations(f, chunks[3], &theme);
        render_help(
            f,
            chunks[4],
            &[
                ("Enter", "여행 시작"),
                ("Tab", "검색/목록"),
                ("Ctrl+B/Y", "취향"),
                ("Ctrl+T", if self.dark_mode { "라이트" } else { "다크" }),
                ("Esc", "종료"),
            ],
        );
    }

    fn render_brand(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let brand = Paragraph::new(Line::from(vec![
            Span::styled(
                " ✈ AI TRAVEL PLANNER ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                if self.dark_mode { "  ☾ dark" } else { "  ☀ light" },
                Style::default().fg(theme.muted),
            ),
        ]))
        .style(theme.base());
        f.render_widget(brand, area);
    }

    fn render_hero(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let mood_span = |mood: TravelMood| {
            let style = if mood == self.preferred_mood {
                Style::default()
                    .bg(theme.accent)
                    .fg(ratatui::style::Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            Span::styled(format!(" {} ", mood.label()), style)
        };

        let lines = vec![
            Line::from(Span::styled(
                "여행은 강렬하게, 선택은 간결하게.",
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("취향 기반 추천  ", Style::default().fg(theme.accent)),
                mood_span(TravelMood::Beach),
                Span::raw(" "),
                mood_span(TravelMood::City),
            ]),
            Line::from(Span::styled(
                "선택한 취향이 먼저 노출됩니다.",
                Style::default().fg(theme.muted),
            )),
        ];
        f.render_widget(Paragraph::new(lines).style(theme.base()), area);
    }

    fn render_search(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == HomeFocus::Search;
        let content = if self.search.is_empty() {
            Span::styled(
                "나라 또는 도시를 검색하세요 (예: 일본, 도쿄)",
                Style::default().fg(theme.muted),
            )
        } else {
            Span::styled(
                format!("{}{}", self.search.value(), if focused { "▏" } else { "" }),
                Style::default().fg(theme.text),
            )
        };
        let border = if focused { theme.accent } else { theme.border };
        let search = Paragraph::new(Line::from(content)).style(theme.base()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 🔍 검색 ")
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(search, area);
    }

    fn render_destinations(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self
            .destinations
            .iter()
            .map(|d| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", d.emoji)),
                    Span::styled(
                        format!("{} ", d.name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("{}  ", d.name_en), Style::default().fg(theme.muted)),
                    Span::styled(format!("{}  ", d.cities), Style::default().fg(theme.muted)),
                    Span::styled(d.avg_price, Style::default().fg(theme.accent)),
                ]))
            })
            .collect();

        let border = if self.focus == HomeFocus::List {
            theme.accent
        } else {
            theme.border
        };
        let list = List::new(items)
            .style(theme.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" ✨ 인기 여행지 ")
                    .title_alignment(Alignment::Left)
                    .border_style(Style::default().fg(border)),
            )
            .highlight_style(
                Style::default()
                    .bg(theme.accent)
                    .fg(ratatui::style::Color::White),
            )
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new(false, TravelMood::Beach)
    }
}
