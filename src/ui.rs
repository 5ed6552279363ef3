use crate::app::{Command, DraftError, NoticeKind, Presenter};
use crate::journal_entry::{JournalEntry, Mood, MoodFilter, NewJournalEntry};
use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Terminal,
};
use std::{
    io::{stdout, Stdout},
    time::{Duration, Instant},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// How long a notification stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);
/// Input poll interval; on timeout the caller re-renders so notices expire.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Default, Clone)]
struct Draft {
    title: String,
    content: String,
    mood: Option<Mood>,
}

impl Draft {
    fn validate(&self) -> std::result::Result<NewJournalEntry, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err(DraftError::EmptyContent);
        }
        let Some(mood) = self.mood else {
            return Err(DraftError::MissingMood);
        };
        Ok(NewJournalEntry {
            title: title.to_string(),
            content: content.to_string(),
            mood,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftFocus {
    Title,
    Content,
    Mood,
}

struct Notice {
    message: String,
    kind: NoticeKind,
    shown_at: Instant,
}

pub struct UI {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    visible_ids: Vec<String>,
    selected_index: usize,
    filter: MoodFilter,
    search_mode: bool,
    search_text: String,
    draft: Draft,
    form_requested: bool,
    notice: Option<Notice>,
}

impl UI {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(UI {
            terminal,
            visible_ids: Vec::new(),
            selected_index: 0,
            filter: MoodFilter::All,
            search_mode: false,
            search_text: String::new(),
            draft: Draft::default(),
            form_requested: false,
            notice: None,
        })
    }

    fn selected_id(&self) -> Option<String> {
        self.visible_ids.get(self.selected_index).cloned()
    }

    fn step_mood(&mut self, forward: bool) {
        let at = self
            .draft
            .mood
            .and_then(|mood| Mood::ALL.iter().position(|m| *m == mood));
        let next = match at {
            None => 0,
            Some(i) if forward => (i + 1) % Mood::ALL.len(),
            Some(i) => (i + Mood::ALL.len() - 1) % Mood::ALL.len(),
        };
        self.draft.mood = Some(Mood::ALL[next]);
    }

    /// Modal draft form: Tab cycles title/content/mood, Enter on the mood
    /// row submits, Esc abandons the draft. A draft that fails validation
    /// stays in the form with the problem shown, so nothing typed is lost.
    fn run_draft_form(&mut self) -> Result<Option<Command>> {
        let mut focus = DraftFocus::Title;
        let mut problem: Option<String> = None;

        loop {
            let draft = self.draft.clone();
            let problem_text = problem.clone();
            self.terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3),
                            Constraint::Length(3),
                            Constraint::Min(8),
                            Constraint::Length(3),
                            Constraint::Length(1),
                            Constraint::Length(3),
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                let heading = Paragraph::new("Journal Entry")
                    .style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                    .alignment(Alignment::Center);
                f.render_widget(heading, chunks[0]);

                let field_block = |title: &'static str, focused: bool| {
                    let block = Block::default().borders(Borders::ALL).title(title);
                    if focused {
                        block.border_style(Style::default().fg(Color::Yellow))
                    } else {
                        block
                    }
                };

                let title_text = if focus == DraftFocus::Title {
                    format!("{}|", draft.title)
                } else {
                    draft.title.clone()
                };
                let title_input = Paragraph::new(title_text)
                    .block(field_block("Title", focus == DraftFocus::Title));
                f.render_widget(title_input, chunks[1]);

                let content_text = if focus == DraftFocus::Content {
                    format!("{}|", draft.content)
                } else {
                    draft.content.clone()
                };
                let content_input = Paragraph::new(content_text)
                    .block(field_block("Content", focus == DraftFocus::Content));
                f.render_widget(content_input, chunks[2]);

                let mut mood_spans: Vec<Span> = Vec::new();
                for mood in Mood::ALL {
                    let style = if draft.mood == Some(mood) {
                        Style::default()
                            .bg(mood_color(mood))
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(mood_color(mood))
                    };
                    mood_spans.push(Span::styled(format!(" {} ", mood.label()), style));
                    mood_spans.push(Span::raw(" "));
                }
                let mood_input = Paragraph::new(Line::from(mood_spans))
                    .block(field_block("Mood", focus == DraftFocus::Mood));
                f.render_widget(mood_input, chunks[3]);

                if let Some(problem_text) = &problem_text {
                    let line = Paragraph::new(problem_text.as_str())
                        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                        .alignment(Alignment::Center);
                    f.render_widget(line, chunks[4]);
                }

                let instructions = Paragraph::new(
                    "Tab: next field, Left/Right: pick mood, Enter on mood: save, Esc: cancel",
                )
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
                f.render_widget(instructions, chunks[5]);
            })?;

            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc => return Ok(Some(Command::DiscardDraft)),
                    KeyCode::Tab => {
                        focus = match focus {
                            DraftFocus::Title => DraftFocus::Content,
                            DraftFocus::Content => DraftFocus::Mood,
                            DraftFocus::Mood => DraftFocus::Title,
                        };
                    }
                    KeyCode::BackTab => {
                        focus = match focus {
                            DraftFocus::Title => DraftFocus::Mood,
                            DraftFocus::Content => DraftFocus::Title,
                            DraftFocus::Mood => DraftFocus::Content,
                        };
                    }
                    KeyCode::Enter => match focus {
                        DraftFocus::Title => focus = DraftFocus::Content,
                        DraftFocus::Content => self.draft.content.push('\n'),
                        DraftFocus::Mood => match self.draft.validate() {
                            Ok(_) => return Ok(Some(Command::Submit)),
                            Err(err) => problem = Some(err.to_string()),
                        },
                    },
                    KeyCode::Backspace => match focus {
                        DraftFocus::Title => {
                            self.draft.title.pop();
                        }
                        DraftFocus::Content => {
                            self.draft.content.pop();
                        }
                        DraftFocus::Mood => {}
                    },
                    KeyCode::Left | KeyCode::Up if focus == DraftFocus::Mood => {
                        self.step_mood(false)
                    }
                    KeyCode::Right | KeyCode::Down if focus == DraftFocus::Mood => {
                        self.step_mood(true)
                    }
                    KeyCode::Char(c) => match focus {
                        DraftFocus::Title => self.draft.title.push(c),
                        DraftFocus::Content => self.draft.content.push(c),
                        DraftFocus::Mood => {}
                    },
                    _ => {}
                }
            }
        }
    }
}

impl Presenter for UI {
    fn render(
        &mut self,
        entries: &[JournalEntry],
        filter: MoodFilter,
        search: &str,
    ) -> Result<()> {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() >= NOTICE_TTL)
        {
            self.notice = None;
        }

        self.filter = filter;
        if !self.search_mode {
            self.search_text = search.to_string();
        }
        self.visible_ids = entries.iter().map(|e| e.id.clone()).collect();
        if self.selected_index >= entries.len() {
            self.selected_index = entries.len().saturating_sub(1);
        }

        let search_mode = self.search_mode;
        let search_text = self.search_text.clone();
        let selected_index = self.selected_index;
        let notice = self
            .notice
            .as_ref()
            .map(|n| (n.message.clone(), n.kind));

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Length(3),
                        Constraint::Min(5),
                        Constraint::Length(1),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(f.area());

            let heading = Paragraph::new("Mood Journal")
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center);
            f.render_widget(heading, chunks[0]);

            let search_cursor = if search_mode { "|" } else { "" };
            let criteria = Paragraph::new(Line::from(vec![
                Span::raw("Filter: "),
                Span::styled(
                    filter.label(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("    Search: "),
                Span::raw(format!("{search_text}{search_cursor}")),
            ]))
            .block(Block::default().borders(Borders::ALL).title("View"));
            f.render_widget(criteria, chunks[1]);

            if entries.is_empty() {
                let empty = Paragraph::new("No entries to show")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title("Entries"));
                f.render_widget(empty, chunks[2]);
            } else {
                let preview_width = chunks[2].width.saturating_sub(4) as usize;
                let items: Vec<ListItem> = entries
                    .iter()
                    .map(|entry| {
                        ListItem::new(vec![
                            Line::from(vec![
                                Span::raw(format!(
                                    "[{}] {} ",
                                    entry
                                        .timestamp
                                        .with_timezone(&chrono::Local)
                                        .format("%Y-%m-%d %H:%M"),
                                    entry.title
                                )),
                                Span::styled(
                                    entry.mood.label(),
                                    Style::default()
                                        .fg(mood_color(entry.mood))
                                        .add_modifier(Modifier::BOLD),
                                ),
                            ]),
                            Line::from(Span::styled(
                                truncate_to_width(
                                    entry.content.lines().next().unwrap_or(""),
                                    preview_width,
                                ),
                                Style::default().fg(Color::DarkGray),
                            )),
                        ])
                    })
                    .collect();

                let list = List::new(items)
                    .block(Block::default().borders(Borders::ALL).title("Entries"))
                    .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                    .highlight_symbol("> ");
                f.render_stateful_widget(
                    list,
                    chunks[2],
                    &mut ListState::default().with_selected(Some(selected_index)),
                );
            }

            if let Some((message, kind)) = &notice {
                let color = match kind {
                    NoticeKind::Success => Color::Green,
                    NoticeKind::Error => Color::Red,
                    NoticeKind::Info => Color::Yellow,
                };
                let line = Paragraph::new(message.as_str())
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center);
                f.render_widget(line, chunks[3]);
            }

            let controls = if search_mode {
                Line::from("Type to search, Enter/Esc: done")
            } else {
                Line::from(vec![
                    Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" new, "),
                    Span::styled("e", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" edit, "),
                    Span::styled("d", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" delete, "),
                    Span::styled("f", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" filter, "),
                    Span::styled("/", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" search, "),
                    Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" quit"),
                ])
            };
            let controls_paragraph = Paragraph::new(controls)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            f.render_widget(controls_paragraph, chunks[4]);
        })?;

        Ok(())
    }

    fn next_command(&mut self) -> Result<Option<Command>> {
        if self.form_requested {
            self.form_requested = false;
            return self.run_draft_form();
        }

        if !event::poll(POLL_INTERVAL)? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };

        if self.search_mode {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.search_mode = false;
                    None
                }
                KeyCode::Char(c) => {
                    self.search_text.push(c);
                    Some(Command::Search(self.search_text.clone()))
                }
                KeyCode::Backspace => {
                    self.search_text.pop();
                    Some(Command::Search(self.search_text.clone()))
                }
                _ => None,
            });
        }

        match key.code {
            KeyCode::Char('q') => Ok(Some(Command::Quit)),
            KeyCode::Char('n') => {
                // Route through the orchestrator so a pending edit is
                // dropped too, then open the form on the next turn.
                self.draft = Draft::default();
                self.form_requested = true;
                Ok(Some(Command::DiscardDraft))
            }
            KeyCode::Char('e') => Ok(self.selected_id().map(Command::Edit)),
            KeyCode::Char('d') => Ok(self.selected_id().map(Command::Delete)),
            KeyCode::Char('f') => Ok(Some(Command::Filter(self.filter.cycle()))),
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.search_mode = true;
                Ok(None)
            }
            KeyCode::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Down => {
                if self.selected_index + 1 < self.visible_ids.len() {
                    self.selected_index += 1;
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn read_draft(&self) -> std::result::Result<NewJournalEntry, DraftError> {
        self.draft.validate()
    }

    fn populate_draft(&mut self, entry: &JournalEntry) {
        self.draft = Draft {
            title: entry.title.clone(),
            content: entry.content.clone(),
            mood: Some(entry.mood),
        };
        // Open the form on the next input turn.
        self.form_requested = true;
    }

    fn clear_draft(&mut self) {
        self.draft = Draft::default();
    }

    fn notify(&mut self, message: &str, kind: NoticeKind) {
        // At most one notice at a time; a new one replaces the old.
        self.notice = Some(Notice {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        });
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let mut selected = 0usize; // 0 = yes, 1 = no

        loop {
            self.terminal.draw(|f| {
                let area = centered_rect(40, 5, f.area());
                f.render_widget(Clear, area);

                let block = Block::default().borders(Borders::ALL).title("Confirm");
                let inner = block.inner(area);
                f.render_widget(block, area);

                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(
                        [
                            Constraint::Length(1),
                            Constraint::Length(1),
                            Constraint::Length(1),
                        ]
                        .as_ref(),
                    )
                    .split(inner);

                let question = Paragraph::new(prompt).alignment(Alignment::Center);
                f.render_widget(question, rows[0]);

                let active = Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD);
                let inactive = Style::default();
                let buttons = Line::from(vec![
                    Span::styled(" Yes ", if selected == 0 { active } else { inactive }),
                    Span::raw("   "),
                    Span::styled(" No ", if selected == 1 { active } else { inactive }),
                ]);
                let buttons_paragraph = Paragraph::new(buttons).alignment(Alignment::Center);
                f.render_widget(buttons_paragraph, rows[2]);
            })?;

            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('y') => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Esc => return Ok(false),
                    KeyCode::Enter => return Ok(selected == 0),
                    KeyCode::Left | KeyCode::BackTab => selected = selected.saturating_sub(1),
                    KeyCode::Right | KeyCode::Tab => selected = (selected + 1).min(1),
                    _ => {}
                }
            }
        }
    }
}

impl Drop for UI {
    fn drop(&mut self) {
        disable_raw_mode().unwrap();
        stdout().execute(LeaveAlternateScreen).unwrap();
    }
}

fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Happy => Color::Yellow,
        Mood::Sad => Color::Blue,
        Mood::Motivated => Color::Magenta,
        Mood::Stressed => Color::Red,
        Mood::Calm => Color::Green,
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
