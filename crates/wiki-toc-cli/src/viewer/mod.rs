//! Terminal document viewer with a live table of contents.

mod page;

use std::collections::HashMap;
use std::io::{Stdout, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use wiki_toc_engine::{
    ActiveHeadingTracker, AnchorAssigner, ContentItem, DEFAULT_MAX_LEVEL, HeadingLevel,
    ObserverOptions, ScrollBehavior, ScrollRoot, ScrollSurface, TocItem, get_h2_toc_items,
    scan_headings, scroll_to_heading,
};

pub use page::TerminalPage;

const TICK: Duration = Duration::from_millis(30);

pub struct ViewerOptions {
    pub observer: ObserverOptions,
    pub heading_offset: u16,
    pub smooth_scroll: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Toc,
    Document,
}

pub struct App {
    title: String,
    toc: Vec<TocItem>,
    sections: Vec<TocItem>,
    tracker: ActiveHeadingTracker<TerminalPage>,
    toc_state: ListState,
    focus: Focus,
    heading_offset: u16,
}

impl App {
    pub fn new(item: &ContentItem, toc: Vec<TocItem>, options: ViewerOptions) -> Self {
        let lines: Vec<String> = item.content.lines().map(str::to_string).collect();
        let anchors = anchor_lines(&item.content, &toc);
        let page = TerminalPage::new(lines, anchors, options.smooth_scroll);

        let ids: Vec<String> = toc.iter().map(|entry| entry.id.clone()).collect();
        let mut tracker = ActiveHeadingTracker::new(page);
        tracker.watch(&ids, ScrollRoot::Page, options.observer);

        let mut toc_state = ListState::default();
        if !toc.is_empty() {
            toc_state.select(Some(0));
        }

        Self {
            title: item.title.clone().unwrap_or_else(|| "Document".to_string()),
            sections: get_h2_toc_items(&toc),
            toc,
            tracker,
            toc_state,
            focus: Focus::Toc,
            heading_offset: options.heading_offset,
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.tracker.active_id()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn page(&self) -> &TerminalPage {
        self.tracker.service()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.tracker.service_mut().set_viewport(width, height);
    }

    /// One frame of the event loop: animate, then feed observer output to
    /// the tracker.
    pub fn tick(&mut self) {
        self.tracker.service_mut().step_animation();
        if let Some(batch) = self.tracker.service_mut().pending_batch() {
            self.tracker.handle_batch(&batch);
            if self.focus == Focus::Document {
                self.select_active();
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Toc => Focus::Document,
            Focus::Document => Focus::Toc,
        };
    }

    pub fn next(&mut self) {
        match self.focus {
            Focus::Toc => self.move_selection(1),
            Focus::Document => self.tracker.service_mut().scroll_by(1),
        }
    }

    pub fn previous(&mut self) {
        match self.focus {
            Focus::Toc => self.move_selection(-1),
            Focus::Document => self.tracker.service_mut().scroll_by(-1),
        }
    }

    pub fn page_down(&mut self) {
        let rows = self.page().height().max(1) as isize;
        self.tracker.service_mut().scroll_by(rows);
    }

    pub fn page_up(&mut self) {
        let rows = self.page().height().max(1) as isize;
        self.tracker.service_mut().scroll_by(-rows);
    }

    pub fn top(&mut self) {
        self.tracker
            .service_mut()
            .scroll_page_to(0.0, ScrollBehavior::Instant);
    }

    pub fn bottom(&mut self) {
        let end = self.page().lines().len() as f64;
        self.tracker
            .service_mut()
            .scroll_page_to(end, ScrollBehavior::Instant);
    }

    /// Jumps to the selected TOC entry.
    pub fn jump_to_selected(&mut self) {
        let Some(id) = self
            .toc_state
            .selected()
            .and_then(|index| self.toc.get(index))
            .map(|entry| entry.id.clone())
        else {
            return;
        };
        self.jump_to(&id);
    }

    /// Jumps to the level-2 section after the one containing the active heading.
    pub fn next_section(&mut self) {
        let current = self.active_line();
        let target = self
            .sections
            .iter()
            .find(|section| self.section_line(section).is_some_and(|line| Some(line) > current))
            .map(|section| section.id.clone());
        if let Some(id) = target {
            self.jump_to(&id);
        }
    }

    pub fn previous_section(&mut self) {
        let Some(current) = self.active_line() else {
            return;
        };
        let target = self
            .sections
            .iter()
            .rev()
            .find(|section| self.section_line(section).is_some_and(|line| line < current))
            .map(|section| section.id.clone());
        if let Some(id) = target {
            self.jump_to(&id);
        }
    }

    fn jump_to(&mut self, id: &str) {
        let offset = f64::from(self.heading_offset);
        if scroll_to_heading(self.tracker.service_mut(), id, offset).is_none() {
            log::debug!("no line for heading {id}");
        }
        if let Some(index) = self.toc.iter().position(|entry| entry.id == id) {
            self.toc_state.select(Some(index));
        }
    }

    fn active_line(&self) -> Option<usize> {
        self.active_id().and_then(|id| self.page().anchor_line(id))
    }

    fn section_line(&self, section: &TocItem) -> Option<usize> {
        self.page().anchor_line(&section.id)
    }

    fn select_active(&mut self) {
        let index = self
            .active_id()
            .and_then(|id| self.toc.iter().position(|entry| entry.id == id));
        if index.is_some() {
            self.toc_state.select(index);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.toc.is_empty() {
            return;
        }
        let len = self.toc.len() as isize;
        let current = self.toc_state.selected().unwrap_or(0) as isize;
        self.toc_state
            .select(Some((current + delta).rem_euclid(len) as usize));
    }
}

/// Line number of every rendered heading, keyed by the anchor it carries.
fn anchor_lines(markdown: &str, toc: &[TocItem]) -> HashMap<String, usize> {
    let mut assigner = AnchorAssigner::new(toc);
    scan_headings(markdown, DEFAULT_MAX_LEVEL)
        .into_iter()
        .enumerate()
        .map(|(position, heading)| {
            let id = assigner.assign_at(position, heading.level, &heading.text);
            (id, heading.line)
        })
        .collect()
}

pub fn run(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => app.toggle_focus(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Enter => app.jump_to_selected(),
                KeyCode::Char('n') => app.next_section(),
                KeyCode::Char('p') => app.previous_section(),
                KeyCode::Char('g') | KeyCode::Home => app.top(),
                KeyCode::Char('G') | KeyCode::End => app.bottom(),
                _ => {}
            }
        }

        app.tick();
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    let current_focus = app.focus;
    let border = |focus: Focus| {
        if current_focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    // TOC panel
    let active = app.active_id().map(str::to_string);
    let toc_items: Vec<ListItem> = app
        .toc
        .iter()
        .map(|entry| {
            let indent = match entry.level {
                HeadingLevel::H2 => "",
                HeadingLevel::H3 => "  ",
            };
            let style = if active.as_deref() == Some(entry.id.as_str()) {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{indent}{}", entry.text),
                style,
            )))
        })
        .collect();

    let toc_list = List::new(toc_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border(Focus::Toc))
                .title("Contents"),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(toc_list, chunks[0], &mut app.toc_state);

    // Document panel
    let inner = Block::default().borders(Borders::ALL).inner(chunks[1]);
    app.resize(inner.width, inner.height);

    let page = app.page();
    let heading_lines: Vec<usize> = app
        .toc
        .iter()
        .filter_map(|entry| page.anchor_line(&entry.id))
        .collect();
    let content: Vec<Line> = page
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if heading_lines.contains(&index) {
                Line::from(Span::styled(
                    line.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(line.as_str())
            }
        })
        .collect();

    let document = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border(Focus::Document))
                .title(app.title.as_str()),
        )
        .scroll((page.scroll_top().min(u16::MAX as usize) as u16, 0));

    f.render_widget(document, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("Tab: Focus | "),
        Span::raw("↑↓/jk: Move | "),
        Span::raw("Enter: Jump | "),
        Span::raw("n/p: Next/Prev section | "),
        Span::raw("g/G: Top/Bottom"),
    ]);

    f.render_widget(Paragraph::new(help_text), rows[1]);
}
