//! Application state and event loop

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use chrono::{Days, Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    DefaultTerminal, Frame,
};

use crate::patterns::PatternRequest;
use crate::services::calendar::{build_cells, on_activate};
use crate::services::repo_writer::{RepoSummary, RepoWriter};
use crate::services::settings::{Settings, SettingsService};
use crate::services::toast::{ToastKind, ToastQueue};
use crate::services::validation::REQUIRED_MESSAGE;
use crate::types::{Cell, CommitLevel, RepoSettings, Result};

use super::form::FormState;
use super::theme::Theme;
use super::widgets::{
    form::{form_height, FormView},
    help::HelpPopup,
    preview::{cell_position, scroll_to_show, visible_columns, PreviewGrid, GRID_HEIGHT},
    quit_confirm::{QuitConfirmPopup, QuitConfirmState},
    spinner::{GenerateStage, Spinner},
    tabs::{Tab, TabBar},
    toasts::Toasts,
};

/// Messages from the generation thread
#[derive(Debug)]
pub enum GenerateEvent {
    Stage(GenerateStage),
    Done(std::result::Result<RepoSummary, String>),
}

/// Application state
pub enum AppState {
    /// Form and preview accept input
    Editing,
    /// A repository is being written on a background thread
    Generating {
        spinner_frame: usize,
        stage: GenerateStage,
        rx: Receiver<GenerateEvent>,
    },
}

/// Which half of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    Preview,
}

/// Last built preview, keyed by the request that produced it
#[derive(Debug, Default)]
struct Preview {
    key: Option<(NaiveDate, PatternRequest)>,
    /// mtime of the pattern or image file the preview was read from
    source_modified: Option<SystemTime>,
    levels: Vec<CommitLevel>,
    cells: Vec<Cell>,
    error: Option<String>,
}

/// Modification time of the file a request reads, if any
fn source_modified(request: &PatternRequest) -> Option<SystemTime> {
    match request {
        PatternRequest::PatternFile { path } | PatternRequest::Image { path } => {
            fs::metadata(path).and_then(|m| m.modified()).ok()
        }
        _ => None,
    }
}

impl Preview {
    fn commits(&self) -> usize {
        self.levels.iter().map(|l| l.commits()).sum()
    }
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    theme: Theme,
    tab: Tab,
    focus: Focus,
    form: FormState,
    /// Levels edited on the Manual tab
    manual_levels: Vec<CommitLevel>,
    /// Seed for the Random tab, so preview and repository match
    seed: u64,
    preview: Preview,
    /// Data index under the preview cursor
    cursor: usize,
    /// First visible week column
    scroll: usize,
    toasts: ToastQueue,
    last_summary: Option<RepoSummary>,
    show_help: bool,
    quit_confirm: Option<QuitConfirmState>,
    output_dir: Option<PathBuf>,
    settings_service: Option<SettingsService>,
}

impl App {
    pub fn new(
        settings: Settings,
        settings_service: Option<SettingsService>,
        theme: Theme,
        today: NaiveDate,
    ) -> Self {
        let mut app = Self {
            state: AppState::Editing,
            should_quit: false,
            theme,
            tab: Tab::default(),
            focus: Focus::default(),
            form: FormState::new(&settings, today),
            manual_levels: Vec::new(),
            seed: rand::random(),
            preview: Preview::default(),
            cursor: 0,
            scroll: 0,
            toasts: ToastQueue::default(),
            last_summary: None,
            show_help: false,
            quit_confirm: None,
            output_dir: settings.output_dir,
            settings_service,
        };
        app.form.revalidate(app.tab);
        app.refresh_preview();
        app
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(confirm) = self.quit_confirm.as_mut() {
            match key.code {
                KeyCode::Left
                | KeyCode::Right
                | KeyCode::Tab
                | KeyCode::Char('h')
                | KeyCode::Char('l') => confirm.toggle(),
                KeyCode::Char('y') | KeyCode::Char('Y') => self.should_quit = true,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.quit_confirm = None
                }
                KeyCode::Enter => {
                    if confirm.confirmed() {
                        self.should_quit = true;
                    } else {
                        self.quit_confirm = None;
                    }
                }
                _ => {}
            }
            return;
        }

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Esc | KeyCode::Enter
            ) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('g') if ctrl => self.start_generation(),
            KeyCode::Char('r') if ctrl => self.reroll(),
            KeyCode::Tab => self.set_tab(self.tab.next()),
            KeyCode::BackTab => self.set_tab(self.tab.prev()),
            KeyCode::Esc => match self.focus {
                Focus::Preview => self.focus = Focus::Form,
                Focus::Form => self.quit_confirm = Some(QuitConfirmState::new()),
            },
            _ if ctrl => {}
            _ => match self.focus {
                Focus::Form => self.handle_form_key(key.code),
                Focus::Preview => self.handle_preview_key(key.code),
            },
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let field = self.form.focused(self.tab);
        match code {
            KeyCode::Up => self.form.focus_prev(self.tab),
            KeyCode::Down => self.form.focus_next(self.tab),
            KeyCode::Left if field.is_select() => {
                self.form.cycle(self.tab, false);
                self.on_form_changed();
            }
            KeyCode::Right if field.is_select() => {
                self.form.cycle(self.tab, true);
                self.on_form_changed();
            }
            KeyCode::Enter => {
                if self.preview.levels.is_empty() {
                    self.toast(ToastKind::Info, "Nothing to preview yet");
                } else {
                    self.focus = Focus::Preview;
                }
            }
            KeyCode::Backspace => {
                self.form.backspace(self.tab);
                self.on_form_changed();
            }
            // Select fields don't take text, so shortcuts work there
            KeyCode::Char('?') if field.is_select() => self.show_help = true,
            KeyCode::Char(c @ '1'..='6') if field.is_select() => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.set_tab(tab);
                }
            }
            KeyCode::Char(c) => {
                if self.form.insert_char(self.tab, c) {
                    self.on_form_changed();
                }
            }
            _ => {}
        }
    }

    fn handle_preview_key(&mut self, code: KeyCode) {
        let len = self.preview.levels.len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.cursor >= 7 {
                    self.cursor -= 7;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.cursor + 7 < len {
                    self.cursor += 7;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.activate_cursor(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.set_tab(tab);
                }
            }
            _ => {}
        }
    }

    fn set_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        self.tab = tab;
        self.form.clamp_focus(tab);
        self.on_form_changed();
        if self.preview.levels.is_empty() {
            self.focus = Focus::Form;
        }
    }

    fn on_form_changed(&mut self) {
        self.form.revalidate(self.tab);
        if self.tab == Tab::Manual {
            self.sync_manual_levels();
        }
        self.refresh_preview();
    }

    /// Resize manual levels to the date range, keeping edits already made
    fn sync_manual_levels(&mut self) {
        if let (Some(start), Some(end)) = (self.form.start(), self.form.end()) {
            if end >= start {
                let days = (end - start).num_days() as usize + 1;
                self.manual_levels.resize(days, CommitLevel::Zero);
            }
        }
    }

    /// Cycle the level under the cursor. Any other tab's pattern is copied
    /// into the Manual tab first.
    fn activate_cursor(&mut self) {
        if self.preview.levels.is_empty() {
            return;
        }
        if self.tab != Tab::Manual {
            let Some(start) = self.form.start() else {
                return;
            };
            self.manual_levels = self.preview.levels.clone();
            if let Some(end) = start.checked_add_days(Days::new(self.manual_levels.len() as u64 - 1))
            {
                self.form.end_date = end.format("%Y-%m-%d").to_string();
            }
            self.tab = Tab::Manual;
            self.form.clamp_focus(Tab::Manual);
            self.form.revalidate(Tab::Manual);
            self.toast(ToastKind::Info, "Editing a copy on the Manual tab");
        }
        if on_activate(&mut self.manual_levels, self.cursor) {
            self.refresh_preview();
        }
    }

    /// New seed for the Random tab
    fn reroll(&mut self) {
        if self.tab == Tab::Random {
            self.seed = rand::random();
            self.refresh_preview();
        }
    }

    /// Rebuild the preview when the pattern request changed
    fn refresh_preview(&mut self) {
        let key = self
            .form
            .pattern_request(self.tab, &self.manual_levels, self.seed);
        // Files are only decoded again when the path or the file changes
        let modified = key.as_ref().and_then(|(_, request)| source_modified(request));
        if key.is_some() && key == self.preview.key && modified == self.preview.source_modified {
            return;
        }

        self.preview = match key {
            None => Preview::default(),
            Some((start, request)) => match request.generate(start) {
                Ok(levels) => Preview {
                    cells: build_cells(start, &levels),
                    levels,
                    error: None,
                    key: Some((start, request)),
                    source_modified: modified,
                },
                Err(e) => Preview {
                    error: Some(e.to_string()),
                    key: Some((start, request)),
                    source_modified: modified,
                    ..Preview::default()
                },
            },
        };

        self.cursor = self.cursor.min(self.preview.levels.len().saturating_sub(1));
        if self.preview.levels.is_empty() {
            self.focus = Focus::Form;
        }
    }

    fn toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toasts.push(kind, message, Instant::now());
    }

    // ========== Generation ==========

    pub fn is_generating(&self) -> bool {
        matches!(self.state, AppState::Generating { .. })
    }

    fn start_generation(&mut self) {
        if self.is_generating() {
            self.toast(ToastKind::Warning, "A repository is already being generated");
            return;
        }
        if let Err(e) = self.form.check_complete(self.tab) {
            self.toast(ToastKind::Error, e.to_string());
            return;
        }
        if let Some(error) = &self.preview.error {
            let message = error.clone();
            self.toast(ToastKind::Error, message);
            return;
        }
        if self.preview.levels.is_empty() {
            self.toast(ToastKind::Error, REQUIRED_MESSAGE);
            return;
        }
        let settings = match self.form.settings(self.output_dir.clone()).to_repo_settings() {
            Ok(settings) => settings,
            Err(e) => {
                self.toast(ToastKind::Error, e.to_string());
                return;
            }
        };
        let Some((start, request)) =
            self.form
                .pattern_request(self.tab, &self.manual_levels, self.seed)
        else {
            self.toast(ToastKind::Error, "Pattern is incomplete");
            return;
        };

        tracing::info!(
            method = request.name(),
            path = %settings.repo_path().display(),
            "starting generation"
        );

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = generate_repo(start, &request, settings, &tx);
            let _ = tx.send(GenerateEvent::Done(result.map_err(|e| e.to_string())));
        });

        self.state = AppState::Generating {
            spinner_frame: 0,
            stage: GenerateStage::Pattern,
            rx,
        };
    }

    /// Drain messages from the generation thread (non-blocking)
    pub fn poll_generation(&mut self) {
        let finished = match &mut self.state {
            AppState::Generating { rx, stage, .. } => loop {
                match rx.try_recv() {
                    Ok(GenerateEvent::Stage(next)) => *stage = next,
                    Ok(GenerateEvent::Done(result)) => break Some(result),
                    Err(TryRecvError::Empty) => break None,
                    Err(TryRecvError::Disconnected) => {
                        break Some(Err("Generation stopped unexpectedly".to_string()))
                    }
                }
            },
            AppState::Editing => None,
        };

        if let Some(result) = finished {
            self.state = AppState::Editing;
            self.finish_generation(result);
        }
    }

    fn finish_generation(&mut self, result: std::result::Result<RepoSummary, String>) {
        match result {
            Ok(summary) => {
                tracing::info!(commits = summary.commits, "repository generated");
                self.toast(
                    ToastKind::Success,
                    format!(
                        "Created {} commits in {}",
                        summary.commits,
                        summary.path.display()
                    ),
                );
                self.last_summary = Some(summary);
                self.save_settings();
            }
            Err(message) => {
                tracing::error!("generation failed: {message}");
                self.toast(ToastKind::Error, message);
            }
        }
    }

    fn save_settings(&mut self) {
        let Some(service) = &self.settings_service else {
            return;
        };
        if let Err(e) = service.save(&self.form.settings(self.output_dir.clone())) {
            tracing::warn!("failed to save settings: {e}");
            self.toast(ToastKind::Warning, format!("Could not save settings: {e}"));
        }
    }

    /// Update spinner animation and expire toasts
    pub fn tick(&mut self) {
        if let AppState::Generating { spinner_frame, .. } = &mut self.state {
            *spinner_frame = Spinner::next_frame(*spinner_frame);
        }
        self.toasts.prune(Instant::now());
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Keep the cursor column on screen for a preview `width` columns wide
    fn sync_scroll(&mut self, width: u16) {
        let visible = visible_columns(width.saturating_sub(2));
        if let Some((column, _)) = cell_position(&self.preview.cells, self.cursor) {
            self.scroll = scroll_to_show(column, visible, self.scroll);
        } else {
            self.scroll = 0;
        }
    }

    /// Draw the application
    pub fn draw(&mut self, frame: &mut Frame) {
        self.sync_scroll(frame.area().width);
        frame.render_widget(&*self, frame.area());
    }

    fn render_preview(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.focus == Focus::Preview;
        let mut title = vec![Span::styled(
            " Preview ",
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )];
        if !self.preview.levels.is_empty() {
            title.push(Span::styled(
                format!(
                    "{} days, {} commits ",
                    self.preview.levels.len(),
                    self.preview.commits()
                ),
                Style::default().fg(self.theme.muted()),
            ));
        }
        let border = if focused {
            self.theme.accent()
        } else {
            self.theme.muted()
        };
        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(error) = &self.preview.error {
            Paragraph::new(Span::styled(
                error.as_str(),
                Style::default().fg(self.theme.error()),
            ))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
        } else if self.preview.cells.is_empty() {
            Paragraph::new(Span::styled(
                "Fill in the pattern fields to see a preview",
                Style::default().fg(self.theme.muted()),
            ))
            .alignment(Alignment::Center)
            .render(inner, buf);
        } else {
            PreviewGrid::new(&self.preview.cells, self.theme)
                .cursor(focused.then_some(self.cursor))
                .scroll(self.scroll)
                .render(inner, buf);
        }
    }

    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        let Some(summary) = &self.last_summary else {
            return;
        };
        let text = summary.push_instructions(&self.form.user_name);
        let lines: Vec<Line> = text
            .lines()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(self.theme.text()))))
            .collect();
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Next steps ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.success())),
            )
            .render(area, buf);
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let keys: &[(&str, &str)] = match self.focus {
            Focus::Form => &[
                ("Tab", "method"),
                ("↑↓", "field"),
                ("Enter", "preview"),
                ("^G", "generate"),
                ("F1", "help"),
                ("Esc", "quit"),
            ],
            Focus::Preview => &[
                ("Arrows", "move"),
                ("Space", "cycle level"),
                ("^G", "generate"),
                ("?", "help"),
                ("Esc", "form"),
            ],
        };
        let key_style = Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(self.theme.muted());
        let spans: Vec<Span> = keys
            .iter()
            .flat_map(|(key, desc)| {
                [
                    Span::styled(*key, key_style),
                    Span::styled(format!(" {desc}  "), text_style),
                ]
            })
            .collect();
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, tabs_area, form_area, preview_area, summary_area, footer_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(form_height()),
                Constraint::Length(GRID_HEIGHT + 2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(area);

        Paragraph::new(Span::styled(
            "gistory",
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(title_area, buf);

        TabBar::new(self.tab, self.theme).render(tabs_area, buf);

        let focused = (self.focus == Focus::Form).then(|| self.form.focused(self.tab));
        FormView::new(&self.form, self.tab, focused, self.theme).render(form_area, buf);

        self.render_preview(preview_area, buf);
        self.render_summary(summary_area, buf);
        self.render_footer(footer_area, buf);

        if let AppState::Generating {
            spinner_frame,
            stage,
            ..
        } = &self.state
        {
            Spinner::new(*spinner_frame, *stage, self.theme).render(area, buf);
        }

        if self.show_help {
            HelpPopup::new(self.theme).render(HelpPopup::centered_area(area), buf);
        }

        if let Some(confirm) = &self.quit_confirm {
            QuitConfirmPopup::new(confirm.choice, self.is_generating(), self.theme)
                .render(QuitConfirmPopup::centered_area(area), buf);
        }

        Toasts::new(&self.toasts, self.theme).render(area, buf);
    }
}

/// Build the final pattern and write it (runs on the generation thread)
fn generate_repo(
    start: NaiveDate,
    request: &PatternRequest,
    settings: RepoSettings,
    tx: &Sender<GenerateEvent>,
) -> Result<RepoSummary> {
    let levels = request.generate(start)?;
    let _ = tx.send(GenerateEvent::Stage(GenerateStage::Commits));
    RepoWriter::new(settings).write(start, &levels)
}

/// Run the TUI application
pub fn run(settings_service: Option<SettingsService>) -> anyhow::Result<()> {
    // Query the background color before raw mode takes over the terminal
    let theme = Theme::detect();

    let mut settings = settings_service
        .as_ref()
        .map(SettingsService::load)
        .unwrap_or_default();
    settings.fill_from_git_config();

    let app = App::new(settings, settings_service, theme, Local::now().date_naive());

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, app);
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        app.poll_generation();

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}
