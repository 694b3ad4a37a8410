//! App: component-based event loop.
//!
//! - `App` owns all components and `AppState` (read-only for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The loop draws a frame, then awaits the next message or tick.
//! - Components return `Vec<Action>`; App applies each Action.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use labsite_core::news::extract_news;
use labsite_core::partials::{load_partials, PartialsLoaded};
use labsite_core::site::SiteSource;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        chip_bar::ChipBar, entry_detail::EntryDetail, help_overlay::HelpOverlay,
        log_panel::LogPanel, media_list::MediaList, news_panel::NewsPanel, pager::Pager,
    },
    focus::FocusRing,
    theme::C_BG,
    widgets::{
        status_bar::{self, InputMode},
        toast::{Severity, ToastManager},
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    /// Result of the background overlay load.
    PartialsLoaded(Option<PartialsLoaded>),
}

/// Overlay partials to fetch once the UI is up.
pub struct PartialsJob {
    pub client: reqwest::Client,
    pub page: SiteSource,
    pub files: Vec<String>,
}

/// Last-drawn rects of the focusable panes, for mouse hit-testing.
#[derive(Default, Clone)]
struct PaneAreas {
    chip_bar: Rect,
    media_list: Rect,
    pager: Rect,
    news_panel: Rect,
    log_panel: Rect,
}

pub struct App {
    state: AppState,

    chip_bar: ChipBar,
    media_list: MediaList,
    pager: Pager,
    news_panel: NewsPanel,
    entry_detail: EntryDetail,
    help_overlay: HelpOverlay,
    log_panel: LogPanel,

    focus: FocusRing,
    toast: ToastManager,
    pane_areas: PaneAreas,
    show_keys_bar: bool,
    partials: Option<PartialsJob>,
    log_path: Option<PathBuf>,
    should_quit: bool,
}

impl App {
    pub fn new(state: AppState, partials: Option<PartialsJob>, log_path: Option<PathBuf>) -> Self {
        let mut focus = FocusRing::new(base_focus_items());
        focus.set(ComponentId::MediaList);
        Self {
            state,
            chip_bar: ChipBar::new(),
            media_list: MediaList::new(),
            pager: Pager::new(),
            news_panel: NewsPanel::new(),
            entry_detail: EntryDetail::new(),
            help_overlay: HelpOverlay::new(),
            log_panel: LogPanel::new(),
            focus,
            toast: ToastManager::new(),
            pane_areas: PaneAreas::default(),
            show_keys_bar: true,
            partials,
            log_path,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            while let Ok(ev) = event::read() {
                if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                    break;
                }
            }
        });

        // ── Background task: overlay partials ─────────────────────────────────
        if let Some(job) = self.partials.take() {
            self.toast.spinner("loading overlays…");
            let partials_tx = tx.clone();
            tokio::spawn(async move {
                let loaded = load_partials(&job.client, &job.page, &job.files).await;
                let _ = partials_tx.send(AppMessage::PartialsLoaded(loaded)).await;
            });
        }

        // Toast expiry + spinner animation
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut log_refresh = tokio::time::interval(Duration::from_secs(2));
        log_refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Sync cursor-dependent panes with the initial view.
        self.dispatch(Action::ViewChanged);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }
                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }
                _ = log_refresh.tick() => {
                    needs_redraw = self.reload_log();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("labsite exiting");

        Ok(())
    }

    /// Returns whether a redraw is needed.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
                self.sync_input_mode();
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                let actions = self.handle_mouse(mouse);
                let redraw = !actions.is_empty();
                for action in actions {
                    self.dispatch(action);
                }
                redraw
            }
            AppMessage::Event(Event::Resize(_, _)) => true,
            AppMessage::Event(_) => false,
            AppMessage::PartialsLoaded(loaded) => {
                self.on_partials_loaded(loaded);
                true
            }
        }
    }

    fn on_partials_loaded(&mut self, loaded: Option<PartialsLoaded>) {
        let Some(loaded) = loaded else {
            info!("[partials] no overlays injected");
            self.toast.dismiss_spinner();
            return;
        };
        match extract_news(&loaded.html) {
            Ok(news) => {
                info!(
                    "[partials] {} fragment(s), {} news link(s)",
                    loaded.loaded,
                    news.len()
                );
                self.state.news = news;
                self.rebuild_focus();
                self.toast.resolve_spinner(
                    Severity::Success,
                    format!(
                        "overlays loaded: {} fragment(s), {} skipped",
                        loaded.loaded, loaded.skipped
                    ),
                    Duration::from_secs(3),
                );
            }
            Err(e) => {
                warn!("[partials] could not read news links: {}", e);
                self.toast.dismiss_spinner();
                self.toast.warning(format!("overlays: {}", e));
            }
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let normal = self.state.input_mode == InputMode::Normal;

        match key.code {
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('q') if normal && !self.help_overlay.visible => {
                return vec![Action::Quit];
            }
            KeyCode::Char('?') if normal && !self.help_overlay.visible => {
                return vec![Action::ToggleHelp];
            }
            _ => {}
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Tab if normal => return vec![Action::FocusNext],
            KeyCode::Tab => return vec![Action::CloseFilter, Action::FocusNext],
            KeyCode::BackTab if normal => return vec![Action::FocusPrev],
            KeyCode::BackTab => return vec![Action::CloseFilter, Action::FocusPrev],
            _ => {}
        }

        if normal {
            match key.code {
                KeyCode::Char('s') => return vec![Action::CycleSort],
                KeyCode::Char('S') => return vec![Action::CycleSortReverse],
                KeyCode::Char('[') => return vec![Action::PrevPage],
                KeyCode::Char(']') => return vec![Action::NextPage],
                KeyCode::Char('/') => return vec![Action::OpenFilter],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Char('L') => return vec![Action::ToggleLogs],
                KeyCode::Char(c @ '1'..='4') => {
                    let pos = c as usize - '1' as usize;
                    self.focus.set_by_position(pos);
                    return vec![];
                }
                _ => {}
            }
        }

        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::ChipBar) => self.chip_bar.handle_key(key, s),
            Some(ComponentId::MediaList) => self.media_list.handle_key(key, s),
            Some(ComponentId::Pager) => self.pager.handle_key(key, s),
            Some(ComponentId::NewsPanel) => self.news_panel.handle_key(key, s),
            Some(ComponentId::LogPanel) => self.log_panel.handle_key(key, s),
            Some(ComponentId::HelpOverlay) | None => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click || self.help_overlay.visible {
            return vec![];
        }

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas.clone();
        let (col, row) = (event.column, event.row);
        let s = &self.state;

        let (id, mut actions) = if hit(areas.chip_bar, col, row) {
            (
                ComponentId::ChipBar,
                self.chip_bar.handle_mouse(event, areas.chip_bar, s),
            )
        } else if hit(areas.media_list, col, row) {
            (
                ComponentId::MediaList,
                self.media_list.handle_mouse(event, areas.media_list, s),
            )
        } else if hit(areas.pager, col, row) {
            (
                ComponentId::Pager,
                self.pager.handle_mouse(event, areas.pager, s),
            )
        } else if hit(areas.news_panel, col, row) {
            (
                ComponentId::NewsPanel,
                self.news_panel.handle_mouse(event, areas.news_panel, s),
            )
        } else if hit(areas.log_panel, col, row) {
            (
                ComponentId::LogPanel,
                self.log_panel.handle_mouse(event, areas.log_panel, s),
            )
        } else {
            return vec![];
        };

        // Focus follows the click
        let scrolled = matches!(
            event.kind,
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !scrolled && !self.focus.is_focused(id) {
            actions.insert(0, Action::FocusPane(id));
        }
        actions
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Components see the action first, then the app applies it.
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.chip_bar.on_action(&action, s));
            out.extend(self.media_list.on_action(&action, s));
            out.extend(self.pager.on_action(&action, s));
            out.extend(self.news_panel.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out.extend(self.log_panel.on_action(&action, s));
            out
        };

        self.apply_action(action);

        for a in secondary {
            self.apply_action(a);
        }
    }

    /// Re-sync every pane after the controller recomputed the view.
    fn view_changed(&mut self) {
        self.dispatch(Action::ViewChanged);
    }

    fn apply_action(&mut self, action: Action) {
        match &action {
            Action::HoverEntry(_) | Action::Noop | Action::ViewChanged => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Selection ─────────────────────────────────────────────────────
            Action::SelectFilter(filter) => {
                if self.state.media.select_filter(&filter) {
                    info!("[media] filter -> {}", filter);
                    self.view_changed();
                }
            }
            Action::Search(query) => {
                if self.state.media.search(&query) {
                    self.view_changed();
                }
            }
            Action::CycleSort | Action::CycleSortReverse => {
                let forward = action == Action::CycleSort;
                if self.state.media.cycle_sort(forward) {
                    let mode = self.state.media.selection().sort_mode();
                    info!("[media] sort -> {}", mode);
                    self.toast.info(format!("sort: {}", mode.label()));
                    self.view_changed();
                } else {
                    self.toast.info("this page has no sort control");
                }
            }
            Action::GotoPage(page) => {
                if self.state.media.goto_page(page) {
                    self.view_changed();
                }
            }
            Action::PrevPage => {
                if self.state.media.prev_page() {
                    self.view_changed();
                }
            }
            Action::NextPage => {
                if self.state.media.next_page() {
                    self.view_changed();
                }
            }
            Action::ViewChanged => {}

            // ── Entries ───────────────────────────────────────────────────────
            Action::HoverEntry(idx) => {
                self.state.hovered = idx;
            }
            Action::ToggleEmbed(idx) => match self.state.media.toggle_embed(idx) {
                Some(open) => debug!("[media] embed {} -> {}", idx, open),
                None => self.toast.info("no embed for this entry"),
            },
            Action::Activate(idx) => {
                let url = self.state.media.activate(idx).map(str::to_string);
                match url {
                    Some(url) => self.apply_action(Action::OpenUrl(url)),
                    None => debug!("[media] entry {} has no link", idx),
                }
            }
            Action::OpenUrl(url) => match webbrowser::open(&url) {
                Ok(()) => {
                    info!("opened {}", url);
                    self.toast.success(format!("opened {}", truncate(&url, 40)));
                }
                Err(e) => {
                    warn!("failed to open {}: {}", url, e);
                    self.toast.error(format!("could not open browser: {}", e));
                }
            },
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => self.toast.success(format!("copied: {}", truncate(&text, 40))),
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => self.focus.set(id),
            Action::OpenFilter => {
                if self.state.media.controls().search {
                    self.focus.set(ComponentId::MediaList);
                } else {
                    self.toast.info("this page has no search box");
                }
            }
            Action::CloseFilter => {}

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleHelp => {}
            Action::ToggleKeys => self.show_keys_bar = !self.show_keys_bar,
            Action::ToggleLogs => {
                let was_focused = self.focus.is_focused(ComponentId::LogPanel);
                self.reload_log();
                self.rebuild_focus();
                if self.log_panel.expanded {
                    self.focus.set(ComponentId::LogPanel);
                } else if was_focused {
                    self.focus.set(ComponentId::MediaList);
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    /// Panes that take part in Tab / number-key focus right now.
    fn rebuild_focus(&mut self) {
        let mut items = base_focus_items();
        if !self.state.news.is_empty() {
            items.push(ComponentId::NewsPanel);
        }
        if self.log_panel.expanded {
            items.push(ComponentId::LogPanel);
        }
        self.focus.set_items(items);
    }

    /// Read the last 500 lines of the log file. Returns whether anything changed.
    fn reload_log(&mut self) -> bool {
        let Some(path) = &self.log_path else {
            return false;
        };
        let Ok(content) = std::fs::read_to_string(path) else {
            return false;
        };
        let lines: Vec<&str> = content.lines().collect();
        let start = lines.len().saturating_sub(500);
        let tail: Vec<String> = lines[start..].iter().map(|l| l.to_string()).collect();
        if tail == self.state.log_lines {
            return false;
        }
        self.state.log_lines = tail;
        true
    }

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.media_list.is_searching() {
            InputMode::Search
        } else {
            InputMode::Normal
        };
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let keys_h = u16::from(self.show_keys_bar);
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(self.log_panel.height()),
                Constraint::Length(keys_h),
            ])
            .split(area);

        status_bar::draw_title_bar(frame, outer[0], &self.state);
        status_bar::draw_separator(frame, outer[1]);

        let focused = |id| self.focus.is_focused(id);
        let (chips_f, list_f, pager_f, news_f, log_f) = (
            focused(ComponentId::ChipBar),
            focused(ComponentId::MediaList),
            focused(ComponentId::Pager),
            focused(ComponentId::NewsPanel),
            focused(ComponentId::LogPanel),
        );

        self.chip_bar.draw(frame, outer[2], chips_f, &self.state);
        self.pane_areas.chip_bar = outer[2];

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(outer[3]);
        self.media_list.draw(frame, body[0], list_f, &self.state);
        self.pane_areas.media_list = body[0];

        if self.state.news.is_empty() {
            self.entry_detail.draw(frame, body[1], &self.state);
            self.pane_areas.news_panel = Rect::default();
        } else {
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(body[1]);
            self.entry_detail.draw(frame, right[0], &self.state);
            self.news_panel.draw(frame, right[1], news_f, &self.state);
            self.pane_areas.news_panel = right[1];
        }

        self.pager.draw(frame, outer[4], pager_f, &self.state);
        self.pane_areas.pager = outer[4];

        self.log_panel.draw(frame, outer[5], log_f, &self.state);
        self.pane_areas.log_panel = outer[5];

        if self.show_keys_bar {
            status_bar::draw_keys_bar(frame, outer[6], self.state.input_mode);
        }

        self.help_overlay.draw(frame, area, false, &self.state);
        self.toast.draw(frame, area);
    }
}

fn base_focus_items() -> Vec<ComponentId> {
    vec![
        ComponentId::ChipBar,
        ComponentId::MediaList,
        ComponentId::Pager,
    ]
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}…", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}
