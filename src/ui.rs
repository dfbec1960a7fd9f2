use crate::app::{update, AppMsg, Effect};
use crate::form_core::focus::{FocusState, FocusTarget};
use crate::form_core::registry::{ComponentRegistry, FieldChanged};
use crate::model::{validate_app_config, AppConfig};
use crate::services::file_access::{read_first, spawn_read_first, PickedFile, ScopedAccess};
use crate::services::loader::resolve_source;
use crate::theme::Theme;
use crate::widgets::chrome::panel_block_themed;
use crate::widgets::results::{draw_results, draw_submit, results_height};
use crate::widgets::status_bar::draw_status;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

const CONFIG_FILE: &str = "dynform.yaml";
const TICK_MS: u64 = 200;

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) registry: ComponentRegistry,
    pub(crate) focus: FocusState,
    // Last collected values; set once by submit
    pub(crate) results: Vec<String>,
    pub(crate) submitted: bool,
    pub(crate) should_quit: bool,
    pub(crate) tick: u64,
    pub(crate) toast: Option<Toast>,
    pub(crate) theme: Theme,
    pub(crate) scroll: u16,
    pub(crate) access: ScopedAccess,
    // Registry indexes of file pickers with a read in flight
    pub(crate) pending_files: HashSet<usize>,
    pub(crate) tx: Option<Sender<LoadMsg>>,
    rx: Option<Receiver<LoadMsg>>,
    changes: Option<Receiver<FieldChanged>>,
    // Debug log (rendered in the F12 pane)
    pub(crate) show_debug: bool,
    pub(crate) debug_log: VecDeque<String>,
}

impl AppState {
    pub(crate) fn with_registry(config: AppConfig, mut registry: ComponentRegistry) -> Self {
        let (tx, rx) = mpsc::channel::<LoadMsg>();
        let (c_tx, c_rx) = mpsc::channel::<FieldChanged>();
        for c in registry.iter_mut() {
            c.watch(c_tx.clone());
        }
        let focus = FocusState::new(&registry);
        let theme = Theme::from(config.theme);
        Self {
            config,
            registry,
            focus,
            theme,
            tx: Some(tx),
            rx: Some(rx),
            changes: Some(c_rx),
            ..Default::default()
        }
    }

    /// Open the page: load the layout once and build its components.
    pub(crate) fn open(config: AppConfig, base_dir: Option<&Path>) -> Self {
        let source = resolve_source(&config, base_dir);
        let mut registry = ComponentRegistry::new();
        registry.load(&source);
        let mut state = Self::with_registry(config, registry);
        state.dbg(format!("layout {source}: {} component(s)", state.registry.len()));
        state
    }

    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        let msg = msg.into();
        tracing::debug!(target: "dynform::ui", "{msg}");
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg);
    }

    pub(crate) fn submit(&mut self) {
        let effects = update(self, AppMsg::Submit);
        run_effects(self, effects);
    }

    /// Drain background file reads and field change notifications.
    pub(crate) fn pump(&mut self) {
        let mut loaded: Vec<LoadMsg> = Vec::new();
        if let Some(rx) = &self.rx {
            while let Ok(msg) = rx.try_recv() {
                loaded.push(msg);
            }
        }
        for msg in loaded {
            let effects = update(
                self,
                AppMsg::FilePicked {
                    index: msg.index,
                    id: msg.key,
                    outcome: msg.outcome,
                },
            );
            run_effects(self, effects);
        }
        let mut changed: Vec<FieldChanged> = Vec::new();
        if let Some(rx) = &self.changes {
            while let Ok(c) = rx.try_recv() {
                changed.push(c);
            }
        }
        for c in changed {
            let effects = update(self, AppMsg::FieldChanged { id: c.id });
            run_effects(self, effects);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

/// Background file read result for the file picker at registry `index`.
pub(crate) struct LoadMsg {
    pub(crate) index: usize,
    pub(crate) key: String,
    pub(crate) outcome: Result<PickedFile, String>,
}

pub(crate) fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::ReadFile { index, id, paths } => {
                let selection = state.access.begin(paths);
                state.dbg(format!("{id}: reading {:?}", selection.paths.first()));
                match state.tx.clone() {
                    Some(tx) => {
                        state.pending_files.insert(index);
                        spawn_read_first(selection, index, id, tx);
                    }
                    None => {
                        let outcome = read_first(selection).map_err(|e| e.to_string());
                        let effs = update(state, AppMsg::FilePicked { index, id, outcome });
                        run_effects(state, effs);
                    }
                }
            }
            Effect::ShowToast {
                text,
                level,
                seconds,
            } => {
                let ticks = seconds.saturating_mul(1000 / TICK_MS);
                state.toast = Some(Toast {
                    text,
                    level,
                    expires_at_tick: state.tick.saturating_add(ticks),
                });
            }
            Effect::Quit => state.should_quit = true,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub fn run(config: AppConfig, base_dir: Option<PathBuf>) -> Result<()> {
    let mut state = AppState::open(config, base_dir.as_deref());
    if env_flag("DYNFORM_HEADLESS") {
        return run_headless(&mut state);
    }
    // Setup terminal (interactive)
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let res = event_loop(&mut terminal, &mut state);
    // Restore
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut AppState) -> Result<()> {
    let tick_rate = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();
    while !state.should_quit {
        terminal.draw(|f| ui(f, state))?;
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    state.dbg(format!("key: {:?}", key.code));
                    let effects = update(state, AppMsg::Key(key.code));
                    run_effects(state, effects);
                }
            }
        }
        state.pump();
        if last_tick.elapsed() >= tick_rate {
            state.tick = state.tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    }
    Ok(())
}

// Headless smoke mode: render into a TestBackend and print a JSON summary
fn run_headless(state: &mut AppState) -> Result<()> {
    let ticks: u64 = std::env::var("DYNFORM_TICKS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10);
    let submit = env_flag("DYNFORM_HEADLESS_SUBMIT");
    let backend = ratatui::backend::TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend)?;
    for n in 0..ticks {
        terminal.draw(|f| ui(f, state))?;
        if submit && n == 0 {
            state.submit();
        }
        state.pump();
        state.tick = state.tick.wrapping_add(1);
        std::thread::sleep(Duration::from_millis(TICK_MS));
    }
    if submit && !state.submitted {
        state.submit();
    }
    terminal.draw(|f| ui(f, state))?;
    let summary = serde_json::json!({
        "components": state.registry.len(),
        "results": state.results,
        "submitted": state.submitted,
    });
    println!("{summary}");
    Ok(())
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
    let cfg: AppConfig =
        serde_yaml::from_str(&s).with_context(|| format!("parsing {path:?}"))?;
    validate_app_config(&cfg)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("invalid config {path:?}"))?;
    Ok(cfg)
}

/// Locate and parse `dynform.yaml`. Returns defaults when none exists,
/// together with the directory relative paths resolve against.
pub fn load_config() -> Result<(AppConfig, Option<PathBuf>)> {
    // 1) DYNFORM_CONFIG_DIR names the config directory explicitly
    if let Ok(base) = std::env::var("DYNFORM_CONFIG_DIR") {
        let base_dir = PathBuf::from(&base);
        let entry = base_dir.join(CONFIG_FILE);
        let cfg = if entry.exists() {
            read_config(&entry)?
        } else {
            AppConfig::default()
        };
        return Ok((cfg, Some(base_dir)));
    }
    // 2) Discover from CWD and upwards
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match discover_config(&cwd) {
        Some(p) => {
            let base_dir = p.parent().unwrap_or(&cwd).to_path_buf();
            let cfg = read_config(&p)?;
            Ok((cfg, Some(base_dir)))
        }
        None => Ok((AppConfig::default(), None)),
    }
}

pub(crate) fn discover_config(start: &Path) -> Option<PathBuf> {
    let candidates = [
        start.join(CONFIG_FILE),
        start.join(".tui").join(CONFIG_FILE),
    ];
    if let Some(p) = candidates.into_iter().find(|p| p.exists()) {
        return Some(p);
    }
    // Walk up ancestors looking for <ancestor>/.tui/dynform.yaml
    start
        .ancestors()
        .skip(1)
        .map(|a| a.join(".tui").join(CONFIG_FILE))
        .find(|p| p.exists())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Slot {
    Component(usize),
    Gap,
    Submit,
    Results,
}

fn ui(f: &mut Frame, state: &mut AppState) {
    // Clear expired toast
    if let Some(t) = &state.toast {
        if state.tick >= t.expires_at_tick {
            state.toast = None;
        }
    }
    let screen = f.area();
    f.render_widget(Block::default().style(state.theme.base()), screen);

    const DEBUG_H: u16 = 6;
    let mut constraints = vec![Constraint::Min(0)];
    if state.show_debug {
        constraints.push(Constraint::Length(DEBUG_H));
    }
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(screen);

    draw_page(f, chunks[0], state);
    if state.show_debug {
        draw_debug(f, chunks[1], state);
    }
    draw_status(f, chunks[chunks.len() - 1], state);
}

// Components top to bottom in registry order, then submit and results
fn draw_page(f: &mut Frame, area: Rect, state: &mut AppState) {
    let title = format!(" {} ", state.config.title);
    let block = panel_block_themed(&title, true, &state.theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut slots: Vec<(Slot, u16)> = state
        .registry
        .iter()
        .enumerate()
        .map(|(i, c)| (Slot::Component(i), c.height(inner.width)))
        .collect();
    slots.push((Slot::Gap, 1));
    slots.push((Slot::Submit, 1));
    slots.push((Slot::Gap, 1));
    slots.push((Slot::Results, results_height(&state.results)));

    let focus = match state.focus.current() {
        FocusTarget::Component(i) => Slot::Component(i),
        FocusTarget::Submit => Slot::Submit,
    };
    let mut top = 0u16;
    let mut tops: Vec<u16> = Vec::with_capacity(slots.len());
    for (slot, h) in &slots {
        tops.push(top);
        if *slot == focus {
            state.scroll = keep_visible(state.scroll, top, *h, inner.height);
        }
        top = top.saturating_add(*h);
    }

    let view_end = state.scroll.saturating_add(inner.height);
    for ((slot, h), top) in slots.into_iter().zip(tops) {
        if top < state.scroll || top >= view_end {
            continue;
        }
        let rect = Rect {
            x: inner.x,
            y: inner.y + (top - state.scroll),
            width: inner.width,
            height: h.min(view_end - top),
        };
        match slot {
            Slot::Component(i) => {
                let theme = &state.theme;
                if let Some(c) = state.registry.at_mut(i) {
                    c.render(f, rect, focus == slot, theme);
                }
            }
            Slot::Submit => draw_submit(f, rect, focus == slot, state.submitted, &state.theme),
            Slot::Results => {
                draw_results(f, rect, &state.results, state.submitted, &state.theme)
            }
            Slot::Gap => {}
        }
    }
}

/// Scroll offset that keeps rows `[top, top + h)` inside a viewport of `view` rows.
pub(crate) fn keep_visible(scroll: u16, top: u16, h: u16, view: u16) -> u16 {
    if top < scroll {
        top
    } else if top.saturating_add(h) > scroll.saturating_add(view) {
        top.saturating_add(h).saturating_sub(view).min(top)
    } else {
        scroll
    }
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let b = Block::default()
        .borders(Borders::TOP)
        .border_style(state.theme.frame_style(false))
        .title(Span::styled(
            "Debug",
            state.theme.hint().add_modifier(Modifier::BOLD),
        ));
    // Take last `area.height` lines
    let h = area.height.saturating_sub(1) as usize;
    let start = state.debug_log.len().saturating_sub(h);
    let lines: Vec<Line> = state
        .debug_log
        .iter()
        .skip(start)
        .map(|s| Line::raw(s.clone()))
        .collect();
    let p = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(b)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}
