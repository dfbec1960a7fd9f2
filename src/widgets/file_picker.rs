use crate::app::Effect;
use crate::form_core::cell::ValueCell;
use crate::services::file_access::{parse_paths, PickedFile};
use crate::theme::Theme;
use crate::widgets::{textarea_key, Widget};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_textarea::TextArea;

/// Bytes and name of the chosen file; both absent until a pick succeeds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSelection {
    pub bytes: Option<Vec<u8>>,
    pub name: Option<String>,
}

impl From<PickedFile> for FileSelection {
    fn from(p: PickedFile) -> Self {
        Self {
            bytes: Some(p.bytes),
            name: Some(p.name),
        }
    }
}

pub struct FilePickerWidget {
    owner: String,
    // Registry index; file reads are routed back here
    slot: usize,
    pub label: Option<String>,
    pub button_text: String,
    pub file: ValueCell<FileSelection>,
    prompt: TextArea<'static>,
    prompting: bool,
}

impl FilePickerWidget {
    pub fn new(
        owner: impl Into<String>,
        label: Option<String>,
        button_text: impl Into<String>,
        file: ValueCell<FileSelection>,
    ) -> Self {
        let button_text = button_text.into();
        Self {
            owner: owner.into(),
            slot: 0,
            label: label.filter(|l| !l.is_empty()),
            button_text: if button_text.is_empty() {
                "Choose file".to_string()
            } else {
                button_text
            },
            file,
            prompt: TextArea::default(),
            prompting: false,
        }
    }

    fn open_prompt(&mut self) {
        let mut ta = TextArea::default();
        ta.set_placeholder_text("path(s) to file, space separated");
        ta.set_cursor_line_style(Style::default());
        self.prompt = ta;
        self.prompting = true;
    }

    pub fn bind_slot(&mut self, slot: usize) {
        self.slot = slot;
    }

    pub fn apply(&mut self, picked: PickedFile) {
        self.file.set(picked.into());
    }
}

impl Widget for FilePickerWidget {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let sel = if focused { '›' } else { ' ' };
        let button_style = if focused {
            theme.cursor()
        } else {
            theme.value(false)
        };
        let mut spans = vec![Span::raw(format!("{sel} "))];
        if let Some(l) = &self.label {
            spans.push(Span::raw(format!("{l}  ")));
        }
        spans.push(Span::styled(format!("[ {} ]", self.button_text), button_style));
        let mut lines = vec![Line::from(spans)];
        if let Some(name) = &self.file.get().name {
            let size = self.file.get().bytes.as_ref().map(|b| b.len()).unwrap_or(0);
            lines.push(Line::from(Span::styled(
                format!("    {name} ({size} bytes)"),
                theme.hint(),
            )));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(lines.len() as u16), Constraint::Min(0)])
            .split(area);
        f.render_widget(Paragraph::new(lines), chunks[0]);
        if self.prompting {
            self.prompt.set_block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.frame_style(true))
                    .title("Select file (Enter open • Esc cancel)"),
            );
            f.render_widget(&self.prompt, chunks[1]);
        }
    }

    fn height(&self, _width: u16) -> u16 {
        let base = if self.file.get().name.is_some() { 2 } else { 1 };
        if self.prompting {
            base + 3
        } else {
            base
        }
    }

    fn is_editing(&self) -> bool {
        self.prompting
    }

    fn on_key(&mut self, key: KeyCode) -> Vec<Effect> {
        if !self.prompting {
            if matches!(key, KeyCode::Enter | KeyCode::Char(' ')) {
                self.open_prompt();
            }
            return Vec::new();
        }
        match key {
            KeyCode::Enter => {
                let paths = parse_paths(&self.prompt.lines().join(" "));
                self.prompting = false;
                if paths.is_empty() {
                    return Vec::new();
                }
                vec![Effect::ReadFile {
                    index: self.slot,
                    id: self.owner.clone(),
                    paths,
                }]
            }
            KeyCode::Esc => {
                self.prompting = false;
                Vec::new()
            }
            other => {
                if let Some(ev) = textarea_key(other) {
                    let _ = self.prompt.input(ev);
                }
                Vec::new()
            }
        }
    }
}
