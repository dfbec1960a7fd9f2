use crate::app::Effect;
use crate::form_core::cell::ValueCell;
use crate::theme::Theme;
use crate::widgets::chrome::{field_prefix, value_style};
use crate::widgets::{textarea_key, Widget};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_textarea::{CursorMove, TextArea};

/// Single-line free text input.
pub struct FormFieldWidget {
    pub hint: String,
    pub label: Option<String>,
    pub text: ValueCell<String>,
    input: TextArea<'static>,
    editing: bool,
}

impl FormFieldWidget {
    pub fn new(hint: impl Into<String>, text: ValueCell<String>, label: Option<String>) -> Self {
        Self {
            hint: hint.into(),
            label: label.filter(|l| !l.is_empty()),
            text,
            input: TextArea::default(),
            editing: false,
        }
    }

    fn begin_edit(&mut self) {
        let mut ta = TextArea::from(vec![self.text.get().clone()]);
        ta.set_placeholder_text(self.hint.clone());
        ta.set_cursor_line_style(Style::default());
        ta.move_cursor(CursorMove::End);
        self.input = ta;
        self.editing = true;
    }

    fn commit(&mut self) {
        let value = self.input.lines().join("");
        self.text.set(value);
        self.editing = false;
    }
}

impl Widget for FormFieldWidget {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        if self.editing {
            let title = self.label.clone().unwrap_or_else(|| self.hint.clone());
            self.input.set_block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.frame_style(true))
                    .title(format!("{title} (Enter save • Esc cancel)")),
            );
            f.render_widget(&self.input, area);
            return;
        }
        let current = self.text.get();
        let value = if current.is_empty() {
            Span::styled(self.hint.clone(), theme.hint())
        } else {
            Span::styled(current.clone(), value_style(theme, focused, false))
        };
        let line = Line::from(vec![field_prefix(self.label.as_deref(), focused), value]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn height(&self, _width: u16) -> u16 {
        if self.editing {
            3
        } else {
            1
        }
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn on_key(&mut self, key: KeyCode) -> Vec<Effect> {
        if !self.editing {
            if key == KeyCode::Enter {
                self.begin_edit();
            }
            return Vec::new();
        }
        match key {
            KeyCode::Enter => self.commit(),
            KeyCode::Esc => self.editing = false,
            other => {
                if let Some(ev) = textarea_key(other) {
                    let _ = self.input.input(ev);
                }
            }
        }
        Vec::new()
    }
}
