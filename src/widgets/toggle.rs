use crate::app::Effect;
use crate::form_core::cell::ValueCell;
use crate::theme::Theme;
use crate::widgets::Widget;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleStyle {
    Checkbox,
    Switch,
}

/// Boolean field. Checkbox and switch differ only in how they are drawn.
pub struct ToggleWidget {
    pub label: String,
    pub style: ToggleStyle,
    pub is_on: ValueCell<bool>,
}

impl ToggleWidget {
    pub fn new(label: impl Into<String>, style: ToggleStyle, is_on: ValueCell<bool>) -> Self {
        Self {
            label: label.into(),
            style,
            is_on,
        }
    }

    fn marker(&self) -> &'static str {
        match (self.style, *self.is_on.get()) {
            (ToggleStyle::Checkbox, true) => "[x]",
            (ToggleStyle::Checkbox, false) => "[ ]",
            (ToggleStyle::Switch, true) => "(on) ",
            (ToggleStyle::Switch, false) => "(off)",
        }
    }
}

impl Widget for ToggleWidget {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let sel = if focused { '›' } else { ' ' };
        let marker_style = if *self.is_on.get() {
            Style::default().fg(theme.accent)
        } else {
            theme.hint()
        };
        let spans = match self.style {
            ToggleStyle::Checkbox => vec![
                Span::raw(format!("{sel} ")),
                Span::styled(self.marker(), marker_style),
                Span::raw(format!(" {}", self.label)),
            ],
            ToggleStyle::Switch => vec![
                Span::raw(format!("{sel} {} ", self.label)),
                Span::styled(self.marker(), marker_style),
            ],
        };
        let mut line = Line::from(spans);
        if focused {
            line = line.style(Style::default().add_modifier(Modifier::BOLD));
        }
        f.render_widget(Paragraph::new(line), area);
    }

    fn on_key(&mut self, key: KeyCode) -> Vec<Effect> {
        if matches!(key, KeyCode::Enter | KeyCode::Char(' ')) {
            self.is_on.update(|b| *b = !*b);
        }
        Vec::new()
    }
}
