use crate::app::Effect;
use crate::form_core::cell::ValueCell;
use crate::theme::Theme;
use crate::widgets::chrome::field_prefix;
use crate::widgets::Widget;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Segmented single-choice picker. The selection holds the option text.
pub struct PickerWidget {
    pub label: Option<String>,
    pub selection: ValueCell<String>,
    pub options: Vec<String>,
}

impl PickerWidget {
    pub fn new(label: Option<String>, selection: ValueCell<String>, options: Vec<String>) -> Self {
        Self {
            label: label.filter(|l| !l.is_empty()),
            selection,
            options,
        }
    }

    fn position(&self) -> Option<usize> {
        self.options.iter().position(|o| o == self.selection.get())
    }

    /// Select `option` when it is one of the offered options.
    pub fn select(&mut self, option: &str) -> bool {
        if self.options.iter().any(|o| o == option) {
            self.selection.set(option.to_string());
            true
        } else {
            false
        }
    }

    fn cycle(&mut self, dir: i32) {
        let n = self.options.len();
        if n == 0 {
            return;
        }
        let next = match self.position() {
            Some(i) if dir >= 0 => (i + 1) % n,
            Some(i) => (i + n - 1) % n,
            None => 0,
        };
        let option = self.options[next].clone();
        self.select(&option);
    }
}

impl Widget for PickerWidget {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let mut spans = vec![field_prefix(self.label.as_deref(), focused)];
        if self.options.is_empty() {
            spans.push(Span::styled("(no options)", theme.hint()));
        }
        let current = self.position();
        for (i, opt) in self.options.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", theme.hint()));
            }
            if Some(i) == current {
                let style = if focused {
                    theme.cursor()
                } else {
                    theme.value(false)
                };
                spans.push(Span::styled(format!(" {opt} "), style));
            } else {
                spans.push(Span::raw(format!(" {opt} ")));
            }
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn on_key(&mut self, key: KeyCode) -> Vec<Effect> {
        match key {
            KeyCode::Right | KeyCode::Char(' ') => self.cycle(1),
            KeyCode::Left => self.cycle(-1),
            _ => {}
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> PickerWidget {
        PickerWidget::new(
            Some("Pet".into()),
            ValueCell::new("cat".into()),
            vec!["cat".into(), "dog".into(), "eel".into()],
        )
    }

    #[test]
    fn cycles_and_wraps() {
        let mut w = pets();
        w.on_key(KeyCode::Left);
        assert_eq!(w.selection.get(), "eel");
        w.on_key(KeyCode::Right);
        assert_eq!(w.selection.get(), "cat");
    }

    #[test]
    fn select_rejects_unknown_option() {
        let mut w = pets();
        assert!(!w.select("cow"));
        assert!(w.select("dog"));
        assert_eq!(w.selection.get(), "dog");
    }

    #[test]
    fn empty_options_is_inert() {
        let mut w = PickerWidget::new(None, ValueCell::new(String::new()), vec![]);
        w.on_key(KeyCode::Right);
        assert_eq!(w.selection.get(), "");
    }
}
