use crate::app::Effect;
use crate::form_core::cell::ValueCell;
use crate::theme::Theme;
use crate::widgets::Widget;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::LineGauge;

pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 100.0;

pub struct SliderWidget {
    pub label: Option<String>,
    pub value: ValueCell<f64>,
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl SliderWidget {
    pub fn new(
        label: Option<String>,
        value: ValueCell<f64>,
        min: f64,
        max: f64,
        step: Option<f64>,
    ) -> Self {
        // An inverted range collapses to its lower bound
        let max = if max < min { min } else { max };
        Self {
            label: label.filter(|l| !l.is_empty()),
            value,
            min,
            max,
            step: step.filter(|s| *s > 0.0),
        }
    }

    fn nudge(&mut self, dir: f64) {
        let step = self.step.unwrap_or(1.0);
        let next = (self.value.get() + step * dir).clamp(self.min, self.max);
        self.value.set(next);
    }

    fn ratio(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value.get() - self.min) / span).clamp(0.0, 1.0)
    }
}

pub fn trim_float(v: f64) -> String {
    let mut s = format!("{v:.6}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s.is_empty() || s == "-0" {
        s = "0".to_string();
    }
    s
}

impl Widget for SliderWidget {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let sel = if focused { '›' } else { ' ' };
        let label = match &self.label {
            Some(l) => format!("{sel} {l} {}", trim_float(*self.value.get())),
            None => format!("{sel} {}", trim_float(*self.value.get())),
        };
        let filled = if focused {
            theme.value(true)
        } else {
            Style::default().fg(theme.accent)
        };
        let gauge = LineGauge::default()
            .label(label)
            .filled_style(filled)
            .unfilled_style(theme.hint())
            .ratio(self.ratio());
        f.render_widget(gauge, area);
    }

    fn on_key(&mut self, key: KeyCode) -> Vec<Effect> {
        match key {
            KeyCode::Right => self.nudge(1.0),
            KeyCode::Left => self.nudge(-1.0),
            KeyCode::Home => self.value.set(self.min),
            KeyCode::End => self.value.set(self.max),
            _ => {}
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_and_clamps() {
        let mut w = SliderWidget::new(None, ValueCell::new(0.0), 0.0, 10.0, Some(4.0));
        w.on_key(KeyCode::Left);
        assert_eq!(*w.value.get(), 0.0);
        w.on_key(KeyCode::Right);
        w.on_key(KeyCode::Right);
        w.on_key(KeyCode::Right);
        assert_eq!(*w.value.get(), 10.0);
        assert_eq!(w.ratio(), 1.0);
    }

    #[test]
    fn missing_step_moves_by_one() {
        let mut w = SliderWidget::new(Some("Vol".into()), ValueCell::new(5.0), 0.0, 100.0, None);
        w.on_key(KeyCode::Right);
        assert_eq!(*w.value.get(), 6.0);
    }

    #[test]
    fn trim_float_drops_trailing_zeros() {
        assert_eq!(trim_float(2.5), "2.5");
        assert_eq!(trim_float(40.0), "40");
        assert_eq!(trim_float(0.0), "0");
    }
}
