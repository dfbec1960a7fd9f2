use crate::app::Effect;
use crate::form_core::cell::ValueCell;
use crate::theme::Theme;
use crate::widgets::chrome::field_prefix;
use crate::widgets::Widget;
use chrono::{Duration, Months, NaiveDateTime};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickMode {
    Date,
    Time,
}

impl PickMode {
    fn segments(self) -> usize {
        match self {
            PickMode::Date => 3,
            PickMode::Time => 2,
        }
    }
}

/// Date or time-of-day picker; both edit a full timestamp.
pub struct DateTimeWidget {
    pub label: String,
    pub mode: PickMode,
    pub selection: ValueCell<NaiveDateTime>,
    segment: usize,
}

impl DateTimeWidget {
    pub fn new(label: impl Into<String>, mode: PickMode, selection: ValueCell<NaiveDateTime>) -> Self {
        Self {
            label: label.into(),
            mode,
            selection,
            segment: 0,
        }
    }

    pub fn formatted(&self) -> String {
        format_selection(self.mode, self.selection.get())
    }

    fn step(&mut self, dir: i32) {
        let cur = *self.selection.get();
        let next = match (self.mode, self.segment) {
            (PickMode::Date, 0) => shift_months(cur, 12 * dir),
            (PickMode::Date, 1) => shift_months(cur, dir),
            (PickMode::Date, _) => cur.checked_add_signed(Duration::days(dir.into())),
            (PickMode::Time, 0) => cur.checked_add_signed(Duration::hours(dir.into())),
            (PickMode::Time, _) => cur.checked_add_signed(Duration::minutes(dir.into())),
        };
        if let Some(v) = next {
            self.selection.set(v);
        }
    }
}

pub fn format_selection(mode: PickMode, value: &NaiveDateTime) -> String {
    match mode {
        PickMode::Date => value.format(DATE_FORMAT).to_string(),
        PickMode::Time => value.format(TIME_FORMAT).to_string(),
    }
}

// Month arithmetic clamps the day to the end of the target month
fn shift_months(v: NaiveDateTime, months: i32) -> Option<NaiveDateTime> {
    let m = Months::new(months.unsigned_abs());
    if months >= 0 {
        v.checked_add_months(m)
    } else {
        v.checked_sub_months(m)
    }
}

impl Widget for DateTimeWidget {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let text = self.formatted();
        let sep = match self.mode {
            PickMode::Date => '-',
            PickMode::Time => ':',
        };
        let mut spans = vec![field_prefix(Some(&self.label), focused)];
        for (i, part) in text.split(sep).enumerate() {
            if i > 0 {
                spans.push(Span::raw(sep.to_string()));
            }
            let style = if focused && i == self.segment {
                theme.cursor()
            } else if focused {
                theme.value(false)
            } else {
                Style::default()
            };
            spans.push(Span::styled(part.to_string(), style));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn captures_vertical(&self) -> bool {
        true
    }

    fn on_key(&mut self, key: KeyCode) -> Vec<Effect> {
        match key {
            KeyCode::Left => self.segment = self.segment.saturating_sub(1),
            KeyCode::Right => self.segment = (self.segment + 1).min(self.mode.segments() - 1),
            KeyCode::Up | KeyCode::Char('+') => self.step(1),
            KeyCode::Down | KeyCode::Char('-') => self.step(-1),
            _ => {}
        }
        Vec::new()
    }
}
