use crate::model::ThemeChoice;
use crate::ui::ToastLevel;
use ratatui::style::{Color, Modifier, Style};

/// Palette for the form page. Widgets receive it on every render.
#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    /// Values, switches that are on, section headings.
    pub accent: Color,
    pub frame: Color,
    /// Focus cursor and fields being edited.
    pub focus: Color,
    pub success: Color,
    pub error: Color,
    /// Hints, placeholders, unfilled gauges.
    pub muted: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(24, 24, 26),
            fg: Color::White,
            accent: Color::Rgb(64, 160, 255),
            frame: Color::Rgb(90, 90, 100),
            focus: Color::Rgb(255, 120, 0),
            success: Color::Green,
            error: Color::Red,
            muted: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 247),
            fg: Color::Rgb(20, 20, 22),
            accent: Color::Rgb(40, 120, 220),
            frame: Color::Rgb(200, 200, 210),
            focus: Color::Rgb(220, 100, 0),
            success: Color::Rgb(0, 150, 0),
            error: Color::Rgb(200, 0, 0),
            muted: Color::Rgb(120, 120, 130),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn frame_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.focus } else { self.frame })
    }

    /// Value text of a focused field; brighter while it is being edited.
    pub fn value(&self, editing: bool) -> Style {
        let fg = if editing { self.focus } else { self.accent };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Inverted block marking the selected segment, option or button.
    pub fn cursor(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.focus)
            .add_modifier(Modifier::BOLD)
    }

    pub fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Success => self.success,
            ToastLevel::Error => self.error,
            ToastLevel::Info => self.accent,
        }
    }
}

impl From<ThemeChoice> for Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Theme::dark(),
            ThemeChoice::Light => Theme::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

/// Parse `RGB`, `RRGGBB` or `AARRGGBB` hex (leading `#` optional).
/// Alpha is ignored; terminals have no opacity.
pub fn color_from_hex(raw: &str) -> Option<Color> {
    let hex: String = raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let n = u32::from_str_radix(&hex, 16).ok()?;
    let (r, g, b) = match hex.len() {
        3 => ((n >> 8) * 17, (n >> 4 & 0xF) * 17, (n & 0xF) * 17),
        6 | 8 => (n >> 16 & 0xFF, n >> 8 & 0xFF, n & 0xFF),
        _ => return None,
    };
    Some(Color::Rgb(r as u8, g as u8, b as u8))
}
