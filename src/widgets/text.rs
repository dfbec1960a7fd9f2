use crate::theme::Theme;
use crate::widgets::Widget;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Static display text. Carries no collectible value.
#[derive(Clone, Debug, Default)]
pub struct TextWidget {
    pub text: String,
    pub font_type: Option<String>,
    pub font_color: Option<String>,
}

impl TextWidget {
    pub fn new(text: impl Into<String>, font_type: Option<String>, font_color: Option<String>) -> Self {
        Self {
            text: text.into(),
            font_type,
            font_color,
        }
    }

    pub fn is_title(&self) -> bool {
        self.font_type.as_deref() == Some(".title")
    }

    pub fn style(&self) -> Style {
        let mut style = Style::default();
        if self.is_title() {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if let Some(color) = self
            .font_color
            .as_deref()
            .and_then(crate::theme::color_from_hex)
        {
            style = style.fg(color);
        }
        style
    }
}

fn display_width(s: &str) -> usize {
    Span::raw(s).width()
}

/// Greedy word wrap into rows of at most `width` columns. Words wider
/// than a row are split by character. Always yields at least one row.
pub fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut cur = String::new();
    let mut cur_w = 0;
    for word in text.split_whitespace() {
        let w = display_width(word);
        if !cur.is_empty() && cur_w + 1 + w <= width {
            cur.push(' ');
            cur.push_str(word);
            cur_w += 1 + w;
            continue;
        }
        if !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
            cur_w = 0;
        }
        if w <= width {
            cur.push_str(word);
            cur_w = w;
            continue;
        }
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let cw = display_width(ch.encode_utf8(&mut buf));
            if !cur.is_empty() && cur_w + cw > width {
                lines.push(std::mem::take(&mut cur));
                cur_w = 0;
            }
            cur.push(ch);
            cur_w += cw;
        }
    }
    if !cur.is_empty() || lines.is_empty() {
        lines.push(cur);
    }
    lines
}

impl Widget for TextWidget {
    fn render(&mut self, f: &mut Frame, area: Rect, _focused: bool, _theme: &Theme) {
        let style = self.style();
        let lines: Vec<Line> = wrap_lines(&self.text, area.width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, style)))
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }

    fn height(&self, width: u16) -> u16 {
        u16::try_from(wrap_lines(&self.text, width).len()).unwrap_or(u16::MAX)
    }

    fn focusable(&self) -> bool {
        false
    }
}
