use crate::theme::Theme;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

pub fn panel_block_themed<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.frame_style(focused))
}

/// Leading cursor + label prefix shared by single-line fields.
pub fn field_prefix(label: Option<&str>, focused: bool) -> Span<'static> {
    let sel = if focused { '›' } else { ' ' };
    match label {
        Some(l) if !l.is_empty() => Span::raw(format!("{sel} {l}: ")),
        _ => Span::raw(format!("{sel} ")),
    }
}

pub fn value_style(theme: &Theme, focused: bool, editing: bool) -> Style {
    if focused {
        theme.value(editing)
    } else {
        Style::default()
    }
}
