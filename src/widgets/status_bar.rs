use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::form_core::focus::FocusTarget;
use crate::ui::AppState;

const HELP: &str = "Tab/↑↓ move  Enter edit/submit  Space toggle  ←/→ change  F12 debug  q quit";
const HELP_EDITING: &str = "Enter confirm  Esc cancel";

pub fn draw_status(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = Vec::new();
    if !state.pending_files.is_empty() {
        let spinner = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"][state.tick as usize % 6];
        spans.push(Span::raw(format!(" {spinner} reading file  |  ")));
    }
    if let Some(t) = &state.toast {
        let color = state.theme.toast_color(t.level);
        let tag = match t.level {
            crate::ui::ToastLevel::Success => "[OK]",
            crate::ui::ToastLevel::Error => "[ERROR]",
            crate::ui::ToastLevel::Info => "[INFO]",
        };
        spans.push(Span::styled(
            format!("{tag} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  |  ", t.text),
            Style::default().fg(color),
        ));
    }
    let (focus, editing) = match state.focus.current() {
        FocusTarget::Component(i) => state
            .registry
            .at(i)
            .map(|c| (format!("{} ({})", c.id, c.kind), c.is_editing()))
            .unwrap_or_else(|| ("-".to_string(), false)),
        FocusTarget::Submit => ("submit".to_string(), false),
    };
    spans.push(Span::styled(
        format!("focus: {focus}"),
        Style::default().fg(Color::Magenta),
    ));
    if editing {
        spans.push(Span::raw("  |  editing"));
    }
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        if editing { HELP_EDITING } else { HELP },
        state.theme.hint(),
    ));
    let p = Paragraph::new(Line::from(spans));
    f.render_widget(p, area);
}
