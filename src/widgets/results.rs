use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Submit control; greyed out once the form has been collected.
pub fn draw_submit(f: &mut Frame, area: Rect, focused: bool, disabled: bool, theme: &Theme) {
    let sel = if focused { '›' } else { ' ' };
    let style = if disabled {
        theme.hint()
    } else if focused {
        theme.cursor()
    } else {
        theme.value(false)
    };
    let label = if disabled { "[ Submitted ]" } else { "[ Submit ]" };
    let line = Line::from(vec![
        Span::raw(format!("{sel} ")),
        Span::styled(label, style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

pub fn results_height(results: &[String]) -> u16 {
    1 + (results.len().max(1) as u16)
}

/// Read-only list of the values collected on submit.
pub fn draw_results(f: &mut Frame, area: Rect, results: &[String], submitted: bool, theme: &Theme) {
    let mut lines = vec![Line::from(Span::styled(
        "Results",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))];
    if !submitted {
        lines.push(Line::from(Span::styled("  (not submitted)", theme.hint())));
    } else if results.is_empty() {
        lines.push(Line::from(Span::styled("  (no values)", theme.hint())));
    } else {
        lines.extend(
            results
                .iter()
                .enumerate()
                .map(|(i, v)| Line::raw(format!("  {}. {v}", i + 1))),
        );
    }
    f.render_widget(Paragraph::new(lines), area);
}
