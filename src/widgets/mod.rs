pub mod chrome;
pub mod date_picker;
pub mod file_picker;
pub mod form_field;
pub mod picker;
pub mod results;
pub mod slider;
pub mod status_bar;
pub mod text;
pub mod toggle;

use crate::app::Effect;
use crate::theme::Theme;
use crossterm::event::KeyCode;
use ratatui::crossterm::event as rt_event;
use ratatui::prelude::*;

pub trait Widget {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme);
    /// Rows the widget wants in a page column `width` columns wide.
    fn height(&self, width: u16) -> u16 {
        let _ = width;
        1
    }
    fn focusable(&self) -> bool {
        true
    }
    /// While editing, the widget receives every key (Tab/Esc included).
    fn is_editing(&self) -> bool {
        false
    }
    /// Up/Down adjust the value instead of moving focus.
    fn captures_vertical(&self) -> bool {
        false
    }
    fn on_key(&mut self, key: KeyCode) -> Vec<Effect> {
        let _ = key;
        Vec::new()
    }
}

/// Map a terminal key to the event type tui-textarea consumes.
pub(crate) fn textarea_key(key: KeyCode) -> Option<rt_event::KeyEvent> {
    let code = match key {
        KeyCode::Char(c) => rt_event::KeyCode::Char(c),
        KeyCode::Backspace => rt_event::KeyCode::Backspace,
        KeyCode::Delete => rt_event::KeyCode::Delete,
        KeyCode::Left => rt_event::KeyCode::Left,
        KeyCode::Right => rt_event::KeyCode::Right,
        KeyCode::Home => rt_event::KeyCode::Home,
        KeyCode::End => rt_event::KeyCode::End,
        _ => return None,
    };
    Some(rt_event::KeyEvent::new(code, rt_event::KeyModifiers::NONE))
}
