use crate::form_core::collector::collect;
use crate::form_core::focus::FocusTarget;
use crate::form_core::registry::RenderSpec;
use crate::services::file_access::PickedFile;
use crate::ui::{AppState, ToastLevel};
use crossterm::event::KeyCode;
use std::path::PathBuf;

pub enum AppMsg {
    Key(KeyCode),
    Submit,
    /// A background read finished for the file picker at registry `index`.
    FilePicked {
        index: usize,
        id: String,
        outcome: Result<PickedFile, String>,
    },
    FieldChanged {
        id: String,
    },
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    ReadFile {
        index: usize,
        id: String,
        paths: Vec<PathBuf>,
    },
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
    Quit,
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    use AppMsg::*;
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        Key(key) => {
            let focus = state.focus.current();
            let focused = match focus {
                FocusTarget::Component(i) => state.registry.at(i),
                FocusTarget::Submit => None,
            };
            let editing = focused.map(|c| c.is_editing()).unwrap_or(false);
            let vertical = focused.map(|c| c.captures_vertical()).unwrap_or(false);
            if editing {
                return route_key(state, focus, key);
            }
            match key {
                KeyCode::F(12) => {
                    state.show_debug = !state.show_debug;
                }
                KeyCode::Char('q') => effects.push(Effect::Quit),
                KeyCode::Tab => state.focus.next(),
                KeyCode::BackTab => state.focus.prev(),
                KeyCode::Down if !vertical => state.focus.next(),
                KeyCode::Up if !vertical => state.focus.prev(),
                KeyCode::Enter | KeyCode::Char(' ') if focus == FocusTarget::Submit => {
                    return update(state, Submit);
                }
                other => return route_key(state, focus, other),
            }
        }
        Submit => {
            if state.submitted {
                tracing::debug!("submit ignored: already submitted");
                state.dbg("submit ignored");
                return effects;
            }
            state.results = collect(&state.registry);
            state.submitted = true;
            tracing::info!(results = ?state.results, "form submitted");
            state.dbg(format!("submitted {} value(s)", state.results.len()));
            effects.push(Effect::ShowToast {
                text: format!("Collected {} value(s)", state.results.len()),
                level: ToastLevel::Success,
                seconds: 3,
            });
        }
        FilePicked { index, id, outcome } => {
            state.pending_files.remove(&index);
            match outcome {
                Ok(file) => {
                    let name = file.name.clone();
                    match state.registry.at_mut(index).map(|c| &mut c.spec) {
                        Some(RenderSpec::FilePicker(w)) => {
                            w.apply(file);
                            state.dbg(format!("{id}: picked {name}"));
                            effects.push(Effect::ShowToast {
                                text: format!("Attached {name}"),
                                level: ToastLevel::Info,
                                seconds: 2,
                            });
                        }
                        _ => {
                            tracing::warn!(%id, index, "picked file has no file picker to land in");
                            effects.push(Effect::ShowToast {
                                text: format!("{id}: {name} was not attached"),
                                level: ToastLevel::Error,
                                seconds: 3,
                            });
                        }
                    }
                }
                // The model stays unset; the read error was already logged
                Err(e) => state.dbg(format!("{id}: {e}")),
            }
        }
        FieldChanged { id } => {
            state.dbg(format!("changed: {id}"));
        }
    }
    effects
}

fn route_key(state: &mut AppState, focus: FocusTarget, key: KeyCode) -> Vec<Effect> {
    let FocusTarget::Component(i) = focus else {
        return Vec::new();
    };
    match state.registry.at_mut(i) {
        Some(c) => c.on_key(key),
        None => Vec::new(),
    }
}
