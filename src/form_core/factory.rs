//! Builds one component per layout entry.
//!
//! `build` is total: unrecognized types yield a diagnostic text component
//! naming the offending id, so a broken entry stays visible on the page.

use crate::error::FieldIssue;
use crate::form_core::cell::ValueCell;
use crate::form_core::registry::{Component, RenderSpec};
use crate::model::{FieldDescriptor, FieldType};
use crate::widgets::date_picker::{DateTimeWidget, PickMode};
use crate::widgets::file_picker::{FilePickerWidget, FileSelection};
use crate::widgets::form_field::FormFieldWidget;
use crate::widgets::picker::PickerWidget;
use crate::widgets::slider::{SliderWidget, DEFAULT_MAX, DEFAULT_MIN};
use crate::widgets::text::TextWidget;
use crate::widgets::toggle::{ToggleStyle, ToggleWidget};
use chrono::{Local, NaiveDateTime};

pub fn build(d: &FieldDescriptor) -> Component {
    build_at(d, Local::now().naive_local())
}

/// Like `build`, with `now` seeding date and time models.
pub fn build_at(d: &FieldDescriptor, now: NaiveDateTime) -> Component {
    if !d.id_matches_type() {
        tracing::debug!(id = %d.id, field_type = %d.field_type, "id prefix differs from type");
    }
    let label = || d.arg("label").unwrap_or("").to_string();
    let spec = match &d.field_type {
        FieldType::Text => RenderSpec::Text(TextWidget::new(
            d.arg("text").unwrap_or(""),
            d.arg("fontType").map(str::to_string),
            d.arg("fontColor").map(str::to_string),
        )),
        FieldType::FormField => RenderSpec::FormField(FormFieldWidget::new(
            d.arg("hint").unwrap_or(""),
            ValueCell::new(String::new()),
            Some(label()),
        )),
        FieldType::Date => RenderSpec::DatePicker(DateTimeWidget::new(
            label(),
            PickMode::Date,
            ValueCell::new(now),
        )),
        FieldType::Time => RenderSpec::TimePicker(DateTimeWidget::new(
            label(),
            PickMode::Time,
            ValueCell::new(now),
        )),
        FieldType::Picker => {
            let options = d.options.clone().unwrap_or_default();
            let initial = options.first().cloned().unwrap_or_default();
            RenderSpec::Picker(PickerWidget::new(
                Some(label()),
                ValueCell::new(initial),
                options,
            ))
        }
        FieldType::Checkbox => RenderSpec::Checkbox(ToggleWidget::new(
            label(),
            ToggleStyle::Checkbox,
            ValueCell::new(true),
        )),
        FieldType::Toggle => RenderSpec::Toggle(ToggleWidget::new(
            label(),
            ToggleStyle::Switch,
            ValueCell::new(true),
        )),
        FieldType::FilePicker => RenderSpec::FilePicker(FilePickerWidget::new(
            d.id.clone(),
            Some(label()),
            d.arg("buttonText").unwrap_or(""),
            ValueCell::new(FileSelection::default()),
        )),
        FieldType::Slider => RenderSpec::Slider(SliderWidget::new(
            Some(label()),
            ValueCell::new(0.0),
            parse_number(d.arg("min")).unwrap_or(DEFAULT_MIN),
            parse_number(d.arg("max")).unwrap_or(DEFAULT_MAX),
            parse_number(d.arg("step")),
        )),
        FieldType::Unknown(tag) => {
            let issue = FieldIssue::UnknownFieldType {
                id: d.id.clone(),
                tag: tag.clone(),
            };
            tracing::warn!(%issue, "rendering fallback");
            RenderSpec::Text(TextWidget::new(
                format!("something went wrong: {issue}"),
                None,
                d.arg("fontColor").map(str::to_string),
            ))
        }
    };
    Component {
        id: d.id.clone(),
        kind: d.field_type.clone(),
        spec,
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn desc(id: &str, t: &str, args: &[(&str, &str)]) -> FieldDescriptor {
        FieldDescriptor {
            id: id.into(),
            field_type: FieldType::from_tag(t),
            args: args
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            options: None,
        }
    }

    #[test]
    fn id_is_preserved_for_every_type() {
        for t in [
            "text",
            "form_field",
            "date",
            "time",
            "picker",
            "checkbox",
            "toggle",
            "filepicker",
            "slider",
            "bogus",
        ] {
            let id = format!("{t}-7");
            let c = build(&desc(&id, t, &[]));
            assert_eq!(c.id, id);
            assert_eq!(c.kind, FieldType::from_tag(t));
        }
    }

    #[test]
    fn unknown_type_falls_back_to_diagnostic_text() {
        let c = build(&desc("bogus-1", "bogus", &[]));
        match &c.spec {
            RenderSpec::Text(w) => {
                assert!(w.text.starts_with("something went wrong: 'bogus-1'"));
                assert!(w.text.contains("unknown field type 'bogus'"));
            }
            _ => panic!("expected text fallback"),
        }
    }

    #[test]
    fn text_reads_font_args() {
        let c = build(&desc(
            "text-1",
            "text",
            &[("text", "Hello"), ("fontType", ".title"), ("fontColor", "#00ff00")],
        ));
        match &c.spec {
            RenderSpec::Text(w) => {
                assert_eq!(w.text, "Hello");
                assert!(w.is_title());
                assert_eq!(w.font_color.as_deref(), Some("#00ff00"));
            }
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn models_start_with_documented_initial_values() {
        let now = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        match build_at(&desc("date-1", "date", &[]), now).spec {
            RenderSpec::DatePicker(w) => assert_eq!(*w.selection.get(), now),
            _ => panic!("expected date picker"),
        }
        match build(&desc("form_field-1", "form_field", &[("hint", "Name")])).spec {
            RenderSpec::FormField(w) => {
                assert_eq!(w.text.get(), "");
                assert_eq!(w.hint, "Name");
            }
            _ => panic!("expected form field"),
        }
        match build(&desc("toggle-1", "toggle", &[])).spec {
            RenderSpec::Toggle(w) => assert!(*w.is_on.get()),
            _ => panic!("expected toggle"),
        }
        match build(&desc("filepicker-1", "filepicker", &[("buttonText", "Upload")])).spec {
            RenderSpec::FilePicker(w) => {
                assert_eq!(*w.file.get(), FileSelection::default());
                assert_eq!(w.button_text, "Upload");
            }
            _ => panic!("expected file picker"),
        }
    }

    #[test]
    fn picker_defaults_to_first_option_or_empty() {
        let mut d = desc("picker-1", "picker", &[("label", "Pet")]);
        match build(&d).spec {
            RenderSpec::Picker(w) => {
                assert_eq!(w.selection.get(), "");
                assert!(w.options.is_empty());
            }
            _ => panic!("expected picker"),
        }
        d.options = Some(vec!["cat".into(), "dog".into()]);
        match build(&d).spec {
            RenderSpec::Picker(w) => assert_eq!(w.selection.get(), "cat"),
            _ => panic!("expected picker"),
        }
    }

    #[test]
    fn slider_parses_bounds_with_defaults() {
        match build(&desc("slider-1", "slider", &[("min", "x"), ("max", "50"), ("step", "2.5")])).spec {
            RenderSpec::Slider(w) => {
                assert_eq!(w.min, 0.0);
                assert_eq!(w.max, 50.0);
                assert_eq!(w.step, Some(2.5));
                assert_eq!(*w.value.get(), 0.0);
            }
            _ => panic!("expected slider"),
        }
        match build(&desc("slider-2", "slider", &[])).spec {
            RenderSpec::Slider(w) => {
                assert_eq!(w.max, 100.0);
                assert_eq!(w.step, None);
            }
            _ => panic!("expected slider"),
        }
    }
}
