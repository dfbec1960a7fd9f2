//! Gathers current field values into a flat result list.
//!
//! The kind used for extraction comes from the id prefix (`<type>-<suffix>`).
//! Only form fields, dates, times, pickers and checkboxes contribute; toggles,
//! file pickers and sliders carry values but have no extraction rule.

use crate::error::FieldIssue;
use crate::form_core::registry::{Component, ComponentRegistry, RenderSpec};
use crate::model::FieldType;
use crate::widgets::date_picker::{format_selection, PickMode};

pub fn collect(registry: &ComponentRegistry) -> Vec<String> {
    registry.iter().filter_map(extract).collect()
}

/// Current value of one component, if it has an extraction rule.
pub fn extract(c: &Component) -> Option<String> {
    let Some(kind) = FieldType::from_id_prefix(&c.id) else {
        skip(c);
        return None;
    };
    match (kind, &c.spec) {
        (FieldType::FormField, RenderSpec::FormField(w)) => Some(w.text.get().clone()),
        (FieldType::Date, RenderSpec::DatePicker(w)) => {
            Some(format_selection(PickMode::Date, w.selection.get()))
        }
        (FieldType::Time, RenderSpec::TimePicker(w)) => {
            Some(format_selection(PickMode::Time, w.selection.get()))
        }
        (FieldType::Picker, RenderSpec::Picker(w)) => Some(w.selection.get().clone()),
        (FieldType::Checkbox, RenderSpec::Checkbox(w)) => Some(w.is_on.get().to_string()),
        (FieldType::Text | FieldType::Toggle | FieldType::FilePicker | FieldType::Slider, _) => {
            None
        }
        _ => {
            skip(c);
            None
        }
    }
}

fn skip(c: &Component) {
    let issue = FieldIssue::ExtractionMismatch { id: c.id.clone() };
    tracing::debug!(%issue, "value not collected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_core::factory::build;
    use crate::model::FieldDescriptor;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn desc(id: &str, t: &str, args: &[(&str, &str)], options: Option<&[&str]>) -> FieldDescriptor {
        FieldDescriptor {
            id: id.into(),
            field_type: FieldType::from_tag(t),
            args: args
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            options: options.map(|o| o.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn scenario_name_and_agreement() {
        let mut reg = ComponentRegistry::from_descriptors(&[
            desc("form_field-1", "form_field", &[("hint", "Name")], None),
            desc("checkbox-1", "checkbox", &[("label", "Agree")], None),
        ]);
        if let Some(RenderSpec::FormField(w)) = reg.get_mut("form_field-1").map(|c| &mut c.spec) {
            w.text.set("Alice".into());
        }
        if let Some(RenderSpec::Checkbox(w)) = reg.get_mut("checkbox-1").map(|c| &mut c.spec) {
            w.is_on.set(true);
        }
        assert_eq!(collect(&reg), vec!["Alice", "true"]);
    }

    #[test]
    fn checkbox_false_is_collected() {
        let mut reg = ComponentRegistry::from_descriptors(&[desc("checkbox-1", "checkbox", &[], None)]);
        if let Some(RenderSpec::Checkbox(w)) = reg.get_mut("checkbox-1").map(|c| &mut c.spec) {
            w.is_on.set(false);
        }
        assert_eq!(collect(&reg), vec!["false"]);
    }

    #[test]
    fn date_and_time_are_formatted() {
        let mut reg = ComponentRegistry::from_descriptors(&[
            desc("date-1", "date", &[], None),
            desc("time-1", "time", &[], None),
        ]);
        let when = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        for c in reg.iter_mut() {
            match &mut c.spec {
                RenderSpec::DatePicker(w) | RenderSpec::TimePicker(w) => w.selection.set(when),
                _ => {}
            }
        }
        assert_eq!(collect(&reg), vec!["2023-06-15", "14:05"]);
    }

    #[test]
    fn picker_selection_is_verbatim() {
        let mut reg = ComponentRegistry::from_descriptors(&[desc(
            "picker-1",
            "picker",
            &[],
            Some(&["cat", "dog"]),
        )]);
        if let Some(RenderSpec::Picker(w)) = reg.get_mut("picker-1").map(|c| &mut c.spec) {
            assert!(w.select("dog"));
        }
        assert_eq!(collect(&reg), vec!["dog"]);
    }

    #[test]
    fn uncollected_kinds_contribute_nothing() {
        let reg = ComponentRegistry::from_descriptors(&[
            desc("text-1", "text", &[("text", "Hi")], None),
            desc("toggle-1", "toggle", &[], None),
            desc("filepicker-1", "filepicker", &[], None),
            desc("slider-1", "slider", &[], None),
            desc("bogus-1", "bogus", &[], None),
        ]);
        assert_eq!(reg.len(), 5);
        assert!(collect(&reg).is_empty());
    }

    #[test]
    fn prefix_type_disagreement_is_skipped() {
        let reg = ComponentRegistry::from_descriptors(&[
            desc("checkbox-9", "form_field", &[], None),
            desc("nodash", "checkbox", &[], None),
            desc("form_field-2", "form_field", &[], None),
        ]);
        assert_eq!(collect(&reg), vec![""]);
    }

    #[test]
    fn collect_is_repeatable() {
        let reg = ComponentRegistry::from_descriptors(&[
            desc("form_field-1", "form_field", &[], None),
            desc("checkbox-1", "checkbox", &[], None),
        ]);
        assert_eq!(collect(&reg), collect(&reg));
    }

    #[test]
    fn single_component_extract() {
        let c = build(&desc("checkbox-3", "checkbox", &[], None));
        assert_eq!(extract(&c).as_deref(), Some("true"));
    }
}
