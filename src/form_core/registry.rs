use crate::app::Effect;
use crate::form_core::factory;
use crate::model::{FieldDescriptor, FieldType};
use crate::services::loader::{read_descriptors, SchemaSource};
use crate::theme::Theme;
use crate::widgets::date_picker::DateTimeWidget;
use crate::widgets::file_picker::FilePickerWidget;
use crate::widgets::form_field::FormFieldWidget;
use crate::widgets::picker::PickerWidget;
use crate::widgets::slider::SliderWidget;
use crate::widgets::text::TextWidget;
use crate::widgets::toggle::ToggleWidget;
use crate::widgets::Widget;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use std::collections::HashSet;
use std::sync::mpsc::Sender;

/// Sent whenever a component's value changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChanged {
    pub id: String,
}

/// Render variant of a component, each carrying its widget and model.
pub enum RenderSpec {
    Text(TextWidget),
    FormField(FormFieldWidget),
    DatePicker(DateTimeWidget),
    TimePicker(DateTimeWidget),
    Picker(PickerWidget),
    Checkbox(ToggleWidget),
    Toggle(ToggleWidget),
    FilePicker(FilePickerWidget),
    Slider(SliderWidget),
}

impl RenderSpec {
    pub fn widget(&self) -> &dyn Widget {
        match self {
            RenderSpec::Text(w) => w,
            RenderSpec::FormField(w) => w,
            RenderSpec::DatePicker(w) | RenderSpec::TimePicker(w) => w,
            RenderSpec::Picker(w) => w,
            RenderSpec::Checkbox(w) | RenderSpec::Toggle(w) => w,
            RenderSpec::FilePicker(w) => w,
            RenderSpec::Slider(w) => w,
        }
    }

    pub fn widget_mut(&mut self) -> &mut dyn Widget {
        match self {
            RenderSpec::Text(w) => w,
            RenderSpec::FormField(w) => w,
            RenderSpec::DatePicker(w) | RenderSpec::TimePicker(w) => w,
            RenderSpec::Picker(w) => w,
            RenderSpec::Checkbox(w) | RenderSpec::Toggle(w) => w,
            RenderSpec::FilePicker(w) => w,
            RenderSpec::Slider(w) => w,
        }
    }
}

pub struct Component {
    pub id: String,
    pub kind: FieldType,
    pub spec: RenderSpec,
}

impl Component {
    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        self.spec.widget_mut().render(f, area, focused, theme);
    }

    /// Rows needed when drawn `width` columns wide.
    pub fn height(&self, width: u16) -> u16 {
        self.spec.widget().height(width)
    }

    pub fn focusable(&self) -> bool {
        self.spec.widget().focusable()
    }

    pub fn is_editing(&self) -> bool {
        self.spec.widget().is_editing()
    }

    pub fn captures_vertical(&self) -> bool {
        self.spec.widget().captures_vertical()
    }

    pub fn on_key(&mut self, key: KeyCode) -> Vec<Effect> {
        self.spec.widget_mut().on_key(key)
    }

    /// Report every change of this component's value on `tx`.
    pub fn watch(&mut self, tx: Sender<FieldChanged>) {
        let id = self.id.clone();
        let ping = move || {
            let _ = tx.send(FieldChanged { id: id.clone() });
        };
        match &mut self.spec {
            RenderSpec::Text(_) => {}
            RenderSpec::FormField(w) => w.text.subscribe(move |_| ping()),
            RenderSpec::DatePicker(w) | RenderSpec::TimePicker(w) => {
                w.selection.subscribe(move |_| ping())
            }
            RenderSpec::Picker(w) => w.selection.subscribe(move |_| ping()),
            RenderSpec::Checkbox(w) | RenderSpec::Toggle(w) => w.is_on.subscribe(move |_| ping()),
            RenderSpec::FilePicker(w) => w.file.subscribe(move |_| ping()),
            RenderSpec::Slider(w) => w.value.subscribe(move |_| ping()),
        }
    }
}

/// Ordered, append-only list of the page's components.
#[derive(Default)]
pub struct ComponentRegistry {
    components: Vec<Component>,
    ids: HashSet<String>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptors(descriptors: &[FieldDescriptor]) -> Self {
        let mut reg = Self::new();
        reg.extend(descriptors.iter().map(factory::build).collect());
        reg
    }

    /// Read the whole layout from `source` and append one component per entry.
    /// A failed read leaves the registry untouched. Returns the number appended.
    pub fn load(&mut self, source: &SchemaSource) -> usize {
        let descriptors = match read_descriptors(source) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, source = %source, "layout not loaded");
                return 0;
            }
        };
        let built: Vec<Component> = descriptors.iter().map(factory::build).collect();
        let n = built.len();
        self.extend(built);
        tracing::info!(components = n, source = %source, "layout loaded");
        n
    }

    fn extend(&mut self, built: Vec<Component>) {
        for c in built {
            self.push(c);
        }
    }

    pub fn push(&mut self, mut component: Component) {
        if !self.ids.insert(component.id.clone()) {
            tracing::warn!(id = %component.id, "duplicate component id");
        }
        if let RenderSpec::FilePicker(w) = &mut component.spec {
            w.bind_slot(self.components.len());
        }
        self.components.push(component);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.components.iter_mut()
    }

    // First match by id; page code addresses components by index
    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    #[cfg(test)]
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut Component> {
        self.components.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::mpsc;

    fn desc(id: &str, t: &str) -> FieldDescriptor {
        FieldDescriptor {
            id: id.into(),
            field_type: FieldType::from_tag(t),
            args: HashMap::new(),
            options: None,
        }
    }

    #[test]
    fn preserves_order_and_count() {
        let reg = ComponentRegistry::from_descriptors(&[
            desc("text-1", "text"),
            desc("slider-1", "slider"),
            desc("bogus-1", "bogus"),
        ]);
        let ids: Vec<&str> = reg.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["text-1", "slider-1", "bogus-1"]);
        assert!(reg.get("slider-1").is_some());
        assert!(reg.get("slider-2").is_none());
    }

    #[test]
    fn failed_load_keeps_registry_empty() {
        let mut reg = ComponentRegistry::new();
        let n = reg.load(&SchemaSource::File("/definitely/not/here.json".into()));
        assert_eq!(n, 0);
        assert!(reg.is_empty());
    }

    fn layout_file(dir: &tempfile::TempDir, body: &str) -> SchemaSource {
        let path = dir.path().join("layout.json");
        std::fs::write(&path, body).unwrap();
        SchemaSource::File(path)
    }

    #[test]
    fn load_appends_one_component_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let source = layout_file(
            &dir,
            r#"[
                {"uuid":"text-1","type":"text","args":{"text":"Welcome"}},
                {"uuid":"form_field-1","type":"form_field","args":{"hint":"Name"}},
                {"uuid":"checkbox-1","type":"checkbox","args":{"label":"Agree"}}
            ]"#,
        );
        let mut reg = ComponentRegistry::new();
        assert_eq!(reg.load(&source), 3);
        assert_eq!(reg.len(), 3);
        let ids: Vec<&str> = reg.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["text-1", "form_field-1", "checkbox-1"]);
    }

    #[test]
    fn load_with_undecodable_entry_builds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = layout_file(
            &dir,
            r#"[
                {"uuid":"text-1","type":"text","args":{"text":"ok"}},
                {"uuid":"slider-1","type":"slider","args":{"min":0}}
            ]"#,
        );
        let mut reg = ComponentRegistry::new();
        assert_eq!(reg.load(&source), 0);
        assert!(reg.is_empty());
    }

    #[test]
    fn watch_reports_value_changes() {
        let mut reg = ComponentRegistry::from_descriptors(&[desc("checkbox-1", "checkbox")]);
        let (tx, rx) = mpsc::channel();
        for c in reg.iter_mut() {
            c.watch(tx.clone());
        }
        let c = reg.get_mut("checkbox-1").unwrap();
        c.on_key(KeyCode::Char(' '));
        assert_eq!(
            rx.try_recv().unwrap(),
            FieldChanged {
                id: "checkbox-1".into()
            }
        );
    }
}
