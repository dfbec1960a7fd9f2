use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Closed set of field kinds a layout may describe.
///
/// Tags outside the recognized set are kept as `Unknown` so the factory can
/// still produce a (diagnostic) component for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum FieldType {
    Text,
    FormField,
    Date,
    Time,
    Picker,
    Checkbox,
    Toggle,
    FilePicker,
    Slider,
    Unknown(String),
}

impl FieldType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => FieldType::Text,
            "form_field" => FieldType::FormField,
            "date" => FieldType::Date,
            "time" => FieldType::Time,
            "picker" => FieldType::Picker,
            "checkbox" => FieldType::Checkbox,
            "toggle" => FieldType::Toggle,
            "filepicker" => FieldType::FilePicker,
            "slider" => FieldType::Slider,
            other => FieldType::Unknown(other.to_string()),
        }
    }

    /// Kind encoded in an id of the form `<type>-<suffix>`.
    /// Ids without a `-` carry no kind.
    pub fn from_id_prefix(id: &str) -> Option<Self> {
        let (prefix, _) = id.split_once('-')?;
        match Self::from_tag(prefix) {
            FieldType::Unknown(_) => None,
            kind => Some(kind),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::FormField => "form_field",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Picker => "picker",
            FieldType::Checkbox => "checkbox",
            FieldType::Toggle => "toggle",
            FieldType::FilePicker => "filepicker",
            FieldType::Slider => "slider",
            FieldType::Unknown(t) => t.as_str(),
        }
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        FieldType::from_tag(&s)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One entry of the layout schema.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    #[serde(rename = "uuid")]
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub args: HashMap<String, String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl FieldDescriptor {
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(|s| s.as_str())
    }

    /// Whether the id prefix agrees with the declared type.
    pub fn id_matches_type(&self) -> bool {
        FieldType::from_id_prefix(&self.id).as_ref() == Some(&self.field_type)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    // Layout file, relative to the config dir unless absolute
    #[serde(default)]
    pub schema_path: Option<String>,
    // Command printing the layout JSON on stdout
    #[serde(default)]
    pub schema_cmd: Option<String>,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub theme: ThemeChoice,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            schema_path: None,
            schema_cmd: None,
            log_file: None,
            theme: ThemeChoice::Dark,
        }
    }
}

fn default_title() -> String {
    "Dynamic Form".to_string()
}

pub(crate) fn validate_app_config(cfg: &AppConfig) -> Result<(), String> {
    if cfg.schema_path.is_some() && cfg.schema_cmd.is_some() {
        return Err("specify only one of 'schema_path' or 'schema_cmd'".to_string());
    }
    if let Some(cmd) = &cfg.schema_cmd {
        if cmd.trim().is_empty() {
            return Err("'schema_cmd' must not be empty".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_round_trips_known_tags() {
        for tag in [
            "text",
            "form_field",
            "date",
            "time",
            "picker",
            "checkbox",
            "toggle",
            "filepicker",
            "slider",
        ] {
            assert_eq!(FieldType::from_tag(tag).tag(), tag);
        }
        assert_eq!(
            FieldType::from_tag("bogus"),
            FieldType::Unknown("bogus".into())
        );
    }

    #[test]
    fn id_prefix_resolves_kind() {
        assert_eq!(
            FieldType::from_id_prefix("form_field-1"),
            Some(FieldType::FormField)
        );
        assert_eq!(
            FieldType::from_id_prefix("date-start-2"),
            Some(FieldType::Date)
        );
        assert_eq!(FieldType::from_id_prefix("bogus-1"), None);
        assert_eq!(FieldType::from_id_prefix("checkbox"), None);
    }

    #[test]
    fn descriptor_decodes_uuid_and_null_options() {
        let raw = r#"{"uuid":"picker-1","type":"picker","args":{"label":"Pet"},"options":null}"#;
        let d: FieldDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(d.id, "picker-1");
        assert_eq!(d.field_type, FieldType::Picker);
        assert_eq!(d.arg("label"), Some("Pet"));
        assert!(d.options.is_none());
        assert!(d.id_matches_type());
    }

    #[test]
    fn descriptor_requires_args() {
        let raw = r#"{"uuid":"text-1","type":"text"}"#;
        assert!(serde_json::from_str::<FieldDescriptor>(raw).is_err());
    }

    #[test]
    fn validate_rejects_two_schema_sources() {
        let cfg = AppConfig {
            schema_path: Some("layout.json".into()),
            schema_cmd: Some("echo []".into()),
            ..Default::default()
        };
        let err = validate_app_config(&cfg).unwrap_err();
        assert!(err.contains("only one"));
    }

    #[test]
    fn config_defaults_from_empty_yaml() {
        let cfg: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg.title, "Dynamic Form");
        assert_eq!(cfg.theme, ThemeChoice::Dark);
        assert!(validate_app_config(&cfg).is_ok());
    }
}
