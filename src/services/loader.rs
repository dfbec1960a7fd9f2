use crate::error::SchemaError;
use crate::model::{AppConfig, FieldDescriptor};
use crate::services::cli_runner::run_cmdline_to_string;
use std::fmt;
use std::path::{Path, PathBuf};

/// Layout compiled into the binary; used when no other source is configured.
pub const BUNDLED_LAYOUT: &str = include_str!("../../assets/layout_file.json");

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaSource {
    Bundled,
    File(PathBuf),
    Command(String),
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::Bundled => f.write_str("bundled"),
            SchemaSource::File(p) => write!(f, "file:{}", p.display()),
            SchemaSource::Command(c) => write!(f, "cmd:{c}"),
        }
    }
}

/// Pick the layout source from config; relative paths resolve against `base_dir`.
pub fn resolve_source(cfg: &AppConfig, base_dir: Option<&Path>) -> SchemaSource {
    if let Some(cmd) = &cfg.schema_cmd {
        return SchemaSource::Command(cmd.clone());
    }
    if let Some(path) = &cfg.schema_path {
        let pb = PathBuf::from(path);
        let full = if pb.is_absolute() {
            pb
        } else if let Some(dir) = base_dir {
            dir.join(path)
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(path)
        };
        return SchemaSource::File(full);
    }
    SchemaSource::Bundled
}

/// Strict decode: one malformed entry fails the whole list.
pub fn decode_descriptors(text: &str) -> Result<Vec<FieldDescriptor>, SchemaError> {
    Ok(serde_json::from_str::<Vec<FieldDescriptor>>(text)?)
}

pub fn read_descriptors(source: &SchemaSource) -> Result<Vec<FieldDescriptor>, SchemaError> {
    let text = match source {
        SchemaSource::Bundled => BUNDLED_LAYOUT.to_string(),
        SchemaSource::File(path) => {
            std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
                path: path.clone(),
                source,
            })?
        }
        SchemaSource::Command(cmdline) => {
            run_cmdline_to_string(cmdline).map_err(|e| SchemaError::Command(format!("{e:#}")))?
        }
    };
    decode_descriptors(&text)
}

#[cfg(test)]
mod loader_tests;
