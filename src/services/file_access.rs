//! File selection with scoped access grants.
//!
//! Selecting files opens a grant; the grant is closed once the first file has
//! been read, whether or not the read succeeded. Dropping an unreleased grant
//! closes it as well.

use crate::error::ResourceAccessError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Hands out access grants and tracks how many are still open.
#[derive(Clone, Debug, Default)]
pub struct ScopedAccess {
    active: Arc<AtomicUsize>,
}

impl ScopedAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a grant covering `paths`.
    pub fn begin(&self, paths: Vec<PathBuf>) -> Selection {
        self.active.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(count = paths.len(), "file access granted");
        Selection {
            paths,
            grant: AccessGrant {
                active: self.active.clone(),
                released: false,
            },
        }
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct AccessGrant {
    active: Arc<AtomicUsize>,
    released: bool,
}

impl AccessGrant {
    pub fn release(mut self) {
        self.close();
    }

    fn close(&mut self) {
        if !self.released {
            self.released = true;
            self.active.fetch_sub(1, Ordering::SeqCst);
            tracing::debug!("file access released");
        }
    }
}

impl Drop for AccessGrant {
    fn drop(&mut self) {
        self.close();
    }
}

/// Files chosen in one pick, together with their access grant.
#[derive(Debug)]
pub struct Selection {
    pub paths: Vec<PathBuf>,
    grant: AccessGrant,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read the first selected file, then release the grant.
pub fn read_first(selection: Selection) -> Result<PickedFile, ResourceAccessError> {
    let Selection { paths, grant } = selection;
    let result = match paths.first() {
        None => Err(ResourceAccessError::NoSelection),
        Some(path) => std::fs::read(path)
            .map(|bytes| PickedFile {
                name: file_name(path),
                bytes,
            })
            .map_err(|source| ResourceAccessError::Read {
                path: path.clone(),
                source,
            }),
    };
    grant.release();
    match &result {
        Ok(file) => tracing::info!(name = %file.name, bytes = file.bytes.len(), "file selected"),
        Err(e) => tracing::warn!(error = %e, "file selection failed"),
    }
    result
}

/// Read on a background thread; the outcome is posted back tagged with the
/// picker's registry index.
pub fn spawn_read_first(
    selection: Selection,
    index: usize,
    key: String,
    tx: Sender<crate::ui::LoadMsg>,
) {
    thread::spawn(move || {
        let outcome = read_first(selection).map_err(|e| format!("{e}"));
        let _ = tx.send(crate::ui::LoadMsg {
            index,
            key,
            outcome,
        });
    });
}

/// Split a path prompt into paths; quoting follows shell rules.
pub fn parse_paths(input: &str) -> Vec<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    match shlex::split(trimmed) {
        Some(parts) => parts.into_iter().map(PathBuf::from).collect(),
        None => vec![PathBuf::from(trimmed)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_first_and_releases_grant() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::File::create(&a).unwrap().write_all(b"alpha").unwrap();
        std::fs::File::create(&b).unwrap().write_all(b"bravo").unwrap();
        let access = ScopedAccess::new();
        let sel = access.begin(vec![a, b]);
        assert_eq!(access.active(), 1);
        let picked = read_first(sel).unwrap();
        assert_eq!(picked.name, "a.txt");
        assert_eq!(picked.bytes, b"alpha");
        assert_eq!(access.active(), 0);
    }

    #[test]
    fn failed_read_still_releases_grant() {
        let dir = tempfile::tempdir().unwrap();
        let access = ScopedAccess::new();
        let sel = access.begin(vec![dir.path().join("missing.bin")]);
        let err = read_first(sel).unwrap_err();
        assert!(matches!(err, ResourceAccessError::Read { .. }));
        assert_eq!(access.active(), 0);
    }

    #[test]
    fn dropped_selection_releases_grant() {
        let access = ScopedAccess::new();
        let sel = access.begin(vec![]);
        assert_eq!(access.active(), 1);
        drop(sel);
        assert_eq!(access.active(), 0);
    }

    #[test]
    fn empty_selection_is_an_error() {
        let access = ScopedAccess::new();
        let err = read_first(access.begin(vec![])).unwrap_err();
        assert!(matches!(err, ResourceAccessError::NoSelection));
    }

    #[test]
    fn parse_paths_honours_quotes() {
        let paths = parse_paths(r#"/tmp/a.txt "/tmp/my file.pdf""#);
        assert_eq!(
            paths,
            vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("/tmp/my file.pdf")]
        );
        assert!(parse_paths("   ").is_empty());
    }
}
