use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ThemePreference;

/// On-disk form: `{"theme":"dark"}`.
#[derive(Debug, Serialize, Deserialize)]
struct ThemeDocument {
    theme: ThemePreference,
}

/// Errors reading or writing the theme file.
#[derive(Debug)]
pub enum ThemeFileError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ThemeFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeFileError::Io { path, source } => {
                write!(f, "theme file {}: {source}", path.display())
            }
            ThemeFileError::Json { path, source } => {
                write!(f, "theme file {} is not valid: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ThemeFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThemeFileError::Io { source, .. } => Some(source),
            ThemeFileError::Json { source, .. } => Some(source),
        }
    }
}

/// JSON file holding the persisted theme preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFile {
    path: PathBuf,
}

impl ThemeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored preference; `Ok(None)` when the file does not exist.
    pub fn load(&self) -> Result<Option<ThemePreference>, ThemeFileError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ThemeFileError::Io { path: self.path.clone(), source }),
        };
        let doc: ThemeDocument = serde_json::from_str(&text)
            .map_err(|source| ThemeFileError::Json { path: self.path.clone(), source })?;
        Ok(Some(doc.theme))
    }

    /// Like [`load`](Self::load), logging failures and falling back to `fallback`.
    pub fn load_or(&self, fallback: ThemePreference) -> ThemePreference {
        match self.load() {
            Ok(Some(pref)) => pref,
            Ok(None) => fallback,
            Err(e) => {
                log::warn!("{e}; using `{fallback}`");
                fallback
            }
        }
    }

    /// Writes `pref`, creating parent directories as needed.
    pub fn save(&self, pref: ThemePreference) -> Result<(), ThemeFileError> {
        let io_err = |source| ThemeFileError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string(&ThemeDocument { theme: pref })
            .map_err(|source| ThemeFileError::Json { path: self.path.clone(), source })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{SharedThemeStore, ThemeStore};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_path(name: &str) -> PathBuf {
        static N: AtomicU32 = AtomicU32::new(0);
        let n = N.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("folio-theme-{}-{n}", std::process::id()))
            .join(name)
    }

    #[test]
    fn save_then_load_round_trips() {
        let file = ThemeFile::new(scratch_path("theme.json"));
        file.save(ThemePreference::Light).unwrap();
        assert_eq!(file.load().unwrap(), Some(ThemePreference::Light));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), r#"{"theme":"light"}"#);
    }

    #[test]
    fn missing_file_loads_none() {
        let file = ThemeFile::new(scratch_path("absent.json"));
        assert_eq!(file.load().unwrap(), None);
        assert_eq!(file.load_or(ThemePreference::Dark), ThemePreference::Dark);
    }

    #[test]
    fn malformed_file_falls_back() {
        let path = scratch_path("bad.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{\"theme\":\"purple\"}").unwrap();

        let file = ThemeFile::new(path);
        assert!(matches!(file.load(), Err(ThemeFileError::Json { .. })));
        assert_eq!(file.load_or(ThemePreference::System), ThemePreference::System);
    }

    #[test]
    fn file_backed_store_persists_each_set() {
        let file = ThemeFile::new(scratch_path("store.json"));
        let store = SharedThemeStore::with_file(file.clone(), ThemePreference::System);
        assert_eq!(store.get(), ThemePreference::System);

        store.set(ThemePreference::Dark);
        let reopened = SharedThemeStore::with_file(file, ThemePreference::System);
        assert_eq!(reopened.get(), ThemePreference::Dark);
    }
}
