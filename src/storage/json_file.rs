use crate::state::CrawlState;
use crate::storage::StateStorage;
use crate::{StateError, StateResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Crawl state kept as a JSON document on disk
///
/// Saves go to a sibling `.tmp` file that is then renamed over the real one,
/// so the file on disk is always a complete document.
#[derive(Debug, Clone)]
pub struct JsonStateFile {
    path: PathBuf,
}

impl JsonStateFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persistence_error(&self, message: impl ToString) -> StateError {
        StateError::Persistence {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl StateStorage for JsonStateFile {
    fn load(&self) -> Option<CrawlState> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No crawl state file found");
            return None;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable crawl state, starting over");
                return None;
            }
        };

        match serde_json::from_str::<CrawlState>(&content) {
            Ok(state) => {
                tracing::info!(
                    path = %self.path.display(),
                    cursor = state.cursor,
                    discovered = state.discovered_urls.len(),
                    visited = state.visited_urls.len(),
                    "Loaded crawl state"
                );
                Some(state)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Corrupt crawl state, starting over");
                None
            }
        }
    }

    fn save(&self, state: &CrawlState) -> StateResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.persistence_error(e))?;
            }
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        state
            .serialize(&mut serializer)
            .map_err(|e| self.persistence_error(e))?;

        let temp = self.temp_path();
        fs::write(&temp, &buf).map_err(|e| self.persistence_error(e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.persistence_error(e))?;

        tracing::trace!(path = %self.path.display(), cursor = state.cursor, "Saved crawl state");
        Ok(())
    }

    fn clear(&self) -> StateResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.persistence_error(e)),
        }
    }
}
