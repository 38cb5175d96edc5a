//! Article files on disk

use crate::article::ArticleRecord;
use crate::output::traits::{ArticleStore, OutputError, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Removes the assets directory if present and recreates it empty
pub fn prepare_environment(path: &Path) -> OutputResult<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }
    fs::create_dir_all(path)?;
    tracing::debug!(path = %path.display(), "Prepared assets directory");
    Ok(())
}

/// [`ArticleStore`] writing one pair of files per article into a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Uses an existing directory as-is
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Clears and recreates `root`, then uses it
    pub fn prepare(root: impl AsRef<Path>) -> OutputResult<Self> {
        prepare_environment(root.as_ref())?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_path(&self, id: usize) -> PathBuf {
        self.root.join(format!("{}_raw.txt", id))
    }

    pub fn meta_path(&self, id: usize) -> PathBuf {
        self.root.join(format!("{}_meta.json", id))
    }

    fn write(&self, path: PathBuf, content: &[u8]) -> OutputResult<()> {
        fs::write(&path, content).map_err(|source| OutputError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

impl ArticleStore for FileStore {
    fn write_raw(&self, article: &ArticleRecord) -> OutputResult<()> {
        self.write(self.raw_path(article.id), article.body.as_bytes())
    }

    fn write_meta(&self, article: &ArticleRecord) -> OutputResult<()> {
        let json = serde_json::to_vec_pretty(article).map_err(|e| OutputError::Serialize {
            id: article.id,
            message: e.to_string(),
        })?;
        self.write(self.meta_path(article.id), &json)
    }
}
