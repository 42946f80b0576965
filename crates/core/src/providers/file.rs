use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use super::traits::DocumentSource;

/// Reads documents from the local filesystem.
///
/// Relative locations resolve against `base_dir` when one is set, otherwise
/// against the process working directory.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    base_dir: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DocumentSource for FileSource {
    fn name(&self) -> &str {
        "File"
    }

    async fn fetch(&self, location: &str) -> Result<String, CoreError> {
        let path = self.resolve(location);
        std::fs::read_to_string(&path)
            .map_err(|e| CoreError::FileIO(format!("{}: {e}", path.display())))
    }
}
