//! Persisting mapped documents.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::WriteError;
use crate::models::TargetDocument;

/// Destination for mapped documents.
pub trait Exporter {
    /// Persist `document` under `filename`, returning where it went.
    fn export(&self, document: &TargetDocument, filename: &str) -> Result<PathBuf, WriteError>;
}

/// Writes compact JSON files into a directory.
#[derive(Debug, Clone)]
pub struct DirExporter {
    dir: PathBuf,
}

impl DirExporter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl Exporter for DirExporter {
    fn export(&self, document: &TargetDocument, filename: &str) -> Result<PathBuf, WriteError> {
        let path = self.dir.join(filename);

        let json = serde_json::to_vec(document).map_err(|source| WriteError::Serialize {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, &json).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "Wrote {} features ({} bytes) to {}",
            document.features.len(),
            json.len(),
            path.display()
        );
        Ok(path)
    }
}
