use crate::error::RegistryError;
use crate::models::UploadedDocument;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Maps opaque document ids to the uploaded file on disk.
///
/// Entries live until the process exits; there is no eviction.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: RwLock<HashMap<String, PathBuf>>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, path: impl AsRef<Path>) -> UploadedDocument {
        let document = UploadedDocument {
            id: Uuid::new_v4().to_string(),
            file_path: path.as_ref().to_path_buf(),
        };

        self.documents
            .write()
            .await
            .insert(document.id.clone(), document.file_path.clone());

        document
    }

    pub async fn resolve(&self, id: &str) -> Result<PathBuf, RegistryError> {
        self.documents
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}
