use serde::{Deserialize, Serialize};

use super::chunk::Chunk;

/// Processing state of an uploaded document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Processing,
    Ready,
    Failed,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Processing => write!(f, "processing"),
            DocumentStatus::Ready => write!(f, "ready"),
            DocumentStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub id: String,
    pub title: String,
    pub checksum: String,
    pub status: DocumentStatus,
    pub total_words: usize,
    pub chunks: Vec<Chunk>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    pub processed_at: String,
}

impl ProcessedDocument {
    pub fn generate_id(location: &str) -> String {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(location.as_bytes());
        hex::encode(&hash[..16])
    }

    /// A document that has been accepted but not yet chunked.
    pub fn pending(id: String, title: String, checksum: String) -> Self {
        Self {
            id,
            title,
            checksum,
            status: DocumentStatus::Processing,
            total_words: 0,
            chunks: Vec::new(),
            error: None,
            processed_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn mark_ready(mut self, total_words: usize, chunks: Vec<Chunk>) -> Self {
        self.status = DocumentStatus::Ready;
        self.total_words = total_words;
        self.chunks = chunks;
        self.error = None;
        self.processed_at = chrono::Utc::now().to_rfc3339();
        self
    }

    pub fn mark_failed(mut self, error: impl Into<String>) -> Self {
        self.status = DocumentStatus::Failed;
        self.chunks.clear();
        self.error = Some(error.into());
        self.processed_at = chrono::Utc::now().to_rfc3339();
        self
    }

    pub fn is_ready(&self) -> bool {
        self.status == DocumentStatus::Ready
    }
}
