use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedDocument {
    pub id: String,
    pub file_path: PathBuf,
}

/// Raw extractive-QA output, before any confidence gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelAnswer {
    pub answer: String,
    pub score: f64,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaResult {
    pub answer: Option<String>,
    pub confidence: f64,
}

impl QaResult {
    pub fn none() -> Self {
        Self {
            answer: None,
            confidence: 0.0,
        }
    }
}
