use crate::error::{bad_request, unprocessable, AppError};
use axum::{
    extract::{rejection::FormRejection, DefaultBodyLimit, Form, Multipart, State},
    response::Json,
    routing::{get, post},
    Router,
};
use pdf_qa_core::{
    extract_text_blocking, preprocess_text, AnswerService, DocumentRegistry, SharedExtractor,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

pub const NO_ANSWER: &str = "I don't know the answer.";
pub const HEALTH_STATUS: &str = "Chatbot API is running";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DocumentRegistry>,
    pub answers: Arc<AnswerService>,
    pub extractor: SharedExtractor,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(answers: AnswerService, extractor: SharedExtractor, upload_dir: PathBuf) -> Self {
        Self {
            registry: Arc::new(DocumentRegistry::new()),
            answers: Arc::new(answers),
            extractor,
            upload_dir,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    pub file_id: String,
    pub question: String,
}

/// `confidence` is present only when an answer cleared the threshold.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/upload_pdf/", post(upload_pdf))
        .route("/ask_question/", post(ask_question))
        .route("/health_check/", get(health_check))
        .layer(body_limit)
        .with_state(state)
}

/// Uploads keep their client-supplied name, so equal names share one file on disk.
fn upload_location(upload_dir: &Path, filename: &str) -> PathBuf {
    PathBuf::from(format!("{}/{}", upload_dir.display(), filename))
}

async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError(error.status(), error.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| bad_request("uploaded file has no filename"))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|error| AppError(error.status(), error.body_text()))?;

        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| unprocessable("missing multipart field: file"))?;

    tokio::fs::create_dir_all(&state.upload_dir).await?;
    let location = upload_location(&state.upload_dir, &filename);
    tokio::fs::write(&location, &bytes).await?;

    let text = extract_text_blocking(state.extractor.clone(), location.clone()).await?;
    let sentence_count = preprocess_text(&text)?.len();

    let document = state.registry.register(&location).await;
    info!(
        file_id = %document.id,
        path = %document.file_path.display(),
        bytes = bytes.len(),
        sentences = sentence_count,
        "pdf uploaded"
    );

    Ok(Json(UploadResponse {
        message: format!(
            "Document '{filename}' processed successfully. {sentence_count} sentences extracted."
        ),
        file_id: document.id,
    }))
}

async fn ask_question(
    State(state): State<AppState>,
    form: Result<Form<AskForm>, FormRejection>,
) -> Result<Json<AskResponse>, AppError> {
    let Form(form) = form.map_err(|rejection| AppError(rejection.status(), rejection.body_text()))?;

    let path = match state.registry.resolve(&form.file_id).await {
        Ok(path) => path,
        Err(error) => {
            warn!(file_id = %form.file_id, "question for unknown document");
            return Err(error.into());
        }
    };

    let context = match extract_text_blocking(state.extractor.clone(), path.clone()).await {
        Ok(text) => text,
        Err(error) => {
            warn!(
                path = %path.display(),
                %error,
                "text extraction failed; answering without context"
            );
            String::new()
        }
    };

    let result = state.answers.answer(&context, &form.question).await?;
    info!(
        file_id = %form.file_id,
        answered = result.answer.is_some(),
        confidence = result.confidence,
        "question handled"
    );

    let response = match result.answer {
        Some(answer) => AskResponse {
            question: form.question,
            answer,
            confidence: Some(result.confidence),
        },
        None => AskResponse {
            question: form.question,
            answer: NO_ANSWER.to_string(),
            confidence: None,
        },
    };

    Ok(Json(response))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS,
    })
}
