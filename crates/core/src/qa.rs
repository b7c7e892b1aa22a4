use crate::error::QaError;
use crate::models::{ModelAnswer, QaResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_QA_MODEL: &str = "deepset/roberta-base-squad2";
const HF_INFERENCE_BASE: &str = "https://api-inference.huggingface.co/models/";

/// An extractive QA model: picks an answer span out of `context`.
///
/// `Ok(None)` means the model replied without a usable answer/score pair.
#[async_trait]
pub trait QuestionAnsweringModel {
    async fn answer(&self, question: &str, context: &str) -> Result<Option<ModelAnswer>, QaError>;
}

#[derive(Debug, Clone)]
pub struct QaModelConfig {
    pub endpoint: Url,
    pub model: String,
    pub api_key: Option<String>,
}

impl QaModelConfig {
    /// Hosted inference endpoint for a model id, e.g. `deepset/roberta-base-squad2`.
    pub fn hosted(model: impl Into<String>) -> Result<Self, QaError> {
        let model = model.into();
        let endpoint = Url::parse(HF_INFERENCE_BASE)?.join(&model)?;
        Ok(Self {
            endpoint,
            model,
            api_key: None,
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, QaError> {
        self.endpoint = Url::parse(endpoint.trim())?;
        Ok(self)
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.and_then(|value| {
            let key = value.trim().to_string();
            if key.is_empty() {
                None
            } else {
                Some(key)
            }
        });
        self
    }
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

/// Client for a question-answering inference endpoint. Built once and shared.
pub struct HttpQaModel {
    config: QaModelConfig,
    client: Client,
}

impl HttpQaModel {
    pub fn new(config: QaModelConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl QuestionAnsweringModel for HttpQaModel {
    async fn answer(
        &self,
        question: &str,
        context: &str,
    ) -> Result<Option<ModelAnswer>, QaError> {
        let payload = QaRequest {
            inputs: QaInputs { question, context },
        };

        let mut request = self
            .client
            .post(self.config.endpoint.clone())
            .json(&payload);

        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(QaError::BackendResponse {
                status: status.as_u16(),
                details,
            });
        }

        let body = response.bytes().await?;
        let parsed: Value = serde_json::from_slice(&body)?;
        Ok(parse_model_response(&parsed))
    }
}

/// Accepts either a single `{answer, score, start, end}` object or a ranked list of them.
pub(crate) fn parse_model_response(value: &Value) -> Option<ModelAnswer> {
    let best = match value {
        Value::Array(items) => items.first()?,
        other => other,
    };

    let score = best.get("score").and_then(Value::as_f64)?;
    let answer = best.get("answer").and_then(Value::as_str)?.to_string();
    let offset = |key: &str| {
        best.get(key)
            .and_then(Value::as_u64)
            .map(|position| position as usize)
    };

    Some(ModelAnswer {
        answer,
        score,
        start: offset("start"),
        end: offset("end"),
    })
}

/// Runs the model over a document's text and gates the answer on confidence.
pub struct AnswerService {
    model: Arc<dyn QuestionAnsweringModel + Send + Sync>,
    threshold: f64,
}

impl AnswerService {
    pub fn new(model: Arc<dyn QuestionAnsweringModel + Send + Sync>) -> Self {
        Self {
            model,
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub async fn answer(&self, context: &str, question: &str) -> Result<QaResult, QaError> {
        if context.trim().is_empty() {
            info!("no text extracted from the pdf; skipping model call");
            return Ok(QaResult::none());
        }

        let response = self.model.answer(question, context).await?;
        debug!(?response, "model response");

        match response {
            Some(found) if found.score > self.threshold && !found.answer.is_empty() => {
                Ok(QaResult {
                    answer: Some(found.answer),
                    confidence: found.score,
                })
            }
            _ => Ok(QaResult::none()),
        }
    }
}
