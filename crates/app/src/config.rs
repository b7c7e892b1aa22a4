use clap::Parser;
use crate::routes::DEFAULT_MAX_UPLOAD_BYTES;
use pdf_qa_core::{QaError, QaModelConfig, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_QA_MODEL};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pdf-qa-server", version, about = "Upload PDFs and ask questions about them.")]
pub struct ServerConfig {
    /// Address the HTTP API listens on
    #[arg(long, env = "PDF_QA_BIND", default_value = "0.0.0.0:8000")]
    pub bind: String,

    /// Directory uploaded PDFs are written to
    #[arg(long, env = "PDF_QA_UPLOAD_DIR", default_value = "./temp_pdfs")]
    pub upload_dir: PathBuf,

    /// Extractive QA model id
    #[arg(long, env = "QA_MODEL", default_value = DEFAULT_QA_MODEL)]
    pub qa_model: String,

    /// Inference endpoint; defaults to the hosted endpoint for --qa-model
    #[arg(long, env = "QA_ENDPOINT")]
    pub qa_endpoint: Option<String>,

    /// Bearer token for the inference endpoint
    #[arg(long, env = "QA_API_KEY", hide_env_values = true)]
    pub qa_api_key: Option<String>,

    /// Answers are returned only when the model score is strictly above this
    #[arg(long, env = "QA_CONFIDENCE_THRESHOLD", default_value_t = DEFAULT_CONFIDENCE_THRESHOLD)]
    pub confidence_threshold: f64,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "PDF_QA_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn model_config(&self) -> Result<QaModelConfig, QaError> {
        let mut config = QaModelConfig::hosted(self.qa_model.clone())?;
        let endpoint = self
            .qa_endpoint
            .as_deref()
            .filter(|value| !value.trim().is_empty());
        if let Some(endpoint) = endpoint {
            config = config.with_endpoint(endpoint)?;
        }
        Ok(config.with_api_key(self.qa_api_key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_deployment() {
        let config = ServerConfig::parse_from(["pdf-qa-server"]);
        assert_eq!(config.upload_dir, PathBuf::from("./temp_pdfs"));
        assert_eq!(config.qa_model, "deepset/roberta-base-squad2");
        assert_eq!(config.confidence_threshold, 0.5);
        assert_eq!(config.max_upload_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn explicit_endpoint_overrides_hosted_one() -> Result<(), QaError> {
        let config = ServerConfig::parse_from([
            "pdf-qa-server",
            "--qa-endpoint",
            "http://localhost:8080/qa",
            "--qa-api-key",
            "secret",
        ]);
        let model = config.model_config()?;
        assert_eq!(model.endpoint.as_str(), "http://localhost:8080/qa");
        assert_eq!(model.api_key.as_deref(), Some("secret"));
        Ok(())
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let config = ServerConfig::parse_from(["pdf-qa-server", "--qa-endpoint", "not a url"]);
        assert!(config.model_config().is_err());
    }
}
