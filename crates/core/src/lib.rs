pub mod error;
pub mod extractor;
pub mod models;
pub mod qa;
pub mod registry;
pub mod text;

pub use error::{ExtractError, QaError, RegistryError};
pub use extractor::{
    extract_text, extract_text_blocking, LopdfExtractor, PageText, PdfExtractor, SharedExtractor,
};
pub use models::{ModelAnswer, QaResult, UploadedDocument};
pub use qa::{
    AnswerService, HttpQaModel, QaModelConfig, QuestionAnsweringModel,
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_QA_MODEL,
};
pub use registry::DocumentRegistry;
pub use text::{preprocess_text, tokenize, Tokenizer};
