use crate::error::ExtractError;
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

pub trait PdfExtractor {
    /// Returns every page in document order; pages without text carry an empty string.
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, ExtractError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, ExtractError> {
        let bytes = std::fs::read(path)?;
        let document =
            Document::load_mem(&bytes).map_err(|error| ExtractError::PdfParse(error.to_string()))?;

        let mut pages = Vec::new();
        for (page_no, _page_id) in document.get_pages() {
            let text = document
                .extract_text(&[page_no])
                .map_err(|error| ExtractError::PdfParse(error.to_string()))?;

            pages.push(PageText {
                number: page_no,
                text,
            });
        }

        Ok(pages)
    }
}

/// Full document text: page texts concatenated with nothing in between.
pub fn extract_text<E>(extractor: &E, path: &Path) -> Result<String, ExtractError>
where
    E: PdfExtractor + ?Sized,
{
    let pages = extractor.extract_pages(path)?;
    Ok(pages.into_iter().map(|page| page.text).collect())
}

pub type SharedExtractor = Arc<dyn PdfExtractor + Send + Sync>;

/// Runs [`extract_text`] on the blocking pool so parsing never stalls the executor.
pub async fn extract_text_blocking(
    extractor: SharedExtractor,
    path: PathBuf,
) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text(extractor.as_ref(), &path)).await?
}
