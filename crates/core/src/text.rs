use crate::error::ExtractError;
use regex::Regex;

const TOKEN_PATTERN: &str = r"\w+(?:'\w+)?|[^\w\s]";

/// Word and punctuation tokenizer behind the upload sentence count.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self, ExtractError> {
        Self::with_pattern(TOKEN_PATTERN)
    }

    pub fn with_pattern(pattern: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        self.pattern
            .find_iter(sentence)
            .map(|token| token.as_str().to_string())
            .collect()
    }

    /// Splits on literal `.` and tokenizes every non-empty fragment.
    ///
    /// Whitespace-only fragments are kept, so the result length matches a plain
    /// "split and drop empty strings" sentence count.
    pub fn preprocess(&self, text: &str) -> Vec<Vec<String>> {
        text.split('.')
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| self.tokenize(fragment))
            .collect()
    }
}

pub fn tokenize(sentence: &str) -> Result<Vec<String>, ExtractError> {
    Ok(Tokenizer::new()?.tokenize(sentence))
}

pub fn preprocess_text(text: &str) -> Result<Vec<Vec<String>>, ExtractError> {
    Ok(Tokenizer::new()?.preprocess(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_separates_words_and_punctuation() -> Result<(), ExtractError> {
        let tokens = tokenize("Hello, world! It's fine")?;
        assert_eq!(tokens, vec!["Hello", ",", "world", "!", "It's", "fine"]);
        Ok(())
    }

    #[test]
    fn sentence_count_ignores_empty_fragments() -> Result<(), ExtractError> {
        let sentences = preprocess_text("The sky is blue.")?;
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0], vec!["The", "sky", "is", "blue"]);
        Ok(())
    }

    #[test]
    fn whitespace_fragments_still_count() -> Result<(), ExtractError> {
        let sentences = preprocess_text("One. Two. ")?;
        assert_eq!(sentences.len(), 3);
        assert!(sentences[2].is_empty());
        Ok(())
    }

    #[test]
    fn consecutive_dots_do_not_create_sentences() -> Result<(), ExtractError> {
        assert_eq!(preprocess_text("Wait... what")?.len(), 2);
        assert!(preprocess_text("")?.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_token_pattern_is_an_error() {
        let result = Tokenizer::with_pattern(r"(\w+");
        assert!(matches!(result, Err(ExtractError::RegexError(_))));
    }
}
