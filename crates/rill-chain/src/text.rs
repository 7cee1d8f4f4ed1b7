use regex::Regex;

use rill_core::error::{InputError, Result};

/// Splits text around a regular-expression delimiter.
///
/// Text without any delimiter comes back whole. Otherwise trailing empty
/// pieces are dropped, while interior empty pieces are kept. A leading empty
/// piece is kept only when the delimiter at the start of the text is
/// non-empty; a zero-width match there produces no piece.
#[derive(Debug, Clone)]
pub struct Splitter {
    delimiter: Regex,
}

impl Splitter {
    pub fn new(pattern: &str) -> Result<Self> {
        let delimiter = Regex::new(pattern).map_err(|e| InputError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { delimiter })
    }

    pub fn pattern(&self) -> &str {
        self.delimiter.as_str()
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let Some(first) = self.delimiter.find(text).filter(|_| !text.is_empty()) else {
            return vec![text.to_string()];
        };

        let mut pieces: Vec<String> = self.delimiter.split(text).map(str::to_string).collect();
        if first.start() == 0 && first.is_empty() {
            pieces.remove(0);
        }
        while pieces.last().is_some_and(|piece| piece.is_empty()) {
            pieces.pop();
        }
        pieces
    }
}
