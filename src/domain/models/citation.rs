#[cfg(test)]
#[path = "citation_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;

/// Number of characters of a source snippet shown in the citation list.
pub const CITATION_PREVIEW_CHARS: usize = 200;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationMetadata {
    #[serde(default)]
    pub file_name: String,
}

/// Evidence snippet returned alongside an answer. Citations are rendered and
/// then dropped, they never become part of the chat history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub metadata: CitationMetadata,
    #[serde(default)]
    pub text: String,
}

impl SourceCitation {
    pub fn score_label(&self) -> String {
        if let Some(score) = self.score {
            return format!("{score:.4}");
        }

        return "n/a".to_string();
    }

    pub fn preview(&self) -> String {
        let head = self
            .text
            .chars()
            .take(CITATION_PREVIEW_CHARS)
            .collect::<String>();

        return format!("{head}...");
    }

    pub fn as_lines(&self) -> Vec<String> {
        return vec![
            format!("Score: {}", self.score_label()),
            format!("File: {}", self.metadata.file_name),
            format!("Text: {}", self.preview()),
        ];
    }
}
