#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::ChatHistory;
use super::ConfigSnapshot;
use super::ConfigUpdate;
use super::SourceCitation;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl IndexResponse {
    pub fn is_success(&self) -> bool {
        return self.status == "success";
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveConfigResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Everything the query form sends alongside the question.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryPrompt {
    pub question: String,
    pub llm_type: String,
    pub rerank_enable: bool,
    pub chat_history: ChatHistory,
}

impl QueryPrompt {
    pub fn new(
        question: &str,
        llm_type: &str,
        rerank_enable: bool,
        chat_history: &ChatHistory,
    ) -> QueryPrompt {
        return QueryPrompt {
            question: question.to_string(),
            llm_type: llm_type.to_string(),
            rerank_enable,
            chat_history: chat_history.clone(),
        };
    }

    /// URL-encoded form fields for `POST /query`.
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>> {
        return Ok(vec![
            ("question", self.question.to_string()),
            ("llm_type", self.llm_type.to_string()),
            ("rerank_enable", self.rerank_enable.to_string()),
            ("chat_history", self.chat_history.to_json()?),
        ]);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceCitation>,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the server is reachable. Returns the server
    /// configuration, which seeds the predefined paths and the default LLM type.
    async fn health_check(&self) -> Result<ConfigSnapshot>;

    /// Asks the server to index every document under `project_path`.
    async fn index(&self, project_path: &str) -> Result<IndexResponse>;

    async fn get_config(&self) -> Result<ConfigSnapshot>;

    async fn update_config(&self, update: &ConfigUpdate) -> Result<SaveConfigResponse>;

    /// Asks a question against the indexed documents. The chat history in the
    /// prompt is passed as context for follow up questions.
    async fn query(&self, prompt: &QueryPrompt) -> Result<QueryResponse>;
}

pub type BackendBox = Arc<dyn Backend + Send + Sync>;
