#[cfg(test)]
#[path = "config_snapshot_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;

/// Models served by a local Ollama instance. A model in this list is saved
/// under `llm.ollama_model`, everything else under `llm.model`.
pub const OLLAMA_MODELS: [&str; 12] = [
    "codellama",
    "deepseek-r1",
    "gemma",
    "gemma2",
    "llama2",
    "llama3",
    "llama3.1",
    "llama3.2",
    "mistral",
    "mixtral",
    "phi3",
    "qwen2.5",
];

/// LLM variants the server can answer with.
pub const LLM_TYPES: [&str; 2] = ["openai", "ollama"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModelRoute {
    Ollama,
    Hosted,
}

impl ModelRoute {
    pub fn for_model(model: &str) -> ModelRoute {
        if OLLAMA_MODELS.contains(&model) {
            return ModelRoute::Ollama;
        }

        return ModelRoute::Hosted;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    #[serde(rename = "type")]
    pub llm_type: String,
    pub model: String,
    pub ollama_model: String,
    pub temperature: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingSettings {
    pub chunk_size: u32,
    pub project_paths: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub similarity_top_k: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankSettings {
    pub enable: bool,
    pub model: String,
    pub top_n: u32,
}

/// Server-side settings as returned by `GET /config`. Keys the console does not
/// edit (API keys, storage paths, embedding models) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSnapshot {
    pub llm: LlmSettings,
    pub indexing: IndexingSettings,
    pub retrieval: RetrievalSettings,
    pub rerank: RerankSettings,
}

impl ConfigSnapshot {
    /// The model the server currently uses for its configured LLM type.
    pub fn active_model(&self) -> &str {
        if self.llm.llm_type == "ollama" {
            return &self.llm.ollama_model;
        }

        return &self.llm.model;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LlmUpdate {
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama_model: Option<String>,
}

impl LlmUpdate {
    pub fn new(temperature: f64, model: &str) -> LlmUpdate {
        let mut update = LlmUpdate {
            temperature,
            model: None,
            ollama_model: None,
        };

        match ModelRoute::for_model(model) {
            ModelRoute::Ollama => update.ollama_model = Some(model.to_string()),
            ModelRoute::Hosted => update.model = Some(model.to_string()),
        }

        return update;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IndexingUpdate {
    pub chunk_size: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RetrievalUpdate {
    pub similarity_top_k: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RerankUpdate {
    pub enable: bool,
    pub model: String,
    pub top_n: u32,
}

/// Partial settings payload for `POST /config`. The server merges it into its
/// current configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConfigUpdate {
    pub llm: LlmUpdate,
    pub indexing: IndexingUpdate,
    pub retrieval: RetrievalUpdate,
    pub rerank: RerankUpdate,
}
