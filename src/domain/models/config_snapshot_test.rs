use anyhow::Result;
use test_utils::config_fixture;

use super::ConfigSnapshot;
use super::ConfigUpdate;
use super::IndexingUpdate;
use super::LlmUpdate;
use super::ModelRoute;
use super::RerankUpdate;
use super::RetrievalUpdate;
use super::OLLAMA_MODELS;

#[test]
fn it_routes_allow_listed_models_to_ollama() {
    for model in OLLAMA_MODELS {
        assert_eq!(ModelRoute::for_model(model), ModelRoute::Ollama);
    }
}

#[test]
fn it_routes_other_models_to_hosted() {
    assert_eq!(ModelRoute::for_model("gpt-4o-mini"), ModelRoute::Hosted);
    assert_eq!(ModelRoute::for_model(""), ModelRoute::Hosted);
    // Membership is exact, not a prefix match.
    assert_eq!(ModelRoute::for_model("llama3:8b"), ModelRoute::Hosted);
}

#[test]
fn it_sets_exactly_one_model_key() {
    let ollama = LlmUpdate::new(0.5, "mistral");
    assert_eq!(ollama.ollama_model, Some("mistral".to_string()));
    assert_eq!(ollama.model, None);

    let hosted = LlmUpdate::new(0.5, "gpt-4o");
    assert_eq!(hosted.model, Some("gpt-4o".to_string()));
    assert_eq!(hosted.ollama_model, None);
}

#[test]
fn it_serializes_partial_update() -> Result<()> {
    let update = ConfigUpdate {
        llm: LlmUpdate::new(0.7, "llama3"),
        indexing: IndexingUpdate { chunk_size: 512 },
        retrieval: RetrievalUpdate {
            similarity_top_k: 5,
        },
        rerank: RerankUpdate {
            enable: true,
            model: "cross-encoder/ms-marco-MiniLM-L-6-v2".to_string(),
            top_n: 3,
        },
    };

    insta::assert_json_snapshot!(update, @r###"
    {
      "llm": {
        "temperature": 0.7,
        "ollama_model": "llama3"
      },
      "indexing": {
        "chunk_size": 512
      },
      "retrieval": {
        "similarity_top_k": 5
      },
      "rerank": {
        "enable": true,
        "model": "cross-encoder/ms-marco-MiniLM-L-6-v2",
        "top_n": 3
      }
    }
    "###);

    return Ok(());
}

#[test]
fn it_deserializes_server_config() -> Result<()> {
    let snapshot: ConfigSnapshot = serde_json::from_str(config_fixture())?;

    assert_eq!(snapshot.llm.llm_type, "openai");
    assert_eq!(snapshot.llm.model, "gpt-4o-mini");
    assert_eq!(snapshot.llm.ollama_model, "llama3");
    assert_eq!(snapshot.llm.temperature, 0.2);
    assert_eq!(snapshot.indexing.chunk_size, 1024);
    assert_eq!(
        snapshot.indexing.project_paths,
        vec!["/data/docs".to_string(), "/data/wiki".to_string()]
    );
    assert_eq!(snapshot.retrieval.similarity_top_k, 4);
    assert!(!snapshot.rerank.enable);
    assert_eq!(snapshot.rerank.top_n, 2);

    return Ok(());
}

#[test]
fn it_tolerates_missing_sections() -> Result<()> {
    let snapshot: ConfigSnapshot = serde_json::from_str(r#"{"llm":{"type":"ollama"}}"#)?;

    assert_eq!(snapshot.llm.llm_type, "ollama");
    assert_eq!(snapshot.indexing.chunk_size, 0);
    assert!(snapshot.indexing.project_paths.is_empty());

    return Ok(());
}

#[test]
fn it_picks_active_model_by_type() -> Result<()> {
    let mut snapshot: ConfigSnapshot = serde_json::from_str(config_fixture())?;
    assert_eq!(snapshot.active_model(), "gpt-4o-mini");

    snapshot.llm.llm_type = "ollama".to_string();
    assert_eq!(snapshot.active_model(), "llama3");

    return Ok(());
}
