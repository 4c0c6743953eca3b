use anyhow::Result;
use mockito::Matcher;
use test_utils::config_fixture;
use test_utils::query_fixture;

use super::RagServer;
use crate::domain::models::Backend;
use crate::domain::models::ChatHistory;
use crate::domain::models::ChatTurn;
use crate::domain::models::ConfigUpdate;
use crate::domain::models::IndexingUpdate;
use crate::domain::models::LlmUpdate;
use crate::domain::models::QueryPrompt;
use crate::domain::models::RerankUpdate;
use crate::domain::models::RetrievalUpdate;

impl RagServer {
    fn with_url(url: String) -> RagServer {
        return RagServer::new(&url, "200");
    }
}

#[tokio::test]
async fn it_successfully_health_checks() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/config")
        .with_status(200)
        .with_body(config_fixture())
        .create_async()
        .await;

    let backend = RagServer::with_url(server.url());
    let res = backend.health_check().await?;

    assert_eq!(res.llm.llm_type, "openai");
    assert_eq!(res.indexing.project_paths.len(), 2);
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/config")
        .with_status(500)
        .create_async()
        .await;

    let backend = RagServer::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_without_url() {
    let backend = RagServer::new("", "200");
    let res = backend.health_check().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_indexes_a_path() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/index")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::UrlEncoded(
            "project_path".to_string(),
            "/data/docs".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"status":"success","message":"Indexed 12 files"}"#)
        .create_async()
        .await;

    let backend = RagServer::with_url(server.url());
    let res = backend.index("/data/docs").await?;
    mock.assert_async().await;

    assert!(res.is_success());
    assert_eq!(res.message, "Indexed 12 files");

    return Ok(());
}

#[tokio::test]
async fn it_passes_through_index_errors() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/index")
        .with_status(200)
        .with_body(
            r#"{"status":"error","message":"Please provide an absolute path for indexing."}"#,
        )
        .create_async()
        .await;

    let backend = RagServer::with_url(server.url());
    let res = backend.index("docs").await?;
    mock.assert_async().await;

    assert!(!res.is_success());
    assert_eq!(
        res.message,
        "Please provide an absolute path for indexing."
    );

    return Ok(());
}

#[tokio::test]
async fn it_fails_index_on_bad_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/index")
        .with_status(422)
        .with_body(r#"{"detail":"missing field"}"#)
        .create_async()
        .await;

    let backend = RagServer::with_url(server.url());
    let res = backend.index("").await;
    mock.assert_async().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_gets_config() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/config")
        .with_status(200)
        .with_body(config_fixture())
        .create_async()
        .await;

    let backend = RagServer::with_url(format!("{}/", server.url()));
    let res = backend.get_config().await?;
    mock.assert_async().await;

    assert_eq!(res.retrieval.similarity_top_k, 4);
    assert_eq!(res.rerank.model, "cross-encoder/ms-marco-MiniLM-L-6-v2");

    return Ok(());
}

#[tokio::test]
async fn it_fails_config_on_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/config")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let backend = RagServer::with_url(server.url());
    let res = backend.get_config().await;
    mock.assert_async().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_updates_config() -> Result<()> {
    let update = ConfigUpdate {
        llm: LlmUpdate::new(0.3, "gpt-4o"),
        indexing: IndexingUpdate { chunk_size: 512 },
        retrieval: RetrievalUpdate {
            similarity_top_k: 6,
        },
        rerank: RerankUpdate {
            enable: false,
            model: "cross-encoder/ms-marco-MiniLM-L-6-v2".to_string(),
            top_n: 2,
        },
    };

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/config")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "llm": { "temperature": 0.3, "model": "gpt-4o" },
            "indexing": { "chunk_size": 512 },
            "retrieval": { "similarity_top_k": 6 },
            "rerank": {
                "enable": false,
                "model": "cross-encoder/ms-marco-MiniLM-L-6-v2",
                "top_n": 2
            }
        })))
        .with_status(200)
        .with_body(r#"{"status":"success","message":"Configuration updated successfully."}"#)
        .create_async()
        .await;

    let backend = RagServer::with_url(server.url());
    let res = backend.update_config(&update).await?;
    mock.assert_async().await;

    assert_eq!(res.message, "Configuration updated successfully.");

    return Ok(());
}

#[tokio::test]
async fn it_queries() -> Result<()> {
    let mut history = ChatHistory::default();
    history.push(ChatTurn::user("What is X?"));
    let prompt = QueryPrompt::new("What is X?", "openai", false, &history);

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("question".to_string(), "What is X?".to_string()),
            Matcher::UrlEncoded("llm_type".to_string(), "openai".to_string()),
            Matcher::UrlEncoded("rerank_enable".to_string(), "false".to_string()),
            Matcher::UrlEncoded(
                "chat_history".to_string(),
                r#"[{"role":"user","content":"What is X?"}]"#.to_string(),
            ),
        ]))
        .with_status(200)
        .with_body(query_fixture())
        .create_async()
        .await;

    let backend = RagServer::with_url(server.url());
    let res = backend.query(&prompt).await?;
    mock.assert_async().await;

    assert_eq!(res.answer, "X is Y");
    assert_eq!(res.sources.len(), 1);
    assert_eq!(res.sources[0].score_label(), "0.8700");
    assert_eq!(res.sources[0].metadata.file_name, "a.txt");

    return Ok(());
}

#[tokio::test]
async fn it_fails_query_on_bad_status() {
    let prompt = QueryPrompt::new("What is X?", "openai", false, &ChatHistory::default());

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let backend = RagServer::with_url(server.url());
    let res = backend.query(&prompt).await;
    mock.assert_async().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_fails_query_when_unreachable() {
    let prompt = QueryPrompt::new("What is X?", "openai", false, &ChatHistory::default());

    // Nothing listens on the discard port.
    let backend = RagServer::with_url("http://127.0.0.1:9".to_string());
    let res = backend.query(&prompt).await;

    assert!(res.is_err());
}
