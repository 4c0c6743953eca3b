use anyhow::Result;

use super::IndexResponse;
use super::QueryPrompt;
use super::QueryResponse;
use crate::domain::models::ChatHistory;
use crate::domain::models::ChatTurn;

#[test]
fn it_detects_index_success() {
    let res = IndexResponse {
        status: "success".to_string(),
        message: "Indexed 12 files".to_string(),
    };
    assert!(res.is_success());

    let res = IndexResponse {
        status: "error".to_string(),
        message: "Please provide an absolute path for indexing.".to_string(),
    };
    assert!(!res.is_success());

    assert!(!IndexResponse::default().is_success());
}

#[test]
fn it_builds_query_form_fields() -> Result<()> {
    let mut history = ChatHistory::default();
    history.push(ChatTurn::user("What is X?"));

    let prompt = QueryPrompt::new("What is X?", "ollama", true, &history);
    let fields = prompt.form_fields()?;

    assert_eq!(
        fields,
        vec![
            ("question", "What is X?".to_string()),
            ("llm_type", "ollama".to_string()),
            ("rerank_enable", "true".to_string()),
            (
                "chat_history",
                r#"[{"role":"user","content":"What is X?"}]"#.to_string()
            ),
        ]
    );

    return Ok(());
}

#[test]
fn it_copies_history_at_creation() {
    let mut history = ChatHistory::default();
    history.push(ChatTurn::user("first"));

    let prompt = QueryPrompt::new("first", "openai", false, &history);
    history.push(ChatTurn::assistant("later"));

    assert_eq!(prompt.chat_history.len(), 1);
}

#[test]
fn it_defaults_missing_sources() -> Result<()> {
    let res: QueryResponse = serde_json::from_str(r#"{"answer":"X is Y"}"#)?;

    assert_eq!(res.answer, "X is Y");
    assert!(res.sources.is_empty());

    return Ok(());
}

#[test]
fn it_rejects_missing_answer() {
    let res = serde_json::from_str::<QueryResponse>(r#"{"sources":[]}"#);
    assert!(res.is_err());
}
