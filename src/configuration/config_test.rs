use anyhow::Result;
use test_utils::insta_snapshot;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta_snapshot(|| {
        insta::assert_snapshot!(res, @r###"
        # Milliseconds to wait for the server to answer the start-up configuration request.
        health-check-timeout = 1000

        # LLM variant to answer questions with. Leave empty to use the server default. [possible values: openai, ollama]
        # llm-type = ""

        # Rerank retrieved sources before answering. [possible values: true, false]
        rerank = false

        # Base URL of the RAG server.
        server-url = "http://localhost:8000"
        "###);
    });
}

// Config is process wide, so loading is exercised in a single test to keep
// parallel tests from overwriting each other's values.
#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["ragconsole", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());

    let matches =
        cli::build().try_get_matches_from(vec!["ragconsole", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::ServerURL), "http://127.0.0.1:8000");
    assert_eq!(Config::get(ConfigKey::HealthCheckTimeout), "2000");
    assert_eq!(Config::get(ConfigKey::LlmType), "ollama");
    assert!(Config::get_bool(ConfigKey::Rerank));

    let matches = cli::build().try_get_matches_from(vec![
        "ragconsole",
        "-c",
        "./config.example.toml",
        "--server-url",
        "http://rag.internal:9000",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;
    assert_eq!(Config::get(ConfigKey::ServerURL), "http://rag.internal:9000");

    return Ok(());
}
