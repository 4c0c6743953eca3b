use std::env;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

/// Body of `GET /config` as served by the RAG server.
pub fn config_fixture() -> &'static str {
    return r#"
{
  "llm": {
    "type": "openai",
    "model": "gpt-4o-mini",
    "ollama_model": "llama3",
    "ollama_base_url": "http://localhost:11434",
    "api_key": "sk-test",
    "temperature": 0.2
  },
  "embedding": {
    "model": "BAAI/bge-small-en-v1.5"
  },
  "indexing": {
    "chunk_size": 1024,
    "storage_path": "./storage",
    "project_paths": ["/data/docs", "/data/wiki"]
  },
  "retrieval": {
    "similarity_top_k": 4
  },
  "rerank": {
    "enable": false,
    "model": "cross-encoder/ms-marco-MiniLM-L-6-v2",
    "top_n": 2
  }
}
"#
    .trim();
}

/// Body of `POST /query` with a single source document.
pub fn query_fixture() -> &'static str {
    return r#"
{
  "answer": "X is Y",
  "sources": [
    {
      "score": 0.87,
      "metadata": { "file_name": "a.txt", "file_path": "/data/docs/a.txt" },
      "text": "X is described as Y throughout the project documentation."
    }
  ]
}
"#
    .trim();
}
