#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /index (/i) [PATH?] - Indexes the documents under PATH on the server. Without PATH the current project path is used.
- /path (/p) [NUMBER] - Copies a predefined path from the index panel into the project path.
- /llm (/l) [TYPE] - Sets the LLM variant used for questions. Possible values are openai and ollama.
- /rerank (/r) [on,off?] - Enables or disables reranking of sources. Without a value the setting is toggled.
- /settings (/s) - Opens the server settings panel.
- /clear (/c) - Clears the chat history and the answer status.
- /quit /exit (/q) - Exit RAG Console.
- /help (/h) - Provides this help menu.

Anything else typed in the input box is sent as a question.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit.

SETTINGS PANEL:
- Tab / Up / Down - Move between fields
- Left / Right - Adjust sliders
- Space - Toggle reranking
- Enter - Save settings to the server
- Esc - Close the panel without saving
        "#;

    return text.trim().to_string();
}

/// Runs one action against the backend and turns the outcome into the event
/// the UI loop reacts to. Failures become events, never errors.
async fn run_action(backend: &BackendBox, action: Action) -> Event {
    match action {
        Action::BackendBootstrap() => match backend.health_check().await {
            Ok(snapshot) => return Event::BackendReady(snapshot),
            Err(err) => return Event::BackendUnavailable(format!("{err:#}")),
        },
        Action::ConfigFetch() => match backend.get_config().await {
            Ok(snapshot) => return Event::ConfigLoaded(snapshot),
            Err(err) => return Event::ConfigLoadFailed(format!("{err:#}")),
        },
        Action::ConfigSave(update) => match backend.update_config(&update).await {
            Ok(res) => return Event::ConfigSaved(res),
            Err(err) => return Event::ConfigSaveFailed(format!("{err:#}")),
        },
        Action::IndexRequest(project_path) => match backend.index(&project_path).await {
            Ok(res) => return Event::IndexResponse(res),
            Err(err) => return Event::IndexFailed(format!("{err:#}")),
        },
        Action::QueryRequest(prompt) => match backend.query(&prompt).await {
            Ok(res) => return Event::QueryResponse(res),
            Err(err) => return Event::QueryFailed(format!("{err:#}")),
        },
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Each action runs on its own task so a slow query never blocks indexing
    /// or settings. Results are delivered in the order they complete.
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let worker_backend = backend.clone();
            let worker_tx = tx.clone();

            tokio::spawn(async move {
                let event = run_action(&worker_backend, action).await;
                if worker_tx.send(event).is_err() {
                    tracing::debug!("UI loop closed before an action result was delivered");
                }
            });
        }

        return Ok(());
    }
}
