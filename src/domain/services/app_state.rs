#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use itertools::Itertools;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::SettingsForm;
use super::Transcript;
use crate::domain::models::Action;
use crate::domain::models::Banner;
use crate::domain::models::ChatHistory;
use crate::domain::models::ChatTurn;
use crate::domain::models::ConfigSnapshot;
use crate::domain::models::IndexResponse;
use crate::domain::models::QueryPrompt;
use crate::domain::models::QueryResponse;
use crate::domain::models::SaveConfigResponse;
use crate::domain::models::SlashCommand;
use crate::domain::models::SourceCitation;
use crate::domain::models::Tone;
use crate::domain::models::LLM_TYPES;

/// State of one console session: the conversation, the index and query forms,
/// and the settings panel. Only the UI loop mutates it.
pub struct AppState {
    pub chat_history: ChatHistory,
    pub transcript: Transcript,
    pub project_path: String,
    pub predefined_paths: Vec<String>,
    pub index_banner: Banner,
    pub answer_banner: Banner,
    pub citations: Vec<SourceCitation>,
    pub llm_type: String,
    pub rerank_enable: bool,
    pub settings: SettingsForm,
    pub settings_open: bool,
    pub help_open: bool,
    pub last_known_width: u16,
    pub last_known_height: u16,
}

impl AppState {
    pub fn new(llm_type: &str, rerank_enable: bool) -> AppState {
        return AppState {
            chat_history: ChatHistory::default(),
            transcript: Transcript::default(),
            project_path: "".to_string(),
            predefined_paths: vec![],
            index_banner: Banner::default(),
            answer_banner: Banner::default(),
            citations: vec![],
            llm_type: llm_type.to_string(),
            rerank_enable,
            settings: SettingsForm::default(),
            settings_open: false,
            help_open: false,
            last_known_width: 0,
            last_known_height: 0,
        };
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        // Borders take one cell on every side.
        self.transcript.set_turns(
            self.chat_history.turns(),
            self.last_known_width.saturating_sub(2),
        );
        self.transcript
            .set_viewport(self.last_known_height.saturating_sub(2));
    }

    fn add_turn(&mut self, turn: ChatTurn) {
        self.chat_history.push(turn);
        self.sync_dependants();
        self.transcript.last();
    }

    pub fn show_citations(&self) -> bool {
        return !self.citations.is_empty();
    }

    pub fn handle_backend_ready(&mut self, snapshot: ConfigSnapshot) {
        self.predefined_paths = snapshot
            .indexing
            .project_paths
            .into_iter()
            .filter(|path| return !path.is_empty())
            .unique()
            .collect();

        if self.llm_type.is_empty() {
            self.llm_type = snapshot.llm.llm_type;
        }
    }

    pub fn handle_backend_unavailable(&mut self, err: &str) {
        self.index_banner.set(
            Tone::Failure,
            &format!("The RAG server isn't reachable, indexing and questions will fail until it is running. Error: {err}"),
        );
    }

    /// Copies the predefined path at `idx` into the path field.
    pub fn select_predefined_path(&mut self, idx: usize) -> bool {
        if let Some(path) = self.predefined_paths.get(idx) {
            self.project_path = path.to_string();
            return true;
        }

        return false;
    }

    pub fn submit_index(&mut self) -> Action {
        self.index_banner.set(Tone::Pending, "Indexing...");
        return Action::IndexRequest(self.project_path.to_string());
    }

    pub fn handle_index_response(&mut self, res: IndexResponse) {
        let mut tone = Tone::Failure;
        if res.is_success() {
            tone = Tone::Success;
        }

        self.index_banner.set(tone, &res.message);
    }

    pub fn handle_index_failure(&mut self, err: &str) {
        self.index_banner.set(Tone::Failure, &format!("Error: {err}"));
    }

    pub fn open_settings(&mut self) -> Action {
        self.settings_open = true;
        self.settings.status.clear();
        return Action::ConfigFetch();
    }

    pub fn close_settings(&mut self) {
        self.settings_open = false;
    }

    pub fn handle_config_loaded(&mut self, snapshot: ConfigSnapshot) {
        self.settings.populate(&snapshot);
    }

    pub fn handle_config_load_failure(&mut self, err: &str) {
        self.settings
            .status
            .set(Tone::Failure, &format!("Error loading settings: {err}"));
    }

    pub fn save_settings(&mut self) -> Action {
        self.settings.status.set(Tone::Info, "Saving settings...");
        return Action::ConfigSave(self.settings.to_update());
    }

    pub fn handle_config_saved(&mut self, res: SaveConfigResponse) {
        self.settings.status.set(Tone::Success, &res.message);
    }

    pub fn handle_config_save_failure(&mut self, err: &str) {
        self.settings
            .status
            .set(Tone::Failure, &format!("Error saving settings: {err}"));
    }

    /// Routes keys while the settings panel is open. Up and Down arrive as
    /// scroll events and are handled by the caller.
    pub fn handle_settings_input(&mut self, input: Input) {
        match input {
            Input { key: Key::Esc, .. } => self.close_settings(),
            Input { key: Key::Tab, .. } => self.settings.focus_next(),
            Input { key: Key::Left, .. } => self.settings.decrease(),
            Input { key: Key::Right, .. } => self.settings.increase(),
            Input {
                key: Key::Backspace,
                ..
            } => self.settings.backspace(),
            Input {
                key: Key::Char(c),
                ctrl: false,
                alt: false,
                ..
            } => self.settings.input_char(c),
            _ => (),
        }
    }

    /// Routes pasted text. Returns what belongs in the question box, or None
    /// when an overlay took it. Line breaks are dropped so a paste never
    /// submits a question.
    pub fn handle_paste(&mut self, text: &str) -> Option<String> {
        let pasted = text
            .chars()
            .filter(|c| return *c != '\n' && *c != '\r')
            .collect::<String>();

        if self.help_open {
            return None;
        }

        if self.settings_open {
            for c in pasted.chars() {
                self.settings.input_char(c);
            }
            return None;
        }

        return Some(pasted);
    }

    pub fn clear_chat(&mut self) {
        self.chat_history.clear();
        self.answer_banner.clear();
        self.transcript.position = 0;
        self.sync_dependants();
    }

    /// Appends the question to the history before the request goes out, so
    /// the request carries it as the latest turn. Empty questions are ignored.
    pub fn submit_query(&mut self, question: &str) -> Option<Action> {
        if question.is_empty() {
            return None;
        }

        self.add_turn(ChatTurn::user(question));
        self.answer_banner.set(Tone::Info, "Searching...");

        return Some(Action::QueryRequest(QueryPrompt::new(
            question,
            &self.llm_type,
            self.rerank_enable,
            &self.chat_history,
        )));
    }

    pub fn handle_query_response(&mut self, res: QueryResponse) {
        self.add_turn(ChatTurn::assistant(&res.answer));
        self.citations = res.sources;
        self.answer_banner.set(Tone::Success, "Query successful!");
    }

    pub fn handle_query_failure(&mut self, err: &str) {
        self.answer_banner.set(Tone::Failure, &format!("Error: {err}"));
    }

    fn set_llm_type(&mut self, llm_type: &str) {
        if !LLM_TYPES.contains(&llm_type) {
            self.answer_banner.set(
                Tone::Failure,
                &format!(
                    "Unknown LLM type '{llm_type}'. Possible values are: {}",
                    LLM_TYPES.join(", ")
                ),
            );
            return;
        }

        self.llm_type = llm_type.to_string();
    }

    fn set_rerank(&mut self, value: &str) {
        match value {
            "on" | "true" => self.rerank_enable = true,
            "off" | "false" => self.rerank_enable = false,
            "" => self.rerank_enable = !self.rerank_enable,
            _ => {
                self.answer_banner.set(
                    Tone::Failure,
                    &format!("Unknown rerank value '{value}'. Use on or off."),
                );
            }
        }
    }

    fn select_predefined_path_arg(&mut self, arg: &str) {
        let selected = match arg.parse::<usize>() {
            Ok(number) if number >= 1 => self.select_predefined_path(number - 1),
            _ => false,
        };

        if !selected {
            self.index_banner.set(
                Tone::Failure,
                &format!("'{arg}' is not a valid path number from the predefined list."),
            );
        }
    }

    /// Handles a line submitted from the input box. Returns true when the
    /// console should exit.
    pub fn handle_input(&mut self, text: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if let Some(command) = SlashCommand::parse(text) {
            if command.is_quit() {
                return Ok(true);
            }

            if command.is_help() {
                self.help_open = true;
            } else if command.is_index() {
                if !command.args.is_empty() {
                    self.project_path = command.rest();
                }
                tx.send(self.submit_index())?;
            } else if command.is_path() {
                self.select_predefined_path_arg(command.rest().trim());
            } else if command.is_llm() {
                self.set_llm_type(command.rest().trim());
            } else if command.is_rerank() {
                self.set_rerank(command.rest().trim());
            } else if command.is_settings() {
                tx.send(self.open_settings())?;
            } else if command.is_clear() {
                self.clear_chat();
            }

            return Ok(false);
        }

        if let Some(action) = self.submit_query(text) {
            tx.send(action)?;
        }

        return Ok(false);
    }
}
