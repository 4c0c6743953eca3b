#[cfg(test)]
#[path = "chat_turn_test.rs"]
mod tests;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Name shown in front of a turn in the transcript.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => return "You",
            Role::Assistant => return "Assistant",
        }
    }
}

/// One message of the running conversation. Turns are never edited once
/// created, so the fields are only readable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    role: Role,
    content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: &str) -> ChatTurn {
        return ChatTurn {
            role,
            content: content.to_string(),
        };
    }

    pub fn user(content: &str) -> ChatTurn {
        return ChatTurn::new(Role::User, content);
    }

    pub fn assistant(content: &str) -> ChatTurn {
        return ChatTurn::new(Role::Assistant, content);
    }

    pub fn role(&self) -> Role {
        return self.role;
    }

    pub fn content(&self) -> &str {
        return &self.content;
    }
}

/// Append-only list of turns for the current console session. The only way to
/// remove a turn is to clear the whole history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ChatTurn] {
        return &self.turns;
    }

    pub fn len(&self) -> usize {
        return self.turns.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.turns.is_empty();
    }

    /// JSON array sent to the server as the `chat_history` form field.
    pub fn to_json(&self) -> Result<String> {
        return Ok(serde_json::to_string(&self.turns)?);
    }
}
