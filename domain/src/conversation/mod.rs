//! Conversation entities
//!
//! A [`Conversation`] is an append-only sequence of [`Turn`]s owned by the
//! session that created it. Turns are immutable once appended; the only
//! mutation is appending. Content is kept as tagged [`ContentBlock`]s so
//! tool-derived text stays distinguishable from user prose all the way to
//! the wire.

use crate::tool::ToolServer;
use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation.
///
/// Only `User` and `Assistant` exist — the target endpoint models the
/// conversation as a strict user/assistant alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A tagged unit of turn content.
///
/// `Text` is plain prose; `ToolFindings` carries serialized output from a
/// tool server, tagged with its origin so provenance survives serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text(String),
    ToolFindings { server: ToolServer, data: String },
}

impl ContentBlock {
    pub fn text(content: impl Into<String>) -> Self {
        ContentBlock::Text(content.into())
    }

    /// Returns the plain text if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this block came from a tool server.
    pub fn is_tool_derived(&self) -> bool {
        matches!(self, ContentBlock::ToolFindings { .. })
    }
}

/// A single turn in a conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::text(content)],
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::text(content)],
        }
    }
}

/// An ordered, append-only conversation (Entity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a conversation with a single user turn.
    pub fn from_user(content: impl Into<String>) -> Self {
        let mut conversation = Self::new();
        conversation.push(Turn::user(content));
        conversation
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Append a turn. Appending is the only permitted mutation.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Turn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Turn::assistant(content));
    }

    /// Check strict role alternation starting with `User`.
    ///
    /// Returns the index of the first violating turn, or `None` if the
    /// conversation alternates correctly. Repair is never attempted — two
    /// consecutive user turns are ambiguous and merging them could alter
    /// meaning.
    pub fn first_alternation_violation(&self) -> Option<usize> {
        let mut expected = Role::User;
        for (index, turn) in self.turns.iter().enumerate() {
            if turn.role != expected {
                return Some(index);
            }
            expected = match expected {
                Role::User => Role::Assistant,
                Role::Assistant => Role::User,
            };
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_conversation_is_valid() {
        let mut conversation = Conversation::from_user("hi");
        conversation.push_assistant("hello");
        conversation.push_user("how are you?");
        assert_eq!(conversation.first_alternation_violation(), None);
    }

    #[test]
    fn consecutive_user_turns_are_flagged() {
        let mut conversation = Conversation::from_user("first");
        conversation.push_user("second");
        assert_eq!(conversation.first_alternation_violation(), Some(1));
    }

    #[test]
    fn conversation_starting_with_assistant_is_flagged() {
        let mut conversation = Conversation::new();
        conversation.push_assistant("unprompted");
        assert_eq!(conversation.first_alternation_violation(), Some(0));
    }

    #[test]
    fn empty_conversation_has_no_violation() {
        assert_eq!(Conversation::new().first_alternation_violation(), None);
    }

    #[test]
    fn tool_findings_block_is_tool_derived() {
        let block = ContentBlock::ToolFindings {
            server: ToolServer::Research,
            data: "{\"findings\": []}".to_string(),
        };
        assert!(block.is_tool_derived());
        assert!(block.as_text().is_none());
    }
}
