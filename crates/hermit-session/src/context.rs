//! Per-conversation context buffers feeding the reply generator.
//!
//! Buffers grow without bound in memory; only the trailing
//! [`PROMPT_WINDOW`] turns are read when building a prompt. Buffers are
//! created on first append and live for the process lifetime.

use std::collections::HashMap;

use hermit_core::types::{ContextTurn, ConversationId};

/// Number of most-recent turns included in a prompt.
pub const PROMPT_WINDOW: usize = 100;

#[derive(Default)]
pub struct ContextBuffer {
    conversations: HashMap<ConversationId, Vec<ContextTurn>>,
}

impl ContextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the conversation's log. Append-only — turns are
    /// never truncated or rewritten.
    pub fn append(&mut self, conversation: &ConversationId, turn: ContextTurn) {
        self.conversations
            .entry(conversation.clone())
            .or_default()
            .push(turn);
    }

    /// The trailing window of at most [`PROMPT_WINDOW`] turns, oldest first.
    pub fn recent(&self, conversation: &ConversationId) -> &[ContextTurn] {
        match self.conversations.get(conversation) {
            Some(turns) => {
                let start = turns.len().saturating_sub(PROMPT_WINDOW);
                &turns[start..]
            }
            None => &[],
        }
    }

    /// Total turns recorded for the conversation (not windowed).
    pub fn len(&self, conversation: &ConversationId) -> usize {
        self.conversations.get(conversation).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, conversation: &ConversationId) -> bool {
        self.len(conversation) == 0
    }
}
