//! Message and Transcript domain types.
//!
//! These are the core value objects that flow through the system:
//! the user types a message → an assistant assembles a request → the
//! provider generates a response → both ends land in the transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// System instructions
    System,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// An ordered, bounded sequence of messages.
///
/// The transcript holds at most `cap` messages. Appending past the cap drops
/// the oldest entries first (FIFO); messages are never reordered. This is the
/// conversation buffer: one transcript per interactive session, process
/// lifetime only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
    cap: usize,
}

impl Transcript {
    /// Create an empty transcript that retains at most `cap` messages.
    ///
    /// A cap of zero is treated as one: a transcript that can never hold
    /// a message is not a useful conversation.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            messages: Vec::new(),
            cap: cap.max(1),
        }
    }

    /// Append a message, then trim to the cap.
    ///
    /// Trimming runs synchronously and unconditionally on every append:
    /// afterwards the transcript holds exactly the most recent `cap` entries.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        if self.messages.len() > self.cap {
            let excess = self.messages.len() - self.cap;
            self.messages.drain(..excess);
        }
    }

    /// The retained messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recently appended message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The configured retention cap.
    pub fn cap(&self) -> usize {
        self.cap
    }
}
