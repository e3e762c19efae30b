//! # Command Layer
//!
//! This module contains the **core business logic** of gct. Each command lives
//! in its own submodule and exposes a plain `run` function that validates its
//! input, drives a [`TodoRepository`](crate::store::TodoRepository) and returns
//! a [`CmdResult`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or formatting
//! - **Argument parsing**: that's the CLI layer's job
//! - **Exit codes**: return `Result`, let the caller decide
//! - **User interaction**: confirmations belong to the UI
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries the todos a command touched (`affected_todos`), the
//! todos to display (`listed_todos`) and leveled [`CmdMessage`]s. Front ends
//! decide how to render each of them.
//!
//! ## Testing Strategy
//!
//! Command tests run against
//! [`InMemoryRepository`](crate::store::InMemoryRepository) with a
//! [`ManualClock`](crate::clock::ManualClock), so they touch no filesystem and
//! every timestamp is known in advance.
//!
//! ## Command Modules
//!
//! - [`add`]: Create a todo
//! - [`list`]: Read the whole collection
//! - [`toggle`]: Flip the done flag
//! - [`update`]: Replace a description
//! - [`delete`]: Remove a todo and resequence
//! - [`helpers`]: ID validation and lookup

use crate::model::Todo;
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod toggle;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_todos: Vec<Todo>,
    pub listed_todos: Vec<Todo>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_todos(mut self, todos: Vec<Todo>) -> Self {
        self.affected_todos = todos;
        self
    }

    pub fn with_listed_todos(mut self, todos: Vec<Todo>) -> Self {
        self.listed_todos = todos;
        self
    }

    /// The single todo a mutating command worked on, if any.
    pub fn affected(&self) -> Option<&Todo> {
        self.affected_todos.first()
    }
}
