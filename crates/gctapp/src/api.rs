//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every gct operation, whichever front end is calling.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Owns** the repository and the clock, so callers never thread them by hand
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Business logic belongs in `commands/*.rs`; rendering belongs to the UI.
//!
//! ## Generic Over Repository and Clock
//!
//! - Production: `GctApi<JsonRepository, SystemClock>`
//! - Testing: `GctApi<InMemoryRepository, ManualClock>`
//!
//! API tests check that each method reaches the right command with the right
//! arguments. Command behavior is tested in the command modules.

use crate::clock::Clock;
use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::store::TodoRepository;

pub struct GctApi<R: TodoRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: TodoRepository, C: Clock> GctApi<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn add_todo(&mut self, description: &str) -> Result<CmdResult> {
        commands::add::run(&mut self.repo, &self.clock, description)
    }

    pub fn list_todos(&self) -> Result<CmdResult> {
        commands::list::run(&self.repo)
    }

    pub fn toggle_todo(&mut self, id: i64) -> Result<CmdResult> {
        commands::toggle::run(&mut self.repo, &self.clock, id)
    }

    pub fn update_todo(&mut self, id: i64, description: &str) -> Result<CmdResult> {
        commands::update::run(&mut self.repo, &self.clock, id, description)
    }

    pub fn delete_todo(&mut self, id: i64) -> Result<CmdResult> {
        commands::delete::run(&mut self.repo, id)
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
