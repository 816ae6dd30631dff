// Command invoker - queues dictionary commands and runs them in order

use super::{DictionaryCommand, QueryType};
use crate::dictionary::{Dictionary, DictionaryError};
use serde::Serialize;
use std::collections::VecDeque;

/// Outcome of one executed command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRecord {
    pub query: String,
    pub query_type: Option<QueryType>,
    pub status: String,
}

/// Runs commands against a dictionary in FIFO order.
///
/// The queue is drained on every enqueue, so a command runs before
/// `add_to_queue` returns. A failing command is dropped and its error
/// returned; later commands are unaffected.
pub struct CommandInvoker<'a> {
    dictionary: &'a Dictionary,
    queue: VecDeque<Box<dyn DictionaryCommand>>,
    history: Vec<CommandRecord>,
}

impl<'a> CommandInvoker<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self {
            dictionary,
            queue: VecDeque::new(),
            history: Vec::new(),
        }
    }

    /// Enqueue `command` and drain the queue, returning its status
    pub fn add_to_queue(&mut self, command: impl DictionaryCommand + 'static) -> Result<String, DictionaryError> {
        self.queue.push_back(Box::new(command));
        let mut last_status = String::new();

        while let Some(mut command) = self.queue.pop_front() {
            if let Err(e) = command.run(self.dictionary) {
                crate::warn!("Command for '{}' failed: {}", command.query(), e);
                return Err(e);
            }
            let status = command.status().unwrap_or_default().to_string();
            crate::debug!("Command executed: {}", status);
            self.history.push(CommandRecord {
                query: command.query().to_string(),
                query_type: command.query_type(),
                status: status.clone(),
            });
            last_status = status;
        }

        Ok(last_status)
    }

    /// Commands waiting to run
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Executed commands, oldest first
    pub fn history(&self) -> &[CommandRecord] {
        &self.history
    }
}

#[cfg(test)]
#[path = "invoker_test.rs"]
mod tests;
