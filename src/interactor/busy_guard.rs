//! Per-chat busy flag for the swap trigger.
//!
//! A chat holds at most one [`BusyGuard`] at a time; a second activation while
//! a swap is pending fails with `OperationInProgress`. The flag clears when
//! the guard drops, whatever the outcome.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::entity::BotError;

#[derive(Clone, Default)]
pub struct BusyRegistry {
    active: Arc<Mutex<HashSet<i64>>>,
}

impl BusyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, chat_id: i64) -> Result<BusyGuard, BotError> {
        let mut active = self
            .active
            .lock()
            .map_err(|_| BotError::Unclassified("busy registry poisoned".to_string()))?;

        if !active.insert(chat_id) {
            return Err(BotError::OperationInProgress);
        }

        Ok(BusyGuard {
            chat_id,
            active: self.active.clone(),
        })
    }

    pub fn is_busy(&self, chat_id: i64) -> bool {
        self.active
            .lock()
            .map(|active| active.contains(&chat_id))
            .unwrap_or(false)
    }
}

pub struct BusyGuard {
    chat_id: i64,
    active: Arc<Mutex<HashSet<i64>>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Ok(mut active) = self.active.lock() {
            active.remove(&self.chat_id);
        }
    }
}
