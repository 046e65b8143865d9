//! Page-session style channel: in-process map, entries never expire.

use super::{HandoffResult, PrepChannel};
use crate::model::note::EpochMillis;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryPrepChannel {
    entries: HashMap<String, String>,
}

impl MemoryPrepChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PrepChannel for MemoryPrepChannel {
    fn put(&mut self, key: &str, value: String, _now: EpochMillis) -> HandoffResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn take(&mut self, key: &str, _now: EpochMillis) -> HandoffResult<Option<String>> {
        Ok(self.entries.remove(key))
    }
}
