use std::collections::HashMap;

use crate::board::StateKey;

/// Scores of positions already visited during one top-level search
///
/// Entries are keyed on board content alone. A cached score is returned
/// whatever depth or alpha-beta window produced it, so a hit can differ from
/// what a fresh search of that node would return. A new table is built for
/// every top-level search so that approximation never outlives a single turn.
#[derive(Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<StateKey, i32>,
    hits: usize,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: StateKey, value: i32) {
        self.entries.insert(key, value);
    }

    pub fn get(&mut self, key: &StateKey) -> Option<i32> {
        let value = self.entries.get(key).copied();
        if value.is_some() {
            self.hits += 1;
        }
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the table so far
    pub fn hits(&self) -> usize {
        self.hits
    }
}
