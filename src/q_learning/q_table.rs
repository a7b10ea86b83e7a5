//! Sparse Q-table for tabular temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::state::StateKey;

/// Sparse table mapping state keys to per-action value vectors.
///
/// Rows are created lazily with all-zero initialization on first mutable
/// access, reproducing default-on-miss container semantics explicitly. Read
/// paths treat a missing row as a zero vector without inserting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    values: HashMap<StateKey, Vec<f64>>,
    actions: usize,
}

impl QTable {
    /// Create an empty table for the given action-set size.
    pub fn new(actions: usize) -> Self {
        Self {
            values: HashMap::new(),
            actions,
        }
    }

    /// Size of the fixed action set every row carries.
    pub fn actions(&self) -> usize {
        self.actions
    }

    /// Mutable row for a state, created zero-initialized on first access.
    pub fn row_mut(&mut self, state: StateKey) -> &mut Vec<f64> {
        self.values
            .entry(state)
            .or_insert_with(|| vec![0.0; self.actions])
    }

    /// Value of a state-action pair, 0.0 for unseen states.
    pub fn value(&self, state: &StateKey, action: usize) -> f64 {
        self.values
            .get(state)
            .map_or(0.0, |row| row[action])
    }

    /// Maximum action value in a state's row, 0.0 for unseen states.
    pub fn max_value(&self, state: &StateKey) -> f64 {
        self.values.get(state).map_or(0.0, |row| {
            row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        })
    }

    /// Greedy action for a state, ties broken by the first maximal index.
    ///
    /// Unseen states hold an implicit all-zero row, so they resolve to
    /// action 0.
    pub fn greedy_action(&self, state: &StateKey) -> usize {
        let Some(row) = self.values.get(state) else {
            return 0;
        };
        let mut best_action = 0;
        let mut best_value = row[0];
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > best_value {
                best_action = action;
                best_value = value;
            }
        }
        best_action
    }

    /// Number of states with a materialized row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no state has been touched yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all materialized rows.
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &[f64])> {
        self.values.iter().map(|(key, row)| (key, row.as_slice()))
    }
}
