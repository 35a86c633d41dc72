//! Undo/redo timeline of committed states

use std::collections::VecDeque;

/// Linear undo/redo history.
///
/// `past` is oldest first, `future` is nearest first. `present` always holds
/// the most recently committed (or navigated-to) state.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStore<S> {
    past: Vec<S>,
    present: S,
    future: VecDeque<S>,
    limit: Option<usize>,
}

impl<S: PartialEq> HistoryStore<S> {
    pub fn new(seed: S) -> Self {
        Self {
            past: Vec::new(),
            present: seed,
            future: VecDeque::new(),
            limit: None,
        }
    }

    /// Create a store whose `past` never grows beyond `limit` entries.
    /// The oldest entries are dropped first.
    pub fn with_limit(seed: S, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new(seed)
        }
    }

    /// Push `next` as the new present (clears redo).
    ///
    /// Committing a value equal to the present is a no-op. Returns whether
    /// the store changed.
    pub fn commit(&mut self, next: S) -> bool {
        if next == self.present {
            return false;
        }
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
        if let Some(limit) = self.limit {
            let overflow = self.past.len().saturating_sub(limit);
            self.past.drain(..overflow);
        }
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    /// Discard all history and start over from `seed`
    pub fn reset(&mut self, seed: S) {
        self.past.clear();
        self.future.clear();
        self.present = seed;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn present(&self) -> &S {
        &self.present
    }

    pub fn past(&self) -> &[S] {
        &self.past
    }

    /// Future states, nearest first
    pub fn future(&self) -> impl Iterator<Item = &S> {
        self.future.iter()
    }
}
