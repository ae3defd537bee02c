pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Linear undo/redo history of content snapshots.
///
/// `past` holds at most `limit` snapshots, oldest first. `future` holds the
/// snapshots undone since the last edit, next-to-redo first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHistory {
    past: Vec<String>,
    future: Vec<String>,
    limit: usize,
}

impl Default for ContentHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl ContentHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn past(&self) -> &[String] {
        &self.past
    }

    pub fn future(&self) -> &[String] {
        &self.future
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Records an edit: `snapshot` becomes the newest past entry and the redo
    /// branch is discarded.
    pub fn record(&mut self, snapshot: String) {
        self.push_past(snapshot);
        self.future.clear();
    }

    /// Pops the newest past snapshot, parking `current` at the front of the
    /// redo list. Returns `None` (and changes nothing) when there is nothing
    /// to undo.
    pub fn undo(&mut self, current: String) -> Option<String> {
        let previous = self.past.pop()?;
        self.future.insert(0, current);
        Some(previous)
    }

    /// Takes the first redo snapshot, pushing `current` back onto the past.
    pub fn redo(&mut self, current: String) -> Option<String> {
        if self.future.is_empty() {
            return None;
        }
        let next = self.future.remove(0);
        self.push_past(current);
        Some(next)
    }

    fn push_past(&mut self, snapshot: String) {
        self.past.push(snapshot);
        if self.past.len() > self.limit {
            let overflow = self.past.len() - self.limit;
            self.past.drain(..overflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_drops_oldest_past_entry() {
        let mut history = ContentHistory::new(3);
        for snapshot in ["a", "b", "c", "d"] {
            history.record(snapshot.to_string());
        }
        assert_eq!(history.past(), ["b", "c", "d"]);
    }

    #[test]
    fn edit_after_undo_discards_redo_branch() {
        let mut history = ContentHistory::new(2);
        history.record("a".into());
        history.record("b".into());
        let undone = history.undo("b".into());
        assert_eq!(undone.as_deref(), Some("b"));
        history.record("c".into());
        assert!(history.future().is_empty());
        assert_eq!(history.past(), ["a", "c"]);
    }

    #[test]
    fn zero_limit_is_clamped() {
        let history = ContentHistory::new(0);
        assert_eq!(history.limit(), 1);
    }
}
