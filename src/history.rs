//! Linear undo/redo log.
//!
//! The log always holds at least one entry and a cursor pointing at the
//! current one. Committing after an undo drops everything past the cursor, so
//! there is never more than one redo path. Hitting either end of the log is a
//! no-op that returns `None`; callers gate their buttons on [`History::can_undo`]
//! and [`History::can_redo`].

/// Undo/redo log over full snapshots of `T`.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    index: usize,
}

impl<T> History<T> {
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Records `snapshot` as the new current entry, discarding any redo tail.
    pub fn commit(&mut self, snapshot: T) {
        let discarded = self.entries.len() - self.index - 1;
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        self.index += 1;
        log::debug!(
            "history commit: index {} of {} (dropped {} redo entries)",
            self.index,
            self.entries.len(),
            discarded
        );
    }

    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        log::debug!("history undo: index {}", self.index);
        self.entries.get(self.index)
    }

    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        log::debug!("history redo: index {}", self.index);
        self.entries.get(self.index)
    }

    /// Collapses the log to the current entry.
    pub fn clear(&mut self) {
        let current = self.entries.swap_remove(self.index);
        self.entries.clear();
        self.entries.push(current);
        self.index = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true; the log always keeps its current entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_predicates(history: &History<&str>) {
        assert_eq!(history.can_undo(), history.index() > 0);
        assert_eq!(history.can_redo(), history.index() < history.len() - 1);
    }

    #[test]
    fn starts_with_single_entry() {
        let history = History::new("s0");
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert_eq!(*history.current(), "s0");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn commit_after_undo_discards_redo_branch() {
        let mut history = History::new("s0");
        history.commit("s1");
        history.commit("s2");
        history.commit("s3");
        assert_eq!(history.undo().copied(), Some("s2"));
        assert_eq!(history.undo().copied(), Some("s1"));
        history.commit("s4");
        assert_eq!(history.entries(), &["s0", "s1", "s4"]);
        assert_eq!(history.index(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
        assert_eq!(history.index(), 2);
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut history = History::new("s0");
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        history.commit("s1");
        assert_eq!(history.redo(), None);
        assert_eq!(history.undo().copied(), Some("s0"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.index(), 0);
        assert_eq!(history.redo().copied(), Some("s1"));
    }

    #[test]
    fn clear_keeps_only_the_current_entry() {
        let mut history = History::new("s0");
        history.commit("s1");
        history.commit("s2");
        history.undo();
        history.clear();
        assert_eq!(history.entries(), &["s1"]);
        assert_eq!(history.index(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn predicates_track_the_cursor_through_mixed_sequences() {
        #[derive(Clone, Copy)]
        enum Op {
            Commit,
            Undo,
            Redo,
        }
        let script = [
            Op::Undo,
            Op::Commit,
            Op::Commit,
            Op::Redo,
            Op::Undo,
            Op::Undo,
            Op::Undo,
            Op::Redo,
            Op::Commit,
            Op::Redo,
            Op::Undo,
            Op::Commit,
            Op::Commit,
            Op::Undo,
            Op::Redo,
            Op::Redo,
        ];
        let mut history = History::new("s");
        assert_predicates(&history);
        for op in script {
            match op {
                Op::Commit => history.commit("s"),
                Op::Undo => {
                    history.undo();
                }
                Op::Redo => {
                    history.redo();
                }
            }
            assert!(history.index() < history.len());
            assert_predicates(&history);
        }
    }
}
