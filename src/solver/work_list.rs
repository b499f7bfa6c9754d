use std::collections::{HashSet, VecDeque};

use crate::solver::engine::RelationId;

/// FIFO worklist of relations awaiting a pruning pass.
///
/// Membership is deduplicated: pushing a relation that is already queued is
/// a no-op, so the propagation loop never processes stale duplicates.
pub struct WorkList {
    queue: VecDeque<RelationId>,
    queue_members: HashSet<RelationId>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queue_members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, relation_id: RelationId) {
        if self.queue_members.insert(relation_id) {
            self.queue.push_back(relation_id);
        }
    }

    pub fn pop_front(&mut self) -> Option<RelationId> {
        let relation_id = self.queue.pop_front()?;
        self.queue_members.remove(&relation_id);
        Some(relation_id)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pops_in_insertion_order_without_duplicates() {
        let mut worklist = WorkList::new();
        worklist.push_back(2);
        worklist.push_back(0);
        worklist.push_back(2);
        worklist.push_back(1);

        assert_eq!(worklist.pop_front(), Some(2));
        assert_eq!(worklist.pop_front(), Some(0));
        assert_eq!(worklist.pop_front(), Some(1));
        assert_eq!(worklist.pop_front(), None);
        assert!(worklist.is_empty());
    }

    #[test]
    fn popped_entries_may_be_requeued() {
        let mut worklist = WorkList::new();
        worklist.push_back(0);
        assert_eq!(worklist.pop_front(), Some(0));
        worklist.push_back(0);
        assert_eq!(worklist.pop_front(), Some(0));
    }
}
