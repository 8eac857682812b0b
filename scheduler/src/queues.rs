//! The ready and wait queues.
//!
//! Both queues hold plain [`NodeId`] handles. Entries whose process has
//! been terminated are left in place and dropped lazily, the next time a
//! traversal walks over them.

use std::collections::VecDeque;

use tracing::trace;

use crate::tree::{NodeId, ProcessNode, ProcessTree};

#[derive(Clone, Debug, Default)]
pub struct SchedulingQueues {
    ready: VecDeque<NodeId>,
    wait: VecDeque<NodeId>,
}

impl SchedulingQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to the tail of the ready queue.
    pub fn push_ready(&mut self, id: NodeId) {
        self.ready.push_back(id);
    }

    /// Pops the first live process of the ready queue, dropping the
    /// terminated entries in front of it.
    pub fn pop_ready(&mut self, tree: &ProcessTree) -> Option<NodeId> {
        while let Some(id) = self.ready.pop_front() {
            if tree.contains(id) {
                return Some(id);
            }
            trace!(?id, "dropped terminated entry from the ready queue");
        }
        None
    }

    /// Appends `id` to the tail of the wait queue.
    pub fn park(&mut self, id: NodeId) {
        self.wait.push_back(id);
    }

    /// Removes and returns the first live process of the wait queue that
    /// waits for `event`.
    ///
    /// Terminated entries met before the match are dropped. At most one
    /// process is removed.
    pub fn wake(&mut self, tree: &ProcessTree, event: usize) -> Option<NodeId> {
        let mut index = 0;
        while index < self.wait.len() {
            let id = self.wait[index];
            match tree.get(id) {
                None => {
                    trace!(?id, "dropped terminated entry from the wait queue");
                    self.wait.remove(index);
                }
                Some(node) if node.waiting_on() == Some(event) => {
                    self.wait.remove(index);
                    return Some(id);
                }
                Some(_) => index += 1,
            }
        }
        None
    }

    /// The live processes of the ready queue, head first.
    pub fn ready<'a>(
        &'a self,
        tree: &'a ProcessTree,
    ) -> impl Iterator<Item = &'a ProcessNode> + 'a {
        self.ready.iter().filter_map(|id| tree.get(*id))
    }

    /// The live processes of the wait queue, head first.
    pub fn waiting<'a>(
        &'a self,
        tree: &'a ProcessTree,
    ) -> impl Iterator<Item = &'a ProcessNode> + 'a {
        self.wait.iter().filter_map(|id| tree.get(*id))
    }

    /// The number of entries, terminated ones included, of the ready and wait queues.
    pub fn entries(&self) -> (usize, usize) {
        (self.ready.len(), self.wait.len())
    }
}
