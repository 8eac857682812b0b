//! The process hierarchy.
//!
//! Processes live in an arena and are addressed by [`NodeId`] handles.
//! A process owns the handles stored in its `children` list; every other
//! handle (the parent link, queue entries, the running slot) is a plain
//! reference that may outlive its target. Looking up such a handle simply
//! returns [`None`] once the target is gone. Handles are never reused, so
//! a stale handle can never alias a newer process.

use crate::error::ActionError;
use crate::{Pid, ProcessInfo, ProcessState};

/// A stable handle to a process of a [`ProcessTree`].
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub struct NodeId(usize);

/// A process of the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessNode {
    pid: Pid,
    remaining_burst: usize,
    remaining_quantum: usize,
    waiting: Option<usize>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl ProcessNode {
    fn new(pid: Pid, burst: usize, parent: Option<NodeId>) -> Self {
        ProcessNode {
            pid,
            remaining_burst: burst,
            remaining_quantum: 0,
            waiting: None,
            children: Vec::new(),
            parent,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn remaining_burst(&self) -> usize {
        self.remaining_burst
    }

    pub fn remaining_quantum(&self) -> usize {
        self.remaining_quantum
    }

    /// The event this process is parked on, if any.
    pub fn waiting_on(&self) -> Option<usize> {
        self.waiting
    }

    /// The children of this process, in creation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_idle(&self) -> bool {
        self.pid.is_idle()
    }

    /// Whether the process has no work left and has to be terminated.
    ///
    /// The idle process never finishes.
    pub fn is_exiting(&self) -> bool {
        !self.is_idle() && self.remaining_burst == 0
    }

    pub fn quantum_expired(&self) -> bool {
        !self.is_idle() && self.remaining_quantum == 0
    }

    /// Execute one unit of time.
    pub(crate) fn tick(&mut self) {
        if self.is_idle() {
            return;
        }
        self.remaining_burst = self.remaining_burst.saturating_sub(1);
        self.remaining_quantum = self.remaining_quantum.saturating_sub(1);
    }

    pub(crate) fn set_quantum(&mut self, quantum: usize) {
        if !self.is_idle() {
            self.remaining_quantum = quantum;
        }
    }

    pub(crate) fn wait_on(&mut self, event: usize) {
        self.waiting = Some(event);
    }

    pub(crate) fn wake(&mut self) {
        self.waiting = None;
    }

    /// A copy of the scheduling information of this process in `state`.
    pub fn info(&self, state: ProcessState) -> ProcessInfo {
        let remaining_quantum = match state {
            ProcessState::Running => Some(self.remaining_quantum),
            _ => None,
        };
        ProcessInfo {
            pid: self.pid,
            remaining_burst: self.remaining_burst,
            remaining_quantum,
            state,
        }
    }
}

/// The tree of processes, rooted at the idle process.
#[derive(Clone, Debug)]
pub struct ProcessTree {
    nodes: Vec<Option<ProcessNode>>,
    live: usize,
}

impl Default for ProcessTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTree {
    /// Creates a tree that only holds the idle process.
    pub fn new() -> Self {
        ProcessTree {
            nodes: vec![Some(ProcessNode::new(Pid::IDLE, 0, None))],
            live: 1,
        }
    }

    /// The handle of the idle process.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&ProcessNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut ProcessNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// The number of live processes, the idle process included.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the idle process is the only live process.
    pub fn is_empty(&self) -> bool {
        self.live == 1
    }

    /// Appends a new process with `pid` and `burst` to the children of `parent`.
    ///
    /// Fails if `parent` is gone or exiting, or if `pid` is reserved or
    /// already used by a live process.
    pub fn create_child(
        &mut self,
        parent: NodeId,
        pid: Pid,
        burst: usize,
    ) -> Result<NodeId, ActionError> {
        let parent_node = self.get(parent).ok_or(ActionError::ParentTerminated)?;
        if parent_node.is_exiting() {
            return Err(ActionError::ParentExiting(parent_node.pid()));
        }
        if pid.is_idle() {
            return Err(ActionError::ReservedPid(pid));
        }
        if self.find_by_pid(self.root(), pid).is_some() {
            return Err(ActionError::DuplicatePid(pid));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(ProcessNode::new(pid, burst, Some(parent))));
        self.live += 1;
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(id);
        }
        Ok(id)
    }

    /// Removes `id` and all its descendants from the tree.
    ///
    /// Returns the removed processes in pre-order, the process itself
    /// first. Terminating the idle process or a process that is already
    /// gone does nothing.
    pub fn cascading_terminate(&mut self, id: NodeId) -> Vec<ProcessNode> {
        if id == self.root() {
            return Vec::new();
        }
        let Some(parent) = self.get(id).map(ProcessNode::parent) else {
            return Vec::new();
        };
        if let Some(parent) = parent.and_then(|parent| self.get_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }

        let mut subtree = Vec::new();
        self.for_each_descendant(id, |child, _| subtree.push(child));

        let mut removed = Vec::with_capacity(subtree.len());
        for child in subtree {
            if let Some(node) = self.nodes[child.0].take() {
                self.live -= 1;
                removed.push(node);
            }
        }
        removed
    }

    /// Whether `pid` is the PID of `ancestor` or of one of its descendants.
    pub fn owns(&self, ancestor: NodeId, pid: Pid) -> bool {
        self.find_by_pid(ancestor, pid).is_some()
    }

    /// Searches the subtree of `root` in pre-order for `pid`.
    pub fn find_by_pid(&self, root: NodeId, pid: Pid) -> Option<NodeId> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            if node.pid == pid {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Visits `root` and all its descendants in pre-order.
    pub fn for_each_descendant<F>(&self, root: NodeId, mut visit: F)
    where
        F: FnMut(NodeId, &ProcessNode),
    {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            visit(id, node);
            stack.extend(node.children.iter().rev());
        }
    }
}
