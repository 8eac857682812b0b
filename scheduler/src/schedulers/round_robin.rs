use std::num::NonZeroUsize;

use tracing::{debug, warn};

use crate::error::ActionError;
use crate::queues::SchedulingQueues;
use crate::tree::{NodeId, ProcessNode, ProcessTree};
use crate::{Action, Event, Pid, ProcessInfo, ProcessState, Queue, Scheduler, Snapshot};

/// A round robin scheduler over a tree of processes.
///
/// Each step advances the running process by one unit of time, carries
/// out the action and then decides which process runs next.
pub struct RoundRobin {
    tree: ProcessTree,
    queues: SchedulingQueues,
    current: NodeId,
    timeslice: NonZeroUsize,
    events: Vec<Event>,
    halted: bool,
}

impl RoundRobin {
    pub fn new(timeslice: NonZeroUsize) -> Self {
        let tree = ProcessTree::new();
        let current = tree.root();
        RoundRobin {
            tree,
            queues: SchedulingQueues::new(),
            current,
            timeslice,
            events: Vec::new(),
            halted: false,
        }
    }

    /// The process tree, rooted at the idle process.
    pub fn tree(&self) -> &ProcessTree {
        &self.tree
    }

    /// The handle of the running process.
    pub fn current(&self) -> NodeId {
        self.current
    }

    fn running(&self) -> Option<&ProcessNode> {
        self.tree.get(self.current)
    }

    fn dispatch(&mut self, action: Action) -> Result<(), ActionError> {
        match action {
            Action::Create { pid, burst } => self.create_process(pid, burst),
            Action::Destroy { pid } => self.destroy_by_pid(pid),
            Action::Wait { event } => self.wait_for_event(event),
            Action::Signal { event } => self.signal_event(event),
            Action::Idle | Action::Halt => Ok(()),
        }
    }

    fn create_process(&mut self, pid: Pid, burst: usize) -> Result<(), ActionError> {
        let child = self.tree.create_child(self.current, pid, burst)?;
        debug!(%pid, burst, "created process");
        if burst == 0 {
            self.terminate(child);
        } else {
            self.ready_enqueue(child);
        }
        Ok(())
    }

    fn destroy_by_pid(&mut self, pid: Pid) -> Result<(), ActionError> {
        let requester = self.running().ok_or(ActionError::NoRunningProcess)?;
        if requester.is_exiting() {
            return Err(ActionError::RequesterExiting(requester.pid()));
        }
        if !self.tree.owns(self.current, pid) {
            return Err(ActionError::Unauthorized {
                requester: requester.pid(),
                target: pid,
            });
        }

        let target = self
            .tree
            .find_by_pid(self.tree.root(), pid)
            .ok_or(ActionError::UnknownPid(pid))?;
        self.terminate(target);
        Ok(())
    }

    fn wait_for_event(&mut self, event: usize) -> Result<(), ActionError> {
        let current = self.current;
        let process = self
            .tree
            .get_mut(current)
            .ok_or(ActionError::NoRunningProcess)?;
        if process.is_idle() {
            return Err(ActionError::NoRunningProcess);
        }
        if process.is_exiting() {
            return Err(ActionError::RequesterExiting(process.pid()));
        }

        process.wait_on(event);
        let info = process.info(ProcessState::Waiting { event });
        debug!(pid = %info.pid, event, "process waits for event");
        self.queues.park(current);
        self.events.push(Event::Enqueued {
            process: info,
            queue: Queue::Wait,
        });

        // The idle process holds the slot until the next reconciliation.
        self.current = self.tree.root();
        Ok(())
    }

    fn signal_event(&mut self, event: usize) -> Result<(), ActionError> {
        let woken = self
            .queues
            .wake(&self.tree, event)
            .ok_or(ActionError::NoWaiter(event))?;
        if let Some(process) = self.tree.get_mut(woken) {
            process.wake();
            debug!(pid = %process.pid(), event, "woke process");
        }
        self.ready_enqueue(woken);
        Ok(())
    }

    fn ready_enqueue(&mut self, id: NodeId) {
        if let Some(process) = self.tree.get(id) {
            self.events.push(Event::Enqueued {
                process: process.info(ProcessState::Ready),
                queue: Queue::Ready,
            });
            self.queues.push_ready(id);
        }
    }

    /// Removes `id` with its whole subtree and reports every removed process.
    fn terminate(&mut self, id: NodeId) {
        let running = self.running().map(ProcessNode::pid);
        for process in self.tree.cascading_terminate(id) {
            debug!(pid = %process.pid(), "terminated process");
            let state = match process.waiting_on() {
                _ if Some(process.pid()) == running => ProcessState::Running,
                Some(event) => ProcessState::Waiting { event },
                None => ProcessState::Ready,
            };
            self.events.push(Event::Terminated(process.info(state)));
        }
        if !self.tree.contains(self.current) {
            self.current = self.tree.root();
        }
    }

    /// Selects the next process to run, the idle process if the ready
    /// queue has no live entry.
    fn switch(&mut self) {
        self.current = self
            .queues
            .pop_ready(&self.tree)
            .unwrap_or_else(|| self.tree.root());
        let quantum = self.timeslice.get();
        if let Some(process) = self.tree.get_mut(self.current) {
            process.set_quantum(quantum);
            if !process.is_idle() {
                debug!(pid = %process.pid(), quantum, "running process");
            }
        }
    }

    fn update_current_process(&mut self) {
        let Some(process) = self.running() else {
            self.switch();
            return;
        };

        if process.is_idle() {
            self.switch();
        } else if process.is_exiting() {
            self.terminate(self.current);
            self.switch();
        } else if process.quantum_expired() {
            debug!(pid = %process.pid(), "quantum expired");
            self.ready_enqueue(self.current);
            self.switch();
        }
    }
}

impl Scheduler for RoundRobin {
    fn step(&mut self, action: Action) -> Vec<Event> {
        if self.halted {
            warn!(%action, "scheduler has halted, ignoring action");
            return Vec::new();
        }
        if action == Action::Halt {
            debug!("halting");
            self.halted = true;
            return Vec::new();
        }

        if let Some(process) = self.tree.get_mut(self.current) {
            process.tick();
        }

        if let Err(err) = self.dispatch(action) {
            debug!(%action, %err, "action ignored");
        }

        self.update_current_process();
        std::mem::take(&mut self.events)
    }

    fn snapshot(&self) -> Snapshot {
        let running = match self.running() {
            Some(process) if !process.is_idle() => process.info(ProcessState::Running),
            _ => ProcessInfo::idle(),
        };
        let ready = self
            .queues
            .ready(&self.tree)
            .map(|process| process.info(ProcessState::Ready))
            .collect();
        let waiting = self
            .queues
            .waiting(&self.tree)
            .map(|process| {
                let event = process.waiting_on().unwrap_or_default();
                process.info(ProcessState::Waiting { event })
            })
            .collect();
        Snapshot {
            running,
            ready,
            waiting,
        }
    }

    fn is_halted(&self) -> bool {
        self.halted
    }
}
