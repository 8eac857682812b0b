//! A scheduler library.
//!
//! This library simulates a round robin scheduler over a tree of
//! processes. Every process is created as a child of the running
//! process and owns its children: terminating a process terminates
//! its whole subtree. The idle process (PID 0) is the root of the
//! tree and runs whenever no other process is ready.
//!

use std::num::NonZeroUsize;

mod error;
mod queues;
mod scheduler;
mod tree;

pub use crate::error::ActionError;
pub use crate::queues::SchedulingQueues;
pub use crate::scheduler::{
    Action, Event, Pid, ProcessInfo, ProcessState, Queue, Scheduler, Snapshot,
};
pub use crate::tree::{NodeId, ProcessNode, ProcessTree};
pub use schedulers::RoundRobin;

mod schedulers;

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `timeslice` - the time quanta that a process can run before it is preempted
///                 and placed at the tail of the ready queue.
pub fn round_robin(timeslice: NonZeroUsize) -> impl Scheduler {
    RoundRobin::new(timeslice)
}
