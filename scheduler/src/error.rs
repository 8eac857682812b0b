use thiserror::Error;

use crate::Pid;

/// The reason an action was ignored by the scheduler.
///
/// None of these stop the simulation, the step loop logs them and
/// carries on with the reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("PID {0} is reserved for the idle process")]
    ReservedPid(Pid),

    #[error("PID {0} already belongs to a live process")]
    DuplicatePid(Pid),

    #[error("the parent process has been terminated")]
    ParentTerminated,

    #[error("process {0} has exhausted its burst and cannot create children")]
    ParentExiting(Pid),

    #[error("process {0} has exhausted its burst and cannot issue requests")]
    RequesterExiting(Pid),

    #[error("process {requester} does not own process {target}")]
    Unauthorized { requester: Pid, target: Pid },

    #[error("no live process has PID {0}")]
    UnknownPid(Pid),

    #[error("the idle process cannot wait for events")]
    NoRunningProcess,

    #[error("no process is waiting for event {0}")]
    NoWaiter(usize),
}
