use std::fmt::{self, Display};

/// The PID of a process
///
/// PID 0 is reserved for the idle process, user processes may use
/// any other value.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    /// The PID of the idle process, the root of the process tree.
    pub const IDLE: Pid = Pid(0);

    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn is_idle(&self) -> bool {
        *self == Pid::IDLE
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An action read from the script, issued on behalf of the running process.
///
/// This is passed to the [`Scheduler::step`] function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a child of the running process and place it on the ready queue.
    Create {
        /// The PID of the new process, must not belong to a live process.
        pid: Pid,
        /// The total amount of work of the new process.
        burst: usize,
    },

    /// Terminate the process with PID `pid` together with all its
    /// descendants, if the running process owns it.
    Destroy { pid: Pid },

    /// Park the running process until `event` is signaled.
    Wait { event: usize },

    /// Wake the first process waiting for `event`.
    Signal { event: usize },

    /// Let one unit of time pass.
    Idle,

    /// Stop the simulation.
    Halt,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create { pid, burst } => write!(f, "C {} {}", pid, burst),
            Action::Destroy { pid } => write!(f, "D {}", pid),
            Action::Wait { event } => write!(f, "W {}", event),
            Action::Signal { event } => write!(f, "E {}", event),
            Action::Idle => write!(f, "I"),
            Action::Halt => write!(f, "X"),
        }
    }
}

/// The state of a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The idle process, it runs whenever no other process is ready.
    Idle,

    /// The process is currently scheduled.
    Running,

    /// The process is ready to be scheduled.
    Ready,

    /// The process is parked on the wait queue.
    Waiting {
        /// The event that the process is waiting for.
        event: usize,
    },
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Idle => write!(f, "IDLE"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Waiting { event } => write!(f, "EVENT {}", event),
        }
    }
}

/// A copy of the scheduling information of a process, taken at the
/// moment an [`Event`] or a [`Snapshot`] was produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProcessInfo {
    /// The PID of the process.
    pub pid: Pid,

    /// The amount of work the process still has to do.
    pub remaining_burst: usize,

    /// The time left in the current quantum, only present for
    /// the running process.
    pub remaining_quantum: Option<usize>,

    /// The process state.
    pub state: ProcessState,
}

impl ProcessInfo {
    /// The information of the idle process.
    pub fn idle() -> ProcessInfo {
        ProcessInfo {
            pid: Pid::IDLE,
            remaining_burst: 0,
            remaining_quantum: None,
            state: ProcessState::Idle,
        }
    }
}

impl Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.pid.is_idle() {
            write!(f, "PID {}", self.pid)
        } else {
            write!(f, "PID {} {}", self.pid, self.remaining_burst)
        }
    }
}

/// The queues a process can be placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Queue {
    Ready,
    Wait,
}

impl Display for Queue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Queue::Ready => write!(f, "Ready Queue"),
            Queue::Wait => write!(f, "Wait Queue"),
        }
    }
}

/// Something that happened to a process during a step.
///
/// These are returned by [`Scheduler::step`] in the order they happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The process was appended to the tail of a queue.
    Enqueued { process: ProcessInfo, queue: Queue },

    /// The process was removed from the process tree.
    Terminated(ProcessInfo),
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Enqueued { process, queue } => write!(f, "{} placed on {}", process, queue),
            Event::Terminated(process) => write!(f, "{} terminated", process),
        }
    }
}

/// The state of the scheduler between two steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// The running process, the idle process if nothing else runs.
    pub running: ProcessInfo,

    /// The live processes of the ready queue, head first.
    pub ready: Vec<ProcessInfo>,

    /// The live processes of the wait queue, head first.
    pub waiting: Vec<ProcessInfo>,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} running", self.running)?;
        if let Some(quantum) = self.running.remaining_quantum {
            write!(f, " with {} left", quantum)?;
        }
        writeln!(f)?;
        write!(f, "{}: ", Queue::Ready)?;
        write_queue(f, &self.ready)?;
        writeln!(f)?;
        write!(f, "{}: ", Queue::Wait)?;
        write_queue(f, &self.waiting)
    }
}

fn write_queue(f: &mut fmt::Formatter<'_>, processes: &[ProcessInfo]) -> fmt::Result {
    if processes.is_empty() {
        return write!(f, "(empty)");
    }
    for (index, process) in processes.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", process)?;
        if let ProcessState::Waiting { event } = process.state {
            write!(f, " on {}", event)?;
        }
    }
    Ok(())
}

/// The trait that any scheduler has to implement.
pub trait Scheduler {
    /// Runs one unit of time on behalf of `action` and returns the
    /// events produced along the way.
    ///
    /// Once [`Action::Halt`] has been processed, the scheduler ignores
    /// every following action.
    fn step(&mut self, action: Action) -> Vec<Event>;

    /// Returns the current state of the scheduler.
    fn snapshot(&self) -> Snapshot;

    /// Returns whether the scheduler has processed [`Action::Halt`].
    fn is_halted(&self) -> bool;
}
