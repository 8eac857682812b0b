//! A processor simulation library
//!
//! This is used for driving a scheduler from the [`scheduler`] crate
//! with a script of actions, one action per line.

use std::fmt::{Display, Write};

use scheduler::{Action, Event, Scheduler, Snapshot};
use tracing::{debug, warn};

mod parse;

pub use parse::{parse_action, ParseError};

/// Running iteration log
#[derive(Debug, Clone, PartialEq)]
pub struct Log {
    /// The action carried out in this iteration, [`None`] for the
    /// initial state.
    pub action: Option<Action>,

    /// What happened to the processes during the iteration.
    pub events: Vec<Event>,

    /// The state of the scheduler at the end of the iteration.
    pub state: Snapshot,
}

impl Log {
    fn new(action: Option<Action>, events: Vec<Event>, state: Snapshot) -> Log {
        Log {
            action,
            events,
            state,
        }
    }
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(action) = self.action {
            writeln!(f, "{}", action)?;
        }
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        if self.action == Some(Action::Halt) {
            writeln!(f, "Current state of simulation:")?;
        }
        writeln!(f, "{}", self.state)
    }
}

/// The processor simulator.
pub struct Processor;

impl Processor {
    /// Runs `scheduler` over the lines of a script until it halts.
    ///
    /// Lines that are not valid actions are reported and skipped, no time
    /// passes for them. If the script ends without a halt action, the
    /// scheduler is halted as if the script ended with `X`.
    ///
    /// The first log holds the initial state, every following log holds
    /// one action.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use std::num::NonZeroUsize;
    ///
    /// let logs = Processor::run(
    ///     scheduler::round_robin(NonZeroUsize::new(3).unwrap()),
    ///     ["C 1 5", "C 2 2", "I", "X"],
    /// );
    /// assert_eq!(logs.len(), 5);
    /// ```
    pub fn run<S, I>(mut scheduler: S, script: I) -> Vec<Log>
    where
        S: Scheduler,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut logs = vec![Log::new(None, Vec::new(), scheduler.snapshot())];

        for (index, line) in script.into_iter().enumerate() {
            let line = line.as_ref();
            let action = match parse_action(line) {
                Ok(action) => action,
                Err(ParseError::Empty) => continue,
                Err(err) => {
                    warn!(line = index + 1, text = %line.trim(), %err, "skipping malformed action");
                    continue;
                }
            };

            debug!(line = index + 1, %action, "processing action");
            let events = scheduler.step(action);
            logs.push(Log::new(Some(action), events, scheduler.snapshot()));
            if scheduler.is_halted() {
                return logs;
            }
        }

        warn!("script ended without a halt action");
        let events = scheduler.step(Action::Halt);
        logs.push(Log::new(Some(Action::Halt), events, scheduler.snapshot()));
        logs
    }
}

/// Format the [`Processor`]'s logs to a [`String`].
///
/// * `logs` - the logs returned by the [`Processor`].
///
/// ## Example
///
/// ```rust
/// use processor::Processor;
/// use std::num::NonZeroUsize;
/// use processor::format_logs;
///
/// let logs = Processor::run(scheduler::round_robin(NonZeroUsize::new(3).unwrap()), ["I", "X"]);
///
/// println!("{}", format_logs(&logs));
/// ```
pub fn format_logs(logs: &[Log]) -> String {
    let mut s = String::new();
    for (iteration, log) in logs.iter().enumerate() {
        writeln!(s, "===== Iteration: {} =====", iteration + 1).unwrap();
        writeln!(s, "{}", log).unwrap();
    }
    s
}
