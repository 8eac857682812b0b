use scheduler::{Action, Pid};
use thiserror::Error;

/// The reason a script line could not be turned into an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("unknown action `{0}`")]
    UnknownVerb(String),

    #[error("`{verb}` expects {expected} argument(s), found {found}")]
    Arity {
        verb: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("`{verb}` expects a non-negative integer, found `{token}`")]
    NotANumber { verb: &'static str, token: String },
}

/// Parses one line of the script.
///
/// A line is a verb followed by its arguments, separated by whitespace:
///
/// | Verb | Arguments |
/// |------|-----------|
/// | `C`  | pid, burst |
/// | `D`  | pid |
/// | `W`  | event |
/// | `E`  | event |
/// | `I`  | |
/// | `X`  | |
///
/// ## Example
///
/// ```rust
/// use processor::parse_action;
/// use scheduler::{Action, Pid};
///
/// assert_eq!(
///     parse_action("C 1 5"),
///     Ok(Action::Create { pid: Pid::new(1), burst: 5 })
/// );
/// ```
pub fn parse_action(line: &str) -> Result<Action, ParseError> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().ok_or(ParseError::Empty)?;
    let args: Vec<&str> = tokens.collect();

    match verb {
        "C" => {
            let [pid, burst] = arguments::<2>("C", &args)?;
            Ok(Action::Create {
                pid: Pid::new(pid),
                burst,
            })
        }
        "D" => {
            let [pid] = arguments::<1>("D", &args)?;
            Ok(Action::Destroy { pid: Pid::new(pid) })
        }
        "W" => {
            let [event] = arguments::<1>("W", &args)?;
            Ok(Action::Wait { event })
        }
        "E" => {
            let [event] = arguments::<1>("E", &args)?;
            Ok(Action::Signal { event })
        }
        "I" => {
            let [] = arguments::<0>("I", &args)?;
            Ok(Action::Idle)
        }
        "X" => {
            let [] = arguments::<0>("X", &args)?;
            Ok(Action::Halt)
        }
        other => Err(ParseError::UnknownVerb(other.to_string())),
    }
}

fn arguments<const N: usize>(verb: &'static str, args: &[&str]) -> Result<[usize; N], ParseError> {
    if args.len() != N {
        return Err(ParseError::Arity {
            verb,
            expected: N,
            found: args.len(),
        });
    }
    let mut values = [0; N];
    for (value, token) in values.iter_mut().zip(args) {
        *value = number(verb, token)?;
    }
    Ok(values)
}

/// Only plain decimal digits are accepted, `+1` or `-1` are not numbers here.
fn number(verb: &'static str, token: &str) -> Result<usize, ParseError> {
    let not_a_number = || ParseError::NotANumber {
        verb,
        token: token.to_string(),
    };
    if !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(not_a_number());
    }
    token.parse().map_err(|_| not_a_number())
}
