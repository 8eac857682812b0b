use core::module_path;
use function_name::named;
use pretty_assertions::assert_eq;
use processor::Processor;

use super::{run, scheduler};

#[test]
#[named]
pub fn skip_bad_lines() {
    let logs = Processor::run(
        scheduler(),
        ["C 1 3", "C 2", "Z 4", "", "D -1", "C 1 4", "C 0 4", "I", "X"],
    );

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}

#[test]
pub fn invalid_utf8_line_is_skipped() {
    let script = b"C 1 3\nI \xff\nI\nX\n";
    let logs = Processor::run(scheduler(), crate::script_lines(script));

    assert_eq!(logs, Processor::run(scheduler(), ["C 1 3", "I", "X"]));
}
