use core::module_path;
use function_name::named;
use processor::Processor;

use super::{run, scheduler};

#[test]
#[named]
pub fn single_process() {
    let logs = Processor::run(scheduler(), ["C 1 4", "I", "I", "I", "I", "X"]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}

#[test]
#[named]
pub fn preempt_and_terminate() {
    let logs = Processor::run(
        scheduler(),
        ["C 1 5", "C 2 2", "I", "I", "I", "I", "I", "I", "I", "X"],
    );

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}

#[test]
#[named]
pub fn three_siblings() {
    let mut script = vec!["C 1 6", "C 2 6", "C 3 6"];
    script.extend(["I"; 16]);
    script.push("X");
    let logs = Processor::run(scheduler(), script);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}

#[test]
#[named]
pub fn no_halt() {
    let logs = Processor::run(scheduler(), ["C 1 2", "I"]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}
