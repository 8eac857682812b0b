use core::module_path;
use function_name::named;
use processor::Processor;

use super::{run, scheduler};

#[test]
#[named]
pub fn cascade() {
    let logs = Processor::run(
        scheduler(),
        [
            "C 1 10", "C 2 10", "C 3 10", "I", "C 4 10", "I", "I", "I", "I", "I", "D 1", "I", "X",
        ],
    );

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}

#[test]
#[named]
pub fn not_owned() {
    let logs = Processor::run(
        scheduler(),
        ["C 1 10", "C 2 10", "C 99 10", "I", "D 99", "D 1", "X"],
    );

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}

#[test]
#[named]
pub fn waiting_child() {
    let logs = Processor::run(
        scheduler(),
        ["C 1 10", "C 2 10", "I", "I", "W 5", "D 2", "E 5", "X"],
    );

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}
