use scheduler::round_robin;
use scheduler::Scheduler;

use std::env;
use std::fs;

use processor::format_logs;
use processor::Log;
use std::num::NonZeroUsize;

mod destroy;
mod malformed;
mod simple;

static SCHEDULER: &str = "round-robin";

fn write_logs(folder: &str, name: &str, logs: &str) {
    let quantum = quantum();
    fs::create_dir_all(format!("../outputs/{SCHEDULER}/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"),
        logs,
    )
    .unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let quantum = quantum();
    fs::read_to_string(format!(
        "../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"
    ))
    .unwrap()
}

fn run(folder: &str, name: &str, logs: &[Log]) {
    let output = format_logs(logs);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn quantum() -> usize {
    env::var("QUANTUM")
        .unwrap_or("3".to_string())
        .parse::<usize>()
        .unwrap()
}

fn scheduler() -> impl Scheduler {
    let quantum = quantum();

    println!("Quantum {quantum}");
    round_robin(NonZeroUsize::new(quantum).unwrap())
}
