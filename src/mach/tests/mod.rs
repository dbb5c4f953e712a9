use crate::mach::{compile, Event, Runtime};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod control_test;

fn runtime(body: &str) -> Runtime {
    let source = format!("program \"test\"; begin {{\n{}\n}} end\n", body);
    let (prog, labels) = compile(&source).unwrap();
    Runtime::new(prog, labels, StdRng::seed_from_u64(7))
}

fn run(runtime: &mut Runtime) -> String {
    run_cycles(runtime, 5000)
}

fn run_cycles(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) => {
                s.push_str(&format!("{}\n", error));
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} execution cycles exceeded\n", cycles));
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(&ps);
            }
            Event::Input => {
                break;
            }
        }
        match event {
            Event::Running => prev_running = true,
            _ => prev_running = false,
        }
    }
    s
}
