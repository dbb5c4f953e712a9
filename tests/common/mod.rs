#![allow(dead_code)]
use rand::rngs::StdRng;
use rand::SeedableRng;
use rpn::mach::{compile, Event, Runtime};

pub fn script(body: &str) -> String {
    format!("program \"test\";\nbegin {{\n{}\n}} end\n", body)
}

/// Runs a script body and returns everything it printed. Errors are
/// appended as text; a compile error means nothing ran.
pub fn exec(body: &str) -> String {
    exec_with_input(body, &[])
}

pub fn exec_with_input(body: &str, input: &[&str]) -> String {
    let (prog, labels) = match compile(&script(body)) {
        Ok(compiled) => compiled,
        Err(error) => return format!("{}\n", error),
    };
    let mut runtime = Runtime::new(prog, labels, StdRng::seed_from_u64(1));
    let mut input = input.iter();
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(5000);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) => {
                s.push_str(&format!("{}\n", error));
            }
            Event::Running => {
                if prev_running {
                    s.push_str("\nexecution cycles exceeded\n");
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(ps);
            }
            Event::Input => match input.next() {
                Some(line) => runtime.enter(line),
                None => {
                    s.push_str("\nwaiting for input\n");
                    break;
                }
            },
        }
        match event {
            Event::Running => prev_running = true,
            _ => prev_running = false,
        }
    }
    s
}
