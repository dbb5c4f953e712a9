/*!
## Terminal Module

Reads a script file, compiles it and runs it against standard
input and output. Diagnostics go to standard error in bold.

*/

extern crate ansi_term;
extern crate ctrlc;
use crate::error;
use crate::lang::Error;
use crate::mach::{compile, Event, Runtime};
use ansi_term::Style;
use chrono::Utc;
use clap::{value_parser, Arg, ArgAction, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const CYCLES: usize = 5000;

/// Ctrl-C state shared with the signal handler. A running script is
/// stopped between execution slices. A blocked `scan` cannot be, so the
/// handler ends the process itself while a read is pending.
#[derive(Default)]
struct Interrupt {
    requested: AtomicBool,
    reading: AtomicBool,
}

impl Interrupt {
    /// Returns true when the process must exit now.
    fn signal(&self) -> bool {
        if self.reading.load(Ordering::SeqCst) {
            return true;
        }
        self.requested.store(true, Ordering::SeqCst);
        false
    }

    fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }

    fn reading(&self, reading: bool) {
        self.reading.store(reading, Ordering::SeqCst);
    }
}

struct Options {
    script: PathBuf,
    seed: Option<u64>,
    listing: bool,
}

pub fn main() {
    let options = match options() {
        Ok(options) => options,
        Err(error) => {
            let code = if error.use_stderr() { 1 } else { 0 };
            let _ = error.print();
            std::process::exit(code);
        }
    };
    let interrupted = Arc::new(Interrupt::default());
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        if int_moved.signal() {
            report(&error!(Interrupted, "scan").to_string());
            std::process::exit(1);
        }
    }) {
        report(&format!("cannot set Ctrl-C handler: {}", error));
    }
    std::process::exit(run(&options, &interrupted));
}

fn options() -> Result<Options, clap::Error> {
    let matches = Command::new("rpn")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("script")
                .help("The script to run")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for ?rand instead of the clock")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("listing")
                .long("listing")
                .help("Print the compiled program before running it")
                .action(ArgAction::SetTrue),
        )
        .try_get_matches()?;
    Ok(Options {
        script: matches
            .get_one::<PathBuf>("script")
            .cloned()
            .unwrap_or_default(),
        seed: matches.get_one::<u64>("seed").copied(),
        listing: matches.get_flag("listing"),
    })
}

/// Returns the process exit code.
fn run(options: &Options, interrupted: &Interrupt) -> i32 {
    let source = match std::fs::read_to_string(&options.script) {
        Ok(source) => source,
        Err(error) => {
            report(&format!("{}: {}", options.script.display(), error));
            return 1;
        }
    };
    let (prog, labels) = match compile(&source) {
        Ok(compiled) => compiled,
        Err(error) => {
            report_compile(&error, &options.script);
            return 1;
        }
    };
    if options.listing {
        eprint!("{}", prog);
    }
    let seed = options
        .seed
        .unwrap_or_else(|| Utc::now().timestamp_millis() as u64);
    let mut runtime = Runtime::new(prog, labels, StdRng::seed_from_u64(seed));
    match main_loop(&mut runtime, interrupted) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            report(&error.to_string());
            1
        }
    }
}

/// Drives the runtime until it stops. `Ok(false)` means the script failed.
fn main_loop(runtime: &mut Runtime, interrupted: &Interrupt) -> std::io::Result<bool> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    loop {
        if interrupted.take() {
            runtime.interrupt();
        }
        match runtime.execute(CYCLES) {
            Event::Stopped => {
                out.flush()?;
                return Ok(true);
            }
            Event::Running => {}
            Event::Print(s) => out.write_all(s.as_bytes())?,
            Event::Input => {
                out.flush()?;
                let mut line = String::new();
                interrupted.reading(true);
                let read = stdin.lock().read_line(&mut line);
                interrupted.reading(false);
                match read {
                    Ok(0) => runtime.abort(error!(InputError, "scan"; "end of input")),
                    Ok(_) => runtime.enter(&line),
                    Err(e) => runtime.abort(error!(InputError, "scan"; e.to_string())),
                }
            }
            Event::Error(error) => {
                out.flush()?;
                report(&error.to_string());
                return Ok(false);
            }
        }
    }
}

fn report(message: &str) {
    eprintln!("{}", Style::new().bold().paint(message));
}

/// Echo the offending line of the script beneath the diagnostic.
fn report_compile(error: &Error, path: &Path) {
    report(&error.to_string());
    if let Some(line) = error.line_number().and_then(|n| source_line(path, n)) {
        eprintln!("    {}", line.trim_end());
    }
}

fn source_line(path: &Path, line_number: usize) -> Option<String> {
    let source = std::fs::read_to_string(path).ok()?;
    source
        .lines()
        .nth(line_number.checked_sub(1)?)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_while_running() {
        let interrupt = Interrupt::default();
        assert!(!interrupt.take());
        assert!(!interrupt.signal());
        assert!(interrupt.take());
        assert!(!interrupt.take());
    }

    #[test]
    fn test_interrupt_while_reading() {
        let interrupt = Interrupt::default();
        interrupt.reading(true);
        assert!(interrupt.signal());
        interrupt.reading(false);
        assert!(!interrupt.signal());
    }
}
