extern crate ansi_term;
extern crate ctrlc;
use ansi_term::Style;
use clap::{Parser, Subcommand};
use stackvm::error;
use stackvm::lang::Error;
use stackvm::mach::{assemble, Event, Listing, Program, Runtime, MEMORY_SIZE};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

mod monitor;

/// Instructions executed between checks for Ctrl-C.
const CYCLES_PER_SLICE: usize = 5000;

#[derive(Parser, Debug)]
#[command(name = "stackvm")]
#[command(about = "Assemble, run and inspect StackVM programs")]
struct Args {
    /// Trace every executed instruction
    #[arg(long, global = true)]
    trace: bool,

    /// Memory size in 32-bit cells
    #[arg(long, global = true, default_value_t = MEMORY_SIZE)]
    memory: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a program (assembly source, or a .bin image)
    Run {
        path: PathBuf,

        /// Stop after this many instructions
        #[arg(long)]
        cycles: Option<u64>,
    },
    /// Assemble source into a binary image
    Asm {
        path: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the disassembly of a program
    Dis { path: PathBuf },
}

pub fn main() {
    let args = Args::parse();
    init_logging(args.trace);
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        tracing::warn!("Ctrl-C handler not installed: {}", error);
    }
    let code = match args.command {
        None => match monitor::main_loop(interrupted, args.memory) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("{}", error);
                1
            }
        },
        Some(Command::Run { path, cycles }) => run(&path, args.memory, cycles, interrupted),
        Some(Command::Asm { path, output }) => asm(&path, &output),
        Some(Command::Dis { path }) => dis(&path),
    };
    process::exit(code);
}

/// `RUST_LOG` overrides the default filter.
fn init_logging(trace: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if trace {
            EnvFilter::new("warn,stackvm=trace")
        } else {
            EnvFilter::new("warn")
        }
    });
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_errors(errors: &[Error]) {
    for error in errors {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
    }
}

fn run(path: &Path, memory: usize, cycles: Option<u64>, interrupted: Arc<AtomicBool>) -> i32 {
    let program = match load(path) {
        Ok(program) => program,
        Err(errors) => {
            print_errors(&errors);
            return 1;
        }
    };
    let mut runtime = match Runtime::with_capacity(memory) {
        Ok(runtime) => runtime,
        Err(error) => {
            print_errors(&[error]);
            return 1;
        }
    };
    if let Err(error) = runtime.load(program.words()) {
        print_errors(&[error]);
        return 1;
    }
    let code = loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            println!("BREAK AT {}", runtime.pc());
            break 130;
        }
        let slice = match cycles {
            Some(limit) => {
                let left = limit.saturating_sub(runtime.cycles());
                if left == 0 {
                    println!("{} EXECUTION CYCLES EXCEEDED", limit);
                    break 2;
                }
                left.min(CYCLES_PER_SLICE as u64) as usize
            }
            None => CYCLES_PER_SLICE,
        };
        match runtime.execute(slice) {
            Event::Running => continue,
            Event::Halted => break 0,
            Event::Fault(error) => {
                print_errors(&[error]);
                break 1;
            }
        }
    };
    match runtime.top() {
        Some(top) => println!("TOP OF STACK: {}", top),
        None => println!("EMPTY STACK"),
    }
    runtime.destroy();
    code
}

fn asm(path: &Path, output: &Path) -> i32 {
    let program = match load(path) {
        Ok(program) => program,
        Err(errors) => {
            print_errors(&errors);
            return 1;
        }
    };
    if let Err(error) = fs::write(output, program.to_bytes()) {
        print_errors(&[error!(InternalError; error.to_string())]);
        return 1;
    }
    println!(
        "{} WORDS, CRC32 {:08X}",
        program.len(),
        program.checksum()
    );
    0
}

fn dis(path: &Path) -> i32 {
    match load(path) {
        Ok(program) => {
            print!("{}", Listing::new(program.words()));
            0
        }
        Err(errors) => {
            print_errors(&errors);
            1
        }
    }
}

/// Images end in `.bin`; anything else is assembly source.
fn load(path: &Path) -> Result<Program, Vec<Error>> {
    let is_image = path.extension().map_or(false, |ext| ext == "bin");
    if is_image {
        let bytes = fs::read(path).map_err(|e| vec![io_error(path, e)])?;
        Program::from_bytes(&bytes).map_err(|e| vec![e])
    } else {
        let source = fs::read_to_string(path).map_err(|e| vec![io_error(path, e)])?;
        assemble(&source)
    }
}

fn io_error(path: &Path, error: std::io::Error) -> Error {
    let msg = format!("{}: {}", path.display(), error);
    match error.kind() {
        ErrorKind::NotFound => error!(FileNotFound; msg),
        _ => error!(InternalError; msg),
    }
}
