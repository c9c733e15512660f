extern crate linefeed;
use super::CYCLES_PER_SLICE;
use ansi_term::Style;
use linefeed::{Interface, ReadResult, Terminal};
use stackvm::error;
use stackvm::lang::token::Token;
use stackvm::lang::{Error, Line};
use stackvm::mach::{compile, Event, Listing, Program, Runtime, State};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// ## Interactive monitor
///
/// Assembly lines typed at the prompt are appended to the program.
/// A line starting with a command word is a command instead.

pub fn main_loop(interrupted: Arc<AtomicBool>, memory: usize) -> std::io::Result<()> {
    let interface = Interface::new("stackvm")?;
    interface.set_prompt("> ")?;
    let mut monitor = match Monitor::new(memory) {
        Ok(monitor) => monitor,
        Err(error) => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                error.to_string(),
            ))
        }
    };
    interface.write_fmt(format_args!("STACKVM {} CELLS\nREADY.\n", memory))?;

    loop {
        if monitor.running {
            if interrupted.swap(false, Ordering::SeqCst) {
                monitor.running = false;
                let reply = Reply::Text(format!("BREAK AT {}", monitor.runtime.pc()));
                write_reply(&interface, reply)?;
                continue;
            }
            let event = monitor.runtime.execute(CYCLES_PER_SLICE);
            let reply = monitor.event(event);
            write_reply(&interface, reply)?;
            continue;
        }
        interrupted.store(false, Ordering::SeqCst);
        let input = match interface.read_line()? {
            ReadResult::Input(input) => input,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        match monitor.enter(&input) {
            Reply::Quit => break,
            reply => write_reply(&interface, reply)?,
        }
        if !input.trim().is_empty() {
            interface.add_history_unique(input);
        }
    }
    Ok(())
}

fn write_reply<T: Terminal>(interface: &Interface<T>, reply: Reply) -> std::io::Result<()> {
    match reply {
        Reply::Nothing | Reply::Quit => {}
        Reply::Text(s) => interface.write_fmt(format_args!("{}\n", s))?,
        Reply::Errors(errors) => {
            for error in errors.iter() {
                interface.write_fmt(format_args!(
                    "{}\n",
                    Style::new().bold().paint(error.to_string())
                ))?;
            }
        }
    }
    Ok(())
}

#[derive(Debug)]
enum Reply {
    Nothing,
    Text(String),
    Errors(Vec<Error>),
    Quit,
}

struct Monitor {
    source: Vec<Line>,
    program: Program,
    runtime: Runtime,
    running: bool,
}

impl Monitor {
    fn new(memory: usize) -> Result<Monitor, Error> {
        Ok(Monitor {
            source: vec![],
            program: Program::new(),
            runtime: Runtime::with_capacity(memory)?,
            running: false,
        })
    }

    fn enter(&mut self, input: &str) -> Reply {
        let line = Line::new(self.source.len() + 1, input);
        let command = match line.tokens().iter().find(|t| !t.is_blank()) {
            None => return Reply::Nothing,
            Some(Token::Ident(s)) => Some(s.clone()),
            Some(_) => None,
        };
        let command = match command {
            Some(command) => command,
            None => return self.append(line),
        };
        let arg = input.trim().get(command.len()..).unwrap_or("").trim();
        let arg = arg.trim_matches('"');
        match command.as_str() {
            "RUN" => self.run(),
            "CONT" => self.cont(),
            "STEP" => self.step(),
            "LIST" => self.list(),
            "DIS" => self.dis(),
            "STACK" => self.stack(),
            "RESET" => {
                self.runtime.reset();
                Reply::Text("READY.".to_string())
            }
            "NEW" => {
                self.source.clear();
                self.program.clear();
                self.runtime.reset();
                Reply::Text("READY.".to_string())
            }
            "LOAD" => self.load(arg),
            "SAVE" => self.save(arg),
            "QUIT" | "EXIT" => Reply::Quit,
            _ => self.append(line),
        }
    }

    fn append(&mut self, line: Line) -> Reply {
        match line.ast() {
            Ok(_) => {
                self.source.push(line);
                Reply::Nothing
            }
            Err(error) => Reply::Errors(vec![error]),
        }
    }

    /// Assembles the source and loads it into a freshly reset machine.
    fn prepare(&mut self) -> Result<(), Vec<Error>> {
        self.program = compile(self.source.iter())?;
        self.runtime.reset();
        self.runtime.load(self.program.words()).map_err(|e| vec![e])
    }

    fn run(&mut self) -> Reply {
        match self.prepare() {
            Ok(()) => {
                self.running = true;
                Reply::Nothing
            }
            Err(errors) => Reply::Errors(errors),
        }
    }

    fn cont(&mut self) -> Reply {
        if self.runtime.state() == State::Run {
            self.running = true;
            Reply::Nothing
        } else {
            Reply::Errors(vec![error!(IllegalState; "CAN'T CONTINUE")])
        }
    }

    fn step(&mut self) -> Reply {
        if self.runtime.state() != State::Run {
            if let Err(errors) = self.prepare() {
                return Reply::Errors(errors);
            }
        }
        let listing = Listing::new(self.program.words());
        let text = listing
            .line(self.runtime.pc())
            .unwrap_or_else(|| format!("{:04}  ???", self.runtime.pc()));
        match self.runtime.step() {
            Event::Fault(error) => Reply::Errors(vec![error]),
            _ => Reply::Text(format!("{}    {:?}", text, self.runtime.stack())),
        }
    }

    fn list(&self) -> Reply {
        let text: Vec<String> = self
            .source
            .iter()
            .map(|line| format!("{:>4} {}", line.number(), line))
            .collect();
        Reply::Text(text.join("\n"))
    }

    fn dis(&self) -> Reply {
        match compile(self.source.iter()) {
            Ok(program) => {
                let listing = Listing::new(program.words()).to_string();
                Reply::Text(listing.trim_end().to_string())
            }
            Err(errors) => Reply::Errors(errors),
        }
    }

    fn stack(&self) -> Reply {
        let sp = match self.runtime.sp() {
            Some(sp) => sp.to_string(),
            None => "EMPTY".to_string(),
        };
        Reply::Text(format!(
            "{:?} PC {} SP {} {:?}",
            self.runtime.state(),
            self.runtime.pc(),
            sp,
            self.runtime.stack()
        ))
    }

    fn event(&mut self, event: Event) -> Reply {
        match event {
            Event::Running => Reply::Nothing,
            Event::Halted => {
                self.running = false;
                match self.runtime.top() {
                    Some(top) => Reply::Text(format!("TOP OF STACK: {}\nREADY.", top)),
                    None => Reply::Text("EMPTY STACK\nREADY.".to_string()),
                }
            }
            Event::Fault(error) => {
                self.running = false;
                Reply::Errors(vec![error])
            }
        }
    }

    fn load(&mut self, filename: &str) -> Reply {
        let source = match fs::read_to_string(filename) {
            Ok(source) => source,
            Err(e) => {
                let msg = format!("{}: {}", filename, e);
                return Reply::Errors(vec![match e.kind() {
                    std::io::ErrorKind::NotFound => error!(FileNotFound; msg),
                    _ => error!(InternalError; msg),
                }]);
            }
        };
        self.source = source
            .lines()
            .enumerate()
            .map(|(index, text)| Line::new(index + 1, text))
            .collect();
        self.runtime.reset();
        Reply::Text(format!("{} LINES", self.source.len()))
    }

    fn save(&self, filename: &str) -> Reply {
        if self.source.is_empty() {
            return Reply::Errors(vec![error!(InternalError; "NOTHING TO SAVE")]);
        }
        let text: String = self.source.iter().map(|line| format!("{}\n", line)).collect();
        match fs::write(filename, text) {
            Ok(()) => Reply::Nothing,
            Err(e) => Reply::Errors(vec![error!(InternalError; e.to_string())]),
        }
    }
}
