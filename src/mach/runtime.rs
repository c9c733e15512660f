use super::word::{self, Kind};
use super::{Address, Memory, Opcode, Operation, Stack, Word, MEMORY_SIZE};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use tracing::{debug, info, trace, warn};

type Result<T> = std::result::Result<T, Error>;

/// ## Execution engine
///
/// A `Runtime` is one machine: its memory, its two cursors and the
/// state of the fetch, decode, execute pipeline. Nothing is shared
/// between runtimes.
///
/// ```
/// use stackvm::mach::{word, Opcode, Runtime, State};
///
/// let mut runtime = Runtime::new().unwrap();
/// let add = word::encode_primitive(Opcode::Add);
/// let halt = word::encode_primitive(Opcode::Halt);
/// runtime.load(&[3, 4, add, halt]).unwrap();
/// runtime.run().unwrap();
/// assert_eq!(runtime.top(), Some(7));
/// assert_eq!(runtime.state(), State::Halt);
/// ```

#[derive(Debug)]
pub struct Runtime {
    memory: Memory,
    stack: Stack,
    pc: Address,
    ir: Address,
    kind: Kind,
    payload: u32,
    state: State,
    stage: Stage,
    fault: Option<Error>,
    cycles: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Reset,
    Run,
    Halt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Decode,
    Execute,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The cycle budget ran out before the machine halted.
    Running,
    Halted,
    Fault(Error),
}

impl Runtime {
    pub fn new() -> Result<Runtime> {
        Runtime::with_capacity(MEMORY_SIZE)
    }

    pub fn with_capacity(cells: usize) -> Result<Runtime> {
        let memory = Memory::new(cells)?;
        debug!("created machine with {} cells", cells);
        Ok(Runtime {
            memory,
            stack: Stack::default(),
            pc: 0,
            ir: 0,
            kind: Kind::PositiveInteger,
            payload: 0,
            state: State::Reset,
            stage: Stage::Fetch,
            fault: None,
            cycles: 0,
        })
    }

    /// Releases the memory region.
    pub fn destroy(self) {
        debug!("destroyed machine with {} cells", self.memory.capacity());
    }

    pub fn reset(&mut self) {
        self.memory.clear();
        self.stack = Stack::default();
        self.pc = 0;
        self.ir = 0;
        self.kind = Kind::PositiveInteger;
        self.payload = 0;
        self.state = State::Reset;
        self.stage = Stage::Fetch;
        self.fault = None;
        self.cycles = 0;
        info!("reset");
    }

    /// Copies a program to address 0. Only a machine in the reset
    /// state accepts a program.
    pub fn load(&mut self, words: &[Word]) -> Result<()> {
        if self.state != State::Reset {
            return Err(error!(IllegalState; "LOAD REQUIRES RESET"));
        }
        self.memory.load(words)?;
        self.stack = Stack::new(words.len());
        info!(
            "loaded {} words, crc32 {:08x}",
            words.len(),
            super::Program::checksum_words(words)
        );
        Ok(())
    }

    /// Runs until the machine halts. A halted machine returns at once
    /// with the outcome it halted with.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.execute(usize::max_value()) {
                Event::Running => continue,
                Event::Halted => return Ok(()),
                Event::Fault(error) => return Err(error),
            }
        }
    }

    /// Executes one instruction.
    pub fn step(&mut self) -> Event {
        self.execute(1)
    }

    /// Executes at most `cycles` instructions.
    pub fn execute(&mut self, cycles: usize) -> Event {
        match self.state {
            State::Halt => return self.halted(),
            State::Reset if cycles == 0 => return Event::Running,
            State::Reset => {
                debug!("run");
                self.state = State::Run;
            }
            State::Run => {}
        }
        let mut remaining = cycles;
        while remaining > 0 {
            let result = match self.stage {
                Stage::Fetch => {
                    self.fetch();
                    self.stage = Stage::Decode;
                    Ok(())
                }
                Stage::Decode => {
                    self.stage = Stage::Execute;
                    self.decode()
                }
                Stage::Execute => {
                    self.stage = Stage::Fetch;
                    remaining -= 1;
                    self.cycles += 1;
                    self.execute_instruction()
                }
            };
            if let Err(error) = result {
                return self.raise(error);
            }
            if self.state == State::Halt {
                return self.halted();
            }
        }
        Event::Running
    }

    fn fetch(&mut self) {
        self.ir = self.pc;
        self.pc += 1;
    }

    fn decode(&mut self) -> Result<()> {
        let word = self.memory.get(self.ir)?;
        self.kind = word::classify(word);
        self.payload = word::payload(word);
        Ok(())
    }

    fn execute_instruction(&mut self) -> Result<()> {
        match self.kind {
            Kind::PositiveInteger | Kind::NegativeInteger => {
                let val = word::literal(self.kind, self.payload);
                self.stack.push(&mut self.memory, val)?;
            }
            Kind::Primitive => match word::decode_primitive(self.payload) {
                Some((op, operand)) => self.primitive(op, operand)?,
                None => {
                    return Err(error!(UndefinedInstruction; format!(
                        "PAYLOAD {:#x}",
                        self.payload
                    )))
                }
            },
            Kind::Undefined => return Err(error!(UndefinedInstruction)),
        }
        if let Ok(top) = self.stack.last(&self.memory) {
            trace!("top of stack: {}", top);
        }
        Ok(())
    }

    fn primitive(&mut self, op: Opcode, target: Address) -> Result<()> {
        use Opcode::*;
        match op {
            Halt => {
                self.state = State::Halt;
                info!("halted at {} after {} cycles", self.ir, self.cycles);
            }
            Not => {
                let val = self.stack.last(&self.memory)?;
                trace!("not {}", val);
                self.stack.set_last(&mut self.memory, Operation::not(val))?;
            }
            Br => {
                trace!("br {}", target);
                self.pc = target;
            }
            Brt | Brf => {
                let cond = self.stack.pop(&self.memory)?;
                trace!("{} {} ({})", op.to_string().to_lowercase(), target, cond);
                if (cond != 0) == (op == Brt) {
                    self.pc = target;
                }
            }
            Ret => {
                trace!("ret");
                if !self.stack.is_empty() {
                    let val = self.stack.last(&self.memory)?;
                    let addr = Address::try_from(val)
                        .map_err(|_| error!(AddressOutOfBounds; "NEGATIVE RETURN ADDRESS"))?;
                    self.stack.pop(&self.memory)?;
                    self.pc = addr;
                }
            }
            _ => {
                let f = match Operation::binary(op) {
                    Some(f) => f,
                    None => return Err(error!(InternalError; "NO SEMANTICS FOR OPCODE")),
                };
                let (lhs, rhs) = self.stack.peek_2(&self.memory)?;
                trace!("{} {}, {}", op.to_string().to_lowercase(), lhs, rhs);
                let val = f(lhs, rhs)?;
                self.stack.collapse(&mut self.memory, val)?;
            }
        }
        Ok(())
    }

    fn raise(&mut self, error: Error) -> Event {
        let error = error.at_address(self.ir);
        warn!("{}", error);
        self.state = State::Halt;
        self.fault = Some(error.clone());
        Event::Fault(error)
    }

    fn halted(&self) -> Event {
        match &self.fault {
            Some(error) => Event::Fault(error.clone()),
            None => Event::Halted,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Address of the next instruction to fetch.
    pub fn pc(&self) -> Address {
        self.pc
    }

    /// Address of the instruction most recently fetched.
    pub fn ir(&self) -> Address {
        self.ir
    }

    pub fn sp(&self) -> Option<Address> {
        self.stack.sp()
    }

    pub fn top(&self) -> Option<i32> {
        self.stack.last(&self.memory).ok()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Stack values, bottom to top.
    pub fn stack(&self) -> Vec<i32> {
        self.stack.values(&self.memory)
    }

    /// The fault the machine halted with, if any.
    pub fn fault(&self) -> Option<&Error> {
        self.fault.as_ref()
    }

    pub fn capacity(&self) -> usize {
        self.memory.capacity()
    }

    /// Instructions executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn peek(&self, addr: Address) -> Result<Word> {
        self.memory.get(addr).map_err(|e| e.at_address(addr))
    }
}
