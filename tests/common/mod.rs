#![allow(dead_code)]

use stackvm::mach::{assemble, word, Event, Opcode, Runtime, Word};

pub const CAPACITY: usize = 256;

pub fn op(op: Opcode) -> Word {
    word::encode_primitive(op)
}

pub fn lit(val: i32) -> Word {
    word::encode_integer(val).unwrap()
}

pub fn br(op: Opcode, target: usize) -> Word {
    word::encode_branch(op, target).unwrap()
}

pub fn machine(words: &[Word]) -> Runtime {
    let mut runtime = Runtime::with_capacity(CAPACITY).unwrap();
    runtime.load(words).unwrap();
    runtime
}

pub fn exec(runtime: &mut Runtime) -> Event {
    exec_n(runtime, 5000)
}

pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> Event {
    runtime.execute(cycles)
}

/// Runs `words` and returns the stack, bottom to top.
pub fn run(words: &[Word]) -> Vec<i32> {
    let mut runtime = machine(words);
    assert_eq!(exec(&mut runtime), Event::Halted);
    runtime.stack()
}

pub fn run_asm(source: &str) -> Runtime {
    let program = assemble(source).unwrap();
    let mut runtime = machine(program.words());
    exec(&mut runtime);
    runtime
}
