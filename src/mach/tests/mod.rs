use super::*;

mod link_test;
mod memory_test;

fn op(op: Opcode) -> Word {
    word::encode_primitive(op)
}

fn machine(words: &[Word]) -> Runtime {
    let mut r = Runtime::with_capacity(64).unwrap();
    r.load(words).unwrap();
    r
}
