/*!
## Rust Machine Module

This Rust module is the assembler back end and virtual machine for StackVM.

Code and the operand stack share one fixed block of 32-bit cells.
A program is loaded at address 0 and the stack grows upward from the
first cell after it. Every cell access is bounds checked.

*/

pub type Address = usize;
pub type Word = u32;

/// Default number of cells in a machine's memory region.
pub const MEMORY_SIZE: usize = 4096;

/// Largest address a branch instruction can encode.
pub const MAX_ADDRESS: Address = (1 << 22) - 1;

mod compile;
mod link;
mod listing;
mod memory;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;

pub mod word;

pub use compile::assemble;
pub use compile::compile;
pub use link::Link;
pub use listing::Listing;
pub use memory::Memory;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use runtime::Stage;
pub use runtime::State;
pub use stack::Stack;
pub use word::Instruction;
pub use word::Kind;

#[cfg(test)]
mod tests;
