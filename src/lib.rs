//! # StackVM
//!
//! A small 32-bit stack machine with its own assembler.
//!
//! Program and operand stack share one block of memory. Every word is
//! either a signed literal, which is pushed when executed, or a
//! primitive instruction. The machine runs a fetch, decode, execute
//! cycle until it halts or faults.
//!
//! ```
//! use stackvm::mach::{assemble, Runtime};
//!
//! let program = assemble("10 2 3 mul sub halt").unwrap();
//! let mut runtime = Runtime::new().unwrap();
//! runtime.load(program.words()).unwrap();
//! runtime.run().unwrap();
//! assert_eq!(runtime.top(), Some(4));
//! ```
//!
//! The `stackvm` binary runs programs from files or from an
//! interactive monitor. Start it with no arguments and type assembly
//! lines, then `RUN`.
//!
//! ```text
//! STACKVM 4096 CELLS
//! READY.
//! > 10 2 3 mul sub halt
//! > RUN
//! TOP OF STACK: 4
//! READY.
//! ```

pub mod lang;
pub mod mach;
