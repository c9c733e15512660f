//! # StackVM
//!
//! Assemble, run and inspect programs for the StackVM machine.
//!

mod term;

fn main() {
    term::main()
}
