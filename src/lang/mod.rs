/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the StackVM
assembly language. A source line lexes into tokens, which parse into
statements; `mach::assemble` turns statements into instruction words.

```text
; leave 1 on the stack if 7 > 5
    7 5 gt
    brt yes       ; branch targets are labels or addresses
    0 halt
yes:
    1 halt
```

*/

pub type LineNumber = Option<usize>;
pub type Column = std::ops::Range<usize>;

#[macro_use]
mod error;
mod lex;
mod line;
mod parse;

pub mod ast;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use line::Line;
pub use parse::parse;

#[cfg(test)]
mod tests;
