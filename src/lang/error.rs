use super::{Column, LineNumber};
use crate::mach::Address;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    column: Column,
    address: Option<Address>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            column: 0..0,
            address: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    /// True for the conditions that halt a running machine.
    pub fn is_fault(&self) -> bool {
        use ErrorCode::*;
        matches!(
            self.code,
            AddressOutOfBounds
                | StackUnderflow
                | StackOverflow
                | DivisionByZero
                | UndefinedInstruction
        )
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn in_column(self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            column: column.clone(),
            ..self
        }
    }

    pub fn at_address(self, address: Address) -> Error {
        Error {
            address: Some(address),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    AddressOutOfBounds = 1,
    StackUnderflow = 2,
    StackOverflow = 3,
    DivisionByZero = 4,
    UndefinedInstruction = 5,
    ProgramTooLarge = 6,
    OutOfMemory = 7,
    IllegalState = 8,
    SyntaxError = 20,
    UndefinedLabel = 21,
    DuplicateLabel = 22,
    Overflow = 23,
    FileNotFound = 30,
    BadFileFormat = 31,
    InternalError = 51,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let s = match self {
            AddressOutOfBounds => "ADDRESS OUT OF BOUNDS",
            StackUnderflow => "STACK UNDERFLOW",
            StackOverflow => "STACK OVERFLOW",
            DivisionByZero => "DIVISION BY ZERO",
            UndefinedInstruction => "UNDEFINED INSTRUCTION",
            ProgramTooLarge => "PROGRAM TOO LARGE",
            OutOfMemory => "OUT OF MEMORY",
            IllegalState => "ILLEGAL STATE",
            SyntaxError => "SYNTAX ERROR",
            UndefinedLabel => "UNDEFINED LABEL",
            DuplicateLabel => "DUPLICATE LABEL",
            Overflow => "OVERFLOW",
            FileNotFound => "FILE NOT FOUND",
            BadFileFormat => "BAD FILE FORMAT",
            InternalError => "INTERNAL ERROR",
        };
        write!(f, "{}", s)
    }
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN {}", line_number));
            if (0..0) != self.column {
                suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
            }
        }
        if let Some(address) = self.address {
            suffix.push_str(&format!(" AT {}", address));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", self.code, suffix)
    }
}
