use crate::mach::Opcode;

/// Tokens print back to the exact text they were lexed from,
/// apart from letter case, so columns can be measured from them.

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(usize),
    Comment(String),
    Integer(String),
    Mnemonic(Opcode),
    Ident(String),
    Label(String),
}

impl Token {
    pub fn is_blank(&self) -> bool {
        matches!(self, Token::Whitespace(_) | Token::Comment(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Comment(s) => write!(f, "{}", s),
            Integer(s) => write!(f, "{}", s),
            Mnemonic(op) => write!(f, "{}", op),
            Ident(s) => write!(f, "{}", s),
            Label(s) => write!(f, "{}:", s),
        }
    }
}
