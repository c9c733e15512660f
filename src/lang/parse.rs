use super::{ast::*, token::*, Column, Error, LineNumber};
use crate::mach::Opcode;
use std::convert::TryFrom;
use std::num::IntErrorKind;

type Result<T> = std::result::Result<T, Error>;

pub fn parse(line_number: LineNumber, tokens: &[Token]) -> Result<Vec<Statement>> {
    match Parser::parse(tokens) {
        Err(e) => Err(e.in_line_number(line_number)),
        Ok(r) => Ok(r),
    }
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Vec<Statement>> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            col: 0..0,
        };
        let mut r: Vec<Statement> = vec![];
        loop {
            match parse.statement() {
                Ok(Some(s)) => r.push(s),
                Ok(None) => return Ok(r),
                Err(e) => return Err(e.in_column(&parse.col)),
            }
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            if t.is_blank() {
                continue;
            }
            return Some(t);
        }
    }

    fn statement(&mut self) -> Result<Option<Statement>> {
        let token = match self.next() {
            Some(token) => token,
            None => return Ok(None),
        };
        let col = self.column();
        let statement = match token {
            Token::Label(s) if Opcode::from_mnemonic(s).is_some() => {
                return Err(error!(SyntaxError; "RESERVED LABEL"))
            }
            Token::Label(s) => Statement::Label(col, s.clone()),
            Token::Integer(s) => Statement::Literal(col, parse_integer(s)?),
            Token::Mnemonic(op) if op.takes_target() => {
                let target = self.target()?;
                Statement::Branch(col.start..self.col.end, *op, target)
            }
            Token::Mnemonic(op) => Statement::Op(col, *op),
            Token::Ident(_) => return Err(error!(SyntaxError; "UNKNOWN MNEMONIC")),
            Token::Unknown(_) | Token::Whitespace(_) | Token::Comment(_) => {
                return Err(error!(SyntaxError))
            }
        };
        Ok(Some(statement))
    }

    fn target(&mut self) -> Result<Target> {
        match self.next() {
            Some(Token::Ident(s)) => Ok(Target::Label(s.clone())),
            Some(Token::Integer(s)) => {
                let n = parse_integer(s)?;
                if n < 0 {
                    return Err(error!(SyntaxError; "NEGATIVE TARGET"));
                }
                match usize::try_from(n) {
                    Ok(addr) => Ok(Target::Address(addr)),
                    Err(_) => Err(error!(Overflow; "TARGET TOO LARGE")),
                }
            }
            _ => Err(error!(SyntaxError; "EXPECTED TARGET")),
        }
    }
}

fn parse_integer(s: &str) -> Result<i64> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match digits.strip_prefix("0X") {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    match i64::from_str_radix(digits, radix) {
        Ok(n) if negative => Ok(-n),
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(error!(Overflow)),
            _ => Err(error!(SyntaxError; "BAD NUMBER")),
        },
    }
}
