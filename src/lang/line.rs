use super::ast::*;
use super::error::*;
use super::lex::*;
use super::parse::*;
use super::token::*;

/// ## One numbered line of assembly source

#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: usize,
    tokens: Vec<Token>,
}

impl Line {
    pub fn new(number: usize, s: &str) -> Line {
        Line {
            number,
            tokens: lex(s),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True when the line holds nothing but whitespace and comments.
    pub fn is_empty(&self) -> bool {
        self.tokens.iter().all(Token::is_blank)
    }

    pub fn ast(&self) -> Result<Vec<Statement>, Error> {
        parse(Some(self.number), &self.tokens)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s: String = self.tokens.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", s)
    }
}
