use super::token::*;
use crate::mach::Opcode;

pub fn lex(s: &str) -> Vec<Token> {
    AsmLexer::lex(s)
}

fn is_asm_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_asm_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_asm_sign(c: char) -> bool {
    c == '+' || c == '-'
}

fn is_asm_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_asm_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) -> Option<Token> {
        let mut len = 0;
        loop {
            self.chars().next();
            len += 1;
            if let Some(pk) = self.chars().peek() {
                if is_asm_whitespace(*pk) {
                    continue;
                }
            }
            return Some(Token::Whitespace(len));
        }
    }

    fn comment(&mut self) -> Option<Token> {
        Some(Token::Comment(self.chars().by_ref().collect::<String>()))
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        if let Some(ch) = self.chars().next() {
            s.push(ch.to_ascii_uppercase());
        }
        while let Some(pk) = self.chars().peek() {
            if !is_asm_alphanumeric(*pk) {
                break;
            }
            let ch = pk.to_ascii_uppercase();
            self.chars().next();
            s.push(ch);
        }
        Some(Token::Integer(s))
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_asm_alphanumeric(*pk) {
                break;
            }
            let ch = pk.to_ascii_uppercase();
            self.chars().next();
            s.push(ch);
        }
        if let Some(':') = self.chars().peek() {
            self.chars().next();
            return Some(Token::Label(s));
        }
        match Opcode::from_mnemonic(&s) {
            Some(op) => Some(Token::Mnemonic(op)),
            None => Some(Token::Ident(s)),
        }
    }

    fn minutia(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(ch) = self.chars().next() {
            s.push(ch);
            match self.chars().peek() {
                Some(pk) if !is_asm_whitespace(*pk) && *pk != ';' => continue,
                _ => break,
            }
        }
        Some(Token::Unknown(s))
    }
}

struct AsmLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizers<'a> for AsmLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for AsmLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = *self.chars.peek()?;
        if is_asm_whitespace(pk) {
            return self.whitespace();
        }
        if pk == ';' {
            return self.comment();
        }
        if is_asm_digit(pk) || (is_asm_sign(pk) && self.digit_after_sign()) {
            return self.number();
        }
        if is_asm_alphabetic(pk) {
            return self.alphabetic();
        }
        self.minutia()
    }
}

impl<'a> AsmLexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = AsmLexer {
            chars: s.chars().peekable(),
        }
        .collect();
        AsmLexer::trim_end(&mut tokens);
        tokens
    }

    fn digit_after_sign(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        matches!(ahead.peek(), Some(d) if is_asm_digit(*d))
    }

    fn trim_end(tokens: &mut Vec<Token>) {
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
        if let Some(Token::Comment(_)) = tokens.last() {
            if let Some(Token::Comment(s)) = tokens.pop() {
                tokens.push(Token::Comment(s.trim_end().to_string()));
            }
        }
    }
}
