use super::{Link, Program};
use crate::error;
use crate::lang::ast::{Statement, Target};
use crate::lang::{Error, Line};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Assembles source text, one line per source line, numbered from 1.
/// Every error found is returned, not only the first.
pub fn assemble(source: &str) -> std::result::Result<Program, Vec<Error>> {
    let lines: Vec<Line> = source
        .lines()
        .enumerate()
        .map(|(index, text)| Line::new(index + 1, text))
        .collect();
    compile(lines.iter())
}

pub fn compile<'a, T: IntoIterator<Item = &'a Line>>(
    lines: T,
) -> std::result::Result<Program, Vec<Error>> {
    let mut program = Program::new();
    let mut link = Link::new();
    let mut errors: Vec<Error> = vec![];
    for line in lines {
        let statements = match line.ast() {
            Ok(statements) => statements,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };
        for statement in &statements {
            if let Err(error) = statement_to_words(&mut program, &mut link, line, statement) {
                errors.push(
                    error
                        .in_line_number(Some(line.number()))
                        .in_column(statement.column()),
                );
            }
        }
    }
    errors.append(&mut link.link(&mut program));
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

fn statement_to_words(
    program: &mut Program,
    link: &mut Link,
    line: &Line,
    statement: &Statement,
) -> Result<()> {
    match statement {
        Statement::Label(_, name) => link.insert(name, program.len()),
        Statement::Literal(_, val) => match i32::try_from(*val) {
            Ok(val) => program.literal(val).map(|_| ()),
            Err(_) => Err(error!(Overflow; "LITERAL TOO LARGE")),
        },
        Statement::Op(_, op) => {
            program.op(*op);
            Ok(())
        }
        Statement::Branch(_, op, Target::Address(addr)) => program.branch(*op, *addr).map(|_| ()),
        Statement::Branch(col, op, Target::Label(name)) => {
            let addr = program.branch(*op, 0)?;
            link.link_addr_to_symbol(addr, *op, Some(line.number()), col, name);
            Ok(())
        }
    }
}
