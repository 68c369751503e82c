use std::fmt::Display;

use crate::formula::{Connective, Formula};
use crate::prelude::*;
use crate::variables::Variables;

/// Deepest chain of negations and parentheses a formula may have.
pub const MAX_DEPTH: usize = 512;

/// What the parser saw where it expected something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found(pub Option<char>);

impl Display for Found {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(c) => write!(f, "'{}'", c),
            None => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unexpected character '{}' at position {}", character, position))]
    UnexpectedCharacter { character: char, position: usize },
    #[snafu(display("Formula ends abruptly at position {}", position))]
    UnexpectedEnd { position: usize },
    #[snafu(display(
        "Expected ')' or one of '<->', '->', '&', '|' at position {}, found {}",
        position,
        found
    ))]
    MissingOperator { found: Found, position: usize },
    #[snafu(display("Expected ')' at position {}, found {}", position, found))]
    MissingClosingParen { found: Found, position: usize },
    #[snafu(display("Unexpected {} at position {} after a complete formula", found, position))]
    TrailingInput { found: Found, position: usize },
    #[snafu(display(
        "Formula nests deeper than {} levels at position {}",
        max,
        position
    ))]
    NestingTooDeep { max: usize, position: usize },
}

/// A parsed input line: the formula, if there was one, and the variables it mentions.
#[derive(Debug, Clone, Default)]
pub struct Line {
    formula: Option<Formula>,
    variables: Variables,
}

impl Line {
    pub fn into_parts(self) -> (Option<Formula>, Variables) {
        (self.formula, self.variables)
    }
}

struct Parser<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    position: usize,
    /// Number of `formula` calls currently in progress.
    depth: usize,
    variables: Variables,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            input,
            position: 0,
            depth: 0,
            variables: Variables::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
        self.position += rest.len() - trimmed.len();
    }

    /// Consumes `expected` if it is the next character.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// formula := variable | '~' formula | '(' formula binop formula ')' | '(' formula ')'
    fn formula(&mut self) -> Result<Formula, Error> {
        self.skip_whitespace();

        ensure!(
            self.depth < MAX_DEPTH,
            NestingTooDeep {
                max: MAX_DEPTH,
                position: self.position,
            }
        );

        self.depth += 1;
        let formula = self.term()?;
        self.depth -= 1;

        Ok(formula)
    }

    fn term(&mut self) -> Result<Formula, Error> {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() => Ok(self.variable()),
            Some('~') => {
                self.position += 1;
                Ok(Formula::negation(self.formula()?))
            }
            Some('(') => {
                self.position += 1;
                self.group()
            }
            Some(character) => UnexpectedCharacter {
                character,
                position: self.position,
            }
            .fail(),
            None => UnexpectedEnd {
                position: self.position,
            }
            .fail(),
        }
    }

    /// variable := letter (letter | digit)*
    fn variable(&mut self) -> Formula {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or_else(|| rest.len());
        let name = &rest[..len];
        self.position += len;

        self.variables.register(name);
        Formula::variable(name)
    }

    /// Everything after an opening parenthesis.
    fn group(&mut self) -> Result<Formula, Error> {
        let left = self.formula()?;

        self.skip_whitespace();
        if self.eat(')') {
            return Ok(left);
        }

        let connective = self.connective()?;
        let right = self.formula()?;

        self.skip_whitespace();
        let position = self.position;
        ensure!(
            self.eat(')'),
            MissingClosingParen {
                found: Found(self.peek()),
                position,
            }
        );

        Ok(Formula::binary(connective, left, right))
    }

    fn connective(&mut self) -> Result<Connective, Error> {
        let (connective, len) = Connective::lex(self.rest()).context(MissingOperator {
            found: Found(self.peek()),
            position: self.position,
        })?;
        self.position += len;

        Ok(connective)
    }
}

/// Parses one line of text into a formula.
///
/// An empty or whitespace-only line yields a [`Line`] without a formula.
/// Anything but whitespace after a complete formula is an error.
pub fn parse(text: &str) -> Result<Line, Error> {
    let mut parser = Parser::new(text);

    parser.skip_whitespace();
    if parser.peek().is_none() {
        return Ok(Line {
            formula: None,
            variables: parser.variables,
        });
    }

    let formula = parser.formula()?;

    parser.skip_whitespace();
    if let Some(c) = parser.peek() {
        return TrailingInput {
            found: Found(Some(c)),
            position: parser.position,
        }
        .fail();
    }

    debug!(
        "Parsed {} with {} variable(s)",
        formula,
        parser.variables.len()
    );

    Ok(Line {
        formula: Some(formula),
        variables: parser.variables,
    })
}
