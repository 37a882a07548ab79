//! 概念式の構文解析器
//!
//! Reads the same syntax `Concept` renders to:
//! `Plante`, `(NOT Fruit)`, `(Arbre AND (EXISTS produit Fruit))`.

use crate::model::{Concept, Operator, Role};
use crate::AlcError;
use logos::Logos;
use std::str::FromStr;

/// Concept expression tokens
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'a> {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("AND")]
    And,

    #[token("OR")]
    Or,

    #[token("NOT")]
    Not,

    #[token("EXISTS")]
    Exists,

    #[token("FORALL")]
    Forall,

    #[regex(r"[A-Za-z_][A-Za-z0-9_\-:.]*")]
    Name(&'a str),
}

impl<'a> Token<'a> {
    fn describe(&self) -> String {
        match self {
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::And => "AND".to_string(),
            Token::Or => "OR".to_string(),
            Token::Not => "NOT".to_string(),
            Token::Exists => "EXISTS".to_string(),
            Token::Forall => "FORALL".to_string(),
            Token::Name(name) => format!("name '{}'", name),
        }
    }
}

/// Split input into tokens paired with their byte offset
pub fn tokenize(input: &str) -> Result<Vec<(Token<'_>, usize)>, AlcError> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span.start)),
            Err(()) => {
                return Err(AlcError::Parse {
                    position: span.start,
                    message: format!("unexpected character {:?}", &input[span]),
                });
            }
        }
    }

    Ok(tokens)
}

/// Parse a single concept expression
pub fn parse_concept(input: &str) -> Result<Concept, AlcError> {
    let mut parser = ConceptParser {
        tokens: tokenize(input)?,
        pos: 0,
        end: input.len(),
    };

    let concept = parser.parse_expr()?;
    if let Some((token, offset)) = parser.peek() {
        return Err(AlcError::Parse {
            position: offset,
            message: format!("unexpected trailing {}", token.describe()),
        });
    }

    Ok(concept)
}

struct ConceptParser<'a> {
    tokens: Vec<(Token<'a>, usize)>,
    pos: usize,
    end: usize,
}

impl<'a> ConceptParser<'a> {
    fn peek(&self) -> Option<(Token<'a>, usize)> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<(Token<'a>, usize)> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn error(&self, position: usize, message: impl Into<String>) -> AlcError {
        AlcError::Parse { position, message: message.into() }
    }

    fn expect_rparen(&mut self) -> Result<(), AlcError> {
        match self.advance() {
            Some((Token::RParen, _)) => Ok(()),
            Some((token, offset)) => Err(self.error(offset, format!("expected ')', found {}", token.describe()))),
            None => Err(self.error(self.end, "expected ')', found end of input")),
        }
    }

    fn parse_expr(&mut self) -> Result<Concept, AlcError> {
        match self.advance() {
            Some((Token::Name(name), _)) => Ok(Concept::atomic(name)),
            Some((Token::LParen, offset)) => self.parse_group(offset),
            Some((token, offset)) => Err(self.error(offset, format!("expected concept, found {}", token.describe()))),
            None => Err(self.error(self.end, "expected concept, found end of input")),
        }
    }

    /// Everything after an opening parenthesis
    fn parse_group(&mut self, open: usize) -> Result<Concept, AlcError> {
        match self.peek() {
            Some((Token::Not, _)) => {
                self.advance();
                let operand = self.parse_expr()?;
                self.expect_rparen()?;
                Ok(Concept::not(operand))
            }
            Some((Token::Exists, _)) | Some((Token::Forall, _)) => {
                let operator = match self.advance() {
                    Some((Token::Exists, _)) => Operator::Exists,
                    _ => Operator::Forall,
                };
                let role = match self.advance() {
                    Some((Token::Name(name), _)) => Role::new(name),
                    Some((token, offset)) => {
                        return Err(self.error(offset, format!("expected role name after {}, found {}", operator, token.describe())));
                    }
                    None => return Err(self.error(self.end, format!("expected role name after {}", operator))),
                };
                let filler = self.parse_expr()?;
                self.expect_rparen()?;
                Concept::compose(operator, Some(role), vec![filler])
            }
            Some((Token::RParen, _)) => Err(self.error(open, "empty group")),
            _ => self.parse_connective_group(),
        }
    }

    fn parse_connective_group(&mut self) -> Result<Concept, AlcError> {
        let mut operands = vec![self.parse_expr()?];
        let mut connective: Option<Operator> = None;

        loop {
            let (token, offset) = match self.advance() {
                Some(next) => next,
                None => return Err(self.error(self.end, "expected AND, OR or ')', found end of input")),
            };

            let operator = match token {
                Token::RParen => break,
                Token::And => Operator::And,
                Token::Or => Operator::Or,
                other => {
                    return Err(self.error(offset, format!("expected AND, OR or ')', found {}", other.describe())));
                }
            };

            match connective {
                Some(existing) if existing != operator => {
                    return Err(self.error(offset, format!("cannot mix {} and {} in one group", existing, operator)));
                }
                _ => connective = Some(operator),
            }

            operands.push(self.parse_expr()?);
        }

        match connective {
            Some(operator) => Concept::compose(operator, None, operands),
            // A parenthesised single concept is just that concept
            None => Ok(operands.remove(0)),
        }
    }
}

impl FromStr for Concept {
    type Err = AlcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_concept(s)
    }
}
