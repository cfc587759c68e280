//! Textual query language.
//!
//! ```text
//! query   := or? EOF
//! or      := and ("or" and)*
//! and     := unary (("and")? unary)*
//! unary   := ("not" | "-") unary | primary
//! primary := "(" or ")" | key op value | key op "(" value+ ")" | key op "[" value+ "]"
//!          | word | "quoted phrase" | /regex/ | !exact
//! ```
//!
//! Keys are case-insensitive and come from a fixed table. A bare term
//! searches card names. `key:(a b)` requires every value, `key:[a b]` any
//! of them. Sort terms (`sort:name`, `sort:-price`, `sort<power`) are pulled
//! out of the tree into the sort list.

mod grammar;
mod keywords;
mod lexer;
mod token;

pub use grammar::MAX_DEPTH;
pub use keywords::KeyKind;
pub use token::{Token, TokenKind};

use crate::error::ParseError;
use crate::parameters::{BooleanParameter, Parameter};
use crate::sort::SortSpec;

/// A compiled query: an AND root plus any sort terms it contained.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    pub root: BooleanParameter,
    pub sort: Vec<SortSpec>,
}

impl ParsedQuery {
    pub fn into_parameter(self) -> Parameter {
        Parameter::Boolean(self.root)
    }
}

/// Tokenize a query without parsing it.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    lexer::tokenize(input)
}

/// Compile a query string. An empty or whitespace-only query compiles to
/// the empty AND.
pub fn parse_query(input: &str) -> Result<ParsedQuery, ParseError> {
    let tokens = lexer::tokenize(input)?;
    tracing::debug!(tokens = tokens.len(), "Tokenized query");
    let (root, sort) = grammar::Parser::new(tokens).parse()?;
    Ok(ParsedQuery { root, sort })
}
