//! Recursive-descent parser over the token stream.
//!
//! Precedence, loosest first: `or`, then `and` (explicit or implied by
//! adjacency), then `not` / `-`, then parenthesised groups and terms.

use super::keywords::{self, KeyKind};
use super::token::{Token, TokenKind};
use crate::error::{Error, ParseError};
use crate::fields::{ColourField, MembershipField, NumericField, TextField};
use crate::filter::{ComparisonOp, NumericOperand};
use crate::models::{ColourSet, Rarity};
use crate::parameters::{
    BoolOp, BooleanParameter, ColourParam, FlagParam, NumericParam, Parameter, ReleaseDateParam,
    SetMembershipParam, TextMode,
};
use crate::sort::{SortKey, SortSpec};

/// Groups and negations deeper than this are rejected.
pub const MAX_DEPTH: usize = 128;

type ParseResult<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Plain,
    Quoted,
    Regex,
    Exact,
}

/// One value to the right of a key, or a bare term.
#[derive(Debug, Clone)]
struct Value {
    text: String,
    kind: ValueKind,
    position: usize,
}

impl Value {
    fn from_token(token: Token, kind: ValueKind) -> Self {
        Self {
            text: token.text,
            kind,
            position: token.position,
        }
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::new(token.position, format!("Unexpected {}", token.describe()))
}

/// Leaf construction failures are reported at the value that caused them.
fn at_position(error: Error, position: usize) -> ParseError {
    match error {
        Error::Parse(e) => e,
        Error::Validation(message) => ParseError::new(position, message),
        other => ParseError::new(position, other.to_string()),
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    sort: Vec<SortSpec>,
}

impl Parser {
    /// `tokens` must end with an `Eof` token, as the lexer guarantees.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            sort: Vec::new(),
        }
    }

    pub fn parse(mut self) -> ParseResult<(BooleanParameter, Vec<SortSpec>)> {
        if self.tokens.is_empty() || self.current().is(TokenKind::Eof) {
            return Ok((BooleanParameter::and(), self.sort));
        }

        let root = self.parse_or()?;
        let trailing = self.current();
        match trailing.kind {
            TokenKind::Eof => {}
            TokenKind::RParen => {
                return Err(ParseError::new(
                    trailing.position,
                    "Unbalanced ')': no matching '('",
                ))
            }
            _ => return Err(unexpected(trailing)),
        }

        let root = match root {
            None => BooleanParameter::and(),
            Some(Parameter::Boolean(group)) if group.op() == BoolOp::And && !group.negated => group,
            Some(other) => BooleanParameter::all_of(vec![other]),
        };
        Ok((root, self.sort))
    }

    fn current(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is(TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::new(
                self.current().position,
                format!("Query is nested too deeply (limit {})", MAX_DEPTH),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn expect_term_after(&self, keyword: &Token) -> ParseResult<()> {
        let next = self.current();
        if next.starts_term() {
            return Ok(());
        }
        Err(ParseError::new(
            next.position,
            format!(
                "Expected a search term after '{}', found {}",
                keyword.text,
                next.describe()
            ),
        ))
    }

    fn parse_or(&mut self) -> ParseResult<Option<Parameter>> {
        let mut branches = vec![self.parse_and()?];
        let mut first_or = None;
        while self.current().is(TokenKind::Or) {
            let or = self.advance();
            self.expect_term_after(&or)?;
            first_or.get_or_insert(or.position);
            branches.push(self.parse_and()?);
        }

        let Some(or_position) = first_or else {
            return Ok(branches.pop().flatten());
        };
        let children = branches
            .into_iter()
            .map(|branch| {
                branch.ok_or_else(|| {
                    ParseError::new(or_position, "A sort term can't be combined with 'or'")
                })
            })
            .collect::<ParseResult<Vec<_>>>()?;
        Ok(Some(BooleanParameter::any_of(children).into()))
    }

    fn parse_and(&mut self) -> ParseResult<Option<Parameter>> {
        let mut children = Vec::new();
        children.extend(self.parse_unary()?);
        loop {
            if self.current().is(TokenKind::And) {
                let and = self.advance();
                self.expect_term_after(&and)?;
            } else if !self.current().starts_term() {
                break;
            }
            children.extend(self.parse_unary()?);
        }

        Ok(match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(BooleanParameter::all_of(children).into()),
        })
    }

    fn parse_unary(&mut self) -> ParseResult<Option<Parameter>> {
        if !matches!(self.current().kind, TokenKind::Not | TokenKind::Minus) {
            return self.parse_primary();
        }

        let op = self.advance();
        self.expect_term_after(&op)?;
        self.enter()?;
        let inner = self.parse_unary();
        self.leave();
        match inner? {
            Some(param) => Ok(Some(param.negate())),
            None => Err(ParseError::new(op.position, "Sort terms can't be negated")),
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Option<Parameter>> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::LParen => {
                self.advance();
                if self.current().is(TokenKind::RParen) {
                    return Err(ParseError::new(token.position, "Empty parentheses"));
                }
                self.enter()?;
                let inner = self.parse_or();
                self.leave();
                let inner = inner?;
                let close = self.current();
                match close.kind {
                    TokenKind::RParen => {
                        self.advance();
                        Ok(inner)
                    }
                    TokenKind::Eof => Err(ParseError::new(
                        token.position,
                        "Unbalanced '(': missing ')'",
                    )),
                    _ => Err(unexpected(close)),
                }
            }
            TokenKind::Word if self.peek_is_op() => {
                self.advance();
                let op = self.advance();
                self.parse_comparison(&token, &op)
            }
            TokenKind::Word | TokenKind::Quoted | TokenKind::Regex | TokenKind::Bang => {
                let value = self.parse_value(None)?;
                self.bare_term(&value).map(Some)
            }
            _ => Err(unexpected(&token)),
        }
    }

    fn peek_is_op(&self) -> bool {
        self.tokens
            .get(self.pos + 1)
            .is_some_and(|t| t.is(TokenKind::Op))
    }

    /// Free text searches card names.
    fn bare_term(&self, value: &Value) -> ParseResult<Parameter> {
        let mode = match value.kind {
            ValueKind::Plain | ValueKind::Quoted => TextMode::Contains,
            ValueKind::Regex => TextMode::Regex,
            ValueKind::Exact => TextMode::Exact,
        };
        Parameter::text(TextField::Name, value.text.clone(), mode, false)
            .map_err(|e| at_position(e, value.position))
    }

    fn parse_value(&mut self, key: Option<(&Token, &Token)>) -> ParseResult<Value> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Word | TokenKind::And | TokenKind::Or | TokenKind::Not => {
                self.advance();
                Ok(Value::from_token(token, ValueKind::Plain))
            }
            TokenKind::Quoted => {
                self.advance();
                Ok(Value::from_token(token, ValueKind::Quoted))
            }
            TokenKind::Regex => {
                self.advance();
                Ok(Value::from_token(token, ValueKind::Regex))
            }
            TokenKind::Bang => {
                self.advance();
                let next = self.current().clone();
                if !matches!(next.kind, TokenKind::Word | TokenKind::Quoted) {
                    return Err(ParseError::new(
                        next.position,
                        format!("Expected a value after '!', found {}", next.describe()),
                    ));
                }
                self.advance();
                Ok(Value {
                    text: next.text,
                    kind: ValueKind::Exact,
                    position: token.position,
                })
            }
            // `power>-1`, `sort:-name`
            TokenKind::Minus if key.is_some() => {
                self.advance();
                let next = self.current().clone();
                if !next.is(TokenKind::Word) {
                    return Err(unexpected(&next));
                }
                self.advance();
                Ok(Value {
                    text: format!("-{}", next.text),
                    kind: ValueKind::Plain,
                    position: token.position,
                })
            }
            _ => match key {
                Some((key, op)) => Err(ParseError::new(
                    token.position,
                    format!("Missing value after '{}{}'", key.text, op.text),
                )),
                None => Err(unexpected(&token)),
            },
        }
    }

    fn parse_comparison(&mut self, key: &Token, op: &Token) -> ParseResult<Option<Parameter>> {
        let Some(kind) = keywords::lookup(&key.text) else {
            return Err(ParseError::new(
                key.position,
                format!("Unknown search key \"{}\"", key.text),
            ));
        };

        let (group_op, close) = match self.current().kind {
            TokenKind::LParen => (BoolOp::And, TokenKind::RParen),
            TokenKind::LBracket => (BoolOp::Or, TokenKind::RBracket),
            _ => {
                let value = self.parse_value(Some((key, op)))?;
                return self.build_leaf(kind, key, op, &value);
            }
        };

        let open = self.advance();
        if kind == KeyKind::Sort {
            return Err(ParseError::new(open.position, "Sort keys can't be grouped"));
        }
        let mut children = Vec::new();
        loop {
            let next = self.current();
            if next.is(close) {
                self.advance();
                break;
            }
            match next.kind {
                TokenKind::Eof => {
                    let closing = if close == TokenKind::RParen { ')' } else { ']' };
                    return Err(ParseError::new(
                        open.position,
                        format!("Unbalanced '{}': missing '{}'", open.text, closing),
                    ));
                }
                TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Op => return Err(unexpected(next)),
                _ => {}
            }
            let value = self.parse_value(Some((key, op)))?;
            children.extend(self.build_leaf(kind, key, op, &value)?);
        }

        if children.is_empty() {
            return Err(ParseError::new(open.position, "Empty value group"));
        }
        let group = match group_op {
            BoolOp::Or => BooleanParameter::any_of(children),
            _ => BooleanParameter::all_of(children),
        };
        Ok(Some(group.into()))
    }

    fn build_leaf(
        &mut self,
        kind: KeyKind,
        key: &Token,
        op: &Token,
        value: &Value,
    ) -> ParseResult<Option<Parameter>> {
        let op_text = op.text.as_str();
        let unsupported = || {
            ParseError::new(
                op.position,
                format!("Operator '{}' can't be used with '{}'", op_text, key.text),
            )
        };
        let comparison = || {
            if op_text == ":" {
                Ok(ComparisonOp::Eq)
            } else {
                ComparisonOp::parse(op_text).ok_or_else(unsupported)
            }
        };

        if !matches!(kind, KeyKind::Text(_))
            && matches!(value.kind, ValueKind::Regex | ValueKind::Exact)
        {
            return Err(ParseError::new(
                value.position,
                format!("'{}' only takes plain values", key.text),
            ));
        }

        let param = match kind {
            KeyKind::Text(field) => {
                let (mode, negated) = match (value.kind, op_text) {
                    (ValueKind::Regex, ":" | "=") => (TextMode::Regex, false),
                    (ValueKind::Regex, "!=") => (TextMode::Regex, true),
                    (ValueKind::Exact, ":" | "=") => (TextMode::Exact, false),
                    (_, ":") => (TextMode::Contains, false),
                    (_, "=") => (TextMode::Exact, false),
                    (_, "!=") => (TextMode::Exact, true),
                    _ => return Err(unsupported()),
                };
                Parameter::text(field, value.text.clone(), mode, negated)
            }
            KeyKind::Numeric(field) => {
                let op = comparison()?;
                let operand = parse_operand(field, value)?;
                NumericParam::new(field, op, operand, false).map(Parameter::from)
            }
            KeyKind::Membership(field) => {
                let negated = match op_text {
                    ":" | "=" => false,
                    "!=" => true,
                    _ => return Err(unsupported()),
                };
                Parameter::membership(field, [value.text.as_str()], negated)
            }
            KeyKind::Rarity => {
                let Some(rarity) = Rarity::parse(&value.text) else {
                    return Err(ParseError::new(
                        value.position,
                        format!("Unknown rarity \"{}\"", value.text),
                    ));
                };
                match comparison()? {
                    ComparisonOp::Eq => {
                        Parameter::membership(MembershipField::Rarity, [rarity.as_str()], false)
                    }
                    ComparisonOp::Ne => {
                        Parameter::membership(MembershipField::Rarity, [rarity.as_str()], true)
                    }
                    op => SetMembershipParam::rarity_comparison(op, rarity, false)
                        .map(Parameter::from),
                }
            }
            KeyKind::Colour(field) if value.text.trim().parse::<u8>().is_ok() => {
                let count_field = match field {
                    ColourField::Colours => NumericField::ColourCount,
                    ColourField::Identity => NumericField::IdentityCount,
                };
                let op = comparison()?;
                let operand = parse_operand(count_field, value)?;
                NumericParam::new(count_field, op, operand, false).map(Parameter::from)
            }
            KeyKind::Colour(field) => {
                let colourless =
                    ColourSet::from_nickname(&value.text).is_some_and(|c| c.is_empty());
                let op = match (op_text, field) {
                    (":", _) if colourless => ComparisonOp::Eq,
                    (":", ColourField::Colours) => ComparisonOp::Ge,
                    (":", ColourField::Identity) => ComparisonOp::Le,
                    _ => comparison()?,
                };
                ColourParam::from_nickname(field, op, &value.text, false).map(Parameter::from)
            }
            KeyKind::Date => {
                let op = match op_text {
                    "<" | "<=" | ">" | ">=" => comparison()?,
                    _ => return Err(unsupported()),
                };
                ReleaseDateParam::from_value(op, &value.text, false).map(Parameter::from)
            }
            KeyKind::FlagPresent | KeyKind::FlagAbsent => {
                if !matches!(op_text, ":" | "=") {
                    return Err(unsupported());
                }
                FlagParam::parse(&value.text, kind == KeyKind::FlagPresent, false)
                    .map(Parameter::from)
            }
            KeyKind::Sort => {
                let (name, descending) = match value.text.strip_prefix('-') {
                    Some(rest) => (rest, true),
                    None => (value.text.as_str(), false),
                };
                let descending = match op_text {
                    ":" | "=" | ">" | ">=" => descending,
                    "<" | "<=" => true,
                    _ => return Err(unsupported()),
                };
                let Some(sort_key) = SortKey::parse(name) else {
                    return Err(ParseError::new(
                        value.position,
                        format!("Unknown sort key \"{}\"", name),
                    ));
                };
                self.sort.push(if descending {
                    SortSpec::desc(sort_key)
                } else {
                    SortSpec::asc(sort_key)
                });
                return Ok(None);
            }
        };
        param
            .map(Some)
            .map_err(|e| at_position(e, value.position))
    }
}

fn parse_operand(field: NumericField, value: &Value) -> ParseResult<NumericOperand> {
    let text = value.text.trim();
    let lower = text.to_lowercase();
    let number = match lower.as_str() {
        "inf" | "infinity" | "∞" => Some(f64::INFINITY),
        "-inf" | "-infinity" | "-∞" => Some(f64::NEG_INFINITY),
        other => other.parse::<f64>().ok().filter(|v| v.is_finite()),
    };
    if let Some(number) = number {
        return Ok(NumericOperand::Value(number));
    }
    if let Some(other) = NumericField::from_operand_name(&lower) {
        return Ok(NumericOperand::Field(other));
    }
    Err(ParseError::new(
        value.position,
        format!("Expected a number for {}, found \"{}\"", field.label(), text),
    ))
}
