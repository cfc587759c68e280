//! Compiled boolean filters.
//!
//! A `FilterExpr` is what a parameter tree compiles to and what a
//! [`CardStore`](crate::db::CardStore) executes. Negation is kept in
//! negation normal form: `Not` only ever wraps an `Atom`, and every atom is
//! two-valued (a missing value makes the atom false, never unknown).

mod eval;

use crate::fields::{CardFlag, ColourField, MembershipField, NumericField, TextField};
use crate::models::ColourSet;
use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOp {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    pub fn words(self) -> &'static str {
        match self {
            Self::Eq => "equal to",
            Self::Ne => "not equal to",
            Self::Lt => "less than",
            Self::Le => "less than or equal to",
            Self::Gt => "greater than",
            Self::Ge => "greater than or equal to",
        }
    }

    pub fn compare<T: PartialOrd>(self, left: T, right: T) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Ne => left != right,
            Self::Lt => left < right,
            Self::Le => left <= right,
            Self::Gt => left > right,
            Self::Ge => left >= right,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericOperand {
    Value(f64),
    Field(NumericField),
}

impl fmt::Display for NumericOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "infinity" } else { "-infinity" })
            }
            Self::Value(v) => write!(f, "{}", v),
            Self::Field(field) => f.write_str(field.label()),
        }
    }
}

/// The date a release date is compared with. A set bound stands for that
/// set's release date until the search resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseBound {
    Date(NaiveDate),
    Set(String),
}

impl fmt::Display for ReleaseBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Set(code) => write!(f, "set {}", code),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error(transparent)]
    Syntax(#[from] regex::Error),
    #[error("'{0}' is not supported in search patterns")]
    Unsupported(String),
}

/// Letter escapes that mean the same thing in PostgreSQL's regular
/// expressions.
const PORTABLE_ESCAPES: &str = "AdDsSwWntr";

/// A case-insensitive regular expression, compared by its source pattern.
///
/// Patterns run both in process and as PostgreSQL `~*`, so syntax only one
/// of the two engines understands is rejected up front: letter escapes
/// outside `\d \s \w \D \S \W \n \t \r \A` (`\p{L}`, `\b`, `\z`, ...) and
/// `(?` groups other than `(?:`.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        check_portable(pattern)?;
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self(regex))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

fn check_portable(pattern: &str) -> Result<(), PatternError> {
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(e) if e.is_ascii_alphabetic() && !PORTABLE_ESCAPES.contains(e) => {
                    return Err(PatternError::Unsupported(format!("\\{}", e)));
                }
                _ => {}
            },
            '(' if chars.peek() == Some(&'?') => {
                chars.next();
                if chars.peek() != Some(&':') {
                    let flag = chars.peek().map(char::to_string).unwrap_or_default();
                    return Err(PatternError::Unsupported(format!("(?{}", flag)));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

/// How a text predicate matches. Needles are stored lowercased.
#[derive(Debug, Clone, PartialEq)]
pub enum TextMatch {
    Contains(String),
    Exact(String),
    Regex(Pattern),
}

/// A single field comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Text {
        field: TextField,
        matcher: TextMatch,
    },
    Numeric {
        field: NumericField,
        op: ComparisonOp,
        operand: NumericOperand,
    },
    OneOf {
        field: MembershipField,
        values: Vec<String>,
    },
    Colours {
        field: ColourField,
        op: ComparisonOp,
        colours: ColourSet,
    },
    Flag(CardFlag),
    /// Release date of the printing's set.
    Released {
        op: ComparisonOp,
        bound: ReleaseBound,
    },
}

impl Predicate {
    /// Whether the predicate reads a printing column.
    pub fn is_printing_level(&self) -> bool {
        match self {
            Self::Text { field, .. } => field.is_printing_level(),
            Self::Numeric { field, .. } => field.is_printing_level(),
            Self::OneOf { field, .. } => field.is_printing_level(),
            Self::Colours { .. } => false,
            Self::Flag(flag) => flag.is_printing_level(),
            Self::Released { .. } => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Matches every card.
    All,
    /// Matches no card.
    Nothing,
    Atom(Predicate),
    Not(Box<FilterExpr>),
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Conjunction. Nested conjunctions are flattened, `All` is dropped and
    /// any `Nothing` makes the whole expression `Nothing`.
    pub fn and(children: impl IntoIterator<Item = FilterExpr>) -> FilterExpr {
        let mut out = Vec::new();
        for child in children {
            match child {
                FilterExpr::All => {}
                FilterExpr::Nothing => return FilterExpr::Nothing,
                FilterExpr::And(inner) => out.extend(inner),
                other => out.push(other),
            }
        }
        match out.len() {
            0 => FilterExpr::All,
            1 => out.remove(0),
            _ => FilterExpr::And(out),
        }
    }

    /// Disjunction, the dual of [`FilterExpr::and`].
    pub fn or(children: impl IntoIterator<Item = FilterExpr>) -> FilterExpr {
        let mut out = Vec::new();
        for child in children {
            match child {
                FilterExpr::Nothing => {}
                FilterExpr::All => return FilterExpr::All,
                FilterExpr::Or(inner) => out.extend(inner),
                other => out.push(other),
            }
        }
        match out.len() {
            0 => FilterExpr::Nothing,
            1 => out.remove(0),
            _ => FilterExpr::Or(out),
        }
    }

    /// Logical negation, pushed down to the atoms with De Morgan's laws.
    pub fn negate(self) -> FilterExpr {
        match self {
            FilterExpr::All => FilterExpr::Nothing,
            FilterExpr::Nothing => FilterExpr::All,
            FilterExpr::Atom(p) => FilterExpr::Not(Box::new(FilterExpr::Atom(p))),
            FilterExpr::Not(inner) => *inner,
            FilterExpr::And(children) => {
                FilterExpr::or(children.into_iter().map(FilterExpr::negate))
            }
            FilterExpr::Or(children) => {
                FilterExpr::and(children.into_iter().map(FilterExpr::negate))
            }
        }
    }

    /// Whether any atom reads a printing column. Such expressions are
    /// evaluated per printing row rather than per card.
    pub fn has_printing_terms(&self) -> bool {
        match self {
            FilterExpr::All | FilterExpr::Nothing => false,
            FilterExpr::Atom(p) => p.is_printing_level(),
            FilterExpr::Not(inner) => inner.has_printing_terms(),
            FilterExpr::And(children) | FilterExpr::Or(children) => {
                children.iter().any(FilterExpr::has_printing_terms)
            }
        }
    }

    /// Number of atoms in the expression.
    pub fn atom_count(&self) -> usize {
        match self {
            FilterExpr::All | FilterExpr::Nothing => 0,
            FilterExpr::Atom(_) => 1,
            FilterExpr::Not(inner) => inner.atom_count(),
            FilterExpr::And(children) | FilterExpr::Or(children) => {
                children.iter().map(FilterExpr::atom_count).sum()
            }
        }
    }
}
