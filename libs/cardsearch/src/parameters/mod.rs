//! The search parameter tree.
//!
//! A [`Parameter`] is either a boolean combinator or one of a fixed set of
//! leaf kinds. Every node compiles itself into a [`FilterExpr`] and renders a
//! stable human-readable description.

mod colour;
mod date;
mod flag;
mod membership;
mod numeric;
mod text;

pub use colour::ColourParam;
pub use date::ReleaseDateParam;
pub use flag::FlagParam;
pub use membership::SetMembershipParam;
pub use numeric::NumericParam;
pub use text::{TextMode, TextParam};

use crate::catalog::SetCatalog;
use crate::error::{Error, Result};
use crate::fields::{CardFlag, ColourField, MembershipField, NumericField, TextField};
use crate::filter::{ComparisonOp, FilterExpr, NumericOperand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Boolean(BooleanParameter),
    Text(TextParam),
    Numeric(NumericParam),
    Membership(SetMembershipParam),
    Colour(ColourParam),
    Flag(FlagParam),
    Released(ReleaseDateParam),
}

impl Parameter {
    /// The empty AND: matches every card.
    pub fn all() -> Self {
        Parameter::Boolean(BooleanParameter::and())
    }

    /// The empty OR: matches no card.
    pub fn none() -> Self {
        Parameter::Boolean(BooleanParameter::or())
    }

    pub fn text(
        field: TextField,
        value: impl Into<String>,
        mode: TextMode,
        negated: bool,
    ) -> Result<Self> {
        TextParam::new(field, value, mode, negated).map(Parameter::Text)
    }

    pub fn numeric(field: NumericField, op: &str, value: f64, negated: bool) -> Result<Self> {
        NumericParam::from_symbol(field, op, NumericOperand::Value(value), negated)
            .map(Parameter::Numeric)
    }

    pub fn membership<I, S>(field: MembershipField, values: I, negated: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SetMembershipParam::new(field, values, negated).map(Parameter::Membership)
    }

    pub fn colour(field: ColourField, op: &str, colours: &str, negated: bool) -> Result<Self> {
        let Some(op) = ComparisonOp::parse(op) else {
            return Err(Error::Validation(format!(
                "Unknown operator '{}' for {}",
                op,
                field.label()
            )));
        };
        ColourParam::from_nickname(field, op, colours, negated).map(Parameter::Colour)
    }

    pub fn flag(flag: CardFlag, present: bool, negated: bool) -> Self {
        Parameter::Flag(FlagParam::new(flag, present, negated))
    }

    /// Release date comparison against an ISO date or a set.
    pub fn released(op: &str, value: &str, negated: bool) -> Result<Self> {
        let Some(op) = ComparisonOp::parse(op) else {
            return Err(Error::Validation(format!(
                "Unknown operator '{}' for release date",
                op
            )));
        };
        ReleaseDateParam::from_value(op, value, negated).map(Parameter::from)
    }

    pub fn is_negated(&self) -> bool {
        match self {
            Parameter::Boolean(p) => p.negated,
            Parameter::Text(p) => p.negated,
            Parameter::Numeric(p) => p.negated,
            Parameter::Membership(p) => p.negated,
            Parameter::Colour(p) => p.negated,
            Parameter::Flag(p) => p.negated,
            Parameter::Released(p) => p.negated,
        }
    }

    pub fn set_negated(&mut self, negated: bool) {
        match self {
            Parameter::Boolean(p) => p.negated = negated,
            Parameter::Text(p) => p.negated = negated,
            Parameter::Numeric(p) => p.negated = negated,
            Parameter::Membership(p) => p.negated = negated,
            Parameter::Colour(p) => p.negated = negated,
            Parameter::Flag(p) => p.negated = negated,
            Parameter::Released(p) => p.negated = negated,
        }
    }

    /// Flip the node's own negation flag.
    pub fn negate(mut self) -> Self {
        let negated = self.is_negated();
        self.set_negated(!negated);
        self
    }

    pub fn to_filter(&self) -> FilterExpr {
        match self {
            Parameter::Boolean(p) => p.to_filter(),
            Parameter::Text(p) => p.to_filter(),
            Parameter::Numeric(p) => p.to_filter(),
            Parameter::Membership(p) => p.to_filter(),
            Parameter::Colour(p) => p.to_filter(),
            Parameter::Flag(p) => p.to_filter(),
            Parameter::Released(p) => p.to_filter(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Parameter::Boolean(p) => p.describe(),
            Parameter::Text(p) => p.describe(),
            Parameter::Numeric(p) => p.describe(),
            Parameter::Membership(p) => p.describe(),
            Parameter::Colour(p) => p.describe(),
            Parameter::Flag(p) => p.describe(),
            Parameter::Released(p) => p.describe(),
        }
    }

    /// Resolve every set named in the tree against the catalog.
    pub(crate) fn resolve_sets(&mut self, catalog: &SetCatalog) -> Result<()> {
        match self {
            Parameter::Boolean(p) => p
                .children
                .iter_mut()
                .try_for_each(|child| child.resolve_sets(catalog)),
            Parameter::Membership(p) => p.resolve_sets(catalog),
            Parameter::Released(p) => p.resolve_sets(catalog),
            _ => Ok(()),
        }
    }

    /// A set named by a single non-negated `set` leaf directly under a
    /// non-negated AND (or by the node itself).
    pub fn implied_set(&self) -> Option<&str> {
        fn single_set(p: &SetMembershipParam) -> Option<&str> {
            if p.negated || p.field() != MembershipField::Set {
                return None;
            }
            let mut values = p.values();
            match (values.next(), values.next()) {
                (Some(code), None) => Some(code),
                _ => None,
            }
        }

        match self {
            Parameter::Membership(p) => single_set(p),
            Parameter::Boolean(b) if b.op == BoolOp::And && !b.negated => {
                b.children.iter().find_map(|child| match child {
                    Parameter::Membership(p) => single_set(p),
                    _ => None,
                })
            }
            _ => None,
        }
    }

    fn is_multi_child_group(&self, op: BoolOp) -> bool {
        matches!(self, Parameter::Boolean(b) if b.op == op && b.children.len() > 1 && !b.negated)
    }
}

macro_rules! impl_from_leaf {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Parameter {
                fn from(p: $ty) -> Self {
                    Parameter::$variant(p)
                }
            }
        )*
    };
}

impl_from_leaf! {
    BooleanParameter => Boolean,
    TextParam => Text,
    NumericParam => Numeric,
    SetMembershipParam => Membership,
    ColourParam => Colour,
    FlagParam => Flag,
    ReleaseDateParam => Released,
}

/// AND / OR over any number of children, or NOT over exactly one.
///
/// Children keep their insertion order and duplicates are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanParameter {
    op: BoolOp,
    children: Vec<Parameter>,
    pub(crate) negated: bool,
}

impl BooleanParameter {
    pub fn and() -> Self {
        Self {
            op: BoolOp::And,
            children: Vec::new(),
            negated: false,
        }
    }

    pub fn or() -> Self {
        Self {
            op: BoolOp::Or,
            children: Vec::new(),
            negated: false,
        }
    }

    pub fn not(child: impl Into<Parameter>) -> Self {
        Self {
            op: BoolOp::Not,
            children: vec![child.into()],
            negated: false,
        }
    }

    /// AND over the given children.
    pub fn all_of(children: Vec<Parameter>) -> Self {
        Self {
            op: BoolOp::And,
            children,
            negated: false,
        }
    }

    /// OR over the given children.
    pub fn any_of(children: Vec<Parameter>) -> Self {
        Self {
            op: BoolOp::Or,
            children,
            negated: false,
        }
    }

    pub fn with_children(op: BoolOp, children: Vec<Parameter>) -> Result<Self> {
        if op == BoolOp::Not && children.len() != 1 {
            return Err(Error::Validation(format!(
                "A NOT group takes exactly one child, got {}",
                children.len()
            )));
        }
        Ok(Self {
            op,
            children,
            negated: false,
        })
    }

    pub fn op(&self) -> BoolOp {
        self.op
    }

    pub fn children(&self) -> &[Parameter] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_parameter(&mut self, param: impl Into<Parameter>) -> Result<()> {
        if self.op == BoolOp::Not {
            return Err(Error::Validation(
                "A NOT group already has its single child".to_string(),
            ));
        }
        self.children.push(param.into());
        Ok(())
    }

    pub fn to_filter(&self) -> FilterExpr {
        let children = self.children.iter().map(Parameter::to_filter);
        let expr = match self.op {
            BoolOp::And => FilterExpr::and(children),
            BoolOp::Or => FilterExpr::or(children),
            BoolOp::Not => FilterExpr::and(children).negate(),
        };
        if self.negated {
            expr.negate()
        } else {
            expr
        }
    }

    pub fn describe(&self) -> String {
        let inner = match self.op {
            BoolOp::And => match self.children.as_slice() {
                [] => "all cards".to_string(),
                [only] => only.describe(),
                many => many
                    .iter()
                    .map(|child| {
                        if child.is_multi_child_group(BoolOp::Or) {
                            format!("({})", child.describe())
                        } else {
                            child.describe()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" and "),
            },
            BoolOp::Or => match self.children.as_slice() {
                [] => "no cards".to_string(),
                [only] => only.describe(),
                many => many
                    .iter()
                    .map(Parameter::describe)
                    .collect::<Vec<_>>()
                    .join(" or "),
            },
            BoolOp::Not => {
                let child = self
                    .children
                    .first()
                    .map(Parameter::describe)
                    .unwrap_or_else(|| "all cards".to_string());
                // NOT of a negated group reads as the group itself
                if self.negated {
                    return child;
                }
                format!("not ({})", child)
            }
        };
        if self.negated && self.op != BoolOp::Not {
            format!("not ({})", inner)
        } else {
            inner
        }
    }
}
