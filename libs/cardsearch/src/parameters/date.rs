use crate::catalog::SetCatalog;
use crate::error::{Error, Result};
use crate::filter::{ComparisonOp, FilterExpr, Predicate, ReleaseBound};
use chrono::NaiveDate;

/// Release date of a printing's set against a date, or against another
/// set's release date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDateParam {
    op: ComparisonOp,
    bound: ReleaseBound,
    pub(crate) negated: bool,
}

impl ReleaseDateParam {
    pub fn new(op: ComparisonOp, bound: ReleaseBound, negated: bool) -> Result<Self> {
        if !matches!(
            op,
            ComparisonOp::Lt | ComparisonOp::Le | ComparisonOp::Gt | ComparisonOp::Ge
        ) {
            return Err(Error::Validation(format!(
                "Release dates are compared with <, <=, > or >=, not '{}'",
                op
            )));
        }
        if let ReleaseBound::Set(code) = &bound {
            if code.trim().is_empty() {
                return Err(Error::Validation(
                    "A release date search needs a date or a set".to_string(),
                ));
            }
        }
        Ok(Self { op, bound, negated })
    }

    /// An ISO date (`2009-07-17`) or anything else as a set name or code.
    pub fn from_value(op: ComparisonOp, value: &str, negated: bool) -> Result<Self> {
        let value = value.trim();
        let bound = match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => ReleaseBound::Date(date),
            Err(_) => ReleaseBound::Set(value.to_lowercase()),
        };
        Self::new(op, bound, negated)
    }

    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    pub fn bound(&self) -> &ReleaseBound {
        &self.bound
    }

    /// Replace a set bound with that set's release date.
    pub(crate) fn resolve_sets(&mut self, catalog: &SetCatalog) -> Result<()> {
        let ReleaseBound::Set(value) = &self.bound else {
            return Ok(());
        };
        let set = catalog.resolve(value)?;
        let Some(date) = set.release_date else {
            return Err(Error::Validation(format!(
                "Set {} has no release date",
                set.code
            )));
        };
        self.bound = ReleaseBound::Date(date);
        Ok(())
    }

    pub fn to_filter(&self) -> FilterExpr {
        let expr = FilterExpr::Atom(Predicate::Released {
            op: self.op,
            bound: self.bound.clone(),
        });
        if self.negated {
            expr.negate()
        } else {
            expr
        }
    }

    pub fn describe(&self) -> String {
        let when = match self.op {
            ComparisonOp::Lt => "before",
            ComparisonOp::Le => "on or before",
            ComparisonOp::Gt => "after",
            _ => "on or after",
        };
        format!(
            "{} released {} {}",
            if self.negated { "wasn't" } else { "was" },
            when,
            self.bound
        )
    }
}
