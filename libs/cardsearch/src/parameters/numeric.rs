use crate::error::{Error, Result};
use crate::fields::NumericField;
use crate::filter::{ComparisonOp, FilterExpr, NumericOperand, Predicate};

/// Numeric comparison against a literal or another numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericParam {
    field: NumericField,
    op: ComparisonOp,
    operand: NumericOperand,
    pub(crate) negated: bool,
}

impl NumericParam {
    pub fn new(
        field: NumericField,
        op: ComparisonOp,
        operand: NumericOperand,
        negated: bool,
    ) -> Result<Self> {
        match operand {
            NumericOperand::Value(v) if v.is_nan() => {
                return Err(Error::Validation(format!(
                    "Can't compare {} with a value that isn't a number",
                    field.label()
                )));
            }
            NumericOperand::Field(NumericField::Price) => {
                return Err(Error::Validation(
                    "Price can't be used as the right-hand side of a comparison".to_string(),
                ));
            }
            _ => {}
        }
        Ok(Self {
            field,
            op,
            operand,
            negated,
        })
    }

    /// Build from an operator symbol (`=`, `!=`, `<`, `<=`, `>`, `>=`).
    pub fn from_symbol(
        field: NumericField,
        op: &str,
        operand: NumericOperand,
        negated: bool,
    ) -> Result<Self> {
        let Some(op) = ComparisonOp::parse(op) else {
            return Err(Error::Validation(format!(
                "Unknown operator '{}' for {}",
                op,
                field.label()
            )));
        };
        Self::new(field, op, operand, negated)
    }

    pub fn field(&self) -> NumericField {
        self.field
    }

    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    pub fn operand(&self) -> NumericOperand {
        self.operand
    }

    pub fn to_filter(&self) -> FilterExpr {
        let expr = FilterExpr::Atom(Predicate::Numeric {
            field: self.field,
            op: self.op,
            operand: self.operand,
        });
        if self.negated {
            expr.negate()
        } else {
            expr
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} {} {}",
            self.field.label(),
            if self.negated { "isn't" } else { "is" },
            self.op.words(),
            self.operand
        )
    }
}
