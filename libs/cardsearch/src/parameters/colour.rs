use crate::error::{Error, Result};
use crate::fields::ColourField;
use crate::filter::{ComparisonOp, FilterExpr, Predicate};
use crate::models::ColourSet;

/// Colour or colour identity comparison using set semantics: `>=` includes
/// every listed colour, `<=` stays within them, `=` matches exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourParam {
    field: ColourField,
    op: ComparisonOp,
    colours: ColourSet,
    pub(crate) negated: bool,
}

impl ColourParam {
    pub fn new(
        field: ColourField,
        op: ComparisonOp,
        colours: ColourSet,
        negated: bool,
    ) -> Result<Self> {
        if op == ComparisonOp::Lt && colours.is_empty() {
            return Err(Error::Validation(format!(
                "No {} can be strictly within colourless",
                field.label()
            )));
        }
        Ok(Self {
            field,
            op,
            colours,
            negated,
        })
    }

    /// Build from a colour nickname such as `izzet`, `red` or `wub`.
    pub fn from_nickname(
        field: ColourField,
        op: ComparisonOp,
        text: &str,
        negated: bool,
    ) -> Result<Self> {
        let Some(colours) = ColourSet::from_nickname(text) else {
            return Err(Error::Validation(format!("Unknown colour \"{}\"", text)));
        };
        Self::new(field, op, colours, negated)
    }

    pub fn field(&self) -> ColourField {
        self.field
    }

    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    pub fn colours(&self) -> &ColourSet {
        &self.colours
    }

    pub fn to_filter(&self) -> FilterExpr {
        let expr = FilterExpr::Atom(Predicate::Colours {
            field: self.field,
            op: self.op,
            colours: self.colours.clone(),
        });
        if self.negated {
            expr.negate()
        } else {
            expr
        }
    }

    pub fn describe(&self) -> String {
        let (is, isnt) = match self.field {
            ColourField::Colours => ("are", "aren't"),
            ColourField::Identity => ("is", "isn't"),
        };
        let verb = if self.negated { isnt } else { is };
        if self.colours.is_empty() && self.op == ComparisonOp::Eq {
            return format!("{} {} colourless", self.field.label(), verb);
        }
        let relation = match self.op {
            ComparisonOp::Eq => "exactly",
            ComparisonOp::Ne => "anything but",
            ComparisonOp::Ge => "at least",
            ComparisonOp::Gt => "more than",
            ComparisonOp::Le => "at most",
            ComparisonOp::Lt => "fewer than",
        };
        format!(
            "{} {} {} {}",
            self.field.label(),
            verb,
            relation,
            self.colours.symbols()
        )
    }
}
