use crate::error::{Error, Result};
use crate::fields::CardFlag;
use crate::filter::{FilterExpr, Predicate};

/// Presence or absence of a boolean card property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagParam {
    flag: CardFlag,
    present: bool,
    pub(crate) negated: bool,
}

impl FlagParam {
    pub fn new(flag: CardFlag, present: bool, negated: bool) -> Self {
        Self {
            flag,
            present,
            negated,
        }
    }

    pub fn parse(name: &str, present: bool, negated: bool) -> Result<Self> {
        CardFlag::parse(name)
            .map(|flag| Self::new(flag, present, negated))
            .ok_or_else(|| Error::Validation(format!("Unknown card property \"{}\"", name)))
    }

    pub fn flag(&self) -> CardFlag {
        self.flag
    }

    pub fn present(&self) -> bool {
        self.present
    }

    fn holds(&self) -> bool {
        self.present != self.negated
    }

    pub fn to_filter(&self) -> FilterExpr {
        let expr = FilterExpr::Atom(Predicate::Flag(self.flag));
        if self.holds() {
            expr
        } else {
            expr.negate()
        }
    }

    pub fn describe(&self) -> String {
        let (yes, no) = self.flag.phrases();
        if self.holds() { yes } else { no }.to_string()
    }
}
