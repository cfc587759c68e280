use crate::catalog::SetCatalog;
use crate::error::{Error, Result};
use crate::fields::MembershipField;
use crate::filter::{ComparisonOp, FilterExpr, Predicate};
use crate::models::Rarity;
use std::collections::BTreeSet;

/// Membership of a field's value in a set of tokens (set codes, rarities,
/// layouts). Tokens are compared case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct SetMembershipParam {
    field: MembershipField,
    values: BTreeSet<String>,
    pub(crate) negated: bool,
}

impl SetMembershipParam {
    pub fn new<I, S>(field: MembershipField, values: I, negated: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = BTreeSet::new();
        for value in values {
            let token = value.as_ref().trim().to_lowercase();
            if token.is_empty() {
                return Err(Error::Validation(format!(
                    "Empty value in {} search",
                    field.label()
                )));
            }
            let token = match field {
                MembershipField::Rarity => match Rarity::parse(&token) {
                    Some(rarity) => rarity.as_str().to_string(),
                    None => {
                        return Err(Error::Validation(format!("Unknown rarity \"{}\"", token)))
                    }
                },
                _ => token,
            };
            tokens.insert(token);
        }
        if tokens.is_empty() {
            return Err(Error::Validation(format!(
                "A {} search needs at least one value",
                field.label()
            )));
        }
        Ok(Self {
            field,
            values: tokens,
            negated,
        })
    }

    /// Rarity comparison (`rarity>=rare`), expanded into the rarities that
    /// satisfy it.
    pub fn rarity_comparison(op: ComparisonOp, rarity: Rarity, negated: bool) -> Result<Self> {
        let matching: Vec<&str> = Rarity::ALL
            .iter()
            .filter(|r| op.compare(**r, rarity))
            .map(|r| r.as_str())
            .collect();
        if matching.is_empty() {
            return Err(Error::Validation(format!(
                "No rarity is {} {}",
                op.words(),
                rarity
            )));
        }
        Self::new(MembershipField::Rarity, matching, negated)
    }

    pub fn field(&self) -> MembershipField {
        self.field
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Replace set names and partial names with canonical set codes.
    pub(crate) fn resolve_sets(&mut self, catalog: &SetCatalog) -> Result<()> {
        if self.field != MembershipField::Set {
            return Ok(());
        }
        let mut resolved = BTreeSet::new();
        for value in &self.values {
            let set = catalog.resolve(value)?;
            resolved.insert(set.code.to_lowercase());
        }
        self.values = resolved;
        Ok(())
    }

    pub fn to_filter(&self) -> FilterExpr {
        let expr = FilterExpr::Atom(Predicate::OneOf {
            field: self.field,
            values: self.values.iter().cloned().collect(),
        });
        if self.negated {
            expr.negate()
        } else {
            expr
        }
    }

    pub fn describe(&self) -> String {
        let label = self.field.label();
        let values: Vec<&str> = self.values().collect();
        match (values.as_slice(), self.negated) {
            ([single], false) => format!("{} is {}", label, single),
            ([single], true) => format!("{} isn't {}", label, single),
            (many, false) => format!("{} is one of {}", label, many.join(", ")),
            (many, true) => format!("{} isn't any of {}", label, many.join(", ")),
        }
    }
}
