use super::bind::{escape_like, push_date, push_float, push_int, push_text, push_text_array};
use super::BindValue;
use crate::db::flags_from_colours;
use crate::fields::{CardFlag, ColourField, MembershipField, NumericField, TextField};
use crate::filter::{ComparisonOp, FilterExpr, NumericOperand, Predicate, ReleaseBound, TextMatch};

impl FilterExpr {
    /// Render the `WHERE` condition for `cards c`. An expression with
    /// printing-level atoms becomes one `EXISTS` over `printings p`, so all
    /// of its printing terms are tested against the same printing row.
    pub(crate) fn build_where(&self, bind_params: &mut Vec<BindValue>) -> String {
        let condition = self.build_sql(bind_params);
        if self.has_printing_terms() {
            format!(
                "EXISTS (SELECT 1 FROM printings p WHERE p.card_id = c.id AND {})",
                condition
            )
        } else {
            condition
        }
    }

    /// Render as a SQL boolean over the joined card/printing row. Every atom
    /// renders two-valued, so `NOT` never meets a NULL.
    pub(crate) fn build_sql(&self, bind_params: &mut Vec<BindValue>) -> String {
        match self {
            Self::All => "TRUE".to_string(),
            Self::Nothing => "FALSE".to_string(),
            Self::Atom(p) => p.build_sql(bind_params),
            Self::Not(inner) => format!("NOT ({})", inner.build_sql(bind_params)),
            Self::And(children) => join(children, " AND ", bind_params),
            Self::Or(children) => join(children, " OR ", bind_params),
        }
    }
}

fn join(children: &[FilterExpr], separator: &str, bind_params: &mut Vec<BindValue>) -> String {
    let parts: Vec<String> = children
        .iter()
        .map(|child| child.build_sql(bind_params))
        .collect();
    format!("({})", parts.join(separator))
}

impl Predicate {
    fn build_sql(&self, bind_params: &mut Vec<BindValue>) -> String {
        format!("COALESCE({}, FALSE)", self.build_condition(bind_params))
    }

    fn build_condition(&self, bind_params: &mut Vec<BindValue>) -> String {
        match self {
            Self::Text { field, matcher } => {
                let column = text_column(*field);
                match matcher {
                    TextMatch::Contains(needle) => {
                        let idx = push_text(bind_params, format!("%{}%", escape_like(needle)));
                        format!("{} ILIKE ${}", column, idx)
                    }
                    TextMatch::Exact(needle) => {
                        let idx = push_text(bind_params, needle.clone());
                        format!("LOWER({}) = ${}", column, idx)
                    }
                    TextMatch::Regex(pattern) => {
                        let idx = push_text(bind_params, pattern.as_str().to_string());
                        format!("{} ~* ${}", column, idx)
                    }
                }
            }
            Self::Numeric { field, op, operand } => {
                let right = match operand {
                    NumericOperand::Value(v) => format!("${}", push_float(bind_params, *v)),
                    NumericOperand::Field(other) => numeric_column(*other).to_string(),
                };
                format!("{} {} {}", numeric_column(*field), sql_op(*op), right)
            }
            Self::OneOf { field, values } => {
                let idx = push_text_array(bind_params, values.clone());
                let column = match field {
                    MembershipField::Set => "LOWER(p.set_code)",
                    MembershipField::Rarity => "p.rarity",
                    MembershipField::Layout => "LOWER(c.layout)",
                };
                format!("{} = ANY(${})", column, idx)
            }
            Self::Colours { field, op, colours } => {
                let column = match field {
                    ColourField::Colours => "c.colour_flags",
                    ColourField::Identity => "c.identity_flags",
                };
                let idx = push_int(bind_params, flags_from_colours(colours));
                match op {
                    ComparisonOp::Eq => format!("{} = ${}", column, idx),
                    ComparisonOp::Ne => format!("{} <> ${}", column, idx),
                    ComparisonOp::Ge => format!("({c} & ${i}) = ${i}", c = column, i = idx),
                    ComparisonOp::Gt => format!(
                        "(({c} & ${i}) = ${i} AND {c} <> ${i})",
                        c = column,
                        i = idx
                    ),
                    ComparisonOp::Le => format!("({c} | ${i}) = ${i}", c = column, i = idx),
                    ComparisonOp::Lt => format!(
                        "(({c} | ${i}) = ${i} AND {c} <> ${i})",
                        c = column,
                        i = idx
                    ),
                }
            }
            Self::Flag(flag) => match flag {
                CardFlag::Reprint => "p.is_reprint".to_string(),
                CardFlag::Watermark => "p.watermark IS NOT NULL".to_string(),
                CardFlag::ColourIndicator => "c.has_colour_indicator".to_string(),
                CardFlag::Multicoloured => "c.colour_count >= 2".to_string(),
                CardFlag::Vanilla => "COALESCE(TRIM(c.rules_text), '') = ''".to_string(),
            },
            Self::Released { op, bound } => {
                let right = match bound {
                    ReleaseBound::Date(date) => format!("${}", push_date(bind_params, *date)),
                    ReleaseBound::Set(code) => format!(
                        "(SELECT bs.release_date FROM sets bs WHERE LOWER(bs.code) = ${})",
                        push_text(bind_params, code.clone())
                    ),
                };
                format!(
                    "(SELECT s.release_date FROM sets s WHERE s.code = p.set_code) {} {}",
                    sql_op(*op),
                    right
                )
            }
        }
    }
}

fn text_column(field: TextField) -> &'static str {
    match field {
        TextField::Name => "c.name",
        TextField::RulesText => "c.rules_text",
        TextField::TypeLine => "c.type_line",
        TextField::FlavourText => "c.flavour_text",
        TextField::Artist => "p.artist",
    }
}

/// Stored NaN reads as NULL, so it never satisfies a comparison.
fn numeric_column(field: NumericField) -> &'static str {
    match field {
        NumericField::Power => "NULLIF(c.power, 'NaN')",
        NumericField::Toughness => "NULLIF(c.toughness, 'NaN')",
        NumericField::Loyalty => "NULLIF(c.loyalty, 'NaN')",
        NumericField::ManaValue => "NULLIF(c.mana_value, 'NaN')",
        NumericField::Price => "NULLIF(p.price, 'NaN')",
        NumericField::ColourCount => "c.colour_count",
        NumericField::IdentityCount => "c.identity_count",
    }
}

fn sql_op(op: ComparisonOp) -> &'static str {
    match op {
        ComparisonOp::Ne => "<>",
        other => other.symbol(),
    }
}
