//! SQL rendering of compiled card queries for PostgreSQL.
//!
//! Produces one `SELECT` over `cards c` with:
//! - a `WHERE` clause from the filter, wrapped in one `EXISTS` over
//!   `printings p` when it reads printing columns
//! - a single multi-key `ORDER BY` (missing values last, id last)
//! - `LIMIT` / `OFFSET` paging

mod bind;
mod filter;

use crate::db::CardQuery;
use crate::sort::{SortKey, SortSpec};
use bind::push_big_int;
use chrono::NaiveDate;

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
    Float(f64),
    Int(i32),
    BigInt(i64),
    Date(NaiveDate),
}

pub(crate) const CARD_COLUMNS: &str = "c.id, c.name, c.type_line, c.rules_text, c.flavour_text, \
     c.power, c.toughness, c.loyalty, c.mana_value, c.colour_flags, c.identity_flags, \
     c.has_colour_indicator, c.layout";

pub(crate) const PRINTINGS_SQL: &str = "SELECT p.id, p.card_id, p.set_code, p.number, p.rarity, \
     p.artist, p.price, p.is_reprint, p.watermark, s.release_date \
     FROM printings p LEFT JOIN sets s ON s.code = p.set_code \
     WHERE p.card_id = ANY($1) ORDER BY p.card_id, p.id";

pub(crate) const SETS_SQL: &str =
    "SELECT code, name, set_type, release_date FROM sets ORDER BY release_date, code";

/// Build the card query and its bind values.
pub fn build_card_sql(query: &CardQuery) -> (String, Vec<BindValue>) {
    let mut bind_params = Vec::new();
    let where_clause = query.filter.build_where(&mut bind_params);
    let mut sql = format!(
        "SELECT {} FROM cards c WHERE {} ORDER BY {}",
        CARD_COLUMNS,
        where_clause,
        build_order_by(&query.order)
    );
    if let Some(limit) = query.limit {
        let idx = push_big_int(&mut bind_params, i64::from(limit));
        sql.push_str(&format!(" LIMIT ${}", idx));
    }
    if query.offset > 0 {
        let idx = push_big_int(&mut bind_params, i64::from(query.offset));
        sql.push_str(&format!(" OFFSET ${}", idx));
    }
    (sql, bind_params)
}

fn build_order_by(specs: &[SortSpec]) -> String {
    let mut parts: Vec<String> = specs.iter().map(order_term).collect();
    parts.push("c.id ASC".to_string());
    parts.join(", ")
}

fn order_term(spec: &SortSpec) -> String {
    let dir = if spec.is_ascending() { "ASC" } else { "DESC" };
    let expr = match spec.key {
        SortKey::Name => return format!("LOWER(c.name) {dir}, c.name {dir}"),
        SortKey::Power => "NULLIF(c.power, 'NaN')",
        SortKey::Toughness => "NULLIF(c.toughness, 'NaN')",
        SortKey::Loyalty => "NULLIF(c.loyalty, 'NaN')",
        SortKey::ManaValue => "NULLIF(c.mana_value, 'NaN')",
        SortKey::Price => {
            "(SELECT MIN(NULLIF(p.price, 'NaN')) FROM printings p WHERE p.card_id = c.id)"
        }
        SortKey::Colour => "c.colour_sort_key",
        SortKey::ReleaseDate => {
            "(SELECT MIN(s.release_date) FROM printings p \
             JOIN sets s ON s.code = p.set_code WHERE p.card_id = c.id)"
        }
        SortKey::Rarity => {
            "(SELECT MIN(CASE p.rarity WHEN 'common' THEN 0 WHEN 'uncommon' THEN 1 \
             WHEN 'rare' THEN 2 WHEN 'mythic' THEN 3 ELSE 4 END) \
             FROM printings p WHERE p.card_id = c.id)"
        }
    };
    format!("{} {} NULLS LAST", expr, dir)
}
