//! PostgreSQL card store.

use super::query_builder::{self, BindValue, PRINTINGS_SQL, SETS_SQL};
use super::{colours_from_flags, CardQuery, CardStore};
use crate::error::{Error, Result};
use crate::models::{CardRecord, PrintingRecord, Rarity, SetInfo};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::time::Instant;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone)]
pub struct PgCardStore {
    pool: PgPool,
}

impl PgCardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    async fn fetch_printings(&self, card_ids: &[i64]) -> Result<HashMap<i64, Vec<PrintingRecord>>> {
        let rows = sqlx::query(PRINTINGS_SQL)
            .bind(card_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let mut by_card: HashMap<i64, Vec<PrintingRecord>> = HashMap::new();
        for row in &rows {
            let card_id: i64 = row.try_get("card_id")?;
            by_card.entry(card_id).or_default().push(printing_from_row(row)?);
        }
        Ok(by_card)
    }
}

fn card_from_row(row: &PgRow) -> Result<CardRecord> {
    Ok(CardRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        type_line: row.try_get("type_line")?,
        rules_text: row.try_get("rules_text")?,
        flavour_text: row.try_get("flavour_text")?,
        power: row.try_get("power")?,
        toughness: row.try_get("toughness")?,
        loyalty: row.try_get("loyalty")?,
        mana_value: row.try_get("mana_value")?,
        colours: colours_from_flags(row.try_get("colour_flags")?),
        colour_identity: colours_from_flags(row.try_get("identity_flags")?),
        has_colour_indicator: row.try_get("has_colour_indicator")?,
        layout: row.try_get("layout")?,
        printings: Vec::new(),
    })
}

fn printing_from_row(row: &PgRow) -> Result<PrintingRecord> {
    let rarity: String = row.try_get("rarity")?;
    let rarity = Rarity::parse(&rarity)
        .ok_or_else(|| Error::Internal(format!("Unknown rarity in database: {}", rarity)))?;
    Ok(PrintingRecord {
        id: row.try_get("id")?,
        set_code: row.try_get("set_code")?,
        number: row.try_get("number")?,
        rarity,
        artist: row.try_get("artist")?,
        price: row.try_get("price")?,
        is_reprint: row.try_get("is_reprint")?,
        watermark: row.try_get("watermark")?,
        release_date: row.try_get("release_date")?,
    })
}

#[async_trait]
impl CardStore for PgCardStore {
    async fn fetch_cards(&self, query: &CardQuery) -> Result<Vec<CardRecord>> {
        let (sql, bind_values) = query_builder::build_card_sql(query);
        tracing::debug!(sql = %sql, binds = bind_values.len(), "Executing card query");

        let started = Instant::now();
        let mut query_builder = sqlx::query(&sql);
        for value in bind_values {
            query_builder = match value {
                BindValue::Text(v) => query_builder.bind(v),
                BindValue::TextArray(vs) => query_builder.bind(vs),
                BindValue::Float(v) => query_builder.bind(v),
                BindValue::Int(v) => query_builder.bind(v),
                BindValue::BigInt(v) => query_builder.bind(v),
                BindValue::Date(v) => query_builder.bind(v),
            };
        }

        let rows = query_builder
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        let mut cards = rows.iter().map(card_from_row).collect::<Result<Vec<_>>>()?;

        let ids: Vec<i64> = cards.iter().map(|c| c.id).collect();
        let mut printings = self.fetch_printings(&ids).await?;
        for card in &mut cards {
            card.printings = printings.remove(&card.id).unwrap_or_default();
        }

        tracing::debug!(
            rows = cards.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Card query finished"
        );
        Ok(cards)
    }

    async fn load_sets(&self) -> Result<Vec<SetInfo>> {
        let rows = sqlx::query(SETS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        rows.iter()
            .map(|row| -> Result<SetInfo> {
                Ok(SetInfo {
                    code: row.try_get("code")?,
                    name: row.try_get("name")?,
                    set_type: row.try_get("set_type")?,
                    release_date: row.try_get("release_date")?,
                })
            })
            .collect()
    }
}
