// Quotation persistence over `quotations` and `quotation_items`.
//
// Multi-statement writes run in one transaction. `modify` holds the row
// lock from read to commit, so concurrent edits of the same quotation are
// serialised and item replacement is never observed half done.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};

use crate::core::{AppError, Owner, Result};
use crate::modules::documents::repositories::{
    delete_line_items, fetch_line_items, fetch_line_items_for, insert_line_items, ItemTable,
};
use crate::modules::documents::{LineItem, Mutation};
use crate::modules::quotations::models::{
    Quotation, QuotationFilter, QuotationStatus, QuotationSummary,
};

#[async_trait]
pub trait QuotationRepository: Send + Sync {
    /// Insert header and items; a taken number is a `Conflict`
    async fn create(&self, quotation: &Quotation) -> Result<()>;

    async fn find_by_id(&self, owner: &Owner, id: &str) -> Result<Option<Quotation>>;

    /// Newest first, items included
    async fn list(&self, owner: &Owner, filter: &QuotationFilter) -> Result<Vec<Quotation>>;

    /// Apply `mutation` to the locked quotation and persist the result.
    /// `None` when no such quotation exists for `owner`.
    async fn modify(
        &self,
        owner: &Owner,
        id: &str,
        mutation: Mutation<Quotation>,
    ) -> Result<Option<Quotation>>;

    /// Items go with the header
    async fn delete(&self, owner: &Owner, id: &str) -> Result<bool>;

    async fn count_by_customer(&self, owner: &Owner) -> Result<HashMap<String, u64>>;

    /// Header-only rows, newest first
    async fn summaries(
        &self,
        owner: &Owner,
        customer_id: Option<&str>,
    ) -> Result<Vec<QuotationSummary>>;
}

const SELECT_QUOTATION: &str = r#"
    SELECT id, owner_id, number, customer_id, issue_date, valid_until, vat_rate,
           subtotal, vat_amount, total, notes, status, created_at, updated_at
    FROM quotations
"#;

const NUMBER_TAKEN: &str = "Quotation number already taken, please retry";

#[derive(Debug, FromRow)]
struct QuotationRow {
    id: String,
    owner_id: String,
    number: String,
    customer_id: String,
    issue_date: NaiveDate,
    valid_until: NaiveDate,
    vat_rate: Decimal,
    subtotal: Decimal,
    vat_amount: Decimal,
    total: Decimal,
    notes: Option<String>,
    #[sqlx(try_from = "String")]
    status: QuotationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuotationRow {
    fn into_quotation(self, items: Vec<LineItem>) -> Quotation {
        Quotation {
            id: self.id,
            owner: Owner::from_storage_key(&self.owner_id),
            number: self.number,
            customer_id: self.customer_id,
            issue_date: self.issue_date,
            valid_until: self.valid_until,
            items,
            vat_rate: self.vat_rate,
            subtotal: self.subtotal,
            vat_amount: self.vat_amount,
            total: self.total,
            notes: self.notes,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    id: String,
    number: String,
    customer_id: String,
    #[sqlx(try_from = "String")]
    status: QuotationStatus,
    issue_date: NaiveDate,
    total: Decimal,
    created_at: DateTime<Utc>,
}

impl From<SummaryRow> for QuotationSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            number: row.number,
            customer_id: row.customer_id,
            status: row.status,
            issue_date: row.issue_date,
            total: row.total,
            created_at: row.created_at,
        }
    }
}

pub struct MySqlQuotationRepository {
    pool: MySqlPool,
}

impl MySqlQuotationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuotationRepository for MySqlQuotationRepository {
    async fn create(&self, quotation: &Quotation) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quotations (
                id, owner_id, number, customer_id, issue_date, valid_until, vat_rate,
                subtotal, vat_amount, total, notes, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&quotation.id)
        .bind(quotation.owner.storage_key())
        .bind(&quotation.number)
        .bind(&quotation.customer_id)
        .bind(quotation.issue_date)
        .bind(quotation.valid_until)
        .bind(quotation.vat_rate)
        .bind(quotation.subtotal)
        .bind(quotation.vat_amount)
        .bind(quotation.total)
        .bind(&quotation.notes)
        .bind(quotation.status.as_str())
        .bind(quotation.created_at)
        .bind(quotation.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(e, NUMBER_TAKEN))?;

        insert_line_items(&mut tx, ItemTable::Quotation, &quotation.id, &quotation.items).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, owner: &Owner, id: &str) -> Result<Option<Quotation>> {
        let sql = format!("{} WHERE id = ? AND owner_id = ?", SELECT_QUOTATION);
        let Some(row) = sqlx::query_as::<_, QuotationRow>(&sql)
            .bind(id)
            .bind(owner.storage_key())
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let items = fetch_line_items(&self.pool, ItemTable::Quotation, &row.id).await?;
        Ok(Some(row.into_quotation(items)))
    }

    async fn list(&self, owner: &Owner, filter: &QuotationFilter) -> Result<Vec<Quotation>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(SELECT_QUOTATION);
        builder.push(" WHERE owner_id = ");
        builder.push_bind(owner.storage_key().to_string());

        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(customer_id) = &filter.customer_id {
            builder.push(" AND customer_id = ");
            builder.push_bind(customer_id.clone());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows = builder
            .build_query_as::<QuotationRow>()
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut items = fetch_line_items_for(&self.pool, ItemTable::Quotation, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let row_items = items.remove(&row.id).unwrap_or_default();
                row.into_quotation(row_items)
            })
            .collect())
    }

    async fn modify(
        &self,
        owner: &Owner,
        id: &str,
        mutation: Mutation<Quotation>,
    ) -> Result<Option<Quotation>> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ? AND owner_id = ? FOR UPDATE", SELECT_QUOTATION);
        let Some(row) = sqlx::query_as::<_, QuotationRow>(&sql)
            .bind(id)
            .bind(owner.storage_key())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let items = fetch_line_items(&mut *tx, ItemTable::Quotation, id).await?;
        let revision = mutation(row.into_quotation(items))?;
        let quotation = &revision.document;

        sqlx::query(
            r#"
            UPDATE quotations
            SET customer_id = ?, issue_date = ?, valid_until = ?, vat_rate = ?,
                subtotal = ?, vat_amount = ?, total = ?, notes = ?, status = ?, updated_at = ?
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(&quotation.customer_id)
        .bind(quotation.issue_date)
        .bind(quotation.valid_until)
        .bind(quotation.vat_rate)
        .bind(quotation.subtotal)
        .bind(quotation.vat_amount)
        .bind(quotation.total)
        .bind(&quotation.notes)
        .bind(quotation.status.as_str())
        .bind(quotation.updated_at)
        .bind(id)
        .bind(owner.storage_key())
        .execute(&mut *tx)
        .await?;

        if revision.items_replaced {
            delete_line_items(&mut tx, ItemTable::Quotation, id).await?;
            insert_line_items(&mut tx, ItemTable::Quotation, id, &quotation.items).await?;
        }

        tx.commit().await?;
        Ok(Some(revision.document))
    }

    async fn delete(&self, owner: &Owner, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM quotations WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner.storage_key())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_customer(&self, owner: &Owner) -> Result<HashMap<String, u64>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT customer_id, COUNT(*) FROM quotations
            WHERE owner_id = ?
            GROUP BY customer_id
            "#,
        )
        .bind(owner.storage_key())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(customer_id, count)| (customer_id, count.max(0) as u64))
            .collect())
    }

    async fn summaries(
        &self,
        owner: &Owner,
        customer_id: Option<&str>,
    ) -> Result<Vec<QuotationSummary>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT id, number, customer_id, status, issue_date, total, created_at FROM quotations",
        );
        builder.push(" WHERE owner_id = ");
        builder.push_bind(owner.storage_key().to_string());
        if let Some(customer_id) = customer_id {
            builder.push(" AND customer_id = ");
            builder.push_bind(customer_id.to_string());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows = builder
            .build_query_as::<SummaryRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(QuotationSummary::from).collect())
    }
}
