// Invoice persistence over `invoices` and `invoice_items`.
//
// Every statement is scoped by `owner_id`. Writes touching more than one
// row run in a single transaction; `modify` keeps the invoice row locked
// from read to commit.

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
use crate::modules::invoices::models::{Invoice, InvoiceFilter, InvoiceStatus, InvoiceSummary};

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert header and items; a taken number is a `Conflict`
    async fn create(&self, invoice: &Invoice) -> Result<()>;

    async fn find_by_id(&self, owner: &Owner, id: &str) -> Result<Option<Invoice>>;

    /// Newest first, items included. The status filter matches the display
    /// status as of `today`.
    async fn list(
        &self,
        owner: &Owner,
        filter: &InvoiceFilter,
        today: NaiveDate,
    ) -> Result<Vec<Invoice>>;

    /// Apply `mutation` to the locked invoice and persist the result.
    /// `None` when no such invoice exists for `owner`.
    async fn modify(
        &self,
        owner: &Owner,
        id: &str,
        mutation: Mutation<Invoice>,
    ) -> Result<Option<Invoice>>;

    /// Items go with the header
    async fn delete(&self, owner: &Owner, id: &str) -> Result<bool>;

    async fn count_by_customer(&self, owner: &Owner) -> Result<HashMap<String, u64>>;

    /// Header-only rows, newest first
    async fn summaries(&self, owner: &Owner, customer_id: Option<&str>)
        -> Result<Vec<InvoiceSummary>>;
}

const SELECT_INVOICE: &str = r#"
    SELECT id, owner_id, number, customer_id, quotation_id, issue_date, due_date,
           vat_rate, withholding_tax_rate, subtotal, vat_amount, withholding_tax, total,
           notes, status, paid_date, created_at, updated_at
    FROM invoices
"#;

const NUMBER_TAKEN: &str = "Invoice number already taken, please retry";

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: String,
    owner_id: String,
    number: String,
    customer_id: String,
    quotation_id: Option<String>,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    vat_rate: Decimal,
    withholding_tax_rate: Decimal,
    subtotal: Decimal,
    vat_amount: Decimal,
    withholding_tax: Decimal,
    total: Decimal,
    notes: Option<String>,
    #[sqlx(try_from = "String")]
    status: InvoiceStatus,
    paid_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_invoice(self, items: Vec<LineItem>) -> Invoice {
        Invoice {
            id: self.id,
            owner: Owner::from_storage_key(&self.owner_id),
            number: self.number,
            customer_id: self.customer_id,
            quotation_id: self.quotation_id,
            issue_date: self.issue_date,
            due_date: self.due_date,
            items,
            vat_rate: self.vat_rate,
            withholding_tax_rate: self.withholding_tax_rate,
            subtotal: self.subtotal,
            vat_amount: self.vat_amount,
            withholding_tax: self.withholding_tax,
            total: self.total,
            notes: self.notes,
            status: self.status,
            paid_date: self.paid_date,
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
    status: InvoiceStatus,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    total: Decimal,
    paid_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<SummaryRow> for InvoiceSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            number: row.number,
            customer_id: row.customer_id,
            status: row.status,
            issue_date: row.issue_date,
            due_date: row.due_date,
            total: row.total,
            paid_date: row.paid_date,
            created_at: row.created_at,
        }
    }
}

/// Translate a display status into conditions on stored columns
fn push_status_filter(builder: &mut QueryBuilder<'_, MySql>, status: InvoiceStatus, today: NaiveDate) {
    match status {
        InvoiceStatus::Overdue => {
            builder.push(" AND status = 'unpaid' AND due_date < ");
            builder.push_bind(today);
        }
        InvoiceStatus::Unpaid => {
            builder.push(" AND status = 'unpaid' AND due_date >= ");
            builder.push_bind(today);
        }
        stored => {
            builder.push(" AND status = ");
            builder.push_bind(stored.as_str());
        }
    }
}

pub struct MySqlInvoiceRepository {
    pool: MySqlPool,
}

impl MySqlInvoiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for MySqlInvoiceRepository {
    async fn create(&self, invoice: &Invoice) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, owner_id, number, customer_id, quotation_id, issue_date, due_date,
                vat_rate, withholding_tax_rate, subtotal, vat_amount, withholding_tax, total,
                notes, status, paid_date, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&invoice.id)
        .bind(invoice.owner.storage_key())
        .bind(&invoice.number)
        .bind(&invoice.customer_id)
        .bind(&invoice.quotation_id)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.vat_rate)
        .bind(invoice.withholding_tax_rate)
        .bind(invoice.subtotal)
        .bind(invoice.vat_amount)
        .bind(invoice.withholding_tax)
        .bind(invoice.total)
        .bind(&invoice.notes)
        .bind(invoice.status.as_str())
        .bind(invoice.paid_date)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(e, NUMBER_TAKEN))?;

        insert_line_items(&mut tx, ItemTable::Invoice, &invoice.id, &invoice.items).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, owner: &Owner, id: &str) -> Result<Option<Invoice>> {
        let sql = format!("{} WHERE id = ? AND owner_id = ?", SELECT_INVOICE);
        let Some(row) = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(id)
            .bind(owner.storage_key())
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let items = fetch_line_items(&self.pool, ItemTable::Invoice, &row.id).await?;
        Ok(Some(row.into_invoice(items)))
    }

    async fn list(
        &self,
        owner: &Owner,
        filter: &InvoiceFilter,
        today: NaiveDate,
    ) -> Result<Vec<Invoice>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(SELECT_INVOICE);
        builder.push(" WHERE owner_id = ");
        builder.push_bind(owner.storage_key().to_string());

        if let Some(status) = filter.status {
            push_status_filter(&mut builder, status, today);
        }
        if let Some(customer_id) = &filter.customer_id {
            builder.push(" AND customer_id = ");
            builder.push_bind(customer_id.clone());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows = builder
            .build_query_as::<InvoiceRow>()
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut items = fetch_line_items_for(&self.pool, ItemTable::Invoice, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let row_items = items.remove(&row.id).unwrap_or_default();
                row.into_invoice(row_items)
            })
            .collect())
    }

    async fn modify(
        &self,
        owner: &Owner,
        id: &str,
        mutation: Mutation<Invoice>,
    ) -> Result<Option<Invoice>> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ? AND owner_id = ? FOR UPDATE", SELECT_INVOICE);
        let Some(row) = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(id)
            .bind(owner.storage_key())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let items = fetch_line_items(&mut *tx, ItemTable::Invoice, id).await?;
        let revision = mutation(row.into_invoice(items))?;
        let invoice = &revision.document;

        sqlx::query(
            r#"
            UPDATE invoices
            SET customer_id = ?, issue_date = ?, due_date = ?, vat_rate = ?,
                withholding_tax_rate = ?, subtotal = ?, vat_amount = ?, withholding_tax = ?,
                total = ?, notes = ?, status = ?, paid_date = ?, updated_at = ?
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(&invoice.customer_id)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.vat_rate)
        .bind(invoice.withholding_tax_rate)
        .bind(invoice.subtotal)
        .bind(invoice.vat_amount)
        .bind(invoice.withholding_tax)
        .bind(invoice.total)
        .bind(&invoice.notes)
        .bind(invoice.status.as_str())
        .bind(invoice.paid_date)
        .bind(invoice.updated_at)
        .bind(id)
        .bind(owner.storage_key())
        .execute(&mut *tx)
        .await?;

        if revision.items_replaced {
            delete_line_items(&mut tx, ItemTable::Invoice, id).await?;
            insert_line_items(&mut tx, ItemTable::Invoice, id, &invoice.items).await?;
        }

        tx.commit().await?;
        Ok(Some(revision.document))
    }

    async fn delete(&self, owner: &Owner, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner.storage_key())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_customer(&self, owner: &Owner) -> Result<HashMap<String, u64>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT customer_id, COUNT(*) FROM invoices
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
    ) -> Result<Vec<InvoiceSummary>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            r#"SELECT id, number, customer_id, status, issue_date, due_date, total, paid_date,
                      created_at
               FROM invoices"#,
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

        Ok(rows.into_iter().map(InvoiceSummary::from).collect())
    }
}
