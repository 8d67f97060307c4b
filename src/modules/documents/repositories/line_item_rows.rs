// MySQL persistence of line items, shared by the quotation and invoice
// repositories. Items keep their submission order through `position`.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{Executor, MySql, QueryBuilder, Transaction};

use crate::core::Result;
use crate::modules::documents::models::LineItem;

/// Item table of a document kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemTable {
    Quotation,
    Invoice,
}

impl ItemTable {
    fn table(&self) -> &'static str {
        match self {
            ItemTable::Quotation => "quotation_items",
            ItemTable::Invoice => "invoice_items",
        }
    }

    fn parent_column(&self) -> &'static str {
        match self {
            ItemTable::Quotation => "quotation_id",
            ItemTable::Invoice => "invoice_id",
        }
    }

    fn select_sql(&self) -> String {
        format!(
            "SELECT id, {} AS parent_id, description, quantity, unit, unit_price, amount FROM {}",
            self.parent_column(),
            self.table()
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    id: String,
    parent_id: String,
    description: String,
    quantity: Decimal,
    unit: String,
    unit_price: Decimal,
    amount: Decimal,
}

impl LineItemRow {
    fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            unit_price: self.unit_price,
            amount: self.amount,
        }
    }
}

/// Insert items of one document within the caller's transaction
pub async fn insert_line_items(
    tx: &mut Transaction<'_, MySql>,
    table: ItemTable,
    parent_id: &str,
    items: &[LineItem],
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
        "INSERT INTO {} (id, {}, position, description, quantity, unit, unit_price, amount) ",
        table.table(),
        table.parent_column()
    ));
    builder.push_values(items.iter().enumerate(), |mut row, (position, item)| {
        row.push_bind(item.id.clone())
            .push_bind(parent_id.to_string())
            .push_bind(position as i32)
            .push_bind(item.description.clone())
            .push_bind(item.quantity)
            .push_bind(item.unit.clone())
            .push_bind(item.unit_price)
            .push_bind(item.amount);
    });

    builder.build().execute(&mut **tx).await?;
    Ok(())
}

/// Remove every item of one document within the caller's transaction
pub async fn delete_line_items(
    tx: &mut Transaction<'_, MySql>,
    table: ItemTable,
    parent_id: &str,
) -> Result<()> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        table.table(),
        table.parent_column()
    );
    sqlx::query(&sql).bind(parent_id).execute(&mut **tx).await?;
    Ok(())
}

/// Items of one document, in submission order
pub async fn fetch_line_items<'c, E>(
    executor: E,
    table: ItemTable,
    parent_id: &str,
) -> Result<Vec<LineItem>>
where
    E: Executor<'c, Database = MySql>,
{
    let sql = format!(
        "{} WHERE {} = ? ORDER BY position",
        table.select_sql(),
        table.parent_column()
    );
    let rows = sqlx::query_as::<_, LineItemRow>(&sql)
        .bind(parent_id)
        .fetch_all(executor)
        .await?;

    Ok(rows.into_iter().map(LineItemRow::into_line_item).collect())
}

/// Items of several documents at once, grouped by document id
pub async fn fetch_line_items_for<'c, E>(
    executor: E,
    table: ItemTable,
    parent_ids: &[String],
) -> Result<HashMap<String, Vec<LineItem>>>
where
    E: Executor<'c, Database = MySql>,
{
    let mut grouped: HashMap<String, Vec<LineItem>> = HashMap::new();
    if parent_ids.is_empty() {
        return Ok(grouped);
    }

    let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
        "{} WHERE {} IN (",
        table.select_sql(),
        table.parent_column()
    ));
    let mut ids = builder.separated(", ");
    for id in parent_ids {
        ids.push_bind(id.clone());
    }
    ids.push_unseparated(") ORDER BY position");

    let rows = builder
        .build_query_as::<LineItemRow>()
        .fetch_all(executor)
        .await?;

    for row in rows {
        grouped
            .entry(row.parent_id.clone())
            .or_default()
            .push(row.into_line_item());
    }

    Ok(grouped)
}
