// Customer persistence. Every statement is scoped by `owner_id`, so a
// foreign id behaves exactly like a missing one. `modify` locks the row
// from read to write, so concurrent partial updates both land.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};

use crate::core::{Owner, Result};
use crate::modules::customers::models::Customer;

/// Pure edit applied to the locked customer; must not perform I/O
pub type CustomerEdit = Box<dyn FnOnce(Customer) -> Result<Customer> + Send>;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<()>;

    async fn find_by_id(&self, owner: &Owner, id: &str) -> Result<Option<Customer>>;

    /// Customers among `ids` that belong to `owner`; unknown ids are skipped
    async fn find_many(&self, owner: &Owner, ids: &[String]) -> Result<Vec<Customer>>;

    /// All customers of `owner`, newest first
    async fn list(&self, owner: &Owner) -> Result<Vec<Customer>>;

    /// Apply `edit` to the locked customer and persist the result.
    /// `None` when no such customer exists for `owner`.
    async fn modify(
        &self,
        owner: &Owner,
        id: &str,
        edit: CustomerEdit,
    ) -> Result<Option<Customer>>;

    /// `false` when no such customer exists for `owner`
    async fn delete(&self, owner: &Owner, id: &str) -> Result<bool>;
}

const SELECT_CUSTOMER: &str = r#"
    SELECT id, owner_id, name, tax_id, address, phone, email, created_at, updated_at
    FROM customers
"#;

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: String,
    owner_id: String,
    name: String,
    tax_id: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            owner: Owner::from_storage_key(&row.owner_id),
            name: row.name,
            tax_id: row.tax_id,
            address: row.address,
            phone: row.phone,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct MySqlCustomerRepository {
    pool: MySqlPool,
}

impl MySqlCustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, owner_id, name, tax_id, address, phone, email, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.id)
        .bind(customer.owner.storage_key())
        .bind(&customer.name)
        .bind(&customer.tax_id)
        .bind(&customer.address)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, owner: &Owner, id: &str) -> Result<Option<Customer>> {
        let sql = format!("{} WHERE id = ? AND owner_id = ?", SELECT_CUSTOMER);
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(id)
            .bind(owner.storage_key())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Customer::from))
    }

    async fn find_many(&self, owner: &Owner, ids: &[String]) -> Result<Vec<Customer>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(SELECT_CUSTOMER);
        builder.push(" WHERE owner_id = ");
        builder.push_bind(owner.storage_key().to_string());
        builder.push(" AND id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<CustomerRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn list(&self, owner: &Owner) -> Result<Vec<Customer>> {
        let sql = format!(
            "{} WHERE owner_id = ? ORDER BY created_at DESC, id DESC",
            SELECT_CUSTOMER
        );
        let rows = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(owner.storage_key())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn modify(
        &self,
        owner: &Owner,
        id: &str,
        edit: CustomerEdit,
    ) -> Result<Option<Customer>> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ? AND owner_id = ? FOR UPDATE", SELECT_CUSTOMER);
        let Some(row) = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(id)
            .bind(owner.storage_key())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let customer = edit(Customer::from(row))?;

        sqlx::query(
            r#"
            UPDATE customers
            SET name = ?, tax_id = ?, address = ?, phone = ?, email = ?, updated_at = ?
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.tax_id)
        .bind(&customer.address)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(customer.updated_at)
        .bind(id)
        .bind(owner.storage_key())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(customer))
    }

    async fn delete(&self, owner: &Owner, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner.storage_key())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
