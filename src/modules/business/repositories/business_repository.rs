use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};

use crate::core::{Owner, Result};
use crate::modules::business::models::BusinessProfile;

#[async_trait]
pub trait BusinessProfileRepository: Send + Sync {
    async fn find(&self, owner: &Owner) -> Result<Option<BusinessProfile>>;

    /// Insert or replace the owner's profile
    async fn upsert(&self, profile: &BusinessProfile) -> Result<()>;
}

#[derive(Debug, FromRow)]
struct BusinessProfileRow {
    owner_id: String,
    name: String,
    tax_id: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    bank_name: Option<String>,
    bank_account: Option<String>,
    bank_account_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BusinessProfileRow> for BusinessProfile {
    fn from(row: BusinessProfileRow) -> Self {
        Self {
            owner: Owner::from_storage_key(&row.owner_id),
            name: row.name,
            tax_id: row.tax_id,
            address: row.address,
            phone: row.phone,
            email: row.email,
            bank_name: row.bank_name,
            bank_account: row.bank_account,
            bank_account_name: row.bank_account_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct MySqlBusinessProfileRepository {
    pool: MySqlPool,
}

impl MySqlBusinessProfileRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessProfileRepository for MySqlBusinessProfileRepository {
    async fn find(&self, owner: &Owner) -> Result<Option<BusinessProfile>> {
        let row = sqlx::query_as::<_, BusinessProfileRow>(
            r#"
            SELECT owner_id, name, tax_id, address, phone, email,
                   bank_name, bank_account, bank_account_name, created_at, updated_at
            FROM business_profiles
            WHERE owner_id = ?
            "#,
        )
        .bind(owner.storage_key())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BusinessProfile::from))
    }

    async fn upsert(&self, profile: &BusinessProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO business_profiles (
                owner_id, name, tax_id, address, phone, email,
                bank_name, bank_account, bank_account_name, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                name = VALUES(name),
                tax_id = VALUES(tax_id),
                address = VALUES(address),
                phone = VALUES(phone),
                email = VALUES(email),
                bank_name = VALUES(bank_name),
                bank_account = VALUES(bank_account),
                bank_account_name = VALUES(bank_account_name),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(profile.owner.storage_key())
        .bind(&profile.name)
        .bind(&profile.tax_id)
        .bind(&profile.address)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.bank_name)
        .bind(&profile.bank_account)
        .bind(&profile.bank_account_name)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
