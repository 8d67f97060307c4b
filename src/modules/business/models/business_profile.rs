// Seller details printed on the owner's documents. One profile per owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::validation::{optional_email, optional_text, required_text};
use crate::core::{Owner, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct BusinessProfile {
    pub owner: Owner,
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub bank_account_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of the profile; empty optional fields are cleared
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertBusinessProfileRequest {
    #[serde(default)]
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub bank_account_name: Option<String>,
}

impl BusinessProfile {
    /// Validate a request; `created_at` carries over from the stored profile
    pub fn from_request(
        owner: Owner,
        request: UpsertBusinessProfileRequest,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            owner,
            name: required_text("Business name", &request.name, 200)?,
            tax_id: optional_text("Tax ID", request.tax_id.as_deref(), 20)?,
            address: optional_text("Address", request.address.as_deref(), 500)?,
            phone: optional_text("Phone", request.phone.as_deref(), 20)?,
            email: optional_email("Email", request.email.as_deref(), 100)?,
            bank_name: optional_text("Bank name", request.bank_name.as_deref(), 100)?,
            bank_account: optional_text("Bank account", request.bank_account.as_deref(), 50)?,
            bank_account_name: optional_text(
                "Bank account name",
                request.bank_account_name.as_deref(),
                100,
            )?,
            created_at,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfileResponse {
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub bank_account_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&BusinessProfile> for BusinessProfileResponse {
    fn from(profile: &BusinessProfile) -> Self {
        Self {
            name: profile.name.clone(),
            tax_id: profile.tax_id.clone(),
            address: profile.address.clone(),
            phone: profile.phone.clone(),
            email: profile.email.clone(),
            bank_name: profile.bank_name.clone(),
            bank_account: profile.bank_account.clone(),
            bank_account_name: profile.bank_account_name.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
