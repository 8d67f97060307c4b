use std::sync::Arc;

use chrono::Utc;

use crate::core::{Owner, Result};
use crate::modules::business::models::{
    BusinessProfile, BusinessProfileResponse, UpsertBusinessProfileRequest,
};
use crate::modules::business::repositories::BusinessProfileRepository;

pub struct BusinessService {
    profiles: Arc<dyn BusinessProfileRepository>,
}

impl BusinessService {
    pub fn new(profiles: Arc<dyn BusinessProfileRepository>) -> Self {
        Self { profiles }
    }

    /// `None` until the owner saves a profile
    pub async fn get(&self, owner: &Owner) -> Result<Option<BusinessProfileResponse>> {
        let profile = self.profiles.find(owner).await?;
        Ok(profile.as_ref().map(BusinessProfileResponse::from))
    }

    pub async fn upsert(
        &self,
        owner: &Owner,
        request: UpsertBusinessProfileRequest,
    ) -> Result<BusinessProfileResponse> {
        let now = Utc::now();
        let created_at = self
            .profiles
            .find(owner)
            .await?
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        let profile = BusinessProfile::from_request(owner.clone(), request, created_at, now)?;
        self.profiles.upsert(&profile).await?;

        tracing::info!(%owner, "Business profile saved");
        Ok(BusinessProfileResponse::from(&profile))
    }
}
