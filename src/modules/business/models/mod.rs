mod business_profile;

pub use business_profile::{BusinessProfile, BusinessProfileResponse, UpsertBusinessProfileRequest};
