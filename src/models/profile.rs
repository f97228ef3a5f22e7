use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One per authenticated user; root aggregate for that user's pets and
/// bookings. Never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    /// Unique contact identifier, E.164-normalized on write.
    pub phone: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn create_default_from_phone(user_id: Uuid, phone: &str) -> Self {
        Self {
            id: user_id,
            phone: phone.to_string(),
            display_name: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial profile mutation; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(display_name) = &self.display_name {
            profile.display_name = Some(display_name.clone());
        }
        if let Some(avatar_url) = &self.avatar_url {
            profile.avatar_url = Some(avatar_url.clone());
        }
        profile.updated_at = Utc::now();
    }
}
