//! `profiles` table.

use uuid::Uuid;

use super::{logged, stamped, Gateway, Query};
use crate::error::GatewayResult;
use crate::models::{NewProfile, Profile, ProfileChanges, User};

const PROFILES: &str = "profiles";

impl Gateway {
    /// Fetch a profile. A missing row fails with a not-found error
    /// (`GatewayError::is_not_found`).
    pub async fn get_profile(&self, id: Uuid) -> GatewayResult<Profile> {
        tracing::debug!("Loading profile for user {}", id);
        let query = Query::table(PROFILES).select("*").eq("id", id);
        let result = self.select_single(query).await;
        match &result {
            Ok(_) => tracing::info!("Profile loaded"),
            Err(e) if e.is_not_found() => {
                tracing::warn!("Profile not found for user {}", id)
            }
            Err(e) => tracing::error!("Error loading profile: {}", e),
        }
        result
    }

    /// Create the profile row for an auth user from its metadata.
    pub async fn create_profile(&self, user: &User) -> GatewayResult<Profile> {
        tracing::debug!("Creating profile for {:?}", user.email);
        let row = NewProfile::from_user(user);
        logged(
            self.insert_single(PROFILES, &row).await,
            "Profile created",
            "Error creating profile",
        )
    }

    /// Apply changes to a profile, stamping `updated_at`.
    pub async fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> GatewayResult<Profile> {
        tracing::debug!("Updating profile {}", id);
        let body = stamped(changes)?;
        let query = Query::table(PROFILES).eq("id", id);
        logged(
            self.update_single(query, &body).await,
            "Profile updated",
            "Error updating profile",
        )
    }

    pub async fn delete_profile(&self, id: Uuid) -> GatewayResult<()> {
        tracing::debug!("Deleting profile {}", id);
        let query = Query::table(PROFILES).eq("id", id);
        logged(
            self.delete_where(query).await,
            "Profile deleted",
            "Error deleting profile",
        )
    }
}
