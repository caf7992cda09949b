// src/auth_manager.rs
// Identity collaborator. The platform owns authentication; this side only
// asks who the configured token belongs to.

use std::sync::Arc;
use tracing::debug;

use crate::api::{ApiClient, UserResponse};
use crate::errors::ApiError;
use crate::models::User;

pub struct AuthManager {
    api: Arc<ApiClient>,
}

impl AuthManager {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Resolves the current user. `None` means anonymous — either no token is
    /// configured or the server rejected it — and is not an error: the table
    /// renders with every row unsolved and without admin affordances.
    pub async fn current_user(&self) -> Result<Option<User>, ApiError> {
        match self.api.get::<UserResponse>("/auth/me").await {
            Ok(response) => {
                debug!("Authenticated as {}", response.user.display_name());
                Ok(Some(response.user))
            }
            Err(ApiError::Unauthorized) => {
                debug!("No authenticated user");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
