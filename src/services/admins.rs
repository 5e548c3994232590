use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::{
    app_error::AppError, credentials::CredentialService, models::CreateAdminEntity, store::Store,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Argon2id hash with the default cost parameters that matches no password.
/// Checked for unknown usernames so both failures cost the same.
const UNKNOWN_ADMIN_HASH: &str = concat!(
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$",
    "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"
);

/// Admin login and startup bootstrap of the first admin account.
#[derive(Clone)]
pub struct AdminAccounts {
    store: Arc<dyn Store>,
    credentials: CredentialService,
}

impl AdminAccounts {
    pub fn new(store: Arc<dyn Store>, credentials: CredentialService) -> Self {
        Self { store, credentials }
    }

    /// Returns a session token. Unknown usernames and wrong passwords fail
    /// with the same message.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let Some(admin) = self.store.find_admin_by_username(username).await? else {
            self.credentials.verify_password(password, UNKNOWN_ADMIN_HASH);
            warn!("Rejected login for unknown admin {}", username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !self
            .credentials
            .verify_password(password, &admin.password_hash)
        {
            warn!("Rejected login for admin {}: wrong password", username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = self.credentials.issue_token(&admin.username)?;
        info!("Admin {} logged in", admin.username);
        Ok(token)
    }

    /// Creates an admin with the given credentials when none exists yet.
    /// Returns whether an admin was created.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        if self.store.count_admins().await? > 0 {
            return Ok(false);
        }

        let password_hash = self
            .credentials
            .hash_password(password)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("Failed to hash admin password")?;

        let admin = self
            .store
            .insert_admin(CreateAdminEntity {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!("Created default admin {}", admin.username);
        Ok(true)
    }
}
