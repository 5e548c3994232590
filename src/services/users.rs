use std::sync::Arc;

use tracing::info;

use crate::{
    app_error::AppError,
    models::{CreateUserEntity, UserEntity},
    store::{Store, StoreError},
};

/// Customer registration.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn Store>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Registers a customer. The only rejection is a duplicate email.
    pub async fn create(&self, user: CreateUserEntity) -> Result<UserEntity, AppError> {
        let user = self.store.insert_user(user).await.map_err(|err| match err {
            StoreError::Conflict(_) => AppError::Conflict("Email is already registered".into()),
            other => other.into(),
        })?;

        info!("User #{} registered at table {}", user.id, user.table_number);
        Ok(user)
    }
}
