use std::sync::Arc;

use crate::{
    credentials::CredentialService,
    services::{AdminAccounts, MenuCatalog, OrderWorkflow, UserDirectory},
    store::Store,
};

/// Shared handler state. Every service receives the same storage handle.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialService,
    pub admins: AdminAccounts,
    pub menu: MenuCatalog,
    pub users: UserDirectory,
    pub orders: OrderWorkflow,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, credentials: CredentialService) -> Self {
        Self {
            admins: AdminAccounts::new(store.clone(), credentials.clone()),
            menu: MenuCatalog::new(store.clone()),
            users: UserDirectory::new(store.clone()),
            orders: OrderWorkflow::new(store),
            credentials,
        }
    }
}
