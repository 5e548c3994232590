use std::sync::Arc;

use tracing::info;

use crate::{
    app_error::AppError,
    models::{CreateMenuEntity, MenuEntity},
    store::{NameMatch, Store},
};

/// Addresses a single menu record for update and delete.
#[derive(Debug, Clone)]
pub enum MenuKey {
    Id(i32),
    /// Exact, case-sensitive name.
    Name(String),
}

/// Admin CRUD over the menu.
#[derive(Clone)]
pub struct MenuCatalog {
    store: Arc<dyn Store>,
}

fn not_found() -> AppError {
    AppError::NotFound("Menu not found".into())
}

fn validate(menu: &CreateMenuEntity) -> Result<(), AppError> {
    if menu.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if menu.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    Ok(())
}

impl MenuCatalog {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<MenuEntity>, AppError> {
        Ok(self.store.list_menus().await?)
    }

    pub async fn get(&self, id: i32) -> Result<MenuEntity, AppError> {
        self.store.find_menu(id).await?.ok_or_else(not_found)
    }

    /// First menu, by ascending id, whose name contains `fragment`.
    pub async fn search_by_name(&self, fragment: &str) -> Result<MenuEntity, AppError> {
        self.store
            .find_menu_by_name(fragment, NameMatch::Contains)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(&self, menu: CreateMenuEntity) -> Result<MenuEntity, AppError> {
        validate(&menu)?;
        let menu = self.store.insert_menu(menu).await?;
        info!("Menu #{} ({}) created", menu.id, menu.name);
        Ok(menu)
    }

    /// Replaces all five editable fields.
    pub async fn update(
        &self,
        key: MenuKey,
        menu: CreateMenuEntity,
    ) -> Result<MenuEntity, AppError> {
        let id = self.resolve(&key).await?;
        validate(&menu)?;

        let menu = self
            .store
            .update_menu(id, menu)
            .await?
            .ok_or_else(not_found)?;

        info!("Menu #{} ({}) updated", menu.id, menu.name);
        Ok(menu)
    }

    pub async fn delete(&self, key: MenuKey) -> Result<(), AppError> {
        let id = self.resolve(&key).await?;
        if !self.store.delete_menu(id).await? {
            return Err(not_found());
        }

        info!("Menu #{} deleted", id);
        Ok(())
    }

    async fn resolve(&self, key: &MenuKey) -> Result<i32, AppError> {
        let menu = match key {
            MenuKey::Id(id) => self.store.find_menu(*id).await?,
            MenuKey::Name(name) => self.store.find_menu_by_name(name, NameMatch::Exact).await?,
        };
        menu.map(|menu| menu.id).ok_or_else(not_found)
    }
}
