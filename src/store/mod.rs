//! Storage boundary. Services hold an `Arc<dyn Store>` handed to them at
//! construction time.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::models::{
    AdminEntity, CreateAdminEntity, CreateMenuEntity, CreateOrderEntity, CreateUserEntity,
    MenuEntity, OrderEntity, OrderItemEntity, OrderLine, OrderStatus, PaymentStatus, UserEntity,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::Conflict(info.message().to_string())
            }
            other => StoreError::Other(other.into()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// How a menu name is matched against stored names. Both modes are
/// case-sensitive and resolve to the lowest matching id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    Exact,
    Contains,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn count_admins(&self) -> StoreResult<i64>;
    async fn find_admin_by_username(&self, username: &str) -> StoreResult<Option<AdminEntity>>;
    /// Fails with `Conflict` when the username is taken.
    async fn insert_admin(&self, admin: CreateAdminEntity) -> StoreResult<AdminEntity>;

    /// Fails with `Conflict` when the email is taken.
    async fn insert_user(&self, user: CreateUserEntity) -> StoreResult<UserEntity>;
    async fn find_user(&self, id: i32) -> StoreResult<Option<UserEntity>>;
    async fn find_users(&self, ids: &[i32]) -> StoreResult<Vec<UserEntity>>;

    async fn list_menus(&self) -> StoreResult<Vec<MenuEntity>>;
    async fn find_menu(&self, id: i32) -> StoreResult<Option<MenuEntity>>;
    async fn find_menu_by_name(&self, name: &str, mode: NameMatch)
    -> StoreResult<Option<MenuEntity>>;
    async fn insert_menu(&self, menu: CreateMenuEntity) -> StoreResult<MenuEntity>;
    async fn update_menu(&self, id: i32, menu: CreateMenuEntity)
    -> StoreResult<Option<MenuEntity>>;
    /// Soft delete. Returns `false` when no live menu has this id.
    async fn delete_menu(&self, id: i32) -> StoreResult<bool>;

    /// Persists the order and all of its lines atomically.
    async fn insert_order(
        &self,
        order: CreateOrderEntity,
        lines: Vec<OrderLine>,
    ) -> StoreResult<(OrderEntity, Vec<OrderItemEntity>)>;
    async fn find_order(&self, id: i32) -> StoreResult<Option<OrderEntity>>;
    /// Newest first.
    async fn list_orders(&self) -> StoreResult<Vec<OrderEntity>>;
    /// Newest first.
    async fn list_orders_by_user(&self, user_id: i32) -> StoreResult<Vec<OrderEntity>>;
    async fn list_order_items(&self, order_ids: &[i32]) -> StoreResult<Vec<OrderItemEntity>>;
    async fn update_order_status(
        &self,
        id: i32,
        status: OrderStatus,
    ) -> StoreResult<Option<OrderEntity>>;
    async fn update_payment_status(
        &self,
        id: i32,
        payment_status: PaymentStatus,
    ) -> StoreResult<Option<OrderEntity>>;
}
