use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{OrderEntity, OrderItemEntity, UserEntity};

/// An order with its line items, as seen by the customer who placed it.
#[derive(Serialize, Debug, ToSchema)]
pub struct OrderView {
    pub order: OrderEntity,
    pub items: Vec<OrderItemEntity>,
}

/// An order with its owning user and line items, as seen by an admin.
/// `user` is `null` when the owning user can no longer be resolved.
#[derive(Serialize, Debug, ToSchema)]
pub struct OrderWithContextView {
    pub order: OrderEntity,
    pub user: Option<UserEntity>,
    pub items: Vec<OrderItemEntity>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageRes {
    pub message: String,
}
