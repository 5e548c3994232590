use std::{collections::HashMap, sync::Arc};

use anyhow::Context;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    app_error::AppError,
    models::{
        CreateOrderEntity, OrderEntity, OrderItemEntity, OrderLine, OrderStatus, PaymentStatus,
        UserEntity,
    },
    store::Store,
    views::{OrderView, OrderWithContextView},
};

/// One requested line of a customer order.
#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct RequestedLine {
    pub menu_id: i32,
    pub quantity: i32,
}

/// Order placement, order read paths and admin status changes.
///
/// Line prices are snapshotted from the menu when the order is placed and
/// served unchanged afterwards, so later menu price edits never rewrite
/// historical orders.
#[derive(Clone)]
pub struct OrderWorkflow {
    store: Arc<dyn Store>,
}

fn order_not_found() -> AppError {
    AppError::NotFound("Order not found".into())
}

impl OrderWorkflow {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Validates every line against the live menu, prices it, and persists
    /// the order together with its items in one atomic write.
    pub async fn create(
        &self,
        user_id: i32,
        requested: Vec<RequestedLine>,
    ) -> Result<OrderView, AppError> {
        if requested.is_empty() {
            return Err(AppError::BadRequest("menu_items must not be empty".into()));
        }
        if let Some(line) = requested.iter().find(|line| line.quantity < 1) {
            return Err(AppError::BadRequest(format!(
                "Quantity for menu item with ID {} must be at least 1",
                line.menu_id
            )));
        }

        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let mut lines = Vec::with_capacity(requested.len());
        let mut total_price: i64 = 0;
        for line in requested {
            let menu = self.store.find_menu(line.menu_id).await?.ok_or_else(|| {
                AppError::NotFound(format!("Menu item with ID {} not found", line.menu_id))
            })?;

            if !menu.available {
                return Err(AppError::Unavailable(format!(
                    "Menu item {} is not available",
                    menu.name
                )));
            }

            let price = menu
                .price
                .checked_mul(i64::from(line.quantity))
                .and_then(|price| total_price.checked_add(price).map(|total| (price, total)));
            let Some((price, total)) = price else {
                return Err(AppError::BadRequest("Order total is out of range".into()));
            };
            total_price = total;

            lines.push(OrderLine {
                menu_id: menu.id,
                quantity: line.quantity,
                price,
            });
        }

        let (order, items) = self
            .store
            .insert_order(
                CreateOrderEntity {
                    user_id,
                    status: OrderStatus::Pending.as_str().into(),
                    payment_status: PaymentStatus::Unpaid.as_str().into(),
                    total_price,
                },
                lines,
            )
            .await
            .map_err(anyhow::Error::from)
            .context("Failed to create order")?;

        info!(
            "Order #{} placed by user #{} with {} items, total {}",
            order.id,
            user_id,
            items.len(),
            order.total_price
        );

        Ok(OrderView { order, items })
    }

    /// Every order owned by `user_id`, newest first. An empty list is not an error.
    pub async fn orders_for_user(&self, user_id: i32) -> Result<Vec<OrderView>, AppError> {
        let orders = self.store.list_orders_by_user(user_id).await?;
        let mut items = self.items_by_order(&orders).await?;

        Ok(orders
            .into_iter()
            .map(|order| OrderView {
                items: items.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<OrderWithContextView, AppError> {
        let order = self
            .store
            .find_order(id)
            .await?
            .ok_or_else(order_not_found)?;

        self.single_with_context(order).await
    }

    /// Every order, newest first.
    pub async fn list(&self) -> Result<Vec<OrderWithContextView>, AppError> {
        let orders = self.store.list_orders().await?;
        self.with_context(orders).await
    }

    pub async fn update_status(
        &self,
        id: i32,
        status: &str,
        admin: &str,
    ) -> Result<OrderWithContextView, AppError> {
        self.store
            .find_order(id)
            .await?
            .ok_or_else(order_not_found)?;

        let status: OrderStatus = status.parse().map_err(|_| {
            AppError::BadRequest(
                "Invalid status. Must be one of: pending, processing, completed, cancelled".into(),
            )
        })?;

        let order = self
            .store
            .update_order_status(id, status)
            .await?
            .ok_or_else(order_not_found)?;

        info!("Order #{} status set to {} by {}", order.id, status, admin);
        self.single_with_context(order).await
    }

    pub async fn update_payment_status(
        &self,
        id: i32,
        payment_status: &str,
        admin: &str,
    ) -> Result<OrderWithContextView, AppError> {
        self.store
            .find_order(id)
            .await?
            .ok_or_else(order_not_found)?;

        let payment_status: PaymentStatus = payment_status.parse().map_err(|_| {
            AppError::BadRequest(
                "Invalid payment status. Must be one of: unpaid, paid, refunded".into(),
            )
        })?;

        let order = self
            .store
            .update_payment_status(id, payment_status)
            .await?
            .ok_or_else(order_not_found)?;

        info!(
            "Order #{} payment status set to {} by {}",
            order.id, payment_status, admin
        );
        self.single_with_context(order).await
    }

    async fn single_with_context(
        &self,
        order: OrderEntity,
    ) -> Result<OrderWithContextView, AppError> {
        let mut views = self.with_context(vec![order]).await?;
        views.pop().ok_or_else(order_not_found)
    }

    async fn items_by_order(
        &self,
        orders: &[OrderEntity],
    ) -> Result<HashMap<i32, Vec<OrderItemEntity>>, AppError> {
        let order_ids: Vec<i32> = orders.iter().map(|order| order.id).collect();
        let items = self.store.list_order_items(&order_ids).await?;

        let mut group: HashMap<i32, Vec<OrderItemEntity>> = HashMap::new();
        for item in items {
            group.entry(item.order_id).or_default().push(item);
        }
        Ok(group)
    }

    async fn with_context(
        &self,
        orders: Vec<OrderEntity>,
    ) -> Result<Vec<OrderWithContextView>, AppError> {
        let mut items = self.items_by_order(&orders).await?;

        let mut user_ids: Vec<i32> = orders.iter().map(|order| order.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users: HashMap<i32, UserEntity> = self
            .store
            .find_users(&user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| OrderWithContextView {
                user: users.get(&order.user_id).cloned(),
                items: items.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }
}
