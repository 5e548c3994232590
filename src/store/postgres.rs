use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper, TextExpressionMethods};
use diesel_async::{
    AsyncConnection, AsyncPgConnection, RunQueryDsl,
    pooled_connection::bb8::{Pool, PooledConnection},
};

use crate::{
    models::{
        AdminEntity, CreateAdminEntity, CreateMenuEntity, CreateOrderEntity,
        CreateOrderItemEntity, CreateUserEntity, MenuEntity, OrderEntity, OrderItemEntity,
        OrderLine, OrderStatus, PaymentStatus, UserEntity,
    },
    schema::{admins, menus, order_items, orders, users},
};

use super::{NameMatch, Store, StoreError, StoreResult};

/// `Store` backed by PostgreSQL through a bb8 pool of async diesel connections.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    pub fn new(pool: Pool<AsyncPgConnection>) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> StoreResult<PooledConnection<'_, AsyncPgConnection>> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to obtain a DB connection pool")?;
        Ok(conn)
    }
}

/// Escapes LIKE wildcards so the user-supplied name is matched literally.
fn like_pattern(name: &str) -> String {
    let escaped = name
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl Store for PgStore {
    async fn count_admins(&self) -> StoreResult<i64> {
        let conn = &mut self.conn().await?;

        let count: i64 = admins::table
            .count()
            .get_result(conn)
            .await
            .context("Failed to count admins")?;

        Ok(count)
    }

    async fn find_admin_by_username(&self, username: &str) -> StoreResult<Option<AdminEntity>> {
        let conn = &mut self.conn().await?;

        let admin = admins::table
            .filter(admins::username.eq(username))
            .select(AdminEntity::as_select())
            .first(conn)
            .await
            .optional()
            .context("Failed to get admin")?;

        Ok(admin)
    }

    async fn insert_admin(&self, admin: CreateAdminEntity) -> StoreResult<AdminEntity> {
        let conn = &mut self.conn().await?;

        let admin = diesel::insert_into(admins::table)
            .values(admin)
            .returning(AdminEntity::as_returning())
            .get_result(conn)
            .await?;

        Ok(admin)
    }

    async fn insert_user(&self, user: CreateUserEntity) -> StoreResult<UserEntity> {
        let conn = &mut self.conn().await?;

        let user = diesel::insert_into(users::table)
            .values(user)
            .returning(UserEntity::as_returning())
            .get_result(conn)
            .await?;

        Ok(user)
    }

    async fn find_user(&self, id: i32) -> StoreResult<Option<UserEntity>> {
        let conn = &mut self.conn().await?;

        let user = users::table
            .find(id)
            .select(UserEntity::as_select())
            .first(conn)
            .await
            .optional()
            .context("Failed to get user")?;

        Ok(user)
    }

    async fn find_users(&self, ids: &[i32]) -> StoreResult<Vec<UserEntity>> {
        let conn = &mut self.conn().await?;

        let users = users::table
            .filter(users::id.eq_any(ids.to_vec()))
            .select(UserEntity::as_select())
            .get_results(conn)
            .await
            .context("Failed to get users")?;

        Ok(users)
    }

    async fn list_menus(&self) -> StoreResult<Vec<MenuEntity>> {
        let conn = &mut self.conn().await?;

        let menus = menus::table
            .filter(menus::deleted_at.is_null())
            .order_by(menus::id.asc())
            .select(MenuEntity::as_select())
            .get_results(conn)
            .await
            .context("Failed to get menus")?;

        Ok(menus)
    }

    async fn find_menu(&self, id: i32) -> StoreResult<Option<MenuEntity>> {
        let conn = &mut self.conn().await?;

        let menu = menus::table
            .find(id)
            .filter(menus::deleted_at.is_null())
            .select(MenuEntity::as_select())
            .first(conn)
            .await
            .optional()
            .context("Failed to get menu")?;

        Ok(menu)
    }

    async fn find_menu_by_name(
        &self,
        name: &str,
        mode: NameMatch,
    ) -> StoreResult<Option<MenuEntity>> {
        let conn = &mut self.conn().await?;

        let query = menus::table
            .filter(menus::deleted_at.is_null())
            .order_by(menus::id.asc())
            .select(MenuEntity::as_select())
            .into_boxed();

        let query = match mode {
            NameMatch::Exact => query.filter(menus::name.eq(name.to_string())),
            NameMatch::Contains => query.filter(menus::name.like(like_pattern(name))),
        };

        let menu = query
            .first(conn)
            .await
            .optional()
            .context("Failed to get menu by name")?;

        Ok(menu)
    }

    async fn insert_menu(&self, menu: CreateMenuEntity) -> StoreResult<MenuEntity> {
        let conn = &mut self.conn().await?;

        let menu = diesel::insert_into(menus::table)
            .values(menu)
            .returning(MenuEntity::as_returning())
            .get_result(conn)
            .await
            .context("Failed to create menu")?;

        Ok(menu)
    }

    async fn update_menu(
        &self,
        id: i32,
        menu: CreateMenuEntity,
    ) -> StoreResult<Option<MenuEntity>> {
        let conn = &mut self.conn().await?;

        let menu = diesel::update(menus::table.find(id).filter(menus::deleted_at.is_null()))
            .set((
                menus::name.eq(menu.name),
                menus::image.eq(menu.image),
                menus::category.eq(menu.category),
                menus::price.eq(menu.price),
                menus::available.eq(menu.available),
                menus::updated_at.eq(Utc::now()),
            ))
            .returning(MenuEntity::as_returning())
            .get_result(conn)
            .await
            .optional()
            .context("Failed to update menu")?;

        Ok(menu)
    }

    async fn delete_menu(&self, id: i32) -> StoreResult<bool> {
        let conn = &mut self.conn().await?;

        let deleted = diesel::update(menus::table.find(id).filter(menus::deleted_at.is_null()))
            .set((
                menus::deleted_at.eq(Some(Utc::now())),
                menus::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .await
            .context("Failed to delete menu")?;

        Ok(deleted > 0)
    }

    async fn insert_order(
        &self,
        order: CreateOrderEntity,
        lines: Vec<OrderLine>,
    ) -> StoreResult<(OrderEntity, Vec<OrderItemEntity>)> {
        let conn = &mut self.conn().await?;

        conn.transaction(move |conn| {
            Box::pin(async move {
                let order: OrderEntity = diesel::insert_into(orders::table)
                    .values(order)
                    .returning(OrderEntity::as_returning())
                    .get_result(conn)
                    .await
                    .context("Failed to create order")?;

                let items: Vec<CreateOrderItemEntity> = lines
                    .into_iter()
                    .map(|line| line.into_entity(order.id))
                    .collect();

                let items = diesel::insert_into(order_items::table)
                    .values(items)
                    .returning(OrderItemEntity::as_returning())
                    .get_results(conn)
                    .await
                    .context("Failed to create order items")?;

                Ok::<(OrderEntity, Vec<OrderItemEntity>), StoreError>((order, items))
            })
        })
        .await
    }

    async fn find_order(&self, id: i32) -> StoreResult<Option<OrderEntity>> {
        let conn = &mut self.conn().await?;

        let order = orders::table
            .find(id)
            .select(OrderEntity::as_select())
            .first(conn)
            .await
            .optional()
            .context("Failed to get order")?;

        Ok(order)
    }

    async fn list_orders(&self) -> StoreResult<Vec<OrderEntity>> {
        let conn = &mut self.conn().await?;

        let orders = orders::table
            .order_by(orders::id.desc())
            .select(OrderEntity::as_select())
            .get_results(conn)
            .await
            .context("Failed to get orders")?;

        Ok(orders)
    }

    async fn list_orders_by_user(&self, user_id: i32) -> StoreResult<Vec<OrderEntity>> {
        let conn = &mut self.conn().await?;

        let orders = orders::table
            .filter(orders::user_id.eq(user_id))
            .order_by(orders::id.desc())
            .select(OrderEntity::as_select())
            .get_results(conn)
            .await
            .context("Failed to get user orders")?;

        Ok(orders)
    }

    async fn list_order_items(&self, order_ids: &[i32]) -> StoreResult<Vec<OrderItemEntity>> {
        let conn = &mut self.conn().await?;

        let items = order_items::table
            .filter(order_items::order_id.eq_any(order_ids.to_vec()))
            .order_by(order_items::id.asc())
            .select(OrderItemEntity::as_select())
            .get_results(conn)
            .await
            .context("Failed to get order items")?;

        Ok(items)
    }

    async fn update_order_status(
        &self,
        id: i32,
        status: OrderStatus,
    ) -> StoreResult<Option<OrderEntity>> {
        let conn = &mut self.conn().await?;

        let order = diesel::update(orders::table.find(id))
            .set((
                orders::status.eq(status.as_str()),
                orders::updated_at.eq(Utc::now()),
            ))
            .returning(OrderEntity::as_returning())
            .get_result(conn)
            .await
            .optional()
            .context("Failed to update order status")?;

        Ok(order)
    }

    async fn update_payment_status(
        &self,
        id: i32,
        payment_status: PaymentStatus,
    ) -> StoreResult<Option<OrderEntity>> {
        let conn = &mut self.conn().await?;

        let order = diesel::update(orders::table.find(id))
            .set((
                orders::payment_status.eq(payment_status.as_str()),
                orders::updated_at.eq(Utc::now()),
            ))
            .returning(OrderEntity::as_returning())
            .get_result(conn)
            .await
            .optional()
            .context("Failed to update payment status")?;

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("goreng"), "%goreng%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
