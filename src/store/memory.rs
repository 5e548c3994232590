use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{
    AdminEntity, CreateAdminEntity, CreateMenuEntity, CreateOrderEntity, CreateUserEntity,
    MenuEntity, OrderEntity, OrderItemEntity, OrderLine, OrderStatus, PaymentStatus, UserEntity,
};

use super::{NameMatch, Store, StoreError, StoreResult};

/// In-process `Store` with the same observable semantics as `PgStore`:
/// sequential ids per table, unique admin usernames and user emails, soft
/// menu deletion and all-or-nothing order insertion. Used by the test
/// suite and for running the API without a database.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    admins: Vec<AdminEntity>,
    users: Vec<UserEntity>,
    menus: Vec<MenuRow>,
    orders: Vec<OrderEntity>,
    order_items: Vec<OrderItemEntity>,
}

struct MenuRow {
    menu: MenuEntity,
    deleted_at: Option<DateTime<Utc>>,
}

impl MenuRow {
    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn count_admins(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.admins.len() as i64)
    }

    async fn find_admin_by_username(&self, username: &str) -> StoreResult<Option<AdminEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .admins
            .iter()
            .find(|admin| admin.username == username)
            .cloned())
    }

    async fn insert_admin(&self, admin: CreateAdminEntity) -> StoreResult<AdminEntity> {
        let mut tables = self.tables.write().await;
        if tables.admins.iter().any(|a| a.username == admin.username) {
            return Err(StoreError::Conflict(format!(
                "admin username {} already exists",
                admin.username
            )));
        }

        let now = Utc::now();
        let admin = AdminEntity {
            id: next_id(tables.admins.len()),
            username: admin.username,
            password_hash: admin.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.admins.push(admin.clone());
        Ok(admin)
    }

    async fn insert_user(&self, user: CreateUserEntity) -> StoreResult<UserEntity> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "user email {} already exists",
                user.email
            )));
        }

        let now = Utc::now();
        let user = UserEntity {
            id: next_id(tables.users.len()),
            name: user.name,
            email: user.email,
            table_number: user.table_number,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i32) -> StoreResult<Option<UserEntity>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_users(&self, ids: &[i32]) -> StoreResult<Vec<UserEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn list_menus(&self) -> StoreResult<Vec<MenuEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .menus
            .iter()
            .filter(|row| row.is_live())
            .map(|row| row.menu.clone())
            .collect())
    }

    async fn find_menu(&self, id: i32) -> StoreResult<Option<MenuEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .menus
            .iter()
            .find(|row| row.is_live() && row.menu.id == id)
            .map(|row| row.menu.clone()))
    }

    async fn find_menu_by_name(
        &self,
        name: &str,
        mode: NameMatch,
    ) -> StoreResult<Option<MenuEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .menus
            .iter()
            .filter(|row| row.is_live())
            .find(|row| match mode {
                NameMatch::Exact => row.menu.name == name,
                NameMatch::Contains => row.menu.name.contains(name),
            })
            .map(|row| row.menu.clone()))
    }

    async fn insert_menu(&self, menu: CreateMenuEntity) -> StoreResult<MenuEntity> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let menu = MenuEntity {
            id: next_id(tables.menus.len()),
            name: menu.name,
            image: menu.image,
            category: menu.category,
            price: menu.price,
            available: menu.available,
            created_at: now,
            updated_at: now,
        };
        tables.menus.push(MenuRow {
            menu: menu.clone(),
            deleted_at: None,
        });
        Ok(menu)
    }

    async fn update_menu(
        &self,
        id: i32,
        menu: CreateMenuEntity,
    ) -> StoreResult<Option<MenuEntity>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables
            .menus
            .iter_mut()
            .find(|row| row.is_live() && row.menu.id == id)
        else {
            return Ok(None);
        };

        row.menu.name = menu.name;
        row.menu.image = menu.image;
        row.menu.category = menu.category;
        row.menu.price = menu.price;
        row.menu.available = menu.available;
        row.menu.updated_at = Utc::now();
        Ok(Some(row.menu.clone()))
    }

    async fn delete_menu(&self, id: i32) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables
            .menus
            .iter_mut()
            .find(|row| row.is_live() && row.menu.id == id)
        {
            Some(row) => {
                let now = Utc::now();
                row.deleted_at = Some(now);
                row.menu.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_order(
        &self,
        order: CreateOrderEntity,
        lines: Vec<OrderLine>,
    ) -> StoreResult<(OrderEntity, Vec<OrderItemEntity>)> {
        let mut tables = self.tables.write().await;

        // Foreign keys are checked up front so a rejected order leaves no rows.
        if !tables.users.iter().any(|u| u.id == order.user_id) {
            return Err(anyhow::anyhow!("order references missing user {}", order.user_id).into());
        }
        if let Some(line) = lines
            .iter()
            .find(|line| !tables.menus.iter().any(|row| row.menu.id == line.menu_id))
        {
            return Err(anyhow::anyhow!("order item references missing menu {}", line.menu_id).into());
        }

        let now = Utc::now();
        let order = OrderEntity {
            id: next_id(tables.orders.len()),
            user_id: order.user_id,
            status: order.status,
            payment_status: order.payment_status,
            total_price: order.total_price,
            created_at: now,
            updated_at: now,
        };

        let first_item_id = next_id(tables.order_items.len());
        let items: Vec<OrderItemEntity> = lines
            .into_iter()
            .enumerate()
            .map(|(offset, line)| OrderItemEntity {
                id: first_item_id + offset as i32,
                order_id: order.id,
                menu_id: line.menu_id,
                quantity: line.quantity,
                price: line.price,
                created_at: now,
            })
            .collect();

        tables.orders.push(order.clone());
        tables.order_items.extend(items.iter().cloned());
        Ok((order, items))
    }

    async fn find_order(&self, id: i32) -> StoreResult<Option<OrderEntity>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_orders(&self) -> StoreResult<Vec<OrderEntity>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.iter().rev().cloned().collect())
    }

    async fn list_orders_by_user(&self, user_id: i32) -> StoreResult<Vec<OrderEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_order_items(&self, order_ids: &[i32]) -> StoreResult<Vec<OrderItemEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .order_items
            .iter()
            .filter(|item| order_ids.contains(&item.order_id))
            .cloned()
            .collect())
    }

    async fn update_order_status(
        &self,
        id: i32,
        status: OrderStatus,
    ) -> StoreResult<Option<OrderEntity>> {
        let mut tables = self.tables.write().await;
        Ok(tables.orders.iter_mut().find(|o| o.id == id).map(|order| {
            order.status = status.as_str().to_string();
            order.updated_at = Utc::now();
            order.clone()
        }))
    }

    async fn update_payment_status(
        &self,
        id: i32,
        payment_status: PaymentStatus,
    ) -> StoreResult<Option<OrderEntity>> {
        let mut tables = self.tables.write().await;
        Ok(tables.orders.iter_mut().find(|o| o.id == id).map(|order| {
            order.payment_status = payment_status.as_str().to_string();
            order.updated_at = Utc::now();
            order.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tea() -> CreateMenuEntity {
        CreateMenuEntity {
            name: "Es Teh Manis".into(),
            image: String::new(),
            category: "Beverage".into(),
            price: 8000,
            available: true,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        let user = CreateUserEntity {
            name: "Jane".into(),
            email: "jane@x.com".into(),
            table_number: 2,
        };
        store.insert_user(user.clone()).await.unwrap();

        let err = store.insert_user(user).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn deleted_menu_is_invisible() {
        let store = MemoryStore::new();
        let menu = store.insert_menu(tea()).await.unwrap();

        assert!(store.delete_menu(menu.id).await.unwrap());
        assert!(!store.delete_menu(menu.id).await.unwrap());
        assert!(store.find_menu(menu.id).await.unwrap().is_none());
        assert!(store.list_menus().await.unwrap().is_empty());
        assert!(
            store
                .update_menu(menu.id, tea())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn rejected_order_leaves_no_rows() {
        let store = MemoryStore::new();
        let order = CreateOrderEntity {
            user_id: 42,
            status: "pending".into(),
            payment_status: "unpaid".into(),
            total_price: 0,
        };

        assert!(store.insert_order(order, vec![]).await.is_err());
        assert!(store.list_orders().await.unwrap().is_empty());
    }
}
