//! Demo dataset for local development.

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    app_state::AppState,
    models::{CreateMenuEntity, CreateUserEntity},
    services::orders::RequestedLine,
};

const MENU: &[(&str, &str, i64)] = &[
    ("Nasi Goreng Special", "Main Course", 35000),
    ("Mie Goreng", "Main Course", 30000),
    ("Es Teh Manis", "Beverage", 8000),
    ("Juice Alpukat", "Beverage", 15000),
    ("Sate Ayam", "Main Course", 25000),
    ("Gado-gado", "Main Course", 20000),
    ("Soto Ayam", "Main Course", 28000),
    ("Es Jeruk", "Beverage", 10000),
];

const USERS: &[(&str, &str, i32)] = &[
    ("John Doe", "john@example.com", 1),
    ("Jane Smith", "jane@example.com", 2),
    ("Ahmad Rizki", "ahmad@example.com", 3),
    ("Sarah Wilson", "sarah@example.com", 4),
];

/// (user index, [(menu index, quantity)], status, payment status)
const ORDERS: &[(usize, &[(usize, i32)], &str, &str)] = &[
    (0, &[(0, 1), (2, 1)], "completed", "paid"),
    (1, &[(4, 2), (7, 1)], "pending", "unpaid"),
    (2, &[(1, 1), (2, 1)], "processing", "paid"),
];

fn image_for(name: &str) -> String {
    format!(
        "https://example.com/{}.jpg",
        name.to_lowercase().replace(' ', "-")
    )
}

/// Loads the demo menu, users and orders unless the menu already has items.
/// Orders go through the order workflow so their totals are consistent.
pub async fn seed_demo_data(state: &AppState, actor: &str) -> Result<bool> {
    if !state.menu.list().await?.is_empty() {
        info!("Menu is not empty, skipping demo data");
        return Ok(false);
    }

    let mut menu_ids = Vec::with_capacity(MENU.len());
    for (name, category, price) in MENU {
        let menu = state
            .menu
            .create(CreateMenuEntity {
                name: name.to_string(),
                image: image_for(name),
                category: category.to_string(),
                price: *price,
                available: true,
            })
            .await
            .with_context(|| format!("Failed to seed menu item {}", name))?;
        menu_ids.push(menu.id);
    }

    let mut user_ids = Vec::with_capacity(USERS.len());
    for (name, email, table_number) in USERS {
        let user = state
            .users
            .create(CreateUserEntity {
                name: name.to_string(),
                email: email.to_string(),
                table_number: *table_number,
            })
            .await
            .with_context(|| format!("Failed to seed user {}", email))?;
        user_ids.push(user.id);
    }

    for (user, lines, status, payment_status) in ORDERS {
        let lines = lines
            .iter()
            .map(|(menu, quantity)| RequestedLine {
                menu_id: menu_ids[*menu],
                quantity: *quantity,
            })
            .collect();

        let view = state.orders.create(user_ids[*user], lines).await?;
        state
            .orders
            .update_status(view.order.id, status, actor)
            .await?;
        state
            .orders
            .update_payment_status(view.order.id, payment_status, actor)
            .await?;
    }

    info!(
        "Seeded {} menu items, {} users and {} orders",
        MENU.len(),
        USERS.len(),
        ORDERS.len()
    );
    Ok(true)
}
