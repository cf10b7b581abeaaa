use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use tokio::sync::RwLock;

use super::repo_types::{FoodItem, FoodItemRow, UserId};

/// Per-user food item collections. Each user's collection is independent and
/// keeps insertion order.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list(&self, user: UserId) -> anyhow::Result<Vec<FoodItem>>;
    /// `false` when an item with the same identity is already stored.
    async fn add(&self, user: UserId, item: FoodItem) -> anyhow::Result<bool>;
    /// Removes the item with this identity; `false` when nothing matched.
    async fn remove(&self, user: UserId, name: &str, expiry_date: Date) -> anyhow::Result<bool>;
    /// Returns how many items were dropped.
    async fn clear(&self, user: UserId) -> anyhow::Result<u64>;
}

#[derive(Default)]
pub struct MemoryItemStore {
    items: RwLock<HashMap<UserId, Vec<FoodItem>>>,
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list(&self, user: UserId) -> anyhow::Result<Vec<FoodItem>> {
        Ok(self
            .items
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default())
    }

    async fn add(&self, user: UserId, item: FoodItem) -> anyhow::Result<bool> {
        let mut guard = self.items.write().await;
        let bucket = guard.entry(user).or_default();
        if bucket.iter().any(|other| other.is_duplicate_of(&item)) {
            return Ok(false);
        }
        bucket.push(item);
        Ok(true)
    }

    async fn remove(&self, user: UserId, name: &str, expiry_date: Date) -> anyhow::Result<bool> {
        let mut guard = self.items.write().await;
        let Some(bucket) = guard.get_mut(&user) else {
            return Ok(false);
        };
        let before = bucket.len();
        bucket.retain(|item| !item.same_identity(name, expiry_date));
        Ok(bucket.len() < before)
    }

    async fn clear(&self, user: UserId) -> anyhow::Result<u64> {
        let removed = self.items.write().await.remove(&user);
        Ok(removed.map(|v| v.len() as u64).unwrap_or(0))
    }
}

pub struct PgItemStore {
    db: PgPool,
}

impl PgItemStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn list(&self, user: UserId) -> anyhow::Result<Vec<FoodItem>> {
        let rows = sqlx::query_as::<_, FoodItemRow>(
            r#"
            SELECT name, expiry_date, added_date, category
              FROM food_items
             WHERE user_id = $1
             ORDER BY position ASC
            "#,
        )
        .bind(user)
        .fetch_all(&self.db)
        .await
        .context("list food items")?;

        rows.into_iter()
            .map(|r| FoodItem::try_from(r).map_err(anyhow::Error::from))
            .collect()
    }

    async fn add(&self, user: UserId, item: FoodItem) -> anyhow::Result<bool> {
        // the unique index on (user_id, name_key, expiry_date) enforces identity
        let res = sqlx::query(
            r#"
            INSERT INTO food_items (user_id, name, name_key, expiry_date, added_date, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user)
        .bind(&item.name)
        .bind(FoodItem::name_key(&item.name))
        .bind(item.expiry_date)
        .bind(item.added_date)
        .bind(item.category.as_str())
        .execute(&self.db)
        .await
        .context("insert food item")?;
        Ok(res.rows_affected() == 1)
    }

    async fn remove(&self, user: UserId, name: &str, expiry_date: Date) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM food_items
             WHERE user_id = $1 AND name_key = $2 AND expiry_date = $3
            "#,
        )
        .bind(user)
        .bind(FoodItem::name_key(name))
        .bind(expiry_date)
        .execute(&self.db)
        .await
        .context("delete food item")?;
        Ok(res.rows_affected() > 0)
    }

    async fn clear(&self, user: UserId) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM food_items WHERE user_id = $1")
            .bind(user)
            .execute(&self.db)
            .await
            .context("clear food items")?;
        Ok(res.rows_affected())
    }
}
