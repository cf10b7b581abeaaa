use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A user's note on a recipe they tried. One per (user, recipe); latest wins.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Feedback {
    pub recipe: String,
    pub user_id: Uuid,
    pub feedback: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn submit(&self, user: Uuid, recipe: &str, feedback: &str) -> anyhow::Result<Feedback>;
    /// Oldest first.
    async fn list(&self, recipe: &str) -> anyhow::Result<Vec<Feedback>>;
}

#[derive(Default)]
pub struct MemoryFeedbackStore {
    entries: RwLock<Vec<Feedback>>,
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn submit(&self, user: Uuid, recipe: &str, feedback: &str) -> anyhow::Result<Feedback> {
        let entry = Feedback {
            recipe: recipe.to_string(),
            user_id: user,
            feedback: feedback.to_string(),
            submitted_at: OffsetDateTime::now_utc(),
        };
        let mut guard = self.entries.write().await;
        guard.retain(|f| !(f.user_id == user && f.recipe == recipe));
        guard.push(entry.clone());
        Ok(entry)
    }

    async fn list(&self, recipe: &str) -> anyhow::Result<Vec<Feedback>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|f| f.recipe == recipe)
            .cloned()
            .collect())
    }
}

pub struct PgFeedbackStore {
    db: PgPool,
}

impl PgFeedbackStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn submit(&self, user: Uuid, recipe: &str, feedback: &str) -> anyhow::Result<Feedback> {
        let row = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO recipe_feedback (user_id, recipe, feedback)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, recipe)
            DO UPDATE SET feedback = EXCLUDED.feedback, submitted_at = now()
            RETURNING recipe, user_id, feedback, submitted_at
            "#,
        )
        .bind(user)
        .bind(recipe)
        .bind(feedback)
        .fetch_one(&self.db)
        .await
        .context("upsert recipe feedback")?;
        Ok(row)
    }

    async fn list(&self, recipe: &str) -> anyhow::Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT recipe, user_id, feedback, submitted_at
              FROM recipe_feedback
             WHERE recipe = $1
             ORDER BY submitted_at ASC
            "#,
        )
        .bind(recipe)
        .fetch_all(&self.db)
        .await
        .context("list recipe feedback")?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn latest_feedback_per_user_wins() {
        let store = MemoryFeedbackStore::default();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        store.submit(alice, "Lentil Soup", "too salty").await.unwrap();
        store.submit(bob, "Lentil Soup", "lovely").await.unwrap();
        store
            .submit(alice, "Lentil Soup", "better with less salt")
            .await
            .unwrap();
        store.submit(alice, "Avocado Toast", "quick").await.unwrap();

        let soup = store.list("Lentil Soup").await.unwrap();
        assert_eq!(soup.len(), 2);
        assert_eq!(soup[0].user_id, bob);
        assert_eq!(soup[1].feedback, "better with less salt");
        assert!(store.list("Berry Parfait").await.unwrap().is_empty());
    }
}
