use crate::auth::repo::{AccountStore, MemoryAccountStore, PgAccountStore};
use crate::config::AppConfig;
use crate::inventory::repo::{ItemStore, MemoryItemStore, PgItemStore};
use crate::recipes::catalog::{self, Catalog};
use crate::recipes::repo::{FeedbackStore, MemoryFeedbackStore, PgFeedbackStore};
use anyhow::Context;
use sqlx::migrate::Migrator;
use std::sync::Arc;

/// Schema migrations, embedded at compile time. The item store's duplicate
/// check depends on the unique index they create.
pub fn migrator() -> Migrator {
    sqlx::migrate!("./migrations")
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountStore>,
    pub items: Arc<dyn ItemStore>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub catalog: &'static Catalog,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let Some(database_url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            return Ok(Self::in_memory(config));
        };

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;

        migrator().run(&db).await.context("run migrations")?;
        tracing::info!("database migrations applied");

        Ok(Self {
            config,
            accounts: Arc::new(PgAccountStore::new(db.clone())),
            items: Arc::new(PgItemStore::new(db.clone())),
            feedback: Arc::new(PgFeedbackStore::new(db)),
            catalog: catalog::builtin(),
        })
    }

    fn in_memory(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            accounts: Arc::new(MemoryAccountStore::default()),
            items: Arc::new(MemoryItemStore::default()),
            feedback: Arc::new(MemoryFeedbackStore::default()),
            catalog: catalog::builtin(),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test".into(),
                audience: "test".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            recipe_limit: crate::recipes::matcher::DEFAULT_LIMIT,
        });
        Self::in_memory(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_migrations_create_item_identity_index() {
        let migrator = migrator();
        let sql: String = migrator.iter().map(|m| m.sql.to_string()).collect();
        assert!(sql.contains("CREATE UNIQUE INDEX IF NOT EXISTS food_items_identity"));
        assert!(sql.contains("(user_id, name_key, expiry_date)"));
    }
}
