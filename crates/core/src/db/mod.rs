use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::errors::Result;

pub mod memory;
pub mod prompts;
pub mod query;
pub mod schema;

pub use memory::MemoryPromptStore;
pub use prompts::{NewPrompt, PgPromptStore, Prompt};
pub use query::PromptFilter;

/// Storage operations behind the page and the form actions
///
/// Every method issues at most one statement. Mutations return `None`
/// when the id does not exist.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// All prompts matching the filter, favorites first
    async fn list(&self, filter: &PromptFilter) -> Result<Vec<Prompt>>;

    async fn get(&self, id: i32) -> Result<Option<Prompt>>;

    async fn create(&self, new: NewPrompt) -> Result<Prompt>;

    /// Replace title and text, returning the edited row
    async fn update(&self, id: i32, new: NewPrompt) -> Result<Option<Prompt>>;

    /// Flip the favorite flag, returning the row with its new value
    async fn toggle_favorite(&self, id: i32) -> Result<Option<Prompt>>;

    /// Remove the row, returning what was deleted
    async fn delete(&self, id: i32) -> Result<Option<Prompt>>;
}

pub struct Db;

impl Db {
    /// Open the connection pool and make sure the table exists
    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        // Split by semicolon to run multiple statements
        for statement in schema::SCHEMA.split(';') {
            if statement.trim().is_empty() {
                continue;
            }
            sqlx::query(statement).execute(&pool).await?;
        }

        tracing::info!(max_connections, "database ready");
        Ok(pool)
    }
}
