use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::{
    query::{build_list_query, PromptFilter},
    PromptStore,
};
use crate::errors::{PromptbaseError, Result};

/// Longest title the form accepts
pub const MAX_TITLE_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Prompt {
    pub id: i32,
    pub title: String,
    pub prompt: String,
    pub is_favorite: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Title/text pair that passed validation, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrompt {
    pub title: String,
    pub prompt: String,
}

impl NewPrompt {
    /// Validate raw form input.
    ///
    /// Surrounding whitespace is trimmed from the title only; the prompt
    /// text is stored as typed but must contain something besides
    /// whitespace.
    pub fn parse(title: &str, prompt: &str) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() || prompt.trim().is_empty() {
            return Err(PromptbaseError::Validation(
                "Title and prompt cannot be empty.".into(),
            ));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(PromptbaseError::Validation(format!(
                "Title cannot be longer than {} characters.",
                MAX_TITLE_CHARS
            )));
        }

        Ok(Self {
            title: title.to_string(),
            prompt: prompt.to_string(),
        })
    }
}

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgPromptStore {
    pool: PgPool,
}

impl PgPromptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromptStore for PgPromptStore {
    async fn list(&self, filter: &PromptFilter) -> Result<Vec<Prompt>> {
        let query = build_list_query(filter);

        let mut statement = sqlx::query_as::<_, Prompt>(&query.sql);
        for param in &query.params {
            statement = statement.bind(param.as_str());
        }

        let prompts = statement.fetch_all(&self.pool).await?;
        Ok(prompts)
    }

    async fn get(&self, id: i32) -> Result<Option<Prompt>> {
        let prompt = sqlx::query_as::<_, Prompt>(
            "SELECT id, title, prompt, is_favorite, created_at, updated_at FROM prompts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    async fn create(&self, new: NewPrompt) -> Result<Prompt> {
        let prompt = sqlx::query_as::<_, Prompt>(
            "INSERT INTO prompts (title, prompt) VALUES ($1, $2)
             RETURNING id, title, prompt, is_favorite, created_at, updated_at",
        )
        .bind(&new.title)
        .bind(&new.prompt)
        .fetch_one(&self.pool)
        .await?;

        Ok(prompt)
    }

    async fn update(&self, id: i32, new: NewPrompt) -> Result<Option<Prompt>> {
        let prompt = sqlx::query_as::<_, Prompt>(
            "UPDATE prompts SET title = $1, prompt = $2, updated_at = CURRENT_TIMESTAMP
             WHERE id = $3
             RETURNING id, title, prompt, is_favorite, created_at, updated_at",
        )
        .bind(&new.title)
        .bind(&new.prompt)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    async fn toggle_favorite(&self, id: i32) -> Result<Option<Prompt>> {
        let prompt = sqlx::query_as::<_, Prompt>(
            "UPDATE prompts
             SET is_favorite = NOT COALESCE(is_favorite, FALSE), updated_at = CURRENT_TIMESTAMP
             WHERE id = $1
             RETURNING id, title, prompt, is_favorite, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    async fn delete(&self, id: i32) -> Result<Option<Prompt>> {
        let prompt = sqlx::query_as::<_, Prompt>(
            "DELETE FROM prompts WHERE id = $1
             RETURNING id, title, prompt, is_favorite, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }
}
