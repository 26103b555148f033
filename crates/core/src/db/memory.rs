//! In-memory prompt store
//!
//! Mirrors the PostgreSQL store row for row, including the listing order,
//! so router and action tests run without a database.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tokio::sync::Mutex;

use super::{NewPrompt, Prompt, PromptFilter, PromptStore};
use crate::errors::Result;

#[derive(Debug, Default)]
struct State {
    rows:    Vec<Prompt>,
    next_id: i32,
}

#[derive(Debug, Default)]
pub struct MemoryPromptStore {
    state: Mutex<State>,
}

impl MemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, regardless of filters
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl PromptStore for MemoryPromptStore {
    async fn list(&self, filter: &PromptFilter) -> Result<Vec<Prompt>> {
        let state = self.state.lock().await;
        let mut prompts: Vec<Prompt> = state
            .rows
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        prompts.sort_by(|a, b| {
            b.is_favorite
                .cmp(&a.is_favorite)
                .then(b.updated_at.cmp(&a.updated_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(prompts)
    }

    async fn get(&self, id: i32) -> Result<Option<Prompt>> {
        let state = self.state.lock().await;
        Ok(state.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new: NewPrompt) -> Result<Prompt> {
        let mut state = self.state.lock().await;
        state.next_id += 1;

        let ts = now();
        let prompt = Prompt {
            id:          state.next_id,
            title:       new.title,
            prompt:      new.prompt,
            is_favorite: false,
            created_at:  ts,
            updated_at:  ts,
        };
        state.rows.push(prompt.clone());
        Ok(prompt)
    }

    async fn update(&self, id: i32, new: NewPrompt) -> Result<Option<Prompt>> {
        let mut state = self.state.lock().await;
        Ok(state.rows.iter_mut().find(|p| p.id == id).map(|row| {
            row.title = new.title;
            row.prompt = new.prompt;
            row.updated_at = now();
            row.clone()
        }))
    }

    async fn toggle_favorite(&self, id: i32) -> Result<Option<Prompt>> {
        let mut state = self.state.lock().await;
        Ok(state.rows.iter_mut().find(|p| p.id == id).map(|row| {
            row.is_favorite = !row.is_favorite;
            row.updated_at = now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Prompt>> {
        let mut state = self.state.lock().await;
        let index = state.rows.iter().position(|p| p.id == id);
        Ok(index.map(|i| state.rows.remove(i)))
    }
}
