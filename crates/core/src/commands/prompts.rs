use std::collections::HashMap;

use serde::Deserialize;

use crate::{
    db::{NewPrompt, Prompt, PromptStore},
    errors::{PromptbaseError, Result},
    template,
};

/// Raw title/text as submitted by the create and edit forms
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub title:  String,
    #[serde(default)]
    pub prompt: String,
}

/// A successful action and the notice to show after the reload
#[derive(Debug, Clone)]
pub struct Outcome {
    pub prompt: Prompt,
    pub notice: String,
}

/// Template output for one prompt; nothing is persisted
#[derive(Debug, Clone)]
pub struct Rendered {
    pub prompt: Prompt,
    pub text:   String,
}

pub async fn create(store: &dyn PromptStore, form: &PromptForm) -> Result<Outcome> {
    let new = NewPrompt::parse(&form.title, &form.prompt)?;
    let prompt = store.create(new).await?;
    tracing::info!(id = prompt.id, "prompt created");

    Ok(Outcome {
        prompt,
        notice: "Prompt added successfully!".into(),
    })
}

pub async fn update(store: &dyn PromptStore, id: i32, form: &PromptForm) -> Result<Outcome> {
    let new = NewPrompt::parse(&form.title, &form.prompt)?;
    let prompt = store
        .update(id, new)
        .await?
        .ok_or(PromptbaseError::NotFound(id))?;
    tracing::info!(id, "prompt updated");

    let notice = format!("Updated prompt '{}'", prompt.title);
    Ok(Outcome { prompt, notice })
}

pub async fn toggle_favorite(store: &dyn PromptStore, id: i32) -> Result<Outcome> {
    let prompt = store
        .toggle_favorite(id)
        .await?
        .ok_or(PromptbaseError::NotFound(id))?;
    tracing::info!(id, favorite = prompt.is_favorite, "favorite toggled");

    let notice = if prompt.is_favorite {
        format!("Marked '{}' as favorite!", prompt.title)
    } else {
        format!("Removed '{}' from favorites", prompt.title)
    };
    Ok(Outcome { prompt, notice })
}

pub async fn delete(store: &dyn PromptStore, id: i32) -> Result<Outcome> {
    let prompt = store.delete(id).await?.ok_or(PromptbaseError::NotFound(id))?;
    tracing::info!(id, "prompt deleted");

    let notice = format!("Deleted prompt '{}'", prompt.title);
    Ok(Outcome { prompt, notice })
}

pub async fn render(
    store: &dyn PromptStore,
    id: i32,
    values: &HashMap<String, String>,
) -> Result<Rendered> {
    let prompt = store.get(id).await?.ok_or(PromptbaseError::NotFound(id))?;
    let text = template::render(&prompt.prompt, values);

    Ok(Rendered { prompt, text })
}
