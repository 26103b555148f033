use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::{
    page::{self, Page, RenderedView},
    AppState,
};
use crate::{
    commands::prompts::{self as actions, Outcome, PromptForm},
    db::PromptFilter,
    errors::{PromptbaseError, Result},
};

/// Query parameters understood by every route
///
/// Checkboxes arrive as `on` when ticked and are absent otherwise.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search:         String,
    pub in_title:       Option<String>,
    pub in_prompt:      Option<String>,
    pub favorites_only: Option<String>,
    pub edit:           Option<i32>,
    pub notice:         Option<String>,
}

impl ListParams {
    pub fn filter(&self) -> PromptFilter {
        PromptFilter {
            search:         self.search.clone(),
            in_title:       self.in_title.is_some(),
            in_prompt:      self.in_prompt.is_some(),
            favorites_only: self.favorites_only.is_some(),
        }
    }
}

/// Query the listing and assemble a page around it
async fn load_page(state: &AppState, filter: PromptFilter) -> Result<Page> {
    let prompts = state.store.list(&filter).await?;
    Ok(Page {
        prompts,
        filter,
        ..Default::default()
    })
}

/// Full page reload after a successful action
fn reload(filter: &PromptFilter, outcome: &Outcome) -> Response {
    Redirect::to(&page::home_url(filter, Some(&outcome.notice))).into_response()
}

fn rejected(page: &Page) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(page::render(page))).into_response()
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>> {
    let mut page = load_page(&state, params.filter()).await?;
    page.editing = params.edit;
    page.notice = params.notice;

    Ok(Html(page::render(&page)))
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn create(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Form(form): Form<PromptForm>,
) -> Result<Response> {
    let filter = params.filter();
    match actions::create(state.store.as_ref(), &form).await {
        Ok(outcome) => Ok(reload(&filter, &outcome)),
        Err(err @ PromptbaseError::Validation(_)) => {
            tracing::warn!(error = %err, "create rejected");
            let mut page = load_page(&state, filter).await?;
            page.error = Some(err.user_message());
            page.create_form = form;
            Ok(rejected(&page))
        },
        Err(err) => Err(err),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<ListParams>,
    Form(form): Form<PromptForm>,
) -> Result<Response> {
    let filter = params.filter();
    match actions::update(state.store.as_ref(), id, &form).await {
        Ok(outcome) => Ok(reload(&filter, &outcome)),
        Err(err @ PromptbaseError::Validation(_)) => {
            tracing::warn!(id, error = %err, "edit rejected");
            let mut page = load_page(&state, filter).await?;
            page.error = Some(err.user_message());
            page.editing = Some(id);
            page.edit_form = Some(form);
            Ok(rejected(&page))
        },
        Err(err) => Err(err),
    }
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    let outcome = actions::toggle_favorite(state.store.as_ref(), id).await?;
    Ok(reload(&params.filter(), &outcome))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    let outcome = actions::delete(state.store.as_ref(), id).await?;
    Ok(reload(&params.filter(), &outcome))
}

pub async fn render(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<ListParams>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Html<String>> {
    let rendered = actions::render(state.store.as_ref(), id, &values).await?;

    let mut page = load_page(&state, params.filter()).await?;
    page.rendered = Some(RenderedView {
        id,
        values,
        text: rendered.text,
    });

    Ok(Html(page::render(&page)))
}
