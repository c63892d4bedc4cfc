//! Quote collection API routes

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result, StorageError, StoreError};
use crate::quotes::{filter, CategoryFilter, InsertOutcome, Quote};
use crate::state::AppState;

/// Create the quotes router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quotes).post(add_quote))
        .route("/categories", get(list_categories))
        .route("/random", get(random_quote))
        .route("/last-viewed", get(last_viewed))
        .route("/export", get(export_quotes))
        .route("/import", post(import_quotes))
}

/// `?category=` query; absent means the saved selection
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub category: Option<String>,
}

/// Add-quote form; both fields are checked by validation rather than by the
/// JSON extractor so a missing field yields a validation error
#[derive(Debug, Deserialize)]
pub struct NewQuote {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct QuoteListResponse {
    pub category: CategoryFilter,
    pub count: usize,
    pub quotes: Vec<Quote>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub added: usize,
    pub quotes: Vec<Quote>,
}

async fn resolve_filter(state: &AppState, query: FilterQuery) -> Result<CategoryFilter> {
    match query.category {
        Some(category) => Ok(CategoryFilter::from(category)),
        None => Ok(state.preferences().selected_category().await?),
    }
}

/// List quotes in the selected category
async fn list_quotes(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<QuoteListResponse>> {
    let category = resolve_filter(&state, query).await?;
    let collection = state.store().current().await;
    let quotes = filter::filtered(&collection, &category);

    Ok(Json(QuoteListResponse {
        category,
        count: quotes.len(),
        quotes,
    }))
}

/// Add a quote, then forward it to the remote in the background
async fn add_quote(
    State(state): State<AppState>,
    Json(form): Json<NewQuote>,
) -> Result<(StatusCode, Json<Quote>)> {
    let quote = Quote::new(form.text, form.category)?;

    match state.store().insert(quote.clone()).await? {
        InsertOutcome::Duplicate => {
            return Err(AppError::Conflict(format!("Quote already exists: {}", quote.text)));
        }
        InsertOutcome::Inserted => tracing::info!("Added quote in category {}", quote.category),
    }

    if state.config().remote.post_new_quotes {
        let coordinator = state.coordinator().clone();
        let posted = quote.clone();
        // Outcome is logged by the coordinator; the local insert stands either way
        tokio::spawn(async move {
            let _ = coordinator.post_quote(&posted).await;
        });
    }

    Ok((StatusCode::CREATED, Json(quote)))
}

/// Distinct categories for the filter dropdown
async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    let collection = state.store().current().await;
    Json(filter::unique_categories(&collection))
}

/// Show a random quote from the selected category
async fn random_quote(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Quote>> {
    let category = resolve_filter(&state, query).await?;
    let collection = state.store().current().await;

    let picked = {
        let mut rng = rand::thread_rng();
        filter::pick_random(&collection, &category, &mut rng)
    };
    let quote = picked.ok_or_else(|| {
        AppError::NotFound(format!("No quotes in category: {}", category.as_str()))
    })?;

    state.preferences().set_last_viewed(&quote).await?;
    Ok(Json(quote))
}

/// Last quote shown in this session
async fn last_viewed(State(state): State<AppState>) -> Result<Json<Quote>> {
    state
        .preferences()
        .last_viewed()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No quote viewed yet".to_string()))
}

/// Download the collection as `quotes.json`
async fn export_quotes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let json = state.store().export_json().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"quotes.json\""),
        ],
        json,
    ))
}

/// Import a JSON array of quotes
async fn import_quotes(State(state): State<AppState>, body: String) -> Result<Json<ImportResponse>> {
    let added = state.store().import_json(&body).await.map_err(|e| match e {
        StoreError::Storage(StorageError::Serialize(e)) => {
            AppError::BadRequest(format!("Expected a JSON array of quotes: {}", e))
        }
        other => AppError::from(other),
    })?;

    Ok(Json(ImportResponse {
        added: added.len(),
        quotes: added,
    }))
}
