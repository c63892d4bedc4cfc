//! View preference routes

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quotes::CategoryFilter;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/category", get(get_category).put(set_category))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryPreference {
    pub category: CategoryFilter,
}

async fn get_category(State(state): State<AppState>) -> Result<Json<CategoryPreference>> {
    let category = state.preferences().selected_category().await?;
    Ok(Json(CategoryPreference { category }))
}

async fn set_category(
    State(state): State<AppState>,
    Json(pref): Json<CategoryPreference>,
) -> Result<Json<CategoryPreference>> {
    state.preferences().set_selected_category(&pref.category).await?;
    Ok(Json(pref))
}
