//! Handlers for `/recipes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/recipes` | Body: [`RecipeBody`]; returns 201 + stored recipe |
//! | `PUT`  | `/recipes/{id}` | Body: [`RecipeBody`]; a body id must match the path |
//! | `GET`  | `/recipes/{id}` | 404 if not found |
//!
//! A transition the lifecycle refuses (archiving conflicts, edits against
//! terminal rows) maps to `409 Conflict`; malformed input maps to `400`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use larder_core::{
  lifecycle::Lifecycle,
  recipe::{Recipe, RecipeStatus},
  store::RecipeStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

// ─── Body ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /recipes` and `PUT /recipes/{id}`.
///
/// The draft link and timestamps are store-maintained and never accepted
/// from callers.
#[derive(Debug, Deserialize)]
pub struct RecipeBody {
  pub id:           Option<i64>,
  pub status:       Option<RecipeStatus>,
  pub name:         String,
  pub summary:      Option<String>,
  #[serde(default)]
  pub instructions: String,
  pub prep_minutes: Option<u32>,
  pub cook_minutes: Option<u32>,
  pub servings:     Option<u32>,
  #[serde(default)]
  pub tags:         Vec<String>,
}

impl From<RecipeBody> for Recipe {
  fn from(b: RecipeBody) -> Self {
    Recipe {
      id: b.id,
      status: b.status,
      name: b.name,
      summary: b.summary,
      instructions: b.instructions,
      prep_minutes: b.prep_minutes,
      cook_minutes: b.cook_minutes,
      servings: b.servings,
      tags: b.tags,
      draft: None,
      created_at: None,
      updated_at: None,
    }
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /recipes` — returns 201 + the stored [`Recipe`].
pub async fn create<S>(
  State(lifecycle): State<Arc<Lifecycle<S>>>,
  Json(body): Json<RecipeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecipeStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let recipe = lifecycle
    .add_recipe(Recipe::from(body))
    .await
    .map_err(ApiError::from_core)?
    .ok_or_else(|| {
      ApiError::Conflict("recipe was not stored; transition refused".into())
    })?;
  Ok((StatusCode::CREATED, Json(recipe)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /recipes/{id}` — body: [`RecipeBody`], moved toward its `status`.
pub async fn update_one<S>(
  State(lifecycle): State<Arc<Lifecycle<S>>>,
  Path(id): Path<i64>,
  Json(body): Json<RecipeBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RecipeStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if let Some(body_id) = body.id
    && body_id != id
  {
    return Err(ApiError::BadRequest(format!(
      "body id {body_id} does not match path id {id}"
    )));
  }

  let mut recipe = Recipe::from(body);
  recipe.id = Some(id);

  let updated = lifecycle
    .update_recipe(recipe)
    .await
    .map_err(ApiError::from_core)?;

  if updated {
    Ok(Json(json!({ "updated": true })))
  } else {
    Err(ApiError::Conflict(format!(
      "recipe {id} was not updated; transition refused"
    )))
  }
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /recipes/{id}` — the stored row, shadow draft included.
pub async fn get_one<S>(
  State(lifecycle): State<Arc<Lifecycle<S>>>,
  Path(id): Path<i64>,
) -> Result<Json<Recipe>, ApiError>
where
  S: RecipeStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let recipe = lifecycle
    .store()
    .get_by_id(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("recipe {id} not found")))?;
  Ok(Json(recipe))
}
