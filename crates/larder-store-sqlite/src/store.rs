//! [`SqliteStore`] — the SQLite implementation of [`RecipeStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use larder_core::{recipe::Recipe, store::RecipeStore};

use crate::{
  encode::{encode_dt, encode_status, encode_tags, RawRecipe},
  schema::SCHEMA,
  Error, Result,
};

const SELECT_BY_ID: &str = "SELECT id, status, name, summary, instructions,
     prep_minutes, cook_minutes, servings, tags, draft_id,
     created_at, updated_at
   FROM recipes WHERE id = ?1";

const SELECT_BY_DRAFT_ID: &str = "SELECT id, status, name, summary, instructions,
     prep_minutes, cook_minutes, servings, tags, draft_id,
     created_at, updated_at
   FROM recipes WHERE draft_id = ?1";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A larder recipe store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch a single raw row with a one-parameter query.
  async fn fetch_raw(
    &self,
    sql: &'static str,
    key: i64,
  ) -> Result<Option<RawRecipe>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(sql, rusqlite::params![key], RawRecipe::from_row)
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }

  /// Decode a raw row and attach its shadow draft, if one is linked.
  ///
  /// Hydration is one level deep: a shadow draft never carries a draft of
  /// its own, and a transient self-link must not recurse.
  async fn hydrate(&self, raw: RawRecipe) -> Result<Recipe> {
    let (mut recipe, draft_id) = raw.into_parts()?;
    if let Some(draft_id) = draft_id {
      if let Some(draft_raw) = self.fetch_raw(SELECT_BY_ID, draft_id).await? {
        let (draft, _) = draft_raw.into_parts()?;
        recipe.draft = Some(Box::new(draft));
      }
    }
    Ok(recipe)
  }
}

// ─── RecipeStore impl ────────────────────────────────────────────────────────

impl RecipeStore for SqliteStore {
  type Error = Error;

  async fn get_by_id(&self, id: i64) -> Result<Option<Recipe>> {
    match self.fetch_raw(SELECT_BY_ID, id).await? {
      Some(raw) => Ok(Some(self.hydrate(raw).await?)),
      None => Ok(None),
    }
  }

  async fn get_by_draft_id(&self, draft_id: i64) -> Result<Option<Recipe>> {
    match self.fetch_raw(SELECT_BY_DRAFT_ID, draft_id).await? {
      Some(raw) => Ok(Some(self.hydrate(raw).await?)),
      None => Ok(None),
    }
  }

  async fn insert(&self, mut recipe: Recipe) -> Result<Option<Recipe>> {
    let now = Utc::now();

    let status_str   = recipe.status.map(encode_status);
    let name         = recipe.name.clone();
    let summary      = recipe.summary.clone();
    let instructions = recipe.instructions.clone();
    let prep_minutes = recipe.prep_minutes;
    let cook_minutes = recipe.cook_minutes;
    let servings     = recipe.servings;
    let tags_str     = encode_tags(&recipe.tags)?;
    let draft_id     = recipe.draft_id();
    let now_str      = encode_dt(now);

    // The id column is omitted, so the row always gets a fresh
    // store-assigned id; a caller-supplied id is never reused.
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO recipes (
             status, name, summary, instructions,
             prep_minutes, cook_minutes, servings, tags, draft_id,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
          rusqlite::params![
            status_str,
            name,
            summary,
            instructions,
            prep_minutes,
            cook_minutes,
            servings,
            tags_str,
            draft_id,
            now_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    recipe.id = Some(id);
    recipe.created_at = Some(now);
    recipe.updated_at = Some(now);
    Ok(Some(recipe))
  }

  async fn update(&self, recipe: &Recipe) -> Result<bool> {
    let Some(id) = recipe.stored_id() else {
      return Ok(false);
    };

    let now = Utc::now();

    let status_str   = recipe.status.map(encode_status);
    let name         = recipe.name.clone();
    let summary      = recipe.summary.clone();
    let instructions = recipe.instructions.clone();
    let prep_minutes = recipe.prep_minutes;
    let cook_minutes = recipe.cook_minutes;
    let servings     = recipe.servings;
    let tags_str     = encode_tags(&recipe.tags)?;
    let draft_id     = recipe.draft_id();
    let now_str      = encode_dt(now);

    // Rewrites every mutable column, draft link included, so an absent
    // `draft` clears a stored link. `created_at` is never touched.
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE recipes SET
             status = ?1, name = ?2, summary = ?3, instructions = ?4,
             prep_minutes = ?5, cook_minutes = ?6, servings = ?7,
             tags = ?8, draft_id = ?9, updated_at = ?10
           WHERE id = ?11",
          rusqlite::params![
            status_str,
            name,
            summary,
            instructions,
            prep_minutes,
            cook_minutes,
            servings,
            tags_str,
            draft_id,
            now_str,
            id,
          ],
        )?)
      })
      .await?;

    Ok(n > 0)
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    // draft_id references ON DELETE SET NULL, so deleting a shadow row
    // clears the link on whichever row pointed at it.
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM recipes WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    Ok(n > 0)
  }
}
