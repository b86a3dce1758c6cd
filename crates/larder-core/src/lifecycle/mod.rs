//! The publication lifecycle state machine.
//!
//! A caller builds a [`Recipe`] whose `status` names the *target* state and
//! hands it to [`Lifecycle::add_recipe`] or [`Lifecycle::update_recipe`].
//! The context dispatches on that requested status to the handler module
//! for the destination — [`draft`], [`published`] or [`archived`] — and the
//! handler inspects the stored row (if any) to pick the concrete mutation.
//!
//! Each handler is a pair of free functions over an injected
//! [`RecipeStore`]; there is no handler registry, just a `match` on the
//! closed [`RecipeStatus`] enum.

mod archived;
mod draft;
mod published;


use tracing::warn;

use crate::{
  error::{Error, Result},
  recipe::{Recipe, RecipeStatus},
  store::RecipeStore,
};

// ─── Context ─────────────────────────────────────────────────────────────────

/// Dispatcher for the publication lifecycle operations.
///
/// A pure router plus input guard: it validates that a requested status is
/// present, then hands the record to the handler keyed by that status. All
/// store access happens inside the handlers.
#[derive(Clone)]
pub struct Lifecycle<S> {
  store: S,
}

impl<S: RecipeStore> Lifecycle<S> {
  pub fn new(store: S) -> Self {
    Self { store }
  }

  /// The underlying store, for plain reads outside the state machine.
  pub fn store(&self) -> &S {
    &self.store
  }

  /// Create a recipe in — or move an existing one toward — the requested
  /// status.
  ///
  /// Returns the resulting record, or `None` when the transition is
  /// rejected or the store refuses a write.
  pub async fn add_recipe(&self, recipe: Recipe) -> Result<Option<Recipe>> {
    match recipe.status.ok_or(Error::MissingStatus)? {
      RecipeStatus::Draft => draft::add(&self.store, recipe).await,
      RecipeStatus::Published => published::add(&self.store, recipe).await,
      RecipeStatus::Archived => archived::add(&self.store, recipe).await,
    }
  }

  /// Move an existing recipe toward the requested status.
  ///
  /// Returns `false` when the transition is rejected or the store refuses
  /// a write.
  pub async fn update_recipe(&self, recipe: Recipe) -> Result<bool> {
    match recipe.status.ok_or(Error::MissingStatus)? {
      RecipeStatus::Draft => draft::update(&self.store, recipe).await,
      RecipeStatus::Published => published::update(&self.store, recipe).await,
      RecipeStatus::Archived => archived::update(&self.store, recipe).await,
    }
  }
}

// ─── Shared handler plumbing ─────────────────────────────────────────────────

/// Box a backend error at the store seam.
fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
  Error::Store(Box::new(e))
}

/// Guard shared by the `update` handlers: a stored id is required, and the
/// target row must exist.
async fn update_target<S: RecipeStore>(
  store: &S,
  recipe: &Recipe,
) -> Result<(i64, Recipe)> {
  let id = recipe.stored_id().ok_or(Error::MissingId)?;
  let db = store
    .get_by_id(id)
    .await
    .map_err(store_err)?
    .ok_or(Error::NotFound(id))?;
  Ok((id, db))
}

/// Fold an approved shadow draft into its main row: delete the shadow row,
/// take over the main row's id, overwrite the main row with the incoming
/// content.
///
/// The delete is not rolled back if the following update fails; the caller
/// sees a failed result either way.
async fn merge_into_main<S: RecipeStore>(
  store: &S,
  mut recipe: Recipe,
  draft_id: i64,
  main: &Recipe,
) -> Result<Option<Recipe>> {
  if !store.delete(draft_id).await.map_err(store_err)? {
    warn!(draft_id, "shadow draft row already gone during merge");
  }
  recipe.id = main.id;
  if store.update(&recipe).await.map_err(store_err)? {
    Ok(Some(recipe))
  } else {
    Ok(None)
  }
}

/// Overwriting a published row discards its pending shadow draft, if one
/// is linked with a stored id.
async fn discard_pending_draft<S: RecipeStore>(
  store: &S,
  db: &Recipe,
) -> Result<()> {
  if let Some(draft_id) = db.draft_id() {
    if !store.delete(draft_id).await.map_err(store_err)? {
      warn!(draft_id, "pending draft row already gone");
    }
  }
  Ok(())
}
