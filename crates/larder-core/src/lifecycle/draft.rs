//! Transitions that target [`RecipeStatus::Draft`].

use tracing::warn;

use super::{store_err, update_target};
use crate::{
  error::Result,
  recipe::{Recipe, RecipeStatus},
  store::RecipeStore,
};

/// Create-or-overwrite toward Draft.
///
/// A published target row takes the incoming record as its shadow draft;
/// archived rows reject draft edits outright.
pub(super) async fn add<S: RecipeStore>(
  store: &S,
  recipe: Recipe,
) -> Result<Option<Recipe>> {
  let Some(id) = recipe.stored_id() else {
    return store.insert(recipe).await.map_err(store_err);
  };

  let Some(mut db) = store.get_by_id(id).await.map_err(store_err)? else {
    return store.insert(recipe).await.map_err(store_err);
  };

  match db.status {
    Some(RecipeStatus::Draft) => {
      if store.update(&recipe).await.map_err(store_err)? {
        Ok(Some(recipe))
      } else {
        Ok(None)
      }
    }
    Some(RecipeStatus::Published) => {
      // Attach the edit as the published row's shadow draft, then write
      // the edit itself. Both writes hit row `id`, so the attach write's
      // self-link is transient: the second write carries no draft link and
      // clears it. Pinned behavior — see the regression tests.
      db.draft = Some(Box::new(recipe.clone()));
      if !store.update(&db).await.map_err(store_err)? {
        return Ok(None);
      }
      if store.update(&recipe).await.map_err(store_err)? {
        Ok(Some(recipe))
      } else {
        Ok(None)
      }
    }
    Some(RecipeStatus::Archived) => {
      warn!(id, "rejecting draft edit of an archived recipe");
      Ok(None)
    }
    None => {
      warn!(id, "stored recipe has no status");
      Ok(None)
    }
  }
}

/// Update-or-shadow toward Draft.
///
/// Editing a published row inserts a brand-new shadow row and links the
/// published row to it; archived rows are terminal.
pub(super) async fn update<S: RecipeStore>(
  store: &S,
  recipe: Recipe,
) -> Result<bool> {
  let (id, mut db) = update_target(store, &recipe).await?;

  match db.status {
    Some(RecipeStatus::Draft) => store.update(&recipe).await.map_err(store_err),
    Some(RecipeStatus::Published) => {
      // The edit becomes a new free-standing row; the published row then
      // points at it. A failed insert leaves the published row untouched.
      let Some(shadow) = store.insert(recipe).await.map_err(store_err)? else {
        return Ok(false);
      };
      if shadow.stored_id().is_none() {
        return Ok(false);
      }
      db.draft = Some(Box::new(shadow));
      store.update(&db).await.map_err(store_err)
    }
    Some(RecipeStatus::Archived) => {
      warn!(id, "rejecting draft edit of an archived recipe");
      Ok(false)
    }
    None => {
      warn!(id, "stored recipe has no status");
      Ok(false)
    }
  }
}
