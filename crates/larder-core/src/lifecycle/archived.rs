//! Transitions that target [`RecipeStatus::Archived`].

use tracing::warn;

use super::{discard_pending_draft, merge_into_main, store_err, update_target};
use crate::{
  error::Result,
  recipe::{Recipe, RecipeStatus},
  store::RecipeStore,
};

/// Create-or-retire toward Archived.
///
/// Archiving a shadow-attached draft merges it into its published main
/// row, exactly like publishing it. Archiving over an already published
/// or archived row is a literal insert: the archived copy lands in a
/// fresh row and the existing row keeps its id. Pinned behavior — see the
/// regression tests.
pub(super) async fn add<S: RecipeStore>(
  store: &S,
  recipe: Recipe,
) -> Result<Option<Recipe>> {
  let Some(id) = recipe.stored_id() else {
    return store.insert(recipe).await.map_err(store_err);
  };

  let Some(db) = store.get_by_id(id).await.map_err(store_err)? else {
    return store.insert(recipe).await.map_err(store_err);
  };

  match db.status {
    Some(RecipeStatus::Draft) => {
      match store.get_by_draft_id(id).await.map_err(store_err)? {
        None => {
          if store.update(&recipe).await.map_err(store_err)? {
            Ok(Some(recipe))
          } else {
            Ok(None)
          }
        }
        Some(main) if main.status == Some(RecipeStatus::Published) => {
          merge_into_main(store, recipe, id, &main).await
        }
        // A draft can only be shadow-attached to a published row.
        Some(main) => {
          warn!(
            draft_id = id,
            main_id = main.stored_id(),
            "draft is attached to a non-published recipe"
          );
          Ok(None)
        }
      }
    }
    Some(RecipeStatus::Published) | Some(RecipeStatus::Archived) => {
      store.insert(recipe).await.map_err(store_err)
    }
    None => {
      warn!(id, "stored recipe has no status");
      Ok(None)
    }
  }
}

/// Update-or-retire toward Archived.
///
/// Archiving a published row discards its pending shadow draft first. An
/// already archived row is terminal.
pub(super) async fn update<S: RecipeStore>(
  store: &S,
  recipe: Recipe,
) -> Result<bool> {
  let (id, db) = update_target(store, &recipe).await?;

  match db.status {
    Some(RecipeStatus::Draft) => {
      match store.get_by_draft_id(id).await.map_err(store_err)? {
        Some(main) => {
          Ok(merge_into_main(store, recipe, id, &main).await?.is_some())
        }
        None => store.update(&recipe).await.map_err(store_err),
      }
    }
    Some(RecipeStatus::Published) => {
      discard_pending_draft(store, &db).await?;
      store.update(&recipe).await.map_err(store_err)
    }
    Some(RecipeStatus::Archived) => {
      warn!(id, "recipe is already archived");
      Ok(false)
    }
    None => {
      warn!(id, "stored recipe has no status");
      Ok(false)
    }
  }
}
