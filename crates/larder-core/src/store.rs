//! The `RecipeStore` trait — the persistence collaborator the lifecycle
//! state machine runs against.
//!
//! The trait is implemented by storage backends (e.g. `larder-store-sqlite`).
//! Higher layers (`larder-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::recipe::Recipe;

/// Abstraction over a recipe store backend.
///
/// Logical outcomes ride in the `Ok` value — `Option` for lookups and
/// inserts, `bool` for updates and deletes; `Err` is reserved for failures
/// in the backend itself (I/O, corruption). Callers treat a logical miss
/// and a refused write as a failed operation, not as an error.
///
/// The lifecycle operations read and then write without holding any lock,
/// so racing calls against the same row or draft link can interleave. A
/// backend that wraps each call sequence in a transaction keyed by the main
/// row id restores the single-writer assumption the transition logic
/// expects.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecipeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch a row by id. `None` when no such row exists.
  fn get_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Recipe>, Self::Error>> + Send + '_;

  /// Reverse draft lookup: the row whose shadow-draft link currently
  /// points at `draft_id`, if any.
  fn get_by_draft_id(
    &self,
    draft_id: i64,
  ) -> impl Future<Output = Result<Option<Recipe>, Self::Error>> + Send + '_;

  /// Persist `recipe` as a new row and return it with the store-assigned
  /// id filled in.
  ///
  /// A caller-supplied id is never reused: the new row always gets a
  /// fresh id maintained by the store.
  fn insert(
    &self,
    recipe: Recipe,
  ) -> impl Future<Output = Result<Option<Recipe>, Self::Error>> + Send + '_;

  /// Overwrite the row identified by `recipe.stored_id()`, including its
  /// draft link. `false` when no such row exists.
  fn update<'a>(
    &'a self,
    recipe: &'a Recipe,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Remove the row with `id`. `false` when no such row exists.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
