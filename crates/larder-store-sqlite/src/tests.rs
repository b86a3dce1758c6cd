//! Integration tests for `SqliteStore` against an in-memory database.

use larder_core::{
  lifecycle::Lifecycle,
  recipe::{Recipe, RecipeStatus},
  store::RecipeStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn recipe(status: RecipeStatus, name: &str) -> Recipe {
  let mut r = Recipe::new(name, status);
  r.instructions = format!("how to make {name}");
  r
}

// ─── Row basics ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_id_and_timestamps() {
  let s = store().await;

  let inserted = s
    .insert(recipe(RecipeStatus::Draft, "soda bread"))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(inserted.id, Some(1));
  assert!(inserted.created_at.is_some());
  assert_eq!(inserted.created_at, inserted.updated_at);

  let fetched = s.get_by_id(1).await.unwrap().unwrap();
  assert_eq!(fetched.name, "soda bread");
  assert_eq!(fetched.status, Some(RecipeStatus::Draft));
  assert_eq!(fetched.instructions, "how to make soda bread");
  assert_eq!(fetched.created_at, inserted.created_at);
}

#[tokio::test]
async fn insert_never_reuses_a_caller_supplied_id() {
  let s = store().await;

  let mut r = recipe(RecipeStatus::Draft, "imported loaf");
  r.id = Some(99);

  let inserted = s.insert(r).await.unwrap().unwrap();
  assert_eq!(inserted.id, Some(1));
  assert!(s.get_by_id(99).await.unwrap().is_none());
}

#[tokio::test]
async fn get_by_id_missing_returns_none() {
  let s = store().await;
  assert!(s.get_by_id(42).await.unwrap().is_none());
}

#[tokio::test]
async fn update_overwrites_the_row() {
  let s = store().await;

  let mut r = s
    .insert(recipe(RecipeStatus::Draft, "dal"))
    .await
    .unwrap()
    .unwrap();
  let created_at = r.created_at;

  r.name = "dal tadka".into();
  r.tags = vec!["lentils".into(), "weeknight".into()];
  r.servings = Some(4);
  assert!(s.update(&r).await.unwrap());

  let fetched = s.get_by_id(r.id.unwrap()).await.unwrap().unwrap();
  assert_eq!(fetched.name, "dal tadka");
  assert_eq!(fetched.tags, ["lentils", "weeknight"]);
  assert_eq!(fetched.servings, Some(4));
  assert_eq!(fetched.created_at, created_at);
}

#[tokio::test]
async fn update_of_a_missing_row_returns_false() {
  let s = store().await;
  let mut r = recipe(RecipeStatus::Draft, "nobody home");
  r.id = Some(7);
  assert!(!s.update(&r).await.unwrap());
}

#[tokio::test]
async fn delete_reports_whether_a_row_existed() {
  let s = store().await;

  let inserted = s
    .insert(recipe(RecipeStatus::Draft, "ephemeral"))
    .await
    .unwrap()
    .unwrap();
  let id = inserted.id.unwrap();

  assert!(s.delete(id).await.unwrap());
  assert!(!s.delete(id).await.unwrap());
  assert!(s.get_by_id(id).await.unwrap().is_none());
}

// ─── Draft links ─────────────────────────────────────────────────────────────

async fn linked_pair(s: &SqliteStore) -> (Recipe, Recipe) {
  let shadow = s
    .insert(recipe(RecipeStatus::Draft, "tagine v2"))
    .await
    .unwrap()
    .unwrap();

  let mut main = s
    .insert(recipe(RecipeStatus::Published, "tagine"))
    .await
    .unwrap()
    .unwrap();
  main.draft = Some(Box::new(shadow.clone()));
  assert!(s.update(&main).await.unwrap());

  (main, shadow)
}

#[tokio::test]
async fn get_by_id_hydrates_the_linked_draft() {
  let s = store().await;
  let (main, shadow) = linked_pair(&s).await;

  let fetched = s.get_by_id(main.id.unwrap()).await.unwrap().unwrap();
  assert_eq!(fetched.draft_id(), shadow.id);
  assert_eq!(fetched.draft.as_ref().unwrap().name, "tagine v2");
}

#[tokio::test]
async fn get_by_draft_id_finds_the_linking_row() {
  let s = store().await;
  let (main, shadow) = linked_pair(&s).await;

  let found = s
    .get_by_draft_id(shadow.id.unwrap())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.id, main.id);

  assert!(s.get_by_draft_id(main.id.unwrap()).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_shadow_row_clears_the_link() {
  let s = store().await;
  let (main, shadow) = linked_pair(&s).await;

  assert!(s.delete(shadow.id.unwrap()).await.unwrap());

  let fetched = s.get_by_id(main.id.unwrap()).await.unwrap().unwrap();
  assert!(fetched.draft.is_none());
  assert_eq!(fetched.draft_id(), None);
}

#[tokio::test]
async fn updating_with_no_draft_clears_a_stored_link() {
  let s = store().await;
  let (mut main, shadow) = linked_pair(&s).await;

  main.draft = None;
  assert!(s.update(&main).await.unwrap());

  let fetched = s.get_by_id(main.id.unwrap()).await.unwrap().unwrap();
  assert!(fetched.draft.is_none());
  // The shadow row itself survives; only the link is gone.
  assert!(s.get_by_id(shadow.id.unwrap()).await.unwrap().is_some());
}

// ─── Lifecycle over SQLite ───────────────────────────────────────────────────

#[tokio::test]
async fn full_editorial_flow() {
  let lc = Lifecycle::new(store().await);

  // Author a draft.
  let draft = lc
    .add_recipe(recipe(RecipeStatus::Draft, "ribollita"))
    .await
    .unwrap()
    .unwrap();
  let id = draft.id.unwrap();

  // Publish it.
  let mut publish = recipe(RecipeStatus::Published, "ribollita");
  publish.id = Some(id);
  assert!(lc.update_recipe(publish).await.unwrap());
  let row = lc.store().get_by_id(id).await.unwrap().unwrap();
  assert_eq!(row.status, Some(RecipeStatus::Published));

  // Edit the published version: the edit lands in a shadow row.
  let mut edit = recipe(RecipeStatus::Draft, "ribollita, less kale");
  edit.id = Some(id);
  assert!(lc.update_recipe(edit).await.unwrap());

  let row = lc.store().get_by_id(id).await.unwrap().unwrap();
  assert_eq!(row.status, Some(RecipeStatus::Published));
  assert_eq!(row.name, "ribollita");
  let shadow_id = row.draft_id().expect("shadow row linked");

  // Approve the edit: it merges back into the main row.
  let mut approve = recipe(RecipeStatus::Published, "ribollita, less kale");
  approve.id = Some(shadow_id);
  assert!(lc.update_recipe(approve).await.unwrap());

  let row = lc.store().get_by_id(id).await.unwrap().unwrap();
  assert_eq!(row.name, "ribollita, less kale");
  assert_eq!(row.status, Some(RecipeStatus::Published));
  assert!(row.draft.is_none());
  assert!(lc.store().get_by_id(shadow_id).await.unwrap().is_none());

  // Retire it.
  let mut archive = recipe(RecipeStatus::Archived, "ribollita, less kale");
  archive.id = Some(id);
  assert!(lc.update_recipe(archive).await.unwrap());

  // Archived rows are terminal.
  let mut revive = recipe(RecipeStatus::Published, "ribollita returns");
  revive.id = Some(id);
  assert!(!lc.update_recipe(revive).await.unwrap());
  let row = lc.store().get_by_id(id).await.unwrap().unwrap();
  assert_eq!(row.status, Some(RecipeStatus::Archived));
  assert_eq!(row.name, "ribollita, less kale");
}

#[tokio::test]
async fn archiving_discards_the_pending_shadow_row() {
  let lc = Lifecycle::new(store().await);

  let draft = lc
    .add_recipe(recipe(RecipeStatus::Draft, "congee"))
    .await
    .unwrap()
    .unwrap();
  let id = draft.id.unwrap();

  let mut publish = recipe(RecipeStatus::Published, "congee");
  publish.id = Some(id);
  assert!(lc.update_recipe(publish).await.unwrap());

  let mut edit = recipe(RecipeStatus::Draft, "congee with century egg");
  edit.id = Some(id);
  assert!(lc.update_recipe(edit).await.unwrap());
  let shadow_id = lc
    .store()
    .get_by_id(id)
    .await
    .unwrap()
    .unwrap()
    .draft_id()
    .expect("shadow row linked");

  let mut archive = recipe(RecipeStatus::Archived, "congee");
  archive.id = Some(id);
  assert!(lc.update_recipe(archive).await.unwrap());

  assert!(lc.store().get_by_id(shadow_id).await.unwrap().is_none());
  let row = lc.store().get_by_id(id).await.unwrap().unwrap();
  assert_eq!(row.status, Some(RecipeStatus::Archived));
  assert!(row.draft.is_none());
}

#[tokio::test]
async fn a_null_status_row_rejects_every_transition() {
  let lc = Lifecycle::new(store().await);

  // The status column is nullable; such a row can be stored but never
  // moved.
  let mut r = recipe(RecipeStatus::Draft, "mystery jar");
  r.status = None;
  let row = lc.store().insert(r).await.unwrap().unwrap();
  let id = row.id.unwrap();
  assert!(row.status.is_none());

  for target in [
    RecipeStatus::Draft,
    RecipeStatus::Published,
    RecipeStatus::Archived,
  ] {
    let mut attempt = recipe(target, "mystery jar, labelled");
    attempt.id = Some(id);
    assert!(lc.add_recipe(attempt.clone()).await.unwrap().is_none());
    assert!(!lc.update_recipe(attempt).await.unwrap());
  }

  let fetched = lc.store().get_by_id(id).await.unwrap().unwrap();
  assert!(fetched.status.is_none());
  assert_eq!(fetched.name, "mystery jar");
}
