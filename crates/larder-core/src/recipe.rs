//! Recipe — the record moved through the publication lifecycle.
//!
//! Content fields (name, times, instructions) carry no validation here;
//! only the status-transition policy in [`crate::lifecycle`] inspects a
//! record beyond passing it through to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Status ──────────────────────────────────────────────────────────────────

/// The publication state of a recipe row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeStatus {
  /// Being edited — free-standing, or shadow-attached to a published row.
  Draft,
  /// Visible to readers. May own at most one pending shadow draft.
  Published,
  /// Terminal: an archived row is never updated in place.
  Archived,
}

// ─── Recipe ──────────────────────────────────────────────────────────────────

/// A recipe record.
///
/// `id` is the store-assigned row id; `None` or a non-positive value marks
/// a record that has not been persisted yet. `status` names the state a
/// caller wants the record in and drives dispatch in
/// [`Lifecycle`](crate::lifecycle::Lifecycle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
  pub id:           Option<i64>,
  pub status:       Option<RecipeStatus>,
  pub name:         String,
  pub summary:      Option<String>,
  pub instructions: String,
  pub prep_minutes: Option<u32>,
  pub cook_minutes: Option<u32>,
  pub servings:     Option<u32>,
  pub tags:         Vec<String>,
  /// An in-progress edit of this recipe, present only while this row is
  /// published and an unapproved revision exists. The boxed record's `id`
  /// is the shadow row's stored id.
  pub draft:        Option<Box<Recipe>>,
  /// Store-assigned on insert; never accepted from callers.
  pub created_at:   Option<DateTime<Utc>>,
  /// Store-assigned on every write.
  pub updated_at:   Option<DateTime<Utc>>,
}

impl Recipe {
  /// A blank, unstored record with the given name and requested status.
  pub fn new(name: impl Into<String>, status: RecipeStatus) -> Self {
    Self {
      id: None,
      status: Some(status),
      name: name.into(),
      summary: None,
      instructions: String::new(),
      prep_minutes: None,
      cook_minutes: None,
      servings: None,
      tags: Vec::new(),
      draft: None,
      created_at: None,
      updated_at: None,
    }
  }

  /// The persisted row id. Absent and non-positive ids both mean "new",
  /// so both yield `None`.
  pub fn stored_id(&self) -> Option<i64> {
    self.id.filter(|id| *id > 0)
  }

  /// The stored row id of the pending shadow draft, if one is attached.
  pub fn draft_id(&self) -> Option<i64> {
    self.draft.as_deref().and_then(Recipe::stored_id)
  }
}
