//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Tags are stored as compact
//! JSON arrays. The status enum is stored as its lowercase name.

use chrono::{DateTime, Utc};
use larder_core::recipe::{Recipe, RecipeStatus};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── RecipeStatus
// ─────────────────────────────────────────────────────────────

pub fn encode_status(s: RecipeStatus) -> &'static str {
  match s {
    RecipeStatus::Draft => "draft",
    RecipeStatus::Published => "published",
    RecipeStatus::Archived => "archived",
  }
}

pub fn decode_status(s: &str) -> Result<RecipeStatus> {
  match s {
    "draft" => Ok(RecipeStatus::Draft),
    "published" => Ok(RecipeStatus::Published),
    "archived" => Ok(RecipeStatus::Archived),
    other => Err(Error::UnknownStatus(other.to_owned())),
  }
}

// ─── Tags ────────────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `recipes` row.
pub struct RawRecipe {
  pub id:           i64,
  pub status:       Option<String>,
  pub name:         String,
  pub summary:      Option<String>,
  pub instructions: String,
  pub prep_minutes: Option<u32>,
  pub cook_minutes: Option<u32>,
  pub servings:     Option<u32>,
  pub tags:         String,
  pub draft_id:     Option<i64>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawRecipe {
  /// Read one row from a `SELECT` over all `recipes` columns, in schema
  /// order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      status:       row.get(1)?,
      name:         row.get(2)?,
      summary:      row.get(3)?,
      instructions: row.get(4)?,
      prep_minutes: row.get(5)?,
      cook_minutes: row.get(6)?,
      servings:     row.get(7)?,
      tags:         row.get(8)?,
      draft_id:     row.get(9)?,
      created_at:   row.get(10)?,
      updated_at:   row.get(11)?,
    })
  }

  /// Decode into a [`Recipe`] (with no draft attached) plus the raw
  /// `draft_id` link, which the store resolves separately.
  pub fn into_parts(self) -> Result<(Recipe, Option<i64>)> {
    let status = self.status.as_deref().map(decode_status).transpose()?;

    let recipe = Recipe {
      id: Some(self.id),
      status,
      name: self.name,
      summary: self.summary,
      instructions: self.instructions,
      prep_minutes: self.prep_minutes,
      cook_minutes: self.cook_minutes,
      servings: self.servings,
      tags: decode_tags(&self.tags)?,
      draft: None,
      created_at: Some(decode_dt(&self.created_at)?),
      updated_at: Some(decode_dt(&self.updated_at)?),
    };

    Ok((recipe, self.draft_id))
  }
}
