//! JSON REST API for the larder recipe service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`larder_core::store::RecipeStore`], with all writes routed through the
//! publication lifecycle. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", larder_api::api_router(lifecycle.clone()))
//! ```

pub mod error;
pub mod recipes;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use larder_core::{lifecycle::Lifecycle, store::RecipeStore};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router over `lifecycle`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(lifecycle: Arc<Lifecycle<S>>) -> Router<()>
where
  S: RecipeStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/recipes", post(recipes::create::<S>))
    .route(
      "/recipes/{id}",
      get(recipes::get_one::<S>).put(recipes::update_one::<S>),
    )
    .with_state(lifecycle)
}

// ─── Integration tests ────────────────────────────────────────────────────────
