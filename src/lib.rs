//! Per-diem (diarias) calculation service.
//!
//! Values official travel itineraries against the daily-allowance schedule
//! and serves the results as JSON to the Central de Viagens front end.

pub mod config;
pub mod diarias;
pub mod error;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Spells out a formatted amount such as `1435,00` in words.
pub type ValueInWords = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    value_in_words: Option<ValueInWords>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `spell` to fill `valor_extenso` in every response.
    pub fn with_value_in_words(mut self, spell: ValueInWords) -> Self {
        self.value_in_words = Some(spell);
        self
    }

    pub fn value_in_words(&self) -> Option<&dyn Fn(&str) -> String> {
        self.value_in_words
            .as_deref()
            .map(|spell| spell as &dyn Fn(&str) -> String)
    }
}

/// Build the application router.
pub fn app(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", diarias::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
