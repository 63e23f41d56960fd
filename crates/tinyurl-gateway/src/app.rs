use axum::routing::{get, post};
use axum::Router;
use tinyurl_core::Store;
use tinyurl_generator::Generator;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;

pub const SHORTEN_PATH: &str = "/client/v1/tinyurl/shorten";

pub struct App {}

impl App {
    pub fn router<S: Store, G: Generator>(state: AppState<S, G>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route(SHORTEN_PATH, post(shorten_handler::<S, G>))
            .route("/{short_url}", get(redirect_handler::<S, G>))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
