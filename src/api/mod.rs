pub mod auth;
mod books;
pub mod error;
mod forms;
mod validation;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Catalog
        .route("/", get(books::list_books))
        .route("/books", post(books::create_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id", put(books::update_book))
        .route("/books/:id", delete(books::delete_book))
        // Form-encoded variants
        .route("/add_book", post(forms::add_book))
        .route("/books/:id/edit", post(forms::edit_book))
        .route("/books/:id/delete", post(forms::delete_book))
        // Auth
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
