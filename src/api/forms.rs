//! Form-encoded variants of the write endpoints.
//!
//! These accept `application/x-www-form-urlencoded` bodies and redirect on
//! success instead of returning JSON, for clients driving the catalog from
//! plain HTML forms. Validation and authorization are identical to the
//! JSON endpoints.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::books::{validate_create_request, validate_update_request};
use super::error::ApiError;
use super::validation::parse_book_id;
use crate::db::{CreateBookRequest, UpdateBookRequest};
use crate::AppState;

/// Create a book from a form post, then redirect to the listing
///
/// POST /add_book
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Form(req): Form<CreateBookRequest>,
) -> Result<Redirect, ApiError> {
    let new = validate_create_request(req)?;
    let book = state.store.create_book(new).await?;

    tracing::info!(book_id = book.id, user_id = user.0, "Book added via form");

    Ok(Redirect::to("/"))
}

/// Update a book from a form post, then redirect to its page
///
/// POST /books/:id/edit
pub async fn edit_book(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Form(req): Form<UpdateBookRequest>,
) -> Result<Redirect, ApiError> {
    let id = parse_book_id(&id).map_err(|e| ApiError::validation_field("id", e))?;
    let patch = validate_update_request(req)?;

    let book = state.store.update_book(id, patch).await?;

    tracing::info!(book_id = book.id, user_id = user.0, "Book updated via form");

    Ok(Redirect::to(&format!("/books/{}", book.id)))
}

/// Delete a book from a form post, then redirect to the listing
///
/// POST /books/:id/delete
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let id = parse_book_id(&id).map_err(|e| ApiError::validation_field("id", e))?;

    state.store.delete_book(id).await?;

    tracing::info!(book_id = id, user_id = user.0, "Book deleted via form");

    Ok(Redirect::to("/"))
}
