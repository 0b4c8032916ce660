//! Book catalog API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{
    parse_book_id, parse_price, validate_author, validate_description, validate_title,
};
use crate::db::{BookPatch, BookResponse, CreateBookRequest, NewBook, UpdateBookRequest};
use crate::AppState;

/// Validate a CreateBookRequest and turn it into an insertable row
pub(super) fn validate_create_request(req: CreateBookRequest) -> Result<NewBook, ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_title(&req.title) {
        errors.add("title", e);
    }
    if let Err(e) = validate_author(&req.author) {
        errors.add("author", e);
    }
    if let Err(e) = validate_description(&req.description) {
        errors.add("description", e);
    }

    let price_cents = match parse_price(&req.price) {
        Ok(cents) => Some(cents),
        Err(e) => {
            errors.add("price", e);
            None
        }
    };

    errors.finish()?;

    Ok(NewBook {
        title: req.title,
        author: req.author,
        description: req.description,
        // errors.finish() bailed out above if the price did not parse
        price_cents: price_cents.unwrap_or_default(),
    })
}

/// Validate an UpdateBookRequest, checking only the supplied fields
pub(super) fn validate_update_request(req: UpdateBookRequest) -> Result<BookPatch, ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(ref title) = req.title {
        if let Err(e) = validate_title(title) {
            errors.add("title", e);
        }
    }
    if let Some(ref author) = req.author {
        if let Err(e) = validate_author(author) {
            errors.add("author", e);
        }
    }
    if let Err(e) = validate_description(&req.description) {
        errors.add("description", e);
    }

    let price_cents = match req.price {
        Some(ref raw) => match parse_price(raw) {
            Ok(cents) => Some(cents),
            Err(e) => {
                errors.add("price", e);
                None
            }
        },
        None => None,
    };

    errors.finish()?;

    Ok(BookPatch {
        title: req.title,
        author: req.author,
        description: req.description,
        price_cents,
    })
}

/// List all books
///
/// GET /
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = state.store.list_books().await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// Get a single book
///
/// GET /books/:id
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let id = parse_book_id(&id).map_err(|e| ApiError::validation_field("id", e))?;

    let book = state.store.get_book(id).await?;
    Ok(Json(BookResponse::from(book)))
}

/// Create a new book
///
/// POST /books
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let new = validate_create_request(req)?;

    let book = state.store.create_book(new).await?;

    tracing::info!(book_id = book.id, user_id = user.0, title = %book.title, "Book added");

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// Partially update a book
///
/// PUT /books/:id
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let id = parse_book_id(&id).map_err(|e| ApiError::validation_field("id", e))?;
    let patch = validate_update_request(req)?;

    let book = state.store.update_book(id, patch).await?;

    tracing::info!(book_id = book.id, user_id = user.0, "Book updated");

    Ok(Json(BookResponse::from(book)))
}

/// Delete a book
///
/// DELETE /books/:id
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_book_id(&id).map_err(|e| ApiError::validation_field("id", e))?;

    state.store.delete_book(id).await?;

    tracing::info!(book_id = id, user_id = user.0, "Book deleted");

    Ok(StatusCode::NO_CONTENT)
}
