//! Book models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog row. Price is held as integer cents so monetary values never
/// touch binary floating point.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Book as rendered to API clients, with the price formatted back to a
/// two-place decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub price: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            description: book.description,
            price: format_price(book.price_cents),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Render cents as a two-place decimal string, e.g. 1250 -> "12.50".
pub fn format_price(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Validated fields for a new book, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub price_cents: i64,
}

/// Field-level overwrite set for an update. `None` leaves the column
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
    }
}

/// JSON body for POST /books. Price arrives as text so clients can send
/// `"$12.50"` or `"12.50"` interchangeably.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub price: String,
}

/// JSON body for PUT /books/:id. Only the enumerated fields are
/// updatable; unknown keys are rejected outright.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1250), "12.50");
        assert_eq!(format_price(0), "0.00");
        assert_eq!(format_price(5), "0.05");
        assert_eq!(format_price(100), "1.00");
        assert_eq!(format_price(999999), "9999.99");
    }

    #[test]
    fn test_update_request_rejects_unknown_fields() {
        let result: Result<UpdateBookRequest, _> =
            serde_json::from_str(r#"{"title": "x", "publisher": "y"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_request_rejects_unknown_fields() {
        let result: Result<CreateBookRequest, _> = serde_json::from_str(
            r#"{"title": "x", "author": "y", "price": "1.00", "isbn": "z"}"#,
        );
        assert!(result.is_err());
    }
}
