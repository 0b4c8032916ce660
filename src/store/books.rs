//! Book row operations.

use super::{Store, StoreError};
use crate::db::{Book, BookPatch, NewBook};

impl Store {
    /// Insert a new book and return the stored row with its assigned id.
    pub async fn create_book(&self, new: NewBook) -> Result<Book, StoreError> {
        self.bounded(async {
            let now = chrono::Utc::now().to_rfc3339();
            let mut tx = self.pool.begin().await?;

            let result = sqlx::query(
                r#"
                INSERT INTO books (title, author, description, price_cents, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&new.title)
            .bind(&new.author)
            .bind(&new.description)
            .bind(new.price_cents)
            .bind(&now)
            .bind(&now)
            .execute(&mut *tx)
            .await?;

            let id = result.last_insert_rowid();
            let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

            tx.commit().await?;
            Ok(book)
        })
        .await
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, StoreError> {
        self.bounded(async {
            sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::NotFound)
        })
        .await
    }

    /// All books in insertion order.
    pub async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        self.bounded(async {
            let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
            Ok(books)
        })
        .await
    }

    /// Apply a field-level overwrite. Unsupplied fields keep their current
    /// values. Returns the row as stored after the update.
    pub async fn update_book(&self, id: i64, patch: BookPatch) -> Result<Book, StoreError> {
        self.bounded(async {
            let now = chrono::Utc::now().to_rfc3339();
            let mut tx = self.pool.begin().await?;

            let exists = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
            if exists.is_none() {
                return Err(StoreError::NotFound);
            }

            sqlx::query(
                r#"
                UPDATE books SET
                    title = COALESCE(?, title),
                    author = COALESCE(?, author),
                    description = COALESCE(?, description),
                    price_cents = COALESCE(?, price_cents),
                    updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(&patch.title)
            .bind(&patch.author)
            .bind(&patch.description)
            .bind(patch.price_cents)
            .bind(&now)
            .bind(id)
            .execute(&mut *tx)
            .await?;

            let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

            tx.commit().await?;
            Ok(book)
        })
        .await
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), StoreError> {
        self.bounded(async {
            let mut tx = self.pool.begin().await?;

            let result = sqlx::query("DELETE FROM books WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound);
            }

            tx.commit().await?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use std::time::Duration;

    async fn test_store() -> Store {
        let pool = db::init_in_memory().await.expect("in-memory pool");
        Store::new(pool, Duration::from_secs(5))
    }

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: None,
            price_cents: 1250,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = test_store().await;

        let created = store.create_book(dune()).await.unwrap();
        assert!(created.id > 0);

        let fetched = store.get_book(created.id).await.unwrap();
        assert_eq!(fetched.title, "Dune");
        assert_eq!(fetched.author, "Herbert");
        assert_eq!(fetched.description, None);
        assert_eq!(fetched.price_cents, 1250);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = test_store().await;

        assert!(matches!(
            store.get_book(42).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.update_book(42, BookPatch::default()).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.delete_book(42).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_is_deterministic() {
        let store = test_store().await;
        let created = store.create_book(dune()).await.unwrap();

        store.delete_book(created.id).await.unwrap();

        // Deleting again reports NotFound, every time
        assert!(matches!(
            store.delete_book(created.id).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.get_book(created.id).await,
            Err(StoreError::NotFound)
        ));

        let books = store.list_books().await.unwrap();
        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn partial_update_preserves_other_fields() {
        let store = test_store().await;
        let created = store
            .create_book(NewBook {
                description: Some("Spice and sand".to_string()),
                ..dune()
            })
            .await
            .unwrap();

        let updated = store
            .update_book(
                created.id,
                BookPatch {
                    price_cents: Some(999),
                    ..BookPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 999);
        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.author, "Herbert");
        assert_eq!(updated.description.as_deref(), Some("Spice and sand"));
    }

    #[tokio::test]
    async fn check_constraint_rejects_and_rolls_back() {
        let store = test_store().await;
        let created = store.create_book(dune()).await.unwrap();

        // The schema CHECK rejects empty titles; the transaction rolls back
        let result = store
            .update_book(
                created.id,
                BookPatch {
                    title: Some(String::new()),
                    ..BookPatch::default()
                },
            )
            .await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));

        let fetched = store.get_book(created.id).await.unwrap();
        assert_eq!(fetched.title, "Dune");
    }

    #[tokio::test]
    async fn list_returns_all_in_insertion_order() {
        let store = test_store().await;
        let first = store.create_book(dune()).await.unwrap();
        let second = store
            .create_book(NewBook {
                title: "Foundation".to_string(),
                author: "Asimov".to_string(),
                description: None,
                price_cents: 899,
            })
            .await
            .unwrap();

        let books = store.list_books().await.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, first.id);
        assert_eq!(books[1].id, second.id);
    }
}
