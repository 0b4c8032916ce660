//! User row operations.

use super::{Store, StoreError};
use crate::db::User;

impl Store {
    /// Insert a new user. The caller hashes the password; the store never
    /// sees the plaintext credential.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        self.bounded(async {
            let now = chrono::Utc::now().to_rfc3339();
            let mut tx = self.pool.begin().await?;

            let result = sqlx::query(
                "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
            )
            .bind(username)
            .bind(password_hash)
            .bind(&now)
            .execute(&mut *tx)
            .await?;

            let id = result.last_insert_rowid();
            let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

            tx.commit().await?;
            Ok(user)
        })
        .await
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        self.bounded(async {
            let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
            Ok(user)
        })
        .await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, StoreError> {
        self.bounded(async {
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::NotFound)
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

    #[tokio::test]
    async fn duplicate_username_is_a_constraint_violation() {
        let store = test_store().await;

        store.create_user("paul", "hash-a").await.unwrap();
        let result = store.create_user("paul", "hash-b").await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
    }

    #[tokio::test]
    async fn lookup_by_username() {
        let store = test_store().await;
        let created = store.create_user("jessica", "hash").await.unwrap();

        let found = store.find_user_by_username("jessica").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));

        let missing = store.find_user_by_username("leto").await.unwrap();
        assert!(missing.is_none());
    }
}
