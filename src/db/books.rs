use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, BookUpdate, NewBook},
};

/// Storage for the reading log
///
/// Inputs are expected to be validated by the caller; stores only persist.
#[async_trait::async_trait]
pub trait BookStore: Send + Sync {
    /// All books, most recently created first
    async fn list_books(&self) -> AppResult<Vec<Book>>;

    /// All books, most recently updated first (reading history order)
    async fn recently_updated(&self) -> AppResult<Vec<Book>>;

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>>;

    async fn create_book(&self, input: NewBook) -> AppResult<Book>;

    /// Returns `None` when no book has the given id
    async fn update_book(&self, id: Uuid, update: BookUpdate) -> AppResult<Option<Book>>;

    /// Returns whether a book was removed
    async fn delete_book(&self, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed book store
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BookStore for PgBookStore {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, year, rating, created_at, updated_at
            FROM books
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn recently_updated(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, year, rating, created_at, updated_at
            FROM books
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, year, rating, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn create_book(&self, input: NewBook) -> AppResult<Book> {
        let book = Book::new(input);

        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, year, rating, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .bind(book.rating)
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(book_id = %book.id, "Book created");

        Ok(book)
    }

    async fn update_book(&self, id: Uuid, update: BookUpdate) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                year = COALESCE($4, year),
                rating = COALESCE($5, rating),
                updated_at = $6
            WHERE id = $1
            RETURNING id, title, author, year, rating, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.title)
        .bind(update.author)
        .bind(update.year)
        .bind(update.rating)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory book store
#[derive(Clone, Default)]
pub struct MemoryBookStore {
    inner: Arc<RwLock<HashMap<Uuid, Book>>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sorted_by<K: Ord>(&self, key: impl Fn(&Book) -> K) -> Vec<Book> {
        let inner = self.inner.read().await;
        let mut books: Vec<Book> = inner.values().cloned().collect();
        books.sort_by(|a, b| key(b).cmp(&key(a)));
        books
    }
}

#[async_trait::async_trait]
impl BookStore for MemoryBookStore {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.sorted_by(|b| b.created_at).await)
    }

    async fn recently_updated(&self) -> AppResult<Vec<Book>> {
        Ok(self.sorted_by(|b| b.updated_at).await)
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn create_book(&self, input: NewBook) -> AppResult<Book> {
        let book = Book::new(input);
        let mut inner = self.inner.write().await;
        inner.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: Uuid, update: BookUpdate) -> AppResult<Option<Book>> {
        let mut inner = self.inner.write().await;
        Ok(inner.get_mut(&id).map(|book| {
            book.apply(update);
            book.clone()
        }))
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.remove(&id).is_some())
    }
}
