//! Books repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDetail, BookInput, SortOrder},
    },
};

const BOOK_COLUMNS: &str = "id, title, author_id, isbn, popularity, created_at, updated_at";

/// Escape LIKE metacharacters so user input is matched literally.
fn escape_like(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '%' | '_' | '\\' => vec!['\\', c],
            c => vec![c],
        })
        .collect()
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List books, optionally filtered by a case-insensitive title substring
    /// and ordered by popularity. Stored order falls back to insertion order.
    pub async fn list(&self, sort: SortOrder, query: Option<&str>) -> AppResult<Vec<Book>> {
        let mut sql = format!("SELECT {} FROM books", BOOK_COLUMNS);
        if query.is_some() {
            sql.push_str(" WHERE title ILIKE $1");
        }
        sql.push_str(match sort {
            SortOrder::Ascending => " ORDER BY popularity ASC, id",
            SortOrder::Descending => " ORDER BY popularity DESC, id",
            SortOrder::Stored => " ORDER BY id",
        });

        let stmt = sqlx::query_as::<_, Book>(&sql);
        let stmt = if let Some(term) = query {
            stmt.bind(format!("%{}%", escape_like(term)))
        } else {
            stmt
        };

        Ok(stmt.fetch_all(&self.pool).await?)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get book by ID with the author record embedded
    pub async fn get_detail(&self, id: i32) -> AppResult<BookDetail> {
        let row = sqlx::query(
            r#"
            SELECT b.id, b.title, b.isbn, b.popularity,
                   a.id AS author_id, a.name AS author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        Ok(BookDetail {
            id: row.get("id"),
            title: row.get("title"),
            isbn: row.get("isbn"),
            popularity: row.get("popularity"),
            author: Author {
                id: row.get("author_id"),
                name: row.get("author_name"),
            },
        })
    }

    /// Fetch the books that currently exist among the given ids. Each
    /// existing book appears once, whatever the multiplicity in `ids`.
    pub async fn get_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = ANY($1) ORDER BY id",
            BOOK_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// List all books by an author, most popular first
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY popularity DESC, id",
            BOOK_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Create a new book
    pub async fn create(&self, input: &BookInput) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author_id, isbn, popularity)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&input.title)
        .bind(input.author_id)
        .bind(&input.isbn)
        .bind(input.popularity)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    /// Update an existing book (full replace of the mutable fields)
    pub async fn update(&self, id: i32, input: &BookInput) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $1, author_id = $2, isbn = $3, popularity = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&input.title)
        .bind(input.author_id)
        .bind(&input.isbn)
        .bind(input.popularity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book. Favorites referencing it are left to go stale; the
    /// favorites listing filters them out lazily.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }
}
