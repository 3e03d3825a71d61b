//! Catalog browsing and staff-gated book mutation

use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDetail, BookInput, SortOrder},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books with optional title search and popularity ordering.
    /// Returns the books, the full author list for display, and the sort
    /// order actually applied.
    pub async fn list_books(
        &self,
        sort: Option<&str>,
        query: Option<&str>,
    ) -> AppResult<(Vec<Book>, Vec<Author>, SortOrder)> {
        let sort = SortOrder::from_param(sort);
        let query = query.filter(|q| !q.is_empty());

        let books = self.repository.books.list(sort, query).await?;
        let authors = self.repository.authors.list().await?;
        Ok((books, authors, sort))
    }

    /// Get book by ID with its author embedded
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetail> {
        self.repository.books.get_detail(id).await
    }

    /// List all authors
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get author by ID
    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// List an author's books, most popular first
    pub async fn get_author_books(&self, author_id: i32) -> AppResult<Vec<Book>> {
        self.repository.books.list_by_author(author_id).await
    }

    /// Resolve an author by exact name. Backs the legacy name-based URL,
    /// which redirects to the canonical id-based detail route.
    pub async fn resolve_author_by_name(&self, name: &str) -> AppResult<Author> {
        self.repository.authors.get_by_name(name).await
    }

    /// Create a book. Requires a staff caller; validates before persisting.
    pub async fn create_book(&self, claims: &UserClaims, input: BookInput) -> AppResult<Book> {
        claims.require_staff()?;
        self.validate_input(&input).await?;
        let created = self.repository.books.create(&input).await?;
        tracing::info!("Book {} created by user {}", created.id, claims.user_id);
        Ok(created)
    }

    /// Update a book. Requires a staff caller; NotFound when the id does
    /// not exist, then the same validate-then-persist contract as create.
    pub async fn update_book(
        &self,
        claims: &UserClaims,
        id: i32,
        input: BookInput,
    ) -> AppResult<Book> {
        claims.require_staff()?;
        self.repository.books.get_by_id(id).await?;
        self.validate_input(&input).await?;
        let updated = self.repository.books.update(id, &input).await?;
        tracing::info!("Book {} updated by user {}", id, claims.user_id);
        Ok(updated)
    }

    /// Delete a book unconditionally. Favorites referencing it go stale and
    /// are filtered out lazily when the favorites list is rendered.
    pub async fn delete_book(&self, claims: &UserClaims, id: i32) -> AppResult<()> {
        claims.require_staff()?;
        self.repository.books.delete(id).await?;
        tracing::info!("Book {} deleted by user {}", id, claims.user_id);
        Ok(())
    }

    /// Field validation plus the referential check on the author. Both kinds
    /// of failure surface as per-field validation errors, nothing persisted.
    async fn validate_input(&self, input: &BookInput) -> AppResult<()> {
        input.validate()?;

        if !self.repository.authors.exists(input.author_id).await? {
            let mut errors = ValidationErrors::new();
            let mut error = ValidationError::new("does_not_exist");
            error.message = Some("Author does not exist".into());
            errors.add("author_id", error);
            return Err(AppError::Validation(errors));
        }
        Ok(())
    }
}
