use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Highest rating a reader can give a book
pub const MAX_RATING: f64 = 5.0;

/// A book in the user's reading log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Creates a new book from validated input
    pub fn new(input: NewBook) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            author: input.author,
            year: input.year,
            rating: input.rating,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a validated partial update and bumps `updated_at`
    pub fn apply(&mut self, update: BookUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if update.year.is_some() {
            self.year = update.year;
        }
        if update.rating.is_some() {
            self.rating = update.rating;
        }
        self.updated_at = Utc::now();
    }
}

/// Request body for logging a new book
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
}

impl NewBook {
    /// Trims text fields and rejects missing title/author or out-of-range ratings
    pub fn validate(self) -> AppResult<Self> {
        let title = self.title.trim().to_string();
        let author = self.author.trim().to_string();

        if title.is_empty() || author.is_empty() {
            return Err(AppError::InvalidInput(
                "title and author required".to_string(),
            ));
        }
        validate_rating(self.rating)?;

        Ok(Self {
            title,
            author,
            year: self.year,
            rating: self.rating,
        })
    }
}

/// Request body for editing a book; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
}

impl BookUpdate {
    pub fn validate(self) -> AppResult<Self> {
        let title = non_empty("title", self.title)?;
        let author = non_empty("author", self.author)?;
        validate_rating(self.rating)?;

        Ok(Self {
            title,
            author,
            year: self.year,
            rating: self.rating,
        })
    }
}

fn non_empty(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if v.is_empty() => Err(AppError::InvalidInput(format!(
            "{} cannot be empty",
            field
        ))),
        other => Ok(other),
    }
}

fn validate_rating(rating: Option<f64>) -> AppResult<()> {
    match rating {
        Some(r) if !(0.0..=MAX_RATING).contains(&r) => Err(AppError::InvalidInput(format!(
            "rating must be between 0 and {}",
            MAX_RATING
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(title: &str, author: &str, rating: Option<f64>) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            year: Some(1965),
            rating,
        }
    }

    #[test]
    fn test_new_book_trims_fields() {
        let book = new_book("  Dune ", " Frank Herbert", Some(4.5))
            .validate()
            .unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
    }

    #[test]
    fn test_new_book_requires_title_and_author() {
        assert!(matches!(
            new_book("   ", "Frank Herbert", None).validate(),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            new_book("Dune", "", None).validate(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_new_book_rejects_out_of_range_rating() {
        assert!(new_book("Dune", "Frank Herbert", Some(5.5)).validate().is_err());
        assert!(new_book("Dune", "Frank Herbert", Some(-1.0)).validate().is_err());
        assert!(new_book("Dune", "Frank Herbert", Some(0.0)).validate().is_ok());
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let update = BookUpdate {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_apply_update_keeps_untouched_fields() {
        let mut book = Book::new(new_book("Dune", "Frank Herbert", Some(4.0)));
        let created = book.updated_at;

        book.apply(BookUpdate {
            rating: Some(5.0),
            ..Default::default()
        });

        assert_eq!(book.title, "Dune");
        assert_eq!(book.year, Some(1965));
        assert_eq!(book.rating, Some(5.0));
        assert!(book.updated_at >= created);
    }
}
