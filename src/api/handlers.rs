use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Book, BookUpdate, NewBook, RecommendationResponse};
use crate::services::recommendations;

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// List the reading log, newest first
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.books.list_books().await?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<Book>> {
    let Path(id) = path?;
    state
        .books
        .get_book(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// Log a new book
pub async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<NewBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.books.create_book(request.validate()?).await?;
    tracing::info!(book_id = %book.id, "Book logged");
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    Json(request): Json<BookUpdate>,
) -> AppResult<Json<Book>> {
    let Path(id) = path?;
    state
        .books
        .update_book(id, request.validate()?)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<Value>> {
    let Path(id) = path?;
    if state.books.delete_book(id).await? {
        Ok(Json(json!({ "ok": true })))
    } else {
        Err(not_found())
    }
}

/// Recommend new books from the reading history
pub async fn get_recommendations(
    State(state): State<AppState>,
) -> AppResult<Json<RecommendationResponse>> {
    let response = recommendations::recommend(
        state.books.as_ref(),
        state.model.as_deref(),
        &state.pipeline,
    )
    .await
    .inspect_err(|e| tracing::error!(error = %e, "Recommendation request failed"))?;

    Ok(Json(response))
}

fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
