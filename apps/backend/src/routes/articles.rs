//! Social article endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// Newest-first page size for the article feed.
const FEED_LIMIT: i64 = 50;

/// GET /api/articles
pub async fn list(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
) -> Result<Json<ArticleListResponse>> {
    let articles = state.db.list_articles(FEED_LIMIT).await?;
    Ok(Json(ArticleListResponse { articles }))
}

/// POST /api/articles
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<Json<Article>> {
    if payload.title.trim().is_empty() || payload.body.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Title and body must not be empty".to_string(),
        ));
    }

    let article = state
        .db
        .create_article(auth.user_id, payload.title.trim(), payload.body.trim())
        .await?;

    tracing::info!("User {} posted article {}", auth.user_id, article.id);

    Ok(Json(article))
}

/// GET /api/articles/{id}/comments
pub async fn comments(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
    Path(article_id): Path<Uuid>,
) -> Result<Json<CommentListResponse>> {
    state
        .db
        .get_article(article_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;

    let comments = state.db.list_comments(article_id).await?;
    Ok(Json(CommentListResponse { comments }))
}

/// POST /api/articles/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(article_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Json<CommentInfo>> {
    if payload.body.trim().is_empty() {
        return Err(ApiError::BadRequest("Comment must not be empty".to_string()));
    }

    state
        .db
        .get_article(article_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;

    let comment = state
        .db
        .create_comment(article_id, auth.user_id, payload.body.trim())
        .await?;

    Ok(Json(comment))
}

/// PUT /api/articles/{id}/like
pub async fn like(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(article_id): Path<Uuid>,
) -> Result<Json<LikeResponse>> {
    state
        .db
        .get_article(article_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;

    state.db.like_article(article_id, auth.user_id).await?;
    let like_count = state.db.get_like_count(article_id).await?;

    Ok(Json(LikeResponse {
        liked: true,
        like_count,
    }))
}

/// DELETE /api/articles/{id}/like
pub async fn unlike(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(article_id): Path<Uuid>,
) -> Result<Json<LikeResponse>> {
    state
        .db
        .get_article(article_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;

    state.db.unlike_article(article_id, auth.user_id).await?;
    let like_count = state.db.get_like_count(article_id).await?;

    Ok(Json(LikeResponse {
        liked: false,
        like_count,
    }))
}
