//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from prep-core
pub use prep_core::types::{BlockType, GradedQuestion, OpenQuestion, Question, QuestionSet};

// === Database Entity Types ===

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Answered-question record (at most one row per user/section/question number)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnsweredQuestion {
    pub id: Uuid,
    pub user_id: Uuid,
    pub block_type: String,
    pub section: String,
    pub question_number: i32,
    pub was_correct: Option<bool>,
    pub typed_answer: Option<String>,
    pub answered_at: DateTime<Utc>,
}

/// Missed-question record (same key, kept until answered correctly)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MissedQuestion {
    pub id: Uuid,
    pub user_id: Uuid,
    pub block_type: String,
    pub section: String,
    pub question_number: i32,
    pub last_answer: Option<String>,
    pub missed_at: DateTime<Utc>,
}

/// Saved position within a section
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SectionProgress {
    pub user_id: Uuid,
    pub block_type: String,
    pub section: String,
    pub position: i32,
    pub updated_at: DateTime<Utc>,
}

/// Per-section answered/correct counts
#[derive(Debug, Clone, FromRow)]
pub struct SectionCounts {
    pub section: String,
    pub answered: i32,
    pub correct: i32,
}

/// Posted article
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Article with author name and engagement counts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ArticleInfo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_name: Option<String>,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub comment_count: i64,
}

/// Comment with author name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentInfo {
    pub id: Uuid,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub author_name: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

// Section types
#[derive(Debug, Serialize, Deserialize)]
pub struct SectionListQuery {
    pub block: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SectionSummary {
    pub block: String,
    pub section: String,
    pub title: String,
    pub question_count: usize,
    pub content_hash: String,
    pub answered: i32,
    pub correct: i32,
    pub position: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SectionListResponse {
    pub sections: Vec<SectionSummary>,
}

// Practice types
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsQuery {
    pub section: String,
}

/// Question as served to clients: the canonical answer never leaves the server.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub number: u32,
    pub kind: String,
    pub prompt: String,
}

impl PublicQuestion {
    pub fn from_question(question: &Question) -> Self {
        Self {
            number: question.number(),
            kind: question.kind_str().to_string(),
            prompt: question.prompt().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub block: String,
    pub section: String,
    pub title: String,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub section: String,
    pub question_number: u32,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub graded: bool,
    pub correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MissedQuery {
    pub section: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MissedQuestionInfo {
    pub section: String,
    pub question_number: i32,
    pub prompt: Option<String>,
    pub last_answer: Option<String>,
    pub missed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MissedListResponse {
    pub missed: Vec<MissedQuestionInfo>,
}

// Stats types
#[derive(Debug, Serialize, Deserialize)]
pub struct SectionStats {
    pub section: String,
    pub answered: i32,
    pub correct: i32,
    pub accuracy: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlockStatsResponse {
    pub block: String,
    pub total_answered: i32,
    pub total_correct: i32,
    pub accuracy: f64,
    pub answered_today: i32,
    pub sections: Vec<SectionStats>,
}

// Article types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: i64,
}
