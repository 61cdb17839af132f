//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub async fn create_user(&self, display_name: Option<&str>) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (token, display_name)
            VALUES ($1, $2)
            RETURNING id, token, display_name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, display_name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Answer Repository ===

    /// Upsert an answered-question record (one row per user/section/number)
    pub async fn upsert_answered_question(
        &self,
        user_id: Uuid,
        block_type: &str,
        section: &str,
        question_number: i32,
        was_correct: Option<bool>,
        typed_answer: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO answered_questions
                (user_id, block_type, section, question_number, was_correct, typed_answer)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, section, question_number) DO UPDATE SET
                was_correct = EXCLUDED.was_correct,
                typed_answer = EXCLUDED.typed_answer,
                answered_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(block_type)
        .bind(section)
        .bind(question_number)
        .bind(was_correct)
        .bind(typed_answer)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Upsert a missed-question record
    pub async fn upsert_missed_question(
        &self,
        user_id: Uuid,
        block_type: &str,
        section: &str,
        question_number: i32,
        last_answer: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO missed_questions
                (user_id, block_type, section, question_number, last_answer)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, section, question_number) DO UPDATE SET
                last_answer = EXCLUDED.last_answer,
                missed_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(block_type)
        .bind(section)
        .bind(question_number)
        .bind(last_answer)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a missed-question record after a correct answer
    pub async fn clear_missed_question(
        &self,
        user_id: Uuid,
        section: &str,
        question_number: i32,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM missed_questions
            WHERE user_id = $1 AND section = $2 AND question_number = $3
            "#,
        )
        .bind(user_id)
        .bind(section)
        .bind(question_number)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get missed questions for a user, optionally filtered by section
    pub async fn get_missed_questions(
        &self,
        user_id: Uuid,
        section: Option<&str>,
    ) -> Result<Vec<MissedQuestion>> {
        let missed = match section {
            Some(s) => {
                sqlx::query_as::<_, MissedQuestion>(
                    r#"
                    SELECT id, user_id, block_type, section, question_number, last_answer, missed_at
                    FROM missed_questions
                    WHERE user_id = $1 AND section = $2
                    ORDER BY section, question_number
                    "#,
                )
                .bind(user_id)
                .bind(s)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, MissedQuestion>(
                    r#"
                    SELECT id, user_id, block_type, section, question_number, last_answer, missed_at
                    FROM missed_questions
                    WHERE user_id = $1
                    ORDER BY section, question_number
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(missed)
    }

    // === Progress Repository ===

    /// Upsert section progress; the saved position only moves forward
    pub async fn upsert_section_progress(
        &self,
        user_id: Uuid,
        block_type: &str,
        section: &str,
        position: i32,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO section_progress (user_id, block_type, section, position)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, section) DO UPDATE SET
                position = GREATEST(section_progress.position, EXCLUDED.position),
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(block_type)
        .bind(section)
        .bind(position)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get all section progress rows for a user
    pub async fn get_section_progress(&self, user_id: Uuid) -> Result<Vec<SectionProgress>> {
        let progress = sqlx::query_as::<_, SectionProgress>(
            r#"
            SELECT user_id, block_type, section, position, updated_at
            FROM section_progress
            WHERE user_id = $1
            ORDER BY section
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(progress)
    }

    /// Get per-section answered/correct counts for a user
    pub async fn get_section_counts(&self, user_id: Uuid) -> Result<Vec<SectionCounts>> {
        let counts = sqlx::query_as::<_, SectionCounts>(
            r#"
            SELECT section,
                   COUNT(id)::INT as answered,
                   COUNT(CASE WHEN was_correct THEN 1 END)::INT as correct
            FROM answered_questions
            WHERE user_id = $1
            GROUP BY section
            ORDER BY section
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    // === Stats Repository ===

    /// Get aggregate statistics for one block
    pub async fn get_block_stats(&self, user_id: Uuid, block: &str) -> Result<BlockStatsResponse> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(id)::INT as total_answered,
                COUNT(CASE WHEN was_correct THEN 1 END)::INT as total_correct,
                COUNT(CASE WHEN answered_at >= CURRENT_DATE THEN 1 END)::INT as answered_today
            FROM answered_questions
            WHERE user_id = $1 AND block_type = $2
            "#,
        )
        .bind(user_id)
        .bind(block)
        .fetch_one(&self.pool)
        .await?;

        let sections = sqlx::query_as::<_, SectionCounts>(
            r#"
            SELECT section,
                   COUNT(id)::INT as answered,
                   COUNT(CASE WHEN was_correct THEN 1 END)::INT as correct
            FROM answered_questions
            WHERE user_id = $1 AND block_type = $2
            GROUP BY section
            ORDER BY section
            "#,
        )
        .bind(user_id)
        .bind(block)
        .fetch_all(&self.pool)
        .await?;

        let total_answered: i32 = row.get("total_answered");
        let total_correct: i32 = row.get("total_correct");

        Ok(BlockStatsResponse {
            block: block.to_string(),
            total_answered,
            total_correct,
            accuracy: accuracy(total_correct, total_answered),
            answered_today: row.get("answered_today"),
            sections: sections
                .into_iter()
                .map(|s| SectionStats {
                    accuracy: accuracy(s.correct, s.answered),
                    section: s.section,
                    answered: s.answered,
                    correct: s.correct,
                })
                .collect(),
        })
    }

    // === Article Repository ===

    /// Create an article
    pub async fn create_article(&self, user_id: Uuid, title: &str, body: &str) -> Result<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (user_id, title, body)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, body, created_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(article)
    }

    /// Get article by ID
    pub async fn get_article(&self, article_id: Uuid) -> Result<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, user_id, title, body, created_at
            FROM articles
            WHERE id = $1
            "#,
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    /// List newest articles with author names and engagement counts
    pub async fn list_articles(&self, limit: i64) -> Result<Vec<ArticleInfo>> {
        let articles = sqlx::query_as::<_, ArticleInfo>(
            r#"
            SELECT a.id, a.user_id, u.display_name as author_name, a.title, a.body, a.created_at,
                   (SELECT COUNT(*) FROM article_likes l WHERE l.article_id = a.id) as like_count,
                   (SELECT COUNT(*) FROM article_comments c WHERE c.article_id = a.id) as comment_count
            FROM articles a
            JOIN users u ON u.id = a.user_id
            ORDER BY a.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(articles)
    }

    /// Create a comment and return it with the author name
    pub async fn create_comment(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        body: &str,
    ) -> Result<CommentInfo> {
        let comment = sqlx::query_as::<_, CommentInfo>(
            r#"
            WITH inserted AS (
                INSERT INTO article_comments (article_id, user_id, body)
                VALUES ($1, $2, $3)
                RETURNING id, article_id, user_id, body, created_at
            )
            SELECT i.id, i.article_id, i.user_id, u.display_name as author_name, i.body, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(article_id)
        .bind(user_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// List comments for an article
    pub async fn list_comments(&self, article_id: Uuid) -> Result<Vec<CommentInfo>> {
        let comments = sqlx::query_as::<_, CommentInfo>(
            r#"
            SELECT c.id, c.article_id, c.user_id, u.display_name as author_name, c.body, c.created_at
            FROM article_comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.article_id = $1
            ORDER BY c.created_at
            "#,
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Record a like; returns false when the like already existed
    pub async fn like_article(&self, article_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO article_likes (article_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (article_id, user_id) DO NOTHING
            "#,
        )
        .bind(article_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a like; returns false when there was none
    pub async fn unlike_article(&self, article_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM article_likes
            WHERE article_id = $1 AND user_id = $2
            "#,
        )
        .bind(article_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Current like count for an article
    pub async fn get_like_count(&self, article_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM article_likes
            WHERE article_id = $1
            "#,
        )
        .bind(article_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

/// Correct-over-answered ratio, zero when nothing was answered.
fn accuracy(correct: i32, answered: i32) -> f64 {
    if answered == 0 {
        0.0
    } else {
        f64::from(correct) / f64::from(answered)
    }
}
