//! Practice endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;
use prep_core::check_answer;

/// GET /api/practice/questions
pub async fn questions(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<QuestionListResponse>> {
    let loaded = state
        .bank
        .get(&query.section)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown section: {}", query.section)))?;

    Ok(Json(QuestionListResponse {
        block: loaded.set.block.as_str().to_string(),
        section: loaded.set.section.clone(),
        title: loaded.set.title.clone(),
        questions: loaded
            .set
            .questions
            .iter()
            .map(PublicQuestion::from_question)
            .collect(),
    }))
}

/// POST /api/practice/answer
pub async fn submit_answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>> {
    // The checker grades an empty string as an exact match against an empty
    // canonical answer; reject it here before grading.
    if payload.answer.trim().is_empty() {
        return Err(ApiError::BadRequest("Answer must not be empty".to_string()));
    }

    let loaded = state
        .bank
        .get(&payload.section)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown section: {}", payload.section)))?;
    let question = loaded.set.question(payload.question_number).ok_or_else(|| {
        ApiError::NotFound(format!(
            "No question {} in section {}",
            payload.question_number, payload.section
        ))
    })?;

    let block = loaded.set.block.as_str();
    let number = payload.question_number as i32;

    let response = match question {
        Question::Behavioral(_) => {
            // Free-response: recorded, never graded.
            state
                .db
                .upsert_answered_question(
                    auth.user_id,
                    block,
                    &payload.section,
                    number,
                    None,
                    &payload.answer,
                )
                .await?;

            SubmitAnswerResponse {
                graded: false,
                correct: None,
                canonical_answer: None,
                explanation: question.notes().map(str::to_string),
            }
        }
        Question::MentalMath(q)
        | Question::Probability(q)
        | Question::Trading(q)
        | Question::MachineLearning(q) => {
            let correct = check_answer(&q.answer, &payload.answer);

            state
                .db
                .upsert_answered_question(
                    auth.user_id,
                    block,
                    &payload.section,
                    number,
                    Some(correct),
                    &payload.answer,
                )
                .await?;

            if correct {
                state
                    .db
                    .clear_missed_question(auth.user_id, &payload.section, number)
                    .await?;
            } else {
                state
                    .db
                    .upsert_missed_question(
                        auth.user_id,
                        block,
                        &payload.section,
                        number,
                        &payload.answer,
                    )
                    .await?;
            }

            SubmitAnswerResponse {
                graded: true,
                correct: Some(correct),
                canonical_answer: Some(q.answer.clone()),
                explanation: q.explanation.clone(),
            }
        }
    };

    state
        .db
        .upsert_section_progress(auth.user_id, block, &payload.section, number)
        .await?;

    Ok(Json(response))
}

/// GET /api/practice/missed
pub async fn missed(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<MissedQuery>,
) -> Result<Json<MissedListResponse>> {
    let rows = state
        .db
        .get_missed_questions(auth.user_id, query.section.as_deref())
        .await?;

    let missed = rows
        .into_iter()
        .map(|m| {
            let prompt = state
                .bank
                .get(&m.section)
                .and_then(|loaded| loaded.set.question(m.question_number as u32))
                .map(|q| q.prompt().to_string());

            MissedQuestionInfo {
                section: m.section,
                question_number: m.question_number,
                prompt,
                last_answer: m.last_answer,
                missed_at: m.missed_at,
            }
        })
        .collect();

    Ok(Json(MissedListResponse { missed }))
}
