//! Section listing and statistics endpoints

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/sections
pub async fn sections(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<SectionListQuery>,
) -> Result<Json<SectionListResponse>> {
    let block_filter = match query.block.as_deref() {
        Some(value) => Some(BlockType::from_str(value).ok_or_else(|| {
            ApiError::BadRequest(format!("Unknown block type: {value}"))
        })?),
        None => None,
    };

    let counts: HashMap<String, SectionCounts> = state
        .db
        .get_section_counts(auth.user_id)
        .await?
        .into_iter()
        .map(|c| (c.section.clone(), c))
        .collect();
    let positions: HashMap<String, i32> = state
        .db
        .get_section_progress(auth.user_id)
        .await?
        .into_iter()
        .map(|p| (p.section, p.position))
        .collect();

    let sections = state
        .bank
        .sections()
        .into_iter()
        .filter(|loaded| block_filter.map_or(true, |b| loaded.set.block == b))
        .map(|loaded| {
            let section_counts = counts.get(&loaded.set.section);
            SectionSummary {
                block: loaded.set.block.as_str().to_string(),
                section: loaded.set.section.clone(),
                title: loaded.set.title.clone(),
                question_count: loaded.set.len(),
                content_hash: loaded.content_hash.clone(),
                answered: section_counts.map_or(0, |c| c.answered),
                correct: section_counts.map_or(0, |c| c.correct),
                position: positions.get(&loaded.set.section).copied().unwrap_or(0),
            }
        })
        .collect();

    Ok(Json(SectionListResponse { sections }))
}

/// GET /api/stats/{block}
pub async fn block_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(block): Path<String>,
) -> Result<Json<BlockStatsResponse>> {
    let block = BlockType::from_str(&block)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown block type: {block}")))?;

    let stats = state.db.get_block_stats(auth.user_id, block.as_str()).await?;
    Ok(Json(stats))
}
