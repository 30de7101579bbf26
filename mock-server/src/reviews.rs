//! Pull-request review routes.
//!
//! Review creation rejects batches that mix `position` with `side`/`line`
//! comments, and requires the comfort-fade preview media type for
//! `side`/`line` comments, as the real API does.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{fail, not_found, ApiResult, Db, Page};

pub const COMFORT_FADE_PREVIEW: &str = "application/vnd.github.comfort-fade-preview+json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewComment {
    pub id: i64,
    pub pull_request_review_id: i64,
    pub path: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct StoredReview {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub review: Review,
}

#[derive(Clone, Debug)]
pub struct StoredReviewComment {
    pub review_id: i64,
    pub comment: ReviewComment,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DraftComment {
    pub path: String,
    pub body: String,
    pub position: Option<u32>,
    pub side: Option<String>,
    pub line: Option<u32>,
    pub start_side: Option<String>,
    pub start_line: Option<u32>,
}

impl DraftComment {
    fn has_position(&self) -> bool {
        self.position.is_some()
    }

    fn has_line(&self) -> bool {
        self.side.is_some() || self.line.is_some() || self.start_side.is_some() || self.start_line.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateReview {
    pub commit_id: Option<String>,
    pub body: Option<String>,
    pub event: Option<String>,
    pub comments: Vec<DraftComment>,
}

#[derive(Deserialize)]
pub struct UpdateReview {
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmitReview {
    pub body: Option<String>,
    pub event: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DismissReview {
    pub message: Option<String>,
}

/// Review state reached by submitting with `event`.
fn state_for(event: Option<&str>) -> Result<&'static str, String> {
    match event {
        None => Ok("PENDING"),
        Some("APPROVE") => Ok("APPROVED"),
        Some("REQUEST_CHANGES") => Ok("CHANGES_REQUESTED"),
        Some("COMMENT") => Ok("COMMENTED"),
        Some(other) => Err(format!("unknown review event {other:?}")),
    }
}

fn check_comment_styles(comments: &[DraftComment], headers: &HeaderMap) -> Result<(), String> {
    let any_position = comments.iter().any(DraftComment::has_position);
    let any_line = comments.iter().any(DraftComment::has_line);
    if any_position && any_line {
        return Err("comments must use either position or side/line, not both".into());
    }
    if any_line {
        let accept = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !accept.contains(COMFORT_FADE_PREVIEW) {
            return Err("side/line comments require the comfort-fade preview".into());
        }
    }
    Ok(())
}

pub async fn list_reviews(
    State(db): State<Db>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Query(page): Query<Page>,
) -> Json<Vec<Review>> {
    let store = db.read().await;
    let matching: Vec<Review> = store
        .reviews
        .iter()
        .filter(|r| r.owner == owner && r.repo == repo && r.number == number)
        .map(|r| r.review.clone())
        .collect();
    Json(page.slice(&matching))
}

pub async fn create_review(
    State(db): State<Db>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
    Json(input): Json<CreateReview>,
) -> ApiResult<Json<Review>> {
    check_comment_styles(&input.comments, &headers)
        .map_err(|msg| fail(StatusCode::UNPROCESSABLE_ENTITY, msg))?;
    let state = state_for(input.event.as_deref()).map_err(|msg| fail(StatusCode::UNPROCESSABLE_ENTITY, msg))?;

    let mut store = db.write().await;
    let review = Review {
        id: store.next_id(),
        body: input.body,
        commit_id: input.commit_id,
        state: state.to_string(),
        submitted_at: (state != "PENDING").then(Utc::now),
    };
    for draft in input.comments {
        let comment = ReviewComment {
            id: store.next_id(),
            pull_request_review_id: review.id,
            path: draft.path,
            body: draft.body,
            position: draft.position,
            side: draft.side,
            line: draft.line,
            start_side: draft.start_side,
            start_line: draft.start_line,
        };
        store.review_comments.push(StoredReviewComment {
            review_id: review.id,
            comment,
        });
    }
    tracing::debug!(id = review.id, %owner, %repo, number, state, "created review");
    store.reviews.push(StoredReview {
        owner,
        repo,
        number,
        review: review.clone(),
    });
    Ok(Json(review))
}

fn review_ref<'a>(
    reviews: &'a [StoredReview],
    owner: &str,
    repo: &str,
    number: u64,
    id: i64,
) -> ApiResult<&'a Review> {
    reviews
        .iter()
        .find(|r| r.owner == owner && r.repo == repo && r.number == number && r.review.id == id)
        .map(|r| &r.review)
        .ok_or_else(not_found)
}

fn find_review<'a>(
    reviews: &'a mut [StoredReview],
    owner: &str,
    repo: &str,
    number: u64,
    id: i64,
) -> ApiResult<&'a mut Review> {
    reviews
        .iter_mut()
        .find(|r| r.owner == owner && r.repo == repo && r.number == number && r.review.id == id)
        .map(|r| &mut r.review)
        .ok_or_else(not_found)
}

pub async fn get_review(
    State(db): State<Db>,
    Path((owner, repo, number, id)): Path<(String, String, u64, i64)>,
) -> ApiResult<Json<Review>> {
    let store = db.read().await;
    let review = review_ref(&store.reviews, &owner, &repo, number, id)?;
    Ok(Json(review.clone()))
}

pub async fn update_review(
    State(db): State<Db>,
    Path((owner, repo, number, id)): Path<(String, String, u64, i64)>,
    Json(input): Json<UpdateReview>,
) -> ApiResult<Json<Review>> {
    let mut store = db.write().await;
    let review = find_review(&mut store.reviews, &owner, &repo, number, id)?;
    review.body = Some(input.body);
    Ok(Json(review.clone()))
}

pub async fn delete_pending_review(
    State(db): State<Db>,
    Path((owner, repo, number, id)): Path<(String, String, u64, i64)>,
) -> ApiResult<Json<Review>> {
    let mut store = db.write().await;
    let review = find_review(&mut store.reviews, &owner, &repo, number, id)?.clone();
    if review.state != "PENDING" {
        return Err(fail(StatusCode::UNPROCESSABLE_ENTITY, "only pending reviews can be deleted"));
    }
    store.reviews.retain(|r| r.review.id != id);
    store.review_comments.retain(|c| c.review_id != id);
    Ok(Json(review))
}

pub async fn list_review_comments(
    State(db): State<Db>,
    Path((owner, repo, number, id)): Path<(String, String, u64, i64)>,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<ReviewComment>>> {
    let store = db.read().await;
    review_ref(&store.reviews, &owner, &repo, number, id)?;
    let matching: Vec<ReviewComment> = store
        .review_comments
        .iter()
        .filter(|c| c.review_id == id)
        .map(|c| c.comment.clone())
        .collect();
    Ok(Json(page.slice(&matching)))
}

pub async fn submit_review(
    State(db): State<Db>,
    Path((owner, repo, number, id)): Path<(String, String, u64, i64)>,
    Json(input): Json<SubmitReview>,
) -> ApiResult<Json<Review>> {
    let state = match input.event.as_deref() {
        None => Err("event is required".to_string()),
        event => state_for(event),
    }
    .map_err(|msg| fail(StatusCode::UNPROCESSABLE_ENTITY, msg))?;

    let mut store = db.write().await;
    let review = find_review(&mut store.reviews, &owner, &repo, number, id)?;
    if review.state != "PENDING" {
        return Err(fail(StatusCode::UNPROCESSABLE_ENTITY, "review is already submitted"));
    }
    if input.body.is_some() {
        review.body = input.body;
    }
    review.state = state.to_string();
    review.submitted_at = Some(Utc::now());
    Ok(Json(review.clone()))
}

pub async fn dismiss_review(
    State(db): State<Db>,
    Path((owner, repo, number, id)): Path<(String, String, u64, i64)>,
    Json(input): Json<DismissReview>,
) -> ApiResult<Json<Review>> {
    if input.message.as_deref().is_none_or(str::is_empty) {
        return Err(fail(StatusCode::UNPROCESSABLE_ENTITY, "message is required"));
    }
    let mut store = db.write().await;
    let review = find_review(&mut store.reviews, &owner, &repo, number, id)?;
    if !matches!(review.state.as_str(), "APPROVED" | "CHANGES_REQUESTED") {
        return Err(fail(StatusCode::UNPROCESSABLE_ENTITY, "only approvals and change requests can be dismissed"));
    }
    review.state = "DISMISSED".to_string();
    Ok(Json(review.clone()))
}
