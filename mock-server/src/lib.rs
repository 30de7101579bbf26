//! In-memory stand-in for the REST API, used by the client core's tests.
//!
//! Serves issue comments, pull-request reviews and marketplace listings
//! (full and stubbed) with server-side pagination. Resources are scoped by
//! `{owner}/{repo}` and live only as long as the router.

pub mod comments;
pub mod config;
pub mod marketplace;
pub mod reviews;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

/// Default page size when `per_page` is not sent.
pub const DEFAULT_PER_PAGE: usize = 30;

/// Largest page size the server honours.
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    pub comments: Vec<comments::StoredComment>,
    pub reviews: Vec<reviews::StoredReview>,
    pub review_comments: Vec<reviews::StoredReviewComment>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error body in the shape the real API uses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

pub type ApiResult<T> = Result<T, (StatusCode, Json<Message>)>;

pub(crate) fn fail(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Message>) {
    (status, Json(Message { message: message.into() }))
}

pub(crate) fn not_found() -> (StatusCode, Json<Message>) {
    fail(StatusCode::NOT_FOUND, "Not Found")
}

/// `page` / `per_page` query parameters. Missing values use server defaults.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct Page {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl Page {
    /// Slice one page out of `items`. Page numbers start at 1.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        let page = self.page.unwrap_or(1).max(1);
        let skip = (page - 1).saturating_mul(per_page);
        items.iter().skip(skip).take(per_page).cloned().collect()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/repos/{owner}/{repo}/issues/comments", get(comments::list_repo_comments))
        .route(
            "/repos/{owner}/{repo}/issues/{number}/comments",
            get(comments::list_issue_comments).post(comments::create_comment),
        )
        .route(
            "/repos/{owner}/{repo}/issues/comments/{id}",
            get(comments::get_comment)
                .patch(comments::edit_comment)
                .delete(comments::delete_comment),
        )
        .route(
            "/repos/{owner}/{repo}/pulls/{number}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/repos/{owner}/{repo}/pulls/{number}/reviews/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_pending_review),
        )
        .route(
            "/repos/{owner}/{repo}/pulls/{number}/reviews/{id}/comments",
            get(reviews::list_review_comments),
        )
        .route(
            "/repos/{owner}/{repo}/pulls/{number}/reviews/{id}/events",
            post(reviews::submit_review),
        )
        .route(
            "/repos/{owner}/{repo}/pulls/{number}/reviews/{id}/dismissals",
            put(reviews::dismiss_review),
        )
        .with_state(db)
        .merge(marketplace::router())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
