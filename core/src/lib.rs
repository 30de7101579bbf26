//! Synchronous REST client core: optional fields, pagination and review
//! comment validation.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `Field<T>` tracks whether a wire field was present, so partial updates
//!   omit untouched fields and zero values are still sent when set.
//! - `ListOptions` and friends serialize onto the query string with the same
//!   presence rules; `resolve_path` selects stubbed listing paths.
//! - `uses_line_style` rejects review batches that mix `position` and
//!   `side`/`line` addressing before any body is serialized.
//! - `GitHubClient` is stateless; it holds only its `ClientConfig`.

pub mod client;
pub mod config;
pub mod error;
pub mod field;
pub mod http;
pub mod pagination;
pub mod review;
pub mod timestamp;
pub mod types;

pub use client::{decode, GitHubClient};
pub use config::ClientConfig;
pub use error::ApiError;
pub use field::Field;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use pagination::{apply, resolve_path, IssueListCommentsOptions, ListOptions};
pub use review::{
    uses_line_style, CommentStyle, DraftReviewComment, PullRequestReviewDismissalRequest,
    PullRequestReviewRequest, Side,
};
pub use timestamp::Timestamp;
pub use types::{
    IssueComment, MarketplacePendingChange, MarketplacePlan, MarketplacePlanAccount,
    MarketplacePurchase, PullRequestComment, PullRequestReview, Reactions, Reviewers, Team, User,
};
