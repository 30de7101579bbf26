//! Review submission payloads and comment-style validation.
//!
//! # Design
//! A draft review comment is addressed either by `position` (offset into the
//! unified diff) or by `side` + `line` (file side and absolute line, with
//! optional `start_side` / `start_line` for ranges). Both schemes are
//! accepted by the server, but one submission must not mix them.
//!
//! Each comment is classified once into a `CommentStyle`, then the batch is
//! reduced left to right over a small state machine. The first conflicting
//! comment ends the scan with `ApiError::MixedCommentStyles`.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::field::Field;

/// Side of the diff a line-style comment refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Left,
    Right,
}

/// A review comment that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftReviewComment {
    pub path: String,
    pub body: String,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub position: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub start_side: Field<Side>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub side: Field<Side>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub start_line: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub line: Field<u32>,
}

impl DraftReviewComment {
    /// A comment addressed by diff position.
    pub fn at_position(path: impl Into<String>, body: impl Into<String>, position: u32) -> Self {
        Self {
            path: path.into(),
            body: body.into(),
            position: Field::present(position),
            ..Default::default()
        }
    }

    /// A comment addressed by file side and line.
    pub fn at_line(path: impl Into<String>, body: impl Into<String>, side: Side, line: u32) -> Self {
        Self {
            path: path.into(),
            body: body.into(),
            side: Field::present(side),
            line: Field::present(line),
            ..Default::default()
        }
    }

    /// Classify this comment's addressing scheme.
    pub fn style(&self) -> CommentStyle {
        let has_position = self.position.is_present();
        let has_line = self.side.is_present()
            || self.line.is_present()
            || self.start_side.is_present()
            || self.start_line.is_present();
        match (has_position, has_line) {
            (false, false) => CommentStyle::Unset,
            (true, false) => CommentStyle::Position,
            (false, true) => CommentStyle::Line,
            (true, true) => CommentStyle::Both,
        }
    }
}

/// Addressing scheme carried by a single draft comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// No positioning fields at all.
    Unset,
    /// `position` only.
    Position,
    /// `side` / `line` (or their `start_` counterparts) only.
    Line,
    /// Both schemes on one comment; never valid.
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seen {
    Nothing,
    Position,
    Line,
}

/// Decide whether a batch uses line-style addressing.
///
/// Returns `Ok(true)` when at least one comment is line-style and none is
/// position-style, `Ok(false)` for empty, unpositioned, or position-style
/// batches, and `Err(MixedCommentStyles)` when a comment carries both
/// schemes or the batch mixes them in any order.
pub fn uses_line_style(comments: &[DraftReviewComment]) -> Result<bool, ApiError> {
    let mut seen = Seen::Nothing;
    for comment in comments {
        seen = match (seen, comment.style()) {
            (_, CommentStyle::Both) => return Err(ApiError::MixedCommentStyles),
            (Seen::Line, CommentStyle::Position) | (Seen::Position, CommentStyle::Line) => {
                return Err(ApiError::MixedCommentStyles)
            }
            (seen, CommentStyle::Unset) => seen,
            (_, CommentStyle::Position) => Seen::Position,
            (_, CommentStyle::Line) => Seen::Line,
        };
    }
    Ok(seen == Seen::Line)
}

/// Body of a review creation or submission request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestReviewRequest {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub node_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub commit_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub body: Field<String>,
    /// `APPROVE`, `REQUEST_CHANGES` or `COMMENT`; absent leaves the review pending.
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub event: Field<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<DraftReviewComment>,
}

impl PullRequestReviewRequest {
    /// See [`uses_line_style`].
    pub fn uses_line_style(&self) -> Result<bool, ApiError> {
        uses_line_style(&self.comments)
    }
}

/// Body of a review dismissal request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestReviewDismissalRequest {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub message: Field<String>,
}
