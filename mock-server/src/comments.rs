//! Issue comment routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{fail, not_found, ApiResult, Db, Page};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: i64,
    pub body: String,
    pub issue_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct StoredComment {
    pub owner: String,
    pub repo: String,
    pub comment: IssueComment,
}

#[derive(Deserialize)]
pub struct CreateComment {
    pub body: String,
}

#[derive(Deserialize)]
pub struct EditComment {
    pub body: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentQuery {
    pub since: Option<DateTime<Utc>>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl CommentQuery {
    fn page(&self) -> Page {
        Page {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

fn issue_url(owner: &str, repo: &str, number: u64) -> String {
    format!("/repos/{owner}/{repo}/issues/{number}")
}

pub async fn list_repo_comments(
    State(db): State<Db>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<CommentQuery>,
) -> Json<Vec<IssueComment>> {
    let store = db.read().await;
    let matching: Vec<IssueComment> = store
        .comments
        .iter()
        .filter(|c| c.owner == owner && c.repo == repo)
        .filter(|c| query.since.is_none_or(|since| c.comment.updated_at >= since))
        .map(|c| c.comment.clone())
        .collect();
    Json(query.page().slice(&matching))
}

pub async fn list_issue_comments(
    State(db): State<Db>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Query(query): Query<CommentQuery>,
) -> Json<Vec<IssueComment>> {
    let store = db.read().await;
    let url = issue_url(&owner, &repo, number);
    let matching: Vec<IssueComment> = store
        .comments
        .iter()
        .filter(|c| c.owner == owner && c.repo == repo && c.comment.issue_url == url)
        .filter(|c| query.since.is_none_or(|since| c.comment.updated_at >= since))
        .map(|c| c.comment.clone())
        .collect();
    Json(query.page().slice(&matching))
}

pub async fn create_comment(
    State(db): State<Db>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(input): Json<CreateComment>,
) -> ApiResult<(StatusCode, Json<IssueComment>)> {
    if input.body.trim().is_empty() {
        return Err(fail(StatusCode::UNPROCESSABLE_ENTITY, "body cannot be blank"));
    }
    let mut store = db.write().await;
    let now = Utc::now();
    let comment = IssueComment {
        id: store.next_id(),
        body: input.body,
        issue_url: issue_url(&owner, &repo, number),
        created_at: now,
        updated_at: now,
    };
    tracing::debug!(id = comment.id, %owner, %repo, number, "created issue comment");
    store.comments.push(StoredComment {
        owner,
        repo,
        comment: comment.clone(),
    });
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get_comment(
    State(db): State<Db>,
    Path((owner, repo, id)): Path<(String, String, i64)>,
) -> ApiResult<Json<IssueComment>> {
    let store = db.read().await;
    store
        .comments
        .iter()
        .find(|c| c.owner == owner && c.repo == repo && c.comment.id == id)
        .map(|c| Json(c.comment.clone()))
        .ok_or_else(not_found)
}

pub async fn edit_comment(
    State(db): State<Db>,
    Path((owner, repo, id)): Path<(String, String, i64)>,
    Json(input): Json<EditComment>,
) -> ApiResult<Json<IssueComment>> {
    let mut store = db.write().await;
    let stored = store
        .comments
        .iter_mut()
        .find(|c| c.owner == owner && c.repo == repo && c.comment.id == id)
        .ok_or_else(not_found)?;
    if let Some(body) = input.body {
        stored.comment.body = body;
        stored.comment.updated_at = Utc::now();
    }
    Ok(Json(stored.comment.clone()))
}

pub async fn delete_comment(
    State(db): State<Db>,
    Path((owner, repo, id)): Path<(String, String, i64)>,
) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    let before = store.comments.len();
    store
        .comments
        .retain(|c| !(c.owner == owner && c.repo == repo && c.comment.id == id));
    if store.comments.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_comment_body_is_optional() {
        let input: EditComment = serde_json::from_str("{}").unwrap();
        assert!(input.body.is_none());
    }

    #[test]
    fn create_comment_requires_body() {
        assert!(serde_json::from_str::<CreateComment>("{}").is_err());
    }

    #[test]
    fn issue_url_format() {
        assert_eq!(issue_url("o", "r", 1), "/repos/o/r/issues/1");
    }
}
