use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::comments::IssueComment;
use mock_server::marketplace::Plan;
use mock_server::reviews::{Review, ReviewComment, COMFORT_FADE_PREVIEW};
use mock_server::{app, Message};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

async fn send(app: &Router, req: Request<String>) -> axum::response::Response {
    app.clone().oneshot(req).await.unwrap()
}

// --- issue comments ---

#[tokio::test]
async fn list_comments_empty() {
    let app = app();
    let resp = send(&app, get("/repos/o/r/issues/1/comments")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let comments: Vec<IssueComment> = body_json(resp).await;
    assert!(comments.is_empty());
}

#[tokio::test]
async fn comment_lifecycle() {
    let app = app();
    let resp = send(&app, json_request("POST", "/repos/o/r/issues/1/comments", r#"{"body":"b"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: IssueComment = body_json(resp).await;
    assert_eq!(created.body, "b");
    assert_eq!(created.issue_url, "/repos/o/r/issues/1");

    let uri = format!("/repos/o/r/issues/comments/{}", created.id);
    let resp = send(&app, json_request("PATCH", &uri, r#"{"body":"edited"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let edited: IssueComment = body_json(resp).await;
    assert_eq!(edited.body, "edited");

    let resp = send(&app, json_request("PATCH", &uri, "{}")).await;
    let untouched: IssueComment = body_json(resp).await;
    assert_eq!(untouched.body, "edited");

    let resp = send(&app, Request::builder().method("DELETE").uri(&uri).body(String::new()).unwrap()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = send(&app, get(&uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let message: Message = body_json(resp).await;
    assert_eq!(message.message, "Not Found");
}

#[tokio::test]
async fn comments_are_scoped_and_paginated() {
    let app = app();
    for (issue, body) in [(1, "a"), (2, "b"), (1, "c")] {
        let uri = format!("/repos/o/r/issues/{issue}/comments");
        let resp = send(&app, json_request("POST", &uri, &format!(r#"{{"body":"{body}"}}"#))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    send(&app, json_request("POST", "/repos/o/other/issues/1/comments", r#"{"body":"x"}"#)).await;

    let resp = send(&app, get("/repos/o/r/issues/1/comments")).await;
    let issue_one: Vec<IssueComment> = body_json(resp).await;
    assert_eq!(issue_one.iter().map(|c| c.body.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);

    let resp = send(&app, get("/repos/o/r/issues/comments?page=2&per_page=2")).await;
    let second_page: Vec<IssueComment> = body_json(resp).await;
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].body, "c");

    let resp = send(&app, get("/repos/o/r/issues/comments?since=2999-01-01T00:00:00Z")).await;
    let future: Vec<IssueComment> = body_json(resp).await;
    assert!(future.is_empty());
}

#[tokio::test]
async fn blank_comment_is_rejected() {
    let app = app();
    let resp = send(&app, json_request("POST", "/repos/o/r/issues/1/comments", r#"{"body":" "}"#)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- reviews ---

const REVIEWS: &str = "/repos/o/r/pulls/1/reviews";

#[tokio::test]
async fn create_review_with_position_comments() {
    let app = app();
    let body = r#"{"body":"b","event":"COMMENT","comments":[{"path":"f.rs","body":"x","position":1}]}"#;
    let resp = send(&app, json_request("POST", REVIEWS, body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let review: Review = body_json(resp).await;
    assert_eq!(review.state, "COMMENTED");
    assert!(review.submitted_at.is_some());

    let resp = send(&app, get(&format!("{REVIEWS}/{}", review.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Review = body_json(resp).await;
    assert_eq!(fetched.id, review.id);

    let resp = send(&app, get(&format!("{REVIEWS}/{}/comments", review.id))).await;
    let comments: Vec<ReviewComment> = body_json(resp).await;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].position, Some(1));
    assert_eq!(comments[0].pull_request_review_id, review.id);
}

#[tokio::test]
async fn mixed_comment_styles_are_rejected() {
    let app = app();
    let body = r#"{"comments":[{"path":"f.rs","body":"x","position":1},{"path":"f.rs","body":"y","side":"RIGHT","line":2}]}"#;
    let req = Request::builder()
        .method("POST")
        .uri(REVIEWS)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::ACCEPT, COMFORT_FADE_PREVIEW)
        .body(body.to_string())
        .unwrap();
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn line_comments_require_the_preview() {
    let app = app();
    let body = r#"{"comments":[{"path":"f.rs","body":"y","side":"RIGHT","line":2}]}"#;
    let resp = send(&app, json_request("POST", REVIEWS, body)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = Request::builder()
        .method("POST")
        .uri(REVIEWS)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::ACCEPT, COMFORT_FADE_PREVIEW)
        .body(body.to_string())
        .unwrap();
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let review: Review = body_json(resp).await;
    assert_eq!(review.state, "PENDING");
}

#[tokio::test]
async fn pending_review_submit_and_dismiss() {
    let app = app();
    let resp = send(&app, json_request("POST", REVIEWS, r#"{"body":"draft"}"#)).await;
    let review: Review = body_json(resp).await;
    let uri = format!("{REVIEWS}/{}", review.id);

    let resp = send(&app, json_request("PUT", &uri, r#"{"body":"updated"}"#)).await;
    let updated: Review = body_json(resp).await;
    assert_eq!(updated.body.as_deref(), Some("updated"));

    let resp = send(&app, json_request("PUT", &format!("{uri}/dismissals"), r#"{"message":"m"}"#)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = send(&app, json_request("POST", &format!("{uri}/events"), r#"{"event":"APPROVE"}"#)).await;
    let submitted: Review = body_json(resp).await;
    assert_eq!(submitted.state, "APPROVED");

    let resp = send(&app, json_request("PUT", &format!("{uri}/dismissals"), r#"{"message":"m"}"#)).await;
    let dismissed: Review = body_json(resp).await;
    assert_eq!(dismissed.state, "DISMISSED");

    let resp = send(&app, Request::builder().method("DELETE").uri(&uri).body(String::new()).unwrap()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_pending_review_returns_it() {
    let app = app();
    let resp = send(&app, json_request("POST", REVIEWS, "{}")).await;
    let review: Review = body_json(resp).await;
    let uri = format!("{REVIEWS}/{}", review.id);

    let resp = send(&app, Request::builder().method("DELETE").uri(&uri).body(String::new()).unwrap()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Review = body_json(resp).await;
    assert_eq!(deleted.id, review.id);

    let resp = send(&app, get(&uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- marketplace ---

#[tokio::test]
async fn plans_are_paginated() {
    let app = app();
    let resp = send(&app, get("/marketplace_listing/plans?page=1&per_page=2")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let plans: Vec<Plan> = body_json(resp).await;
    assert_eq!(plans.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(plans[0].price_model.is_some());
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() {
    let app = app();
    let resp = send(&app, get("/marketplace_listing/plans?page=18446744073709551615&per_page=2")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let plans: Vec<Plan> = body_json(resp).await;
    assert!(plans.is_empty());
}

#[tokio::test]
async fn stubbed_plans_are_partial() {
    let app = app();
    let resp = send(&app, get("/marketplace_listing/stubbed/plans")).await;
    let raw: serde_json::Value = body_json(resp).await;
    assert_eq!(raw[0], serde_json::json!({"id": 1, "name": "Free"}));
}

#[tokio::test]
async fn accounts_by_plan_and_by_id() {
    let app = app();
    let resp = send(&app, get("/marketplace_listing/plans/1/accounts")).await;
    let raw: serde_json::Value = body_json(resp).await;
    assert_eq!(raw.as_array().unwrap().len(), 2);
    assert_eq!(raw[0]["marketplace_pending_change"]["id"], 77);

    let resp = send(&app, get("/marketplace_listing/stubbed/accounts/101")).await;
    let raw: serde_json::Value = body_json(resp).await;
    assert_eq!(raw, serde_json::json!([{"id": 101, "login": "org-1", "type": "Organization"}]));

    let resp = send(&app, get("/marketplace_listing/plans/9/accounts")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn purchases_full_and_stubbed() {
    let app = app();
    let resp = send(&app, get("/user/marketplace_purchases/stubbed")).await;
    let raw: serde_json::Value = body_json(resp).await;
    assert_eq!(raw[0], serde_json::json!({"billing_cycle": "monthly"}));

    let resp = send(&app, get("/user/marketplace_purchases")).await;
    let raw: serde_json::Value = body_json(resp).await;
    assert_eq!(raw[0]["plan"]["id"], 2);
}
