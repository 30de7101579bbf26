//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Parsed records are re-encoded and compared as
//! JSON values, so absent fields must vanish and present zero values must
//! survive the round trip.

use ghrest_core::{
    decode, ApiError, ClientConfig, GitHubClient, HttpMethod, HttpResponse, IssueComment,
    IssueListCommentsOptions, ListOptions, MarketplacePlan, MarketplacePlanAccount,
    MarketplacePurchase, PullRequestReview, PullRequestReviewRequest,
};
use serde::Serialize;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client(stubbed: bool) -> GitHubClient {
    GitHubClient::with_config(ClientConfig::new(BASE_URL).stubbed(stubbed))
}

fn simulated(sim: &Value) -> HttpResponse {
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::ValueNotPresent => "value_not_present",
        ApiError::MalformedTimestamp(_) => "malformed_timestamp",
        ApiError::MixedCommentStyles => "mixed_comment_styles",
        ApiError::NotFound => "not_found",
        ApiError::HttpError { .. } => "http_error",
        ApiError::DeserializationError(_) => "deserialization_error",
        ApiError::SerializationError(_) => "serialization_error",
        ApiError::InvalidUrl(_) => "invalid_url",
    }
}

fn to_value<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap()
}

/// Parse a list response as the record type named in the vector.
fn parse_list_as(c: &GitHubClient, record: &str, response: HttpResponse) -> Result<Value, ApiError> {
    Ok(match record {
        "issue_comment" => to_value(c.parse_list::<IssueComment>(response)?),
        "review" => to_value(c.parse_list::<PullRequestReview>(response)?),
        "plan" => to_value(c.parse_list::<MarketplacePlan>(response)?),
        "account" => to_value(c.parse_list::<MarketplacePlanAccount>(response)?),
        "purchase" => to_value(c.parse_list::<MarketplacePurchase>(response)?),
        other => panic!("unknown record: {other}"),
    })
}

/// Decode a single record of the type named in the vector.
fn decode_as(record: &str, body: &str) -> Result<Value, ApiError> {
    let body = body.as_bytes();
    Ok(match record {
        "issue_comment" => to_value(decode::<IssueComment>(body)?),
        "review" => to_value(decode::<PullRequestReview>(body)?),
        "plan" => to_value(decode::<MarketplacePlan>(body)?),
        "account" => to_value(decode::<MarketplacePlanAccount>(body)?),
        "purchase" => to_value(decode::<MarketplacePurchase>(body)?),
        other => panic!("unknown record: {other}"),
    })
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let c = client(case["stubbed"].as_bool().unwrap());
        let path = case["path"].as_str().unwrap();
        let options = case["options"].clone();

        // Verify build
        let req = match case["options_kind"].as_str().unwrap() {
            "none" => c.build_listing::<ListOptions>(path, None),
            "list" => {
                let opts: ListOptions = serde_json::from_value(options).unwrap();
                c.build_listing(path, Some(&opts))
            }
            "issue_comments" => {
                let opts: IssueListCommentsOptions = serde_json::from_value(options).unwrap();
                c.build_listing(path, Some(&opts))
            }
            other => panic!("unknown options kind: {other}"),
        }
        .unwrap();
        assert_eq!(req.method, HttpMethod::Get, "{name}: method");
        assert_eq!(
            req.path,
            format!("{BASE_URL}{}", case["expected_path"].as_str().unwrap()),
            "{name}: path"
        );
        assert!(req.body.is_none(), "{name}: body");

        // Verify parse
        let result = parse_list_as(&c, case["record"].as_str().unwrap(), simulated(&case["simulated_response"]));
        match case["expected_error"].as_str() {
            Some(kind) => assert_eq!(error_kind(&result.unwrap_err()), kind, "{name}: error"),
            None => assert_eq!(result.unwrap(), case["expected_result"], "{name}: parsed result"),
        }
    }
}

// ---------------------------------------------------------------------------
// Review submission
// ---------------------------------------------------------------------------

#[test]
fn review_style_test_vectors() {
    let raw = include_str!("../../test-vectors/review_styles.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let path = vectors["path"].as_str().unwrap();

    let c = client(false);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: PullRequestReviewRequest = serde_json::from_value(case["input"].clone()).unwrap();

        let result = c.build_create_review(path, &input);
        if let Some(kind) = case["expected_error"].as_str() {
            assert_eq!(error_kind(&result.unwrap_err()), kind, "{name}: error");
            continue;
        }

        let req = result.unwrap();
        assert_eq!(req.method, HttpMethod::Post, "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{path}"), "{name}: path");
        assert_eq!(req.header("accept"), case["expected_accept"].as_str(), "{name}: accept");
        assert_eq!(req.header("content-type"), Some("application/json"), "{name}: content-type");

        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, case["expected_body"], "{name}: body");
    }
}

// ---------------------------------------------------------------------------
// Field presence and timestamps
// ---------------------------------------------------------------------------

#[test]
fn presence_test_vectors() {
    let raw = include_str!("../../test-vectors/presence.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = decode_as(case["record"].as_str().unwrap(), case["body"].as_str().unwrap());
        match case["expected_error"].as_str() {
            Some(kind) => assert_eq!(error_kind(&result.unwrap_err()), kind, "{name}: error"),
            None => assert_eq!(result.unwrap(), case["expected"], "{name}: decoded"),
        }
    }
}
