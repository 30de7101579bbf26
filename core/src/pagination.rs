//! List request parameters and stubbed listing paths.
//!
//! # Design
//! Options records are ordinary `Serialize` structs built from `Field`s, so
//! the query string follows the same presence rules as JSON bodies: an absent
//! field adds no parameter, and nothing is ever defaulted here. No `page`
//! means "let the server choose", not "page 1".
//!
//! Stubbed listings are a path concern only. `resolve_path` rewrites the path
//! and `apply` adds the query, so the two compose in either order.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::field::Field;
use crate::http::HttpRequest;
use crate::timestamp::Timestamp;

/// Path segment that selects the stubbed variant of a listing.
pub const STUBBED_SEGMENT: &str = "stubbed";

/// Segments after which `stubbed` is inserted.
const LISTING_ROOTS: &[&str] = &["marketplace_listing", "marketplace_purchases"];

/// Page selection shared by every list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub page: Field<NonZeroU32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub per_page: Field<NonZeroU32>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a page. `0` leaves the field absent.
    pub fn page(mut self, page: u32) -> Self {
        self.page = NonZeroU32::new(page).into();
        self
    }

    /// Request a page size. `0` leaves the field absent.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = NonZeroU32::new(per_page).into();
        self
    }
}

/// Sort key for issue comment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentSort {
    Created,
    Updated,
}

/// Sort direction for listings that accept one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Options for listing issue comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueListCommentsOptions {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub sort: Field<CommentSort>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub direction: Field<Direction>,
    /// Only comments updated at or after this time.
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub since: Field<Timestamp>,
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Flatten an options record into query pairs, sorted by key.
///
/// Scalars become one pair each, sequences repeat their key, and absent
/// fields contribute nothing. Nested objects have no query form and are
/// rejected.
pub fn query_pairs<O: Serialize + ?Sized>(options: &O) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(options).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ApiError::SerializationError(format!(
                "query options must be a record, got {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_text(&key, item)?));
                }
            }
            other => {
                if let Some(text) = scalar_or_null(&key, other)? {
                    pairs.push((key, text));
                }
            }
        }
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}

fn scalar_or_null(key: &str, value: Value) -> Result<Option<String>, ApiError> {
    match value {
        Value::Null => Ok(None),
        other => scalar_text(key, other).map(Some),
    }
}

fn scalar_text(key: &str, value: Value) -> Result<String, ApiError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(ApiError::SerializationError(
            format!("query parameter {key:?} is not a scalar"),
        )),
    }
}

/// Add one query parameter per present field of `options` to `request`.
///
/// `None` and all-absent options leave the request untouched.
pub fn apply<O: Serialize + ?Sized>(
    mut request: HttpRequest,
    options: Option<&O>,
) -> Result<HttpRequest, ApiError> {
    let Some(options) = options else {
        return Ok(request);
    };
    let pairs = query_pairs(options)?;
    if pairs.is_empty() {
        return Ok(request);
    }

    let mut url = Url::parse(&request.path)?;
    url.query_pairs_mut().extend_pairs(pairs);
    request.path = url.into();
    Ok(request)
}

/// Select the full or stubbed path of a listing.
///
/// With `stubbed` set, a `stubbed` segment is inserted right after the
/// listing root (`marketplace_listing/plans` becomes
/// `marketplace_listing/stubbed/plans`, `user/marketplace_purchases` becomes
/// `user/marketplace_purchases/stubbed`). Paths without a known root get the
/// segment after their first segment. A path that already carries the
/// segment is returned unchanged, and any query suffix is kept.
pub fn resolve_path(base_path: &str, stubbed: bool) -> String {
    if !stubbed {
        return base_path.to_string();
    }

    let (path, query) = match base_path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (base_path, None),
    };
    let (leading, rest) = match path.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, path),
    };
    if rest.is_empty() {
        return base_path.to_string();
    }
    let mut segments: Vec<&str> = rest.split('/').collect();

    let root = segments
        .iter()
        .position(|s| LISTING_ROOTS.contains(s))
        .unwrap_or(0);
    if segments.get(root + 1) != Some(&STUBBED_SEGMENT) {
        segments.insert(root + 1, STUBBED_SEGMENT);
    }

    let mut out = String::with_capacity(base_path.len() + STUBBED_SEGMENT.len() + 1);
    if leading {
        out.push('/');
    }
    out.push_str(&segments.join("/"));
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    out
}
