//! Typed records for issue comments, pull-request reviews and marketplace
//! listings.
//!
//! # Design
//! Every scalar is a `Field`, so a record decoded from a partial response
//! (a stubbed listing, or a create/edit reply that only echoes `id`) keeps
//! exactly the keys the server sent, and encoding it back emits nothing more.
//! Stubbed listings decode into the same types as full ones.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::review::Side;
use crate::timestamp::Timestamp;

/// A user account as embedded in other records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub login: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub node_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub avatar_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub gravatar_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub company: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub blog: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub location: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub email: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub hireable: Field<bool>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub public_repos: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub followers: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub following: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub created_at: Field<Timestamp>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub html_url: Field<String>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_absent")]
    pub kind: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub site_admin: Field<bool>,
}

/// A team as embedded in review requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub node_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub slug: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub permission: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub privacy: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub members_count: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub repos_count: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub members_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub repositories_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub ldap_dn: Field<String>,
}

/// Users and teams requested to review a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reviewers {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Team>,
}

/// Reaction counts attached to a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reactions {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub total_count: Field<u32>,
    #[serde(rename = "+1", skip_serializing_if = "Field::is_absent")]
    pub plus_one: Field<u32>,
    #[serde(rename = "-1", skip_serializing_if = "Field::is_absent")]
    pub minus_one: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub laugh: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub confused: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub heart: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub hooray: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url: Field<String>,
}

/// A comment on an issue or pull request conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueComment {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub node_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub body: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub user: Field<User>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub reactions: Field<Reactions>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub created_at: Field<Timestamp>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub updated_at: Field<Timestamp>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub author_association: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub html_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub issue_url: Field<String>,
}

/// A submitted or pending pull-request review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestReview {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub node_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub user: Field<User>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub body: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub submitted_at: Field<Timestamp>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub commit_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub html_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub pull_request_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub state: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub author_association: Field<String>,
}

/// A comment attached to a line of a pull-request diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestComment {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub node_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub in_reply_to: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub body: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub path: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub diff_hunk: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub pull_request_review_id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub position: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub original_position: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub start_line: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub line: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub original_line: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub start_side: Field<Side>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub side: Field<Side>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub commit_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub original_commit_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub user: Field<User>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub reactions: Field<Reactions>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub created_at: Field<Timestamp>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub updated_at: Field<Timestamp>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub author_association: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub html_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub pull_request_url: Field<String>,
}

/// A pricing plan of a marketplace listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplacePlan {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub accounts_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub number: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub monthly_price_in_cents: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub yearly_price_in_cents: Field<u32>,
    /// `FREE`, `FLAT_RATE` or `PER_UNIT`.
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub price_model: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub unit_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub bullets: Field<Vec<String>>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub state: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub has_free_trial: Field<bool>,
}

/// A purchase of a marketplace plan by an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplacePurchase {
    /// `monthly` or `yearly`.
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub billing_cycle: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub next_billing_date: Field<Timestamp>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub unit_count: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub plan: Field<MarketplacePlan>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub on_free_trial: Field<bool>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub free_trial_ends_on: Field<Timestamp>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub updated_at: Field<Timestamp>,
}

/// A plan change scheduled for the end of the billing cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplacePendingChange {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub effective_date: Field<Timestamp>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub unit_count: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub plan: Field<MarketplacePlan>,
}

/// An account that purchased a marketplace plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplacePlanAccount {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url: Field<String>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_absent")]
    pub kind: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub login: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub email: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub organization_billing_email: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub marketplace_purchase: Field<MarketplacePurchase>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub marketplace_pending_change: Field<MarketplacePendingChange>,
}
