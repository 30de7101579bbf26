//! Marketplace listing routes, each served at a full and a stubbed path.
//!
//! Stubbed responses carry a subset of the full fields.

use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{not_found, ApiResult, Page};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Plan {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_price_in_cents: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_price_in_cents: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_free_trial: Option<bool>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Purchase {
    pub billing_cycle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_free_trial: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PendingChange {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<u32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub login: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace_purchase: Option<Purchase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace_pending_change: Option<PendingChange>,
}

pub fn plans() -> Vec<Plan> {
    vec![
        Plan {
            id: 1,
            name: "Free".into(),
            description: Some("For hobby projects".into()),
            monthly_price_in_cents: Some(0),
            yearly_price_in_cents: Some(0),
            price_model: Some("FREE".into()),
            bullets: Some(vec!["Public repositories".into()]),
            has_free_trial: Some(false),
        },
        Plan {
            id: 2,
            name: "Team".into(),
            description: Some("For small teams".into()),
            monthly_price_in_cents: Some(900),
            yearly_price_in_cents: Some(9000),
            price_model: Some("FLAT_RATE".into()),
            bullets: Some(vec![]),
            has_free_trial: Some(true),
        },
        Plan {
            id: 3,
            name: "Business".into(),
            description: None,
            monthly_price_in_cents: Some(2500),
            yearly_price_in_cents: Some(25000),
            price_model: Some("PER_UNIT".into()),
            bullets: None,
            has_free_trial: Some(false),
        },
    ]
}

/// Accounts that bought `plan_id`.
pub fn accounts(plan_id: i64) -> Vec<Account> {
    let plan = plans().into_iter().find(|p| p.id == plan_id);
    match plan {
        Some(plan) => vec![
            Account {
                id: plan_id * 100 + 1,
                login: format!("org-{plan_id}"),
                kind: "Organization".into(),
                email: Some(format!("billing-{plan_id}@example.com")),
                marketplace_purchase: Some(Purchase {
                    billing_cycle: "monthly".into(),
                    unit_count: Some(1),
                    on_free_trial: Some(false),
                    plan: Some(plan.clone()),
                }),
                marketplace_pending_change: Some(PendingChange {
                    id: 77,
                    effective_date: Some("2030-01-01T00:00:00Z".into()),
                    unit_count: None,
                }),
            },
            Account {
                id: plan_id * 100 + 2,
                login: format!("user-{plan_id}"),
                kind: "User".into(),
                email: None,
                marketplace_purchase: Some(Purchase {
                    billing_cycle: "yearly".into(),
                    unit_count: Some(0),
                    on_free_trial: Some(true),
                    plan: Some(plan),
                }),
                marketplace_pending_change: None,
            },
        ],
        None => Vec::new(),
    }
}

fn stub_plan(plan: Plan) -> Plan {
    Plan {
        id: plan.id,
        name: plan.name,
        ..Default::default()
    }
}

fn stub_account(account: Account) -> Account {
    Account {
        id: account.id,
        login: account.login,
        kind: account.kind,
        ..Default::default()
    }
}

async fn list_plans(Query(page): Query<Page>) -> Json<Vec<Plan>> {
    Json(page.slice(&plans()))
}

async fn list_stubbed_plans(Query(page): Query<Page>) -> Json<Vec<Plan>> {
    Json(page.slice(&plans()).into_iter().map(stub_plan).collect())
}

async fn list_plan_accounts(Path(id): Path<i64>, Query(page): Query<Page>) -> ApiResult<Json<Vec<Account>>> {
    let accounts = accounts(id);
    if accounts.is_empty() {
        return Err(not_found());
    }
    Ok(Json(page.slice(&accounts)))
}

async fn list_stubbed_plan_accounts(
    Path(id): Path<i64>,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Account>>> {
    let Json(accounts) = list_plan_accounts(Path(id), Query(page)).await?;
    Ok(Json(accounts.into_iter().map(stub_account).collect()))
}

fn account_by_id(id: i64) -> Option<Account> {
    plans().iter().flat_map(|p| accounts(p.id)).find(|a| a.id == id)
}

async fn get_account(Path(id): Path<i64>) -> ApiResult<Json<Vec<Account>>> {
    account_by_id(id).map(|a| Json(vec![a])).ok_or_else(not_found)
}

async fn get_stubbed_account(Path(id): Path<i64>) -> ApiResult<Json<Vec<Account>>> {
    account_by_id(id).map(|a| Json(vec![stub_account(a)])).ok_or_else(not_found)
}

async fn list_purchases(Query(page): Query<Page>) -> Json<Vec<Purchase>> {
    let purchases: Vec<Purchase> = accounts(2).into_iter().filter_map(|a| a.marketplace_purchase).collect();
    Json(page.slice(&purchases))
}

async fn list_stubbed_purchases(Query(page): Query<Page>) -> Json<Vec<Purchase>> {
    let Json(purchases) = list_purchases(Query(page)).await;
    Json(
        purchases
            .into_iter()
            .map(|p| Purchase {
                billing_cycle: p.billing_cycle,
                ..Default::default()
            })
            .collect(),
    )
}

pub fn router() -> Router {
    Router::new()
        .route("/marketplace_listing/plans", get(list_plans))
        .route("/marketplace_listing/stubbed/plans", get(list_stubbed_plans))
        .route("/marketplace_listing/plans/{id}/accounts", get(list_plan_accounts))
        .route("/marketplace_listing/stubbed/plans/{id}/accounts", get(list_stubbed_plan_accounts))
        .route("/marketplace_listing/accounts/{id}", get(get_account))
        .route("/marketplace_listing/stubbed/accounts/{id}", get(get_stubbed_account))
        .route("/user/marketplace_purchases", get(list_purchases))
        .route("/user/marketplace_purchases/stubbed", get(list_stubbed_purchases))
}
