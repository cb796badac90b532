//! Demo routes raising every failure category

use axum::Router;
use axum::routing::{get, post};
use faultline_core::{ErrorCode, MessageKey, RawViolation, TaxonomyError};
use faultline_server::{ApiError, Json, Path, Query, Validate, ValidatedJson, ValidatedQuery};
use serde::{Deserialize, Serialize};

pub fn router() -> Router {
    Router::new()
        .route("/orders/{id}/pay", post(pay_order))
        .route("/users", post(create_user).get(search_users))
        .route("/users/{id}", get(get_user))
        .route("/payments", get(list_payments))
        .route("/reports", get(report))
        .route("/files", get(read_file))
        .route("/boom", get(boom))
}

async fn pay_order(Path(id): Path<u64>) -> Result<Json<Receipt>, ApiError> {
    Err(TaxonomyError::business(
        ErrorCode::from_static("ORDER_NOT_PAYABLE"),
        MessageKey::from_static("error.order.not_payable"),
    )
    .with_args([id])
    .into())
}

async fn get_user(Path(id): Path<u64>) -> Result<Json<User>, ApiError> {
    if id == 1 {
        return Ok(Json(User {
            email: "ada@example.com".to_owned(),
            age: 36,
        }));
    }

    Err(TaxonomyError::not_found(
        ErrorCode::from_static("USER_NOT_FOUND"),
        MessageKey::from_static("error.user.not_found"),
    )
    .with_args([id])
    .into())
}

async fn list_payments() -> Result<Json<Vec<Receipt>>, ApiError> {
    let cause = std::io::Error::other("connection refused by payments-db:5432");
    Err(TaxonomyError::technical(
        ErrorCode::from_static("PAYMENTS_UNAVAILABLE"),
        MessageKey::from_static("error.general.internal"),
    )
    .with_cause(cause)
    .into())
}

async fn create_user(ValidatedJson(user): ValidatedJson<User>) -> Json<User> {
    Json(user)
}

async fn search_users(ValidatedQuery(search): ValidatedQuery<UserSearch>) -> Json<Vec<User>> {
    let _ = search;
    Json(Vec::new())
}

async fn report(Query(query): Query<ReportQuery>) -> String {
    format!("report for {}", query.year)
}

async fn read_file() -> Result<String, ApiError> {
    let text = std::fs::read_to_string("/definitely/not/here/secret.txt")?;
    Ok(text)
}

async fn boom() -> &'static str {
    panic!("ledger invariant violated at /var/lib/ledger")
}

#[derive(Debug, Serialize)]
pub struct Receipt {
    pub id: u64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct User {
    pub email: String,
    pub age: u32,
}

impl Validate for User {
    fn validate(&self) -> Vec<RawViolation> {
        let mut violations = Vec::new();
        if !self.email.contains('@') {
            violations.push(RawViolation::new("email", self.email.as_str(), "error.validation.email"));
        }
        if self.age < 18 {
            violations.push(RawViolation::new("age", self.age, "error.validation.min").with_arguments([18]));
        }
        violations
    }
}

#[derive(Debug, Deserialize)]
pub struct UserSearch {
    pub page: u32,
    pub size: u32,
}

impl Validate for UserSearch {
    fn validate(&self) -> Vec<RawViolation> {
        if self.size > 100 {
            vec![RawViolation::new("size", self.size, "must be at most {0}").with_arguments([100])]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub year: u16,
}
