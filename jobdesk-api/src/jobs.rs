use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
#[cfg(feature = "sqlx")]
use sqlx::prelude::FromRow;

/// A job posting as it is exposed by the API.
///
/// `equity` is a NUMERIC column, kept as BigDecimal to avoid
/// binary-float rounding on the wire.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<BigDecimal>,
    #[serde(rename = "companyHandle")]
    pub company_handle: String,
}

#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub equity: Option<BigDecimal>,
    #[serde(rename = "companyHandle")]
    pub company_handle: String,
}

/// Partial update: only the provided fields change.
/// The company a job belongs to cannot be moved.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub equity: Option<BigDecimal>,
}

/// Optional search criteria for the job list endpoint.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct JobFilter {
    #[serde(default, rename = "titleLike")]
    pub title_like: Option<String>,
    #[serde(default, rename = "minSalary")]
    pub min_salary: Option<String>,
    #[serde(default, rename = "hasEquity")]
    pub has_equity: Option<String>,
}
