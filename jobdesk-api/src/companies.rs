use serde::{Deserialize, Serialize};
#[cfg(feature = "sqlx")]
use sqlx::prelude::FromRow;

/// A company row as it is exposed by the API.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "numEmployees")]
    pub num_employees: Option<i64>,
    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,
}

#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "numEmployees")]
    pub num_employees: Option<i64>,
    #[serde(default, rename = "logoUrl")]
    pub logo_url: Option<String>,
}

/// Partial update: only the provided fields change.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "numEmployees")]
    pub num_employees: Option<i64>,
    #[serde(default, rename = "logoUrl")]
    pub logo_url: Option<String>,
}

/// Optional search criteria for the company list endpoint.
///
/// Values stay raw strings: the query composer owns their
/// interpretation, including numeric validation.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct CompanyFilter {
    #[serde(default, rename = "nameLike")]
    pub name_like: Option<String>,
    #[serde(default, rename = "minEmployees")]
    pub min_employees: Option<String>,
    #[serde(default, rename = "maxEmployees")]
    pub max_employees: Option<String>,
}
