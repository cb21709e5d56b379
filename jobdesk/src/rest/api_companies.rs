use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::{HttpResponse, ResponseError};
use api_core::api_errors::*;
use api_core::pages::ListResult;
use jobdesk_api::{Company, CompanyFilter, CompanyPatch, Job, NewCompany};
use serde::{Deserialize, Serialize};

use super::context::Context;
use crate::db::sql::SqlError;
use crate::db::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum CompanyApiError {
    #[error("something went wrong")]
    InternalError,
    #[error("no company with handle: {0}")]
    NotFound(String),
    #[error("company already exists: {0}")]
    AlreadyExists(String),
    #[error("no data to update")]
    NoData,
    #[error("bad input: {0}")]
    BadInput(String),
}

impl From<&CompanyApiError> for ApiError {
    fn from(error: &CompanyApiError) -> ApiError {
        use CompanyApiError::*;
        let code = match error {
            InternalError => ApiErrorCode::InternalError,
            NotFound(_) => ApiErrorCode::NotFound,
            AlreadyExists(_) => ApiErrorCode::AlreadyExists,
            NoData => ApiErrorCode::NoData,
            BadInput(_) => ApiErrorCode::BadInput,
        };
        ApiError {
            code: code as u16,
            status: code.to_string(),
            http_code: error.status_code(),
            message: error.to_string(),
            details: HashMap::new(),
        }
    }
}

impl ResponseError for CompanyApiError {
    fn status_code(&self) -> StatusCode {
        use CompanyApiError::*;
        match self {
            InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            NotFound(_) => StatusCode::NOT_FOUND,
            AlreadyExists(_) => StatusCode::BAD_REQUEST,
            NoData => StatusCode::BAD_REQUEST,
            BadInput(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        ApiError::from(self).into()
    }
}

impl From<RepoError> for CompanyApiError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::Sql(SqlError::NoData) => CompanyApiError::NoData,
            RepoError::Sql(err) => CompanyApiError::BadInput(err.to_string()),
            RepoError::Db(err) => {
                error!("company query failed: error={:#?}", err);
                CompanyApiError::InternalError
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: String,
}

pub async fn list_companies(
    state: Data<Context>,
    params: Query<CompanyFilter>,
) -> Result<Json<ListResult<Company>>, CompanyApiError> {
    // a contradictory range never matches anything; reject it early
    let min = params.min_employees.as_deref().and_then(|v| v.parse::<i64>().ok());
    let max = params.max_employees.as_deref().and_then(|v| v.parse::<i64>().ok());
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(CompanyApiError::BadInput(
                "minEmployees cannot be greater than maxEmployees".into(),
            ));
        }
    }

    let rows = state.db.list_companies(&params).await?;
    Ok(Json(rows.into()))
}

pub async fn create_company(
    state: Data<Context>,
    payload: Json<NewCompany>,
) -> Result<Json<Company>, CompanyApiError> {
    let company = payload.into_inner();
    match state.db.insert_company(&company).await {
        Ok(row) => Ok(Json(row)),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Err(CompanyApiError::AlreadyExists(company.handle))
        }
        Err(err) => {
            error!("company insert failed: error={:#?}", err);
            Err(CompanyApiError::InternalError)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompanyDetails {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

pub async fn get_company(
    state: Data<Context>,
    path: Path<String>,
) -> Result<Json<CompanyDetails>, CompanyApiError> {
    let handle = path.into_inner();
    let company = state
        .db
        .get_company(&handle)
        .await
        .map_err(RepoError::Db)?
        .ok_or_else(|| CompanyApiError::NotFound(handle.clone()))?;

    let jobs = state
        .db
        .list_company_jobs(&handle)
        .await
        .map_err(RepoError::Db)?;

    Ok(Json(CompanyDetails { company, jobs }))
}

pub async fn patch_company(
    state: Data<Context>,
    path: Path<String>,
    payload: Json<CompanyPatch>,
) -> Result<Json<Company>, CompanyApiError> {
    let handle = path.into_inner();
    let row = state.db.update_company(&handle, &payload).await?;
    row.map(Json).ok_or(CompanyApiError::NotFound(handle))
}

pub async fn delete_company(
    state: Data<Context>,
    path: Path<String>,
) -> Result<Json<Deleted>, CompanyApiError> {
    let handle = path.into_inner();
    let deleted = state
        .db
        .delete_company(&handle)
        .await
        .map_err(RepoError::Db)?;
    if !deleted {
        return Err(CompanyApiError::NotFound(handle));
    }
    Ok(Json(Deleted { deleted: handle }))
}
