use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::{HttpResponse, ResponseError};
use api_core::api_errors::*;
use api_core::pages::ListResult;
use jobdesk_api::{Job, JobFilter, JobPatch, NewJob};
use serde::{Deserialize, Serialize};

use super::context::Context;
use crate::db::sql::SqlError;
use crate::db::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum JobApiError {
    #[error("something went wrong")]
    InternalError,
    #[error("no job with id: {0}")]
    NotFound(i64),
    #[error("no data to update")]
    NoData,
    #[error("bad input: {0}")]
    BadInput(String),
}

impl From<&JobApiError> for ApiError {
    fn from(error: &JobApiError) -> ApiError {
        use JobApiError::*;
        let code = match error {
            InternalError => ApiErrorCode::InternalError,
            NotFound(_) => ApiErrorCode::NotFound,
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

impl ResponseError for JobApiError {
    fn status_code(&self) -> StatusCode {
        use JobApiError::*;
        match self {
            InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            NotFound(_) => StatusCode::NOT_FOUND,
            NoData => StatusCode::BAD_REQUEST,
            BadInput(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        ApiError::from(self).into()
    }
}

impl From<RepoError> for JobApiError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::Sql(SqlError::NoData) => JobApiError::NoData,
            RepoError::Sql(err) => JobApiError::BadInput(err.to_string()),
            RepoError::Db(err) => {
                error!("job query failed: error={:#?}", err);
                JobApiError::InternalError
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedJob {
    pub deleted: i64,
}

pub async fn list_jobs(
    state: Data<Context>,
    params: Query<JobFilter>,
) -> Result<Json<ListResult<Job>>, JobApiError> {
    if let Some(min) = params.min_salary.as_deref().and_then(|v| v.parse::<i64>().ok()) {
        if min < 0 {
            return Err(JobApiError::BadInput(
                "minSalary parameter cannot be negative".into(),
            ));
        }
    }

    let rows = state.db.list_jobs(&params).await?;
    Ok(Json(rows.into()))
}

pub async fn create_job(
    state: Data<Context>,
    payload: Json<NewJob>,
) -> Result<Json<Job>, JobApiError> {
    let job = payload.into_inner();
    match state.db.insert_job(&job).await {
        Ok(row) => Ok(Json(row)),
        Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => Err(
            JobApiError::BadInput(format!("no such company: {}", job.company_handle)),
        ),
        Err(err) => {
            error!("job insert failed: error={:#?}", err);
            Err(JobApiError::InternalError)
        }
    }
}

pub async fn get_job(state: Data<Context>, path: Path<i64>) -> Result<Json<Job>, JobApiError> {
    let id = path.into_inner();
    let job = state
        .db
        .get_job(id)
        .await
        .map_err(RepoError::Db)?
        .ok_or(JobApiError::NotFound(id))?;

    Ok(Json(job))
}

pub async fn patch_job(
    state: Data<Context>,
    path: Path<i64>,
    payload: Json<JobPatch>,
) -> Result<Json<Job>, JobApiError> {
    let id = path.into_inner();
    let row = state.db.update_job(id, &payload).await?;
    row.map(Json).ok_or(JobApiError::NotFound(id))
}

pub async fn delete_job(
    state: Data<Context>,
    path: Path<i64>,
) -> Result<Json<DeletedJob>, JobApiError> {
    let id = path.into_inner();
    let deleted = state.db.delete_job(id).await.map_err(RepoError::Db)?;
    if !deleted {
        return Err(JobApiError::NotFound(id));
    }
    Ok(Json(DeletedJob { deleted: id }))
}
