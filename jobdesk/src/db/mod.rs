use jobdesk_api::{
    Company, CompanyFilter, CompanyPatch, Job, JobFilter, JobPatch, NewCompany, NewJob,
};
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres, Result};

use crate::config::DBConfig;

pub mod models;
pub mod sql;

pub use models::*;
use sql::{build_filter, build_update_set, SqlError, SqlValue, COMPANY_FILTERS, JOB_FILTERS};

static MIGRATOR: Migrator = sqlx::migrate!("src/db/migrations");

pub async fn open_postgres_db(config: &DBConfig) -> Result<Repo> {
    let pool = PgPoolOptions::new()
        .max_connections(100)
        .connect(&config.dsn)
        .await?;
    let repo = Repo { pool };

    Ok(repo)
}

pub fn get_migration_info() -> Vec<(
    i64,
    std::borrow::Cow<'static, str>,
    std::borrow::Cow<'static, [u8]>,
)> {
    let mut info = Vec::new();
    for m in MIGRATOR.iter() {
        info.push((m.version, m.description.clone(), m.checksum.clone()))
    }
    info
}

pub async fn apply_migrations(config: &DBConfig) -> Result<()> {
    let repo = open_postgres_db(config).await?;
    repo.migrate(config.force_migration).await?;

    #[cfg(feature = "test-tweak")]
    {
        if repo.select_api_keys().await?.is_empty() {
            let mut row = ApiKey::new("test-client");
            row.key = "TEST_API_KEY".into();
            repo.insert_api_key(row).await?;
        }
    }

    Ok(())
}

/// Errors of the entity access layer. Composer errors are client
/// input errors and pass through unchanged for the REST layer to map.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Sql(#[from] SqlError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Binds composer-produced values onto a query in placeholder order.
fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: &[SqlValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v.clone()),
            SqlValue::Int(v) => query.bind(*v),
            SqlValue::Bool(v) => query.bind(*v),
            SqlValue::Numeric(v) => query.bind(v.clone()),
        };
    }
    query
}

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";
const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

#[derive(Debug)]
pub struct Repo {
    pub pool: PgPool,
}

impl Repo {
    pub async fn migrate(&self, force_migration: bool) -> Result<(), MigrateError> {
        loop {
            let Err(migrate_err) = MIGRATOR.run(&self.pool).await else {
                return Ok(());
            };

            if !force_migration {
                return Err(migrate_err);
            }
            warn!(
                "Migration failed with error, force_mode is on, trying to repair. error={:#}",
                migrate_err
            );

            match migrate_err {
                MigrateError::VersionMismatch(v) => {
                    for m in MIGRATOR.iter() {
                        if m.version < v {
                            continue;
                        }

                        sqlx::query("UPDATE _sqlx_migrations SET checksum = $1 WHERE version = $2")
                            .bind(m.checksum.to_vec())
                            .bind(m.version)
                            .execute(&self.pool)
                            .await?;
                    }

                    // try again
                    continue;
                }
                MigrateError::VersionMissing(version) => {
                    sqlx::query("DELETE FROM _sqlx_migrations WHERE version >= $1")
                        .bind(version)
                        .execute(&self.pool)
                        .await?;
                    // try again
                    continue;
                }
                _ => (),
            }
            return Err(migrate_err);
        }
    }

    pub async fn ping(&self) -> Result<()> {
        let _ = sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert_company(&self, company: &NewCompany) -> Result<Company> {
        sqlx::query_as::<_, Company>(
            r#"INSERT INTO companies
               (handle, name, description, num_employees, logo_url)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING handle, name, description, num_employees, logo_url"#,
        )
        .bind(&company.handle)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.num_employees)
        .bind(&company.logo_url)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_company(&self, handle: &str) -> Result<Option<Company>> {
        sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1"
        ))
        .bind(handle)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>, RepoError> {
        let criteria = company_criteria(filter);
        let fragment = build_filter(COMPANY_FILTERS, &criteria)?;

        let mut q = format!("SELECT {COMPANY_COLUMNS} FROM companies");
        if !fragment.is_empty() {
            q.push_str(" WHERE ");
            q.push_str(&fragment.sql);
        }
        q.push_str(" ORDER BY name");

        let query = bind_values(sqlx::query_as::<_, Company>(&q), &fragment.values);
        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn update_company(
        &self,
        handle: &str,
        patch: &CompanyPatch,
    ) -> Result<Option<Company>, RepoError> {
        let mut data: Vec<(&str, SqlValue)> = Vec::new();
        if let Some(v) = &patch.name {
            data.push(("name", v.as_str().into()));
        }
        if let Some(v) = &patch.description {
            data.push(("description", v.as_str().into()));
        }
        if let Some(v) = patch.num_employees {
            data.push(("numEmployees", v.into()));
        }
        if let Some(v) = &patch.logo_url {
            data.push(("logoUrl", v.as_str().into()));
        }

        let fragment = build_update_set(
            &data,
            &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")],
        )?;

        let q = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_COLUMNS}",
            fragment.sql,
            fragment.values.len() + 1,
        );
        let query = bind_values(sqlx::query_as::<_, Company>(&q), &fragment.values)
            .bind(handle.to_owned());
        Ok(query.fetch_optional(&self.pool).await?)
    }

    pub async fn delete_company(&self, handle: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
            .bind(handle)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn insert_job(&self, job: &NewJob) -> Result<Job> {
        sqlx::query_as::<_, Job>(
            r#"INSERT INTO jobs
               (title, salary, equity, company_handle)
               VALUES ($1, $2, $3, $4)
               RETURNING id, title, salary, equity, company_handle"#,
        )
        .bind(&job.title)
        .bind(job.salary)
        .bind(&job.equity)
        .bind(&job.company_handle)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_job(&self, id: i64) -> Result<Option<Job>> {
        sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, RepoError> {
        let criteria = job_criteria(filter);
        let fragment = build_filter(JOB_FILTERS, &criteria)?;

        let mut q = format!("SELECT {JOB_COLUMNS} FROM jobs");
        if !fragment.is_empty() {
            q.push_str(" WHERE ");
            q.push_str(&fragment.sql);
        }
        q.push_str(" ORDER BY id");

        let query = bind_values(sqlx::query_as::<_, Job>(&q), &fragment.values);
        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn list_company_jobs(&self, handle: &str) -> Result<Vec<Job>> {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE company_handle = $1 ORDER BY id"
        ))
        .bind(handle)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn update_job(&self, id: i64, patch: &JobPatch) -> Result<Option<Job>, RepoError> {
        let mut data: Vec<(&str, SqlValue)> = Vec::new();
        if let Some(v) = &patch.title {
            data.push(("title", v.as_str().into()));
        }
        if let Some(v) = patch.salary {
            data.push(("salary", v.into()));
        }
        if let Some(v) = &patch.equity {
            data.push(("equity", v.clone().into()));
        }

        // job fields already match their column names
        let fragment = build_update_set(&data, &[])?;

        let q = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
            fragment.sql,
            fragment.values.len() + 1,
        );
        let query = bind_values(sqlx::query_as::<_, Job>(&q), &fragment.values).bind(id);
        Ok(query.fetch_optional(&self.pool).await?)
    }

    pub async fn delete_job(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn insert_api_key(&self, row: ApiKey) -> Result<()> {
        let _ = sqlx::query(
            "INSERT INTO api_keys (name, key, blocked)
             VALUES($1, $2, $3)",
        )
        .bind(row.name)
        .bind(row.key)
        .bind(row.blocked)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn block_api_key(&self, name: &str) -> Result<()> {
        let _ = sqlx::query("UPDATE api_keys SET blocked = TRUE WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn select_api_keys(&self) -> Result<Vec<ApiKey>> {
        sqlx::query_as::<_, ApiKey>("SELECT * FROM api_keys ")
            .fetch_all(&self.pool)
            .await
    }
}

fn company_criteria(filter: &CompanyFilter) -> Vec<(&str, &str)> {
    let mut criteria = Vec::new();
    if let Some(v) = filter.name_like.as_deref() {
        criteria.push(("nameLike", v));
    }
    if let Some(v) = filter.min_employees.as_deref() {
        criteria.push(("minEmployees", v));
    }
    if let Some(v) = filter.max_employees.as_deref() {
        criteria.push(("maxEmployees", v));
    }
    criteria
}

fn job_criteria(filter: &JobFilter) -> Vec<(&str, &str)> {
    let mut criteria = Vec::new();
    if let Some(v) = filter.title_like.as_deref() {
        criteria.push(("titleLike", v));
    }
    if let Some(v) = filter.min_salary.as_deref() {
        criteria.push(("minSalary", v));
    }
    if let Some(v) = filter.has_equity.as_deref() {
        criteria.push(("hasEquity", v));
    }
    criteria
}

#[cfg(test)]
mod tests {
    use jobdesk_api::{CompanyFilter, JobFilter};

    use super::*;

    #[test]
    fn test_company_criteria_skips_absent_fields() {
        let filter = CompanyFilter {
            name_like: Some("net".into()),
            min_employees: None,
            max_employees: Some("10".into()),
        };
        let criteria = company_criteria(&filter);
        assert_eq!(criteria, vec![("nameLike", "net"), ("maxEmployees", "10")]);
    }

    #[test]
    fn test_job_criteria_keeps_raw_values() {
        let filter = JobFilter {
            title_like: None,
            min_salary: Some("not-a-number".into()),
            has_equity: Some("true".into()),
        };
        let criteria = job_criteria(&filter);
        assert_eq!(
            criteria,
            vec![("minSalary", "not-a-number"), ("hasEquity", "true")]
        );
    }
}
