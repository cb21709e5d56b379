pub mod api;
pub mod api_companies;
pub mod api_jobs;
pub mod auth_middleware;
pub mod context;
