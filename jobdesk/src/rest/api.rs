use actix_web::middleware::from_fn;
use actix_web::web::{delete, get, patch, post, resource, scope, Data, Json};
use actix_web::{HttpResponse, Responder, Scope};
use api_core::server::APIProvider;
use jobdesk_api::StatusResponse;

use super::api_companies::*;
use super::api_jobs::*;
use super::auth_middleware::ensure_api_key;
use super::context::Context;

#[derive(Clone)]
pub struct Service {
    pub context: Context,
}

impl Service {
    pub async fn new(cfg: crate::config::Config) -> anyhow::Result<Self> {
        let context = Context::new(cfg).await?;
        Ok(Self { context })
    }
}

impl APIProvider for Service {
    fn name(&self) -> &'static str {
        "jobdesk_api"
    }

    fn service(&self) -> Scope {
        scope("/v1")
            .app_data(Data::new(self.context.clone()))
            .service(resource("/healthcheck").route(get().to(healthcheck)))
            .service(resource("/version").route(get().to(version)))
            .service(resource("/status").route(get().to(service_status)))
            .service(
                scope("")
                    .wrap(from_fn(ensure_api_key))
                    .service(
                        resource("/companies")
                            .route(get().to(list_companies))
                            .route(post().to(create_company)),
                    )
                    .service(
                        resource("/companies/{handle}")
                            .route(get().to(get_company))
                            .route(patch().to(patch_company))
                            .route(delete().to(delete_company)),
                    )
                    .service(
                        resource("/jobs")
                            .route(get().to(list_jobs))
                            .route(post().to(create_job)),
                    )
                    .service(
                        resource("/jobs/{id}")
                            .route(get().to(get_job))
                            .route(patch().to(patch_job))
                            .route(delete().to(delete_job)),
                    ),
            )
    }
}

async fn healthcheck(state: Data<Context>) -> impl Responder {
    let status = state.service_status().await;
    if status.healthy {
        HttpResponse::Ok().finish()
    } else {
        HttpResponse::ServiceUnavailable().finish()
    }
}

async fn version() -> impl Responder {
    let info = api_core::get_app_info!();
    HttpResponse::Ok().json(info)
}

async fn service_status(state: Data<Context>) -> Json<StatusResponse> {
    let status = state.service_status().await;
    Json(status)
}
