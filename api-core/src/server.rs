use std::str::FromStr;

use actix_cors::Cors;
use actix_web::dev::Service;
use actix_web::http::header::HeaderName;
use actix_web::middleware::Condition;
use actix_web::{http, middleware, web, App, HttpResponse, HttpServer, Scope};
use serde::{Deserialize, Serialize};
use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::api_errors::ApiError;

#[derive(Default, Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "defaults::listen_address")]
    pub listen_address: String,
    #[serde(default = "defaults::api_port")]
    pub port: u16,
    #[serde(default)]
    pub enable_cors: bool,
    #[serde(default)]
    pub cors_domain: String,
    #[serde(default)]
    pub allowed_headers: Vec<String>,
}

mod defaults {
    pub fn listen_address() -> String {
        "127.0.0.1".into()
    }

    pub fn api_port() -> u16 {
        3000
    }
}

pub trait APIProvider: Clone + Send {
    fn name(&self) -> &'static str {
        "api"
    }
    fn service(&self) -> Scope;
}

pub async fn run_server<F>(
    config: Config,
    cancel: CancellationToken,
    api_service: F,
) -> std::io::Result<()>
where
    F: APIProvider + 'static,
{
    let host = format!("{}:{}", config.listen_address, config.port);
    let service_name = api_service.name();

    log::info!("Starting [{service_name}] server at http://{}", host.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(
                web::JsonConfig::default()
                    .limit(1024 * 1024 * 5)
                    .error_handler(|err, _| ApiError::from(err).into()),
            )
            .wrap(middleware::Logger::default())
            .wrap(Condition::new(
                config.enable_cors,
                cors(&config.cors_domain, &config.allowed_headers),
            ))
            .wrap_fn(|req, srv| {
                let fut = srv.call(req);
                async {
                    let res = fut.await;
                    match res {
                        Ok(res) => Ok(res),
                        Err(err) => {
                            log::error!("catch response error: {err:?}");
                            Err(err)
                        }
                    }
                }
            })
            .service(api_service.service())
            .default_service(web::to(not_found))
    })
    .bind(host)?;

    select! {
        _ = cancel.cancelled() => {
            log::info!("[{service_name}] server received cancel signal");
        }
        res = server.run() => {
            res?;
        }
    }

    log::info!("[{service_name}] server stopped");
    Ok(())
}

async fn not_found() -> HttpResponse {
    crate::api_errors::not_found("no such route").into()
}

pub fn cors(cors_domain: &str, allowed_headers: &[String]) -> Cors {
    let mut headers = vec![
        http::header::AUTHORIZATION,
        http::header::ACCEPT,
        http::header::CONTENT_TYPE,
        // our headers
        HeaderName::from_static("x-api-key"),
    ];

    let extra: Vec<_> = allowed_headers
        .iter()
        .filter_map(|h| HeaderName::from_str(h.as_str()).ok())
        .collect();
    headers.extend(extra);

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(headers)
        .max_age(3600);

    if cors_domain == "*" || cors_domain.is_empty() {
        cors = cors.allow_any_origin();
    } else {
        cors = cors.allowed_origin(cors_domain).supports_credentials();
    }

    cors
}
