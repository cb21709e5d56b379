use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::web::Data;
use actix_web::Error;

const AUTH_HEADER: &str = "x-api-key";
use super::context::Context;

pub async fn ensure_api_key(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let (request, _) = req.parts();

    let Some(token) = request
        .headers()
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
    else {
        return Err(api_core::api_errors::access_denied().into());
    };

    let state = req
        .app_data::<Data<Context>>()
        .expect("Context should be present")
        .clone();

    let Some(api_key) = state.get_api_key(token) else {
        return Err(api_core::api_errors::access_denied().into());
    };
    if api_key.blocked {
        return Err(api_core::api_errors::forbidden().into());
    }

    // invoke the wrapped middleware or service
    next.call(req).await
}
