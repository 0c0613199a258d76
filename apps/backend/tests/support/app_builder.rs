use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use bubble_backend::middleware::request_trace::RequestTrace;
use bubble_backend::middleware::structured_logger::StructuredLogger;
use bubble_backend::middleware::trace_span::TraceSpan;
use bubble_backend::routes;
use bubble_backend::state::app_state::AppState;

/// Build an in-process service with the production routes and tracing
/// middleware. CORS is left out; it has no effect on same-origin test calls.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let data = web::Data::new(state);

    test::init_service(
        App::new()
            .app_data(data)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .configure(routes::configure),
    )
    .await
}
